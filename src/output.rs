//! Flat text output of simulated charge data.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Error, TimeSeries};

/// First line of every data file.
pub const HEADER: &str = "Time (s) : Q Value of Capacitor";

/// How data should be saved to file.
#[derive(Debug)]
pub struct SaveSettings<P: AsRef<Path>> {
    /// The path to the save file.
    pub filename: P,
    /// Whether or not to overwrite an existing file.
    pub overwrite: bool,
}

/// Write a charge series as text.
///
/// Format:
/// ```text
/// Time (s) : Q Value of Capacitor
///
/// 0: 0.0000001
/// 0.000001: 0.00000009950...
/// ```
pub fn write_series<W: Write>(series: &TimeSeries, writer: &mut W) -> Result<(), Error> {
    writeln!(writer, "{}", HEADER)?;
    writeln!(writer)?;
    for (t, q) in series.iter() {
        writeln!(writer, "{}: {}", t, q)?;
    }
    Ok(())
}

/// Saves a charge series to file.
///
/// Returns whether the file was created and written. Failures are logged and
/// never propagated.
pub fn save<P: AsRef<Path>>(series: &TimeSeries, settings: &SaveSettings<P>) -> bool {
    let filename = settings.filename.as_ref();

    match try_save(series, filename, settings.overwrite) {
        Ok(()) => {
            tracing::info!(path = %filename.display(), samples = series.len(), "saved charge data");
            true
        }
        Err(err) => {
            tracing::warn!(path = %filename.display(), error = %err, "could not save charge data");
            false
        }
    }
}

fn try_save(series: &TimeSeries, filename: &Path, overwrite: bool) -> Result<(), Error> {
    let file = if overwrite {
        File::create(filename)?
    } else {
        OpenOptions::new().write(true).create_new(true).open(filename)?
    };

    let mut writer = BufWriter::new(file);
    write_series(series, &mut writer)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_series() -> TimeSeries {
        TimeSeries::new(
            ndarray::arr1(&[0.0, 0.5, 1.0]),
            ndarray::arr1(&[1e-7, 2.5, -0.125]),
        )
        .unwrap()
    }

    #[test]
    fn writes_header_blank_line_and_samples() {
        let mut buffer = Vec::new();
        write_series(&small_series(), &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Time (s) : Q Value of Capacitor\n\n0: 0.0000001\n0.5: 2.5\n1: -0.125\n",
        );
    }

    #[test]
    fn save_reports_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datafile.txt");

        let created = save(&small_series(), &SaveSettings { filename: &path, overwrite: true });

        assert!(created);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(HEADER));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn missing_directory_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("datafile.txt");

        let created = save(&small_series(), &SaveSettings { filename: &path, overwrite: true });

        assert!(!created);
        assert!(!path.exists());
    }

    #[test]
    fn existing_file_is_kept_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datafile.txt");
        std::fs::write(&path, "keep me").unwrap();

        let created = save(&small_series(), &SaveSettings { filename: &path, overwrite: false });

        assert!(!created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }
}
