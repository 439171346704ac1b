use crate::prelude::{SynthError, SynthResult};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{MetricsRecorder, MetricsSnapshot};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Named column of samples.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
}

impl<'a> Column<'a> {
    pub fn new(name: &'a str, values: &'a [f64]) -> Self {
        Self { name, values }
    }
}

/// Writes equal-length columns as a CSV table with a header row and no index.
pub struct CsvExporter {
    path: PathBuf,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl CsvExporter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("export"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Writes the table and returns the number of data rows.
    pub fn write(&self, columns: &[Column<'_>]) -> SynthResult<usize> {
        let rows = check_columns(columns)?;
        match self.write_rows(columns, rows) {
            Ok(()) => {
                self.metrics.record_rows(rows);
                self.logger
                    .record(&format!("wrote {} rows to {}", rows, self.path.display()));
                Ok(rows)
            }
            Err(err) => {
                self.metrics.record_error();
                Err(err.into())
            }
        }
    }

    fn write_rows(&self, columns: &[Column<'_>], rows: usize) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        let header: Vec<&str> = columns.iter().map(|c| c.name).collect();
        writeln!(writer, "{}", header.join(","))?;

        for row in 0..rows {
            for (idx, column) in columns.iter().enumerate() {
                if idx > 0 {
                    writer.write_all(b",")?;
                }
                write!(writer, "{}", column.values[row])?;
            }
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

fn check_columns(columns: &[Column<'_>]) -> SynthResult<usize> {
    let first = columns
        .first()
        .ok_or_else(|| SynthError::InvalidInput("no columns to export".into()))?;

    for column in columns {
        if column.name.is_empty() || column.name.contains([',', '"', '\n', '\r']) {
            return Err(SynthError::InvalidInput(format!(
                "column name {:?} is not a plain CSV field",
                column.name
            )));
        }
        if column.values.len() != first.values.len() {
            return Err(SynthError::ColumnLength {
                name: column.name.to_string(),
                expected: first.values.len(),
                actual: column.values.len(),
            });
        }
    }
    Ok(first.values.len())
}
