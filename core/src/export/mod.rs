pub mod csv;

pub use self::csv::{Column, CsvExporter};
