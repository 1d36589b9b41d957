pub mod csv_export;
pub mod error;
pub mod json_report;
pub mod report;
pub mod summary;
