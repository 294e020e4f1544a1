//! Timetable input: raw record shapes (spec §6.2) and the CSV
//! convenience loader built on top of them.

mod csv_loader;
pub mod records;

pub use csv_loader::from_csv_dir;
