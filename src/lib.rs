//! A RAPTOR (Round-bAsed Public Transit Optimized Router) engine over a
//! static timetable: load a columnar schedule, then run point-to-point
//! and isochrone searches against it.
//!
//! ```no_run
//! use transit_raptor::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let timetable = from_csv_dir(std::path::Path::new("timetable/"))?;
//! let query = Query::new(
//!     vec!["stop_a".to_string()],
//!     vec!["stop_b".to_string()],
//!     "2026-07-27",
//!     8 * 3600,
//!     4,
//!     false,
//!     None,
//! )?;
//! let journey = point_to_point(&timetable, &query)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod query;
pub mod routing;
