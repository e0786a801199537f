//! # courtwatch parser
//!
//! Everything that touches the booking site's HTML:
//!
//! - `grid`: rebuilds the logical schedule matrix from a table with merged cells
//! - `normalize`: turns bookable cells into canonical slots
//! - `schedule`: document-level extraction for one resource and date
//! - `client`: rate-limited HTTP access to schedule and directory pages
//! - `directory`: district and club listings
//! - `cache`: in-memory TTL cache in front of the directory

pub mod cache;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod rate_limit;
pub mod schedule;

pub use cache::CachedDirectory;
pub use client::{RawDocument, ResourceDirectory, ScheduleSource, SiteClient};
pub use config::FetchConfig;
pub use error::FetchError;
pub use schedule::{ScheduleRequest, parse_schedule};
