//! Domain types and rules for the Rubric course-materials storefront.
//!
//! Nothing in this crate performs I/O; the database and HTTP layers build on
//! these types.

pub mod access;
pub mod error;
pub mod level;
pub mod price;
pub mod taxonomy;
pub mod types;
pub mod uploads;
