//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is mutable

pub mod audio;
pub mod course;
pub mod faculty;
pub mod payment;
pub mod purchase;
pub mod user;
