pub mod admin;
pub mod auth;
pub mod catalog;
pub mod commerce;
pub mod home;
pub mod multipart;
pub mod profile;
