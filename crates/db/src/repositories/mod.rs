//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audio_repo;
pub mod course_repo;
pub mod faculty_repo;
pub mod payment_repo;
pub mod purchase_repo;
pub mod user_repo;

pub use audio_repo::AudioRepo;
pub use course_repo::CourseRepo;
pub use faculty_repo::FacultyRepo;
pub use payment_repo::PaymentRepo;
pub use purchase_repo::PurchaseRepo;
pub use user_repo::UserRepo;
