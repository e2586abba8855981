//! Idempotent insertion of the static faculty/course taxonomy.

use rubric_core::taxonomy::FacultySeed;

use crate::models::course::CreateCourse;
use crate::models::faculty::CreateFaculty;
use crate::repositories::{CourseRepo, FacultyRepo};
use crate::DbPool;

/// Counts of rows inserted by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub faculties_inserted: usize,
    pub courses_inserted: usize,
}

/// Insert every faculty and course in `taxonomy` that does not exist yet.
///
/// The faculty's department is set to its name. Running this twice inserts
/// nothing the second time.
pub async fn seed_catalog(
    pool: &DbPool,
    taxonomy: &[FacultySeed],
) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    for entry in taxonomy {
        let (faculty, inserted) = FacultyRepo::create_if_absent(
            pool,
            &CreateFaculty {
                name: entry.name.to_string(),
                department: entry.name.to_string(),
            },
        )
        .await?;
        if inserted {
            report.faculties_inserted += 1;
        }

        for course in entry.courses {
            let inserted = CourseRepo::create_if_absent(
                pool,
                &CreateCourse {
                    name: (*course).to_string(),
                    faculty_id: faculty.id,
                },
            )
            .await?;
            if inserted {
                report.courses_inserted += 1;
            }
        }

        tracing::debug!(faculty = entry.name, faculty_id = faculty.id, "Seeded faculty");
    }

    Ok(report)
}
