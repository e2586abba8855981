//! Read-only drill-down through faculties, courses and audio items.

use rubric_core::error::CoreError;
use rubric_core::level::Level;
use rubric_core::types::DbId;
use rubric_db::models::audio::Audio;
use rubric_db::models::course::Course;
use rubric_db::models::faculty::Faculty;
use rubric_db::repositories::{AudioRepo, CourseRepo, FacultyRepo};
use rubric_db::DbPool;

use crate::error::AppResult;

/// Resolve a level from a URL segment. Unknown levels are not found.
pub fn level_from_path(raw: i32) -> Result<Level, CoreError> {
    Level::try_from(raw).map_err(|_| CoreError::NotFound {
        entity: "Level",
        id: DbId::from(raw),
    })
}

/// Faculties offering at least one course with at least one audio item at
/// `level`.
pub async fn faculties_at_level(pool: &DbPool, level: Level) -> AppResult<Vec<Faculty>> {
    Ok(FacultyRepo::list_by_level(pool, level).await?)
}

/// A faculty and its courses.
pub async fn faculty_courses(pool: &DbPool, faculty_id: DbId) -> AppResult<(Faculty, Vec<Course>)> {
    let faculty = FacultyRepo::find_by_id(pool, faculty_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Faculty",
            id: faculty_id,
        })?;
    let courses = CourseRepo::list_by_faculty(pool, faculty_id).await?;
    Ok((faculty, courses))
}

/// A course and every audio item attached to it.
///
/// The list is not narrowed by level: a course page shows all of its audio.
pub async fn course_audios(pool: &DbPool, course_id: DbId) -> AppResult<(Course, Vec<Audio>)> {
    let course = CourseRepo::find_by_id(pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;
    let audios = AudioRepo::list_by_course(pool, course_id).await?;
    Ok((course, audios))
}

/// Check that `course` belongs to `faculty_id`. A course reached through
/// the wrong faculty is not found.
pub fn ensure_course_in_faculty(course: &Course, faculty_id: DbId) -> Result<(), CoreError> {
    if course.faculty_id != faculty_id {
        return Err(CoreError::NotFound {
            entity: "Course",
            id: course.id,
        });
    }
    Ok(())
}

/// A course looked up through its faculty.
pub async fn course_of_faculty(
    pool: &DbPool,
    faculty_id: DbId,
    course_id: DbId,
) -> AppResult<Course> {
    let course = CourseRepo::find_by_id(pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;
    ensure_course_in_faculty(&course, faculty_id)?;
    Ok(course)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn known_levels_resolve() {
        assert_eq!(level_from_path(300).unwrap(), Level::L300);
    }

    #[test]
    fn unknown_level_is_not_found() {
        assert_matches!(
            level_from_path(500),
            Err(CoreError::NotFound { entity: "Level", id: 500 })
        );
    }

    #[test]
    fn course_under_other_faculty_is_not_found() {
        let now = chrono::Utc::now();
        let course = Course {
            id: 9,
            name: "Law".into(),
            faculty_id: 5,
            created_at: now,
            updated_at: now,
        };
        assert!(ensure_course_in_faculty(&course, 5).is_ok());
        assert_matches!(
            ensure_course_in_faculty(&course, 1),
            Err(CoreError::NotFound { entity: "Course", id: 9 })
        );
    }
}
