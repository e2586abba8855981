//! Static faculty/course taxonomy inserted by `rubric-seed catalog`.

/// A faculty and the courses it offers.
#[derive(Debug, Clone, Copy)]
pub struct FacultySeed {
    pub name: &'static str,
    pub courses: &'static [&'static str],
}

pub const FACULTIES: &[FacultySeed] = &[
    FacultySeed {
        name: "Faculty of Agriculture",
        courses: &[
            "Agricultural Economics",
            "Agricultural Extension",
            "Animal Science",
            "Crop Science",
            "Food Science",
            "Forestry",
            "Soil Science",
        ],
    },
    FacultySeed {
        name: "Faculty of Arts",
        courses: &[
            "English Language & Literature",
            "Fine & Applied Arts",
            "French",
            "History",
            "Linguistics",
            "Philosophy",
            "Religious Studies",
            "Theatre Arts",
        ],
    },
    FacultySeed {
        name: "Faculty of Education",
        courses: &[
            "Adult Education",
            "Education",
            "Educational Management",
            "Guidance & Counseling",
            "Library Science",
            "Physical Education",
            "Primary Education",
            "Special Education",
        ],
    },
    FacultySeed {
        name: "Faculty of Engineering",
        courses: &[
            "Agricultural Engineering",
            "Chemical Engineering",
            "Civil Engineering",
            "Computer Engineering",
            "Electrical/Electronic Engineering",
            "Mechanical Engineering",
            "Petroleum Engineering",
        ],
    },
    FacultySeed {
        name: "Faculty of Law",
        courses: &["Law"],
    },
    FacultySeed {
        name: "Faculty of Life Sciences",
        courses: &["Biochemistry", "Botany", "Microbiology", "Zoology"],
    },
    FacultySeed {
        name: "Faculty of Management Sciences",
        courses: &[
            "Accounting",
            "Banking & Finance",
            "Business Administration",
            "Marketing",
            "Public Administration",
        ],
    },
    FacultySeed {
        name: "Faculty of Pharmacy",
        courses: &["Pharmacy", "Pharmacology"],
    },
    FacultySeed {
        name: "Faculty of Physical Sciences",
        courses: &[
            "Chemistry",
            "Computer Science",
            "Geology",
            "Mathematics",
            "Physics",
        ],
    },
    FacultySeed {
        name: "Faculty of Social Sciences",
        courses: &[
            "Economics",
            "Geography",
            "Mass Communication",
            "Sociology",
            "Statistics",
        ],
    },
    FacultySeed {
        name: "College of Medical Sciences",
        courses: &[
            "Anatomy",
            "Biochemistry",
            "Medicine",
            "Nursing",
            "Optometry",
            "Physiology",
            "Pharmacy",
        ],
    },
    FacultySeed {
        name: "Faculty of Environmental Sciences",
        courses: &[
            "Architecture",
            "Building",
            "Estate Management",
            "Environmental Science",
            "Quantity Surveying",
            "Urban and Regional Planning",
        ],
    },
];

/// Total number of courses across all seeded faculties.
pub fn course_count() -> usize {
    FACULTIES.iter().map(|f| f.courses.len()).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn twelve_faculties_with_courses() {
        assert_eq!(FACULTIES.len(), 12);
        assert!(FACULTIES.iter().all(|f| !f.courses.is_empty()));
        assert_eq!(course_count(), 65);
    }

    #[test]
    fn faculty_names_are_unique() {
        let names: HashSet<_> = FACULTIES.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FACULTIES.len());
    }

    #[test]
    fn course_names_unique_within_faculty() {
        for faculty in FACULTIES {
            let names: HashSet<_> = faculty.courses.iter().collect();
            assert_eq!(names.len(), faculty.courses.len(), "{}", faculty.name);
        }
    }
}
