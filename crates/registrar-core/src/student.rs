//! Student entity.

use crate::{
    course::{Course, CourseList},
    entity::Entity,
    roster::Roster,
    store::{EntityId, EntityStore},
};

/// Handle to a student in the registry's student store.
pub type StudentId = EntityId<Student>;

/// Bounded roster of shared student references.
pub type StudentList = Roster<Student>;

/// A student: name, ssn, age, and the courses they have taken.
///
/// The taken-course list is owned outright by the student; its entries are
/// shared references into the course store, each held for as long as the
/// entry exists.
#[derive(Debug)]
pub struct Student {
    name: String,
    ssn: String,
    age: u32,
    taken: CourseList,
}

impl Student {
    /// Create a student with an empty taken-course list of the given
    /// capacity.
    pub fn new(name: &str, ssn: &str, age: u32, taken_capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            ssn: ssn.to_string(),
            age,
            taken: CourseList::new(taken_capacity),
        }
    }

    /// Social security number, kept as an opaque string.
    pub fn ssn(&self) -> &str {
        &self.ssn
    }

    /// Student age.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Courses the student has taken.
    pub fn taken(&self) -> &CourseList {
        &self.taken
    }

    pub(crate) fn taken_mut(&mut self) -> &mut CourseList {
        &mut self.taken
    }

    /// Full rendering: attributes plus taken-course names resolved through
    /// the course store.
    pub fn detail(&self, courses: &EntityStore<Course>) -> String {
        format!(
            "Student: {}\nSSN: {}\nAge: {}\nCourses taken: {}",
            self.name,
            self.ssn,
            self.age,
            self.taken.summaries(courses).join(", "),
        )
    }
}

impl Entity for Student {
    fn name(&self) -> &str {
        &self.name
    }
}
