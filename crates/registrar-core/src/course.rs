//! Course entity.

use crate::{
    entity::Entity,
    roster::Roster,
    store::{EntityId, EntityStore},
};

/// Handle to a course in the registry's course store.
pub type CourseId = EntityId<Course>;

/// Bounded roster of shared course references.
pub type CourseList = Roster<Course>;

/// A course: name, description, duration, and its prerequisite list.
///
/// The prerequisite list is owned outright by the course, but its entries
/// are shared references into the course store; the course holds a share
/// on each prerequisite for as long as the entry exists.
#[derive(Debug)]
pub struct Course {
    name: String,
    description: String,
    duration: u32,
    prereqs: CourseList,
}

impl Course {
    /// Create a course with an empty prerequisite list of the given
    /// capacity.
    pub fn new(name: &str, description: &str, duration: u32, prereq_capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            duration,
            prereqs: CourseList::new(prereq_capacity),
        }
    }

    /// Course description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Course duration, in whatever unit the caller registered.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// The prerequisite list.
    pub fn prereqs(&self) -> &CourseList {
        &self.prereqs
    }

    pub(crate) fn prereqs_mut(&mut self) -> &mut CourseList {
        &mut self.prereqs
    }

    /// Whether a student with `taken` courses satisfies this course's
    /// prerequisites: every prerequisite must appear in `taken`, by
    /// identity.
    pub fn check_prereq(&self, taken: &CourseList) -> bool {
        taken.contains_all(&self.prereqs)
    }

    /// Full rendering: attributes plus prerequisite names resolved through
    /// the course store.
    pub fn detail(&self, courses: &EntityStore<Course>) -> String {
        format!(
            "Course: {}\nDescription: {}\nDuration: {}\nPrerequisites: {}",
            self.name,
            self.description,
            self.duration,
            self.prereqs.summaries(courses).join(", "),
        )
    }
}

impl Entity for Course {
    fn name(&self) -> &str {
        &self.name
    }
}
