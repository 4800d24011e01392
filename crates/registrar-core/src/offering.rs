//! Course offerings and the offering schedule.
//!
//! An offering binds one shared course reference to a room, a date, and a
//! dedicated attendee roster. Offerings themselves are never shared: each
//! lives in exactly one [`OfferingList`], carries no share count, and is
//! dismantled directly when the schedule is torn down.

use crate::{
    course::{Course, CourseId},
    entity::Entity,
    store::{Detach, EntityStore, ShareError},
    student::{Student, StudentList},
};

/// A scheduled instance of a course with its own attendee roster.
#[derive(Debug)]
pub struct CourseOffering {
    course: CourseId,
    room: String,
    date: String,
    attendees: StudentList,
}

impl CourseOffering {
    /// Bind a course to a room and date, attaching the course and creating
    /// an empty attendee roster of the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Stale`] if the course was already finalized.
    pub fn new(
        courses: &mut EntityStore<Course>,
        course: CourseId,
        room: &str,
        date: &str,
        attendee_capacity: usize,
    ) -> Result<Self, ShareError> {
        courses.attach(course)?;
        Ok(Self {
            course,
            room: room.to_string(),
            date: date.to_string(),
            attendees: StudentList::new(attendee_capacity),
        })
    }

    /// The offered course.
    pub fn course(&self) -> CourseId {
        self.course
    }

    /// Room the offering is held in.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Starting date, kept as an opaque string.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The attendee roster.
    pub fn attendees(&self) -> &StudentList {
        &self.attendees
    }

    pub(crate) fn attendees_mut(&mut self) -> &mut StudentList {
        &mut self.attendees
    }

    /// Identity query: course name equality and exact date equality. The
    /// course name alone is not a unique key for an offering.
    pub fn matches(&self, courses: &EntityStore<Course>, name: &str, date: &str) -> bool {
        self.date == date && courses.get(self.course).is_ok_and(|course| course.matches(name))
    }

    /// Short rendering: `course (date)`.
    pub fn summary(&self, courses: &EntityStore<Course>) -> String {
        let name = courses.get(self.course).map_or_else(|_| "?".to_string(), |c| c.summary());
        format!("{name} ({})", self.date)
    }

    /// Full rendering: course, room, date, and attendee names.
    pub fn detail(
        &self,
        courses: &EntityStore<Course>,
        students: &EntityStore<Student>,
    ) -> String {
        let name = courses.get(self.course).map_or_else(|_| "?".to_string(), |c| c.summary());
        format!(
            "Offering: {name}\nRoom: {}\nDate: {}\nAttendees: {}",
            self.room,
            self.date,
            self.attendees.summaries(students).join(", "),
        )
    }

    /// Detach the course and release the attendee roster.
    ///
    /// Returns the course payload if this offering held its last share,
    /// plus any students finalized by the roster release. The caller owns
    /// the cascade from there.
    pub(crate) fn dismantle(
        mut self,
        courses: &mut EntityStore<Course>,
        students: &mut EntityStore<Student>,
    ) -> (Option<Course>, Vec<Student>) {
        let course = match courses.detach(self.course) {
            Ok(Detach::Finalized(course)) => Some(course),
            Ok(Detach::Held { .. }) => None,
            Err(error) => {
                tracing::warn!(course = ?self.course, %error, "offering course failed to detach");
                None
            },
        };
        let finalized = self.attendees.release(students);
        (course, finalized)
    }
}

/// Index of an offering in its [`OfferingList`].
///
/// Offerings are never removed individually, only drained wholesale when
/// the registry tears down, so an id stays valid for the schedule's
/// lifetime and a drained schedule reports every old id as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OfferingId(pub(crate) u32);

/// Bounded schedule of offerings, owning them outright.
///
/// Unlike entity rosters there is no attach/detach here: each offering has
/// exactly one owner, so the schedule dismantles its offerings directly
/// instead of consulting a share count.
#[derive(Debug)]
pub struct OfferingList {
    capacity: usize,
    entries: Vec<CourseOffering>,
}

impl OfferingList {
    /// Create an empty schedule holding at most `capacity` offerings.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Number of scheduled offerings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the schedule is at capacity.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Maximum number of offerings, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take ownership of an offering. Returns `None` with no mutation when
    /// the schedule is full.
    pub fn add(&mut self, offering: CourseOffering) -> Option<OfferingId> {
        if self.is_full() {
            return None;
        }
        let id = OfferingId(self.entries.len() as u32);
        self.entries.push(offering);
        Some(id)
    }

    /// Borrow an offering.
    pub fn get(&self, id: OfferingId) -> Option<&CourseOffering> {
        self.entries.get(id.0 as usize)
    }

    /// Borrow an offering mutably.
    pub fn get_mut(&mut self, id: OfferingId) -> Option<&mut CourseOffering> {
        self.entries.get_mut(id.0 as usize)
    }

    /// First offering matching course name and date, in insertion order.
    pub fn find(
        &self,
        courses: &EntityStore<Course>,
        name: &str,
        date: &str,
    ) -> Option<OfferingId> {
        self.entries
            .iter()
            .position(|offering| offering.matches(courses, name, date))
            .map(|index| OfferingId(index as u32))
    }

    /// Short renderings of every offering, in insertion order.
    pub fn summaries(&self, courses: &EntityStore<Course>) -> Vec<String> {
        self.entries.iter().map(|offering| offering.summary(courses)).collect()
    }

    /// Remove and yield every offering for teardown.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, CourseOffering> {
        self.entries.drain(..)
    }
}
