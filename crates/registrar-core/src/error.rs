//! Registry error types.
//!
//! Everything here is recoverable. Capacity exhaustion and lookup failure
//! are ordinary results reported to the caller; nothing in the registry
//! aborts. Admission refusal is not an error at all, see
//! [`Admission`](crate::Admission).

use crate::store::ShareError;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The course catalog is at capacity.
    #[error("course catalog is full ({capacity} courses)")]
    CatalogFull {
        /// Catalog capacity.
        capacity: usize,
    },

    /// The student body is at capacity.
    #[error("student body is full ({capacity} students)")]
    StudentBodyFull {
        /// Student body capacity.
        capacity: usize,
    },

    /// The offering schedule is at capacity.
    #[error("offering schedule is full ({capacity} offerings)")]
    ScheduleFull {
        /// Schedule capacity.
        capacity: usize,
    },

    /// A course's prerequisite list is at capacity.
    #[error("prerequisite list of {course} is full ({capacity} entries)")]
    PrerequisitesFull {
        /// Name of the course whose list overflowed.
        course: String,
        /// Prerequisite list capacity.
        capacity: usize,
    },

    /// A student's taken-course list is at capacity.
    #[error("taken-course list of {student} is full ({capacity} entries)")]
    TakenFull {
        /// Name of the student whose list overflowed.
        student: String,
        /// Taken-course list capacity.
        capacity: usize,
    },

    /// An offering's attendee roster is at capacity.
    #[error("attendee roster is full ({capacity} students)")]
    AttendeesFull {
        /// Attendee roster capacity.
        capacity: usize,
    },

    /// A course id did not resolve to a live course.
    #[error("unknown course")]
    UnknownCourse,

    /// A student id did not resolve to a live student.
    #[error("unknown student")]
    UnknownStudent,

    /// An offering id did not resolve to a scheduled offering.
    #[error("unknown offering")]
    UnknownOffering,

    /// No registered course carries this name.
    #[error("no course named {name}")]
    CourseNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// No registered student carries this name.
    #[error("no student named {name}")]
    StudentNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// No offering matches this course name and date.
    #[error("no offering of {name} on {date}")]
    OfferingNotFound {
        /// Course name that was looked up.
        name: String,
        /// Date that was looked up.
        date: String,
    },

    /// Share-count bookkeeping failed, meaning a hold the registry relies
    /// on was lost. Surfaced rather than hidden; should not occur through
    /// the public API.
    #[error(transparent)]
    Share(#[from] ShareError),
}

impl RegistryError {
    /// Whether this is a capacity-exhaustion error, as opposed to a lookup
    /// failure.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            Self::CatalogFull { .. }
                | Self::StudentBodyFull { .. }
                | Self::ScheduleFull { .. }
                | Self::PrerequisitesFull { .. }
                | Self::TakenFull { .. }
                | Self::AttendeesFull { .. }
        )
    }
}
