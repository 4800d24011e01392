//! Operations for model-based testing.
//!
//! Operations represent every action the registry supports. They are
//! generated randomly (by proptest strategies and by the fuzzer through
//! `Arbitrary`) and applied to both the model and the real registry.
//!
//! Entity references are compact `u8` selectors mapped onto created
//! entities modulo count, so random sequences mostly hit live entities.

use arbitrary::Arbitrary;

/// Operations that can be applied to the registry.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Register a course.
    CreateCourse {
        /// Seed expanded into the course name.
        name_seed: u8,
    },

    /// Register a student.
    CreateStudent {
        /// Seed expanded into the student name.
        name_seed: u8,
    },

    /// Attach a prerequisite to a course. Duplicates and
    /// self-prerequisites are allowed.
    AddPrerequisite {
        /// Selector of the course, modulo created courses.
        course: u8,
        /// Selector of the prerequisite, modulo created courses.
        prereq: u8,
    },

    /// Attach a taken course to a student.
    AddCourseToStudent {
        /// Selector of the student, modulo created students.
        student: u8,
        /// Selector of the course, modulo created courses.
        course: u8,
    },

    /// Schedule an offering of a course.
    CreateOffering {
        /// Selector of the course, modulo created courses.
        course: u8,
        /// Seed expanded into the room name.
        room_seed: u8,
        /// Seed expanded into the date string.
        date_seed: u8,
    },

    /// Enroll a student into an offering.
    Enroll {
        /// Selector of the offering, modulo scheduled offerings.
        offering: u8,
        /// Selector of the student, modulo created students.
        student: u8,
    },
}

/// Course name derived from a seed, shared by model and real sides.
pub fn course_name(seed: u8) -> String {
    format!("course-{seed}")
}

/// Student name derived from a seed.
pub fn student_name(seed: u8) -> String {
    format!("student-{seed}")
}

/// Room name derived from a seed.
pub fn room_name(seed: u8) -> String {
    format!("room-{}", seed % 16)
}

/// Date string derived from a seed.
pub fn date_name(seed: u8) -> String {
    format!("2024-{:02}-01", seed % 12 + 1)
}

/// Result of applying an operation, compared between model and real.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Operation succeeded.
    Ok,

    /// Enrollment succeeded and the student was admitted.
    Admitted,

    /// Enrollment ran but the student was declined. A normal outcome,
    /// kept distinct from errors.
    Refused,

    /// Operation failed with an expected error.
    Error(OutcomeError),
}

/// Expected errors during operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeError {
    /// A course selector with no created courses to resolve against.
    NoCourses,

    /// A student selector with no created students.
    NoStudents,

    /// An offering selector with no scheduled offerings.
    NoOfferings,

    /// Course catalog at capacity.
    CatalogFull,

    /// Student body at capacity.
    StudentBodyFull,

    /// Offering schedule at capacity.
    ScheduleFull,

    /// Prerequisite list at capacity.
    PrerequisitesFull,

    /// Taken-course list at capacity.
    TakenFull,

    /// Attendee roster at capacity.
    AttendeesFull,
}

impl OperationOutcome {
    /// Whether the operation completed without an error. Refusal counts
    /// as completion.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Error(_))
    }
}
