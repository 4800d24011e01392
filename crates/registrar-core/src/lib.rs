//! In-memory course-enrollment registry.
//!
//! Courses carry prerequisite lists, students carry taken-course lists,
//! and offerings bind a course to a room, a date, and an attendee roster.
//! The interesting part is not the domain logic but the ownership model
//! underneath it: one course is referenced simultaneously by the catalog,
//! by other courses' prerequisite lists, by students' taken lists, and by
//! offerings, yet is finalized exactly once.
//!
//! ## Architecture
//!
//! ```text
//! registrar-core
//!   ├─ EntityStore     (slot store, generational handles, share counts)
//!   ├─ Entity          (name/matches/summary seam)
//!   ├─ Roster          (bounded collection of shared references)
//!   ├─ Course/Student  (the shared entities)
//!   ├─ CourseOffering  (one course + room + date + attendees; never shared)
//!   └─ Registry        (stores + catalog + student body + schedule)
//! ```
//!
//! All state is process-lifetime and single-threaded; there is no
//! persistence and no concurrent mutation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod course;
mod entity;
mod error;
mod offering;
mod registry;
mod roster;
mod store;
mod student;

pub use course::{Course, CourseId, CourseList};
pub use entity::Entity;
pub use error::RegistryError;
pub use offering::{CourseOffering, OfferingId, OfferingList};
pub use registry::{Admission, RefusalReason, Registry, RegistryConfig};
pub use roster::Roster;
pub use store::{Detach, EntityId, EntityStore, ShareError};
pub use student::{Student, StudentId, StudentList};
