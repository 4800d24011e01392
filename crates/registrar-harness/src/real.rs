//! Real-registry wrapper mirroring the model's interface.
//!
//! Maps the model's dense indices onto real entity handles and applies
//! the same operations, so tests and the fuzzer can compare outcomes and
//! observable state step by step.

use registrar_core::{
    Admission, CourseId, OfferingId, Registry, RegistryConfig, RegistryError, StudentId,
};

use crate::model::{
    ModelCapacities, ObservableState, Operation, OperationOutcome, OutcomeError, course_name,
    date_name, room_name, student_name,
};

/// The real registry driven through the model's operation vocabulary.
#[derive(Debug)]
pub struct RealRegistry {
    registry: Registry,
    courses: Vec<CourseId>,
    students: Vec<StudentId>,
    offerings: Vec<OfferingId>,
}

impl RealRegistry {
    /// Create a real registry sized like the model.
    pub fn new(capacities: ModelCapacities) -> Self {
        let config = RegistryConfig {
            max_courses: capacities.max_courses,
            max_students: capacities.max_students,
            max_offerings: capacities.max_offerings,
            max_prereqs: capacities.max_prereqs,
            max_taken: capacities.max_taken,
            max_attendees: capacities.max_attendees,
        };
        Self {
            registry: Registry::new(config),
            courses: Vec::new(),
            students: Vec::new(),
            offerings: Vec::new(),
        }
    }

    /// The wrapped registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Apply an operation; selector resolution matches the model exactly.
    pub fn apply(&mut self, op: &Operation) -> OperationOutcome {
        match *op {
            Operation::CreateCourse { name_seed } => {
                match self.registry.create_course(&course_name(name_seed), "generated", 8) {
                    Ok(id) => {
                        self.courses.push(id);
                        OperationOutcome::Ok
                    },
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
            Operation::CreateStudent { name_seed } => {
                match self.registry.create_student(&student_name(name_seed), "000-00-0000", 20) {
                    Ok(id) => {
                        self.students.push(id);
                        OperationOutcome::Ok
                    },
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
            Operation::AddPrerequisite { course, prereq } => {
                let Some(&course) = resolve(&self.courses, course) else {
                    return OperationOutcome::Error(OutcomeError::NoCourses);
                };
                let Some(&prereq) = resolve(&self.courses, prereq) else {
                    return OperationOutcome::Error(OutcomeError::NoCourses);
                };
                match self.registry.add_prerequisite(course, prereq) {
                    Ok(()) => OperationOutcome::Ok,
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
            Operation::AddCourseToStudent { student, course } => {
                let Some(&student) = resolve(&self.students, student) else {
                    return OperationOutcome::Error(OutcomeError::NoStudents);
                };
                let Some(&course) = resolve(&self.courses, course) else {
                    return OperationOutcome::Error(OutcomeError::NoCourses);
                };
                match self.registry.add_course_to_student(student, course) {
                    Ok(()) => OperationOutcome::Ok,
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
            Operation::CreateOffering { course, room_seed, date_seed } => {
                let Some(&course) = resolve(&self.courses, course) else {
                    return OperationOutcome::Error(OutcomeError::NoCourses);
                };
                match self.registry.create_offering(
                    course,
                    &room_name(room_seed),
                    &date_name(date_seed),
                ) {
                    Ok(id) => {
                        self.offerings.push(id);
                        OperationOutcome::Ok
                    },
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
            Operation::Enroll { offering, student } => {
                let Some(&offering) = resolve(&self.offerings, offering) else {
                    return OperationOutcome::Error(OutcomeError::NoOfferings);
                };
                let Some(&student) = resolve(&self.students, student) else {
                    return OperationOutcome::Error(OutcomeError::NoStudents);
                };
                match self.registry.enroll(offering, student) {
                    Ok(Admission::Admitted) => OperationOutcome::Admitted,
                    Ok(Admission::Refused { .. }) => OperationOutcome::Refused,
                    Err(error) => OperationOutcome::Error(map_error(&error)),
                }
            },
        }
    }

    /// Extract observable state for comparison against the model.
    pub fn observable_state(&self) -> ObservableState {
        let courses = self
            .courses
            .iter()
            .zip(self.registry.list_courses())
            .map(|(&id, name)| (name, self.registry.course_holders(id).unwrap_or(0)))
            .collect();
        let students = self
            .students
            .iter()
            .zip(self.registry.list_students())
            .map(|(&id, name)| (name, self.registry.student_holders(id).unwrap_or(0)))
            .collect();
        let offerings = self
            .offerings
            .iter()
            .zip(self.registry.list_offerings())
            .map(|(&id, summary)| {
                (summary, self.registry.attendee_names(id).unwrap_or_default())
            })
            .collect();
        ObservableState { courses, students, offerings }
    }

    /// Tear the registry down and drop the handle maps.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.courses.clear();
        self.students.clear();
        self.offerings.clear();
    }

    /// Courses still live in the store, including teardown survivors.
    pub fn live_courses(&self) -> usize {
        self.registry.course_count()
    }

    /// Students still live in the store.
    pub fn live_students(&self) -> usize {
        self.registry.student_count()
    }
}

fn resolve<T>(entries: &[T], selector: u8) -> Option<&T> {
    if entries.is_empty() {
        return None;
    }
    entries.get(selector as usize % entries.len())
}

/// Map registry errors onto the model's expected-error vocabulary.
fn map_error(error: &RegistryError) -> OutcomeError {
    match error {
        RegistryError::CatalogFull { .. } => OutcomeError::CatalogFull,
        RegistryError::StudentBodyFull { .. } => OutcomeError::StudentBodyFull,
        RegistryError::ScheduleFull { .. } => OutcomeError::ScheduleFull,
        RegistryError::PrerequisitesFull { .. } => OutcomeError::PrerequisitesFull,
        RegistryError::TakenFull { .. } => OutcomeError::TakenFull,
        RegistryError::AttendeesFull { .. } => OutcomeError::AttendeesFull,
        // Unresolvable handles are screened out before the registry is
        // called; reaching these arms means the registry lost a hold, and
        // the outcome comparison against the model will flag it.
        RegistryError::UnknownCourse
        | RegistryError::CourseNotFound { .. }
        | RegistryError::Share(_) => OutcomeError::NoCourses,
        RegistryError::UnknownStudent | RegistryError::StudentNotFound { .. } => {
            OutcomeError::NoStudents
        },
        RegistryError::UnknownOffering | RegistryError::OfferingNotFound { .. } => {
            OutcomeError::NoOfferings
        },
    }
}
