//! Model registry - the reference implementation.
//!
//! Plain vectors, dense indices, and explicit holder counters written the
//! obvious way. The model is the oracle: if the real registry and this
//! one ever disagree on an outcome or on observable state, the real
//! implementation is wrong (or the specification is ambiguous).

use super::operation::{
    Operation, OperationOutcome, OutcomeError, course_name, date_name, room_name, student_name,
};

/// Collection capacities shared by the model and the real registry under
/// test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapacities {
    /// Catalog capacity.
    pub max_courses: usize,
    /// Student body capacity.
    pub max_students: usize,
    /// Offering schedule capacity.
    pub max_offerings: usize,
    /// Per-course prerequisite list capacity.
    pub max_prereqs: usize,
    /// Per-student taken-course list capacity.
    pub max_taken: usize,
    /// Per-offering attendee roster capacity.
    pub max_attendees: usize,
}

impl ModelCapacities {
    /// Tight capacities so random sequences actually hit the limits.
    pub fn small() -> Self {
        Self {
            max_courses: 8,
            max_students: 8,
            max_offerings: 8,
            max_prereqs: 3,
            max_taken: 4,
            max_attendees: 3,
        }
    }
}

impl Default for ModelCapacities {
    /// Mirrors the real registry's default configuration.
    fn default() -> Self {
        Self {
            max_courses: 50,
            max_students: 50,
            max_offerings: 50,
            max_prereqs: 30,
            max_taken: 30,
            max_attendees: 50,
        }
    }
}

/// Observable state for oracle comparison.
///
/// The subset of registry state extractable from both the model and the
/// real implementation: names with holder counts in creation order, and
/// offering summaries with attendee name lists in schedule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Course names and holder counts, in creation order.
    pub courses: Vec<(String, u32)>,
    /// Student names and holder counts, in creation order.
    pub students: Vec<(String, u32)>,
    /// Offering summaries and attendee names, in schedule order.
    pub offerings: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone)]
struct ModelCourse {
    name: String,
    holders: u32,
    prereqs: Vec<usize>,
}

#[derive(Debug, Clone)]
struct ModelStudent {
    name: String,
    holders: u32,
    taken: Vec<usize>,
}

#[derive(Debug, Clone)]
struct ModelOffering {
    course: usize,
    date: String,
    attendees: Vec<usize>,
}

/// Reference registry: the oracle the real implementation is checked
/// against.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    capacities: ModelCapacities,
    courses: Vec<ModelCourse>,
    students: Vec<ModelStudent>,
    offerings: Vec<ModelOffering>,
}

impl ModelRegistry {
    /// Create an empty model with the given capacities.
    pub fn new(capacities: ModelCapacities) -> Self {
        Self { capacities, courses: Vec::new(), students: Vec::new(), offerings: Vec::new() }
    }

    /// Apply an operation and return the outcome the real registry is
    /// expected to produce for the same operation.
    pub fn apply(&mut self, op: &Operation) -> OperationOutcome {
        match *op {
            Operation::CreateCourse { name_seed } => self.create_course(name_seed),
            Operation::CreateStudent { name_seed } => self.create_student(name_seed),
            Operation::AddPrerequisite { course, prereq } => self.add_prerequisite(course, prereq),
            Operation::AddCourseToStudent { student, course } => {
                self.add_course_to_student(student, course)
            },
            Operation::CreateOffering { course, date_seed, .. } => {
                self.create_offering(course, date_seed)
            },
            Operation::Enroll { offering, student } => self.enroll(offering, student),
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            courses: self.courses.iter().map(|c| (c.name.clone(), c.holders)).collect(),
            students: self.students.iter().map(|s| (s.name.clone(), s.holders)).collect(),
            offerings: self
                .offerings
                .iter()
                .map(|o| {
                    let summary = format!("{} ({})", self.courses[o.course].name, o.date);
                    let attendees =
                        o.attendees.iter().map(|&s| self.students[s].name.clone()).collect();
                    (summary, attendees)
                })
                .collect(),
        }
    }

    /// Whether the prerequisite graph contains a cycle (a self-prerequisite
    /// or longer loop). Cycle members can never drop to zero holders, so
    /// teardown of the real registry is expected to leave them live.
    pub fn has_prereq_cycle(&self) -> bool {
        // 0 = unvisited, 1 = on the current path, 2 = done.
        fn visit(courses: &[ModelCourse], state: &mut [u8], node: usize) -> bool {
            match state[node] {
                1 => return true,
                2 => return false,
                _ => {},
            }
            state[node] = 1;
            if courses[node].prereqs.iter().any(|&next| visit(courses, state, next)) {
                return true;
            }
            state[node] = 2;
            false
        }

        let mut state = vec![0u8; self.courses.len()];
        (0..self.courses.len()).any(|node| visit(&self.courses, &mut state, node))
    }

    /// Map a selector onto a created entity, modulo count.
    fn resolve(len: usize, selector: u8) -> Option<usize> {
        (len > 0).then(|| selector as usize % len)
    }

    fn create_course(&mut self, seed: u8) -> OperationOutcome {
        if self.courses.len() == self.capacities.max_courses {
            return OperationOutcome::Error(OutcomeError::CatalogFull);
        }
        self.courses.push(ModelCourse {
            name: course_name(seed),
            holders: 1, // the catalog's hold
            prereqs: Vec::new(),
        });
        OperationOutcome::Ok
    }

    fn create_student(&mut self, seed: u8) -> OperationOutcome {
        if self.students.len() == self.capacities.max_students {
            return OperationOutcome::Error(OutcomeError::StudentBodyFull);
        }
        self.students.push(ModelStudent {
            name: student_name(seed),
            holders: 1, // the student body's hold
            taken: Vec::new(),
        });
        OperationOutcome::Ok
    }

    fn add_prerequisite(&mut self, course_sel: u8, prereq_sel: u8) -> OperationOutcome {
        let Some(course) = Self::resolve(self.courses.len(), course_sel) else {
            return OperationOutcome::Error(OutcomeError::NoCourses);
        };
        let Some(prereq) = Self::resolve(self.courses.len(), prereq_sel) else {
            return OperationOutcome::Error(OutcomeError::NoCourses);
        };
        if self.courses[course].prereqs.len() == self.capacities.max_prereqs {
            return OperationOutcome::Error(OutcomeError::PrerequisitesFull);
        }
        self.courses[course].prereqs.push(prereq);
        self.courses[prereq].holders += 1;
        OperationOutcome::Ok
    }

    fn add_course_to_student(&mut self, student_sel: u8, course_sel: u8) -> OperationOutcome {
        let Some(student) = Self::resolve(self.students.len(), student_sel) else {
            return OperationOutcome::Error(OutcomeError::NoStudents);
        };
        let Some(course) = Self::resolve(self.courses.len(), course_sel) else {
            return OperationOutcome::Error(OutcomeError::NoCourses);
        };
        if self.students[student].taken.len() == self.capacities.max_taken {
            return OperationOutcome::Error(OutcomeError::TakenFull);
        }
        self.students[student].taken.push(course);
        self.courses[course].holders += 1;
        OperationOutcome::Ok
    }

    fn create_offering(&mut self, course_sel: u8, date_seed: u8) -> OperationOutcome {
        let Some(course) = Self::resolve(self.courses.len(), course_sel) else {
            return OperationOutcome::Error(OutcomeError::NoCourses);
        };
        if self.offerings.len() == self.capacities.max_offerings {
            return OperationOutcome::Error(OutcomeError::ScheduleFull);
        }
        self.offerings.push(ModelOffering {
            course,
            date: date_name(date_seed),
            attendees: Vec::new(),
        });
        self.courses[course].holders += 1;
        OperationOutcome::Ok
    }

    fn enroll(&mut self, offering_sel: u8, student_sel: u8) -> OperationOutcome {
        let Some(offering) = Self::resolve(self.offerings.len(), offering_sel) else {
            return OperationOutcome::Error(OutcomeError::NoOfferings);
        };
        let Some(student) = Self::resolve(self.students.len(), student_sel) else {
            return OperationOutcome::Error(OutcomeError::NoStudents);
        };

        let course = self.offerings[offering].course;
        let taken = &self.students[student].taken;
        let satisfied = self.courses[course].prereqs.iter().all(|p| taken.contains(p));
        if !satisfied {
            return OperationOutcome::Refused;
        }
        if self.offerings[offering].attendees.len() == self.capacities.max_attendees {
            return OperationOutcome::Error(OutcomeError::AttendeesFull);
        }
        self.offerings[offering].attendees.push(student);
        self.students[student].holders += 1;
        OperationOutcome::Admitted
    }
}
