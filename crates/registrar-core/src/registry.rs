//! Top-level registration workflows.
//!
//! The [`Registry`] owns the entity stores, the catalog and student-body
//! rosters, and the offering schedule, and exposes every operation the
//! menu drives: creation, linking, enrollment, lookup, listing, detail.
//!
//! Ownership discipline: every collection that accepts an entity attaches
//! it, including the top-level catalog and student body. There is no
//! implicit creator hold, so an entity's share count is exactly the number
//! of roster entries referencing it, system-wide.

use crate::{
    course::{Course, CourseId, CourseList},
    entity::Entity,
    error::RegistryError,
    offering::{CourseOffering, OfferingId, OfferingList},
    store::EntityStore,
    student::{Student, StudentId, StudentList},
};

/// Collection capacities, fixed for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
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

impl Default for RegistryConfig {
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

/// Outcome of an enrollment attempt.
///
/// Refusal is a normal result, not an error: the operation ran to
/// completion and correctly declined the student. Errors are reserved for
/// capacity exhaustion and failed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The student was added to the attendee roster.
    Admitted,

    /// The student was declined; nothing was mutated.
    Refused {
        /// Why admission was declined.
        reason: RefusalReason,
    },
}

impl Admission {
    /// Whether the student was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Reasons an enrollment can be declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The student has not taken every prerequisite of the offered course.
    MissingPrerequisites,
}

/// The course-enrollment registry.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    courses: EntityStore<Course>,
    students: EntityStore<Student>,
    catalog: CourseList,
    student_body: StudentList,
    offerings: OfferingList,
}

impl Registry {
    /// Create an empty registry with the given capacities.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            courses: EntityStore::new(),
            students: EntityStore::new(),
            catalog: CourseList::new(config.max_courses),
            student_body: StudentList::new(config.max_students),
            offerings: OfferingList::new(config.max_offerings),
        }
    }

    /// The capacities this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a new course in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatalogFull`] when the catalog is at
    /// capacity.
    pub fn create_course(
        &mut self,
        name: &str,
        description: &str,
        duration: u32,
    ) -> Result<CourseId, RegistryError> {
        if self.catalog.is_full() {
            return Err(RegistryError::CatalogFull { capacity: self.catalog.capacity() });
        }
        let id = self.courses.insert(Course::new(name, description, duration, self.config.max_prereqs));
        self.catalog.add(&mut self.courses, id)?;
        tracing::debug!(course = name, "course registered");
        Ok(id)
    }

    /// Register a course and attach the given prerequisites in order.
    ///
    /// The course stays registered even when a prerequisite fails to
    /// attach, the same as registering and then linking one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatalogFull`],
    /// [`RegistryError::UnknownCourse`] for a dead prerequisite handle, or
    /// [`RegistryError::PrerequisitesFull`] on overflow.
    pub fn create_course_with_prereqs(
        &mut self,
        name: &str,
        description: &str,
        duration: u32,
        prereqs: &[CourseId],
    ) -> Result<CourseId, RegistryError> {
        let id = self.create_course(name, description, duration)?;
        for &prereq in prereqs {
            self.add_prerequisite(id, prereq)?;
        }
        Ok(id)
    }

    /// Register a new student in the student body.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentBodyFull`] when the student body is
    /// at capacity.
    pub fn create_student(
        &mut self,
        name: &str,
        ssn: &str,
        age: u32,
    ) -> Result<StudentId, RegistryError> {
        if self.student_body.is_full() {
            return Err(RegistryError::StudentBodyFull { capacity: self.student_body.capacity() });
        }
        let id = self.students.insert(Student::new(name, ssn, age, self.config.max_taken));
        self.student_body.add(&mut self.students, id)?;
        tracing::debug!(student = name, "student registered");
        Ok(id)
    }

    /// Register a student and attach the given taken courses in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentBodyFull`],
    /// [`RegistryError::UnknownCourse`], or [`RegistryError::TakenFull`].
    pub fn create_student_with_courses(
        &mut self,
        name: &str,
        ssn: &str,
        age: u32,
        taken: &[CourseId],
    ) -> Result<StudentId, RegistryError> {
        let id = self.create_student(name, ssn, age)?;
        for &course in taken {
            self.add_course_to_student(id, course)?;
        }
        Ok(id)
    }

    /// Attach a prerequisite to a course.
    ///
    /// Duplicates and self-prerequisites are accepted; the lists do not
    /// deduplicate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCourse`] when either handle is
    /// dead, or [`RegistryError::PrerequisitesFull`] on overflow. Nothing
    /// is mutated on failure.
    pub fn add_prerequisite(
        &mut self,
        course: CourseId,
        prereq: CourseId,
    ) -> Result<(), RegistryError> {
        if !self.courses.contains(prereq) {
            return Err(RegistryError::UnknownCourse);
        }
        let entry = self.courses.get(course).map_err(|_| RegistryError::UnknownCourse)?;
        if entry.prereqs().is_full() {
            return Err(RegistryError::PrerequisitesFull {
                course: entry.name().to_string(),
                capacity: entry.prereqs().capacity(),
            });
        }
        // The prerequisite list lives inside the same store it references,
        // so attach first and append through the unguarded path.
        self.courses.attach(prereq)?;
        self.courses.get_mut(course)?.prereqs_mut().push(prereq);
        Ok(())
    }

    /// Attach a taken course to a student.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownStudent`],
    /// [`RegistryError::UnknownCourse`], or [`RegistryError::TakenFull`].
    /// Nothing is mutated on failure.
    pub fn add_course_to_student(
        &mut self,
        student: StudentId,
        course: CourseId,
    ) -> Result<(), RegistryError> {
        if !self.courses.contains(course) {
            return Err(RegistryError::UnknownCourse);
        }
        let entry = self.students.get(student).map_err(|_| RegistryError::UnknownStudent)?;
        if entry.taken().is_full() {
            return Err(RegistryError::TakenFull {
                student: entry.name().to_string(),
                capacity: entry.taken().capacity(),
            });
        }
        self.courses.attach(course)?;
        self.students.get_mut(student)?.taken_mut().push(course);
        Ok(())
    }

    /// Schedule an offering of a course in a room on a date.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ScheduleFull`] or
    /// [`RegistryError::UnknownCourse`].
    pub fn create_offering(
        &mut self,
        course: CourseId,
        room: &str,
        date: &str,
    ) -> Result<OfferingId, RegistryError> {
        if self.offerings.is_full() {
            return Err(RegistryError::ScheduleFull { capacity: self.offerings.capacity() });
        }
        if !self.courses.contains(course) {
            return Err(RegistryError::UnknownCourse);
        }
        let offering =
            CourseOffering::new(&mut self.courses, course, room, date, self.config.max_attendees)?;
        let id = self
            .offerings
            .add(offering)
            .ok_or(RegistryError::ScheduleFull { capacity: self.offerings.capacity() })?;
        tracing::debug!(offering = ?id, room, date, "offering scheduled");
        Ok(id)
    }

    /// Enroll a student into an offering.
    ///
    /// The offered course's prerequisite check runs first: the student
    /// must have taken, by identity, every course in the prerequisite
    /// list. Refusal mutates nothing and is reported as a normal
    /// [`Admission::Refused`] outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownOffering`],
    /// [`RegistryError::UnknownStudent`], or
    /// [`RegistryError::AttendeesFull`].
    pub fn enroll(
        &mut self,
        offering: OfferingId,
        student: StudentId,
    ) -> Result<Admission, RegistryError> {
        let entry = self.offerings.get(offering).ok_or(RegistryError::UnknownOffering)?;
        let course = self.courses.get(entry.course())?;
        let candidate = self.students.get(student).map_err(|_| RegistryError::UnknownStudent)?;

        if !course.check_prereq(candidate.taken()) {
            tracing::debug!(student = candidate.name(), course = course.name(), "admission refused");
            return Ok(Admission::Refused { reason: RefusalReason::MissingPrerequisites });
        }

        let entry = self.offerings.get_mut(offering).ok_or(RegistryError::UnknownOffering)?;
        if entry.attendees().is_full() {
            return Err(RegistryError::AttendeesFull { capacity: entry.attendees().capacity() });
        }
        self.students.attach(student)?;
        entry.attendees_mut().push(student);
        tracing::debug!(offering = ?offering, "student admitted");
        Ok(Admission::Admitted)
    }

    /// First course with this name, in registration order.
    pub fn find_course(&self, name: &str) -> Option<CourseId> {
        self.catalog.find(&self.courses, name)
    }

    /// First student with this name, in registration order.
    pub fn find_student(&self, name: &str) -> Option<StudentId> {
        self.student_body.find(&self.students, name)
    }

    /// First offering matching course name and date, in schedule order.
    pub fn find_offering(&self, name: &str, date: &str) -> Option<OfferingId> {
        self.offerings.find(&self.courses, name, date)
    }

    /// Short renderings of every registered course.
    pub fn list_courses(&self) -> Vec<String> {
        self.catalog.summaries(&self.courses)
    }

    /// Short renderings of every registered student.
    pub fn list_students(&self) -> Vec<String> {
        self.student_body.summaries(&self.students)
    }

    /// Short renderings of every scheduled offering.
    pub fn list_offerings(&self) -> Vec<String> {
        self.offerings.summaries(&self.courses)
    }

    /// Full rendering of the course with this name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CourseNotFound`].
    pub fn course_detail(&self, name: &str) -> Result<String, RegistryError> {
        let id = self
            .find_course(name)
            .ok_or_else(|| RegistryError::CourseNotFound { name: name.to_string() })?;
        Ok(self.courses.get(id)?.detail(&self.courses))
    }

    /// Full rendering of the student with this name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StudentNotFound`].
    pub fn student_detail(&self, name: &str) -> Result<String, RegistryError> {
        let id = self
            .find_student(name)
            .ok_or_else(|| RegistryError::StudentNotFound { name: name.to_string() })?;
        Ok(self.students.get(id)?.detail(&self.courses))
    }

    /// Full rendering of the offering matching course name and date.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OfferingNotFound`].
    pub fn offering_detail(&self, name: &str, date: &str) -> Result<String, RegistryError> {
        let id = self.find_offering(name, date).ok_or_else(|| RegistryError::OfferingNotFound {
            name: name.to_string(),
            date: date.to_string(),
        })?;
        let offering = self.offerings.get(id).ok_or(RegistryError::UnknownOffering)?;
        Ok(offering.detail(&self.courses, &self.students))
    }

    /// Names on an offering's attendee roster, in enrollment order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownOffering`].
    pub fn attendee_names(&self, offering: OfferingId) -> Result<Vec<String>, RegistryError> {
        let entry = self.offerings.get(offering).ok_or(RegistryError::UnknownOffering)?;
        Ok(entry.attendees().summaries(&self.students))
    }

    /// Number of live courses, registered or kept alive by references.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of live students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of scheduled offerings.
    pub fn offering_count(&self) -> usize {
        self.offerings.len()
    }

    /// Holder count of a course, or `None` if it was finalized.
    pub fn course_holders(&self, course: CourseId) -> Option<u32> {
        self.courses.holders(course).ok()
    }

    /// Holder count of a student, or `None` if they were finalized.
    pub fn student_holders(&self, student: StudentId) -> Option<u32> {
        self.students.holders(student).ok()
    }

    /// Orderly teardown in dependency order: drain the schedule, release
    /// the student body, release the catalog, and cascade every
    /// finalization into the rosters nested inside the finalized payloads.
    ///
    /// Cascades run on worklists rather than recursion. Courses reachable
    /// only through a prerequisite cycle cannot drop to zero holders and
    /// stay live; they are reported with a warning and freed when the
    /// registry itself drops.
    pub fn clear(&mut self) {
        let mut dead_students: Vec<Student> = Vec::new();
        let mut dead_courses: Vec<Course> = Vec::new();

        for offering in self.offerings.drain() {
            let (course, students) = offering.dismantle(&mut self.courses, &mut self.students);
            dead_courses.extend(course);
            dead_students.extend(students);
        }

        dead_students.extend(self.student_body.release(&mut self.students));
        while let Some(mut student) = dead_students.pop() {
            dead_courses.extend(student.taken_mut().release(&mut self.courses));
        }

        dead_courses.extend(self.catalog.release(&mut self.courses));
        while let Some(mut course) = dead_courses.pop() {
            dead_courses.extend(course.prereqs_mut().release(&mut self.courses));
        }

        if !self.courses.is_empty() || !self.students.is_empty() {
            tracing::warn!(
                courses = self.courses.len(),
                students = self.students.len(),
                "entities survived teardown; kept alive by a prerequisite cycle"
            );
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RegistryConfig {
        RegistryConfig {
            max_courses: 4,
            max_students: 4,
            max_offerings: 4,
            max_prereqs: 2,
            max_taken: 3,
            max_attendees: 2,
        }
    }

    #[test]
    fn find_returns_first_registration_among_duplicates() {
        let mut registry = Registry::default();
        let first = registry.create_course("CS101", "intro", 8).expect("capacity");
        let _second = registry.create_course("CS101", "reprise", 8).expect("capacity");

        assert_eq!(registry.find_course("CS101"), Some(first));
        assert_eq!(registry.list_courses(), vec!["CS101", "CS101"]);
    }

    #[test]
    fn enrollment_is_gated_on_prerequisites_by_identity() {
        let mut registry = Registry::default();
        let p1 = registry.create_course("P1", "", 4).expect("capacity");
        let p2 = registry.create_course("P2", "", 4).expect("capacity");
        let p3 = registry.create_course("P3", "", 4).expect("capacity");
        let advanced = registry
            .create_course_with_prereqs("ADV", "advanced", 12, &[p1, p2])
            .expect("capacity");
        let offering = registry.create_offering(advanced, "A1", "2024-01-10").expect("capacity");

        let ready = registry
            .create_student_with_courses("ready", "000-00-0001", 20, &[p1, p2, p3])
            .expect("capacity");
        let behind = registry
            .create_student_with_courses("behind", "000-00-0002", 20, &[p1])
            .expect("capacity");

        assert_eq!(registry.enroll(offering, ready), Ok(Admission::Admitted));
        assert_eq!(
            registry.enroll(offering, behind),
            Ok(Admission::Refused { reason: RefusalReason::MissingPrerequisites })
        );
        assert_eq!(registry.attendee_names(offering), Ok(vec!["ready".to_string()]));
    }

    #[test]
    fn refusal_mutates_nothing() {
        let mut registry = Registry::default();
        let prereq = registry.create_course("P", "", 4).expect("capacity");
        let course = registry
            .create_course_with_prereqs("C", "", 4, &[prereq])
            .expect("capacity");
        let offering = registry.create_offering(course, "B2", "2024-02-01").expect("capacity");
        let student = registry.create_student("s", "000", 19).expect("capacity");

        let before = registry.student_holders(student);
        let outcome = registry.enroll(offering, student).expect("live handles");
        assert!(!outcome.is_admitted());
        assert_eq!(registry.student_holders(student), before);
        assert_eq!(registry.attendee_names(offering), Ok(Vec::new()));
    }

    #[test]
    fn full_attendee_roster_is_a_capacity_error() {
        let mut registry = Registry::new(small());
        let course = registry.create_course("C", "", 4).expect("capacity");
        let offering = registry.create_offering(course, "A1", "d").expect("capacity");

        for i in 0..2 {
            let s = registry.create_student(&format!("s{i}"), "0", 20).expect("capacity");
            assert_eq!(registry.enroll(offering, s), Ok(Admission::Admitted));
        }
        let extra = registry.create_student("extra", "0", 20).expect("capacity");
        let err = registry.enroll(offering, extra).expect_err("roster is full");
        assert_eq!(err, RegistryError::AttendeesFull { capacity: 2 });
        assert!(err.is_capacity());
    }

    #[test]
    fn catalog_capacity_is_enforced_atomically() {
        let mut config = small();
        config.max_courses = 1;
        let mut registry = Registry::new(config);

        registry.create_course("only", "", 1).expect("capacity");
        let err = registry.create_course("over", "", 1).expect_err("catalog is full");
        assert_eq!(err, RegistryError::CatalogFull { capacity: 1 });
        // The overflow course was never registered, but it stays live in
        // the store at zero holders until teardown; the catalog is
        // unchanged.
        assert_eq!(registry.list_courses(), vec!["only"]);
    }

    #[test]
    fn holder_counts_track_roster_entries_exactly() {
        let mut registry = Registry::default();
        let base = registry.create_course("base", "", 4).expect("capacity");
        assert_eq!(registry.course_holders(base), Some(1)); // catalog

        let next = registry.create_course("next", "", 4).expect("capacity");
        registry.add_prerequisite(next, base).expect("capacity");
        assert_eq!(registry.course_holders(base), Some(2)); // + prereq list

        registry.create_offering(base, "A1", "d").expect("capacity");
        assert_eq!(registry.course_holders(base), Some(3)); // + offering

        let student = registry.create_student("s", "0", 20).expect("capacity");
        registry.add_course_to_student(student, base).expect("capacity");
        assert_eq!(registry.course_holders(base), Some(4)); // + taken list
    }

    #[test]
    fn clear_finalizes_every_entity() {
        let mut registry = Registry::default();
        let p = registry.create_course("P", "", 4).expect("capacity");
        let c = registry.create_course_with_prereqs("C", "", 8, &[p]).expect("capacity");
        let offering = registry.create_offering(c, "A1", "d").expect("capacity");
        let s = registry.create_student_with_courses("s", "0", 20, &[p]).expect("capacity");
        registry.enroll(offering, s).expect("live handles");

        registry.clear();
        assert_eq!(registry.course_count(), 0);
        assert_eq!(registry.student_count(), 0);
        assert_eq!(registry.offering_count(), 0);
    }

    #[test]
    fn clear_leaves_cycle_members_live() {
        let mut registry = Registry::default();
        let narcissus = registry.create_course("N", "", 4).expect("capacity");
        registry.add_prerequisite(narcissus, narcissus).expect("capacity");

        registry.clear();
        // Its own prerequisite entry keeps the course at one holder.
        assert_eq!(registry.course_count(), 1);
    }

    #[test]
    fn detail_renders_resolved_rosters() {
        let mut registry = Registry::default();
        let p = registry.create_course("CS101", "intro", 8).expect("capacity");
        registry
            .create_course_with_prereqs("CS201", "Data structures", 12, &[p])
            .expect("capacity");

        let detail = registry.course_detail("CS201").expect("registered");
        insta::assert_snapshot!(detail, @r"
        Course: CS201
        Description: Data structures
        Duration: 12
        Prerequisites: CS101
        ");

        assert_eq!(
            registry.course_detail("CS999"),
            Err(RegistryError::CourseNotFound { name: "CS999".to_string() })
        );
    }

    #[test]
    fn offering_lookup_needs_name_and_date() {
        let mut registry = Registry::default();
        let c = registry.create_course("C", "", 4).expect("capacity");
        let jan = registry.create_offering(c, "A1", "2024-01-10").expect("capacity");
        let feb = registry.create_offering(c, "B2", "2024-02-10").expect("capacity");

        assert_eq!(registry.find_offering("C", "2024-01-10"), Some(jan));
        assert_eq!(registry.find_offering("C", "2024-02-10"), Some(feb));
        assert_eq!(registry.find_offering("C", "2024-03-10"), None);
        assert_eq!(registry.list_offerings(), vec!["C (2024-01-10)", "C (2024-02-10)"]);
    }
}
