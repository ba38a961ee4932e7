use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::grading::aggregation::GradeAggregation;
use crate::models::grading::course::CourseModel;
use crate::models::grading::student::{StudentKind, StudentModel};
use crate::models::identifiable::Identifiable;
use crate::utils::hash_as_i64;

/// In-memory roster owning the course catalog and the student records.
///
/// Enrollment and grading always go through the roster so that a grade can
/// only reference a course that actually exists.
#[derive(Debug, Default)]
pub struct StudentRoster {
    courses: HashMap<Uuid, CourseModel>,
    students: HashMap<Uuid, StudentModel>,
    student_number_idx: HashMap<i64, Uuid>,
}

impl StudentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&mut self, name: &str, credits: i32) -> LedgerResult<Uuid> {
        let course = CourseModel::new(name, credits)?;
        let id = course.get_id();
        self.courses.insert(id, course);
        tracing::info!(name, credits, %id, "course added");
        Ok(id)
    }

    /// Register a student. Fails with `InvalidOperation` when the student
    /// number is already taken.
    pub fn register_student(
        &mut self,
        kind: StudentKind,
        student_number: &str,
        name: &str,
        email: &str,
    ) -> LedgerResult<Uuid> {
        let student = StudentModel::new(kind, student_number, name, email)?;
        let number_hash = hash_as_i64(&student.student_number())?;
        if self.student_number_idx.contains_key(&number_hash) {
            return Err(LedgerError::InvalidOperation(format!(
                "student number {student_number} is already taken"
            )));
        }

        let id = student.get_id();
        self.student_number_idx.insert(number_hash, id);
        self.students.insert(id, student);
        tracing::info!(student_number, %kind, %id, "student registered");
        Ok(id)
    }

    /// Enroll a student in a course. Both must exist in the roster.
    pub fn enroll(&mut self, student_id: Uuid, course_id: Uuid) -> LedgerResult<()> {
        if !self.courses.contains_key(&course_id) {
            return Err(LedgerError::NotFound(format!("course {course_id}")));
        }
        let student = self.student_mut(student_id)?;
        student.enroll(course_id)?;
        tracing::debug!(%student_id, %course_id, "student enrolled");
        Ok(())
    }

    /// Record a score for an enrolled student, appending one grade.
    pub fn record_score(
        &mut self,
        student_id: Uuid,
        course_id: Uuid,
        score: Decimal,
    ) -> LedgerResult<()> {
        let student = self.student_mut(student_id)?;
        student.record_grade(course_id, score)?;
        tracing::debug!(%student_id, %course_id, %score, "score recorded");
        Ok(())
    }

    pub fn course(&self, id: Uuid) -> LedgerResult<&CourseModel> {
        self.courses
            .get(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("course {id}")))
    }

    pub fn student(&self, id: Uuid) -> LedgerResult<&StudentModel> {
        self.students
            .get(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("student {id}")))
    }

    pub fn find_by_student_number(
        &self,
        student_number: &str,
    ) -> LedgerResult<Option<&StudentModel>> {
        let number_hash = hash_as_i64(&student_number)?;
        Ok(self
            .student_number_idx
            .get(&number_hash)
            .and_then(|id| self.students.get(id)))
    }

    /// One student's overall grade point under the supplied policy.
    pub fn overall_grade_point(
        &self,
        student_id: Uuid,
        policy: &dyn GradeAggregation,
    ) -> LedgerResult<Option<Decimal>> {
        Ok(self.student(student_id)?.overall_grade_point(policy))
    }

    /// Mean of the overall grade points of all students that have grades.
    pub fn class_average(&self, policy: &dyn GradeAggregation) -> Option<Decimal> {
        let points: Vec<Decimal> = self
            .students
            .values()
            .filter_map(|student| student.overall_grade_point(policy))
            .collect();
        if points.is_empty() {
            return None;
        }
        let total: Decimal = points.iter().copied().sum();
        Some(total / Decimal::from(points.len() as i64))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    fn student_mut(&mut self, id: Uuid) -> LedgerResult<&mut StudentModel> {
        self.students
            .get_mut(&id)
            .ok_or_else(|| LedgerError::NotFound(format!("student {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::aggregation::UnweightedAverage;

    fn create_test_roster() -> (StudentRoster, Uuid, Uuid) {
        let mut roster = StudentRoster::new();
        let course_id = roster.add_course("Algorithms", 3).unwrap();
        let student_id = roster
            .register_student(
                StudentKind::Undergraduate,
                "S-1001",
                "Lina Haddad",
                "lina@example.org",
            )
            .unwrap();
        (roster, student_id, course_id)
    }

    #[test]
    fn test_register_and_find_student() {
        let (roster, student_id, _) = create_test_roster();

        let found = roster.find_by_student_number("S-1001").unwrap().unwrap();
        assert_eq!(found.get_id(), student_id);
        assert!(roster.find_by_student_number("S-9999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_student_number_is_rejected() {
        let (mut roster, _, _) = create_test_roster();

        let result = roster.register_student(
            StudentKind::Graduate,
            "S-1001",
            "Someone Else",
            "else@example.org",
        );

        assert!(matches!(result, Err(LedgerError::InvalidOperation(_))));
        assert_eq!(roster.student_count(), 1);
    }

    #[test]
    fn test_enroll_requires_existing_course() {
        let (mut roster, student_id, _) = create_test_roster();

        let result = roster.enroll(student_id, Uuid::new_v4());

        assert!(matches!(result, Err(LedgerError::NotFound(_))));
        assert!(roster
            .student(student_id)
            .unwrap()
            .enrolled_courses()
            .is_empty());
    }

    #[test]
    fn test_record_score_requires_enrollment() {
        let (mut roster, student_id, course_id) = create_test_roster();

        let result = roster.record_score(student_id, course_id, Decimal::new(80, 0));
        assert!(matches!(result, Err(LedgerError::InvalidOperation(_))));

        roster.enroll(student_id, course_id).unwrap();
        roster
            .record_score(student_id, course_id, Decimal::new(80, 0))
            .unwrap();
        assert_eq!(roster.student(student_id).unwrap().grades().len(), 1);
    }

    #[test]
    fn test_overall_grade_point_through_roster() {
        let (mut roster, student_id, course_id) = create_test_roster();
        let second_course = roster.add_course("Databases", 4).unwrap();
        roster.enroll(student_id, course_id).unwrap();
        roster.enroll(student_id, second_course).unwrap();
        roster
            .record_score(student_id, course_id, Decimal::new(95, 0))
            .unwrap(); // 4.0
        roster
            .record_score(student_id, second_course, Decimal::new(75, 0))
            .unwrap(); // 2.0

        let overall = roster
            .overall_grade_point(student_id, &UnweightedAverage)
            .unwrap()
            .unwrap();
        assert_eq!(overall, Decimal::new(30, 1));
    }

    #[test]
    fn test_class_average() {
        let (mut roster, first_student, course_id) = create_test_roster();
        let second_student = roster
            .register_student(
                StudentKind::Exchange,
                "S-1002",
                "Omar Said",
                "omar@example.org",
            )
            .unwrap();
        roster.enroll(first_student, course_id).unwrap();
        roster.enroll(second_student, course_id).unwrap();
        roster
            .record_score(first_student, course_id, Decimal::new(95, 0))
            .unwrap(); // 4.0
        roster
            .record_score(second_student, course_id, Decimal::new(55, 0))
            .unwrap(); // 1.0

        let average = roster.class_average(&UnweightedAverage).unwrap();
        assert_eq!(average, Decimal::new(25, 1));
    }

    #[test]
    fn test_class_average_ignores_ungraded_students() {
        let (mut roster, student_id, course_id) = create_test_roster();
        roster
            .register_student(
                StudentKind::Graduate,
                "S-1002",
                "Omar Said",
                "omar@example.org",
            )
            .unwrap();
        roster.enroll(student_id, course_id).unwrap();
        roster
            .record_score(student_id, course_id, Decimal::new(95, 0))
            .unwrap();

        let average = roster.class_average(&UnweightedAverage).unwrap();
        assert_eq!(average, Decimal::new(40, 1));
    }

    #[test]
    fn test_empty_roster_has_no_class_average() {
        let roster = StudentRoster::new();
        assert!(roster.class_average(&UnweightedAverage).is_none());
    }
}
