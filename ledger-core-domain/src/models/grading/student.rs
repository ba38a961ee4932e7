use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::grading::aggregation::GradeAggregation;
use crate::models::grading::grade::GradeModel;
use crate::models::identifiable::Identifiable;
use crate::models::validated::try_non_blank;

/// Closed set of student kinds. Replaces the abstract class hierarchy of the
/// source domain; per-kind behavior is dispatched by matching on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentKind {
    Undergraduate,
    Graduate,
    Exchange,
}

impl std::fmt::Display for StudentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentKind::Undergraduate => write!(f, "Undergraduate"),
            StudentKind::Graduate => write!(f, "Graduate"),
            StudentKind::Exchange => write!(f, "Exchange"),
        }
    }
}

impl FromStr for StudentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Undergraduate" => Ok(StudentKind::Undergraduate),
            "Graduate" => Ok(StudentKind::Graduate),
            "Exchange" => Ok(StudentKind::Exchange),
            _ => Err(()),
        }
    }
}

/// A student with validated identity fields, course enrollments and an
/// append-only list of grades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentModel {
    id: Uuid,
    student_number: HeaplessString<32>,
    name: HeaplessString<100>,
    email: HeaplessString<100>,
    kind: StudentKind,
    enrolled_at: DateTime<Utc>,
    enrolled_courses: Vec<Uuid>,
    grades: Vec<GradeModel>,
}

impl StudentModel {
    /// Fails with `InvalidArgument` when any identity field is blank or the
    /// email is malformed.
    pub fn new(kind: StudentKind, student_number: &str, name: &str, email: &str) -> LedgerResult<Self> {
        let student_number = try_non_blank::<32>("student number", student_number)?;
        let name = try_non_blank::<100>("student name", name)?;
        let email = try_non_blank::<100>("email", email)?;
        if !email.contains('@') || !email.contains('.') {
            return Err(LedgerError::InvalidArgument(format!(
                "email is not a valid address: {email}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            student_number,
            name,
            email,
            kind,
            enrolled_at: Utc::now(),
            enrolled_courses: Vec::new(),
            grades: Vec::new(),
        })
    }

    /// Enroll in a course. Fails with `InvalidOperation` on duplicate enrollment.
    pub fn enroll(&mut self, course_id: Uuid) -> LedgerResult<()> {
        if self.is_enrolled(course_id) {
            return Err(LedgerError::InvalidOperation(format!(
                "student {} is already enrolled in course {course_id}",
                self.student_number
            )));
        }
        self.enrolled_courses.push(course_id);
        Ok(())
    }

    pub fn is_enrolled(&self, course_id: Uuid) -> bool {
        self.enrolled_courses.contains(&course_id)
    }

    /// Record a score for an enrolled course, appending one immutable grade.
    ///
    /// Fails with `InvalidOperation` when the student is not enrolled in the
    /// course, and with `InvalidArgument` when the score is negative; on
    /// failure no grade is appended.
    pub fn record_grade(&mut self, course_id: Uuid, score: Decimal) -> LedgerResult<()> {
        if !self.is_enrolled(course_id) {
            return Err(LedgerError::InvalidOperation(format!(
                "student {} is not enrolled in course {course_id}",
                self.student_number
            )));
        }
        let grade = GradeModel::new(course_id, score)?;
        self.grades.push(grade);
        Ok(())
    }

    /// Aggregate all grades under the supplied policy.
    pub fn overall_grade_point(&self, policy: &dyn GradeAggregation) -> Option<Decimal> {
        policy.overall_grade_point(&self.grades)
    }

    pub fn student_number(&self) -> &str {
        self.student_number.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn kind(&self) -> StudentKind {
        self.kind
    }

    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }

    pub fn enrolled_courses(&self) -> &[Uuid] {
        &self.enrolled_courses
    }

    /// The full ordered grade history, oldest first.
    pub fn grades(&self) -> &[GradeModel] {
        &self.grades
    }
}

impl Identifiable for StudentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
