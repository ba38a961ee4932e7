use rust_decimal::Decimal;

use crate::models::grading::grade::GradeModel;

/// Policy for aggregating a student's grades into one overall grade point.
///
/// The per-kind weighting policies (undergraduate, graduate, exchange) are an
/// open extension point; callers supply whichever policy applies.
pub trait GradeAggregation {
    /// Returns `None` when there are no grades to aggregate.
    fn overall_grade_point(&self, grades: &[GradeModel]) -> Option<Decimal>;
}

/// Plain mean of the grade points, one course one vote.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnweightedAverage;

impl GradeAggregation for UnweightedAverage {
    fn overall_grade_point(&self, grades: &[GradeModel]) -> Option<Decimal> {
        if grades.is_empty() {
            return None;
        }
        let total: Decimal = grades.iter().map(|grade| grade.grade_point()).sum();
        Some(total / Decimal::from(grades.len() as i64))
    }
}
