use ledger_core_api::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Categorical estimate derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estimate {
    Excellent,
    VeryGood,
    Good,
    Acceptable,
    Fail,
}

impl Estimate {
    /// Fixed score thresholds: >= 90 Excellent, >= 80 VeryGood, >= 70 Good,
    /// >= 50 Acceptable, else Fail. Scores have no upper bound.
    pub fn from_score(score: Decimal) -> Self {
        if score >= Decimal::new(90, 0) {
            Estimate::Excellent
        } else if score >= Decimal::new(80, 0) {
            Estimate::VeryGood
        } else if score >= Decimal::new(70, 0) {
            Estimate::Good
        } else if score >= Decimal::new(50, 0) {
            Estimate::Acceptable
        } else {
            Estimate::Fail
        }
    }

    /// Fixed grade-point lookup for the estimate.
    pub fn grade_point(&self) -> Decimal {
        match self {
            Estimate::Excellent => Decimal::new(40, 1),
            Estimate::VeryGood => Decimal::new(30, 1),
            Estimate::Good => Decimal::new(20, 1),
            Estimate::Acceptable => Decimal::new(10, 1),
            Estimate::Fail => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Estimate::Excellent => write!(f, "Excellent"),
            Estimate::VeryGood => write!(f, "VeryGood"),
            Estimate::Good => write!(f, "Good"),
            Estimate::Acceptable => write!(f, "Acceptable"),
            Estimate::Fail => write!(f, "Fail"),
        }
    }
}

impl FromStr for Estimate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Excellent" => Ok(Estimate::Excellent),
            "VeryGood" => Ok(Estimate::VeryGood),
            "Good" => Ok(Estimate::Good),
            "Acceptable" => Ok(Estimate::Acceptable),
            "Fail" => Ok(Estimate::Fail),
            _ => Err(()),
        }
    }
}

/// A score awarded for one course, owned by the student it was awarded to.
///
/// The estimate is derived once at construction and the record is never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeModel {
    id: Uuid,
    course_id: Uuid,
    score: Decimal,
    estimate: Estimate,
}

impl GradeModel {
    /// Fails with `InvalidArgument` when `score < 0`.
    pub fn new(course_id: Uuid, score: Decimal) -> LedgerResult<Self> {
        if score < Decimal::ZERO {
            return Err(LedgerError::InvalidArgument(format!(
                "score must be non-negative, got {score}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            course_id,
            score,
            estimate: Estimate::from_score(score),
        })
    }

    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    pub fn score(&self) -> Decimal {
        self.score
    }

    pub fn estimate(&self) -> Estimate {
        self.estimate
    }

    pub fn grade_point(&self) -> Decimal {
        self.estimate.grade_point()
    }
}

impl Identifiable for GradeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
