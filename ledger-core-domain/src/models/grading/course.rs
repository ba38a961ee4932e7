use heapless::String as HeaplessString;
use ledger_core_api::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;
use crate::models::validated::try_non_blank;

/// An immutable course record referenced by grades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModel {
    id: Uuid,
    name: HeaplessString<100>,
    credits: i32,
}

impl CourseModel {
    /// Fails with `InvalidArgument` when `name` is blank or `credits <= 0`.
    pub fn new(name: &str, credits: i32) -> LedgerResult<Self> {
        let name = try_non_blank::<100>("course name", name)?;
        if credits <= 0 {
            return Err(LedgerError::InvalidArgument(format!(
                "credits must be positive, got {credits}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            credits,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn credits(&self) -> i32 {
        self.credits
    }
}

impl Identifiable for CourseModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
