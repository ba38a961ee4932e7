use uuid::Uuid;

/// Trait for entities and ledger records that carry a stable UUID identity.
///
/// Business keys (account number, product name, student number) are values
/// and may be re-validated or re-indexed; the UUID never changes and is what
/// registries key their ownership maps by.
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}
