use serde::{Deserialize, Serialize};

/// Lifecycle stage derived from which nullable columns of a rental are set.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RentalStatus {
    Open,
    Returned,
    FeeSettled,
}
