use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{RentalFilter, RentalOrder, SelectLimit, SelectOffset};

/// Everything a paginated listing needs: filters, optional ordering and the
/// page. A missing limit means every remaining row.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct RentalSearch {
    filter: RentalFilter,
    order: Option<RentalOrder>,
    offset: SelectOffset,
    limit: Option<SelectLimit>,
}

impl RentalSearch {
    pub fn new(
        filter: RentalFilter,
        order: Option<RentalOrder>,
        offset: SelectOffset,
        limit: Option<SelectLimit>,
    ) -> Self {
        Self {
            filter,
            order,
            offset,
            limit,
        }
    }
}
