use crate::catalog::ItemStatus;
use vows_derive::api_model;

/// A registry item with its claim status.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display price, e.g. `$280 each`
    pub price: String,
    /// External purchase page; opening it unlocks the claim
    pub link: Option<String>,
    pub category: String,
    /// Contribution item, never claimed
    pub is_fund: bool,
    pub claimed: bool,
    pub claimed_by: Option<String>,
}

impl From<ItemStatus> for RegistryItemView {
    fn from(status: ItemStatus) -> Self {
        let ItemStatus { item, claimed, claimed_by } = status;
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            link: item.link,
            category: item.category,
            is_fund: item.is_fund,
            claimed,
            claimed_by,
        }
    }
}

/// Claim form body. A missing name is reported as an empty one.
#[api_model(deny_unknown_fields = false)]
#[derive(Default)]
pub struct ClaimRequest {
    #[serde(default)]
    pub claimer_name: Option<String>,
}
