/// Published on the event bus after a claim row is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemClaimed {
    pub item_id: String,
    pub item_name: String,
    pub claimer_name: String,
    pub created_at: String,
}
