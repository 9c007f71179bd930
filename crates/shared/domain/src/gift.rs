use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A gift on the registry. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display string, e.g. `"$280 each"` or `"Any amount"`.
    #[serde(default)]
    pub price: String,
    /// External purchase page. Presence enables the link-click gate.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Monetary contribution rather than a physical gift; never claimable.
    #[serde(default)]
    pub is_fund: bool,
}

impl RegistryItem {
    #[must_use]
    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|link| !link.trim().is_empty())
    }
}

/// A guest's durable promise to bring a specific item.
///
/// At most one claim exists per `item_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub item_id: String,
    pub claimer_name: String,
    /// RFC 3339 timestamp of the insert.
    pub created_at: String,
}

/// Items whose external link this guest session has opened.
///
/// Owned by exactly one session and passed explicitly to whoever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkClickState {
    clicked: FxHashSet<String>,
}

impl LinkClickState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the item was already marked.
    pub fn mark(&mut self, item_id: &str) -> bool {
        self.clicked.insert(item_id.to_owned())
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.clicked.contains(item_id)
    }

    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, item_id: &str) -> bool {
        self.clicked.remove(item_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clicked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clicked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: Option<&str>) -> RegistryItem {
        RegistryItem {
            id: "kayak".to_owned(),
            name: "Tandem Kayak".to_owned(),
            description: String::new(),
            price: "$800".to_owned(),
            link: link.map(str::to_owned),
            category: "Adventure".to_owned(),
            is_fund: false,
        }
    }

    #[test]
    fn blank_link_does_not_count() {
        assert!(!item(None).has_link());
        assert!(!item(Some("  ")).has_link());
        assert!(item(Some("https://example.com")).has_link());
    }

    #[test]
    fn link_clicks_are_a_set() {
        let mut state = LinkClickState::new();
        assert!(state.mark("dutch-oven"));
        assert!(!state.mark("dutch-oven"));
        assert_eq!(state.len(), 1);
        assert!(state.remove("dutch-oven"));
        assert!(state.is_empty());
    }

    #[test]
    fn click_states_compare_by_content() {
        let mut a = LinkClickState::new();
        a.mark("kayak");
        a.mark("dutch-oven");
        let mut b = LinkClickState::new();
        b.mark("dutch-oven");
        b.mark("kayak");
        assert_eq!(a, b);
        assert!(b.contains("kayak"));
        assert!(!b.contains("wine-cooler"));
    }
}
