use crate::catalog::Catalog;
use crate::coordinator::ClaimError;
use tracing::{trace, warn};
use vows_domain::gift::LinkClickState;

/// Records which gift links a guest has opened.
///
/// State lives in the caller's [`LinkClickState`]; the tracker only checks
/// ids against the catalog, so nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct LinkClickTracker {
    catalog: Catalog,
}

impl LinkClickTracker {
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Marks `item_id` as opened. Idempotent.
    ///
    /// # Errors
    /// Returns [`ClaimError::ItemNotFound`] for ids outside the catalog; the
    /// state is left untouched.
    pub fn record_click(&self, state: &mut LinkClickState, item_id: &str) -> Result<(), ClaimError> {
        if self.catalog.find_item(item_id).is_none() {
            warn!(item_id, "Link click for unknown registry item");
            return Err(ClaimError::ItemNotFound);
        }
        if state.mark(item_id) {
            trace!(item_id, "Registry link opened");
        }
        Ok(())
    }

    #[must_use]
    pub fn has_clicked(&self, state: &LinkClickState, item_id: &str) -> bool {
        state.contains(item_id)
    }

    pub fn clear(&self, state: &mut LinkClickState, item_id: &str) {
        state.remove(item_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_items;

    fn tracker() -> LinkClickTracker {
        LinkClickTracker::new(Catalog::new(builtin_items()).unwrap())
    }

    #[test]
    fn record_is_idempotent_and_clearable() {
        let tracker = tracker();
        let mut state = LinkClickState::new();

        assert!(!tracker.has_clicked(&state, "dutch-oven"));
        tracker.record_click(&mut state, "dutch-oven").unwrap();
        tracker.record_click(&mut state, "dutch-oven").unwrap();
        assert!(tracker.has_clicked(&state, "dutch-oven"));
        assert_eq!(state.len(), 1);

        tracker.clear(&mut state, "dutch-oven");
        assert!(!tracker.has_clicked(&state, "dutch-oven"));
    }

    #[test]
    fn unknown_items_leave_state_untouched() {
        let tracker = tracker();
        let mut state = LinkClickState::new();

        assert_eq!(tracker.record_click(&mut state, "yacht"), Err(ClaimError::ItemNotFound));
        assert!(state.is_empty());
    }
}
