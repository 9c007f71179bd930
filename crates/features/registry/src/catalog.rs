//! The fixed list of gifts guests can browse and claim.

use crate::error::RegistryError;
use fxhash::FxHashMap;
use std::sync::Arc;
use vows_domain::config::RegistryConfig;
use vows_domain::gift::{Claim, RegistryItem};

#[derive(Debug)]
struct CatalogInner {
    items: Vec<RegistryItem>,
    index: FxHashMap<String, usize>,
}

/// Read-only, process-wide registry catalog in declaration order.
///
/// Cloning shares the same items.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

/// A catalog entry joined with its claim, as guests see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatus {
    pub item: RegistryItem,
    pub claimed: bool,
    pub claimed_by: Option<String>,
}

impl Catalog {
    /// Builds a catalog, rejecting blank or duplicate ids.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidCatalog`] naming the offending id.
    pub fn new(items: Vec<RegistryItem>) -> Result<Self, RegistryError> {
        let mut index = FxHashMap::default();
        for (position, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(RegistryError::InvalidCatalog {
                    message: format!("Item #{position} has an empty id").into(),
                    context: None,
                });
            }
            if index.insert(item.id.clone(), position).is_some() {
                return Err(RegistryError::InvalidCatalog {
                    message: format!("Duplicate item id '{}'", item.id).into(),
                    context: None,
                });
            }
        }
        Ok(Self { inner: Arc::new(CatalogInner { items, index }) })
    }

    /// Configured items, or the built-in list when none are configured.
    ///
    /// # Errors
    /// See [`Catalog::new`].
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        Self::new(config.items.clone().unwrap_or_else(builtin_items))
    }

    #[must_use]
    pub fn list_items(&self) -> &[RegistryItem] {
        &self.inner.items
    }

    #[must_use]
    pub fn find_item(&self, id: &str) -> Option<&RegistryItem> {
        self.inner.index.get(id).map(|&position| &self.inner.items[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    /// Joins every item with `claims`. Fund items always read as unclaimed.
    #[must_use]
    pub fn with_claims(&self, claims: &[Claim]) -> Vec<ItemStatus> {
        let by_item: FxHashMap<&str, &str> =
            claims.iter().map(|c| (c.item_id.as_str(), c.claimer_name.as_str())).collect();

        self.inner
            .items
            .iter()
            .map(|item| {
                let claimed_by = if item.is_fund {
                    None
                } else {
                    by_item.get(item.id.as_str()).map(|name| (*name).to_owned())
                };
                ItemStatus { item: item.clone(), claimed: claimed_by.is_some(), claimed_by }
            })
            .collect()
    }
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    price: &str,
    link: Option<&str>,
    category: &str,
) -> RegistryItem {
    RegistryItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price: price.to_owned(),
        link: link.map(str::to_owned),
        category: category.to_owned(),
        is_fund: false,
    }
}

/// The default registry shipped with the site.
#[must_use]
pub fn builtin_items() -> Vec<RegistryItem> {
    vec![
        item(
            "dutch-oven",
            "Cast Iron Dutch Oven",
            "A classic 5.5-quart enameled cast iron dutch oven for cozy winter cooking.",
            "$350",
            Some("https://www.lecreuset.com"),
            "Kitchen",
        ),
        item(
            "hiking-pack",
            "Hiking Backpack (His & Hers)",
            "Two matching 40L hiking backpacks for Alaska adventures.",
            "$280 each",
            None,
            "Adventure",
        ),
        item(
            "espresso-machine",
            "Espresso Machine",
            "Semi-automatic espresso machine for morning rituals.",
            "$450",
            None,
            "Kitchen",
        ),
        item(
            "kayak",
            "Tandem Kayak",
            "A two-person kayak for exploring Alaskan waterways together.",
            "$800",
            None,
            "Adventure",
        ),
        item(
            "bedding-set",
            "Luxury Bedding Set",
            "King-size organic cotton bedding set in deep navy.",
            "$320",
            None,
            "Home",
        ),
        RegistryItem {
            is_fund: true,
            ..item(
                "honeymoon-fund",
                "Honeymoon Fund",
                "Contribute to our honeymoon adventure. Every bit helps!",
                "Any amount",
                Some("/gift-fund"),
                "Experience",
            )
        },
        item(
            "wine-cooler",
            "Wine Refrigerator",
            "Dual-zone wine cooler for 46 bottles.",
            "$380",
            None,
            "Home",
        ),
        item(
            "stand-mixer",
            "Stand Mixer",
            "Professional 5-quart stand mixer for baking.",
            "$430",
            None,
            "Kitchen",
        ),
        item(
            "fire-pit",
            "Outdoor Fire Pit",
            "Elegant cast iron fire pit for Alaskan evenings under the stars.",
            "$260",
            None,
            "Adventure",
        ),
        item(
            "photo-album",
            "Custom Wedding Photo Album",
            "A hand-bound leather photo album to preserve our wedding memories.",
            "$150",
            None,
            "Experience",
        ),
    ]
}
