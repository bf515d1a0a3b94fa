use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One look in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub title: String,
    /// Image URL, relative or absolute
    pub image: String,
    /// The aesthetic this look belongs to (casual, formal, ...)
    pub category: String,
    pub tags: Vec<String>,
}

/// Every outfit, in the order the data source listed them
///
/// Built once at startup and never mutated. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutfitCatalog {
    outfits: Vec<Outfit>,
}

impl OutfitCatalog {
    /// Build a catalog, returning the first repeated id if there is one
    pub fn new(outfits: Vec<Outfit>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for outfit in &outfits {
            if !seen.insert(outfit.id.as_str()) {
                return Err(outfit.id.clone());
            }
        }
        Ok(Self { outfits })
    }

    pub fn outfits(&self) -> &[Outfit] {
        &self.outfits
    }

    pub fn get(&self, id: &str) -> Option<&Outfit> {
        self.outfits.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    /// Distinct categories in first-appearance order
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for outfit in &self.outfits {
            if !out.contains(&outfit.category) {
                out.push(outfit.category.clone());
            }
        }
        out
    }

    /// Distinct tags (compared case-insensitively) in first-appearance order
    pub fn tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for tag in self.outfits.iter().flat_map(|o| o.tags.iter()) {
            if seen.insert(tag.to_lowercase()) {
                out.push(tag.clone());
            }
        }
        out
    }
}

/// The slice of the catalog currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<'a> {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<&'a Outfit>,
}

impl<'a> ViewState<'a> {
    pub fn ids(&self) -> Vec<&'a str> {
        self.items.iter().map(|o| o.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
