use lookbook_cache::{CacheError, SlotStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Slot key the favorites have always been stored under
pub const DEFAULT_FAVORITES_KEY: &str = "mm_favorites";

/// Outfit ids the user has hearted
///
/// Kept sorted so the same set always serializes to the same slot value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add the id if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Why the persisted favorites could not be read
///
/// None of these reach the user; the store falls back to an empty set.
#[derive(Error, Debug)]
pub enum PersistenceReadError {
    #[error("no favorites stored yet")]
    Missing,

    #[error("stored favorites are not a list of ids: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("favorites slot unreadable: {0}")]
    Slot(#[from] CacheError),
}

/// The single durable key-value slot favorites live in
#[cfg_attr(test, mockall::automock)]
pub trait FavoritesSlot {
    fn read(&self, key: &str) -> lookbook_cache::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> lookbook_cache::Result<()>;
}

impl FavoritesSlot for SlotStore {
    fn read(&self, key: &str) -> lookbook_cache::Result<Option<String>> {
        self.get(key)
    }

    fn write(&self, key: &str, value: &str) -> lookbook_cache::Result<()> {
        self.set(key, value)
    }
}

/// Parse whatever is in the slot
pub fn read_favorites<S: FavoritesSlot>(
    slot: &S,
    key: &str,
) -> Result<FavoriteSet, PersistenceReadError> {
    let raw = slot.read(key)?.ok_or(PersistenceReadError::Missing)?;
    let ids: Vec<String> = serde_json::from_str(&raw)?;
    Ok(FavoriteSet::from_ids(ids))
}

/// Favorite set plus the slot it is mirrored to
///
/// Every toggle rewrites the whole set to the slot before returning.
pub struct FavoritesStore<S: FavoritesSlot> {
    slot: S,
    key: String,
    set: FavoriteSet,
}

impl<S: FavoritesSlot> FavoritesStore<S> {
    /// Load the persisted set; missing or corrupt data means no favorites
    pub fn load(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let set = match read_favorites(&slot, &key) {
            Ok(set) => {
                debug!("Loaded {} favorites", set.len());
                set
            }
            Err(e) => {
                debug!("Starting with no favorites: {}", e);
                FavoriteSet::new()
            }
        };
        Self { slot, key, set }
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.set
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    /// Flip one id and write the full set back
    pub fn toggle(&mut self, id: &str) -> &FavoriteSet {
        let now_favorite = self.set.toggle(id);
        debug!("Favorite {} -> {}", id, now_favorite);

        if let Err(e) = self.persist() {
            warn!("Failed to save favorites: {}", e);
        }

        &self.set
    }

    fn persist(&self) -> crate::Result<()> {
        let value = serde_json::to_string(&self.set)?;
        self.slot.write(&self.key, &value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_toggle_set_membership() {
        let mut set = FavoriteSet::new();
        assert!(set.toggle("1"));
        assert!(set.contains("1"));
        assert!(!set.toggle("1"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_serializes_as_sorted_array() {
        let set = FavoriteSet::from_ids(["b", "a"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let mut slot = MockFavoritesSlot::new();
        slot.expect_read()
            .with(eq("mm_favorites"))
            .returning(|_| Ok(None));

        let store = FavoritesStore::load(slot, DEFAULT_FAVORITES_KEY);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for raw in ["not json", r#"{"id":"1"}"#, "[1,2]", ""] {
            let mut slot = MockFavoritesSlot::new();
            let raw = raw.to_string();
            slot.expect_read().returning(move |_| Ok(Some(raw.clone())));

            let store = FavoritesStore::load(slot, "mm_favorites");
            assert!(store.favorites().is_empty());
        }
    }

    #[test]
    fn test_load_slot_error_is_empty() {
        let mut slot = MockFavoritesSlot::new();
        slot.expect_read().returning(|_| {
            Err(CacheError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "locked",
            )))
        });

        let store = FavoritesStore::load(slot, "mm_favorites");
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_read_favorites_reports_why() {
        let mut slot = MockFavoritesSlot::new();
        slot.expect_read().returning(|_| Ok(Some("oops".to_string())));
        assert!(matches!(
            read_favorites(&slot, "k"),
            Err(PersistenceReadError::Corrupt(_))
        ));
    }

    #[test]
    fn test_toggle_writes_full_set_each_time() {
        let mut slot = MockFavoritesSlot::new();
        slot.expect_read()
            .returning(|_| Ok(Some(r#"["3"]"#.to_string())));
        slot.expect_write()
            .with(eq("mm_favorites"), eq(r#"["1","3"]"#))
            .times(1)
            .returning(|_, _| Ok(()));
        slot.expect_write()
            .with(eq("mm_favorites"), eq(r#"["3"]"#))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = FavoritesStore::load(slot, "mm_favorites");
        assert!(store.toggle("1").contains("1"));
        assert!(!store.toggle("1").contains("1"));
        assert_eq!(store.favorites(), &FavoriteSet::from_ids(["3"]));
    }

    #[test]
    fn test_toggle_survives_write_failure() {
        let mut slot = MockFavoritesSlot::new();
        slot.expect_read().returning(|_| Ok(None));
        slot.expect_write().returning(|_, _| {
            Err(CacheError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });

        let mut store = FavoritesStore::load(slot, "mm_favorites");
        store.toggle("5");
        assert!(store.is_favorite("5"));
    }

    #[test]
    fn test_sqlite_slot_round_trip() {
        let slot = SlotStore::in_memory().unwrap();
        let mut store = FavoritesStore::load(slot, "mm_favorites");
        store.toggle("2");
        store.toggle("9");

        let persisted = read_favorites(&store.slot, "mm_favorites").unwrap();
        assert_eq!(persisted, FavoriteSet::from_ids(["2", "9"]));
    }
}
