// Event controller - the only place application state changes
use crate::config::{RefreshPolicy, UiConfig};
use crate::error::LoadError;
use crate::favorites::{FavoriteSet, FavoritesSlot, FavoritesStore};
use crate::filters::{normalize_query, Selector};
use crate::models::OutfitCatalog;
use crate::render::Page;
use tracing::{debug, error};

/// Something the user did to a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowAll,
    SelectCategory(String),
    SelectTag(String),
    ShowFavorites,
    /// Raw contents of the search box after an edit
    SearchInput(String),
    ToggleFavorite(String),
}

/// Catalog, favorites, active selector and the rendered page
///
/// Every transition recomputes the view from scratch and hands it to the
/// page; nothing patches the item list incrementally.
pub struct Gallery<S: FavoritesSlot> {
    catalog: OutfitCatalog,
    favorites: FavoritesStore<S>,
    active: Selector,
    page: Page,
    refresh: RefreshPolicy,
}

impl<S: FavoritesSlot> Gallery<S> {
    /// Wire up the gallery from whatever the catalog load produced
    ///
    /// A failed load leaves an empty catalog and puts the error text where
    /// the cards would go.
    pub fn new(
        loaded: Result<OutfitCatalog, LoadError>,
        favorites: FavoritesStore<S>,
        ui: &UiConfig,
    ) -> Self {
        let (catalog, failure) = match loaded {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                error!("Failed to load outfits: {}", e);
                (OutfitCatalog::default(), Some(e))
            }
        };

        let categories = if ui.categories.is_empty() {
            catalog.categories()
        } else {
            ui.categories.clone()
        };
        let tags = if ui.tags.is_empty() {
            catalog.tags()
        } else {
            ui.tags.clone()
        };

        let mut gallery = Self {
            page: Page::new(&categories, &tags),
            catalog,
            favorites,
            active: Selector::All,
            refresh: ui.refresh,
        };

        match failure {
            Some(e) => gallery.page.show_load_error(e.to_string()),
            None => gallery.select(Selector::All),
        }

        gallery
    }

    pub fn handle(&mut self, event: UiEvent) {
        debug!("UI event: {:?}", event);
        match event {
            UiEvent::ShowAll => self.select(Selector::All),
            UiEvent::SelectCategory(category) => self.select(Selector::Category(category)),
            UiEvent::SelectTag(tag) => self.select(Selector::Tag(tag)),
            UiEvent::ShowFavorites => self.select(Selector::Favorites),
            UiEvent::SearchInput(raw) => {
                let query = normalize_query(&raw);
                self.page.search_value = raw;
                if query.is_empty() {
                    self.select(Selector::All);
                } else {
                    self.select(Selector::Search(query));
                }
            }
            UiEvent::ToggleFavorite(id) => self.toggle_favorite(&id),
        }
    }

    fn select(&mut self, selector: Selector) {
        if let Some(key) = selector.filter_key() {
            self.page.set_active_filter(key);
        }
        if let Selector::Tag(tag) = &selector {
            self.page.set_active_tag(tag);
        }
        self.active = selector;
        self.rerender();
    }

    /// The active selector stays put; only the hearts (or the favorites
    /// view itself) change.
    fn toggle_favorite(&mut self, id: &str) {
        let now_favorite = self.favorites.toggle(id).contains(id);

        match self.refresh {
            RefreshPolicy::Patch => {
                self.page.set_card_favorited(id, now_favorite);
                if self.active == Selector::Favorites {
                    self.rerender();
                }
            }
            RefreshPolicy::Recompute => self.rerender(),
        }
    }

    fn rerender(&mut self) {
        // A failed load keeps its message; there is nothing to show instead
        if self.page.load_error().is_some() {
            return;
        }
        let favorites = self.favorites.favorites();
        let view = self.active.apply(&self.catalog, favorites);
        self.page.render(&view, favorites);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn catalog(&self) -> &OutfitCatalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    pub fn active(&self) -> &Selector {
        &self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outfit;
    use lookbook_cache::SlotStore;

    fn outfit(id: &str, title: &str, category: &str, tags: &[&str]) -> Outfit {
        Outfit {
            id: id.to_string(),
            title: title.to_string(),
            image: format!("img/{}.jpg", id),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn catalog() -> OutfitCatalog {
        OutfitCatalog::new(vec![
            outfit("1", "Denim Look", "casual", &["street-style"]),
            outfit("2", "Gala Gown", "formal", &["evening"]),
            outfit("3", "Linen Set", "casual", &["Old-Money", "summer"]),
        ])
        .unwrap()
    }

    fn gallery_with(ui: UiConfig) -> Gallery<SlotStore> {
        let store = FavoritesStore::load(SlotStore::in_memory().unwrap(), "mm_favorites");
        Gallery::new(Ok(catalog()), store, &ui)
    }

    fn gallery() -> Gallery<SlotStore> {
        gallery_with(UiConfig::default())
    }

    fn shown(g: &Gallery<SlotStore>) -> Vec<&str> {
        g.page().cards().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_starts_on_all() {
        let g = gallery();
        assert_eq!(g.active(), &Selector::All);
        assert_eq!(shown(&g), vec!["1", "2", "3"]);
        assert_eq!(g.page().title, "All Outfits");
        assert_eq!(g.page().active_filter(), Some("all"));
    }

    #[test]
    fn test_controls_built_from_catalog() {
        let g = gallery();
        let keys: Vec<_> = g.page().filters().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["all", "casual", "formal", "favorites"]);
        let tags: Vec<_> = g.page().tags().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(tags, vec!["Street Style", "Evening", "Old Money", "Summer"]);
    }

    #[test]
    fn test_configured_controls_win() {
        let ui = UiConfig {
            categories: vec!["formal".into()],
            tags: vec!["evening".into()],
            ..UiConfig::default()
        };
        let g = gallery_with(ui);
        assert_eq!(g.page().filters().len(), 3);
        assert_eq!(g.page().tags().len(), 1);
    }

    #[test]
    fn test_category_transition() {
        let mut g = gallery();
        g.handle(UiEvent::SelectCategory("casual".into()));
        assert_eq!(g.active(), &Selector::Category("casual".into()));
        assert_eq!(shown(&g), vec!["1", "3"]);
        assert_eq!(g.page().subtitle, "2 items");
        assert_eq!(g.page().active_filter(), Some("casual"));

        g.handle(UiEvent::ShowAll);
        assert_eq!(shown(&g), vec!["1", "2", "3"]);
        assert_eq!(g.page().active_filter(), Some("all"));
    }

    #[test]
    fn test_reselecting_tag_recomputes_same_view() {
        let mut g = gallery();
        g.handle(UiEvent::SelectTag("old-money".into()));
        let first = shown(&g).iter().map(|s| s.to_string()).collect::<Vec<_>>();
        g.handle(UiEvent::SelectTag("old-money".into()));

        assert_eq!(shown(&g), first);
        assert_eq!(shown(&g), vec!["3"]);
        assert_eq!(g.page().title, "Old Money");
        assert_eq!(g.active(), &Selector::Tag("old-money".into()));
    }

    #[test]
    fn test_search_every_keystroke_and_empty_goes_back_to_all() {
        let mut g = gallery();
        g.handle(UiEvent::SelectCategory("formal".into()));

        g.handle(UiEvent::SearchInput("d".into()));
        assert_eq!(g.active(), &Selector::Search("d".into()));
        g.handle(UiEvent::SearchInput("de".into()));
        assert_eq!(shown(&g), vec!["1"]);
        assert_eq!(g.page().title, "Search: \"de\"");
        assert_eq!(g.page().subtitle, "1 results");
        assert_eq!(g.page().search_value, "de");

        g.handle(UiEvent::SearchInput("  ".into()));
        assert_eq!(g.active(), &Selector::All);
        assert_eq!(shown(&g), vec!["1", "2", "3"]);
        assert_eq!(g.page().active_filter(), Some("all"));
    }

    #[test]
    fn test_no_match_shows_placeholder() {
        let mut g = gallery();
        g.handle(UiEvent::SearchInput("velvet".into()));
        assert!(g.page().cards().is_empty());
        assert!(g.page().empty_state_visible());
    }

    #[test]
    fn test_toggle_patches_card_and_keeps_selector() {
        let mut g = gallery();
        g.handle(UiEvent::SelectCategory("casual".into()));
        g.handle(UiEvent::ToggleFavorite("3".into()));

        assert_eq!(g.active(), &Selector::Category("casual".into()));
        assert_eq!(shown(&g), vec!["1", "3"]);
        assert!(g.page().cards()[1].favorited);
        assert!(g.favorites().contains("3"));
    }

    #[test]
    fn test_unfavorite_disappears_from_favorites_view() {
        let mut g = gallery();
        g.handle(UiEvent::ToggleFavorite("1".into()));
        g.handle(UiEvent::ToggleFavorite("2".into()));
        g.handle(UiEvent::ShowFavorites);
        assert_eq!(shown(&g), vec!["1", "2"]);
        assert_eq!(g.page().subtitle, "2 saved");

        g.handle(UiEvent::ToggleFavorite("1".into()));
        assert_eq!(shown(&g), vec!["2"]);
        assert_eq!(g.page().subtitle, "1 saved");
        assert_eq!(g.active(), &Selector::Favorites);
    }

    #[test]
    fn test_scenario_favorite_then_favorites_view() {
        let mut g = gallery();
        g.handle(UiEvent::ToggleFavorite("1".into()));
        g.handle(UiEvent::ShowFavorites);
        assert_eq!(shown(&g), vec!["1"]);
        assert_eq!(g.page().subtitle, "1 saved");
    }

    #[test]
    fn test_recompute_policy_rerenders_active_view() {
        let ui = UiConfig {
            refresh: RefreshPolicy::Recompute,
            ..UiConfig::default()
        };
        let mut g = gallery_with(ui);
        g.handle(UiEvent::SearchInput("linen".into()));
        g.handle(UiEvent::ToggleFavorite("3".into()));

        assert_eq!(g.active(), &Selector::Search("linen".into()));
        assert_eq!(shown(&g), vec!["3"]);
        assert!(g.page().cards()[0].favorited);
    }

    #[test]
    fn test_load_failure_shows_message_without_cards() {
        let store = FavoritesStore::load(SlotStore::in_memory().unwrap(), "mm_favorites");
        let err = LoadError::Unreachable {
            source_name: "outfits.json".into(),
            reason: "No such file".into(),
        };
        let mut g = Gallery::new(Err(err), store, &UiConfig::default());

        assert!(g.page().cards().is_empty());
        assert_eq!(
            g.page().load_error(),
            Some("Could not reach outfits.json: No such file")
        );
        assert!(g.catalog().is_empty());

        // controls still move but the message stays in place of the cards
        g.handle(UiEvent::ShowFavorites);
        assert!(g.page().cards().is_empty());
        assert!(!g.page().empty_state_visible());
        assert_eq!(g.page().active_filter(), Some("favorites"));
    }

    #[test]
    fn test_load_error_survives_every_event() {
        let store = FavoritesStore::load(SlotStore::in_memory().unwrap(), "mm_favorites");
        let err = LoadError::Unreachable {
            source_name: "outfits.json".into(),
            reason: "No such file".into(),
        };
        let mut g = Gallery::new(Err(err), store, &UiConfig::default());

        for event in [
            UiEvent::ShowAll,
            UiEvent::SelectCategory("casual".into()),
            UiEvent::SelectTag("evening".into()),
            UiEvent::SearchInput("gown".into()),
            UiEvent::SearchInput("".into()),
            UiEvent::ToggleFavorite("1".into()),
            UiEvent::ShowFavorites,
        ] {
            g.handle(event);
            assert_eq!(
                g.page().load_error(),
                Some("Could not reach outfits.json: No such file")
            );
            assert!(g.page().cards().is_empty());
        }
    }
}
