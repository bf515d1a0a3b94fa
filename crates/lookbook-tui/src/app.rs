// TUI application state - wraps the gallery controller with cursor and input state
use lookbook_core::render::Card;
use lookbook_core::filters::same_tag;
use lookbook_core::{CatalogSource, FavoritesSlot, Gallery, Selector, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Moving around the grid
    Searching, // Typing in the search box
    Help,      // Keybindings popup
}

pub struct App<S: FavoritesSlot> {
    pub gallery: Gallery<S>,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub selected_index: usize,
    /// First grid row on screen
    pub scroll_row: usize,
    pub columns: usize,
    pub status_message: Option<String>,
    /// Where the catalog came from, relative image paths hang off it
    pub catalog_source: Option<CatalogSource>,
}

impl<S: FavoritesSlot> App<S> {
    pub fn new(gallery: Gallery<S>, columns: u16) -> Self {
        Self {
            gallery,
            should_quit: false,
            input_mode: InputMode::Normal,
            selected_index: 0,
            scroll_row: 0,
            columns: usize::from(columns.max(1)),
            status_message: None,
            catalog_source: None,
        }
    }

    pub fn with_catalog_source(mut self, source: CatalogSource) -> Self {
        self.catalog_source = Some(source);
        self
    }

    /// Forward an event to the controller and keep the cursor sane
    ///
    /// Anything but a heart toggle shows a new view, so the cursor goes back
    /// to the first card.
    pub fn dispatch(&mut self, event: UiEvent) {
        let keeps_cursor = matches!(event, UiEvent::ToggleFavorite(_));
        self.gallery.handle(event);

        if !keeps_cursor {
            self.selected_index = 0;
            self.scroll_row = 0;
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.card_count();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn cards(&self) -> &[Card] {
        self.gallery.page().cards()
    }

    pub fn card_count(&self) -> usize {
        self.cards().len()
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards().get(self.selected_index)
    }

    /// Path or URL to hand to the system opener for the selected card
    pub fn selected_image_target(&self) -> Option<String> {
        let card = self.selected_card()?;
        Some(match &self.catalog_source {
            Some(source) => source.resolve(&card.image),
            None => card.image.clone(),
        })
    }

    pub fn selected_row(&self) -> usize {
        self.selected_index / self.columns
    }

    pub fn next_card(&mut self) {
        if self.selected_index + 1 < self.card_count() {
            self.selected_index += 1;
        }
    }

    pub fn previous_card(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn card_below(&mut self) {
        let target = self.selected_index + self.columns;
        if target < self.card_count() {
            self.selected_index = target;
        } else if self.card_count() > 0 && self.selected_row() < (self.card_count() - 1) / self.columns {
            // short last row: land on its last card
            self.selected_index = self.card_count() - 1;
        }
    }

    pub fn card_above(&mut self) {
        if self.selected_index >= self.columns {
            self.selected_index -= self.columns;
        }
    }

    /// Scroll so the selected row sits inside `visible_rows`
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.selected_row();
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(id) = self.selected_card().map(|c| c.id.clone()) {
            self.dispatch(UiEvent::ToggleFavorite(id));
        }
    }

    /// Category keys in button order (the filter row minus "all"/"favorites")
    fn category_keys(&self) -> Vec<String> {
        self.gallery
            .page()
            .filters()
            .iter()
            .filter(|c| c.key != "all" && c.key != "favorites")
            .map(|c| c.key.clone())
            .collect()
    }

    fn tag_keys(&self) -> Vec<String> {
        self.gallery
            .page()
            .tags()
            .iter()
            .map(|c| c.key.clone())
            .collect()
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let keys = self.category_keys();
        let current = match self.gallery.active() {
            Selector::Category(c) => keys.iter().position(|k| k == c),
            _ => None,
        };
        if let Some(key) = step(&keys, current, forward) {
            self.dispatch(UiEvent::SelectCategory(key));
        }
    }

    pub fn cycle_tag(&mut self, forward: bool) {
        let keys = self.tag_keys();
        let current = match self.gallery.active() {
            Selector::Tag(t) => keys.iter().position(|k| same_tag(k, t)),
            _ => None,
        };
        if let Some(key) = step(&keys, current, forward) {
            self.dispatch(UiEvent::SelectTag(key));
        }
    }

    /// What is in the search box; the page holds the only copy
    pub fn search_text(&self) -> &str {
        &self.gallery.page().search_value
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut raw = self.search_text().to_string();
        raw.push(c);
        self.dispatch(UiEvent::SearchInput(raw));
    }

    pub fn pop_search_char(&mut self) {
        let mut raw = self.search_text().to_string();
        if raw.pop().is_some() {
            self.dispatch(UiEvent::SearchInput(raw));
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::Help => InputMode::Normal,
            _ => InputMode::Help,
        };
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Next or previous key in a ring; starts at either end when nothing is active
fn step(keys: &[String], current: Option<usize>, forward: bool) -> Option<String> {
    if keys.is_empty() {
        return None;
    }
    let n = keys.len();
    let idx = match (current, forward) {
        (Some(i), true) => (i + 1) % n,
        (Some(i), false) => (i + n - 1) % n,
        (None, true) => 0,
        (None, false) => n - 1,
    };
    Some(keys[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookbook_cache::SlotStore;
    use lookbook_core::config::UiConfig;
    use lookbook_core::{FavoritesStore, Outfit, OutfitCatalog};

    fn outfit(id: &str, category: &str, tags: &[&str]) -> Outfit {
        Outfit {
            id: id.to_string(),
            title: format!("Look {}", id),
            image: format!("img/{}.jpg", id),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn app() -> App<SlotStore> {
        let catalog = OutfitCatalog::new(vec![
            outfit("1", "casual", &["street-style"]),
            outfit("2", "formal", &["evening"]),
            outfit("3", "casual", &["old-money"]),
            outfit("4", "street", &["street-style"]),
            outfit("5", "formal", &["evening", "old-money"]),
        ])
        .unwrap();
        let store = FavoritesStore::load(SlotStore::in_memory().unwrap(), "mm_favorites");
        App::new(Gallery::new(Ok(catalog), store, &UiConfig::default()), 2)
    }

    #[test]
    fn test_grid_navigation() {
        let mut app = app();
        app.card_below();
        assert_eq!(app.selected_index, 2);
        app.next_card();
        assert_eq!(app.selected_index, 3);
        app.card_below();
        assert_eq!(app.selected_index, 4); // short last row
        app.card_below();
        assert_eq!(app.selected_index, 4);
        app.card_above();
        assert_eq!(app.selected_index, 2);
        app.previous_card();
        app.previous_card();
        app.previous_card();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_ensure_visible_scrolls_both_ways() {
        let mut app = app();
        app.selected_index = 4; // row 2
        app.ensure_visible(1);
        assert_eq!(app.scroll_row, 2);
        app.selected_index = 0;
        app.ensure_visible(1);
        assert_eq!(app.scroll_row, 0);
    }

    #[test]
    fn test_cycle_category_wraps() {
        let mut app = app();
        app.cycle_category(true);
        assert_eq!(app.gallery.active(), &Selector::Category("casual".into()));
        app.cycle_category(true);
        app.cycle_category(true);
        assert_eq!(app.gallery.active(), &Selector::Category("street".into()));
        app.cycle_category(true);
        assert_eq!(app.gallery.active(), &Selector::Category("casual".into()));
        app.cycle_category(false);
        assert_eq!(app.gallery.active(), &Selector::Category("street".into()));
    }

    #[test]
    fn test_cycle_tag_from_nothing_backwards() {
        let mut app = app();
        app.cycle_tag(false);
        assert_eq!(app.gallery.active(), &Selector::Tag("old-money".into()));
        assert_eq!(app.card_count(), 2);
    }

    #[test]
    fn test_view_change_resets_cursor_but_toggle_keeps_it() {
        let mut app = app();
        app.selected_index = 3;
        app.toggle_selected_favorite();
        assert_eq!(app.selected_index, 3);
        assert!(app.gallery.favorites().contains("4"));

        app.dispatch(UiEvent::ShowFavorites);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.card_count(), 1);
    }

    #[test]
    fn test_unfavorite_last_card_in_favorites_clamps_cursor() {
        let mut app = app();
        app.dispatch(UiEvent::ToggleFavorite("1".into()));
        app.dispatch(UiEvent::ToggleFavorite("2".into()));
        app.dispatch(UiEvent::ShowFavorites);
        app.selected_index = 1;
        app.toggle_selected_favorite();
        assert_eq!(app.card_count(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_cycle_tag_finds_active_tag_ignoring_unicode_case() {
        let catalog = OutfitCatalog::new(vec![
            outfit("1", "casual", &["Été"]),
            outfit("2", "formal", &["evening"]),
        ])
        .unwrap();
        let store = FavoritesStore::load(SlotStore::in_memory().unwrap(), "mm_favorites");
        let mut app = App::new(Gallery::new(Ok(catalog), store, &UiConfig::default()), 2);

        app.dispatch(UiEvent::SelectTag("ÉTÉ".into()));
        assert_eq!(app.gallery.page().active_tag(), Some("Été"));
        assert_eq!(app.card_count(), 1);

        // "ÉTÉ" is recognised as the first tag, so the next one is "evening"
        app.cycle_tag(true);
        assert_eq!(app.gallery.active(), &Selector::Tag("evening".into()));
    }

    #[test]
    fn test_search_box_text_lives_on_the_page() {
        let mut app = app();
        app.dispatch(UiEvent::SearchInput("gow".into()));
        app.push_search_char('n');
        assert_eq!(app.search_text(), "gown");
        assert_eq!(app.gallery.page().search_value, "gown");
        assert_eq!(app.gallery.active(), &Selector::Search("gown".into()));

        app.pop_search_char();
        assert_eq!(app.gallery.page().search_value, "gow");
    }

    #[test]
    fn test_typing_searches_on_every_char() {
        let mut app = app();
        app.enter_search_mode();
        for c in "evening".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.gallery.active(), &Selector::Search("evening".into()));
        assert_eq!(app.card_count(), 2);

        for _ in 0.."evening".len() {
            app.pop_search_char();
        }
        assert_eq!(app.gallery.active(), &Selector::All);
        assert_eq!(app.card_count(), 5);
    }
}
