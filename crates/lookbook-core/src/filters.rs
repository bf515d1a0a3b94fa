// The filter engine - every function here is a linear scan that keeps catalog order
use crate::favorites::FavoriteSet;
use crate::models::{Outfit, OutfitCatalog, ViewState};

pub const ALL_TITLE: &str = "All Outfits";
pub const FAVORITES_TITLE: &str = "Favorites";

/// Which slice of the catalog is on screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Category(String),
    Tag(String),
    Favorites,
    Search(String),
}

impl Selector {
    /// Compute the view this selector stands for
    pub fn apply<'a>(&self, catalog: &'a OutfitCatalog, favorites: &FavoriteSet) -> ViewState<'a> {
        match self {
            Selector::All => all(catalog),
            Selector::Category(c) => by_category(catalog, c),
            Selector::Tag(t) => by_tag(catalog, t),
            Selector::Favorites => self::favorites(catalog, favorites),
            Selector::Search(q) => search(catalog, q),
        }
    }

    /// Key of the filter button this selector lights up, if any
    ///
    /// Tags and searches leave the filter row alone.
    pub fn filter_key(&self) -> Option<&str> {
        match self {
            Selector::All => Some("all"),
            Selector::Category(c) => Some(c.as_str()),
            Selector::Favorites => Some("favorites"),
            Selector::Tag(_) | Selector::Search(_) => None,
        }
    }
}

pub fn all(catalog: &OutfitCatalog) -> ViewState<'_> {
    ViewState {
        title: ALL_TITLE.to_string(),
        subtitle: String::new(),
        items: catalog.outfits().iter().collect(),
    }
}

/// Exact, case-sensitive category match
pub fn by_category<'a>(catalog: &'a OutfitCatalog, category: &str) -> ViewState<'a> {
    let items = select(catalog, |o| o.category == category);
    ViewState {
        title: capitalize(category),
        subtitle: format!("{} items", items.len()),
        items,
    }
}

/// Case-insensitive tag membership
pub fn by_tag<'a>(catalog: &'a OutfitCatalog, tag: &str) -> ViewState<'a> {
    let items = select(catalog, |o| o.tags.iter().any(|t| same_tag(t, tag)));
    ViewState {
        title: prettify_tag(tag),
        subtitle: format!("{} items", items.len()),
        items,
    }
}

pub fn favorites<'a>(catalog: &'a OutfitCatalog, favorites: &FavoriteSet) -> ViewState<'a> {
    let items = select(catalog, |o| favorites.contains(&o.id));
    ViewState {
        title: FAVORITES_TITLE.to_string(),
        subtitle: format!("{} saved", items.len()),
        items,
    }
}

/// Substring search over title, category and the space-joined tags
///
/// A blank query is the same as [`all`].
pub fn search<'a>(catalog: &'a OutfitCatalog, query: &str) -> ViewState<'a> {
    let q = normalize_query(query);
    if q.is_empty() {
        return all(catalog);
    }

    let items = select(catalog, |o| {
        o.title.to_lowercase().contains(&q)
            || o.category.to_lowercase().contains(&q)
            || o.tags.join(" ").to_lowercase().contains(&q)
    });
    ViewState {
        title: format!("Search: \"{}\"", q),
        subtitle: format!("{} results", items.len()),
        items,
    }
}

/// Tags are the same when they match ignoring case (Unicode, not just ASCII)
pub fn same_tag(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Trim and lower-case a raw search box value
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn select<'a, F>(catalog: &'a OutfitCatalog, keep: F) -> Vec<&'a Outfit>
where
    F: Fn(&Outfit) -> bool,
{
    catalog.outfits().iter().filter(|o| keep(o)).collect()
}

/// "old-money" -> "Old Money"
///
/// Hyphens become spaces and every word character that follows a non-word
/// character (or starts the string) is upper-cased.
pub fn prettify_tag(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut prev_is_word = false;
    for ch in tag.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !prev_is_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}

/// Upper-case the first character, leave the rest alone
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
