// The renderer - owns the page document and is the only thing that mutates it
use crate::favorites::FavoriteSet;
use crate::filters::{capitalize, prettify_tag, same_tag};
use crate::markup::Element;
use crate::models::{Outfit, ViewState};

pub const HEART_ON: &str = "❤️";
pub const HEART_OFF: &str = "🤍";
pub const TAG_SEPARATOR: &str = " • ";
pub const EMPTY_MESSAGE: &str = "No outfits here yet.";

/// One rendered outfit card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub category: String,
    pub image: String,
    pub title: String,
    /// Prettified tags joined with the separator
    pub tags_line: String,
    pub favorited: bool,
}

impl Card {
    pub fn new(outfit: &Outfit, favorited: bool) -> Self {
        Self {
            id: outfit.id.clone(),
            category: outfit.category.clone(),
            image: outfit.image.clone(),
            title: outfit.title.clone(),
            tags_line: outfit
                .tags
                .iter()
                .map(|t| prettify_tag(t))
                .collect::<Vec<_>>()
                .join(TAG_SEPARATOR),
            favorited,
        }
    }

    pub fn heart(&self) -> &'static str {
        if self.favorited {
            HEART_ON
        } else {
            HEART_OFF
        }
    }

    pub fn to_element(&self) -> Element {
        Element::new("article")
            .class("card")
            .attr("data-id", &self.id)
            .attr("data-category", &self.category)
            .child(
                Element::new("img")
                    .attr("loading", "lazy")
                    .attr("src", &self.image)
                    .attr("alt", &self.title),
            )
            .child(Element::new("div").class("band"))
            .child(
                Element::new("button")
                    .class("heart-btn")
                    .class_if("favorited", self.favorited)
                    .attr("aria-label", "save outfit")
                    .attr("data-id", &self.id)
                    .text(self.heart()),
            )
            .child(
                Element::new("div")
                    .class("meta")
                    .child(Element::new("h4").text(&self.title))
                    .child(Element::new("p").text(&self.tags_line)),
            )
    }
}

/// A filter or tag control and whether it is lit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub active: bool,
}

impl Control {
    fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            active: false,
        }
    }
}

/// What the gallery container holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryContent {
    Cards(Vec<Card>),
    /// The catalog never loaded; plain text, no cards
    LoadError(String),
}

/// The whole page: header, controls, search box, gallery and placeholder
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub search_value: String,
    filters: Vec<Control>,
    tags: Vec<Control>,
    gallery: GalleryContent,
    empty_state_hidden: bool,
}

impl Page {
    /// Build the page shell. The filter row is always "all", one button per
    /// category, then "favorites".
    pub fn new(categories: &[String], tags: &[String]) -> Self {
        let mut filters = vec![Control::new("all", "All")];
        filters.extend(
            categories
                .iter()
                .map(|c| Control::new(c.clone(), capitalize(c))),
        );
        filters.push(Control::new("favorites", "Favorites"));

        Self {
            title: String::new(),
            subtitle: String::new(),
            search_value: String::new(),
            filters,
            tags: tags
                .iter()
                .map(|t| Control::new(t.clone(), prettify_tag(t)))
                .collect(),
            gallery: GalleryContent::Cards(Vec::new()),
            empty_state_hidden: true,
        }
    }

    /// Replace every card with the given view
    pub fn render(&mut self, view: &ViewState<'_>, favorites: &FavoriteSet) {
        self.title = view.title.clone();
        self.subtitle = view.subtitle.clone();

        let cards: Vec<Card> = view
            .items
            .iter()
            .map(|o| Card::new(o, favorites.contains(&o.id)))
            .collect();

        self.empty_state_hidden = !cards.is_empty();
        self.gallery = GalleryContent::Cards(cards);
    }

    /// Put a plain error message where the cards would be
    pub fn show_load_error(&mut self, message: impl Into<String>) {
        self.gallery = GalleryContent::LoadError(message.into());
        self.empty_state_hidden = true;
    }

    /// Light exactly the filter button with this key
    pub fn set_active_filter(&mut self, key: &str) {
        for control in &mut self.filters {
            control.active = control.key == key;
        }
    }

    /// Light exactly one tag button. Tags compare case-insensitively.
    pub fn set_active_tag(&mut self, tag: &str) {
        for control in &mut self.tags {
            control.active = same_tag(&control.key, tag);
        }
    }

    /// Patch one card's heart in place. Returns false if no card has that id.
    pub fn set_card_favorited(&mut self, id: &str, favorited: bool) -> bool {
        if let GalleryContent::Cards(cards) = &mut self.gallery {
            if let Some(card) = cards.iter_mut().find(|c| c.id == id) {
                card.favorited = favorited;
                return true;
            }
        }
        false
    }

    pub fn cards(&self) -> &[Card] {
        match &self.gallery {
            GalleryContent::Cards(cards) => cards.as_slice(),
            GalleryContent::LoadError(_) => &[],
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.gallery {
            GalleryContent::LoadError(msg) => Some(msg.as_str()),
            GalleryContent::Cards(_) => None,
        }
    }

    pub fn empty_state_visible(&self) -> bool {
        !self.empty_state_hidden
    }

    pub fn filters(&self) -> &[Control] {
        &self.filters
    }

    pub fn tags(&self) -> &[Control] {
        &self.tags
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.filters
            .iter()
            .find(|c| c.active)
            .map(|c| c.key.as_str())
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.tags.iter().find(|c| c.active).map(|c| c.key.as_str())
    }

    /// The gallery section on its own
    pub fn gallery_element(&self) -> Element {
        let gallery = Element::new("section").attr("id", "gallery").class("gallery");
        match &self.gallery {
            GalleryContent::Cards(cards) => gallery.children(cards.iter().map(Card::to_element)),
            GalleryContent::LoadError(msg) => {
                gallery.child(Element::new("p").class("load-error").text(msg))
            }
        }
    }

    /// Body of the page, without the document wrapper
    pub fn body_element(&self) -> Element {
        let filter_row = Element::new("nav").class("filters").children(
            self.filters.iter().map(|c| {
                Element::new("button")
                    .class("filter-btn")
                    .class_if("active", c.active)
                    .attr("data-filter", &c.key)
                    .text(&c.label)
            }),
        );

        let tag_row = Element::new("nav").class("tags").children(self.tags.iter().map(|c| {
            Element::new("button")
                .class("tag-btn")
                .class_if("active", c.active)
                .attr("data-tag", &c.key)
                .text(&c.label)
        }));

        let header = Element::new("header")
            .child(Element::new("h2").attr("id", "view-title").text(&self.title))
            .child(Element::new("p").attr("id", "view-sub").text(&self.subtitle));

        let search = Element::new("input")
            .attr("id", "searchInput")
            .attr("type", "search")
            .attr("placeholder", "Search outfits")
            .attr("value", &self.search_value);

        let empty = Element::new("div")
            .attr("id", "emptyState")
            .class("empty")
            .class_if("hidden", self.empty_state_hidden)
            .text(EMPTY_MESSAGE);

        Element::new("main")
            .child(filter_row)
            .child(tag_row)
            .child(search)
            .child(header)
            .child(self.gallery_element())
            .child(empty)
    }

    /// Full standalone HTML document
    pub fn to_html(&self) -> String {
        let title = if self.title.is_empty() {
            "Lookbook".to_string()
        } else {
            format!("{} · Lookbook", self.title)
        };
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(Element::new("title").text(title))
            .child(Element::new("style").text(STYLE));

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">{}<body>{}</body></html>\n",
            head,
            self.body_element()
        )
    }
}

// Written as an escaped text child, so it must stay free of & < > " and '.
const STYLE: &str = "body{font-family:sans-serif;margin:0;padding:16px}\
.gallery{columns:3 240px;column-gap:16px}\
.card{break-inside:avoid;margin-bottom:16px;position:relative}\
.card img{width:100%;display:block}\
.heart-btn{position:absolute;top:8px;right:8px;border:0;background:none}\
.filter-btn.active,.tag-btn.active{font-weight:bold}\
.hidden{display:none}";
