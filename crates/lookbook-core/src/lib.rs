// Core gallery logic - catalog, filters, favorites, rendering and the controller
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod favorites;
pub mod filters;
pub mod markup;
pub mod models;
pub mod render;

pub use catalog::{load_catalog, CatalogSource};
pub use config::{Config, RefreshPolicy};
pub use controller::{Gallery, UiEvent};
pub use error::{Error, LoadError};
pub use export::{ExportFormat, Exporter};
pub use favorites::{FavoriteSet, FavoritesSlot, FavoritesStore};
pub use filters::Selector;
pub use models::{Outfit, OutfitCatalog, ViewState};
pub use render::{Card, Page};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
