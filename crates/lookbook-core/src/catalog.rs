// Loading outfits.json - the one async read the app ever does
use crate::error::LoadError;
use crate::models::{Outfit, OutfitCatalog};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the catalog document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` are URLs, anything else is a path
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(raw.to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }

    /// Short name used in messages
    pub fn name(&self) -> String {
        match self {
            CatalogSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            CatalogSource::Url(url) => url.clone(),
        }
    }
}

impl CatalogSource {
    /// Resolve an image reference from the catalog against where the catalog lives
    ///
    /// Absolute URLs and absolute paths come back unchanged. Relative ones are
    /// taken relative to the catalog file's directory, or joined onto the
    /// catalog URL.
    pub fn resolve(&self, reference: &str) -> String {
        if reference.contains("://") || Path::new(reference).is_absolute() {
            return reference.to_string();
        }

        match self {
            CatalogSource::File(path) => match path.parent() {
                Some(dir) => dir.join(reference).display().to_string(),
                None => reference.to_string(),
            },
            CatalogSource::Url(url) => reqwest::Url::parse(url)
                .and_then(|base| base.join(reference))
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Read and parse the catalog
pub async fn load_catalog(source: &CatalogSource) -> Result<OutfitCatalog, LoadError> {
    debug!("Loading catalog from {}", source);
    let body = fetch(source).await?;
    let catalog = parse_catalog(&source.name(), &body)?;
    info!("Loaded {} outfits from {}", catalog.len(), source);
    Ok(catalog)
}

async fn fetch(source: &CatalogSource) -> Result<String, LoadError> {
    let unreachable_err = |reason: String| LoadError::Unreachable {
        source_name: source.name(),
        reason,
    };

    match source {
        CatalogSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| unreachable_err(e.to_string())),
        CatalogSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .map_err(|e| unreachable_err(e.to_string()))?;

            if !response.status().is_success() {
                return Err(unreachable_err(format!("HTTP {}", response.status())));
            }

            response.text().await.map_err(|e| unreachable_err(e.to_string()))
        }
    }
}

/// Turn the raw document into a catalog
///
/// The document must be a JSON array of outfit records with unique ids.
pub fn parse_catalog(source_name: &str, body: &str) -> Result<OutfitCatalog, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        source_name: source_name.to_string(),
        reason,
    };

    let outfits: Vec<Outfit> = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    OutfitCatalog::new(outfits).map_err(|id| malformed(format!("duplicate outfit id \"{}\"", id)))
}
