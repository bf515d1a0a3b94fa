use crate::models::{Outfit, OutfitCatalog};
use crate::render::Page;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Some(ExportFormat::Html),
            "json" => Some(ExportFormat::Json),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Writes the currently rendered view somewhere outside the app
pub struct Exporter;

impl Exporter {
    /// Export with the format picked from the file extension
    pub fn export_to_file<P: AsRef<Path>>(page: &Page, catalog: &OutfitCatalog, path: P) -> Result<ExportFormat> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .html, .json, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(page, catalog, path, format)?;
        Ok(format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        page: &Page,
        catalog: &OutfitCatalog,
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = match format {
            ExportFormat::Html => page.to_html(),
            ExportFormat::Json => Self::to_json(page, catalog)?,
            ExportFormat::Markdown => Self::to_markdown(page),
        };

        let mut file = File::create(path)
            .map_err(|e| Error::ExportError(format!("Failed to create file: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    /// The shown outfits in catalog shape, so the file can be loaded back
    pub fn to_json(page: &Page, catalog: &OutfitCatalog) -> Result<String> {
        let outfits: Vec<&Outfit> = page
            .cards()
            .iter()
            .filter_map(|card| catalog.get(&card.id))
            .collect();
        Ok(serde_json::to_string_pretty(&outfits)?)
    }

    pub fn to_markdown(page: &Page) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", page.title));
        if !page.subtitle.is_empty() {
            output.push_str(&format!("_{}_\n\n", page.subtitle));
        }

        if let Some(error) = page.load_error() {
            output.push_str(&format!("> {}\n", error));
            return output;
        }

        if page.cards().is_empty() {
            output.push_str(&format!("{}\n", crate::render::EMPTY_MESSAGE));
            return output;
        }

        for card in page.cards() {
            output.push_str(&format!("## {} {}\n\n", card.heart(), card.title));
            output.push_str(&format!("![{}]({})\n\n", card.title, card.image));
            output.push_str(&format!("**Category:** {}", card.category));
            if !card.tags_line.is_empty() {
                output.push_str(&format!(" | **Tags:** {}", card.tags_line));
            }
            output.push_str("\n\n---\n\n");
        }

        output
    }
}
