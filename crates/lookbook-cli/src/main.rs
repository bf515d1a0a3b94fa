use clap::{Args, Parser};
use lookbook_cache::SlotStore;
use lookbook_core::{
    load_catalog, CatalogSource, Config, Exporter, FavoritesStore, Gallery, Page, UiEvent,
};
use lookbook_tui::App;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lookbook")]
#[command(version, about = "Browse an outfit gallery by aesthetic, tag or search", long_about = None)]
struct Cli {
    /// Catalog file or http(s) URL, overrides [data] source
    #[arg(long, global = true, env = "LOOKBOOK_DATA")]
    data: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive gallery (default)
    Browse,
    /// Print a view of the gallery
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Toggle an outfit in favorites
    Favorite {
        /// Outfit id
        id: String,
    },
    /// Write a view to an .html, .json or .md file
    Export {
        /// Output file, format picked from the extension
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Open the file afterwards
        #[arg(long)]
        open: bool,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Which view to show; nothing means all outfits
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct ViewArgs {
    /// Outfits in one aesthetic
    #[arg(long)]
    category: Option<String>,

    /// Outfits carrying a tag
    #[arg(long)]
    tag: Option<String>,

    /// Saved outfits only
    #[arg(long)]
    favorites: bool,

    /// Match title, category or tags
    #[arg(long)]
    search: Option<String>,
}

impl ViewArgs {
    fn event(&self) -> UiEvent {
        if let Some(category) = &self.category {
            UiEvent::SelectCategory(category.clone())
        } else if let Some(tag) = &self.tag {
            UiEvent::SelectTag(tag.clone())
        } else if self.favorites {
            UiEvent::ShowFavorites
        } else if let Some(query) = &self.search {
            UiEvent::SearchInput(query.clone())
        } else {
            UiEvent::ShowAll
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so list/export output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lookbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Config { init }) => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::config_path()?,
            };
            if init {
                Config::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
            } else {
                println!("# {}", path.display());
                print!("{}", toml_string(&config)?);
            }
        }
        Some(Commands::List { view }) => {
            let mut gallery = open_gallery(&config, cli.data.as_deref()).await?;
            gallery.handle(view.event());
            print_page(&gallery);
        }
        Some(Commands::Favorite { id }) => {
            let mut gallery = open_gallery(&config, cli.data.as_deref()).await?;
            if !gallery.catalog().contains(&id) {
                tracing::warn!("No outfit with id {} in the catalog", id);
            }
            gallery.handle(UiEvent::ToggleFavorite(id.clone()));
            if gallery.favorites().contains(&id) {
                println!("❤️  Saved {}", id);
            } else {
                println!("🤍 Removed {}", id);
            }
        }
        Some(Commands::Export { file, view, open }) => {
            let mut gallery = open_gallery(&config, cli.data.as_deref()).await?;
            gallery.handle(view.event());
            let format = Exporter::export_to_file(gallery.page(), gallery.catalog(), &file)?;
            println!(
                "Exported {} outfits as {} to {}",
                gallery.page().cards().len(),
                format.extension(),
                file.display()
            );
            if open {
                open::that(&file)?;
            }
        }
        Some(Commands::Browse) | None => {
            let source = catalog_source(&config, cli.data.as_deref());
            let gallery = open_gallery(&config, cli.data.as_deref()).await?;
            let app = App::new(gallery, config.ui.grid_columns).with_catalog_source(source);
            lookbook_tui::run_tui(app)?;
        }
    }

    Ok(())
}

/// Load the catalog and favorites and build the gallery on top
///
/// A catalog that fails to load is not an error here, the gallery shows it.
async fn open_gallery(config: &Config, data: Option<&str>) -> anyhow::Result<Gallery<SlotStore>> {
    let source = catalog_source(config, data);
    let loaded = load_catalog(&source).await;

    let slot = open_slot(config)?;
    let favorites = FavoritesStore::load(slot, config.storage.favorites_key.clone());

    Ok(Gallery::new(loaded, favorites, &config.ui))
}

/// `--data` wins over the config file
fn catalog_source(config: &Config, data: Option<&str>) -> CatalogSource {
    CatalogSource::parse(data.unwrap_or(&config.data.source))
}

/// Favorites live in SQLite; a broken database means no persistence, not no gallery
fn open_slot(config: &Config) -> anyhow::Result<SlotStore> {
    match config.db_path() {
        Ok(path) => Ok(SlotStore::open_or_in_memory(&path)?),
        Err(e) => {
            tracing::warn!("{}, favorites will not be saved", e);
            Ok(SlotStore::in_memory()?)
        }
    }
}

fn print_page(gallery: &Gallery<SlotStore>) {
    let page = gallery.page();
    let text = format_page(page);
    if page.load_error().is_some() {
        eprint!("{}", text);
    } else {
        print!("{}", text);
    }
}

/// Plain-text listing of the page: the load error, or title, subtitle and one line per card
fn format_page(page: &Page) -> String {
    if let Some(error) = page.load_error() {
        return format!("{}\n", error);
    }

    let mut out = format!("{}\n", page.title);
    if !page.subtitle.is_empty() {
        out.push_str(&format!("{}\n", page.subtitle));
    }
    out.push('\n');

    if page.empty_state_visible() {
        out.push_str(&format!("{}\n", lookbook_core::render::EMPTY_MESSAGE));
        return out;
    }

    for card in page.cards() {
        out.push_str(&format!(
            "{} {:>4}  {}  [{}]  {}\n",
            card.heart(),
            card.id,
            card.title,
            card.category,
            card.tags_line
        ));
    }
    out
}

fn toml_string(config: &Config) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
