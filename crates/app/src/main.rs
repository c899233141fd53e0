use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{CatalogOverrides, SurveyCatalog};
use survey_core::model::CompletionMode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const BUILTIN_CATALOG: &str = include_str!("../catalogs/energy-bars.json");

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid mode: {raw} (expected unlock, continue or compare)")]
    InvalidMode { raw: String },
    #[error("invalid seed: {raw}")]
    InvalidSeed { raw: String },
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    catalog: Arc<SurveyCatalog>,
    shuffle_seed: Option<u64>,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<SurveyCatalog> {
        Arc::clone(&self.catalog)
    }

    fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }
}

#[derive(Debug, Default)]
struct Args {
    catalog: Option<PathBuf>,
    mode: Option<CompletionMode>,
    form_url: Option<String>,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--catalog <path>] [--mode <unlock|continue|compare>] [--form-url <url>] [--seed <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in energy bar catalog, mode from the catalog (unlock)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SURVEY_CATALOG, SURVEY_MODE, SURVEY_FORM_URL, SURVEY_SEED");
    eprintln!("  SURVEY_LOG  tracing filter, e.g. info or services=debug");
}

fn parse_mode(raw: String) -> Result<CompletionMode, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidMode { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        Self::from_lookup(non_empty_env)
    }

    /// Defaults from `SURVEY_*` variables, resolved through `lookup`.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ArgsError> {
        Ok(Self {
            catalog: lookup("SURVEY_CATALOG").map(PathBuf::from),
            mode: lookup("SURVEY_MODE").map(parse_mode).transpose()?,
            form_url: lookup("SURVEY_FORM_URL"),
            seed: lookup("SURVEY_SEED").map(parse_seed).transpose()?,
        })
    }

    /// Command-line flags layered over `self`.
    fn parse(self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = self;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    parsed.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--mode" => {
                    parsed.mode = Some(parse_mode(require_value(args, "--mode")?)?);
                }
                "--form-url" => {
                    parsed.form_url = Some(require_value(args, "--form-url")?);
                }
                "--seed" => {
                    parsed.seed = Some(parse_seed(require_value(args, "--seed")?)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn overrides(&self) -> CatalogOverrides {
        CatalogOverrides {
            mode: self.mode,
            form_url: self.form_url.clone(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SURVEY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn load_catalog(args: &Args) -> Result<SurveyCatalog, Box<dyn std::error::Error>> {
    let overrides = args.overrides();
    let catalog = match args.catalog.as_deref() {
        Some(path) => SurveyCatalog::from_path(path, &overrides)?,
        None => SurveyCatalog::from_json_str(BUILTIN_CATALOG, &overrides)?,
    };
    tracing::info!(
        title = catalog.title(),
        items = catalog.source().len(),
        mode = %catalog.settings().mode(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::from_env()
        .and_then(|env| env.parse(&mut argv))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    init_tracing();
    let catalog = load_catalog(&parsed)?;
    let title = catalog.title().to_owned();

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        catalog: Arc::new(catalog),
        shuffle_seed: parsed.seed,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
