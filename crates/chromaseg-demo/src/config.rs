//! Application configuration for the walkthrough binary.

use std::path::PathBuf;

use clap::Parser;

/// Image loaded when neither the command line nor the environment names one.
const DEFAULT_IMAGE: &str = "billes.png";
/// Directory frames are written to by default.
const DEFAULT_OUT_DIR: &str = "chromaseg-out";

/// Command-line flags. Anything left unset falls back to [`AppConfig::default`].
#[derive(Debug, Parser)]
#[command(
    name = "chromaseg",
    version,
    about = "Color-based image segmentation walkthrough"
)]
pub struct Args {
    /// Input image [env: CHROMASEG_IMAGE] [default: billes.png]
    pub image: Option<PathBuf>,

    /// Directory the rendered frames are written to [env: CHROMASEG_OUT]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// JSON recipe to run instead of the built-in lesson
    #[arg(short, long)]
    pub recipe: Option<PathBuf>,

    /// Write the JSON report to this file ("-" for stdout)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Also page through the frames in a native window
    #[arg(short, long)]
    pub window: bool,

    /// Print the recipe as JSON and exit without loading an image
    #[arg(long)]
    pub dump_recipe: bool,
}

/// Runtime configuration for a walkthrough run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub image: PathBuf,
    pub out_dir: PathBuf,
    pub recipe: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub window: bool,
    pub dump_recipe: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image: std::env::var_os("CHROMASEG_IMAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            out_dir: std::env::var_os("CHROMASEG_OUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            recipe: None,
            report: None,
            window: false,
            dump_recipe: false,
        }
    }
}

impl AppConfig {
    /// Layer command-line flags over the environment defaults.
    pub fn from_args(args: Args) -> Self {
        let defaults = Self::default();
        Self {
            image: args.image.unwrap_or(defaults.image),
            out_dir: args.out.unwrap_or(defaults.out_dir),
            recipe: args.recipe,
            report: args.report,
            window: args.window,
            dump_recipe: args.dump_recipe,
        }
    }

    /// Whether the report goes to stdout.
    pub fn report_to_stdout(&self) -> bool {
        self.report.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }
}
