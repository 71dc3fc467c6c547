use std::path::PathBuf;

use canvas::catalog::Category;
use canvas::doc::LayoutMode;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "h5studio", about = "Build H5 marketing pages from the terminal")]
pub struct Cli {
    /// Directory holding page documents.
    #[arg(long, global = true, env = "H5_STUDIO_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty page.
    New {
        page: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum, default_value_t = Layout::FreePosition)]
        layout: Layout,
        #[arg(long)]
        force: bool,
    },
    /// List stored pages.
    List,
    /// Print a page outline, or its stored JSON with `--json`.
    Show {
        page: String,
        #[arg(long)]
        json: bool,
    },
    /// List placeable component types.
    Catalog {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Place a new component; prints its id.
    Add {
        page: String,
        #[arg(value_name = "TYPE")]
        type_name: String,
        #[arg(long)]
        at: Option<usize>,
    },
    Remove {
        page: String,
        id: String,
    },
    /// Copy a component; prints the copy's id.
    Duplicate {
        page: String,
        id: String,
    },
    /// Move a component's top-left corner (clamped to the canvas).
    Move {
        page: String,
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        top: f64,
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
    },
    Resize {
        page: String,
        id: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    /// Move the component at FROM to position TO in the sequence.
    Reorder {
        page: String,
        from: usize,
        to: usize,
    },
    /// Merge a JSON object into a component's props; `null` resets a key.
    Patch {
        page: String,
        id: String,
        #[arg(value_name = "JSON")]
        data: String,
    },
    /// Show the property fields a component offers.
    Fields {
        page: String,
        id: String,
    },
    /// Select the topmost component at a canvas point.
    Pick {
        page: String,
        #[arg(long, allow_negative_numbers = true)]
        top: f64,
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
    },
    Layout {
        page: String,
        #[arg(value_enum)]
        mode: Layout,
    },
    /// Change page settings.
    Canvas(CanvasArgs),
    /// Write a page's JSON to stdout or a file.
    Export {
        page: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate a JSON document and store it as a page.
    Import {
        file: PathBuf,
        #[arg(long = "as")]
        name: String,
        #[arg(long)]
        force: bool,
    },
    Preview(PreviewCommand),
    /// Draw from a lucky-wheel component.
    Spin(SpinArgs),
}

#[derive(Args, Debug)]
pub struct CanvasArgs {
    pub page: String,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub bg_color: Option<String>,
    /// Background image URL; switches the background to image mode.
    #[arg(long)]
    pub bg_image: Option<String>,
}

#[derive(Args, Debug)]
pub struct PreviewCommand {
    #[command(subcommand)]
    pub command: PreviewSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PreviewSubcommand {
    /// Hand a page to the previewer.
    Publish { page: String },
    /// Render whatever was last published.
    Show {
        /// Stack by z-index instead of sequence order.
        #[arg(long)]
        z_order: bool,
    },
}

#[derive(Args, Debug)]
pub struct SpinArgs {
    pub page: String,
    pub id: String,
    /// Seed for a reproducible draw.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of draws. More than one implies `--instant`.
    #[arg(long, default_value_t = 1)]
    pub count: usize,
    /// Skip the animation and report outcomes only.
    #[arg(long)]
    pub instant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    AutoFlow,
    FreePosition,
}

impl From<Layout> for LayoutMode {
    fn from(value: Layout) -> Self {
        match value {
            Layout::AutoFlow => Self::AutoFlow,
            Layout::FreePosition => Self::FreePosition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Basic,
    Marketing,
    Advanced,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Basic => Self::Basic,
            CategoryArg::Marketing => Self::Marketing,
            CategoryArg::Advanced => Self::Advanced,
        }
    }
}
