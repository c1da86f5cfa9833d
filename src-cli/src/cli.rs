//! Command-line arguments

use clap::Parser;
use shaping_engine::Direction;
use std::path::PathBuf;

/// Paragraph direction argument
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DirectionArg {
    Ltr,
    Rtl,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ltr => Direction::Ltr,
            DirectionArg::Rtl => Direction::Rtl,
        }
    }
}

/// glyph-layout - Shape text into positioned glyphs and print them as JSON
#[derive(Parser)]
#[command(name = "glyph-layout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Font file used as the base font (default: discovered system font)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Font file tried for clusters the base font cannot render; repeatable
    #[arg(long = "fallback", value_name = "PATH")]
    pub fallbacks: Vec<PathBuf>,

    /// Font size in output units
    #[arg(long, value_name = "PT")]
    pub size: Option<f32>,

    /// Force the paragraph direction of every line
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// JSON file with shape options; flags override its values
    #[arg(long, value_name = "JSON_FILE")]
    pub options: Option<PathBuf>,

    /// Load the platform's per-script fallback fonts
    #[arg(long)]
    pub system_fallbacks: bool,

    /// Text to shape; line feeds start new lines
    pub text: String,
}
