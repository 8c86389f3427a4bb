use std::path::PathBuf;

use clap::Parser;
use folio_text::Color;

/// Renders an exported Folio text snapshot to a PNG image
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Snapshot JSON produced by the editor's export
    pub input: PathBuf,

    /// Where to write the PNG
    pub output: PathBuf,

    /// Extra font files to load (repeatable)
    #[clap(long = "font", value_name = "PATH")]
    pub fonts: Vec<PathBuf>,

    /// Skip the fonts installed on this machine
    #[clap(long)]
    pub no_system_fonts: bool,

    /// Background color as #rgb, #rrggbb or #rrggbbaa
    #[clap(long, default_value = "#ffffff", value_parser = parse_color)]
    pub background: Color,

    /// Lay out as content-slot text (full line boxes, left aligned)
    #[clap(long)]
    pub slot: bool,

    /// Outline the text bounds
    #[clap(long)]
    pub show_bounds: bool,
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value).ok_or_else(|| format!("invalid color: {value}"))
}
