//! folio-render: lay out an exported text snapshot and write a PNG

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use folio_canvas::CanvasRenderingContext2D;
use folio_text::{
    Color, FontDatabase, LayoutPolicy, Rect, SystemFonts, TextBackend, TextEngine, TextSnapshot,
};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const BOUNDS_COLOR: Color = Color::rgb(229, 57, 53);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let snapshot = TextSnapshot::from_json(&json)
        .with_context(|| format!("parsing snapshot {}", cli.input.display()))?;

    let fonts = Arc::new(SystemFonts::new(load_fonts(cli)?));
    let backend: Arc<dyn TextBackend> = fonts.clone();
    let policy = if cli.slot { LayoutPolicy::slot_text() } else { LayoutPolicy::main_text() };

    let mut engine = TextEngine::new(backend, policy);
    engine.import(snapshot);

    let config = engine.config();
    let width = config.canvas_width.ceil().max(0.0) as u32;
    let height = config.canvas_height.ceil().max(0.0) as u32;
    let mut canvas = CanvasRenderingContext2D::new(width, height)
        .context("creating canvas")?
        .with_fonts(fonts);

    canvas.fill(cli.background);
    engine.render(&mut canvas);
    if cli.show_bounds {
        for rect in engine.text_bounds() {
            outline(&mut canvas, rect);
        }
    }

    canvas
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    tracing::info!(
        output = %cli.output.display(),
        font_size = engine.font_size(),
        lines = engine.lines().len(),
        "Rendered snapshot"
    );
    Ok(())
}

fn load_fonts(cli: &Cli) -> Result<FontDatabase> {
    let mut db = if cli.no_system_fonts {
        FontDatabase::new()
    } else {
        FontDatabase::with_system_fonts()
    };
    for path in &cli.fonts {
        db.load_font_file(path)
            .with_context(|| format!("loading font {}", path.display()))?;
    }
    if db.is_empty() {
        tracing::warn!("No fonts loaded, text will not be drawn");
    }
    Ok(db)
}

fn outline(canvas: &mut CanvasRenderingContext2D, rect: Rect) {
    let corners = [
        (rect.x, rect.y),
        (rect.right(), rect.y),
        (rect.right(), rect.bottom()),
        (rect.x, rect.bottom()),
    ];
    for (i, from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        canvas.stroke_line(*from, to, 1.0, BOUNDS_COLOR);
    }
}
