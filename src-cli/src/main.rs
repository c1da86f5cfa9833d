//! glyph-layout: shapes text with the shaping engine and prints the result

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use shaping_engine::{FontLibrary, ShapeOptions, TextShaper};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut library = FontLibrary::new();
    let options = build_options(&cli, &mut library)?;

    tracing::info!(
        fonts = library.len(),
        size = options.size,
        "shaping {} bytes",
        cli.text.len()
    );

    let result = TextShaper::new()
        .shape_str(&mut library, &cli.text, &options)
        .context("failed to shape text")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Load the fonts named on the command line and merge flags over the
/// options file.
fn build_options(cli: &Cli, library: &mut FontLibrary) -> Result<ShapeOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ShapeOptions::from_json(&json)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ShapeOptions::default(),
    };

    if let Some(path) = &cli.font {
        let handle = library
            .load_font_file(path, 0)
            .with_context(|| format!("failed to load font {}", path.display()))?;
        library.set_default(handle)?;
        options = options.with_font(handle);
    }

    for path in &cli.fallbacks {
        let handle = library
            .load_font_file(path, 0)
            .with_context(|| format!("failed to load fallback font {}", path.display()))?;
        options = options.with_fallback_font(handle);
    }

    if cli.system_fallbacks {
        let chain = library.fallback_chain().clone();
        let loaded = library.load_script_fallbacks(&chain);
        tracing::info!(scripts = loaded.len(), "loaded script fallbacks");
        options.script_fallbacks.extend(loaded);
    }

    if let Some(size) = cli.size {
        options = options.with_size(size);
    }
    if let Some(direction) = cli.direction {
        options = options.with_direction(direction.into());
    }

    Ok(options)
}
