//! `ink-replay`: replay a stroke script against the drawing engine and save
//! the composed canvas.

mod script;

use anyhow::Context as _;
use clap::Parser;
use ink_core::model::CompressFormat;
use ink_render::export::export_path;
use script::Script;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ink-replay", version)]
struct Cli {
    /// Stroke script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Directory the image is written to.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name without extension.
    #[arg(long, default_value = "out")]
    name: String,

    /// png, jpeg, or webp (written as png). Defaults to the script config.
    #[arg(long)]
    format: Option<String>,

    /// 0..=100. Defaults to the script config.
    #[arg(long)]
    quality: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let script = Script::from_path(&cli.script)?;
    let base_dir = cli.script.parent().unwrap_or_else(|| Path::new("."));
    let engine = script.replay(base_dir)?;

    let format = cli
        .format
        .as_deref()
        .map(CompressFormat::from_name)
        .unwrap_or(script.config.export.format);
    let quality = cli.quality.unwrap_or(script.config.export.quality);

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    if !engine.save_image(&cli.out_dir, &cli.name, format, quality) {
        anyhow::bail!(
            "failed to save '{}' (format {format:?}, quality {quality})",
            export_path(&cli.out_dir, &cli.name, format).display()
        );
    }
    log::info!("wrote {}", export_path(&cli.out_dir, &cli.name, format).display());
    Ok(())
}
