use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Render a looping countdown GIF for a target date.
#[derive(Parser, Debug)]
#[command(name = "tickgif", version)]
struct Cli {
    /// Target date/time, e.g. `2030-01-01` or `2030-01-01 18:00:00`.
    #[arg(long)]
    date: String,

    /// Canvas width in pixels (clamped to 150..=900).
    #[arg(long, default_value_t = 900)]
    width: u32,

    /// Canvas height in pixels (clamped to 150..=500).
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Text color as a hex triple.
    #[arg(long, default_value = "ffffff")]
    color: String,

    /// Background color as a hex triple.
    #[arg(long, default_value = "000000")]
    bg: String,

    /// Output name; the file is written as `<name>.gif`.
    #[arg(long, default_value = "default")]
    name: String,

    /// Frame count (clamped to 1..=90); one frame per second.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Output directory; defaults to the system temp directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Font file for the banner text; defaults to a system bold sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let request = tickgif::GenerationRequest {
        target: cli.date,
        width: cli.width,
        height: cli.height,
        color: cli.color,
        bg: cli.bg,
        name: cli.name,
        frames: cli.frames,
    };

    let now = chrono::Local::now();
    let out_dir = cli.out_dir.unwrap_or_else(std::env::temp_dir);

    let path = match cli.font {
        Some(font_path) => {
            let font = std::fs::read(&font_path)
                .with_context(|| format!("read font '{}'", font_path.display()))?;
            tickgif::generate_with_font(&request, now, &out_dir, &font)?
        }
        None => tickgif::generate_into(&request, now, &out_dir)?,
    };

    println!("{}", path.display());
    Ok(())
}
