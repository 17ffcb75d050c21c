use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Local};

use crate::{
    countdown::{self, Countdown},
    encode::{FrameSink, GifConfig, GifEncoder},
    error::TickgifResult,
    layout::SceneLayout,
    render::{self, CountdownRenderer},
    request::GenerationRequest,
};

/// Generate a countdown GIF into the system temp directory.
///
/// Convenience wrapper over [`generate_into`].
pub fn generate(request: &GenerationRequest, now: DateTime<Local>) -> TickgifResult<PathBuf> {
    generate_into(request, now, &std::env::temp_dir())
}

/// Generate a countdown GIF into `out_dir` using the default system font.
#[tracing::instrument(skip(request, now), fields(name = %request.name))]
pub fn generate_into(
    request: &GenerationRequest,
    now: DateTime<Local>,
    out_dir: &Path,
) -> TickgifResult<PathBuf> {
    let font = render::load_default_font()?;
    generate_with_font(request, now, out_dir, &font)
}

/// Generate a countdown GIF with explicit font bytes.
///
/// Everything for the request lives in this call: the countdown value, the
/// raster surface and the encoder are all per-request, so concurrent
/// generations are independent as long as their output paths differ. Returns
/// the output path only after the file is fully written and flushed.
pub fn generate_with_font(
    request: &GenerationRequest,
    now: DateTime<Local>,
    out_dir: &Path,
    font_bytes: &[u8],
) -> TickgifResult<PathBuf> {
    let resolved = request.resolve()?;
    tracing::debug!(
        width = resolved.width,
        height = resolved.height,
        frames = resolved.frames,
        target = %resolved.target,
        "generating countdown gif"
    );

    let mut countdown = countdown::compute_remaining(&resolved.target, now)?;
    let layout = SceneLayout::new(resolved.width, resolved.height);
    let mut renderer = CountdownRenderer::new(layout, resolved.color, resolved.bg, font_bytes)?;

    ensure_output_dir(out_dir)?;
    let file_path = out_dir.join(format!("{}.gif", resolved.name));
    let file = File::create(&file_path)
        .with_context(|| format!("failed to create output file '{}'", file_path.display()))?;
    let mut sink = GifEncoder::new(
        GifConfig::countdown(resolved.width, resolved.height),
        BufWriter::new(file),
    )?;

    let pushed = render_into_sink(&mut renderer, &mut countdown, resolved.frames, &mut sink)?;
    tracing::debug!(frames = pushed, path = %file_path.display(), "countdown gif written");
    Ok(file_path)
}

/// The frame loop: paint, push, advance, finalize.
///
/// Active countdowns emit exactly `frames` frames, advancing the remaining
/// span by one second between consecutive frames (the last frame is painted
/// and pushed without a trailing subtraction). An expired countdown emits
/// exactly one frame regardless of `frames`. Strictly sequential by
/// construction: the next frame is never painted before the previous one was
/// pushed, because the countdown value and the raster surface are mutated in
/// place between iterations. Returns the number of frames pushed.
pub fn render_into_sink<S: FrameSink>(
    renderer: &mut CountdownRenderer,
    countdown: &mut Countdown,
    frames: u32,
    sink: &mut S,
) -> TickgifResult<u32> {
    let pushed = match countdown {
        Countdown::Remaining(remaining) => {
            for i in 0..frames {
                let frame = renderer.paint_countdown(&remaining.fields())?;
                sink.push_frame(&frame)?;
                if i + 1 < frames {
                    remaining.subtract_second();
                }
            }
            frames
        }
        Countdown::Expired => {
            let frame = renderer.paint_expired()?;
            sink.push_frame(&frame)?;
            1
        }
    };

    sink.finish()?;
    Ok(pushed)
}

fn ensure_output_dir(dir: &Path) -> TickgifResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}
