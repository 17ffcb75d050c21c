use std::io::Write;

use crate::{
    error::{TickgifError, TickgifResult},
    render::FrameRgba,
};

/// Encoder configuration, applied in full before the first frame is pushed.
#[derive(Clone, Debug)]
pub struct GifConfig {
    pub width: u32,
    pub height: u32,
    /// Per-frame display delay in milliseconds. GIF stores centiseconds, so
    /// this must be a multiple of 10.
    pub delay_ms: u32,
    /// Quantization speed on the encoder's 1..=30 scale; lower is better
    /// quality but slower.
    pub speed: i32,
}

impl GifConfig {
    /// The countdown preset: 1 s per frame, speed 10. Quality is
    /// deliberately traded for encode speed.
    pub fn countdown(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            delay_ms: 1_000,
            speed: 10,
        }
    }

    pub fn validate(&self) -> TickgifResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TickgifError::validation(
                "gif width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(TickgifError::validation(
                "gif width/height must fit in 16 bits",
            ));
        }
        if self.delay_ms < 10 || !self.delay_ms.is_multiple_of(10) {
            return Err(TickgifError::validation(
                "gif frame delay must be a positive multiple of 10 ms",
            ));
        }
        if self.delay_ms / 10 > u32::from(u16::MAX) {
            return Err(TickgifError::validation("gif frame delay exceeds u16 cs"));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(TickgifError::validation(
                "gif quantization speed must be in 1..=30",
            ));
        }
        Ok(())
    }
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strict temporal order, one
/// call per emitted frame, followed by exactly one `finish`. When `finish`
/// returns, the sink's output is fully flushed.
pub trait FrameSink {
    fn push_frame(&mut self, frame: &FrameRgba) -> TickgifResult<()>;
    fn finish(&mut self) -> TickgifResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct CollectSink {
    frames: Vec<FrameRgba>,
    finished: bool,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[FrameRgba] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for CollectSink {
    fn push_frame(&mut self, frame: &FrameRgba) -> TickgifResult<()> {
        if self.finished {
            return Err(TickgifError::encode("sink is already finalized"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> TickgifResult<()> {
        if self.finished {
            return Err(TickgifError::encode("sink is already finalized"));
        }
        self.finished = true;
        Ok(())
    }
}

/// Streaming GIF encoder over any byte writer.
///
/// Wraps the `gif` crate: per-frame palette quantization and LZW compression
/// happen inside `write_frame`, so each pushed frame is compressed and
/// written out before the next one is painted.
pub struct GifEncoder<W: Write> {
    cfg: GifConfig,
    scratch: Vec<u8>,
    inner: Option<gif::Encoder<W>>,
}

impl<W: Write> GifEncoder<W> {
    pub fn new(cfg: GifConfig, writer: W) -> TickgifResult<Self> {
        cfg.validate()?;

        let mut inner = gif::Encoder::new(writer, cfg.width as u16, cfg.height as u16, &[])
            .map_err(|e| TickgifError::encode(format!("failed to start gif stream: {e}")))?;
        inner
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| TickgifError::encode(format!("failed to set gif repeat: {e}")))?;

        Ok(Self {
            scratch: vec![0u8; cfg.width as usize * cfg.height as usize * 4],
            cfg,
            inner: Some(inner),
        })
    }
}

impl<W: Write> FrameSink for GifEncoder<W> {
    fn push_frame(&mut self, frame: &FrameRgba) -> TickgifResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(TickgifError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(TickgifError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let Some(inner) = self.inner.as_mut() else {
            return Err(TickgifError::encode("gif encoder is already finalized"));
        };

        // The quantizer consumes the buffer in place; keep the caller's
        // frame intact.
        self.scratch.copy_from_slice(&frame.data);
        let mut gif_frame = gif::Frame::from_rgba_speed(
            self.cfg.width as u16,
            self.cfg.height as u16,
            &mut self.scratch,
            self.cfg.speed,
        );
        gif_frame.delay = (self.cfg.delay_ms / 10) as u16;

        inner
            .write_frame(&gif_frame)
            .map_err(|e| TickgifError::encode(format!("failed to write gif frame: {e}")))
    }

    fn finish(&mut self) -> TickgifResult<()> {
        let Some(inner) = self.inner.take() else {
            return Err(TickgifError::encode("gif encoder is already finalized"));
        };

        let mut writer = inner
            .into_inner()
            .map_err(|e| TickgifError::encode(format!("failed to finalize gif stream: {e}")))?;
        writer
            .flush()
            .map_err(|e| TickgifError::encode(format!("failed to flush gif output: {e}")))
    }
}
