//! Countdown banner GIF generation.
//!
//! Given a target timestamp and styling parameters, `tickgif` renders one
//! frame per remaining second onto a CPU raster surface and streams the
//! frames into a single looping GIF:
//!
//! - [`compute_remaining`] turns a target timestamp into a [`Countdown`]
//! - [`CountdownRenderer`] paints each frame on the 900×300 design grid,
//!   scaled to the requested canvas
//! - [`GifEncoder`] compresses frames as they arrive and [`generate`]
//!   returns the finished file's path
#![forbid(unsafe_code)]

pub mod countdown;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod request;

pub use countdown::{Countdown, Fields, Remaining, compute_remaining, parse_target};
pub use encode::{CollectSink, FrameSink, GifConfig, GifEncoder};
pub use error::{TickgifError, TickgifResult};
pub use geometry::{CornerRadii, rounded_rect};
pub use layout::{DESIGN_HEIGHT, DESIGN_WIDTH, SceneLayout};
pub use pipeline::{generate, generate_into, generate_with_font, render_into_sink};
pub use render::{CountdownRenderer, FrameRgba, load_default_font};
pub use request::{GenerationRequest, ResolvedRequest, Rgb};
