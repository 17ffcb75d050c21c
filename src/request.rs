use std::fmt;

use crate::error::{TickgifError, TickgifResult};

pub const MIN_WIDTH: u32 = 150;
pub const MAX_WIDTH: u32 = 900;
pub const MIN_HEIGHT: u32 = 150;
pub const MAX_HEIGHT: u32 = 500;
pub const MIN_FRAMES: u32 = 1;
pub const MAX_FRAMES: u32 = 90;

/// One countdown generation request as it arrives from upstream (JSON body or
/// query parameters). Out-of-range numeric fields are not rejected; they are
/// coerced into range by [`GenerationRequest::resolve`].
#[derive(Clone, Debug, serde::Deserialize)]
pub struct GenerationRequest {
    /// Target timestamp, e.g. `2026-12-31` or `2026-12-31 18:00:00`.
    pub target: String,
    #[serde(default = "defaults::width")]
    pub width: u32,
    #[serde(default = "defaults::height")]
    pub height: u32,
    /// Foreground (text) color as a hex triple, `#` optional.
    #[serde(default = "defaults::color")]
    pub color: String,
    /// Background color as a hex triple, `#` optional.
    #[serde(default = "defaults::bg")]
    pub bg: String,
    /// Output identifier; the file is written as `<name>.gif`.
    #[serde(default = "defaults::name")]
    pub name: String,
    #[serde(default = "defaults::frames")]
    pub frames: u32,
}

mod defaults {
    pub fn width() -> u32 {
        900
    }
    pub fn height() -> u32 {
        300
    }
    pub fn color() -> String {
        "ffffff".to_string()
    }
    pub fn bg() -> String {
        "000000".to_string()
    }
    pub fn name() -> String {
        "default".to_string()
    }
    pub fn frames() -> u32 {
        30
    }
}

impl GenerationRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            width: defaults::width(),
            height: defaults::height(),
            color: defaults::color(),
            bg: defaults::bg(),
            name: defaults::name(),
            frames: defaults::frames(),
        }
    }

    /// Clamp numeric fields into their allowed ranges and parse the colors.
    ///
    /// Clamping is the only local recovery this crate performs; a malformed
    /// hex color is the one input that is rejected outright.
    pub fn resolve(&self) -> TickgifResult<ResolvedRequest> {
        Ok(ResolvedRequest {
            target: self.target.clone(),
            width: self.width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: self.height.clamp(MIN_HEIGHT, MAX_HEIGHT),
            color: Rgb::parse(&self.color)?,
            bg: Rgb::parse(&self.bg)?,
            name: self.name.clone(),
            frames: self.frames.clamp(MIN_FRAMES, MAX_FRAMES),
        })
    }
}

/// A request with bounds applied and colors parsed; the form the renderer and
/// encoder consume.
#[derive(Clone, Debug)]
pub struct ResolvedRequest {
    pub target: String,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    pub bg: Rgb,
    pub name: String,
    pub frames: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a six-digit hex triple, with or without a leading `#`.
    pub fn parse(s: &str) -> TickgifResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TickgifError::validation(format!(
                "color '{s}' is not a six-digit hex triple"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| TickgifError::validation(format!("color '{s}': {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_out_of_range_fields() {
        let mut req = GenerationRequest::new("2030-01-01");
        req.width = 10_000;
        req.height = 1;
        req.frames = 500;
        let resolved = req.resolve().unwrap();
        assert_eq!(resolved.width, MAX_WIDTH);
        assert_eq!(resolved.height, MIN_HEIGHT);
        assert_eq!(resolved.frames, MAX_FRAMES);

        req.width = 0;
        req.height = 99_999;
        req.frames = 0;
        let resolved = req.resolve().unwrap();
        assert_eq!(resolved.width, MIN_WIDTH);
        assert_eq!(resolved.height, MAX_HEIGHT);
        assert_eq!(resolved.frames, MIN_FRAMES);
    }

    #[test]
    fn resolve_keeps_in_range_fields() {
        let mut req = GenerationRequest::new("2030-01-01");
        req.width = 640;
        req.height = 240;
        req.frames = 45;
        let resolved = req.resolve().unwrap();
        assert_eq!(
            (resolved.width, resolved.height, resolved.frames),
            (640, 240, 45)
        );
    }

    #[test]
    fn json_defaults_match_the_endpoint_defaults() {
        let req: GenerationRequest =
            serde_json::from_str(r#"{ "target": "2030-01-01" }"#).unwrap();
        assert_eq!(req.width, 900);
        assert_eq!(req.height, 300);
        assert_eq!(req.color, "ffffff");
        assert_eq!(req.bg, "000000");
        assert_eq!(req.name, "default");
        assert_eq!(req.frames, 30);
    }

    #[test]
    fn hex_parse_accepts_optional_hash() {
        assert_eq!(Rgb::parse("ff007b").unwrap(), Rgb::new(0xff, 0x00, 0x7b));
        assert_eq!(Rgb::parse("#ff007b").unwrap(), Rgb::new(0xff, 0x00, 0x7b));
        assert_eq!(Rgb::new(255, 0, 123).to_string(), "#ff007b");
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        assert!(Rgb::parse("fff").is_err());
        assert!(Rgb::parse("gggggg").is_err());
        assert!(Rgb::parse("#1234567").is_err());
        assert!(Rgb::parse("").is_err());
    }
}
