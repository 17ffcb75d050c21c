use kurbo::Point;

use crate::{
    countdown::Fields,
    error::{TickgifError, TickgifResult},
    geometry::{CornerRadii, rounded_rect},
    layout::SceneLayout,
    request::Rgb,
};

/// One fully painted frame: opaque straight-alpha RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Fixed accent used for the call-to-action button and edge decorations.
pub const ACCENT: Rgb = Rgb::new(0xff, 0x00, 0x7b);

pub const UNIT_LABELS: [&str; 4] = ["d", "h", "m", "s"];
pub const TITLE_TEXT: &str = "Offer ends in";
pub const BUTTON_TEXT: &str = "Shop now";
pub const EXPIRED_TEXT: &str = "This offer has ended";

/// RGBA8 brush color carried through Parley text styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Paints countdown banner frames for a single generation request.
///
/// Owns the raster surface for the whole request; the pixmap is repainted,
/// never reallocated, across frames. One renderer per request — the surface
/// and the text contexts are mutated in place between frames, so a renderer
/// must not be shared across concurrent generations.
pub struct CountdownRenderer {
    layout: SceneLayout,
    fg: Rgb,
    bg: Rgb,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    font_family: String,
    glyph_font: vello_cpu::peniko::FontData,
}

impl CountdownRenderer {
    /// Build a renderer for one request. `font_bytes` must be a parseable
    /// font file; the first family it declares is used for all banner text.
    pub fn new(layout: SceneLayout, fg: Rgb, bg: Rgb, font_bytes: &[u8]) -> TickgifResult<Self> {
        let width: u16 = layout
            .width()
            .try_into()
            .map_err(|_| TickgifError::render("canvas width exceeds u16"))?;
        let height: u16 = layout
            .height()
            .try_into()
            .map_err(|_| TickgifError::render("canvas height exceeds u16"))?;

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TickgifError::render("no font families registered from font bytes"))?;
        let font_family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TickgifError::render("registered font family has no name"))?
            .to_string();

        let glyph_font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes.to_vec()), 0);

        Ok(Self {
            layout,
            fg,
            bg,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font_family,
            glyph_font,
        })
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Paint the active-countdown scene for one second of remaining time.
    pub fn paint_countdown(&mut self, fields: &Fields) -> TickgifResult<FrameRgba> {
        let layout = self.layout;
        let mut ctx = self.begin_frame();

        let digits = [
            fields.days.as_str(),
            fields.hours.as_str(),
            fields.minutes.as_str(),
            fields.seconds.as_str(),
        ];
        for (text, anchor) in digits.into_iter().zip(layout.digit_anchors()) {
            self.draw_text_centered(&mut ctx, text, anchor, layout.digit_font_size(), self.fg)?;
        }
        for (label, anchor) in UNIT_LABELS.into_iter().zip(layout.label_anchors()) {
            self.draw_text_centered(&mut ctx, label, anchor, layout.label_font_size(), self.fg)?;
        }
        self.draw_text_centered(
            &mut ctx,
            TITLE_TEXT,
            layout.title_anchor(),
            layout.title_font_size(),
            self.fg,
        )?;
        self.draw_button(&mut ctx)?;
        self.draw_edge_decorations(&mut ctx);

        Ok(self.finish_frame(ctx))
    }

    /// Paint the single expired-countdown frame.
    pub fn paint_expired(&mut self) -> TickgifResult<FrameRgba> {
        let layout = self.layout;
        let mut ctx = self.begin_frame();
        self.draw_text_centered(
            &mut ctx,
            EXPIRED_TEXT,
            layout.expired_anchor(),
            layout.expired_font_size(),
            self.fg,
        )?;
        self.draw_edge_decorations(&mut ctx);
        Ok(self.finish_frame(ctx))
    }

    fn begin_frame(&self) -> vello_cpu::RenderContext {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(self.bg));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        ctx
    }

    fn finish_frame(&mut self, mut ctx: vello_cpu::RenderContext) -> FrameRgba {
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        // The background fill makes every pixel opaque, so the premultiplied
        // pixmap bytes are valid straight-alpha RGBA as-is.
        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Lay out `text` and paint it centered on `anchor`, both axes.
    fn draw_text_centered(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        size_px: f32,
        color: Rgb,
    ) -> TickgifResult<()> {
        let brush = TextBrush {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.font_family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        let origin_x = anchor.x - f64::from(layout.width()) / 2.0;
        let origin_y = anchor.y - f64::from(layout.height()) / 2.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.glyph_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        Ok(())
    }

    fn draw_button(&mut self, ctx: &mut vello_cpu::RenderContext) -> TickgifResult<()> {
        let rect = self.layout.button_rect();
        let radii = CornerRadii::uniform(self.layout.button_corner_radius());
        let path = bezpath_to_cpu(&rounded_rect(rect, radii));

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(ACCENT));
        ctx.fill_path(&path);

        // Hairline outline, matching the 2D-canvas default stroke.
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.stroke_path(&path);

        self.draw_text_centered(
            ctx,
            BUTTON_TEXT,
            self.layout.button_label_anchor(),
            self.layout.button_font_size(),
            self.fg,
        )
    }

    fn draw_edge_decorations(&mut self, ctx: &mut vello_cpu::RenderContext) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(ACCENT));
        for path in self.layout.edge_decorations() {
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
    }
}

/// Well-known bold sans-serif locations probed when the caller does not
/// supply an explicit font file.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-fonts/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Read the first available default banner font.
pub fn load_default_font() -> TickgifResult<Vec<u8>> {
    for path in FONT_SEARCH_PATHS {
        if let Ok(bytes) = std::fs::read(path) {
            return Ok(bytes);
        }
    }
    Err(TickgifError::render(
        "no usable banner font found on this system; supply a font file explicitly",
    ))
}

fn color_to_cpu(c: Rgb) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::Remaining;

    #[test]
    fn frame_buffer_has_canvas_dimensions() {
        // Needs a real font on the host; skip quietly when none is present.
        let Ok(font) = load_default_font() else {
            return;
        };

        let layout = SceneLayout::new(300, 150);
        let mut renderer = CountdownRenderer::new(
            layout,
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            &font,
        )
        .unwrap();

        let fields = Remaining::from_millis(65_000).unwrap().fields();
        let frame = renderer.paint_countdown(&fields).unwrap();
        assert_eq!((frame.width, frame.height), (300, 150));
        assert_eq!(frame.data.len(), 300 * 150 * 4);
        // Every pixel is opaque: the background fill covers the canvas.
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn expired_frame_differs_from_countdown_frame() {
        let Ok(font) = load_default_font() else {
            return;
        };

        let layout = SceneLayout::new(300, 150);
        let mut renderer = CountdownRenderer::new(
            layout,
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            &font,
        )
        .unwrap();

        let fields = Remaining::from_millis(65_000).unwrap().fields();
        let active = renderer.paint_countdown(&fields).unwrap();
        let expired = renderer.paint_expired().unwrap();
        assert_ne!(active.data, expired.data);
    }

    #[test]
    fn rejects_font_bytes_with_no_family() {
        let layout = SceneLayout::new(300, 150);
        let result = CountdownRenderer::new(
            layout,
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            b"not a font",
        );
        assert!(result.is_err());
    }
}
