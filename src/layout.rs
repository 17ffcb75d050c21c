use kurbo::{BezPath, Point, Rect};

/// Canonical design grid all element positions are authored against. Actual
/// canvases are scaled from this space, so the banner layout is
/// resolution-independent.
pub const DESIGN_WIDTH: f64 = 900.0;
pub const DESIGN_HEIGHT: f64 = 300.0;

// Anchors in design-grid units. Text is centered on its anchor both axes.
const DIGIT_ANCHORS: [(f64, f64); 4] = [(176.0, 130.0), (328.0, 130.0), (518.0, 130.0), (671.0, 130.0)];
const LABEL_ANCHORS: [(f64, f64); 4] = [(230.0, 135.0), (397.0, 135.0), (578.0, 135.0), (731.0, 135.0)];
const TITLE_ANCHOR: (f64, f64) = (450.0, 60.0);
const BUTTON_ORIGIN: (f64, f64) = (270.0, 180.0);
const BUTTON_SIZE: (f64, f64) = (360.0, 80.0);
const BUTTON_CORNER_RADIUS: f64 = 10.0;
const BUTTON_LABEL_ANCHOR: (f64, f64) = (450.0, 220.0);
const EXPIRED_ANCHOR: (f64, f64) = (450.0, 150.0);

// Slanted decorations hugging the left and right canvas edges.
const LEFT_EDGE_DECORATION: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 300.0), (33.0, 300.0), (98.0, 0.0)];
const RIGHT_EDGE_DECORATION: [(f64, f64); 4] =
    [(900.0, 0.0), (900.0, 300.0), (802.0, 300.0), (867.0, 0.0)];

// Font sizes in design-grid units; scaled by canvas width.
const DIGIT_FONT: f64 = 60.0;
const LABEL_FONT: f64 = 40.0;
const TITLE_FONT: f64 = 36.0;
const BUTTON_FONT: f64 = 40.0;
const EXPIRED_FONT: f64 = 52.0;

/// Per-request scene geometry: the design grid scaled once to the requested
/// canvas size.
#[derive(Clone, Copy, Debug)]
pub struct SceneLayout {
    width: u32,
    height: u32,
    scale_x: f64,
    scale_y: f64,
}

impl SceneLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale_x: f64::from(width) / DESIGN_WIDTH,
            scale_y: f64::from(height) / DESIGN_HEIGHT,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn point(&self, (x, y): (f64, f64)) -> Point {
        Point::new(x * self.scale_x, y * self.scale_y)
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn digit_anchors(&self) -> [Point; 4] {
        DIGIT_ANCHORS.map(|p| self.point(p))
    }

    pub fn label_anchors(&self) -> [Point; 4] {
        LABEL_ANCHORS.map(|p| self.point(p))
    }

    pub fn title_anchor(&self) -> Point {
        self.point(TITLE_ANCHOR)
    }

    pub fn button_rect(&self) -> Rect {
        let origin = self.point(BUTTON_ORIGIN);
        Rect::new(
            origin.x,
            origin.y,
            origin.x + BUTTON_SIZE.0 * self.scale_x,
            origin.y + BUTTON_SIZE.1 * self.scale_y,
        )
    }

    pub fn button_corner_radius(&self) -> f64 {
        BUTTON_CORNER_RADIUS * self.scale_x
    }

    pub fn button_label_anchor(&self) -> Point {
        self.point(BUTTON_LABEL_ANCHOR)
    }

    pub fn expired_anchor(&self) -> Point {
        self.point(EXPIRED_ANCHOR)
    }

    /// The two fixed edge decorations, as closed fill paths.
    pub fn edge_decorations(&self) -> [BezPath; 2] {
        [
            self.closed_polygon(&LEFT_EDGE_DECORATION),
            self.closed_polygon(&RIGHT_EDGE_DECORATION),
        ]
    }

    fn closed_polygon(&self, points: &[(f64, f64)]) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = points.iter().map(|&p| self.point(p));
        if let Some(first) = iter.next() {
            path.move_to(first);
            for p in iter {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    fn font(&self, design_size: f64) -> f32 {
        (design_size * self.scale_x) as f32
    }

    pub fn digit_font_size(&self) -> f32 {
        self.font(DIGIT_FONT)
    }

    pub fn label_font_size(&self) -> f32 {
        self.font(LABEL_FONT)
    }

    pub fn title_font_size(&self) -> f32 {
        self.font(TITLE_FONT)
    }

    pub fn button_font_size(&self) -> f32 {
        self.font(BUTTON_FONT)
    }

    pub fn expired_font_size(&self) -> f32 {
        self.font(EXPIRED_FONT)
    }
}
