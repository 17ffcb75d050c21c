use kurbo::{BezPath, Rect};

/// Independent corner radii for [`rounded_rect`], in path units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

/// Closed path for a rectangle with quadratic-curve corners.
///
/// Walks the outline clockwise from the top edge; each corner is a single
/// quadratic segment with its control point at the square corner.
pub fn rounded_rect(rect: Rect, radii: CornerRadii) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((rect.x0 + radii.top_left, rect.y0));
    path.line_to((rect.x1 - radii.top_right, rect.y0));
    path.quad_to((rect.x1, rect.y0), (rect.x1, rect.y0 + radii.top_right));
    path.line_to((rect.x1, rect.y1 - radii.bottom_right));
    path.quad_to((rect.x1, rect.y1), (rect.x1 - radii.bottom_right, rect.y1));
    path.line_to((rect.x0 + radii.bottom_left, rect.y1));
    path.quad_to((rect.x0, rect.y1), (rect.x0, rect.y1 - radii.bottom_left));
    path.line_to((rect.x0, rect.y0 + radii.top_left));
    path.quad_to((rect.x0, rect.y0), (rect.x0 + radii.top_left, rect.y0));
    path.close_path();
    path
}
