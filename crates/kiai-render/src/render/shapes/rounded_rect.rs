use crate::coords::Rect;
use crate::paint::Color;
use crate::render::Surface;

/// Fills `bounds` with `radius` rounding on all four corners.
///
/// `radius <= 0` is a single fill. Otherwise the shape is split into a
/// full-height center column, two side strips between the corners, and four
/// quarter discs filled one scanline at a time. Pieces never overlap, so
/// translucent colors blend once per pixel. Coverage is binary.
///
/// The caller keeps `radius <= min(width, height) / 2`; it is not clamped.
pub fn fill_rounded_rect<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Rect,
    color: Color,
    radius: f32,
) {
    // Also catches NaN.
    if !(radius > 0.0) {
        surface.fill_rect(bounds, color);
        return;
    }

    let Rect { x, y, width: w, height: h } = bounds;
    let r = radius;

    fill_nonempty(surface, Rect::new(x + r, y, w - 2.0 * r, h), color);
    fill_nonempty(surface, Rect::new(x, y + r, r, h - 2.0 * r), color);
    fill_nonempty(surface, Rect::new(x + w - r, y + r, r, h - 2.0 * r), color);

    quarter_disc(surface, x + r, y + r, r, Corner::TopLeft, color);
    quarter_disc(surface, x + w - r, y + r, r, Corner::TopRight, color);
    quarter_disc(surface, x + w - r, y + h - r, r, Corner::BottomRight, color);
    quarter_disc(surface, x + r, y + h - r, r, Corner::BottomLeft, color);
}

#[derive(Copy, Clone)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

/// One quadrant of the circle centered at `(cx, cy)`.
///
/// Row `k` (distance from the center row) spans half-width
/// `floor(sqrt(r^2 - k^2))` on the quadrant's side of `cx`.
fn quarter_disc<S: Surface + ?Sized>(
    surface: &mut S,
    cx: f32,
    cy: f32,
    r: f32,
    corner: Corner,
    color: Color,
) {
    let rows = r.ceil() as u32;
    for i in 0..rows {
        let k = i as f32;
        let half = (r * r - k * k).sqrt().floor();
        if half <= 0.0 {
            continue;
        }
        let row_h = (r - k).min(1.0);
        let row_y = if corner.is_top() { cy - k - row_h } else { cy + k };
        let row_x = if corner.is_left() { cx - half } else { cx };
        surface.fill_rect(Rect::new(row_x, row_y, half, row_h), color);
    }
}

#[inline]
fn fill_nonempty<S: Surface + ?Sized>(surface: &mut S, rect: Rect, color: Color) {
    if !rect.is_empty() {
        surface.fill_rect(rect, color);
    }
}
