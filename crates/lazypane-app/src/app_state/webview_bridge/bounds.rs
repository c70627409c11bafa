//! Panel placement and coordinate conversion to wry rects.

use lazypane_common::Rect;

// =============================================================================
// LAYOUT
// =============================================================================

/// Split `viewport` into `count` equal-width columns, left to right.
///
/// The last column absorbs any rounding remainder so the columns cover the
/// viewport exactly.
pub fn column_rects(viewport: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let width = (viewport.width / count as f64).floor();
    (0..count)
        .map(|i| {
            let x = viewport.x + width * i as f64;
            let w = if i + 1 == count {
                viewport.x + viewport.width - x
            } else {
                width
            };
            Rect {
                x,
                y: viewport.y,
                width: w,
                height: viewport.height,
            }
        })
        .collect()
}

// =============================================================================
// COORDINATE CONVERSION
// =============================================================================

/// Convert a `Rect` (f64 logical coords) to a wry `Rect`.
pub fn rect_to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
