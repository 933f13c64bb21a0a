use crate::geometry::{ImageBounds, ImagePoint, SelectionRect, ViewPoint, ViewportGeometry};

/// Clamps each coordinate independently into `[0, width] x [0, height]`.
pub fn clamp_point(point: ImagePoint, bounds: ImageBounds) -> ImagePoint {
    let max_x = i32::try_from(bounds.width).unwrap_or(i32::MAX);
    let max_y = i32::try_from(bounds.height).unwrap_or(i32::MAX);
    ImagePoint::new(point.x.clamp(0, max_x), point.y.clamp(0, max_y))
}

/// Turns two arbitrary corners into a canonical rectangle inside `bounds`.
///
/// The result may be degenerate; callers discard those before blurring.
pub fn normalize_selection(
    start: ImagePoint,
    end: ImagePoint,
    bounds: ImageBounds,
) -> SelectionRect {
    let start = clamp_point(start, bounds);
    let end = clamp_point(end, bounds);
    let left = start.x.min(end.x);
    let top = start.y.min(end.y);
    SelectionRect::new(
        left.unsigned_abs(),
        top.unsigned_abs(),
        start.x.abs_diff(end.x),
        start.y.abs_diff(end.y),
    )
}

/// Like [`normalize_selection`] but filters out zero-area rectangles.
pub fn committed_selection(
    start: ImagePoint,
    end: ImagePoint,
    bounds: ImageBounds,
) -> Option<SelectionRect> {
    Some(normalize_selection(start, end, bounds)).filter(|rect| !rect.is_degenerate())
}

/// An armed drag. Exists only between a pointer press and its release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection {
    start: ImagePoint,
    current: ImagePoint,
}

impl DragSelection {
    pub fn begin(press: ViewPoint, viewport: ViewportGeometry) -> Self {
        let start = viewport.view_to_image(press);
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, pointer: ViewPoint, viewport: ViewportGeometry) {
        self.current = viewport.view_to_image(pointer);
    }

    pub const fn start(&self) -> ImagePoint {
        self.start
    }

    /// Live feedback rectangle; may be zero-sized.
    pub fn preview(&self, bounds: ImageBounds) -> SelectionRect {
        normalize_selection(self.start, self.current, bounds)
    }

    pub fn finish(
        self,
        release: ViewPoint,
        viewport: ViewportGeometry,
        bounds: ImageBounds,
    ) -> Option<SelectionRect> {
        committed_selection(self.start, viewport.view_to_image(release), bounds)
    }
}
