//! Shared geometric primitives for view space and image-pixel space.

/// A pointer position inside the drawing area, before the image offset is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPoint {
    pub x: i32,
    pub y: i32,
}

impl ViewPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A position relative to the image's top-left pixel. May lie outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

impl ImageBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(image: &image::RgbImage) -> Self {
        Self::new(image.width(), image.height())
    }

    pub const fn contains(&self, rect: SelectionRect) -> bool {
        rect.x as u64 + rect.width as u64 <= self.width as u64
            && rect.y as u64 + rect.height as u64 <= self.height as u64
    }
}

/// Canonical rectangle in image-pixel space. Origin is always the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The rectangle translated back into view space for overlay drawing.
    pub fn to_view(self, viewport: ViewportGeometry) -> (ViewPoint, u32, u32) {
        let origin = viewport.image_to_view(ImagePoint::new(
            i32::try_from(self.x).unwrap_or(i32::MAX),
            i32::try_from(self.y).unwrap_or(i32::MAX),
        ));
        (origin, self.width, self.height)
    }
}

/// Drawing area size and the centered placement of the current image inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub viewport_width: i32,
    pub viewport_height: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl ViewportGeometry {
    /// Centers an image of `image` size in a viewport. Offsets go negative when
    /// the image is larger than the viewport.
    pub fn centered(viewport_width: i32, viewport_height: i32, image: ImageBounds) -> Self {
        let image_width = i32::try_from(image.width).unwrap_or(i32::MAX);
        let image_height = i32::try_from(image.height).unwrap_or(i32::MAX);
        Self {
            viewport_width,
            viewport_height,
            offset_x: viewport_width.saturating_sub(image_width) / 2,
            offset_y: viewport_height.saturating_sub(image_height) / 2,
        }
    }

    pub const fn view_to_image(&self, point: ViewPoint) -> ImagePoint {
        ImagePoint::new(
            point.x.saturating_sub(self.offset_x),
            point.y.saturating_sub(self.offset_y),
        )
    }

    pub const fn image_to_view(&self, point: ImagePoint) -> ViewPoint {
        ViewPoint::new(
            point.x.saturating_add(self.offset_x),
            point.y.saturating_add(self.offset_y),
        )
    }
}
