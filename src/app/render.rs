use gtk4::gdk::prelude::GdkCairoContextExt;
use gtk4::gdk_pixbuf::{Colorspace, Pixbuf};
use image::RgbImage;

use crate::geometry::{ViewPoint, ViewportGeometry};

const BACKGROUND_RGB: (f64, f64, f64) = (0.12, 0.12, 0.13);
const SELECTION_RGB: (f64, f64, f64) = (1.0, 0.0, 0.0);
const SELECTION_LINE_WIDTH: f64 = 2.0;
const SELECTION_DASH: [f64; 2] = [6.0, 4.0];

/// Wraps an RGB buffer in a pixbuf. Channel order stays RGB end to end.
pub(super) fn rgb_image_to_pixbuf(image: &RgbImage) -> Option<Pixbuf> {
    let width = i32::try_from(image.width()).ok()?;
    let height = i32::try_from(image.height()).ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    let rowstride = width.checked_mul(3)?;
    let bytes = gtk4::glib::Bytes::from_owned(image.as_raw().clone());
    Some(Pixbuf::from_bytes(
        &bytes,
        Colorspace::Rgb,
        false,
        8,
        width,
        height,
        rowstride,
    ))
}

pub(super) fn draw_viewport(
    context: &gtk4::cairo::Context,
    pixbuf: Option<&Pixbuf>,
    viewport: ViewportGeometry,
    selection: Option<(ViewPoint, u32, u32)>,
) {
    let (r, g, b) = BACKGROUND_RGB;
    context.set_source_rgb(r, g, b);
    context.paint().ok();

    if let Some(pixbuf) = pixbuf {
        context.set_source_pixbuf(
            pixbuf,
            f64::from(viewport.offset_x),
            f64::from(viewport.offset_y),
        );
        context.paint().ok();
    }

    if let Some((origin, width, height)) = selection {
        draw_selection_marker(context, origin, width, height);
    }
}

fn draw_selection_marker(
    context: &gtk4::cairo::Context,
    origin: ViewPoint,
    width: u32,
    height: u32,
) {
    context.save().ok();
    let (r, g, b) = SELECTION_RGB;
    context.set_source_rgb(r, g, b);
    context.set_line_width(SELECTION_LINE_WIDTH);
    context.set_dash(&SELECTION_DASH, 0.0);
    context.rectangle(
        f64::from(origin.x),
        f64::from(origin.y),
        f64::from(width),
        f64::from(height),
    );
    context.stroke().ok();
    context.restore().ok();
}
