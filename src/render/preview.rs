//! # Receipt Preview
//!
//! Stacks every strip of a receipt into one grayscale image, showing what
//! the paper will look like without touching a printer.

use std::io::Cursor;

use image::{GrayImage, ImageFormat};

use super::strip::StripBuilder;
use crate::error::PrinterError;
use crate::font::GlyphRasterizer;
use crate::printer::ReceiptLayout;
use crate::receipt::Receipt;

/// Render a receipt to an image `width` dots wide.
pub fn render_preview<R: GlyphRasterizer + ?Sized>(
    receipt: &Receipt,
    rasterizer: &R,
    layout: &ReceiptLayout,
    width: usize,
) -> Result<GrayImage, PrinterError> {
    let builder = StripBuilder::new(rasterizer, layout, width)?;
    let strips = receipt
        .sections(layout)
        .iter()
        .map(|section| builder.build(section))
        .collect::<Result<Vec<_>, _>>()?;

    let height: usize = strips.iter().map(|s| s.height()).sum();
    let (Ok(img_width), Ok(img_height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(PrinterError::Layout(format!(
            "preview of {}x{} dots is too large",
            width, height
        )));
    };
    let mut img = GrayImage::from_pixel(img_width, img_height, image::Luma([255]));

    let mut top = 0u32;
    for strip in &strips {
        image::imageops::replace(&mut img, &strip.to_image(), 0, i64::from(top));
        top += strip.height() as u32;
    }

    Ok(img)
}

/// Render a receipt preview and encode it as PNG.
pub fn preview_png<R: GlyphRasterizer + ?Sized>(
    receipt: &Receipt,
    rasterizer: &R,
    layout: &ReceiptLayout,
    width: usize,
) -> Result<Vec<u8>, PrinterError> {
    let img = render_preview(receipt, rasterizer, layout, width)?;
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)
        .map_err(|e| PrinterError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(png.into_inner())
}
