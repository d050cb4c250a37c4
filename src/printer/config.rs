//! # Printer Configuration
//!
//! Hardware specifications of the target printer and the geometry of the
//! receipt template drawn for it.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution |
//! |-------|--------------|------------|
//! | 58mm Bluetooth receipt printer | 384 | 203 DPI |
//!
//! ## Usage
//!
//! ```
//! use rasterslip::printer::PrinterConfig;
//!
//! let config = PrinterConfig::MM58;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PrinterError;
use crate::font::Weight;

/// Printable width of 58mm paper in dots.
pub const PRINTER_WIDTH: u16 = 384;

/// # Printer Configuration
///
/// ```text
/// dots_per_mm = dpi / 25.4
///
/// For 58mm paper:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 384 / 8 = 48mm printable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterConfig {
    /// # 58mm Receipt Printer
    ///
    /// ```text
    /// ├─ 5mm ─┼──── 48mm printable ────┼─ 5mm ─┤
    /// │       │       384 dots         │       │
    /// ```
    pub const MM58: Self = Self {
        name: "58mm receipt printer",
        width_dots: PRINTER_WIDTH,
        width_bytes: PRINTER_WIDTH / 8,
        dpi: 203,
    };

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    /// Check that the width packs into whole raster bytes.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Layout`] if `width_dots` is zero, not a
    /// multiple of 8, or disagrees with `width_bytes`.
    pub fn validate(&self) -> Result<(), PrinterError> {
        crate::render::buffer::check_width(self.width_dots as usize)?;
        if u32::from(self.width_bytes) * 8 != u32::from(self.width_dots) {
            return Err(PrinterError::Layout(format!(
                "{}: width_bytes {} does not match {} dots",
                self.name, self.width_bytes, self.width_dots
            )));
        }
        Ok(())
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MM58
    }
}

// ============================================================================
// RECEIPT LAYOUT
// ============================================================================

/// Style of a plain text strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in dots
    pub size: f32,
    pub weight: Weight,
    pub center: bool,
}

impl TextStyle {
    pub const fn left(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Regular,
            center: false,
        }
    }

    pub const fn centered(size: f32, weight: Weight) -> Self {
        Self {
            size,
            weight,
            center: true,
        }
    }
}

/// Geometry and wording of the fixed receipt template.
///
/// All distances are in dots. Defaults reproduce the reference 58mm layout;
/// any field can be overridden from JSON.
///
/// ```
/// use rasterslip::printer::ReceiptLayout;
///
/// let layout = ReceiptLayout::from_json(r#"{ "feed_lines": 6 }"#).unwrap();
/// assert_eq!(layout.feed_lines, 6);
/// assert_eq!(layout.header_offsets, [0, 220, 270, 330]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptLayout {
    /// Space between the font size and the next line's font size
    pub leading: f32,
    /// Extra rows added below the last line of a text strip
    pub text_padding: usize,

    pub title: TextStyle,
    pub info: TextStyle,
    pub footer: TextStyle,

    pub divider_height: usize,
    pub divider_thickness: usize,

    pub header_height: usize,
    pub header_size: f32,
    pub header_baseline: f32,
    /// x of the item, qty, rate and total labels
    pub header_offsets: [i32; 4],
    pub header_labels: [String; 4],

    pub item_size: f32,
    /// Width budget for wrapped item names
    pub name_width: f32,
    pub row_line_height: usize,
    pub row_padding: usize,
    /// Baseline of the first name line; the numeric columns sit on it
    pub row_baseline: f32,
    /// x of the qty, rate and total columns
    pub column_offsets: [i32; 3],

    pub total_height: usize,
    pub total_size: f32,
    pub total_baseline: f32,
    pub total_label: String,

    pub bill_label: String,
    pub date_label: String,
    pub item_count_label: String,
    pub footer_text: String,

    /// Line feeds after the footer
    pub feed_lines: usize,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        Self {
            leading: 6.0,
            text_padding: 10,

            title: TextStyle::centered(30.0, Weight::Bold),
            info: TextStyle::left(20.0),
            footer: TextStyle::centered(20.0, Weight::Regular),

            divider_height: 12,
            divider_thickness: 2,

            header_height: 45,
            header_size: 22.0,
            header_baseline: 30.0,
            header_offsets: [0, 220, 270, 330],
            header_labels: [
                "Item".to_string(),
                "Qty".to_string(),
                "Rate".to_string(),
                "Total".to_string(),
            ],

            item_size: 22.0,
            name_width: 200.0,
            row_line_height: 28,
            row_padding: 12,
            row_baseline: 28.0,
            column_offsets: [210, 260, 320],

            total_height: 50,
            total_size: 32.0,
            total_baseline: 40.0,
            total_label: "TOTAL".to_string(),

            bill_label: "Bill No: ".to_string(),
            date_label: "Date: ".to_string(),
            item_count_label: "Total Items: ".to_string(),
            footer_text: "Thank You! Visit Again!".to_string(),

            feed_lines: 4,
        }
    }
}

impl ReceiptLayout {
    /// Parse a layout, filling missing fields with defaults.
    ///
    /// ## Errors
    ///
    /// Returns [`PrinterError::Config`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, PrinterError> {
        serde_json::from_str(json).map_err(|e| PrinterError::Config(format!("Invalid layout: {}", e)))
    }

    /// Height of one line of a text strip at `size`.
    #[inline]
    pub fn line_height(&self, size: f32) -> usize {
        (size + self.leading) as usize
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm58_dimensions() {
        let config = PrinterConfig::MM58;
        assert_eq!(config.width_dots, 384);
        assert_eq!(config.width_bytes, 48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_width_mm() {
        let width = PrinterConfig::MM58.width_mm();
        // 384 dots / 8 dpmm = 48mm
        assert!((width - 48.0).abs() < 1.0);
    }

    #[test]
    fn test_validate_rejects_unaligned_width() {
        let config = PrinterConfig {
            name: "odd",
            width_dots: 380,
            width_bytes: 47,
            dpi: 203,
        };
        assert!(matches!(config.validate(), Err(PrinterError::Layout(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_bytes() {
        let config = PrinterConfig {
            width_bytes: 47,
            ..PrinterConfig::MM58
        };
        assert!(matches!(config.validate(), Err(PrinterError::Layout(_))));
    }

    #[test]
    fn test_line_height() {
        let layout = ReceiptLayout::default();
        assert_eq!(layout.line_height(30.0), 36);
        assert_eq!(layout.line_height(20.0), 26);
    }

    #[test]
    fn test_layout_json_round_trip() {
        let layout = ReceiptLayout::default();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(ReceiptLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn test_layout_json_errors() {
        let err = ReceiptLayout::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PrinterError::Config(_)));
    }
}
