//! # Receipt Model
//!
//! The data printed on a retail bill and the fixed order in which its
//! sections reach the paper.
//!
//! ```text
//! ┌──────────────────────────┐
//! │        SHOP TITLE        │  Title (centered, bold)
//! │ Bill No: 30674           │  Info lines
//! │ Date: 19/01/26 09:15 AM  │
//! │──────────────────────────│  Divider
//! │ Item       Qty Rate Total│  Column header
//! │──────────────────────────│
//! │ Amul butter  3   90  270 │  One row per item
//! │──────────────────────────│
//! │ Total Items: 1           │
//! │        TOTAL  270        │  Grand total (centered, bold)
//! │  Thank You! Visit Again! │  Footer
//! └──────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::printer::{ReceiptLayout, TextStyle};

/// A bill ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Shop name printed as the title
    pub header: String,
    pub bill_number: String,
    /// Preformatted date, printed verbatim
    pub date: String,
    pub items: Vec<LineItem>,
    /// Printed as supplied, never summed from the items
    pub grand_total: u64,
}

/// One row of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in whole currency units
    pub rate: u64,
    /// Total as reported upstream. Kept for callers; the printed total is
    /// always [`LineItem::line_total`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stated_total: Option<u64>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, rate: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
            rate,
            stated_total: None,
        }
    }

    /// `quantity * rate`, saturating at `u64::MAX`.
    #[inline]
    pub fn line_total(&self) -> u64 {
        u64::from(self.quantity).saturating_mul(self.rate)
    }
}

/// One strip of the printed receipt, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    /// Wrapped text drawn with one style
    Text { text: String, style: TextStyle },
    /// Horizontal rule across the full width
    Divider,
    /// Item / Qty / Rate / Total labels
    ColumnHeader,
    /// One item row
    Item(&'a LineItem),
    /// Large centered grand total
    GrandTotal(u64),
}

impl Section<'_> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Text { .. } => "text",
            Section::Divider => "divider",
            Section::ColumnHeader => "column-header",
            Section::Item(_) => "item",
            Section::GrandTotal(_) => "total",
        }
    }
}

impl Receipt {
    /// Sections in print order.
    ///
    /// title → bill number → date → divider → column header → divider →
    /// items → divider → item count → grand total → footer
    pub fn sections<'a>(&'a self, layout: &ReceiptLayout) -> Vec<Section<'a>> {
        let text = |text: String, style: TextStyle| Section::Text { text, style };

        let mut sections = Vec::with_capacity(self.items.len() + 10);
        sections.push(text(self.header.clone(), layout.title));
        sections.push(text(
            format!("{}{}", layout.bill_label, self.bill_number),
            layout.info,
        ));
        sections.push(text(format!("{}{}", layout.date_label, self.date), layout.info));
        sections.push(Section::Divider);
        sections.push(Section::ColumnHeader);
        sections.push(Section::Divider);
        sections.extend(self.items.iter().map(Section::Item));
        sections.push(Section::Divider);
        sections.push(text(
            format!("{}{}", layout.item_count_label, self.items.len()),
            layout.info,
        ));
        sections.push(Section::GrandTotal(self.grand_total));
        sections.push(text(layout.footer_text.clone(), layout.footer));
        sections
    }
}

// ============================================================================
// RECEIPT TEMPLATES
// ============================================================================

/// Restaurant bill with long, wrapping Hindi item names.
///
/// Printing it legibly needs a TTF font with Devanagari coverage; with the
/// built-in bitmap font the names come out as placeholder boxes.
pub fn demo_receipt() -> Receipt {
    Receipt {
        header: "CHATKARA RESTAURANT".to_string(),
        bill_number: "30674".to_string(),
        date: "19/01/26 09:15 AM".to_string(),
        items: vec![
            LineItem::new(
                "अमूल बटर अमूल बटर अमूल बटर अमूल बटर अमूल बटर अमूल बटर ",
                3,
                90,
            ),
            LineItem::new("कुरकुरे मोमोज", 1, 100),
            LineItem::new("क्रीम बर्गर", 2, 50),
            LineItem::new("चाउमीन (1/2)", 1, 50),
            LineItem::new("चिली पोटैटो", 3, 80),
            LineItem::new("पाव भाजी", 2, 70),
        ],
        grand_total: 900,
    }
}

// ============================================================================
// TESTS
// ============================================================================
