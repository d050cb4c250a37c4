//! # End-to-End Receipt Tests
//!
//! Drive the full pipeline (sections → strips → packing → framing →
//! transport) against an in-memory transport and check the exact command
//! stream a printer would receive.

use pretty_assertions::assert_eq;

use rasterslip::font::SpleenRasterizer;
use rasterslip::protocol::graphics::{HEADER_LEN, RasterCommand};
use rasterslip::render::StripBuilder;
use rasterslip::transport::MemoryTransport;
use rasterslip::{LineItem, PrinterError, PrinterState, Receipt, ReceiptComposer, ReceiptLayout};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn shop_receipt() -> Receipt {
    Receipt {
        header: "SHOP".to_string(),
        bill_number: "42".to_string(),
        date: "19/01/26 09:15 AM".to_string(),
        items: vec![LineItem::new("A", 2, 50)],
        grand_total: 100,
    }
}

fn print_to_memory(receipt: &Receipt) -> MemoryTransport {
    let mut composer = ReceiptComposer::new(MemoryTransport::new(), SpleenRasterizer::new()).unwrap();
    composer.connect("memory").unwrap();
    composer.print_receipt(receipt).unwrap();
    composer.into_transport()
}

/// Decode the width and height fields of a raster command.
fn raster_dims(command: &[u8]) -> (u16, u16) {
    assert_eq!(&command[..4], &[0x1D, 0x76, 0x30, 0x00], "not a raster command");
    (
        u16::from_le_bytes([command[4], command[5]]),
        u16::from_le_bytes([command[6], command[7]]),
    )
}

/// The framed command the composer should emit for a given strip.
fn expected<F>(build: F) -> Vec<u8>
where
    F: FnOnce(&StripBuilder<'_, SpleenRasterizer>) -> Result<rasterslip::render::PixelBuffer, PrinterError>,
{
    let layout = ReceiptLayout::default();
    let font = SpleenRasterizer::new();
    let builder = StripBuilder::new(&font, &layout, 384).unwrap();
    RasterCommand::from_buffer(&build(&builder).unwrap())
        .unwrap()
        .to_bytes()
}

// ============================================================================
// COMMAND STREAM
// ============================================================================

#[test_log::test]
fn test_end_to_end_command_sequence() {
    let transport = print_to_memory(&shop_receipt());
    let commands = transport.commands();

    // reset + 11 strips + feed
    assert_eq!(commands.len(), 13);
    assert_eq!(commands[0], vec![0x1B, 0x40]);
    assert_eq!(commands[12], vec![0x0A; 4]);

    let heights: Vec<u16> = commands[1..12].iter().map(|c| raster_dims(c).1).collect();
    assert_eq!(
        heights,
        vec![
            46, // title
            36, // bill number
            36, // date
            12, // divider
            45, // column header
            12, // divider
            40, // item
            12, // divider
            36, // item count
            50, // grand total
            36, // footer
        ]
    );

    for command in &commands[1..12] {
        let (width_bytes, height) = raster_dims(command);
        assert_eq!(width_bytes, 48);
        assert_eq!(command.len(), HEADER_LEN + width_bytes as usize * height as usize);
    }
}

#[test]
fn test_strips_match_their_sections() {
    let layout = ReceiptLayout::default();
    let transport = print_to_memory(&shop_receipt());
    let commands = transport.commands();

    assert_eq!(commands[1], expected(|b| b.text("SHOP", layout.title)));
    assert_eq!(commands[2], expected(|b| b.text("Bill No: 42", layout.info)));
    assert_eq!(commands[3], expected(|b| b.text("Date: 19/01/26 09:15 AM", layout.info)));
    assert_eq!(commands[4], expected(|b| b.divider()));
    assert_eq!(commands[5], expected(|b| b.column_header()));
    assert_eq!(commands[6], commands[4]);
    assert_eq!(commands[7], expected(|b| b.item_row(&LineItem::new("A", 2, 50))));
    assert_eq!(commands[8], commands[4]);
    assert_eq!(commands[9], expected(|b| b.text("Total Items: 1", layout.info)));
    assert_eq!(commands[10], expected(|b| b.grand_total(100)));
    assert_eq!(
        commands[11],
        expected(|b| b.text("Thank You! Visit Again!", layout.footer))
    );
}

#[test]
fn test_item_total_is_recomputed_from_quantity_and_rate() {
    let honest = print_to_memory(&shop_receipt());

    let mut lying = shop_receipt();
    lying.items[0].stated_total = Some(7);
    let lying = print_to_memory(&lying);

    // The stated total never reaches the paper
    assert_eq!(honest.commands()[7], lying.commands()[7]);
    assert_eq!(
        lying.commands()[7],
        expected(|b| b.item_row(&LineItem::new("A", 2, 50)))
    );
    assert_ne!(
        lying.commands()[7],
        expected(|b| b.item_row(&LineItem::new("A", 1, 7)))
    );
}

#[test]
fn test_grand_total_is_printed_as_supplied() {
    let mut receipt = shop_receipt();
    receipt.grand_total = 12345;
    let transport = print_to_memory(&receipt);

    assert_eq!(transport.commands()[10], expected(|b| b.grand_total(12345)));
}

#[test]
fn test_one_strip_per_item_in_order() {
    let mut receipt = shop_receipt();
    receipt.items = vec![
        LineItem::new("Tea", 2, 15),
        LineItem::new("Samosa samosa samosa samosa samosa", 4, 20),
        LineItem::new("Water", 1, 10),
    ];
    let transport = print_to_memory(&receipt);
    let commands = transport.commands();

    // reset + 3 header strips + 3 rule/header strips + 3 items + 4 tail strips + feed
    assert_eq!(commands.len(), 1 + 6 + 3 + 4 + 1);
    for (i, item) in receipt.items.iter().enumerate() {
        assert_eq!(commands[7 + i], expected(|b| b.item_row(item)));
    }
    assert_eq!(
        commands[11],
        expected(|b| b.text("Total Items: 3", ReceiptLayout::default().info))
    );
}

#[test]
fn test_empty_receipt_still_prints_frame() {
    let mut receipt = shop_receipt();
    receipt.items.clear();
    receipt.grand_total = 0;
    let transport = print_to_memory(&receipt);

    // reset + 10 strips + feed
    assert_eq!(transport.commands().len(), 12);
    assert_eq!(
        transport.commands()[8],
        expected(|b| b.text("Total Items: 0", ReceiptLayout::default().info))
    );
}

// ============================================================================
// FAILURES
// ============================================================================

#[test_log::test]
fn test_third_write_failure_stops_the_receipt() {
    let mut composer = ReceiptComposer::new(
        MemoryTransport::new().failing_on_write(3),
        SpleenRasterizer::new(),
    )
    .unwrap();
    composer.connect("memory").unwrap();

    let err = composer.print_receipt(&shop_receipt()).unwrap_err();
    assert!(matches!(err, PrinterError::Transport(_)));
    assert_eq!(composer.state(), PrinterState::Error);

    let transport = composer.into_transport();
    // The 4th command is never attempted
    assert_eq!(transport.attempts(), 3);
    assert_eq!(transport.commands().len(), 2);
}

#[test]
fn test_connection_refused() {
    let mut composer = ReceiptComposer::new(
        MemoryTransport::new().refusing_connection(),
        SpleenRasterizer::new(),
    )
    .unwrap();

    assert!(matches!(
        composer.connect("memory"),
        Err(PrinterError::Connection(_))
    ));
    assert!(matches!(
        composer.print_receipt(&shop_receipt()),
        Err(PrinterError::NotConnected(_))
    ));
    assert!(composer.transport().commands().is_empty());
}

#[test]
fn test_custom_layout_feed_lines() {
    let layout = ReceiptLayout {
        feed_lines: 6,
        ..ReceiptLayout::default()
    };
    let mut composer = ReceiptComposer::with_config(
        MemoryTransport::new(),
        SpleenRasterizer::new(),
        rasterslip::PrinterConfig::MM58,
        layout,
    )
    .unwrap();
    composer.connect("memory").unwrap();
    composer.print_receipt(&shop_receipt()).unwrap();

    let commands = composer.transport().commands();
    assert_eq!(commands.last().unwrap(), &vec![0x0A; 6]);
}

#[test]
fn test_oversized_layout_fails_without_panicking() {
    let layout = ReceiptLayout::from_json(r#"{ "divider_height": 100000000000000000 }"#).unwrap();
    let mut composer = ReceiptComposer::with_config(
        MemoryTransport::new(),
        SpleenRasterizer::new(),
        rasterslip::PrinterConfig::MM58,
        layout,
    )
    .unwrap();
    composer.connect("memory").unwrap();

    assert!(matches!(
        composer.print_receipt(&shop_receipt()),
        Err(PrinterError::Layout(_))
    ));
    assert_eq!(composer.state(), PrinterState::Error);
    // reset + title, bill number and date; the first divider never goes out
    assert_eq!(composer.transport().commands().len(), 4);
}
