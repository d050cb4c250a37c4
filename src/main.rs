//! # Rasterslip CLI
//!
//! Demo driver for printing receipts from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Print the demo restaurant bill over Bluetooth
//! rasterslip print --device 66:32:78:9C:A9:80 --font NotoSansDevanagari-Regular.ttf
//!
//! # Print a receipt described in JSON
//! rasterslip print --receipt bill.json --device /dev/rfcomm0
//!
//! # Preview instead of printing
//! rasterslip print --png receipt.png
//!
//! # Capture the raw command stream
//! rasterslip print --output receipt.bin
//! ```

use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::PathBuf;

use rasterslip::{
    PrinterConfig, PrinterError, Receipt, ReceiptComposer, ReceiptLayout,
    font::{GlyphRasterizer, SpleenRasterizer, TtfRasterizer},
    receipt,
    render::preview,
    transport::{MemoryTransport, RfcommTransport, Transport, bluetooth::DEFAULT_DEVICE},
};

/// Rasterslip - raster receipt printing for 58mm thermal printers
#[derive(Parser, Debug)]
#[command(name = "rasterslip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a receipt (the built-in demo bill unless --receipt is given)
    Print {
        /// Receipt JSON file
        #[arg(long, value_name = "FILE")]
        receipt: Option<PathBuf>,

        /// Printer device path or Bluetooth MAC address
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// TTF/OTF font for text (defaults to the built-in bitmap font)
        #[arg(long, value_name = "FILE")]
        font: Option<PathBuf>,

        /// Separate bold face for --font
        #[arg(long, value_name = "FILE", requires = "font")]
        bold_font: Option<PathBuf>,

        /// Receipt layout JSON file
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Override the receipt date (defaults to now for the demo bill)
        #[arg(long)]
        date: Option<String>,

        /// Write a PNG preview instead of printing
        #[arg(long, value_name = "FILE", conflicts_with = "output")]
        png: Option<PathBuf>,

        /// Write the printer command stream to a file instead of printing
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrinterError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            receipt,
            device,
            font,
            bold_font,
            layout,
            date,
            png,
            output,
        } => {
            let receipt = load_receipt(receipt, date)?;
            let layout = match layout {
                Some(path) => ReceiptLayout::from_json(&fs::read_to_string(&path)?)?,
                None => ReceiptLayout::default(),
            };
            let rasterizer = load_rasterizer(font, bold_font)?;

            if let Some(png_path) = png {
                let width = PrinterConfig::MM58.width_dots as usize;
                let bytes = preview::preview_png(&receipt, &rasterizer, &layout, width)?;
                fs::write(&png_path, bytes)?;
                info!("Saved preview to {}", png_path.display());
                return Ok(());
            }

            if let Some(out_path) = output {
                let transport = print(MemoryTransport::new(), rasterizer, layout, "memory", &receipt)?;
                fs::write(&out_path, transport.bytes())?;
                info!(
                    "Wrote {} commands to {}",
                    transport.commands().len(),
                    out_path.display()
                );
                return Ok(());
            }

            print(RfcommTransport::new(), rasterizer, layout, &device, &receipt)?;
        }
    }

    Ok(())
}

/// Connect, print one receipt, and hand the transport back.
fn print<T: Transport, R: GlyphRasterizer>(
    transport: T,
    rasterizer: R,
    layout: ReceiptLayout,
    address: &str,
    receipt: &Receipt,
) -> Result<T, PrinterError> {
    let config = PrinterConfig::MM58;
    info!(
        "{}: {} dots ({:.0}mm printable at {} dpi)",
        config.name,
        config.width_dots,
        config.width_mm(),
        config.dpi
    );
    let mut composer = ReceiptComposer::with_config(transport, rasterizer, config, layout)?;
    composer.connect(address)?;
    composer.print_receipt(receipt)?;
    Ok(composer.into_transport())
}

fn load_receipt(path: Option<PathBuf>, date: Option<String>) -> Result<Receipt, PrinterError> {
    let mut receipt = match path {
        Some(path) => {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json).map_err(|e| {
                PrinterError::Config(format!("Invalid receipt {}: {}", path.display(), e))
            })?
        }
        None => {
            let mut demo = receipt::demo_receipt();
            demo.date = chrono::Local::now().format("%d/%m/%y %I:%M %p").to_string();
            demo
        }
    };

    if let Some(date) = date {
        receipt.date = date;
    }
    Ok(receipt)
}

fn load_rasterizer(
    font: Option<PathBuf>,
    bold_font: Option<PathBuf>,
) -> Result<Box<dyn GlyphRasterizer>, PrinterError> {
    let Some(font) = font else {
        return Ok(Box::new(SpleenRasterizer::new()));
    };

    let mut ttf = TtfRasterizer::from_file(&font)?;
    if let Some(bold) = bold_font {
        ttf = ttf.with_bold_file(&bold)?;
    }
    info!("Using font {}", font.display());
    Ok(Box::new(ttf))
}
