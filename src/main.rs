//! # Kairoframe CLI
//!
//! Command-line interface for item codes and label sheets.
//!
//! ## Usage
//!
//! ```bash
//! # Print labels kf-0001 to kf-0040 on the default 60x20 preset
//! kairoframe labels 1-40
//!
//! # Custom size with a logo, tolerating typos in the range list
//! kairoframe labels "1-10,15,2o" --width 90 --height 35 --logo logo.png --lenient
//!
//! # Next free code in a store file
//! kairoframe next-code --store items.json
//!
//! # Decode a scanned QR payload
//! kairoframe scan https://kairoframe.lobo99.info/kf-0007
//!
//! # Run the HTTP API
//! kairoframe serve --listen 0.0.0.0:8080 --store items.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kairoframe::{
    KairoError,
    allocator::next_code,
    code::{DEFAULT_BASE_URL, ItemCode},
    config::LabelSettings,
    labels::{self, LabelJob},
    media::{CUSTOM_HEIGHT_MM, CUSTOM_WIDTH_MM, PRESETS},
    range,
    server::{self, ServerConfig},
    store::MemoryStore,
};

/// Kairoframe - inventory codes and QR label sheets
#[derive(Parser, Debug)]
#[command(name = "kairoframe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a PDF sheet of labels for a code range list
    Labels {
        /// Ranges of sequence numbers, e.g. "1-10,15,20-22"
        ranges: String,

        /// Label preset (see `sizes`)
        #[arg(long, default_value = "60x20", conflicts_with_all = ["width", "height"])]
        size: String,

        /// Custom label width in mm
        #[arg(long, requires = "height")]
        width: Option<f32>,

        /// Custom label height in mm
        #[arg(long, requires = "width")]
        height: Option<f32>,

        /// Logo image drawn on every label
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Site the QR codes link to
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Output file (defaults to labels-<first>-<last>.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip malformed range tokens instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show the next free item code
    NextCode {
        /// Store file
        #[arg(long, value_name = "FILE")]
        store: PathBuf,
    },

    /// Extract the item code from a scanned QR payload
    Scan {
        /// Scanned text (URL or bare code)
        payload: String,
    },

    /// List label size presets
    Sizes,

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Store file, loaded at start and saved after each change
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,

        /// Logo image drawn on every label
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Site the QR codes link to
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kairoframe=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), KairoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Labels {
            ranges,
            size,
            width,
            height,
            logo,
            base_url,
            output,
            lenient,
        } => {
            let label_size = labels::resolve_size(Some(size.as_str()), width, height)?;
            let settings = LabelSettings {
                base_url,
                logo_path: logo,
                ..LabelSettings::default()
            };

            let parsed = labels::resolve_ranges(&ranges, lenient)?;
            println!(
                "Printing {} labels: {}",
                range::total_count(&parsed),
                range::summary(&parsed)
            );

            let job = LabelJob::new(ranges, label_size).lenient(lenient);
            let out = labels::generate(&job, &settings)?;
            let path = output.unwrap_or_else(|| PathBuf::from(&out.filename));
            std::fs::write(&path, &out.pdf)?;

            println!(
                "Wrote {} ({} labels on {} pages)",
                path.display(),
                out.labels,
                out.pages
            );
        }

        Commands::NextCode { store } => {
            let store = MemoryStore::load_json(&store)?;
            println!("{}", next_code(&store)?);
        }

        Commands::Scan { payload } => {
            let code = ItemCode::from_scan(payload.trim()).ok_or_else(|| {
                KairoError::InvalidInput(format!("'{}' does not contain an item code", payload))
            })?;
            println!("{}", code);
        }

        Commands::Sizes => {
            println!("Label presets:");
            for preset in PRESETS {
                println!("  {:<8} {}", preset.id, preset.name);
            }
            println!(
                "\nCustom: --width {}-{} --height {}-{} (mm)",
                CUSTOM_WIDTH_MM.0, CUSTOM_WIDTH_MM.1, CUSTOM_HEIGHT_MM.0, CUSTOM_HEIGHT_MM.1
            );
        }

        Commands::Serve {
            listen,
            store,
            logo,
            base_url,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                store_path: store,
                labels: LabelSettings {
                    base_url,
                    logo_path: logo,
                    ..LabelSettings::default()
                },
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}
