//! # Folio CLI
//!
//! Command-line front end for the report composer.
//!
//! ## Usage
//!
//! ```bash
//! # Lay out rooms (and a page-1 property header) into a canvas file
//! folio layout --rooms rooms.json --property property.json --out canvas.json
//!
//! # Re-run the layout on an existing canvas, keeping manual items
//! folio layout --rooms rooms.json --canvas canvas.json --out canvas.json
//!
//! # Brightness/contrast, 10-200, 100 = unchanged
//! folio adjust photo.jpg --brightness 120 --contrast 90 --out photo-adjusted.jpg
//!
//! # Crop using a box drawn over a 400x300 preview, then rotate 90
//! folio crop photo.jpg --x 50 --y 20 --width 200 --height 200 \
//!     --display-width 400 --display-height 300 --rotation 90 --out crop.jpg
//!
//! # Render every page as a wireframe PNG
//! folio export canvas.json --out-dir pages/ --images photos/
//! ```
//!
//! Set `RUST_LOG=debug` for layout and export tracing.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use folio::{
    Canvas, ComposerConfig, FolioError, LayoutEngine,
    document::PropertyHeader,
    export::{Exporter, PageFrame},
    geometry::{Rect, Size},
    layout::RoomSection,
    photo::{CropRequest, DirImageStore, Rotation, adjust, crop},
    preview::WireframeRenderer,
};

/// Folio - property report composer
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON composer config (page geometry, heading, disclaimer)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out room photos onto pages
    Layout {
        /// JSON array of room sections
        #[arg(long, value_name = "FILE")]
        rooms: PathBuf,

        /// JSON property header to seed page 1 with
        #[arg(long, value_name = "FILE")]
        property: Option<PathBuf>,

        /// Existing canvas to regenerate the room pages on
        #[arg(long, value_name = "FILE")]
        canvas: Option<PathBuf>,

        /// Where to write the canvas (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Adjust brightness and contrast of an image
    Adjust {
        input: PathBuf,

        #[arg(long, default_value = "100")]
        brightness: u16,

        #[arg(long, default_value = "100")]
        contrast: u16,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Crop an image using a box drawn over a preview
    Crop {
        input: PathBuf,

        #[arg(long)]
        x: f32,

        #[arg(long)]
        y: f32,

        #[arg(long)]
        width: f32,

        #[arg(long)]
        height: f32,

        /// Width of the preview the box was drawn on
        #[arg(long)]
        display_width: f32,

        /// Height of the preview the box was drawn on
        #[arg(long)]
        display_height: f32,

        /// Clockwise rotation applied after cropping (0, 90, 180, 270)
        #[arg(long, default_value = "0")]
        rotation: i32,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Render every page of a canvas to PNG
    Export {
        canvas: PathBuf,

        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Directory image references resolve against (defaults to the canvas's directory)
        #[arg(long, value_name = "DIR")]
        images: Option<PathBuf>,
    },
}

/// Written next to the exported pages.
#[derive(Serialize)]
struct ExportManifest {
    generated_at: String,
    frame: PageFrame,
    pages: Vec<ManifestPage>,
    failed_pages: Vec<u32>,
}

#[derive(Serialize)]
struct ManifestPage {
    page: u32,
    stamp: String,
    file: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FolioError> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ComposerConfig::from_json_file(path)?,
        None => ComposerConfig::default(),
    };

    match cli.command {
        Commands::Layout {
            rooms,
            property,
            canvas,
            out,
        } => {
            let rooms: Vec<RoomSection> = read_json(&rooms)?;
            let mut canvas: Canvas = match canvas {
                Some(path) => read_json(&path)?,
                None => Canvas::new(),
            };

            if let Some(path) = property {
                let header: PropertyHeader = read_json(&path)?;
                canvas.seed_property_header(&header, &config.page);
            }

            let summary = LayoutEngine::new(config).generate(&mut canvas, &rooms);
            println!(
                "Laid out {} room(s), {} image(s) over {} page(s) ({} items created, {} cleared)",
                summary.rooms, summary.images, summary.pages, summary.items_created, summary.items_cleared
            );

            let json = serde_json::to_string_pretty(&canvas)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Saved to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Adjust {
            input,
            brightness,
            contrast,
            out,
        } => {
            let bytes = std::fs::read(&input)?;
            let adjusted = adjust(&bytes, brightness, contrast)?;
            std::fs::write(&out, adjusted)?;
            println!("Saved to {}", out.display());
        }

        Commands::Crop {
            input,
            x,
            y,
            width,
            height,
            display_width,
            display_height,
            rotation,
            out,
        } => {
            let request = CropRequest::new(
                Rect::new(x, y, width, height),
                Size::new(display_width, display_height),
            )
            .rotated(Rotation::from_degrees(rotation)?);

            let bytes = std::fs::read(&input)?;
            let cropped = crop(&bytes, &request)?;
            std::fs::write(&out, cropped)?;
            println!("Saved to {}", out.display());
        }

        Commands::Export {
            canvas: canvas_path,
            out_dir,
            images,
        } => {
            let mut canvas: Canvas = read_json(&canvas_path)?;
            let images = images.unwrap_or_else(|| {
                canvas_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let store = DirImageStore::new(images);
            let mut renderer = WireframeRenderer::with_boundary(&store, &config.page);
            let exporter = Exporter::new(PageFrame::from_boundary(&config.page));

            let doc = exporter.render_document(&mut canvas, &mut renderer, None);

            std::fs::create_dir_all(&out_dir)?;
            let mut pages = Vec::with_capacity(doc.pages.len());
            for artifact in &doc.pages {
                let Some(png) = &artifact.snapshot.raster else {
                    continue;
                };
                let file = format!("page-{:03}.png", artifact.page_number);
                std::fs::write(out_dir.join(&file), png)?;
                pages.push(ManifestPage {
                    page: artifact.page_number,
                    stamp: artifact.stamp.clone(),
                    file,
                });
            }

            let manifest = ExportManifest {
                generated_at: doc.generated_at.to_rfc3339(),
                frame: exporter.frame(),
                pages,
                failed_pages: doc.failed_page_numbers(),
            };
            std::fs::write(
                out_dir.join("manifest.json"),
                serde_json::to_string_pretty(&manifest)?,
            )?;

            println!("Exported {} page(s) to {}", doc.pages.len(), out_dir.display());
            for failure in &doc.failed_pages {
                println!("  {}", FolioError::from(failure));
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FolioError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
