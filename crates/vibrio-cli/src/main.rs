//! vibrio CLI: command-line interface for colour-based colony detection.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use vibrio::overlay::{draw_boxes, draw_contours, draw_labels, DEFAULT_LABEL_SCALE};
use image::{GrayImage, RgbImage};
use vibrio::{
    find_region_contours, mask_image, remove_noise, resize_keep_ratio, rgb_to_hsv, DetectConfig,
    DetectionResult, Detector,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "vibrio")]
#[command(about = "Detect and size vibrio colonies on culture plate photographs by colour")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect colonies in an image.
    Detect(CliDetectArgs),

    /// Print the default detection configuration (JSON).
    DefaultConfig,

    /// Convert an RGB triple to 8-bit HSV and report matching colour targets.
    Hsv {
        /// Colour as R,G,B (e.g. 240,210,30).
        #[arg(long)]
        rgb: String,
    },
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write detection results (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Detection configuration (JSON). Missing keys take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bound on the longer side of the working image.
    #[arg(long)]
    max_image_size: Option<u32>,

    /// Emit boxes in working-image pixels instead of normalized coordinates.
    #[arg(long)]
    absolute: bool,

    /// Path to write an annotated overlay image.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Longer side of the overlay image in pixels.
    #[arg(long, default_value = "640")]
    overlay_size: u32,

    /// TrueType/OpenType font for size labels on the overlay.
    /// Labels are skipped when omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Path to write the denoised mask of the first colour target.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Path to write the working image with traced region borders.
    #[arg(long)]
    contours_out: Option<PathBuf>,

    /// Path to write a versioned debug dump (JSON).
    #[arg(long)]
    debug_json: Option<PathBuf>,
}

impl CliDetectArgs {
    fn build_config(&self) -> CliResult<DetectConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading config: {}", path.display());
                DetectConfig::from_json_file(path)?
            }
            None => DetectConfig::default(),
        };
        if let Some(max) = self.max_image_size {
            config.max_image_size = max;
        }
        if self.absolute {
            config.normalize_output = false;
        }
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::DefaultConfig => run_default_config(),
        Commands::Hsv { rgb } => run_hsv(&rgb),
    }
}

fn run_default_config() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&DetectConfig::default())?);
    Ok(())
}

fn parse_rgb(s: &str) -> CliResult<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{}'", s).into());
    }
    let mut rgb = [0u8; 3];
    for (dst, part) in rgb.iter_mut().zip(&parts) {
        *dst = part
            .parse()
            .map_err(|e| -> CliError { format!("invalid channel '{}': {}", part, e).into() })?;
    }
    Ok(rgb)
}

fn run_hsv(rgb_str: &str) -> CliResult<()> {
    let rgb = parse_rgb(rgb_str)?;
    let [h, s, v] = rgb_to_hsv(rgb);
    println!("RGB {:?} -> HSV [{}, {}, {}]", rgb, h, s, v);

    let config = DetectConfig::default();
    for target in &config.targets {
        let verdict = if target.range.matches_rgb(rgb) {
            "match"
        } else {
            "no match"
        };
        println!(
            "  {}: {} (lower {:?}, upper {:?})",
            target.label, verdict, target.range.lower, target.range.upper
        );
    }
    Ok(())
}

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());

    let img = image::open(&args.image)
        .map_err(|e| -> CliError {
            format!("Failed to open image {}: {}", args.image.display(), e).into()
        })?
        .to_rgb8();
    let (w, h) = img.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let detector = Detector::new(args.build_config()?)?;
    let config = detector.config();

    let (result, debug_dump) = if args.debug_json.is_some() {
        let (r, d) = detector.detect_with_debug(&img)?;
        (r, Some(d))
    } else {
        (detector.detect(&img)?, None)
    };

    tracing::info!("Detected {} colonies", result.len());
    for (label, n) in result.count_by_class(config.target_labels()) {
        tracing::info!("  {}: {}", label, n);
    }

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    if let (Some(path), Some(dump)) = (&args.debug_json, &debug_dump) {
        std::fs::write(path, serde_json::to_string_pretty(dump)?)?;
        tracing::info!("Debug dump written to {}", path.display());
    }

    if let Some(path) = &args.overlay {
        write_overlay(&img, &result, args.overlay_size, args.font.as_deref(), path)?;
    }

    if args.mask_out.is_some() || args.contours_out.is_some() {
        let (working, mask) = first_target_views(&img, config)?;

        if let Some(path) = &args.mask_out {
            mask.save(path)?;
            tracing::info!("Mask written to {}", path.display());
        }

        if let Some(path) = &args.contours_out {
            let contours = find_region_contours(&mask);
            draw_contours(&working, &contours).save(path)?;
            tracing::info!(
                "{} contours written to {}",
                contours.len(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Working image and denoised mask of the first colour target.
fn first_target_views(
    img: &RgbImage,
    config: &DetectConfig,
) -> CliResult<(RgbImage, GrayImage)> {
    let target = config.targets.first().ok_or("no colour targets configured")?;
    let working = resize_keep_ratio(img, config.max_image_size)?;
    let mask = remove_noise(&mask_image(&working, &target.range));
    Ok((working, mask))
}

fn write_overlay(
    img: &RgbImage,
    result: &DetectionResult,
    overlay_size: u32,
    font_path: Option<&Path>,
    out: &Path,
) -> CliResult<()> {
    let display = resize_keep_ratio(img, overlay_size)?;
    let mut annotated = draw_boxes(&display, result);
    match font_path {
        Some(font_path) => {
            let bytes = std::fs::read(font_path).map_err(|e| -> CliError {
                format!("Failed to read font {}: {}", font_path.display(), e).into()
            })?;
            let font = ab_glyph::FontVec::try_from_vec(bytes)?;
            annotated = draw_labels(&annotated, result, &font, DEFAULT_LABEL_SCALE);
        }
        None => tracing::warn!("No --font given; overlay labels skipped"),
    }
    annotated.save(out)?;
    tracing::info!("Overlay written to {}", out.display());
    Ok(())
}
