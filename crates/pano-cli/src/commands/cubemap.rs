//! Cubemap command

use crate::config::{validate_extension, Config};
use crate::CubemapArgs;
use anyhow::{ensure, Context, Result};
use pano_ops::transform::flip_h;
use pano_ops::{cubemap_project, SizeGuard};
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Resolved settings shared by every input of a batch.
struct Settings {
    output_dir: PathBuf,
    guard: SizeGuard,
    scale: f64,
    face_size: Option<u32>,
    mirror: bool,
    extension: String,
    quality: u8,
}

pub fn run(args: CubemapArgs, config: &Config, verbose: u8) -> Result<()> {
    trace!(inputs = args.input.len(), output = %args.output.display(), "cubemap::run");

    let settings = Settings {
        guard: SizeGuard::new(args.max_dimension.unwrap_or(config.max_dimension))?,
        scale: args.scale.unwrap_or(config.cubemap.scale),
        face_size: args.face_size,
        mirror: config.cubemap.mirror && !args.no_mirror,
        extension: args.format.unwrap_or_else(|| config.output.extension.clone()),
        quality: config.output.jpeg_quality,
        output_dir: args.output,
    };
    ensure!(
        settings.scale.is_finite() && settings.scale > 0.0,
        "--scale must be a positive number, got {}",
        settings.scale
    );
    ensure!(settings.face_size != Some(0), "--face-size must be > 0");
    validate_extension(&settings.extension)?;

    let files = super::collect_inputs(&args.input)?;
    info!(files = files.len(), "Starting cubemap conversion");

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", settings.output_dir.display())
    })?;

    let results: Vec<(PathBuf, Result<()>)> = files
        .par_iter()
        .map(|input| (input.clone(), process_file(input, &settings, verbose)))
        .collect();

    super::report(results)
}

/// `min(w, h) / 2 * scale` on the source as loaded.
///
/// The face limit of the guard is applied later by the projector.
fn face_size_for(width: u32, height: u32, scale: f64) -> u32 {
    ((width.min(height) / 2) as f64 * scale) as u32
}

fn process_file(input: &Path, settings: &Settings, verbose: u8) -> Result<()> {
    let image = super::load_image(input)?;
    let face_size = settings
        .face_size
        .unwrap_or_else(|| face_size_for(image.width(), image.height(), settings.scale));
    debug!(input = %input.display(), face_size, "cubemap face size");

    let cubemap = cubemap_project(&image, face_size, &settings.guard)
        .with_context(|| format!("Cubemap projection failed: {}", input.display()))?;
    super::warn_adjustments(input, cubemap.adjustments());

    let stem = super::output_stem(input);
    for (face, img) in cubemap.faces() {
        let out = settings
            .output_dir
            .join(format!("{stem}_{}.{}", face.name(), settings.extension));
        let img = if settings.mirror {
            Cow::Owned(flip_h(img))
        } else {
            Cow::Borrowed(img)
        };
        if verbose > 0 {
            println!("{} -> {}", input.display(), out.display());
        }
        super::save_image(&out, &img, settings.quality)?;
    }

    info!(input = %input.display(), face_size = cubemap.face_size(), "cubemap written");
    Ok(())
}
