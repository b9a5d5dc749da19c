//! Perspective command

use crate::config::{validate_extension, validate_views, Config, ViewConfig};
use crate::PerspectiveArgs;
use anyhow::{Context, Result};
use pano_ops::{perspective_project, PerspectiveParams, SizeGuard};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

struct Settings {
    output_dir: PathBuf,
    guard: SizeGuard,
    /// One parameter set per view, already validated.
    views: Vec<(String, PerspectiveParams)>,
    extension: String,
    quality: u8,
}

pub fn run(args: PerspectiveArgs, config: &Config, verbose: u8) -> Result<()> {
    trace!(inputs = args.input.len(), output = %args.output.display(), "perspective::run");

    let defaults = &config.perspective;
    let base = PerspectiveParams {
        fov_h: args.fov_h.unwrap_or(defaults.fov_h),
        fov_v: args.fov_v.unwrap_or(defaults.fov_v),
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
        ..PerspectiveParams::default()
    };

    let views: &[ViewConfig] = if args.views.is_empty() {
        &defaults.views
    } else {
        &args.views
    };
    validate_views(views)?;
    let views = views
        .iter()
        .map(|v| {
            let params = base.with_orientation(v.heading, v.pitch);
            params
                .validate()
                .with_context(|| format!("Invalid view {:?}", v.name))?;
            Ok((v.name.clone(), params))
        })
        .collect::<Result<Vec<_>>>()?;

    let settings = Settings {
        guard: SizeGuard::new(args.max_dimension.unwrap_or(config.max_dimension))?,
        views,
        extension: args.format.unwrap_or_else(|| config.output.extension.clone()),
        quality: config.output.jpeg_quality,
        output_dir: args.output,
    };
    validate_extension(&settings.extension)?;

    let files = super::collect_inputs(&args.input)?;
    info!(files = files.len(), views = settings.views.len(), "Starting perspective rendering");

    let results: Vec<(PathBuf, Result<()>)> = files
        .par_iter()
        .map(|input| (input.clone(), process_file(input, &settings, verbose)))
        .collect();

    super::report(results)
}

fn process_file(input: &Path, settings: &Settings, verbose: u8) -> Result<()> {
    let image = super::load_image(input)?;
    let stem = super::output_stem(input);

    for (name, params) in &settings.views {
        let view = perspective_project(&image, params, &settings.guard)
            .with_context(|| format!("Perspective view {name:?} failed: {}", input.display()))?;
        super::warn_adjustments(input, view.adjustments());

        if view.image().data().iter().all(|&v| v == 0.0) {
            warn!(input = %input.display(), view = %name, "view is entirely black, not written");
            continue;
        }

        let dir = settings.output_dir.join(name);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        let out = dir.join(format!("{stem}_{name}_view.{}", settings.extension));
        if verbose > 0 {
            println!("{} -> {}", input.display(), out.display());
        }
        super::save_image(&out, view.image(), settings.quality)?;
    }

    info!(input = %input.display(), "perspective views written");
    Ok(())
}
