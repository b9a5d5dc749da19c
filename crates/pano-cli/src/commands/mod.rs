//! CLI command implementations

pub mod cubemap;
pub mod perspective;

use anyhow::{bail, Context, Result};
use pano_core::Image;
use pano_io::Format;
use pano_ops::SizeAdjustment;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Expands files, directories and glob patterns into image paths.
///
/// Directories are scanned non-recursively for known image extensions.
/// Duplicates are dropped.
pub fn collect_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to list: {}", path.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && Format::is_image_extension(p))
                .collect();
            entries.sort();
            debug!(dir = %path.display(), files = entries.len(), "scanned directory");
            found.extend(entries);
        } else if path.is_file() {
            found.push(path.to_path_buf());
        } else {
            let matches: Vec<PathBuf> = glob::glob(pattern)
                .with_context(|| format!("Bad glob pattern: {pattern}"))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            if matches.is_empty() {
                warn!(pattern = %pattern, "no files match");
            }
            found.extend(matches);
        }
    }

    let mut seen = HashSet::new();
    found.retain(|p| seen.insert(p.clone()));

    if found.is_empty() {
        bail!("No input images found in: {}", patterns.join(", "));
    }
    Ok(found)
}

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    pano_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image, quality: u8) -> Result<()> {
    pano_io::write_with_quality(path, image, quality)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// File stem used to name outputs.
pub fn output_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into())
}

/// Surfaces every size clamp a projection applied.
pub fn warn_adjustments(input: &Path, adjustments: &[SizeAdjustment]) {
    for adj in adjustments {
        warn!(input = %input.display(), "{adj}");
    }
}

/// Prints per-file errors and the summary; fails if any file failed.
pub fn report(results: Vec<(PathBuf, Result<()>)>) -> Result<()> {
    let mut success = 0;
    let mut failed = 0;
    for (input, r) in results {
        match r {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}: {:#}", input.display(), e);
            }
        }
    }

    info!(success = success, failed = failed, "Batch processing complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }
    Ok(())
}
