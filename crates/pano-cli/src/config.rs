//! YAML defaults for the CLI.
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```yaml
//! max_dimension: 8000
//! cubemap:
//!   scale: 1.5
//! perspective:
//!   fov_h: 90
//!   views:
//!     - { name: front, heading: 0 }
//!     - { name: up, heading: 0, pitch: 60 }
//! output:
//!   extension: png
//! ```

use anyhow::{bail, ensure, Context, Result};
use pano_io::Format;
use pano_ops::guard::DEFAULT_MAX_DIMENSION;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Largest allowed source side; cube faces get half of it.
    pub max_dimension: u32,
    /// Cubemap command defaults.
    pub cubemap: CubemapConfig,
    /// Perspective command defaults.
    pub perspective: PerspectiveConfig,
    /// Written file settings.
    pub output: OutputConfig,
}

/// Defaults for `pano cubemap`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubemapConfig {
    /// Face size = `min(w, h) / 2 * scale`.
    pub scale: f64,
    /// Mirror faces horizontally before writing.
    pub mirror: bool,
}

/// Defaults for `pano perspective`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerspectiveConfig {
    /// Horizontal field of view in degrees.
    pub fov_h: f64,
    /// Vertical field of view in degrees.
    pub fov_v: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Views rendered when none are given on the command line.
    pub views: Vec<ViewConfig>,
}

/// A named camera orientation in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// Sub-directory and file name part.
    pub name: String,
    /// Yaw; 0 is the panorama centre.
    pub heading: f64,
    /// Positive looks up.
    #[serde(default)]
    pub pitch: f64,
}

/// Settings for written images.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// File extension of written images.
    pub extension: String,
    /// JPEG quality 1-100.
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            cubemap: CubemapConfig::default(),
            perspective: PerspectiveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CubemapConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            mirror: true,
        }
    }
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            fov_h: 100.0,
            fov_v: 55.0,
            width: 1920,
            height: 1080,
            views: vec![
                ViewConfig::new("front", 0.0, 0.0),
                ViewConfig::new("right", 90.0, 0.0),
                ViewConfig::new("back", 180.0, 0.0),
                ViewConfig::new("left", -90.0, 0.0),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "jpg".into(),
            jpeg_quality: pano_io::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ViewConfig {
    /// Creates a view; angles in degrees.
    pub fn new(name: impl Into<String>, heading: f64, pitch: f64) -> Self {
        Self {
            name: name.into(),
            heading,
            pitch,
        }
    }
}

impl Config {
    /// Loads and validates a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses and validates YAML text. Empty text yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges, the output extension and view names.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_dimension > 0, "max_dimension must be > 0");
        ensure!(
            self.cubemap.scale.is_finite() && self.cubemap.scale > 0.0,
            "cubemap.scale must be a positive number, got {}",
            self.cubemap.scale
        );
        ensure!(
            (1..=100).contains(&self.output.jpeg_quality),
            "output.jpeg_quality must be within 1-100, got {}",
            self.output.jpeg_quality
        );
        validate_extension(&self.output.extension)?;
        validate_views(&self.perspective.views)
    }
}

/// Rejects extensions the writer cannot encode.
pub fn validate_extension(ext: &str) -> Result<()> {
    if !Format::from_extension(format!("out.{ext}")).is_supported() {
        bail!("unsupported output extension: {ext:?}");
    }
    Ok(())
}

/// View names become directory names, so they must be plain and unique.
pub fn validate_views(views: &[ViewConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for view in views {
        let name = view.name.as_str();
        ensure!(
            !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\']),
            "invalid view name: {name:?}"
        );
        ensure!(seen.insert(name), "duplicate view name: {name:?}");
        ensure!(
            view.heading.is_finite() && view.pitch.is_finite(),
            "view {name:?} has a non-finite angle"
        );
    }
    Ok(())
}

/// Parses `name=heading[,pitch]` as given to `--view`.
pub fn parse_view(s: &str) -> std::result::Result<ViewConfig, String> {
    let (name, angles) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=heading[,pitch], got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing view name in {s:?}"));
    }

    let mut parts = angles.split(',').map(str::trim);
    let parse = |v: &str, what: &str| {
        v.parse::<f64>()
            .map_err(|e| format!("bad {what} {v:?} in {s:?}: {e}"))
    };
    let heading = parse(parts.next().unwrap_or_default(), "heading")?;
    let pitch = match parts.next() {
        Some(p) => parse(p, "pitch")?,
        None => 0.0,
    };
    if parts.next().is_some() {
        return Err(format!("too many values in {s:?}"));
    }

    Ok(ViewConfig::new(name, heading, pitch))
}
