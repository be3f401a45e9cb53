//! Configuration schema types for `hexsprite.toml`
//!
//! Defines the structure and validation rules for conversion settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_color, Color};
use crate::convert::ConvertOptions;
use crate::downsample::DEFAULT_MAX_DIM;
use crate::palette::{Palette, Quantizer, DEFAULT_BLACK_THRESHOLD, MAX_PALETTE_LEN};
use crate::palettes;
use crate::suggest::{format_suggestion, suggest};

/// Extensions the generated artifact may use
pub const OUTPUT_EXTENSIONS: &[&str] = &["js", "ts"];

/// Palette selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaletteConfig {
    /// Name of a built-in palette
    #[serde(default = "default_builtin")]
    pub builtin: String,
    /// Explicit ordered colors, slot 0 first. Takes precedence over `builtin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { builtin: default_builtin(), colors: None }
    }
}

fn default_builtin() -> String {
    palettes::DEFAULT_PALETTE.to_string()
}

/// Quantization parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantizeConfig {
    /// Images larger than this in either dimension are downsampled
    #[serde(default = "default_max_dim")]
    pub max_dim: u32,
    /// Pixels closer than this to pure black map to slot 0
    #[serde(default = "default_black_threshold")]
    pub black_threshold: f64,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self { max_dim: default_max_dim(), black_threshold: default_black_threshold() }
    }
}

fn default_max_dim() -> u32 {
    DEFAULT_MAX_DIM
}

fn default_black_threshold() -> f64 {
    DEFAULT_BLACK_THRESHOLD
}

/// Generated artifact settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Artifact path
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Replace an existing artifact
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path(), overwrite: false }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("sprite.js")
}

/// Inputs used when none are given on the command line
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InputConfig {
    /// Glob patterns, relative to the config file
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Complete hexsprite.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SpriteConfig {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub quantize: QuantizeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "quantize.max_dim")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hexsprite.toml: '{}' {}", self.field, self.message)
    }
}

impl SpriteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.resolve_palette() {
            errors.push(e);
        }

        if self.quantize.max_dim == 0 {
            errors.push(ConfigValidationError {
                field: "quantize.max_dim".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        let threshold = self.quantize.black_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            errors.push(ConfigValidationError {
                field: "quantize.black_threshold".to_string(),
                message: "must be a finite, non-negative number".to_string(),
            });
        }

        let ext = self.output.path.extension().and_then(|e| e.to_str());
        if !ext.is_some_and(|e| OUTPUT_EXTENSIONS.contains(&e)) {
            errors.push(ConfigValidationError {
                field: "output.path".to_string(),
                message: "must end in .js or .ts".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The palette selected by this configuration.
    pub fn resolve_palette(&self) -> Result<Palette, ConfigValidationError> {
        match &self.palette.colors {
            Some(entries) => {
                if entries.len() < 2 || entries.len() > MAX_PALETTE_LEN {
                    return Err(ConfigValidationError {
                        field: "palette.colors".to_string(),
                        message: format!("must list 2 to 16 colors, found {}", entries.len()),
                    });
                }
                let colors = entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        parse_color(entry).map_err(|e| ConfigValidationError {
                            field: format!("palette.colors[{}]", i),
                            message: format!("'{}': {}", entry, e),
                        })
                    })
                    .collect::<Result<Vec<Color>, _>>()?;
                Palette::new("custom", colors).map_err(|e| ConfigValidationError {
                    field: "palette.colors".to_string(),
                    message: e.to_string(),
                })
            }
            None => {
                let name = self.palette.builtin.strip_prefix('@').unwrap_or(&self.palette.builtin);
                palettes::get_builtin(name).ok_or_else(|| {
                    let mut message = format!("unknown built-in palette '{}'", name);
                    let names = palettes::list_builtins();
                    if let Some(hint) = format_suggestion(&suggest(name, &names, 3)) {
                        message.push_str(". ");
                        message.push_str(&hint);
                    }
                    ConfigValidationError { field: "palette.builtin".to_string(), message }
                })
            }
        }
    }

    /// Pipeline settings for this configuration.
    pub fn convert_options(&self) -> Result<ConvertOptions, ConfigValidationError> {
        let palette = self.resolve_palette()?;
        let quantizer = Quantizer::new(palette, self.quantize.black_threshold).map_err(|e| {
            ConfigValidationError {
                field: "quantize.black_threshold".to_string(),
                message: e.to_string(),
            }
        })?;
        ConvertOptions::new(quantizer, self.quantize.max_dim).map_err(|e| ConfigValidationError {
            field: "quantize.max_dim".to_string(),
            message: e.to_string(),
        })
    }
}
