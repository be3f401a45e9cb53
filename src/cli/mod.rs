//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod palettes;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use palettes::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;
pub(crate) const EXIT_OUTPUT_EXISTS: u8 = 3;
pub(crate) const EXIT_INPUT_NOT_FOUND: u8 = 4;
pub(crate) const EXIT_DECODE_FAILED: u8 = 5;
pub(crate) const EXIT_CONFIG: u8 = 6;
pub(crate) const EXIT_HEIGHT_MISMATCH: u8 = 7;

/// hexsprite - Compile bitmaps into palette-indexed sprite literals
#[derive(Parser)]
#[command(name = "hexsprite")]
#[command(about = "hexsprite - Compile bitmap images into `img` sprite literals for block-based game editors")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert bitmap files into one generated sprite source file
    Convert {
        /// Bitmap files to convert, in output order.
        /// If omitted: [input].sources from hexsprite.toml
        inputs: Vec<PathBuf>,

        /// Output file (.js or .ts, default: sprite.js)
        #[arg(short, long, conflicts_with = "overwrite")]
        output: Option<PathBuf>,

        /// Overwrite the output file, optionally naming it
        #[arg(short = 'O', long, value_name = "OUTPUT", num_args = 0..=1)]
        overwrite: Option<Option<PathBuf>>,

        /// Built-in palette to match against (see `hexsprite palettes list`)
        #[arg(long)]
        palette: Option<String>,

        /// Downsample images larger than this in either dimension (default: 50)
        #[arg(long)]
        max_dim: Option<u32>,

        /// Distance from pure black below which pixels map to index 0 (default: 10)
        #[arg(long)]
        black_threshold: Option<f64>,

        /// Config file (default: nearest hexsprite.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List and inspect built-in palettes
    Palettes {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexsprite=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Convert {
            inputs,
            output,
            overwrite,
            palette,
            max_dim,
            black_threshold,
            config,
        } => {
            let overrides = crate::config::CliOverrides {
                output: output.or_else(|| overwrite.clone().flatten()),
                overwrite: overwrite.is_some().then_some(true),
                palette,
                max_dim,
                black_threshold,
            };
            convert::run_convert(&inputs, config.as_deref(), &overrides)
        }
        Commands::Palettes { action } => palettes::run_palettes(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overwrite_without_value() {
        let cli = Cli::try_parse_from(["hexsprite", "convert", "a.png", "-O"]).unwrap();
        match cli.command {
            Commands::Convert { inputs, overwrite, output, .. } => {
                assert_eq!(inputs, vec![PathBuf::from("a.png")]);
                assert_eq!(overwrite, Some(None));
                assert_eq!(output, None);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_overwrite_with_value() {
        let cli =
            Cli::try_parse_from(["hexsprite", "convert", "a.png", "b.png", "-O", "out.js"]).unwrap();
        match cli.command {
            Commands::Convert { inputs, overwrite, .. } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(overwrite, Some(Some(PathBuf::from("out.js"))));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_output_and_overwrite_conflict() {
        let result =
            Cli::try_parse_from(["hexsprite", "convert", "a.png", "-o", "x.js", "-O", "y.js"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quantize_flags() {
        let cli = Cli::try_parse_from([
            "hexsprite",
            "convert",
            "a.png",
            "--palette",
            "pico8",
            "--max-dim",
            "32",
            "--black-threshold",
            "4.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert { palette, max_dim, black_threshold, .. } => {
                assert_eq!(palette.as_deref(), Some("pico8"));
                assert_eq!(max_dim, Some(32));
                assert_eq!(black_threshold, Some(4.5));
            }
            _ => panic!("expected convert"),
        }
    }
}
