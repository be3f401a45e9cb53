//! Convert command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{
    EXIT_CONFIG, EXIT_DECODE_FAILED, EXIT_ERROR, EXIT_HEIGHT_MISMATCH, EXIT_INPUT_NOT_FOUND,
    EXIT_INVALID_ARGS, EXIT_OUTPUT_EXISTS, EXIT_SUCCESS,
};
use crate::config::{expand_sources, load_config, resolve_path, CliOverrides, ConfigError};
use crate::convert::{convert_files, ConvertError};
use crate::emit::{write_sprite_file, EmitError};

/// Map a pipeline error to its exit code.
fn exit_code_for(err: &ConvertError) -> u8 {
    match err {
        ConvertError::Decode { .. } => EXIT_DECODE_FAILED,
        ConvertError::Emit(EmitError::HeightMismatch { .. }) => EXIT_HEIGHT_MISMATCH,
        ConvertError::Palette(_) | ConvertError::InvalidMaxDim(_) => EXIT_CONFIG,
        _ => EXIT_ERROR,
    }
}

/// Exit code for a configuration failure, printing it.
///
/// A bad output extension given on the command line is a usage error.
fn report_config_error(err: &ConfigError, overrides: &CliOverrides) -> u8 {
    match err {
        ConfigError::Validation(errors) => {
            for e in errors {
                eprintln!("Error: {}", e);
            }
            let from_cli = overrides.output.is_some();
            if from_cli && errors.len() == 1 && errors[0].field == "output.path" {
                EXIT_INVALID_ARGS
            } else {
                EXIT_CONFIG
            }
        }
        other => {
            eprintln!("Error: {}", other);
            EXIT_CONFIG
        }
    }
}

/// Execute the convert command
pub fn run_convert(
    inputs: &[PathBuf],
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let loaded = match load_config(config_path, overrides) {
        Ok(l) => l,
        Err(e) => return ExitCode::from(report_config_error(&e, overrides)),
    };
    let config = &loaded.config;

    let options = match config.convert_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    tracing::debug!(
        config = ?loaded.path,
        palette = options.quantizer().palette().name(),
        max_dim = options.max_dim(),
        black_threshold = options.quantizer().black_threshold(),
        "resolved settings"
    );

    // Relative paths from the file resolve against its directory.
    let root = loaded.root();

    let inputs = if inputs.is_empty() {
        match expand_sources(root, &config.input.sources) {
            Ok(found) => found,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_CONFIG);
            }
        }
    } else {
        inputs.to_vec()
    };

    if inputs.is_empty() {
        eprintln!("Error: no input images");
        eprintln!();
        eprintln!("Usage: hexsprite convert <image>... [-o <file>] [-O]");
        eprintln!("       or list [input].sources in hexsprite.toml");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let output_path = if overrides.output.is_some() {
        config.output.path.clone()
    } else {
        resolve_path(root, &config.output.path)
    };

    if output_path.exists() && !config.output.overwrite {
        eprintln!("Error: '{}' already exists, use -O to overwrite", output_path.display());
        return ExitCode::from(EXIT_OUTPUT_EXISTS);
    }

    for input in &inputs {
        if !input.is_file() {
            eprintln!("Error: Input file '{}' not found", input.display());
            return ExitCode::from(EXIT_INPUT_NOT_FOUND);
        }
    }

    let sprites = match convert_files(&inputs, &options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code_for(&e));
        }
    };

    if let Err(e) = write_sprite_file(&output_path, &sprites) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    tracing::info!(path = %output_path.display(), sprites = sprites.len(), "artifact written");
    println!("Wrote {} ({} sprites)", output_path.display(), sprites.len());
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValidationError;
    use crate::palette::PaletteError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&ConvertError::InvalidMaxDim(0)), EXIT_CONFIG);
        assert_eq!(
            exit_code_for(&ConvertError::Palette(PaletteError::InvalidThreshold(-1.0))),
            EXIT_CONFIG
        );
        let mismatch = EmitError::HeightMismatch {
            name: "b".to_string(),
            height: 2,
            reference: "a".to_string(),
            reference_height: 3,
        };
        assert_eq!(exit_code_for(&ConvertError::Emit(mismatch)), EXIT_HEIGHT_MISMATCH);
        assert_eq!(
            exit_code_for(&ConvertError::Emit(EmitError::DuplicateName("a".to_string()))),
            EXIT_ERROR
        );
    }

    #[test]
    fn test_config_error_exit_codes() {
        let bad_ext = ConfigValidationError {
            field: "output.path".to_string(),
            message: "must end in .js or .ts".to_string(),
        };
        let from_cli = CliOverrides { output: Some(PathBuf::from("x.txt")), ..Default::default() };
        let err = ConfigError::Validation(vec![bad_ext.clone()]);
        assert_eq!(report_config_error(&err, &from_cli), EXIT_INVALID_ARGS);
        assert_eq!(report_config_error(&err, &CliOverrides::default()), EXIT_CONFIG);

        let max_dim = ConfigValidationError {
            field: "quantize.max_dim".to_string(),
            message: "must be a positive integer".to_string(),
        };
        let err = ConfigError::Validation(vec![max_dim, bad_ext]);
        assert_eq!(report_config_error(&err, &from_cli), EXIT_CONFIG);
    }
}
