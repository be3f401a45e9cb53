//! Palettes command implementation

use clap::Subcommand;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::palettes;
use crate::suggest::{format_suggestion, suggest};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// List all built-in palettes
    List,
    /// Show the indexed colors of a built-in palette
    Show {
        /// Palette name (e.g., arcade or @arcade)
        name: String,
    },
}

/// Execute the palettes command
pub fn run_palettes(action: PaletteAction) -> ExitCode {
    match action {
        PaletteAction::List => {
            println!("Built-in palettes:");
            for name in palettes::list_builtins() {
                let marker = if name == palettes::DEFAULT_PALETTE { " (default)" } else { "" };
                println!("  @{}{}", name, marker);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { name } => {
            let palette_name = name.strip_prefix('@').unwrap_or(&name);
            match palettes::get_builtin(palette_name) {
                Some(palette) => {
                    println!("Palette: @{} ({} colors)", palette.name(), palette.len());
                    println!();
                    for (index, color) in palette.colors().iter().enumerate() {
                        println!("  {:x} {}", index, color);
                    }
                    ExitCode::from(EXIT_SUCCESS)
                }
                None => {
                    eprintln!("Error: Unknown palette '{}'", name);
                    let builtin_names = palettes::list_builtins();
                    if let Some(suggestion) =
                        format_suggestion(&suggest(palette_name, &builtin_names, 3))
                    {
                        eprintln!("{}", suggestion);
                    }
                    eprintln!();
                    eprintln!("Available palettes:");
                    for builtin_name in builtin_names {
                        eprintln!("  @{}", builtin_name);
                    }
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}
