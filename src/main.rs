//! hexsprite - Command-line tool for compiling bitmaps into sprite source files

use std::process::ExitCode;

use hexsprite::cli;

fn main() -> ExitCode {
    cli::run()
}
