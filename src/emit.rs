//! Sprite sets and the generated source artifact
//!
//! Output layout:
//!
//! ```text
//! // sprite.js
//! // generated file, do not edit
//! // run hexsprite to re-generate
//!
//! const hero = img`
//!  0 1
//!  2 8
//! `
//! ```

use crate::grid::Grid;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Error type for sprite set assembly and emission
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A grid's height differs from the first grid in the set
    #[error("\"{name}\" height ({height}) is different from \"{reference}\" height ({reference_height})")]
    HeightMismatch { name: String, height: u32, reference: String, reference_height: u32 },
    /// Two sprites share a name
    #[error("duplicate sprite name \"{0}\"")]
    DuplicateName(String),
    /// Failed writing the artifact
    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A grid with the identifier it is emitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGrid {
    pub name: String,
    pub grid: Grid,
}

/// Ordered, uniquely named grids destined for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteSet {
    sprites: Vec<NamedGrid>,
}

impl SpriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a grid. Names must be unique within the set.
    pub fn push(&mut self, name: impl Into<String>, grid: Grid) -> Result<(), EmitError> {
        let name = name.into();
        if self.sprites.iter().any(|s| s.name == name) {
            return Err(EmitError::DuplicateName(name));
        }
        self.sprites.push(NamedGrid { name, grid });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedGrid> {
        self.sprites.iter()
    }

    /// Every grid must be as tall as the first one.
    pub fn check_heights(&self) -> Result<(), EmitError> {
        let Some(first) = self.sprites.first() else {
            return Ok(());
        };
        let reference_height = first.grid.height();
        for sprite in &self.sprites[1..] {
            if sprite.grid.height() != reference_height {
                return Err(EmitError::HeightMismatch {
                    name: sprite.name.clone(),
                    height: sprite.grid.height(),
                    reference: first.name.clone(),
                    reference_height,
                });
            }
        }
        Ok(())
    }
}

/// Provenance comment block at the top of every artifact.
pub fn header(artifact_name: &str) -> String {
    format!(
        "// {}\n// generated file, do not edit\n// run hexsprite to re-generate\n\n",
        artifact_name
    )
}

/// Write one `const <name> = img` block.
fn write_block<W: Write>(sink: &mut W, sprite: &NamedGrid) -> io::Result<()> {
    writeln!(sink, "const {} = img`", sprite.name)?;
    for row in sprite.grid.rows() {
        writeln!(sink, "{}", row)?;
    }
    writeln!(sink, "`")
}

/// Write the artifact for `sprites` to `sink`.
///
/// The height check runs before anything is written.
pub fn emit<W: Write>(sink: &mut W, artifact_name: &str, sprites: &SpriteSet) -> Result<(), EmitError> {
    sprites.check_heights()?;
    let io_err = |source| EmitError::Io { path: artifact_name.to_string(), source };
    sink.write_all(header(artifact_name).as_bytes()).map_err(io_err)?;
    for sprite in sprites.iter() {
        write_block(sink, sprite).map_err(io_err)?;
    }
    Ok(())
}

/// Render the artifact into a string.
pub fn render(artifact_name: &str, sprites: &SpriteSet) -> Result<String, EmitError> {
    let mut buf = Vec::new();
    emit(&mut buf, artifact_name, sprites)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Replace the file at `path` with the artifact for `sprites`.
///
/// Nothing is created or truncated if the height check fails.
pub fn write_sprite_file(path: &Path, sprites: &SpriteSet) -> Result<(), EmitError> {
    let artifact_name =
        path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let content = render(&artifact_name, sprites)?;

    let io_err = |source| EmitError::Io { path: path.display().to_string(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    std::fs::write(path, content).map_err(io_err)
}
