//! Configuration loading and discovery for `hexsprite.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{ConfigValidationError, SpriteConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "hexsprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<ConfigValidationError>),
    /// Invalid glob pattern in `input.sources`
    #[error("Invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override artifact path
    pub output: Option<PathBuf>,
    /// Force overwriting an existing artifact
    pub overwrite: Option<bool>,
    /// Override palette (built-in name)
    pub palette: Option<String>,
    /// Override downsampling bound
    pub max_dim: Option<u32>,
    /// Override near-black threshold
    pub black_threshold: Option<f64>,
}

/// Find hexsprite.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for hexsprite.toml
/// 2. Check XDG_CONFIG_HOME/hexsprite/hexsprite.toml (or ~/.config/hexsprite/hexsprite.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find hexsprite.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("hexsprite").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find hexsprite.toml by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// A resolved configuration and the file it came from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: SpriteConfig,
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory that relative paths in the configuration resolve against.
    pub fn root(&self) -> &Path {
        self.path.as_deref().and_then(project_root).unwrap_or(Path::new("."))
    }
}

/// Load configuration, apply CLI overrides, then validate the result.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, the defaults are
/// used. Overrides are merged before validation, so a flag can replace an
/// invalid file value.
pub fn load_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<LoadedConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    let mut config = match &config_path {
        Some(p) => parse_config_file(p)?,
        None => SpriteConfig::default(),
    };
    merge_cli_overrides(&mut config, overrides);
    check(&config)?;

    Ok(LoadedConfig { config, path: config_path })
}

/// Read and parse a config file without validating it.
pub fn parse_config_file(path: &Path) -> Result<SpriteConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: SpriteConfig = toml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Turn validation errors into a [`ConfigError`].
pub fn check(config: &SpriteConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }
    Ok(())
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. A palette name on
/// the command line replaces any explicit color list from the file.
pub fn merge_cli_overrides(config: &mut SpriteConfig, overrides: &CliOverrides) {
    if let Some(ref output) = overrides.output {
        config.output.path = output.clone();
    }

    if let Some(overwrite) = overrides.overwrite {
        config.output.overwrite = overwrite;
    }

    if let Some(ref palette) = overrides.palette {
        config.palette.builtin = palette.clone();
        config.palette.colors = None;
    }

    if let Some(max_dim) = overrides.max_dim {
        config.quantize.max_dim = max_dim;
    }

    if let Some(black_threshold) = overrides.black_threshold {
        config.quantize.black_threshold = black_threshold;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Expand `input.sources` glob patterns relative to `root`.
///
/// Matches are regular files, sorted per pattern, in pattern order.
/// Glob metacharacters in `root` itself match literally.
pub fn expand_sources(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, ConfigError> {
    let escaped_root = PathBuf::from(glob::Pattern::escape(&root.to_string_lossy()));
    let mut files = Vec::new();
    for pattern in patterns {
        let full = resolve_path(&escaped_root, Path::new(pattern));
        let paths = glob::glob(&full.to_string_lossy())
            .map_err(|source| ConfigError::Pattern { pattern: pattern.clone(), source })?;
        let mut matched: Vec<PathBuf> =
            paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
        matched.sort();
        for path in matched {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[quantize]\nmax_dim = 16\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("art").join("tiles");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("hexsprite");
        fs::create_dir_all(&dir).unwrap();
        let config_path = write_config(&dir, "");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r#"
[palette]
builtin = "grayscale"

[quantize]
max_dim = 24

[output]
path = "out/sprites.js"
"#,
        );

        let loaded = load_config(Some(&config_path), &CliOverrides::default())
            .expect("should load valid config");
        let config = &loaded.config;
        assert_eq!(config.palette.builtin, "grayscale");
        assert_eq!(config.quantize.max_dim, 24);
        assert_eq!(config.quantize.black_threshold, 10.0);
        assert_eq!(config.output.path, PathBuf::from("out/sprites.js"));
        assert_eq!(loaded.path.as_deref(), Some(config_path.as_path()));
        assert_eq!(loaded.root(), temp.path());
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let missing = temp.path().join("nonexistent.toml");
        match load_config(Some(&missing), &CliOverrides::default()) {
            Err(e @ ConfigError::Io { .. }) => {
                assert!(e.to_string().contains("nonexistent.toml"), "{}", e);
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "this is not valid toml {{{");

        let result = load_config(Some(&config_path), &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[quantize]\nmax_dim = 0\n");

        match load_config(Some(&config_path), &CliOverrides::default()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.field == "quantize.max_dim"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_overrides_validated_after_merge() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[quantize]\nmax_dim = 0\n");

        let overrides = CliOverrides { max_dim: Some(8), ..Default::default() };
        let loaded = load_config(Some(&config_path), &overrides).expect("override fixes max_dim");
        assert_eq!(loaded.config.quantize.max_dim, 8);

        let overrides =
            CliOverrides { output: Some(PathBuf::from("sprite.txt")), ..Default::default() };
        match load_config(Some(&config_path), &overrides) {
            Err(ConfigError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["quantize.max_dim", "output.path"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_loaded_config_default_root() {
        let loaded = LoadedConfig { config: SpriteConfig::default(), path: None };
        assert_eq!(loaded.root(), Path::new("."));
    }

    #[test]
    fn test_parse_config_file_skips_validation() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[palette]\nbuiltin = \"nope\"\n");

        let config = parse_config_file(&config_path).expect("should parse");
        assert_eq!(config.palette.builtin, "nope");
        assert!(matches!(check(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config: SpriteConfig = toml::from_str(
            r##"
[palette]
colors = ["#000000", "#ffffff"]

[output]
path = "a.js"
"##,
        )
        .unwrap();

        let overrides = CliOverrides {
            output: Some(PathBuf::from("b.ts")),
            overwrite: Some(true),
            palette: Some("pico8".to_string()),
            max_dim: Some(16),
            black_threshold: None,
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.output.path, PathBuf::from("b.ts"));
        assert!(config.output.overwrite);
        assert_eq!(config.palette.builtin, "pico8");
        assert!(config.palette.colors.is_none());
        assert_eq!(config.quantize.max_dim, 16);
        assert_eq!(config.quantize.black_threshold, 10.0);
    }

    #[test]
    fn test_merge_empty_overrides_is_noop() {
        let mut config = SpriteConfig::default();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config, SpriteConfig::default());
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("art")), PathBuf::from("/project/art"));
        assert_eq!(resolve_path(root, Path::new("/abs/art")), PathBuf::from("/abs/art"));
    }

    #[test]
    fn test_expand_sources() {
        let temp = TempDir::new().expect("should create temp dir");
        let art = temp.path().join("art");
        fs::create_dir_all(art.join("sub")).unwrap();
        for name in ["b.png", "a.png", "notes.txt"] {
            fs::write(art.join(name), b"").unwrap();
        }
        fs::write(art.join("sub").join("c.png"), b"").unwrap();

        let files = expand_sources(
            temp.path(),
            &["art/*.png".to_string(), "art/**/*.png".to_string()],
        )
        .unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["art/a.png", "art/b.png", "art/sub/c.png"]);
    }

    #[test]
    fn test_expand_sources_root_with_glob_characters() {
        let temp = TempDir::new().expect("should create temp dir");
        let root = temp.path().join("game[1]");
        fs::create_dir_all(root.join("art")).unwrap();
        fs::write(root.join("art").join("a.png"), b"").unwrap();

        let files = expand_sources(&root, &["art/*.png".to_string()]).unwrap();
        assert_eq!(files, vec![root.join("art").join("a.png")]);
    }

    #[test]
    fn test_expand_sources_bad_pattern() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = expand_sources(temp.path(), &["art/[.png".to_string()]);
        assert!(matches!(result, Err(ConfigError::Pattern { .. })));
    }
}
