/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Problems are collected in `warnings` rather than printed, since the
/// terminal belongs to the game; `main` logs them once tracing is up.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub quit_key: u8,
    pub seed: Option<u64>,
    pub log: LogConfig,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub tile_width: i32,
    pub tile_height: i32,
    pub pan_border: i32,
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub max_catch_up: u32,
    pub fruit_label: Duration,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    maze: TomlMaze,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_tile_width")]
    tile_width: i32,
    #[serde(default = "default_tile_height")]
    tile_height: i32,
    #[serde(default = "default_pan_border")]
    pan_border: i32,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_max_catch_up")]
    max_catch_up: u32,
    #[serde(default = "default_fruit_label")]
    fruit_label_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_quit_key")]
    quit_key: String,
}

#[derive(Deserialize, Debug, Default)]
struct TomlMaze {
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_tile_width() -> i32 { 6 }
fn default_tile_height() -> i32 { 4 }
fn default_pan_border() -> i32 { 5 }
fn default_max_catch_up() -> u32 { 8 }
fn default_fruit_label() -> u64 { 1500 }
fn default_quit_key() -> String { "`".into() }
fn default_log_file() -> String { "mazegame.log".into() }
fn default_log_level() -> String { "info".into() }

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            tile_width: default_tile_width(),
            tile_height: default_tile_height(),
            pan_border: default_pan_border(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            max_catch_up: default_max_catch_up(),
            fruit_label_ms: default_fruit_label(),
        }
    }
}

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput { quit_key: default_quit_key() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: default_log_file(), level: default_log_level() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        let mut warnings = vec![];
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        GameConfig::resolve(toml_cfg, warnings)
    }

    pub fn from_toml_str(text: &str) -> Self {
        let mut warnings = vec![];
        let toml_cfg = toml::from_str::<TomlConfig>(text).unwrap_or_else(|e| {
            warnings.push(format!("config.toml parse error: {e}"));
            TomlConfig::default()
        });
        GameConfig::resolve(toml_cfg, warnings)
    }

    fn resolve(toml_cfg: TomlConfig, mut warnings: Vec<String>) -> Self {
        let quit_key = match toml_cfg.input.quit_key.as_bytes() {
            [b] if b.is_ascii() && *b != 0x1b && *b != b'[' => *b,
            _ => {
                warnings.push(format!(
                    "quit_key {:?} must be one ASCII character other than ESC or '['; using '`'",
                    toml_cfg.input.quit_key
                ));
                b'`'
            }
        };

        let d = toml_cfg.display;
        if d.tile_width < 2 || d.tile_height < 2 {
            warnings.push(format!("tile size {}x{} is below 2x2; clamped", d.tile_width, d.tile_height));
        }
        let mut max_catch_up = toml_cfg.timing.max_catch_up;
        if max_catch_up == 0 {
            warnings.push("max_catch_up must be at least 1; using 1".into());
            max_catch_up = 1;
        }

        GameConfig {
            display: DisplayConfig {
                tile_width: d.tile_width.max(2),
                tile_height: d.tile_height.max(2),
                pan_border: d.pan_border.max(0),
            },
            timing: TimingConfig {
                max_catch_up,
                fruit_label: Duration::from_millis(toml_cfg.timing.fruit_label_ms),
            },
            quit_key,
            seed: toml_cfg.maze.seed,
            log: LogConfig {
                file: PathBuf::from(toml_cfg.log.file),
                level: toml_cfg.log.level,
            },
            warnings,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        warnings.push(format!("{}: parse error, using defaults: {e}", path.display()));
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
    }
    TomlConfig::default()
}
