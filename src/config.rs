/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Problems are collected in `warnings` and logged once tracing is up.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub speed: SpeedConfig,
    pub layout: Option<PathBuf>,
    pub display: DisplayMode,
    pub log: LogConfig,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedConfig {
    pub tick_delay_ms: u64,
    pub final_pause_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Terminal, // crossterm, alternate screen
    Plain,    // frames printed as text
    None,     // report only
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_delay")]
    tick_delay_ms: u64,
    #[serde(default = "default_final_pause")]
    final_pause_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    layout: String,
    #[serde(default = "default_display")]
    display: DisplayMode,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default)]
    file: String,
}

// ── Defaults ──

fn default_tick_delay() -> u64 { 100 }
fn default_final_pause() -> u64 { 1500 }
fn default_display() -> DisplayMode { DisplayMode::Terminal }
fn default_log_level() -> String { "warn".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_delay_ms: default_tick_delay(),
            final_pause_ms: default_final_pause(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            layout: String::new(),
            display: default_display(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

// ── Loading ──

impl SimConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let mut warnings = vec![];
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        let mut cfg = SimConfig::from_toml(toml_cfg);
        cfg.warnings = warnings;
        cfg
    }

    /// Parse a config document. Unlike `load`, errors are returned.
    #[allow(dead_code)]
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(SimConfig::from_toml)
    }

    /// Command-line layout path wins over the config file.
    pub fn with_layout_override(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.layout = path;
        }
        self
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        SimConfig {
            speed: SpeedConfig {
                tick_delay_ms: toml_cfg.speed.tick_delay_ms,
                final_pause_ms: toml_cfg.speed.final_pause_ms,
            },
            layout: non_empty_path(&toml_cfg.general.layout),
            display: toml_cfg.general.display,
            log: LogConfig {
                level: toml_cfg.log.level,
                file: non_empty_path(&toml_cfg.log.file),
            },
            warnings: vec![],
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig::from_toml(TomlConfig::default())
    }
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    (!s.is_empty()).then(|| PathBuf::from(s))
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
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
            match read_toml(&path) {
                Ok(cfg) => return cfg,
                Err(msg) => {
                    warnings.push(msg);
                    return TomlConfig::default();
                }
            }
        }
    }
    TomlConfig::default()
}

fn read_toml(path: &Path) -> Result<TomlConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}; using default settings", path.display()))?;
    toml::from_str::<TomlConfig>(&text)
        .map_err(|e| format!("{} parse error: {e}; using default settings", path.display()))
}
