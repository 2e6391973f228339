use anyhow::{Context, Result};
use clap::ValueEnum;
use comptes_core::DEFAULT_YEAR_WINDOW;
use comptes_finance::NumberLocale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{comptes_home, ensure_comptes_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSection {
    /// Fiscal years shown, newest first
    pub years: usize,
    /// Show amounts in thousands
    pub thousands: bool,
    pub locale: NumberLocale,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSection {
    /// `EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEAR_WINDOW,
            thousands: false,
            locale: NumberLocale::Catalan,
            format: OutputFormat::Table,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(comptes_home()?.join("config.toml"))
}

/// Load the user config; a missing file yields defaults.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_comptes_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let origin = if p.exists() { "file" } else { "defaults" };
    println!("# {} ({})", p.display(), origin);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
