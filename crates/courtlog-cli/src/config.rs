use anyhow::{bail, Context};
use courtlog_core::{MatchConfig, DEFAULT_TIEBREAK_TARGET};
use courtlog_ledger::{write_atomic, DEFAULT_BASE_NAME};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of `.courtlog/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CourtlogConfig {
    pub no_ad: bool,
    pub tiebreak_target: u32,
    pub log_base_name: String,
    pub fsync: bool,
    pub name_a: String,
    pub name_b: String,
}

impl Default for CourtlogConfig {
    fn default() -> Self {
        Self {
            no_ad: false,
            tiebreak_target: DEFAULT_TIEBREAK_TARGET,
            log_base_name: DEFAULT_BASE_NAME.to_string(),
            fsync: false,
            name_a: "Me".to_string(),
            name_b: "Opp".to_string(),
        }
    }
}

pub const KEYS: [&str; 6] = [
    "no_ad",
    "tiebreak_target",
    "log_base_name",
    "fsync",
    "name_a",
    "name_b",
];

impl CourtlogConfig {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            no_ad: self.no_ad,
            tiebreak_target: self.tiebreak_target,
        }
    }

    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        Ok(match key {
            "no_ad" => self.no_ad.to_string(),
            "tiebreak_target" => self.tiebreak_target.to_string(),
            "log_base_name" => self.log_base_name.clone(),
            "fsync" => self.fsync.to_string(),
            "name_a" => self.name_a.clone(),
            "name_b" => self.name_b.clone(),
            _ => bail!("unknown config key '{key}' (known: {})", KEYS.join(", ")),
        })
    }

    /// Set one key from its textual form. The config is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "no_ad" => self.no_ad = parse_bool(key, value)?,
            "fsync" => self.fsync = parse_bool(key, value)?,
            "tiebreak_target" => {
                let n: u32 = value
                    .parse()
                    .with_context(|| format!("{key} must be a positive integer"))?;
                if n == 0 {
                    bail!("{key} must be a positive integer");
                }
                self.tiebreak_target = n;
            }
            "log_base_name" => {
                if value.is_empty() || value.contains(['/', '\\']) {
                    bail!("{key} must be a plain file name prefix, got '{value}'");
                }
                self.log_base_name = value.to_string();
            }
            "name_a" => self.name_a = value.to_string(),
            "name_b" => self.name_b = value.to_string(),
            _ => bail!("unknown config key '{key}' (known: {})", KEYS.join(", ")),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("{key} must be true or false, got '{value}'"),
    }
}

/// Read config. Returns defaults if the file doesn't exist.
pub fn load(path: &Path) -> anyhow::Result<CourtlogConfig> {
    if !path.exists() {
        return Ok(CourtlogConfig::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn save(path: &Path, config: &CourtlogConfig) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    write_atomic(path, json.as_bytes())
}
