use crate::config::{self, KEYS};
use clap::Subcommand;
use courtlog_ledger::{CourtlogPaths, WorkspaceLock};

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (e.g. no_ad, tiebreak_target)
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, paths: &CourtlogPaths) -> anyhow::Result<()> {
    if !paths.is_initialized() {
        anyhow::bail!("No .courtlog/ workspace found. Run `courtlog init` first.");
    }
    match cmd {
        ConfigCmd::Set { key, value } => set(paths, &key, &value),
        ConfigCmd::Get { key } => get(paths, &key),
        ConfigCmd::List => list(paths),
    }
}

// ── Command Implementations ──

/// `courtlog config set <key> <value>`
fn set(paths: &CourtlogPaths, key: &str, value: &str) -> anyhow::Result<()> {
    let _lock = WorkspaceLock::acquire(paths)?;
    let mut cfg = config::load(&paths.config_json)?;
    cfg.set(key, value)?;
    config::save(&paths.config_json, &cfg)?;
    println!("{key} = {value}");
    if matches!(key, "no_ad" | "tiebreak_target") {
        println!("  (applies from the next `courtlog reset`)");
    }
    Ok(())
}

/// `courtlog config get <key>`
fn get(paths: &CourtlogPaths, key: &str) -> anyhow::Result<()> {
    let cfg = config::load(&paths.config_json)?;
    println!("{}", cfg.get(key)?);
    Ok(())
}

/// `courtlog config list`
fn list(paths: &CourtlogPaths) -> anyhow::Result<()> {
    let cfg = config::load(&paths.config_json)?;
    for key in KEYS {
        println!("{key} = {}", cfg.get(key)?);
    }
    Ok(())
}
