use crate::config::{self, CourtlogConfig};
use crate::session::Session;
use courtlog_ledger::CourtlogPaths;
use std::path::Path;

pub fn execute(root: &Path, no_ad: bool, tiebreak_target: Option<u32>) -> anyhow::Result<()> {
    let paths = CourtlogPaths::discover(root);

    if paths.is_initialized() {
        paths.ensure_layout()?;
        println!("Already initialized at {}", paths.courtlog_dir.display());
        return Ok(());
    }

    paths.ensure_layout()?;

    let mut cfg = CourtlogConfig {
        no_ad,
        ..CourtlogConfig::default()
    };
    if let Some(target) = tiebreak_target {
        cfg.set("tiebreak_target", &target.to_string())?;
    }
    config::save(&paths.config_json, &cfg)?;

    let session = Session::open(paths)?;
    session.save()?;

    println!(
        "Initialized {} ({} scoring, tiebreak to {})",
        session.paths.courtlog_dir.display(),
        if cfg.no_ad { "no-ad" } else { "advantage" },
        cfg.tiebreak_target
    );
    println!("  log partition: {}", session.log.partition());
    Ok(())
}
