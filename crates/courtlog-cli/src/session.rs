use crate::config::{self, CourtlogConfig};
use anyhow::{bail, Context};
use courtlog_core::{ScoreEngine, Side};
use courtlog_ledger::{
    write_atomic, Clock, CourtlogPaths, CsvStore, LogState, MatchLog, PointRecord, SystemClock,
    WorkspaceLock,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What `.courtlog/session.json` holds between invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    engine: ScoreEngine,
    #[serde(default)]
    log: LogState,
    /// Winner awarded for each live row, `None` for rows that were not scored.
    #[serde(default)]
    awarded: Vec<Option<Side>>,
    /// Same, for the rows on the log's redo stack.
    #[serde(default)]
    redo_awarded: Vec<Option<Side>>,
}

/// The live match: score engine and point log, driven together.
///
/// Holds the workspace lock for as long as it is alive.
pub struct Session<C: Clock = SystemClock> {
    pub paths: CourtlogPaths,
    pub config: CourtlogConfig,
    pub engine: ScoreEngine,
    pub log: MatchLog<CsvStore, C>,
    awarded: Vec<Option<Side>>,
    redo_awarded: Vec<Option<Side>>,
    _lock: WorkspaceLock,
}

impl Session<SystemClock> {
    pub fn open(paths: CourtlogPaths) -> anyhow::Result<Self> {
        Self::open_with_clock(paths, SystemClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn open_with_clock(paths: CourtlogPaths, clock: C) -> anyhow::Result<Self> {
        if !paths.is_initialized() {
            bail!("No .courtlog/ workspace found. Run `courtlog init` first.");
        }
        let lock = WorkspaceLock::acquire(&paths)?;
        let config = config::load(&paths.config_json)?;

        let file: SessionFile = if paths.session_json.exists() {
            let content = std::fs::read_to_string(&paths.session_json)
                .with_context(|| format!("reading {}", paths.session_json.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", paths.session_json.display()))?
        } else {
            SessionFile {
                engine: ScoreEngine::new(config.match_config()),
                log: LogState::default(),
                awarded: Vec::new(),
                redo_awarded: Vec::new(),
            }
        };

        let store = CsvStore::new(&paths.logs_dir).with_fsync(config.fsync);
        let log = MatchLog::resume(store, clock, config.log_base_name.clone(), file.log)?;
        debug!(partition = log.partition(), history = file.engine.history_len(), "session opened");

        Ok(Self {
            paths,
            config,
            engine: file.engine,
            log,
            awarded: file.awarded,
            redo_awarded: file.redo_awarded,
            _lock: lock,
        })
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let file = SessionFile {
            engine: self.engine.clone(),
            log: self.log.state(),
            awarded: self.awarded.clone(),
            redo_awarded: self.redo_awarded.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.paths.session_json, json.as_bytes())
            .with_context(|| format!("saving {}", self.paths.session_json.display()))
    }

    /// Log a point, then award it. The score is left alone if the write fails.
    pub fn record_point(
        &mut self,
        record: PointRecord,
        winner: Option<Side>,
    ) -> anyhow::Result<PointRecord> {
        let written = self.log.append(record)?;
        if let Some(side) = winner {
            self.engine.award_point(side);
        }
        self.awarded.push(winner);
        self.redo_awarded.clear();
        Ok(written)
    }

    /// Undo the last logged row and the score change that went with it.
    ///
    /// Only rows that were awarded pop a score frame. When the log has
    /// nothing left to remove the score is not touched either.
    pub fn undo(&mut self) -> anyhow::Result<Option<PointRecord>> {
        let Some(removed) = self.log.undo_last_append()? else {
            return Ok(None);
        };
        let winner = self.awarded.pop().flatten();
        if winner.is_some() {
            self.engine.undo();
        }
        self.redo_awarded.push(winner);
        Ok(Some(removed))
    }

    /// Restore the last undone row and re-award its point to the same side.
    pub fn redo(&mut self) -> anyhow::Result<Option<PointRecord>> {
        let Some(restored) = self.log.redo_last_append()? else {
            return Ok(None);
        };
        let winner = self.redo_awarded.pop().flatten();
        if let Some(side) = winner {
            self.engine.award_point(side);
        }
        self.awarded.push(winner);
        Ok(Some(restored))
    }

    /// Start a new match. Rows already logged stay, but nothing undone from
    /// the previous match can be redone into this one.
    pub fn new_match(&mut self) {
        let config = self.config.match_config();
        self.engine.reset_match(config);
        self.log.clear_redo();
        self.awarded.clear();
        self.redo_awarded.clear();
    }

    /// Scoreboard line using the configured player names.
    pub fn scoreboard(&self) -> String {
        let s = self.engine.score();
        format!(
            "Set {} | Sets {}-{} | Games {}-{} | {}",
            s.current_set,
            s.sets_a,
            s.sets_b,
            s.games_a,
            s.games_b,
            self.engine
                .current_score()
                .render(&self.config.name_a, &self.config.name_b)
        )
    }
}

/// Resolve the workspace from an explicit root or by walking up from cwd.
pub fn locate(root: Option<&std::path::Path>) -> anyhow::Result<CourtlogPaths> {
    let start = match root {
        Some(r) => r.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = CourtlogPaths::find_root(&start).unwrap_or(start);
    Ok(CourtlogPaths::discover(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{final_outcome, How};
    use courtlog_core::MatchScore;
    use courtlog_ledger::FixedClock;
    use time::macros::datetime;

    fn workspace() -> (tempfile::TempDir, CourtlogPaths) {
        let tmp = tempfile::tempdir().unwrap();
        let paths = CourtlogPaths::discover(tmp.path());
        paths.ensure_layout().unwrap();
        (tmp, paths)
    }

    fn clock() -> FixedClock {
        FixedClock::new(datetime!(2026-06-14 10:00:00 UTC))
    }

    fn point(winner: Side, notes: &str) -> PointRecord {
        PointRecord {
            server: "n".to_string(),
            final_outcome: final_outcome(winner, Some(How::Winner)),
            notes: notes.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn open_requires_init() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = CourtlogPaths::discover(tmp.path());
        let err = Session::open_with_clock(paths, clock()).err().unwrap();
        assert!(err.to_string().contains("courtlog init"));
    }

    #[test]
    fn second_session_is_locked_out() {
        let (_tmp, paths) = workspace();
        let _first = Session::open_with_clock(paths.clone(), clock()).unwrap();
        assert!(Session::open_with_clock(paths, clock()).is_err());
    }

    #[test]
    fn undo_keeps_score_and_log_in_lockstep() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        s.record_point(point(Side::A, "P1"), Some(Side::A)).unwrap();
        s.record_point(point(Side::A, "P2"), Some(Side::A)).unwrap();
        s.record_point(point(Side::B, "P3"), Some(Side::B)).unwrap();
        assert_eq!(s.engine.current_score().to_string(), "30 - 15");

        let removed = s.undo().unwrap().unwrap();
        assert_eq!(removed.notes, "P3");
        assert_eq!(s.engine.current_score().to_string(), "30 - 0");
        s.undo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        assert_eq!(s.log.records().unwrap().len(), s.engine.history_len());

        s.redo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "30 - 0");
        s.redo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "30 - 15");
        assert_eq!(s.log.records().unwrap().len(), s.engine.history_len());
        assert!(!s.log.can_redo());
    }

    #[test]
    fn undo_across_game_boundary_restores_points() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        for i in 0..4 {
            s.record_point(point(Side::A, &format!("p{i}")), Some(Side::A))
                .unwrap();
        }
        assert_eq!(s.engine.score().games_a, 1);
        s.undo().unwrap();
        assert_eq!(s.engine.score().games_a, 0);
        assert_eq!(s.engine.current_score().to_string(), "40 - 0");
    }

    #[test]
    fn branching_after_undo_drops_the_old_future() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        s.record_point(point(Side::A, "P1"), Some(Side::A)).unwrap();
        s.record_point(point(Side::A, "P2"), Some(Side::A)).unwrap();
        s.undo().unwrap();
        s.record_point(point(Side::B, "P2 new"), Some(Side::B)).unwrap();
        assert!(!s.log.can_redo());
        assert_eq!(s.redo().unwrap(), None);
        assert_eq!(s.engine.current_score().to_string(), "15 - 15");
    }

    #[test]
    fn winnerless_rows_do_not_touch_the_score() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        s.record_point(point(Side::A, "scored"), Some(Side::A)).unwrap();
        let note_only = PointRecord {
            notes: "let, replay".to_string(),
            ..Default::default()
        };
        s.record_point(note_only, None).unwrap();
        assert_eq!(s.engine.history_len(), 1);

        s.undo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        s.undo().unwrap();
        assert_eq!(*s.engine.score(), MatchScore::default());
    }

    #[test]
    fn overridden_outcome_text_does_not_decide_undo() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        let coded = PointRecord {
            final_outcome: "W".to_string(),
            ..Default::default()
        };
        s.record_point(coded, Some(Side::A)).unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");

        s.undo().unwrap();
        assert!(s.log.records().unwrap().is_empty());
        assert_eq!(*s.engine.score(), MatchScore::default());
        assert_eq!(s.engine.history_len(), 0);

        s.redo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
    }

    #[test]
    fn unscored_row_with_outcome_text_keeps_earlier_points() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        s.record_point(point(Side::A, "P1"), Some(Side::A)).unwrap();
        let unscored = PointRecord {
            final_outcome: "PtLost".to_string(),
            ..Default::default()
        };
        s.record_point(unscored, None).unwrap();

        s.undo().unwrap();
        assert_eq!(s.log.records().unwrap().len(), 1);
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");

        s.redo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        assert_eq!(s.engine.history_len(), 1);
    }

    #[test]
    fn undo_on_empty_partition_leaves_score_after_midnight() {
        let (_tmp, paths) = workspace();
        let c = FixedClock::new(datetime!(2026-06-14 23:59:50 UTC));
        let mut s = Session::open_with_clock(paths, &c).unwrap();
        s.record_point(point(Side::A, "late"), Some(Side::A)).unwrap();
        c.advance(time::Duration::minutes(1));
        s.record_point(point(Side::A, "early"), Some(Side::A)).unwrap();
        assert_eq!(s.log.partition(), "tennis_log_20260615.csv");

        assert_eq!(s.undo().unwrap().unwrap().notes, "early");
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        assert_eq!(s.undo().unwrap(), None);
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        assert_eq!(s.engine.history_len(), 1);
    }

    #[test]
    fn new_match_drops_redo_from_previous_match() {
        let (_tmp, paths) = workspace();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        s.record_point(point(Side::A, "old match"), Some(Side::A)).unwrap();
        s.undo().unwrap();
        assert!(s.log.can_redo());

        s.new_match();
        assert!(!s.log.can_redo());
        assert_eq!(s.redo().unwrap(), None);
        assert_eq!(*s.engine.score(), MatchScore::default());
        assert!(s.log.records().unwrap().is_empty());
    }

    #[test]
    fn state_survives_reopen() {
        let (_tmp, paths) = workspace();
        {
            let mut s = Session::open_with_clock(paths.clone(), clock()).unwrap();
            s.record_point(point(Side::A, "P1"), Some(Side::A)).unwrap();
            s.record_point(point(Side::A, "P2"), Some(Side::A)).unwrap();
            s.undo().unwrap();
            s.save().unwrap();
        }
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        assert_eq!(s.engine.current_score().to_string(), "15 - 0");
        assert!(s.log.can_redo());
        s.redo().unwrap();
        assert_eq!(s.engine.current_score().to_string(), "30 - 0");
        s.undo().unwrap();
        s.undo().unwrap();
        assert_eq!(*s.engine.score(), MatchScore::default());
        assert_eq!(s.engine.current_score().leader(), None);
    }

    #[test]
    fn scoreboard_uses_configured_names() {
        let (_tmp, paths) = workspace();
        let mut cfg = CourtlogConfig::default();
        cfg.set("name_b", "Rival").unwrap();
        config::save(&paths.config_json, &cfg).unwrap();
        let mut s = Session::open_with_clock(paths, clock()).unwrap();
        for side in [Side::A, Side::A, Side::A, Side::B, Side::B, Side::B, Side::B] {
            s.record_point(point(side, ""), Some(side)).unwrap();
        }
        assert_eq!(s.scoreboard(), "Set 1 | Sets 0-0 | Games 0-0 | Ad (Rival)");
    }
}
