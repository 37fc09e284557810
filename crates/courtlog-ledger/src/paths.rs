use std::path::{Path, PathBuf};

/// All well-known paths under `.courtlog/`.
#[derive(Debug, Clone)]
pub struct CourtlogPaths {
    pub root: PathBuf,
    pub courtlog_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub lock_file: PathBuf,
    pub config_json: PathBuf,
    pub session_json: PathBuf,
}

impl CourtlogPaths {
    /// Derive all paths from a workspace root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let courtlog_dir = root.join(".courtlog");
        Self {
            logs_dir: courtlog_dir.join("logs"),
            lock_file: courtlog_dir.join("LOCK"),
            config_json: courtlog_dir.join("config.json"),
            session_json: courtlog_dir.join("session.json"),
            courtlog_dir,
            root,
        }
    }

    /// Create all required directories. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.logs_dir)?;
        Ok(())
    }

    /// Check whether `.courtlog/` exists.
    pub fn is_initialized(&self) -> bool {
        self.courtlog_dir.is_dir()
    }

    /// Walk up from `start` looking for a directory containing `.courtlog/`.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut cur = start.to_path_buf();
        loop {
            if cur.join(".courtlog").is_dir() {
                return Some(cur);
            }
            if !cur.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = CourtlogPaths::discover("/tmp/club");
        assert_eq!(p.courtlog_dir, PathBuf::from("/tmp/club/.courtlog"));
        assert_eq!(p.logs_dir, PathBuf::from("/tmp/club/.courtlog/logs"));
        assert_eq!(p.lock_file, PathBuf::from("/tmp/club/.courtlog/LOCK"));
        assert_eq!(p.config_json, PathBuf::from("/tmp/club/.courtlog/config.json"));
        assert_eq!(
            p.session_json,
            PathBuf::from("/tmp/club/.courtlog/session.json")
        );
    }

    #[test]
    fn ensure_layout_and_find_root() {
        let tmp = tempfile::tempdir().unwrap();
        let p = CourtlogPaths::discover(tmp.path());
        assert!(!p.is_initialized());
        p.ensure_layout().unwrap();
        assert!(p.is_initialized());
        assert!(p.logs_dir.is_dir());

        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(CourtlogPaths::find_root(&nested), Some(tmp.path().to_path_buf()));
    }
}
