use crate::error::LogError;
use anyhow::Context;
use crate::record::{Column, PointRecord};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable storage for date partitions of the point log.
///
/// Partitions are addressed by file name. A partition that does not exist
/// reads as `None`; appending to it creates it with the header row first.
pub trait PartitionStore {
    fn read_rows(&self, partition: &str) -> Result<Option<Vec<PointRecord>>, LogError>;

    fn append_row(&mut self, partition: &str, record: &PointRecord) -> Result<(), LogError>;

    /// Replace a partition's data rows. The header is always rewritten.
    fn rewrite(&mut self, partition: &str, rows: &[PointRecord]) -> Result<(), LogError>;
}

/// One CSV file per partition inside a directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
    fsync: bool,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fsync: false,
        }
    }

    /// Sync every append to disk before returning.
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, partition: &str) -> PathBuf {
        self.dir.join(partition)
    }
}

impl PartitionStore for CsvStore {
    fn read_rows(&self, partition: &str) -> Result<Option<Vec<PointRecord>>, LogError> {
        let path = self.path_of(partition);
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| LogError::csv(&path, e))?;
        let mut rows = Vec::new();
        for row in reader.deserialize::<PointRecord>() {
            rows.push(row.map_err(|e| LogError::csv(&path, e))?);
        }
        Ok(Some(rows))
    }

    fn append_row(&mut self, partition: &str, record: &PointRecord) -> Result<(), LogError> {
        fs::create_dir_all(&self.dir).map_err(|e| LogError::storage(&self.dir, e))?;
        let path = self.path_of(partition);
        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogError::storage(&path, e))?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&file);
            if is_new {
                writer
                    .write_record(Column::header())
                    .map_err(|e| LogError::csv(&path, e))?;
            }
            writer
                .write_record(record.values())
                .map_err(|e| LogError::csv(&path, e))?;
            writer.flush().map_err(|e| LogError::storage(&path, e))?;
        }
        if self.fsync {
            file.sync_all().map_err(|e| LogError::storage(&path, e))?;
        }
        Ok(())
    }

    fn rewrite(&mut self, partition: &str, rows: &[PointRecord]) -> Result<(), LogError> {
        fs::create_dir_all(&self.dir).map_err(|e| LogError::storage(&self.dir, e))?;
        let path = self.path_of(partition);
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| LogError::storage(&path, e))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut tmp);
            writer
                .write_record(Column::header())
                .map_err(|e| LogError::csv(&path, e))?;
            for row in rows {
                writer
                    .write_record(row.values())
                    .map_err(|e| LogError::csv(&path, e))?;
            }
            writer.flush().map_err(|e| LogError::storage(&path, e))?;
        }
        tmp.flush().map_err(|e| LogError::storage(&path, e))?;
        tmp.persist(&path)
            .map_err(|e| LogError::storage(&path, e.error))?;
        Ok(())
    }
}

/// Replace `path` with `data` through a sibling temp file and a rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(".courtlog-")
        .tempfile_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(notes: &str) -> PointRecord {
        PointRecord {
            point_id: "1".to_string(),
            server: "n".to_string(),
            notes: notes.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_partition_reads_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CsvStore::new(tmp.path());
        assert!(store.read_rows("log_20260101.csv").unwrap().is_none());
    }

    #[test]
    fn first_append_writes_header() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(tmp.path().join("logs"));
        store.append_row("p.csv", &record("a")).unwrap();
        store.append_row("p.csv", &record("b")).unwrap();

        let content = fs::read_to_string(store.path_of("p.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("point_id,timestamp,set_no"));
        assert!(lines[1].ends_with(",a"));

        let rows = store.read_rows("p.csv").unwrap().unwrap();
        assert_eq!(rows, vec![record("a"), record("b")]);
    }

    #[test]
    fn notes_with_commas_and_quotes_survive() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(tmp.path()).with_fsync(true);
        let r = record("deep, heavy \"kick\" serve\nthen volley");
        store.append_row("p.csv", &r).unwrap();
        assert_eq!(store.read_rows("p.csv").unwrap().unwrap(), vec![r]);
    }

    #[test]
    fn rewrite_keeps_header_when_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = CsvStore::new(tmp.path());
        store.append_row("p.csv", &record("a")).unwrap();
        store.rewrite("p.csv", &[]).unwrap();
        let content = fs::read_to_string(store.path_of("p.csv")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(store.read_rows("p.csv").unwrap().unwrap().is_empty());
    }

    #[test]
    fn reads_partition_written_without_timestamp_column() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CsvStore::new(tmp.path());
        fs::write(
            store.path_of("old.csv"),
            "point_id,set_no,server,notes\n42,1,o,legacy row\n",
        )
        .unwrap();
        let rows = store.read_rows("old.csv").unwrap().unwrap();
        assert_eq!(rows[0].point_id, "42");
        assert_eq!(rows[0].timestamp, "");
        assert_eq!(rows[0].notes, "legacy row");
    }

    #[test]
    fn write_atomic_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("session.json");
        write_atomic(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        write_atomic(&path, b"{\"a\":1}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
