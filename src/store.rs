use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::record::Record;

/// One CSV file per category under `data_dir`.
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DatasetStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn path(&self, category_name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", category_name))
    }

    /// Previously persisted records, or an empty list if the file is missing
    /// or cannot be parsed.
    pub fn load(&self, category_name: &str) -> Vec<Record> {
        let path = self.path(category_name);
        if !path.exists() {
            return Vec::new();
        }
        match read_csv(&path) {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to read existing data {:?}: {:#}", path, e);
                Vec::new()
            }
        }
    }

    /// Replace the category's file with `records`. The new content is written
    /// to a sibling temp file first and renamed into place, so a failed write
    /// leaves the old file intact. Returns `false` when there was nothing to
    /// save.
    pub fn save(&self, category_name: &str, records: &[Record]) -> Result<bool> {
        let path = self.path(category_name);
        if records.is_empty() {
            info!("No data to save for {:?}", path);
            return Ok(false);
        }

        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("Failed to create {:?}", self.data_dir))?;

        let tmp = path.with_extension("csv.tmp");
        write_csv(&tmp, records).with_context(|| format!("Failed to write {:?}", tmp))?;
        fs::rename(&tmp, &path).with_context(|| format!("Failed to replace {:?}", path))?;

        info!("Saved {} records to {:?}", records.len(), path);
        Ok(true)
    }
}

fn read_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let records = reader.deserialize().collect::<csv::Result<Vec<Record>>>()?;
    Ok(records)
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rec(year: &str, p_id: &str, name: &str) -> Record {
        Record {
            cont_display_name: "Movie".to_string(),
            year: year.to_string(),
            p_id: p_id.to_string(),
            name: name.to_string(),
            score: "8.1".to_string(),
            content_style: "Drama".to_string(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        assert!(store.load("movie").is_empty());
    }

    #[test]
    fn writes_header_and_unix_newlines() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("data"));
        let saved = store
            .save("movie", &[rec("1993", "700001", "Farewell, My Concubine")])
            .unwrap();
        assert!(saved);

        let text = fs::read_to_string(store.path("movie")).unwrap();
        assert_eq!(
            text,
            "contDisplayName,year,pID,name,score,contentStyle\n\
             Movie,1993,700001,\"Farewell, My Concubine\",8.1,Drama\n"
        );
        assert!(!text.contains('\r'));
    }

    #[test]
    fn reload_returns_saved_records() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        let records = vec![rec("1993", "1", "霸王别姬"), rec("2001", "2", "Say \"hi\"")];
        store.save("movie", &records).unwrap();
        assert_eq!(store.load("movie"), records);
    }

    #[test]
    fn columns_are_matched_by_header() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("series.csv"),
            "year,pID,name\n2001,A,Alpha\n",
        )
        .unwrap();
        let store = DatasetStore::new(dir.path());
        let loaded = store.load("series");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].p_id, "A");
        assert_eq!(loaded[0].name, "Alpha");
        assert_eq!(loaded[0].score, "");
    }

    #[test]
    fn short_rows_keep_their_data() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("movie.csv"),
            "contDisplayName,year,pID,name,score,contentStyle\n\
             Movie,2001,A,Alpha,8,Drama\n\
             Movie,2002,B\n",
        )
        .unwrap();
        let store = DatasetStore::new(dir.path());
        let loaded = store.load("movie");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].content_style, "Drama");
        assert_eq!(loaded[1].p_id, "B");
        assert_eq!(loaded[1].name, "");
        assert_eq!(loaded[1].score, "");
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("movie.csv"), b"year,pID\n2001,\xff\xfe\n").unwrap();
        let store = DatasetStore::new(dir.path());
        assert!(store.load("movie").is_empty());
    }

    #[test]
    fn empty_dataset_leaves_existing_file() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        store.save("movie", &[rec("2001", "A", "x")]).unwrap();

        assert!(!store.save("movie", &[]).unwrap());
        assert_eq!(store.load("movie").len(), 1);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path());
        store.save("movie", &[rec("2001", "A", "x"), rec("2001", "B", "y")]).unwrap();
        store.save("movie", &[rec("1999", "C", "z")]).unwrap();

        let loaded = store.load("movie");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].p_id, "C");
        assert!(!dir.path().join("movie.csv.tmp").exists());
    }
}
