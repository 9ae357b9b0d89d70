use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use csv::{Reader, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SCHEDULE_SHEET: &str = "schedule";
pub const RESULTS_SHEET: &str = "results";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("worksheet i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("worksheet rows: {0}")]
    Csv(#[from] csv::Error),
}

/// One availability submission row in the `schedule` worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub member: String,
    /// Status label as submitted; parsed back into a typed status at
    /// tabulation time so an externally edited sheet fails loudly there.
    pub status: String,
    pub note: String,
}

/// One player's line of a recorded session in the `results` worksheet.
/// Sessions are appended as four consecutive rows in rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: NaiveDate,
    pub player: String,
    pub raw_points: i64,
    pub final_score: f64,
    pub memo: String,
}

/// Spreadsheet-style tabular store: one CSV file per worksheet under a
/// data directory. Reads of a missing worksheet return an empty sheet.
///
/// Appends are read-modify-write cycles (read the sheet, add rows, write
/// it back), serialized by a mutex so two concurrent form submissions
/// cannot lose each other's rows. Whole-sheet updates are last write wins.
pub struct SheetStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl SheetStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(SheetStore {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn sheet_path(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", worksheet))
    }

    pub fn read<T: DeserializeOwned>(&self, worksheet: &str) -> Result<Vec<T>, StoreError> {
        let path = self.sheet_path(worksheet);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = Reader::from_path(&path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Appends rows to the end of a worksheet, creating it if needed.
    pub fn append<T>(&self, worksheet: &str, new_rows: &[T]) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().unwrap();
        let mut rows: Vec<T> = self.read(worksheet)?;
        rows.extend_from_slice(new_rows);
        self.write_rows(worksheet, &rows)
    }

    /// Replaces a worksheet's contents entirely.
    pub fn update<T: Serialize>(&self, worksheet: &str, rows: &[T]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        self.write_rows(worksheet, rows)
    }

    fn write_rows<T: Serialize>(&self, worksheet: &str, rows: &[T]) -> Result<(), StoreError> {
        let mut writer = WriterBuilder::new().from_path(self.sheet_path(worksheet))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn schedule_row(member: &str, status: &str) -> ScheduleRow {
        ScheduleRow {
            date: "2025-06-07".parse().unwrap(),
            member: member.to_string(),
            status: status.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn missing_worksheet_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = SheetStore::open(dir.path()).unwrap();
        let rows: Vec<ScheduleRow> = store.read(SCHEDULE_SHEET).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn append_accumulates_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let store = SheetStore::open(dir.path()).unwrap();

        store
            .append(SCHEDULE_SHEET, &[schedule_row("Yamada", "available")])
            .unwrap();
        store
            .append(
                SCHEDULE_SHEET,
                &[
                    schedule_row("Tanaka", "tentative"),
                    schedule_row("Sato", "unavailable"),
                ],
            )
            .unwrap();

        let rows: Vec<ScheduleRow> = store.read(SCHEDULE_SHEET).unwrap();
        let members: Vec<&str> = rows.iter().map(|r| r.member.as_str()).collect();
        assert_eq!(members, vec!["Yamada", "Tanaka", "Sato"]);
        assert_eq!(rows[1].status, "tentative");
    }

    #[test]
    fn update_overwrites_whole_sheet() {
        let dir = TempDir::new().unwrap();
        let store = SheetStore::open(dir.path()).unwrap();

        store
            .append(SCHEDULE_SHEET, &[schedule_row("Yamada", "available")])
            .unwrap();
        store
            .update(SCHEDULE_SHEET, &[schedule_row("Suzuki", "available")])
            .unwrap();

        let rows: Vec<ScheduleRow> = store.read(SCHEDULE_SHEET).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member, "Suzuki");
    }

    #[test]
    fn result_rows_round_trip_with_scores() {
        let dir = TempDir::new().unwrap();
        let store = SheetStore::open(dir.path()).unwrap();

        let row = ResultRow {
            date: "2025-06-07".parse().unwrap(),
            player: "Yamada".to_string(),
            raw_points: 40000,
            final_score: 60.0,
            memo: "hanchan 1".to_string(),
        };
        store.append(RESULTS_SHEET, &[row]).unwrap();

        let rows: Vec<ResultRow> = store.read(RESULTS_SHEET).unwrap();
        assert_eq!(rows[0].raw_points, 40000);
        assert_eq!(rows[0].final_score, 60.0);
        assert_eq!(rows[0].memo, "hanchan 1");
    }
}
