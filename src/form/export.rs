use chrono::NaiveDate;

use crate::form::submission::AvailabilityRequest;
use crate::scoring::{RankedResult, PLAYERS_PER_SESSION};
use crate::store::{ResultRow, ScheduleRow, SheetStore, StoreError, RESULTS_SHEET, SCHEDULE_SHEET};

/// Maps a validated availability submission into `schedule` worksheet
/// rows and appends them. One row per answered date; the note, if any,
/// is repeated on each row the way the original sheet laid it out.
pub fn export_availability(store: &SheetStore, req: &AvailabilityRequest) -> Result<(), StoreError> {
    let member = req.member.trim().to_string();
    let note = req.note.clone().unwrap_or_default();
    let rows: Vec<ScheduleRow> = req
        .days
        .iter()
        .map(|day| ScheduleRow {
            date: day.date,
            member: member.clone(),
            status: day.status.trim().to_lowercase(),
            note: note.clone(),
        })
        .collect();
    store.append(SCHEDULE_SHEET, &rows)
}

/// Appends one converted session to the `results` worksheet as four
/// consecutive rows in rank order.
pub fn export_session_results(
    store: &SheetStore,
    date: NaiveDate,
    memo: &str,
    results: &[RankedResult; PLAYERS_PER_SESSION],
) -> Result<(), StoreError> {
    let rows: Vec<ResultRow> = results
        .iter()
        .map(|r| ResultRow {
            date,
            player: r.name.clone(),
            raw_points: r.raw_points,
            final_score: r.score(),
            memo: memo.to_string(),
        })
        .collect();
    store.append(RESULTS_SHEET, &rows)
}
