mod availability;
mod display;
mod form;
mod scoring;
mod store;
mod web;

use availability::{date_range, tabulate_quorum, AvailabilityEntry};
use display::{print_quorum_days, print_ranking, write_ranking_to_file};
use scoring::{cumulative_ranking, ScoreConfig};
use store::{ResultRow, ScheduleRow, SheetStore, RESULTS_SHEET, SCHEDULE_SHEET};
use web::AppState;

const DEFAULT_ROSTER: &[&str] = &["Yamada", "Tanaka", "Sato", "Suzuki", "Takahashi"];

fn roster_from_env() -> Vec<String> {
    match std::env::var("MAHJONG_MEMBERS") {
        Ok(value) => value
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect(),
        Err(_) => DEFAULT_ROSTER.iter().map(|m| m.to_string()).collect(),
    }
}

fn quorum_from_env() -> usize {
    std::env::var("MAHJONG_QUORUM")
        .ok()
        .and_then(|q| q.parse().ok())
        .unwrap_or(4)
}

fn data_dir_from_env() -> String {
    std::env::var("MAHJONG_DATA").unwrap_or_else(|_| "data".to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let roster = roster_from_env();
        let quorum = quorum_from_env();
        let data_dir = data_dir_from_env();

        println!("Starting web server on port {}...", port);
        println!("Members: {}", roster.join(", "));
        println!("Quorum: {}, data directory: {}", quorum, data_dir);
        println!("Access the site at http://localhost:{}", port);

        let state = AppState {
            store: SheetStore::open(&data_dir)?,
            roster,
            score_config: ScoreConfig::default(),
            quorum,
        };
        web::start_server(port, state).await?;
        return Ok(());
    }

    // CLI mode: print the current standings and playable dates
    let roster = roster_from_env();
    let quorum = quorum_from_env();
    let store = SheetStore::open(data_dir_from_env())?;

    let result_rows: Vec<ResultRow> = store.read(RESULTS_SHEET)?;
    let ranking = cumulative_ranking(&result_rows);
    print_ranking(&ranking);

    let schedule_rows: Vec<ScheduleRow> = store.read(SCHEDULE_SHEET)?;
    let mut entries = Vec::with_capacity(schedule_rows.len());
    for row in &schedule_rows {
        entries.push(AvailabilityEntry {
            member: row.member.clone(),
            date: row.date,
            status: row.status.parse()?,
        });
    }

    // Tabulate over the span of dates anyone has answered for.
    let first = schedule_rows.iter().map(|r| r.date).min();
    let last = schedule_rows.iter().map(|r| r.date).max();
    if let (Some(first), Some(last)) = (first, last) {
        let dates = date_range(first, last);
        let days = tabulate_quorum(&roster, &dates, &entries, quorum);
        print_quorum_days(&days, quorum);
    } else {
        println!("\nNo availability recorded yet.");
    }

    if !ranking.is_empty() {
        write_ranking_to_file(&ranking, "ranking.txt")?;
        println!("\nRanking saved to ranking.txt");
    }

    Ok(())
}
