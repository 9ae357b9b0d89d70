use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::convert::PLAYERS_PER_SESSION;
use crate::store::ResultRow;

/// A recorded session, reassembled from its four result rows.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub date: NaiveDate,
    pub memo: String,
    /// Result rows in rank order, first place first.
    pub results: Vec<ResultRow>,
}

/// One line of the cumulative ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player: String,
    pub total_score: f64,
    pub sessions: u32,
    pub first_places: u32,
    pub average_placement: f64,
}

/// Groups result rows back into sessions. Sessions are appended to the
/// worksheet as four consecutive rows in rank order; a trailing partial
/// group (a hand-edited sheet) is dropped rather than misread.
pub fn sessions(rows: &[ResultRow]) -> Vec<Session> {
    rows.chunks_exact(PLAYERS_PER_SESSION)
        .map(|chunk| Session {
            date: chunk[0].date,
            memo: chunk[0].memo.clone(),
            results: chunk.to_vec(),
        })
        .collect()
}

/// Builds the cumulative ranking across all recorded sessions: total
/// final score per player, descending, ties broken by name so the table
/// is stable. Totals are accumulated in tenths to keep them exact.
pub fn cumulative_ranking(rows: &[ResultRow]) -> Vec<RankingEntry> {
    struct Tally {
        total_tenths: i64,
        sessions: u32,
        first_places: u32,
        placement_sum: u32,
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    for session in sessions(rows) {
        for (placement, row) in session.results.iter().enumerate() {
            let tally = tallies.entry(row.player.clone()).or_insert(Tally {
                total_tenths: 0,
                sessions: 0,
                first_places: 0,
                placement_sum: 0,
            });
            tally.total_tenths += (row.final_score * 10.0).round() as i64;
            tally.sessions += 1;
            tally.placement_sum += placement as u32 + 1;
            if placement == 0 {
                tally.first_places += 1;
            }
        }
    }

    let mut ranking: Vec<RankingEntry> = tallies
        .into_iter()
        .map(|(player, tally)| RankingEntry {
            player,
            total_score: tally.total_tenths as f64 / 10.0,
            sessions: tally.sessions,
            first_places: tally.first_places,
            average_placement: tally.placement_sum as f64 / tally.sessions as f64,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, player: &str, raw: i64, score: f64, memo: &str) -> ResultRow {
        ResultRow {
            date: date.parse().unwrap(),
            player: player.to_string(),
            raw_points: raw,
            final_score: score,
            memo: memo.to_string(),
        }
    }

    fn one_session(date: &str, memo: &str, order: [&str; 4]) -> Vec<ResultRow> {
        let scores = [60.0, 10.0, -20.0, -50.0];
        let raws = [40000, 30000, 20000, 10000];
        order
            .iter()
            .enumerate()
            .map(|(i, player)| row(date, player, raws[i], scores[i], memo))
            .collect()
    }

    #[test]
    fn groups_rows_into_sessions() {
        let mut rows = one_session("2025-06-07", "hanchan 1", ["Yamada", "Tanaka", "Sato", "Suzuki"]);
        rows.extend(one_session("2025-06-07", "hanchan 2", ["Sato", "Yamada", "Suzuki", "Tanaka"]));

        let grouped = sessions(&rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].memo, "hanchan 1");
        assert_eq!(grouped[1].results[0].player, "Sato");
    }

    #[test]
    fn trailing_partial_session_is_dropped() {
        let mut rows = one_session("2025-06-07", "hanchan 1", ["Yamada", "Tanaka", "Sato", "Suzuki"]);
        rows.push(row("2025-06-14", "Yamada", 40000, 60.0, "stray"));
        assert_eq!(sessions(&rows).len(), 1);
    }

    #[test]
    fn ranking_totals_and_placements() {
        let mut rows = one_session("2025-06-07", "hanchan 1", ["Yamada", "Tanaka", "Sato", "Suzuki"]);
        rows.extend(one_session("2025-06-07", "hanchan 2", ["Yamada", "Sato", "Suzuki", "Tanaka"]));

        let ranking = cumulative_ranking(&rows);
        assert_eq!(ranking[0].player, "Yamada");
        assert_eq!(ranking[0].total_score, 120.0);
        assert_eq!(ranking[0].sessions, 2);
        assert_eq!(ranking[0].first_places, 2);
        assert_eq!(ranking[0].average_placement, 1.0);

        let tanaka = ranking.iter().find(|e| e.player == "Tanaka").unwrap();
        assert_eq!(tanaka.total_score, -40.0);
        assert_eq!(tanaka.average_placement, 3.0);
    }

    #[test]
    fn equal_totals_order_by_name() {
        let mut rows = one_session("2025-06-07", "a", ["Yamada", "Tanaka", "Sato", "Suzuki"]);
        rows.extend(one_session("2025-06-14", "b", ["Suzuki", "Sato", "Tanaka", "Yamada"]));

        let ranking = cumulative_ranking(&rows);
        // Yamada and Suzuki both total 10.0; Tanaka and Sato both -10.0.
        assert_eq!(ranking[0].player, "Suzuki");
        assert_eq!(ranking[1].player, "Yamada");
        assert_eq!(ranking[2].player, "Sato");
        assert_eq!(ranking[3].player, "Tanaka");
    }
}
