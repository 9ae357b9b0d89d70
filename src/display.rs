use std::fs::File;
use std::io::Write;

use crate::availability::QuorumDay;
use crate::scoring::RankingEntry;

/// Prints the cumulative ranking table to the console.
pub fn print_ranking(ranking: &[RankingEntry]) {
    println!("\n=== Cumulative Ranking ===");
    if ranking.is_empty() {
        println!("No sessions recorded yet.");
        return;
    }

    println!(
        "{:<4} {:<12} {:>8} {:>9} {:>7} {:>10}",
        "#", "Player", "Total", "Sessions", "Firsts", "Avg place"
    );
    for (i, entry) in ranking.iter().enumerate() {
        println!(
            "{:<4} {:<12} {:>8.1} {:>9} {:>7} {:>10.2}",
            i + 1,
            entry.player,
            entry.total_score,
            entry.sessions,
            entry.first_places,
            entry.average_placement
        );
    }
}

/// Prints the dates where a session can be seated.
pub fn print_quorum_days(days: &[QuorumDay], quorum: usize) {
    println!("\n=== Playable Dates (quorum {}) ===", quorum);
    if days.is_empty() {
        println!("No date has enough available members yet.");
        return;
    }
    for day in days {
        println!("{}  {}", day.date, day.members.join(", "));
    }
}

/// Writes the ranking table to a file, one line per player.
pub fn write_ranking_to_file(
    ranking: &[RankingEntry],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Cumulative Ranking **")?;
    for (i, entry) in ranking.iter().enumerate() {
        writeln!(
            file,
            "{}. {} {:.1} ({} sessions, {} firsts)",
            i + 1,
            entry.player,
            entry.total_score,
            entry.sessions,
            entry.first_places
        )?;
    }

    Ok(())
}
