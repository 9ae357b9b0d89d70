use chrono::NaiveDate;
use serde::Deserialize;

use crate::availability::Status;
use crate::scoring::PLAYERS_PER_SESSION;

/// One date's answer inside an availability submission.
#[derive(Debug, Clone, Deserialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub status: String,
}

/// Availability form submission from the frontend: one member's status
/// for each date they answered. Resubmitting is allowed; later rows
/// shadow earlier ones when the quorum is tabulated.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub member: String,
    pub days: Vec<DayStatus>,
    pub note: Option<String>,
}

/// Score form submission from the frontend: one session's four raw
/// point totals.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub date: NaiveDate,
    pub entries: Vec<ScoreEntry>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    pub raw_points: i64,
}

/// Validates an availability submission against the member roster.
pub fn validate_availability(req: &AvailabilityRequest, roster: &[String]) -> Result<(), String> {
    let member = req.member.trim();
    if member.is_empty() {
        return Err("Member name is required".to_string());
    }
    if !roster.iter().any(|m| m == member) {
        return Err(format!("Unknown member: {}", member));
    }
    if req.days.is_empty() {
        return Err("At least one date is required".to_string());
    }
    for day in &req.days {
        day.status.parse::<Status>().map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Validates a score submission: exactly four distinct roster players.
/// The point-total check itself lives in the score converter.
pub fn validate_scores(req: &ScoreRequest, roster: &[String]) -> Result<(), String> {
    if req.entries.len() != PLAYERS_PER_SESSION {
        return Err(format!(
            "A session needs exactly {} players, got {}",
            PLAYERS_PER_SESSION,
            req.entries.len()
        ));
    }
    for entry in &req.entries {
        let player = entry.player.trim();
        if player.is_empty() {
            return Err("Player name is required".to_string());
        }
        if !roster.iter().any(|m| m == player) {
            return Err(format!("Unknown player: {}", player));
        }
    }
    for (i, a) in req.entries.iter().enumerate() {
        if req.entries[i + 1..]
            .iter()
            .any(|b| a.player.trim() == b.player.trim())
        {
            return Err(format!("Duplicate player: {}", a.player.trim()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        ["Yamada", "Tanaka", "Sato", "Suzuki", "Takahashi"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn availability(member: &str, status: &str) -> AvailabilityRequest {
        AvailabilityRequest {
            member: member.to_string(),
            days: vec![DayStatus {
                date: "2025-06-07".parse().unwrap(),
                status: status.to_string(),
            }],
            note: None,
        }
    }

    fn scores(players: [&str; 4]) -> ScoreRequest {
        ScoreRequest {
            date: "2025-06-07".parse().unwrap(),
            entries: players
                .iter()
                .map(|p| ScoreEntry {
                    player: p.to_string(),
                    raw_points: 25000,
                })
                .collect(),
            memo: None,
        }
    }

    #[test]
    fn availability_accepts_roster_member() {
        assert!(validate_availability(&availability("Yamada", "available"), &roster()).is_ok());
    }

    #[test]
    fn availability_rejects_unknown_member_and_status() {
        assert!(validate_availability(&availability("Guest", "available"), &roster()).is_err());
        let err = validate_availability(&availability("Yamada", "maybe"), &roster()).unwrap_err();
        assert!(err.contains("maybe"));
    }

    #[test]
    fn availability_requires_at_least_one_date() {
        let req = AvailabilityRequest {
            member: "Yamada".to_string(),
            days: Vec::new(),
            note: None,
        };
        assert!(validate_availability(&req, &roster()).is_err());
    }

    #[test]
    fn scores_require_four_distinct_roster_players() {
        assert!(validate_scores(&scores(["Yamada", "Tanaka", "Sato", "Suzuki"]), &roster()).is_ok());

        let mut short = scores(["Yamada", "Tanaka", "Sato", "Suzuki"]);
        short.entries.pop();
        assert!(validate_scores(&short, &roster()).is_err());

        assert!(validate_scores(&scores(["Yamada", "Yamada", "Sato", "Suzuki"]), &roster()).is_err());
        assert!(validate_scores(&scores(["Yamada", "Guest", "Sato", "Suzuki"]), &roster()).is_err());
    }
}
