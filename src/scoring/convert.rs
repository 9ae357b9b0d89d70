use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A session is always a four-player hanchan.
pub const PLAYERS_PER_SESSION: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("raw points sum to {actual}, expected {expected}")]
    InvalidTotal { actual: i64, expected: i64 },
}

/// One player's raw point total as read off the table at the end of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub raw_points: i64,
}

/// A player's converted placement score, in rank order (first place first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    pub raw_points: i64,
    /// Final score in tenths of a point (600 = 60.0). Kept as an integer so
    /// cumulative totals stay exact.
    pub score_tenths: i64,
}

impl RankedResult {
    pub fn score(&self) -> f64 {
        self.score_tenths as f64 / 10.0
    }
}

/// Scoring rule set. The defaults are the common 30000-return,
/// 10-30 uma, 20-point oka rules, but every value can be overridden
/// to play rule variants without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Raw points across the four players must sum to this.
    pub required_total: i64,
    /// Baseline subtracted from raw points before scaling ("return" points).
    pub return_offset: i64,
    /// Placement bonus/penalty by final rank.
    pub uma: [i64; PLAYERS_PER_SESSION],
    /// Extra bonus for first place (oka).
    pub top_bonus: i64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            required_total: 100_000,
            return_offset: 30_000,
            uma: [30, 10, -10, -30],
            top_bonus: 20,
        }
    }
}

/// Integer division rounded half away from zero. `denom` must be positive.
fn div_round_half_away(numer: i64, denom: i64) -> i64 {
    let quot = numer / denom;
    let rem = numer % denom;
    if rem.abs() * 2 >= denom {
        quot + numer.signum()
    } else {
        quot
    }
}

/// Converts four raw point totals into placement scores.
///
/// Players are ranked by raw points descending; ties keep input order
/// (seat order decides, as at the table). Each final score is
/// `(raw - return_offset) / 1000 + uma[rank]`, plus the oka for first
/// place, rounded to one decimal place half away from zero.
///
/// Fails with [`ScoreError::InvalidTotal`] when the raw points do not
/// sum to `config.required_total`; nothing is produced in that case.
pub fn convert_scores(
    players: &[PlayerScore; PLAYERS_PER_SESSION],
    config: &ScoreConfig,
) -> Result<[RankedResult; PLAYERS_PER_SESSION], ScoreError> {
    let actual: i64 = players.iter().map(|p| p.raw_points).sum();
    if actual != config.required_total {
        return Err(ScoreError::InvalidTotal {
            actual,
            expected: config.required_total,
        });
    }

    // Stable sort: equal raw points keep input order.
    let mut ranked: Vec<&PlayerScore> = players.iter().collect();
    ranked.sort_by(|a, b| b.raw_points.cmp(&a.raw_points));

    Ok(std::array::from_fn(|rank| {
        let player = ranked[rank];
        // (raw - offset) / 1000 points, carried in tenths.
        let base_tenths = div_round_half_away(player.raw_points - config.return_offset, 100);
        let oka = if rank == 0 { config.top_bonus } else { 0 };
        RankedResult {
            name: player.name.clone(),
            raw_points: player.raw_points,
            score_tenths: base_tenths + (config.uma[rank] + oka) * 10,
        }
    }))
}
