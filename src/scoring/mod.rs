pub mod convert;
pub mod ranking;

pub use convert::{
    convert_scores, PlayerScore, RankedResult, ScoreConfig, ScoreError, PLAYERS_PER_SESSION,
};
pub use ranking::{cumulative_ranking, sessions, RankingEntry, Session};
