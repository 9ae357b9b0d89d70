use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("unknown availability status: {0}")]
    InvalidStatus(String),
}

/// What a member marked for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Tentative,
    Unavailable,
}

impl FromStr for Status {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Status::Available),
            "tentative" => Ok(Status::Tentative),
            "unavailable" => Ok(Status::Unavailable),
            other => Err(AvailabilityError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Available => "available",
            Status::Tentative => "tentative",
            Status::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// One recorded (member, date, status) triple, in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub member: String,
    pub date: NaiveDate,
    pub status: Status,
}

/// A date where enough members are available to seat a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuorumDay {
    pub date: NaiveDate,
    /// Qualifying members, in roster order.
    pub members: Vec<String>,
}

/// Inclusive ascending date range. Empty when `from` is after `to`.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}

/// Finds the dates where at least `quorum` roster members marked
/// themselves available.
///
/// Entries are scanned in submission order and later entries shadow
/// earlier ones for the same (member, date) pair, so a resubmission
/// simply overwrites. Entries for names outside the roster are ignored,
/// and a date nobody answered for has zero available members. A roster
/// smaller than the quorum just yields no dates.
pub fn tabulate_quorum(
    members: &[String],
    dates: &[NaiveDate],
    entries: &[AvailabilityEntry],
    quorum: usize,
) -> Vec<QuorumDay> {
    let mut latest: HashMap<(&str, NaiveDate), Status> = HashMap::new();
    for entry in entries {
        latest.insert((entry.member.as_str(), entry.date), entry.status);
    }

    let mut days = Vec::new();
    for &date in dates {
        let available: Vec<String> = members
            .iter()
            .filter(|m| latest.get(&(m.as_str(), date)) == Some(&Status::Available))
            .cloned()
            .collect();
        if available.len() >= quorum {
            days.push(QuorumDay {
                date,
                members: available,
            });
        }
    }
    days
}
