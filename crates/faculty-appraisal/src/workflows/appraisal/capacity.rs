use serde::{Deserialize, Serialize};

use super::domain::BehaviorRating;

/// The closed set of behavior capacities, in canonical display order.
/// Stored rating labels are free text; the keyword adapter below maps them
/// onto this enumeration at the scoring boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    InstitutionalCommitment,
    CollaborationTeamwork,
    Professionalism,
    ClientService,
    AchievingResults,
}

impl Capacity {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::InstitutionalCommitment,
            Self::CollaborationTeamwork,
            Self::Professionalism,
            Self::ClientService,
            Self::AchievingResults,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InstitutionalCommitment => "Institutional Commitment",
            Self::CollaborationTeamwork => "Collaboration & Teamwork",
            Self::Professionalism => "Professionalism",
            Self::ClientService => "Client Service",
            Self::AchievingResults => "Achieving Results",
        }
    }

    /// Case-insensitive substring that identifies this capacity in a stored
    /// rating label.
    const fn keyword(self) -> &'static str {
        match self {
            Self::InstitutionalCommitment => "institutional",
            Self::CollaborationTeamwork => "collaboration",
            Self::Professionalism => "professionalism",
            Self::ClientService => "client",
            Self::AchievingResults => "achieving",
        }
    }
}

/// Points resolved for one canonical capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityScore {
    pub capacity: Capacity,
    pub points: f64,
}

impl CapacityScore {
    pub fn label(&self) -> &'static str {
        self.capacity.label()
    }
}

/// Map free-text behavior ratings onto the five canonical capacities.
///
/// Always returns exactly five entries in `Capacity::ordered()` order.
/// For each capacity the first not-yet-consumed rating whose label contains
/// the capacity keyword (case-insensitively) supplies the points; ratings
/// with unrecognized labels are dropped and unmatched capacities default
/// to 0. Each input rating is consumed at most once.
pub fn normalize_ratings(ratings: &[BehaviorRating]) -> [CapacityScore; 5] {
    let lowered: Vec<String> = ratings
        .iter()
        .map(|rating| rating.capacity.to_lowercase())
        .collect();
    let mut consumed = vec![false; ratings.len()];

    Capacity::ordered().map(|capacity| {
        let matched = lowered
            .iter()
            .enumerate()
            .find(|(index, label)| !consumed[*index] && label.contains(capacity.keyword()));

        let points = match matched {
            Some((index, _)) => {
                consumed[index] = true;
                ratings[index].points
            }
            None => 0.0,
        };

        CapacityScore { capacity, points }
    })
}
