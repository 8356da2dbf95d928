use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for appraisal records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppraisalId(pub String);

/// Workflow status tracked on every appraisal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppraisalStatus {
    New,
    InProgress,
    Complete,
    Sent,
}

impl AppraisalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::Sent => "sent",
        }
    }

    /// Parse a filter parameter. Unknown strings map to `None` so callers
    /// can fail closed instead of erroring.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            "complete" => Some(Self::Complete),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }
}

/// A scoring period. At most one cycle is conventionally active at a time,
/// but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalCycle {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub academic_year: String,
    pub active: bool,
}

/// Faculty member owning an appraisal, carried for role scoping and the
/// Instructor column in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRef {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Categories of achievement records attached to an appraisal. Listed in
/// detail views and exports, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Award,
    Course,
    ResearchActivity,
    ScientificActivity,
    CommunityService,
    UniversityService,
}

impl AchievementKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Award => "Award",
            Self::Course => "Course",
            Self::ResearchActivity => "Research Activity",
            Self::ScientificActivity => "Scientific Activity",
            Self::CommunityService => "Community Service",
            Self::UniversityService => "University Service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub title: String,
    #[serde(default)]
    pub awarded_on: Option<NaiveDate>,
}

/// A named-capacity point score within an evaluation. The capacity label is
/// free text as stored; normalization happens at the scoring boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorRating {
    pub capacity: String,
    pub points: f64,
}

/// One scored assessment attached to an appraisal. Multiple may exist; the
/// scoring engine only reads the most recently created one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub created_at: NaiveDateTime,
    pub research: f64,
    pub university_service: f64,
    pub community_service: f64,
    pub teaching_quality: f64,
    pub total_score: f64,
    pub behavior_ratings: Vec<BehaviorRating>,
}

/// One faculty member's review record for one cycle, as supplied by the data
/// layer. `evaluations` is expected ordered by `created_at` descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appraisal {
    pub id: AppraisalId,
    pub status: AppraisalStatus,
    pub updated_at: NaiveDateTime,
    pub faculty: FacultyRef,
    pub cycle: AppraisalCycle,
    pub evaluations: Vec<EvaluationRecord>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}
