//! Faculty performance appraisal workflow: domain model, capacity
//! normalization, score aggregation and scaling, evaluation eligibility,
//! CSV export, and the role-scoped service/HTTP surface.
//!
//! The scoring pipeline is total: missing evaluations, missing category
//! points, and unmatched behavior labels all default to zero, so every
//! consumer receives a fully-populated shape and never branches on
//! presence.

pub mod capacity;
pub mod domain;
pub mod eligibility;
pub mod export;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use capacity::{normalize_ratings, Capacity, CapacityScore};
pub use domain::{
    Achievement, AchievementKind, Appraisal, AppraisalCycle, AppraisalId, AppraisalStatus,
    BehaviorRating, EvaluationRecord, FacultyRef,
};
pub use eligibility::{evaluate_enabled, evaluation_window};
pub use export::{csv_string, write_csv, ExportRow, EXPORT_COLUMNS};
pub use repository::{AppraisalFilter, AppraisalRepository, RepositoryError};
pub use router::appraisal_router;
pub use scoring::{
    latest_evaluation_view, round2, score_appraisal, score_batch, AchievementView, AppraisalView,
    CapacityScoreView, EvaluationView,
};
pub use service::{AppraisalService, AppraisalServiceError, Reviewer};
