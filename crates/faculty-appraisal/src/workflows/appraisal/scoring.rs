use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::capacity::{normalize_ratings, Capacity, CapacityScore};
use super::domain::{Achievement, AchievementKind, Appraisal, AppraisalStatus, EvaluationRecord};
use super::eligibility::evaluate_enabled;

/// Raw performance points convert onto a 3-point organizational scale.
const PERFORMANCE_SCALE: f64 = 3.0;
/// Raw capability points convert onto a 7-point organizational scale.
const CAPABILITY_SCALE: f64 = 7.0;
/// Category points are expressed on a 0-100-per-category convention.
const CATEGORY_BASE: f64 = 100.0;

/// Round to 2 decimal places, half away from zero. Applied independently
/// after each scaling division, never deferred to the final step.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalized rating entry carried by views and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityScoreView {
    pub capacity: Capacity,
    pub capacity_label: &'static str,
    pub points: f64,
}

impl From<CapacityScore> for CapacityScoreView {
    fn from(score: CapacityScore) -> Self {
        Self {
            capacity: score.capacity,
            capacity_label: score.capacity.label(),
            points: score.points,
        }
    }
}

/// Achievement entry carried by detail views, with the display label resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementView {
    pub kind: AchievementKind,
    pub kind_label: &'static str,
    pub title: String,
    pub awarded_on: Option<NaiveDate>,
}

impl From<&Achievement> for AchievementView {
    fn from(achievement: &Achievement) -> Self {
        Self {
            kind: achievement.kind,
            kind_label: achievement.kind.label(),
            title: achievement.title.clone(),
            awarded_on: achievement.awarded_on,
        }
    }
}

/// Fully-populated evaluation shape derived from the latest evaluation.
/// Appraisals without an evaluation get the all-zero shape, so consumers
/// never branch on presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationView {
    pub total_score: f64,
    pub research: f64,
    pub university_service: f64,
    pub community_service: f64,
    pub teaching_quality: f64,
    pub behavior_ratings: Vec<CapacityScoreView>,
    pub raw_performance: f64,
    pub raw_capabilities: f64,
    pub scaled_performance: f64,
    pub scaled_capabilities: f64,
    pub overall: f64,
}

impl EvaluationView {
    fn zero() -> Self {
        Self::from_parts(0.0, 0.0, 0.0, 0.0, 0.0, normalize_ratings(&[]))
    }

    fn from_record(record: &EvaluationRecord) -> Self {
        Self::from_parts(
            record.total_score,
            record.research,
            record.university_service,
            record.community_service,
            record.teaching_quality,
            normalize_ratings(&record.behavior_ratings),
        )
    }

    fn from_parts(
        total_score: f64,
        research: f64,
        university_service: f64,
        community_service: f64,
        teaching_quality: f64,
        ratings: [CapacityScore; 5],
    ) -> Self {
        // Sums, not averages: the four categories and five capacities are
        // intentionally weighted equally by summation.
        let raw_performance = research + university_service + community_service + teaching_quality;
        let raw_capabilities: f64 = ratings.iter().map(|score| score.points).sum();

        let scaled_performance = round2(raw_performance * PERFORMANCE_SCALE / CATEGORY_BASE);
        let scaled_capabilities = round2(raw_capabilities * CAPABILITY_SCALE / CATEGORY_BASE);
        let overall = round2((scaled_performance + scaled_capabilities) / 2.0);

        Self {
            total_score,
            research,
            university_service,
            community_service,
            teaching_quality,
            behavior_ratings: ratings.into_iter().map(CapacityScoreView::from).collect(),
            raw_performance,
            raw_capabilities,
            scaled_performance,
            scaled_capabilities,
            overall,
        }
    }
}

/// Select the latest evaluation (index 0, as supplied ordered by creation
/// descending) and derive its view. Empty input yields the zero shape.
pub fn latest_evaluation_view(evaluations: &[EvaluationRecord]) -> EvaluationView {
    match evaluations.first() {
        Some(record) => EvaluationView::from_record(record),
        None => EvaluationView::zero(),
    }
}

/// Normalized appraisal row produced for rendering and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppraisalView {
    pub id: String,
    pub status: AppraisalStatus,
    pub status_label: &'static str,
    pub updated_at: NaiveDateTime,
    pub instructor: String,
    pub instructor_email: String,
    pub department: String,
    pub cycle_id: String,
    pub academic_year: String,
    pub cycle_end_date: NaiveDate,
    pub evaluation: EvaluationView,
    pub evaluate_enabled: bool,
    pub achievements: Vec<AchievementView>,
}

/// Derive the complete view model for one appraisal. `today` is the
/// wall-clock date at render time, used only for the eligibility flag.
pub fn score_appraisal(appraisal: &Appraisal, today: NaiveDate) -> AppraisalView {
    AppraisalView {
        id: appraisal.id.0.clone(),
        status: appraisal.status,
        status_label: appraisal.status.label(),
        updated_at: appraisal.updated_at,
        instructor: appraisal.faculty.name.clone(),
        instructor_email: appraisal.faculty.email.clone(),
        department: appraisal.faculty.department.clone(),
        cycle_id: appraisal.cycle.id.clone(),
        academic_year: appraisal.cycle.academic_year.clone(),
        cycle_end_date: appraisal.cycle.end_date,
        evaluation: latest_evaluation_view(&appraisal.evaluations),
        evaluate_enabled: evaluate_enabled(appraisal.status, appraisal.cycle.end_date, today),
        achievements: appraisal
            .achievements
            .iter()
            .map(AchievementView::from)
            .collect(),
    }
}

/// Row-independent mapping over a listing; input order is preserved.
pub fn score_batch(appraisals: &[Appraisal], today: NaiveDate) -> Vec<AppraisalView> {
    appraisals
        .iter()
        .map(|appraisal| score_appraisal(appraisal, today))
        .collect()
}
