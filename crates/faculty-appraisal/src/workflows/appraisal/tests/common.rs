use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::appraisal::domain::{
    Appraisal, AppraisalCycle, AppraisalId, AppraisalStatus, BehaviorRating, EvaluationRecord,
    FacultyRef,
};
use crate::workflows::appraisal::repository::{
    AppraisalFilter, AppraisalRepository, RepositoryError,
};
use crate::workflows::appraisal::service::AppraisalService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(9, 0, 0).expect("valid time")
}

pub(super) fn cycle() -> AppraisalCycle {
    AppraisalCycle {
        id: "cycle-2024".to_string(),
        start_date: date(2023, 9, 1),
        end_date: date(2024, 6, 30),
        academic_year: "2023/2024".to_string(),
        active: true,
    }
}

pub(super) fn faculty(name: &str, department: &str) -> FacultyRef {
    let email = format!(
        "{}@university.edu",
        name.to_lowercase().replace(' ', ".")
    );
    FacultyRef {
        id: format!("fac-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        email,
        department: department.to_string(),
    }
}

pub(super) fn full_ratings() -> Vec<BehaviorRating> {
    [
        ("Institutional Commitment", 20.0),
        ("Collaboration & Teamwork", 20.0),
        ("Professionalism", 20.0),
        ("Client Service", 20.0),
        ("Achieving Results", 20.0),
    ]
    .into_iter()
    .map(|(capacity, points)| BehaviorRating {
        capacity: capacity.to_string(),
        points,
    })
    .collect()
}

pub(super) fn evaluation(created: NaiveDateTime, per_category: f64) -> EvaluationRecord {
    EvaluationRecord {
        created_at: created,
        research: per_category,
        university_service: per_category,
        community_service: per_category,
        teaching_quality: per_category,
        total_score: per_category * 4.0,
        behavior_ratings: full_ratings(),
    }
}

pub(super) fn appraisal(
    id: &str,
    status: AppraisalStatus,
    department: &str,
    evaluations: Vec<EvaluationRecord>,
) -> Appraisal {
    Appraisal {
        id: AppraisalId(id.to_string()),
        status,
        updated_at: datetime(2024, 5, 20),
        faculty: faculty(&format!("Prof {id}"), department),
        cycle: cycle(),
        evaluations,
        achievements: Vec::new(),
    }
}

/// In-memory repository ordering listings by recency, mirroring the data
/// layer contract the service expects.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<Appraisal>>>,
}

impl MemoryRepository {
    pub(super) fn with_records(records: Vec<Appraisal>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl AppraisalRepository for MemoryRepository {
    fn list(&self, filter: &AppraisalFilter) -> Result<Vec<Appraisal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut matches: Vec<Appraisal> = guard
            .iter()
            .filter(|appraisal| filter.matches(appraisal))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(matches)
    }

    fn fetch(&self, id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|appraisal| &appraisal.id == id).cloned())
    }
}

/// Repository stub for exercising internal-error paths.
pub(super) struct UnavailableRepository;

impl AppraisalRepository for UnavailableRepository {
    fn list(&self, _filter: &AppraisalFilter) -> Result<Vec<Appraisal>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn fetch(&self, _id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn seeded_service() -> (AppraisalService<MemoryRepository>, MemoryRepository) {
    let mut first = appraisal(
        "apr-001",
        AppraisalStatus::Sent,
        "Computer Science",
        vec![evaluation(datetime(2024, 5, 10), 25.0)],
    );
    first.updated_at = datetime(2024, 5, 22);
    let mut second = appraisal("apr-002", AppraisalStatus::New, "Computer Science", vec![]);
    second.updated_at = datetime(2024, 5, 18);
    let mut third = appraisal(
        "apr-003",
        AppraisalStatus::Complete,
        "Mathematics",
        vec![evaluation(datetime(2024, 4, 2), 20.0)],
    );
    third.updated_at = datetime(2024, 5, 12);

    let repository = MemoryRepository::with_records(vec![second, third, first]);
    let service = AppraisalService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
