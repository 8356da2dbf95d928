use chrono::{NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use faculty_appraisal::workflows::appraisal::{
    Achievement, AchievementKind, Appraisal, AppraisalCycle, AppraisalFilter, AppraisalId,
    AppraisalRepository, AppraisalStatus, BehaviorRating, EvaluationRecord, FacultyRef,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the relational data layer, returning listings
/// ordered by recency as the service contract requires.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAppraisalRepository {
    records: Arc<Mutex<Vec<Appraisal>>>,
}

impl InMemoryAppraisalRepository {
    pub(crate) fn with_records(records: Vec<Appraisal>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl AppraisalRepository for InMemoryAppraisalRepository {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn datetime(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, 0, 0)
        .expect("valid seed time")
}

fn demo_cycle() -> AppraisalCycle {
    AppraisalCycle {
        id: "cycle-2024".to_string(),
        start_date: date(2023, 9, 1),
        end_date: date(2024, 6, 30),
        academic_year: "2023/2024".to_string(),
        active: true,
    }
}

fn rating(capacity: &str, points: f64) -> BehaviorRating {
    BehaviorRating {
        capacity: capacity.to_string(),
        points,
    }
}

/// Demo records covering the interesting shapes: a fully-evaluated
/// appraisal, a superseded older evaluation, loosely-labelled behavior
/// ratings, and an unevaluated record.
pub(crate) fn demo_appraisals() -> Vec<Appraisal> {
    vec![
        Appraisal {
            id: AppraisalId("apr-1001".to_string()),
            status: AppraisalStatus::Sent,
            updated_at: datetime(2024, 6, 2, 14),
            faculty: FacultyRef {
                id: "fac-amal".to_string(),
                name: "Amal Haddad".to_string(),
                email: "amal.haddad@university.edu".to_string(),
                department: "Computer Science".to_string(),
            },
            cycle: demo_cycle(),
            evaluations: vec![
                EvaluationRecord {
                    created_at: datetime(2024, 5, 28, 10),
                    research: 82.0,
                    university_service: 74.0,
                    community_service: 61.0,
                    teaching_quality: 88.0,
                    total_score: 305.0,
                    behavior_ratings: vec![
                        rating("Institutional Commitment", 84.0),
                        rating("Collaboration & Teamwork", 79.0),
                        rating("Professionalism", 91.0),
                        rating("Client Service", 68.0),
                        rating("Achieving Results", 73.0),
                    ],
                },
                // Superseded by the newer row above; never merged.
                EvaluationRecord {
                    created_at: datetime(2024, 3, 4, 9),
                    research: 40.0,
                    university_service: 35.0,
                    community_service: 30.0,
                    teaching_quality: 45.0,
                    total_score: 150.0,
                    behavior_ratings: vec![rating("Professionalism", 50.0)],
                },
            ],
            achievements: vec![
                Achievement {
                    kind: AchievementKind::Award,
                    title: "Dean's Teaching Excellence Award".to_string(),
                    awarded_on: Some(date(2024, 2, 12)),
                },
                Achievement {
                    kind: AchievementKind::ResearchActivity,
                    title: "Distributed systems survey, JACM".to_string(),
                    awarded_on: Some(date(2023, 11, 3)),
                },
            ],
        },
        Appraisal {
            id: AppraisalId("apr-1002".to_string()),
            status: AppraisalStatus::InProgress,
            updated_at: datetime(2024, 5, 30, 9),
            faculty: FacultyRef {
                id: "fac-lina".to_string(),
                name: "Lina Farouk".to_string(),
                email: "lina.farouk@university.edu".to_string(),
                department: "Mathematics".to_string(),
            },
            cycle: demo_cycle(),
            evaluations: vec![EvaluationRecord {
                created_at: datetime(2024, 5, 20, 16),
                research: 55.0,
                university_service: 65.0,
                community_service: 70.0,
                teaching_quality: 75.0,
                total_score: 265.0,
                behavior_ratings: vec![
                    rating("institutional engagement and commitment", 60.0),
                    rating("teamwork & collaboration skills", 72.0),
                    rating("client-facing service", 58.0),
                ],
            }],
            achievements: vec![Achievement {
                kind: AchievementKind::CommunityService,
                title: "Math outreach program lead".to_string(),
                awarded_on: None,
            }],
        },
        Appraisal {
            id: AppraisalId("apr-1003".to_string()),
            status: AppraisalStatus::New,
            updated_at: datetime(2024, 5, 14, 11),
            faculty: FacultyRef {
                id: "fac-omar".to_string(),
                name: "Omar Khalil".to_string(),
                email: "omar.khalil@university.edu".to_string(),
                department: "Computer Science".to_string(),
            },
            cycle: demo_cycle(),
            evaluations: Vec::new(),
            achievements: Vec::new(),
        },
        Appraisal {
            id: AppraisalId("apr-1004".to_string()),
            status: AppraisalStatus::Complete,
            updated_at: datetime(2024, 4, 25, 13),
            faculty: FacultyRef {
                id: "fac-sara".to_string(),
                name: "Sara Nasser".to_string(),
                email: "sara.nasser@university.edu".to_string(),
                department: "Mathematics".to_string(),
            },
            cycle: demo_cycle(),
            evaluations: vec![EvaluationRecord {
                created_at: datetime(2024, 4, 20, 15),
                research: 90.0,
                university_service: 85.0,
                community_service: 80.0,
                teaching_quality: 95.0,
                total_score: 350.0,
                behavior_ratings: vec![
                    rating("Institutional Commitment", 88.0),
                    rating("Collaboration & Teamwork", 90.0),
                    rating("Professionalism", 94.0),
                    rating("Client Service", 81.0),
                    rating("Achieving Results", 87.0),
                ],
            }],
            achievements: vec![Achievement {
                kind: AchievementKind::UniversityService,
                title: "Curriculum committee chair".to_string(),
                awarded_on: None,
            }],
        },
    ]
}
