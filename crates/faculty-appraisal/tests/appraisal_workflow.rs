use chrono::{NaiveDate, NaiveDateTime};
use faculty_appraisal::workflows::appraisal::{
    csv_string, evaluate_enabled, normalize_ratings, score_batch, Appraisal, AppraisalCycle,
    AppraisalId, AppraisalStatus, BehaviorRating, Capacity, EvaluationRecord, FacultyRef,
    EXPORT_COLUMNS,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(12, 0, 0).expect("valid time")
}

fn sample_appraisal(id: &str, status: AppraisalStatus, evaluations: Vec<EvaluationRecord>) -> Appraisal {
    Appraisal {
        id: AppraisalId(id.to_string()),
        status,
        updated_at: datetime(2024, 5, 20),
        faculty: FacultyRef {
            id: format!("fac-{id}"),
            name: format!("Dr {id}"),
            email: format!("{id}@university.edu"),
            department: "Computer Science".to_string(),
        },
        cycle: AppraisalCycle {
            id: "cycle-2024".to_string(),
            start_date: date(2023, 9, 1),
            end_date: date(2024, 6, 30),
            academic_year: "2023/2024".to_string(),
            active: true,
        },
        evaluations,
        achievements: Vec::new(),
    }
}

fn full_evaluation() -> EvaluationRecord {
    EvaluationRecord {
        created_at: datetime(2024, 5, 10),
        research: 80.0,
        university_service: 70.0,
        community_service: 60.0,
        teaching_quality: 90.0,
        total_score: 300.0,
        behavior_ratings: vec![
            BehaviorRating {
                capacity: "Institutional Commitment".to_string(),
                points: 85.0,
            },
            BehaviorRating {
                capacity: "collaboration & teamwork".to_string(),
                points: 75.0,
            },
            BehaviorRating {
                capacity: "Professionalism rating".to_string(),
                points: 95.0,
            },
            BehaviorRating {
                capacity: "CLIENT service".to_string(),
                points: 65.0,
            },
            BehaviorRating {
                capacity: "Achieving results".to_string(),
                points: 55.0,
            },
        ],
    }
}

#[test]
fn end_to_end_scoring_through_the_public_api() {
    let appraisals = vec![
        sample_appraisal("alpha", AppraisalStatus::Sent, vec![full_evaluation()]),
        sample_appraisal("beta", AppraisalStatus::New, Vec::new()),
    ];

    let views = score_batch(&appraisals, date(2024, 6, 15));
    assert_eq!(views.len(), 2);

    let scored = &views[0];
    assert_eq!(scored.evaluation.raw_performance, 300.0);
    assert_eq!(scored.evaluation.scaled_performance, 9.0);
    assert_eq!(scored.evaluation.raw_capabilities, 375.0);
    assert_eq!(scored.evaluation.scaled_capabilities, 26.25);
    assert_eq!(scored.evaluation.overall, 17.63);
    assert!(scored.evaluate_enabled, "sent appraisals stay evaluable");

    let unevaluated = &views[1];
    assert_eq!(unevaluated.evaluation.raw_performance, 0.0);
    assert_eq!(unevaluated.evaluation.overall, 0.0);
    assert_eq!(unevaluated.evaluation.behavior_ratings.len(), 5);
    assert!(
        unevaluated.evaluate_enabled,
        "new appraisal inside the final cycle month"
    );
}

#[test]
fn csv_export_matches_the_published_column_contract() {
    let appraisals = vec![sample_appraisal(
        "alpha",
        AppraisalStatus::Sent,
        vec![full_evaluation()],
    )];
    let views = score_batch(&appraisals, date(2024, 6, 15));

    let csv = csv_string(&views).expect("export succeeds");
    let mut lines = csv.lines();

    assert_eq!(lines.next(), Some(EXPORT_COLUMNS.join(",").as_str()));
    let row = lines.next().expect("data row");
    assert!(row.starts_with("Dr alpha,80.00,70.00,60.00,90.00,300.00,9.00"));
    assert!(row.ends_with("375.00,26.25,17.63"));
}

#[test]
fn normalizer_and_eligibility_compose_with_domain_types() {
    let ratings = vec![BehaviorRating {
        capacity: "Deep institutional commitment".to_string(),
        points: 42.0,
    }];
    let normalized = normalize_ratings(&ratings);
    assert_eq!(normalized[0].capacity, Capacity::InstitutionalCommitment);
    assert_eq!(normalized[0].points, 42.0);
    assert!(normalized[1..].iter().all(|score| score.points == 0.0));

    let cycle_end = date(2024, 6, 30);
    assert!(!evaluate_enabled(
        AppraisalStatus::Complete,
        cycle_end,
        date(2024, 6, 15)
    ));
    assert!(evaluate_enabled(
        AppraisalStatus::Sent,
        cycle_end,
        date(2030, 1, 1)
    ));
}
