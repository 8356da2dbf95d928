use crate::infra::{demo_appraisals, parse_date, InMemoryAppraisalRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use faculty_appraisal::error::AppError;
use faculty_appraisal::workflows::appraisal::{
    csv_string, AppraisalFilter, AppraisalService, AppraisalServiceError, AppraisalStatus,
    AppraisalView, Reviewer,
};

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Act as the head of this department instead of the dean
    #[arg(long)]
    pub(crate) as_hod: Option<String>,
    /// Restrict the listing to one department (dean only)
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Restrict the listing to one status (new, in_progress, complete, sent)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Search text matched against faculty name and email
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Evaluation date for the eligibility flags (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) report: ReportArgs,
    /// Write the CSV here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn reviewer(as_hod: Option<String>) -> Reviewer {
    match as_hod {
        Some(department) => Reviewer::Hod { department },
        None => Reviewer::Dean,
    }
}

/// Resolve CLI filter flags. An unknown status fails closed to an empty
/// listing, matching the HTTP surface.
fn resolve_filter(args: &ReportArgs) -> Option<AppraisalFilter> {
    let status = match args.status.as_deref() {
        None => None,
        Some(raw) => match AppraisalStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                eprintln!("unknown status '{raw}', returning no rows");
                return None;
            }
        },
    };

    Some(AppraisalFilter {
        department: args.department.clone(),
        cycle_id: None,
        status,
        search: args.search.clone(),
    })
}

fn demo_service() -> AppraisalService<InMemoryAppraisalRepository> {
    let repository = Arc::new(InMemoryAppraisalRepository::with_records(demo_appraisals()));
    AppraisalService::new(repository)
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let reviewer = reviewer(args.as_hod.clone());

    let views = match resolve_filter(&args) {
        Some(filter) => demo_service().list(&reviewer, filter, today)?,
        None => Vec::new(),
    };

    render_report(&views, &reviewer, today);
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let today = args.report.today.unwrap_or_else(|| Local::now().date_naive());
    let reviewer = reviewer(args.report.as_hod.clone());

    let csv = match resolve_filter(&args.report) {
        Some(filter) => demo_service().export_csv(&reviewer, filter, today)?,
        // Fail closed: header row only.
        None => csv_string(&[]).map_err(AppraisalServiceError::from)?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            println!("wrote appraisal export to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

fn render_report(views: &[AppraisalView], reviewer: &Reviewer, today: NaiveDate) {
    match reviewer {
        Reviewer::Dean => println!("Appraisal report (dean view), evaluated {today}"),
        Reviewer::Hod { department } => {
            println!("Appraisal report for {department}, evaluated {today}")
        }
    }

    if views.is_empty() {
        println!("No appraisals matched the filter.");
        return;
    }

    for view in views {
        let evaluate = if view.evaluate_enabled {
            "evaluate enabled"
        } else {
            "evaluate locked"
        };
        println!(
            "- {} | {} | {} | perf {:.2}/3 | cap {:.2}/7 | overall {:.2}/5 | {}",
            view.id,
            view.instructor,
            view.status_label,
            view.evaluation.scaled_performance,
            view.evaluation.scaled_capabilities,
            view.evaluation.overall,
            evaluate
        );
        for achievement in &view.achievements {
            println!("    {}: {}", achievement.kind_label, achievement.title);
        }
    }
}
