use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::AppraisalId;
use super::export;
use super::repository::{AppraisalFilter, AppraisalRepository, RepositoryError};
use super::scoring::{score_appraisal, score_batch, AppraisalView};

/// The authenticated principal, resolved upstream of this crate. A head of
/// department only sees their own department; a dean sees everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum Reviewer {
    Dean,
    Hod { department: String },
}

impl Reviewer {
    /// Narrow a caller-supplied filter to what this reviewer may see.
    /// An HOD asking for another department is rejected outright; an HOD
    /// with no department filter is scoped to their own.
    fn scope(&self, mut filter: AppraisalFilter) -> Result<AppraisalFilter, AppraisalServiceError> {
        match self {
            Reviewer::Dean => Ok(filter),
            Reviewer::Hod { department } => {
                if let Some(requested) = &filter.department {
                    if !requested.eq_ignore_ascii_case(department) {
                        return Err(AppraisalServiceError::Authorization {
                            department: requested.clone(),
                        });
                    }
                }
                filter.department = Some(department.clone());
                Ok(filter)
            }
        }
    }

    fn may_view_department(&self, department: &str) -> bool {
        match self {
            Reviewer::Dean => true,
            Reviewer::Hod { department: own } => own.eq_ignore_ascii_case(department),
        }
    }
}

/// Service composing the repository with scoring, eligibility, and export.
pub struct AppraisalService<R> {
    repository: Arc<R>,
}

impl<R> AppraisalService<R>
where
    R: AppraisalRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Role-scoped listing of scored appraisal views, preserving the
    /// repository's recency ordering. `today` drives the per-row
    /// evaluate-eligibility flag.
    pub fn list(
        &self,
        reviewer: &Reviewer,
        filter: AppraisalFilter,
        today: NaiveDate,
    ) -> Result<Vec<AppraisalView>, AppraisalServiceError> {
        let filter = reviewer.scope(filter)?;
        let appraisals = self.repository.list(&filter)?;
        Ok(score_batch(&appraisals, today))
    }

    /// Single scored appraisal, or NotFound. An HOD asking for a record
    /// outside their department gets an authorization rejection, not a
    /// record-existence hint.
    pub fn detail(
        &self,
        reviewer: &Reviewer,
        id: &AppraisalId,
        today: NaiveDate,
    ) -> Result<AppraisalView, AppraisalServiceError> {
        let appraisal = self
            .repository
            .fetch(id)?
            .ok_or_else(|| AppraisalServiceError::NotFound { id: id.clone() })?;

        if !reviewer.may_view_department(&appraisal.faculty.department) {
            return Err(AppraisalServiceError::Authorization {
                department: appraisal.faculty.department.clone(),
            });
        }

        Ok(score_appraisal(&appraisal, today))
    }

    /// CSV export of a role-scoped listing, column order per
    /// [`export::EXPORT_COLUMNS`].
    pub fn export_csv(
        &self,
        reviewer: &Reviewer,
        filter: AppraisalFilter,
        today: NaiveDate,
    ) -> Result<String, AppraisalServiceError> {
        let views = self.list(reviewer, filter, today)?;
        Ok(export::csv_string(&views)?)
    }
}

/// Error raised by the appraisal service.
#[derive(Debug, thiserror::Error)]
pub enum AppraisalServiceError {
    #[error("reviewer is not permitted to access department {department}")]
    Authorization { department: String },
    #[error("appraisal {} not found", .id.0)]
    NotFound { id: AppraisalId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}
