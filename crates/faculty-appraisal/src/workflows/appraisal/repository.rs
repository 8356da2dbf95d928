use serde::{Deserialize, Serialize};

use super::domain::{Appraisal, AppraisalId, AppraisalStatus};

/// Filter parameters for a role-scoped listing. All fields optional; absent
/// fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalFilter {
    pub department: Option<String>,
    pub cycle_id: Option<String>,
    pub status: Option<AppraisalStatus>,
    pub search: Option<String>,
}

impl AppraisalFilter {
    /// Predicate shared by repository implementations. Search text matches
    /// case-insensitively against the faculty name and email.
    pub fn matches(&self, appraisal: &Appraisal) -> bool {
        if let Some(department) = &self.department {
            if !appraisal.faculty.department.eq_ignore_ascii_case(department) {
                return false;
            }
        }

        if let Some(cycle_id) = &self.cycle_id {
            if &appraisal.cycle.id != cycle_id {
                return false;
            }
        }

        if let Some(status) = self.status {
            if appraisal.status != status {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let name = appraisal.faculty.name.to_lowercase();
                let email = appraisal.faculty.email.to_lowercase();
                if !name.contains(&needle) && !email.contains(&needle) {
                    return false;
                }
            }
        }

        true
    }
}

/// Data-access abstraction supplying appraisal records. Implementations
/// return listings ordered by `updated_at` descending; the scoring engine
/// treats the result as already-resolved input and performs no I/O itself.
pub trait AppraisalRepository: Send + Sync {
    fn list(&self, filter: &AppraisalFilter) -> Result<Vec<Appraisal>, RepositoryError>;
    fn fetch(&self, id: &AppraisalId) -> Result<Option<Appraisal>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
