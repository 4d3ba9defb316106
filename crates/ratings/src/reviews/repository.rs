use serde::Deserialize;

use super::domain::{
    Complaint, ComplaintDraft, CompanyEvaluation, CompanyEvaluationDraft, ReportingReasonType,
};

/// Sort order for evaluation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationSort {
    /// Most useful first (utility counter, descending).
    Helpfulness,
    /// Newest first.
    #[default]
    Date,
}

/// Optional filters and paging for company evaluation listings.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationFilter {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub sort: EvaluationSort,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for EvaluationFilter {
    fn default() -> Self {
        Self {
            job_title: None,
            content: None,
            job_location: None,
            sort: EvaluationSort::default(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

/// Storage contract for the reviews area. Implementations must make counter
/// increments atomic at the storage layer; read-modify-write is not acceptable.
pub trait ReviewRepository: Send + Sync {
    fn insert_evaluation(
        &self,
        company_id: i64,
        draft: CompanyEvaluationDraft,
    ) -> Result<CompanyEvaluation, RepositoryError>;

    fn evaluation(&self, id: i64) -> Result<Option<CompanyEvaluation>, RepositoryError>;

    fn evaluations_for_company(
        &self,
        company_id: i64,
        filter: &EvaluationFilter,
    ) -> Result<Vec<CompanyEvaluation>, RepositoryError>;

    /// Unfiltered, unpaginated listing used by the aggregation engine.
    fn all_evaluations_for_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<CompanyEvaluation>, RepositoryError>;

    fn increment_utility(&self, id: i64) -> Result<CompanyEvaluation, RepositoryError>;

    fn increment_non_utility(&self, id: i64) -> Result<CompanyEvaluation, RepositoryError>;

    fn reporting_reason_types(&self) -> Result<Vec<ReportingReasonType>, RepositoryError>;

    fn reporting_reason_type(
        &self,
        id: i64,
    ) -> Result<Option<ReportingReasonType>, RepositoryError>;

    fn insert_complaint(
        &self,
        evaluation_id: i64,
        draft: ComplaintDraft,
    ) -> Result<Complaint, RepositoryError>;
}

/// Error enumeration for storage failures, shared by both repository traits.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
