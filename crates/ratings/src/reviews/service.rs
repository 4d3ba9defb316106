use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::directory::{DirectoryClient, DirectoryError};

use super::domain::{
    Complaint, ComplaintDraft, CompanyEvaluation, CompanyEvaluationDraft, ReportingReasonType,
    ValidationError,
};
use super::repository::{EvaluationFilter, RepositoryError, ReviewRepository};
use super::score::{general_ratings, GeneralRatings};

/// Facade composing the directory client, repository, and scoring engine.
pub struct ReviewService<R, D> {
    repository: Arc<R>,
    directory: Arc<D>,
    criteria_count: u32,
}

/// General ratings merged with the directory metadata for the company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyGeneralRatings {
    pub company_id: i64,
    pub company_name: String,
    #[serde(flatten)]
    pub ratings: GeneralRatings,
}

impl<R, D> ReviewService<R, D>
where
    R: ReviewRepository + 'static,
    D: DirectoryClient + 'static,
{
    pub fn new(repository: Arc<R>, directory: Arc<D>, criteria_count: u32) -> Self {
        Self {
            repository,
            directory,
            criteria_count,
        }
    }

    /// Create a company evaluation once the referenced company is confirmed to
    /// exist in the directory. Nothing is persisted on a directory miss.
    pub async fn create_evaluation(
        &self,
        company_id: i64,
        draft: CompanyEvaluationDraft,
    ) -> Result<CompanyEvaluation, ReviewServiceError> {
        draft.validate()?;
        self.directory.find_company(company_id).await?;
        let evaluation = self
            .repository
            .insert_evaluation(company_id, draft.normalized())?;
        info!(company_id, evaluation_id = evaluation.id, "company evaluation created");
        Ok(evaluation)
    }

    pub fn list_evaluations(
        &self,
        company_id: i64,
        filter: &EvaluationFilter,
    ) -> Result<Vec<CompanyEvaluation>, ReviewServiceError> {
        Ok(self.repository.evaluations_for_company(company_id, filter)?)
    }

    /// Aggregate per-criterion averages and the composite score, merged with
    /// the directory record for the company.
    pub async fn general_ratings(
        &self,
        company_id: i64,
    ) -> Result<CompanyGeneralRatings, ReviewServiceError> {
        let company = self.directory.find_company(company_id).await?;
        let evaluations = self.repository.all_evaluations_for_company(company_id)?;
        Ok(CompanyGeneralRatings {
            company_id: company.id,
            company_name: company.name,
            ratings: general_ratings(&evaluations, self.criteria_count),
        })
    }

    pub fn mark_useful(&self, evaluation_id: i64) -> Result<CompanyEvaluation, ReviewServiceError> {
        match self.repository.increment_utility(evaluation_id) {
            Err(RepositoryError::NotFound) => {
                Err(ReviewServiceError::EvaluationNotFound(evaluation_id))
            }
            other => Ok(other?),
        }
    }

    pub fn mark_not_useful(
        &self,
        evaluation_id: i64,
    ) -> Result<CompanyEvaluation, ReviewServiceError> {
        match self.repository.increment_non_utility(evaluation_id) {
            Err(RepositoryError::NotFound) => {
                Err(ReviewServiceError::EvaluationNotFound(evaluation_id))
            }
            other => Ok(other?),
        }
    }

    pub fn reporting_reason_types(
        &self,
    ) -> Result<Vec<ReportingReasonType>, ReviewServiceError> {
        Ok(self.repository.reporting_reason_types()?)
    }

    /// File a complaint against an evaluation. Both the reason type and the
    /// evaluation must exist.
    pub fn file_complaint(
        &self,
        evaluation_id: i64,
        draft: ComplaintDraft,
    ) -> Result<Complaint, ReviewServiceError> {
        draft.validate()?;
        self.repository
            .reporting_reason_type(draft.reporting_reason_type_id)?
            .ok_or(ReviewServiceError::ReasonTypeNotFound(
                draft.reporting_reason_type_id,
            ))?;
        self.repository
            .evaluation(evaluation_id)?
            .ok_or(ReviewServiceError::EvaluationNotFound(evaluation_id))?;

        let mut draft = draft;
        draft.email = draft.email.trim().to_lowercase();
        let complaint = self.repository.insert_complaint(evaluation_id, draft)?;
        info!(evaluation_id, complaint_id = complaint.id, "complaint filed");
        Ok(complaint)
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("company evaluation {0} not found")]
    EvaluationNotFound(i64),
    #[error("reporting reason type {0} not found")]
    ReasonTypeNotFound(i64),
}
