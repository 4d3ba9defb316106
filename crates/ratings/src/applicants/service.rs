use std::sync::Arc;

use tracing::info;

use crate::directory::{DirectoryClient, DirectoryError};
use crate::reviews::repository::RepositoryError;

use super::domain::{
    Applicant, ApplicantDraft, ApplicantEvaluation, ApplicantEvaluationDraft,
    ApplicantValidationError, PostulationStatus, RecruitmentProcessEvaluation,
    RecruitmentProcessEvaluationDraft,
};
use super::repository::ApplicantRepository;
use super::tracking::generate_tracking_code;

/// Facade for applicant registration, tracking, and evaluations.
pub struct ApplicantService<R, D> {
    repository: Arc<R>,
    directory: Arc<D>,
}

impl<R, D> ApplicantService<R, D>
where
    R: ApplicantRepository + 'static,
    D: DirectoryClient + 'static,
{
    pub fn new(repository: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Register an applicant against an existing vacancy. The tracking code is
    /// generated here; collisions are not checked (codes are lookup keys only
    /// in combination with the surname).
    pub async fn register(
        &self,
        draft: ApplicantDraft,
    ) -> Result<Applicant, ApplicantServiceError> {
        draft.validate()?;
        self.directory.find_vacancy(draft.vacancy_id).await?;
        let tracking_code = generate_tracking_code();
        let applicant = self
            .repository
            .insert_applicant(draft.normalized(), tracking_code)?;
        info!(
            applicant_id = applicant.id,
            vacancy_id = applicant.vacancy_id,
            "applicant registered"
        );
        Ok(applicant)
    }

    pub fn track(
        &self,
        tracking_code: &str,
        paternal_last_name: &str,
    ) -> Result<Applicant, ApplicantServiceError> {
        self.repository
            .applicant_by_tracking(tracking_code, paternal_last_name)?
            .ok_or(ApplicantServiceError::ApplicationNotFound)
    }

    pub fn postulation_statuses(
        &self,
    ) -> Result<Vec<PostulationStatus>, ApplicantServiceError> {
        Ok(self.repository.postulation_statuses()?)
    }

    /// Record a company's evaluation of an applicant. Both the applicant and
    /// the evaluating company must exist.
    pub async fn create_applicant_evaluation(
        &self,
        applicant_id: i64,
        draft: ApplicantEvaluationDraft,
    ) -> Result<ApplicantEvaluation, ApplicantServiceError> {
        draft.validate()?;
        self.repository
            .applicant(applicant_id)?
            .ok_or(ApplicantServiceError::ApplicantNotFound(applicant_id))?;
        self.directory.find_company(draft.company_id).await?;
        Ok(self
            .repository
            .insert_applicant_evaluation(applicant_id, draft)?)
    }

    pub fn create_recruitment_evaluation(
        &self,
        applicant_id: i64,
        draft: RecruitmentProcessEvaluationDraft,
    ) -> Result<RecruitmentProcessEvaluation, ApplicantServiceError> {
        draft.validate()?;
        self.repository
            .applicant(applicant_id)?
            .ok_or(ApplicantServiceError::ApplicantNotFound(applicant_id))?;
        Ok(self
            .repository
            .insert_recruitment_evaluation(applicant_id, draft)?)
    }
}

/// Error raised by the applicant service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicantServiceError {
    #[error(transparent)]
    Validation(#[from] ApplicantValidationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("applicant {0} not found")]
    ApplicantNotFound(i64),
    #[error("no application matches that tracking code and surname")]
    ApplicationNotFound,
}
