use crate::reviews::repository::RepositoryError;

use super::domain::{
    Applicant, ApplicantDraft, ApplicantEvaluation, ApplicantEvaluationDraft, PostulationStatus,
    RecruitmentProcessEvaluation, RecruitmentProcessEvaluationDraft,
};

/// Storage contract for the applicants area.
pub trait ApplicantRepository: Send + Sync {
    /// Persist a registration. The implementation assigns the seeded initial
    /// postulation status ("Applied").
    fn insert_applicant(
        &self,
        draft: ApplicantDraft,
        tracking_code: String,
    ) -> Result<Applicant, RepositoryError>;

    fn applicant(&self, id: i64) -> Result<Option<Applicant>, RepositoryError>;

    /// Lookup by the public key: tracking code plus paternal last name, both
    /// matching exactly (surname comparison is case-insensitive).
    fn applicant_by_tracking(
        &self,
        tracking_code: &str,
        paternal_last_name: &str,
    ) -> Result<Option<Applicant>, RepositoryError>;

    fn postulation_statuses(&self) -> Result<Vec<PostulationStatus>, RepositoryError>;

    fn insert_applicant_evaluation(
        &self,
        applicant_id: i64,
        draft: ApplicantEvaluationDraft,
    ) -> Result<ApplicantEvaluation, RepositoryError>;

    fn insert_recruitment_evaluation(
        &self,
        applicant_id: i64,
        draft: RecruitmentProcessEvaluationDraft,
    ) -> Result<RecruitmentProcessEvaluation, RepositoryError>;
}
