//! Applicant registration, tracking-code lookup, and the write-once applicant
//! and recruitment-process evaluations.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod tracking;

pub use domain::{
    Applicant, ApplicantDraft, ApplicantEvaluation, ApplicantEvaluationDraft,
    ApplicantValidationError, DocumentMetadata, PostulationStatus, RecruitmentProcessEvaluation,
    RecruitmentProcessEvaluationDraft, SalaryAppraisal,
};
pub use repository::ApplicantRepository;
pub use router::applicant_router;
pub use service::{ApplicantService, ApplicantServiceError};
pub use tracking::{generate_tracking_code, TRACKING_ALPHABET, TRACKING_CODE_LEN};
