//! Company evaluations: submission, complaints, helpfulness counters, and the
//! weighted rating aggregation exposed as "general ratings".

pub mod domain;
pub mod repository;
pub mod router;
pub mod score;
pub mod service;

pub use domain::{
    Complaint, ComplaintDraft, CompanyEvaluation, CompanyEvaluationDraft, CurrencyCode,
    RatingCategory, ReportingReasonType, SalaryFrequency, ValidationError,
};
pub use repository::{EvaluationFilter, EvaluationSort, RepositoryError, ReviewRepository};
pub use router::review_router;
pub use score::{composite_score, criterion_average, general_ratings, GeneralRatings, RatingCriterion};
pub use service::{CompanyGeneralRatings, ReviewService, ReviewServiceError};
