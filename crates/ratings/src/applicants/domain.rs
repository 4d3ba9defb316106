use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reviews::domain::{validate_email, RatingCategory, SalaryFrequency};

/// Metadata for a document stored by the upload collaborator. Only the
/// declared content type is checked here; the bytes never pass through this
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub content_type: String,
    pub storage_key: String,
}

impl DocumentMetadata {
    fn require_pdf(&self, field: &'static str) -> Result<(), ApplicantValidationError> {
        let parsed: mime::Mime = self
            .content_type
            .parse()
            .map_err(|_| ApplicantValidationError::UnsupportedDocumentType {
                field,
                content_type: self.content_type.clone(),
            })?;
        if parsed != mime::APPLICATION_PDF {
            return Err(ApplicantValidationError::UnsupportedDocumentType {
                field,
                content_type: self.content_type.clone(),
            });
        }
        Ok(())
    }
}

/// Registration payload for a new applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantDraft {
    pub vacancy_id: i64,
    pub name: String,
    pub paternal_last_name: String,
    pub maternal_last_name: String,
    pub email: String,
    pub cellphone: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub cv: DocumentMetadata,
    #[serde(default)]
    pub motivation_letter: Option<DocumentMetadata>,
}

impl ApplicantDraft {
    pub fn validate(&self) -> Result<(), ApplicantValidationError> {
        for (field, value, max) in [
            ("name", &self.name, 40usize),
            ("paternal_last_name", &self.paternal_last_name, 40),
            ("maternal_last_name", &self.maternal_last_name, 40),
            ("country", &self.country, 70),
            ("city", &self.city, 70),
        ] {
            let len = value.trim().chars().count();
            if len == 0 || len > max {
                return Err(ApplicantValidationError::FieldLength { field, max });
            }
        }
        if self.cellphone.trim().is_empty() || self.cellphone.trim().chars().count() > 13 {
            return Err(ApplicantValidationError::FieldLength {
                field: "cellphone",
                max: 13,
            });
        }
        validate_email(&self.email).map_err(|_| ApplicantValidationError::MalformedEmail)?;
        self.cv.require_pdf("cv")?;
        if let Some(letter) = &self.motivation_letter {
            letter.require_pdf("motivation_letter")?;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.paternal_last_name = self.paternal_last_name.trim().to_string();
        self.maternal_last_name = self.maternal_last_name.trim().to_string();
        self
    }
}

/// A registered applicant. The tracking code plus paternal last name is the
/// public lookup key handed back to the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i64,
    pub vacancy_id: i64,
    pub name: String,
    pub paternal_last_name: String,
    pub maternal_last_name: String,
    pub email: String,
    pub cellphone: String,
    pub linkedin_url: Option<String>,
    pub country: String,
    pub city: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub cv_url: String,
    pub motivation_letter_url: Option<String>,
    pub tracking_code: String,
    pub postulation_status_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Reference row in the applicant pipeline ("Applied", "Interview", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostulationStatus {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Company-authored evaluation of an applicant after an interview. Write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantEvaluationDraft {
    pub company_id: i64,
    pub applicant_name: String,
    pub is_hired: bool,
    pub communication_rating: u8,
    pub confidence_rating: u8,
    pub negotiation_rating: u8,
    pub motivation_rating: u8,
    pub self_knowledge_rating: u8,
    pub hard_skill_rating: u8,
}

impl ApplicantEvaluationDraft {
    pub fn validate(&self) -> Result<(), ApplicantValidationError> {
        let name_len = self.applicant_name.trim().chars().count();
        if name_len == 0 || name_len > 50 {
            return Err(ApplicantValidationError::FieldLength {
                field: "applicant_name",
                max: 50,
            });
        }
        for (field, value) in [
            ("communication_rating", self.communication_rating),
            ("confidence_rating", self.confidence_rating),
            ("negotiation_rating", self.negotiation_rating),
            ("motivation_rating", self.motivation_rating),
            ("self_knowledge_rating", self.self_knowledge_rating),
            ("hard_skill_rating", self.hard_skill_rating),
        ] {
            if !(1..=5).contains(&value) {
                return Err(ApplicantValidationError::RatingOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantEvaluation {
    pub id: i64,
    pub applicant_id: i64,
    pub company_id: i64,
    pub applicant_name: String,
    pub is_hired: bool,
    pub communication_rating: u8,
    pub confidence_rating: u8,
    pub negotiation_rating: u8,
    pub motivation_rating: u8,
    pub self_knowledge_rating: u8,
    pub hard_skill_rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Coarse salary appraisal used by recruitment-process evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryAppraisal {
    High,
    Average,
    Low,
}

impl SalaryAppraisal {
    pub const fn label(self) -> &'static str {
        match self {
            SalaryAppraisal::High => "High",
            SalaryAppraisal::Average => "Average",
            SalaryAppraisal::Low => "Low",
        }
    }
}

/// Applicant-authored evaluation of how a company ran its recruitment process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentProcessEvaluationDraft {
    pub job_title: String,
    pub improvement_content: String,
    pub salary_evaluation_rating: SalaryAppraisal,
    pub allows_remote_work: bool,
    pub interview_response_time_rating: RatingCategory,
    pub job_description_rating: RatingCategory,
    pub is_legally_company: bool,
    pub amount_of_recruitment_time: u16,
    pub recruitment_process_period: SalaryFrequency,
}

impl RecruitmentProcessEvaluationDraft {
    pub fn validate(&self) -> Result<(), ApplicantValidationError> {
        let title_len = self.job_title.trim().chars().count();
        if !(3..=70).contains(&title_len) {
            return Err(ApplicantValidationError::FieldLength {
                field: "job_title",
                max: 70,
            });
        }
        let content_len = self.improvement_content.trim().chars().count();
        if !(100..=250).contains(&content_len) {
            return Err(ApplicantValidationError::ImprovementContentLength);
        }
        if !(1..=365).contains(&self.amount_of_recruitment_time) {
            return Err(ApplicantValidationError::RecruitmentTimeOutOfRange {
                value: self.amount_of_recruitment_time,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentProcessEvaluation {
    pub id: i64,
    pub applicant_id: i64,
    pub job_title: String,
    pub improvement_content: String,
    pub salary_evaluation_rating: String,
    pub allows_remote_work: bool,
    pub interview_response_time_rating: String,
    pub job_description_rating: String,
    pub is_legally_company: bool,
    pub amount_of_recruitment_time: u16,
    pub recruitment_process_period: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicantValidationError {
    #[error("{field} must be non-empty and at most {max} characters")]
    FieldLength { field: &'static str, max: usize },
    #[error("e-mail address is malformed")]
    MalformedEmail,
    #[error("{field} must be a {} document, got '{content_type}'", mime::APPLICATION_PDF)]
    UnsupportedDocumentType {
        field: &'static str,
        content_type: String,
    },
    #[error("{field} must be between 1 and 5, got {value}")]
    RatingOutOfRange { field: &'static str, value: u8 },
    #[error("improvement_content must be between 100 and 250 characters")]
    ImprovementContentLength,
    #[error("amount_of_recruitment_time must be between 1 and 365, got {value}")]
    RecruitmentTimeOutOfRange { value: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv() -> DocumentMetadata {
        DocumentMetadata {
            name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            storage_key: "uploads/cv/8f3a.pdf".to_string(),
        }
    }

    fn draft() -> ApplicantDraft {
        ApplicantDraft {
            vacancy_id: 4,
            name: "Mariana".to_string(),
            paternal_last_name: "Rodriguez".to_string(),
            maternal_last_name: "Herrera".to_string(),
            email: "Mariana@Example.com".to_string(),
            cellphone: "5512345678".to_string(),
            linkedin_url: Some("https://linkedin.com/in/mariana".to_string()),
            country: "Mexico".to_string(),
            city: "Guadalajara".to_string(),
            job_title: Some("Backend Developer".to_string()),
            company: None,
            cv: cv(),
            motivation_letter: None,
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn rejects_non_pdf_documents() {
        let mut bad = draft();
        bad.cv.content_type = "image/png".to_string();
        assert!(matches!(
            bad.validate(),
            Err(ApplicantValidationError::UnsupportedDocumentType { field: "cv", .. })
        ));
    }

    #[test]
    fn normalization_lowercases_email() {
        assert_eq!(draft().normalized().email, "mariana@example.com");
    }

    #[test]
    fn interview_ratings_must_stay_on_the_five_point_scale() {
        let evaluation = ApplicantEvaluationDraft {
            company_id: 1,
            applicant_name: "Mariana Rodriguez Herrera".to_string(),
            is_hired: true,
            communication_rating: 5,
            confidence_rating: 3,
            negotiation_rating: 0,
            motivation_rating: 5,
            self_knowledge_rating: 5,
            hard_skill_rating: 4,
        };
        assert!(matches!(
            evaluation.validate(),
            Err(ApplicantValidationError::RatingOutOfRange {
                field: "negotiation_rating",
                value: 0,
            })
        ));
    }

    #[test]
    fn improvement_content_length_is_bounded() {
        let evaluation = RecruitmentProcessEvaluationDraft {
            job_title: "Backend Developer".to_string(),
            improvement_content: "Too short".to_string(),
            salary_evaluation_rating: SalaryAppraisal::Average,
            allows_remote_work: true,
            interview_response_time_rating: RatingCategory::Regular,
            job_description_rating: RatingCategory::Good,
            is_legally_company: true,
            amount_of_recruitment_time: 2,
            recruitment_process_period: SalaryFrequency::Month,
        };
        assert_eq!(
            evaluation.validate(),
            Err(ApplicantValidationError::ImprovementContentLength)
        );
    }
}
