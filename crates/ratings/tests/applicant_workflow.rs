//! Integration scenarios for applicant registration, tracking-code lookup,
//! and the two write-once evaluation records.

mod common {
    use ratings::applicants::{ApplicantDraft, DocumentMetadata};
    use ratings::directory::{DirectoryClient, DirectoryEntry, DirectoryError, DirectoryKind};

    pub(super) struct StubDirectory {
        pub(super) companies: Vec<DirectoryEntry>,
        pub(super) vacancies: Vec<DirectoryEntry>,
    }

    impl DirectoryClient for StubDirectory {
        async fn find_company(&self, id: i64) -> Result<DirectoryEntry, DirectoryError> {
            self.companies
                .iter()
                .find(|entry| entry.id == id)
                .cloned()
                .ok_or(DirectoryError::NotFound {
                    kind: DirectoryKind::Company,
                    id,
                })
        }

        async fn find_vacancy(&self, id: i64) -> Result<DirectoryEntry, DirectoryError> {
            self.vacancies
                .iter()
                .find(|entry| entry.id == id)
                .cloned()
                .ok_or(DirectoryError::NotFound {
                    kind: DirectoryKind::Vacancy,
                    id,
                })
        }
    }

    pub(super) fn directory() -> StubDirectory {
        StubDirectory {
            companies: vec![DirectoryEntry {
                id: 1,
                name: "Globant".to_string(),
            }],
            vacancies: vec![DirectoryEntry {
                id: 4,
                name: "Backend Developer".to_string(),
            }],
        }
    }

    pub(super) fn registration() -> ApplicantDraft {
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
            cv: DocumentMetadata {
                name: "cv.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                storage_key: "uploads/cv/8f3a.pdf".to_string(),
            },
            motivation_letter: None,
        }
    }
}

use std::sync::Arc;

use common::{directory, registration, StubDirectory};
use ratings::applicants::{
    ApplicantEvaluationDraft, ApplicantService, ApplicantServiceError,
    RecruitmentProcessEvaluationDraft, SalaryAppraisal, TRACKING_ALPHABET, TRACKING_CODE_LEN,
};
use ratings::directory::DirectoryError;
use ratings::reviews::{RatingCategory, SalaryFrequency};
use ratings::storage::SqliteStore;

fn service() -> Arc<ApplicantService<SqliteStore, StubDirectory>> {
    let store = Arc::new(SqliteStore::open_in_memory().expect("store opens"));
    Arc::new(ApplicantService::new(store, Arc::new(directory())))
}

#[tokio::test]
async fn registration_assigns_tracking_code_and_applied_status() {
    let service = service();
    let applicant = service
        .register(registration())
        .await
        .expect("registration persists");

    assert_eq!(applicant.email, "mariana@example.com");
    assert_eq!(applicant.tracking_code.len(), TRACKING_CODE_LEN);
    assert!(applicant
        .tracking_code
        .bytes()
        .all(|byte| TRACKING_ALPHABET.contains(&byte)));

    let statuses = service.postulation_statuses().expect("seeded");
    let applied = statuses
        .iter()
        .find(|status| status.name == "Applied")
        .expect("Applied seeded");
    assert_eq!(applicant.postulation_status_id, applied.id);
}

#[tokio::test]
async fn registration_requires_a_known_vacancy() {
    let service = service();
    let mut draft = registration();
    draft.vacancy_id = 77;

    let error = service
        .register(draft)
        .await
        .expect_err("vacancy 77 is not in the directory");
    assert!(matches!(
        error,
        ApplicantServiceError::Directory(DirectoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn registration_rejects_non_pdf_documents() {
    let service = service();
    let mut draft = registration();
    draft.cv.content_type = "application/msword".to_string();

    let error = service
        .register(draft)
        .await
        .expect_err("cv must be a pdf");
    assert!(matches!(error, ApplicantServiceError::Validation(_)));
}

#[tokio::test]
async fn tracking_lookup_needs_code_and_surname() {
    let service = service();
    let applicant = service
        .register(registration())
        .await
        .expect("registration persists");

    let found = service
        .track(&applicant.tracking_code, "Rodriguez")
        .expect("lookup succeeds");
    assert_eq!(found.id, applicant.id);

    let wrong_surname = service.track(&applicant.tracking_code, "Lopez");
    assert!(matches!(
        wrong_surname,
        Err(ApplicantServiceError::ApplicationNotFound)
    ));
}

#[tokio::test]
async fn applicant_evaluation_checks_applicant_and_company() {
    let service = service();
    let applicant = service
        .register(registration())
        .await
        .expect("registration persists");

    let draft = ApplicantEvaluationDraft {
        company_id: 1,
        applicant_name: "Mariana Rodriguez Herrera".to_string(),
        is_hired: true,
        communication_rating: 5,
        confidence_rating: 3,
        negotiation_rating: 4,
        motivation_rating: 5,
        self_knowledge_rating: 5,
        hard_skill_rating: 4,
    };

    let stored = service
        .create_applicant_evaluation(applicant.id, draft.clone())
        .await
        .expect("evaluation persists");
    assert_eq!(stored.applicant_id, applicant.id);
    assert_eq!(stored.communication_rating, 5);

    let missing_applicant = service
        .create_applicant_evaluation(999, draft.clone())
        .await;
    assert!(matches!(
        missing_applicant,
        Err(ApplicantServiceError::ApplicantNotFound(999))
    ));

    let mut out_of_range = draft;
    out_of_range.hard_skill_rating = 6;
    let error = service
        .create_applicant_evaluation(applicant.id, out_of_range)
        .await;
    assert!(matches!(error, Err(ApplicantServiceError::Validation(_))));
}

#[tokio::test]
async fn recruitment_evaluation_is_scoped_to_an_applicant() {
    let service = service();
    let applicant = service
        .register(registration())
        .await
        .expect("registration persists");

    let draft = RecruitmentProcessEvaluationDraft {
        job_title: "Backend Developer".to_string(),
        improvement_content: "The interview process was fine overall, but the response time \
                              between stages should improve; two weeks without any update is \
                              too long for candidates."
            .to_string(),
        salary_evaluation_rating: SalaryAppraisal::Average,
        allows_remote_work: true,
        interview_response_time_rating: RatingCategory::Regular,
        job_description_rating: RatingCategory::Good,
        is_legally_company: true,
        amount_of_recruitment_time: 2,
        recruitment_process_period: SalaryFrequency::Month,
    };

    let stored = service
        .create_recruitment_evaluation(applicant.id, draft.clone())
        .expect("evaluation persists");
    assert_eq!(stored.applicant_id, applicant.id);
    assert_eq!(stored.salary_evaluation_rating, "Average");

    let missing = service.create_recruitment_evaluation(999, draft);
    assert!(matches!(
        missing,
        Err(ApplicantServiceError::ApplicantNotFound(999))
    ));
}
