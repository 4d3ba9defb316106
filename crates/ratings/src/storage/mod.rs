//! SQLite persistence for both repository traits.
//!
//! One connection guarded by a mutex; every trait method locks once and works
//! through helpers that borrow the connection, so no method re-enters the
//! lock. Counter increments are single UPDATE statements, never
//! read-modify-write.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use crate::applicants::domain::{
    Applicant, ApplicantDraft, ApplicantEvaluation, ApplicantEvaluationDraft, PostulationStatus,
    RecruitmentProcessEvaluation, RecruitmentProcessEvaluationDraft,
};
use crate::applicants::repository::ApplicantRepository;
use crate::reviews::domain::{
    Complaint, ComplaintDraft, CompanyEvaluation, CompanyEvaluationDraft, ReportingReasonType,
};
use crate::reviews::repository::{
    EvaluationFilter, EvaluationSort, RepositoryError, ReviewRepository,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS company_evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL,
    job_title TEXT NOT NULL,
    content_type TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT,
    is_still_working_here INTEGER NOT NULL DEFAULT 0,
    applicant_email TEXT NOT NULL,
    career_development_rating TEXT NOT NULL,
    diversity_equal_opportunity_rating TEXT NOT NULL,
    working_environment_rating TEXT NOT NULL,
    salary_rating TEXT NOT NULL,
    job_location TEXT NOT NULL,
    salary REAL NOT NULL,
    currency_type TEXT NOT NULL,
    salary_frequency TEXT NOT NULL,
    recommended_a_friend INTEGER NOT NULL,
    allows_remote_work INTEGER NOT NULL,
    is_legally_company INTEGER NOT NULL,
    utility_counter INTEGER NOT NULL DEFAULT 0 CHECK (utility_counter >= 0),
    non_utility_counter INTEGER NOT NULL DEFAULT 0 CHECK (non_utility_counter >= 0),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS reporting_reason_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS complaints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    reporting_reason_type_id INTEGER NOT NULL REFERENCES reporting_reason_types(id),
    problem_description TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS company_evaluation_complaints (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_evaluation_id INTEGER NOT NULL REFERENCES company_evaluations(id),
    complaint_id INTEGER NOT NULL REFERENCES complaints(id)
);

CREATE TABLE IF NOT EXISTS postulation_statuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS applicants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vacancy_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    paternal_last_name TEXT NOT NULL,
    maternal_last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    cellphone TEXT NOT NULL,
    linkedin_url TEXT,
    country TEXT NOT NULL,
    city TEXT NOT NULL,
    job_title TEXT,
    company TEXT,
    cv_url TEXT NOT NULL,
    motivation_letter_url TEXT,
    tracking_code TEXT NOT NULL,
    postulation_status_id INTEGER NOT NULL REFERENCES postulation_statuses(id),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS applicant_evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    applicant_id INTEGER NOT NULL REFERENCES applicants(id),
    company_id INTEGER NOT NULL,
    applicant_name TEXT NOT NULL,
    is_hired INTEGER NOT NULL,
    communication_rating INTEGER NOT NULL,
    confidence_rating INTEGER NOT NULL,
    negotiation_rating INTEGER NOT NULL,
    motivation_rating INTEGER NOT NULL,
    self_knowledge_rating INTEGER NOT NULL,
    hard_skill_rating INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recruitment_process_evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    applicant_id INTEGER NOT NULL REFERENCES applicants(id),
    job_title TEXT NOT NULL,
    improvement_content TEXT NOT NULL,
    salary_evaluation_rating TEXT NOT NULL,
    allows_remote_work INTEGER NOT NULL,
    interview_response_time_rating TEXT NOT NULL,
    job_description_rating TEXT NOT NULL,
    is_legally_company INTEGER NOT NULL,
    amount_of_recruitment_time INTEGER NOT NULL,
    recruitment_process_period TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_company_evaluations_company
    ON company_evaluations(company_id);
CREATE INDEX IF NOT EXISTS idx_applicants_tracking
    ON applicants(tracking_code);
CREATE INDEX IF NOT EXISTS idx_evaluation_complaints_evaluation
    ON company_evaluation_complaints(company_evaluation_id);
"#;

const REPORTING_REASON_SEED: [&str; 4] = [
    "Suspicious, spam or fake",
    "Harassment or incitement of violence",
    "Offensive or discriminatory content",
    "Reveals private personal information",
];

const POSTULATION_STATUS_SEED: [&str; 5] =
    ["Applied", "In Review", "Interview", "Rejected", "Hired"];

const EVALUATION_COLUMNS: &str = "id, company_id, job_title, content_type, start_date, end_date, \
     is_still_working_here, applicant_email, career_development_rating, \
     diversity_equal_opportunity_rating, working_environment_rating, salary_rating, \
     job_location, salary, currency_type, salary_frequency, recommended_a_friend, \
     allows_remote_work, is_legally_company, utility_counter, non_utility_counter, created_at";

const APPLICANT_COLUMNS: &str = "id, vacancy_id, name, paternal_last_name, maternal_last_name, \
     email, cellphone, linkedin_url, country, city, job_title, company, cv_url, \
     motivation_letter_url, tracking_code, postulation_status_id, created_at";

/// SQLite-backed implementation of both repository traits.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if necessary) the database at `path` and apply the
    /// schema and reference seeds.
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch(SCHEMA)?;
        for name in REPORTING_REASON_SEED {
            conn.execute(
                "INSERT OR IGNORE INTO reporting_reason_types (name) VALUES (?1)",
                params![name],
            )?;
        }
        for name in POSTULATION_STATUS_SEED {
            conn.execute(
                "INSERT OR IGNORE INTO postulation_statuses (name) VALUES (?1)",
                params![name],
            )?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound,
            other => RepositoryError::Unavailable(other.to_string()),
        }
    }
}

fn evaluation_from_row(row: &Row<'_>) -> rusqlite::Result<CompanyEvaluation> {
    Ok(CompanyEvaluation {
        id: row.get(0)?,
        company_id: row.get(1)?,
        job_title: row.get(2)?,
        content_type: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        is_still_working_here: row.get(6)?,
        applicant_email: row.get(7)?,
        career_development_rating: row.get(8)?,
        diversity_equal_opportunity_rating: row.get(9)?,
        working_environment_rating: row.get(10)?,
        salary_rating: row.get(11)?,
        job_location: row.get(12)?,
        salary: row.get(13)?,
        currency_type: row.get(14)?,
        salary_frequency: row.get(15)?,
        recommended_a_friend: row.get(16)?,
        allows_remote_work: row.get(17)?,
        is_legally_company: row.get(18)?,
        utility_counter: row.get(19)?,
        non_utility_counter: row.get(20)?,
        created_at: row.get(21)?,
    })
}

fn applicant_from_row(row: &Row<'_>) -> rusqlite::Result<Applicant> {
    Ok(Applicant {
        id: row.get(0)?,
        vacancy_id: row.get(1)?,
        name: row.get(2)?,
        paternal_last_name: row.get(3)?,
        maternal_last_name: row.get(4)?,
        email: row.get(5)?,
        cellphone: row.get(6)?,
        linkedin_url: row.get(7)?,
        country: row.get(8)?,
        city: row.get(9)?,
        job_title: row.get(10)?,
        company: row.get(11)?,
        cv_url: row.get(12)?,
        motivation_letter_url: row.get(13)?,
        tracking_code: row.get(14)?,
        postulation_status_id: row.get(15)?,
        created_at: row.get(16)?,
    })
}

fn evaluation_by_id(
    conn: &Connection,
    id: i64,
) -> Result<Option<CompanyEvaluation>, RepositoryError> {
    let sql = format!("SELECT {EVALUATION_COLUMNS} FROM company_evaluations WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id], evaluation_from_row)
        .optional()?)
}

fn applicant_by_id(conn: &Connection, id: i64) -> Result<Option<Applicant>, RepositoryError> {
    let sql = format!("SELECT {APPLICANT_COLUMNS} FROM applicants WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id], applicant_from_row)
        .optional()?)
}

fn increment_counter(
    conn: &Connection,
    id: i64,
    column: &str,
) -> Result<CompanyEvaluation, RepositoryError> {
    // Single statement so concurrent increments cannot lose updates.
    let sql = format!("UPDATE company_evaluations SET {column} = {column} + 1 WHERE id = ?1");
    let changed = conn.execute(&sql, params![id])?;
    if changed == 0 {
        return Err(RepositoryError::NotFound);
    }
    evaluation_by_id(conn, id)?.ok_or(RepositoryError::NotFound)
}

impl ReviewRepository for SqliteStore {
    fn insert_evaluation(
        &self,
        company_id: i64,
        draft: CompanyEvaluationDraft,
    ) -> Result<CompanyEvaluation, RepositoryError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO company_evaluations (
                company_id, job_title, content_type, start_date, end_date,
                is_still_working_here, applicant_email, career_development_rating,
                diversity_equal_opportunity_rating, working_environment_rating,
                salary_rating, job_location, salary, currency_type, salary_frequency,
                recommended_a_friend, allows_remote_work, is_legally_company, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                company_id,
                draft.job_title,
                draft.content_type,
                draft.start_date,
                draft.end_date,
                draft.is_still_working_here,
                draft.applicant_email,
                draft.career_development_rating.label(),
                draft.diversity_equal_opportunity_rating.label(),
                draft.working_environment_rating.label(),
                draft.salary_rating.label(),
                draft.job_location,
                draft.salary,
                draft.currency_type.code(),
                draft.salary_frequency.label(),
                draft.recommended_a_friend,
                draft.allows_remote_work,
                draft.is_legally_company,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        evaluation_by_id(&conn, id)?.ok_or(RepositoryError::NotFound)
    }

    fn evaluation(&self, id: i64) -> Result<Option<CompanyEvaluation>, RepositoryError> {
        let conn = self.lock();
        evaluation_by_id(&conn, id)
    }

    fn evaluations_for_company(
        &self,
        company_id: i64,
        filter: &EvaluationFilter,
    ) -> Result<Vec<CompanyEvaluation>, RepositoryError> {
        let conn = self.lock();

        let title_pattern = filter.job_title.as_ref().map(|v| format!("%{v}%"));
        let content_pattern = filter.content.as_ref().map(|v| format!("%{v}%"));
        let location_pattern = filter.job_location.as_ref().map(|v| format!("%{v}%"));
        let limit = i64::from(filter.page_size);
        let offset = i64::from(filter.page.saturating_sub(1)) * limit;

        let mut sql =
            format!("SELECT {EVALUATION_COLUMNS} FROM company_evaluations WHERE company_id = ?");
        let mut bindings: Vec<&dyn ToSql> = vec![&company_id];
        if let Some(pattern) = &title_pattern {
            sql.push_str(" AND job_title LIKE ?");
            bindings.push(pattern);
        }
        if let Some(pattern) = &content_pattern {
            sql.push_str(" AND content_type LIKE ?");
            bindings.push(pattern);
        }
        if let Some(pattern) = &location_pattern {
            sql.push_str(" AND job_location LIKE ?");
            bindings.push(pattern);
        }
        sql.push_str(match filter.sort {
            EvaluationSort::Helpfulness => " ORDER BY utility_counter DESC, id DESC",
            EvaluationSort::Date => " ORDER BY created_at DESC, id DESC",
        });
        sql.push_str(" LIMIT ? OFFSET ?");
        bindings.push(&limit);
        bindings.push(&offset);

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(&bindings[..], evaluation_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn all_evaluations_for_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<CompanyEvaluation>, RepositoryError> {
        let conn = self.lock();
        let sql = format!(
            "SELECT {EVALUATION_COLUMNS} FROM company_evaluations WHERE company_id = ?1 ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![company_id], evaluation_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn increment_utility(&self, id: i64) -> Result<CompanyEvaluation, RepositoryError> {
        let conn = self.lock();
        increment_counter(&conn, id, "utility_counter")
    }

    fn increment_non_utility(&self, id: i64) -> Result<CompanyEvaluation, RepositoryError> {
        let conn = self.lock();
        increment_counter(&conn, id, "non_utility_counter")
    }

    fn reporting_reason_types(&self) -> Result<Vec<ReportingReasonType>, RepositoryError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM reporting_reason_types ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(ReportingReasonType {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn reporting_reason_type(
        &self,
        id: i64,
    ) -> Result<Option<ReportingReasonType>, RepositoryError> {
        let conn = self.lock();
        Ok(conn
            .query_row(
                "SELECT id, name, created_at FROM reporting_reason_types WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ReportingReasonType {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    fn insert_complaint(
        &self,
        evaluation_id: i64,
        draft: ComplaintDraft,
    ) -> Result<Complaint, RepositoryError> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let created_at = Utc::now();
        tx.execute(
            "INSERT INTO complaints (reporting_reason_type_id, problem_description, email, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.reporting_reason_type_id,
                draft.problem_description,
                draft.email,
                created_at,
            ],
        )?;
        let complaint_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO company_evaluation_complaints (company_evaluation_id, complaint_id)
             VALUES (?1, ?2)",
            params![evaluation_id, complaint_id],
        )?;
        tx.commit()?;
        Ok(Complaint {
            id: complaint_id,
            reporting_reason_type_id: draft.reporting_reason_type_id,
            problem_description: draft.problem_description,
            email: draft.email,
            created_at,
        })
    }
}

impl ApplicantRepository for SqliteStore {
    fn insert_applicant(
        &self,
        draft: ApplicantDraft,
        tracking_code: String,
    ) -> Result<Applicant, RepositoryError> {
        let conn = self.lock();
        let status_id: i64 = conn
            .query_row(
                "SELECT id FROM postulation_statuses WHERE name = 'Applied'",
                [],
                |row| row.get(0),
            )
            .map_err(|_| {
                RepositoryError::Unavailable("postulation statuses not seeded".to_string())
            })?;
        conn.execute(
            "INSERT INTO applicants (
                vacancy_id, name, paternal_last_name, maternal_last_name, email,
                cellphone, linkedin_url, country, city, job_title, company, cv_url,
                motivation_letter_url, tracking_code, postulation_status_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                draft.vacancy_id,
                draft.name,
                draft.paternal_last_name,
                draft.maternal_last_name,
                draft.email,
                draft.cellphone,
                draft.linkedin_url,
                draft.country,
                draft.city,
                draft.job_title,
                draft.company,
                draft.cv.storage_key,
                draft.motivation_letter.as_ref().map(|doc| doc.storage_key.clone()),
                tracking_code,
                status_id,
                Utc::now(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        applicant_by_id(&conn, id)?.ok_or(RepositoryError::NotFound)
    }

    fn applicant(&self, id: i64) -> Result<Option<Applicant>, RepositoryError> {
        let conn = self.lock();
        applicant_by_id(&conn, id)
    }

    fn applicant_by_tracking(
        &self,
        tracking_code: &str,
        paternal_last_name: &str,
    ) -> Result<Option<Applicant>, RepositoryError> {
        let conn = self.lock();
        let sql = format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants
             WHERE tracking_code = ?1 AND LOWER(paternal_last_name) = LOWER(?2)"
        );
        Ok(conn
            .query_row(&sql, params![tracking_code, paternal_last_name], applicant_from_row)
            .optional()?)
    }

    fn postulation_statuses(&self) -> Result<Vec<PostulationStatus>, RepositoryError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM postulation_statuses ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(PostulationStatus {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_applicant_evaluation(
        &self,
        applicant_id: i64,
        draft: ApplicantEvaluationDraft,
    ) -> Result<ApplicantEvaluation, RepositoryError> {
        let conn = self.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO applicant_evaluations (
                applicant_id, company_id, applicant_name, is_hired, communication_rating,
                confidence_rating, negotiation_rating, motivation_rating,
                self_knowledge_rating, hard_skill_rating, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                applicant_id,
                draft.company_id,
                draft.applicant_name,
                draft.is_hired,
                draft.communication_rating,
                draft.confidence_rating,
                draft.negotiation_rating,
                draft.motivation_rating,
                draft.self_knowledge_rating,
                draft.hard_skill_rating,
                created_at,
            ],
        )?;
        Ok(ApplicantEvaluation {
            id: conn.last_insert_rowid(),
            applicant_id,
            company_id: draft.company_id,
            applicant_name: draft.applicant_name,
            is_hired: draft.is_hired,
            communication_rating: draft.communication_rating,
            confidence_rating: draft.confidence_rating,
            negotiation_rating: draft.negotiation_rating,
            motivation_rating: draft.motivation_rating,
            self_knowledge_rating: draft.self_knowledge_rating,
            hard_skill_rating: draft.hard_skill_rating,
            created_at,
        })
    }

    fn insert_recruitment_evaluation(
        &self,
        applicant_id: i64,
        draft: RecruitmentProcessEvaluationDraft,
    ) -> Result<RecruitmentProcessEvaluation, RepositoryError> {
        let conn = self.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO recruitment_process_evaluations (
                applicant_id, job_title, improvement_content, salary_evaluation_rating,
                allows_remote_work, interview_response_time_rating, job_description_rating,
                is_legally_company, amount_of_recruitment_time, recruitment_process_period,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                applicant_id,
                draft.job_title,
                draft.improvement_content,
                draft.salary_evaluation_rating.label(),
                draft.allows_remote_work,
                draft.interview_response_time_rating.label(),
                draft.job_description_rating.label(),
                draft.is_legally_company,
                draft.amount_of_recruitment_time,
                draft.recruitment_process_period.label(),
                created_at,
            ],
        )?;
        Ok(RecruitmentProcessEvaluation {
            id: conn.last_insert_rowid(),
            applicant_id,
            job_title: draft.job_title,
            improvement_content: draft.improvement_content,
            salary_evaluation_rating: draft.salary_evaluation_rating.label().to_string(),
            allows_remote_work: draft.allows_remote_work,
            interview_response_time_rating: draft
                .interview_response_time_rating
                .label()
                .to_string(),
            job_description_rating: draft.job_description_rating.label().to_string(),
            is_legally_company: draft.is_legally_company,
            amount_of_recruitment_time: draft.amount_of_recruitment_time,
            recruitment_process_period: draft.recruitment_process_period.label().to_string(),
            created_at,
        })
    }
}
