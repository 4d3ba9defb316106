use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Categorical rating applied to each evaluation criterion.
///
/// The API boundary only admits these three values; unknown categories are a
/// deserialization error. Persisted rows are kept as raw labels so historic
/// data that no longer parses degrades to zero weight instead of failing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingCategory {
    Good,
    Regular,
    Bad,
}

impl RatingCategory {
    pub const fn weight(self) -> u8 {
        match self {
            RatingCategory::Good => 5,
            RatingCategory::Regular => 3,
            RatingCategory::Bad => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RatingCategory::Good => "Good",
            RatingCategory::Regular => "Regular",
            RatingCategory::Bad => "Bad",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Good" => Some(RatingCategory::Good),
            "Regular" => Some(RatingCategory::Regular),
            "Bad" => Some(RatingCategory::Bad),
            _ => None,
        }
    }

    /// Weight of a stored label; anything unrecognized weighs zero.
    pub fn weight_for_label(value: &str) -> u8 {
        Self::from_label(value).map_or(0, Self::weight)
    }
}

/// ISO-4217 subset accepted for declared salaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Mxn,
    Cop,
    Clp,
    Usd,
    Eur,
}

impl CurrencyCode {
    pub const fn code(self) -> &'static str {
        match self {
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Cop => "COP",
            CurrencyCode::Clp => "CLP",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryFrequency {
    Hour,
    Day,
    Month,
    Year,
}

impl SalaryFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            SalaryFrequency::Hour => "Hour",
            SalaryFrequency::Day => "Day",
            SalaryFrequency::Month => "Month",
            SalaryFrequency::Year => "Year",
        }
    }
}

/// Submission payload for a new company evaluation. The company id comes from
/// the request path, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEvaluationDraft {
    pub job_title: String,
    pub content_type: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_still_working_here: bool,
    pub applicant_email: String,
    pub career_development_rating: RatingCategory,
    pub diversity_equal_opportunity_rating: RatingCategory,
    pub working_environment_rating: RatingCategory,
    pub salary_rating: RatingCategory,
    pub job_location: String,
    pub salary: f64,
    pub currency_type: CurrencyCode,
    pub salary_frequency: SalaryFrequency,
    pub recommended_a_friend: bool,
    pub allows_remote_work: bool,
    pub is_legally_company: bool,
}

impl CompanyEvaluationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title_len = self.job_title.trim().chars().count();
        if !(3..=70).contains(&title_len) {
            return Err(ValidationError::FieldLength {
                field: "job_title",
                min: 3,
                max: 70,
            });
        }
        let content_len = self.content_type.trim().chars().count();
        if content_len == 0 || content_len > 280 {
            return Err(ValidationError::FieldLength {
                field: "content_type",
                min: 1,
                max: 280,
            });
        }
        let location_len = self.job_location.trim().chars().count();
        if location_len == 0 || location_len > 70 {
            return Err(ValidationError::FieldLength {
                field: "job_location",
                min: 1,
                max: 70,
            });
        }
        validate_email(&self.applicant_email)?;
        if self.salary <= 0.0 {
            return Err(ValidationError::NonPositiveSalary);
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart);
            }
        }
        Ok(())
    }

    /// Apply the canonical text normalization before persisting.
    pub fn normalized(mut self) -> Self {
        self.job_title = title_case(self.job_title.trim());
        self.content_type = capitalize_first(self.content_type.trim());
        self.job_location = capitalize_first(self.job_location.trim());
        self.applicant_email = self.applicant_email.trim().to_lowercase();
        self
    }
}

/// A persisted company evaluation. Rating fields keep the raw stored labels;
/// scoring maps them through [`RatingCategory::weight_for_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEvaluation {
    pub id: i64,
    pub company_id: i64,
    pub job_title: String,
    pub content_type: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_still_working_here: bool,
    pub applicant_email: String,
    pub career_development_rating: String,
    pub diversity_equal_opportunity_rating: String,
    pub working_environment_rating: String,
    pub salary_rating: String,
    pub job_location: String,
    pub salary: f64,
    pub currency_type: String,
    pub salary_frequency: String,
    pub recommended_a_friend: bool,
    pub allows_remote_work: bool,
    pub is_legally_company: bool,
    pub utility_counter: i64,
    pub non_utility_counter: i64,
    pub created_at: DateTime<Utc>,
}

/// Static reference row describing why an evaluation can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingReasonType {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub reporting_reason_type_id: i64,
    pub problem_description: String,
    pub email: String,
}

impl ComplaintDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let description_len = self.problem_description.trim().chars().count();
        if !(10..=70).contains(&description_len) {
            return Err(ValidationError::FieldLength {
                field: "problem_description",
                min: 10,
                max: 70,
            });
        }
        validate_email(&self.email)
    }
}

/// A complaint filed against a company evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub reporting_reason_type_id: i64,
    pub problem_description: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    FieldLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("e-mail address is malformed")]
    MalformedEmail,
    #[error("salary must be greater than zero")]
    NonPositiveSalary,
    #[error("end_date precedes start_date")]
    EndBeforeStart,
}

pub(crate) fn validate_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let Some((local, host)) = value.split_once('@') else {
        return Err(ValidationError::MalformedEmail);
    };
    if local.is_empty() || host.is_empty() || !host.contains('.') || value.len() > 70 {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CompanyEvaluationDraft {
        CompanyEvaluationDraft {
            job_title: "backend engineer".to_string(),
            content_type: "great team, clear goals".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date"),
            end_date: Some(NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid date")),
            is_still_working_here: false,
            applicant_email: "  Maribel@Gmail.com ".to_string(),
            career_development_rating: RatingCategory::Good,
            diversity_equal_opportunity_rating: RatingCategory::Good,
            working_environment_rating: RatingCategory::Regular,
            salary_rating: RatingCategory::Bad,
            job_location: "mexico city".to_string(),
            salary: 2500.0,
            currency_type: CurrencyCode::Usd,
            salary_frequency: SalaryFrequency::Month,
            recommended_a_friend: true,
            allows_remote_work: true,
            is_legally_company: true,
        }
    }

    #[test]
    fn weights_follow_the_five_three_one_scale() {
        assert_eq!(RatingCategory::Good.weight(), 5);
        assert_eq!(RatingCategory::Regular.weight(), 3);
        assert_eq!(RatingCategory::Bad.weight(), 1);
    }

    #[test]
    fn unknown_stored_labels_weigh_zero() {
        assert_eq!(RatingCategory::weight_for_label("Excellent"), 0);
        assert_eq!(RatingCategory::weight_for_label(""), 0);
        assert_eq!(RatingCategory::weight_for_label("good"), 0);
    }

    #[test]
    fn api_boundary_rejects_unknown_categories() {
        let error = serde_json::from_str::<RatingCategory>("\"Excellent\"");
        assert!(error.is_err());
    }

    #[test]
    fn normalization_matches_persisted_shape() {
        let normalized = draft().normalized();
        assert_eq!(normalized.job_title, "Backend Engineer");
        assert_eq!(normalized.content_type, "Great team, clear goals");
        assert_eq!(normalized.job_location, "Mexico city");
        assert_eq!(normalized.applicant_email, "maribel@gmail.com");
    }

    #[test]
    fn validation_rejects_short_titles_and_bad_email() {
        let mut short = draft();
        short.job_title = "qa".to_string();
        assert!(matches!(
            short.validate(),
            Err(ValidationError::FieldLength { field: "job_title", .. })
        ));

        let mut bad_email = draft();
        bad_email.applicant_email = "not-an-email".to_string();
        assert_eq!(bad_email.validate(), Err(ValidationError::MalformedEmail));
    }

    #[test]
    fn validation_rejects_inverted_date_range() {
        let mut inverted = draft();
        inverted.end_date = Some(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"));
        assert_eq!(inverted.validate(), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn complaint_description_must_be_substantial() {
        let complaint = ComplaintDraft {
            reporting_reason_type_id: 1,
            problem_description: "too short".to_string(),
            email: "jose@gmail.com".to_string(),
        };
        assert!(complaint.validate().is_err());
    }
}
