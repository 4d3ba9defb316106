//! Weighted rating aggregation.
//!
//! Each categorical rating maps to a weight (Good 5, Regular 3, Bad 1). A
//! criterion average divides the summed weights by the evaluation count, not
//! by the count of recognizable labels, so an unreadable stored label drags
//! the average down instead of disappearing from it.

use super::domain::{CompanyEvaluation, RatingCategory};
use serde::{Deserialize, Serialize};

/// The four criteria every company evaluation scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingCriterion {
    CareerDevelopment,
    DiversityEqualOpportunity,
    WorkingEnvironment,
    Salary,
}

impl RatingCriterion {
    pub const ALL: [RatingCriterion; 4] = [
        RatingCriterion::CareerDevelopment,
        RatingCriterion::DiversityEqualOpportunity,
        RatingCriterion::WorkingEnvironment,
        RatingCriterion::Salary,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RatingCriterion::CareerDevelopment => "career_development",
            RatingCriterion::DiversityEqualOpportunity => "diversity_equal_opportunity",
            RatingCriterion::WorkingEnvironment => "working_environment",
            RatingCriterion::Salary => "salary",
        }
    }

    fn stored_label<'a>(&self, evaluation: &'a CompanyEvaluation) -> &'a str {
        match self {
            RatingCriterion::CareerDevelopment => &evaluation.career_development_rating,
            RatingCriterion::DiversityEqualOpportunity => {
                &evaluation.diversity_equal_opportunity_rating
            }
            RatingCriterion::WorkingEnvironment => &evaluation.working_environment_rating,
            RatingCriterion::Salary => &evaluation.salary_rating,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Average weight of one criterion across the given evaluations, rounded to
/// one decimal. Zero evaluations short-circuits to 0.0.
pub fn criterion_average(evaluations: &[CompanyEvaluation], criterion: RatingCriterion) -> f64 {
    if evaluations.is_empty() {
        return 0.0;
    }
    let total: u32 = evaluations
        .iter()
        .map(|evaluation| u32::from(RatingCategory::weight_for_label(criterion.stored_label(evaluation))))
        .sum();
    round_one_decimal(f64::from(total) / evaluations.len() as f64)
}

/// Composite score: sum of the per-criterion averages divided by the
/// configured criteria count, rounded to one decimal.
pub fn composite_score(averages: &[f64], criteria_count: u32) -> f64 {
    if criteria_count == 0 {
        return 0.0;
    }
    round_one_decimal(averages.iter().sum::<f64>() / f64::from(criteria_count))
}

/// Aggregated per-criterion and composite scores for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralRatings {
    pub career_development: f64,
    pub diversity_equal_opportunity: f64,
    pub working_environment: f64,
    pub salary: f64,
    pub composite: f64,
    pub evaluation_count: usize,
}

pub fn general_ratings(evaluations: &[CompanyEvaluation], criteria_count: u32) -> GeneralRatings {
    let averages: Vec<f64> = RatingCriterion::ALL
        .iter()
        .map(|criterion| criterion_average(evaluations, *criterion))
        .collect();

    GeneralRatings {
        career_development: averages[0],
        diversity_equal_opportunity: averages[1],
        working_environment: averages[2],
        salary: averages[3],
        composite: composite_score(&averages, criteria_count),
        evaluation_count: evaluations.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn evaluation(career: &str, diversity: &str, environment: &str, salary: &str) -> CompanyEvaluation {
        CompanyEvaluation {
            id: 1,
            company_id: 1,
            job_title: "Backend Engineer".to_string(),
            content_type: "Solid place to grow".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date"),
            end_date: None,
            is_still_working_here: true,
            applicant_email: "dev@example.com".to_string(),
            career_development_rating: career.to_string(),
            diversity_equal_opportunity_rating: diversity.to_string(),
            working_environment_rating: environment.to_string(),
            salary_rating: salary.to_string(),
            job_location: "Mexico".to_string(),
            salary: 2500.0,
            currency_type: "USD".to_string(),
            salary_frequency: "Month".to_string(),
            recommended_a_friend: true,
            allows_remote_work: true,
            is_legally_company: true,
            utility_counter: 0,
            non_utility_counter: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn criterion_average_matches_worked_example() {
        // Good, Good, Regular -> round((5 + 5 + 3) / 3, 1) = 4.3
        let evaluations = vec![
            evaluation("Good", "Bad", "Bad", "Bad"),
            evaluation("Good", "Bad", "Bad", "Bad"),
            evaluation("Regular", "Bad", "Bad", "Bad"),
        ];
        let average = criterion_average(&evaluations, RatingCriterion::CareerDevelopment);
        assert_eq!(average, 4.3);
    }

    #[test]
    fn zero_evaluations_short_circuit_to_zero() {
        assert_eq!(criterion_average(&[], RatingCriterion::Salary), 0.0);
        let ratings = general_ratings(&[], 4);
        assert_eq!(ratings.composite, 0.0);
        assert_eq!(ratings.evaluation_count, 0);
    }

    #[test]
    fn unrecognized_labels_count_toward_the_divisor() {
        let evaluations = vec![
            evaluation("Good", "Good", "Good", "Good"),
            evaluation("Mediocre", "Good", "Good", "Good"),
        ];
        // (5 + 0) / 2 evaluations, not 5 / 1.
        let average = criterion_average(&evaluations, RatingCriterion::CareerDevelopment);
        assert_eq!(average, 2.5);
    }

    #[test]
    fn composite_stays_within_the_rating_scale() {
        let all_good = vec![evaluation("Good", "Good", "Good", "Good"); 5];
        let ratings = general_ratings(&all_good, 4);
        assert_eq!(ratings.composite, 5.0);

        let all_bad = vec![evaluation("Bad", "Bad", "Bad", "Bad"); 3];
        let ratings = general_ratings(&all_bad, 4);
        assert_eq!(ratings.composite, 1.0);

        let mixed = vec![
            evaluation("Good", "Regular", "Bad", "Good"),
            evaluation("Regular", "Regular", "Good", "Bad"),
        ];
        let ratings = general_ratings(&mixed, 4);
        assert!((0.0..=5.0).contains(&ratings.composite));
    }

    #[test]
    fn composite_divides_by_the_configured_count() {
        assert_eq!(composite_score(&[4.0, 4.0, 4.0, 4.0], 4), 4.0);
        assert_eq!(composite_score(&[4.0, 4.0, 4.0, 4.0], 0), 0.0);
        assert_eq!(composite_score(&[5.0, 3.0, 1.0, 3.0], 4), 3.0);
    }
}
