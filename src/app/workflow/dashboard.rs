use anyhow::Result;
use chrono::{Datelike, Utc};
use std::collections::BTreeMap;
use tracing::info;

use crate::api::assessments::list_scores;
use crate::api::fees::list_fee_records;
use crate::app::models::{AssessmentScore, FeeRecord};
use crate::app::state::AppState;

/// Numbers behind the bursar's fee dashboard widgets.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeeSummary {
    pub students: usize,
    pub total_billed: i64,
    pub total_paid: i64,
    pub outstanding: i64,
    /// Students with any balance left.
    pub defaulters: usize,
    /// Paid over billed, 0.0..=1.0.
    pub collection_rate: f64,
}

pub fn summarize_fees(records: &[FeeRecord]) -> FeeSummary {
    let total_billed: i64 = records.iter().map(|r| r.amount_billed).sum();
    let total_paid: i64 = records.iter().map(|r| r.amount_paid).sum();
    let defaulters = records.iter().filter(|r| r.balance() > 0).count();

    let collection_rate = if total_billed > 0 {
        total_paid as f64 / total_billed as f64
    } else {
        0.0
    };

    FeeSummary {
        students: records.len(),
        total_billed,
        total_paid,
        outstanding: total_billed - total_paid,
        defaulters,
        collection_rate,
    }
}

// Aggregate bands (minimum mark -> grade), best first
static GRADE_BANDS: [(u32, &str); 9] = [
    (85, "D1"),
    (80, "D2"),
    (70, "C3"),
    (60, "C4"),
    (55, "C5"),
    (50, "C6"),
    (45, "P7"),
    (40, "P8"),
    (0, "F9"),
];

/// O-Level aggregate grade for a 0..=100 mark.
pub fn grade_for_score(score: f64) -> &'static str {
    let score = score.clamp(0.0, 100.0) as u32;
    GRADE_BANDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or("F9")
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AssessmentSummary {
    pub entries: usize,
    pub mean: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Scores at or above the P8 pass mark.
    pub passed: usize,
    pub grade_distribution: BTreeMap<&'static str, usize>,
}

pub fn summarize_scores(scores: &[AssessmentScore]) -> AssessmentSummary {
    if scores.is_empty() {
        return AssessmentSummary::default();
    }

    let mut highest = f64::MIN;
    let mut lowest = f64::MAX;
    let mut sum = 0.0;
    let mut passed = 0;
    let mut grade_distribution: BTreeMap<&'static str, usize> = BTreeMap::new();

    for entry in scores {
        sum += entry.score;
        highest = highest.max(entry.score);
        lowest = lowest.min(entry.score);
        if entry.score >= 40.0 {
            passed += 1;
        }
        *grade_distribution.entry(grade_for_score(entry.score)).or_insert(0) += 1;
    }

    AssessmentSummary {
        entries: scores.len(),
        mean: sum / scores.len() as f64,
        highest,
        lowest,
        passed,
        grade_distribution,
    }
}

/// Heading label the dashboards print, e.g. "2026 Term 1".
pub fn academic_year_label(term: &str) -> String {
    format!("{} Term {}", Utc::now().year(), term)
}

pub async fn class_fee_summary(state: &AppState, class_id: &str, term: &str) -> Result<FeeSummary> {
    let records = list_fee_records(state, class_id, term).await?;
    let summary = summarize_fees(&records);
    info!(
        "Fee summary for class {class_id} ({}): {} students, {} outstanding",
        academic_year_label(term),
        summary.students,
        summary.outstanding
    );
    Ok(summary)
}

pub async fn class_assessment_summary(
    state: &AppState,
    class_id: &str,
    subject_id: &str,
    term: &str,
) -> Result<AssessmentSummary> {
    let scores = list_scores(state, class_id, subject_id, term).await?;
    Ok(summarize_scores(&scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(billed: i64, paid: i64) -> FeeRecord {
        FeeRecord {
            student_id: "stu".to_string(),
            term: "1".to_string(),
            amount_billed: billed,
            amount_paid: paid,
        }
    }

    fn score(value: f64) -> AssessmentScore {
        AssessmentScore {
            student_id: "stu".to_string(),
            subject_id: "sub".to_string(),
            term: "1".to_string(),
            score: value,
        }
    }

    #[test]
    fn test_fee_summary() {
        let summary = summarize_fees(&[
            fee(850_000, 850_000),
            fee(850_000, 500_000),
            fee(850_000, 0),
        ]);
        assert_eq!(summary.students, 3);
        assert_eq!(summary.total_billed, 2_550_000);
        assert_eq!(summary.total_paid, 1_350_000);
        assert_eq!(summary.outstanding, 1_200_000);
        assert_eq!(summary.defaulters, 2);
        assert!((summary.collection_rate - 1_350_000.0 / 2_550_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_fee_summary_of_nothing() {
        let summary = summarize_fees(&[]);
        assert_eq!(summary.students, 0);
        assert_eq!(summary.collection_rate, 0.0);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(grade_for_score(92.0), "D1");
        assert_eq!(grade_for_score(85.0), "D1");
        assert_eq!(grade_for_score(84.9), "D2");
        assert_eq!(grade_for_score(70.0), "C3");
        assert_eq!(grade_for_score(52.0), "C6");
        assert_eq!(grade_for_score(45.0), "P7");
        assert_eq!(grade_for_score(40.0), "P8");
        assert_eq!(grade_for_score(39.9), "F9");
        assert_eq!(grade_for_score(0.0), "F9");
    }

    #[test]
    fn test_assessment_summary() {
        let summary = summarize_scores(&[score(88.0), score(55.0), score(31.0)]);
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.highest, 88.0);
        assert_eq!(summary.lowest, 31.0);
        assert_eq!(summary.passed, 2);
        assert!((summary.mean - 58.0).abs() < 1e-9);
        assert_eq!(summary.grade_distribution.get("D1"), Some(&1));
        assert_eq!(summary.grade_distribution.get("C5"), Some(&1));
        assert_eq!(summary.grade_distribution.get("F9"), Some(&1));
    }

    #[test]
    fn test_academic_year_label_mentions_term() {
        assert!(academic_year_label("2").ends_with("Term 2"));
    }
}
