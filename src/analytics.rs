use crate::domain_utils::DomainUtils;
use crate::history::HistoryRecord;
use serde::Serialize;
use std::collections::HashMap;

const TOP_DOMAINS: usize = 5;

/// Score histogram buckets, upper bound inclusive.
pub const SCORE_BUCKETS: [(&str, u32); 5] = [
    ("0-20", 20),
    ("21-40", 40),
    ("41-60", 60),
    ("61-80", 80),
    ("81-100", 100),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCount {
    pub range: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStats {
    pub domain: String,
    pub count: usize,
    pub average_score: u32,
}

/// Aggregate view over the saved history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub average_score: Option<u32>,
    pub score_distribution: Vec<BucketCount>,
    pub top_domains: Vec<DomainStats>,
}

impl HistorySummary {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let total = records.len();
        let valid = records.iter().filter(|r| r.result.is_valid).count();

        let average_score = (total > 0).then(|| {
            let sum: u64 = records.iter().map(|r| u64::from(r.result.score)).sum();
            (sum as f64 / total as f64).round() as u32
        });

        let mut buckets = [0usize; SCORE_BUCKETS.len()];
        for record in records {
            let index = SCORE_BUCKETS
                .iter()
                .position(|(_, upper)| record.result.score <= *upper)
                .unwrap_or(SCORE_BUCKETS.len() - 1);
            buckets[index] += 1;
        }

        Self {
            total,
            valid,
            invalid: total - valid,
            average_score,
            score_distribution: SCORE_BUCKETS
                .iter()
                .zip(buckets)
                .map(|((range, _), count)| BucketCount { range, count })
                .collect(),
            top_domains: Self::top_domains(records),
        }
    }

    fn top_domains(records: &[HistoryRecord]) -> Vec<DomainStats> {
        // domain -> (count, score sum)
        let mut by_domain: HashMap<String, (usize, u64)> = HashMap::new();
        for record in records {
            if let Some(domain) = DomainUtils::domain_of_address(&record.input_text) {
                let entry = by_domain.entry(domain).or_default();
                entry.0 += 1;
                entry.1 += u64::from(record.result.score);
            }
        }

        let mut stats: Vec<DomainStats> = by_domain
            .into_iter()
            .map(|(domain, (count, sum))| DomainStats {
                domain,
                count,
                average_score: (sum as f64 / count as f64).round() as u32,
            })
            .collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        stats.truncate(TOP_DOMAINS);
        stats
    }

    /// Share of valid results as a whole percentage.
    pub fn valid_percentage(&self) -> Option<u32> {
        (self.total > 0).then(|| ((self.valid as f64 / self.total as f64) * 100.0).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{QcEngine, RubricKind};
    use crate::result::{AddressChecks, Details, ValidationResult};
    use pretty_assertions::assert_eq;

    fn record(text: &str, score: u32) -> HistoryRecord {
        let result = ValidationResult {
            is_valid: score >= 60,
            score,
            details: Details::Address(AddressChecks::default()),
            suggestions: None,
            total_score: None,
        };
        HistoryRecord::new(text, &result)
    }

    #[test]
    fn test_empty_history() {
        let summary = HistorySummary::from_records(&[]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, None);
        assert_eq!(summary.valid_percentage(), None);
        assert!(summary.top_domains.is_empty());
        assert!(summary.score_distribution.iter().all(|b| b.count == 0));
        assert_eq!(summary.score_distribution.len(), 5);
    }

    #[test]
    fn test_counts_and_average() {
        let records = vec![
            record("a@gmail.com", 100),
            record("b@gmail.com", 60),
            record("notanemail", 0),
        ];
        let summary = HistorySummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        // 160 / 3 = 53.33
        assert_eq!(summary.average_score, Some(53));
        assert_eq!(summary.valid_percentage(), Some(67));
    }

    #[test]
    fn test_bucket_bounds_are_inclusive() {
        let records: Vec<HistoryRecord> = [0, 20, 21, 40, 60, 61, 80, 81, 100]
            .iter()
            .map(|s| record("x", *s))
            .collect();
        let summary = HistorySummary::from_records(&records);

        let counts: Vec<(&str, usize)> = summary
            .score_distribution
            .iter()
            .map(|b| (b.range, b.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("0-20", 2),
                ("21-40", 2),
                ("41-60", 1),
                ("61-80", 2),
                ("81-100", 2)
            ]
        );
    }

    #[test]
    fn test_top_domains_ranked_by_count_then_name() {
        let mut records = vec![
            record("a@yahoo.com", 80),
            record("b@yahoo.com", 60),
            record("c@gmail.com", 100),
            record("d@gmail.com", 100),
            record("e@outlook.com", 40),
            record("f@aol.com", 100),
            record("g@icloud.com", 100),
            record("h@zoho.com", 100),
        ];
        records.push(record("Dear Sam,\n\nYour claim is open.", 90));
        let summary = HistorySummary::from_records(&records);

        assert_eq!(
            summary.top_domains,
            vec![
                DomainStats {
                    domain: "gmail.com".to_string(),
                    count: 2,
                    average_score: 100
                },
                DomainStats {
                    domain: "yahoo.com".to_string(),
                    count: 2,
                    average_score: 70
                },
                DomainStats {
                    domain: "aol.com".to_string(),
                    count: 1,
                    average_score: 100
                },
                DomainStats {
                    domain: "icloud.com".to_string(),
                    count: 1,
                    average_score: 100
                },
                DomainStats {
                    domain: "outlook.com".to_string(),
                    count: 1,
                    average_score: 40
                },
            ]
        );
    }

    #[test]
    fn test_summary_over_engine_results() {
        let engine = QcEngine::with_defaults(RubricKind::Address).unwrap();
        let records: Vec<HistoryRecord> = ["jane@gmail.com", "test@mailinator.com", "bad"]
            .iter()
            .map(|t| HistoryRecord::new(t, &engine.validate(t).unwrap()))
            .collect();
        let summary = HistorySummary::from_records(&records);

        assert_eq!(summary.valid, 2);
        assert_eq!(summary.average_score, Some(53));
        assert_eq!(summary.top_domains.len(), 2);
    }
}
