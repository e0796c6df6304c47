use crate::domain_utils::DomainUtils;
use crate::error::QcError;
use crate::features::Rubric;
use crate::result::{AddressChecks, Details, ValidationResult};
use crate::rubric_config::{AddressLists, RubricConfig};
use regex::Regex;

const CHECK_POINTS: u32 = 20;

/// `local@domain.tld`: no whitespace (U+FEFF included) and exactly one `@`.
const ADDRESS_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

pub const FORMAT_SUGGESTION: &str = "Email format is invalid. Please check for typos.";
pub const DNS_SUGGESTION: &str = "The domain appears to be invalid or non-existent.";
pub const DISPOSABLE_SUGGESTION: &str = "Disposable email addresses may have deliverability issues.";
pub const SPAM_SUGGESTION: &str = "This email address matches patterns commonly used in spam.";
pub const DELIVERABLE_SUGGESTION: &str = "This email address may not be deliverable.";

/// Pass/fail checks over a single email address. DNS, spam and
/// deliverability are static list lookups; nothing touches the network.
pub struct AddressRubric {
    address_format: Regex,
    lists: AddressLists,
    pass_threshold: u32,
}

impl AddressRubric {
    pub fn new(config: &RubricConfig) -> Result<Self, QcError> {
        let address_format = Regex::new(ADDRESS_PATTERN).map_err(|source| {
            QcError::InvalidPattern {
                list: "address_format",
                source,
            }
        })?;

        Ok(Self {
            address_format,
            lists: config.address.clone(),
            pass_threshold: config.thresholds.address_pass,
        })
    }

    pub fn is_well_formed(&self, email: &str) -> bool {
        self.address_format.is_match(email)
    }

    pub fn check(&self, email: &str) -> AddressChecks {
        if !self.is_well_formed(email) {
            return AddressChecks::default();
        }

        let domain = DomainUtils::extract_domain(email).unwrap_or_default();
        let local = DomainUtils::extract_local_part(email).unwrap_or_default();

        AddressChecks {
            format: true,
            dns: !DomainUtils::in_domain_list(&domain, &self.lists.invalid_domains),
            disposable: DomainUtils::in_domain_list(&domain, &self.lists.disposable_domains),
            spam: self
                .lists
                .spam_terms
                .iter()
                .any(|term| local.contains(&term.to_lowercase())),
            deliverable: !DomainUtils::in_domain_list(
                &domain,
                &self.lists.non_deliverable_domains,
            ),
        }
    }

    /// Malformed addresses score zero regardless of the other flags.
    pub fn score(checks: &AddressChecks) -> u32 {
        if !checks.format {
            return 0;
        }

        [
            checks.format,
            checks.dns,
            !checks.disposable,
            !checks.spam,
            checks.deliverable,
        ]
        .iter()
        .filter(|passed| **passed)
        .count() as u32
            * CHECK_POINTS
    }

    pub fn suggestions(checks: &AddressChecks) -> Vec<String> {
        if !checks.format {
            return vec![FORMAT_SUGGESTION.to_string()];
        }

        let mut suggestions = Vec::new();
        if !checks.dns {
            suggestions.push(DNS_SUGGESTION.to_string());
        }
        if checks.disposable {
            suggestions.push(DISPOSABLE_SUGGESTION.to_string());
        }
        if checks.spam {
            suggestions.push(SPAM_SUGGESTION.to_string());
        }
        if !checks.deliverable {
            suggestions.push(DELIVERABLE_SUGGESTION.to_string());
        }
        suggestions
    }
}

impl Rubric for AddressRubric {
    fn name(&self) -> &str {
        "Address"
    }

    fn validate(&self, text: &str) -> ValidationResult {
        let checks = self.check(text);
        let score = Self::score(&checks);
        let suggestions = Self::suggestions(&checks);

        ValidationResult {
            is_valid: score >= self.pass_threshold,
            score,
            details: Details::Address(checks),
            suggestions: (!suggestions.is_empty()).then_some(suggestions),
            total_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn rubric() -> AddressRubric {
        AddressRubric::new(&RubricConfig::default()).unwrap()
    }

    #[test]
    fn test_format_shape() {
        let rubric = rubric();
        assert!(rubric.is_well_formed("jane@gmail.com"));
        assert!(rubric.is_well_formed("a.b+c@mail.co.uk"));
        assert!(!rubric.is_well_formed("notanemail"));
        assert!(!rubric.is_well_formed("jane@gmail"));
        assert!(!rubric.is_well_formed("jane@.com"));
        assert!(!rubric.is_well_formed("jane@gmail."));
        assert!(!rubric.is_well_formed("ja ne@gmail.com"));
        assert!(!rubric.is_well_formed("jane@@gmail.com"));
        assert!(!rubric.is_well_formed("@gmail.com"));
    }

    #[test]
    fn test_format_edge_cases() {
        let rubric = rubric();
        // Loose shape: repeated or leading dots in the domain are accepted
        assert!(rubric.is_well_formed("a@b..c"));
        assert!(rubric.is_well_formed("a@.b.c"));
        assert!(rubric.is_well_formed("a@b.c."));
        assert!(!rubric.is_well_formed("a\u{feff}@b.com"));
        assert!(!rubric.is_well_formed("a@b.com\u{feff}"));
        assert!(!rubric.is_well_formed("a\u{a0}b@c.com"));
        assert!(!rubric.is_well_formed("jane@gmail.com\nbob@gmail.com"));
    }

    #[test]
    fn test_clean_address_scores_full_marks() {
        let result = rubric().validate("jane.doe@gmail.com");

        assert!(result.is_valid);
        assert_eq!(result.score, 100);
        assert_eq!(result.suggestions, None);
    }

    #[test]
    fn test_disposable_domain() {
        let result = rubric().validate("test@mailinator.com");

        match &result.details {
            Details::Address(checks) => {
                assert!(checks.format);
                assert!(checks.disposable);
                assert!(checks.spam);
            }
            other => panic!("Expected address details, got {other:?}"),
        }
        // Both the disposable and the spam check fail
        assert_eq!(result.score, 60);
        assert!(result.is_valid);
        assert_eq!(
            result.suggestions(),
            &[
                DISPOSABLE_SUGGESTION.to_string(),
                SPAM_SUGGESTION.to_string()
            ]
        );
    }

    #[test]
    fn test_malformed_address_short_circuits() {
        let result = rubric().validate("notanemail");

        assert_eq!(
            result,
            ValidationResult {
                is_valid: false,
                score: 0,
                details: Details::Address(AddressChecks::default()),
                suggestions: Some(vec![FORMAT_SUGGESTION.to_string()]),
                total_score: None,
            }
        );
    }

    #[test]
    fn test_every_failing_check_in_table_order() {
        let mut config = RubricConfig::default();
        config.address.invalid_domains.push("broken.io".to_string());
        config.address.disposable_domains.push("broken.io".to_string());
        config.address.non_deliverable_domains.push("broken.io".to_string());
        let rubric = AddressRubric::new(&config).unwrap();

        let result = rubric.validate("noreply@broken.io");
        assert_eq!(result.score, 20);
        assert!(!result.is_valid);
        assert_eq!(
            result.suggestions(),
            &[
                DNS_SUGGESTION.to_string(),
                DISPOSABLE_SUGGESTION.to_string(),
                SPAM_SUGGESTION.to_string(),
                DELIVERABLE_SUGGESTION.to_string(),
            ]
        );
    }

    #[test]
    fn test_injected_lists_replace_builtins() {
        let mut config = RubricConfig::default();
        config.address.disposable_domains = vec!["burner.io".to_string()];
        config.address.spam_terms.clear();
        let rubric = AddressRubric::new(&config).unwrap();

        let checks = rubric.check("test@mailinator.com");
        assert!(!checks.disposable);
        assert!(!checks.spam);
        assert!(rubric.check("jane@Burner.IO").disposable);
    }

    #[test]
    fn test_configurable_threshold() {
        let mut config = RubricConfig::default();
        config.thresholds.address_pass = 70;
        let rubric = AddressRubric::new(&config).unwrap();

        let result = rubric.validate("info@example.com");
        assert_eq!(result.score, 60);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_non_deliverable_and_invalid_domains() {
        let checks = rubric().check("jane@example.com");
        assert!(!checks.deliverable);
        assert!(checks.dns);

        let checks = rubric().check("jane@notreal.org");
        assert!(!checks.dns);
        assert!(checks.deliverable);
    }

    proptest! {
        #[test]
        fn score_is_bounded_and_consistent(text in "\\PC{1,40}") {
            let rubric = rubric();
            let result = rubric.validate(&text);
            prop_assert!(result.score <= 100);
            prop_assert_eq!(result.score % CHECK_POINTS, 0);
            prop_assert_eq!(result.is_valid, result.score >= 60);
            match &result.details {
                Details::Address(checks) => {
                    prop_assert_eq!(AddressRubric::score(checks), result.score);
                }
                other => prop_assert!(false, "unexpected details {:?}", other),
            }
            prop_assert_eq!(rubric.validate(&text), result);
        }

        #[test]
        fn suggestion_count_matches_failures(
            local in "[a-z]{1,10}",
            domain in "[a-z]{1,10}\\.(com|org|net)",
        ) {
            let result = rubric().validate(&format!("{local}@{domain}"));
            let failures = (100 - result.score) / CHECK_POINTS;
            prop_assert_eq!(result.suggestions().len() as u32, failures);
        }
    }
}
