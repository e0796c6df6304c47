use crate::error::QcError;
use crate::features::Rubric;
use crate::result::{Details, StructuralChecks, ValidationResult};
use crate::rubric_config::{Branding, RubricConfig, Thresholds};
use crate::text_utils::{BodyPatterns, PhraseSet, TextUtils};

pub const STRUCTURE_SUGGESTION: &str =
    "Open with a greeting, close with a sign-off and split the body into paragraphs.";
pub const CLARITY_SUGGESTION: &str =
    "Shorten long sentences and replace jargon with plain language.";
pub const TONE_SUGGESTION: &str =
    "Use fewer negative expressions and more positive, reassuring language.";
pub const GRAMMAR_SUGGESTION: &str =
    "Fix common grammar mistakes, double spaces and repeated words.";
pub const COMPLETENESS_SUGGESTION: &str =
    "Include the claim reference, the next steps and how to contact us.";
pub const PERSONALIZATION_SUGGESTION: &str =
    "Address the customer by name and refer to their claim, flight or booking.";
pub const BRANDING_SUGGESTION: &str = "Mention Air Travel Claim and use the standard team sign-off.";

/// Criteria in table order with their weights. Weights sum to 100.
const WEIGHTS: [(&str, u32); 7] = [
    ("structure", 15),
    ("clarity", 15),
    ("tone", 15),
    ("grammar", 15),
    ("completeness", 15),
    ("personalization", 15),
    ("branding", 10),
];

/// Seven pass/fail criteria over an email body, each carrying a fixed weight.
pub struct StructuralRubric {
    patterns: BodyPatterns,
    company_name: PhraseSet,
    brand_sign_off: PhraseSet,
    thresholds: Thresholds,
}

impl StructuralRubric {
    pub fn new(config: &RubricConfig) -> Result<Self, QcError> {
        let Branding {
            company_name,
            sign_off,
        } = &config.branding;

        Ok(Self {
            patterns: BodyPatterns::compile(&config.body)?,
            company_name: PhraseSet::new("company_name", std::slice::from_ref(company_name))?,
            brand_sign_off: PhraseSet::new("brand_sign_off", std::slice::from_ref(sign_off))?,
            thresholds: config.thresholds.clone(),
        })
    }

    pub fn check(&self, text: &str) -> StructuralChecks {
        let p = &self.patterns;
        let t = &self.thresholds;

        StructuralChecks {
            structure: p.has_greeting(text)
                && p.has_sign_off(text)
                && TextUtils::paragraph_breaks(text) >= t.min_paragraph_breaks,
            clarity: TextUtils::long_sentence_count(text, t.long_sentence_words)
                <= t.max_long_sentences
                && !p.jargon.is_match(text),
            tone: p.negative.count(text) <= t.max_negative_markers
                && p.positive.count(text) >= t.min_positive_markers,
            grammar: !p.common_errors.is_match(text)
                && !TextUtils::has_double_space(text)
                && !TextUtils::has_repeated_word(text),
            completeness: p.has_claim_reference(text)
                && p.has_next_steps(text)
                && p.has_contact_info(text),
            personalization: p.has_personal_name(text) && p.has_your_subject(text),
            branding: self.company_name.is_match(text) && self.brand_sign_off.is_match(text),
        }
    }

    pub fn score(checks: &StructuralChecks) -> u32 {
        Self::in_order(checks)
            .iter()
            .zip(WEIGHTS)
            .filter(|((passed, _), _)| *passed)
            .map(|(_, (_, weight))| weight)
            .sum()
    }

    pub fn suggestions(checks: &StructuralChecks) -> Vec<String> {
        Self::in_order(checks)
            .iter()
            .filter(|(passed, _)| !passed)
            .map(|(_, message)| message.to_string())
            .collect()
    }

    fn in_order(checks: &StructuralChecks) -> [(bool, &'static str); 7] {
        [
            (checks.structure, STRUCTURE_SUGGESTION),
            (checks.clarity, CLARITY_SUGGESTION),
            (checks.tone, TONE_SUGGESTION),
            (checks.grammar, GRAMMAR_SUGGESTION),
            (checks.completeness, COMPLETENESS_SUGGESTION),
            (checks.personalization, PERSONALIZATION_SUGGESTION),
            (checks.branding, BRANDING_SUGGESTION),
        ]
    }
}

impl Rubric for StructuralRubric {
    fn name(&self) -> &str {
        "Structural"
    }

    fn validate(&self, text: &str) -> ValidationResult {
        let checks = self.check(text);
        let score = Self::score(&checks);
        let suggestions = Self::suggestions(&checks);

        ValidationResult {
            is_valid: score >= self.thresholds.structural_pass,
            score,
            details: Details::Structural(checks),
            suggestions: (!suggestions.is_empty()).then_some(suggestions),
            total_score: None,
        }
    }
}
