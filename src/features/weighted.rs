use crate::error::QcError;
use crate::features::Rubric;
use crate::result::{CriterionScore, Details, ValidationResult, WeightedCriteria};
use crate::rubric_config::{RubricConfig, Thresholds};
use crate::text_utils::{BodyPatterns, TextUtils};

/// Every criterion starts from this score and is clamped to `[0, MAX_CRITERION_SCORE]`.
pub const MAX_CRITERION_SCORE: f64 = 2.5;

pub const SPELLING_OK: &str = "No spelling or grammar issues found.";
pub const SPELLING_COMMON_ERRORS: &str =
    "Common spelling or grammar errors found. Please proofread the email.";
pub const SPELLING_SPACING: &str = "Double spaces or repeated words detected.";
pub const SPELLING_PUNCTUATION: &str = "Some sentences are missing terminal punctuation.";

pub const TONE_OK: &str = "The tone is professional and friendly.";
pub const TONE_NEGATIVE: &str = "Too many negative expressions. Try rephrasing more positively.";
pub const TONE_POSITIVE: &str = "Add more positive language, such as thanking the customer.";
pub const TONE_FORMAL: &str = "The tone is overly formal. Use a friendlier, plain style.";
pub const TONE_CASUAL: &str = "The tone is too casual for customer communication.";

pub const STRUCTURE_OK: &str = "The email has a clear greeting and sign-off.";
pub const STRUCTURE_GREETING: &str = "Add a greeting such as \"Dear <name>,\" at the start.";
pub const STRUCTURE_SIGN_OFF: &str = "Add a sign-off such as \"Kind regards\" at the end.";
pub const STRUCTURE_PARAGRAPHS: &str = "Break the email into paragraphs for readability.";
pub const STRUCTURE_NAME: &str = "Address the customer by name.";

pub const SIMILARITY_OK: &str = "The email follows our standard templates.";
pub const SIMILARITY_PHRASES: &str =
    "The email deviates from our templates. Reuse approved template phrases.";
pub const SIMILARITY_REFERENCE: &str = "Include the claim or booking reference.";
pub const SIMILARITY_NEXT_STEPS: &str = "Explain the next steps to the customer.";

/// Running score for one criterion. Each fired rule replaces the feedback,
/// so only the last triggered message is reported.
struct Deductions {
    score: f64,
    feedback: &'static str,
}

impl Deductions {
    fn start(feedback: &'static str) -> Self {
        Self {
            score: MAX_CRITERION_SCORE,
            feedback,
        }
    }

    fn deduct(&mut self, amount: f64, feedback: &'static str) {
        self.score -= amount;
        self.feedback = feedback;
    }

    fn finish(self) -> CriterionScore {
        CriterionScore {
            score: round_to(self.score.clamp(0.0, MAX_CRITERION_SCORE), 2),
            feedback: self.feedback.to_string(),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Four continuous criteria over an email body: spelling, tone, structure
/// and similarity to the approved templates.
pub struct WeightedRubric {
    patterns: BodyPatterns,
    thresholds: Thresholds,
}

impl WeightedRubric {
    pub fn new(config: &RubricConfig) -> Result<Self, QcError> {
        Ok(Self {
            patterns: BodyPatterns::compile(&config.body)?,
            thresholds: config.thresholds.clone(),
        })
    }

    pub fn spelling(&self, text: &str) -> CriterionScore {
        let mut d = Deductions::start(SPELLING_OK);

        if self.patterns.common_errors.is_match(text) {
            d.deduct(1.0, SPELLING_COMMON_ERRORS);
        }
        if TextUtils::has_double_space(text) || TextUtils::has_repeated_word(text) {
            d.deduct(0.5, SPELLING_SPACING);
        }
        if self.patterns.unterminated_paragraphs(text) > 0 {
            d.deduct(0.5, SPELLING_PUNCTUATION);
        }

        d.finish()
    }

    pub fn tone(&self, text: &str) -> CriterionScore {
        let t = &self.thresholds;
        let mut d = Deductions::start(TONE_OK);

        let negative = self.patterns.negative.count(text);
        if negative > t.max_negative_markers {
            d.deduct(0.2 * (negative - t.max_negative_markers) as f64, TONE_NEGATIVE);
        }
        let positive = self.patterns.positive.count(text);
        if positive < t.min_positive_markers {
            d.deduct(0.3 * (t.min_positive_markers - positive) as f64, TONE_POSITIVE);
        }
        if self.patterns.formal.count(text) > t.max_register_markers {
            d.deduct(0.5, TONE_FORMAL);
        }
        if self.patterns.casual.count(text) > t.max_register_markers {
            d.deduct(0.5, TONE_CASUAL);
        }

        d.finish()
    }

    pub fn structure(&self, text: &str) -> CriterionScore {
        let mut d = Deductions::start(STRUCTURE_OK);

        if !self.patterns.has_greeting(text) {
            d.deduct(1.0, STRUCTURE_GREETING);
        }
        if !self.patterns.has_sign_off(text) {
            d.deduct(1.0, STRUCTURE_SIGN_OFF);
        }
        if TextUtils::paragraph_breaks(text) < self.thresholds.min_paragraph_breaks {
            d.deduct(0.5, STRUCTURE_PARAGRAPHS);
        }
        if !self.patterns.has_personal_name(text) {
            d.deduct(0.5, STRUCTURE_NAME);
        }

        d.finish()
    }

    pub fn similarity(&self, text: &str) -> CriterionScore {
        let floor = self.thresholds.min_template_phrases;
        let mut d = Deductions::start(SIMILARITY_OK);

        let matched = self.patterns.template_phrases.distinct_matches(text);
        if matched < floor {
            d.deduct(0.3 * (floor - matched) as f64, SIMILARITY_PHRASES);
        }
        if !self.patterns.has_claim_reference(text) {
            d.deduct(0.5, SIMILARITY_REFERENCE);
        }
        if !self.patterns.has_next_steps(text) {
            d.deduct(0.5, SIMILARITY_NEXT_STEPS);
        }

        d.finish()
    }

    pub fn criteria(&self, text: &str) -> WeightedCriteria {
        WeightedCriteria {
            spelling: self.spelling(text),
            tone: self.tone(text),
            structure: self.structure(text),
            similarity: self.similarity(text),
        }
    }

    /// Rollup to one decimal on the 0-10 scale.
    pub fn total_score(criteria: &WeightedCriteria) -> f64 {
        round_to(criteria.total(), 1)
    }

    /// The 0-10 rollup mirrored onto the 0-100 display scale.
    pub fn display_score(total: f64) -> u32 {
        ((total * 10.0).round() as u32).min(100)
    }

    pub fn suggestions(&self, criteria: &WeightedCriteria) -> Vec<String> {
        criteria
            .in_order()
            .iter()
            .filter(|(_, c)| c.score < self.thresholds.suggestion_floor)
            .map(|(_, c)| c.feedback.clone())
            .collect()
    }
}

impl Rubric for WeightedRubric {
    fn name(&self) -> &str {
        "Weighted"
    }

    fn validate(&self, text: &str) -> ValidationResult {
        let criteria = self.criteria(text);
        let total = Self::total_score(&criteria);
        let suggestions = self.suggestions(&criteria);

        ValidationResult {
            is_valid: total >= self.thresholds.weighted_pass,
            score: Self::display_score(total),
            details: Details::Weighted(criteria),
            suggestions: (!suggestions.is_empty()).then_some(suggestions),
            total_score: Some(total),
        }
    }
}
