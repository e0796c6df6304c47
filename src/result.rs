use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of scoring one piece of input text.
///
/// `score` is always on the 0-100 scale. The weighted rubric also carries its
/// 0-10 rollup in `total_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: u32,
    pub details: Details,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
}

impl ValidationResult {
    pub fn suggestions(&self) -> &[String] {
        self.suggestions.as_deref().unwrap_or(&[])
    }

    /// Status word used by history search.
    pub fn status_word(&self) -> &'static str {
        if self.is_valid {
            "valid"
        } else {
            "invalid"
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Per-criterion breakdown. Each rubric produces exactly one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    Address(AddressChecks),
    Structural(StructuralChecks),
    Weighted(WeightedCriteria),
}

/// Address checks. `disposable` and `spam` are set when the address is
/// disposable or spam-like, so `true` there is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressChecks {
    pub format: bool,
    pub dns: bool,
    pub disposable: bool,
    pub spam: bool,
    pub deliverable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuralChecks {
    pub structure: bool,
    pub clarity: bool,
    pub tone: bool,
    pub grammar: bool,
    pub completeness: bool,
    pub personalization: bool,
    pub branding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCriteria {
    pub spelling: CriterionScore,
    pub tone: CriterionScore,
    pub structure: CriterionScore,
    pub similarity: CriterionScore,
}

impl WeightedCriteria {
    /// Criteria in suggestion priority order.
    pub fn in_order(&self) -> [(&'static str, &CriterionScore); 4] {
        [
            ("spelling", &self.spelling),
            ("tone", &self.tone),
            ("structure", &self.structure),
            ("similarity", &self.similarity),
        ]
    }

    pub fn total(&self) -> f64 {
        self.in_order().iter().map(|(_, c)| c.score).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Excellent,
            s if s >= 70 => ScoreBand::Good,
            s if s >= 60 => ScoreBand::Fair,
            s if s >= 50 => ScoreBand::NeedsImprovement,
            _ => ScoreBand::Poor,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
            ScoreBand::Poor => "Poor",
        };
        f.write_str(label)
    }
}
