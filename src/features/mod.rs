pub mod address;
pub mod structural;
pub mod weighted;

use crate::error::QcError;
use crate::result::ValidationResult;
use crate::rubric_config::RubricConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete scoring rubric: a fixed set of criteria plus the rollup that
/// turns their results into a [`ValidationResult`].
///
/// `validate` is total over non-empty trimmed text and has no side effects.
pub trait Rubric: Send + Sync {
    fn validate(&self, text: &str) -> ValidationResult;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubricKind {
    /// Five pass/fail checks over an email address.
    Address,
    /// Seven weighted pass/fail criteria over an email body.
    Structural,
    /// Four continuous 0-2.5 criteria over an email body.
    #[default]
    Weighted,
}

impl RubricKind {
    pub const ALL: [RubricKind; 3] = [
        RubricKind::Address,
        RubricKind::Structural,
        RubricKind::Weighted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RubricKind::Address => "address",
            RubricKind::Structural => "structural",
            RubricKind::Weighted => "weighted",
        }
    }
}

impl fmt::Display for RubricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RubricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "address" => Ok(RubricKind::Address),
            "structural" => Ok(RubricKind::Structural),
            "weighted" => Ok(RubricKind::Weighted),
            other => Err(format!(
                "Unknown rubric '{other}' (expected address, structural or weighted)"
            )),
        }
    }
}

/// Entry point: one rubric, built once from configuration.
pub struct QcEngine {
    kind: RubricKind,
    rubric: Box<dyn Rubric>,
}

impl QcEngine {
    pub fn new(kind: RubricKind, config: &RubricConfig) -> Result<Self, QcError> {
        let rubric: Box<dyn Rubric> = match kind {
            RubricKind::Address => Box::new(address::AddressRubric::new(config)?),
            RubricKind::Structural => Box::new(structural::StructuralRubric::new(config)?),
            RubricKind::Weighted => Box::new(weighted::WeightedRubric::new(config)?),
        };
        Ok(Self { kind, rubric })
    }

    pub fn with_defaults(kind: RubricKind) -> Result<Self, QcError> {
        Self::new(kind, &RubricConfig::default())
    }

    pub fn kind(&self) -> RubricKind {
        self.kind
    }

    pub fn rubric_name(&self) -> &str {
        self.rubric.name()
    }

    /// Score `text`. Empty or whitespace-only input is rejected before any
    /// criterion runs.
    pub fn validate(&self, text: &str) -> Result<ValidationResult, QcError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QcError::EmptyInput);
        }

        let result = self.rubric.validate(text);
        log::debug!(
            "{} rubric scored {} chars: score={} valid={}",
            self.rubric.name(),
            text.len(),
            result.score,
            result.is_valid
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_kind_parsing() {
        assert_eq!("Address".parse::<RubricKind>(), Ok(RubricKind::Address));
        assert_eq!(" weighted ".parse::<RubricKind>(), Ok(RubricKind::Weighted));
        assert!("boolean".parse::<RubricKind>().is_err());
        for kind in RubricKind::ALL {
            assert_eq!(kind.to_string().parse::<RubricKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        for kind in RubricKind::ALL {
            let engine = QcEngine::with_defaults(kind).unwrap();
            assert!(matches!(engine.validate(""), Err(QcError::EmptyInput)));
            assert!(matches!(engine.validate(" \n\t "), Err(QcError::EmptyInput)));
        }
    }

    #[test]
    fn test_input_is_trimmed() {
        let engine = QcEngine::with_defaults(RubricKind::Address).unwrap();
        let padded = engine.validate("  jane.doe@gmail.com \n").unwrap();
        let plain = engine.validate("jane.doe@gmail.com").unwrap();
        assert_eq!(padded, plain);
        assert_eq!(plain.score, 100);
    }

    #[test]
    fn test_engine_reports_kind_and_name() {
        let engine = QcEngine::with_defaults(RubricKind::Structural).unwrap();
        assert_eq!(engine.kind(), RubricKind::Structural);
        assert_eq!(engine.rubric_name(), "Structural");
    }
}
