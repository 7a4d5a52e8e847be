//! Inference classifier
//!
//! Turns the continuous score produced by the model gateway into a discrete
//! label plus an advisory string. Pure and deterministic: no I/O, no clock,
//! no randomness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision threshold applied to the model score.
///
/// Scores strictly above the threshold are classified as malignant.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Classification label (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Malignant,
    Benign,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Malignant => "Malignant",
            Label::Benign => "Benign",
        }
    }

    /// Advisory string for the label.
    ///
    /// The match is exhaustive, so every label has a suggestion; adding a
    /// label without one is a compile error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Label::Malignant => "Consult a dermatologist as soon as possible.",
            Label::Benign => "No signs of malignancy detected. Keep monitoring for changes.",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one model score
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Classification label
    pub label: Label,

    /// Advisory string derived from the label
    pub suggestion: String,
}

/// Apply the fixed decision rule to a model score.
pub fn classify(score: f32) -> Classification {
    let label = if score > DECISION_THRESHOLD {
        Label::Malignant
    } else {
        Label::Benign
    };
    Classification {
        label,
        suggestion: label.suggestion().to_string(),
    }
}
