//! Engine error types.
//!
//! `CatalogError` is fatal: a catalog that fails validation never becomes a
//! `Catalog`, so no session can be served from it. `SessionError` is
//! recoverable and leaves the session untouched.

use thiserror::Error;

/// A malformed catalog detected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog defines no traits at all.
    #[error("catalog has no traits")]
    NoTraits,

    /// A trait name is empty or whitespace.
    #[error("trait #{} has an empty name", .index + 1)]
    EmptyTraitName { index: usize },

    /// Two traits share a name.
    #[error("duplicate trait name: {0}")]
    DuplicateTrait(String),

    /// A trait has no scenarios to draw from.
    #[error("trait '{0}' has no scenarios")]
    EmptyPool(String),

    /// A scenario offers no options.
    #[error("trait '{trait_name}' scenario {}: no options", .scenario + 1)]
    EmptyOptions { trait_name: String, scenario: usize },

    /// The same option text appears twice in one scenario.
    #[error("trait '{trait_name}' scenario {}: duplicate option '{option}'", .scenario + 1)]
    DuplicateOption {
        trait_name: String,
        scenario: usize,
        option: String,
    },

    /// A feedback key is not a plain decimal option position.
    #[error("trait '{trait_name}' scenario {}: feedback key '{key}' is not a plain option number", .scenario + 1)]
    InvalidFeedbackKey {
        trait_name: String,
        scenario: usize,
        key: String,
    },

    /// Feedback is keyed to a position past the last option (or zero).
    #[error("trait '{trait_name}' scenario {}: feedback for option {position} but there are {options} options", .scenario + 1)]
    FeedbackOutOfRange {
        trait_name: String,
        scenario: usize,
        position: usize,
        options: usize,
    },

    /// An option has no feedback entry.
    #[error("trait '{trait_name}' scenario {}: no feedback for option {position}", .scenario + 1)]
    MissingFeedback {
        trait_name: String,
        scenario: usize,
        position: usize,
    },
}

/// A rejected session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The answer is not one of the scenario's options.
    #[error("'{option}' is not one of the options for scenario {}", .index + 1)]
    InvalidOption { index: usize, option: String },

    /// The selection index does not exist.
    #[error("scenario index {index} is out of range (selection has {len} scenarios)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Evaluation was requested before every scenario was answered.
    /// Holds the 0-based selection indices that still need an answer.
    #[error("unanswered scenarios: {}", format_positions(.0))]
    MissingAnswers(Vec<usize>),
}

fn format_positions(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_answers_lists_one_based_positions() {
        let err = SessionError::MissingAnswers(vec![0, 3]);
        assert_eq!(err.to_string(), "unanswered scenarios: 1, 4");
    }

    #[test]
    fn catalog_error_messages_name_the_scenario() {
        let err = CatalogError::MissingFeedback {
            trait_name: "Perseverance".into(),
            scenario: 1,
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "trait 'Perseverance' scenario 2: no feedback for option 3"
        );
    }
}
