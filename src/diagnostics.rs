//! Problems found while parsing a query.
//!
//! Malformed input never aborts parsing. Each problem is recorded as a
//! [`Diagnostic`] and the parser carries on with whatever it could salvage.
//! A diagnostic exposes a symbolic [message key](Diagnostic::message_key)
//! and its [parameters](Diagnostic::params) so that a localization layer can
//! render it; `Display` gives a plain English fallback.

use crate::ast::{QueryFeatures, ValueType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// An atom whose content did not yield any condition.
    #[error("a part of the query could not be understood")]
    BadAtom,

    /// Text after a single `|` inside an atom (the retired label syntax).
    #[error("the part \"{content}\" of the query was not understood")]
    UnexpectedTrailingContent { content: String },

    /// A stray chunk between atoms.
    #[error("the part \"{part}\" of the query was not understood")]
    UnexpectedPart { part: String },

    /// A chunk where the closing `]]` of an atom was expected.
    #[error("the symbol \"{symbol}\" was used in a place where it is not useful")]
    MisplacedSymbol { symbol: String },

    /// The input ended inside an atom.
    #[error("some use of \"[[\" in the query was not closed by a matching \"]]\"")]
    MissingClosingBrackets,

    /// A construct that the configured feature set does not permit.
    #[error(
        "the query feature {} is not supported here, so \"{fragment}\" was dropped",
        feature_name(.feature)
    )]
    FeatureNotPermitted {
        feature: QueryFeatures,
        fragment: String,
    },

    /// A closing delimiter that does not match the innermost open block, or a
    /// block still open at the end of the input (`found` is `None`).
    #[error("{}", mismatch_text(.expected, .found))]
    MismatchedDelimiter {
        expected: Option<String>,
        found: Option<String>,
    },

    /// A `<q>…</q>` block, or one of its disjuncts, without any condition.
    #[error("a subquery has no valid condition")]
    EmptySubquery,

    /// `<q>` in a place where no subquery is possible.
    #[error("a subquery was used in a place where no subqueries are allowed")]
    MisplacedSubquery,

    /// `<q>` as the value of a property that does not hold pages.
    #[error("subqueries are not supported for values of property \"{property}\"")]
    ValueSubquery { property: String },

    /// A property condition without any value.
    #[error("the condition on property \"{property}\" has no value")]
    PropertyValueProblem { property: String },

    /// Text in property position that cannot name a property.
    #[error("\"{text}\" cannot be used as a property name")]
    InvalidProperty { text: String },

    /// A literal that cannot be read as a value of the expected type.
    #[error("\"{value}\" is not a valid {} value", type_name(.value_type))]
    InvalidValue { value: String, value_type: ValueType },
}

impl Diagnostic {
    /// Symbolic message key for localization.
    pub fn message_key(&self) -> &'static str {
        match self {
            Diagnostic::BadAtom => "smw_badqueryatom",
            Diagnostic::UnexpectedTrailingContent { .. } | Diagnostic::UnexpectedPart { .. } => {
                "smw_unexpectedpart"
            }
            Diagnostic::MisplacedSymbol { .. } => "smw_misplacedsymbol",
            Diagnostic::MissingClosingBrackets => "smw_noclosingbrackets",
            Diagnostic::FeatureNotPermitted { feature, .. } => {
                if *feature == QueryFeatures::CONJUNCTION {
                    "smw_noconjunctions"
                } else if *feature == QueryFeatures::DISJUNCTION {
                    "smw_nodisjunctions"
                } else {
                    "smw_noqueryfeature"
                }
            }
            Diagnostic::MismatchedDelimiter { found: Some(_), .. } => "smw_toomanyclosing",
            Diagnostic::MismatchedDelimiter { found: None, .. } => "smw_noclosingbrackets",
            Diagnostic::EmptySubquery => "smw_emptysubquery",
            Diagnostic::MisplacedSubquery => "smw_misplacedsubquery",
            Diagnostic::ValueSubquery { .. } => "smw_valuesubquery",
            Diagnostic::PropertyValueProblem { .. } => "smw_propvalueproblem",
            Diagnostic::InvalidProperty { .. } => "smw_noproperty",
            Diagnostic::InvalidValue { value_type, .. } => match value_type {
                ValueType::Number => "smw_nofloat",
                ValueType::Page => "smw_notitle",
                ValueType::Text => "smw_emptystring",
            },
        }
    }

    /// Ordered message parameters.
    pub fn params(&self) -> Vec<String> {
        match self {
            Diagnostic::BadAtom
            | Diagnostic::MissingClosingBrackets
            | Diagnostic::EmptySubquery
            | Diagnostic::MisplacedSubquery => Vec::new(),
            Diagnostic::UnexpectedTrailingContent { content } => vec![content.clone()],
            Diagnostic::UnexpectedPart { part } => vec![part.clone()],
            Diagnostic::MisplacedSymbol { symbol } => vec![symbol.clone()],
            // keep "[" from being read as link syntax when the message is rendered
            Diagnostic::FeatureNotPermitted { fragment, .. } => {
                vec![fragment.replace('[', "&#x005B;")]
            }
            Diagnostic::MismatchedDelimiter { expected, found } => match found {
                Some(found) => vec![found.clone()],
                None => expected.iter().cloned().collect(),
            },
            Diagnostic::ValueSubquery { property }
            | Diagnostic::PropertyValueProblem { property } => vec![property.clone()],
            Diagnostic::InvalidProperty { text } => vec![text.clone()],
            Diagnostic::InvalidValue { value, .. } => vec![value.clone()],
        }
    }
}

fn feature_name(feature: &QueryFeatures) -> &'static str {
    feature.name().unwrap_or("(combined)")
}

fn type_name(value_type: &ValueType) -> &'static str {
    match value_type {
        ValueType::Page => "page",
        ValueType::Number => "number",
        ValueType::Text => "text",
    }
}

fn mismatch_text(expected: &Option<String>, found: &Option<String>) -> String {
    match (expected, found) {
        (Some(expected), Some(found)) => {
            format!("found \"{}\" where \"{}\" was expected", found, expected)
        }
        (None, Some(found)) => format!("the closing \"{}\" has no opening counterpart", found),
        (Some(expected), None) => format!("the query ended before the closing \"{}\"", expected),
        (None, None) => "unbalanced delimiters in the query".to_string(),
    }
}
