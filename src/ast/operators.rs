use serde::{Deserialize, Serialize};

/// Comparators of a value condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Equal (no prefix)
    Equal,
    /// Not equal (`!`)
    NotEqual,
    /// Strictly less (`<<`)
    Less,
    /// Strictly greater (`>>`)
    Greater,
    /// Less or equal (`≤`, or `<` with lenient comparators)
    LessEqual,
    /// Greater or equal (`≥`, or `>` with lenient comparators)
    GreaterEqual,
    /// Pattern match with `*` and `?` wildcards (`~`)
    Like,
    /// Negated pattern match (`!~`)
    NotLike,
}

impl Comparator {
    pub const ALL: [Comparator; 8] = [
        Comparator::Equal,
        Comparator::NotEqual,
        Comparator::Less,
        Comparator::Greater,
        Comparator::LessEqual,
        Comparator::GreaterEqual,
        Comparator::Like,
        Comparator::NotLike,
    ];

    /// Prefix written in front of a value when serializing.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equal => "",
            Comparator::NotEqual => "!",
            Comparator::Less => "<<",
            Comparator::Greater => ">>",
            Comparator::LessEqual => "≤",
            Comparator::GreaterEqual => "≥",
            Comparator::Like => "~",
            Comparator::NotLike => "!~",
        }
    }

    /// Split a comparator prefix off a value literal.
    ///
    /// Prefixes are tried longest first, so `!~x` is `NotLike` and not
    /// `NotEqual` applied to `~x`. Comparators missing from `allowed` are not
    /// recognised and stay part of the literal. `strict` decides whether a
    /// bare `<`/`>` is strict or inclusive.
    pub fn split_prefix<'a>(
        value: &'a str,
        strict: bool,
        allowed: &[Comparator],
    ) -> (Comparator, &'a str) {
        let (lt, gt) = if strict {
            (Comparator::Less, Comparator::Greater)
        } else {
            (Comparator::LessEqual, Comparator::GreaterEqual)
        };
        let prefixes = [
            ("!~", Comparator::NotLike),
            ("<<", Comparator::Less),
            (">>", Comparator::Greater),
            ("≤", Comparator::LessEqual),
            ("≥", Comparator::GreaterEqual),
            ("<", lt),
            (">", gt),
            ("!", Comparator::NotEqual),
            ("~", Comparator::Like),
        ];

        for (prefix, comparator) in prefixes {
            if !allowed.contains(&comparator) {
                continue;
            }
            if let Some(rest) = value.strip_prefix(prefix) {
                return (comparator, rest);
            }
        }
        (Comparator::Equal, value)
    }
}
