use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const NS_MAIN: i32 = 0;
pub const NS_TALK: i32 = 1;
pub const NS_USER: i32 = 2;
pub const NS_USER_TALK: i32 = 3;
pub const NS_PROJECT: i32 = 4;
pub const NS_FILE: i32 = 6;
pub const NS_MEDIAWIKI: i32 = 8;
pub const NS_TEMPLATE: i32 = 10;
pub const NS_HELP: i32 = 12;
pub const NS_CATEGORY: i32 = 14;
pub const NS_PROPERTY: i32 = 102;
pub const NS_CONCEPT: i32 = 108;

/// Canonical (English) namespace names known without configuration.
pub const CANONICAL_NAMESPACES: [(&str, i32); 12] = [
    ("", NS_MAIN),
    ("Talk", NS_TALK),
    ("User", NS_USER),
    ("User talk", NS_USER_TALK),
    ("Project", NS_PROJECT),
    ("File", NS_FILE),
    ("MediaWiki", NS_MEDIAWIKI),
    ("Template", NS_TEMPLATE),
    ("Help", NS_HELP),
    ("Category", NS_CATEGORY),
    ("Property", NS_PROPERTY),
    ("Concept", NS_CONCEPT),
];

const ILLEGAL_TITLE_CHARS: &[char] = &['[', ']', '{', '}', '|', '#', '<', '>'];

/// Normalize user-supplied title text.
///
/// Underscores become spaces, whitespace runs collapse, the first letter is
/// upper-cased when `capitalize` is set. Returns `None` for text that cannot
/// be a title (empty, or containing link syntax characters).
pub fn normalize_title(text: &str, capitalize: bool) -> Option<String> {
    let spaced = text.replace('_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() || collapsed.contains(ILLEGAL_TITLE_CHARS) {
        return None;
    }

    if !capitalize {
        return Some(collapsed);
    }

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => Some(first.to_uppercase().chain(chars).collect()),
        None => None,
    }
}

/// A wiki page: namespace plus title.
///
/// The namespace label is resolved when the page is created so that the page
/// can be serialized without access to the namespace table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WikiPage {
    pub title: String,
    pub namespace: i32,
    pub namespace_label: String,
}

impl WikiPage {
    pub fn new(
        namespace: i32,
        namespace_label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        WikiPage {
            title: title.into(),
            namespace,
            namespace_label: namespace_label.into(),
        }
    }

    /// Page in the main namespace.
    pub fn main(title: impl Into<String>) -> Self {
        WikiPage::new(NS_MAIN, "", title)
    }

    /// Page in the category namespace, with the canonical label.
    pub fn category(title: impl Into<String>) -> Self {
        WikiPage::new(NS_CATEGORY, "Category", title)
    }

    /// Page in the concept namespace, with the canonical label.
    pub fn concept(title: impl Into<String>) -> Self {
        WikiPage::new(NS_CONCEPT, "Concept", title)
    }

    /// Title with namespace prefix, e.g. `Category:City`.
    pub fn prefixed_text(&self) -> String {
        if self.namespace_label.is_empty() {
            self.title.clone()
        } else {
            format!("{}:{}", self.namespace_label, self.title)
        }
    }
}

impl fmt::Display for WikiPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefixed_text())
    }
}

/// A property used in a condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub label: String,
    /// `[[-Has part::X]]`: pages that are the value of `Has part` on `X`.
    pub inverse: bool,
}

impl Property {
    pub fn new(label: impl Into<String>) -> Self {
        Property {
            label: label.into(),
            inverse: false,
        }
    }

    pub fn inverse(label: impl Into<String>) -> Self {
        Property {
            label: label.into(),
            inverse: true,
        }
    }

    /// Parse a property name as written in a query atom.
    pub fn parse(text: &str, capitalize: bool) -> Option<Self> {
        let text = text.trim();
        match text.strip_prefix('-') {
            Some(rest) => normalize_title(rest, capitalize).map(Property::inverse),
            None => normalize_title(text, capitalize).map(Property::new),
        }
    }

    /// Label as written back into a query, including the inverse marker.
    pub fn wiki_value(&self) -> String {
        if self.inverse {
            format!("-{}", self.label)
        } else {
            self.label.clone()
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wiki_value())
    }
}

/// Value type of a property, deciding how literals are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Wiki pages; the only type that admits subqueries.
    #[default]
    Page,
    Number,
    Text,
}

/// A concrete value in a value condition.
#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    Page(WikiPage),
    Number(Decimal),
    Text(String),
}

impl DataItem {
    /// The value as it is written in query syntax.
    pub fn wiki_value(&self) -> String {
        match self {
            DataItem::Page(page) => page.prefixed_text(),
            DataItem::Number(n) => n.normalize().to_string(),
            DataItem::Text(s) => s.clone(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            DataItem::Page(_) => ValueType::Page,
            DataItem::Number(_) => ValueType::Number,
            DataItem::Text(_) => ValueType::Text,
        }
    }
}
