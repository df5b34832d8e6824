//! Serialization of description trees.
//!
//! Two renderings are provided:
//!
//! - **Query syntax** via [`Description::query_string()`] and `Display` - the
//!   condition written back as an inline query that parses to an equivalent
//!   tree. This is also the form in which pruned fragments are logged.
//! - **JSON** via [`to_json()`] - a structural dump for tools and the CLI.
//!
//! # Value position
//!
//! Some conditions are written differently when they appear as the value of a
//! property. `[[Paris]]` alone is a page condition, but as a value it is just
//! `Paris`, as in `[[Located in::Paris]]`. Conditions that have no value form
//! are wrapped in `<q>…</q>`.
//!
//! # Examples
//!
//! ```
//! use wikiq_lang::ast::{Description, WikiPage};
//!
//! let class = Description::class(vec![WikiPage::category("City"), WikiPage::category("Town")]);
//! assert_eq!(class.to_string(), "[[Category:City||Town]]");
//! assert_eq!(Description::thing().query_string(true), "+");
//! ```

use std::fmt;

use serde_json::{Value, json};

use crate::ast::{
    ClassDescription, Description, DescriptionKind, NS_CATEGORY, PrintMode, SomeProperty,
    ValueDescription,
};

impl Description {
    /// Query syntax for this condition; `as_value` selects the form used in
    /// property value position.
    pub fn query_string(&self, as_value: bool) -> String {
        match self.kind() {
            DescriptionKind::Thing => {
                if as_value {
                    "+".to_string()
                } else {
                    String::new()
                }
            }
            DescriptionKind::Value(value) => value_string(value, as_value),
            DescriptionKind::Class(class) => wrap_subquery(class_string(class), as_value),
            DescriptionKind::Namespace(namespace) => {
                let colon = if namespace.namespace == NS_CATEGORY { ":" } else { "" };
                wrap_subquery(format!("[[{}{}:+]]", colon, namespace.label), as_value)
            }
            DescriptionKind::Concept(concept) => {
                wrap_subquery(format!("[[{}]]", concept.concept.prefixed_text()), as_value)
            }
            DescriptionKind::SomeProperty(some) => {
                let atom = some_property_string(some);
                if as_value {
                    format!("<q>{}</q>", atom)
                } else {
                    atom
                }
            }
            DescriptionKind::Conjunction(conjunction) => {
                let parts: Vec<String> = conjunction
                    .children()
                    .iter()
                    .map(|child| child.query_string(false))
                    .filter(|part| !part.is_empty())
                    .collect();
                if parts.is_empty() {
                    return if as_value { "+".to_string() } else { String::new() };
                }
                // AND binds stronger than OR, a standalone conjunction needs no <q>
                wrap_subquery(parts.join(" "), as_value)
            }
            DescriptionKind::Disjunction(disjunction) => {
                if disjunction.is_true() {
                    return "+".to_string();
                }
                let separator = if as_value { "||" } else { " OR " };
                let parts: Vec<String> = disjunction
                    .children()
                    .iter()
                    .map(|child| match child.kind() {
                        DescriptionKind::SomeProperty(_) if as_value => child.query_string(true),
                        DescriptionKind::SomeProperty(_) => {
                            format!(" <q>{}</q> ", child.query_string(false))
                        }
                        _ => child.query_string(as_value),
                    })
                    .collect();
                // an empty disjunction matches nothing and has no syntax,
                // it comes out as an empty subquery
                let joined = parts.join(separator);
                if as_value {
                    joined
                } else {
                    format!(" <q>{}</q> ", joined)
                }
            }
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_string(false))
    }
}

fn wrap_subquery(atom: String, as_value: bool) -> String {
    if as_value {
        format!(" <q>{}</q> ", atom)
    } else {
        atom
    }
}

fn value_string(value: &ValueDescription, as_value: bool) -> String {
    let comparator = value.comparator.symbol();
    let literal = value.data_item.wiki_value();
    if as_value {
        format!("{}{}", comparator, literal)
    } else if comparator.is_empty() {
        // leading colon keeps [[:Category:X]] a page, not a class condition
        format!("[[:{}]]", literal)
    } else {
        format!("[[{}{}]]", comparator, literal)
    }
}

fn class_string(class: &ClassDescription) -> String {
    let mut result = String::from("[[");
    for (i, page) in class.pages().iter().enumerate() {
        if i == 0 {
            result.push_str(&page.prefixed_text());
        } else {
            result.push_str("||");
            result.push_str(&page.title);
        }
    }
    result.push_str("]]");
    result
}

/// `[[A.B::value]]` for nested property conditions, as long as no label
/// contains a dot itself.
fn some_property_string(some: &SomeProperty) -> String {
    let mut chain = vec![some.property.wiki_value()];
    let mut inner = &*some.description;

    if !chain[0].contains('.') {
        while let DescriptionKind::SomeProperty(next) = inner.kind() {
            let label = next.property.wiki_value();
            if label.contains('.') {
                break;
            }
            chain.push(label);
            inner = next.description.as_ref();
        }
    }

    let chain = chain.join(".");
    // a leading space stops the parser from splitting a dotted label
    let escape = if chain.contains('.') && chain == some.property.wiki_value() {
        " "
    } else {
        ""
    };
    format!("[[{}{}::{}]]", escape, chain, inner.query_string(true))
}

/// Structural JSON rendering of a description tree.
pub fn to_json(description: &Description) -> Value {
    let mut node = match description.kind() {
        DescriptionKind::Thing => json!({ "type": "thing" }),
        DescriptionKind::Value(value) => json!({
            "type": "value",
            "value": value.data_item.wiki_value(),
            "value_type": value.data_item.value_type(),
            "comparator": value.comparator,
            "property": value.property.as_ref().map(|p| p.wiki_value()),
        }),
        DescriptionKind::Class(class) => json!({
            "type": "class",
            "categories": class.pages().iter().map(|p| p.title.clone()).collect::<Vec<_>>(),
        }),
        DescriptionKind::Namespace(namespace) => json!({
            "type": "namespace",
            "namespace": namespace.namespace,
            "label": namespace.label,
        }),
        DescriptionKind::Concept(concept) => json!({
            "type": "concept",
            "concept": concept.concept.title,
        }),
        DescriptionKind::SomeProperty(some) => json!({
            "type": "some_property",
            "property": some.property.wiki_value(),
            "description": to_json(&some.description),
        }),
        DescriptionKind::Conjunction(conjunction) => json!({
            "type": "conjunction",
            "children": conjunction.children().iter().map(to_json).collect::<Vec<_>>(),
        }),
        DescriptionKind::Disjunction(disjunction) => json!({
            "type": "disjunction",
            "true": disjunction.is_true(),
            "children": disjunction.children().iter().map(to_json).collect::<Vec<_>>(),
        }),
    };

    if let Value::Object(map) = &mut node {
        map.insert("size".into(), description.size().into());
        map.insert("depth".into(), description.depth().into());
        if !description.print_requests().is_empty() {
            let printouts: Vec<Value> = description
                .print_requests()
                .iter()
                .map(|request| {
                    let target = match &request.mode {
                        PrintMode::ThisPage => String::new(),
                        PrintMode::Categories => "categories".to_string(),
                        PrintMode::Category(page) => page.prefixed_text(),
                        PrintMode::Property(property) => property.wiki_value(),
                    };
                    json!({ "label": request.label, "target": target })
                })
                .collect();
            map.insert("print_requests".into(), Value::Array(printouts));
        }
    }
    node
}
