use crate::ast::{Property, WikiPage, normalize_title};
use crate::ast::datavalue::NS_CATEGORY;

/// What a print request asks to output for each result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintMode {
    /// The result page itself (`?`)
    ThisPage,
    /// All categories of the result (`?Category`)
    Categories,
    /// Whether the result is in the given category (`?Category:City`)
    Category(WikiPage),
    /// Values of a property (`?Population`)
    Property(Property),
}

/// An output column attached to a description.
///
/// Print requests are carried through the description tree without being
/// interpreted: containers collect the requests of their children as they
/// are built, and pruning keeps them on whatever node replaces the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    pub label: String,
    pub mode: PrintMode,
}

impl PrintRequest {
    pub fn new(mode: PrintMode, label: impl Into<String>) -> Self {
        PrintRequest {
            label: label.into(),
            mode,
        }
    }

    /// Parse a printout parameter such as `?Population = Inhabitants`.
    ///
    /// `category_labels` lists the spellings of the category namespace
    /// that select category printouts. Returns `None` when the parameter is
    /// not a printout or names an invalid property.
    pub fn parse(param: &str, category_labels: &[&str]) -> Option<Self> {
        let body = param.trim().strip_prefix('?')?;
        let (target, label) = match body.split_once('=') {
            Some((target, label)) => (target.trim(), Some(label.trim())),
            None => (body.trim(), None),
        };

        if target.is_empty() {
            return Some(PrintRequest::new(PrintMode::ThisPage, label.unwrap_or("")));
        }

        for category in category_labels {
            if target.eq_ignore_ascii_case(category) {
                return Some(PrintRequest::new(
                    PrintMode::Categories,
                    label.unwrap_or(*category),
                ));
            }
            let Some((prefix, title)) = target.split_once(':') else {
                continue;
            };
            if prefix.trim().eq_ignore_ascii_case(category) {
                let title = normalize_title(title, true)?;
                let page = WikiPage::new(NS_CATEGORY, *category, title.clone());
                return Some(PrintRequest::new(
                    PrintMode::Category(page),
                    label.map(str::to_string).unwrap_or(title),
                ));
            }
        }

        let property = Property::parse(target, true)?;
        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| property.label.clone());
        Some(PrintRequest::new(PrintMode::Property(property), label))
    }
}
