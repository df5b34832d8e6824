//! Resolution of single `[[…]]` atoms.
//!
//! After the opening brackets the first chunk decides what kind of atom
//! follows:
//!
//! 1. A category or concept namespace prefix starts a class or concept atom.
//! 2. Text followed by `::` (or `:=`) is a property condition, unless the text
//!    starts with `:`.
//! 3. Anything else names pages or namespaces.
//!
//! Every atom ends in [`QueryParser::finish_link`], which reconciles
//! namespaces and recovers from whatever stands where `]]` was expected.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    ast::{
        ClassDescription, Comparator, DataItem, Description, NS_CATEGORY, NS_CONCEPT, Property,
        Token, ValueType, WikiPage, normalize_title,
    },
    chunker::StopSet,
    diagnostics::Diagnostic,
    parser::QueryParser,
};

impl QueryParser {
    /// Resolve one atom; called right after its `[[` was consumed.
    pub(crate) fn link_description(&mut self, set_ns: bool) -> (Option<Description>, bool) {
        let mark = self.errors.len();
        self.enter("]]");

        // untrimmed: a leading space escapes property chains
        let raw = self.chunker.read_chunk(StopSet::Default, true, false);
        let first = raw.trim();

        if let Some(category) = self.class_prefix(first) {
            return self.class_description(category, set_ns, mark);
        }

        let token = Token::classify(first);
        if token.is_delimiter() && token != Token::OpenSubquery {
            let chunk = first.to_string();
            return self.finish_link(chunk, false, None, set_ns, mark);
        }

        let separator = self.chunker.peek_chunk();
        if Token::classify(&separator) == Token::PropertySeparator {
            if !raw.starts_with(':') {
                return self.property_description(&raw, set_ns, mark);
            }
            // escaped page title that contains "::"
            let rest = self.chunker.read_chunk(StopSet::LinkContent, true, true);
            let text = format!("{}{}", raw, rest);
            return self.article_description(text.trim().to_string(), set_ns, mark);
        }
        let first = first.to_string();
        self.article_description(first, set_ns, mark)
    }

    /// `Some(true)` for a category prefix, `Some(false)` for a concept prefix.
    fn class_prefix(&self, chunk: &str) -> Option<bool> {
        let name = chunk.strip_suffix(':')?.trim().replace('_', " ").to_lowercase();
        if self
            .config
            .category_labels()
            .iter()
            .any(|label| label.to_lowercase() == name)
        {
            return Some(true);
        }
        if self
            .config
            .concept_labels()
            .iter()
            .any(|label| label.to_lowercase() == name)
        {
            return Some(false);
        }
        None
    }

    /// `[[Category:A||B]]` or `[[Concept:C]]`.
    fn class_description(
        &mut self,
        category: bool,
        set_ns: bool,
        mark: usize,
    ) -> (Option<Description>, bool) {
        let mut result = None;

        let chunk = loop {
            let chunk = self.chunker.next_chunk();
            let token = Token::classify(&chunk);
            if token.is_delimiter() {
                break chunk;
            }
            // "+" is meaningless here, every page is in some class
            if token != Token::Wildcard {
                let description = self.class_member(&chunk, category);
                result = self.combine(result, description, false);
            }

            let chunk = self.chunker.next_chunk();
            if !(category && Token::classify(&chunk) == Token::Or) {
                break chunk;
            }
        };

        self.finish_link(chunk, false, result, set_ns, mark)
    }

    fn class_member(&mut self, text: &str, category: bool) -> Option<Description> {
        let Some(title) = normalize_title(text, self.config.capital_links) else {
            self.errors.push(Diagnostic::InvalidValue {
                value: text.to_string(),
                value_type: ValueType::Page,
            });
            return None;
        };
        if category {
            let page = WikiPage::new(NS_CATEGORY, self.config.category_label.clone(), title);
            let class = ClassDescription::from(page)
                .expanding_hierarchy(self.config.hierarchy_expansion());
            Some(class.into())
        } else {
            let page = WikiPage::new(NS_CONCEPT, self.config.concept_label.clone(), title);
            Some(Description::concept(page))
        }
    }

    /// `[[Located in.Part of::Europe||Asia]]`; the separator is still unread.
    fn property_description(
        &mut self,
        name: &str,
        set_ns: bool,
        mark: usize,
    ) -> (Option<Description>, bool) {
        self.chunker.next_chunk();

        let names: Vec<&str> = if name.starts_with(' ') {
            vec![name]
        } else {
            name.split('.').collect()
        };

        let mut properties = Vec::with_capacity(names.len());
        let mut value_type = ValueType::Page;
        for part in names {
            // only pages have properties to follow
            if value_type != ValueType::Page {
                self.errors.push(Diagnostic::ValueSubquery {
                    property: part.trim().to_string(),
                });
                return self.abandon_link(set_ns, mark);
            }
            let Some(property) = Property::parse(part, self.config.capital_links) else {
                self.errors.push(Diagnostic::InvalidProperty {
                    text: part.trim().to_string(),
                });
                return self.abandon_link(set_ns, mark);
            };
            value_type = self.config.value_type(&property);
            properties.push(property);
        }
        let Some(property) = properties.last().cloned() else {
            return self.abandon_link(set_ns, mark);
        };
        let holds_pages = value_type == ValueType::Page;

        let mut inner: Option<Description> = None;
        let chunk = loop {
            let chunk = self.chunker.next_chunk();
            let token = Token::classify(&chunk);

            let terminator = if token == Token::Wildcard {
                let wildcard = self.wildcard(holds_pages);
                inner = self.combine(inner, Some(wildcard), false);
                self.chunker.next_chunk()
            } else if token == Token::OpenSubquery {
                self.enter("</q>");
                let (subquery, _) = self.subquery_description(true);
                if holds_pages {
                    inner = self.combine(inner, subquery, false);
                } else {
                    self.errors.push(Diagnostic::ValueSubquery {
                        property: property.wiki_value(),
                    });
                    inner = self.combine(inner, Some(Description::thing()), false);
                }
                self.chunker.next_chunk()
            } else if token.is_delimiter() {
                // no value before the delimiter
                chunk
            } else {
                let (value, terminator) = self.read_value(chunk);
                let description = self.value_description(&property, value_type, &value);
                inner = self.combine(inner, Some(description), false);
                terminator
            };

            if Token::classify(&terminator) != Token::Or {
                break terminator;
            }
        };

        let inner = match inner {
            Some(inner) => inner,
            None => {
                self.errors.push(Diagnostic::PropertyValueProblem {
                    property: property.wiki_value(),
                });
                self.wildcard(holds_pages)
            }
        };

        let result = properties
            .into_iter()
            .rev()
            .fold(inner, |inner, property| Description::some_property(property, inner));

        self.finish_link(chunk, false, Some(result), set_ns, mark)
    }

    /// Read the rest of a literal value, which may contain balanced `[[…]]`.
    ///
    /// Returns the value and the chunk that ended it.
    fn read_value(&mut self, first: String) -> (String, String) {
        let mut value = first;
        let mut open = 1;
        loop {
            let chunk = self.chunker.read_chunk(StopSet::LinkContent, true, true);
            match chunk.as_str() {
                "[[" => open += 1,
                "]]" => open -= 1,
                "|" | "||" if open == 1 => open = 0,
                "" => open = 0,
                _ => {}
            }
            if open == 0 {
                return (value, chunk);
            }
            value.push_str(&chunk);
        }
    }

    fn value_description(
        &mut self,
        property: &Property,
        value_type: ValueType,
        text: &str,
    ) -> Description {
        let (comparator, literal) = Comparator::split_prefix(
            text.trim(),
            self.config.strict_comparators,
            &self.config.comparators,
        );
        let literal = literal.trim();

        let item = match value_type {
            ValueType::Page => self.page_from_text(literal).map(DataItem::Page),
            ValueType::Number => Decimal::from_str(literal)
                .or_else(|_| Decimal::from_scientific(literal))
                .ok()
                .map(DataItem::Number),
            ValueType::Text => Some(literal)
                .filter(|text| !text.is_empty())
                .map(|text| DataItem::Text(text.to_string())),
        };

        match item {
            Some(item) => Description::value(item, Some(property.clone()), comparator),
            None => {
                self.errors.push(Diagnostic::InvalidValue {
                    value: text.trim().to_string(),
                    value_type,
                });
                Description::thing()
            }
        }
    }

    /// `+` as a property value: any page in the default namespaces, or
    /// anything at all.
    fn wildcard(&self, holds_pages: bool) -> Description {
        match &self.default_namespaces {
            Some(defaults) if holds_pages => defaults.clone(),
            _ => Description::thing(),
        }
    }

    /// `[[Berlin||Paris]]`, `[[Help:+]]`, `[[:Category:City]]`.
    fn article_description(
        &mut self,
        first: String,
        set_ns: bool,
        mark: usize,
    ) -> (Option<Description>, bool) {
        let mut chunk = first;
        let mut result = None;

        loop {
            if Token::classify(&chunk) == Token::OpenSubquery {
                self.errors.push(Diagnostic::MisplacedSubquery);
                return self.abandon_link(set_ns, mark);
            }

            let description = self.article_member(&chunk);
            result = self.combine(result, description, false);

            chunk = self.chunker.read_chunk(StopSet::LinkContent, true, true);
            if Token::classify(&chunk) != Token::Or {
                break;
            }
            chunk = self.chunker.read_chunk(StopSet::LinkContent, true, true);
        }

        self.finish_link(chunk, true, result, set_ns, mark)
    }

    fn article_member(&mut self, text: &str) -> Option<Description> {
        let mut parts: Vec<&str> = text.splitn(3, ':').collect();
        if parts.len() == 3 && parts[0].is_empty() {
            parts.remove(0);
        }
        if parts.len() == 2 && parts[1].trim() == "+" {
            // unknown namespaces are skipped; the atom may still be empty
            return self
                .config
                .namespace_index(parts[0])
                .map(|ns| self.namespace_description(ns));
        }

        match self.page_from_text(text) {
            Some(page) => Some(Description::value(
                DataItem::Page(page),
                None,
                Comparator::Equal,
            )),
            None => {
                self.errors.push(Diagnostic::InvalidValue {
                    value: text.to_string(),
                    value_type: ValueType::Page,
                });
                None
            }
        }
    }

    /// A page named by text that may carry a namespace prefix.
    pub(crate) fn page_from_text(&self, text: &str) -> Option<WikiPage> {
        let text = text.trim();
        let text = text.strip_prefix(':').unwrap_or(text);
        let capitalize = self.config.capital_links;

        if let Some((prefix, title)) = text.split_once(':') {
            let namespace = Some(prefix.trim())
                .filter(|prefix| !prefix.is_empty())
                .and_then(|prefix| self.config.namespace_index(prefix));
            if let Some(namespace) = namespace {
                let label = self
                    .config
                    .namespace_label(namespace)
                    .unwrap_or_else(|| prefix.trim().to_string());
                let title = normalize_title(title, capitalize)?;
                return Some(WikiPage::new(namespace, label, title));
            }
        }
        normalize_title(text, capitalize).map(WikiPage::main)
    }

    pub(crate) fn namespace_description(&self, namespace: i32) -> Description {
        let label = self
            .config
            .namespace_label(namespace)
            .unwrap_or_else(|| namespace.to_string());
        Description::namespace(namespace, label)
    }

    /// Give up on the current atom and skip to its closing brackets.
    fn abandon_link(&mut self, set_ns: bool, mark: usize) -> (Option<Description>, bool) {
        let mut chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
        if chunk != "]]" {
            chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
        }
        self.finish_link(chunk, false, None, set_ns, mark)
    }

    /// Close an atom: apply default namespaces, report a missing result and
    /// recover from anything other than `]]` in `chunk`.
    ///
    /// `mark` is the number of diagnostics recorded before the atom started.
    pub(crate) fn finish_link(
        &mut self,
        chunk: String,
        has_namespaces: bool,
        result: Option<Description>,
        set_ns: bool,
        mark: usize,
    ) -> (Option<Description>, bool) {
        let mut has_namespaces = has_namespaces;
        let mut result = result;

        if result.is_none() {
            // a specific diagnostic already explains the empty atom
            if self.errors.len() == mark {
                self.errors.push(Diagnostic::BadAtom);
            }
        } else if !has_namespaces && set_ns {
            if let Some(defaults) = self.default_namespaces.clone() {
                result = self.combine(result, Some(defaults), true);
                has_namespaces = true;
            }
        }

        let mut chunk = chunk;
        if Token::classify(&chunk) == Token::Pipe {
            chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
            let mut content = String::from("|");
            if chunk != "]]" {
                content.push_str(&chunk);
                chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
            }
            self.errors
                .push(Diagnostic::UnexpectedTrailingContent { content });
        }

        if chunk != "]]" {
            if !chunk.is_empty() {
                self.errors.push(Diagnostic::MisplacedSymbol {
                    symbol: chunk.clone(),
                });
                chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
                if chunk != "]]" {
                    chunk = self.chunker.read_chunk(StopSet::ClosingBrackets, true, true);
                }
            }
            if chunk.is_empty() {
                self.errors.push(Diagnostic::MissingClosingBrackets);
            }
        }

        let expected = self.delimiters.last().map(|d| d.to_string());
        if !self.leave("]]") {
            self.errors.push(Diagnostic::MismatchedDelimiter {
                expected,
                found: Some("]]".to_string()),
            });
        }

        (result, has_namespaces)
    }
}
