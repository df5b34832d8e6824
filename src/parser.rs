use tracing::debug;

use crate::{
    ast::{Description, Query, QueryFeatures, Token},
    chunker::Chunker,
    config::{ConfigError, QueryConfig},
    diagnostics::Diagnostic,
};

/// Turns query strings into description trees.
///
/// A parser keeps per-parse state (the unread input, open delimiters, the
/// diagnostics found so far), so one instance parses one query at a time.
/// All state is reset at the start of [`QueryParser::parse`].
///
/// ```
/// use wikiq_lang::config::QueryConfig;
/// use wikiq_lang::parser::QueryParser;
///
/// let mut parser = QueryParser::new(QueryConfig::default()).unwrap();
/// let description = parser.parse("[[Category:City]] [[Located in::Germany]]");
/// assert_eq!(description.size(), 3);
/// assert!(parser.errors().is_empty());
/// ```
pub struct QueryParser {
    pub(crate) config: QueryConfig,
    pub(crate) chunker: Chunker,
    pub(crate) delimiters: Vec<&'static str>,
    pub(crate) errors: Vec<Diagnostic>,
    pub(crate) default_namespaces: Option<Description>,
}

impl QueryParser {
    pub fn new(config: QueryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let chunker = Chunker::new(&config.category_label, &config.concept_label)?;
        let default_namespaces = config.default_namespaces.clone();

        let mut parser = QueryParser {
            config,
            chunker,
            delimiters: Vec::new(),
            errors: Vec::new(),
            default_namespaces: None,
        };
        parser.set_default_namespaces(default_namespaces.as_deref());
        Ok(parser)
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Namespaces that queries without a namespace condition of their own
    /// are restricted to.
    ///
    /// `None` adds no restriction at all, while an empty list restricts
    /// queries to no namespace. That restriction is an empty disjunction,
    /// which has no query syntax of its own: it serializes as ` <q></q> `
    /// and parses back to `Thing` with an empty-subquery diagnostic.
    pub fn set_default_namespaces(&mut self, namespaces: Option<&[i32]>) {
        self.default_namespaces = namespaces.map(|ids| {
            let mut restrictions: Vec<Description> = ids
                .iter()
                .map(|&id| self.namespace_description(id))
                .collect();
            if restrictions.len() == 1 {
                restrictions.remove(0)
            } else {
                Description::disjunction(restrictions)
            }
        });
    }

    pub fn default_namespaces(&self) -> Option<&Description> {
        self.default_namespaces.as_ref()
    }

    /// Parse a query string.
    ///
    /// Always returns a tree; when nothing could be understood the result is
    /// `Thing` (or the default namespace restriction). Problems are
    /// available from [`QueryParser::errors`] afterwards.
    pub fn parse(&mut self, query: &str) -> Description {
        self.errors.clear();
        self.delimiters.clear();
        self.chunker.reset(query);
        debug!(query = %query, "parsing query");

        let (result, set_ns) = self.subquery_description(false);
        let result = if set_ns {
            result
        } else {
            let defaults = self.default_namespaces.clone();
            self.combine(defaults, result, true)
        };
        let result = result.unwrap_or_else(Description::thing);

        debug!(
            errors = self.errors.len(),
            size = result.size(),
            depth = result.depth(),
            "parsed query"
        );
        result
    }

    /// Parse a query string into a [`Query`] that owns its diagnostics.
    pub fn parse_query(&mut self, query: &str) -> Query {
        let description = self.parse(query);
        Query::new(description, self.errors.clone())
    }

    /// Diagnostics of the last parse.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Combine two partial results conjunctively or disjunctively.
    ///
    /// `incoming` is dropped with a diagnostic when the features it needs
    /// are not permitted. An existing container of the requested kind is
    /// extended, otherwise a new one is created. Two class conditions
    /// combined disjunctively become a single class condition.
    pub fn combine(
        &mut self,
        current: Option<Description>,
        incoming: Option<Description>,
        conjunction: bool,
    ) -> Option<Description> {
        let Some(incoming) = incoming else {
            return current;
        };
        if let Some(feature) = incoming.required_feature() {
            if !self.config.features.contains(feature) {
                self.reject(feature, &incoming);
                return current;
            }
        }
        let Some(mut current) = current else {
            return Some(incoming);
        };

        let extends = if conjunction {
            current.is_conjunction()
        } else {
            current.is_disjunction()
        };
        let incoming = if extends {
            match current.insert(incoming) {
                Ok(()) => return Some(current),
                Err(incoming) => incoming,
            }
        } else {
            incoming
        };

        let container = if conjunction {
            QueryFeatures::CONJUNCTION
        } else {
            QueryFeatures::DISJUNCTION
        };
        if !self.config.features.contains(container) {
            self.reject(container, &incoming);
            return Some(current);
        }

        if conjunction {
            Some(Description::conjunction([current, incoming]))
        } else {
            match current.merge_class(incoming) {
                Ok(()) => Some(current),
                Err(incoming) => Some(Description::disjunction([current, incoming])),
            }
        }
    }

    /// Open a block that must be closed by `closing`.
    pub(crate) fn enter(&mut self, closing: &'static str) {
        self.delimiters.push(closing);
    }

    /// Close the innermost block; false if it was not closed by `closing`.
    pub(crate) fn leave(&mut self, closing: &str) -> bool {
        self.delimiters.pop() == Some(closing)
    }

    /// Parse a sequence of atoms up to `</q>` or the end of the input.
    ///
    /// `set_ns` asks the subquery to apply the default namespaces itself.
    /// The returned flag tells whether the result carries namespace
    /// restrictions.
    pub(crate) fn subquery_description(&mut self, set_ns: bool) -> (Option<Description>, bool) {
        let mark = self.errors.len();
        let mut conjunction: Option<Description> = None;
        let mut disjuncts: Vec<Option<Description>> = Vec::new();
        let mut has_namespaces = false;
        let mut must_set_ns = set_ns;

        let mut chunk = self.chunker.next_chunk();
        let mut at_end = chunk.is_empty();
        let mut more = !at_end;

        while more {
            let mut sub_ns = false;
            let token = Token::classify(&chunk);
            match token {
                Token::OpenLink => {
                    let (link, link_ns) = self.link_description(false);
                    sub_ns = link_ns;
                    conjunction = self.combine(conjunction, link, true);
                }
                Token::OpenSubquery => {
                    self.enter("</q>");
                    let (subquery, subquery_ns) = self.subquery_description(false);
                    sub_ns = subquery_ns;
                    conjunction = self.combine(conjunction, subquery, true);
                }
                Token::Or | Token::OrKeyword | Token::CloseSubquery | Token::Eof => {
                    if let Some(defaults) = self.default_namespaces.clone() {
                        if has_namespaces && !must_set_ns {
                            // earlier disjuncts had none, they get the defaults now
                            must_set_ns = true;
                            disjuncts = disjuncts
                                .into_iter()
                                .map(|d| self.combine(d, Some(defaults.clone()), true))
                                .collect();
                        } else if !has_namespaces && must_set_ns {
                            conjunction = self.combine(conjunction, Some(defaults), true);
                        }
                    }
                    disjuncts.push(conjunction.take());
                    has_namespaces = false;

                    if token == Token::CloseSubquery {
                        let expected = self.delimiters.last().map(|d| d.to_string());
                        if !self.leave("</q>") {
                            self.errors.push(Diagnostic::MismatchedDelimiter {
                                expected,
                                found: Some(chunk.clone()),
                            });
                            return (None, set_ns);
                        }
                        more = false;
                    } else if token == Token::Eof {
                        at_end = true;
                        more = false;
                    }
                }
                Token::Wildcard => {}
                _ => self.errors.push(Diagnostic::UnexpectedPart {
                    part: chunk.clone(),
                }),
            }

            if sub_ns {
                has_namespaces = true;
            }
            if more {
                chunk = self.chunker.next_chunk();
            }
        }

        if at_end && self.delimiters.last() == Some(&"</q>") {
            self.delimiters.pop();
            self.errors.push(Diagnostic::MismatchedDelimiter {
                expected: Some("</q>".to_string()),
                found: None,
            });
        }

        if disjuncts.is_empty() || disjuncts.iter().any(Option::is_none) {
            // surviving disjuncts are lost with the subquery, say so even
            // when the empty ones were already reported
            let loses_content = disjuncts.iter().any(Option::is_some);
            if loses_content || self.errors.len() == mark {
                self.errors.push(Diagnostic::EmptySubquery);
            }
            return (None, false);
        }

        let mut result = None;
        for disjunct in disjuncts {
            result = self.combine(result, disjunct, false);
        }
        (result, must_set_ns)
    }

    fn reject(&mut self, feature: QueryFeatures, fragment: &Description) {
        let fragment = fragment.to_string();
        debug!(feature = ?feature, fragment = %fragment, "query feature not permitted");
        self.errors
            .push(Diagnostic::FeatureNotPermitted { feature, fragment });
    }
}
