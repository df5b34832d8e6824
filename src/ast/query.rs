use crate::ast::{Description, QueryFeatures};
use crate::diagnostics::Diagnostic;
use crate::prune::Budget;

/// A parsed query.
///
/// Holds the description tree together with everything that went wrong
/// while producing it.
#[derive(Debug, Clone)]
pub struct Query {
    /// Condition tree
    pub description: Description,

    /// Problems found while parsing, in the order they were found
    pub diagnostics: Vec<Diagnostic>,

    /// Fragments removed by [`Query::apply_limits`], in query syntax
    pub pruned: Vec<String>,
}

impl Query {
    pub fn new(description: Description, diagnostics: Vec<Diagnostic>) -> Self {
        Query {
            description,
            diagnostics,
            pruned: Vec::new(),
        }
    }

    /// Prune the description to the given limits, remembering what was
    /// dropped.
    pub fn apply_limits(&mut self, max_size: usize, max_depth: usize) {
        let (description, _) = self
            .description
            .prune(Budget::new(max_size, max_depth), &mut self.pruned);
        self.description = description;
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn size(&self) -> usize {
        self.description.size()
    }

    pub fn depth(&self) -> usize {
        self.description.depth()
    }

    pub fn features(&self) -> QueryFeatures {
        self.description.query_features()
    }
}
