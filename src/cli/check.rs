//! Parse (and optionally prune) a query

use tracing::debug;

use super::CliError;
use crate::{PrintRequest, Query, QueryConfig, QueryParser};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query string
    pub query: String,
    /// Parser configuration
    pub config: QueryConfig,
    /// Overrides the configured default namespaces
    pub default_namespaces: Option<Vec<i32>>,
    /// Printout parameters such as `?Population`
    pub print_requests: Vec<String>,
    /// Apply size and depth limits after parsing
    pub prune: bool,
    /// Overrides the configured size limit
    pub max_size: Option<usize>,
    /// Overrides the configured depth limit
    pub max_depth: Option<usize>,
}

/// Execute a wikiq check operation
pub fn execute_check(options: &CheckOptions) -> Result<Query, CliError> {
    if options.query.trim().is_empty() {
        return Err(CliError::NoQuery);
    }

    let mut parser = QueryParser::new(options.config.clone())?;
    if let Some(namespaces) = &options.default_namespaces {
        parser.set_default_namespaces(Some(namespaces.as_slice()));
    }

    let mut query = parser.parse_query(&options.query);

    let category_labels = options.config.category_labels();
    for param in &options.print_requests {
        let request = PrintRequest::parse(param, &category_labels)
            .ok_or_else(|| CliError::InvalidPrintRequest(param.clone()))?;
        query.description.add_print_request(request);
    }

    if options.prune {
        let max_size = options.max_size.unwrap_or(options.config.max_size);
        let max_depth = options.max_depth.unwrap_or(options.config.max_depth);
        query.apply_limits(max_size, max_depth);
        debug!(pruned = query.pruned.len(), max_size, max_depth, "applied limits");
    }

    Ok(query)
}
