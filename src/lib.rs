pub mod ast;
pub mod chunker;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod output;
pub mod parser;
pub mod prune;
mod resolver;

pub use ast::{
    Comparator, DataItem, Description, DescriptionKind, PrintMode, PrintRequest, Property, Query,
    QueryFeatures, Token, ValueType, WikiPage,
};
pub use chunker::{Chunker, StopSet};
pub use config::{ConfigError, QueryConfig};
pub use diagnostics::Diagnostic;
pub use output::to_json;
pub use parser::QueryParser;
pub use prune::Budget;
