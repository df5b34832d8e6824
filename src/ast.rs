//! # Inline Query Language - Description Tree
//!
//! This module defines the tree a query string is parsed into. Queries are
//! written inside wiki pages as a row of bracketed atoms, and every atom turns
//! into a node of a [`Description`]: a condition that a page has to satisfy
//! to be part of the result.
//!
//! ## Architecture Overview
//!
//! The module is organized into focused submodules:
//!
//! - **[tokens]** - Classification of the chunks the chunker hands out
//! - **[description]** - The condition tree and its construction rules
//! - **[datavalue]** - Pages, properties, literal values, namespaces
//! - **[operators]** - Comparators of value conditions
//! - **[features]** - Feature flags gating parts of the grammar
//! - **[printrequest]** - Output columns attached to a tree
//! - **[query]** - A parsed query with its diagnostics
//!
//! ## Quick Start
//!
//! ```text
//! [[Category:City]] [[Located in::Germany]] [[Population::>>100000]]
//! ```
//!
//! Cities located in Germany with more than 100000 inhabitants.
//!
//! ## Core Concepts
//!
//! ### Atoms
//!
//! Every condition is written as an atom in double brackets:
//!
//! ```text
//! [[Category:City]]           class membership
//! [[Concept:Big cities]]      saved query
//! [[Located in::Germany]]     property value
//! [[Berlin]]                  one specific page
//! [[Help:+]]                  every page of a namespace
//! ```
//!
//! ### Combining Conditions
//!
//! - **Adjacency** - atoms next to each other must all hold
//! - **`||` and `OR`** - at least one side must hold
//! - **`<q>…</q>`** - groups conditions, also as property values
//!
//! ### Size and Depth
//!
//! Every tree has a structural [`size`](Description::size) (the number of
//! elementary conditions) and [`depth`](Description::depth) (the nesting of
//! property conditions). Both are cost estimates used to bound the work a
//! query may cause; see [`crate::prune`].
//!
//! ## Examples
//!
//! ### Disjunction Inside an Atom
//!
//! ```text
//! [[Category:City||Town]]
//! ```
//!
//! ### Property Chains
//!
//! ```text
//! [[Located in.Part of::Europe]]
//! ```
//!
//! ### Nested Subquery
//!
//! ```text
//! [[Located in::<q>[[Category:Country]] [[Member of::EU]]</q>]]
//! ```
//!
//! ### Comparators
//!
//! ```text
//! [[Population::≥5000]]  [[Name::~*burg]]  [[Status::!closed]]
//! ```
pub mod tokens;
pub mod datavalue;
pub mod description;
pub mod features;
pub mod operators;
pub mod printrequest;
pub mod query;

pub use tokens::Token;
pub use datavalue::{
    DataItem, NS_CATEGORY, NS_CONCEPT, NS_MAIN, NS_PROPERTY, Property, ValueType, WikiPage,
    normalize_title,
};
pub use description::{
    ClassDescription, ConceptDescription, Conjunction, Description, DescriptionKind, Disjunction,
    NamespaceDescription, SomeProperty, ValueDescription,
};
pub use features::QueryFeatures;
pub use operators::Comparator;
pub use printrequest::{PrintMode, PrintRequest};
pub use query::Query;
