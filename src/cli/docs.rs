//! Documentation content for wikiq CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Atoms,
    Properties,
    Subqueries,
    Comparators,
    Features,
    Limits,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "atoms" | "atom" => Some(Self::Atoms),
            "properties" | "property" | "chains" => Some(Self::Properties),
            "subqueries" | "subquery" | "q" => Some(Self::Subqueries),
            "comparators" | "comparator" | "cmp" => Some(Self::Comparators),
            "features" | "feature" => Some(Self::Features),
            "limits" | "pruning" | "prune" => Some(Self::Limits),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"WIKIQ DOCUMENTATION

wikiq parses inline wiki queries: rows of [[...]] atoms that describe which
pages a query selects. Atoms next to each other must all hold, atoms joined
by || or OR are alternatives.

DOCUMENTATION CATEGORIES

  syntax            Overall structure: atoms, conjunction, disjunction
  atoms             Category, concept, page and namespace atoms
  properties        Property conditions, value lists and property chains
  subqueries        <q>...</q> groups and nested conditions
  comparators       Comparison prefixes for values
  features          Query features and how they are switched off
  limits            Size, depth and pruning

QUICK REFERENCE

  [[Category:City]]              Pages in a category
  [[Concept:Big cities]]         Pages selected by a saved query
  [[Located in::Germany]]        Property value
  [[Population::>>1000]]         Comparison
  [[Help:+]]                     Every page of a namespace
  [[A]] OR [[B]]                 Alternatives
  <q>...</q>                     Grouping

Run 'wikiq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Atoms) => Ok(ATOMS_DOC),
        Some(DocCategory::Properties) => Ok(PROPERTIES_DOC),
        Some(DocCategory::Subqueries) => Ok(SUBQUERIES_DOC),
        Some(DocCategory::Comparators) => Ok(COMPARATORS_DOC),
        Some(DocCategory::Features) => Ok(FEATURES_DOC),
        Some(DocCategory::Limits) => Ok(LIMITS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

A query is a sequence of atoms. Each atom is written in double brackets and
states one condition.

CONJUNCTION

  [[Category:City]] [[Located in::Germany]]

  Atoms next to each other must all hold.

DISJUNCTION

  [[Category:City]] OR [[Category:Town]]
  [[Category:City]] || [[Category:Town]]
  [[Category:City||Town]]

  Alternatives, between atoms or inside one atom. OR binds weaker than
  adjacency: [[A]] [[B]] OR [[C]] means (A and B) or C.

WILDCARD

  +                 On its own between atoms it is ignored. As a property
                    value it means "any value".

LEGACY LABELS

  [[Category:City|label]]

  Text after a single | inside an atom used to set a label. It is skipped
  with a warning.
"#;

const ATOMS_DOC: &str = r#"ATOMS

CATEGORIES

  [[Category:City]]
  [[Category:City||Town||Village]]

  Pages in any of the listed categories. The localized namespace name works
  as well as the canonical "Category".

CONCEPTS

  [[Concept:Big cities]]

  Pages selected by the query stored on a concept page. Only one concept per
  atom.

PAGES

  [[Berlin]]
  [[Berlin||Paris]]
  [[Help:Contents]]
  [[:Category:City]]

  Exactly the named pages. A leading colon refers to a page in the category
  namespace instead of its members.

NAMESPACES

  [[Help:+]]
  [[:+]]              (main namespace)
  [[:Category:+]]

  Every page of a namespace.
"#;

const PROPERTIES_DOC: &str = r#"PROPERTIES

  [[Located in::Germany]]
  [[Located in:=Germany]]

  Pages whose property has the given value.

VALUE LISTS

  [[Located in::Germany||France]]

  Any of the values.

WILDCARD

  [[Located in::+]]

  Any value at all. For properties holding pages, the value is restricted to
  the default namespaces.

INVERSE PROPERTIES

  [[-Located in::Germany]]

  Pages that are the value of "Located in" on page Germany.

PROPERTY CHAINS

  [[Located in.Part of::Europe]]

  Shorthand for [[Located in::<q>[[Part of::Europe]]</q>]]. Every property
  except the last must hold pages. Start the name with a space to use a
  property whose name contains a dot: [[ Version 1.0::yes]].

VALUE TYPES

  Properties hold pages unless configured otherwise ("property_types" in the
  configuration file: "number" or "text"). Number values must be decimal
  numbers.
"#;

const SUBQUERIES_DOC: &str = r#"SUBQUERIES

GROUPING

  <q>[[Category:City]] OR [[Category:Town]]</q> [[Located in::Germany]]

  Groups conditions like parentheses.

NESTED CONDITIONS

  [[Located in::<q>[[Category:Country]] [[Member of::EU]]</q>]]

  The values of a page property must satisfy a whole query. Subqueries are
  not possible for properties that do not hold pages.

ERRORS

  A </q> without matching <q>, or a query that ends inside <q>, is reported.
  An empty subquery is dropped.
"#;

const COMPARATORS_DOC: &str = r#"COMPARATORS

  Prefix      Meaning
  (none)      equal
  !           not equal
  <<  >>      strictly less / greater
  ≤   ≥       less or equal / greater or equal
  <   >       less or equal / greater or equal, or strict with
              "strict_comparators": true
  ~           matches pattern (* and ? wildcards)
  !~          does not match pattern

EXAMPLES

  [[Population::>>100000]]
  [[Name::~*burg]]
  [[Status::!closed]]

The "comparators" configuration field lists the prefixes that are recognised;
others are taken as part of the value.
"#;

const FEATURES_DOC: &str = r#"FEATURES

Parts of the language can be switched off with the "features" configuration
field, a |-separated list of:

  PROPERTY      property conditions
  CATEGORY      category atoms
  CONCEPT       concept atoms
  NAMESPACE     namespace atoms
  CONJUNCTION   several atoms combined
  DISJUNCTION   OR, || and category lists

A construct that is not permitted is dropped from the query with a warning.

EXAMPLE

  { "features": "PROPERTY | CATEGORY | CONJUNCTION" }
"#;

const LIMITS_DOC: &str = r#"LIMITS

SIZE

  The number of elementary conditions. Every category, concept, page, value
  and namespace counts 1, a property condition counts 1 plus its value.
  With subcategory expansion enabled ("subcategory_depth" > 0) a category
  list counts 1 in total.

DEPTH

  The nesting of property conditions: [[A.B::x]] has depth 2.

PRUNING

  wikiq check --prune --max-size 8 --max-depth 2 "<query>"

  Conditions that exceed the limits are removed and listed as "pruned".
  Defaults come from "max_size" (12) and "max_depth" (4).
"#;
