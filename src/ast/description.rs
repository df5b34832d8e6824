use crate::ast::{Comparator, DataItem, PrintRequest, Property, QueryFeatures, WikiPage};

/// A node of the query condition tree.
///
/// Every node carries its own list of print requests next to the condition
/// itself. Containers take over the print requests of the children they
/// absorb, so after construction only the outermost nodes hold any.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    kind: DescriptionKind,
    print_requests: Vec<PrintRequest>,
}

/// The condition a [`Description`] expresses.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptionKind {
    /// No restriction at all
    ///
    /// # Examples
    /// ```text
    /// [[Located in::+]]
    /// ```
    Thing,

    /// One value, or a range of values
    ///
    /// # Examples
    /// ```text
    /// [[Berlin]]
    /// [[Population::>>1000]]
    /// ```
    Value(ValueDescription),

    /// Membership in any of a list of categories
    ///
    /// # Examples
    /// ```text
    /// [[Category:City]]
    /// [[Category:City||Town]]
    /// ```
    Class(ClassDescription),

    /// All pages of one namespace
    ///
    /// # Examples
    /// ```text
    /// [[Help:+]]
    /// [[:+]]
    /// ```
    Namespace(NamespaceDescription),

    /// Reference to a saved query on a concept page
    ///
    /// # Example
    /// ```text
    /// [[Concept:Big cities]]
    /// ```
    Concept(ConceptDescription),

    /// Pages with some value of a property that matches a nested condition
    ///
    /// # Examples
    /// ```text
    /// [[Located in::Germany]]
    /// [[Located in.Part of::<q>[[Category:Country]]</q>]]
    /// ```
    SomeProperty(SomeProperty),

    /// All children must hold
    Conjunction(Conjunction),

    /// At least one child must hold
    Disjunction(Disjunction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueDescription {
    pub data_item: DataItem,
    /// Property the value belongs to, if it was given as a property value.
    pub property: Option<Property>,
    pub comparator: Comparator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescription {
    pages: Vec<WikiPage>,
    hierarchy: bool,
}

impl ClassDescription {
    /// # Panics
    ///
    /// Panics if `pages` is empty; a class condition needs at least one category.
    pub fn new(pages: Vec<WikiPage>) -> Self {
        assert!(
            !pages.is_empty(),
            "class description requires at least one category page"
        );
        ClassDescription {
            pages,
            hierarchy: false,
        }
    }

    /// Mark the condition as evaluated over the whole subcategory hierarchy,
    /// which makes its cost independent of the number of categories.
    pub fn expanding_hierarchy(mut self, hierarchy: bool) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn pages(&self) -> &[WikiPage] {
        &self.pages
    }

    pub fn expands_hierarchy(&self) -> bool {
        self.hierarchy
    }

    /// Add the categories of `other` to this one (no deduplication).
    pub fn merge(&mut self, other: ClassDescription) {
        self.hierarchy |= other.hierarchy;
        self.pages.extend(other.pages);
    }

    pub(crate) fn split_at(&self, at: usize) -> (ClassDescription, ClassDescription) {
        let (head, tail) = self.pages.split_at(at);
        (
            ClassDescription {
                pages: head.to_vec(),
                hierarchy: self.hierarchy,
            },
            ClassDescription {
                pages: tail.to_vec(),
                hierarchy: self.hierarchy,
            },
        )
    }
}

impl From<WikiPage> for ClassDescription {
    fn from(page: WikiPage) -> Self {
        ClassDescription::new(vec![page])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDescription {
    pub namespace: i32,
    /// Namespace name used when serializing; empty for the main namespace.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptDescription {
    pub concept: WikiPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SomeProperty {
    pub property: Property,
    pub description: Box<Description>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conjunction {
    children: Vec<Description>,
}

impl Conjunction {
    pub fn children(&self) -> &[Description] {
        &self.children
    }

    /// Sub-conjunctions are flattened and `Thing` children are dropped.
    fn insert(&mut self, mut child: Description, print_requests: &mut Vec<PrintRequest>) {
        print_requests.append(&mut child.print_requests);
        match child.kind {
            DescriptionKind::Thing => {}
            DescriptionKind::Conjunction(inner) => self.children.extend(inner.children),
            kind => self.children.push(Description::from(kind)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Disjunction {
    children: Vec<Description>,
    /// Position of the single class child all class disjuncts are merged into.
    class_index: Option<usize>,
    is_true: bool,
}

impl Disjunction {
    pub fn children(&self) -> &[Description] {
        &self.children
    }

    /// Whether a `Thing` was inserted, making the disjunction trivially true.
    pub fn is_true(&self) -> bool {
        self.is_true
    }

    fn insert(&mut self, mut child: Description, print_requests: &mut Vec<PrintRequest>) {
        print_requests.append(&mut child.print_requests);
        if self.is_true {
            return;
        }

        match child.kind {
            DescriptionKind::Thing => self.make_true(),
            DescriptionKind::Disjunction(inner) if inner.is_true => self.make_true(),
            DescriptionKind::Disjunction(inner) => {
                for grandchild in inner.children {
                    self.insert(grandchild, print_requests);
                }
            }
            DescriptionKind::Class(class) => {
                let existing = self.class_index.and_then(|i| self.children.get_mut(i));
                match existing {
                    Some(Description {
                        kind: DescriptionKind::Class(existing),
                        ..
                    }) => existing.merge(class),
                    _ => {
                        self.class_index = Some(self.children.len());
                        self.children.push(Description::from(class));
                    }
                }
            }
            kind => self.children.push(Description::from(kind)),
        }
    }

    fn make_true(&mut self) {
        self.is_true = true;
        self.children.clear();
        self.class_index = None;
    }
}

impl From<DescriptionKind> for Description {
    fn from(kind: DescriptionKind) -> Self {
        Description {
            kind,
            print_requests: Vec::new(),
        }
    }
}

impl From<ValueDescription> for Description {
    fn from(value: ValueDescription) -> Self {
        DescriptionKind::Value(value).into()
    }
}

impl From<ClassDescription> for Description {
    fn from(class: ClassDescription) -> Self {
        DescriptionKind::Class(class).into()
    }
}

impl From<NamespaceDescription> for Description {
    fn from(namespace: NamespaceDescription) -> Self {
        DescriptionKind::Namespace(namespace).into()
    }
}

impl From<ConceptDescription> for Description {
    fn from(concept: ConceptDescription) -> Self {
        DescriptionKind::Concept(concept).into()
    }
}

impl From<SomeProperty> for Description {
    fn from(some: SomeProperty) -> Self {
        DescriptionKind::SomeProperty(some).into()
    }
}

impl Description {
    pub fn thing() -> Self {
        DescriptionKind::Thing.into()
    }

    pub fn value(data_item: DataItem, property: Option<Property>, comparator: Comparator) -> Self {
        ValueDescription {
            data_item,
            property,
            comparator,
        }
        .into()
    }

    /// Class condition over the given categories, without hierarchy expansion.
    pub fn class(pages: Vec<WikiPage>) -> Self {
        ClassDescription::new(pages).into()
    }

    pub fn namespace(namespace: i32, label: impl Into<String>) -> Self {
        NamespaceDescription {
            namespace,
            label: label.into(),
        }
        .into()
    }

    pub fn concept(concept: WikiPage) -> Self {
        ConceptDescription { concept }.into()
    }

    pub fn some_property(property: Property, description: Description) -> Self {
        SomeProperty {
            property,
            description: Box::new(description),
        }
        .into()
    }

    pub fn conjunction(children: impl IntoIterator<Item = Description>) -> Self {
        let mut conjunction = Conjunction::default();
        let mut print_requests = Vec::new();
        for child in children {
            conjunction.insert(child, &mut print_requests);
        }
        Description {
            kind: DescriptionKind::Conjunction(conjunction),
            print_requests,
        }
    }

    pub fn disjunction(children: impl IntoIterator<Item = Description>) -> Self {
        let mut disjunction = Disjunction::default();
        let mut print_requests = Vec::new();
        for child in children {
            disjunction.insert(child, &mut print_requests);
        }
        Description {
            kind: DescriptionKind::Disjunction(disjunction),
            print_requests,
        }
    }

    pub fn kind(&self) -> &DescriptionKind {
        &self.kind
    }

    pub fn is_thing(&self) -> bool {
        matches!(self.kind, DescriptionKind::Thing)
    }

    pub fn is_conjunction(&self) -> bool {
        matches!(self.kind, DescriptionKind::Conjunction(_))
    }

    pub fn is_disjunction(&self) -> bool {
        matches!(self.kind, DescriptionKind::Disjunction(_))
    }

    /// Grow a container in place.
    ///
    /// Returns the child unchanged if this node is neither a conjunction nor
    /// a disjunction.
    pub fn insert(&mut self, child: Description) -> Result<(), Description> {
        match &mut self.kind {
            DescriptionKind::Conjunction(c) => c.insert(child, &mut self.print_requests),
            DescriptionKind::Disjunction(d) => d.insert(child, &mut self.print_requests),
            _ => return Err(child),
        }
        Ok(())
    }

    /// Number of direct children; 0 for non-containers.
    pub fn child_count(&self) -> usize {
        match &self.kind {
            DescriptionKind::Conjunction(c) => c.children.len(),
            DescriptionKind::Disjunction(d) => d.children.len(),
            _ => 0,
        }
    }

    /// Children of a container, or the node itself for anything else.
    pub(crate) fn into_children(self) -> Vec<Description> {
        match self.kind {
            DescriptionKind::Conjunction(c) => c.children,
            DescriptionKind::Disjunction(d) => d.children,
            kind => vec![Description {
                kind,
                print_requests: self.print_requests,
            }],
        }
    }

    /// Merge the categories of another class node into this one.
    ///
    /// Returns the other node unchanged if either side is not a class.
    pub(crate) fn merge_class(&mut self, other: Description) -> Result<(), Description> {
        let DescriptionKind::Class(class) = &mut self.kind else {
            return Err(other);
        };
        let Description {
            kind,
            mut print_requests,
        } = other;
        match kind {
            DescriptionKind::Class(other_class) => {
                class.merge(other_class);
                self.print_requests.append(&mut print_requests);
                Ok(())
            }
            kind => Err(Description {
                kind,
                print_requests,
            }),
        }
    }

    pub fn print_requests(&self) -> &[PrintRequest] {
        &self.print_requests
    }

    pub fn add_print_request(&mut self, request: PrintRequest) {
        self.print_requests.push(request);
    }

    /// Add a print request in front, so it is printed first.
    pub fn prepend_print_request(&mut self, request: PrintRequest) {
        self.print_requests.insert(0, request);
    }

    pub fn set_print_requests(&mut self, requests: Vec<PrintRequest>) {
        self.print_requests = requests;
    }

    pub(crate) fn with_print_requests(mut self, requests: &[PrintRequest]) -> Self {
        self.print_requests = requests.to_vec();
        self
    }

    /// Structural cost of evaluating the condition.
    pub fn size(&self) -> usize {
        match &self.kind {
            DescriptionKind::Thing => 0,
            DescriptionKind::Value(_)
            | DescriptionKind::Namespace(_)
            | DescriptionKind::Concept(_) => 1,
            DescriptionKind::Class(class) if class.hierarchy => 1,
            DescriptionKind::Class(class) => class.pages.len(),
            DescriptionKind::SomeProperty(some) => 1 + some.description.size(),
            DescriptionKind::Conjunction(c) => c.children.iter().map(Description::size).sum(),
            DescriptionKind::Disjunction(d) => d.children.iter().map(Description::size).sum(),
        }
    }

    /// Number of nested property conditions.
    pub fn depth(&self) -> usize {
        match &self.kind {
            DescriptionKind::SomeProperty(some) => 1 + some.description.depth(),
            DescriptionKind::Conjunction(c) => max_depth(&c.children),
            DescriptionKind::Disjunction(d) => max_depth(&d.children),
            _ => 0,
        }
    }

    /// Union of the features used anywhere in this subtree.
    pub fn query_features(&self) -> QueryFeatures {
        match &self.kind {
            DescriptionKind::Thing | DescriptionKind::Value(_) => QueryFeatures::empty(),
            DescriptionKind::Class(class) if class.pages.len() > 1 => {
                QueryFeatures::CATEGORY | QueryFeatures::DISJUNCTION
            }
            DescriptionKind::Class(_) => QueryFeatures::CATEGORY,
            DescriptionKind::Namespace(_) => QueryFeatures::NAMESPACE,
            DescriptionKind::Concept(_) => QueryFeatures::CONCEPT,
            DescriptionKind::SomeProperty(some) => {
                QueryFeatures::PROPERTY | some.description.query_features()
            }
            DescriptionKind::Conjunction(c) => c
                .children
                .iter()
                .fold(QueryFeatures::CONJUNCTION, |acc, d| acc | d.query_features()),
            DescriptionKind::Disjunction(d) => d
                .children
                .iter()
                .fold(QueryFeatures::DISJUNCTION, |acc, d| acc | d.query_features()),
        }
    }

    /// The feature a parser must permit before accepting this node.
    pub fn required_feature(&self) -> Option<QueryFeatures> {
        match &self.kind {
            DescriptionKind::SomeProperty(_) => Some(QueryFeatures::PROPERTY),
            DescriptionKind::Class(_) => Some(QueryFeatures::CATEGORY),
            DescriptionKind::Concept(_) => Some(QueryFeatures::CONCEPT),
            DescriptionKind::Conjunction(_) => Some(QueryFeatures::CONJUNCTION),
            DescriptionKind::Disjunction(_) => Some(QueryFeatures::DISJUNCTION),
            _ => None,
        }
    }

    /// Whether the condition can match at most one entity, whatever the data.
    pub fn is_singleton(&self) -> bool {
        match &self.kind {
            DescriptionKind::Value(value) => value.comparator == Comparator::Equal,
            DescriptionKind::Conjunction(c) => c.children.iter().any(Description::is_singleton),
            // Several disjuncts naming the same entity are not detected.
            DescriptionKind::Disjunction(d) => {
                d.children.len() == 1 && d.children[0].is_singleton()
            }
            _ => false,
        }
    }
}

fn max_depth(children: &[Description]) -> usize {
    children.iter().map(Description::depth).max().unwrap_or(0)
}
