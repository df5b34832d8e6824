use rust_decimal::Decimal;
use wikiq_lang::ast::ClassDescription;
use wikiq_lang::{
    Comparator, DataItem, Description, DescriptionKind, PrintMode, PrintRequest, Property,
    QueryFeatures, WikiPage,
};

fn page(title: &str) -> Description {
    Description::value(DataItem::Page(WikiPage::main(title)), None, Comparator::Equal)
}

fn number(comparator: Comparator, n: i64) -> Description {
    Description::value(
        DataItem::Number(Decimal::from(n)),
        Some(Property::new("Population")),
        comparator,
    )
}

fn category(titles: &[&str]) -> Description {
    Description::class(titles.iter().map(|t| WikiPage::category(*t)).collect())
}

fn located_in(value: Description) -> Description {
    Description::some_property(Property::new("Located in"), value)
}

fn children(description: &Description) -> Vec<Description> {
    match description.kind() {
        DescriptionKind::Conjunction(c) => c.children().to_vec(),
        DescriptionKind::Disjunction(d) => d.children().to_vec(),
        other => panic!("expected a container, got {:?}", other),
    }
}

fn category_titles(description: &Description) -> Vec<String> {
    match description.kind() {
        DescriptionKind::Class(class) => class.pages().iter().map(|p| p.title.clone()).collect(),
        other => panic!("expected a class, got {:?}", other),
    }
}

// ============================================================================
// Size and depth
// ============================================================================

#[test]
fn test_leaf_sizes() {
    assert_eq!(Description::thing().size(), 0);
    assert_eq!(page("Berlin").size(), 1);
    assert_eq!(Description::namespace(12, "Help").size(), 1);
    assert_eq!(Description::concept(WikiPage::concept("Big cities")).size(), 1);
    assert_eq!(category(&["A", "B", "C"]).size(), 3);
}

#[test]
fn test_class_size_with_hierarchy_expansion() {
    let pages = vec![WikiPage::category("A"), WikiPage::category("B")];
    let class: Description = ClassDescription::new(pages).expanding_hierarchy(true).into();
    assert_eq!(class.size(), 1);
}

#[test]
fn test_some_property_size_and_depth() {
    let chain = located_in(Description::some_property(Property::new("Part of"), page("Europe")));
    assert_eq!(chain.size(), 3);
    assert_eq!(chain.depth(), 2);
}

#[test]
fn test_container_size_sums_and_depth_maxes() {
    let conj = Description::conjunction([
        category(&["City", "Town"]),
        located_in(page("Germany")),
        located_in(located_in(page("Europe"))),
    ]);
    assert_eq!(conj.size(), 2 + 2 + 3);
    assert_eq!(conj.depth(), 2);
}

#[test]
fn test_leaf_depth_is_zero() {
    assert_eq!(page("A").depth(), 0);
    assert_eq!(category(&["A"]).depth(), 0);
    assert_eq!(Description::thing().depth(), 0);
}

// ============================================================================
// Conjunction
// ============================================================================

#[test]
fn test_conjunction_flattens_right_grouping() {
    let conj = Description::conjunction([
        page("A"),
        Description::conjunction([page("B"), page("C")]),
    ]);
    assert_eq!(children(&conj), vec![page("A"), page("B"), page("C")]);
}

#[test]
fn test_conjunction_flattens_left_grouping() {
    let conj = Description::conjunction([
        Description::conjunction([page("A"), page("B")]),
        page("C"),
    ]);
    assert_eq!(children(&conj), vec![page("A"), page("B"), page("C")]);
}

#[test]
fn test_conjunction_insert_in_place() {
    let mut conj = Description::conjunction([page("A")]);
    conj.insert(Description::conjunction([page("B"), page("C")])).unwrap();
    assert_eq!(children(&conj), vec![page("A"), page("B"), page("C")]);
}

#[test]
fn test_conjunction_drops_thing() {
    let conj = Description::conjunction([page("A"), Description::thing(), page("B")]);
    assert_eq!(children(&conj), vec![page("A"), page("B")]);
}

#[test]
fn test_insert_into_leaf_is_rejected() {
    let mut leaf = page("A");
    let rejected = leaf.insert(page("B")).unwrap_err();
    assert_eq!(rejected, page("B"));
    assert_eq!(leaf, page("A"));
}

// ============================================================================
// Disjunction
// ============================================================================

#[test]
fn test_disjunction_merges_classes() {
    let disj = Description::disjunction([category(&["City"]), page("X"), category(&["Town"])]);
    let kids = children(&disj);
    assert_eq!(kids.len(), 2);
    assert_eq!(category_titles(&kids[0]), vec!["City", "Town"]);
    assert_eq!(kids[1], page("X"));
}

#[test]
fn test_disjunction_flattens() {
    let disj = Description::disjunction([
        page("A"),
        Description::disjunction([page("B"), page("C")]),
    ]);
    assert_eq!(children(&disj), vec![page("A"), page("B"), page("C")]);
}

#[test]
fn test_disjunction_with_thing_is_true() {
    let disj = Description::disjunction([page("A"), Description::thing(), page("B")]);
    match disj.kind() {
        DescriptionKind::Disjunction(d) => {
            assert!(d.is_true());
            assert!(d.children().is_empty());
        }
        other => panic!("expected a disjunction, got {:?}", other),
    }
    assert_eq!(disj.size(), 0);
    assert_eq!(disj.to_string(), "+");
    assert_eq!(disj.query_string(true), "+");
}

#[test]
fn test_true_disjunction_absorbs_true_child() {
    let inner = Description::disjunction([Description::thing()]);
    let disj = Description::disjunction([page("A"), inner]);
    assert!(children(&disj).is_empty());
}

// ============================================================================
// Print requests
// ============================================================================

#[test]
fn test_print_requests_move_to_container() {
    let request = PrintRequest::new(PrintMode::Property(Property::new("Population")), "Population");
    let mut a = page("A");
    a.add_print_request(request.clone());

    let conj = Description::conjunction([a, page("B")]);
    assert_eq!(conj.print_requests(), &[request]);
    assert!(children(&conj).iter().all(|c| c.print_requests().is_empty()));
}

#[test]
fn test_print_requests_survive_absorbed_thing() {
    let request = PrintRequest::new(PrintMode::ThisPage, "");
    let mut thing = Description::thing();
    thing.add_print_request(request.clone());

    let disj = Description::disjunction([page("A"), thing]);
    assert_eq!(disj.print_requests(), &[request]);
}

#[test]
fn test_prepend_print_request() {
    let first = PrintRequest::new(PrintMode::ThisPage, "");
    let second = PrintRequest::new(PrintMode::Categories, "Category");
    let mut d = page("A");
    d.add_print_request(second.clone());
    d.prepend_print_request(first.clone());
    assert_eq!(d.print_requests(), &[first, second]);
}

// ============================================================================
// Singletons
// ============================================================================

#[test]
fn test_value_singleton_iff_equality() {
    assert!(page("A").is_singleton());
    assert!(number(Comparator::Equal, 5).is_singleton());
    assert!(!number(Comparator::Less, 5).is_singleton());
    assert!(!number(Comparator::NotEqual, 5).is_singleton());
}

#[test]
fn test_disjunction_singleton() {
    assert!(Description::disjunction([page("A")]).is_singleton());
    assert!(!Description::disjunction([page("A"), page("B")]).is_singleton());
    assert!(!Description::disjunction([number(Comparator::Greater, 1)]).is_singleton());
}

#[test]
fn test_never_singleton() {
    assert!(!Description::thing().is_singleton());
    assert!(!category(&["A"]).is_singleton());
    assert!(!Description::namespace(0, "").is_singleton());
    assert!(!Description::concept(WikiPage::concept("C")).is_singleton());
    assert!(!located_in(page("Germany")).is_singleton());
}

#[test]
fn test_conjunction_with_singleton_child() {
    assert!(Description::conjunction([category(&["City"]), page("Berlin")]).is_singleton());
    assert!(!Description::conjunction([category(&["City"]), located_in(page("X"))]).is_singleton());
}

// ============================================================================
// Query features
// ============================================================================

#[test]
fn test_features_union() {
    let conj = Description::conjunction([located_in(page("Germany")), category(&["City"])]);
    assert_eq!(
        conj.query_features(),
        QueryFeatures::CONJUNCTION | QueryFeatures::PROPERTY | QueryFeatures::CATEGORY
    );
}

#[test]
fn test_leaf_features() {
    assert_eq!(page("A").query_features(), QueryFeatures::empty());
    assert_eq!(Description::thing().query_features(), QueryFeatures::empty());
    assert_eq!(Description::namespace(12, "Help").query_features(), QueryFeatures::NAMESPACE);
    assert_eq!(
        Description::concept(WikiPage::concept("C")).query_features(),
        QueryFeatures::CONCEPT
    );
    assert_eq!(category(&["A"]).query_features(), QueryFeatures::CATEGORY);
    assert_eq!(
        category(&["A", "B"]).query_features(),
        QueryFeatures::CATEGORY | QueryFeatures::DISJUNCTION
    );
}

#[test]
fn test_nested_features() {
    let nested = located_in(Description::disjunction([
        Description::concept(WikiPage::concept("C")),
        Description::namespace(12, "Help"),
    ]));
    assert_eq!(
        nested.query_features(),
        QueryFeatures::PROPERTY
            | QueryFeatures::DISJUNCTION
            | QueryFeatures::CONCEPT
            | QueryFeatures::NAMESPACE
    );
}

#[test]
fn test_required_features() {
    assert_eq!(page("A").required_feature(), None);
    assert_eq!(Description::namespace(0, "").required_feature(), None);
    assert_eq!(category(&["A"]).required_feature(), Some(QueryFeatures::CATEGORY));
    assert_eq!(
        located_in(page("A")).required_feature(),
        Some(QueryFeatures::PROPERTY)
    );
    assert_eq!(
        Description::conjunction([page("A"), page("B")]).required_feature(),
        Some(QueryFeatures::CONJUNCTION)
    );
}

#[test]
fn test_feature_names() {
    assert_eq!(QueryFeatures::CATEGORY.name(), Some("CATEGORY"));
    assert_eq!((QueryFeatures::CATEGORY | QueryFeatures::PROPERTY).name(), None);
}

#[test]
#[should_panic(expected = "at least one category")]
fn test_class_without_pages_panics() {
    ClassDescription::new(Vec::new());
}
