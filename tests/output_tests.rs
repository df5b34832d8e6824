use rust_decimal::Decimal;
use serde_json::json;
use wikiq_lang::{
    Comparator, DataItem, Description, PrintMode, PrintRequest, Property, QueryConfig,
    QueryParser, WikiPage, to_json,
};

fn page(title: &str) -> Description {
    Description::value(DataItem::Page(WikiPage::main(title)), None, Comparator::Equal)
}

fn value_of(property: &str, title: &str) -> Description {
    Description::value(
        DataItem::Page(WikiPage::main(title)),
        Some(Property::new(property)),
        Comparator::Equal,
    )
}

fn has(property: &str, value: Description) -> Description {
    Description::some_property(Property::new(property), value)
}

// ============================================================================
// Query syntax
// ============================================================================

#[test]
fn test_thing() {
    assert_eq!(Description::thing().to_string(), "");
    assert_eq!(Description::thing().query_string(true), "+");
}

#[test]
fn test_page_value() {
    assert_eq!(page("Berlin").to_string(), "[[:Berlin]]");
    assert_eq!(page("Berlin").query_string(true), "Berlin");
}

#[test]
fn test_category_page_value_keeps_colon() {
    let d = Description::value(
        DataItem::Page(WikiPage::category("City")),
        None,
        Comparator::Equal,
    );
    assert_eq!(d.to_string(), "[[:Category:City]]");
}

#[test]
fn test_comparator_values() {
    let less = Description::value(DataItem::Number(Decimal::from(5)), None, Comparator::Less);
    assert_eq!(less.to_string(), "[[<<5]]");

    let at_least = Description::value(
        DataItem::Number(Decimal::new(50, 1)),
        Some(Property::new("Rating")),
        Comparator::GreaterEqual,
    );
    assert_eq!(has("Rating", at_least).to_string(), "[[Rating::≥5]]");

    let unlike = Description::value(
        DataItem::Text("*burg".to_string()),
        Some(Property::new("Name")),
        Comparator::NotLike,
    );
    assert_eq!(has("Name", unlike).to_string(), "[[Name::!~*burg]]");
}

#[test]
fn test_class() {
    let class = Description::class(vec![
        WikiPage::category("City"),
        WikiPage::category("Town"),
        WikiPage::category("Village"),
    ]);
    assert_eq!(class.to_string(), "[[Category:City||Town||Village]]");
    assert_eq!(class.query_string(true), " <q>[[Category:City||Town||Village]]</q> ");
}

#[test]
fn test_namespaces() {
    assert_eq!(Description::namespace(12, "Help").to_string(), "[[Help:+]]");
    assert_eq!(Description::namespace(0, "").to_string(), "[[:+]]");
    assert_eq!(
        Description::namespace(14, "Category").to_string(),
        "[[:Category:+]]"
    );
}

#[test]
fn test_concept() {
    let concept = Description::concept(WikiPage::concept("Big cities"));
    assert_eq!(concept.to_string(), "[[Concept:Big cities]]");
}

#[test]
fn test_some_property() {
    assert_eq!(
        has("Located in", value_of("Located in", "Germany")).to_string(),
        "[[Located in::Germany]]"
    );
    assert_eq!(has("Located in", Description::thing()).to_string(), "[[Located in::+]]");
}

#[test]
fn test_inverse_property() {
    let d =
        Description::some_property(Property::inverse("Has part"), value_of("Has part", "Wheel"));
    assert_eq!(d.to_string(), "[[-Has part::Wheel]]");
}

#[test]
fn test_property_chain() {
    let d = has("Located in", has("Part of", value_of("Part of", "Europe")));
    assert_eq!(d.to_string(), "[[Located in.Part of::Europe]]");
}

#[test]
fn test_dotted_property_is_escaped() {
    let d = has("Version 1.0", value_of("Version 1.0", "Yes"));
    assert_eq!(d.to_string(), "[[ Version 1.0::Yes]]");
}

#[test]
fn test_chain_stops_at_dotted_property() {
    let d = has("A", has("B.C", value_of("B.C", "X")));
    assert_eq!(d.to_string(), "[[A::<q>[[ B.C::X]]</q>]]");
}

#[test]
fn test_subquery_value() {
    let d = has("Located in", Description::class(vec![WikiPage::category("Country")]));
    assert_eq!(d.to_string(), "[[Located in:: <q>[[Category:Country]]</q> ]]");
}

#[test]
fn test_value_list() {
    let values = Description::disjunction([
        value_of("Located in", "Germany"),
        value_of("Located in", "France"),
    ]);
    assert_eq!(has("Located in", values).to_string(), "[[Located in::Germany||France]]");
}

#[test]
fn test_conjunction() {
    let d = Description::conjunction([
        Description::class(vec![WikiPage::category("City")]),
        has("Located in", value_of("Located in", "Germany")),
    ]);
    assert_eq!(d.to_string(), "[[Category:City]] [[Located in::Germany]]");
    assert_eq!(
        d.query_string(true),
        " <q>[[Category:City]] [[Located in::Germany]]</q> "
    );
}

#[test]
fn test_disjunction() {
    let d = Description::disjunction([page("A"), page("B")]);
    assert_eq!(d.to_string(), " <q>[[:A]] OR [[:B]]</q> ");
    assert_eq!(d.query_string(true), "A||B");
}

#[test]
fn test_disjunction_wraps_property_conditions() {
    let d = Description::disjunction([page("A"), has("P", value_of("P", "X"))]);
    assert_eq!(d.to_string(), " <q>[[:A]] OR  <q>[[P::X]]</q> </q> ");
}

#[test]
fn test_serialization_parses_back() {
    let mut config = QueryConfig::default();
    config
        .property_types
        .insert("Population".to_string(), wikiq_lang::ValueType::Number);
    let mut parser = QueryParser::new(config).unwrap();

    let first = parser.parse(
        "[[Category:City]] [[Located in.Part of::Europe||Asia]] [[Population::>>1000]]",
    );
    assert!(parser.errors().is_empty());

    let serialized = first.to_string();
    assert_eq!(
        serialized,
        "[[Category:City]] [[Located in.Part of::Europe||Asia]] [[Population::>>1000]]"
    );
    let second = parser.parse(&serialized);
    assert!(parser.errors().is_empty());
    assert_eq!(first, second);
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_leaf() {
    let class = Description::class(vec![WikiPage::category("City"), WikiPage::category("Town")]);
    assert_eq!(
        to_json(&class),
        json!({ "type": "class", "categories": ["City", "Town"], "size": 2, "depth": 0 })
    );
}

#[test]
fn test_json_nested() {
    let d = has("Located in", value_of("Located in", "Germany"));
    let value = to_json(&d);
    assert_eq!(value["type"], "some_property");
    assert_eq!(value["property"], "Located in");
    assert_eq!(value["size"], 2);
    assert_eq!(value["depth"], 1);
    assert_eq!(value["description"]["type"], "value");
    assert_eq!(value["description"]["value"], "Germany");
    assert_eq!(value["description"]["value_type"], "page");
    assert_eq!(value["description"]["comparator"], "equal");
}

#[test]
fn test_json_true_disjunction() {
    let d = Description::disjunction([page("A"), Description::thing()]);
    let value = to_json(&d);
    assert_eq!(value["type"], "disjunction");
    assert_eq!(value["true"], true);
    assert_eq!(value["children"], json!([]));
}

#[test]
fn test_json_print_requests() {
    let mut d = page("A");
    d.add_print_request(PrintRequest::new(
        PrintMode::Property(Property::new("Population")),
        "Inhabitants",
    ));
    let value = to_json(&d);
    assert_eq!(
        value["print_requests"],
        json!([{ "label": "Inhabitants", "target": "Population" }])
    );
    assert!(to_json(&page("B")).get("print_requests").is_none());
}
