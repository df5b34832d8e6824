#[cfg(test)]
mod tests {
    use serde_json::json;
    use wikiq_lang::cli::{
        CheckOptions, CliError, DocCategory, execute_check, get_doc_category, get_docs_overview,
        query_report, render_text,
    };
    use wikiq_lang::{PrintMode, QueryConfig};

    fn check(query: &str) -> CheckOptions {
        CheckOptions {
            query: query.to_string(),
            ..CheckOptions::default()
        }
    }

    // ========================================================================
    // check
    // ========================================================================

    #[test]
    fn test_check_simple_query() {
        let query = execute_check(&check("[[Category:City]] [[Located in::Germany]]")).unwrap();
        assert!(!query.has_diagnostics());
        assert_eq!(query.size(), 3);
        assert_eq!(query.depth(), 1);
        assert!(query.pruned.is_empty());
    }

    #[test]
    fn test_check_empty_query() {
        let result = execute_check(&check("   "));
        assert!(matches!(result, Err(CliError::NoQuery)));
    }

    #[test]
    fn test_check_reports_diagnostics() {
        let query = execute_check(&check("[[Category:City|label]]")).unwrap();
        assert_eq!(query.diagnostics.len(), 1);
        assert_eq!(query.diagnostics[0].message_key(), "smw_unexpectedpart");
    }

    #[test]
    fn test_check_default_namespaces_override() {
        let options = CheckOptions {
            default_namespaces: Some(vec![12]),
            ..check("[[Category:City]]")
        };
        let query = execute_check(&options).unwrap();
        assert_eq!(query.description.to_string(), "[[Help:+]] [[Category:City]]");
    }

    #[test]
    fn test_check_print_requests() {
        let options = CheckOptions {
            print_requests: vec![
                "?".to_string(),
                "?Population = Inhabitants".to_string(),
                "?Category".to_string(),
                "?Category:Capital".to_string(),
            ],
            ..check("[[Category:City]]")
        };
        let query = execute_check(&options).unwrap();
        let requests = query.description.print_requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].mode, PrintMode::ThisPage);
        assert_eq!(requests[1].label, "Inhabitants");
        assert!(matches!(&requests[1].mode, PrintMode::Property(p) if p.label == "Population"));
        assert_eq!(requests[2].mode, PrintMode::Categories);
        assert!(matches!(&requests[3].mode, PrintMode::Category(page) if page.title == "Capital"));
        assert_eq!(requests[3].label, "Capital");
    }

    #[test]
    fn test_check_invalid_print_request() {
        let options = CheckOptions {
            print_requests: vec!["Population".to_string()],
            ..check("[[Category:City]]")
        };
        match execute_check(&options) {
            Err(CliError::InvalidPrintRequest(param)) => assert_eq!(param, "Population"),
            other => panic!("expected an invalid print request, got {:?}", other),
        }
    }

    #[test]
    fn test_check_prune_with_limits() {
        let options = CheckOptions {
            prune: true,
            max_size: Some(2),
            ..check("[[Category:A]] [[Category:B]] [[Category:C]]")
        };
        let query = execute_check(&options).unwrap();
        assert_eq!(query.description.to_string(), "[[Category:A]] [[Category:B]]");
        assert_eq!(query.pruned, vec!["[[Category:C]]"]);
    }

    #[test]
    fn test_check_prune_uses_config_limits() {
        let options = CheckOptions {
            prune: true,
            config: QueryConfig {
                max_depth: 1,
                ..QueryConfig::default()
            },
            ..check("[[Located in.Part of::Europe]]")
        };
        let query = execute_check(&options).unwrap();
        assert_eq!(query.description.to_string(), "[[Located in::+]]");
        assert_eq!(query.pruned, vec!["[[Part of::Europe]]"]);
    }

    #[test]
    fn test_check_prune_keeps_print_requests() {
        let options = CheckOptions {
            prune: true,
            max_size: Some(1),
            print_requests: vec!["?Population".to_string()],
            ..check("[[Category:A]] [[Category:B]]")
        };
        let query = execute_check(&options).unwrap();
        assert_eq!(query.description.to_string(), "[[Category:A]]");
        assert_eq!(query.description.print_requests().len(), 1);
    }

    #[test]
    fn test_check_invalid_config() {
        let options = CheckOptions {
            config: QueryConfig {
                concept_label: String::new(),
                ..QueryConfig::default()
            },
            ..check("[[Category:City]]")
        };
        assert!(matches!(execute_check(&options), Err(CliError::Config(_))));
    }

    // ========================================================================
    // reports
    // ========================================================================

    #[test]
    fn test_json_report() {
        let query = execute_check(&check("[[Category:City]] [[Located in::]]")).unwrap();
        let report = query_report(&query);
        assert_eq!(report["query"], "[[Category:City]] [[Located in::+]]");
        assert_eq!(report["size"], 2);
        assert_eq!(report["depth"], 1);
        assert_eq!(report["features"], json!(["PROPERTY", "CATEGORY", "CONJUNCTION"]));
        assert_eq!(report["description"]["type"], "conjunction");
        assert_eq!(
            report["diagnostics"],
            json!([{
                "key": "smw_propvalueproblem",
                "params": ["Located in"],
                "message": "the condition on property \"Located in\" has no value",
            }])
        );
        assert_eq!(report["pruned"], json!([]));
    }

    #[test]
    fn test_text_report() {
        let options = CheckOptions {
            prune: true,
            max_size: Some(1),
            ..check("[[Category:A]] [[Category:B]] foo")
        };
        let query = execute_check(&options).unwrap();
        let text = render_text(&query);
        assert!(text.contains("query:    [[Category:A]]\n"));
        assert!(text.contains("size:     1\n"));
        assert!(text.contains("features: CATEGORY\n"));
        assert!(text.contains("pruned:   [[Category:B]]\n"));
        assert!(text.contains("[smw_unexpectedpart]"));
    }

    #[test]
    fn test_text_report_for_empty_result() {
        let query = execute_check(&check("[[]]")).unwrap();
        let text = render_text(&query);
        assert!(text.starts_with("query:    (no condition)\n"));
        assert!(text.contains("[smw_badqueryatom]"));
    }

    // ========================================================================
    // docs
    // ========================================================================

    #[test]
    fn test_docs_overview_lists_categories() {
        let overview = get_docs_overview();
        let names = [
            "syntax",
            "atoms",
            "properties",
            "subqueries",
            "comparators",
            "features",
            "limits",
        ];
        for name in names {
            assert!(overview.contains(name), "missing {}", name);
            assert!(get_doc_category(name).is_ok(), "no docs for {}", name);
        }
    }

    #[test]
    fn test_doc_aliases() {
        assert_eq!(DocCategory::from_name("Prune"), Some(DocCategory::Limits));
        assert_eq!(DocCategory::from_name("cmp"), Some(DocCategory::Comparators));
        assert_eq!(DocCategory::from_name("nothing"), None);
        assert!(get_doc_category("chains").unwrap().starts_with("PROPERTIES"));
    }

    #[test]
    fn test_unknown_doc_category() {
        match get_doc_category("nothing") {
            Err(CliError::UnknownCategory(name)) => assert_eq!(name, "nothing"),
            other => panic!("expected an unknown category, got {:?}", other.map(|_| ())),
        }
    }
}
