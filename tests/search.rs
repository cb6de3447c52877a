use castpath_core::{CastRow, GraphBuilder, search_names};

fn graph_with_names(entries: &[(&str, &str)]) -> castpath_core::CompactGraph {
    let mut builder = GraphBuilder::new();
    builder.add_row(&CastRow {
        title_id: "t1".to_string(),
        title_name: "Ensemble".to_string(),
        person_ids: entries.iter().map(|(id, _)| id.to_string()).collect(),
        person_names: entries.iter().map(|(_, name)| name.to_string()).collect(),
    });
    builder.finish()
}

#[test]
fn test_substring_match_in_array_order() {
    let graph = graph_with_names(&[("n1", "John"), ("n2", "Joan"), ("n3", "Mark")]);

    let results = search_names(&graph, "jo", 10);
    assert_eq!(
        results,
        vec![
            ("n1".to_string(), "John".to_string()),
            ("n2".to_string(), "Joan".to_string()),
        ]
    );
}

#[test]
fn test_case_insensitive() {
    let graph = graph_with_names(&[("n1", "John"), ("n2", "mark")]);

    assert_eq!(search_names(&graph, "JOHN", 10).len(), 1);
    assert_eq!(search_names(&graph, "MaRk", 10).len(), 1);
}

#[test]
fn test_result_cap() {
    let graph = graph_with_names(&[("n1", "Ann A"), ("n2", "Ann B"), ("n3", "Ann C")]);

    let results = search_names(&graph, "ann", 2);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "n1");
    assert_eq!(results[1].0, "n2");
}

#[test]
fn test_blank_query_returns_nothing() {
    let graph = graph_with_names(&[("n1", "John")]);

    assert!(search_names(&graph, "", 10).is_empty());
    assert!(search_names(&graph, "   ", 10).is_empty());
}

#[test]
fn test_no_match() {
    let graph = graph_with_names(&[("n1", "John")]);
    assert!(search_names(&graph, "zzz", 10).is_empty());
}

#[test]
fn test_query_with_surrounding_whitespace() {
    let graph = graph_with_names(&[("n1", "John"), ("n2", "Mark")]);
    assert_eq!(search_names(&graph, "  john  ", 10).len(), 1);
}
