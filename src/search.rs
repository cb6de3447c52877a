use crate::graph::CompactGraph;

/// Case-insensitive substring search over person names, in array order,
/// capped at `max_results`. Streams the name array directly; no per-query
/// copy of the dataset is built.
pub fn search_names(
    graph: &CompactGraph,
    query: &str,
    max_results: usize,
) -> Vec<(String, String)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    graph
        .person_names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&query))
        .take(max_results)
        .map(|(idx, name)| (graph.person_ids[idx].clone(), name.clone()))
        .collect()
}
