use crate::graph::CompactGraph;
use serde::Serialize;

/// One resolved path, ready for display or serialization. `render` emits
/// the line-oriented block the web layer parses back into fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedPath {
    /// Display names joined with " -> ".
    pub display: String,
    pub start_id: String,
    pub end_id: String,
    /// External person IDs along the path, in order.
    pub person_ids: Vec<String>,
    /// For each hop, the ID of one title connecting the pair.
    pub title_ids: Vec<String>,
    /// Display names parallel to `title_ids`.
    pub title_names: Vec<String>,
}

impl FormattedPath {
    pub fn render(&self) -> String {
        let mut block = String::new();
        block.push_str("START_ID:");
        block.push_str(&self.start_id);
        block.push('\n');
        block.push_str("END_ID:");
        block.push_str(&self.end_id);
        block.push('\n');
        block.push_str(&self.display);
        block.push('\n');

        block.push_str("ACTOR_IDS:");
        for person_id in &self.person_ids {
            block.push_str(person_id);
            block.push(',');
        }
        block.push('\n');

        block.push_str("MOVIE_IDS:");
        for title_id in &self.title_ids {
            block.push_str(title_id);
            block.push(',');
        }
        block.push('\n');

        block.push_str("MOVIE_TITLES:");
        for title_name in &self.title_names {
            block.push_str(title_name);
            block.push(',');
        }

        block
    }
}

pub(crate) fn format_path(graph: &CompactGraph, nodes: &[u32]) -> FormattedPath {
    let display = nodes
        .iter()
        .map(|&node| graph.person_names[node as usize].as_str())
        .collect::<Vec<_>>()
        .join(" -> ");

    let person_ids: Vec<String> = nodes
        .iter()
        .map(|&node| graph.person_ids[node as usize].clone())
        .collect();

    let mut title_ids = Vec::with_capacity(nodes.len().saturating_sub(1));
    let mut title_names = Vec::with_capacity(nodes.len().saturating_sub(1));
    for pair in nodes.windows(2) {
        let (id, name) = connecting_title(graph, pair[0], pair[1]);
        title_ids.push(id);
        title_names.push(name);
    }

    FormattedPath {
        display,
        start_id: person_ids.first().cloned().unwrap_or_default(),
        end_id: person_ids.last().cloned().unwrap_or_default(),
        person_ids,
        title_ids,
        title_names,
    }
}

/// Resolves one title shared by two adjacent persons by intersecting their
/// sorted title-membership lists; the lowest title index wins, which keeps
/// the choice deterministic. Adjacent persons always share a title, so the
/// fallback only shows up on corrupted data.
fn connecting_title(graph: &CompactGraph, a: u32, b: u32) -> (String, String) {
    match first_common(&graph.person_titles[a as usize], &graph.person_titles[b as usize]) {
        Some(title_idx) => (
            graph.title_ids[title_idx as usize].clone(),
            graph.title_names[title_idx as usize].clone(),
        ),
        None => ("unknown".to_string(), "Unknown Title".to_string()),
    }
}

fn first_common(left: &[u32], right: &[u32]) -> Option<u32> {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Equal => return Some(left[i]),
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    None
}
