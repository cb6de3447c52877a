use crate::graph::CompactGraph;
use rustc_hash::FxHashMap;

/// O(1) external-ID -> dense-index maps over the graph's identity arrays.
/// Rebuilt after every build or load; never persisted.
#[derive(Debug, Default)]
pub struct LookupIndex {
    persons: FxHashMap<String, u32>,
    titles: FxHashMap<String, u32>,
}

impl LookupIndex {
    pub fn build(graph: &CompactGraph) -> Self {
        let mut persons =
            FxHashMap::with_capacity_and_hasher(graph.person_count(), Default::default());
        for (idx, id) in graph.person_ids.iter().enumerate() {
            persons.insert(id.clone(), idx as u32);
        }

        let mut titles =
            FxHashMap::with_capacity_and_hasher(graph.title_count(), Default::default());
        for (idx, id) in graph.title_ids.iter().enumerate() {
            titles.insert(id.clone(), idx as u32);
        }

        Self { persons, titles }
    }

    pub fn person(&self, id: &str) -> Option<u32> {
        self.persons.get(id).copied()
    }

    pub fn title(&self, id: &str) -> Option<u32> {
        self.titles.get(id).copied()
    }
}
