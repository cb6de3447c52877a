use serde::Serialize;

/// Dense-array representation of the collaboration graph.
///
/// Persons and titles are addressed by the `u32` index assigned at build
/// time; the identity and name arrays are parallel to those indices. The
/// graph is built (or loaded) once and never mutated afterwards, so it can
/// be shared freely across query threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactGraph {
    pub person_ids: Vec<String>,
    pub person_names: Vec<String>,
    pub title_ids: Vec<String>,
    pub title_names: Vec<String>,
    /// Person index -> neighbor person indices, deduplicated and sorted.
    pub neighbors: Vec<Vec<u32>>,
    /// Title index -> participating person indices, sorted.
    pub title_members: Vec<Vec<u32>>,
    /// Person index -> title indices, sorted. Derived from `title_members`
    /// after build or load; never persisted.
    pub person_titles: Vec<Vec<u32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub persons: usize,
    pub titles: usize,
    pub edges: usize,
}

impl CompactGraph {
    pub fn person_count(&self) -> usize {
        self.person_ids.len()
    }

    pub fn title_count(&self) -> usize {
        self.title_ids.len()
    }

    pub fn stats(&self) -> GraphStats {
        let endpoint_count: usize = self.neighbors.iter().map(Vec::len).sum();
        GraphStats {
            persons: self.person_count(),
            titles: self.title_count(),
            edges: endpoint_count / 2,
        }
    }

    /// Rebuilds the derived person -> titles memberships from
    /// `title_members`. Called once after build or snapshot load.
    pub fn rebuild_person_titles(&mut self) {
        let mut person_titles = vec![Vec::new(); self.person_ids.len()];
        for (title_idx, members) in self.title_members.iter().enumerate() {
            for &person_idx in members {
                person_titles[person_idx as usize].push(title_idx as u32);
            }
        }
        // Members are walked in ascending title order, so each list is
        // already sorted.
        self.person_titles = person_titles;
    }
}
