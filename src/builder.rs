use crate::error::EngineError;
use crate::graph::CompactGraph;
use crate::parsing::{CastRow, parse_cast_row};
use flate2::read::GzDecoder;
use rustc_hash::{FxHashMap, FxHashSet};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, warn};

const PROGRESS_INTERVAL: u64 = 50_000;

/// Incremental graph builder. Feed it parsed rows, then call `finish` to
/// flatten the working sets into the compact representation.
pub struct GraphBuilder {
    person_index: FxHashMap<String, u32>,
    title_index: FxHashMap<String, u32>,
    person_ids: Vec<String>,
    person_names: Vec<String>,
    title_ids: Vec<String>,
    title_names: Vec<String>,
    neighbor_sets: Vec<FxHashSet<u32>>,
    title_member_sets: Vec<FxHashSet<u32>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            person_index: FxHashMap::default(),
            title_index: FxHashMap::default(),
            person_ids: Vec::new(),
            person_names: Vec::new(),
            title_ids: Vec::new(),
            title_names: Vec::new(),
            neighbor_sets: Vec::new(),
            title_member_sets: Vec::new(),
        }
    }

    /// Registers the row's title and persons. Edges are derived in
    /// `finish`, once every title's participant set is complete.
    pub fn add_row(&mut self, row: &CastRow) {
        let title_idx = self.intern_title(&row.title_id, &row.title_name);

        for (position, person_id) in row.person_ids.iter().enumerate() {
            // The name list can be shorter than the ID list in sloppy
            // source data; fall back to the ID as the display name.
            let name = row
                .person_names
                .get(position)
                .map(String::as_str)
                .unwrap_or(person_id);
            let person_idx = self.intern_person(person_id, name);
            self.title_member_sets[title_idx as usize].insert(person_idx);
        }
    }

    /// Takes the full pairwise combination of each title's participants.
    /// Titles with a single participant contribute no edges.
    fn derive_edges(&mut self) {
        for title_idx in 0..self.title_member_sets.len() {
            let participants: Vec<u32> =
                self.title_member_sets[title_idx].iter().copied().collect();
            if participants.len() < 2 {
                continue;
            }
            for i in 0..participants.len() {
                for j in (i + 1)..participants.len() {
                    let (a, b) = (participants[i], participants[j]);
                    self.neighbor_sets[a as usize].insert(b);
                    self.neighbor_sets[b as usize].insert(a);
                }
            }
        }
    }

    fn intern_person(&mut self, id: &str, name: &str) -> u32 {
        if let Some(&idx) = self.person_index.get(id) {
            return idx;
        }
        let idx = self.person_ids.len() as u32;
        self.person_index.insert(id.to_string(), idx);
        self.person_ids.push(id.to_string());
        self.person_names.push(name.to_string());
        self.neighbor_sets.push(FxHashSet::default());
        idx
    }

    fn intern_title(&mut self, id: &str, name: &str) -> u32 {
        if let Some(&idx) = self.title_index.get(id) {
            return idx;
        }
        let idx = self.title_ids.len() as u32;
        self.title_index.insert(id.to_string(), idx);
        self.title_ids.push(id.to_string());
        self.title_names.push(name.to_string());
        self.title_member_sets.push(FxHashSet::default());
        idx
    }

    /// Flattens every working set into an exact-size sorted array. Sorting
    /// makes two builds over the same input produce identical graphs.
    pub fn finish(mut self) -> CompactGraph {
        self.derive_edges();
        let neighbors = self.neighbor_sets.into_iter().map(flatten_set).collect();
        let title_members = self.title_member_sets.into_iter().map(flatten_set).collect();

        let mut graph = CompactGraph {
            person_ids: self.person_ids,
            person_names: self.person_names,
            title_ids: self.title_ids,
            title_names: self.title_names,
            neighbors,
            title_members,
            person_titles: Vec::new(),
        };
        graph.rebuild_person_titles();
        graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_set(set: FxHashSet<u32>) -> Vec<u32> {
    let mut flat: Vec<u32> = set.into_iter().collect();
    flat.sort_unstable();
    flat.shrink_to_fit();
    flat
}

/// Builds the compact graph by streaming a gzip-compressed delimited cast
/// file. The first line is a header and is skipped; malformed rows are
/// counted and skipped, never fatal.
pub fn build_from_cast_file(cast_path: &Path) -> Result<CompactGraph, EngineError> {
    if !cast_path.is_file() {
        return Err(EngineError::MissingSource(cast_path.to_path_buf()));
    }

    info!(path = %cast_path.display(), "building graph from cast data");

    let file = File::open(cast_path)?;
    let reader = BufReader::new(GzDecoder::new(file));

    let mut builder = GraphBuilder::new();
    let mut row_count: u64 = 0;
    let mut skipped: u64 = 0;

    for line in reader.lines().skip(1) {
        let line = line?;
        match parse_cast_row(&line) {
            Some(row) => builder.add_row(&row),
            None => {
                skipped += 1;
                debug!(line = %line, "skipping malformed cast row");
            }
        }

        row_count += 1;
        if row_count % PROGRESS_INTERVAL == 0 {
            info!(rows = row_count, "processed cast rows");
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped malformed cast rows");
    }

    let graph = builder.finish();
    let stats = graph.stats();
    info!(
        persons = stats.persons,
        titles = stats.titles,
        edges = stats.edges,
        "finished building graph"
    );

    Ok(graph)
}
