use crate::error::SnapshotError;
use crate::graph::CompactGraph;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::info;

const MAGIC: &[u8; 4] = b"CPGS";
const VERSION: u32 = 1;

// Upper bound for pre-allocation from untrusted counts; a corrupt file can
// claim any u32, so real growth past this comes from actually read data.
const CAPACITY_HINT_LIMIT: usize = 1 << 20;

/// Writes the graph's parallel arrays to a versioned, gzip-compressed
/// binary snapshot. Field order is fixed: identities, then adjacency, then
/// title membership. The derived `person_titles` arrays are not persisted.
///
/// The snapshot is written to a temp file and renamed into place so a
/// crash mid-write never leaves a truncated file at the target path.
pub fn save(graph: &CompactGraph, path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)?;
    let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());

    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(VERSION)?;

    writer.write_u32::<LittleEndian>(graph.person_ids.len() as u32)?;
    for (id, name) in graph.person_ids.iter().zip(&graph.person_names) {
        write_string(&mut writer, id)?;
        write_string(&mut writer, name)?;
    }

    writer.write_u32::<LittleEndian>(graph.title_ids.len() as u32)?;
    for (id, name) in graph.title_ids.iter().zip(&graph.title_names) {
        write_string(&mut writer, id)?;
        write_string(&mut writer, name)?;
    }

    for neighbors in &graph.neighbors {
        write_index_list(&mut writer, neighbors)?;
    }
    for members in &graph.title_members {
        write_index_list(&mut writer, members)?;
    }

    writer.finish()?.flush()?;
    std::fs::rename(&temp_path, path)?;

    info!(path = %path.display(), "saved graph snapshot");
    Ok(())
}

/// Reads a snapshot back into a `CompactGraph`, restoring the derived
/// person -> titles arrays. Every structural problem is reported as a
/// `SnapshotError` so the caller can fall back to a rebuild.
pub fn load(path: &Path) -> Result<CompactGraph, SnapshotError> {
    let file = File::open(path)?;
    let mut reader = GzDecoder::new(BufReader::new(file));

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let version = reader.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let person_count = reader.read_u32::<LittleEndian>()? as usize;
    let mut person_ids = Vec::with_capacity(person_count.min(CAPACITY_HINT_LIMIT));
    let mut person_names = Vec::with_capacity(person_count.min(CAPACITY_HINT_LIMIT));
    for _ in 0..person_count {
        person_ids.push(read_string(&mut reader)?);
        person_names.push(read_string(&mut reader)?);
    }

    let title_count = reader.read_u32::<LittleEndian>()? as usize;
    let mut title_ids = Vec::with_capacity(title_count.min(CAPACITY_HINT_LIMIT));
    let mut title_names = Vec::with_capacity(title_count.min(CAPACITY_HINT_LIMIT));
    for _ in 0..title_count {
        title_ids.push(read_string(&mut reader)?);
        title_names.push(read_string(&mut reader)?);
    }

    let mut neighbors = Vec::with_capacity(person_count.min(CAPACITY_HINT_LIMIT));
    for _ in 0..person_count {
        neighbors.push(read_index_list(&mut reader, person_count)?);
    }
    let mut title_members = Vec::with_capacity(title_count.min(CAPACITY_HINT_LIMIT));
    for _ in 0..title_count {
        title_members.push(read_index_list(&mut reader, person_count)?);
    }

    let mut graph = CompactGraph {
        person_ids,
        person_names,
        title_ids,
        title_names,
        neighbors,
        title_members,
        person_titles: Vec::new(),
    };
    graph.rebuild_person_titles();

    Ok(graph)
}

/// Detects snapshots written by a builder that never stored real title
/// names: every name equal to its ID means the file predates the current
/// format semantics and must be rebuilt from source.
pub fn looks_stale(graph: &CompactGraph) -> bool {
    !graph.title_ids.is_empty()
        && graph
            .title_ids
            .iter()
            .zip(&graph.title_names)
            .all(|(id, name)| id == name)
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), std::io::Error> {
    let length = u16::try_from(value.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("string of {} bytes exceeds the snapshot field limit", value.len()),
        )
    })?;
    writer.write_u16::<LittleEndian>(length)?;
    writer.write_all(value.as_bytes())
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, SnapshotError> {
    let length = reader.read_u16::<LittleEndian>()? as usize;
    let mut bytes = vec![0u8; length];
    reader.read_exact(&mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}

fn write_index_list<W: Write>(writer: &mut W, indices: &[u32]) -> Result<(), std::io::Error> {
    writer.write_u32::<LittleEndian>(indices.len() as u32)?;
    for &index in indices {
        writer.write_u32::<LittleEndian>(index)?;
    }
    Ok(())
}

fn read_index_list<R: Read>(reader: &mut R, count: usize) -> Result<Vec<u32>, SnapshotError> {
    let length = reader.read_u32::<LittleEndian>()? as usize;
    let mut indices = Vec::with_capacity(length.min(CAPACITY_HINT_LIMIT));
    for _ in 0..length {
        let index = reader.read_u32::<LittleEndian>()?;
        if index as usize >= count {
            return Err(SnapshotError::IndexOutOfRange { index, count });
        }
        indices.push(index);
    }
    Ok(indices)
}
