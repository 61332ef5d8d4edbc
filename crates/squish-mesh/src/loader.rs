//! Line-oriented tet-mesh text format.
//!
//! The format is four header lines (vertex, tet, edge, and surface
//! triangle counts) followed by one value per line: `3n` position
//! floats, `4t` tet indices, `2e` edge indices, `3f` surface indices.
//! Files produced on Windows carry CRLF line endings; both endings are
//! accepted, and trailing blank lines are ignored.

use std::path::Path;

use squish_types::{SquishError, SquishResult};

use crate::mesh::TetMesh;

/// Loads a tet mesh from a text file.
pub fn load_tet_mesh<P: AsRef<Path>>(path: P) -> SquishResult<TetMesh> {
    let text = std::fs::read_to_string(path)?;
    parse_tet_mesh(&text)
}

/// Parses a tet mesh from text in the line-oriented format.
pub fn parse_tet_mesh(text: &str) -> SquishResult<TetMesh> {
    let mut cursor = Cursor::new(text);

    let n_vertices = cursor.next_usize("vertex count")?;
    let n_tets = cursor.next_usize("tet count")?;
    let n_edges = cursor.next_usize("edge count")?;
    let n_triangles = cursor.next_usize("surface triangle count")?;

    let mut positions = Vec::with_capacity(n_vertices * 3);
    for _ in 0..n_vertices * 3 {
        positions.push(cursor.next_f32("vertex position")?);
    }

    let mut tet_indices = Vec::with_capacity(n_tets * 4);
    for _ in 0..n_tets * 4 {
        tet_indices.push(cursor.next_u32("tet index")?);
    }

    let mut edge_indices = Vec::with_capacity(n_edges * 2);
    for _ in 0..n_edges * 2 {
        edge_indices.push(cursor.next_u32("edge index")?);
    }

    let mut surface_indices = Vec::with_capacity(n_triangles * 3);
    for _ in 0..n_triangles * 3 {
        surface_indices.push(cursor.next_u32("surface index")?);
    }

    TetMesh::from_interleaved(&positions, &tet_indices, &edge_indices, &surface_indices)
}

/// Line cursor over a text asset. Tracks the current line number for
/// error messages.
struct Cursor<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }

    /// Returns the next non-empty line, trimmed of surrounding
    /// whitespace (which also strips a stray `\r`).
    fn next_line(&mut self, what: &str) -> SquishResult<&'a str> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed);
            }
        }
        Err(SquishError::Parse(format!(
            "Unexpected end of file while reading {}",
            what
        )))
    }

    fn next_usize(&mut self, what: &str) -> SquishResult<usize> {
        let line = self.next_line(what)?;
        let line_no = self.line_no;
        line.parse::<usize>().map_err(|_| {
            SquishError::Parse(format!(
                "Line {}: expected {} (integer), got '{}'",
                line_no, what, line
            ))
        })
    }

    fn next_u32(&mut self, what: &str) -> SquishResult<u32> {
        let line = self.next_line(what)?;
        let line_no = self.line_no;
        line.parse::<u32>().map_err(|_| {
            SquishError::Parse(format!(
                "Line {}: expected {} (index), got '{}'",
                line_no, what, line
            ))
        })
    }

    fn next_f32(&mut self, what: &str) -> SquishResult<f32> {
        let line = self.next_line(what)?;
        let line_no = self.line_no;
        line.parse::<f32>().map_err(|_| {
            SquishError::Parse(format!(
                "Line {}: expected {} (float), got '{}'",
                line_no, what, line
            ))
        })
    }
}
