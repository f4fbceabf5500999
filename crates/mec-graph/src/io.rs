use std::fs;
use std::path::Path;

use mec_core::{ErrorInfo, MecError};

use crate::pdag::Pdag;

fn format_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Parses a graph from the text format:
///
/// ```text
/// <n> <m>
///
/// <u1> <v1>
/// ...
/// <um> <vm>
/// ```
///
/// Vertices are 1-indexed. With `undirected` set, each listed pair
/// yields both arcs; otherwise lines are taken literally and an
/// undirected edge must appear as two lines.
pub fn parse_graph(text: &str, undirected: bool) -> Result<Pdag, MecError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| MecError::Serde(format_error("empty-input", "no header line")))?;
    let mut parts = header.split_whitespace();
    let n = parse_count(parts.next(), header, 1)?;
    let m = parse_count(parts.next(), header, 1)?;
    if parts.next().is_some() {
        return Err(MecError::Serde(
            format_error("bad-header", "header must be exactly `<n> <m>`")
                .with_context("line", 1),
        ));
    }

    match lines.next() {
        Some((_, blank)) if blank.trim().is_empty() => {}
        _ => {
            return Err(MecError::Serde(format_error(
                "missing-separator",
                "expected a blank line after the header",
            )));
        }
    }

    let mut g = Pdag::new(n);
    let mut parsed = 0usize;
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let mut parts = line.split_whitespace();
        let u = parse_count(parts.next(), line, lineno)?;
        let v = parse_count(parts.next(), line, lineno)?;
        if parts.next().is_some() {
            return Err(MecError::Serde(
                format_error("bad-edge-line", "edge lines must be exactly `<u> <v>`")
                    .with_context("line", lineno),
            ));
        }
        let added = if undirected {
            g.add_undirected(u, v)
        } else {
            g.add_edge(u, v)
        };
        added.map_err(|err| {
            MecError::Serde(
                format_error("bad-edge", err.info().message.clone()).with_context("line", lineno),
            )
        })?;
        parsed += 1;
    }

    if parsed != m {
        return Err(MecError::Serde(
            format_error("edge-count-mismatch", "header edge count does not match body")
                .with_context("declared", m)
                .with_context("parsed", parsed),
        ));
    }
    Ok(g)
}

fn parse_count(token: Option<&str>, line: &str, lineno: usize) -> Result<usize, MecError> {
    let token = token.ok_or_else(|| {
        MecError::Serde(
            format_error("missing-field", "expected an integer")
                .with_context("line", lineno)
                .with_context("text", line.trim()),
        )
    })?;
    token.parse::<usize>().map_err(|_| {
        MecError::Serde(
            format_error("bad-integer", "field is not a non-negative integer")
                .with_context("line", lineno)
                .with_context("text", token),
        )
    })
}

/// Renders a graph in the text format, arcs listed literally in
/// lexicographic `(u, v)` order. For an emitted DAG this is exactly the
/// output format: every arc is a directed edge.
pub fn render_graph(g: &Pdag) -> String {
    let edges = g.edges();
    let mut out = String::new();
    out.push_str(&format!("{} {}\n\n", g.n_vertices(), edges.len()));
    for (u, v) in edges {
        out.push_str(&format!("{u} {v}\n"));
    }
    out
}

/// Reads a graph file in the text format.
pub fn read_graph_file(path: &Path, undirected: bool) -> Result<Pdag, MecError> {
    let text = fs::read_to_string(path).map_err(|err| {
        MecError::Serde(
            format_error("read-file", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    parse_graph(&text, undirected)
}

/// Writes a DAG file in the output format.
pub fn write_dag_file(path: &Path, g: &Pdag) -> Result<(), MecError> {
    fs::write(path, render_graph(g)).map_err(|err| {
        MecError::Serde(
            format_error("write-file", err.to_string())
                .with_context("path", path.display()),
        )
    })
}
