//! Minimal TSPLIB reader for `EUC_2D` instances.
//!
//! Understands the header keywords (`NAME`, `COMMENT`, `TYPE`,
//! `DIMENSION`, `EDGE_WEIGHT_TYPE`; other keywords are ignored) followed by
//! a `NODE_COORD_SECTION` of `id x y` lines. Both `KEY : VALUE` and
//! `KEY: VALUE` spellings are accepted. Anything after the last coordinate
//! line (such as `EOF`) is ignored.

use crate::error::{Error, Result};
use crate::instance::{Instance, Node};
use std::path::Path;

/// A parsed TSPLIB file.
#[derive(Debug, Clone)]
pub struct TsplibInstance {
    /// Value of the `NAME` keyword, if present.
    pub name: Option<String>,
    /// Value of the `COMMENT` keyword, if present.
    pub comment: Option<String>,
    pub instance: Instance,
}

/// Reads and parses a TSPLIB file.
pub fn read_tsplib(path: impl AsRef<Path>) -> Result<TsplibInstance> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_tsplib(&text)
}

/// Parses TSPLIB text.
///
/// # Examples
///
/// ```
/// use u_tsp::tsplib::parse_tsplib;
///
/// let text = "NAME : tiny\nTYPE : TSP\nDIMENSION : 3\nEDGE_WEIGHT_TYPE : EUC_2D\n\
///             NODE_COORD_SECTION\n1 0 0\n2 3 4\n3 6 0\nEOF\n";
/// let parsed = parse_tsplib(text).unwrap();
/// assert_eq!(parsed.name.as_deref(), Some("tiny"));
/// assert_eq!(parsed.instance.len(), 3);
/// assert_eq!(parsed.instance.distance(0, 1), 5.0);
/// ```
pub fn parse_tsplib(text: &str) -> Result<TsplibInstance> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let mut name = None;
    let mut comment = None;
    let mut dimension: Option<usize> = None;
    let mut coord_section = false;

    for (line_no, line) in lines.by_ref() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line, ""),
        };

        match key.to_ascii_uppercase().as_str() {
            "NODE_COORD_SECTION" => {
                coord_section = true;
                break;
            }
            "EOF" => break,
            "NAME" => name = Some(value.to_string()),
            "COMMENT" => comment = Some(value.to_string()),
            "TYPE" => {
                if !value.eq_ignore_ascii_case("TSP") {
                    return Err(Error::invalid_instance(format!(
                        "unsupported problem TYPE '{value}'"
                    )));
                }
            }
            "EDGE_WEIGHT_TYPE" => {
                if !value.eq_ignore_ascii_case("EUC_2D") {
                    return Err(Error::invalid_instance(format!(
                        "unsupported EDGE_WEIGHT_TYPE '{value}', only EUC_2D is supported"
                    )));
                }
            }
            "DIMENSION" => {
                let parsed = value.parse::<usize>().map_err(|_| {
                    Error::parse(line_no, format!("invalid DIMENSION '{value}'"))
                })?;
                dimension = Some(parsed);
            }
            _ => {}
        }
    }

    let last_line = text.lines().count();
    if !coord_section {
        return Err(Error::parse(last_line, "missing NODE_COORD_SECTION"));
    }
    let dimension = dimension
        .ok_or_else(|| Error::parse(last_line, "DIMENSION missing before NODE_COORD_SECTION"))?;
    if dimension == 0 {
        return Err(Error::invalid_instance("DIMENSION is 0"));
    }

    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(dimension)
        .map_err(|e| Error::allocation(format!("{dimension} nodes: {e}")))?;

    for (line_no, line) in lines.by_ref() {
        if nodes.len() == dimension {
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("EOF") {
            break;
        }
        nodes.push(parse_coord_line(line_no, line)?);
    }

    if nodes.len() < dimension {
        return Err(Error::parse(
            last_line,
            format!("expected {dimension} coordinates, found {}", nodes.len()),
        ));
    }

    Ok(TsplibInstance {
        name,
        comment,
        instance: Instance::new(nodes)?,
    })
}

fn parse_coord_line(line_no: usize, line: &str) -> Result<Node> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y] = fields[..] else {
        return Err(Error::parse(
            line_no,
            format!("expected 'id x y', got {} fields", fields.len()),
        ));
    };

    let id = id
        .parse::<usize>()
        .map_err(|_| Error::parse(line_no, format!("invalid node id '{id}'")))?;
    let x = x
        .parse::<f64>()
        .map_err(|_| Error::parse(line_no, format!("invalid x coordinate '{x}'")))?;
    let y = y
        .parse::<f64>()
        .map_err(|_| Error::parse(line_no, format!("invalid y coordinate '{y}'")))?;
    Ok(Node::new(id, x, y))
}
