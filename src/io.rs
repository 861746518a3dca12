//! Event-list parsing (§10.1). Whitespace-separated ASCII, one event per
//! line; the caller picks the edge kind up front rather than sniffing it
//! per line.

use crate::error::GraphError;
use crate::event::Event;
use std::io::BufRead;

/// The edge kind a reader produces. There is no per-line auto-detection:
/// a run picks one kind for the whole file, matching the original's
/// compile-time `temp_edge` alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Undirected,
    Directed,
    DirectedDelayed,
}

fn parse_field(line_no: usize, field: &str) -> Result<f64, GraphError> {
    field.parse::<f64>().map_err(|_| GraphError::Input {
        line: line_no,
        message: format!("could not parse field {field:?} as a number"),
    })
}

fn parse_vertex(line_no: usize, field: &str) -> Result<u64, GraphError> {
    field.parse::<u64>().map_err(|_| GraphError::Input {
        line: line_no,
        message: format!("could not parse field {field:?} as a vertex id"),
    })
}

/// Read `events` from `reader`, one per line, according to `kind`.
/// `temporal_reserve` sizes the output `Vec`'s initial capacity.
pub fn read_events<R: BufRead>(
    reader: R,
    kind: EdgeKind,
    temporal_reserve: usize,
) -> Result<Vec<Event>, GraphError> {
    let mut events = Vec::with_capacity(temporal_reserve);

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| GraphError::Input {
            line: line_no,
            message: e.to_string(),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();

        let event = match kind {
            EdgeKind::Undirected => {
                if fields.len() != 3 {
                    return Err(GraphError::Input {
                        line: line_no,
                        message: format!("expected 3 fields `u v t`, got {}", fields.len()),
                    });
                }
                let u = parse_vertex(line_no, fields[0])?;
                let v = parse_vertex(line_no, fields[1])?;
                let t = parse_field(line_no, fields[2])?;
                if u == v {
                    continue;
                }
                Event::undirected(u, v, t)
            }
            EdgeKind::Directed => {
                if fields.len() != 3 {
                    return Err(GraphError::Input {
                        line: line_no,
                        message: format!("expected 3 fields `u v t`, got {}", fields.len()),
                    });
                }
                let tail = parse_vertex(line_no, fields[0])?;
                let head = parse_vertex(line_no, fields[1])?;
                let t = parse_field(line_no, fields[2])?;
                Event::directed(tail, head, t)
            }
            EdgeKind::DirectedDelayed => {
                if fields.len() != 4 {
                    return Err(GraphError::Input {
                        line: line_no,
                        message: format!("expected 4 fields `u v t delta`, got {}", fields.len()),
                    });
                }
                let tail = parse_vertex(line_no, fields[0])?;
                let head = parse_vertex(line_no, fields[1])?;
                let t = parse_field(line_no, fields[2])?;
                let delay = parse_field(line_no, fields[3])?;
                Event::directed_delayed(tail, head, t, delay)
            }
        };
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_undirected_events_and_drops_self_loops() {
        let input = "1 2 0.0\n3 3 1.0\n2 3 1.5\n";
        let events = read_events(Cursor::new(input), EdgeKind::Undirected, 0).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn reads_delayed_events() {
        let input = "1 2 0.0 5.0\n";
        let events = read_events(Cursor::new(input), EdgeKind::DirectedDelayed, 0).unwrap();
        assert_eq!(events[0], Event::directed_delayed(1, 2, 0.0, 5.0));
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let input = "1 2 0.0\nnot a line\n";
        let err = read_events(Cursor::new(input), EdgeKind::Undirected, 0).unwrap_err();
        match err {
            GraphError::Input { line, .. } => assert_eq!(line, 2),
            _ => panic!("expected Input error"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "1 2 0.0\n\n2 3 1.0\n";
        let events = read_events(Cursor::new(input), EdgeKind::Undirected, 0).unwrap();
        assert_eq!(events.len(), 2);
    }
}
