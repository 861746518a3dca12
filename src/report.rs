//! Output writers (§10.3), one function per file format, each taking a
//! `Write` so they're testable without touching the filesystem. An unset
//! `--summary`/etc. flag means "don't write this file" — callers wrap the
//! `Option<File>` themselves rather than routing through a null writer.

use crate::counter::{ExactCounter, Measure};
use crate::estimate::EstimateSnapshot;
use crate::event::Event;
use std::io::{self, Write};

pub struct Summary {
    pub seed: u64,
    pub temporal_vertices: usize,
    pub temporal_edges: usize,
    pub time_window: (f64, f64),
    pub largest_out_event: Option<Event>,
    pub largest_out_event_size: Option<f64>,
    pub largest_out_node_size: Option<f64>,
    pub largest_out_lifetime: Option<f64>,
    pub largest_weakly_event_count: Option<usize>,
    pub largest_weakly_node_count: Option<usize>,
    pub largest_weakly_lifetime: Option<f64>,
}

pub fn write_summary<W: Write>(mut w: W, summary: &Summary) -> io::Result<()> {
    writeln!(w, "seed: '{}'", summary.seed)?;
    writeln!(w, "temporal-vertices: {}", summary.temporal_vertices)?;
    writeln!(w, "temporal-edges: {}", summary.temporal_edges)?;
    writeln!(w, "time-min: {}", summary.time_window.0)?;
    writeln!(w, "time-max: {}", summary.time_window.1)?;
    if let Some(size) = summary.largest_out_event_size {
        writeln!(w, "largest-out-e: {size}")?;
    }
    if let Some(size) = summary.largest_out_node_size {
        writeln!(w, "largest-out-g: {size}")?;
    }
    if let Some(lt) = summary.largest_out_lifetime {
        writeln!(w, "largest-out-lt: {lt}")?;
    }
    if let Some(event) = summary.largest_out_event {
        writeln!(w, "largest-out-time: {}", event.time())?;
    }
    if let Some(e) = summary.largest_weakly_event_count {
        writeln!(w, "largest-weakly-e: {e}")?;
    }
    if let Some(g) = summary.largest_weakly_node_count {
        writeln!(w, "largest-weakly-g: {g}")?;
    }
    if let Some(lt) = summary.largest_weakly_lifetime {
        writeln!(w, "largest-weakly-lt: {lt}")?;
    }
    Ok(())
}

/// One line per event: `e_est n_est t_min t_max`.
pub fn write_out_component_sizes<'a, W: Write>(
    mut w: W,
    entries: impl Iterator<Item = &'a (Event, EstimateSnapshot)>,
) -> io::Result<()> {
    for (_, counter) in entries {
        let (t_min, t_max) = counter.time_window();
        writeln!(
            w,
            "{} {} {} {}",
            counter.event_estimate(),
            counter.node_estimate(),
            t_min,
            t_max
        )?;
    }
    Ok(())
}

/// One line per weakly connected component: `|events| |nodes| t_min t_max`.
pub fn write_weakly_component_sizes<W: Write>(mut w: W, components: &[Vec<Event>]) -> io::Result<()> {
    for members in components {
        let mut nodes = rustc_hash::FxHashSet::default();
        let mut t_min = f64::INFINITY;
        let mut t_max = f64::NEG_INFINITY;
        for e in members {
            for v in e.mutator_verts().iter().chain(e.mutated_verts().iter()) {
                nodes.insert(*v);
            }
            t_min = t_min.min(e.time());
            t_max = t_max.max(e.time());
        }
        writeln!(w, "{} {} {} {}", members.len(), nodes.len(), t_min, t_max)?;
    }
    Ok(())
}

/// `S_e-real S_e-est S_n-real S_n-est` per event — sketch-accuracy
/// regression harness (§8 invariant 7), not wired to a shipped binary.
pub fn write_real_vs_estimate<W: Write>(
    mut w: W,
    entries: impl Iterator<Item = (ExactCounter, EstimateSnapshot)>,
) -> io::Result<()> {
    for (exact, estimate) in entries {
        writeln!(
            w,
            "{} {} {} {}",
            Measure::Events.of(&exact),
            estimate.event_estimate(),
            Measure::Nodes.of(&exact),
            estimate.node_estimate(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_omits_unset_optional_fields() {
        let summary = Summary {
            seed: 1,
            temporal_vertices: 2,
            temporal_edges: 3,
            time_window: (0.0, 10.0),
            largest_out_event: None,
            largest_out_event_size: None,
            largest_out_node_size: None,
            largest_out_lifetime: None,
            largest_weakly_event_count: None,
            largest_weakly_node_count: None,
            largest_weakly_lifetime: None,
        };
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("seed: '1'"));
        assert!(text.contains("time-min: 0"));
        assert!(text.contains("time-max: 10"));
        assert!(!text.contains("largest-out-e"));
        assert!(!text.contains("largest-weakly"));
    }

    #[test]
    fn weakly_component_sizes_counts_distinct_nodes() {
        let components = vec![vec![Event::undirected(1, 2, 0.0), Event::undirected(2, 3, 1.0)]];
        let mut buf = Vec::new();
        write_weakly_component_sizes(&mut buf, &components).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim(), "2 3 0 1");
    }

    #[test]
    fn summary_includes_both_measures_and_weakly_fields_when_set() {
        let summary = Summary {
            seed: 1,
            temporal_vertices: 2,
            temporal_edges: 3,
            time_window: (0.0, 10.0),
            largest_out_event: None,
            largest_out_event_size: Some(4.0),
            largest_out_node_size: Some(3.0),
            largest_out_lifetime: Some(2.0),
            largest_weakly_event_count: Some(5),
            largest_weakly_node_count: Some(4),
            largest_weakly_lifetime: Some(9.0),
        };
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("largest-out-e: 4"));
        assert!(text.contains("largest-out-g: 3"));
        assert!(text.contains("largest-weakly-e: 5"));
        assert!(text.contains("largest-weakly-g: 4"));
        assert!(text.contains("largest-weakly-lt: 9"));
    }
}
