//! CLI option parsing (§10.2), one `clap::Parser` struct per binary,
//! mirroring the original's three option sets.

use crate::counter::Measure;
use crate::io::EdgeKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProbDist {
    Deterministic,
    Exponential,
}

impl ProbDist {
    pub fn prob_fn(self) -> crate::graph::ProbFn {
        match self {
            ProbDist::Deterministic => crate::prob::deterministic,
            ProbDist::Exponential => crate::prob::exponential,
        }
    }

    pub fn is_deterministic(self) -> bool {
        matches!(self, ProbDist::Deterministic)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SizeMeasure {
    Events,
    Nodes,
}

impl From<SizeMeasure> for Measure {
    fn from(m: SizeMeasure) -> Measure {
        match m {
            SizeMeasure::Events => Measure::Events,
            SizeMeasure::Nodes => Measure::Nodes,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EdgeKindArg {
    Undirected,
    Directed,
    Delayed,
}

impl From<EdgeKindArg> for EdgeKind {
    fn from(k: EdgeKindArg) -> EdgeKind {
        match k {
            EdgeKindArg::Undirected => EdgeKind::Undirected,
            EdgeKindArg::Directed => EdgeKind::Directed,
            EdgeKindArg::Delayed => EdgeKind::DirectedDelayed,
        }
    }
}

fn parse_significance(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err(format!("significance must be in (0, 1], got {v}"))
    }
}

/// `network-stats`: out-component-size and weakly-connected-component
/// summaries over a temporal network.
#[derive(Parser, Debug)]
#[command(name = "network-stats")]
pub struct NetworkStatsArgs {
    #[arg(short, long)]
    pub seed: u64,
    #[arg(long, default_value_t = 1.0)]
    pub dt: f64,
    #[arg(short, long)]
    pub network: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub temporal_reserve: usize,
    #[arg(long, value_enum, default_value_t = EdgeKindArg::Undirected)]
    pub edge_kind: EdgeKindArg,

    #[arg(long, value_enum, default_value_t = ProbDist::Deterministic)]
    pub prob_dist: ProbDist,
    #[arg(long, value_enum, default_value_t = SizeMeasure::Events)]
    pub size_measure: SizeMeasure,
    #[arg(long, default_value_t = 0.001, value_parser = parse_significance)]
    pub significance: f64,

    #[arg(long)]
    pub summary: Option<PathBuf>,
    #[arg(long)]
    pub out_component_sizes: Option<PathBuf>,
    #[arg(long)]
    pub weakly_component_sizes: Option<PathBuf>,
}

/// `largest-out-component`: finds and dumps the single largest out-component.
#[derive(Parser, Debug)]
#[command(name = "largest-out-component")]
pub struct LargestOutComponentArgs {
    #[arg(short, long)]
    pub seed: u64,
    #[arg(long, default_value_t = 1.0)]
    pub dt: f64,
    #[arg(short, long)]
    pub network: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub temporal_reserve: usize,
    #[arg(long, value_enum, default_value_t = EdgeKindArg::Undirected)]
    pub edge_kind: EdgeKindArg,

    #[arg(long, value_enum, default_value_t = ProbDist::Deterministic)]
    pub prob_dist: ProbDist,
    #[arg(long, value_enum, default_value_t = SizeMeasure::Events)]
    pub size_measure: SizeMeasure,
    #[arg(long, default_value_t = 0.001, value_parser = parse_significance)]
    pub significance: f64,

    #[arg(long)]
    pub summary: Option<PathBuf>,
    #[arg(long)]
    pub largest_out_component: Option<PathBuf>,
}

/// `sample-bfs`: exact-traversal sizes over a random sample of roots, for
/// spot-checking sketch accuracy against ground truth.
#[derive(Parser, Debug)]
#[command(name = "sample-bfs")]
pub struct SampleBfsArgs {
    #[arg(short, long)]
    pub seed: u64,
    #[arg(long, default_value_t = 1.0)]
    pub dt: f64,
    #[arg(short, long)]
    pub network: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub temporal_reserve: usize,
    #[arg(long, value_enum, default_value_t = EdgeKindArg::Undirected)]
    pub edge_kind: EdgeKindArg,

    #[arg(long, value_enum, default_value_t = ProbDist::Deterministic)]
    pub prob_dist: ProbDist,
    #[arg(long, default_value_t = 1000)]
    pub sample_size: usize,
    #[arg(long)]
    pub summary: Option<PathBuf>,
}
