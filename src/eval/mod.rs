//! Static evaluation: line patterns and the leaf heuristic

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{scan_line, LineShape, PatternScore, ThreatScore};
