use thiserror::Error;

/// Contract violations detected by the kernel.
///
/// Degenerate but valid geometry never produces one of these; it falls back
/// to a straight line, a zero vector or an empty result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("Edge {edge} references vertex {index}, but the mesh has {vertex_count} vertices")]
    EdgeIndexOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("Star prism needs at least 2 points, got {points}")]
    TooFewStarPoints { points: usize },
}
