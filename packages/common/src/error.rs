use thiserror::Error;

/// A path or sibling index that does not resolve against the tree it was applied to.
///
/// Paths are derived from the tree they address; hitting one of these means
/// the caller reused a path across a structural change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path {path:?} leaves the tree at depth {depth}: index {index} of {len} siblings")]
    OutOfRange {
        path: Vec<usize>,
        depth: usize,
        index: usize,
        len: usize,
    },

    #[error("Sibling index {index} out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
