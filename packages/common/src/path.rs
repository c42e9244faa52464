//! # Path-Addressed Mutation
//!
//! A path is a list of zero-based indices. Starting from the root sibling
//! list, each index selects a node and descends into its children:
//!
//! ```text
//! []      → root
//! [0]     → root[0].children
//! [0, 2]  → root[0].children[2].children
//! ```
//!
//! `set_by_path` never edits in place. It rebuilds only the spine from the
//! root to the addressed list; every node off the spine is reused through
//! its `Arc`, so the previous root stays valid and shares all untouched
//! subtrees with the new one.

use crate::error::PathError;
use folio_model::NavNode;
use std::sync::Arc;

/// A node type that owns an ordered list of children of its own type
pub trait Branch: Sized {
    fn children(&self) -> &[Arc<Self>];

    /// Shallow copy of `self` carrying `children` instead
    fn with_children(&self, children: Vec<Arc<Self>>) -> Self;
}

impl Branch for NavNode {
    fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    fn with_children(&self, children: Vec<Arc<Self>>) -> Self {
        NavNode::with_children(self, children)
    }
}

/// Sibling list at `path`, or `None` if the path leaves the tree
pub fn get_by_path<'a, T: Branch>(root: &'a [Arc<T>], path: &[usize]) -> Option<&'a [Arc<T>]> {
    let mut level = root;
    for &index in path {
        level = level.get(index)?.children();
    }
    Some(level)
}

/// Like [`get_by_path`], reporting where the path left the tree
pub fn level_at<'a, T: Branch>(root: &'a [Arc<T>], path: &[usize]) -> Result<&'a [Arc<T>], PathError> {
    let mut level = root;
    for (depth, &index) in path.iter().enumerate() {
        level = level
            .get(index)
            .ok_or_else(|| out_of_range(path, depth, index, level.len()))?
            .children();
    }
    Ok(level)
}

/// Node at `index` of the sibling list addressed by `path`
pub fn node_at<'a, T: Branch>(root: &'a [Arc<T>], path: &[usize], index: usize) -> Result<&'a Arc<T>, PathError> {
    let level = level_at(root, path)?;
    level
        .get(index)
        .ok_or(PathError::IndexOutOfRange { index, len: level.len() })
}

/// New root with the sibling list at `path` replaced by `value`
pub fn set_by_path<T: Branch>(root: &[Arc<T>], path: &[usize], value: Vec<Arc<T>>) -> Result<Vec<Arc<T>>, PathError> {
    rebuild(root, path, 0, value)
}

/// Compute a replacement for the list at `path` and splice it in.
///
/// `f` returning `None` means the edit does not apply at this position; the
/// root is then returned with every node shared.
pub fn map_level<T, F>(root: &[Arc<T>], path: &[usize], f: F) -> Result<Vec<Arc<T>>, PathError>
where
    T: Branch,
    F: FnOnce(&[Arc<T>]) -> Result<Option<Vec<Arc<T>>>, PathError>,
{
    let level = level_at(root, path)?;
    match f(level)? {
        Some(value) => set_by_path(root, path, value),
        None => Ok(root.to_vec()),
    }
}

fn rebuild<T: Branch>(level: &[Arc<T>], path: &[usize], depth: usize, value: Vec<Arc<T>>) -> Result<Vec<Arc<T>>, PathError> {
    let Some(&index) = path.get(depth) else {
        return Ok(value);
    };

    let node = level
        .get(index)
        .ok_or_else(|| out_of_range(path, depth, index, level.len()))?;
    let children = rebuild(node.children(), path, depth + 1, value)?;

    let mut next = level.to_vec();
    next[index] = Arc::new(node.with_children(children));
    Ok(next)
}

fn out_of_range(path: &[usize], depth: usize, index: usize, len: usize) -> PathError {
    PathError::OutOfRange {
        path: path.to_vec(),
        depth,
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<Arc<NavNode>>) -> Arc<NavNode> {
        Arc::new(NavNode::new(id, id, id, format!("/{}", id)).with_children(children))
    }

    /// a(b(c), d), e(f)
    fn sample() -> Vec<Arc<NavNode>> {
        vec![
            node("a", vec![node("b", vec![node("c", vec![])]), node("d", vec![])]),
            node("e", vec![node("f", vec![])]),
        ]
    }

    fn ids(level: &[Arc<NavNode>]) -> Vec<&str> {
        level.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_get_by_path() {
        let root = sample();

        assert_eq!(ids(get_by_path(&root, &[]).unwrap()), vec!["a", "e"]);
        assert_eq!(ids(get_by_path(&root, &[0]).unwrap()), vec!["b", "d"]);
        assert_eq!(ids(get_by_path(&root, &[0, 0]).unwrap()), vec!["c"]);
        assert!(get_by_path(&root, &[0, 0, 0]).unwrap().is_empty());
        assert!(get_by_path(&root, &[2]).is_none());
        assert!(get_by_path(&root, &[0, 5, 0]).is_none());
    }

    #[test]
    fn test_set_by_path_empty_path_replaces_root() {
        let root = sample();
        let replacement = vec![node("z", vec![])];

        let next = set_by_path(&root, &[], replacement.clone()).unwrap();
        assert_eq!(ids(&next), vec!["z"]);
        assert!(Arc::ptr_eq(&next[0], &replacement[0]));
    }

    #[test]
    fn test_round_trip_is_identity() {
        let root = sample();

        for path in [vec![], vec![0], vec![1], vec![0, 0], vec![0, 1], vec![1, 0], vec![0, 0, 0]] {
            let level = get_by_path(&root, &path).unwrap().to_vec();
            let next = set_by_path(&root, &path, level).unwrap();
            assert_eq!(next, root, "round trip through {:?}", path);
        }
    }

    #[test]
    fn test_structural_sharing_off_spine() {
        let root = sample();
        let next = set_by_path(&root, &[0, 0], vec![node("x", vec![])]).unwrap();

        // Spine is rebuilt
        assert!(!Arc::ptr_eq(&next[0], &root[0]));
        assert!(!Arc::ptr_eq(&next[0].children[0], &root[0].children[0]));

        // Everything else is shared
        assert!(Arc::ptr_eq(&next[1], &root[1]));
        assert!(Arc::ptr_eq(&next[0].children[1], &root[0].children[1]));

        // Previous root untouched
        assert_eq!(ids(&root[0].children[0].children), vec!["c"]);
        assert_eq!(ids(&next[0].children[0].children), vec!["x"]);
    }

    #[test]
    fn test_set_by_path_out_of_range() {
        let root = sample();
        let err = set_by_path(&root, &[0, 4], vec![]).unwrap_err();

        assert_eq!(
            err,
            PathError::OutOfRange {
                path: vec![0, 4],
                depth: 1,
                index: 4,
                len: 2,
            }
        );
    }

    #[test]
    fn test_node_at() {
        let root = sample();
        assert_eq!(node_at(&root, &[0], 1).unwrap().id, "d");
        assert_eq!(
            node_at(&root, &[0], 2).unwrap_err(),
            PathError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_map_level_none_shares_everything() {
        let root = sample();
        let next = map_level(&root, &[0], |_| Ok(None)).unwrap();

        assert_eq!(next.len(), root.len());
        assert!(next.iter().zip(&root).all(|(a, b)| Arc::ptr_eq(a, b)));
    }
}
