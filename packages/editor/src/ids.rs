//! # Node Identifiers
//!
//! Ids are `<seed>-<n>`: the seed is the CRC32 of the menu name, `n` a
//! counter. Generation is a pure function of the generator state and the set
//! of ids already in use, so repairing the same document twice yields the
//! same ids.

use crc32fast::Hasher;
use folio_common::{walk_nav, NavVisitor};
use folio_model::{NavNode, NodeId};
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Seed for a menu's ids, derived from its name
pub fn menu_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"menu://");
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn for_menu(name: &str) -> Self {
        Self::from_seed(menu_seed(name))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next id not contained in `taken`
    pub fn next_unused(&mut self, taken: &HashSet<NodeId>) -> NodeId {
        loop {
            self.count += 1;
            let id = format!("{}-{}", self.seed, self.count);
            if !taken.contains(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

/// Generator paired with every id that must not be handed out again
#[derive(Debug, Clone)]
pub struct IdAllocator {
    generator: IdGenerator,
    taken: HashSet<NodeId>,
}

impl IdAllocator {
    pub fn new(generator: IdGenerator, taken: HashSet<NodeId>) -> Self {
        Self { generator, taken }
    }

    /// Allocator that avoids every id present in `root`
    pub fn for_tree(generator: IdGenerator, root: &[Arc<NavNode>]) -> Self {
        Self::new(generator, collect_ids(root))
    }

    /// Fresh id, recorded as taken
    pub fn fresh(&mut self) -> NodeId {
        let id = self.generator.next_unused(&self.taken);
        self.taken.insert(id.clone());
        id
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }
}

struct IdCollector(HashSet<NodeId>);

impl NavVisitor for IdCollector {
    type Break = ();

    fn visit_node(&mut self, node: &NavNode, path: &[usize], index: usize, depth: usize) -> ControlFlow<()> {
        if !node.id.is_empty() {
            self.0.insert(node.id.clone());
        }
        folio_common::walk_node(self, node, path, index, depth)
    }
}

/// Every non-empty id in the tree
pub fn collect_ids(root: &[Arc<NavNode>]) -> HashSet<NodeId> {
    let mut collector = IdCollector(HashSet::new());
    let _ = walk_nav(&mut collector, root);
    collector.0
}

/// Result of [`repair_ids`]
#[derive(Debug, Clone)]
pub struct IdRepair {
    pub items: Vec<Arc<NavNode>>,
    /// Number of nodes that received a new id
    pub reassigned: usize,
    /// Allocator primed with every id now in the tree
    pub allocator: IdAllocator,
}

/// Give every node with a missing or repeated id a fresh one.
///
/// Nodes are visited depth-first in array order; the first holder of an id
/// keeps it. Fresh ids avoid every id present anywhere in the input, so a
/// repair never takes an id a later node already owns. Sibling order is
/// untouched and subtrees without repairs are shared with the input.
pub fn repair_ids(root: &[Arc<NavNode>], generator: IdGenerator) -> IdRepair {
    let mut allocator = IdAllocator::for_tree(generator, root);
    let mut seen = HashSet::new();
    let mut reassigned = 0;

    let items = repair_level(root, &mut allocator, &mut seen, &mut reassigned).unwrap_or_else(|| root.to_vec());

    IdRepair {
        items,
        reassigned,
        allocator,
    }
}

fn repair_level(
    level: &[Arc<NavNode>],
    allocator: &mut IdAllocator,
    seen: &mut HashSet<NodeId>,
    reassigned: &mut usize,
) -> Option<Vec<Arc<NavNode>>> {
    let mut next: Option<Vec<Arc<NavNode>>> = None;

    for (index, node) in level.iter().enumerate() {
        let needs_id = node.id.is_empty() || seen.contains(&node.id);
        let id = if needs_id {
            *reassigned += 1;
            allocator.fresh()
        } else {
            node.id.clone()
        };
        seen.insert(id.clone());

        let children = repair_level(&node.children, allocator, seen, reassigned);

        if needs_id || children.is_some() {
            let mut repaired = node.with_children(children.unwrap_or_else(|| node.children.clone()));
            repaired.id = id;
            next.get_or_insert_with(|| level.to_vec())[index] = Arc::new(repaired);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<Arc<NavNode>>) -> Arc<NavNode> {
        Arc::new(NavNode::new(id, "Item", "عنصر", "/").with_children(children))
    }

    fn all_ids(root: &[Arc<NavNode>]) -> Vec<String> {
        let mut out = Vec::new();
        for n in root {
            out.push(n.id.clone());
            out.extend(all_ids(&n.children));
        }
        out
    }

    #[test]
    fn test_seed_is_stable_per_menu() {
        assert_eq!(menu_seed("main"), menu_seed("main"));
        assert_ne!(menu_seed("main"), menu_seed("footer"));
    }

    #[test]
    fn test_sequential_ids_skip_taken() {
        let mut gen = IdGenerator::from_seed("m");
        let taken: HashSet<NodeId> = ["m-2".to_string()].into_iter().collect();

        assert_eq!(gen.next_unused(&taken), "m-1");
        assert_eq!(gen.next_unused(&taken), "m-3");
    }

    #[test]
    fn test_allocator_never_repeats() {
        let root = vec![node("m-1", vec![])];
        let mut ids = IdAllocator::for_tree(IdGenerator::from_seed("m"), &root);

        let a = ids.fresh();
        let b = ids.fresh();
        assert_eq!(a, "m-2");
        assert_eq!(b, "m-3");
        assert!(ids.is_taken("m-1"));
    }

    #[test]
    fn test_repair_assigns_missing_and_duplicate_ids_in_tree_order() {
        // "", dup "x" (second holder), and an id the generator would produce first
        let root = vec![
            node("x", vec![node("", vec![])]),
            node("x", vec![]),
            node("m-1", vec![]),
        ];

        let repair = repair_ids(&root, IdGenerator::from_seed("m"));
        assert_eq!(repair.reassigned, 2);
        assert_eq!(all_ids(&repair.items), vec!["x", "m-2", "m-3", "m-1"]);
    }

    #[test]
    fn test_repair_is_deterministic() {
        let root = vec![node("", vec![node("", vec![])]), node("", vec![])];

        let first = repair_ids(&root, IdGenerator::from_seed("m"));
        let second = repair_ids(&root, IdGenerator::from_seed("m"));
        assert_eq!(first.items, second.items);
    }

    #[test]
    fn test_repair_shares_clean_subtrees() {
        let clean = node("a", vec![node("b", vec![])]);
        let root = vec![clean.clone(), node("", vec![])];

        let repair = repair_ids(&root, IdGenerator::from_seed("m"));
        assert!(Arc::ptr_eq(&repair.items[0], &clean));
        assert_eq!(repair.items[1].id, "m-1");
        assert!(repair.allocator.is_taken("m-1"));
    }

    #[test]
    fn test_repair_of_clean_tree_changes_nothing() {
        let root = vec![node("a", vec![]), node("b", vec![])];
        let repair = repair_ids(&root, IdGenerator::from_seed("m"));

        assert_eq!(repair.reassigned, 0);
        assert!(repair.items.iter().zip(&root).all(|(a, b)| Arc::ptr_eq(a, b)));
    }
}
