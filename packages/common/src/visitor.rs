use folio_model::{Block, Column, NavNode, Row, Section};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Visitor for walking the navigation tree depth-first in array order
///
/// `depth` counts from 1 for top-level items. `path` addresses the sibling
/// list being walked, in the form accepted by [`crate::get_by_path`].
/// Returning `ControlFlow::Break` from any method stops the walk.
pub trait NavVisitor: Sized {
    type Break;

    fn visit_level(&mut self, level: &[Arc<NavNode>], path: &[usize], depth: usize) -> ControlFlow<Self::Break> {
        walk_level(self, level, path, depth)
    }

    fn visit_node(&mut self, node: &NavNode, path: &[usize], index: usize, depth: usize) -> ControlFlow<Self::Break> {
        walk_node(self, node, path, index, depth)
    }
}

/// Walk a whole menu, starting at depth 1
pub fn walk_nav<V: NavVisitor>(visitor: &mut V, root: &[Arc<NavNode>]) -> ControlFlow<V::Break> {
    visitor.visit_level(root, &[], 1)
}

pub fn walk_level<V: NavVisitor>(
    visitor: &mut V,
    level: &[Arc<NavNode>],
    path: &[usize],
    depth: usize,
) -> ControlFlow<V::Break> {
    for (index, node) in level.iter().enumerate() {
        visitor.visit_node(node, path, index, depth)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_node<V: NavVisitor>(
    visitor: &mut V,
    node: &NavNode,
    path: &[usize],
    index: usize,
    depth: usize,
) -> ControlFlow<V::Break> {
    if node.children.is_empty() {
        return ControlFlow::Continue(());
    }
    let mut child_path = Vec::with_capacity(path.len() + 1);
    child_path.extend_from_slice(path);
    child_path.push(index);
    visitor.visit_level(&node.children, &child_path, depth + 1)
}

/// Where a block sits in the layout tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPosition {
    pub section: usize,
    /// `(row, column)` for blocks inside a grid, `None` for direct section blocks
    pub cell: Option<(usize, usize)>,
    pub index: usize,
}

/// Visitor for the fixed-depth page layout tree
pub trait LayoutVisitor: Sized {
    type Break;

    fn visit_section(&mut self, section: &Section, index: usize) -> ControlFlow<Self::Break> {
        walk_section(self, section, index)
    }

    fn visit_row(&mut self, row: &Row, section: usize, index: usize) -> ControlFlow<Self::Break> {
        walk_row(self, row, section, index)
    }

    fn visit_column(&mut self, column: &Column, section: usize, row: usize, index: usize) -> ControlFlow<Self::Break> {
        walk_column(self, column, section, row, index)
    }

    fn visit_block(&mut self, _block: &Block, _position: BlockPosition) -> ControlFlow<Self::Break> {
        // Leaf node, no children to walk
        ControlFlow::Continue(())
    }
}

pub fn walk_layout<V: LayoutVisitor>(visitor: &mut V, sections: &[Arc<Section>]) -> ControlFlow<V::Break> {
    for (index, section) in sections.iter().enumerate() {
        visitor.visit_section(section, index)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_section<V: LayoutVisitor>(visitor: &mut V, section: &Section, index: usize) -> ControlFlow<V::Break> {
    for (row_index, row) in section.rows.iter().enumerate() {
        visitor.visit_row(row, index, row_index)?;
    }
    for (block_index, block) in section.blocks.iter().enumerate() {
        let position = BlockPosition {
            section: index,
            cell: None,
            index: block_index,
        };
        visitor.visit_block(block, position)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_row<V: LayoutVisitor>(visitor: &mut V, row: &Row, section: usize, index: usize) -> ControlFlow<V::Break> {
    for (column_index, column) in row.columns.iter().enumerate() {
        visitor.visit_column(column, section, index, column_index)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_column<V: LayoutVisitor>(
    visitor: &mut V,
    column: &Column,
    section: usize,
    row: usize,
    index: usize,
) -> ControlFlow<V::Break> {
    for (block_index, block) in column.blocks.iter().enumerate() {
        let position = BlockPosition {
            section,
            cell: Some((row, index)),
            index: block_index,
        };
        visitor.visit_block(block, position)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{ColumnSpan, DividerBlock};

    struct Collect(Vec<(String, Vec<usize>, usize)>);

    impl NavVisitor for Collect {
        type Break = ();

        fn visit_node(&mut self, node: &NavNode, path: &[usize], index: usize, depth: usize) -> ControlFlow<()> {
            self.0.push((node.id.clone(), path.to_vec(), depth));
            walk_node(self, node, path, index, depth)
        }
    }

    #[test]
    fn test_nav_walk_order_and_paths() {
        let c = Arc::new(NavNode::new("c", "c", "c", "/c"));
        let b = Arc::new(NavNode::new("b", "b", "b", "/b").with_children(vec![c]));
        let a = Arc::new(NavNode::new("a", "a", "a", "/a").with_children(vec![b]));
        let d = Arc::new(NavNode::new("d", "d", "d", "/d"));

        let mut collect = Collect(Vec::new());
        let flow = walk_nav(&mut collect, &[a, d]);

        assert!(flow.is_continue());
        assert_eq!(
            collect.0,
            vec![
                ("a".to_string(), vec![], 1),
                ("b".to_string(), vec![0], 2),
                ("c".to_string(), vec![0, 0], 3),
                ("d".to_string(), vec![], 1),
            ]
        );
    }

    struct FirstGridBlock;

    impl LayoutVisitor for FirstGridBlock {
        type Break = BlockPosition;

        fn visit_block(&mut self, _block: &Block, position: BlockPosition) -> ControlFlow<BlockPosition> {
            if position.cell.is_some() {
                ControlFlow::Break(position)
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    #[test]
    fn test_layout_walk_breaks_early() {
        let divider = Arc::new(Block::Divider(DividerBlock {}));
        let column = Arc::new(Column::new(ColumnSpan::default()).with_blocks(vec![divider.clone(), divider.clone()]));
        let grid = Section::new("custom-grid").with_rows(vec![Arc::new(Row::new(vec![column]))]);
        let plain = Section::new("text").with_blocks(vec![divider]);

        let flow = walk_layout(&mut FirstGridBlock, &[Arc::new(plain), Arc::new(grid)]);
        assert_eq!(
            flow,
            ControlFlow::Break(BlockPosition {
                section: 1,
                cell: Some((0, 0)),
                index: 0,
            })
        );
    }
}
