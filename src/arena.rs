use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::errors::{HierarchyError, HierarchyResult};

/// Node in the arena-based hierarchy.
#[derive(Debug)]
pub struct HierarchyNode<D> {
    /// Payload attached to this node
    pub data: D,
    /// Index of parent node in the arena, None while detached
    parent: Option<Index>,
    /// Indices of child nodes in the arena, in display order
    children: Vec<Index>,
}

impl<D> HierarchyNode<D> {
    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }
}

/// Arena-backed tree with bidirectional navigation.
///
/// Nodes are never freed: detaching a node only cuts the edge to its parent,
/// so indices handed out by [`HierarchyArena::insert`] stay valid for the
/// lifetime of the arena. A node may be the root of any number of detached
/// subtrees.
#[derive(Debug)]
pub struct HierarchyArena<D> {
    arena: Arena<HierarchyNode<D>>,
}

impl<D> Default for HierarchyArena<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> HierarchyArena<D> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Insert a detached node.
    pub fn insert(&mut self, data: D) -> Index {
        self.insert_node(None, |_| data)
    }

    /// Insert a node as the last child of `parent`, or detached for `None`.
    ///
    /// `create` receives the new node's index, for payloads that refer to
    /// their own node. An unknown `parent` leaves the node detached.
    #[instrument(level = "trace", skip(self, create))]
    pub fn insert_node(&mut self, parent: Option<Index>, create: impl FnOnce(Index) -> D) -> Index {
        let node_idx = self.arena.insert_with(|idx| HierarchyNode {
            data: create(idx),
            parent: None,
            children: Vec::new(),
        });

        if let Some(parent_idx) = parent {
            if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                parent_node.children.push(node_idx);
                if let Some(node) = self.arena.get_mut(node_idx) {
                    node.parent = Some(parent_idx);
                }
            }
        }

        node_idx
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get_node(&self, idx: Index) -> Option<&HierarchyNode<D>> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut HierarchyNode<D>> {
        self.arena.get_mut(idx)
    }

    fn node(&self, idx: Index) -> HierarchyResult<&HierarchyNode<D>> {
        self.arena.get(idx).ok_or(HierarchyError::InvalidNode(idx))
    }

    pub fn parent_of(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|n| n.parent)
    }

    /// Children of `idx`; empty for unknown nodes.
    pub fn children_of(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of `idx` among its parent's children.
    pub fn position_of(&self, idx: Index) -> Option<usize> {
        let parent = self.parent_of(idx)?;
        self.children_of(parent).iter().position(|&c| c == idx)
    }

    /// Places `child` under `parent` at `position`, detaching it from its
    /// current parent first. `position == children.len()` appends.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index, position: usize) -> HierarchyResult<()> {
        self.node(parent)?;
        let current_parent = self.node(child)?.parent;
        if self.is_ancestor_of(child, parent) {
            return Err(HierarchyError::CircularParentage { parent, child });
        }

        let mut len = self.children_of(parent).len();
        if current_parent == Some(parent) {
            len -= 1;
        }
        if position > len {
            return Err(HierarchyError::PositionOutOfBounds { position, len });
        }

        self.detach(child)?;
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.insert(position, child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
        Ok(())
    }

    /// Places `child` as the last child of `parent`.
    pub fn append(&mut self, parent: Index, child: Index) -> HierarchyResult<()> {
        let mut end = self.children_of(parent).len();
        if self.parent_of(child) == Some(parent) {
            end -= 1;
        }
        self.attach(parent, child, end)
    }

    /// Removes `child` from its parent and returns the position it held.
    ///
    /// Detaching an already detached node is a no-op returning `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, child: Index) -> HierarchyResult<Option<usize>> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(None);
        };

        let position = match self.arena.get_mut(parent) {
            Some(parent_node) => {
                let position = parent_node.children.iter().position(|&c| c == child);
                if let Some(pos) = position {
                    parent_node.children.remove(pos);
                }
                position
            }
            None => None,
        };
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = None;
        }
        Ok(position)
    }

    /// Walks parent links upwards, starting with the parent of `idx`.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_, D> {
        Ancestors {
            arena: self,
            current: self.parent_of(idx),
        }
    }

    /// True if `ancestor` is `idx` itself or lies on its parent chain.
    pub fn is_ancestor_of(&self, ancestor: Index, idx: Index) -> bool {
        idx == ancestor || self.ancestors(idx).any(|a| a == ancestor)
    }

    /// Topmost node on the parent chain of `idx` (`idx` itself when detached).
    pub fn root_of(&self, idx: Index) -> Index {
        self.ancestors(idx).last().unwrap_or(idx)
    }

    /// Pre-order, left-to-right traversal of the subtree rooted at `start`.
    pub fn iter(&self, start: Index) -> TreeIterator<'_, D> {
        TreeIterator::new(self, start)
    }

    /// Post-order traversal: children before their parent.
    pub fn iter_postorder(&self, start: Index) -> PostOrderIterator<'_, D> {
        PostOrderIterator::new(self, start)
    }

    /// Nodes without children below `start`, left to right.
    #[instrument(level = "trace", skip(self))]
    pub fn leaves(&self, start: Index) -> Vec<Index> {
        self.iter(start)
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of levels in the subtree rooted at `start` (a lone node has depth 1).
    pub fn depth(&self, start: Index) -> usize {
        match self.get_node(start) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }
}

pub struct Ancestors<'a, D> {
    arena: &'a HierarchyArena<D>,
    current: Option<Index>,
}

impl<D> Iterator for Ancestors<'_, D> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.arena.parent_of(current);
        Some(current)
    }
}

pub struct TreeIterator<'a, D> {
    arena: &'a HierarchyArena<D>,
    stack: Vec<Index>,
}

impl<'a, D> TreeIterator<'a, D> {
    fn new(arena: &'a HierarchyArena<D>, start: Index) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push(start);
        }
        Self { arena, stack }
    }
}

impl<'a, D> Iterator for TreeIterator<'a, D> {
    type Item = (Index, &'a HierarchyNode<D>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, D> {
    arena: &'a HierarchyArena<D>,
    stack: Vec<(Index, bool)>,
}

impl<'a, D> PostOrderIterator<'a, D> {
    fn new(arena: &'a HierarchyArena<D>, start: Index) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push((start, false));
        }
        Self { arena, stack }
    }
}

impl<'a, D> Iterator for PostOrderIterator<'a, D> {
    type Item = (Index, &'a HierarchyNode<D>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
