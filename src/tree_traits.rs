/*
Render the column tree with termtree.

A trait keeps rendering out of the Grid's inherent API; `Display` for Grid
delegates to it.
 */
use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::application::Grid;
use crate::domain::UnitData;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeNodeConvert for Grid<T> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T>(grid: &Grid<T>, node_idx: Index, parent_tree: &mut Tree<String>) {
            for &child_idx in grid.hierarchy.children_of(node_idx) {
                if let Some(child) = grid.hierarchy.get_node(child_idx) {
                    let mut child_tree = Tree::new(node_label(grid, &child.data));
                    build_tree(grid, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        let mut tree = Tree::new(self.settings().tree_root_label.clone());
        build_tree(self, self.root, &mut tree);
        tree
    }
}

fn node_label<T>(grid: &Grid<T>, data: &UnitData<T>) -> String {
    let Some(unit) = data.unit() else {
        return grid.settings().tree_root_label.clone();
    };
    let kind = if unit.is_group() { "group" } else { "column" };
    match data.header() {
        Some(header) => format!("{} '{}' ({})", kind, grid.label(&unit), header),
        None => format!("{} '{}'", kind, grid.label(&unit)),
    }
}

impl<T> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
