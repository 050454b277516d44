//! Removal engine: detaches units and prunes groups left without children

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::application::Grid;
use crate::domain::{ColumnBase, GridError, GridResult};

impl<T> Grid<T> {
    /// Removes a column or group from wherever it sits in this Grid.
    ///
    /// Ancestor groups emptied by the removal are detached as well, up to the
    /// first ancestor that keeps at least one child. Keys of every detached
    /// unit are released.
    ///
    /// # Errors
    /// * `NullArgument` - `column` is `None`
    /// * `NotPartOfGrid` - the unit belongs to another Grid or was removed
    #[instrument(level = "debug", skip_all)]
    pub fn remove_column<C>(&mut self, column: Option<C>) -> GridResult<()>
    where
        C: Into<ColumnBase>,
    {
        let unit = column
            .map(Into::into)
            .ok_or(GridError::NullArgument { argument: "column" })?;
        if !self.is_attached(&unit) {
            return Err(GridError::NotPartOfGrid(self.label(&unit)));
        }
        self.detach_and_prune(unit.index())
    }

    /// Removes the unit bound to `column_key`, see [`Grid::remove_column`].
    ///
    /// # Errors
    /// * `NullArgument` - `column_key` is `None`
    /// * `NotPartOfGrid` - no unit is bound to the key
    #[instrument(level = "debug", skip(self))]
    pub fn remove_column_by_key(&mut self, column_key: Option<&str>) -> GridResult<()> {
        let key = column_key.ok_or(GridError::NullArgument {
            argument: "columnKey",
        })?;
        let unit = self
            .registry
            .get(key)
            .filter(|unit| self.is_attached(unit))
            .cloned()
            .ok_or_else(|| GridError::NotPartOfGrid(key.to_string()))?;
        self.detach_and_prune(unit.index())
    }

    fn detach_and_prune(&mut self, target: Index) -> GridResult<()> {
        let mut parent = self.hierarchy.parent_of(target);
        self.hierarchy.detach(target)?;
        self.unregister_subtree(target);
        debug!(?target, "removed unit");

        while let Some(group) = parent {
            if group == self.root || !self.hierarchy.children_of(group).is_empty() {
                break;
            }
            parent = self.hierarchy.parent_of(group);
            self.hierarchy.detach(group)?;
            self.unregister_subtree(group);
            debug!(?group, "pruned empty group");
        }
        Ok(())
    }

    /// Releases the keys of `start` and everything nested below it.
    fn unregister_subtree(&mut self, start: Index) {
        let units: Vec<ColumnBase> = self
            .hierarchy
            .iter_postorder(start)
            .filter_map(|(_, node)| node.data.unit())
            .collect();
        for unit in &units {
            if self.registry.unregister(unit) {
                trace!(key = ?unit.key(), "released key");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::application::Grid;
    use crate::domain::{Attachment, Column, ColumnBase, ErrorKind};

    #[test]
    fn given_nested_chain_when_last_leaf_removed_then_every_group_pruned() {
        let mut grid: Grid<String> = Grid::new();
        let a = grid.add_column(|s: &String| s.clone());
        let b = grid.add_column(|s: &String| s.clone());
        let inner = grid.merge_columns([&a, &b]).unwrap();
        let c = grid.add_column(|s: &String| s.clone());
        let outer = grid.merge_columns([ColumnBase::from(&inner), ColumnBase::from(&c)]).unwrap();
        grid.set_key(&outer, "outer").unwrap();

        grid.remove_column(Some(&c)).unwrap();
        assert_eq!(grid.attachment(&outer), Attachment::Grid);

        grid.remove_column(Some(&a)).unwrap();
        grid.remove_column(Some(&b)).unwrap();

        assert!(grid.top_level_columns().is_empty());
        assert_eq!(grid.attachment(&inner), Attachment::Detached);
        assert_eq!(grid.attachment(&outer), Attachment::Detached);
        assert!(grid.child_columns(&outer).is_empty());
        assert_eq!(grid.column_by_key("outer"), None);
    }

    #[test]
    fn given_none_when_removing_then_null_argument() {
        let mut grid: Grid<String> = Grid::new();

        let err = grid.remove_column(None::<&Column>).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);
        assert_eq!(err.to_string(), "column should not be null");

        let err = grid.remove_column_by_key(None).unwrap_err();
        assert_eq!(err.to_string(), "columnKey should not be null");
    }
}
