//! Merge engine: folds top-level units into a new group

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::Grid;
use crate::domain::{ColumnBase, ColumnGroup, GridError, GridResult, KeySlot, UnitData};

impl<T> Grid<T> {
    /// Merges top-level units into a new group.
    ///
    /// The group's children are the given units in the order passed. The
    /// group takes the slot the first unit held among the top-level units that
    /// remain, so siblings keep their relative order. Leaves are never
    /// reordered, only re-parented.
    ///
    /// # Errors
    /// * `NotPartOfGrid` - a unit belongs to another Grid or was removed
    /// * `AlreadyMerged` - a unit is nested inside a group
    /// * `DuplicateMergeMember` - a unit is listed twice
    /// * `MergeArity` - fewer units than the configured minimum (at least two)
    #[instrument(level = "debug", skip_all)]
    pub fn merge_columns<I>(&mut self, units: I) -> GridResult<ColumnGroup>
    where
        I: IntoIterator,
        I::Item: Into<ColumnBase>,
    {
        let units: Vec<ColumnBase> = units.into_iter().map(Into::into).collect();
        self.validate_merge(&units)?;

        let positions: Vec<usize> = units
            .iter()
            .filter_map(|unit| self.hierarchy.position_of(unit.index()))
            .collect();
        let first_position = positions.first().copied().unwrap_or(0);
        let preceding = positions.iter().filter(|&&p| p < first_position).count();
        let insert_at = first_position - preceding;

        let grid = self.id();
        let key = KeySlot::default();
        let node_key = key.clone();
        let group_idx = self.hierarchy.insert_node(None, move |idx| UnitData::Group {
            handle: ColumnGroup::new(grid, idx, node_key),
            header: None,
        });

        for unit in &units {
            self.hierarchy.append(group_idx, unit.index())?;
        }
        self.hierarchy.attach(self.root, group_idx, insert_at)?;

        debug!(
            ?group_idx,
            members = units.len(),
            position = insert_at,
            "merged columns"
        );
        Ok(ColumnGroup::new(grid, group_idx, key))
    }

    /// Checks run before the tree is touched, in this order: membership,
    /// nesting, duplicates, arity.
    fn validate_merge(&self, units: &[ColumnBase]) -> GridResult<()> {
        for unit in units {
            if !self.is_attached(unit) {
                return Err(GridError::NotPartOfGrid(self.label(unit)));
            }
            if self.hierarchy.parent_of(unit.index()) != Some(self.root) {
                return Err(GridError::AlreadyMerged(self.label(unit)));
            }
        }

        if let Some(duplicate) = units.iter().duplicates().next() {
            return Err(GridError::DuplicateMergeMember(self.label(duplicate)));
        }

        let required = self.settings().merge_arity();
        if units.len() < required {
            return Err(GridError::MergeArity {
                required,
                given: units.len(),
            });
        }
        Ok(())
    }
}
