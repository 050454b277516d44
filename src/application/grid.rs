//! Grid facade: owns the column tree and the key registry
//!
//! The Grid root is a hierarchy node of its own. Top-level units are its
//! direct children; groups nest below it. Removed units are detached from
//! the tree but stay in the arena, so their handles keep answering queries.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::HierarchyArena;
use crate::config::GridSettings;
use crate::domain::{
    Attachment, Column, ColumnBase, ColumnGroup, GridError, GridId, GridResult, KeyRegistry,
    KeySlot, UnitData, ValueProvider,
};

/// Ordered tree of columns and column groups with a key registry.
pub struct Grid<T> {
    id: GridId,
    settings: GridSettings,
    pub(crate) hierarchy: HierarchyArena<UnitData<T>>,
    pub(crate) root: Index,
    pub(crate) registry: KeyRegistry,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .field("hierarchy", &self.hierarchy)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<T> Grid<T> {
    pub fn new() -> Self {
        Self::with_settings(GridSettings::default())
    }

    pub fn with_settings(settings: GridSettings) -> Self {
        let mut hierarchy = HierarchyArena::new();
        let root = hierarchy.insert(UnitData::Root);
        Self {
            id: GridId::new(),
            settings,
            hierarchy,
            root,
            registry: KeyRegistry::new(),
        }
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Creates a column projecting records through `provider` and attaches
    /// it as the last top-level unit.
    #[instrument(level = "debug", skip_all)]
    pub fn add_column<V, F>(&mut self, provider: F) -> Column
    where
        F: Fn(&T) -> V + 'static,
        V: ToString,
    {
        let grid = self.id;
        let key = KeySlot::default();
        let node_key = key.clone();
        let provider: ValueProvider<T> = Box::new(move |item| provider(item).to_string());

        let idx = self.hierarchy.insert_node(Some(self.root), move |idx| UnitData::Column {
            handle: Column::new(grid, idx, node_key),
            header: None,
            provider,
        });
        debug!(?idx, "added column");
        Column::new(grid, idx, key)
    }

    /// Binds a unique key to an attached unit of this Grid. Keys are write-once.
    #[instrument(level = "debug", skip(self, unit))]
    pub fn set_key(&mut self, unit: impl Into<ColumnBase>, key: &str) -> GridResult<()> {
        let unit = unit.into();
        if !self.owns(&unit) {
            return Err(GridError::NotPartOfGrid(self.label(&unit)));
        }
        if let Some(current) = unit.key() {
            return Err(GridError::KeyAlreadySet {
                current: current.to_string(),
                requested: key.to_string(),
            });
        }
        if !self.is_attached(&unit) {
            return Err(GridError::NotPartOfGrid(self.label(&unit)));
        }

        self.registry.bind(&unit, key)?;
        debug!(key, "bound key");
        Ok(())
    }

    /// Sets the header text of a column or group; replaces any previous header.
    pub fn set_header(
        &mut self,
        unit: impl Into<ColumnBase>,
        header: impl Into<String>,
    ) -> GridResult<()> {
        let unit = unit.into();
        if !self.owns(&unit) {
            return Err(GridError::NotPartOfGrid(self.label(&unit)));
        }
        if let Some(slot) = self
            .hierarchy
            .get_node_mut(unit.index())
            .and_then(|node| node.data.header_mut())
        {
            *slot = Some(header.into());
        }
        Ok(())
    }

    pub fn header(&self, unit: impl Into<ColumnBase>) -> Option<&str> {
        let unit = unit.into();
        if !self.owns(&unit) {
            return None;
        }
        self.hierarchy
            .get_node(unit.index())
            .and_then(|node| node.data.header())
    }

    /// Evaluates the column's value provider for `item`.
    pub fn column_value(&self, column: &Column, item: &T) -> GridResult<String> {
        let unit = ColumnBase::from(column);
        match self.hierarchy.get_node(column.index()).map(|node| &node.data) {
            Some(UnitData::Column { provider, .. }) if self.owns(&unit) => Ok(provider(item)),
            _ => Err(GridError::NotPartOfGrid(self.label(&unit))),
        }
    }

    pub fn column_by_key(&self, key: &str) -> Option<ColumnBase> {
        self.registry.get(key).cloned()
    }

    /// Units directly attached to the Grid root, in display order.
    pub fn top_level_columns(&self) -> Vec<ColumnBase> {
        self.hierarchy
            .children_of(self.root)
            .iter()
            .filter_map(|&idx| self.unit_at(idx))
            .collect()
    }

    /// All leaf columns, depth-first and left to right.
    pub fn columns(&self) -> Vec<Column> {
        self.hierarchy
            .iter(self.root)
            .filter_map(|(_, node)| match &node.data {
                UnitData::Column { handle, .. } => Some(handle.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.hierarchy
            .iter(self.root)
            .filter(|(_, node)| matches!(node.data, UnitData::Column { .. }))
            .count()
    }

    /// Nesting levels below the root: 0 when empty, 1 without groups.
    pub fn depth(&self) -> usize {
        self.hierarchy.depth(self.root).saturating_sub(1)
    }

    /// Immediate children of `group`, in merge order.
    ///
    /// Works for removed groups too; a group of another Grid yields nothing.
    pub fn child_columns(&self, group: &ColumnGroup) -> Vec<ColumnBase> {
        if !self.owns(&ColumnBase::from(group)) {
            return Vec::new();
        }
        self.hierarchy
            .children_of(group.index())
            .iter()
            .filter_map(|&idx| self.unit_at(idx))
            .collect()
    }

    /// Current parent of `unit`. Units of other Grids report `Detached`.
    pub fn attachment(&self, unit: impl Into<ColumnBase>) -> Attachment {
        let unit = unit.into();
        if !self.owns(&unit) {
            return Attachment::Detached;
        }
        match self.hierarchy.parent_of(unit.index()) {
            Some(parent) if parent == self.root => Attachment::Grid,
            Some(parent) => match self.unit_at(parent) {
                Some(ColumnBase::Group(group)) => Attachment::Group(group),
                _ => Attachment::Detached,
            },
            None => Attachment::Detached,
        }
    }

    /// The top-level unit containing `unit` (possibly `unit` itself).
    pub fn top_level_ancestor(&self, unit: impl Into<ColumnBase>) -> Option<ColumnBase> {
        let unit = unit.into();
        if !self.is_attached(&unit) {
            return None;
        }
        let mut current = unit.index();
        for ancestor in self.hierarchy.ancestors(unit.index()) {
            if ancestor == self.root {
                break;
            }
            current = ancestor;
        }
        self.unit_at(current)
    }

    /// True if `unit` is reachable from this Grid's root.
    pub fn is_attached(&self, unit: &ColumnBase) -> bool {
        self.owns(unit)
            && unit.index() != self.root
            && self.hierarchy.is_ancestor_of(self.root, unit.index())
    }

    /// Created by this Grid, whether attached or not.
    pub(crate) fn owns(&self, unit: &ColumnBase) -> bool {
        unit.grid_id() == self.id && self.hierarchy.contains(unit.index())
    }

    pub(crate) fn unit_at(&self, idx: Index) -> Option<ColumnBase> {
        self.hierarchy.get_node(idx).and_then(|node| node.data.unit())
    }

    /// Name used for `unit` in messages.
    pub(crate) fn label(&self, unit: &ColumnBase) -> String {
        unit.key()
            .unwrap_or(self.settings.unkeyed_label.as_str())
            .to_string()
    }
}
