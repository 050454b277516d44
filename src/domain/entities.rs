//! Domain entities: column handles and the payload of hierarchy nodes

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use generational_arena::Index;
use uuid::Uuid;

/// Identity of one [`Grid`](crate::application::Grid) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(Uuid);

impl GridId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Write-once key cell shared by every handle of one unit.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeySlot(Rc<OnceCell<String>>);

impl KeySlot {
    pub(crate) fn get(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }

    /// Fails with the current key when one is already set.
    pub(crate) fn set(&self, key: String) -> Result<(), String> {
        match self.0.get() {
            Some(current) => Err(current.clone()),
            None => self.0.set(key),
        }
    }
}

macro_rules! unit_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            grid: GridId,
            index: Index,
            key: KeySlot,
        }

        impl $name {
            pub(crate) fn new(grid: GridId, index: Index, key: KeySlot) -> Self {
                Self { grid, index, key }
            }

            /// The key bound to this unit, if any. Stays readable after removal.
            pub fn key(&self) -> Option<&str> {
                self.key.get()
            }

            /// The Grid that created this unit.
            pub fn grid_id(&self) -> GridId {
                self.grid
            }

            pub(crate) fn index(&self) -> Index {
                self.index
            }

            pub(crate) fn key_slot(&self) -> &KeySlot {
                &self.key
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.grid == other.grid && self.index == other.index
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.grid.hash(state);
                self.index.hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("index", &self.index)
                    .field("key", &self.key())
                    .finish()
            }
        }
    };
}

unit_handle!(
    /// A leaf column producing a value from each source record.
    Column
);

unit_handle!(
    /// A non-leaf unit formed by merging top-level units.
    ColumnGroup
);

/// Either kind of unit: what merge and removal operate on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnBase {
    Column(Column),
    Group(ColumnGroup),
}

impl ColumnBase {
    pub(crate) fn key_slot(&self) -> &KeySlot {
        match self {
            Self::Column(c) => c.key_slot(),
            Self::Group(g) => g.key_slot(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key_slot().get()
    }

    pub fn grid_id(&self) -> GridId {
        match self {
            Self::Column(c) => c.grid_id(),
            Self::Group(g) => g.grid_id(),
        }
    }

    pub(crate) fn index(&self) -> Index {
        match self {
            Self::Column(c) => c.index(),
            Self::Group(g) => g.index(),
        }
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(c) => Some(c),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ColumnGroup> {
        match self {
            Self::Group(g) => Some(g),
            Self::Column(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl From<Column> for ColumnBase {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<&Column> for ColumnBase {
    fn from(column: &Column) -> Self {
        Self::Column(column.clone())
    }
}

impl From<ColumnGroup> for ColumnBase {
    fn from(group: ColumnGroup) -> Self {
        Self::Group(group)
    }
}

impl From<&ColumnGroup> for ColumnBase {
    fn from(group: &ColumnGroup) -> Self {
        Self::Group(group.clone())
    }
}

impl From<&ColumnBase> for ColumnBase {
    fn from(unit: &ColumnBase) -> Self {
        unit.clone()
    }
}

impl PartialEq<Column> for ColumnBase {
    fn eq(&self, other: &Column) -> bool {
        self.as_column() == Some(other)
    }
}

impl PartialEq<ColumnGroup> for ColumnBase {
    fn eq(&self, other: &ColumnGroup) -> bool {
        self.as_group() == Some(other)
    }
}

/// Where a unit currently hangs in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Top-level unit, directly below the Grid root.
    Grid,
    /// Nested inside a group.
    Group(ColumnGroup),
    /// Removed, or inside a removed group.
    Detached,
}

/// Projects a source record to the value shown in a column.
pub type ValueProvider<T> = Box<dyn Fn(&T) -> String>;

/// Payload of a hierarchy node owned by a Grid.
pub(crate) enum UnitData<T> {
    Root,
    Column {
        handle: Column,
        header: Option<String>,
        provider: ValueProvider<T>,
    },
    Group {
        handle: ColumnGroup,
        header: Option<String>,
    },
}

impl<T> UnitData<T> {
    pub(crate) fn unit(&self) -> Option<ColumnBase> {
        match self {
            Self::Root => None,
            Self::Column { handle, .. } => Some(ColumnBase::Column(handle.clone())),
            Self::Group { handle, .. } => Some(ColumnBase::Group(handle.clone())),
        }
    }

    pub(crate) fn header(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Column { header, .. } | Self::Group { header, .. } => header.as_deref(),
        }
    }

    pub(crate) fn header_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Root => None,
            Self::Column { header, .. } | Self::Group { header, .. } => Some(header),
        }
    }
}

impl<T> fmt::Debug for UnitData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "Root"),
            Self::Column { handle, header, .. } => f
                .debug_struct("Column")
                .field("handle", handle)
                .field("header", header)
                .finish_non_exhaustive(),
            Self::Group { handle, header } => f
                .debug_struct("Group")
                .field("handle", handle)
                .field("header", header)
                .finish(),
        }
    }
}
