//! Integration tests for rendering the column tree.

use colgrid::util::testing;
use colgrid::{ColumnBase, Grid, GridSettings, TreeNodeConvert};

#[test]
fn given_nested_groups_when_displayed_then_renders_hierarchy() {
    testing::init_test_setup();
    let mut grid: Grid<String> = Grid::with_settings(GridSettings {
        tree_root_label: "people".into(),
        ..GridSettings::default()
    });
    let first = grid.add_column(|s: &String| s.clone());
    let last = grid.add_column(|s: &String| s.clone());
    let age = grid.add_column(|s: &String| s.len());
    grid.set_key(&first, "first").unwrap();
    grid.set_key(&last, "last").unwrap();
    grid.set_key(&age, "age").unwrap();
    grid.set_header(&age, "Age").unwrap();
    let name = grid.merge_columns([&first, &last]).unwrap();
    grid.set_key(&name, "name").unwrap();
    grid.set_header(&name, "Name").unwrap();

    let rendered = grid.to_string();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "people");
    assert!(lines[1].ends_with("group 'name' (Name)"));
    assert!(lines[2].ends_with("column 'first'"));
    assert!(lines[3].ends_with("column 'last'"));
    assert!(lines[4].ends_with("column 'age' (Age)"));
    assert_eq!(lines.len(), 5);
}

#[test]
fn given_removed_group_when_rendering_then_group_is_gone() {
    testing::init_test_setup();
    let mut grid: Grid<String> = Grid::new();
    let a = grid.add_column(|s: &String| s.clone());
    let b = grid.add_column(|s: &String| s.clone());
    let group = grid.merge_columns([&a, &b]).unwrap();

    grid.remove_column(Some(ColumnBase::from(&group))).unwrap();

    let tree = grid.to_tree_string();
    assert_eq!(tree.root, "Grid");
    assert!(tree.leaves.is_empty());
}
