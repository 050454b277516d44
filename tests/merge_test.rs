//! Integration tests for merge ordering, arity and nesting rules.

use rstest::rstest;

use colgrid::util::testing;
use colgrid::{ColumnBase, ErrorKind, Grid, GridError, GridSettings};

fn grid_with(n: usize) -> (Grid<usize>, Vec<ColumnBase>) {
    testing::init_test_setup();
    let mut grid = Grid::new();
    let columns = (0..n)
        .map(|i| ColumnBase::from(grid.add_column(move |row: &usize| row * 10 + i)))
        .collect();
    (grid, columns)
}

fn leaf_values(grid: &Grid<usize>, row: usize) -> Vec<String> {
    grid.columns()
        .iter()
        .map(|column| grid.column_value(column, &row).unwrap())
        .collect()
}

// ============================================================
// Placement
// ============================================================

#[rstest]
#[case(&[0, 1], &[None, Some(2), Some(3), Some(4)])]
#[case(&[1, 3], &[Some(0), None, Some(2), Some(4)])]
#[case(&[3, 1], &[Some(0), Some(2), None, Some(4)])]
#[case(&[4, 0, 2], &[Some(1), Some(3), None])]
fn given_members_when_merging_then_group_replaces_first_member(
    #[case] members: &[usize],
    #[case] expected: &[Option<usize>],
) {
    let (mut grid, cols) = grid_with(5);

    let group = grid.merge_columns(members.iter().map(|&i| &cols[i])).unwrap();

    let expected: Vec<ColumnBase> = expected
        .iter()
        .map(|slot| match slot {
            Some(i) => cols[*i].clone(),
            None => ColumnBase::from(&group),
        })
        .collect();
    assert_eq!(grid.top_level_columns(), expected);
    let children: Vec<ColumnBase> = members.iter().map(|&i| cols[i].clone()).collect();
    assert_eq!(grid.child_columns(&group), children);
}

#[test]
fn given_merges_when_nesting_then_leaves_follow_top_level_order() {
    let (mut grid, cols) = grid_with(4);

    let left = grid.merge_columns([&cols[2], &cols[0]]).unwrap();
    let right = grid.merge_columns([&cols[3], &cols[1]]).unwrap();
    let all = grid
        .merge_columns([ColumnBase::from(&right), ColumnBase::from(&left)])
        .unwrap();

    assert_eq!(grid.top_level_columns(), vec![ColumnBase::from(&all)]);
    assert_eq!(leaf_values(&grid, 1), vec!["13", "11", "12", "10"]);
    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.depth(), 3);
}

// ============================================================
// Rejections
// ============================================================

#[rstest]
#[case(0)]
#[case(1)]
fn given_too_few_members_when_merging_then_arity_error(#[case] given: usize) {
    let (mut grid, cols) = grid_with(3);

    let err = grid.merge_columns(&cols[..given]).unwrap_err();

    assert_eq!(err, GridError::MergeArity { required: 2, given });
    assert_eq!(grid.top_level_columns(), cols);
}

#[test]
fn given_repeated_member_when_merging_then_rejected() {
    let (mut grid, cols) = grid_with(3);

    let err = grid
        .merge_columns([&cols[0], &cols[1], &cols[0]])
        .unwrap_err();

    assert!(matches!(err, GridError::DuplicateMergeMember(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(grid.top_level_columns(), cols);
}

#[test]
fn given_nested_group_when_merging_then_already_merged() {
    let (mut grid, cols) = grid_with(4);
    let inner = grid.merge_columns([&cols[0], &cols[1]]).unwrap();
    grid.merge_columns([ColumnBase::from(&inner), cols[2].clone()])
        .unwrap();

    let err = grid
        .merge_columns([ColumnBase::from(&inner), cols[3].clone()])
        .unwrap_err();

    assert!(matches!(err, GridError::AlreadyMerged(_)));
}

#[test]
fn given_removed_column_when_merging_then_not_part_of_grid() {
    let (mut grid, cols) = grid_with(3);
    grid.remove_column(Some(&cols[0])).unwrap();

    let err = grid.merge_columns([&cols[0], &cols[1]]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The column with key '<unkeyed>' is not part of this Grid"
    );
}

#[test]
fn given_raised_arity_when_merging_pair_then_rejected() {
    testing::init_test_setup();
    let settings = GridSettings {
        min_merge_arity: 3,
        ..GridSettings::default()
    };
    let mut grid: Grid<usize> = Grid::with_settings(settings);
    let cols: Vec<ColumnBase> = (0..3)
        .map(|_| grid.add_column(|row: &usize| *row).into())
        .collect();

    let err = grid.merge_columns([&cols[0], &cols[1]]).unwrap_err();
    assert_eq!(err, GridError::MergeArity { required: 3, given: 2 });

    grid.merge_columns(&cols).unwrap();
    assert_eq!(grid.top_level_columns().len(), 1);
}
