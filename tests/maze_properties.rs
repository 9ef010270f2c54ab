//! Structural guarantees of generated mazes under random seeds, sizes and
//! hallway width ranges.

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_survival::maze::START;
use maze_survival::{
    find_open_spaces, generate, is_wall, line_of_sight, place_items, Catalog, Cell, Dir, Grid,
    HallwayWidths, ItemCounts, Pos,
};

fn arb_widths() -> impl Strategy<Value = HallwayWidths> {
    (1usize..=3, 0usize..=3).prop_map(|(min, extra)| {
        HallwayWidths::new(min, min + extra).expect("min is at least one")
    })
}

fn reachable_floor(grid: &Grid, start: Pos) -> HashSet<Pos> {
    let mut seen = HashSet::new();
    if grid.get(start) != Some(Cell::Floor) {
        return seen;
    }
    let mut queue = VecDeque::from([start]);
    seen.insert(start);
    while let Some(pos) = queue.pop_front() {
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if grid.get(next) == Some(Cell::Floor) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_floor_cell_is_reachable_from_the_start(
        seed in any::<u64>(),
        width in 3usize..40,
        height in 3usize..30,
        widths in arb_widths(),
    ) {
        let grid = generate(width, height, Some(seed), widths).unwrap();
        let floors: HashSet<Pos> = find_open_spaces(&grid).into_iter().collect();
        prop_assert!(floors.contains(&START));
        prop_assert_eq!(reachable_floor(&grid, START), floors);
    }

    #[test]
    fn same_seed_same_maze(
        seed in any::<u64>(),
        width in 3usize..40,
        height in 3usize..30,
        widths in arb_widths(),
    ) {
        let a = generate(width, height, Some(seed), widths).unwrap();
        let b = generate(width, height, Some(seed), widths).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn everything_outside_the_grid_is_wall(
        seed in any::<u64>(),
        width in 1usize..30,
        height in 1usize..30,
        outside in -5i32..35,
        along in -5i32..35,
    ) {
        let grid = generate(width, height, Some(seed), HallwayWidths::default()).unwrap();
        let (w, h) = (width as i32, height as i32);
        if outside < 0 || outside >= w {
            prop_assert!(is_wall(&grid, Pos::new(outside, along)));
        }
        if outside < 0 || outside >= h {
            prop_assert!(is_wall(&grid, Pos::new(along, outside)));
        }
    }

    #[test]
    fn off_axis_targets_are_never_visible(
        seed in any::<u64>(),
        ax in -2i32..30, ay in -2i32..30,
        bx in -2i32..30, by in -2i32..30,
        range in 0i32..40,
    ) {
        prop_assume!(ax != bx && ay != by);
        let grid = generate(25, 25, Some(seed), HallwayWidths::default()).unwrap();
        prop_assert!(!line_of_sight(&grid, Pos::new(ax, ay), Pos::new(bx, by), range));
    }

    #[test]
    fn one_wall_blocks_a_corridor(len in 2i32..20, wall_at in 1i32..19) {
        prop_assume!(wall_at < len);
        let mut grid = Grid::new(len as usize + 1, 1).unwrap();
        grid.fill(Cell::Floor);
        let (a, b) = (Pos::new(0, 0), Pos::new(len, 0));
        prop_assert!(line_of_sight(&grid, a, b, len));

        grid.set(Pos::new(wall_at, 0), Cell::Wall);
        prop_assert!(!line_of_sight(&grid, a, b, len));
        prop_assert!(!line_of_sight(&grid, b, a, len));

        grid.set(Pos::new(wall_at, 0), Cell::Floor);
        prop_assert!(line_of_sight(&grid, a, b, len));
    }

    #[test]
    fn items_never_share_a_cell(
        seed in any::<u64>(),
        food in 0usize..40,
        drink in 0usize..40,
        tools in 0usize..40,
    ) {
        let mut grid = generate(15, 11, Some(seed), HallwayWidths::default()).unwrap();
        let open_before = find_open_spaces(&grid).len();
        let mut rng = StdRng::seed_from_u64(seed);
        let wanted = ItemCounts { food, drink, tools };
        let placed = place_items(&mut grid, &Catalog::default(), wanted, &mut rng);

        let marked = grid
            .iter()
            .filter(|(_, cell)| matches!(cell, Cell::Item(_)))
            .count();
        prop_assert_eq!(marked, placed.total());
        prop_assert_eq!(placed.total(), wanted.total().min(open_before));
        prop_assert_eq!(find_open_spaces(&grid).len(), open_before - placed.total());
    }
}
