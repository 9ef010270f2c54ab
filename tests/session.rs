use maze_survival::{is_wall, Behavior, Catalog, Cell, Config, Dir, GameError, ItemId, Pos, Session};

fn config() -> Config {
    Config {
        screen_width: 420,
        screen_height: 400,
        hud_height: 100,
        seed: Some(7),
        ..Config::default()
    }
}

#[test]
fn session_layout_follows_the_config() {
    let session = Session::new(config()).unwrap();
    assert_eq!(session.grid.width(), 21);
    assert_eq!(session.grid.height(), 15);
    assert_eq!(session.items_placed(), config().items);

    let behaviors: Vec<&str> = session.npcs.iter().map(|npc| npc.behavior.label()).collect();
    assert_eq!(behaviors, ["static", "wanderer", "aggressive"]);
}

#[test]
fn walking_over_an_item_picks_it_up() {
    let mut session = Session::new(config()).unwrap();
    let start = session.player.pos;
    let Some(dir) = Dir::ALL
        .into_iter()
        .find(|dir| !is_wall(&session.grid, start.step(*dir)))
    else {
        panic!("spawn cell has no open neighbour");
    };
    let target = start.step(dir);
    session.grid.set(target, Cell::Item(ItemId(3)));
    let held = session.player.inventory.items().len();

    assert_eq!(session.move_player(dir).as_deref(), Some("Picked up juice."));
    assert_eq!(session.player.pos, target);
    assert_eq!(session.grid.get(target), Some(Cell::Floor));
    assert_eq!(session.player.inventory.items().len(), held + 1);
}

#[test]
fn talking_needs_a_neighbour() {
    let mut session = Session::new(config()).unwrap();
    let npc_pos = session.npcs[0].pos;
    if session.adjacent_npc().is_none() {
        assert_eq!(session.talk(0, "hello"), None);
    }
    session.player.pos = Pos::new(npc_pos.x + 1, npc_pos.y);
    assert_eq!(session.adjacent_npc(), Some(0));
    assert_eq!(session.talk(0, "hello").as_deref(), Some("hello"));
    assert_eq!(session.npcs[0].conversation.exchanges(), 1);
}

#[test]
fn aggressive_npc_hunts_a_visible_player() {
    let mut session = Session::new(config()).unwrap();
    let idx = session
        .npcs
        .iter()
        .position(|npc| matches!(npc.behavior, Behavior::Aggressive { .. }))
        .unwrap();

    // clear a private corridor on the top row for the chase
    for x in 0..8 {
        session.grid.set(Pos::new(x, 0), Cell::Floor);
    }
    session.npcs[idx].pos = Pos::new(0, 0);
    session.player.pos = Pos::new(4, 0);

    let interval = session.config().npc_move_interval;
    session.tick(interval);
    assert_eq!(session.npcs[idx].pos, Pos::new(1, 0));
    assert!(session.npcs[idx].is_pursuing());

    // half an interval later the gate is still shut
    session.tick(interval + interval / 2);
    assert_eq!(session.npcs[idx].pos, Pos::new(1, 0));
}

#[test]
fn empty_catalog_places_nothing_but_still_plays() {
    let session = Session::with_catalog(config(), Catalog::new(Vec::new())).unwrap();
    assert_eq!(session.items_placed().total(), 0);
    assert!(session.player.inventory.is_empty());
}

#[test]
fn zero_sized_grids_fail_at_construction() {
    let cfg = Config {
        cell_size: 1000,
        ..Config::default()
    };
    assert!(matches!(Session::new(cfg), Err(GameError::Config(_))));
}
