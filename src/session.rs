//! One game session: owns the grid and the random source, and drives every
//! phase in order. Generation and item placement write the grid once, then
//! ticks only read it apart from item pickup.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::config::Config;
use crate::dialogue::is_adjacent;
use crate::error::GameError;
use crate::grid::{Dir, Grid, Pos};
use crate::item::Catalog;
use crate::maze::{seeded_rng, MazeGenerator};
use crate::npc::Npc;
use crate::placement::{place_items, ItemCounts};
use crate::player::Player;
use crate::query::find_open_spaces;

pub struct Session {
    config: Config,
    rng: StdRng,
    generator: MazeGenerator,
    pub grid: Grid,
    pub catalog: Catalog,
    pub player: Player,
    pub npcs: Vec<Npc>,
    placed: ItemCounts,
}

impl Session {
    pub fn new(config: Config) -> Result<Session, GameError> {
        Session::with_catalog(config, Catalog::default())
    }

    pub fn with_catalog(config: Config, catalog: Catalog) -> Result<Session, GameError> {
        config.validate()?;
        let (width, height) = config.grid_size();
        let generator = MazeGenerator::new(config.hallway_widths()?);
        let mut session = Session {
            rng: seeded_rng(config.seed),
            generator,
            grid: Grid::new(width, height)?,
            player: Player::new(Pos::new(0, 0)),
            npcs: Vec::new(),
            placed: ItemCounts::default(),
            catalog,
            config,
        };
        session.build_level()?;
        session.player = Player::with_starter_kit(session.player.pos, &session.catalog);
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn items_placed(&self) -> ItemCounts {
        self.placed
    }

    /// Throws the current layout away and builds a new one. The player
    /// keeps their stats and inventory.
    pub fn regenerate(&mut self) -> Result<(), GameError> {
        self.build_level()
    }

    /// Builds into a scratch grid and only swaps it in once every spawn has
    /// a cell, so a failed rebuild leaves the previous level intact.
    fn build_level(&mut self) -> Result<(), GameError> {
        let mut grid = self.grid.clone();
        self.generator.generate(&mut grid, &mut self.rng);
        let placed = place_items(&mut grid, &self.catalog, self.config.items, &mut self.rng);

        // Items go down first, so spawns never land on one.
        let mut pool = find_open_spaces(&grid);
        let interval = self.config.npc_move_interval;
        let player = take_spawn(&mut pool, &mut self.rng, "player")?;
        let npcs = vec![
            Npc::stationary(take_spawn(&mut pool, &mut self.rng, "static npc")?, interval),
            Npc::wanderer(
                take_spawn(&mut pool, &mut self.rng, "wandering npc")?,
                self.config.wander_range,
                interval,
            ),
            Npc::aggressive(
                take_spawn(&mut pool, &mut self.rng, "aggressive npc")?,
                self.config.aggro_sight,
                interval,
            ),
        ];

        self.grid = grid;
        self.placed = placed;
        self.player.pos = player;
        self.npcs = npcs;
        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            items = self.placed.total(),
            x = self.player.pos.x,
            y = self.player.pos.y,
            "level ready"
        );
        Ok(())
    }

    /// One host frame: survival decay and NPC movement. `now` is time since
    /// the session started.
    pub fn tick(&mut self, now: Duration) {
        self.player
            .vitals
            .decay(self.config.hunger_decay, self.config.thirst_decay);
        let player = self.player.pos;
        for npc in &mut self.npcs {
            npc.update(&self.grid, player, now, &mut self.rng);
        }
    }

    /// Moves the player and picks up whatever lies on the new cell.
    pub fn move_player(&mut self, dir: Dir) -> Option<String> {
        if !self.player.try_move(&self.grid, dir) {
            return None;
        }
        self.player.pick_up(&mut self.grid, &self.catalog)
    }

    pub fn adjacent_npc(&self) -> Option<usize> {
        self.npcs
            .iter()
            .position(|npc| is_adjacent(self.player.pos, npc.pos))
    }

    pub fn talk(&mut self, npc: usize, input: &str) -> Option<String> {
        let pos = self.player.pos;
        self.npcs
            .get_mut(npc)
            .filter(|npc| is_adjacent(pos, npc.pos))
            .map(|npc| npc.conversation.reply(input))
    }
}

fn take_spawn(pool: &mut Vec<Pos>, rng: &mut impl Rng, who: &'static str) -> Result<Pos, GameError> {
    if pool.is_empty() {
        return Err(GameError::NoSpawnPoint { who });
    }
    let idx = rng.gen_range(0..pool.len());
    Ok(pool.swap_remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::query::is_wall;
    use std::collections::HashSet;

    fn small() -> Config {
        Config {
            screen_width: 300,
            screen_height: 300,
            hud_height: 0,
            cell_size: 20,
            ..Config::default()
        }
    }

    #[test]
    fn spawns_are_distinct_open_cells() {
        let session = Session::new(small()).unwrap();
        let mut seen = HashSet::new();
        seen.insert(session.player.pos);
        for npc in &session.npcs {
            assert!(seen.insert(npc.pos));
        }
        for pos in seen {
            assert_eq!(session.grid.get(pos), Some(Cell::Floor));
        }
        assert_eq!(session.npcs.len(), 3);
    }

    #[test]
    fn same_seed_same_session() {
        let a = Session::new(small()).unwrap();
        let b = Session::new(small()).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn too_small_for_spawns_is_an_error() {
        let cfg = Config {
            screen_width: 60,
            screen_height: 60,
            hud_height: 0,
            cell_size: 20,
            ..Config::default()
        };
        let err = Session::new(cfg).err().unwrap();
        assert!(matches!(err, GameError::NoSpawnPoint { .. }));
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let cfg = Config {
            min_hallway_width: 0,
            ..Config::default()
        };
        assert!(matches!(Session::new(cfg), Err(GameError::Config(_))));
    }

    #[test]
    fn ticks_move_npcs_only_through_open_cells() {
        let mut session = Session::new(small()).unwrap();
        let step = session.config().npc_move_interval;
        for i in 1..40 {
            session.tick(step * i);
            for npc in &session.npcs {
                assert!(!is_wall(&session.grid, npc.pos));
            }
        }
        assert!(session.player.vitals.hunger < 100.0);
    }

    #[test]
    fn failed_regenerate_keeps_the_old_level() {
        let mut session = Session::new(small()).unwrap();
        let grid = session.grid.clone();
        let player = session.player.pos;
        let npcs: Vec<Pos> = session.npcs.iter().map(|npc| npc.pos).collect();

        // enough items to cover every floor cell
        session.config.items.food = session.grid.width() * session.grid.height();
        let err = session.regenerate().err().unwrap();
        assert!(matches!(err, GameError::NoSpawnPoint { who: "player" }));

        assert_eq!(session.grid, grid);
        assert_eq!(session.player.pos, player);
        let after: Vec<Pos> = session.npcs.iter().map(|npc| npc.pos).collect();
        assert_eq!(after, npcs);
    }

    #[test]
    fn regenerate_keeps_the_player_kit() {
        let mut session = Session::new(small()).unwrap();
        let kit = session.player.inventory.items().len();
        session.regenerate().unwrap();
        assert_eq!(session.player.inventory.items().len(), kit);
        assert_eq!(session.grid.get(session.player.pos), Some(Cell::Floor));
    }
}
