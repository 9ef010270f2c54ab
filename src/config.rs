use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::maze::HallwayWidths;
use crate::placement::ItemCounts;

const DEFAULT_SCREEN_W: usize = 800;
const DEFAULT_SCREEN_H: usize = 600;
const DEFAULT_CELL_SIZE: usize = 20;
const DEFAULT_HUD_H: usize = 100;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_NPC_MOVE_MS: u64 = 1000;
const DEFAULT_TICK_MS: u64 = 70;
const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub screen_width: usize,
    pub screen_height: usize,
    pub cell_size: usize,
    /// Pixels at the bottom of the screen reserved for the dialogue box.
    pub hud_height: usize,
    pub seed: Option<u64>,
    pub min_hallway_width: usize,
    pub max_hallway_width: usize,
    pub items: ItemCounts,
    pub npc_move_interval: Duration,
    pub wander_range: i32,
    pub aggro_sight: i32,
    pub hunger_decay: f32,
    pub thirst_decay: f32,
    pub tick: Duration,
    pub render_fps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: DEFAULT_SCREEN_W,
            screen_height: DEFAULT_SCREEN_H,
            cell_size: DEFAULT_CELL_SIZE,
            hud_height: DEFAULT_HUD_H,
            seed: Some(DEFAULT_SEED),
            min_hallway_width: 1,
            max_hallway_width: 3,
            items: ItemCounts {
                food: 5,
                drink: 5,
                tools: 2,
            },
            npc_move_interval: Duration::from_millis(DEFAULT_NPC_MOVE_MS),
            wander_range: 2,
            aggro_sight: 5,
            hunger_decay: 0.05,
            thirst_decay: 0.1,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            render_fps: DEFAULT_RENDER_FPS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_vars(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` finds under the `MAZE_*` names.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let mut cfg = Config::default();
        let get = |var: &'static str| lookup(var).map(|value| (var, value));

        if let Some(v) = parse(get("MAZE_SCREEN_WIDTH"))? {
            cfg.screen_width = v;
        }
        if let Some(v) = parse(get("MAZE_SCREEN_HEIGHT"))? {
            cfg.screen_height = v;
        }
        if let Some(v) = parse(get("MAZE_CELL_SIZE"))? {
            cfg.cell_size = v;
        }
        if let Some(v) = parse(get("MAZE_HUD_HEIGHT"))? {
            cfg.hud_height = v;
        }
        if let Some((var, value)) = get("MAZE_SEED") {
            cfg.seed = match value.trim() {
                "-1" | "random" => None,
                other => Some(other.parse().map_err(|_| ConfigError::BadEnv {
                    var,
                    value: value.clone(),
                })?),
            };
        }
        if let Some(v) = parse(get("MAZE_MIN_HALLWAY"))? {
            cfg.min_hallway_width = v;
        }
        if let Some(v) = parse(get("MAZE_MAX_HALLWAY"))? {
            cfg.max_hallway_width = v;
        }
        if let Some(v) = parse(get("MAZE_FOOD"))? {
            cfg.items.food = v;
        }
        if let Some(v) = parse(get("MAZE_DRINKS"))? {
            cfg.items.drink = v;
        }
        if let Some(v) = parse(get("MAZE_TOOLS"))? {
            cfg.items.tools = v;
        }
        if let Some(v) = parse(get("MAZE_NPC_MOVE_MS"))? {
            cfg.npc_move_interval = Duration::from_millis(v);
        }
        if let Some(v) = parse(get("MAZE_WANDER_RANGE"))? {
            cfg.wander_range = v;
        }
        if let Some(v) = parse(get("MAZE_AGGRO_SIGHT"))? {
            cfg.aggro_sight = v;
        }
        if let Some(v) = parse(get("MAZE_TICK_MS"))? {
            cfg.tick = Duration::from_millis(v);
        }
        if let Some(v) = parse(get("MAZE_FPS"))? {
            cfg.render_fps = v;
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.hud_height >= self.screen_height {
            return Err(ConfigError::HudTooTall {
                hud: self.hud_height,
                screen: self.screen_height,
            });
        }
        let (width, height) = self.grid_size();
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        self.hallway_widths()?;
        if self.npc_move_interval.is_zero() {
            return Err(ConfigError::ZeroMoveInterval);
        }
        Ok(())
    }

    /// Maze size in cells: the screen minus the dialogue strip, divided
    /// into square cells.
    pub fn grid_size(&self) -> (usize, usize) {
        let width = self.screen_width.checked_div(self.cell_size).unwrap_or(0);
        let height = self
            .screen_height
            .saturating_sub(self.hud_height)
            .checked_div(self.cell_size)
            .unwrap_or(0);
        (width, height)
    }

    pub fn hallway_widths(&self) -> Result<HallwayWidths, ConfigError> {
        HallwayWidths::new(self.min_hallway_width, self.max_hallway_width)
    }
}

fn parse<T: FromStr>(entry: Option<(&'static str, String)>) -> Result<Option<T>, ConfigError> {
    let Some((var, value)) = entry else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::BadEnv { var, value }),
    }
}
