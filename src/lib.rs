pub mod config;
pub mod dialogue;
pub mod error;
pub mod grid;
pub mod item;
pub mod maze;
pub mod npc;
pub mod placement;
pub mod player;
pub mod query;
pub mod session;

pub use config::Config;
pub use error::{ConfigError, GameError};
pub use grid::{Cell, Dir, Grid, Pos};
pub use item::{Catalog, Item, ItemCategory, ItemId, ItemKind, ItemTemplate};
pub use maze::{generate, HallwayWidths, MazeGenerator};
pub use npc::{Behavior, Npc};
pub use placement::{place_items, ItemCounts};
pub use player::Player;
pub use query::{find_open_spaces, is_wall, line_of_sight};
pub use session::Session;
