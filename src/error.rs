use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("grid of {width}x{height} cells is too large to address")]
    GridTooLarge { width: usize, height: usize },

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("hud height {hud} leaves no room on a {screen}px tall screen")]
    HudTooTall { hud: usize, screen: usize },

    #[error("invalid hallway width range {min}..={max}")]
    HallwayWidth { min: usize, max: usize },

    #[error("npc move interval must be positive")]
    ZeroMoveInterval,

    #[error("could not parse {var}={value:?}")]
    BadEnv { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no open cell left to spawn the {who}")]
    NoSpawnPoint { who: &'static str },
}
