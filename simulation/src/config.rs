//! Session configuration loaded from code or TOML.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use lane_defence_core::{
    AttackerStatTable, CellCoord, DefenderKind, FiringModel, Playfield, WaveSpec,
    DEFAULT_SPAWN_INTERVAL_TICKS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when a configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x1a2e_d3f0;

/// Largest grid a session may allocate.
pub const MAX_PLAYFIELD_CELLS: u64 = 1 << 20;

/// Defender placed on the grid when a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// Lane of the target cell.
    pub lane: u32,
    /// Column of the target cell.
    pub column: u32,
    /// Kind of defender to place.
    pub kind: DefenderKind,
}

impl LayoutEntry {
    /// Cell addressed by the entry.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        CellCoord::new(self.lane, self.column)
    }
}

/// Manual shot requested on behalf of the player during a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedShot {
    /// Tick whose input phase carries the request; the first tick is 1.
    pub tick: u64,
    /// Lane of the defender asked to shoot.
    pub lane: u32,
    /// Column of the defender asked to shoot.
    pub column: u32,
}

impl ScriptedShot {
    /// Cell addressed by the shot.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        CellCoord::new(self.lane, self.column)
    }
}

/// Static startup data describing one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Whether defenders fire automatically or on request.
    pub firing_model: FiringModel,
    /// Seed driving attacker kind and lane selection.
    pub seed: u64,
    /// Ticks between two attacker spawns.
    pub spawn_interval_ticks: u32,
    /// Grid dimensions.
    pub playfield: Playfield,
    /// Ordered wave table.
    pub waves: Vec<WaveSpec>,
    /// Attacker stats; the firing model's canonical table when absent.
    pub stats: Option<AttackerStatTable>,
    /// Defenders placed before the first tick.
    pub layout: Vec<LayoutEntry>,
    /// Manual shots issued at fixed ticks, for ammo sessions run headless.
    pub shots: Vec<ScriptedShot>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            firing_model: FiringModel::Cooldown,
            seed: DEFAULT_SEED,
            spawn_interval_ticks: DEFAULT_SPAWN_INTERVAL_TICKS,
            playfield: Playfield::default(),
            waves: WaveSpec::default_campaign(),
            stats: None,
            layout: Vec::new(),
            shots: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects configurations that cannot describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        if self.playfield.lanes == 0 || self.playfield.columns == 0 {
            return Err(ConfigError::EmptyPlayfield {
                lanes: self.playfield.lanes,
                columns: self.playfield.columns,
            });
        }
        let cells = u64::from(self.playfield.lanes) * u64::from(self.playfield.columns);
        if cells > MAX_PLAYFIELD_CELLS {
            return Err(ConfigError::PlayfieldTooLarge {
                lanes: self.playfield.lanes,
                columns: self.playfield.columns,
            });
        }
        let cell_width = self.playfield.cell_width;
        if cell_width.is_nan() || cell_width <= 0.0 {
            return Err(ConfigError::InvalidCellWidth(cell_width));
        }
        if self.spawn_interval_ticks == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if let Some(entry) = self
            .layout
            .iter()
            .find(|entry| !self.playfield.contains(entry.cell()))
        {
            return Err(ConfigError::LayoutOutOfBounds {
                lane: entry.lane,
                column: entry.column,
            });
        }
        if let Some(shot) = self
            .shots
            .iter()
            .find(|shot| shot.tick == 0 || !self.playfield.contains(shot.cell()))
        {
            return Err(ConfigError::InvalidShot {
                tick: shot.tick,
                lane: shot.lane,
                column: shot.column,
            });
        }
        Ok(())
    }

    /// Stat table applied to spawned attackers.
    #[must_use]
    pub fn attacker_stats(&self) -> AttackerStatTable {
        self.stats
            .unwrap_or_else(|| AttackerStatTable::for_firing_model(self.firing_model))
    }
}

/// Errors raised while loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The configuration text is not valid TOML for a session.
    #[error("invalid session config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The wave table is empty.
    #[error("session config must list at least one wave")]
    NoWaves,
    /// The grid has no cells.
    #[error("playfield must have lanes and columns, got {lanes}x{columns}")]
    EmptyPlayfield {
        /// Configured lane count.
        lanes: u32,
        /// Configured column count.
        columns: u32,
    },
    /// The grid holds more cells than a session may allocate.
    #[error("playfield of {lanes}x{columns} exceeds {max} cells", max = MAX_PLAYFIELD_CELLS)]
    PlayfieldTooLarge {
        /// Configured lane count.
        lanes: u32,
        /// Configured column count.
        columns: u32,
    },
    /// Cells must have a positive width.
    #[error("cell width must be positive, got {0}")]
    InvalidCellWidth(f32),
    /// Attackers would never spawn.
    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,
    /// A scripted defender lies outside the grid.
    #[error("layout entry at lane {lane}, column {column} lies outside the playfield")]
    LayoutOutOfBounds {
        /// Lane of the offending entry.
        lane: u32,
        /// Column of the offending entry.
        column: u32,
    },
    /// A scripted shot targets tick zero or a cell outside the grid.
    #[error("scripted shot at tick {tick}, lane {lane}, column {column} can never land")]
    InvalidShot {
        /// Tick of the offending shot.
        tick: u64,
        /// Lane of the offending shot.
        lane: u32,
        /// Column of the offending shot.
        column: u32,
    },
}
