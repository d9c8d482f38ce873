#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`PlayerInput`]
//! values, systems respond with [`Command`] batches, the world executes those
//! commands via its `apply` entry point and then broadcasts [`Event`] values
//! describing what changed. Read-only views such as [`DefenderView`] and
//! [`AttackerView`] are the only way state leaves the world.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Nominal number of simulation ticks per real-time second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Distance travelled by every projectile during a single tick.
pub const PROJECTILE_SPEED: f32 = 10.0;

/// Horizontal offset between the two projectiles of a rapid volley.
pub const RAPID_VOLLEY_OFFSET: f32 = 20.0;

/// Length of an attacker's hit box measured from its position along the lane.
pub const ATTACKER_HIT_WIDTH: f32 = 70.0;

/// Health assigned to every freshly placed defender.
pub const DEFENDER_HEALTH: f32 = 5.0;

/// Damage an engaged attacker deals to its defender every tick.
pub const EATING_DAMAGE_PER_TICK: f32 = 0.1;

/// Number of ticks a freezing hit keeps an attacker in place.
pub const FREEZE_DURATION_TICKS: u32 = 300;

/// Magazine size of defenders operating under [`FiringModel::Ammo`].
pub const MAX_AMMO: i32 = 4;

/// Ticks required to reload a single round under [`FiringModel::Ammo`].
pub const RELOAD_TICKS: u32 = 60;

/// Default number of ticks between two attacker spawns.
pub const DEFAULT_SPAWN_INTERVAL_TICKS: u32 = 30;

/// Session-wide rule deciding how defenders discharge projectiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringModel {
    /// Defenders fire on their own once their cooldown elapsed and the lane is contested.
    #[default]
    Cooldown,
    /// Defenders hold a small magazine and only fire on explicit player request.
    Ammo,
}

/// Discrete requests the player may submit between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Requests a defender of the given kind at the provided cell.
    PlaceDefender {
        /// Cell that should receive the defender.
        cell: CellCoord,
        /// Kind of defender to construct.
        kind: DefenderKind,
    },
    /// Requests removal of the defender occupying the provided cell.
    RemoveDefender {
        /// Cell whose occupant should be removed.
        cell: CellCoord,
    },
    /// Requests a manual shot from the defender occupying the provided cell.
    ManualShoot {
        /// Cell of the defender that should fire.
        cell: CellCoord,
    },
}

impl From<PlayerInput> for Command {
    fn from(input: PlayerInput) -> Self {
        match input {
            PlayerInput::PlaceDefender { cell, kind } => Self::PlaceDefender { cell, kind },
            PlayerInput::RemoveDefender { cell } => Self::RemoveDefender { cell },
            PlayerInput::ManualShoot { cell } => Self::ManualShoot { cell },
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Places a defender of the given kind at the provided cell.
    PlaceDefender {
        /// Cell that should receive the defender.
        cell: CellCoord,
        /// Kind of defender to construct.
        kind: DefenderKind,
    },
    /// Clears the provided cell.
    RemoveDefender {
        /// Cell whose occupant should be removed.
        cell: CellCoord,
    },
    /// Discharges a single round from an ammo-model defender.
    ManualShoot {
        /// Cell of the defender that should fire.
        cell: CellCoord,
    },
    /// Discharges a ready cooldown-model defender.
    FireDefender {
        /// Cell of the defender that should fire.
        cell: CellCoord,
    },
    /// Spawns a fresh attacker at the right edge of the provided lane.
    SpawnAttacker {
        /// Lane the attacker will walk along.
        lane: u32,
        /// Kind of attacker to create.
        kind: AttackerKind,
    },
    /// Advances the simulation clock and every defender timer by one tick.
    Tick,
    /// Moves projectiles and attackers, resolves collisions and checks for a breach.
    AdvanceEntities,
    /// Ends the session in victory provided no attacker remains alive.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that a defender was placed on the grid.
    DefenderPlaced {
        /// Identifier allocated to the defender.
        defender: DefenderId,
        /// Cell now occupied by the defender.
        cell: CellCoord,
        /// Kind of defender that was placed.
        kind: DefenderKind,
    },
    /// Reports that a placement request had no effect.
    DefenderPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Kind of defender requested.
        kind: DefenderKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender left the grid.
    DefenderRemoved {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Cell the defender occupied.
        cell: CellCoord,
        /// What caused the removal.
        cause: RemovalCause,
    },
    /// Reports that a manual shot request had no effect.
    ShotRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the request failed.
        reason: ShotError,
    },
    /// Confirms that a projectile entered the playfield.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Kind of projectile that was fired.
        kind: ProjectileKind,
        /// Cell of the defender that fired it.
        origin: CellCoord,
    },
    /// Confirms that a projectile left the playfield without hitting anything.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
    /// Confirms that an attacker entered the playfield.
    AttackerSpawned {
        /// Identifier allocated to the attacker.
        attacker: AttackerId,
        /// Kind of attacker that spawned.
        kind: AttackerKind,
        /// Lane the attacker walks along.
        lane: u32,
    },
    /// Reports that an attacker started eating a defender.
    AttackerEngaged {
        /// Identifier of the attacker.
        attacker: AttackerId,
        /// Identifier of the defender under attack.
        defender: DefenderId,
    },
    /// Reports that a freezing projectile immobilised an attacker.
    AttackerFrozen {
        /// Identifier of the frozen attacker.
        attacker: AttackerId,
    },
    /// Reports that an attacker's freeze expired.
    AttackerThawed {
        /// Identifier of the thawed attacker.
        attacker: AttackerId,
    },
    /// Reports that a damaging projectile struck an attacker.
    AttackerHit {
        /// Identifier of the struck attacker.
        attacker: AttackerId,
        /// Identifier of the projectile that hit.
        projectile: ProjectileId,
        /// Health removed by the hit.
        damage: u32,
    },
    /// Reports that an attacker ran out of health and left the playfield.
    AttackerDefeated {
        /// Identifier of the defeated attacker.
        attacker: AttackerId,
    },
    /// Reports that an attacker reached the left edge of the playfield.
    AttackerBreached {
        /// Identifier of the attacker.
        attacker: AttackerId,
        /// Lane the breach happened in.
        lane: u32,
    },
    /// Announces the terminal outcome of the session.
    OutcomeReached {
        /// Terminal outcome.
        outcome: Outcome,
    },
}

/// Terminal state of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The session is still running.
    #[default]
    InProgress,
    /// Every configured wave was cleared.
    Won,
    /// An attacker reached the left edge.
    Lost,
}

impl Outcome {
    /// Reports whether the outcome freezes the simulation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as lane and column indices.
///
/// Ordering is lane-major, which is also the order the world visits defenders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    lane: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(lane: u32, column: u32) -> Self {
        Self { lane, column }
    }

    /// Zero-based lane index of the cell.
    #[must_use]
    pub const fn lane(&self) -> u32 {
        self.lane
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Dimensions of the lane grid and the distance units it spans.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    /// Number of lanes attackers may walk along.
    pub lanes: u32,
    /// Number of defender columns in every lane.
    pub columns: u32,
    /// Width of a single column measured in distance units.
    pub cell_width: f32,
}

impl Playfield {
    /// Creates a new playfield description.
    #[must_use]
    pub const fn new(lanes: u32, columns: u32, cell_width: f32) -> Self {
        Self {
            lanes,
            columns,
            cell_width,
        }
    }

    /// Total width of the playfield; attackers spawn here and projectiles expire past it.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.lane() < self.lanes && cell.column() < self.columns
    }

    /// Column underneath the provided horizontal position, if it lies on the grid.
    #[must_use]
    pub fn column_at(&self, x: f32) -> Option<u32> {
        if self.cell_width <= 0.0 || x < 0.0 {
            return None;
        }

        let column = (x / self.cell_width).floor();
        if column < self.columns as f32 {
            Some(column as u32)
        } else {
            None
        }
    }

    /// Horizontal position of the right edge of the provided column.
    #[must_use]
    pub fn right_edge(&self, column: u32) -> f32 {
        (column as f32 + 1.0) * self.cell_width
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(5, 16, 100.0)
    }
}

/// Types of defenders that can be placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenderKind {
    /// Fires a standard projectile every 90 ticks.
    Basic,
    /// Fires a freezing projectile every 120 ticks.
    Freezer,
    /// Fires a pair of rapid projectiles every 60 ticks.
    Rapid,
}

impl DefenderKind {
    /// Ticks that must elapse between two automatic volleys.
    #[must_use]
    pub const fn cooldown_ticks(self) -> u32 {
        match self {
            Self::Basic => 90,
            Self::Freezer => 120,
            Self::Rapid => 60,
        }
    }

    /// Projectile discharged by an automatic volley.
    #[must_use]
    pub const fn projectile(self) -> ProjectileKind {
        match self {
            Self::Basic => ProjectileKind::Standard,
            Self::Freezer => ProjectileKind::Freezing,
            Self::Rapid => ProjectileKind::Rapid,
        }
    }

    /// Offsets from the defender's right edge at which a volley spawns projectiles.
    #[must_use]
    pub const fn volley_offsets(self) -> &'static [f32] {
        match self {
            Self::Basic | Self::Freezer => &[0.0],
            Self::Rapid => &[0.0, RAPID_VOLLEY_OFFSET],
        }
    }
}

/// Types of projectiles travelling along the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Deals a single point of damage.
    Standard,
    /// Freezes the attacker instead of damaging it.
    Freezing,
    /// Deals two points of damage.
    Rapid,
}

impl ProjectileKind {
    /// Health removed from an attacker on impact.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Standard => 1,
            Self::Freezing => 0,
            Self::Rapid => 2,
        }
    }

    /// Reports whether an impact freezes the attacker.
    #[must_use]
    pub const fn freezes(self) -> bool {
        matches!(self, Self::Freezing)
    }
}

/// Types of attackers the waves are composed of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackerKind {
    /// Fragile and quick.
    Weak,
    /// Sturdy and slow.
    Tanky,
    /// The sturdiest attacker.
    Tankiest,
}

impl AttackerKind {
    /// Every attacker kind in wave-table order.
    pub const ALL: [Self; 3] = [Self::Weak, Self::Tanky, Self::Tankiest];
}

/// Base statistics applied to a freshly spawned attacker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackerStats {
    /// Starting health.
    pub health: f32,
    /// Distance covered per tick while moving.
    pub speed: f32,
}

impl AttackerStats {
    /// Creates a new stat block.
    #[must_use]
    pub const fn new(health: f32, speed: f32) -> Self {
        Self { health, speed }
    }
}

/// Stat table consulted whenever an attacker spawns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackerStatTable {
    /// Stats for [`AttackerKind::Weak`].
    pub weak: AttackerStats,
    /// Stats for [`AttackerKind::Tanky`].
    pub tanky: AttackerStats,
    /// Stats for [`AttackerKind::Tankiest`].
    pub tankiest: AttackerStats,
}

impl AttackerStatTable {
    /// Canonical table for the cooldown firing model.
    pub const COOLDOWN: Self = Self {
        weak: AttackerStats::new(5.0, 2.0),
        tanky: AttackerStats::new(10.0, 0.5),
        tankiest: AttackerStats::new(15.0, 1.0),
    };

    /// Canonical table for the ammo firing model. Manual fire is slower, so
    /// the weakest attacker is softened to compensate.
    pub const AMMO: Self = Self {
        weak: AttackerStats::new(3.0, 1.0),
        ..Self::COOLDOWN
    };

    /// Selects the canonical table for the provided firing model.
    #[must_use]
    pub const fn for_firing_model(model: FiringModel) -> Self {
        match model {
            FiringModel::Cooldown => Self::COOLDOWN,
            FiringModel::Ammo => Self::AMMO,
        }
    }

    /// Looks up the stats of the provided attacker kind.
    #[must_use]
    pub const fn stats(&self, kind: AttackerKind) -> AttackerStats {
        match kind {
            AttackerKind::Weak => self.weak,
            AttackerKind::Tanky => self.tanky,
            AttackerKind::Tankiest => self.tankiest,
        }
    }
}

impl Default for AttackerStatTable {
    fn default() -> Self {
        Self::COOLDOWN
    }
}

/// Number of attackers of every kind that compose a single wave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSpec {
    /// Remaining [`AttackerKind::Weak`] spawns.
    pub weak: u32,
    /// Remaining [`AttackerKind::Tanky`] spawns.
    pub tanky: u32,
    /// Remaining [`AttackerKind::Tankiest`] spawns.
    pub tankiest: u32,
}

impl WaveSpec {
    /// Creates a new wave specification.
    #[must_use]
    pub const fn new(weak: u32, tanky: u32, tankiest: u32) -> Self {
        Self {
            weak,
            tanky,
            tankiest,
        }
    }

    /// Remaining spawns for the provided kind.
    #[must_use]
    pub const fn count(&self, kind: AttackerKind) -> u32 {
        match kind {
            AttackerKind::Weak => self.weak,
            AttackerKind::Tanky => self.tanky,
            AttackerKind::Tankiest => self.tankiest,
        }
    }

    /// Remaining spawns across every kind.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.weak
            .saturating_add(self.tanky)
            .saturating_add(self.tankiest)
    }

    /// Consumes a single spawn of the provided kind.
    ///
    /// Returns `false` when the kind has no spawns left.
    pub fn take(&mut self, kind: AttackerKind) -> bool {
        let slot = match kind {
            AttackerKind::Weak => &mut self.weak,
            AttackerKind::Tanky => &mut self.tanky,
            AttackerKind::Tankiest => &mut self.tankiest,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Default three-wave campaign.
    #[must_use]
    pub fn default_campaign() -> Vec<Self> {
        vec![Self::new(10, 10, 5), Self::new(0, 0, 20), Self::new(0, 20, 0)]
    }
}

/// Reasons a placement request may have no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell already holds a defender.
    Occupied,
}

/// Reasons a manual shot request may have no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotError {
    /// No defender occupies the requested cell.
    EmptyCell,
    /// Defenders fire automatically under the active firing model.
    AutomaticFiring,
}

/// Reasons a defender may leave the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalCause {
    /// The player removed the defender.
    Cleared,
    /// An attacker ate through the defender's health.
    Eaten,
    /// The defender fired past an empty magazine.
    AmmoDepleted,
}

/// Firing state of a defender exposed to adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmamentSnapshot {
    /// Automatic firing state.
    Cooldown {
        /// Ticks elapsed since the last volley.
        elapsed: u32,
        /// Indicates whether the cooldown elapsed.
        ready: bool,
    },
    /// Manual firing state.
    Ammo {
        /// Rounds left in the magazine; `-1` marks a defender due for removal.
        ammo: i32,
        /// Ticks accumulated toward the next round.
        reload_progress: u32,
    },
}

/// Immutable representation of a single defender used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender.
    pub id: DefenderId,
    /// Cell occupied by the defender.
    pub cell: CellCoord,
    /// Kind of defender.
    pub kind: DefenderKind,
    /// Health left before attackers eat through it.
    pub health: f32,
    /// Firing state.
    pub armament: ArmamentSnapshot,
}

/// Read-only snapshot describing every defender on the grid.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.cell);
        Self { snapshots }
    }

    /// Iterator over the captured defenders in lane-major cell order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the defender occupying the provided cell, if any.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&DefenderSnapshot> {
        self.snapshots
            .binary_search_by_key(&cell, |snapshot| snapshot.cell)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of defenders on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single attacker used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerSnapshot {
    /// Identifier allocated to the attacker.
    pub id: AttackerId,
    /// Kind of attacker.
    pub kind: AttackerKind,
    /// Lane the attacker walks along.
    pub lane: u32,
    /// Horizontal position of the attacker's left edge.
    pub x: f32,
    /// Health left.
    pub health: f32,
    /// Indicates whether a freeze currently holds the attacker.
    pub frozen: bool,
    /// Defender currently being eaten, if any.
    pub engaged: Option<DefenderId>,
}

/// Read-only snapshot describing every live attacker.
#[derive(Clone, Debug, Default)]
pub struct AttackerView {
    snapshots: Vec<AttackerSnapshot>,
}

impl AttackerView {
    /// Creates a new attacker view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AttackerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured attackers in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &AttackerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live attackers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no attacker is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AttackerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Kind of projectile.
    pub kind: ProjectileKind,
    /// Lane the projectile travels along.
    pub lane: u32,
    /// Horizontal position of the projectile.
    pub x: f32,
}

/// Read-only snapshot describing every projectile in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectiles in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectile is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Progress report published by the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveSnapshot {
    /// One-based number of the wave currently being fought.
    pub wave: u32,
    /// Number of configured waves.
    pub total_waves: u32,
    /// Attackers of the current wave that have not spawned yet.
    pub remaining_to_spawn: u32,
    /// Indicates whether every configured wave was cleared.
    pub completed: bool,
}

impl WaveSnapshot {
    /// Attackers left to defeat in the current wave, counting live ones.
    #[must_use]
    pub fn attackers_left(&self, live_attackers: usize) -> u32 {
        let live = u32::try_from(live_attackers).unwrap_or(u32::MAX);
        self.remaining_to_spawn.saturating_add(live)
    }
}
