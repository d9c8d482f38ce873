//! Defender state machines for both firing models.

use lane_defence_core::{
    ArmamentSnapshot, CellCoord, DefenderId, DefenderKind, DefenderSnapshot, FiringModel,
    DEFENDER_HEALTH, MAX_AMMO, RELOAD_TICKS,
};

/// Firing state carried by a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Armament {
    /// Automatic firing: counts ticks since the last volley.
    Cooldown { elapsed: u32 },
    /// Manual firing: a magazine that refills one round at a time.
    Ammo { ammo: i32, reload_timer: u32 },
}

impl Armament {
    fn for_model(model: FiringModel) -> Self {
        match model {
            FiringModel::Cooldown => Self::Cooldown { elapsed: 0 },
            FiringModel::Ammo => Self::Ammo {
                ammo: MAX_AMMO,
                reload_timer: 0,
            },
        }
    }
}

/// Result of advancing a defender's timers by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerOutcome {
    /// The defender remains on the grid.
    Armed,
    /// The magazine underflowed and the defender must leave the grid.
    Depleted,
}

/// Result of a manual shot request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ManualShot {
    /// A round was discharged.
    Fired,
    /// The magazine had already underflowed; the defender must leave the grid.
    Depleted,
    /// The defender fires automatically and ignores manual requests.
    Automatic,
}

/// Defender owned by a single grid cell.
#[derive(Clone, Debug)]
pub(crate) struct Defender {
    pub(crate) id: DefenderId,
    pub(crate) cell: CellCoord,
    pub(crate) kind: DefenderKind,
    health: f32,
    armament: Armament,
}

impl Defender {
    pub(crate) fn new(
        id: DefenderId,
        cell: CellCoord,
        kind: DefenderKind,
        model: FiringModel,
    ) -> Self {
        Self {
            id,
            cell,
            kind,
            health: DEFENDER_HEALTH,
            armament: Armament::for_model(model),
        }
    }

    /// Applies eating damage and reports whether the defender was destroyed.
    pub(crate) fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        self.health <= 0.0
    }

    /// Advances cooldown or reload timers by one tick.
    ///
    /// An underflowed magazine is detected before reloading, so a defender at
    /// `-1` ammo never recovers.
    pub(crate) fn advance_timers(&mut self) -> TimerOutcome {
        match &mut self.armament {
            Armament::Cooldown { elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                TimerOutcome::Armed
            }
            Armament::Ammo { ammo, reload_timer } => {
                if *ammo < 0 {
                    return TimerOutcome::Depleted;
                }
                if *ammo < MAX_AMMO {
                    *reload_timer += 1;
                    if *reload_timer >= RELOAD_TICKS {
                        *ammo += 1;
                        *reload_timer = 0;
                    }
                }
                TimerOutcome::Armed
            }
        }
    }

    pub(crate) fn ready_to_fire(&self) -> bool {
        match self.armament {
            Armament::Cooldown { elapsed } => elapsed >= self.kind.cooldown_ticks(),
            Armament::Ammo { .. } => false,
        }
    }

    /// Starts a new cooldown after an automatic volley.
    pub(crate) fn restart_cooldown(&mut self) {
        if let Armament::Cooldown { elapsed } = &mut self.armament {
            *elapsed = 0;
        }
    }

    /// Discharges one round from the magazine.
    ///
    /// Zero ammo still permits a final shot that leaves the magazine at `-1`;
    /// the defender is removed on the next timer or shot check.
    pub(crate) fn manual_shot(&mut self) -> ManualShot {
        match &mut self.armament {
            Armament::Cooldown { .. } => ManualShot::Automatic,
            Armament::Ammo { ammo, .. } => {
                if *ammo < 0 {
                    return ManualShot::Depleted;
                }
                *ammo -= 1;
                ManualShot::Fired
            }
        }
    }

    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        let armament = match self.armament {
            Armament::Cooldown { elapsed } => ArmamentSnapshot::Cooldown {
                elapsed,
                ready: self.ready_to_fire(),
            },
            Armament::Ammo { ammo, reload_timer } => ArmamentSnapshot::Ammo {
                ammo,
                reload_progress: reload_timer,
            },
        };

        DefenderSnapshot {
            id: self.id,
            cell: self.cell,
            kind: self.kind,
            health: self.health,
            armament,
        }
    }
}
