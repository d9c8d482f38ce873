//! Lane-confined attackers and their Moving/Frozen/Engaged state machine.

use lane_defence_core::{
    AttackerId, AttackerKind, AttackerSnapshot, AttackerStats, CellCoord, DefenderId, Event,
    RemovalCause, ATTACKER_HIT_WIDTH, EATING_DAMAGE_PER_TICK, FREEZE_DURATION_TICKS,
};

use crate::grid::Grid;

#[derive(Clone, Debug)]
pub(crate) struct Attacker {
    pub(crate) id: AttackerId,
    pub(crate) kind: AttackerKind,
    pub(crate) lane: u32,
    pub(crate) x: f32,
    pub(crate) health: f32,
    speed: f32,
    frozen: bool,
    frozen_ticks: u32,
    /// Non-owning reference, re-resolved against the grid every tick.
    engaged: Option<DefenderId>,
}

impl Attacker {
    pub(crate) fn spawn(
        id: AttackerId,
        kind: AttackerKind,
        lane: u32,
        x: f32,
        stats: AttackerStats,
    ) -> Self {
        Self {
            id,
            kind,
            lane,
            x,
            health: stats.health,
            speed: stats.speed,
            frozen: false,
            frozen_ticks: 0,
            engaged: None,
        }
    }

    /// Engages the defender standing in the column under the attacker.
    ///
    /// Runs every tick regardless of state. Returns the defender only when the
    /// engagement is new.
    pub(crate) fn detect_defender(&mut self, grid: &Grid) -> Option<DefenderId> {
        let column = grid.playfield().column_at(self.x)?;
        let defender = grid.occupant(CellCoord::new(self.lane, column))?;
        if self.engaged == Some(defender.id) {
            return None;
        }
        self.engaged = Some(defender.id);
        Some(defender.id)
    }

    /// Advances the attacker by one tick: eat, else thaw, else walk.
    pub(crate) fn step(&mut self, grid: &mut Grid, out_events: &mut Vec<Event>) {
        if let Some(target) = self.engaged {
            if let Some(cell) = grid.locate(target) {
                let destroyed = grid
                    .occupant_mut(cell)
                    .map_or(false, |defender| defender.take_damage(EATING_DAMAGE_PER_TICK));
                if destroyed {
                    if let Some(defender) = grid.remove(cell) {
                        out_events.push(Event::DefenderRemoved {
                            defender: defender.id,
                            cell,
                            cause: RemovalCause::Eaten,
                        });
                    }
                    self.engaged = None;
                }
                return;
            }
            self.engaged = None;
        }

        if self.frozen {
            self.frozen_ticks += 1;
            if self.frozen_ticks >= FREEZE_DURATION_TICKS {
                self.frozen = false;
                self.frozen_ticks = 0;
                out_events.push(Event::AttackerThawed { attacker: self.id });
            }
            return;
        }

        self.x -= self.speed;
    }

    /// Reports whether the horizontal position lies strictly inside the hit box.
    pub(crate) fn overlaps(&self, x: f32) -> bool {
        self.x < x && x < self.x + ATTACKER_HIT_WIDTH
    }

    /// Freezes the attacker, restarting the freeze if one is already running.
    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
        self.frozen_ticks = 0;
    }

    /// Applies projectile damage and reports whether the attacker was defeated.
    pub(crate) fn take_hit(&mut self, damage: u32) -> bool {
        self.health -= damage as f32;
        self.health <= 0.0
    }

    pub(crate) fn has_breached(&self) -> bool {
        self.x <= 0.0
    }

    pub(crate) fn snapshot(&self) -> AttackerSnapshot {
        AttackerSnapshot {
            id: self.id,
            kind: self.kind,
            lane: self.lane,
            x: self.x,
            health: self.health,
            frozen: self.frozen,
            engaged: self.engaged,
        }
    }
}
