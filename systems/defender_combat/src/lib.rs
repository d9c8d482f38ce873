#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits defender firing commands from lane occupancy.

use lane_defence_core::{ArmamentSnapshot, AttackerView, Command, DefenderView, FiringModel};

/// Defender combat system that queues volleys for ready defenders.
#[derive(Debug, Default)]
pub struct DefenderCombat {
    occupied_lanes: Vec<u32>,
    scratch: Vec<Command>,
}

impl DefenderCombat {
    /// Creates a new defender combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireDefender` for every ready defender whose lane holds
    /// at least one attacker.
    ///
    /// Defenders fire at lane occupancy, never at a specific attacker. Manual
    /// firing sessions are left to player input.
    pub fn handle(
        &mut self,
        firing_model: FiringModel,
        defenders: &DefenderView,
        attackers: &AttackerView,
        out: &mut Vec<Command>,
    ) {
        if firing_model != FiringModel::Cooldown {
            return;
        }

        if defenders.is_empty() || attackers.is_empty() {
            return;
        }

        self.occupied_lanes.clear();
        self.occupied_lanes
            .extend(attackers.iter().map(|attacker| attacker.lane));
        self.occupied_lanes.sort_unstable();
        self.occupied_lanes.dedup();

        self.scratch.clear();

        for defender in defenders.iter() {
            let ready = matches!(
                defender.armament,
                ArmamentSnapshot::Cooldown { ready: true, .. }
            );
            if !ready {
                continue;
            }

            if self
                .occupied_lanes
                .binary_search(&defender.cell.lane())
                .is_ok()
            {
                self.scratch.push(Command::FireDefender {
                    cell: defender.cell,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
