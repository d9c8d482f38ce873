//! End-of-run summary printed by the command-line runner.

use std::{fmt, process::ExitCode};

use lane_defence_core::{Event, Outcome, RemovalCause, WaveSnapshot};
use serde::Serialize;

/// How the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Verdict {
    Won,
    Lost,
    TickBudgetExhausted,
}

impl Verdict {
    pub(crate) fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
            Outcome::InProgress => Self::TickBudgetExhausted,
        }
    }

    pub(crate) fn exit_code(self) -> ExitCode {
        match self {
            Self::Won => ExitCode::SUCCESS,
            Self::Lost => ExitCode::from(2),
            Self::TickBudgetExhausted => ExitCode::from(3),
        }
    }
}

/// Running totals gathered from the event stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Tally {
    pub(crate) defenders_placed: u32,
    pub(crate) placements_rejected: u32,
    pub(crate) defenders_eaten: u32,
    pub(crate) defenders_depleted: u32,
    pub(crate) projectiles_fired: u32,
    pub(crate) attackers_spawned: u32,
    pub(crate) attackers_defeated: u32,
    pub(crate) attackers_frozen: u32,
}

impl Tally {
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            let counter = match event {
                Event::DefenderPlaced { .. } => &mut self.defenders_placed,
                Event::DefenderPlacementRejected { .. } => &mut self.placements_rejected,
                Event::DefenderRemoved {
                    cause: RemovalCause::Eaten,
                    ..
                } => &mut self.defenders_eaten,
                Event::DefenderRemoved {
                    cause: RemovalCause::AmmoDepleted,
                    ..
                } => &mut self.defenders_depleted,
                Event::ProjectileFired { .. } => &mut self.projectiles_fired,
                Event::AttackerSpawned { .. } => &mut self.attackers_spawned,
                Event::AttackerDefeated { .. } => &mut self.attackers_defeated,
                Event::AttackerFrozen { .. } => &mut self.attackers_frozen,
                _ => continue,
            };
            *counter = counter.saturating_add(1);
        }
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct Report {
    pub(crate) verdict: Verdict,
    pub(crate) ticks: u64,
    pub(crate) seed: u64,
    pub(crate) wave: WaveSnapshot,
    pub(crate) tally: Tally,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.verdict {
            Verdict::Won => "won",
            Verdict::Lost => "lost",
            Verdict::TickBudgetExhausted => "tick budget exhausted",
        };
        writeln!(f, "result: {verdict} after {} ticks (seed {})", self.ticks, self.seed)?;
        writeln!(
            f,
            "wave {}/{}, {} still to spawn",
            self.wave.wave, self.wave.total_waves, self.wave.remaining_to_spawn
        )?;
        writeln!(
            f,
            "attackers: {} spawned, {} defeated, {} frozen",
            self.tally.attackers_spawned, self.tally.attackers_defeated, self.tally.attackers_frozen
        )?;
        write!(
            f,
            "defenders: {} placed, {} rejected, {} eaten, {} depleted; {} projectiles fired",
            self.tally.defenders_placed,
            self.tally.placements_rejected,
            self.tally.defenders_eaten,
            self.tally.defenders_depleted,
            self.tally.projectiles_fired
        )
    }
}
