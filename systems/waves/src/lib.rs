#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director responsible for emitting attacker spawn commands.

use lane_defence_core::{AttackerKind, Command, Event, WaveSnapshot, WaveSpec};
use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Debug)]
pub struct Config {
    spawn_interval_ticks: u32,
    rng_seed: u64,
    waves: Vec<WaveSpec>,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence, seed and
    /// ordered wave table.
    #[must_use]
    pub fn new(spawn_interval_ticks: u32, rng_seed: u64, waves: Vec<WaveSpec>) -> Self {
        Self {
            spawn_interval_ticks,
            rng_seed,
            waves,
        }
    }
}

/// Pure system that spawns attackers from the current wave's quota and
/// advances through the wave table.
#[derive(Debug)]
pub struct WaveDirector {
    waves: Vec<WaveSpec>,
    current: usize,
    remaining: WaveSpec,
    spawn_interval_ticks: u32,
    timer: u32,
    completed: bool,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a new wave director positioned at the first wave.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let remaining = config.waves.first().copied().unwrap_or_default();
        Self {
            completed: config.waves.is_empty(),
            waves: config.waves,
            current: 0,
            remaining,
            spawn_interval_ticks: config.spawn_interval_ticks,
            timer: 0,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes tick events and emits `Command::SpawnAttacker` entries.
    ///
    /// The spawn timer advances once per `Event::TimeAdvanced` and resets only
    /// when an attacker actually spawns.
    pub fn handle_spawns(&mut self, events: &[Event], lanes: u32, out: &mut Vec<Command>) {
        if self.completed || lanes == 0 || self.spawn_interval_ticks == 0 {
            return;
        }

        for event in events {
            if let Event::TimeAdvanced { .. } = event {
                self.timer = self.timer.saturating_add(1);
                if self.timer < self.spawn_interval_ticks || self.remaining.total() == 0 {
                    continue;
                }

                if let Some(kind) = self.select_kind() {
                    let _ = self.remaining.take(kind);
                    let lane = self.rng.gen_range(0..lanes);
                    out.push(Command::SpawnAttacker { lane, kind });
                    self.timer = 0;
                }
            }
        }
    }

    /// Advances to the next wave once the quota is spent and the playfield is
    /// clear, emitting `Command::DeclareVictory` after the final wave.
    ///
    /// Returns `true` when the wave index moved.
    pub fn review(&mut self, live_attackers: usize, out: &mut Vec<Command>) -> bool {
        if self.completed || self.remaining.total() > 0 || live_attackers > 0 {
            return false;
        }

        self.current += 1;
        match self.waves.get(self.current) {
            Some(next) => self.remaining = *next,
            None => {
                self.completed = true;
                out.push(Command::DeclareVictory);
            }
        }
        true
    }

    /// Captures the director's progress for adapters.
    #[must_use]
    pub fn snapshot(&self) -> WaveSnapshot {
        let total_waves = u32::try_from(self.waves.len()).unwrap_or(u32::MAX);
        let wave = u32::try_from(self.current.saturating_add(1))
            .unwrap_or(u32::MAX)
            .min(total_waves);
        WaveSnapshot {
            wave,
            total_waves,
            remaining_to_spawn: self.remaining.total(),
            completed: self.completed,
        }
    }

    fn select_kind(&mut self) -> Option<AttackerKind> {
        let weights = AttackerKind::ALL.map(|kind| self.remaining.count(kind));
        let distribution = WeightedIndex::new(weights).ok()?;
        AttackerKind::ALL
            .get(distribution.sample(&mut self.rng))
            .copied()
    }
}
