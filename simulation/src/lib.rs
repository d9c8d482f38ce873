#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep simulation clock that owns one Lane Defence session.
//!
//! A [`Simulation`] wires the world to its pure systems and advances all of
//! them by one tick per [`Simulation::step`]:
//!
//! 1. queued player input and scripted shots are applied;
//! 2. defender cooldowns and reloads advance;
//! 3. the wave director spawns attackers;
//! 4. ready defenders fire;
//! 5. projectiles move, attackers act, collisions resolve and breaches end the run;
//! 6. wave completion is reviewed.

mod config;

use std::collections::VecDeque;

use lane_defence_core::{Command, Event, FiringModel, Outcome, PlayerInput, WaveSnapshot};
use lane_defence_system_defender_combat::DefenderCombat;
use lane_defence_system_waves::{self as waves, WaveDirector};
use lane_defence_world::{self as world, query, World};
use tracing::{debug, info, trace};

pub use config::{
    ConfigError, LayoutEntry, ScriptedShot, SessionConfig, DEFAULT_SEED, MAX_PLAYFIELD_CELLS,
};

/// A single game session: world state, systems and the pending input queue.
#[derive(Debug)]
pub struct Simulation {
    config: SessionConfig,
    world: World,
    combat: DefenderCombat,
    waves: WaveDirector,
    pending: VecDeque<PlayerInput>,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation {
    /// Validates the configuration and starts a fresh session.
    ///
    /// Layout entries are queued as placements and land on the first tick.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut simulation = Self {
            world: build_world(&config),
            combat: DefenderCombat::new(),
            waves: build_director(&config),
            pending: VecDeque::new(),
            events: Vec::new(),
            commands: Vec::new(),
            config,
        };
        simulation.queue_layout();
        info!(
            firing_model = ?simulation.config.firing_model,
            seed = simulation.config.seed,
            waves = simulation.config.waves.len(),
            "session started"
        );
        Ok(simulation)
    }

    /// Starts a default session with the provided firing model and seed.
    pub fn with_seed(firing_model: FiringModel, seed: u64) -> Result<Self, ConfigError> {
        Self::new(SessionConfig {
            firing_model,
            seed,
            ..SessionConfig::default()
        })
    }

    /// Discards the current session and starts over from the same configuration.
    pub fn restart(&mut self) {
        self.world = build_world(&self.config);
        self.combat = DefenderCombat::new();
        self.waves = build_director(&self.config);
        self.pending.clear();
        self.events.clear();
        self.commands.clear();
        self.queue_layout();
        info!(seed = self.config.seed, "session restarted");
    }

    /// Buffers player input until the next tick.
    pub fn queue(&mut self, input: PlayerInput) {
        self.pending.push_back(input);
    }

    /// Advances the session by exactly one tick and returns the emitted events.
    ///
    /// Once the session reached a terminal outcome this is a no-op returning no
    /// events.
    pub fn step(&mut self) -> &[Event] {
        self.events.clear();

        if query::outcome(&self.world).is_terminal() {
            self.pending.clear();
            return &self.events;
        }

        let upcoming = query::tick_index(&self.world).saturating_add(1);
        for shot in self.config.shots.iter().filter(|shot| shot.tick == upcoming) {
            self.pending.push_back(PlayerInput::ManualShoot { cell: shot.cell() });
        }

        while let Some(input) = self.pending.pop_front() {
            world::apply(&mut self.world, Command::from(input), &mut self.events);
        }

        let tick_start = self.events.len();
        world::apply(&mut self.world, Command::Tick, &mut self.events);

        self.commands.clear();
        self.waves.handle_spawns(
            &self.events[tick_start..],
            query::playfield(&self.world).lanes,
            &mut self.commands,
        );
        self.flush_commands();

        self.combat.handle(
            query::firing_model(&self.world),
            &query::defender_view(&self.world),
            &query::attacker_view(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        world::apply(&mut self.world, Command::AdvanceEntities, &mut self.events);

        if !query::outcome(&self.world).is_terminal()
            && self
                .waves
                .review(query::attacker_count(&self.world), &mut self.commands)
        {
            let snapshot = self.waves.snapshot();
            if !snapshot.completed {
                info!(
                    wave = snapshot.wave,
                    total_waves = snapshot.total_waves,
                    "wave advanced"
                );
            }
        }
        self.flush_commands();

        self.log_events();
        &self.events
    }

    /// Terminal state of the session.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        query::outcome(&self.world)
    }

    /// Read-only access to the world for adapters and queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Progress of the wave director.
    #[must_use]
    pub fn wave_snapshot(&self) -> WaveSnapshot {
        self.waves.snapshot()
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick_index(&self) -> u64 {
        query::tick_index(&self.world)
    }

    /// Configuration the session was started from.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn queue_layout(&mut self) {
        for entry in &self.config.layout {
            self.pending.push_back(PlayerInput::PlaceDefender {
                cell: entry.cell(),
                kind: entry.kind,
            });
        }
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn log_events(&self) {
        let tick = query::tick_index(&self.world);
        for event in &self.events {
            match event {
                Event::AttackerSpawned {
                    attacker,
                    kind,
                    lane,
                } => debug!(tick, attacker = attacker.get(), ?kind, lane, "attacker spawned"),
                Event::ProjectileFired {
                    projectile,
                    kind,
                    origin,
                } => debug!(
                    tick,
                    projectile = projectile.get(),
                    ?kind,
                    lane = origin.lane(),
                    column = origin.column(),
                    "projectile fired"
                ),
                Event::DefenderRemoved {
                    defender,
                    cell,
                    cause,
                } => debug!(
                    tick,
                    defender = defender.get(),
                    lane = cell.lane(),
                    column = cell.column(),
                    ?cause,
                    "defender removed"
                ),
                Event::OutcomeReached { outcome } => info!(tick, ?outcome, "session concluded"),
                _ => {}
            }
        }
        trace!(
            tick,
            events = self.events.len(),
            attackers = query::attacker_count(&self.world),
            "tick complete"
        );
    }
}

fn build_world(config: &SessionConfig) -> World {
    World::new(world::Config::new(
        config.playfield,
        config.firing_model,
        config.attacker_stats(),
    ))
}

fn build_director(config: &SessionConfig) -> WaveDirector {
    WaveDirector::new(waves::Config::new(
        config.spawn_interval_ticks,
        config.seed,
        config.waves.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{CellCoord, DefenderKind};

    #[test]
    fn layout_lands_on_the_first_tick() {
        let config = SessionConfig {
            layout: vec![LayoutEntry {
                lane: 1,
                column: 2,
                kind: DefenderKind::Rapid,
            }],
            ..SessionConfig::default()
        };
        let mut simulation = Simulation::new(config).expect("valid config");
        assert!(query::defender_view(simulation.world()).is_empty());

        let events = simulation.step().to_vec();

        assert!(matches!(
            events.first(),
            Some(Event::DefenderPlaced {
                kind: DefenderKind::Rapid,
                ..
            })
        ));
        assert!(query::occupant(simulation.world(), CellCoord::new(1, 2)).is_some());
    }

    #[test]
    fn scripted_shots_fire_during_their_tick() {
        let cell = CellCoord::new(2, 0);
        let config = SessionConfig {
            firing_model: FiringModel::Ammo,
            layout: vec![LayoutEntry {
                lane: 2,
                column: 0,
                kind: DefenderKind::Basic,
            }],
            shots: vec![ScriptedShot {
                tick: 3,
                lane: 2,
                column: 0,
            }],
            ..SessionConfig::default()
        };
        let mut simulation = Simulation::new(config).expect("valid config");

        for _ in 0..2 {
            assert!(!simulation
                .step()
                .iter()
                .any(|event| matches!(event, Event::ProjectileFired { .. })));
        }
        let events = simulation.step().to_vec();

        assert!(matches!(
            events.first(),
            Some(Event::ProjectileFired { origin, .. }) if *origin == cell
        ));
        assert_eq!(events[1], Event::TimeAdvanced { tick: 3 });
        assert_eq!(query::projectile_view(simulation.world()).len(), 1);
    }

    #[test]
    fn input_is_applied_before_the_tick_advances() {
        let mut simulation =
            Simulation::with_seed(FiringModel::Cooldown, 5).expect("valid config");
        simulation.queue(PlayerInput::PlaceDefender {
            cell: CellCoord::new(0, 0),
            kind: DefenderKind::Basic,
        });

        let events = simulation.step().to_vec();

        assert!(matches!(events[0], Event::DefenderPlaced { .. }));
        assert_eq!(events[1], Event::TimeAdvanced { tick: 1 });
    }

    #[test]
    fn restart_rewinds_to_the_initial_state() {
        let mut simulation =
            Simulation::with_seed(FiringModel::Cooldown, 11).expect("valid config");
        for _ in 0..100 {
            let _ = simulation.step();
        }
        assert!(simulation.tick_index() > 0);

        simulation.restart();

        assert_eq!(simulation.tick_index(), 0);
        assert_eq!(query::attacker_count(simulation.world()), 0);
        assert_eq!(simulation.wave_snapshot().wave, 1);
        assert_eq!(simulation.outcome(), Outcome::InProgress);
    }

    #[test]
    fn invalid_configs_are_refused() {
        let config = SessionConfig {
            waves: Vec::new(),
            ..SessionConfig::default()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ConfigError::NoWaves)
        ));
    }
}
