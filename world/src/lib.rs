#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world owns the defender grid and the entity registry of attackers and
//! projectiles. It is mutated exclusively through [`apply`] and observed
//! through the read-only functions in [`query`].

mod attackers;
mod defenders;
mod grid;
mod projectiles;

use lane_defence_core::{
    AttackerId, AttackerStatTable, CellCoord, Command, Event, FiringModel, Outcome, Playfield,
    ProjectileId, ProjectileKind, RemovalCause, ShotError, WELCOME_BANNER,
};
use tracing::info;

use self::{
    attackers::Attacker,
    defenders::{ManualShot, TimerOutcome},
    grid::Grid,
    projectiles::Projectile,
};

/// Configuration parameters required to construct a world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    playfield: Playfield,
    firing_model: FiringModel,
    stats: AttackerStatTable,
}

impl Config {
    /// Creates a new configuration from explicit values.
    #[must_use]
    pub const fn new(
        playfield: Playfield,
        firing_model: FiringModel,
        stats: AttackerStatTable,
    ) -> Self {
        Self {
            playfield,
            firing_model,
            stats,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Playfield::default(),
            FiringModel::Cooldown,
            AttackerStatTable::COOLDOWN,
        )
    }
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    firing_model: FiringModel,
    stats: AttackerStatTable,
    grid: Grid,
    attackers: Vec<Attacker>,
    projectiles: Vec<Projectile>,
    next_attacker_id: AttackerId,
    next_projectile_id: ProjectileId,
    tick_index: u64,
    outcome: Outcome,
}

impl World {
    /// Creates a new world with an empty grid and no entities.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            banner: WELCOME_BANNER,
            firing_model: config.firing_model,
            stats: config.stats,
            grid: Grid::new(config.playfield),
            attackers: Vec::new(),
            projectiles: Vec::new(),
            next_attacker_id: AttackerId::new(0),
            next_projectile_id: ProjectileId::new(0),
            tick_index: 0,
            outcome: Outcome::InProgress,
        }
    }

    fn playfield(&self) -> Playfield {
        *self.grid.playfield()
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        id
    }

    fn allocate_attacker_id(&mut self) -> AttackerId {
        let id = self.next_attacker_id;
        self.next_attacker_id = AttackerId::new(id.get().saturating_add(1));
        id
    }

    fn launch(
        &mut self,
        origin: CellCoord,
        kind: ProjectileKind,
        offset: f32,
        out_events: &mut Vec<Event>,
    ) {
        let x = self.playfield().right_edge(origin.column()) + offset;
        let id = self.allocate_projectile_id();
        self.projectiles.push(Projectile::new(id, kind, origin.lane(), x));
        out_events.push(Event::ProjectileFired {
            projectile: id,
            kind,
            origin,
        });
    }

    fn remove_defender(
        &mut self,
        cell: CellCoord,
        cause: RemovalCause,
        out_events: &mut Vec<Event>,
    ) {
        if let Some(defender) = self.grid.remove(cell) {
            out_events.push(Event::DefenderRemoved {
                defender: defender.id,
                cell,
                cause,
            });
        }
    }

    fn advance_timers(&mut self, out_events: &mut Vec<Event>) {
        let mut depleted = Vec::new();
        for defender in self.grid.iter_mut() {
            if defender.advance_timers() == TimerOutcome::Depleted {
                depleted.push(defender.cell);
            }
        }
        for cell in depleted {
            self.remove_defender(cell, RemovalCause::AmmoDepleted, out_events);
        }
    }

    fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let right_bound = self.playfield().width();
        self.projectiles.retain_mut(|projectile| {
            projectile.advance();
            if projectile.is_beyond(right_bound) {
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
                false
            } else {
                true
            }
        });
    }

    fn advance_attackers(&mut self, out_events: &mut Vec<Event>) {
        for attacker in &mut self.attackers {
            if let Some(defender) = attacker.detect_defender(&self.grid) {
                out_events.push(Event::AttackerEngaged {
                    attacker: attacker.id,
                    defender,
                });
            }
            attacker.step(&mut self.grid, out_events);
        }
    }

    /// Resolves projectile impacts against a stable index snapshot of both
    /// collections, then drops spent projectiles and defeated attackers.
    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        if self.projectiles.is_empty() || self.attackers.is_empty() {
            return;
        }

        let mut spent = vec![false; self.projectiles.len()];
        let mut defeated = vec![false; self.attackers.len()];

        for (attacker_index, attacker) in self.attackers.iter_mut().enumerate() {
            for (projectile_index, projectile) in self.projectiles.iter().enumerate() {
                if spent[projectile_index]
                    || projectile.lane != attacker.lane
                    || !attacker.overlaps(projectile.x)
                {
                    continue;
                }

                spent[projectile_index] = true;
                if projectile.kind.freezes() {
                    attacker.freeze();
                    out_events.push(Event::AttackerFrozen {
                        attacker: attacker.id,
                    });
                    continue;
                }

                let damage = projectile.kind.damage();
                let was_defeated = attacker.take_hit(damage);
                out_events.push(Event::AttackerHit {
                    attacker: attacker.id,
                    projectile: projectile.id,
                    damage,
                });

                if was_defeated {
                    defeated[attacker_index] = true;
                    out_events.push(Event::AttackerDefeated {
                        attacker: attacker.id,
                    });
                    break;
                }
            }
        }

        let mut spent_flags = spent.into_iter();
        self.projectiles
            .retain(|_| !spent_flags.next().unwrap_or(false));
        let mut defeated_flags = defeated.into_iter();
        self.attackers
            .retain(|_| !defeated_flags.next().unwrap_or(false));
    }

    fn check_breach(&mut self, out_events: &mut Vec<Event>) {
        let Some(attacker) = self.attackers.iter().find(|attacker| attacker.has_breached()) else {
            return;
        };

        out_events.push(Event::AttackerBreached {
            attacker: attacker.id,
            lane: attacker.lane,
        });
        info!(
            attacker = attacker.id.get(),
            lane = attacker.lane,
            tick = self.tick_index,
            "attacker breached the left edge"
        );
        self.conclude(Outcome::Lost, out_events);
    }

    fn conclude(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.outcome = outcome;
        out_events.push(Event::OutcomeReached { outcome });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session reached a terminal outcome every command is inert.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_terminal() {
        return;
    }

    match command {
        Command::PlaceDefender { cell, kind } => {
            match world.grid.place(cell, kind, world.firing_model) {
                Ok(defender) => out_events.push(Event::DefenderPlaced {
                    defender,
                    cell,
                    kind,
                }),
                Err(reason) => out_events.push(Event::DefenderPlacementRejected {
                    cell,
                    kind,
                    reason,
                }),
            }
        }
        Command::RemoveDefender { cell } => {
            world.remove_defender(cell, RemovalCause::Cleared, out_events);
        }
        Command::ManualShoot { cell } => {
            let Some(defender) = world.grid.occupant_mut(cell) else {
                out_events.push(Event::ShotRejected {
                    cell,
                    reason: ShotError::EmptyCell,
                });
                return;
            };

            match defender.manual_shot() {
                ManualShot::Fired => world.launch(cell, ProjectileKind::Standard, 0.0, out_events),
                ManualShot::Depleted => {
                    world.remove_defender(cell, RemovalCause::AmmoDepleted, out_events);
                }
                ManualShot::Automatic => out_events.push(Event::ShotRejected {
                    cell,
                    reason: ShotError::AutomaticFiring,
                }),
            }
        }
        Command::FireDefender { cell } => {
            let Some(defender) = world.grid.occupant_mut(cell) else {
                return;
            };
            if !defender.ready_to_fire() {
                return;
            }

            defender.restart_cooldown();
            let kind = defender.kind;
            for offset in kind.volley_offsets() {
                world.launch(cell, kind.projectile(), *offset, out_events);
            }
        }
        Command::SpawnAttacker { lane, kind } => {
            let playfield = world.playfield();
            if lane >= playfield.lanes {
                return;
            }

            let id = world.allocate_attacker_id();
            let stats = world.stats.stats(kind);
            world
                .attackers
                .push(Attacker::spawn(id, kind, lane, playfield.width(), stats));
            out_events.push(Event::AttackerSpawned {
                attacker: id,
                kind,
                lane,
            });
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
            world.advance_timers(out_events);
        }
        Command::AdvanceEntities => {
            world.advance_projectiles(out_events);
            world.advance_attackers(out_events);
            world.resolve_collisions(out_events);
            world.check_breach(out_events);
        }
        Command::DeclareVictory => {
            if world.attackers.is_empty() {
                info!(tick = world.tick_index, "every wave cleared");
                world.conclude(Outcome::Won, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lane_defence_core::{
        AttackerView, CellCoord, DefenderSnapshot, DefenderView, FiringModel, Outcome, Playfield,
        ProjectileView,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the playfield dimensions the world was configured with.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.playfield()
    }

    /// Reports the active firing model.
    #[must_use]
    pub fn firing_model(world: &World) -> FiringModel {
        world.firing_model
    }

    /// Index of the most recent tick.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports the terminal state of the session.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Snapshot of the defender occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<DefenderSnapshot> {
        world.grid.occupant(cell).map(|defender| defender.snapshot())
    }

    /// Captures a read-only view of every defender on the grid.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .grid
                .iter()
                .map(|defender| defender.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of every live attacker.
    #[must_use]
    pub fn attacker_view(world: &World) -> AttackerView {
        AttackerView::from_snapshots(
            world
                .attackers
                .iter()
                .map(|attacker| attacker.snapshot())
                .collect(),
        )
    }

    /// Number of live attackers.
    #[must_use]
    pub fn attacker_count(world: &World) -> usize {
        world.attackers.len()
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{
        ArmamentSnapshot, AttackerKind, DefenderId, DefenderKind, PlacementError,
    };

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    fn spawn(world: &mut World, lane: u32, kind: AttackerKind) -> AttackerId {
        let events = run(world, Command::SpawnAttacker { lane, kind });
        match events.as_slice() {
            [Event::AttackerSpawned { attacker, .. }] => *attacker,
            other => panic!("unexpected spawn events: {other:?}"),
        }
    }

    fn ammo_world() -> World {
        World::new(Config::new(
            Playfield::default(),
            FiringModel::Ammo,
            AttackerStatTable::AMMO,
        ))
    }

    #[test]
    fn placement_on_occupied_or_missing_cells_has_no_effect() {
        let mut world = World::default();
        let cell = CellCoord::new(2, 4);
        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Basic,
            },
        );

        let events = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Rapid,
            },
        );
        assert_eq!(
            events,
            vec![Event::DefenderPlacementRejected {
                cell,
                kind: DefenderKind::Rapid,
                reason: PlacementError::Occupied,
            }]
        );
        let events = run(
            &mut world,
            Command::PlaceDefender {
                cell: CellCoord::new(5, 0),
                kind: DefenderKind::Basic,
            },
        );
        assert!(matches!(
            events.as_slice(),
            [Event::DefenderPlacementRejected {
                reason: PlacementError::OutOfBounds,
                ..
            }]
        ));

        let view = query::defender_view(&world);
        assert_eq!(view.len(), 1);
        assert_eq!(
            view.at(cell).map(|snapshot| snapshot.kind),
            Some(DefenderKind::Basic)
        );
    }

    #[test]
    fn place_then_remove_leaves_the_cell_untouched() {
        let mut world = World::default();
        let cell = CellCoord::new(0, 0);
        let before = query::occupant(&world, cell);

        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Freezer,
            },
        );
        let events = run(&mut world, Command::RemoveDefender { cell });

        assert!(matches!(
            events.as_slice(),
            [Event::DefenderRemoved {
                cause: RemovalCause::Cleared,
                ..
            }]
        ));
        assert_eq!(query::occupant(&world, cell), before);
        assert!(query::defender_view(&world).is_empty());
        assert!(run(&mut world, Command::RemoveDefender { cell }).is_empty());
    }

    #[test]
    fn fire_defender_requires_an_elapsed_cooldown() {
        let mut world = World::default();
        let cell = CellCoord::new(1, 2);
        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Rapid,
            },
        );
        for _ in 0..59 {
            let _ = run(&mut world, Command::Tick);
        }
        assert!(run(&mut world, Command::FireDefender { cell }).is_empty());

        let _ = run(&mut world, Command::Tick);
        let events = run(&mut world, Command::FireDefender { cell });
        assert_eq!(events.len(), 2, "rapid defenders fire a pair");

        let projectiles = query::projectile_view(&world).into_vec();
        assert_eq!(projectiles.len(), 2);
        assert_eq!(projectiles[0].x, 300.0);
        assert_eq!(projectiles[1].x, 320.0);
        assert!(projectiles
            .iter()
            .all(|projectile| projectile.kind == ProjectileKind::Rapid && projectile.lane == 1));

        let snapshot = query::occupant(&world, cell).expect("defender present");
        assert_eq!(
            snapshot.armament,
            ArmamentSnapshot::Cooldown {
                elapsed: 0,
                ready: false
            }
        );
    }

    #[test]
    fn standard_hit_deals_one_damage_and_leaves_freeze_untouched() {
        let mut world = World::default();
        let attacker = spawn(&mut world, 0, AttackerKind::Tanky);
        world.attackers[0].x = 500.0;
        world.projectiles.push(Projectile::new(
            ProjectileId::new(99),
            ProjectileKind::Standard,
            0,
            490.0,
        ));

        let events = run(&mut world, Command::AdvanceEntities);

        assert!(events.contains(&Event::AttackerHit {
            attacker,
            projectile: ProjectileId::new(99),
            damage: 1,
        }));
        let snapshot = query::attacker_view(&world).into_vec()[0];
        assert_eq!(snapshot.health, 9.0);
        assert!(!snapshot.frozen);
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn freezing_hit_freezes_without_damage() {
        let mut world = World::default();
        let attacker = spawn(&mut world, 3, AttackerKind::Weak);
        world.attackers[0].x = 700.0;
        world.projectiles.push(Projectile::new(
            ProjectileId::new(5),
            ProjectileKind::Freezing,
            3,
            690.0,
        ));

        let events = run(&mut world, Command::AdvanceEntities);

        assert!(events.contains(&Event::AttackerFrozen { attacker }));
        let snapshot = query::attacker_view(&world).into_vec()[0];
        assert_eq!(snapshot.health, 5.0);
        assert!(snapshot.frozen);
        let frozen_at = snapshot.x;

        for _ in 0..300 {
            let _ = run(&mut world, Command::AdvanceEntities);
            assert_eq!(query::attacker_view(&world).into_vec()[0].x, frozen_at);
        }
        let _ = run(&mut world, Command::AdvanceEntities);
        assert_eq!(query::attacker_view(&world).into_vec()[0].x, frozen_at - 2.0);
    }

    #[test]
    fn projectiles_ignore_attackers_in_other_lanes() {
        let mut world = World::default();
        let _ = spawn(&mut world, 1, AttackerKind::Weak);
        world.attackers[0].x = 500.0;
        world.projectiles.push(Projectile::new(
            ProjectileId::new(0),
            ProjectileKind::Standard,
            2,
            490.0,
        ));

        let _ = run(&mut world, Command::AdvanceEntities);

        assert_eq!(query::projectile_view(&world).len(), 1);
        assert_eq!(query::attacker_view(&world).into_vec()[0].health, 5.0);
    }

    #[test]
    fn removing_entities_mid_scan_never_skips_neighbours() {
        let mut world = World::default();
        let first = spawn(&mut world, 0, AttackerKind::Weak);
        let second = spawn(&mut world, 0, AttackerKind::Weak);
        world.attackers[0].x = 400.0;
        world.attackers[0].health = 1.0;
        world.attackers[1].x = 405.0;
        for (id, x) in [(0, 440.0), (1, 445.0), (2, 450.0)] {
            world.projectiles.push(Projectile::new(
                ProjectileId::new(id),
                ProjectileKind::Standard,
                0,
                x,
            ));
        }

        let events = run(&mut world, Command::AdvanceEntities);

        let hits: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::AttackerHit {
                    attacker,
                    projectile,
                    ..
                } => Some((*attacker, projectile.get())),
                _ => None,
            })
            .collect();
        assert_eq!(hits, vec![(first, 0), (second, 1), (second, 2)]);
        assert!(events.contains(&Event::AttackerDefeated { attacker: first }));

        let survivors = query::attacker_view(&world).into_vec();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id, second);
        assert_eq!(survivors[0].health, 3.0);
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn projectiles_expire_past_the_right_edge() {
        let mut world = World::default();
        world.projectiles.push(Projectile::new(
            ProjectileId::new(7),
            ProjectileKind::Standard,
            0,
            1595.0,
        ));

        let events = run(&mut world, Command::AdvanceEntities);

        assert_eq!(
            events,
            vec![Event::ProjectileExpired {
                projectile: ProjectileId::new(7)
            }]
        );
    }

    #[test]
    fn attacker_reaching_the_left_edge_loses_regardless_of_health() {
        let mut world = World::default();
        let attacker = spawn(&mut world, 2, AttackerKind::Weak);
        world.attackers[0].x = 5.0;

        let events = run(&mut world, Command::AdvanceEntities);
        assert!(events.is_empty());
        let events = run(&mut world, Command::AdvanceEntities);
        assert!(events.is_empty());
        let events = run(&mut world, Command::AdvanceEntities);

        assert_eq!(
            events,
            vec![
                Event::AttackerBreached { attacker, lane: 2 },
                Event::OutcomeReached {
                    outcome: Outcome::Lost
                },
            ]
        );
        assert_eq!(query::outcome(&world), Outcome::Lost);
        assert!(query::attacker_view(&world).into_vec()[0].health > 0.0);
    }

    #[test]
    fn attacker_reengages_a_defender_placed_in_an_eaten_cell() {
        let mut world = World::default();
        let cell = CellCoord::new(0, 3);
        let attacker = spawn(&mut world, 0, AttackerKind::Weak);
        world.attackers[0].x = 350.0;
        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Basic,
            },
        );

        let mut ticks = 0;
        while query::occupant(&world, cell).is_some() {
            let _ = run(&mut world, Command::AdvanceEntities);
            ticks += 1;
            assert!(ticks <= 60, "defender should fall after roughly fifty bites");
        }
        let _ = run(&mut world, Command::AdvanceEntities);
        assert_eq!(query::attacker_view(&world).into_vec()[0].x, 348.0);

        let events = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Rapid,
            },
        );
        let replacement = match events.as_slice() {
            [Event::DefenderPlaced { defender, .. }] => *defender,
            other => panic!("unexpected placement events: {other:?}"),
        };
        assert_eq!(replacement, DefenderId::new(1));

        let events = run(&mut world, Command::AdvanceEntities);

        assert_eq!(
            events,
            vec![Event::AttackerEngaged {
                attacker,
                defender: replacement,
            }]
        );
        let snapshot = query::attacker_view(&world).into_vec()[0];
        assert_eq!(snapshot.x, 348.0, "engaging holds the attacker in place");
        assert_eq!(snapshot.engaged, Some(replacement));
    }

    #[test]
    fn terminal_world_ignores_every_command() {
        let mut world = World::default();
        let _ = spawn(&mut world, 0, AttackerKind::Weak);
        world.attackers[0].x = 1.0;
        let _ = run(&mut world, Command::AdvanceEntities);
        assert_eq!(query::outcome(&world), Outcome::Lost);

        let tick = query::tick_index(&world);
        assert!(run(&mut world, Command::Tick).is_empty());
        assert!(run(
            &mut world,
            Command::PlaceDefender {
                cell: CellCoord::new(0, 0),
                kind: DefenderKind::Basic
            }
        )
        .is_empty());
        assert!(run(&mut world, Command::DeclareVictory).is_empty());
        assert_eq!(query::tick_index(&world), tick);
        assert!(query::defender_view(&world).is_empty());
    }

    #[test]
    fn victory_requires_an_empty_playfield() {
        let mut world = World::default();
        let _ = spawn(&mut world, 0, AttackerKind::Weak);
        assert!(run(&mut world, Command::DeclareVictory).is_empty());

        world.attackers.clear();
        let events = run(&mut world, Command::DeclareVictory);
        assert_eq!(
            events,
            vec![Event::OutcomeReached {
                outcome: Outcome::Won
            }]
        );
    }

    #[test]
    fn spawns_outside_the_lane_range_are_ignored() {
        let mut world = World::default();
        assert!(run(
            &mut world,
            Command::SpawnAttacker {
                lane: 5,
                kind: AttackerKind::Weak
            }
        )
        .is_empty());
        assert_eq!(query::attacker_count(&world), 0);
    }

    #[test]
    fn manual_shot_at_zero_ammo_defers_removal_to_the_next_check() {
        let mut world = ammo_world();
        let cell = CellCoord::new(0, 0);
        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Basic,
            },
        );
        for _ in 0..4 {
            let _ = run(&mut world, Command::ManualShoot { cell });
        }
        assert_eq!(
            query::occupant(&world, cell).map(|snapshot| snapshot.armament),
            Some(ArmamentSnapshot::Ammo {
                ammo: 0,
                reload_progress: 0
            })
        );

        let events = run(&mut world, Command::ManualShoot { cell });
        assert!(matches!(
            events.as_slice(),
            [Event::ProjectileFired {
                kind: ProjectileKind::Standard,
                ..
            }]
        ));
        let snapshot = query::occupant(&world, cell).expect("still on the grid at -1 ammo");
        assert_eq!(
            snapshot.armament,
            ArmamentSnapshot::Ammo {
                ammo: -1,
                reload_progress: 0
            }
        );

        let events = run(&mut world, Command::Tick);
        assert!(events.contains(&Event::DefenderRemoved {
            defender: snapshot.id,
            cell,
            cause: RemovalCause::AmmoDepleted,
        }));
        assert!(query::occupant(&world, cell).is_none());
    }

    #[test]
    fn manual_shot_on_underflowed_magazine_removes_instead_of_firing() {
        let mut world = ammo_world();
        let cell = CellCoord::new(3, 3);
        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Freezer,
            },
        );
        for _ in 0..5 {
            let _ = run(&mut world, Command::ManualShoot { cell });
        }

        let events = run(&mut world, Command::ManualShoot { cell });

        assert!(matches!(
            events.as_slice(),
            [Event::DefenderRemoved {
                cause: RemovalCause::AmmoDepleted,
                ..
            }]
        ));
        assert_eq!(query::projectile_view(&world).len(), 5);
    }

    #[test]
    fn manual_shots_are_rejected_without_effect() {
        let mut world = World::default();
        let cell = CellCoord::new(0, 1);
        assert_eq!(
            run(&mut world, Command::ManualShoot { cell }),
            vec![Event::ShotRejected {
                cell,
                reason: ShotError::EmptyCell
            }]
        );

        let _ = run(
            &mut world,
            Command::PlaceDefender {
                cell,
                kind: DefenderKind::Basic,
            },
        );
        assert_eq!(
            run(&mut world, Command::ManualShoot { cell }),
            vec![Event::ShotRejected {
                cell,
                reason: ShotError::AutomaticFiring
            }]
        );
        assert!(query::projectile_view(&world).is_empty());
    }
}
