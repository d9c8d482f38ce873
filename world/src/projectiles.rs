//! Straight-line projectiles travelling along the lanes.

use lane_defence_core::{ProjectileId, ProjectileKind, ProjectileSnapshot, PROJECTILE_SPEED};

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) kind: ProjectileKind,
    pub(crate) lane: u32,
    pub(crate) x: f32,
}

impl Projectile {
    pub(crate) fn new(id: ProjectileId, kind: ProjectileKind, lane: u32, x: f32) -> Self {
        Self { id, kind, lane, x }
    }

    pub(crate) fn advance(&mut self) {
        self.x += PROJECTILE_SPEED;
    }

    /// Reports whether the projectile flew past the right bound.
    pub(crate) fn is_beyond(&self, right_bound: f32) -> bool {
        self.x > right_bound
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            lane: self.lane,
            x: self.x,
        }
    }
}
