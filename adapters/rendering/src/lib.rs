#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.

mod text;

use glam::Vec2;
use lane_defence_core::{
    ArmamentSnapshot, AttackerKind, AttackerView, CellCoord, DefenderKind, DefenderView, Outcome,
    ProjectileKind, ProjectileView, WaveSnapshot,
};
use thiserror::Error;

pub use text::TextBackend;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Lawn color used to clear frames.
pub const LAWN: Color = Color::from_rgb_u8(144, 238, 144);
/// Grid line color.
pub const GRID_LINES: Color = Color::from_rgb_u8(34, 139, 34);

fn defender_color(kind: DefenderKind) -> Color {
    match kind {
        DefenderKind::Basic => Color::from_rgb_u8(46, 125, 50),
        DefenderKind::Freezer => Color::from_rgb_u8(79, 195, 247),
        DefenderKind::Rapid => Color::from_rgb_u8(255, 193, 7),
    }
}

fn attacker_color(kind: AttackerKind, frozen: bool) -> Color {
    let base = match kind {
        AttackerKind::Weak => Color::from_rgb_u8(120, 144, 156),
        AttackerKind::Tanky => Color::from_rgb_u8(121, 85, 72),
        AttackerKind::Tankiest => Color::from_rgb_u8(183, 28, 28),
    };
    if frozen {
        base.lighten(0.6)
    } else {
        base
    }
}

fn projectile_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Standard => Color::from_rgb_u8(0, 0, 0),
        ProjectileKind::Freezing => Color::from_rgb_u8(3, 169, 244),
        ProjectileKind::Rapid => Color::from_rgb_u8(255, 0, 0),
    }
}

/// Describes the lane grid and maps screen positions onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayfieldPresentation {
    /// Number of lanes, drawn as rows.
    pub lanes: u32,
    /// Number of columns in each lane.
    pub columns: u32,
    /// Width of a single cell expressed in world units.
    pub cell_width: f32,
    /// Height of a single lane expressed in screen units.
    pub lane_height: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl PlayfieldPresentation {
    /// Default on-screen height of a lane.
    pub const DEFAULT_LANE_HEIGHT: f32 = 100.0;

    /// Creates a new playfield descriptor.
    ///
    /// Returns an error when a cell or lane would have no area.
    pub fn new(
        lanes: u32,
        columns: u32,
        cell_width: f32,
        lane_height: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if cell_width.is_nan() || cell_width <= 0.0 {
            return Err(RenderingError::InvalidCellWidth { cell_width });
        }
        if lane_height.is_nan() || lane_height <= 0.0 {
            return Err(RenderingError::InvalidLaneHeight { lane_height });
        }

        Ok(Self {
            lanes,
            columns,
            cell_width,
            lane_height,
            line_color,
        })
    }

    /// Calculates the total width of the playfield.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// Calculates the total height of the playfield.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.lanes as f32 * self.lane_height
    }

    /// Clamps a screen-space position to the playfield bounds.
    #[must_use]
    pub fn clamp_world_position(&self, position: Vec2) -> Vec2 {
        if self.columns == 0 || self.lanes == 0 {
            return Vec2::ZERO;
        }

        Vec2::new(
            position.x.clamp(0.0, self.width()),
            position.y.clamp(0.0, self.height()),
        )
    }

    /// Maps a screen-space position to the cell underneath it.
    ///
    /// Returns `None` when the position lies outside the playfield.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let column = (position.x / self.cell_width).floor();
        let lane = (position.y / self.lane_height).floor();
        if column >= self.columns as f32 || lane >= self.lanes as f32 {
            return None;
        }

        Some(CellCoord::new(lane as u32, column as u32))
    }

    /// Top-left corner of the provided cell in screen space.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.cell_width,
            cell.lane() as f32 * self.lane_height,
        )
    }

    /// Column that should display an entity at the provided lane position.
    ///
    /// Positions at or past the right edge map onto the last column.
    #[must_use]
    pub fn column_for(&self, x: f32) -> u32 {
        let column = (x.max(0.0) / self.cell_width).floor() as u32;
        column.min(self.columns.saturating_sub(1))
    }
}

/// Defender drawn inside a grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderPresentation {
    /// Cell occupied by the defender.
    pub cell: CellCoord,
    /// Kind of defender.
    pub kind: DefenderKind,
    /// Fill color.
    pub color: Color,
    /// Remaining health.
    pub health: f32,
    /// Rounds left when the session uses the ammo model.
    pub ammo: Option<i32>,
}

/// Attacker drawn along its lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerPresentation {
    /// Lane the attacker walks.
    pub lane: u32,
    /// Horizontal position in world units.
    pub x: f32,
    /// Kind of attacker.
    pub kind: AttackerKind,
    /// Fill color, lightened while frozen.
    pub color: Color,
    /// Whether the attacker is frozen.
    pub frozen: bool,
}

/// Projectile drawn along its lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Lane the projectile travels.
    pub lane: u32,
    /// Horizontal position in world units.
    pub x: f32,
    /// Kind of projectile.
    pub kind: ProjectileKind,
    /// Fill color.
    pub color: Color,
}

/// Wave progress and session state shown next to the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// One-based number of the current wave.
    pub wave: u32,
    /// Number of configured waves.
    pub total_waves: u32,
    /// Attackers still to spawn or defeat in the current wave.
    pub attackers_left: u32,
    /// Terminal state of the session.
    pub outcome: Outcome,
}

/// Scene description combining the playfield and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Lane grid that composes the play area.
    pub playfield: PlayfieldPresentation,
    /// Defenders standing on the grid.
    pub defenders: Vec<DefenderPresentation>,
    /// Attackers walking the lanes.
    pub attackers: Vec<AttackerPresentation>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Wave and outcome summary.
    pub hud: HudPresentation,
}

impl Scene {
    /// Builds a scene from read-only world snapshots.
    #[must_use]
    pub fn from_views(
        playfield: PlayfieldPresentation,
        defenders: &DefenderView,
        attackers: &AttackerView,
        projectiles: &ProjectileView,
        waves: WaveSnapshot,
        outcome: Outcome,
    ) -> Self {
        let defenders = defenders
            .iter()
            .map(|defender| DefenderPresentation {
                cell: defender.cell,
                kind: defender.kind,
                color: defender_color(defender.kind),
                health: defender.health,
                ammo: match defender.armament {
                    ArmamentSnapshot::Ammo { ammo, .. } => Some(ammo),
                    ArmamentSnapshot::Cooldown { .. } => None,
                },
            })
            .collect();
        let live_attackers = attackers.len();
        let attackers = attackers
            .iter()
            .map(|attacker| AttackerPresentation {
                lane: attacker.lane,
                x: attacker.x,
                kind: attacker.kind,
                color: attacker_color(attacker.kind, attacker.frozen),
                frozen: attacker.frozen,
            })
            .collect();
        let projectiles = projectiles
            .iter()
            .map(|projectile| ProjectilePresentation {
                lane: projectile.lane,
                x: projectile.x,
                kind: projectile.kind,
                color: projectile_color(projectile.kind),
            })
            .collect();

        Self {
            playfield,
            defenders,
            attackers,
            projectiles,
            hud: HudPresentation {
                wave: waves.wave,
                total_waves: waves.total_waves,
                attackers_left: waves.attackers_left(live_attackers),
                outcome,
            },
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, presentation: &Presentation) -> Result<(), RenderingError>;
}

/// Errors that can occur when constructing or presenting frames.
#[derive(Debug, Error)]
pub enum RenderingError {
    /// Cells must be wider than zero.
    #[error("cell width must be positive (received {cell_width})")]
    InvalidCellWidth {
        /// Provided width that failed validation.
        cell_width: f32,
    },
    /// Lanes must be taller than zero.
    #[error("lane height must be positive (received {lane_height})")]
    InvalidLaneHeight {
        /// Provided height that failed validation.
        lane_height: f32,
    },
    /// The frame could not be written out.
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{
        AttackerId, AttackerSnapshot, DefenderId, DefenderSnapshot, ProjectileId,
        ProjectileSnapshot,
    };

    fn playfield() -> PlayfieldPresentation {
        PlayfieldPresentation::new(5, 16, 100.0, 80.0, GRID_LINES).expect("valid playfield")
    }

    #[test]
    fn playfield_rejects_degenerate_cells_without_panicking() {
        assert!(matches!(
            PlayfieldPresentation::new(5, 16, 0.0, 80.0, GRID_LINES),
            Err(RenderingError::InvalidCellWidth { .. })
        ));
        assert!(matches!(
            PlayfieldPresentation::new(5, 16, 100.0, -1.0, GRID_LINES),
            Err(RenderingError::InvalidLaneHeight { .. })
        ));
    }

    #[test]
    fn cell_at_maps_screen_positions_to_cells() {
        let playfield = playfield();

        assert_eq!(
            playfield.cell_at(Vec2::new(250.0, 170.0)),
            Some(CellCoord::new(2, 2))
        );
        assert_eq!(playfield.cell_at(Vec2::ZERO), Some(CellCoord::new(0, 0)));
        assert!(playfield.cell_at(Vec2::new(1600.0, 10.0)).is_none());
        assert!(playfield.cell_at(Vec2::new(10.0, 400.0)).is_none());
        assert!(playfield.cell_at(Vec2::new(-1.0, 10.0)).is_none());
        assert_eq!(
            playfield.cell_origin(CellCoord::new(2, 2)),
            Vec2::new(200.0, 160.0)
        );
    }

    #[test]
    fn clamp_world_position_limits_coordinates_to_playfield_bounds() {
        let playfield = playfield();
        let clamped = playfield.clamp_world_position(Vec2::new(-10.0, 900.0));

        assert_eq!(clamped, Vec2::new(0.0, playfield.height()));
    }

    #[test]
    fn scene_reflects_snapshots_and_wave_progress() {
        let defenders = DefenderView::from_snapshots(vec![DefenderSnapshot {
            id: DefenderId::new(0),
            cell: CellCoord::new(1, 0),
            kind: DefenderKind::Freezer,
            health: 4.5,
            armament: ArmamentSnapshot::Ammo {
                ammo: 2,
                reload_progress: 10,
            },
        }]);
        let attackers = AttackerView::from_snapshots(vec![AttackerSnapshot {
            id: AttackerId::new(3),
            kind: AttackerKind::Tanky,
            lane: 1,
            x: 640.0,
            health: 10.0,
            frozen: true,
            engaged: None,
        }]);
        let projectiles = ProjectileView::from_snapshots(vec![ProjectileSnapshot {
            id: ProjectileId::new(1),
            kind: ProjectileKind::Freezing,
            lane: 1,
            x: 300.0,
        }]);
        let waves = WaveSnapshot {
            wave: 2,
            total_waves: 3,
            remaining_to_spawn: 7,
            completed: false,
        };

        let scene = Scene::from_views(
            playfield(),
            &defenders,
            &attackers,
            &projectiles,
            waves,
            Outcome::InProgress,
        );

        assert_eq!(scene.defenders.len(), 1);
        assert_eq!(scene.defenders[0].ammo, Some(2));
        assert_eq!(
            scene.attackers[0].color,
            attacker_color(AttackerKind::Tanky, false).lighten(0.6)
        );
        assert_eq!(scene.projectiles[0].kind, ProjectileKind::Freezing);
        assert_eq!(
            scene.hud,
            HudPresentation {
                wave: 2,
                total_waves: 3,
                attackers_left: 8,
                outcome: Outcome::InProgress,
            }
        );
    }
}
