//! Plain-text backend that draws one row of glyphs per lane.

use std::io::Write;

use lane_defence_core::{AttackerKind, DefenderKind, Outcome, ProjectileKind};

use crate::{Presentation, RenderingBackend, RenderingError, Scene};

const EMPTY: char = '.';

/// Rendering backend that writes scenes as text to any [`Write`] sink.
#[derive(Debug)]
pub struct TextBackend<W> {
    sink: W,
    frames: u64,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing frames to the provided sink.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self { sink, frames: 0 }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Releases the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, presentation: &Presentation) -> Result<(), RenderingError> {
        let scene = &presentation.scene;
        writeln!(
            self.sink,
            "{} | wave {}/{} | attackers left {} | {}",
            presentation.window_title,
            scene.hud.wave,
            scene.hud.total_waves,
            scene.hud.attackers_left,
            outcome_label(scene.hud.outcome),
        )?;
        for row in rasterize(scene) {
            writeln!(self.sink, "{row}")?;
        }
        self.sink.flush()?;
        self.frames += 1;
        Ok(())
    }
}

/// Draws defenders first, then projectiles, then attackers on top.
fn rasterize(scene: &Scene) -> Vec<String> {
    let playfield = &scene.playfield;
    let columns = usize::try_from(playfield.columns).unwrap_or(0);
    let lanes = usize::try_from(playfield.lanes).unwrap_or(0);
    let mut rows = vec![vec![EMPTY; columns]; lanes];

    let mut put = |lane: u32, column: u32, glyph: char| {
        let (Ok(lane), Ok(column)) = (usize::try_from(lane), usize::try_from(column)) else {
            return;
        };
        if let Some(cell) = rows.get_mut(lane).and_then(|row| row.get_mut(column)) {
            *cell = glyph;
        }
    };

    for defender in &scene.defenders {
        put(
            defender.cell.lane(),
            defender.cell.column(),
            defender_glyph(defender.kind),
        );
    }
    for projectile in &scene.projectiles {
        put(
            projectile.lane,
            playfield.column_for(projectile.x),
            projectile_glyph(projectile.kind),
        );
    }
    for attacker in &scene.attackers {
        let glyph = if attacker.frozen {
            '*'
        } else {
            attacker_glyph(attacker.kind)
        };
        put(attacker.lane, playfield.column_for(attacker.x), glyph);
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn defender_glyph(kind: DefenderKind) -> char {
    match kind {
        DefenderKind::Basic => 'B',
        DefenderKind::Freezer => 'F',
        DefenderKind::Rapid => 'R',
    }
}

fn projectile_glyph(kind: ProjectileKind) -> char {
    match kind {
        ProjectileKind::Standard => '-',
        ProjectileKind::Freezing => '~',
        ProjectileKind::Rapid => '=',
    }
}

fn attacker_glyph(kind: AttackerKind) -> char {
    match kind {
        AttackerKind::Weak => 'w',
        AttackerKind::Tanky => 't',
        AttackerKind::Tankiest => 'T',
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::InProgress => "in progress",
        Outcome::Won => "won",
        Outcome::Lost => "lost",
    }
}
