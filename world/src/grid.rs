//! Authoritative defender placement grid.

use lane_defence_core::{
    CellCoord, DefenderId, DefenderKind, FiringModel, PlacementError, Playfield,
};

use crate::defenders::Defender;

/// Dense lane-major grid holding at most one defender per cell.
#[derive(Debug)]
pub(crate) struct Grid {
    playfield: Playfield,
    cells: Vec<Option<Defender>>,
    next_defender_id: DefenderId,
}

impl Grid {
    /// Creates an empty grid with a reset identifier counter.
    pub(crate) fn new(playfield: Playfield) -> Self {
        let capacity_u64 = u64::from(playfield.lanes) * u64::from(playfield.columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            playfield,
            cells: vec![None; capacity],
            next_defender_id: DefenderId::new(0),
        }
    }

    /// Places a defender, leaving the grid untouched on failure.
    pub(crate) fn place(
        &mut self,
        cell: CellCoord,
        kind: DefenderKind,
        model: FiringModel,
    ) -> Result<DefenderId, PlacementError> {
        let index = self.index(cell).ok_or(PlacementError::OutOfBounds)?;
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(PlacementError::OutOfBounds)?;
        if slot.is_some() {
            return Err(PlacementError::Occupied);
        }

        let id = self.next_defender_id;
        self.next_defender_id = DefenderId::new(id.get().saturating_add(1));
        *slot = Some(Defender::new(id, cell, kind, model));
        Ok(id)
    }

    /// Clears the cell, yielding the defender that occupied it.
    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<Defender> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<&Defender> {
        let index = self.index(cell)?;
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn occupant_mut(&mut self, cell: CellCoord) -> Option<&mut Defender> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Resolves a defender identifier to its current cell.
    pub(crate) fn locate(&self, id: DefenderId) -> Option<CellCoord> {
        self.iter()
            .find(|defender| defender.id == id)
            .map(|defender| defender.cell)
    }

    /// Iterates over every defender in lane-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Defender> {
        self.cells.iter().filter_map(Option::as_ref)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Defender> {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }

    pub(crate) const fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.playfield.contains(cell) {
            return None;
        }
        let lane = usize::try_from(cell.lane()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.playfield.columns).ok()?;
        Some(lane * width + column)
    }
}
