//! Keyboard focus over the grid: a single active cell index, directional
//! movement with edge clamping (a bounded grid does not wrap), and a
//! center-cell reset when moving out of the unfocused state.

use shared::domain::GRID_SIZE;

/// Index of the board's center cell, the landing spot for any movement
/// issued while nothing is focused.
pub const CENTER_CELL: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Default)]
pub struct FocusController {
    focus: Option<usize>,
}

impl FocusController {
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Escape: no selection.
    pub fn clear(&mut self) {
        self.focus = None;
    }

    /// Pointer selection; out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < GRID_SIZE * GRID_SIZE {
            self.focus = Some(index);
        }
    }

    pub fn step(&mut self, direction: Direction) {
        let Some(focus) = self.focus else {
            self.focus = Some(CENTER_CELL);
            return;
        };
        let row = focus / GRID_SIZE;
        let col = focus % GRID_SIZE;
        let next = match direction {
            Direction::Down if row < GRID_SIZE - 1 => focus + GRID_SIZE,
            Direction::Up => focus.saturating_sub(GRID_SIZE).max(col),
            Direction::Left if col > 0 => focus - 1,
            Direction::Right if col < GRID_SIZE - 1 => focus + 1,
            _ => focus,
        };
        self.focus = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(index: usize) -> FocusController {
        let mut focus = FocusController::default();
        focus.focus = Some(index);
        focus
    }

    #[test]
    fn up_clamps_on_the_top_row() {
        for col in 0..GRID_SIZE {
            let mut focus = at(col);
            focus.step(Direction::Up);
            assert_eq!(focus.focused(), Some(col));
        }
    }

    #[test]
    fn down_clamps_on_the_bottom_row() {
        for col in 0..GRID_SIZE {
            let index = 8 * GRID_SIZE + col;
            let mut focus = at(index);
            focus.step(Direction::Down);
            assert_eq!(focus.focused(), Some(index));
        }
    }

    #[test]
    fn left_clamps_on_the_first_column() {
        for row in 0..GRID_SIZE {
            let index = row * GRID_SIZE;
            let mut focus = at(index);
            focus.step(Direction::Left);
            assert_eq!(focus.focused(), Some(index));
        }
    }

    #[test]
    fn right_clamps_on_the_last_column() {
        for row in 0..GRID_SIZE {
            let index = row * GRID_SIZE + 8;
            let mut focus = at(index);
            focus.step(Direction::Right);
            assert_eq!(focus.focused(), Some(index));
        }
    }

    #[test]
    fn interior_moves_shift_by_one_cell() {
        let mut focus = at(CENTER_CELL);
        focus.step(Direction::Up);
        assert_eq!(focus.focused(), Some(CENTER_CELL - GRID_SIZE));
        focus.step(Direction::Down);
        focus.step(Direction::Down);
        assert_eq!(focus.focused(), Some(CENTER_CELL + GRID_SIZE));
        focus.step(Direction::Left);
        assert_eq!(focus.focused(), Some(CENTER_CELL + GRID_SIZE - 1));
        focus.step(Direction::Right);
        assert_eq!(focus.focused(), Some(CENTER_CELL + GRID_SIZE));
    }

    #[test]
    fn any_move_from_no_focus_lands_on_the_center() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut focus = FocusController::default();
            focus.step(direction);
            assert_eq!(focus.focused(), Some(CENTER_CELL));
        }
    }

    #[test]
    fn clear_drops_the_selection() {
        let mut focus = at(12);
        focus.clear();
        assert_eq!(focus.focused(), None);
    }
}
