use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::border::{Board, Position};

/// Active snacks plus the generator that places them. Every simulation owns
/// its own generator, so identical seeds replay identical placements.
#[derive(Clone, Debug)]
pub struct Snacks {
    positions: Vec<Position>,
    rng: ChaCha8Rng,
}

impl Snacks {
    pub fn new(seed: u64) -> Self {
        Self {
            positions: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Snack closest to `from`; ties resolve to the older snack.
    pub fn nearest(&self, from: Position) -> Option<Position> {
        let mut best: Option<(Position, f64)> = None;
        for &snack in &self.positions {
            let d = from.distance(snack);
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((snack, d)),
            }
        }
        best.map(|(snack, _)| snack)
    }

    /// Cells that are neither snake nor snack, in raster order.
    pub fn free_cells(&self, board: &Board, snake: &[Position]) -> Vec<Position> {
        board
            .cells()
            .filter(|cell| !snake.contains(cell) && !self.positions.contains(cell))
            .collect()
    }

    /// Tops the set up to `target` snacks, sampling uniformly without
    /// replacement from the free cells. Returns how many were placed, which
    /// is less than requested only when the board runs out of room.
    pub fn fill(&mut self, board: &Board, snake: &[Position], target: usize) -> usize {
        let missing = target.saturating_sub(self.positions.len());
        if missing == 0 {
            return 0;
        }
        let free = self.free_cells(board, snake);
        let picked: Vec<Position> = free.choose_multiple(&mut self.rng, missing).copied().collect();
        let placed = picked.len();
        self.positions.extend(picked);
        placed
    }

    /// Removes the snack at `pos`, returning whether one was there.
    pub fn consume(&mut self, pos: Position) -> bool {
        match self.positions.iter().position(|&p| p == pos) {
            Some(i) => {
                self.positions.remove(i);
                true
            }
            None => false,
        }
    }

    /// Replaces the snack set wholesale. Used to stage specific layouts.
    pub fn place(&mut self, positions: Vec<Position>) {
        self.positions = positions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_snake() -> Vec<Position> {
        (1..4).map(|x| Position::new(x, 1)).collect()
    }

    #[test]
    fn fill_avoids_snake_and_existing_snacks() {
        let board = Board::new(4, 3);
        let snake = row_snake();
        let mut snacks = Snacks::new(7);
        let placed = snacks.fill(&board, &snake, 5);
        assert_eq!(placed, 5);
        for (i, s) in snacks.positions().iter().enumerate() {
            assert!(board.contains(*s));
            assert!(!snake.contains(s));
            assert!(!snacks.positions()[i + 1..].contains(s));
        }
    }

    #[test]
    fn same_seed_same_placement() {
        let board = Board::new(10, 10);
        let snake = row_snake();
        let mut a = Snacks::new(777);
        let mut b = Snacks::new(777);
        a.fill(&board, &snake, 3);
        b.fill(&board, &snake, 3);
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn fill_stops_when_board_is_full() {
        let board = Board::new(2, 2);
        let snake = vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
        let mut snacks = Snacks::new(1);
        assert_eq!(snacks.fill(&board, &snake, 3), 1);
        assert_eq!(snacks.positions(), &[Position::new(0, 1)]);
        assert_eq!(snacks.fill(&board, &snake, 3), 0);
    }

    #[test]
    fn consume_then_refill_keeps_count() {
        let board = Board::new(6, 6);
        let snake = row_snake();
        let mut snacks = Snacks::new(3);
        snacks.fill(&board, &snake, 2);
        let eaten = snacks.positions()[0];
        assert!(snacks.consume(eaten));
        assert!(!snacks.consume(eaten));
        assert_eq!(snacks.len(), 1);
        snacks.fill(&board, &snake, 2);
        assert_eq!(snacks.len(), 2);
    }

    #[test]
    fn nearest_prefers_closest() {
        let mut snacks = Snacks::new(0);
        snacks.place(vec![Position::new(5, 5), Position::new(1, 0)]);
        assert_eq!(snacks.nearest(Position::new(0, 0)), Some(Position::new(1, 0)));
        assert_eq!(Snacks::new(0).nearest(Position::new(0, 0)), None);
    }
}
