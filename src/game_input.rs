use crate::border::{Board, Position};
use crate::config::Representation;
use crate::food::Snacks;
use crate::snake::{Decision, Heading, Snake};

pub const HEADING_INPUTS: usize = 4;
pub const FEATURE_INPUTS: usize = 8;

const SNAKE_CELL: f32 = 1.0;
const SNACK_CELL: f32 = -1.0;

/// Builds the vector handed to the decision function. The brain only ever
/// sees this copy, never the simulation itself.
pub struct GameInput;

impl GameInput {
    pub fn len(representation: Representation, board: &Board) -> usize {
        match representation {
            Representation::Board => board.cell_count() + HEADING_INPUTS,
            Representation::Features => FEATURE_INPUTS,
        }
    }

    pub fn encode(
        representation: Representation,
        board: &Board,
        snake: &Snake,
        snacks: &Snacks,
    ) -> Vec<f32> {
        match representation {
            Representation::Board => Self::board(board, snake, snacks),
            Representation::Features => Self::features(board, snake, snacks).to_vec(),
        }
    }

    /// One value per cell in raster order (x outer, y inner): 1 for snake,
    /// -1 for snack, 0 for empty. Then the heading one-hot in the order
    /// left, right, up, down.
    pub fn board(board: &Board, snake: &Snake, snacks: &Snacks) -> Vec<f32> {
        let mut input = vec![0.0f32; board.cell_count() + HEADING_INPUTS];

        // snacks first so that snake cells win on overlap
        for &snack in snacks.positions() {
            if board.contains(snack) {
                input[board.index_of(snack)] = SNACK_CELL;
            }
        }
        for &seg in snake.body() {
            if board.contains(seg) {
                input[board.index_of(seg)] = SNAKE_CELL;
            }
        }

        input[board.cell_count() + snake.heading() as usize] = 1.0;
        input
    }

    /// Compact view around the head:
    /// 0..3 danger ahead / left / right,
    /// 3..7 nearest snack ahead / behind / left / right,
    /// 7 distance to nearest snack over the board diagonal.
    pub fn features(board: &Board, snake: &Snake, snacks: &Snacks) -> [f32; FEATURE_INPUTS] {
        let mut input = [0.0f32; FEATURE_INPUTS];
        let heading = snake.heading();
        let head = snake.head();

        let ahead = heading;
        let left = heading.resolve(Decision::RotateLeft);
        let right = heading.resolve(Decision::RotateRight);

        for (i, dir) in [ahead, left, right].into_iter().enumerate() {
            let next = snake.next_head(dir);
            if !board.contains(next) || snake.collides_with_body(next) {
                input[i] = 1.0;
            }
        }

        if let Some(snack) = snacks.nearest(head) {
            let along = Self::projection(head, snack, ahead);
            let across = Self::projection(head, snack, left);
            input[3] = (along > 0) as u8 as f32;
            input[4] = (along < 0) as u8 as f32;
            input[5] = (across > 0) as u8 as f32;
            input[6] = (across < 0) as u8 as f32;
            input[7] = (head.distance(snack) / board.diagonal()) as f32;
        }

        input
    }

    ///signed number of steps along `dir` from `from` to `to`
    fn projection(from: Position, to: Position, dir: Heading) -> i32 {
        let (dx, dy) = dir.delta();
        (to.x - from.x) * dx + (to.y - from.y) * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snacks_at(positions: &[(i32, i32)]) -> Snacks {
        let mut snacks = Snacks::new(0);
        snacks.place(positions.iter().copied().map(Position::from).collect());
        snacks
    }

    #[test]
    fn board_encoding_marks_snake_snack_and_heading() {
        let board = Board::new(8, 8);
        let snake = Snake::horizontal(Position::new(4, 4), 3);
        let snacks = snacks_at(&[(0, 1)]);
        let input = GameInput::board(&board, &snake, &snacks);

        assert_eq!(input.len(), 8 * 8 + 4);
        assert_eq!(input[36], 1.0);
        assert_eq!(input[44], 1.0);
        assert_eq!(input[52], 1.0);
        assert_eq!(input[1], -1.0);
        assert_eq!(input.iter().filter(|&&v| v == 1.0).count(), 4);
        assert_eq!(&input[64..], &[1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn heading_one_hot_follows_heading() {
        let board = Board::new(3, 3);
        let snacks = snacks_at(&[]);
        for h in Heading::ALL {
            let snake = Snake::from_segments(vec![Position::new(1, 1)], h);
            let input = GameInput::board(&board, &snake, &snacks);
            let one_hot = &input[9..];
            assert_eq!(one_hot.iter().sum::<f32>(), 1.0);
            assert_eq!(one_hot[h as usize], 1.0);
        }
    }

    #[test]
    fn features_see_walls_and_snack() {
        let board = Board::new(5, 5);
        // heading left at the left wall, snack straight up from the head
        let snake = Snake::horizontal(Position::new(0, 2), 3);
        let snacks = snacks_at(&[(0, 0)]);
        let input = GameInput::features(&board, &snake, &snacks);

        assert_eq!(input[0], 1.0); // wall ahead
        assert_eq!(input[1], 0.0); // left of a left-heading snake is down
        assert_eq!(input[2], 0.0);
        assert_eq!(input[3], 0.0);
        assert_eq!(input[4], 0.0);
        assert_eq!(input[5], 0.0);
        assert_eq!(input[6], 1.0); // up is to the right
        assert!((input[7] - (2.0 / board.diagonal()) as f32).abs() < 1e-6);
    }

    #[test]
    fn encode_length_matches_representation() {
        let board = Board::new(32, 18);
        let snake = Snake::horizontal(Position::new(16, 9), 5);
        let snacks = snacks_at(&[(1, 1)]);
        for repr in [Representation::Board, Representation::Features] {
            let input = GameInput::encode(repr, &board, &snake, &snacks);
            assert_eq!(input.len(), GameInput::len(repr, &board));
        }
        assert_eq!(GameInput::len(Representation::Board, &board), 580);
    }
}
