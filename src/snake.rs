use serde::{Deserialize, Serialize};

use crate::border::Position;

/// Axis-aligned direction of travel. Discriminants match the one-hot order
/// used by the board encoding.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

/// Categorical output of the decision function, indexed as the brain emits it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Decision {
    RotateRight = 0,
    RotateLeft = 1,
    Keep = 2,
}

// heading x decision -> new heading, rows in Heading order, columns in Decision order
const TURNS: [[Heading; 3]; 4] = [
    [Heading::Up, Heading::Down, Heading::Left],    // Left
    [Heading::Down, Heading::Up, Heading::Right],   // Right
    [Heading::Right, Heading::Left, Heading::Up],   // Up
    [Heading::Left, Heading::Right, Heading::Down], // Down
];

// heading -> (dx, dy)
const OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Left, Heading::Right, Heading::Up, Heading::Down];

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Combines the current heading with a decision.
    pub fn resolve(self, decision: Decision) -> Heading {
        TURNS[self as usize][decision as usize]
    }

    /// Explicit heading request. Reversal is not expressible in one tick, so
    /// asking for the opposite keeps the current heading.
    pub fn steer(self, requested: Heading) -> Heading {
        if requested == self.opposite() { self } else { requested }
    }

    pub fn delta(self) -> (i32, i32) {
        OFFSETS[self as usize]
    }
}

impl Decision {
    /// Stable argmax: the first maximal score wins. Index 0 rotates right,
    /// index 1 rotates left, anything else keeps the heading.
    pub fn from_prediction(prediction: &[f32]) -> Decision {
        let mut best = 0;
        for i in 1..prediction.len() {
            if prediction[i] > prediction[best] {
                best = i;
            }
        }
        match best {
            0 if !prediction.is_empty() => Decision::RotateRight,
            1 => Decision::RotateLeft,
            _ => Decision::Keep,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: Vec<Position>, // body[0] is the head
    heading: Heading,
}

impl Snake {
    /// Straight snake lying on one row: head at `head`, the remaining
    /// segments trailing to increasing x. Initial travel is to the left.
    pub fn horizontal(head: Position, length: usize) -> Snake {
        let body = (0..length as i32).map(|i| head.offset(i, 0)).collect();
        Snake { body, heading: Heading::Left }
    }

    /// Builds a snake from raw segments, head first.
    pub fn from_segments(body: Vec<Position>, heading: Heading) -> Snake {
        assert!(!body.is_empty(), "snake needs at least one segment");
        Snake { body, heading }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Whether moving the head onto `pos` would bite the body. The head is
    /// about to leave its cell and the tail vacates its own on a move that
    /// does not eat, so both are excluded.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        let inner = self.body.len().saturating_sub(2);
        self.body.iter().skip(1).take(inner).any(|&seg| seg == pos)
    }

    /// Cell the head would enter moving one step along `heading`.
    pub fn next_head(&self, heading: Heading) -> Position {
        let (dx, dy) = heading.delta();
        self.head().offset(dx, dy)
    }

    /// Shifts the whole body one cell along `heading`. With `grow` the tail
    /// is kept, so the cell it would have vacated becomes the new last
    /// segment.
    pub fn advance(&mut self, heading: Heading, grow: bool) {
        let new_head = self.next_head(heading);
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
        self.heading = heading;
    }
}
