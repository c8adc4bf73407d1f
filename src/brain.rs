use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::snake::Decision;

/// Scores emitted per tick: rotate right, rotate left, keep heading.
pub const OUTPUTS: usize = 3;

/// External decision function. Gets a fresh feature vector every tick and
/// answers with one score per possible decision.
pub trait Brain {
    fn decide(&mut self, input: &[f32]) -> [f32; OUTPUTS];
}

impl<F> Brain for F
where
    F: FnMut(&[f32]) -> [f32; OUTPUTS],
{
    fn decide(&mut self, input: &[f32]) -> [f32; OUTPUTS] {
        self(input)
    }
}

/// Score vector whose argmax is `decision`.
pub fn prediction_for(decision: Decision) -> [f32; OUTPUTS] {
    let mut out = [0.0; OUTPUTS];
    out[decision as usize] = 1.0;
    out
}

/// Replays a fixed list of decisions, then keeps heading forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedBrain {
    script: Vec<Decision>,
    cursor: usize,
}

impl ScriptedBrain {
    pub fn new(script: Vec<Decision>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Decisions handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl Brain for ScriptedBrain {
    fn decide(&mut self, _input: &[f32]) -> [f32; OUTPUTS] {
        let decision = self.script.get(self.cursor).copied().unwrap_or(Decision::Keep);
        self.cursor += 1;
        prediction_for(decision)
    }
}

/// Uniform random scores in [-1, 1), from its own seeded generator.
#[derive(Clone, Debug)]
pub struct RandomBrain {
    rng: ChaCha8Rng,
}

impl RandomBrain {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Brain for RandomBrain {
    fn decide(&mut self, _input: &[f32]) -> [f32; OUTPUTS] {
        let mut out = [0.0f32; OUTPUTS];
        for v in &mut out {
            *v = self.rng.r#gen::<f32>() * 2.0 - 1.0;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_brains() {
        let mut calls = 0;
        let mut brain = |input: &[f32]| {
            calls += 1;
            [input.len() as f32, 0.0, 0.0]
        };
        assert_eq!(brain.decide(&[0.0; 4]), [4.0, 0.0, 0.0]);
        drop(brain);
        assert_eq!(calls, 1);
    }

    #[test]
    fn scripted_brain_falls_back_to_keep() {
        let mut brain = ScriptedBrain::new(vec![Decision::RotateLeft, Decision::RotateRight]);
        assert_eq!(Decision::from_prediction(&brain.decide(&[])), Decision::RotateLeft);
        assert_eq!(Decision::from_prediction(&brain.decide(&[])), Decision::RotateRight);
        assert_eq!(Decision::from_prediction(&brain.decide(&[])), Decision::Keep);
        assert_eq!(brain.consumed(), 3);
    }

    #[test]
    fn random_brain_is_seeded() {
        let mut a = RandomBrain::new(42);
        let mut b = RandomBrain::new(42);
        for _ in 0..10 {
            let out = a.decide(&[]);
            assert_eq!(out, b.decide(&[]));
            assert!(out.iter().all(|v| (-1.0..1.0).contains(v)));
        }
    }
}
