use super::code::{Feedback, Guess, SecretCode};

/// Per-position verdict for one guess, before it touches any game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub feedback: Vec<Feedback>,
    pub correct_count: usize,
    pub penalty: i32,
}

/// Scores `guess` against `secret` position by position.
///
/// A colour counts as present whenever it occurs anywhere in the code. There is
/// no per-colour supply: guessing red four times against a code holding a single
/// red marks every non-matching red as present. This differs from classic
/// Mastermind and is kept on purpose since it changes the point totals.
///
/// Positions past the shorter of the two sequences are ignored; the engine
/// rejects mismatched lengths before calling this.
pub fn evaluate(secret: &SecretCode, guess: &Guess) -> Evaluation {
    let mut correct_count = 0;
    let mut penalty = 0;

    let feedback = guess
        .colors()
        .iter()
        .zip(secret.colors())
        .map(|(&guessed, &expected)| {
            let verdict = if guessed == expected {
                correct_count += 1;
                Feedback::Correct
            } else if secret.contains(guessed) {
                Feedback::Present
            } else {
                Feedback::Absent
            };
            penalty += verdict.penalty();
            verdict
        })
        .collect();

    Evaluation {
        feedback,
        correct_count,
        penalty,
    }
}
