use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionSet};

/// Shuffles the bank and deals it into disjoint sets.
///
/// The requested count is clamped to `1..=questions.len()` so no set is ever
/// empty; the shuffled bank is then dealt round-robin, which keeps set sizes
/// within one of each other. Every question lands in exactly one set.
///
/// Callers pass the random source, so tests seed it for reproducible
/// partitions while production uses `rand::rng()`.
#[must_use]
pub fn partition_bank<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    requested_sets: u32,
    rng: &mut R,
) -> Vec<QuestionSet> {
    if questions.is_empty() {
        return Vec::new();
    }

    questions.shuffle(rng);

    let count = usize::try_from(requested_sets)
        .unwrap_or(usize::MAX)
        .clamp(1, questions.len());
    let mut sets: Vec<QuestionSet> = vec![Vec::new(); count];
    for (position, question) in questions.into_iter().enumerate() {
        sets[position % count].push(question);
    }
    sets
}
