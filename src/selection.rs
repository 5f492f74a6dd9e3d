//! Random draws: quiz questions, distractors and the typed-recall batch.
//!
//! Every function takes the RNG explicitly so sessions can be replayed with a seed.

use crate::catalog::{Catalog, WordItem, same_word};
use rand::Rng;
use rand::seq::SliceRandom;

/// Up to `k` distinct words from `pool`, none equal to `correct`.
pub fn pick_distractors<R: Rng + ?Sized>(
    correct: &WordItem,
    pool: &Catalog,
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    let candidates: Vec<&str> = pool
        .iter()
        .filter(|item| !item.matches(&correct.word))
        .map(|item| item.word.as_str())
        .collect();
    candidates
        .choose_multiple(rng, k.min(candidates.len()))
        .map(|w| w.to_string())
        .collect()
}

/// Distractors plus the correct word, freshly shuffled.
pub fn build_choice_set<R: Rng + ?Sized>(
    correct: &WordItem,
    pool: &Catalog,
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut options = pick_distractors(correct, pool, k, rng);
    options.push(correct.word.clone());
    options.shuffle(rng);
    options
}

pub fn pick_quiz_word<R: Rng + ?Sized>(round_learned: &[String], rng: &mut R) -> Option<String> {
    round_learned.choose(rng).cloned()
}

/// Exactly `n` words for the typed-recall round (empty only when nothing was learned).
///
/// Takes the `n` most recently learned distinct words. A shorter list is
/// padded by resampling from what was taken, so small vocabularies still
/// yield a full-length round.
pub fn sample_daily_batch<R: Rng + ?Sized>(
    learned_today: &[String],
    n: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut batch: Vec<String> = Vec::with_capacity(n);
    for word in learned_today.iter().rev() {
        if batch.len() == n {
            break;
        }
        if !batch.iter().any(|w| same_word(w, word)) {
            batch.push(word.clone());
        }
    }
    if batch.is_empty() {
        return batch;
    }

    let distinct = batch.len();
    while batch.len() < n {
        let pick = batch[rng.gen_range(0..distinct)].clone();
        batch.push(pick);
    }
    batch.shuffle(rng);
    batch
}
