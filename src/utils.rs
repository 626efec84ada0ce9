use rand::Rng;
use rand::distributions::Slice;
use rand::seq::SliceRandom;

use crate::config::check_probability;
use crate::error::{FixtureError, Result};

// Draws `len` characters with replacement from `alphabet`
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, alphabet: &str, len: usize) -> Result<String> {
    let chars: Vec<char> = alphabet.chars().collect();
    let dist = Slice::new(&chars)
        .map_err(|_| FixtureError::InvalidConfig("cannot sample from an empty alphabet".into()))?;
    Ok((&mut *rng).sample_iter(&dist).take(len).copied().collect())
}

// Picks one entry uniformly
pub fn choose_token<'a, R: Rng + ?Sized>(rng: &mut R, tokens: &'a [String]) -> Result<&'a str> {
    tokens
        .choose(rng)
        .map(String::as_str)
        .ok_or_else(|| FixtureError::InvalidConfig("cannot choose from an empty list".into()))
}

// Returns `rare` with probability `rare_probability`, otherwise `common`
pub fn weighted_pick<'a, T: ?Sized, R: Rng + ?Sized>(
    rng: &mut R,
    rare_probability: f64,
    common: &'a T,
    rare: &'a T,
) -> Result<&'a T> {
    check_probability(rare_probability)?;
    Ok(if rng.gen_bool(rare_probability) {
        rare
    } else {
        common
    })
}

// Samples `count` words without replacement, in random order, and joins them
pub fn sample_concat<R: Rng + ?Sized>(rng: &mut R, words: &[String], count: usize) -> Result<String> {
    if words.len() < count {
        return Err(FixtureError::InvalidConfig(format!(
            "cannot sample {count} words from {}",
            words.len()
        )));
    }
    let mut pool: Vec<&str> = words.iter().map(String::as_str).collect();
    let (chosen, _) = pool.partial_shuffle(rng, count);
    Ok(chosen.concat())
}
