//! Share codes and reroll seeds.
//!
//! A share code `LW-<WORD><NN>` names exactly one seed below
//! [`SHARE_CODE_SEEDS`]: the word's position in [`WORD_LIST`] times 100 plus
//! the two-digit suffix, so `LW-ANTHEM42` is seed 42 and `LW-AMP07` is 107.
//! Seeds outside that range have no code and are shared as plain integers.

use std::time::{SystemTime, UNIX_EPOCH};

const CODE_PREFIX: &str = "LW-";
const SUFFIXES_PER_WORD: u64 = 100;

pub const WORD_LIST: [&str; 64] = [
    "ANTHEM", "AMP", "ARENA", "BALLAD", "BASS", "BEAT", "BRIDGE", "CHORD", "CHORUS", "CRASH",
    "CROWD", "CYMBAL", "DRUMS", "ENCORE", "FADER", "FEEDBK", "FRET", "GIG", "GROOVE", "HIHAT",
    "HOOK", "INTRO", "JAM", "KICK", "LEGATO", "LIVE", "LOUD", "MOSH", "NOTE", "OUTRO", "PEDAL",
    "PICK", "RIFF", "ROADIE", "ROCK", "SETLST", "SHRED", "SLIDE", "SNARE", "SOLO", "SONIC",
    "SPEAKR", "STAGE", "STRING", "STROBE", "STUDIO", "TEMPO", "TOUR", "TREBLE", "TRACK", "TUNE",
    "VAN", "VERSE", "VINYL", "VOLUME", "WAH", "WAIL", "AMPED", "ZENITH", "HEADLN", "TOPS", "ROAD",
    "FINALE", "LONGWY",
];

/// Number of seeds that have a share code (`0..SHARE_CODE_SEEDS`).
pub const SHARE_CODE_SEEDS: u64 = WORD_LIST.len() as u64 * SUFFIXES_PER_WORD;

/// Share code for `seed`, or `None` when the seed is outside the code range.
#[must_use]
pub fn encode_friendly(seed: u64) -> Option<String> {
    let word_index = usize::try_from(seed / SUFFIXES_PER_WORD).ok()?;
    let word = WORD_LIST.get(word_index)?;
    Some(format!("{CODE_PREFIX}{word}{:02}", seed % SUFFIXES_PER_WORD))
}

/// Resolve a share code back into the seed it stands for.
#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let code = code.trim();
    if !code.get(..CODE_PREFIX.len())?.eq_ignore_ascii_case(CODE_PREFIX) {
        return None;
    }
    let body = code.get(CODE_PREFIX.len()..)?;
    let split = body.len().checked_sub(2)?;
    let (word, suffix) = (body.get(..split)?, body.get(split..)?);
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let word_index = WORD_LIST.iter().position(|w| w.eq_ignore_ascii_case(word))?;
    let nn: u64 = suffix.parse().ok()?;
    Some(u64::try_from(word_index).ok()? * SUFFIXES_PER_WORD + nn)
}

/// How a seed is shown to players: its share code when it has one,
/// otherwise the decimal seed. Both forms read back as the same seed.
#[must_use]
pub fn seed_label(seed: u64) -> String {
    encode_friendly(seed).unwrap_or_else(|| seed.to_string())
}

/// Share code for a seed picked from `entropy`; always inside the code range.
#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    seed_label(entropy % SHARE_CODE_SEEDS)
}

/// Wall-clock nanoseconds, the default source for reroll seeds.
#[must_use]
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Seed for a reroll; never repeats `previous`.
#[must_use]
pub const fn reroll_seed(previous: u64, entropy: u64) -> u64 {
    if entropy == previous {
        entropy.wrapping_add(1)
    } else {
        entropy
    }
}
