use anyhow::{Context, Result, bail};
use longway_game::seed::SHARE_CODE_SEEDS;
use longway_game::{decode_to_seed, seed_label};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// One seed to test, with the label reports print for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    /// Share code when the seed has one, otherwise the decimal seed.
    /// Feeding it back to `--seeds` reproduces the same run.
    pub label: String,
}

impl SeedInfo {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            label: seed_label(seed),
        }
    }
}

/// Resolve `--seeds` tokens into distinct seeds, in first-mention order.
///
/// Tokens are unsigned integers, `LW-` share codes, or `all` / `available`
/// for every seed that has a share code. Integers and codes naming the same
/// seed collapse into one entry.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        for seed in parse_seed_token(token)? {
            if seen.insert(seed) {
                seeds.push(SeedInfo::new(seed));
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(SeedInfo::new(DEFAULT_SEED));
    }
    Ok(seeds)
}

fn parse_seed_token(token: &str) -> Result<Vec<u64>> {
    if token.eq_ignore_ascii_case("all") || token.eq_ignore_ascii_case("available") {
        return Ok((0..SHARE_CODE_SEEDS).collect());
    }
    if let Ok(value) = token.parse::<i64>()
        && value < 0
    {
        bail!("Negative seed {token}: seeds are unsigned");
    }
    if let Ok(seed) = token.parse::<u64>() {
        return Ok(vec![seed]);
    }
    let seed = decode_to_seed(token).with_context(|| format!("Unrecognized seed token: {token}"))?;
    Ok(vec![seed])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_integers_and_share_codes() {
        let seeds = resolve_seed_inputs(&tokens(&["90210", " lw-amp07 ", "3"])).unwrap();
        let values: Vec<u64> = seeds.iter().map(|s| s.seed).collect();
        assert_eq!(values, vec![90_210, 107, 3]);
        assert_eq!(seeds[0].label, "90210");
        assert_eq!(seeds[1].label, "LW-AMP07");
        assert_eq!(seeds[2].label, "LW-ANTHEM03");
    }

    #[test]
    fn labels_resolve_to_their_own_seed() {
        for seed in [0, 42, 1337, 6399, 6400, 123_456_789, u64::MAX] {
            let label = SeedInfo::new(seed).label;
            let again = resolve_seed_inputs(&[label.clone()]).unwrap();
            assert_eq!(again, vec![SeedInfo::new(seed)], "{label}");
        }
    }

    #[test]
    fn integer_and_code_for_one_seed_collapse() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "LW-ANTHEM42", "42"])).unwrap();
        assert_eq!(seeds, vec![SeedInfo::new(42)]);
        assert_eq!(seeds[0].label, "LW-ANTHEM42");
    }

    #[test]
    fn rejects_negative_and_unknown_tokens() {
        let err = resolve_seed_inputs(&tokens(&["-7"])).unwrap_err();
        assert!(err.to_string().contains("Negative seed -7"));
        let err = resolve_seed_inputs(&tokens(&["CL-ORANGE42"])).unwrap_err();
        assert!(err.to_string().contains("Unrecognized seed token: CL-ORANGE42"));
    }

    #[test]
    fn empty_input_uses_default_seed() {
        let seeds = resolve_seed_inputs(&tokens(&["", " "])).unwrap();
        assert_eq!(seeds, vec![SeedInfo::new(DEFAULT_SEED)]);
    }

    #[test]
    fn all_expands_to_every_share_code_seed() {
        let seeds = resolve_seed_inputs(&tokens(&["5", "all"])).unwrap();
        assert_eq!(seeds.len() as u64, SHARE_CODE_SEEDS);
        assert_eq!(seeds[0].seed, 5);
        assert!(seeds.iter().all(|s| s.label.starts_with("LW-")));
    }
}
