#![deny(missing_docs)]

//! # Value Sources
//!
//! The only source of randomness in a conversion. It is passed explicitly
//! to the synthesizer so tests can pin it (seeded RNG or a scripted fake).

use crate::fixtures::formats::LiteralClass;
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

/// Length of generated alphanumeric strings.
pub const STRING_LENGTH: usize = 10;

/// Supplies sampling decisions and literal values.
pub trait ValueSource {
    /// Picks an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Produces a literal that matches `class.regex()`.
    fn literal(&mut self, class: LiteralClass) -> Value;
}

/// A `ChaCha8`-backed source; reproducible when seeded.
#[derive(Debug, Clone)]
pub struct RandomValueSource {
    rng: ChaCha8Rng,
}

impl RandomValueSource {
    /// A deterministic source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    fn alphanumeric(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(STRING_LENGTH)
            .map(char::from)
            .collect()
    }

    fn date(&mut self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.rng.gen_range(1970..2038),
            self.rng.gen_range(1..=12),
            self.rng.gen_range(1..=28)
        )
    }
}

impl Default for RandomValueSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ValueSource for RandomValueSource {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn literal(&mut self, class: LiteralClass) -> Value {
        match class {
            LiteralClass::AlphaNumeric | LiteralClass::Anything => {
                Value::String(self.alphanumeric())
            }
            LiteralClass::PositiveInt => Value::from(self.rng.gen_range(1..10_000u32)),
            // At most two decimal places
            LiteralClass::Decimal => Value::from(f64::from(self.rng.gen_range(1..100_000u32)) / 100.0),
            LiteralClass::Boolean => Value::Bool(self.rng.gen_bool(0.5)),
            LiteralClass::Uuid => {
                let bytes: [u8; 16] = self.rng.gen();
                Value::String(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
            }
            LiteralClass::IsoDate => Value::String(self.date()),
            LiteralClass::IsoDateTime => {
                let date = self.date();
                Value::String(format!(
                    "{}T{:02}:{:02}:{:02}Z",
                    date,
                    self.rng.gen_range(0..24),
                    self.rng.gen_range(0..60),
                    self.rng.gen_range(0..60)
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn full_match(pattern: &str, value: &Value) -> bool {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Regex::new(&format!("^(?:{})$", pattern)).unwrap().is_match(&text)
    }

    #[test]
    fn test_literals_match_their_class() {
        let mut source = RandomValueSource::seeded(7);
        for class in [
            LiteralClass::AlphaNumeric,
            LiteralClass::PositiveInt,
            LiteralClass::Decimal,
            LiteralClass::Boolean,
            LiteralClass::Uuid,
            LiteralClass::IsoDate,
            LiteralClass::IsoDateTime,
            LiteralClass::Anything,
        ] {
            for _ in 0..50 {
                let value = source.literal(class);
                assert!(full_match(class.regex(), &value), "{:?} -> {}", class, value);
            }
        }
    }

    #[test]
    fn test_literal_types() {
        let mut source = RandomValueSource::seeded(1);
        assert!(source.literal(LiteralClass::PositiveInt).is_u64());
        assert!(source.literal(LiteralClass::Decimal).is_f64());
        assert!(source.literal(LiteralClass::Boolean).is_boolean());
        let s = source.literal(LiteralClass::AlphaNumeric);
        assert_eq!(s.as_str().map(str::len), Some(STRING_LENGTH));
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomValueSource::seeded(42);
        let mut b = RandomValueSource::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.pick(5), b.pick(5));
            assert_eq!(
                a.literal(LiteralClass::Uuid),
                b.literal(LiteralClass::Uuid)
            );
        }
    }

    #[test]
    fn test_pick_in_range() {
        let mut source = RandomValueSource::seeded(3);
        for len in 1..10 {
            assert!(source.pick(len) < len);
        }
    }
}
