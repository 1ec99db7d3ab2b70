use std::fmt;
use std::fmt::{Display, Formatter};

use rand::Rng;
use serde::Serialize;

const PREFIX: &str = "TXN";
const SUFFIX_LENGTH: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Opaque transaction reference, e.g. `TXN4K2Z9QW1B`.
///
/// Uniqueness rests on randomness alone; nothing checks for collisions.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut value = String::with_capacity(PREFIX.len() + SUFFIX_LENGTH);
        value.push_str(PREFIX);

        for _ in 0..SUFFIX_LENGTH {
            value.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
        }

        TransactionId(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
