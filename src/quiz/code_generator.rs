use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::error;

use crate::common::error::ServerError;

pub const CODE_LENGTH: usize = 6;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct CodeGenerator {
    rng: Mutex<ChaCha8Rng>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_os_rng()),
        }
    }

    /// Same seed, same sequence of codes.
    #[cfg(test)]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Format: `K3Z09Q`
    pub fn generate(&self) -> Result<String, ServerError> {
        let mut rng = self.rng.lock().map_err(|e| {
            error!("CodeGenerator lock error: {}", e);
            ServerError::PoisonError
        })?;

        let code = (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();

        Ok(code)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_codes_are_valid() {
        let generator = CodeGenerator::new();

        for _ in 0..1000 {
            let code = generator.generate().unwrap();
            assert!(is_valid_code(&code), "Invalid code generated: {}", code);
        }
    }

    #[test]
    fn seeded_generators_agree() {
        let a = CodeGenerator::from_seed(42);
        let b = CodeGenerator::from_seed(42);

        for _ in 0..10 {
            assert_eq!(a.generate().unwrap(), b.generate().unwrap());
        }
    }

    #[test]
    fn codes_rarely_repeat() {
        let generator = CodeGenerator::from_seed(7);
        let codes: HashSet<String> = (0..500).map(|_| generator.generate().unwrap()).collect();

        assert!(codes.len() > 495);
    }

    #[test]
    fn normalizes_before_validating() {
        assert_eq!(normalize_code(" ab12cd "), "AB12CD");
        assert!(is_valid_code(&normalize_code("ab12cd")));
        assert!(!is_valid_code("AB12C"));
        assert!(!is_valid_code("AB12CDE"));
        assert!(!is_valid_code("AB-2CD"));
        assert!(!is_valid_code("ab12cd"));
    }
}
