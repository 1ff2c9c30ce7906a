//! Identifier generation for new documents.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::config::IdKind;

const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";
const VOWELS: &[u8] = b"aeiou";

/// Generate a fresh identifier of exactly `length` ASCII characters.
pub fn generate(kind: IdKind, length: usize) -> String {
    let mut rng = rand::thread_rng();
    match kind {
        IdKind::Key => (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect(),
        IdKind::Phonetic => {
            // Start on a random class so ids don't all begin with a consonant.
            let offset = rng.gen_range(0..2);
            (0..length)
                .map(|i| {
                    let pool = if (i + offset) % 2 == 0 { CONSONANTS } else { VOWELS };
                    pool[rng.gen_range(0..pool.len())] as char
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ids_have_requested_length() {
        for len in [1, 6, 8, 32] {
            let id = generate(IdKind::Key, len);
            assert_eq!(id.len(), len);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn phonetic_ids_alternate() {
        let id = generate(IdKind::Phonetic, 12);
        assert_eq!(id.len(), 12);

        let is_vowel = |c: u8| VOWELS.contains(&c);
        for pair in id.as_bytes().windows(2) {
            assert_ne!(is_vowel(pair[0]), is_vowel(pair[1]));
        }
    }
}
