use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces fixed-length random short codes.
///
/// The generator knows nothing about existing codes; uniqueness is the
/// store's job, and a duplicate surfaces as [`crate::store::StoreError::Duplicate`].
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn generate(&self) -> String {
        random_code(self.length)
    }
}

/// Generate a random alphanumeric string of the given length.
///
/// Uses the thread-local RNG, seeded once from OS entropy.
pub fn random_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
