use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

/// Length of an issued token value in characters.
pub const TOKEN_LENGTH: usize = 64;

/// Generate a fresh opaque token value from the OS CSPRNG.
///
/// The value carries no claims and is never derived from user data;
/// uniqueness is ultimately enforced by the store at insert.
pub fn generate() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_have_expected_shape() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_are_distinct() {
        let tokens: HashSet<String> = (0..100).map(|_| generate()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
