use rand::{rngs::OsRng, Rng};

/// The base58-style alphabet used for mock addresses. Visually ambiguous characters (0, O, I, l) are
/// excluded, leaving 58 symbols.
const ADDRESS_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz123456789";
const ADDRESS_LENGTH: usize = 34;

/// Generates a mock blockchain deposit address, tagged with the currency code as prefix, e.g.
/// `BTC_4Qm7...`. The 34-character body is drawn uniformly from [`ADDRESS_ALPHABET`] using the OS's
/// cryptographically secure random source. Uniqueness is not guaranteed, only overwhelmingly likely; no
/// collision check is performed.
pub fn random_deposit_address(prefix: &str) -> String {
    let mut rng = OsRng;
    let core = (0..ADDRESS_LENGTH)
        .map(|_| ADDRESS_ALPHABET[rng.gen_range(0..ADDRESS_ALPHABET.len())] as char)
        .collect::<String>();
    format!("{prefix}_{core}")
}
