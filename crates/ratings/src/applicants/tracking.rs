use rand::Rng;

pub const TRACKING_CODE_LEN: usize = 8;

/// Uppercase letters minus `W`, plus the ten digits. The letter gap matches
/// the generation list codes were historically issued from, so lookups against
/// old records stay consistent. No uniqueness check is performed here.
pub const TRACKING_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVXYZ0123456789";

/// Draw an 8-character tracking code uniformly from the fixed alphabet.
pub fn generate_tracking_code() -> String {
    let mut rng = rand::thread_rng();
    (0..TRACKING_CODE_LEN)
        .map(|_| {
            let index = rng.gen_range(0..TRACKING_ALPHABET.len());
            TRACKING_ALPHABET[index] as char
        })
        .collect()
}
