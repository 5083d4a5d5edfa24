//! Reward value codec
//!
//! Rewards are stored as a tagged, reversible text encoding: `FHE-` followed
//! by the base64 of the decimal value. Despite the tag this is plain
//! encoding, not encryption. If real confidentiality is ever required this
//! boundary is where an actual cipher must be substituted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

const REWARD_TAG: &str = "FHE-";

/// Encode a reward amount into its tagged storage form.
pub fn encode_reward(value: f64) -> String {
    format!("{}{}", REWARD_TAG, STANDARD.encode(value.to_string()))
}

/// Decode a stored reward. Accepts both the tagged form and a raw numeric
/// string written by older clients. Malformed input yields `f64::NAN`;
/// callers must treat NaN as a decode failure.
pub fn decode_reward(text: &str) -> f64 {
    let raw = match text.strip_prefix(REWARD_TAG) {
        Some(encoded) => {
            let bytes = match STANDARD.decode(encoded) {
                Ok(b) => b,
                Err(_) => return f64::NAN,
            };
            match String::from_utf8(bytes) {
                Ok(s) => s,
                Err(_) => return f64::NAN,
            }
        }
        None => text.to_string(),
    };
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}
