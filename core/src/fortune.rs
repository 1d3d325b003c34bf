use alloc::string::{String, ToString};
use serde::Deserialize;

use crate::*;

/// Shown on a win when no fortune could be fetched.
pub const FALLBACK_FORTUNE: &str = "You rule!";

/// Shown on a loss, a fortune is never fetched for it.
pub const LOSE_MESSAGE: &str = "Oooops";

#[derive(Deserialize)]
struct FortunePayload {
    fortune: String,
}

/// Accepts either `{"fortune": "..."}` or a plain-text body.
pub fn parse_fortune(body: &str) -> core::result::Result<String, FortuneError> {
    let body = body.trim();
    let text = if body.starts_with('{') {
        serde_json::from_str::<FortunePayload>(body)
            .map_err(|_| FortuneError::Malformed)?
            .fortune
    } else {
        body.to_string()
    };

    let text = text.trim();
    if text.is_empty() {
        Err(FortuneError::Empty)
    } else {
        Ok(text.to_string())
    }
}

pub fn fortune_or_fallback(result: core::result::Result<String, FortuneError>) -> String {
    match result {
        Ok(fortune) if !fortune.trim().is_empty() => fortune,
        Ok(_) => {
            log::warn!("Got an empty fortune, using fallback");
            FALLBACK_FORTUNE.to_string()
        }
        Err(err) => {
            log::warn!("Something went wrong getting fortune: {}", err);
            FALLBACK_FORTUNE.to_string()
        }
    }
}
