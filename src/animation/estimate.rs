use crate::foundation::error::{ReelError, ReelResult};

/// Speaking rate assumed when a document does not say otherwise.
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 150.0;

/// Estimate how many whole seconds it takes to narrate `text`.
///
/// Words are whitespace-separated tokens. The result is rounded up so narration is never cut
/// short; empty text takes 0 seconds.
pub fn estimate_duration_secs(text: &str, words_per_minute: f64) -> ReelResult<u64> {
    if !words_per_minute.is_finite() || words_per_minute <= 0.0 {
        return Err(ReelError::validation(format!(
            "words_per_minute must be finite and > 0 (got {words_per_minute})"
        )));
    }

    let words = text.split_whitespace().count();
    if words == 0 {
        return Ok(0);
    }

    let words_per_sec = words_per_minute / 60.0;
    let secs = (words as f64) / words_per_sec;
    Ok(secs.ceil() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/estimate.rs"]
mod tests;
