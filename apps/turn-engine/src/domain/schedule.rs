//! Step timing.
//!
//! Steps run back to back: each one lasts its duration plus a fixed buffer,
//! and the next one starts a further buffer after that.

use crate::entities::{EpochMillis, Step};
use crate::errors::domain::{DomainError, ValidationKind};

/// Padding added after each step's duration and again before the next step.
pub const STEP_BUFFER_MS: u64 = 500;

/// Parse a game start time given as decimal milliseconds.
pub fn parse_start_time(text: &str) -> Result<EpochMillis, DomainError> {
    text.parse::<EpochMillis>().map_err(|e| {
        DomainError::validation(
            ValidationKind::InvalidTimestamp,
            format!("start time {text:?} is not epoch milliseconds: {e}"),
        )
    })
}

/// Assign index, start and end time to every step in list order.
///
/// For step `i`: `start_0 = start`, `end_i = start_i + duration_i * 1000 + buffer`,
/// `start_{i+1} = end_i + buffer`.
pub fn schedule_steps(steps: &mut [Step], start: EpochMillis, buffer_ms: u64) {
    let mut next_start = start;
    for (index, step) in steps.iter_mut().enumerate() {
        let end = next_start
            .plus_millis(step.duration_secs.saturating_mul(1000))
            .plus_millis(buffer_ms);
        step.step_index = index;
        step.start_time = Some(next_start);
        step.end_time = Some(end);
        next_start = end.plus_millis(buffer_ms);
    }
}
