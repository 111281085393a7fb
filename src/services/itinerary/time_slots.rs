use crate::error::{AppError, Result};
use crate::models::{TimeSlot, TimeWindow};
use time::Duration;

/// Split `window` into `stops` equal, contiguous slots.
///
/// Boundaries are whole minutes: slot `i` starts `floor(i * T / stops)`
/// minutes after the window opens, so the last slot always ends exactly at
/// the window end.
pub fn allocate(window: &TimeWindow, stops: usize) -> Result<Vec<TimeSlot>> {
    if window.end <= window.start {
        return Err(AppError::InvalidWindow(
            "endTime must be after startTime".to_string(),
        ));
    }
    if stops == 0 {
        return Err(AppError::InvalidWindow(
            "cannot allocate time slots for a day without stops".to_string(),
        ));
    }

    let total = window.total_minutes() as u64;
    let count = stops as u64;
    let boundary = |i: u64| window.start + Duration::minutes((i * total / count) as i64);

    Ok((0..count)
        .map(|i| TimeSlot {
            start: boundary(i),
            end: boundary(i + 1),
        })
        .collect())
}
