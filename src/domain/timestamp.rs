use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time at the precision the database stores (microseconds)
///
/// Tokens handed to clients must compare equal to what was persisted, so
/// nothing finer than `timestamptz` resolution ever leaves this module.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next concurrency token for a record last stamped at `previous`
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced a full microsecond since.
pub fn next_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let candidate = now();
    if candidate > previous {
        candidate
    } else {
        previous + Duration::microseconds(1)
    }
}
