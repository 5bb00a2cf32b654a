use time::{Duration, OffsetDateTime};

/// Istante corrente in UTC, troncato al millisecondo (la precisione dello storage).
pub fn now_utc() -> OffsetDateTime {
    truncate_to_millis(OffsetDateTime::now_utc())
}

pub fn truncate_to_millis(t: OffsetDateTime) -> OffsetDateTime {
    let extra = t.nanosecond() % 1_000_000;
    t - Duration::nanoseconds(i64::from(extra))
}

/// Millisecondi dall'epoch Unix.
pub fn to_unix_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_unix_millis(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}
