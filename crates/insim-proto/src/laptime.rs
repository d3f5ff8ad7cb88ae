//! Lap and split time formatting.

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Times of 100 hours and above are not formatted.
const LIMIT_MS: u64 = 100 * MS_PER_HOUR;

/// Formats a millisecond time as `h:mm:ss.xx`, `m:ss.xx`, `s.xx` or `0.xx`.
///
/// Leading units are left out when zero and the leading unit is not zero
/// padded. With `thousandths` the fraction has three digits instead of two.
/// Negative times get a `-` prefix. Returns `None` for times of 100 hours or
/// more in either direction.
pub fn format_time(ms: i64, thousandths: bool) -> Option<String> {
    let abs = ms.unsigned_abs();
    if abs >= LIMIT_MS {
        return None;
    }

    let hours = abs / MS_PER_HOUR;
    let minutes = abs % MS_PER_HOUR / MS_PER_MINUTE;
    let seconds = abs % MS_PER_MINUTE / MS_PER_SECOND;
    let millis = abs % MS_PER_SECOND;

    let sign = if ms < 0 { "-" } else { "" };
    let whole = if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:02}")
    } else {
        seconds.to_string()
    };
    let fraction = if thousandths {
        format!("{millis:03}")
    } else {
        format!("{:02}", millis / 10)
    };
    Some(format!("{sign}{whole}.{fraction}"))
}
