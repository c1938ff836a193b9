/// parses a feed time of day in `H+:MM:SS` form into seconds since midnight.
///
/// hours are unbounded (service past midnight is written as 24:xx:xx and
/// beyond), minutes and seconds must be exactly two digits. anything else,
/// including an hour value whose second count does not fit in `u32`, yields
/// `None` and the observation is treated as having no time.
pub fn parse_feed_time(value: &str) -> Option<u32> {
    let mut parts = value.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if hours.is_empty() || minutes.len() != 2 || seconds.len() != 2 {
        return None;
    }
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    let s: u32 = seconds.parse().ok()?;
    h.checked_mul(3600)?.checked_add(m * 60 + s)
}

#[cfg(test)]
mod test {
    use super::parse_feed_time;

    #[test]
    fn test_parses_standard_time() {
        assert_eq!(parse_feed_time("08:00:00"), Some(28800));
        assert_eq!(parse_feed_time("8:00:30"), Some(28830));
    }

    #[test]
    fn test_hours_may_exceed_23() {
        assert_eq!(parse_feed_time("25:10:00"), Some(90600));
        assert_eq!(parse_feed_time("120:00:00"), Some(432000));
    }

    #[test]
    fn test_absurd_hour_values_are_none_not_a_panic() {
        // 1193047 hours is the first value whose second count exceeds u32
        assert_eq!(parse_feed_time("1193046:28:15"), Some(u32::MAX));
        assert_eq!(parse_feed_time("1193047:00:00"), None);
        assert_eq!(parse_feed_time("99999999999:00:00"), None);
    }

    #[test]
    fn test_malformed_times_are_none() {
        assert_eq!(parse_feed_time(""), None);
        assert_eq!(parse_feed_time("08:00"), None);
        assert_eq!(parse_feed_time("08:0:00"), None);
        assert_eq!(parse_feed_time("08:00:00:00"), None);
        assert_eq!(parse_feed_time("ab:cd:ef"), None);
        assert_eq!(parse_feed_time("-1:00:00"), None);
    }
}
