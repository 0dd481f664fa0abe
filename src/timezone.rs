use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Asia/Kolkata".
///
/// Returns `None` if the timezone name is not recognised.
pub fn local_today(canonical_timezone: &str) -> Option<Date> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{get_local_offset, local_today};

    #[test]
    fn unknown_timezone_is_none() {
        assert!(get_local_offset("Not/AZone").is_none());
        assert!(local_today("Not/AZone").is_none());
    }

    #[test]
    fn utc_today_matches_system_clock() {
        let want = OffsetDateTime::now_utc().date();

        let got = local_today("Etc/UTC").expect("UTC should be a known timezone");

        // Allow for the test running across midnight.
        assert!(got == want || got == want.next_day().unwrap_or(want));
    }
}
