use crate::models::error::{DashboardError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use chrono_tz::Tz;
use log::warn;

/// Short time, e.g. `2:05 PM`
pub const TIME_FORMAT: &str = "%-I:%M %p";
/// Numeric date, e.g. `10/16/2026`
pub const SHORT_DATE_FORMAT: &str = "%m/%d/%Y";
/// Abbreviated month with year, e.g. `Oct 16, 2026`
pub const MEDIUM_DATE_FORMAT: &str = "%b %-d, %Y";
/// Abbreviated month without year, e.g. `Oct 16`
pub const MONTH_DAY_FORMAT: &str = "%b %-d";

/// Timezone settings of a site
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteOffset {
    pub timezone: Option<String>,
    /// Hours east of UTC, used when no timezone is set
    pub gmt_offset: f64,
}

/// Converts a stored UTC instant to the site's local time.
///
/// A non-empty timezone name wins over the numeric offset; with neither set
/// the instant stays in UTC.
pub fn apply_site_offset(instant: DateTime<Utc>, offset: &SiteOffset) -> DateTime<FixedOffset> {
    if let Some(name) = offset.timezone.as_deref().filter(|tz| !tz.is_empty()) {
        match name.parse::<Tz>() {
            Ok(tz) => return instant.with_timezone(&tz).fixed_offset(),
            Err(_) => warn!("Unknown site timezone '{}', using gmt_offset", name),
        }
    }

    if offset.gmt_offset != 0.0 {
        let seconds = (offset.gmt_offset * 3600.0).round() as i32;
        match FixedOffset::east_opt(seconds) {
            Some(fixed) => return instant.with_timezone(&fixed),
            None => warn!("gmt_offset {} is out of range, using UTC", offset.gmt_offset),
        }
    }

    instant.with_timezone(&Utc.fix())
}

/// Calendar day at the site for the given instant
pub fn site_date(instant: DateTime<Utc>, offset: &SiteOffset) -> NaiveDate {
    apply_site_offset(instant, offset).date_naive()
}

pub fn is_same_day(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> bool {
    a.date_naive() == b.date_naive()
}

pub fn format_time(local: &DateTime<FixedOffset>) -> String {
    local.format(TIME_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date as given on the command line or in a query string
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| DashboardError::InvalidDate {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_timezone_takes_precedence_over_offset() {
        let offset = SiteOffset {
            timezone: Some("America/New_York".to_string()),
            gmt_offset: 9.0,
        };
        // EDT is UTC-4 in October
        let local = apply_site_offset(utc(2026, 10, 16, 2, 0), &offset);
        assert_eq!(local.hour(), 22);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
    }

    #[test]
    fn test_fractional_gmt_offset() {
        let offset = SiteOffset {
            timezone: None,
            gmt_offset: 5.5,
        };
        let local = apply_site_offset(utc(2026, 10, 16, 20, 0), &offset);
        assert_eq!((local.hour(), local.minute()), (1, 30));
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
    }

    #[test]
    fn test_empty_timezone_falls_back_to_offset() {
        let offset = SiteOffset {
            timezone: Some(String::new()),
            gmt_offset: -3.0,
        };
        let local = apply_site_offset(utc(2026, 10, 16, 2, 0), &offset);
        assert_eq!(local.hour(), 23);
    }

    #[test]
    fn test_no_offset_stays_utc() {
        let local = apply_site_offset(utc(2026, 10, 16, 2, 0), &SiteOffset::default());
        assert_eq!(local.hour(), 2);
        assert_eq!(local.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_format_time() {
        let offset = SiteOffset::default();
        assert_eq!(format_time(&apply_site_offset(utc(2026, 10, 16, 14, 5), &offset)), "2:05 PM");
        assert_eq!(format_time(&apply_site_offset(utc(2026, 10, 16, 0, 45), &offset)), "12:45 AM");
    }

    #[test]
    fn test_is_same_day_uses_local_calendar() {
        let offset = SiteOffset {
            timezone: Some("Asia/Tokyo".to_string()),
            gmt_offset: 0.0,
        };
        let a = apply_site_offset(utc(2026, 10, 16, 16, 0), &offset); // Oct 17 01:00 JST
        let b = apply_site_offset(utc(2026, 10, 17, 10, 0), &offset); // Oct 17 19:00 JST
        assert!(is_same_day(&a, &b));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-10-16").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert!(matches!(
            parse_date("16/10/2026"),
            Err(DashboardError::InvalidDate { .. })
        ));
    }
}
