use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Renders a timestamp the way notification emails show it, e.g.
/// `March 04, 2025 at 02:15 PM`.
pub fn to_human(dt: DateTime<Utc>) -> String {
    dt.format("%B %d, %Y at %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn human_format_pads_day_and_hour() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 4, 14, 15, 0).unwrap();
        assert_eq!(to_human(dt), "March 04, 2025 at 02:15 PM");
    }

    #[test]
    fn human_format_morning() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 25, 9, 5, 0).unwrap();
        assert_eq!(to_human(dt), "December 25, 2024 at 09:05 AM");
    }
}
