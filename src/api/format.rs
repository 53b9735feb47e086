use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Presentation format for every date and timestamp leaving the API: `MM-DD-YYYY`.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Input formats accepted for dates on write requests, tried in order.
const INPUT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", DATE_FORMAT];

/// Anything that can be reduced to a calendar day for presentation.
///
/// Timestamps are reduced to their UTC calendar day.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl CalendarDate for DateTime<Utc> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Render a date or timestamp as `MM-DD-YYYY`
pub fn format_date<D: CalendarDate>(value: &D) -> String {
    value.calendar_date().format(DATE_FORMAT).to_string()
}

/// Parse an input date given as `YYYY-MM-DD`, `MM-DD-YYYY`, or an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Serde helpers for `#[serde(serialize_with = ...)]` on date fields
pub mod mdy {
    use super::{format_date, CalendarDate};
    use serde::Serializer;

    pub fn serialize<D, S>(value: &D, serializer: S) -> Result<S::Ok, S::Error>
    where
        D: CalendarDate,
        S: Serializer,
    {
        serializer.serialize_str(&format_date(value))
    }

    pub fn option<D, S>(value: &Option<D>, serializer: S) -> Result<S::Ok, S::Error>
    where
        D: CalendarDate,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&format_date(v)),
            None => serializer.serialize_none(),
        }
    }
}

/// Serde helper for `#[serde(default, deserialize_with = ...)]` on optional input dates
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD or MM-DD-YYYY", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[test]
    fn formats_dates_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(format_date(&date), "03-02-2024");
    }

    #[test]
    fn formats_timestamps_by_utc_day() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 2, 23, 59, 59).unwrap();
        assert_eq!(format_date(&ts), "03-02-2024");
        assert_eq!(format_date(&ts.naive_utc()), "03-02-2024");
    }

    #[test]
    fn parses_both_input_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 2);
        assert_eq!(parse_date("2024-03-02"), expected);
        assert_eq!(parse_date("03-02-2024"), expected);
        assert_eq!(parse_date("2024-03-02T10:00:00Z"), expected);
        assert_eq!(parse_date("March 2nd"), None);
    }

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(serialize_with = "mdy::option", default, deserialize_with = "flexible_date::option")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn serde_helpers_cover_null_and_values() {
        let holder: Holder = serde_json::from_str(r#"{"day":"2023-12-31"}"#).unwrap();
        assert_eq!(serde_json::to_value(&holder).unwrap()["day"], "12-31-2023");

        let empty: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(serde_json::to_value(&empty).unwrap()["day"].is_null());

        assert!(serde_json::from_str::<Holder>(r#"{"day":"31/12/2023"}"#).is_err());
    }
}
