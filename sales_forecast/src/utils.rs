//! Utility functions for the sales_forecast crate

/// Parsing and formatting of the date/time text used in tables and CSVs
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{NaiveDate, NaiveDateTime};

    /// Format of calendar days in stored tables
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    /// Format of order timestamps in stored tables
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    const TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    /// Parse a `YYYY-MM-DD` day
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| ForecastError::DataError(format!("Invalid date '{}': {}", s, e)))
    }

    /// Parse an order timestamp; a bare date means midnight
    pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
        let s = s.trim();
        for format in TIMESTAMP_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(ts);
            }
        }

        parse_date(s)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ForecastError::DataError(format!("Invalid timestamp '{}'", s)))
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    pub fn format_timestamp(ts: NaiveDateTime) -> String {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_supported_timestamp_shapes() {
            let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(14, 30, 45)
                .unwrap();
            assert_eq!(parse_timestamp("2023-01-15 14:30:45").unwrap(), expected);
            assert_eq!(parse_timestamp("2023-01-15T14:30:45").unwrap(), expected);
            assert_eq!(
                parse_timestamp("2023-01-15 14:30:45.250").unwrap().date(),
                expected.date()
            );
            assert_eq!(
                parse_timestamp("2023-01-15").unwrap(),
                NaiveDate::from_ymd_opt(2023, 1, 15)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            );
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse_timestamp("not-a-date").is_err());
            assert!(parse_date("2023-13-01").is_err());
        }

        #[test]
        fn formats_round_trip() {
            let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
            assert_eq!(format_date(date), "2024-02-29");
            assert_eq!(parse_date(&format_date(date)).unwrap(), date);
        }
    }
}
