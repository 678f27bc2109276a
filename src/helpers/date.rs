//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Display locale for dates and fixed phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese (`15 mar 2021`)
    #[default]
    PtBr,
    /// English (`15 Mar 2021`)
    En,
}

impl Locale {
    /// Abbreviated stand-alone month name, `month0` in `0..12`
    pub fn month_abbr(self, month0: u32) -> &'static str {
        const PT_BR: [&str; 12] = [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ];
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let idx = (month0 as usize).min(11);
        match self {
            Locale::PtBr => PT_BR[idx],
            Locale::En => EN[idx],
        }
    }

    fn edited_on(self) -> &'static str {
        match self {
            Locale::PtBr => "editado em",
            Locale::En => "edited on",
        }
    }

    fn at(self) -> &'static str {
        match self {
            Locale::PtBr => "às",
            Locale::En => "at",
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(Error::Config(format!("Unsupported language: {}", s))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::PtBr => f.write_str("pt-BR"),
            Locale::En => f.write_str("en"),
        }
    }
}

/// Parse a content API timestamp.
///
/// Accepts RFC 3339 (`2021-03-15T19:25:28+00:00`, `...Z`) as well as the
/// colon-less offset form the API emits (`2021-03-15T19:25:28+0000`).
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
}

/// Formats publication timestamps for one locale and time zone
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
    tz: Tz,
}

impl DateFormatter {
    pub fn new(locale: Locale, tz: Tz) -> Self {
        Self { locale, tz }
    }

    /// Build from config strings (`pt-BR`, `America/Sao_Paulo`).
    /// An empty time zone means UTC.
    pub fn from_names(language: &str, timezone: &str) -> Result<Self, Error> {
        let locale = language.parse()?;
        let tz = if timezone.is_empty() {
            Tz::UTC
        } else {
            timezone
                .parse::<Tz>()
                .map_err(|e| Error::Config(format!("Unknown time zone {}: {}", timezone, e)))?
        };
        Ok(Self::new(locale, tz))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// `d LLL y`, e.g. `15 mar 2021`
    pub fn publication_date<Tz2: TimeZone>(&self, date: &DateTime<Tz2>) -> String {
        let local = date.with_timezone(&self.tz);
        format!(
            "{} {} {}",
            local.day(),
            self.locale.month_abbr(local.month0()),
            local.year()
        )
    }

    /// `* editado em 19 mar 2021, às 15:49`
    pub fn edited_on<Tz2: TimeZone>(&self, date: &DateTime<Tz2>) -> String {
        let local = date.with_timezone(&self.tz);
        format!(
            "* {} {}, {} {}",
            self.locale.edited_on(),
            self.publication_date(date),
            self.locale.at(),
            local.format("%H:%M")
        )
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Locale::default(), Tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_forms() {
        let a = parse_timestamp("2021-03-15T19:25:28+0000").unwrap();
        let b = parse_timestamp("2021-03-15T19:25:28+00:00").unwrap();
        let c = parse_timestamp("2021-03-15T19:25:28Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(parse_timestamp("15/03/2021").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_publication_date_pt_br() {
        let fmt = DateFormatter::default();
        let date = parse_timestamp("2021-03-15T19:25:28+0000").unwrap();
        assert_eq!(fmt.publication_date(&date), "15 mar 2021");
    }

    #[test]
    fn test_edited_on() {
        let date = parse_timestamp("2021-03-19T15:49:00+0000").unwrap();
        assert_eq!(
            DateFormatter::default().edited_on(&date),
            "* editado em 19 mar 2021, às 15:49"
        );

        let en = DateFormatter::new(Locale::En, Tz::UTC);
        assert_eq!(en.edited_on(&date), "* edited on 19 Mar 2021, at 15:49");
    }

    #[test]
    fn test_time_zone_shifts_day() {
        let fmt = DateFormatter::from_names("pt-BR", "America/Sao_Paulo").unwrap();
        let date = parse_timestamp("2021-04-01T01:30:00+0000").unwrap();
        assert_eq!(fmt.publication_date(&date), "31 mar 2021");
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        assert!(DateFormatter::from_names("fr", "").is_err());
        assert!(DateFormatter::from_names("en", "Mars/Olympus").is_err());
    }
}
