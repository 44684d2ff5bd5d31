//! Full and partial contact dates on the wire.

use chrono::{Datelike, NaiveDate};

use rolodex_rfc::rfc::vcard::{VCardParameter, VCardProperty};
use rolodex_store::model::ContactDate;

/// Year Apple clients put in front of dates whose year is unknown.
const APPLE_OMIT_YEAR: i32 = 1604;
const APPLE_OMIT_YEAR_PARAM: &str = "X-APPLE-OMIT-YEAR";

/// Parses `--MMDD`, `--MM-DD`, `YYYYMMDD` or `YYYY-MM-DD` (any time part is
/// ignored). The Apple placeholder year, or the year named by
/// `X-APPLE-OMIT-YEAR`, yields a partial date.
#[must_use]
pub fn parse_date(prop: &VCardProperty) -> Option<ContactDate> {
    let raw = prop.text();
    let value = raw.trim().split('T').next().unwrap_or_default();

    if let Some(rest) = value.strip_prefix("--") {
        let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 4 {
            return None;
        }
        let month = digits[..2].parse().ok()?;
        let day = digits[2..].parse().ok()?;
        return ContactDate::partial(month, day);
    }

    let date = NaiveDate::parse_from_str(value, "%Y%m%d")
        .or_else(|_e| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()?;

    let omitted = prop
        .get_param_value(APPLE_OMIT_YEAR_PARAM)
        .and_then(|y| y.trim().parse::<i32>().ok())
        .unwrap_or(APPLE_OMIT_YEAR);

    if date.year() == omitted {
        return ContactDate::partial(date.month(), date.day());
    }

    Some(ContactDate::Full(date))
}

/// Builds a date-valued property.
#[must_use]
pub fn format_date(name: &str, date: &ContactDate, is_apple: bool) -> VCardProperty {
    match date {
        ContactDate::Full(date) => VCardProperty::raw(name, date.format("%Y%m%d").to_string()),
        ContactDate::Partial { month, day } if is_apple => VCardProperty::raw(
            name,
            format!("{APPLE_OMIT_YEAR}-{month:02}-{day:02}"),
        )
        .with_param(VCardParameter::new(
            APPLE_OMIT_YEAR_PARAM,
            APPLE_OMIT_YEAR.to_string(),
        )),
        ContactDate::Partial { month, day } => {
            VCardProperty::raw(name, format!("--{month:02}{day:02}"))
        }
    }
}
