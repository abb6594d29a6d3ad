use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("date and content are required")]
    MissingField,

    #[error("date must be in YYYY-MM-DD format, got {0:?}")]
    DateFormat(String),

    #[error("{0} is not a calendar date")]
    ImpossibleDate(String),

    #[error("invalid month {0:?}, expected a four-digit year and a two-digit month")]
    InvalidMonth(String),
}

/// A write request that has passed validation and may go to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub content: String,
}

impl NewEntry {
    pub fn parse(date: Option<&str>, content: Option<&str>) -> Result<Self, ValidationError> {
        let (date, content) = match (date, content) {
            (Some(date), Some(content)) if !date.is_empty() && !content.is_empty() => {
                (date, content)
            }
            _ => return Err(ValidationError::MissingField),
        };

        Ok(Self {
            date: parse_iso_date(date)?,
            content: content.to_string(),
        })
    }
}

/// Accepts exactly `dddd-dd-dd` naming a real calendar day.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shaped {
        return Err(ValidationError::DateFormat(input.to_string()));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::ImpossibleDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_request() {
        let entry = NewEntry::parse(Some("2025-03-14"), Some("hello")).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(entry.content, "hello");
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        assert_eq!(
            NewEntry::parse(None, Some("hello")),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            NewEntry::parse(Some("2025-03-14"), Some("")),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            NewEntry::parse(Some(""), Some("hello")),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn unpadded_date_is_a_format_error() {
        assert_eq!(
            parse_iso_date("2025-3-1"),
            Err(ValidationError::DateFormat("2025-3-1".into()))
        );
        assert!(matches!(
            parse_iso_date("2025/03/01"),
            Err(ValidationError::DateFormat(_))
        ));
        assert!(matches!(
            parse_iso_date(" 2025-03-01"),
            Err(ValidationError::DateFormat(_))
        ));
    }

    #[test]
    fn shaped_but_impossible_date_is_rejected() {
        assert_eq!(
            parse_iso_date("2025-02-30"),
            Err(ValidationError::ImpossibleDate("2025-02-30".into()))
        );
    }
}
