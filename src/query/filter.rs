//! Turns the raw filter tokens a user types into [Predicate]s and a heading
//! describing the selection.

use std::sync::OnceLock;

use chrono::{Month, NaiveDate};
use regex::Regex;

use crate::Error;
use crate::models::transaction::TransactionType;

use super::predicate::Predicate;

/// Raw, unvalidated filter tokens. Empty strings count as not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// `MM` (needs `year`) or `YYYY-MM`.
    pub month: Option<String>,
    /// `YYYY`.
    pub year: Option<String>,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
}

/// Validated predicates plus a human readable description, e.g.
/// `"for March 2024, category 'Rent'"` or `"Overall"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub predicates: Vec<Predicate>,
    pub description: String,
}

impl ResolvedFilter {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

fn year_month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid regex"))
}

fn month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,2}$").expect("valid regex"))
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid regex"))
}

/// The English name of month number `month` (1 = January), or `None` outside
/// 1-12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// The first and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

fn given(token: &Option<String>) -> Option<&str> {
    token.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

// Categories are free text matched exactly, so surrounding spaces are kept.
fn given_verbatim(token: &Option<String>) -> Option<&str> {
    token.as_deref().filter(|t| !t.trim().is_empty())
}

fn parse_year(token: &str) -> Result<i32, Error> {
    if !year_pattern().is_match(token) {
        return Err(Error::InvalidFilter(format!(
            "invalid year format '{token}', use YYYY"
        )));
    }
    token
        .parse()
        .map_err(|_| Error::InvalidFilter(format!("invalid year format '{token}', use YYYY")))
}

fn parse_month_number(token: &str) -> Result<u32, Error> {
    match token.parse::<u32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(Error::InvalidFilter(format!(
            "invalid month '{token}', months are 01 to 12"
        ))),
    }
}

fn parse_date(token: &str, which: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| {
        Error::InvalidFilter(format!("invalid {which} date '{token}', use YYYY-MM-DD"))
    })
}

pub(crate) fn resolve_month(month: &str, year: Option<&str>) -> Result<(i32, u32), Error> {
    if let Some(captures) = year_month_pattern().captures(month) {
        let month_year = parse_year(&captures[1])?;
        let month_number = parse_month_number(&captures[2])?;

        if let Some(year) = year {
            if parse_year(year)? != month_year {
                return Err(Error::InvalidFilter(format!(
                    "month '{month}' does not fall in year '{year}'"
                )));
            }
        }
        return Ok((month_year, month_number));
    }

    if month_pattern().is_match(month) {
        let month_number = parse_month_number(month)?;
        let year = year.ok_or_else(|| {
            Error::InvalidFilter("must specify year along with month".to_string())
        })?;
        return Ok((parse_year(year)?, month_number));
    }

    Err(Error::InvalidFilter(format!(
        "invalid month format '{month}', use MM or YYYY-MM"
    )))
}

/// Validate `input` and turn it into predicates.
///
/// Every given token becomes one predicate; they are combined with `AND` by
/// the query engine. Nothing is read from the database, so a bad token is
/// reported before any query runs.
///
/// # Errors
/// Returns [Error::InvalidFilter] if a token is malformed, a month number is
/// outside 1-12, or a bare `MM` month is given without a year.
pub fn resolve_filter(input: &FilterInput) -> Result<ResolvedFilter, Error> {
    let mut predicates = Vec::new();
    let mut parts: Vec<String> = Vec::new();

    let month = given(&input.month);
    let year = given(&input.year);

    if let Some(month) = month {
        let (year, month) = resolve_month(month, year)?;
        let name = month_name(month).ok_or_else(|| {
            Error::InvalidFilter(format!("invalid month '{month}', months are 01 to 12"))
        })?;
        predicates.push(Predicate::Month { year, month });
        parts.push(format!("for {name} {year}"));
    } else if let Some(year) = year {
        let year = parse_year(year)?;
        predicates.push(Predicate::Year(year));
        parts.push(format!("for {year}"));
    }

    let start_date = given(&input.start_date)
        .map(|d| parse_date(d, "start"))
        .transpose()?;
    let end_date = given(&input.end_date)
        .map(|d| parse_date(d, "end"))
        .transpose()?;

    match (start_date, end_date) {
        (Some(start), Some(end)) => parts.push(format!("from {start} to {end}")),
        (Some(start), None) => parts.push(format!("from {start}")),
        (None, Some(end)) => parts.push(format!("up to {end}")),
        (None, None) => {}
    }
    predicates.extend(start_date.map(Predicate::DateFrom));
    predicates.extend(end_date.map(Predicate::DateTo));

    if let Some(category) = given_verbatim(&input.category) {
        predicates.push(Predicate::Category(category.to_string()));
        if parts.is_empty() {
            parts.push(format!("for category '{category}'"));
        } else {
            parts.push(format!("category '{category}'"));
        }
    }

    if let Some(transaction_type) = given(&input.transaction_type) {
        let transaction_type: TransactionType = transaction_type.parse().map_err(|_| {
            Error::InvalidFilter(format!(
                "invalid type '{transaction_type}', use 'income' or 'expense'"
            ))
        })?;
        predicates.push(Predicate::Type(transaction_type));
        if parts.is_empty() {
            parts.push(format!("for type '{transaction_type}'"));
        } else {
            parts.push(format!("type '{transaction_type}'"));
        }
    }

    let description = if parts.is_empty() {
        "Overall".to_string()
    } else {
        parts.join(", ")
    };

    Ok(ResolvedFilter {
        predicates,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month_year(month: &str, year: Option<&str>) -> FilterInput {
        FilterInput {
            month: Some(month.to_string()),
            year: year.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_filters_is_overall() {
        let resolved = resolve_filter(&FilterInput::default()).unwrap();
        assert!(resolved.is_empty());
        assert_eq!(resolved.description, "Overall");
    }

    #[test]
    fn test_year_month_token_is_self_contained() {
        let resolved = resolve_filter(&month_year("2024-03", None)).unwrap();
        assert_eq!(resolved.predicates, vec![Predicate::Month { year: 2024, month: 3 }]);
        assert_eq!(resolved.description, "for March 2024");
    }

    #[test]
    fn test_short_month_is_zero_padded_with_year() {
        let resolved = resolve_filter(&month_year("3", Some("2024"))).unwrap();
        assert_eq!(resolved.predicates, vec![Predicate::Month { year: 2024, month: 3 }]);
        assert_eq!(resolved.description, "for March 2024");
    }

    #[test]
    fn test_short_month_without_year_is_rejected() {
        let result = resolve_filter(&month_year("03", None));
        assert!(matches!(result, Err(Error::InvalidFilter(ref msg)) if msg.contains("year")));
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(matches!(
            resolve_filter(&month_year("13", Some("2024"))),
            Err(Error::InvalidFilter(_))
        ));
        assert!(matches!(
            resolve_filter(&month_year("2024-13", None)),
            Err(Error::InvalidFilter(_))
        ));
        assert!(matches!(
            resolve_filter(&month_year("0", Some("2024"))),
            Err(Error::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_malformed_month_is_rejected() {
        let result = resolve_filter(&month_year("March", Some("2024")));
        assert!(matches!(
            result,
            Err(Error::InvalidFilter(ref msg)) if msg.contains("MM or YYYY-MM")
        ));
    }

    #[test]
    fn test_conflicting_year_is_rejected() {
        let result = resolve_filter(&month_year("2024-03", Some("2023")));
        assert!(matches!(result, Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn test_year_alone_needs_four_digits() {
        let input = FilterInput {
            year: Some("24".to_string()),
            ..Default::default()
        };
        let result = resolve_filter(&input);
        assert!(matches!(
            result,
            Err(Error::InvalidFilter(ref msg)) if msg.contains("invalid year format")
        ));

        let input = FilterInput {
            year: Some("2024".to_string()),
            ..Default::default()
        };
        let resolved = resolve_filter(&input).unwrap();
        assert_eq!(resolved.predicates, vec![Predicate::Year(2024)]);
        assert_eq!(resolved.description, "for 2024");
    }

    #[test]
    fn test_category_appends_to_description() {
        let input = FilterInput {
            month: Some("2024-01".to_string()),
            category: Some("Rent".to_string()),
            ..Default::default()
        };
        let resolved = resolve_filter(&input).unwrap();
        assert_eq!(resolved.description, "for January 2024, category 'Rent'");
    }

    #[test]
    fn test_category_alone_starts_description() {
        let input = FilterInput {
            category: Some("Rent".to_string()),
            ..Default::default()
        };
        let resolved = resolve_filter(&input).unwrap();
        assert_eq!(resolved.description, "for category 'Rent'");
        assert_eq!(
            resolved.predicates,
            vec![Predicate::Category("Rent".to_string())]
        );
    }

    #[test]
    fn test_category_is_matched_verbatim() {
        let input = FilterInput {
            category: Some(" Rent ".to_string()),
            ..Default::default()
        };
        let resolved = resolve_filter(&input).unwrap();
        assert_eq!(
            resolved.predicates,
            vec![Predicate::Category(" Rent ".to_string())]
        );

        let blank = FilterInput {
            category: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(resolve_filter(&blank).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_type_is_an_invalid_filter() {
        let input = FilterInput {
            transaction_type: Some("transfer".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve_filter(&input), Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn test_date_range_parses_both_bounds() {
        let input = FilterInput {
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-02-28".to_string()),
            ..Default::default()
        };
        let resolved = resolve_filter(&input).unwrap();
        assert_eq!(
            resolved.predicates,
            vec![
                Predicate::DateFrom(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
                Predicate::DateTo(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
            ]
        );
    }

    #[test]
    fn test_bad_date_is_not_treated_as_no_filter() {
        let input = FilterInput {
            start_date: Some("2024/02/01".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve_filter(&input), Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn test_month_name_lookup() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_month_bounds_handles_leap_years_and_december() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
        assert_eq!(
            month_bounds(2023, 12).map(|(_, last)| last),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(month_bounds(2023, 13), None);
    }
}
