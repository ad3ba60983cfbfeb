use std::str::FromStr;

use crate::Error;

/// The column to sort transactions by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Date,
    Description,
    Category,
    Amount,
    Type,
}

impl OrderBy {
    fn column(&self) -> &'static str {
        match self {
            OrderBy::Date => "date",
            OrderBy::Description => "description",
            OrderBy::Category => "category",
            // Amounts are stored as decimal text, which does not sort numerically.
            OrderBy::Amount => "CAST(amount AS REAL)",
            OrderBy::Type => "type",
        }
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    /// Accepts the full column names and the short codes `desc`, `cat` and
    /// `amt`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(OrderBy::Date),
            "desc" | "description" => Ok(OrderBy::Description),
            "cat" | "category" => Ok(OrderBy::Category),
            "amt" | "amount" => Ok(OrderBy::Amount),
            "type" => Ok(OrderBy::Type),
            other => Err(Error::InvalidArgument(format!(
                "invalid order_by column '{other}', use one of date, desc, cat, amt, type"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for OrderDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(OrderDirection::Ascending),
            "desc" | "descending" => Ok(OrderDirection::Descending),
            _ => Err(Error::InvalidArgument(format!(
                "invalid order_direction '{s}', use asc or desc"
            ))),
        }
    }
}

/// How a list of transactions is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub by: OrderBy,
    pub direction: OrderDirection,
}

impl Ordering {
    /// Parse the raw `order_by` and `order_direction` arguments.
    ///
    /// Neither given means insertion order (`None`). A direction without a
    /// column sorts by date.
    ///
    /// # Errors
    /// Returns [Error::InvalidArgument] for an unknown column or direction.
    pub fn parse(order_by: Option<&str>, direction: Option<&str>) -> Result<Option<Self>, Error> {
        let by = order_by.map(OrderBy::from_str).transpose()?;
        let direction = direction.map(OrderDirection::from_str).transpose()?;

        Ok(match (by, direction) {
            (None, None) => None,
            (by, direction) => Some(Ordering {
                by: by.unwrap_or(OrderBy::Date),
                direction: direction.unwrap_or_default(),
            }),
        })
    }

    /// The `ORDER BY` clause, with the ID as a tie breaker so the order is
    /// stable across queries.
    pub(crate) fn sql(ordering: Option<&Ordering>) -> String {
        match ordering {
            None => " ORDER BY id ASC".to_string(),
            Some(ordering) => {
                let direction = match ordering.direction {
                    OrderDirection::Ascending => "ASC",
                    OrderDirection::Descending => "DESC",
                };
                format!(" ORDER BY {} {direction}, id ASC", ordering.by.column())
            }
        }
    }
}
