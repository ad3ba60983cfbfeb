use std::ops::Add;

use rust_decimal::Decimal;
use serde::Serialize;

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
}

impl Summary {
    pub fn new(total_income: Decimal, total_expenses: Decimal) -> Self {
        Self {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }
}

impl Add for Summary {
    type Output = Summary;

    fn add(self, rhs: Summary) -> Summary {
        Summary::new(
            self.total_income + rhs.total_income,
            self.total_expenses + rhs.total_expenses,
        )
    }
}
