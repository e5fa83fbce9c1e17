// 🧾 Record model
// One cash movement: kind, label, amount and calendar date

use crate::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ingreso / Egreso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    /// Label used on screen and in the printed report
    pub fn name(&self) -> &'static str {
        match self {
            MovementKind::Income => "Ingreso",
            MovementKind::Expense => "Egreso",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            MovementKind::Income => MovementKind::Expense,
            MovementKind::Expense => MovementKind::Income,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingreso" | "income" | "i" => Ok(MovementKind::Income),
            "egreso" | "expense" | "e" => Ok(MovementKind::Expense),
            other => Err(format!("unknown movement kind: {}", other)),
        }
    }
}

/// Largest amount a single record may carry. Keeps every session sum far
/// below `Decimal::MAX`.
const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000_000;

pub fn max_amount() -> Decimal {
    Decimal::from(MAX_WHOLE_UNITS)
}

/// Record - a single validated cash movement
///
/// Fields are private: once a record is appended to a session it can only be
/// read, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    kind: MovementKind,
    label: String,
    amount: Decimal,
    date: NaiveDate,
}

impl Record {
    /// Build a record, rejecting blank labels and amounts outside (0, max_amount]
    pub fn new(
        kind: MovementKind,
        label: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        if amount > max_amount() {
            return Err(ValidationError::AmountTooLarge(amount));
        }

        Ok(Record {
            kind,
            label,
            amount,
            date,
        })
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == MovementKind::Income
    }

    /// `2024-01-01 | Ingreso | Proveedor A | $100.00`
    pub fn report_line(&self) -> String {
        format!(
            "{} | {} | {} | ${}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.label,
            format_money(self.amount)
        )
    }
}

/// Two decimal places, half away from zero: 2.345 -> "2.35", 100 -> "100.00"
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Parse an amount typed by a user ("1500", "1500.50", "1.5e3")
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_new_record_valid() {
        let record = Record::new(MovementKind::Income, "Proveedor A", dec("100.00"), day()).unwrap();
        assert_eq!(record.kind(), MovementKind::Income);
        assert_eq!(record.label(), "Proveedor A");
        assert_eq!(record.amount(), dec("100"));
        assert!(record.is_income());
    }

    #[test]
    fn test_new_record_rejects_blank_label() {
        let result = Record::new(MovementKind::Expense, "   ", dec("5"), day());
        assert_eq!(result, Err(ValidationError::EmptyLabel));
    }

    #[test]
    fn test_new_record_rejects_zero_and_negative() {
        assert_eq!(
            Record::new(MovementKind::Expense, "Proveedor B", Decimal::ZERO, day()),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
        assert!(Record::new(MovementKind::Income, "Proveedor B", dec("-3.0"), day()).is_err());
    }

    #[test]
    fn test_new_record_rejects_oversized_amount() {
        assert!(Record::new(MovementKind::Income, "Proveedor A", max_amount(), day()).is_ok());
        assert_eq!(
            Record::new(MovementKind::Income, "Proveedor A", Decimal::MAX, day()),
            Err(ValidationError::AmountTooLarge(Decimal::MAX))
        );
    }

    #[test]
    fn test_report_line_format() {
        let record = Record::new(MovementKind::Expense, "Proveedor B", dec("40"), day()).unwrap();
        assert_eq!(record.report_line(), "2024-01-01 | Egreso | Proveedor B | $40.00");
    }

    #[test]
    fn test_format_money_rounding() {
        assert_eq!(format_money(dec("100")), "100.00");
        assert_eq!(format_money(dec("2.345")), "2.35");
        assert_eq!(format_money(dec("7.5")), "7.50");
        assert_eq!(format_money(dec("-40")), "-40.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1500 "), Some(dec("1500")));
        assert_eq!(parse_amount("12.50"), Some(dec("12.50")));
        assert_eq!(parse_amount("1.5e3"), Some(dec("1500")));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_movement_kind_from_str() {
        assert_eq!("Ingreso".parse::<MovementKind>(), Ok(MovementKind::Income));
        assert_eq!("expense".parse::<MovementKind>(), Ok(MovementKind::Expense));
        assert!("transfer".parse::<MovementKind>().is_err());
        assert_eq!(MovementKind::Income.toggle(), MovementKind::Expense);
    }
}
