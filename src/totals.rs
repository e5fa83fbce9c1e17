// ⚖️ Totals Calculator
// income - expense = net, recomputed from the record lists on every read
//
// Imported rows always count as income; only manual rows can be expenses.

use crate::record::{format_money, MovementKind, Record};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl Totals {
    /// Sidebar / report summary lines, in display order
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("Total Ingresos: ${}", format_money(self.income)),
            format!("Total Egresos: ${}", format_money(self.expense)),
            format!("Total Final: ${}", format_money(self.net)),
        ]
    }
}

/// Compute (income, expense, net) over manual and imported records
pub fn compute_totals(manual: &[Record], imported: &[Record]) -> Totals {
    let manual_income = sum_kind(manual, MovementKind::Income);
    let expense = sum_kind(manual, MovementKind::Expense);
    let imported_income: Decimal = imported.iter().map(Record::amount).sum();

    let income = manual_income + imported_income;

    Totals {
        income,
        expense,
        net: income - expense,
    }
}

fn sum_kind(records: &[Record], kind: MovementKind) -> Decimal {
    records
        .iter()
        .filter(|r| r.kind() == kind)
        .map(Record::amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(kind: MovementKind, amount: &str) -> Record {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Record::new(kind, "Proveedor A", dec(amount), date).unwrap()
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let totals = compute_totals(&[], &[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.net, Decimal::ZERO);
    }

    #[test]
    fn test_manual_income_and_expense() {
        let manual = vec![
            record(MovementKind::Income, "100.00"),
            record(MovementKind::Expense, "40.00"),
        ];
        let totals = compute_totals(&manual, &[]);

        assert_eq!(totals.income, dec("100"));
        assert_eq!(totals.expense, dec("40"));
        assert_eq!(totals.net, dec("60"));
    }

    #[test]
    fn test_imported_records_count_as_income() {
        let imported = vec![
            record(MovementKind::Income, "10.0"),
            record(MovementKind::Income, "7.5"),
        ];
        let manual = vec![record(MovementKind::Expense, "2.5")];
        let totals = compute_totals(&manual, &imported);

        assert_eq!(totals.income, dec("17.5"));
        assert_eq!(totals.expense, dec("2.5"));
        assert_eq!(totals.net, dec("15"));
    }

    #[test]
    fn test_net_can_go_negative() {
        let manual = vec![record(MovementKind::Expense, "40")];
        let totals = compute_totals(&manual, &[]);
        assert_eq!(totals.net, dec("-40"));
        assert_eq!(totals.summary_lines()[2], "Total Final: $-40.00");
    }

    #[test]
    fn test_order_does_not_matter() {
        let mut manual = vec![
            record(MovementKind::Income, "12.34"),
            record(MovementKind::Expense, "0.34"),
            record(MovementKind::Income, "88"),
            record(MovementKind::Expense, "50"),
        ];
        let forward = compute_totals(&manual, &[]);
        manual.reverse();
        let backward = compute_totals(&manual, &[]);

        assert_eq!(forward, backward);
        assert_eq!(forward.net, dec("50"));
    }

    #[test]
    fn test_summary_lines() {
        let totals = Totals {
            income: dec("100"),
            expense: dec("40"),
            net: dec("60"),
        };
        assert_eq!(
            totals.summary_lines(),
            [
                "Total Ingresos: $100.00".to_string(),
                "Total Egresos: $40.00".to_string(),
                "Total Final: $60.00".to_string(),
            ]
        );
    }
}
