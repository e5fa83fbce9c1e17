use chrono::NaiveDate;
use corte_caja::{
    dispatch, read_table, Command, ImportError, MovementKind, Outcome, RawTable, Report, Session,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Text drawn by each BT..ET block of every page, in page order
fn pdf_text_blocks(bytes: &[u8]) -> Vec<String> {
    fn collect(objects: &[Object], out: &mut Vec<u8>) {
        for object in objects {
            match object {
                Object::String(bytes, _) => out.extend_from_slice(bytes),
                Object::Array(items) => collect(items, out),
                _ => {}
            }
        }
    }

    let doc = Document::load_mem(bytes).unwrap();
    let mut blocks = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let mut current = Vec::new();
        for op in content.operations {
            match op.operator.as_str() {
                "BT" => current.clear(),
                "Tj" | "TJ" => collect(&op.operands, &mut current),
                "ET" => blocks.push(String::from_utf8_lossy(&current).into_owned()),
                _ => {}
            }
        }
    }
    blocks
}

fn sales_table() -> RawTable {
    read_table(
        "Nombre,Precio\nWidget,10.0\n,5.0\nGadget,-3.0\nGizmo,7.5\n".as_bytes(),
        b',',
    )
    .unwrap()
}

#[test]
fn test_round_trip_totals_and_report_lines() {
    let mut session = Session::new();
    session
        .register_movement(MovementKind::Income, "Proveedor A", dec("100.00"), day())
        .unwrap();
    session
        .register_movement(MovementKind::Expense, "Proveedor B", dec("40.00"), day())
        .unwrap();

    let totals = session.totals();
    assert_eq!(totals.income, dec("100.00"));
    assert_eq!(totals.expense, dec("40.00"));
    assert_eq!(totals.net, dec("60.00"));

    let report = Report::new(day(), &totals, session.manual_records());
    let texts: Vec<&str> = report.texts().collect();
    assert!(texts.contains(&"Total Ingresos: $100.00"));
    assert!(texts.contains(&"Total Egresos: $40.00"));
    assert!(texts.contains(&"Total Final: $60.00"));
    assert!(texts.contains(&"2024-01-01 | Egreso | Proveedor B | $40.00"));

    let pdf = session.export_report(day()).unwrap();
    let blocks = pdf_text_blocks(&pdf);
    assert_eq!(blocks[0], "Corte de Caja - 2024-01-01");
    for expected in [
        "Total Ingresos: $100.00",
        "Total Egresos: $40.00",
        "Total Final: $60.00",
        "--- Movimientos desde el formulario ---",
        "2024-01-01 | Ingreso | Proveedor A | $100.00",
    ] {
        assert!(blocks.iter().any(|b| b == expected), "missing {:?} in {:?}", expected, blocks);
    }
}

#[test]
fn test_totals_are_order_independent() {
    let movements = [
        (MovementKind::Income, "3.10"),
        (MovementKind::Expense, "1.05"),
        (MovementKind::Income, "20"),
        (MovementKind::Expense, "7.75"),
    ];

    let mut forward = Session::new();
    for (kind, amount) in movements.iter() {
        forward.register_movement(*kind, "Proveedor C", dec(amount), day()).unwrap();
    }
    let mut backward = Session::new();
    for (kind, amount) in movements.iter().rev() {
        backward.register_movement(*kind, "Proveedor C", dec(amount), day()).unwrap();
    }

    assert_eq!(forward.totals(), backward.totals());
    assert_eq!(forward.totals().net, dec("14.30"));
}

#[test]
fn test_opening_balance_is_registered_once() {
    let mut session = Session::new();
    dispatch(&mut session, Command::SetDrawerActive(true), day()).unwrap();

    let first = dispatch(&mut session, Command::RegisterOpeningBalance(dec("500")), day()).unwrap();
    let second = dispatch(&mut session, Command::RegisterOpeningBalance(dec("300")), day()).unwrap();

    assert_eq!(first, Outcome::OpeningBalance(true));
    assert_eq!(second, Outcome::OpeningBalance(false));
    assert_eq!(session.manual_records().len(), 1);
    assert_eq!(session.manual_records()[0].label(), "Caja inicial");
    assert_eq!(session.totals().income, dec("500"));
}

#[test]
fn test_import_keeps_only_valid_rows() {
    let mut session = Session::new();
    session
        .register_movement(MovementKind::Income, "Proveedor A", dec("1"), day())
        .unwrap();
    let before = session.totals().income;

    let summary = session.import_table(&sales_table(), day()).unwrap();
    assert_eq!(summary.imported, 2);

    let labels: Vec<&str> = session.imported_records().iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Widget", "Gizmo"]);
    assert_eq!(session.totals().income - before, dec("17.5"));
    assert!(session.imported_records().iter().all(|r| r.date() == day()));
}

#[test]
fn test_import_without_price_column_keeps_previous_rows() {
    let mut session = Session::new();
    session.import_table(&sales_table(), day()).unwrap();

    let bad = read_table("Nombre,Costo\nWidget,1\n".as_bytes(), b',').unwrap();
    let err = session.import_table(&bad, day()).unwrap_err();

    assert!(matches!(err, ImportError::MissingColumns { .. }));
    assert_eq!(session.imported_records().len(), 2);
}

#[test]
fn test_import_malformed_price_keeps_previous_rows() {
    let mut session = Session::new();
    session.import_table(&sales_table(), day()).unwrap();

    let bad = read_table("Nombre,Precio\nWidget,diez\n".as_bytes(), b',').unwrap();
    assert!(matches!(
        session.import_table(&bad, day()),
        Err(ImportError::MalformedNumber { .. })
    ));
    assert_eq!(session.imported_records().len(), 2);
}

#[test]
fn test_clear_all_resets_totals_and_opening() {
    let mut session = Session::new();
    session.set_drawer_active(true);
    assert!(session.register_opening_balance(dec("200"), day()));
    session.import_table(&sales_table(), day()).unwrap();

    dispatch(&mut session, Command::ClearAll, day()).unwrap();

    let totals = session.totals();
    assert_eq!(totals.income, Decimal::ZERO);
    assert_eq!(totals.expense, Decimal::ZERO);
    assert_eq!(totals.net, Decimal::ZERO);
    assert!(session.register_opening_balance(dec("250"), day()));
}

#[test]
fn test_export_empty_session_fails() {
    let session = Session::new();
    assert!(session.export_report(day()).is_err());
}
