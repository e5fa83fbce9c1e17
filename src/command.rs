// 🎛️ Command dispatch
// Everything the user can do to a session becomes a `Command`.
// The UI only builds commands; `dispatch` applies them.
//
//   Session + Command  →  dispatch()  →  Outcome | CommandError
//
// Export reads the session without changing it, so it is not a command.

use crate::error::CommandError;
use crate::import::{ImportSummary, RawTable};
use crate::record::{MovementKind, Record};
use crate::session::Session;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetDrawerActive(bool),
    ToggleDrawer,
    RegisterOpeningBalance(Decimal),
    RegisterMovement {
        kind: MovementKind,
        label: String,
        amount: Decimal,
        date: NaiveDate,
    },
    ImportTable(RawTable),
    ClearAll,
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetDrawerActive(_) => "set_drawer_active",
            Command::ToggleDrawer => "toggle_drawer",
            Command::RegisterOpeningBalance(_) => "register_opening_balance",
            Command::RegisterMovement { .. } => "register_movement",
            Command::ImportTable(_) => "import_table",
            Command::ClearAll => "clear_all",
        }
    }
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    DrawerActive(bool),
    /// `false` when the opening balance guard ignored the call
    OpeningBalance(bool),
    MovementRegistered(Record),
    Imported(ImportSummary),
    Cleared,
}

/// Apply one command. `today` dates the opening balance and imported rows.
pub fn dispatch(
    session: &mut Session,
    command: Command,
    today: NaiveDate,
) -> Result<Outcome, CommandError> {
    debug!(command = command.name(), "Dispatching");

    let outcome = match command {
        Command::SetDrawerActive(active) => {
            session.set_drawer_active(active);
            Outcome::DrawerActive(active)
        }
        Command::ToggleDrawer => Outcome::DrawerActive(session.toggle_drawer()),
        Command::RegisterOpeningBalance(amount) => {
            Outcome::OpeningBalance(session.register_opening_balance(amount, today))
        }
        Command::RegisterMovement {
            kind,
            label,
            amount,
            date,
        } => {
            let record = session.register_movement(kind, &label, amount, date)?;
            Outcome::MovementRegistered(record.clone())
        }
        Command::ImportTable(table) => Outcome::Imported(session.import_table(&table, today)?),
        Command::ClearAll => {
            session.clear_all();
            Outcome::Cleared
        }
    };

    Ok(outcome)
}
