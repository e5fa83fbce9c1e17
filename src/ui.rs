use anyhow::Result;
use chrono::NaiveDate;
use corte_caja::config::ResolvedConfig;
use corte_caja::error::{CommandError, ExportError, ImportError};
use corte_caja::{dispatch, format_money, max_amount, parse_amount, read_table_from_path, Command, MovementKind, Outcome, Record, Session};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rust_decimal::Decimal;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

const INVALID_MOVEMENT: &str = "Por favor, ingresa un concepto y un monto válido.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Register,
    Manual,
    Imported,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Register => Page::Manual,
            Page::Manual => Page::Imported,
            Page::Imported => Page::Register,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Register => Page::Imported,
            Page::Manual => Page::Register,
            Page::Imported => Page::Manual,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Register => "Registrar",
            Page::Manual => "Movimientos del formulario",
            Page::Imported => "Movimientos del CSV",
        }
    }
}

/// Movement form field with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Kind,
    Label,
    Amount,
    Date,
}

impl Field {
    fn next(&self) -> Self {
        match self {
            Field::Kind => Field::Label,
            Field::Label => Field::Amount,
            Field::Amount => Field::Date,
            Field::Date => Field::Kind,
        }
    }

    fn previous(&self) -> Self {
        match self {
            Field::Kind => Field::Date,
            Field::Label => Field::Kind,
            Field::Amount => Field::Label,
            Field::Date => Field::Amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ImportPath,
    ExportDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Opening,
    Form(Field),
    Prompt(Prompt),
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MovementForm {
    pub kind: MovementKind,
    pub label_index: usize,
    pub amount: String,
    pub date: String,
}

pub struct App {
    pub session: Session,
    pub config: ResolvedConfig,
    pub today: NaiveDate,
    pub current_page: Page,
    pub mode: Mode,
    pub opening_input: String,
    pub form: MovementForm,
    pub prompt_input: String,
    pub manual_state: TableState,
    pub imported_state: TableState,
    pub status: Option<Status>,
}

impl App {
    pub fn new(config: ResolvedConfig, today: NaiveDate) -> Self {
        let session = Session::with_opening_label(config.opening_label.clone());

        Self {
            session,
            config,
            today,
            current_page: Page::Register,
            mode: Mode::Normal,
            opening_input: String::new(),
            form: MovementForm {
                kind: MovementKind::Income,
                label_index: 0,
                amount: String::new(),
                date: today.format("%Y-%m-%d").to_string(),
            },
            prompt_input: String::new(),
            manual_state: TableState::default(),
            imported_state: TableState::default(),
            status: None,
        }
    }

    fn success(&mut self, message: impl Into<String>) {
        self.status = Some(Status { level: StatusLevel::Success, message: message.into() });
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.status = Some(Status { level: StatusLevel::Warning, message: message.into() });
    }

    fn error(&mut self, message: impl Into<String>) {
        self.status = Some(Status { level: StatusLevel::Error, message: message.into() });
    }

    fn run(&mut self, command: Command) -> Result<Outcome, CommandError> {
        dispatch(&mut self.session, command, self.today)
    }

    pub fn selected_label(&self) -> &str {
        self.config
            .labels
            .get(self.form.label_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    // ========================================================================
    // KEY HANDLING
    // ========================================================================

    /// Returns true when the user asked to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => return self.handle_normal(key),
            Mode::Opening => self.handle_opening(key),
            Mode::Form(field) => self.handle_form(field, key),
            Mode::Prompt(prompt) => self.handle_prompt(prompt, key),
            Mode::ConfirmClear => self.handle_confirm_clear(key),
        }
        false
    }

    fn handle_normal(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.current_page = self.current_page.next(),
            KeyCode::BackTab => self.current_page = self.current_page.previous(),
            KeyCode::Char('d') => {
                if let Ok(Outcome::DrawerActive(active)) = self.run(Command::ToggleDrawer) {
                    self.status = None;
                    if active && !self.session.drawer_initialized() {
                        self.current_page = Page::Register;
                        self.mode = Mode::Opening;
                    }
                }
            }
            KeyCode::Char('o') => {
                if !self.session.drawer_active() {
                    self.warning("Activa la caja con 'd' primero.");
                } else if self.session.drawer_initialized() {
                    self.warning("La caja inicial ya fue registrada.");
                } else {
                    self.current_page = Page::Register;
                    self.mode = Mode::Opening;
                }
            }
            KeyCode::Char('n') => {
                self.current_page = Page::Register;
                self.mode = Mode::Form(Field::Kind);
            }
            KeyCode::Char('i') => {
                self.prompt_input.clear();
                self.mode = Mode::Prompt(Prompt::ImportPath);
            }
            KeyCode::Char('e') => {
                self.prompt_input = self.today.format("%Y-%m-%d").to_string();
                self.mode = Mode::Prompt(Prompt::ExportDate);
            }
            KeyCode::Char('x') => self.mode = Mode::ConfirmClear,
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_row(),
            _ => {}
        }
        false
    }

    fn handle_opening(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_opening(),
            KeyCode::Backspace => {
                self.opening_input.pop();
            }
            KeyCode::Char('+') => self.step_opening(true),
            KeyCode::Char('-') => self.step_opening(false),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.opening_input.push(c),
            _ => {}
        }
    }

    fn step_opening(&mut self, up: bool) {
        let current = parse_amount(&self.opening_input).unwrap_or_default();
        let step = self.config.opening_step;
        let next = if up {
            current.checked_add(step)
        } else {
            current.checked_sub(step).map(|v| v.max(Decimal::ZERO))
        };

        match next {
            Some(next) if next <= max_amount() => self.opening_input = format_money(next),
            _ => self.warning("Monto inicial de caja inválido."),
        }
    }

    fn submit_opening(&mut self) {
        let amount = match parse_amount(&self.opening_input) {
            Some(amount) => amount,
            None => {
                self.warning("Monto inicial de caja inválido.");
                return;
            }
        };

        match self.run(Command::RegisterOpeningBalance(amount)) {
            Ok(Outcome::OpeningBalance(true)) => {
                self.success("Caja inicial registrada correctamente.");
                self.mode = Mode::Normal;
            }
            _ => self.warning("Monto inicial de caja inválido."),
        }
    }

    fn handle_form(&mut self, field: Field, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_movement(),
            KeyCode::Tab | KeyCode::Down => self.mode = Mode::Form(field.next()),
            KeyCode::BackTab | KeyCode::Up => self.mode = Mode::Form(field.previous()),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field == Field::Kind => {
                self.form.kind = self.form.kind.toggle();
            }
            KeyCode::Right | KeyCode::Char(' ') if field == Field::Label => self.cycle_label(true),
            KeyCode::Left if field == Field::Label => self.cycle_label(false),
            KeyCode::Backspace => {
                if let Some(input) = self.form_input(field) {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                let accepted = match field {
                    Field::Amount => c.is_ascii_digit() || c == '.',
                    Field::Date => c.is_ascii_digit() || c == '-',
                    _ => false,
                };
                if accepted {
                    if let Some(input) = self.form_input(field) {
                        input.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn form_input(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Amount => Some(&mut self.form.amount),
            Field::Date => Some(&mut self.form.date),
            _ => None,
        }
    }

    fn cycle_label(&mut self, forward: bool) {
        let len = self.config.labels.len();
        if len == 0 {
            return;
        }
        self.form.label_index = if forward {
            (self.form.label_index + 1) % len
        } else {
            (self.form.label_index + len - 1) % len
        };
    }

    fn submit_movement(&mut self) {
        let amount = parse_amount(&self.form.amount);
        let date = NaiveDate::parse_from_str(self.form.date.trim(), "%Y-%m-%d");

        let (amount, date) = match (amount, date) {
            (Some(amount), Ok(date)) => (amount, date),
            (None, _) => {
                self.warning(INVALID_MOVEMENT);
                return;
            }
            (_, Err(_)) => {
                self.warning("Fecha inválida, usa AAAA-MM-DD.");
                return;
            }
        };

        let command = Command::RegisterMovement {
            kind: self.form.kind,
            label: self.selected_label().to_string(),
            amount,
            date,
        };

        match self.run(command) {
            Ok(_) => {
                self.success("Movimiento agregado correctamente.");
                self.form.amount.clear();
                self.mode = Mode::Form(Field::Amount);
            }
            Err(e) => {
                warn!("Movement rejected: {}", e);
                self.warning(INVALID_MOVEMENT);
            }
        }
    }

    fn handle_prompt(&mut self, prompt: Prompt, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                self.prompt_input.pop();
            }
            KeyCode::Char(c) => self.prompt_input.push(c),
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                match prompt {
                    Prompt::ImportPath => self.import_csv(),
                    Prompt::ExportDate => self.export_pdf(),
                }
            }
            _ => {}
        }
    }

    fn import_csv(&mut self) {
        let path = PathBuf::from(self.prompt_input.trim());
        let result = read_table_from_path(&path, self.config.delimiter)
            .map_err(CommandError::from)
            .and_then(|table| self.run(Command::ImportTable(table)));

        match result {
            Ok(Outcome::Imported(summary)) => {
                self.success(format!("{} ingresos cargados desde el CSV.", summary.rows_read));
                self.imported_state.select(if summary.imported > 0 { Some(0) } else { None });
            }
            Ok(_) => {}
            Err(CommandError::Import(ImportError::MissingColumns { .. })) => {
                self.error("El archivo debe tener encabezados: 'Nombre' y 'Precio'");
            }
            Err(e) => self.error(format!("Error al leer el archivo: {}", e)),
        }
    }

    fn export_pdf(&mut self) {
        let date = match NaiveDate::parse_from_str(self.prompt_input.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                self.warning("Fecha inválida, usa AAAA-MM-DD.");
                return;
            }
        };

        match self.session.write_report(&self.config.output_dir, date) {
            Ok(path) => {
                info!(path = %path.display(), "Report exported from TUI");
                self.success(format!("PDF guardado en {}", path.display()));
            }
            Err(ExportError::NothingToExport) => self.warning("No hay movimientos para exportar."),
            Err(e) => self.error(format!("Error al exportar: {}", e)),
        }
    }

    fn handle_confirm_clear(&mut self, key: KeyEvent) {
        self.mode = Mode::Normal;
        if key.code == KeyCode::Char('y') || key.code == KeyCode::Char('s') {
            if self.run(Command::ClearAll).is_ok() {
                self.opening_input.clear();
                self.manual_state.select(None);
                self.imported_state.select(None);
                self.success("Todos los movimientos han sido eliminados.");
            }
        } else {
            self.status = None;
        }
    }

    // ========================================================================
    // TABLE NAVIGATION
    // ========================================================================

    fn active_table(&mut self) -> Option<(&mut TableState, usize)> {
        match self.current_page {
            Page::Manual => Some((&mut self.manual_state, self.session.manual_records().len())),
            Page::Imported => Some((&mut self.imported_state, self.session.imported_records().len())),
            Page::Register => None,
        }
    }

    pub fn next_row(&mut self) {
        if let Some((state, len)) = self.active_table() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.select(Some(i));
        }
    }

    pub fn previous_row(&mut self) {
        if let Some((state, len)) = self.active_table() {
            if len == 0 {
                return;
            }
            let i = match state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.select(Some(i));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Page content
            Constraint::Percentage(30), // Totals sidebar
        ])
        .split(chunks[1]);

    match app.current_page {
        Page::Register => render_register(f, body[0], app),
        Page::Manual => render_records(f, body[0], app, Page::Manual),
        Page::Imported => render_records(f, body[0], app, Page::Imported),
    }
    render_totals(f, body[1], app);

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Register, Page::Manual, Page::Imported];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("✎ {}", app.session.manual_records().len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("⇪ {}", app.session.imported_records().len()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 💰 Sistema de Corte de Caja "),
    );

    f.render_widget(header, area);
}

fn field_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_register(f: &mut Frame, area: Rect, app: &App) {
    let label_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![Line::from("")];

    // Drawer section
    let checkbox = if app.session.drawer_active() { "[x]" } else { "[ ]" };
    content.push(Line::from(vec![
        Span::styled(format!("  {} Caja", checkbox), label_style),
        Span::styled("  (d)", Style::default().fg(Color::DarkGray)),
    ]));

    if app.session.drawer_active() {
        if app.session.drawer_initialized() {
            content.push(Line::from(Span::styled(
                "      Caja inicial registrada",
                Style::default().fg(Color::Green),
            )));
        } else {
            content.push(Line::from(vec![
                Span::raw("      Monto inicial de caja: $"),
                Span::styled(
                    format!("{:<12}", app.opening_input),
                    field_style(app.mode == Mode::Opening),
                ),
                Span::styled(
                    format!("  (o, +/- {})", format_money(app.config.opening_step)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from("  ─────────────────────────────────────"));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled(
            "  REGISTRAR MOVIMIENTO",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::styled("  (n)", Style::default().fg(Color::DarkGray)),
    ]));
    content.push(Line::from(""));

    let focused = |field: Field| app.mode == Mode::Form(field);
    let kind_color = match app.form.kind {
        MovementKind::Income => Color::Green,
        MovementKind::Expense => Color::Red,
    };

    content.push(Line::from(vec![
        Span::styled("  Tipo:      ", label_style),
        Span::styled(
            format!("< {} >", app.form.kind),
            if focused(Field::Kind) { field_style(true) } else { Style::default().fg(kind_color) },
        ),
    ]));
    content.push(Line::from(vec![
        Span::styled("  Proveedor: ", label_style),
        Span::styled(format!("< {} >", app.selected_label()), field_style(focused(Field::Label))),
    ]));
    content.push(Line::from(vec![
        Span::styled("  Monto:     ", label_style),
        Span::raw("$"),
        Span::styled(format!("{:<12}", app.form.amount), field_style(focused(Field::Amount))),
    ]));
    content.push(Line::from(vec![
        Span::styled("  Fecha:     ", label_style),
        Span::styled(format!("{:<12}", app.form.date), field_style(focused(Field::Date))),
    ]));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Enter agregar · Tab campo · ←/→ cambiar · Esc salir",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Registrar "),
    );

    f.render_widget(paragraph, area);
}

fn render_records(f: &mut Frame, area: Rect, app: &mut App, page: Page) {
    let header_cells = ["Fecha", "Tipo", "Concepto", "Monto"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let (records, state, empty_message): (&[Record], &mut TableState, &str) = match page {
        Page::Imported => (
            app.session.imported_records(),
            &mut app.imported_state,
            "No se han cargado movimientos desde un archivo CSV.",
        ),
        _ => (
            app.session.manual_records(),
            &mut app.manual_state,
            "No hay movimientos registrados desde el formulario.",
        ),
    };

    if records.is_empty() {
        let empty = Paragraph::new(format!("\n  {}", empty_message)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", page.title())),
        );
        f.render_widget(empty, area);
        return;
    }

    let rows = records.iter().map(|record| {
        let color = if record.is_income() { Color::Green } else { Color::Red };

        let cells = vec![
            Cell::from(record.date().format("%Y-%m-%d").to_string()),
            Cell::from(record.kind().name()).style(Style::default().fg(color)),
            Cell::from(truncate(record.label(), 30)),
            Cell::from(format!("${}", format_money(record.amount()))).style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(32),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", page.title())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let totals = app.session.totals();
    let net_color = if totals.net.is_sign_negative() { Color::Red } else { Color::Cyan };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  💵 Ingresos: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("${}", format_money(totals.income)), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  💸 Egresos:  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("${}", format_money(totals.expense)), Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  🧾 Total Final: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("${}", format_money(totals.net)), Style::default().fg(net_color)),
        ]),
        Line::from(""),
        Line::from("  ──────────────────────"),
        Line::from(""),
        Line::from(Span::styled("  i  Cargar CSV", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("  e  Exportar PDF", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("  x  Limpiar todo", Style::default().fg(Color::DarkGray))),
    ];

    let sidebar = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" 📊 Totales del Corte "),
    );

    f.render_widget(sidebar, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.mode {
        Mode::Prompt(prompt) => {
            let label = match prompt {
                Prompt::ImportPath => " Archivo CSV: ",
                Prompt::ExportDate => " Fecha del corte (AAAA-MM-DD): ",
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{}█", app.prompt_input), Style::default().fg(Color::White)),
            ])
        }
        Mode::ConfirmClear => Line::from(Span::styled(
            " ¿Limpiar todos los movimientos? (y/n)",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        _ => match &app.status {
            Some(status) => {
                let color = match status.level {
                    StatusLevel::Success => Color::Green,
                    StatusLevel::Warning => Color::Yellow,
                    StatusLevel::Error => Color::Red,
                };
                Line::from(Span::styled(format!(" {}", status.message), Style::default().fg(color)))
            }
            None => Line::from(vec![
                Span::styled(" Tab", Style::default().fg(Color::Yellow)),
                Span::raw(" Página | "),
                Span::styled("d", Style::default().fg(Color::Yellow)),
                Span::raw(" Caja | "),
                Span::styled("n", Style::default().fg(Color::Yellow)),
                Span::raw(" Movimiento | "),
                Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
                Span::raw(" Nav | "),
                Span::styled("q", Style::default().fg(Color::Red)),
                Span::raw(" Salir"),
            ]),
        },
    };

    let status_bar = Paragraph::new(vec![line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
