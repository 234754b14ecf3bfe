use std::{
    sync::mpsc::{Receiver, Sender, channel},
    time::{Duration, Instant},
};

use chrono::Local;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ledger::{BillStore, Ledger, LedgerError};
use ratatui::layout::Rect;

use crate::{
    client::{ClientError, SheetClient},
    config::AppConfig,
    error::{AppError, Result},
    keyboard::{BoundField, Key, VirtualKeyboard},
    ui::{self, keymap::AppAction},
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Name,
    Amount,
    Mode,
}

/// The entry form's payment selector. The stored mode stays free text;
/// this only constrains what the form produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayMode {
    Cash,
    Online,
}

impl PayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }

    fn toggle(self) -> Self {
        match self {
            Self::Cash => Self::Online,
            Self::Online => Self::Cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy)]
enum ConfirmAction {
    DeleteBill(usize),
    ClearAll,
}

/// A pending y/n gate in front of a destructive mutation.
#[derive(Debug)]
pub struct ConfirmState {
    pub message: String,
    action: ConfirmAction,
}

#[derive(Debug)]
pub struct AppState {
    pub focus: Focus,
    pub mode: PayMode,
    pub keyboard: VirtualKeyboard,
    pub selected: usize,
    pub confirm: Option<ConfirmState>,
    pub toast: Option<ToastState>,
    pub clock: String,
    pub syncing: bool,
}

pub struct App {
    config: AppConfig,
    client: SheetClient,
    ledger: Ledger,
    pub state: AppState,
    should_quit: bool,
    viewport: Rect,
    sync_tx: Sender<std::result::Result<(), ClientError>>,
    sync_rx: Receiver<std::result::Result<(), ClientError>>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = SheetClient::new(&config.sheet_url)?;
        let ledger = Ledger::load(BillStore::new(&config.data_path))?;
        let (sync_tx, sync_rx) = channel();

        let state = AppState {
            focus: Focus::Table,
            mode: PayMode::Cash,
            keyboard: VirtualKeyboard::default(),
            selected: 0,
            confirm: None,
            toast: None,
            clock: Local::now().format("%I:%M:%S %p").to_string(),
            syncing: false,
        };

        Ok(Self {
            config,
            client,
            ledger,
            state,
            should_quit: false,
            viewport: Rect::default(),
            sync_tx,
            sync_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.state.clock = Local::now().format("%I:%M:%S %p").to_string();
            self.drain_sync_results();
            self.expire_toast();

            let size = terminal.size()?;
            self.viewport = Rect::new(0, 0, size.width, size.height);

            let summary = self.ledger.summary();
            terminal
                .draw(|frame| ui::render(frame, self.ledger.bills(), &summary, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);

        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.confirm.is_some() {
            self.handle_confirm_key(action);
            return;
        }

        match self.state.focus {
            Focus::Name => self.handle_entry_key(BoundField::Name, action),
            Focus::Amount => self.handle_entry_key(BoundField::Amount, action),
            Focus::Mode => self.handle_mode_key(action),
            Focus::Table => self.handle_table_key(action),
        }
    }

    fn handle_confirm_key(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Input('y' | 'Y') => self.confirm_accept(),
            AppAction::Cancel | AppAction::Input('n' | 'N') => {
                self.state.confirm = None;
            }
            _ => {}
        }
    }

    fn confirm_accept(&mut self) {
        let Some(confirm) = self.state.confirm.take() else {
            return;
        };

        let (result, notice) = match confirm.action {
            ConfirmAction::DeleteBill(index) => (self.ledger.remove(index), "Bill deleted"),
            ConfirmAction::ClearAll => (self.ledger.clear(), "All bills cleared"),
        };
        self.state.selected = self
            .state
            .selected
            .min(self.ledger.len().saturating_sub(1));

        match result {
            Ok(()) => self.toast(ToastLevel::Info, notice),
            Err(err) => {
                tracing::error!("failed to persist ledger: {err}");
                self.toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    fn handle_entry_key(&mut self, field: BoundField, action: AppAction) {
        match action {
            AppAction::Cancel => {
                self.state.keyboard.close();
                self.state.focus = Focus::Table;
            }
            AppAction::NextField => self.advance_focus(),
            AppAction::Submit => self.submit_entry(),
            AppAction::Backspace => self.state.keyboard.tap(Key::Backspace),
            AppAction::Left => self.state.keyboard.buffer_mut(field).move_left(),
            AppAction::Right => self.state.keyboard.buffer_mut(field).move_right(),
            AppAction::Input(ch) => {
                // Physical keys mirror the key caps: letters commit uppercase.
                let ch = if ch.is_ascii_alphabetic() {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                };
                self.state.keyboard.tap(Key::Char(ch));
            }
            _ => {}
        }
    }

    fn handle_mode_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => {
                self.state.keyboard.close();
                self.state.focus = Focus::Table;
            }
            AppAction::NextField => self.advance_focus(),
            AppAction::Submit => self.submit_entry(),
            AppAction::Left | AppAction::Right | AppAction::Input('m' | 'M' | ' ') => {
                self.state.mode = self.state.mode.toggle();
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => self.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.select_next(),
            AppAction::NextField | AppAction::Input('a') => {
                self.state.focus = Focus::Name;
                self.state.keyboard.focus(BoundField::Name);
            }
            AppAction::Input('d') => {
                if !self.ledger.is_empty() {
                    self.state.confirm = Some(ConfirmState {
                        message: "Delete this bill?".to_string(),
                        action: ConfirmAction::DeleteBill(self.state.selected),
                    });
                }
            }
            AppAction::Input('c') => {
                if !self.ledger.is_empty() {
                    self.state.confirm = Some(ConfirmState {
                        message: "Clear all bills?".to_string(),
                        action: ConfirmAction::ClearAll,
                    });
                }
            }
            AppAction::Input('s') => self.start_sync(),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.state.keyboard.is_open() {
            return;
        }

        let overlay = ui::components::keyboard::overlay_area(self.viewport);
        let at = ui::components::keyboard::hit_test(overlay, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((row, col)) = at {
                    self.state.keyboard.press(row, col);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.state.keyboard.release(at);
                // The Close cap also drops form focus.
                if !self.state.keyboard.is_open()
                    && matches!(self.state.focus, Focus::Name | Focus::Amount)
                {
                    self.state.focus = Focus::Table;
                }
            }
            _ => {}
        }
    }

    fn advance_focus(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Table => Focus::Name,
            Focus::Name => Focus::Amount,
            Focus::Amount => Focus::Mode,
            Focus::Mode => Focus::Table,
        };
        match self.state.focus {
            Focus::Name => self.state.keyboard.focus(BoundField::Name),
            Focus::Amount => self.state.keyboard.focus(BoundField::Amount),
            _ => {}
        }
    }

    fn submit_entry(&mut self) {
        let name = self
            .state
            .keyboard
            .buffer(BoundField::Name)
            .value()
            .to_string();
        let amount = self
            .state
            .keyboard
            .buffer(BoundField::Amount)
            .value()
            .to_string();

        match self.ledger.add(&name, &amount, self.state.mode.as_str()) {
            Ok(()) => {
                self.state.keyboard.take_entry();
                self.state.focus = Focus::Name;
                self.state.keyboard.focus(BoundField::Name);
                self.toast(ToastLevel::Success, "Bill added");
            }
            Err(err) => {
                if matches!(err, LedgerError::Io(_) | LedgerError::Json(_)) {
                    tracing::error!("failed to persist bill: {err}");
                }
                // Validation failures leave the form untouched for editing.
                self.toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    fn start_sync(&mut self) {
        if self.ledger.is_empty() {
            self.toast(ToastLevel::Info, "No bills to sync");
            return;
        }

        let client = self.client.clone();
        let bills = self.ledger.bills().to_vec();
        let results = self.sync_tx.clone();
        self.state.syncing = true;
        self.toast(ToastLevel::Info, "Syncing…");

        // The loop keeps serving input while the request is in flight; a
        // second sync may overlap and resend the full ledger.
        tokio::spawn(async move {
            let outcome = client.push_bills(&bills).await;
            let _ = results.send(outcome);
        });
    }

    fn drain_sync_results(&mut self) {
        while let Ok(outcome) = self.sync_rx.try_recv() {
            self.state.syncing = false;
            match outcome {
                Ok(()) => self.toast(ToastLevel::Success, "Synced to sheet"),
                Err(err) => {
                    tracing::error!("sync failed: {err}");
                    self.toast(ToastLevel::Error, "Sync failed");
                }
            }
        }
    }

    fn select_next(&mut self) {
        let len = self.ledger.len();
        if len == 0 {
            return;
        }
        self.state.selected = (self.state.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        if self.ledger.is_empty() {
            return;
        }
        self.state.selected = self.state.selected.saturating_sub(1);
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self) {
        let expired = self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| Instant::now() >= toast.expires_at);
        if expired {
            self.state.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_app(name: &str) -> App {
        let root =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_khata");
        std::fs::create_dir_all(&root).unwrap();
        let data_path = root.join(format!("{name}_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&data_path);

        let config = AppConfig {
            sheet_url: "http://127.0.0.1:9/sync".to_string(),
            data_path: data_path.display().to_string(),
            log_path: root.join("khata_test.log").display().to_string(),
            log_level: "info".to_string(),
        };
        App::new(config).unwrap()
    }

    fn type_into(app: &mut App, field: BoundField, text: &str) {
        app.state.keyboard.focus(field);
        for ch in text.chars() {
            app.state.keyboard.tap(Key::Char(ch));
        }
    }

    #[test]
    fn empty_ledger_sync_reports_without_spawning() {
        let mut app = scratch_app("empty_sync");

        app.start_sync();

        assert!(!app.state.syncing);
        let toast = app.state.toast.expect("notice expected");
        assert_eq!(toast.message, "No bills to sync");
        assert_eq!(toast.level, ToastLevel::Info);
    }

    #[test]
    fn typed_entry_is_added_and_form_cleared() {
        let mut app = scratch_app("typed_entry");
        type_into(&mut app, BoundField::Name, "TEA");
        type_into(&mut app, BoundField::Amount, "15");

        app.submit_entry();

        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.ledger.bills()[0].name, "TEA");
        assert_eq!(app.state.keyboard.buffer(BoundField::Name).value(), "");
        assert_eq!(app.state.keyboard.buffer(BoundField::Amount).value(), "");
        assert_eq!(app.state.focus, Focus::Name);
    }

    #[test]
    fn invalid_entry_is_rejected_with_no_state_change() {
        let mut app = scratch_app("invalid_entry");
        type_into(&mut app, BoundField::Name, "TEA");
        type_into(&mut app, BoundField::Amount, "0");

        app.submit_entry();

        assert!(app.ledger.is_empty());
        // The rejected input stays put for editing.
        assert_eq!(app.state.keyboard.buffer(BoundField::Amount).value(), "0");
        let toast = app.state.toast.expect("warning expected");
        assert_eq!(toast.level, ToastLevel::Error);
    }

    #[test]
    fn delete_is_gated_behind_confirmation() {
        let mut app = scratch_app("delete_confirm");
        app.ledger.add("Tea", "15", "cash").unwrap();

        app.handle_table_key(AppAction::Input('d'));
        assert!(app.state.confirm.is_some());

        // Declining keeps the bill.
        app.handle_confirm_key(AppAction::Input('n'));
        assert!(app.state.confirm.is_none());
        assert_eq!(app.ledger.len(), 1);

        // Accepting removes it.
        app.handle_table_key(AppAction::Input('d'));
        app.handle_confirm_key(AppAction::Input('y'));
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn clear_all_is_gated_behind_confirmation() {
        let mut app = scratch_app("clear_confirm");
        app.ledger.add("Tea", "15", "cash").unwrap();
        app.ledger.add("Coffee", "25.5", "online").unwrap();

        app.handle_table_key(AppAction::Input('c'));
        app.handle_confirm_key(AppAction::Submit);

        assert!(app.ledger.is_empty());
    }

    #[test]
    fn physical_letters_commit_uppercase() {
        let mut app = scratch_app("uppercase");
        app.state.focus = Focus::Name;
        app.state.keyboard.focus(BoundField::Name);

        app.handle_entry_key(BoundField::Name, AppAction::Input('h'));
        app.handle_entry_key(BoundField::Name, AppAction::Input('i'));

        assert_eq!(app.state.keyboard.buffer(BoundField::Name).value(), "HI");
    }
}
