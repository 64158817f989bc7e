//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use fairshare_core::Monitor;

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::edit::{EditOutcome, EditSession};
use crate::event::{Event, EventReader};
use crate::notify::NotificationCenter;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    monitor: Monitor,
    /// Where CSV exports land.
    export_dir: PathBuf,
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// True once the first snapshot has arrived.
    connected: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// The single edit slot. Opening a new editor replaces whatever
    /// session was here, buffer included.
    edit: Option<EditSession>,
    /// Pending confirmation prompt, if any.
    confirm: Option<ConfirmAction>,
    /// Active toasts.
    notifications: NotificationCenter,
    /// Action sender — components and background tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(monitor: Monitor, export_dir: PathBuf) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            monitor,
            export_dir,
            active_screen: ScreenId::Overview,
            previous_screen: None,
            screens,
            running: true,
            connected: false,
            help_visible: false,
            edit: None,
            confirm: None,
            notifications: NotificationCenter::default(),
            action_tx,
            action_rx,
        }
    }

    /// Clone of the action sender for background tasks (data bridge).
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action.
    ///
    /// Routing priority: edit session, confirmation prompt, help
    /// overlay, global keys, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(session) = self.edit.as_mut() {
            match session.handle_key(key) {
                EditOutcome::Pending => return Ok(None),
                EditOutcome::Cancelled => {
                    self.edit = None;
                    return Ok(None);
                }
                EditOutcome::Submit(command) => {
                    self.edit = None;
                    return Ok(Some(Action::Dispatch(command)));
                }
                EditOutcome::Invalid(message) => {
                    // Session stays open with the buffer intact.
                    return Ok(Some(Action::notify_error(message)));
                }
            }
        }

        if self.confirm.is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            // The terminal autoresizes on the next draw.
            Action::Resize(..) => {}

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                        // Screens may react to becoming active (the
                        // router screen re-fetches gateway details).
                        if let Some(follow_up) = screen.update(action)? {
                            self.action_tx.send(follow_up)?;
                        }
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                self.notifications.prune(Instant::now());
            }

            // Data events go to every screen; each keeps the slices it
            // renders and ignores the rest.
            Action::StatusUpdated(_)
            | Action::ClientsUpdated(_)
            | Action::HistoryUpdated(_)
            | Action::RouterUpdated(_) => {
                self.connected = true;
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // Completions fan out like data events: the screen that
            // triggered the command may no longer be active.
            Action::CommandCompleted { .. } => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Dispatch(command) => {
                self.dispatch(command.clone());
            }

            Action::RequestRename { ip } => {
                let monitor = self.monitor.clone();
                let tx = self.action_tx.clone();
                let ip = ip.clone();
                tokio::spawn(async move {
                    let seed = monitor.device_label_or_ip(&ip).await;
                    let _ = tx.send(Action::OpenEdit {
                        kind: crate::edit::EditKind::Rename { ip },
                        seed,
                    });
                });
            }

            Action::OpenEdit { kind, seed } => {
                // Single slot: any open session is replaced outright.
                self.edit = Some(EditSession::new(kind.clone(), seed.clone()));
            }

            Action::ShowConfirm(confirm) => {
                self.confirm = Some(*confirm);
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.confirm.take() {
                    self.action_tx.send(Action::Dispatch(confirm.command()))?;
                }
            }

            Action::ConfirmNo => {
                self.confirm = None;
            }

            Action::Notify { message, level } => {
                self.notifications.push(message.clone(), *level, Instant::now());
            }

            Action::RefreshRouter => {
                let monitor = self.monitor.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = monitor.refresh_router_info().await {
                        error!(error = %e, "router refresh failed");
                        let _ = tx.send(Action::notify_error(format!("router refresh: {e}")));
                    }
                });
            }

            Action::StartExport { kind, window } => {
                self.start_export(*kind, *window);
            }

            // Render is handled in the main loop, not here
            Action::Render => {}
        }

        Ok(())
    }

    /// Fire a backend command on a background task. The outcome comes
    /// back through the action channel as a toast.
    fn dispatch(&self, command: fairshare_core::Command) {
        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        // The per-client router sync runs best-effort in the background;
        // its outcome is logged, never surfaced to the operator.
        let silent = matches!(
            command,
            fairshare_core::Command::SyncRouterPriority { .. }
        );
        tokio::spawn(async move {
            match monitor.execute(command.clone()).await {
                Ok(outcome) => {
                    let message = outcome.message(&command);
                    if silent {
                        info!(command = %command.describe(), %message, "command succeeded");
                        return;
                    }
                    let _ = tx.send(Action::notify_success(message.clone()));
                    let _ = tx.send(Action::CommandCompleted {
                        command,
                        message,
                        ok: true,
                    });
                }
                Err(e) => {
                    error!(command = %command.describe(), error = %e, "command failed");
                    if silent {
                        return;
                    }
                    let _ = tx.send(Action::notify_error(e.to_string()));
                    let _ = tx.send(Action::CommandCompleted {
                        command,
                        message: e.to_string(),
                        ok: false,
                    });
                }
            }
        });
    }

    fn start_export(&mut self, kind: fairshare_core::ExportKind, window: u32) {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let dest = self.export_dir.join(format!("fairshare-{kind}-{stamp}.csv"));

        self.notifications.push(
            format!("exporting {kind} report..."),
            crate::notify::ToastLevel::Info,
            Instant::now(),
        );

        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match monitor.export_csv(kind, window, &dest).await {
                Ok(bytes) => {
                    let _ = tx.send(Action::notify_success(format!(
                        "saved {} ({bytes} bytes)",
                        dest.display()
                    )));
                }
                Err(e) => {
                    error!(kind = %kind, error = %e, "export failed");
                    let _ = tx.send(Action::notify_error(format!("export failed: {e}")));
                }
            }
        });
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        self.render_toasts(frame, layout[0]);

        if let Some(session) = &self.edit {
            self.render_edit_popup(frame, area, session);
        }
        if let Some(confirm) = &self.confirm {
            Self::render_confirm_popup(frame, area, confirm);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Bottom tab bar showing all five screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Bottom status bar with connection state and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection = if self.connected {
            Span::styled("● live", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("○ waiting for data", Style::default().fg(theme::AMBER))
        };

        let hints = Span::styled(" │ ? help  1-5 screens  q quit", theme::key_hint());

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), connection, hints])),
            area,
        );
    }

    /// Toasts stack bottom-right over the content area, newest last.
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let toasts = self.notifications.visible();
        let mut y = area.bottom().saturating_sub(1);
        for toast in toasts.iter().rev() {
            if y <= area.y {
                break;
            }
            #[allow(clippy::cast_possible_truncation)]
            let width = (toast.message.chars().count() as u16 + 4).min(area.width);
            let toast_area = Rect::new(area.right().saturating_sub(width), y, width, 1);
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {}  ", toast.message),
                    Style::default().fg(theme::BG_DARK).bg(toast.level.color()),
                ))),
                toast_area,
            );
            y -= 1;
        }
    }

    /// Centered one-line input popup for the open edit session.
    fn render_edit_popup(&self, frame: &mut Frame, area: Rect, session: &EditSession) {
        let width = 46u16.min(area.width.saturating_sub(4));
        let popup = centered_rect(area, width, 3);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(session.title())
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        // Keep the cursor visible when the value outgrows the popup.
        let scroll = session
            .cursor()
            .saturating_sub(usize::from(inner.width.saturating_sub(1)));
        frame.render_widget(
            Paragraph::new(session.value())
                .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX))),
            inner,
        );
        #[allow(clippy::cast_possible_truncation)]
        frame.set_cursor_position(Position::new(
            inner.x + (session.cursor() - scroll) as u16,
            inner.y,
        ));
    }

    fn render_confirm_popup(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let prompt = confirm.to_string();
        #[allow(clippy::cast_possible_truncation)]
        let width = (prompt.chars().count() as u16 + 6)
            .max(30)
            .min(area.width.saturating_sub(4));
        let popup = centered_rect(area, width, 4);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::AMBER));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = vec![
            Line::from(Span::raw(format!(" {prompt}"))),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("confirm   ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let width = 58u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(4));
        let popup = centered_rect(area, width, height);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let hint = |k: &str, d: &str| {
            Line::from(vec![
                Span::styled(format!("  {k:<10}"), theme::key_hint_key()),
                Span::styled(d.to_owned(), theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Navigation",
                Style::default().fg(theme::ACCENT_BLUE),
            )),
            hint("1-5", "Jump to screen"),
            hint("Tab", "Next screen"),
            hint("j/k ↑/↓", "Move selection"),
            hint("g/G", "Top / bottom"),
            hint("Esc", "Back / close"),
            Line::from(""),
            Line::from(Span::styled(
                "  Actions",
                Style::default().fg(theme::ACCENT_BLUE),
            )),
            hint("b", "Set bandwidth cap (overview)"),
            hint("a", "Set alert threshold (overview)"),
            hint("e", "Set client priority (clients)"),
            hint("r", "Rename client (clients)"),
            hint("s", "Sync priority to router (clients)"),
            hint("A/C/Q", "Apply / clear limits, QoS (router)"),
            hint("Enter", "Download report (export)"),
            Line::from(""),
            Line::from(Span::styled(
                "                      Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
