//! Ratatui-based terminal UI.
//!
//! A sidebar form collects the shipment details; the main panel shows the
//! computed cost breakdown and a preview of the agreement, and the footer
//! carries key help plus the latest notice.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::agreement::agreement_lines;
use crate::cli::GlobalArgs;
use crate::config::Settings;
use crate::error::AppError;
use crate::report::{fmt_mileage, fmt_money, fmt_percent, format_breakdown};
use crate::shell::{FormField, NoticeKind, Shell};

/// Sidebar rows: the four form fields, then the two actions.
const GENERATE_ROW: usize = FormField::ALL.len();
const DOWNLOAD_ROW: usize = GENERATE_ROW + 1;
const ROW_COUNT: usize = DOWNLOAD_ROW + 1;

/// Start the TUI.
pub fn run(settings: &Settings, global: &GlobalArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(settings, &global.out_dir);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<'a> {
    shell: Shell<'a>,
    out_dir: PathBuf,
    selected: usize,
    /// Text being typed into the selected field, if editing.
    editing: Option<String>,
    last_download: Option<(PathBuf, DateTime<Local>)>,
}

impl<'a> App<'a> {
    fn new(settings: &'a Settings, out_dir: &Path) -> Self {
        Self {
            shell: Shell::new(settings),
            out_dir: out_dir.to_path_buf(),
            selected: 0,
            editing: None,
            last_download: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let ready = event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?;
            if !ready {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::BackTab => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected + 1 < ROW_COUNT {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => match self.selected {
                GENERATE_ROW => self.generate(),
                DOWNLOAD_ROW => self.download(),
                idx => {
                    let field = FormField::ALL[idx];
                    self.editing = Some(self.shell.form.edit_seed(field));
                }
            },
            KeyCode::Char('g') => self.generate(),
            KeyCode::Char('s') => self.download(),
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(field) = self.selected_field() else {
            self.editing = None;
            return;
        };
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.editing = None;
            }
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                self.editing = None;
                // Errors are posted as a notice by the shell.
                let _ = self.shell.set_field(field, &text);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if field.accepts(c) {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn selected_field(&self) -> Option<FormField> {
        FormField::ALL.get(self.selected).copied()
    }

    fn generate(&mut self) {
        if self.shell.submit().is_ok() {
            self.selected = DOWNLOAD_ROW;
        }
    }

    fn download(&mut self) {
        if let Ok(Some(path)) = self.shell.download(&self.out_dir) {
            self.last_download = Some((path, Local::now()));
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings = self.shell.settings();
        let lines = vec![
            Line::from(Span::styled(
                "Logistics Service Agreement Generator",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} | base rate {}/mile | surcharge {} up to {} mi, {} above",
                    settings.company_name,
                    fmt_money(settings.base_rate),
                    fmt_percent(settings.low_surcharge_rate),
                    fmt_mileage(settings.surcharge_threshold),
                    fmt_percent(settings.high_surcharge_rate),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(ROW_COUNT);
        for (idx, field) in FormField::ALL.iter().enumerate() {
            let value = match &self.editing {
                Some(buffer) if idx == self.selected => format!("{buffer}_"),
                _ => self.shell.form.display(*field),
            };
            items.push(ListItem::new(format!("{}: {value}", field.label())));
        }
        items.push(ListItem::new("[ Generate Agreement ]"));

        let download_style = if self.shell.computed().is_some() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        items.push(ListItem::new("[ Download Agreement PDF ]").style(download_style));

        let list = List::new(items)
            .block(Block::default().title("Input Shipment Details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Agreement").borders(Borders::ALL);

        let Some(run) = self.shell.computed() else {
            let mut lines = vec![Line::from(Span::styled(
                "Fill in the details and choose Generate Agreement.",
                Style::default().fg(Color::Yellow),
            ))];
            if let Some((path, at)) = &self.last_download {
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(
                    format!("Last download: {} at {}", path.display(), at.format("%H:%M:%S")),
                    Style::default().fg(Color::Gray),
                )));
            }
            frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
            return;
        };

        let settings = self.shell.settings();
        let mut lines: Vec<Line> = Vec::new();
        for row in format_breakdown(&run.cost, settings).lines() {
            lines.push(Line::raw(row.to_string()));
        }
        lines.push(Line::raw(""));

        let text = agreement_lines(
            run.request.driver_name(),
            run.request.plate(),
            run.request.mileage(),
            run.cost.total,
            settings,
        );
        lines.push(Line::from(Span::styled(
            text.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(""));
        for line in text.lines {
            lines.push(Line::raw(line));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.editing.is_some() {
            "type to edit  Enter apply  Esc cancel"
        } else {
            "↑/↓ select  Enter edit/activate  g generate  s download  q quit"
        };

        let mut spans = vec![Span::styled(help, Style::default().fg(Color::Gray))];
        if let Some(notice) = self.shell.notice() {
            let color = match notice.kind {
                NoticeKind::Info => Color::Yellow,
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(notice.message.as_str(), Style::default().fg(color)));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            company_name: "Acme Freight".to_string(),
            base_rate: 2.0,
            surcharge_threshold: 100.0,
            high_surcharge_rate: 0.10,
            low_surcharge_rate: 0.05,
        }
    }

    fn type_into(app: &mut App<'_>, row: usize, text: &str) {
        app.selected = row;
        app.handle_key(KeyCode::Enter);
        // Clear the seeded value first.
        for _ in 0..32 {
            app.handle_key(KeyCode::Backspace);
        }
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn keys_drive_submit_and_download() {
        let s = settings();
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&s, dir.path());

        type_into(&mut app, 0, "Dana");
        type_into(&mut app, 2, "50");
        assert_eq!(app.shell.form.driver_name, "Dana");
        assert_eq!(app.shell.form.mileage.value(), 50.0);

        app.selected = GENERATE_ROW;
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(app.shell.computed().is_some());
        assert_eq!(app.selected, DOWNLOAD_ROW);

        app.handle_key(KeyCode::Enter);
        assert!(app.shell.computed().is_none());
        assert!(dir.path().join("service_agreement.pdf").exists());
        assert!(app.last_download.is_some());
    }

    #[test]
    fn numeric_fields_ignore_letters() {
        let s = settings();
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&s, dir.path());
        type_into(&mut app, 3, "2x.5");
        assert_eq!(app.shell.form.rate.value(), 2.5);
    }

    #[test]
    fn esc_cancels_edit_and_q_quits() {
        let s = settings();
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&s, dir.path());

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('Z'));
        app.handle_key(KeyCode::Esc);
        assert!(app.editing.is_none());
        assert_eq!(app.shell.form.driver_name, "");
        // While editing, 'q' is text, not quit.
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn draws_without_panicking() {
        let s = settings();
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&s, dir.path());
        type_into(&mut app, 0, "Dana");
        type_into(&mut app, 2, "150");
        app.generate();

        let backend = ratatui::backend::TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Total Agreed Cost: $330.00"));
    }
}
