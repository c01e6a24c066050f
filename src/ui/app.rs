use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{create_employee, delete_employee, fetch_employees, update_employee};
use crate::models::Employee;

use super::forms::{EmployeeChange, FlowStep, PromptFlow};
use super::helpers::centered_rect;

/// Title shown above the employee table.
const WINDOW_TITLE: &str = "Employee Manager";
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the commands pane listing the three actions.
const COMMANDS_HEIGHT: u16 = 5;

/// Fine-grained interaction modes. The window is either idle or blocked on a
/// modal prompt; a prompt owns all key input until it submits or cancels.
enum Mode {
    Normal,
    Prompting(PromptFlow),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the store connection
/// for the whole process lifetime; `into_store` hands it back at shutdown so
/// `main` can close it explicitly.
pub struct App {
    conn: Connection,
    employees: Vec<Employee>,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, employees: Vec<Employee>) -> Self {
        Self {
            conn,
            employees,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Surrender the connection once the event loop has finished.
    pub fn into_store(self) -> Connection {
        self.conn
    }

    /// Dispatch one key press. Returns `true` when the application should
    /// exit. Storage faults bubble out of here and terminate the event loop.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Prompting(flow) => self.handle_prompt(code, flow)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::Prompting(PromptFlow::add()));
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                if let Some(employee) = self.current_employee().cloned() {
                    self.clear_status();
                    return Ok(Mode::Prompting(PromptFlow::update(&employee)));
                } else {
                    self.set_status("No employee selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.delete_selected()?;
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Drive the modal prompt. Esc cancels the whole command silently, which
    /// the flow treats exactly like submitting a blank value.
    fn handle_prompt(&mut self, code: KeyCode, mut flow: PromptFlow) -> Result<Mode> {
        match code {
            KeyCode::Esc => Ok(Mode::Normal),
            KeyCode::Enter => match flow.submit() {
                FlowStep::Continue(next) => Ok(Mode::Prompting(next)),
                FlowStep::Abort => Ok(Mode::Normal),
                FlowStep::Commit(change) => {
                    self.apply_change(change)?;
                    Ok(Mode::Normal)
                }
            },
            KeyCode::Backspace => {
                flow.input.backspace();
                Ok(Mode::Prompting(flow))
            }
            KeyCode::Char(ch) => {
                flow.input.push_char(ch);
                Ok(Mode::Prompting(flow))
            }
            _ => Ok(Mode::Prompting(flow)),
        }
    }

    /// Persist a completed prompt sequence, then fully refresh the view.
    fn apply_change(&mut self, change: EmployeeChange) -> Result<()> {
        match change {
            EmployeeChange::Create { name, position } => {
                let employee = create_employee(&self.conn, &name, &position)?;
                self.refresh_employees()?;
                self.select_id(employee.id);
                self.set_status(format!("Added {employee}."), StatusKind::Info);
            }
            EmployeeChange::Update { id, name, position } => {
                update_employee(&self.conn, id, &name, &position)?;
                self.refresh_employees()?;
                self.set_status("Employee updated.", StatusKind::Info);
            }
        }
        Ok(())
    }

    /// Delete the selected record. The view update is local: the committed
    /// row is removed from the in-memory list without re-reading the store.
    fn delete_selected(&mut self) -> Result<()> {
        let Some(employee) = self.current_employee().cloned() else {
            self.set_status("No employee selected.", StatusKind::Error);
            return Ok(());
        };

        delete_employee(&self.conn, employee.id)?;
        self.employees.remove(self.selected);
        self.ensure_in_bounds();
        self.set_status(format!("Deleted {employee}."), StatusKind::Info);
        Ok(())
    }

    /// Full refresh: discard the displayed rows and rebuild them from the
    /// store's current contents, keeping the selection index in bounds.
    fn refresh_employees(&mut self) -> Result<()> {
        self.employees = fetch_employees(&self.conn)?;
        self.ensure_in_bounds();
        Ok(())
    }

    fn current_employee(&self) -> Option<&Employee> {
        self.employees.get(self.selected)
    }

    /// Move the highlight onto the record with the given id, if present.
    fn select_id(&mut self, id: i64) {
        if let Some(index) = self.employees.iter().position(|e| e.id == id) {
            self.selected = index;
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.employees.is_empty() {
            return;
        }
        let len = self.employees.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    fn ensure_in_bounds(&mut self) {
        if self.employees.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.employees.len() {
            self.selected = self.employees.len() - 1;
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(COMMANDS_HEIGHT)])
            .split(content_area);
        self.draw_employee_table(frame, chunks[0]);
        self.draw_commands(frame, chunks[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Prompting(flow) = &self.mode {
            self.draw_prompt(frame, area, flow);
        }
    }

    fn draw_employee_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(WINDOW_TITLE);

        if self.employees.is_empty() {
            let message = Paragraph::new("No employees yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["ID", "Name", "Position"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = self.employees.iter().map(|employee| {
            Row::new([
                employee.id.to_string(),
                employee.name.clone(),
                employee.position.clone(),
            ])
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    /// The three commands, rendered as a vertical list in the same order the
    /// footer hints reference them.
    fn draw_commands(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![Span::styled("[a]", key_style), Span::raw(" Add Employee")]),
            Line::from(vec![
                Span::styled("[u]", key_style),
                Span::raw(" Update Employee"),
            ]),
            Line::from(vec![
                Span::styled("[d]", key_style),
                Span::raw(" Delete Employee"),
            ]),
        ];
        let pane = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(pane, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Prompting(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[\u{2191}\u{2193}]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[a]", key_style),
                Span::raw(" Add   "),
                Span::styled("[u]", key_style),
                Span::raw(" Update   "),
                Span::styled("[d]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, flow: &PromptFlow) {
        let popup_area = centered_rect(60, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(flow.title());
        let paragraph = Paragraph::new(flow.input.build_line())
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        // Clamp in usize before narrowing: a long enough value would otherwise
        // truncate or overflow the u16 cell coordinate.
        let prefix_len = flow.input.label.chars().count() + 1;
        let cursor_x = (inner.x as usize)
            .saturating_add(prefix_len)
            .saturating_add(flow.input.value_len())
            .min(inner.right() as usize);
        frame.set_cursor_position((cursor_x as u16, inner.y));
    }
}
