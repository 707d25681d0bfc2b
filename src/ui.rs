use crate::commands::scope_label;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use dragboard::config::ConfigLocation;
use dragboard::{
    Board, BoardEngine, Column, DragOutcome, DragState, DropTarget, EntityKind, IgnoreReason, Task,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListState;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub fn run(engine: BoardEngine, location: ConfigLocation) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(engine, location);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    engine: BoardEngine,
    location: ConfigLocation,
    selected_column: usize,
    /// Rank of the selected task in its column; `None` selects the header.
    selected_task: Option<usize>,
    scroll_offsets: Vec<usize>,
    status: String,
    mode: Mode,
}

enum Mode {
    Normal,
    /// Keyboard drag: the cursor plays the pointer.
    Grabbing(Grab),
    /// Title typed so far.
    Renaming(String),
    ConfirmDelete(DropTarget),
}

#[derive(Clone)]
struct Grab {
    dragged: DropTarget,
    hover_column: usize,
    hover_rank: Option<usize>,
}

impl App {
    fn new(engine: BoardEngine, location: ConfigLocation) -> Self {
        let status = format!(
            "Config from {} ({}). Press c to add a column.",
            location.path.display(),
            scope_label(&location)
        );
        App {
            engine,
            location,
            selected_column: 0,
            selected_task: None,
            scroll_offsets: Vec::new(),
            status,
            mode: Mode::Normal,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Grabbing(_) => self.handle_grab_key(key),
            Mode::Renaming(_) => self.handle_rename_key(key),
            Mode::ConfirmDelete(_) => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Left | KeyCode::Char('h') => self.prev_column(),
            KeyCode::Right | KeyCode::Char('l') => self.next_column(),
            KeyCode::Up | KeyCode::Char('k') => self.prev_task(),
            KeyCode::Down | KeyCode::Char('j') => self.next_task(),
            KeyCode::Char('c') => {
                let id = self.engine.add_column()?;
                let board = self.engine.snapshot();
                self.selected_column = board.columns.len().saturating_sub(1);
                self.selected_task = None;
                self.status = format!("Added column {}", id);
            }
            KeyCode::Char('t') => {
                let Some(column_id) = self.current_column().map(|c| c.id.clone()) else {
                    self.status = "Add a column first".into();
                    return Ok(false);
                };
                if let Some(id) = self.engine.add_task(&column_id)? {
                    let board = self.engine.snapshot();
                    self.selected_task = Some(board.task_count(&column_id).saturating_sub(1));
                    self.status = format!("Added task {}", id);
                }
            }
            KeyCode::Char('r') | KeyCode::Enter => self.start_rename(),
            KeyCode::Char('d') => match self.current_target() {
                Some(target) => {
                    self.status = format!(
                        "Delete {} {}? (y to confirm, n/Esc to cancel)",
                        target.kind, target.id
                    );
                    self.mode = Mode::ConfirmDelete(target);
                }
                None => self.status = "Nothing selected to delete".into(),
            },
            KeyCode::Char(' ') => self.start_grab()?,
            _ => {}
        }
        Ok(false)
    }

    fn start_rename(&mut self) {
        let board = self.engine.snapshot();
        let Some(target) = self.current_target() else {
            self.status = "Nothing selected to rename".into();
            return;
        };
        let title = match target.kind {
            EntityKind::Column => board.column(&target.id).map(|c| c.title.clone()),
            EntityKind::Task => board.task(&target.id).map(|t| t.title.clone()),
        };
        if !self.engine.begin_edit(&target.id, target.kind) {
            self.status = format!("Cannot rename {}", target.id);
            return;
        }
        self.mode = Mode::Renaming(title.unwrap_or_default());
        self.status = "Renaming (Enter save, Esc cancel)".into();
    }

    fn start_grab(&mut self) -> Result<()> {
        let Some(target) = self.current_target() else {
            self.status = "Nothing selected to drag".into();
            return Ok(());
        };
        match self.engine.on_drag_start(&target.id, target.kind)? {
            DragOutcome::Started(kind) => {
                self.mode = Mode::Grabbing(Grab {
                    dragged: target.clone(),
                    hover_column: self.selected_column,
                    hover_rank: self.selected_task,
                });
                self.status = match kind {
                    EntityKind::Column => {
                        format!("Dragging column {} (h/l move, Enter drop, Esc cancel)", target.id)
                    }
                    EntityKind::Task => format!(
                        "Dragging task {} (h/j/k/l move, Enter drop, Esc cancel)",
                        target.id
                    ),
                };
            }
            other => self.status = format!("Cannot drag {}: {:?}", target.id, other),
        }
        Ok(())
    }

    fn handle_grab_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Mode::Grabbing(mut grab) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return Ok(false);
        };
        let board = self.engine.snapshot();
        let column_count = board.columns.len();
        match key.code {
            KeyCode::Esc => {
                self.engine.on_drag_end(&grab.dragged.id, None)?;
                self.sync_selection_to(&grab.dragged);
                self.status = "Drag cancelled".into();
                return Ok(false);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let over = hover_target(&board, &grab);
                let outcome = self.engine.on_drag_end(&grab.dragged.id, over)?;
                self.sync_selection_to(&grab.dragged);
                self.status = match outcome {
                    DragOutcome::Reordered(reorder) => {
                        format!("Moved column to position {}", reorder.to + 1)
                    }
                    DragOutcome::Cancelled => "Drag cancelled".into(),
                    _ => format!("Dropped {}", grab.dragged.id),
                };
                return Ok(false);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if grab.hover_column > 0 {
                    grab.hover_column -= 1;
                    grab.hover_rank = clamp_rank(&board, &grab, grab.hover_column);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if grab.hover_column + 1 < column_count {
                    grab.hover_column += 1;
                    grab.hover_rank = clamp_rank(&board, &grab, grab.hover_column);
                }
            }
            KeyCode::Up | KeyCode::Char('k') if grab.dragged.kind == EntityKind::Task => {
                grab.hover_rank = match grab.hover_rank {
                    Some(rank) if rank > 0 => Some(rank - 1),
                    other => other,
                };
            }
            KeyCode::Down | KeyCode::Char('j') if grab.dragged.kind == EntityKind::Task => {
                let len = board
                    .columns
                    .get(grab.hover_column)
                    .map(|c| board.task_count(&c.id))
                    .unwrap_or(0);
                grab.hover_rank = match grab.hover_rank {
                    Some(rank) if rank + 1 < len => Some(rank + 1),
                    None if len > 0 => Some(0),
                    other => other,
                };
            }
            _ => {
                self.mode = Mode::Grabbing(grab);
                return Ok(false);
            }
        }

        let over = hover_target(&board, &grab);
        let outcome = self.engine.on_drag_over(&grab.dragged.id, over)?;
        if let DragOutcome::Moved(_) = outcome {
            let board = self.engine.snapshot();
            if let Some((col, rank)) = task_position(&board, &grab.dragged.id) {
                grab.hover_column = col;
                grab.hover_rank = Some(rank);
            }
        }
        if let DragOutcome::Ignored(IgnoreReason::NotDragging) = outcome {
            self.status = "Drag ended".into();
            return Ok(false);
        }
        self.mode = Mode::Grabbing(grab);
        Ok(false)
    }

    fn handle_rename_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Mode::Renaming(mut title) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return Ok(false);
        };
        match key.code {
            KeyCode::Esc => {
                self.engine.cancel_edit();
                self.status = "Rename canceled".into();
                return Ok(false);
            }
            KeyCode::Enter => {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    self.status = "Title cannot be empty".into();
                } else {
                    self.engine.commit_edit(trimmed)?;
                    self.status = format!("Renamed to {}", trimmed);
                    return Ok(false);
                }
            }
            KeyCode::Backspace => {
                title.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                title.push(c);
            }
            _ => {}
        }
        self.mode = Mode::Renaming(title);
        Ok(false)
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        let target = match &self.mode {
            Mode::ConfirmDelete(target) => target.clone(),
            _ => return Ok(false),
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let deleted = match target.kind {
                    EntityKind::Column => self.engine.delete_column(&target.id)?,
                    EntityKind::Task => self.engine.delete_task(&target.id)?,
                };
                self.status = if deleted {
                    format!("Deleted {}", target.id)
                } else {
                    format!("{} was already gone", target.id)
                };
                self.mode = Mode::Normal;
                self.ensure_bounds();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        Ok(false)
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_board(f, layout[1]);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::Renaming(title) => self.draw_rename(f, title),
            Mode::ConfirmDelete(target) => self.draw_confirm(f, target),
            Mode::Normal | Mode::Grabbing(_) => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let board = self.engine.snapshot();
        let mode = match &self.mode {
            Mode::Normal => "normal".to_string(),
            Mode::Grabbing(_) => {
                format!("dragging {}", describe_state(self.engine.session().state()))
            }
            Mode::Renaming(_) => "renaming".to_string(),
            Mode::ConfirmDelete(_) => "confirm".to_string(),
        };
        let title = Line::from(vec![
            Span::styled(
                "dragboard ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} columns, {} tasks", board.columns.len(), board.tasks.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(scope_label(&self.location), Style::default().fg(Color::Green)),
            Span::raw("  •  "),
            Span::styled(
                format!("rev {}", board.revision),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  •  "),
            Span::styled(mode, Style::default().fg(Color::Magenta)),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_board(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let board = self.engine.snapshot();
        if board.columns.is_empty() {
            let msg = Paragraph::new("No columns yet (press c)")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("dragboard"));
            f.render_widget(Clear, area);
            f.render_widget(msg, area);
            return;
        }

        if self.scroll_offsets.len() < board.columns.len() {
            self.scroll_offsets.resize(board.columns.len(), 0);
        }

        let chunk_constraints = board
            .columns
            .iter()
            .map(|_| Constraint::Percentage((100 / board.columns.len() as u16).max(1)))
            .collect::<Vec<_>>();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(chunk_constraints)
            .split(area);

        let grab = match &self.mode {
            Mode::Grabbing(grab) => Some(grab.clone()),
            _ => None,
        };
        let dragged_id = self.engine.session().state().dragged_id().map(str::to_string);

        for (idx, column) in board.columns.iter().enumerate() {
            let accent = ACCENTS[idx % ACCENTS.len()];
            let hovered = grab.as_ref().is_some_and(|g| g.hover_column == idx);
            let task_width = chunks[idx].width.saturating_sub(2);
            let tasks = board
                .tasks_in(&column.id)
                .enumerate()
                .map(|(rank, task)| {
                    let selected = idx == self.selected_column && Some(rank) == self.selected_task;
                    let dragged = dragged_id.as_deref() == Some(task.id.as_str());
                    task_item(task, task_width, selected || dragged, dragged)
                })
                .collect::<Vec<_>>();
            let mut state = ListState::default();
            let mut offset = *self.scroll_offsets.get(idx).unwrap_or(&0);
            let viewport = (chunks[idx].height.saturating_sub(2) / TASK_ITEM_HEIGHT) as usize;
            let selected = if idx == self.selected_column {
                self.selected_task
            } else {
                None
            };
            if let Some(sel) = selected {
                offset = keep_visible(sel, offset, viewport);
                self.scroll_offsets[idx] = offset;
                state.select(Some(sel));
                *state.offset_mut() = offset;
            } else {
                *state.offset_mut() = offset.min(tasks.len().saturating_sub(1));
            }

            let mut title = format!("{} [{}] ({})", column.title, column.id, tasks.len());
            if dragged_id.as_deref() == Some(column.id.as_str()) {
                title.push_str(" ⇄");
            }
            let header_selected = idx == self.selected_column && self.selected_task.is_none();
            let border = if hovered { Color::LightYellow } else { accent };

            let block = Block::default()
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(accent)
                        .add_modifier(if header_selected {
                            Modifier::BOLD | Modifier::UNDERLINED
                        } else {
                            Modifier::BOLD
                        }),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(Color::Rgb(16, 18, 24)));

            let list = List::new(tasks).block(block);
            f.render_stateful_widget(list, chunks[idx], &mut state);
        }
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let key = Style::default().fg(Color::LightCyan);
        let spans = match &self.mode {
            Mode::Grabbing(_) => vec![
                Span::styled("←↑↓→ / h j k l", key),
                Span::raw(" hover  "),
                Span::styled("Enter", key),
                Span::raw(" drop  "),
                Span::styled("Esc", key),
                Span::raw(" release over nothing"),
            ],
            _ => vec![
                Span::styled("←↑↓→ / h j k l", key),
                Span::raw(" select  "),
                Span::styled("Space", key),
                Span::raw(" drag  "),
                Span::styled("c", key),
                Span::raw(" column  "),
                Span::styled("t", key),
                Span::raw(" task  "),
                Span::styled("r", key),
                Span::raw(" rename  "),
                Span::styled("d", key),
                Span::raw(" delete  "),
                Span::styled("q", key),
                Span::raw(" quit"),
            ],
        };
        Line::from(spans)
    }

    fn draw_rename(&self, f: &mut ratatui::Frame<'_>, title: &str) {
        let area = popup_area(f.size(), 60, 6);
        let target = self
            .engine
            .editing()
            .map(|lock| format!("Rename {} {}", lock.kind, lock.id))
            .unwrap_or_else(|| "Rename".into());
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "Title: ",
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD | Modifier::DIM),
                ),
                Span::styled(format!("{}▌", title), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        target,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, target: &DropTarget) {
        let area = popup_area(f.size(), 56, 7);
        let board = self.engine.snapshot();
        let (title, detail) = match target.kind {
            EntityKind::Column => (
                board
                    .column(&target.id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| target.id.clone()),
                format!("and its {} task(s)", board.task_count(&target.id)),
            ),
            EntityKind::Task => (
                board
                    .task(&target.id)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| target.id.clone()),
                String::new(),
            ),
        };
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\" {}?", title, detail),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn prev_column(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_task = None;
        }
    }

    fn next_column(&mut self) {
        if self.selected_column + 1 < self.engine.snapshot().columns.len() {
            self.selected_column += 1;
            self.selected_task = None;
        }
    }

    fn prev_task(&mut self) {
        self.selected_task = match self.selected_task {
            Some(0) | None => None,
            Some(rank) => Some(rank - 1),
        };
    }

    fn next_task(&mut self) {
        let board = self.engine.snapshot();
        let Some(column) = board.columns.get(self.selected_column) else {
            return;
        };
        let len = board.task_count(&column.id);
        self.selected_task = match self.selected_task {
            None if len > 0 => Some(0),
            Some(rank) if rank + 1 < len => Some(rank + 1),
            other => other,
        };
    }

    fn current_column(&self) -> Option<Column> {
        self.engine
            .snapshot()
            .columns
            .get(self.selected_column)
            .cloned()
    }

    fn current_target(&self) -> Option<DropTarget> {
        let board = self.engine.snapshot();
        let column = board.columns.get(self.selected_column)?;
        match self.selected_task {
            None => Some(DropTarget::column(column.id.clone())),
            Some(rank) => board
                .tasks_in(&column.id)
                .nth(rank)
                .map(|t| DropTarget::task(t.id.clone())),
        }
    }

    /// Points the selection at the entity that was just dragged.
    fn sync_selection_to(&mut self, dragged: &DropTarget) {
        let board = self.engine.snapshot();
        match dragged.kind {
            EntityKind::Column => {
                if let Some(idx) = board.find_column_index(&dragged.id) {
                    self.selected_column = idx;
                    self.selected_task = None;
                }
            }
            EntityKind::Task => {
                if let Some((col, rank)) = task_position(&board, &dragged.id) {
                    self.selected_column = col;
                    self.selected_task = Some(rank);
                }
            }
        }
        self.ensure_bounds();
    }

    fn ensure_bounds(&mut self) {
        let board = self.engine.snapshot();
        if board.columns.is_empty() {
            self.selected_column = 0;
            self.selected_task = None;
            return;
        }
        self.selected_column = self.selected_column.min(board.columns.len() - 1);
        let len = board.task_count(&board.columns[self.selected_column].id);
        self.selected_task = match self.selected_task {
            Some(_) if len == 0 => None,
            Some(rank) => Some(rank.min(len - 1)),
            None => None,
        };
    }
}

const TASK_ITEM_HEIGHT: u16 = 3;

/// What the keyboard cursor is "over" while grabbing.
fn hover_target(board: &Board, grab: &Grab) -> Option<DropTarget> {
    let column = board.columns.get(grab.hover_column)?;
    if grab.dragged.kind == EntityKind::Column {
        return Some(DropTarget::column(column.id.clone()));
    }
    match grab.hover_rank {
        Some(rank) => board
            .tasks_in(&column.id)
            .nth(rank)
            .map(|t| DropTarget::task(t.id.clone()))
            .or_else(|| Some(DropTarget::column(column.id.clone()))),
        None => Some(DropTarget::column(column.id.clone())),
    }
}

/// Keeps the current rank when entering another column, clamped to the
/// tasks that column already has; `None` targets the column body.
fn clamp_rank(board: &Board, grab: &Grab, column_idx: usize) -> Option<usize> {
    if grab.dragged.kind == EntityKind::Column {
        return None;
    }
    let column = board.columns.get(column_idx)?;
    let len = board
        .tasks_in(&column.id)
        .filter(|t| t.id != grab.dragged.id)
        .count();
    if len == 0 {
        return None;
    }
    Some(grab.hover_rank.unwrap_or(0).min(len - 1))
}

/// Column index and rank of a task.
fn task_position(board: &Board, task_id: &str) -> Option<(usize, usize)> {
    let task = board.task(task_id)?;
    let col = board.find_column_index(&task.column_id)?;
    let rank = board.tasks_in(&task.column_id).position(|t| t.id == task_id)?;
    Some((col, rank))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

const ACCENTS: [Color; 4] = [
    Color::Cyan,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightBlue,
];

/// A `width` x `height` box centered in `area`, shrunk to fit.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Scroll offset that keeps row `selected` inside a `viewport` of rows.
fn keep_visible(selected: usize, offset: usize, viewport: usize) -> usize {
    if selected < offset {
        selected
    } else if viewport > 0 && selected >= offset + viewport {
        selected + 1 - viewport
    } else {
        offset
    }
}

fn clip(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some(_) => {
            let mut out: String = text.chars().take(max - 1).collect();
            out.push('…');
            out
        }
    }
}

fn task_item(task: &Task, width: u16, highlighted: bool, dragged: bool) -> ListItem<'static> {
    let inner_width = width.saturating_sub(4).max(10) as usize;
    let border_char = if dragged {
        "~"
    } else if highlighted {
        "="
    } else {
        "-"
    };
    let top = format!("+{}+", border_char.repeat(inner_width));
    let title = clip(&task.title, inner_width.saturating_sub(2));
    let lines = vec![
        Line::raw(top.clone()),
        Line::raw(format!("| {:width$} |", title, width = inner_width.saturating_sub(2))),
        Line::raw(top),
    ];
    let base = Style::default().bg(Color::Rgb(22, 24, 30)).fg(Color::Gray);
    let mut item = ListItem::new(lines).style(base);
    if highlighted {
        item = item.style(
            Style::default()
                .bg(Color::Rgb(252, 214, 112))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
    }
    item
}

fn describe_state(state: &DragState) -> String {
    match state {
        DragState::Idle => "nothing".into(),
        DragState::DraggingColumn(column) => format!("column \"{}\"", column.title),
        DragState::DraggingTask(task) => format!("task \"{}\"", task.title),
    }
}
