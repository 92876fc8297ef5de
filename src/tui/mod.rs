//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the scale parameters, then renders
//! the grade curve, class statistics and the grade mirror live. Rosters come
//! from a CSV when one was given, otherwise from the synthetic generator
//! (resampled with `r`).

use std::io;
use std::time::Duration;

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
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_grade_with_roster};
use crate::curve::{GRADE_PASS, sample_curve};
use crate::domain::GradeConfig;
use crate::error::AppError;
use crate::io::roster::IngestedRoster;
use crate::report::pass_rate_percent;

mod plotters_chart;

use plotters_chart::GradeCurveChart;

/// Start the TUI.
pub fn run(config: GradeConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
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

/// Settings panel rows, in display order.
const FIELD_POINTS_FOR_6: usize = 0;
const FIELD_POINTS_FOR_4: usize = 1;
const FIELD_SCALE: usize = 2;
const FIELD_ROUNDING: usize = 3;
const FIELD_COUNT: usize = 4;

struct App {
    config: GradeConfig,
    roster: IngestedRoster,
    /// Roster came from a CSV; resampling is disabled then.
    from_file: bool,
    selected_field: usize,
    /// Field index currently being edited as text, if any.
    editing: Option<usize>,
    edit_input: String,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: GradeConfig) -> Result<Self, AppError> {
        let from_file = config.csv_path.is_some();
        let roster = match &config.csv_path {
            Some(path) => crate::io::roster::load_roster(path, config.effective_max_points())?,
            None => {
                let students = crate::data::generate_roster(&config)?;
                IngestedRoster {
                    rows_read: students.len(),
                    rows_used: students.len(),
                    students,
                    row_errors: Vec::new(),
                }
            }
        };

        let mut app = Self {
            config,
            roster,
            from_file,
            selected_field: 0,
            editing: None,
            edit_input: String::new(),
            status: if from_file {
                "Loaded roster.".to_string()
            } else {
                "Synthetic roster (press r to resample).".to_string()
            },
            run: None,
        };
        app.regrade()?;
        Ok(app)
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

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing.is_some() {
            return self.handle_field_edit(code);
        }

        let max_field = if self.from_file { FIELD_ROUNDING } else { FIELD_COUNT };

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < max_field {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1)?,
            KeyCode::Right => self.adjust_field(1)?,
            KeyCode::Enter => {
                if matches!(self.selected_field, FIELD_POINTS_FOR_6 | FIELD_POINTS_FOR_4) {
                    self.editing = Some(self.selected_field);
                    self.edit_input.clear();
                    self.status =
                        "Editing points value. Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('r') => {
                if self.from_file {
                    self.status = "Roster comes from a file; resampling is off.".to_string();
                } else {
                    self.config.sample_seed = self.config.sample_seed.wrapping_add(1);
                    self.resample()?;
                    self.status = format!("Resampled (seed {}).", self.config.sample_seed);
                }
            }
            KeyCode::Char('e') => {
                let path = self
                    .config
                    .export_results
                    .clone()
                    .unwrap_or_else(|| "klassenliste_export.csv".into());
                match &self.run {
                    Some(run) => {
                        crate::io::export::write_roster_csv(&path, &run.graded)?;
                        self.status = format!("Exported roster: {}", path.display());
                    }
                    None => self.status = "Nothing to export yet.".to_string(),
                }
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_field_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.apply_field_input()?;
            }
            KeyCode::Backspace => {
                self.edit_input.pop();
            }
            KeyCode::Char(c) => {
                // Decimal comma is as welcome here as in the CSVs.
                if c.is_ascii_digit() || c == '.' || c == ',' {
                    self.edit_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_field_input(&mut self) -> Result<(), AppError> {
        let Some(field) = self.editing else {
            return Ok(());
        };

        let raw = self.edit_input.replace(',', ".");
        let value = match raw.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("'{}' is not a valid number.", self.edit_input);
                self.editing = None;
                return Ok(());
            }
        };

        let (p6, p4) = match field {
            FIELD_POINTS_FOR_6 => (value, self.config.points_for_4),
            _ => (self.config.points_for_6, value),
        };
        self.try_set_scale_points(p6, p4)?;
        self.editing = None;
        Ok(())
    }

    /// Apply new band points if they form a valid scale; otherwise keep the
    /// old configuration and report why.
    fn try_set_scale_points(&mut self, p6: f64, p4: f64) -> Result<(), AppError> {
        match crate::curve::GradeScale::new(p6, p4, self.config.scale_mode) {
            Ok(_) => {
                self.config.points_for_6 = p6;
                self.config.points_for_4 = p4;
                self.status = format!("Scale: 6.0 at {p6} pts, 4.0 at {p4} pts.");
                self.regrade()
            }
            Err(err) => {
                self.status = err.to_string();
                Ok(())
            }
        }
    }

    fn adjust_field(&mut self, delta: i32) -> Result<(), AppError> {
        match self.selected_field {
            FIELD_POINTS_FOR_6 => {
                let p6 = self.config.points_for_6 + f64::from(delta) * 5.0;
                self.try_set_scale_points(p6, self.config.points_for_4)?;
            }
            FIELD_POINTS_FOR_4 => {
                let p4 = (self.config.points_for_4 + f64::from(delta) * 5.0).max(0.0);
                self.try_set_scale_points(self.config.points_for_6, p4)?;
            }
            FIELD_SCALE => {
                self.config.scale_mode = if delta >= 0 {
                    self.config.scale_mode.next()
                } else {
                    self.config.scale_mode.prev()
                };
                self.status = format!("scale: {}", self.config.scale_mode.display_name());
                self.regrade()?;
            }
            FIELD_ROUNDING => {
                self.config.rounding_mode = if delta >= 0 {
                    self.config.rounding_mode.next()
                } else {
                    self.config.rounding_mode.prev()
                };
                self.status = format!("rounding: {}", self.config.rounding_mode.display_name());
                self.regrade()?;
            }
            FIELD_COUNT => {
                let next = if delta >= 0 {
                    self.config.sample_count.saturating_add(5)
                } else {
                    self.config.sample_count.saturating_sub(5)
                };
                self.config.sample_count = next.max(1);
                self.resample()?;
                self.status = format!("count: {}", self.config.sample_count);
            }
            _ => {}
        }
        Ok(())
    }

    fn resample(&mut self) -> Result<(), AppError> {
        let students = crate::data::generate_roster(&self.config)?;
        self.roster = IngestedRoster {
            rows_read: students.len(),
            rows_used: students.len(),
            students,
            row_errors: Vec::new(),
        };
        self.regrade()
    }

    fn regrade(&mut self) -> Result<(), AppError> {
        let run = run_grade_with_roster(&self.config, self.roster.clone())?;
        self.run = Some(run);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
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
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("noten", Style::default().fg(Color::Cyan)),
            Span::raw(" — grade curve calculator"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "6.0 at {} pts | 4.0 at {} pts | scale: {} | rounding: {} | n={}",
                self.config.points_for_6,
                self.config.points_for_4,
                self.config.scale_mode.display_name(),
                self.config.rounding_mode.display_name(),
                self.roster.students.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "mean={:.2} | passing={} | failing={} | pass rate={:.0}%",
                    run.stats.mean,
                    run.stats.passing,
                    run.stats.failing,
                    pass_rate_percent(&run.stats),
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_side_panel(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Grade curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let curve = sample_curve(&run.scale, self.config.resolution);

        let mut passing = Vec::new();
        let mut failing = Vec::new();
        for g in &run.graded {
            let point = (g.student.points, g.raw_grade);
            if g.passed() {
                passing.push(point);
            } else {
                failing.push(point);
            }
        }

        let widget = GradeCurveChart {
            curve: &curve,
            passing: &passing,
            failing: &failing,
            x_bounds: [0.0, run.scale.points_for_6()],
            // A little padding keeps the extreme grades off the frame edge.
            y_bounds: [0.8, 6.2],
            pass_grade: GRADE_PASS,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_side_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings_height = if self.from_file { 6 } else { 7 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(settings_height), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, chunks[0]);
        self.draw_mirror(frame, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        items.push(ListItem::new(format!("Points for 6: {}", self.config.points_for_6)));
        items.push(ListItem::new(format!("Points for 4: {}", self.config.points_for_4)));
        items.push(ListItem::new(format!(
            "Scale: {}",
            self.config.scale_mode.display_name()
        )));
        items.push(ListItem::new(format!(
            "Rounding: {}",
            self.config.rounding_mode.display_name()
        )));
        if !self.from_file {
            items.push(ListItem::new(format!("Count: {}", self.config.sample_count)));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing.is_some() {
            let hint = Paragraph::new(format!("> {}", self.edit_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(1),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_mirror(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(run) = &self.run else {
            return;
        };

        let mut items: Vec<ListItem> = run
            .mirror
            .entries
            .iter()
            .map(|e| {
                let style = if e.grade >= GRADE_PASS {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                ListItem::new(Span::styled(
                    format!("{:>4.2} = {:>6.1} pts", e.grade, e.points),
                    style,
                ))
            })
            .collect();

        if run.mirror.approximate {
            items.push(ListItem::new(Span::styled(
                "* approximate (S-curve)",
                Style::default().fg(Color::Gray),
            )));
        }

        let list = List::new(items).block(Block::default().title("Mirror").borders(Borders::ALL));
        frame.render_widget(list, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  r resample  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
