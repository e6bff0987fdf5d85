use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use super::braille::{BrailleCanvas, DOTS_X, DOTS_Y};
use crate::chart::{Plot, PolarChart};
use crate::config::Config;
use crate::data::Series;
use crate::polar::PolarPoint;

/// Degrees added or removed per rotate key press.
const ROTATE_STEP: f64 = 5.0;

/// Run the interactive view. `save_to` is where the `w` key writes the
/// rotational offset, falling back to the default config path.
pub fn run(mut config: Config, series: Vec<Series>, save_to: Option<PathBuf>) -> Result<()> {
    // One text row per terminal cell
    config.polar.text_size = DOTS_Y as u32;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, Plot::new(0.0, 0.0, config, series), save_to);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

struct ViewState {
    chart: PolarChart,
    /// Mouse position in plot dots.
    cursor: Option<(f64, f64)>,
    readout: Option<PolarPoint>,
    /// Index of the series redrawn in the cursor color
    highlight: Option<usize>,
    message: Option<String>,
}

impl ViewState {
    fn rotate(&mut self, plot: &mut Plot, delta: f64) {
        let options = &mut plot.config.polar;
        options.rotational_offset = (options.rotational_offset + delta).rem_euclid(360.0);
        self.chart = PolarChart::new(options);
        self.message = None;
    }

    /// Step the highlight through every series and back to none.
    fn cycle_highlight(&mut self, count: usize) {
        self.highlight = match self.highlight {
            None if count > 0 => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            _ => None,
        };
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut plot: Plot,
    save_to: Option<PathBuf>,
) -> Result<()> {
    let mut view = ViewState {
        chart: PolarChart::new(&plot.config.polar),
        cursor: None,
        readout: None,
        highlight: None,
        message: None,
    };
    let poll = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let block = ratatui::widgets::Block::default()
                .style(Style::default().bg(Color::Reset));
            frame.render_widget(block, area);

            let plot_area = Rect::new(
                area.x,
                area.y + 1,
                area.width,
                area.height.saturating_sub(1),
            );
            let mut canvas =
                BrailleCanvas::new(plot_area.width as usize, plot_area.height as usize);
            plot.resize(canvas.grid_w as f64, canvas.grid_h as f64);

            view.chart.draw(&plot, &mut canvas);
            if let Some(series) = view.highlight.and_then(|i| plot.series.get(i)) {
                view.chart.draw_series_highlight(
                    &plot,
                    &mut canvas,
                    series,
                    plot.config.grid.cursor_color,
                    series.line_width * 2.0,
                );
            }
            view.readout = None;
            if let Some((x, y)) = view.cursor {
                view.chart.draw_cursor(&plot, &mut canvas, x, y);
                view.readout = view.chart.cursor_polar(x, y);
            }
            canvas.render(frame, plot_area);

            render_status(frame, area, &plot, &view);
        })?;

        if !event::poll(poll)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match key {
                KeyEvent {
                    code: KeyCode::Char('q'),
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    break;
                }
                KeyEvent {
                    code: KeyCode::Char('['),
                    ..
                } => {
                    view.rotate(&mut plot, -ROTATE_STEP);
                }
                KeyEvent {
                    code: KeyCode::Char(']'),
                    ..
                } => {
                    view.rotate(&mut plot, ROTATE_STEP);
                }
                KeyEvent {
                    code: KeyCode::Char('h'),
                    ..
                } => {
                    view.cycle_highlight(plot.series.len());
                }
                KeyEvent {
                    code: KeyCode::Char('w'),
                    ..
                } => {
                    view.message = Some(save_rotation(&save_to, plot.config.polar.rotational_offset));
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                column,
                row,
                ..
            }) => {
                let size = terminal.size()?;
                view.cursor = cell_to_plot(Rect::new(0, 0, size.width, size.height), column, row);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Center of the terminal cell under the mouse, in plot dots.
fn cell_to_plot(area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    let top = area.y + 1;
    if column < area.x || row < top {
        return None;
    }
    let x = (column - area.x) as usize * DOTS_X + DOTS_X / 2;
    let y = (row - top) as usize * DOTS_Y + DOTS_Y / 2;
    Some((x as f64, y as f64))
}

fn save_rotation(save_to: &Option<PathBuf>, offset: f64) -> String {
    let Some(path) = save_to.clone().or_else(Config::default_path) else {
        warn!("no config directory to save rotation into");
        return "no config path".to_string();
    };
    match Config::save_rotational_offset(&path, offset)
        .with_context(|| format!("saving rotation to {}", path.display()))
    {
        Ok(()) => {
            info!("Saved rotational offset {} to {}", offset, path.display());
            format!("saved to {}", path.display())
        }
        Err(e) => {
            warn!("{:#}", e);
            "save failed".to_string()
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, plot: &Plot, view: &ViewState) {
    let position = match view.readout {
        Some(p) => format!("r: {:.2} angle: {:.2}", p.radius, p.angle),
        None => "r: - angle: -".to_string(),
    };
    let mut status = format!(
        " {} | [ ] rotate: {} | [h]ighlight | [w]rite | [q]uit ",
        position, plot.config.polar.rotational_offset
    );
    if let Some(message) = &view.message {
        status.push_str(&format!("| {} ", message));
    }

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}
