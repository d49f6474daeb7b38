//! sortviz - Terminal User Interface
//!
//! Animated bar chart of a sorting algorithm replaying its recorded trace.
//! App logic lives in `sortviz::tui::sort_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use sortviz::cli::{load_config, Args};
    use sortviz::tui::sort_app::SortApp;

    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .format_target(false)
        .filter_level(log::LevelFilter::Error)
        .init();

    let app = match load_config(args.config_path.as_deref()).and_then(SortApp::new) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: sort-tui [--config path/to/config.yaml]");
            std::process::exit(1);
        }
    };

    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sort-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Wrap},
        Frame, Terminal,
    };
    use sortviz::playback::{BarState, PlayState, RenderFrame};
    use sortviz::tui::sort_app::SortApp;
    use std::io;
    use std::time::{Duration, Instant};

    /// Longest wait for input between redraws.
    const MAX_POLL: Duration = Duration::from_millis(50);

    pub fn run(mut app: SortApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut SortApp) -> io::Result<()> {
        let started = Instant::now();

        loop {
            terminal.draw(|f| ui(f, app))?;

            let timeout = app.poll_timeout(started.elapsed(), MAX_POLL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            app.update(started.elapsed());

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &SortApp) {
        let frame = app.frame();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], &frame);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)])
            .split(chunks[1]);

        render_bars(f, middle[0], &frame);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(13)])
            .split(middle[1]);

        render_info(f, side[0], &frame);
        render_controls(f, side[1]);
        render_progress(f, chunks[2], &frame);
        render_status_bar(f, chunks[3], app, &frame);
    }

    fn render_title(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "sortviz",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw(frame.algorithm.descriptor().name),
        ]))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(title, area);
    }

    /// Bar color for a position, following the legend.
    fn bar_color(state: BarState) -> Color {
        match state {
            BarState::Sorted => Color::Green,
            BarState::Swapping => Color::Yellow,
            BarState::Comparing => Color::Red,
            BarState::Default => Color::Blue,
        }
    }

    fn render_bars(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let bars: Vec<Bar> = frame
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let color = bar_color(frame.bar_state(i));
                Bar::default()
                    .value(u64::try_from(v).unwrap_or(0))
                    .text_value(String::new())
                    .style(Style::default().fg(color))
            })
            .collect();

        // Fit all bars in the inner width: one column per bar plus gaps when room allows.
        let inner = area.width.saturating_sub(2);
        let count = u16::try_from(frame.values.len()).unwrap_or(u16::MAX).max(1);
        let gap = u16::from(inner >= count.saturating_mul(2));
        let width = (inner.saturating_sub(gap.saturating_mul(count)) / count).max(1);

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} values", frame.values.len())),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(width)
            .bar_gap(gap)
            .max(u64::try_from(frame.max_value()).unwrap_or(0).max(1));

        f.render_widget(chart, area);
    }

    fn info_lines(frame: &RenderFrame) -> Vec<Line<'static>> {
        let desc = frame.algorithm.descriptor();
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        let mut lines = vec![
            Line::from(Span::styled(
                desc.name,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(desc.description),
            Line::from(""),
            Line::from(format!(
                "Time: {} / {} / {}",
                desc.time_complexity.best, desc.time_complexity.average, desc.time_complexity.worst
            )),
            Line::from(format!("Space: {}", desc.space_complexity)),
            Line::from(format!(
                "Stable: {}  In-place: {}",
                yes_no(desc.stable),
                yes_no(desc.in_place)
            )),
            Line::from(""),
        ];
        for (i, step) in desc.how_it_works.iter().enumerate() {
            lines.push(Line::from(format!("{}. {step}", i + 1)));
        }
        lines
    }

    fn render_info(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let info = Paragraph::new(info_lines(frame))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Algorithm"));

        f.render_widget(info, area);
    }

    fn render_controls(f: &mut Frame, area: Rect) {
        let legend = |label: &'static str, color: Color| {
            Line::from(vec![
                Span::styled("██ ", Style::default().fg(color)),
                Span::raw(label),
            ])
        };

        let controls_text = vec![
            Line::from(" Space - Start / pause"),
            Line::from(" S     - Single step"),
            Line::from(" R     - Reset   N - New array"),
            Line::from(" A     - Cycle algorithm"),
            Line::from(" +/-   - Array size"),
            Line::from(" [/]   - Speed"),
            Line::from(" Q     - Quit"),
            legend("Unsorted", bar_color(BarState::Default)),
            legend("Comparing", bar_color(BarState::Comparing)),
            legend("Swapping", bar_color(BarState::Swapping)),
            legend("Sorted", bar_color(BarState::Sorted)),
        ];

        let controls = Paragraph::new(controls_text)
            .block(Block::default().borders(Borders::ALL).title("Controls"));

        f.render_widget(controls, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(frame.progress().clamp(0.0, 1.0))
            .label(format!("step {} / {}", frame.cursor, frame.total_steps));

        f.render_widget(gauge, area);
    }

    fn state_style(state: PlayState) -> (&'static str, Color) {
        match state {
            PlayState::Idle => ("IDLE", Color::Gray),
            PlayState::Running => ("RUNNING", Color::Green),
            PlayState::Paused => ("PAUSED", Color::Yellow),
            PlayState::Completed => ("COMPLETED", Color::Cyan),
        }
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &SortApp, frame: &RenderFrame) {
        let (label, color) = state_style(frame.play_state);

        let status_text = Line::from(vec![
            Span::styled(
                format!(" {label} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| Speed {} ", frame.speed)),
            Span::raw(format!("| Seed {} ", app.driver.seed())),
            Span::raw("| "),
            Span::raw(app.status.clone()),
        ]);

        let status_bar = Paragraph::new(status_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(status_bar, area);
    }

}
