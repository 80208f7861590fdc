mod renderer;
mod session;

pub use renderer::{Renderer, TerminalRenderer};
pub use session::MazeSession;

use std::{
    collections::VecDeque,
    io::{Stdout, Write},
    sync::mpsc::Receiver,
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{config::Config, generators::Generator, maze::Glyphs, solvers::Solver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Generate(Generator),
    Solve(Solver),
    FastMode,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        MenuItem::Generate(Generator::RecurBacktrack),
        MenuItem::Generate(Generator::Prim),
        MenuItem::Generate(Generator::Kruskal),
        MenuItem::Solve(Solver::Dfs),
        MenuItem::Solve(Solver::Bfs),
        MenuItem::FastMode,
        MenuItem::Quit,
    ];

    fn shortcut(&self) -> char {
        match self {
            MenuItem::Generate(Generator::RecurBacktrack) => '1',
            MenuItem::Generate(Generator::Prim) => '2',
            MenuItem::Generate(Generator::Kruskal) => '3',
            MenuItem::Solve(Solver::Dfs) => 'd',
            MenuItem::Solve(Solver::Bfs) => 'b',
            MenuItem::FastMode => 'f',
            MenuItem::Quit => 'q',
        }
    }

    /// Second line shown under the menu for the highlighted item.
    fn description(&self, fast_mode: bool) -> String {
        match self {
            MenuItem::Generate(generator) => format!("Generate a maze using {}", generator),
            MenuItem::Solve(solver) => format!("Solve the maze using {}", solver),
            MenuItem::FastMode if fast_mode => "Fast mode is ON".to_string(),
            MenuItem::FastMode => "Fast mode is OFF".to_string(),
            MenuItem::Quit => "Press to exit".to_string(),
        }
    }
}

impl std::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuItem::Generate(generator) => write!(f, "{}", generator.short_name()),
            MenuItem::Solve(solver) => write!(f, "Solve Maze ({})", solver.short_name()),
            MenuItem::FastMode => write!(f, "Fast Mode"),
            MenuItem::Quit => write!(f, "Quit"),
        }
    }
}

/// Screen split: the maze on the left, the menu and the log stacked on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    maze_width: u16,
    height: u16,
    panel_x: u16,
    panel_width: u16,
}

impl Layout {
    const MENU_TITLE_ROW: u16 = 0;
    const DESCRIPTION_ROW: u16 = Layout::MENU_TITLE_ROW + 1 + MenuItem::ALL.len() as u16;
    const LOG_TITLE_ROW: u16 = Layout::DESCRIPTION_ROW + 2;

    fn new(term_width: u16, term_height: u16) -> Self {
        let maze_width = term_width / 10 * 7;
        let panel_x = maze_width + 1;
        Self {
            maze_width,
            height: term_height,
            panel_x,
            panel_width: term_width.saturating_sub(panel_x),
        }
    }

    /// Display size for a new maze that fills the maze area, as (rows, cell columns).
    fn maze_dimensions(&self) -> (usize, usize) {
        (
            self.height as usize,
            self.maze_width as usize / Glyphs::CELL_WIDTH,
        )
    }

    fn log_rows(&self) -> usize {
        self.height.saturating_sub(Layout::LOG_TITLE_ROW + 1) as usize
    }
}

pub struct App {
    /// Delay between two streamed snapshots
    frame_time: Duration,
    /// Index of the highlighted menu item
    selected: usize,
    /// Messages shown in the log panel, oldest first
    log: VecDeque<String>,
    /// Solver progress messages waiting to be shown
    solve_log: Receiver<String>,
}

impl App {
    /// Messages kept for the log panel
    const MAX_LOG_LINES: usize = 200;

    /// `solve_log` receives the messages a [`PanelLogger`](crate::logging::PanelLogger) sends.
    pub fn new(config: &Config, solve_log: Receiver<String>) -> Self {
        Self {
            frame_time: config.frame_time,
            selected: 0,
            log: VecDeque::new(),
            solve_log,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in the solver worker
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop. Returns when the user picks Quit or presses Esc.
    pub fn run(&mut self, stdout: &mut Stdout, session: &mut MazeSession) -> std::io::Result<()> {
        let mut renderer = TerminalRenderer::new(std::io::stdout());
        let frame_time = self.frame_time;
        self.push_log("Pick a generator to draw a maze".to_string());

        loop {
            let (term_width, term_height) = terminal::size()?;
            let layout = Layout::new(term_width, term_height);
            renderer.set_area(layout.maze_width, layout.height);
            renderer.render(session.text())?;
            self.draw_panel(stdout, &layout, session.fast_mode())?;

            let Some(item) = self.read_menu_choice(stdout)? else {
                continue;
            };

            match item {
                MenuItem::Quit => return Ok(()),
                MenuItem::Generate(generator) => {
                    let (rows, cols) = layout.maze_dimensions();
                    self.push_log(format!(
                        "Generating maze using {} of size {}x{}",
                        generator.short_name(),
                        cols,
                        rows
                    ));
                    if let Err(e) = session.generate(rows, cols, generator) {
                        self.push_log(e.to_string());
                    }
                }
                MenuItem::Solve(solver) => {
                    self.push_log(format!("Solving maze using {}...", solver.short_name()));
                    let fast_mode = session.fast_mode();
                    let mut draw_error = None;
                    let result = session
                        .solve(solver, |snapshot| {
                            if draw_error.is_some() {
                                return;
                            }
                            self.drain_solve_log();
                            let drawn = renderer
                                .render(snapshot)
                                .and_then(|()| self.draw_panel(stdout, &layout, fast_mode));
                            match drawn {
                                Ok(()) => std::thread::sleep(frame_time),
                                Err(e) => draw_error = Some(e),
                            }
                        })
                        .map(|_| ());
                    self.drain_solve_log();
                    if let Some(e) = draw_error {
                        return Err(e);
                    }
                    match result {
                        Ok(()) => self.push_log("Maze solved".to_string()),
                        Err(e) => self.push_log(e.to_string()),
                    }
                }
                MenuItem::FastMode => match session.toggle_fast_mode() {
                    Ok(fast_mode) => self.push_log(format!("Fast mode is turned {}", fast_mode)),
                    Err(e) => self.push_log(e.to_string()),
                },
            }
        }
    }

    /// Waits for one key press and moves the selection.
    /// Returns the item to run, or `None` if the key only moved the selection or was ignored.
    fn read_menu_choice(&mut self, stdout: &mut Stdout) -> std::io::Result<Option<MenuItem>> {
        let len = MenuItem::ALL.len();
        let code = match event::read()? {
            event::Event::Key(event::KeyEvent { code, kind, .. })
                if kind == event::KeyEventKind::Press =>
            {
                code
            }
            event::Event::Resize(..) => {
                stdout.queue(terminal::Clear(ClearType::All))?;
                return Ok(None);
            }
            _ => return Ok(None),
        };

        let item = match code {
            KeyCode::Up => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % len;
                None
            }
            KeyCode::Enter => Some(MenuItem::ALL[self.selected]),
            KeyCode::Esc => Some(MenuItem::Quit),
            KeyCode::Char(c) => MenuItem::ALL
                .iter()
                .position(|item| item.shortcut() == c.to_ascii_lowercase())
                .map(|index| {
                    self.selected = index;
                    MenuItem::ALL[index]
                }),
            _ => None,
        };
        Ok(item)
    }

    fn push_log(&mut self, message: String) {
        tracing::info!("[app] {}", message);
        self.append_log(message);
    }

    fn append_log(&mut self, message: String) {
        if self.log.len() == App::MAX_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(message);
    }

    /// Moves pending solver messages into the log panel. They already went to tracing.
    fn drain_solve_log(&mut self) {
        while let Ok(message) = self.solve_log.try_recv() {
            self.append_log(message);
        }
    }

    /// Draws the menu and the most recent log lines to the right of the maze.
    fn draw_panel(
        &self,
        stdout: &mut Stdout,
        layout: &Layout,
        fast_mode: bool,
    ) -> std::io::Result<()> {
        let width = layout.panel_width as usize;
        let fit = |text: &str| {
            let (text, text_width) = text.unicode_truncate(width);
            format!("{}{}", text, " ".repeat(width - text_width))
        };
        let x = layout.panel_x;

        queue!(
            stdout,
            cursor::MoveTo(x, Layout::MENU_TITLE_ROW),
            style::PrintStyledContent(
                fit("Select Algorithm")
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            )
        )?;
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let line = fit(&format!("({}) {}", item.shortcut(), item));
            stdout.queue(cursor::MoveTo(x, Layout::MENU_TITLE_ROW + 1 + i as u16))?;
            if i == self.selected {
                stdout.queue(style::PrintStyledContent(line.reverse()))?;
            } else {
                stdout.queue(style::Print(line))?;
            }
        }
        let description = MenuItem::ALL[self.selected].description(fast_mode);
        queue!(
            stdout,
            cursor::MoveTo(x, Layout::DESCRIPTION_ROW),
            style::PrintStyledContent(fit(&description).with(Color::DarkGrey)),
            cursor::MoveTo(x, Layout::LOG_TITLE_ROW),
            style::PrintStyledContent(fit("Log").with(Color::Yellow).attribute(Attribute::Bold))
        )?;

        let rows = layout.log_rows();
        let skip = self.log.len().saturating_sub(rows);
        for (i, line) in self.log.iter().skip(skip).enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(x, Layout::LOG_TITLE_ROW + 1 + i as u16),
                style::Print(fit(line))
            )?;
        }
        stdout.flush()
    }
}
