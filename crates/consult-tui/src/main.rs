mod app;
mod toast;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use consult_config::DispatchMode;
use consult_core::Dispatcher;
use consult_mail::MailHandler;

use crate::app::App;

#[derive(Debug, Parser)]
#[command(name = "consult-tui", version, about = "consultation request form")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = consult_config::load(args.config).context("load configuration")?;
    let settings = config.form_settings().context("read form settings")?;

    // The thank-you panel shows the link, so print mode writes nowhere.
    let handler = match config.dispatch.mode {
        DispatchMode::Open => MailHandler::system(),
        DispatchMode::Print => MailHandler::print_to(Box::new(io::sink())),
    };

    let mut app = App::new(settings, config.contact, handler);
    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &mut app)
}

fn run_app<D: Dispatcher>(terminal: &mut TerminalGuard, app: &mut App<D>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        app.tick(Instant::now());
        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
