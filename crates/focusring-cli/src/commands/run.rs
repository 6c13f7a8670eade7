//! Interactive terminal countdown.
//!
//! All timer state lives in the [`TimerEngine`]; this module owns the
//! periodic tick registration and the keyboard loop, and renders engine
//! events as a single redrawn status line, a terminal-title update, and
//! a bell on completion.

use std::io::{self, Write};
use std::time::Duration;

use clap::Args;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType, SetTitle};
use focusring_core::{chime, display, Config, Event, Mode, TimerEngine};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Args)]
pub struct RunArgs {
    /// Work duration in minutes (1-90), overrides config
    #[arg(long)]
    work: Option<i64>,
    /// Break duration in minutes (1-30), overrides config
    #[arg(long = "break")]
    break_minutes: Option<i64>,
    /// Start counting down immediately
    #[arg(long)]
    autostart: bool,
    /// Never ring the terminal bell
    #[arg(long)]
    mute: bool,
}

enum Msg {
    Tick,
    Key(KeyEvent),
    InputClosed,
}

/// The one-second periodic registration.
///
/// At most one task is ever live: `start` is a no-op while a handle is
/// held, and `cancel` aborts and clears it. A fresh registration is
/// created on every idle-to-running transition.
struct Ticker {
    tx: mpsc::UnboundedSender<Msg>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn new(tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { tx, handle: None }
    }

    fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // A tokio interval fires its first tick immediately; swallow
            // it so the countdown moves one second per elapsed second.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Msg::Tick).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Re-enables the cooked terminal even on an error path.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

enum Command {
    Toggle,
    Reset,
    Skip,
    Switch(Mode),
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(Command::Toggle),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('s') => Some(Command::Skip),
        KeyCode::Char('w') => Some(Command::Switch(Mode::Work)),
        KeyCode::Char('b') => Some(Command::Switch(Mode::Break)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = TimerEngine::new(config.durations());
    if let Some(minutes) = args.work {
        engine.update_duration(Mode::Work, Some(minutes));
    }
    if let Some(minutes) = args.break_minutes {
        engine.update_duration(Mode::Break, Some(minutes));
    }
    let bell = config.notifications.enabled && !args.mute;

    println!("space start/pause | r reset | s skip | w/b mode | q quit");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let guard = RawModeGuard::enable()?;
    let result = runtime.block_on(event_loop(&mut engine, args.autostart, bell));
    drop(guard);
    println!();
    result
}

async fn event_loop(
    engine: &mut TimerEngine,
    autostart: bool,
    bell: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = Ticker::new(tx.clone());
    spawn_input_reader(tx);

    let snapshot = serde_json::to_string(&engine.snapshot())?;
    tracing::debug!(%snapshot, "session start");

    let mut out = io::stdout();
    if autostart {
        engine.start();
    }
    sync_ticker(&mut ticker, engine);
    render(&mut out, engine)?;

    while let Some(msg) = rx.recv().await {
        let events: Vec<Event> = match msg {
            Msg::Tick => engine.tick(),
            Msg::Key(key) => match command_for(key) {
                Some(Command::Toggle) => engine.toggle().into_iter().collect(),
                Some(Command::Reset) => vec![engine.reset()],
                Some(Command::Skip) => vec![engine.skip()],
                Some(Command::Switch(mode)) => vec![engine.switch_mode(mode)],
                Some(Command::Quit) => break,
                None => Vec::new(),
            },
            Msg::InputClosed => break,
        };

        for event in &events {
            tracing::debug!(event = ?event, "engine event");
            if bell {
                if let Event::TimerCompleted { .. } = event {
                    ring_bell(&mut out)?;
                }
            }
        }
        sync_ticker(&mut ticker, engine);
        if !events.is_empty() {
            render(&mut out, engine)?;
        }
    }
    Ok(())
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<Msg>) {
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(TermEvent::Key(key)) => {
                if tx.send(Msg::Key(key)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => {
                let _ = tx.send(Msg::InputClosed);
                break;
            }
        }
    });
}

/// Keep the periodic registration aligned with the engine's running flag.
fn sync_ticker(ticker: &mut Ticker, engine: &TimerEngine) {
    if engine.running() {
        ticker.start();
    } else {
        ticker.cancel();
    }
}

fn render(out: &mut impl Write, engine: &TimerEngine) -> io::Result<()> {
    let remaining = engine.remaining_seconds();
    let fraction = engine.fraction_elapsed();
    let dots = "●".repeat(display::session_dot_count(engine.sessions_completed()) as usize);

    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetTitle(display::window_title(remaining)),
    )?;
    write!(
        out,
        "[{}] {} {} {:>3.0}% | sessions: {} {}",
        engine.mode(),
        display::format_mm_ss(remaining),
        progress_bar(fraction, 24),
        fraction * 100.0,
        engine.sessions_completed(),
        dots,
    )?;
    if !engine.running() {
        write!(out, " (paused)")?;
    }
    out.flush()
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction * width as f64) as usize;
    let empty = width.saturating_sub(filled.min(width));
    format!("[{}{}]", "█".repeat(filled.min(width)), "░".repeat(empty))
}

/// Terminals have no oscillators; ring the bell once per chime tone.
fn ring_bell(out: &mut impl Write) -> io::Result<()> {
    for _ in chime::TONES {
        write!(out, "\x07")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_fills_with_fraction() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(1.0, 4), "[████]");
        // Out-of-range input stays inside the bar.
        assert_eq!(progress_bar(1.5, 4), "[████]");
    }

    #[test]
    fn space_toggles_and_inputs_do_not_quit() {
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(matches!(command_for(space), Some(Command::Toggle)));
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(command_for(other).is_none());
    }

    #[test]
    fn ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(command_for(ctrl_c), Some(Command::Quit)));
    }
}
