//! chordline - A terminal chord player.
//!
//! Type chord names and hear them: notes are parsed from a small notation
//! (`C maj, D min7.A5`), synthesized as arpeggiated sine tones, and played
//! through the default audio device one chord at a time.
//!
//! # Usage
//!
//! ```bash
//! cargo run                    # Play through the default audio device
//! cargo run -- --mute          # No audio device, pace chords in real time
//! cargo run -- --wav wave.wav  # Also write each chord to a WAV file
//! ```
//!
//! Type `h` or press F1 for help.

use chordline::app::{App, InputMode};
use chordline::audio::{AudioEngine, Playback, Synthesizer, DEFAULT_VOLUME};
use chordline::notation::IntroCycle;
use chordline::session::Session;
use chordline::settings::{PlaybackSettings, SettingsUpdate};
use chordline::ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Lines moved per PageUp/PageDown in the log.
const LOG_PAGE: usize = 10;

/// Command-line options for the application.
struct CliOptions {
    /// Skip the audio device and pace chords by sleeping.
    mute: bool,
    /// Write each chord to this WAV file.
    wav: Option<PathBuf>,
    /// Output gain in 0..=1.
    volume: f64,
    /// Initial chord duration, validated like a settings answer.
    duration: String,
    /// Initial arpeggio delay, validated like a settings answer.
    arpeggio: String,
    /// Initial intro chord quality.
    intro: String,
    /// Fixed intro start instead of a random one.
    seed: Option<u64>,
    /// Do not play the intro chord at startup.
    no_intro: bool,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `--mute` or `-m`: No audio device
    /// - `--wav <path>` or `-w <path>`: Write each chord to a WAV file
    /// - `--volume <gain>`: Output gain between 0 and 1
    /// - `--duration <secs>`, `--arpeggio <secs>`, `--intro <quality>`: Initial settings
    /// - `--seed <n>`: Fixed intro start
    /// - `--no-intro`: Skip the startup intro chord
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut options = Self {
            mute: false,
            wav: None,
            volume: DEFAULT_VOLUME,
            duration: String::new(),
            arpeggio: String::new(),
            intro: String::new(),
            seed: None,
            no_intro: false,
        };
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--mute" | "-m" => options.mute = true,
                "--no-intro" => options.no_intro = true,
                "--wav" | "-w" => options.wav = Some(PathBuf::from(next_value(&args, &mut i))),
                "--duration" => options.duration = next_value(&args, &mut i),
                "--arpeggio" => options.arpeggio = next_value(&args, &mut i),
                "--intro" => options.intro = next_value(&args, &mut i),
                "--volume" => {
                    let text = next_value(&args, &mut i);
                    options.volume = match text.parse::<f64>() {
                        Ok(gain) if (0.0..=1.0).contains(&gain) => gain,
                        _ => fail(&format!("--volume must be between 0 and 1, got '{}'", text)),
                    };
                }
                "--seed" => {
                    let text = next_value(&args, &mut i);
                    options.seed = match text.parse::<u64>() {
                        Ok(seed) => Some(seed),
                        Err(_) => fail(&format!("--seed must be a whole number, got '{}'", text)),
                    };
                }
                "--help" | "-h" => {
                    print_help(args.first().map(String::as_str).unwrap_or("chordline"));
                    std::process::exit(0);
                }
                other => fail(&format!("Unknown option: {}", other)),
            }
            i += 1;
        }

        Ok(options)
    }

    /// Initial settings from the command line, checked like a settings answer.
    fn settings(&self) -> Result<PlaybackSettings> {
        let update = SettingsUpdate::from_fields(&self.duration, &self.arpeggio, &self.intro)
            .context("Invalid settings on the command line")?;
        let mut settings = PlaybackSettings::default();
        settings.apply(&update);
        Ok(settings)
    }
}

/// Returns the argument after the flag at `i`, advancing `i`.
fn next_value(args: &[String], i: &mut usize) -> String {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => fail(&format!("{} requires a value", flag)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("Use --help for usage information");
    std::process::exit(1);
}

fn print_help(program: &str) {
    eprintln!("chordline - Terminal chord player");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mute            Do not open an audio device; pace chords in real time");
    eprintln!("  -w, --wav PATH        Write each chord to a WAV file (overwritten per chord)");
    eprintln!("      --volume GAIN     Output gain between 0 and 1 (default {})", DEFAULT_VOLUME);
    eprintln!("      --duration SECS   Chord duration in seconds");
    eprintln!("      --arpeggio SECS   Gap between note onsets in seconds (0 for none)");
    eprintln!("      --intro QUALITY   Chord type for the intro (default min7no5add2)");
    eprintln!("      --seed N          Fixed start for the intro cycle");
    eprintln!("      --no-intro        Do not play the intro chord at startup");
    eprintln!("  -h, --help            Print this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to see diagnostics on stderr.");
}

/// Opens the audio device unless muted, falling back to muted playback.
fn open_playback(cli: &CliOptions) -> Playback {
    let playback = if cli.mute {
        Playback::muted()
    } else {
        match AudioEngine::new() {
            Ok(engine) => Playback::device(engine),
            Err(e) => {
                tracing::warn!("No audio output, continuing muted: {:#}", e);
                Playback::muted()
            }
        }
    };

    match &cli.wav {
        Some(path) => playback.with_wav(path),
        None => playback,
    }
}

/// Main entry point.
fn main() -> Result<()> {
    // Parse CLI options first (before any terminal setup)
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings()?;
    let intro = match cli.seed {
        Some(seed) => IntroCycle::new(&mut StdRng::seed_from_u64(seed)),
        None => IntroCycle::new(&mut rand::thread_rng()),
    };
    let session = Session::new(settings, intro, Synthesizer::new(cli.volume));
    let playback = open_playback(&cli);

    let mut app = App::new(session, playback);
    if !cli.no_intro {
        app.queue_intro();
    }

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
///
/// Queued chords are worked off one step per frame so the log shows each
/// chord before it sounds. Keys typed during playback are read between chords.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_status();

        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = if app.has_pending_work() {
            app.step();
            Duration::ZERO
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press && handle_key(app, key.code, key.modifiers)? {
                    return Ok(());
                }
            }
        }
    }
}

/// Handles a key press.
///
/// # Returns
///
/// `true` if the application should quit
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    // Global key bindings
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::F(1) => {
            app.show_help = !app.show_help;
            app.help_scroll = 0;
            return Ok(false);
        }
        _ => {}
    }

    if app.show_help {
        match code {
            KeyCode::Esc => app.cancel(),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            _ => {}
        }
        return Ok(false);
    }

    if app.mode == InputMode::Settings {
        handle_settings_dialog(app, code);
        return Ok(false);
    }

    match code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::PageUp => app.scroll_log_up(LOG_PAGE),
        KeyCode::PageDown => app.scroll_log_down(LOG_PAGE),
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }

    Ok(app.should_quit)
}

/// Handles keys while the settings dialog is open.
fn handle_settings_dialog(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.cancel(),
        KeyCode::Tab | KeyCode::Down => app.settings_dialog.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.settings_dialog.focus_prev(),
        KeyCode::Backspace => app.settings_dialog.pop_char(),
        KeyCode::Char(c) => app.settings_dialog.push_char(c),
        _ => {}
    }
}
