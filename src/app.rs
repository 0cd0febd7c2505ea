//! Application state and command handling.
//!
//! This module defines the application state that sits between the
//! terminal interface and the chord session. Typed lines become a queue of
//! jobs; each chord job is rendered, shown, then played to completion before
//! the next one starts.

use crate::audio::{PcmBuffer, Playback};
use crate::notation::{catalogue, parse_line, Chord, ChordQuality, ParseError, CHORD_UNAVAILABLE};
use crate::session::Session;
use crate::settings::SettingsUpdate;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_TIMEOUT_SECS: u64 = 4;

/// Oldest log lines are dropped past this count.
const MAX_LOG_LINES: usize = 1000;

/// Prompt shown while waiting for chord notation or a command.
pub const CHORD_PROMPT: &str = "What note(s) or chord(s) would you like to play?";

/// Prompt shown after `play cat`.
pub const ROOT_PROMPT: &str = "Set root note:";

/// Prompt shown after `r`.
pub const REPEAT_PROMPT: &str = "How many times would you like to hear the intro?";

/// Labels for the three settings dialog fields, in field order.
pub const SETTINGS_FIELD_LABELS: [&str; 3] = [
    "New chord duration (seconds)",
    "New arpeggio duration (seconds) (0 for none)",
    "Intro chord",
];

/// One line in the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// Plain text.
    Info(String),
    /// Emphasised text (welcome banner, section titles).
    Heading(String),
    /// Bar number announced before a chord.
    Bar(u32),
    /// The chord about to sound.
    Playing(String),
    /// A chord expression that could not be resolved.
    Unavailable { text: String, reason: String },
    /// A failure outside the notation (playback, file output).
    Error(String),
}

/// What the prompt line is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Chord notation or a command.
    #[default]
    Command,
    /// Root note for playing the whole catalogue.
    RootNote,
    /// Number of intro repetitions.
    RepeatCount,
    /// The settings dialog has focus.
    Settings,
}

/// State for the settings dialog.
#[derive(Debug, Clone, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open.
    pub open: bool,
    /// Raw answers for duration, arpeggio delay and intro chord.
    pub fields: [String; 3],
    /// Index of the field being edited.
    pub focused: usize,
    /// Validation error from the last submit attempt.
    pub error: Option<String>,
}

impl SettingsDialogState {
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    pub fn push_char(&mut self, c: char) {
        self.fields[self.focused].push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.fields[self.focused].pop();
        self.error = None;
    }
}

/// Work queued by a submitted line.
#[derive(Debug, Clone)]
enum Job {
    /// Start bar numbering over.
    BeginLine,
    /// Render and play a resolved chord.
    Chord(Chord),
    /// Report a chord expression that failed to resolve.
    Unavailable { text: String, error: ParseError },
    /// Render and play the next intro chord, optionally numbered.
    Intro { bar: Option<u32> },
    /// Play bar `next` of `total` numbered intro chords, then queue the rest.
    IntroRepeat { next: u32, total: u32 },
}

/// A rendered chord waiting to be played.
#[derive(Debug, Clone)]
pub struct Cue {
    pub label: String,
    /// Note names in arrival order, e.g. `C4 E4 G4`.
    pub notes: String,
    pub buffer: PcmBuffer,
}

/// Main application state.
pub struct App {
    /// Settings, intro state and bar counter.
    pub session: Session,
    /// Where rendered chords go.
    playback: Playback,
    /// Text typed at the prompt.
    pub input: String,
    /// What the prompt is collecting.
    pub mode: InputMode,
    /// Settings dialog state.
    pub settings_dialog: SettingsDialogState,
    /// Output log, oldest first.
    pub log: Vec<LogLine>,
    /// Lines scrolled back from the bottom of the log.
    pub log_scroll: usize,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Help overlay scroll offset.
    pub help_scroll: u16,
    /// Transient status message and when it was set.
    pub status_message: Option<(String, Instant)>,
    /// Set by the quit command.
    pub should_quit: bool,
    jobs: VecDeque<Job>,
    cue: Option<Cue>,
}

impl App {
    /// Creates the app and prints the welcome text.
    pub fn new(session: Session, playback: Playback) -> Self {
        let mut app = Self {
            session,
            playback,
            input: String::new(),
            mode: InputMode::Command,
            settings_dialog: SettingsDialogState::default(),
            log: Vec::new(),
            log_scroll: 0,
            show_help: false,
            help_scroll: 0,
            status_message: None,
            should_quit: false,
            jobs: VecDeque::new(),
            cue: None,
        };
        app.log_welcome();
        app
    }

    fn log_welcome(&mut self) {
        self.push_log(LogLine::Heading("Welcome to chordline!".to_string()));
        self.push_log(LogLine::Info(
            "Type 'q' to quit, 's' to change settings, 'cat' for chord catalogue, \
             or 'r' to repeat intro in cycle of 4ths :)"
                .to_string(),
        ));
        self.push_log(LogLine::Info(
            "Want to hear all the chord types? Type 'play cat'".to_string(),
        ));
        self.push_log(LogLine::Info("Need help? Type 'h' or press F1".to_string()));
    }

    /// Appends a line to the log and scrolls back to the bottom.
    pub fn push_log(&mut self, line: LogLine) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
        self.log_scroll = 0;
    }

    pub fn scroll_log_up(&mut self, lines: usize) {
        self.log_scroll = (self.log_scroll + lines).min(self.log.len().saturating_sub(1));
    }

    pub fn scroll_log_down(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }

    /// Sets a status message that expires after a few seconds.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears the status message once it has expired.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > Duration::from_secs(STATUS_TIMEOUT_SECS) {
                self.status_message = None;
            }
        }
    }

    /// The question shown above the input line.
    pub fn prompt(&self) -> &'static str {
        match self.mode {
            InputMode::Command | InputMode::Settings => CHORD_PROMPT,
            InputMode::RootNote => ROOT_PROMPT,
            InputMode::RepeatCount => REPEAT_PROMPT,
        }
    }

    /// Short description of where audio goes, for the transport bar.
    pub fn output_label(&self) -> String {
        let device = if self.playback.is_audible() {
            "speakers"
        } else {
            "muted"
        };
        match self.playback.wav_path() {
            Some(path) => format!("{} + {}", device, path.display()),
            None => device.to_string(),
        }
    }

    /// Label of the chord that is rendered and about to play, if any.
    pub fn now_playing(&self) -> Option<&str> {
        self.cue.as_ref().map(|cue| cue.label.as_str())
    }

    /// Note names of the chord about to play, if any.
    pub fn now_playing_notes(&self) -> Option<&str> {
        self.cue.as_ref().map(|cue| cue.notes.as_str())
    }

    // ========== INPUT ==========

    /// Submits the prompt line according to the current input mode.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        match self.mode {
            InputMode::Command => self.run_command(&line),
            InputMode::RootNote => {
                self.mode = InputMode::Command;
                self.queue_catalogue(&line);
            }
            InputMode::RepeatCount => {
                self.mode = InputMode::Command;
                self.queue_intro_repeats(&line);
            }
            InputMode::Settings => self.submit_settings(),
        }
    }

    /// Cancels the open dialog, prompt or help overlay.
    pub fn cancel(&mut self) {
        if self.show_help {
            self.show_help = false;
            self.help_scroll = 0;
            return;
        }
        match self.mode {
            InputMode::Command => self.input.clear(),
            InputMode::Settings => {
                self.settings_dialog = SettingsDialogState::default();
                self.mode = InputMode::Command;
                self.set_status("Settings unchanged");
            }
            InputMode::RootNote | InputMode::RepeatCount => {
                self.input.clear();
                self.mode = InputMode::Command;
            }
        }
    }

    /// Runs a command or queues a line of chord notation.
    pub fn run_command(&mut self, line: &str) {
        match line.trim() {
            "" => {}
            "q" => self.should_quit = true,
            "s" => self.open_settings(),
            "cat" => self.list_catalogue(),
            "play cat" => self.mode = InputMode::RootNote,
            "r" => self.mode = InputMode::RepeatCount,
            "h" => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            text => self.queue_line(text),
        }
    }

    /// Queues every comma-separated chord of a line for playback.
    pub fn queue_line(&mut self, line: &str) {
        let groups = parse_line(line);
        if groups.is_empty() {
            return;
        }
        self.jobs.push_back(Job::BeginLine);
        for (text, outcome) in groups {
            let job = match outcome {
                Ok(pitches) => Job::Chord(Chord { text, pitches }),
                Err(error) => Job::Unavailable { text, error },
            };
            self.jobs.push_back(job);
        }
    }

    /// Queues one unnumbered intro chord.
    pub fn queue_intro(&mut self) {
        self.jobs.push_back(Job::Intro { bar: None });
    }

    fn queue_intro_repeats(&mut self, count: &str) {
        match count.trim().parse::<u32>() {
            Ok(0) => {}
            Ok(total) => self.jobs.push_back(Job::IntroRepeat { next: 1, total }),
            Err(_) => self.set_status(format!("'{}' is not a whole number", count.trim())),
        }
    }

    fn queue_catalogue(&mut self, root: &str) {
        match catalogue(root) {
            Ok(chords) => {
                self.jobs.push_back(Job::BeginLine);
                self.jobs.extend(chords.into_iter().map(Job::Chord));
            }
            Err(error) => self.jobs.push_back(Job::Unavailable {
                text: root.trim().to_string(),
                error,
            }),
        }
    }

    fn list_catalogue(&mut self) {
        self.push_log(LogLine::Heading("Chord types".to_string()));
        for quality in ChordQuality::ALL {
            let intervals = quality
                .intervals()
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            self.push_log(LogLine::Info(format!("{:<14} {}", quality.name(), intervals)));
        }
    }

    // ========== SETTINGS DIALOG ==========

    /// Opens the settings dialog with empty answers.
    pub fn open_settings(&mut self) {
        self.settings_dialog = SettingsDialogState {
            open: true,
            ..SettingsDialogState::default()
        };
        self.mode = InputMode::Settings;
    }

    /// Validates and applies the settings dialog answers.
    ///
    /// On error the dialog stays open and nothing changes.
    pub fn submit_settings(&mut self) {
        let [duration, delay, quality] = &self.settings_dialog.fields;
        match SettingsUpdate::from_fields(duration, delay, quality) {
            Ok(update) => {
                self.settings_dialog = SettingsDialogState::default();
                self.mode = InputMode::Command;
                if update.is_empty() {
                    self.set_status("Settings unchanged");
                } else {
                    self.session.update_settings(&update);
                    let settings = *self.session.settings();
                    self.push_log(LogLine::Info(format!(
                        "Chord duration {}s, arpeggio duration {}s, intro chord {}",
                        settings.chord_duration, settings.arpeggio_delay, settings.intro_quality
                    )));
                    self.set_status("Settings updated");
                }
            }
            Err(e) => self.settings_dialog.error = Some(e.to_string()),
        }
    }

    // ========== PLAYBACK QUEUE ==========

    /// Whether queued chords are still waiting to be rendered or played.
    pub fn has_pending_work(&self) -> bool {
        self.cue.is_some() || !self.jobs.is_empty()
    }

    /// Performs the next unit of work.
    ///
    /// Plays the rendered cue if there is one; otherwise takes the next job,
    /// logs it and renders it into a new cue. Callers redraw between steps so
    /// the log shows each chord before it sounds.
    pub fn step(&mut self) {
        if self.cue.is_some() {
            self.play_cue();
        } else if let Some(job) = self.jobs.pop_front() {
            self.start_job(job);
        }
    }

    fn start_job(&mut self, job: Job) {
        match job {
            Job::BeginLine => self.session.begin_line(),
            Job::Chord(chord) => {
                let bar = self.session.next_bar();
                self.push_log(LogLine::Bar(bar));
                self.push_log(LogLine::Playing(chord.text.clone()));
                let buffer = self.session.render(&chord.pitches);
                self.cue = Some(Cue {
                    label: chord.text,
                    notes: chord.pitches.describe(),
                    buffer,
                });
            }
            Job::Unavailable { text, error } => {
                tracing::debug!("chord '{}' unavailable: {}", text, error);
                self.push_log(LogLine::Unavailable {
                    text,
                    reason: error.to_string(),
                });
            }
            Job::IntroRepeat { next, total } => {
                if next < total {
                    self.jobs.push_front(Job::IntroRepeat {
                        next: next + 1,
                        total,
                    });
                }
                self.start_job(Job::Intro { bar: Some(next) });
            }
            Job::Intro { bar } => {
                let intro = self.session.next_intro();
                if let Some(bar) = bar {
                    self.push_log(LogLine::Bar(bar));
                }
                let label = intro.name();
                self.push_log(LogLine::Playing(label.clone()));
                let buffer = self.session.render(&intro.pitches);
                self.cue = Some(Cue {
                    label,
                    notes: intro.pitches.describe(),
                    buffer,
                });
            }
        }
    }

    fn play_cue(&mut self) {
        let Some(cue) = self.cue.take() else {
            return;
        };
        if let Err(e) = self.playback.play(&cue.buffer) {
            tracing::error!("Playback failed: {:#}", e);
            self.push_log(LogLine::Error(format!("Playback failed: {:#}", e)));
            self.set_status("Playback failed");
        }
    }
}

/// Log text for a failed chord expression.
pub fn unavailable_message(text: &str, reason: &str) -> String {
    format!("{} ({}: {})", CHORD_UNAVAILABLE, text, reason)
}
