//! Progress reporting for debate runs

use colored::{ColoredString, Colorize};
use duet_application::ProgressNotifier;
use duet_domain::{RunStatus, Side, SplitResponse, TranscriptEntry};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Marker written before each retry stream.
pub fn retry_marker(attempt: usize, max_retries: usize) -> String {
    format!("[Retry {}/{}: improving response quality]", attempt, max_retries)
}

fn speaker_label(author: &str, side: Option<Side>) -> ColoredString {
    match side {
        Some(Side::Left) => author.blue().bold(),
        Some(Side::Right) => author.magenta().bold(),
        None => author.green().bold(),
    }
}

fn status_line(status: &RunStatus) -> Option<ColoredString> {
    let text = format!("Status: {}", status);
    match status {
        RunStatus::Completed => Some(text.green().bold()),
        RunStatus::Stopped => Some(text.yellow().bold()),
        RunStatus::Errored => Some(text.red().bold()),
        _ => None,
    }
}

/// Speaker whose stream is being printed.
#[derive(Debug, Default)]
struct StreamState {
    author: String,
    side: Option<Side>,
    turn_number: Option<usize>,
    /// Header already printed for the current attempt
    open: bool,
}

/// Streams turns to the terminal with a spinner while a model is thinking
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    stream: Mutex<StreamState>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            stream: Mutex::new(StreamState::default()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, message: String) {
        self.clear_spinner();
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut spinner) = self.spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }

    /// Terminate an open stream line.
    fn close_stream(&self) {
        if let Ok(mut stream) = self.stream.lock()
            && stream.open
        {
            stream.open = false;
            println!();
        }
    }

    fn begin_stream(&self, author: &str, side: Option<Side>, turn_number: Option<usize>) {
        self.close_stream();
        if let Ok(mut stream) = self.stream.lock() {
            *stream = StreamState {
                author: author.to_string(),
                side,
                turn_number,
                open: false,
            };
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_status(&self, status: &RunStatus) {
        match status {
            RunStatus::Evaluating => {
                self.close_stream();
                self.start_spinner("Evaluating outcome".to_string());
            }
            status if status.is_terminal() => {
                self.clear_spinner();
                self.close_stream();
                if let Some(line) = status_line(status) {
                    println!("{}", line);
                }
            }
            _ => {}
        }
    }

    fn on_notice(&self, author: &str, text: &str) {
        self.clear_spinner();
        self.close_stream();
        println!("{} {}", format!("[{}]", author).cyan(), text);
    }

    fn on_turn_start(&self, side: Side, author: &str, turn_number: usize) {
        self.begin_stream(author, Some(side), Some(turn_number));
        self.start_spinner(format!("{} is thinking (turn {})", author, turn_number));
    }

    fn on_stream_update(&self, _author: &str, _accumulated: &str, fragment: &str) {
        let Ok(mut stream) = self.stream.lock() else {
            return;
        };
        if !stream.open {
            self.clear_spinner();
            let turn = stream
                .turn_number
                .map(|n| format!(" (turn {})", n))
                .unwrap_or_default();
            print!(
                "\n{}{}\n",
                speaker_label(&stream.author, stream.side),
                turn.dimmed()
            );
            stream.open = true;
        }
        print!("{}", fragment);
        let _ = std::io::stdout().flush();
    }

    fn on_retry(&self, author: &str, attempt: usize, max_retries: usize, reasons: &[String]) {
        self.close_stream();
        println!(
            "{} {}",
            retry_marker(attempt, max_retries).yellow(),
            reasons.join("; ").dimmed()
        );
        self.start_spinner(format!("{} is revising", author));
    }

    fn on_advisory(&self, _author: &str, warnings: &[String]) {
        self.close_stream();
        for warning in warnings {
            println!("  {} {}", "note:".yellow(), warning.dimmed());
        }
    }

    fn on_turn_complete(&self, _entry: &TranscriptEntry, _total_turns: usize) {
        self.clear_spinner();
        self.close_stream();
    }

    fn on_block_start(&self, turns: usize) {
        self.close_stream();
        println!("{}", format!("-- Next block: {} turns --", turns).dimmed());
    }

    fn on_review_start(&self, reviewer: &str) {
        self.begin_stream(reviewer, None, None);
        self.start_spinner(format!("{} is writing the final review", reviewer));
    }

    fn on_review_complete(&self, _review: &SplitResponse) {
        self.clear_spinner();
        self.close_stream();
    }
}

/// Simple text-based progress (no streaming, no spinners)
///
/// Prints each turn once it is accepted.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_status(&self, status: &RunStatus) {
        if let Some(line) = status_line(status) {
            println!("{}", line);
        }
    }

    fn on_notice(&self, author: &str, text: &str) {
        println!("{} {}", format!("[{}]", author).cyan(), text);
    }

    fn on_retry(&self, author: &str, attempt: usize, max_retries: usize, _reasons: &[String]) {
        println!("{} {}", retry_marker(attempt, max_retries).yellow(), author.dimmed());
    }

    fn on_turn_complete(&self, entry: &TranscriptEntry, total_turns: usize) {
        println!(
            "\n{} {}\n{}",
            entry.author.bold(),
            format!("(turn {})", total_turns).dimmed(),
            entry.text
        );
    }

    fn on_review_complete(&self, review: &SplitResponse) {
        println!("\n{}\n{}", "Final review".green().bold(), review.clean_text);
    }
}
