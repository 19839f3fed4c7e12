use std::{
    io::{self, BufRead as _},
    sync::Arc,
    time::Duration,
};
use tokio::sync::Mutex;

use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::ProgressBar;

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Block until the operator acknowledges. `Ok(false)` means "stop here".
///
/// Without a terminal, one line is read from stdin instead (EOF means go on).
pub fn ask_continue() -> io::Result<bool> {
    if !Term::stderr().is_term() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(acknowledged(&line));
    }

    Confirm::with_theme(&theme())
        .with_prompt("Press enter to continue (n to stop)")
        .default(true)
        .show_default(false)
        .wait_for_newline(true)
        .interact()
}

fn acknowledged(line: &str) -> bool {
    !matches!(line.trim().to_ascii_lowercase().as_str(), "n" | "no")
}

pub trait SpinnerExt {
    fn with_ticking(self) -> Arc<Mutex<Self>>;
}

impl SpinnerExt for ProgressBar {
    fn with_ticking(self) -> Arc<Mutex<Self>> {
        let mutex_spinner = Arc::new(Mutex::new(self));
        let spinner = mutex_spinner.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let spinner = spinner.lock().await;
                if spinner.is_finished() {
                    break;
                }
                spinner.tick();
            }
        });
        mutex_spinner
    }
}
