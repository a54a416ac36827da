use std::io::{self, BufRead, Write};

use medstore_app::notify::Confirm;

/// Asks on the terminal; anything but `y` or `yes` declines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");

        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();

        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
