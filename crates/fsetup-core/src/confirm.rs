use std::io::{BufRead, IsTerminal, Write};

/// Yes/no confirmation capability. The synchronizer and the doctor stage
/// ask before destructive or interactive follow-ups; injecting the
/// implementation keeps those decision points testable.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Prompts on the controlling terminal. When stdin is not a terminal the
/// answer is an implicit "no": automated runs must never hang on a prompt
/// and must never hard-reset without a human saying so.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return false;
        }
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "YES")
    }
}

/// Always answers "no". Used for dry runs and in tests.
pub struct DenyAll;

impl Confirm for DenyAll {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_all_refuses() {
        assert!(!DenyAll.confirm("discard local history?"));
    }
}
