//! 標準入力で y/N を確認するアダプタ

use crate::ports::outbound::ResetConfirmation;
use std::io::{self, BufRead, Write};

/// stderr にプロンプトを出し、stdin から 1 行読む確認実装
#[derive(Debug, Clone, Default)]
pub struct CliResetConfirmation;

impl ResetConfirmation for CliResetConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N]: ", prompt);
        let _ = io::stderr().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        let answer = line.trim();
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }
}
