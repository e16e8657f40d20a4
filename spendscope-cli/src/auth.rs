//! API key lookup. Keys are used for a single run and never written to disk.

use anyhow::Result;
use std::io::{self, IsTerminal, Write};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

fn prompt_secret(label: &str) -> Result<String> {
    // Minimal portable secret prompt: just stdin.
    eprint!("{}: ", label);
    io::stderr().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `--api-key`, then `$OPENAI_API_KEY`, then an interactive prompt when attached to a terminal.
pub fn resolve_api_key(flag: Option<String>) -> Result<Option<String>> {
    if let Some(key) = non_empty(flag).or_else(|| non_empty(std::env::var(API_KEY_ENV).ok())) {
        return Ok(Some(key));
    }
    if !io::stdin().is_terminal() {
        return Ok(None);
    }
    let key = prompt_secret("Enter your OpenAI API key (used for this analysis only)")?;
    Ok(non_empty(Some(key)))
}
