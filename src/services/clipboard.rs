//! Clipboard export — best effort, silent fallback.
//!
//! DESIGN
//! ======
//! Spawns the platform clipboard utility and writes the text to its
//! stdin. Any failure (utility missing, denied, headless session)
//! returns `false` so the caller can leave the text on stdout for manual
//! selection. Copying never errors out of the surrounding action.

use std::io::Write as _;
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const CANDIDATES: &[&[&str]] = &[&["pbcopy"]];

#[cfg(target_os = "windows")]
const CANDIDATES: &[&[&str]] = &[&["clip"]];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// Copy `text` to the system clipboard. Returns `false` when no platform
/// mechanism worked; never errors.
#[must_use]
pub fn copy(text: &str) -> bool {
    CANDIDATES.iter().any(|candidate| run_copy(candidate, text))
}

fn run_copy(argv: &[&str], text: &str) -> bool {
    let Some((program, args)) = argv.split_first() else {
        return false;
    };
    let Ok(mut child) = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return false;
    };

    let wrote = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()).is_ok())
        .unwrap_or(false);
    // Wait regardless of the write result so the child is reaped.
    let succeeded = child.wait().map(|status| status.success()).unwrap_or(false);
    wrote && succeeded
}
