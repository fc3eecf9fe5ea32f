//! Terminal logging helpers.

use std::io::{stderr, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences `info` and `warn` messages. Errors are always printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn info(msg: impl AsRef<str>) {
    if !QUIET.load(Ordering::Relaxed) {
        log_message("INFO", termion::color::LightBlack, msg.as_ref());
    }
}

pub fn warn(msg: impl AsRef<str>) {
    if !QUIET.load(Ordering::Relaxed) {
        log_message("WARN", termion::color::LightYellow, msg.as_ref());
    }
}

pub fn error(msg: impl AsRef<str>) {
    log_message("ERROR", termion::color::LightRed, msg.as_ref());
}

fn log_message(label: &'static str, color: impl termion::color::Color, msg: &str) {
    let err = stderr();
    let res = if termion::is_tty(&err) {
        let color = termion::color::Fg(color);
        let reset = termion::style::Reset;
        writeln!(err.lock(), "{color}[{label}] {reset}{msg}")
    } else {
        writeln!(err.lock(), "[{label}] {msg}")
    };
    let _ = res;
}
