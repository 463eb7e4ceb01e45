use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// JSON in `--json` mode, otherwise whatever `human` writes.
pub fn emit<T, F>(value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&mut StandardStream) -> io::Result<()>,
{
    if is_json() {
        return print(value);
    }
    let mut out = stdout();
    human(&mut out)?;
    out.flush()?;
    Ok(())
}

/// `PASS msg` in green or `FAIL msg` in red.
pub fn status_line(out: &mut StandardStream, ok: bool, msg: &str) -> io::Result<()> {
    let (tag, color) = if ok { ("PASS", Color::Green) } else { ("FAIL", Color::Red) };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{tag}")?;
    out.reset()?;
    writeln!(out, " {msg}")
}

pub fn warn_line(out: &mut StandardStream, msg: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(out, "warning:")?;
    out.reset()?;
    writeln!(out, " {msg}")
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
