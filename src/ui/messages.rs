//! Console messages: an icon, a colour and the text.
//! Errors go to stderr, everything else to stdout.

use ansi_term::{Colour, Style};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn icon(&self) -> &'static str {
        match self {
            Tone::Info => "ℹ️",
            Tone::Success => "✅",
            Tone::Warning => "⚠️",
            Tone::Error => "❌",
        }
    }

    fn style(&self) -> Style {
        let colour = match self {
            Tone::Info => Colour::Blue,
            Tone::Success => Colour::Green,
            Tone::Warning => Colour::Yellow,
            Tone::Error => Colour::Red,
        };
        colour.bold()
    }
}

pub fn say<T: fmt::Display>(tone: Tone, msg: T) {
    let line = format!("{} {}", tone.style().paint(tone.icon()), msg);
    if tone == Tone::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    say(Tone::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    say(Tone::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    say(Tone::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    say(Tone::Error, msg);
}

/// Section header, e.g. above a segment listing.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Colour::Blue.bold().paint(format!("=== {msg} ===")));
}
