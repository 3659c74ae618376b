// src/services/scene_script.rs
//! Manim scene script generation.
//!
//! The prompt is the only variable part of the script. It is embedded as a
//! double-quoted Python string literal that decodes back to the exact prompt.

use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// Scene class declared by the template and passed to the renderer.
pub const SCENE_NAME: &str = "GeneratedScene";
pub const BASE_NAME_PREFIX: &str = "scene_";
pub const VIDEO_EXTENSION: &str = "mp4";
pub const SCRIPT_SUFFIX: &str = ".py";

/// Base name for a render started at `at`, e.g. `scene_20240131_235959_123456`.
///
/// Microsecond resolution only. Two requests landing in the same microsecond
/// get the same name.
pub fn base_name_at(at: DateTime<Local>) -> String {
    format!("{}{}", BASE_NAME_PREFIX, at.format("%Y%m%d_%H%M%S_%6f"))
}

pub fn base_name_now() -> String {
    base_name_at(Local::now())
}

pub fn video_file_name(base_name: &str) -> String {
    format!("{}.{}", base_name, VIDEO_EXTENSION)
}

/// Encode `text` as an ASCII-only, double-quoted Python string literal.
pub fn python_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(ch),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) <= 0xFFFF => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Full scene script for `prompt`.
pub fn render_script(prompt: &str) -> String {
    let literal = python_string_literal(prompt);
    format!(
        r#"
from manim import *

class {scene}(Scene):
    def construct(self):
        text = Text({literal}, font_size=48)
        self.play(Write(text))
        self.wait(2)
"#,
        scene = SCENE_NAME,
        literal = literal,
    )
}
