//! File associations: ordered `[[assoc]]` rules mapping a path pattern to the program that
//! opens matching files.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct AssocRule {
    pattern: String,
    program: String,
}

impl AssocRule {
    pub fn new(pattern: &str, program: &str) -> Self {
        AssocRule {
            pattern: pattern.to_string(),
            program: program.to_string(),
        }
    }

    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Built-in rules, most specific first. The trailing `.` catches everything else.
pub(crate) fn default_rules() -> Vec<AssocRule> {
    vec![
        AssocRule::new(r"\.(avi|mp4|mkv|mp3|ogg|flac|mov)$", "mpv"),
        AssocRule::new(r"\.(png|jpg|gif)$", "sxiv"),
        AssocRule::new(r"\.(html|svg)$", "firefox"),
        AssocRule::new(r"\.pdf$", "mupdf"),
        AssocRule::new(r"\.sh$", "sh"),
        AssocRule::new(".", "less"),
    ]
}
