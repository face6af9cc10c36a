//! Purpose: Decide whether a file is in scope for a rule set by glob-matching its base name.
//! Exports: `FilePatterns`, `should_include_file`, `base_name`.
//! Role: Rule sets declare file patterns once; callers compile them and test many paths.
//! Invariants: Matching uses only the final path component; directories never match.
//! Invariants: Every pattern is compiled before any path is tested; bad syntax is a `Pattern` error.
//! Invariants: An empty pattern list matches nothing.
//! Notes: Patterns use shell syntax: `*`, `?`, `[abc]`, `[a-z]`, `[!abc]` or `[^abc]`, and `\c`
//!        for a literal `c`. They are rewritten into `glob::Pattern` syntax before compiling.

use glob::Pattern;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};

/// A compiled, ordered list of shell-style glob patterns.
#[derive(Clone, Debug, Default)]
pub struct FilePatterns {
    sources: Vec<String>,
    patterns: Vec<Pattern>,
}

impl FilePatterns {
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, Error> {
        let patterns = sources
            .iter()
            .map(|pattern| compile_pattern(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = patterns.len(), "compiled file patterns");
        Ok(Self {
            sources: sources.iter().map(|s| s.as_ref().to_string()).collect(),
            patterns,
        })
    }

    /// True when the base name of `filename` matches any pattern.
    pub fn matches(&self, filename: &str) -> bool {
        let file = base_name(filename);
        self.patterns.iter().any(|pattern| pattern.matches(file))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }
}

/// One-shot form of [`FilePatterns::compile`] followed by [`FilePatterns::matches`].
pub fn should_include_file<S: AsRef<str>>(patterns: &[S], filename: &str) -> Result<bool, Error> {
    Ok(FilePatterns::compile(patterns)?.matches(filename))
}

/// Everything after the last path separator; `""` when `filename` ends with one.
pub fn base_name(filename: &str) -> &str {
    filename
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or(filename)
}

const SYNTAX_HINT: &str = "Supported syntax: *, ?, [abc], [a-z], [!abc], [^abc], \\c.";

fn compile_pattern(pattern: &str) -> Result<Pattern, Error> {
    let translated = translate_pattern(pattern).map_err(|msg| {
        Error::new(ErrorKind::Pattern)
            .with_message(format!("invalid file pattern `{pattern}`"))
            .with_hint(format!("{msg}. {SYNTAX_HINT}"))
    })?;
    Pattern::new(&translated).map_err(|err| {
        Error::new(ErrorKind::Pattern)
            .with_message(format!("invalid file pattern `{pattern}`"))
            .with_hint(format!(
                "{} at position {}. {SYNTAX_HINT}",
                err.msg, err.pos
            ))
            .with_source(err)
    })
}

/// Rewrites shell syntax into `glob::Pattern` syntax.
///
/// `[^` becomes `[!`, escaped metacharacters become one-character classes, and runs
/// of `*` collapse to one (base names hold no separators, so `**` means `*`).
fn translate_pattern(pattern: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars.next().ok_or("trailing backslash")?;
                push_literal(escaped, &mut out);
            }
            '*' => {
                while chars.next_if_eq(&'*').is_some() {}
                out.push('*');
            }
            '[' => {
                out.push('[');
                if chars.next_if(|c| *c == '^' || *c == '!').is_some() {
                    out.push('!');
                }
                // A literal `]` is only expressible as the first member.
                let mut literal_bracket = false;
                let mut members = String::new();
                loop {
                    match chars.next() {
                        // Unterminated; left for `Pattern::new` to reject.
                        None => {
                            out.push_str(&members);
                            break;
                        }
                        Some(']') if members.is_empty() && !literal_bracket => {
                            return Err("empty character class");
                        }
                        Some(']') => {
                            if literal_bracket {
                                out.push(']');
                            }
                            out.push_str(&members);
                            out.push(']');
                            break;
                        }
                        Some('\\') => match chars.next().ok_or("trailing backslash")? {
                            ']' => literal_bracket = true,
                            member => members.push(member),
                        },
                        Some(member) => members.push(member),
                    }
                }
            }
            _ => out.push(ch),
        }
    }
    Ok(out)
}

fn push_literal(ch: char, out: &mut String) {
    if matches!(ch, '*' | '?' | '[' | ']') {
        out.push('[');
        out.push(ch);
        out.push(']');
    } else {
        out.push(ch);
    }
}
