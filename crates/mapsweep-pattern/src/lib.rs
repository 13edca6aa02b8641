//! Pattern language for map-name matching.
//!
//! Implements the comma-separated wildcard patterns accepted by the
//! removal module: `*` and `?` wildcards, `[...]` character classes and
//! `{a,b}` brace alternation, compiled down to anchored regular
//! expressions. The regex modes bypass the wildcard translation and hand
//! the pattern to the regex engine directly.

use regex::{Regex, RegexBuilder};

/// How a pattern string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Wildcard syntax with brace alternation, split on top-level commas.
    #[default]
    Wildcard,
    /// Basic regular expression: `+ ? | ( ) { }` are literal characters.
    Regex,
    /// Extended regular expression, compiled as written.
    ExtendedRegex,
}

/// Pattern compilation errors
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    #[error("Pattern is empty")]
    Empty,

    #[error("Pattern <{pattern}> contains an empty alternative")]
    EmptyAlternative { pattern: String },

    #[error("Unclosed brace in pattern <{pattern}> at byte {offset}")]
    UnclosedBrace { pattern: String, offset: usize },

    #[error("Unclosed bracket class in pattern <{pattern}> at byte {offset}")]
    UnclosedBracket { pattern: String, offset: usize },

    #[error("Invalid pattern <{pattern}>: {source}")]
    BadRegex {
        pattern: String,
        source: regex::Error,
    },
}

/// A compiled pattern list.
///
/// Holds one anchored matcher per expanded alternative; a name matches
/// the list when any alternative matches the whole name.
#[derive(Debug)]
pub struct PatternList {
    matchers: Vec<Regex>,
}

impl PatternList {
    /// Compile a pattern string for the given mode.
    ///
    /// # Errors
    ///
    /// Returns `PatternError` for empty patterns, unterminated brace or
    /// bracket groups, and expressions the regex engine rejects.
    pub fn compile(
        pattern: &str,
        mode: MatchMode,
        ignore_case: bool,
    ) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let expressions = match mode {
            MatchMode::Wildcard => {
                let mut expressions = Vec::new();
                for part in split_commas(pattern) {
                    if part.is_empty() {
                        return Err(PatternError::EmptyAlternative {
                            pattern: pattern.to_string(),
                        });
                    }
                    for name in expand_braces(&part)? {
                        expressions.push(wildcard_to_regex(&name)?);
                    }
                }
                expressions
            }
            MatchMode::Regex => vec![basic_to_regex(pattern)],
            MatchMode::ExtendedRegex => vec![pattern.to_string()],
        };

        let mut matchers = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let anchored = format!("^(?:{expression})$");
            let matcher = RegexBuilder::new(&anchored)
                .case_insensitive(ignore_case)
                .build()
                .map_err(|source| PatternError::BadRegex {
                    pattern: pattern.to_string(),
                    source,
                })?;
            matchers.push(matcher);
        }

        Ok(Self { matchers })
    }

    /// Whether any alternative matches the whole name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.is_match(name))
    }

    /// Number of compiled alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Split a pattern string on top-level commas.
///
/// Commas inside `{...}` groups or `[...]` classes belong to the group
/// and do not separate alternatives.
#[must_use]
pub fn split_commas(pattern: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i].1;
        match ch {
            '[' => {
                // An unterminated class falls through as a literal and is
                // reported later by the wildcard translation.
                if let Some(end) = class_end(&chars, i) {
                    for &(_, c) in &chars[i..=end] {
                        current.push(c);
                    }
                    i = end + 1;
                    continue;
                }
                current.push(ch);
            }
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
        i += 1;
    }

    parts.push(current);
    parts
}

/// Expand brace alternation into the full set of plain patterns.
///
/// `a{b,c}d` becomes `abd` and `acd`; adjacent groups multiply and
/// nested groups expand recursively. Wildcards survive into the
/// expanded alternatives.
///
/// # Errors
///
/// Returns `PatternError::UnclosedBrace` when a `{` has no matching `}`.
pub fn expand_braces(pattern: &str) -> Result<Vec<String>, PatternError> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i].1 {
            '[' => {
                if let Some(end) = class_end(&chars, i) {
                    i = end + 1;
                    continue;
                }
                i += 1;
            }
            '{' => {
                let open = chars[i].0;
                let close = find_matching_brace(&chars, i).ok_or_else(|| {
                    PatternError::UnclosedBrace {
                        pattern: pattern.to_string(),
                        offset: open,
                    }
                })?;
                let prefix = &pattern[..open];
                let inner = &pattern[open + 1..chars[close].0];
                let suffix = &pattern[chars[close].0 + 1..];

                let mut expanded = Vec::new();
                for branch in split_commas(inner) {
                    expanded.extend(expand_braces(&format!("{prefix}{branch}{suffix}"))?);
                }
                return Ok(expanded);
            }
            _ => i += 1,
        }
    }

    Ok(vec![pattern.to_string()])
}

/// Translate a single brace-free wildcard pattern to a regex body.
///
/// `*` becomes `.*`, `?` becomes `.`, `[...]` classes pass through with
/// a leading `!` translated to `^`. Every other character is escaped.
///
/// # Errors
///
/// Returns `PatternError::UnclosedBracket` when a `[` has no matching `]`.
pub fn wildcard_to_regex(glob: &str) -> Result<String, PatternError> {
    let chars: Vec<(usize, char)> = glob.char_indices().collect();
    let mut regex = String::with_capacity(glob.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let (offset, ch) = chars[i];
        match ch {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '[' => {
                let end =
                    class_end(&chars, i).ok_or_else(|| PatternError::UnclosedBracket {
                        pattern: glob.to_string(),
                        offset,
                    })?;
                regex.push('[');
                let mut j = i + 1;
                if chars[j].1 == '!' {
                    regex.push('^');
                    j += 1;
                }
                if j < end && chars[j].1 == ']' {
                    // Leading `]` is a literal member of the class.
                    regex.push_str("\\]");
                    j += 1;
                }
                while j < end {
                    match chars[j].1 {
                        '\\' => regex.push_str("\\\\"),
                        '[' => regex.push_str("\\["),
                        c => regex.push(c),
                    }
                    j += 1;
                }
                regex.push(']');
                i = end + 1;
                continue;
            }
            ch => push_literal(&mut regex, ch),
        }
        i += 1;
    }

    Ok(regex)
}

/// Literalize the extended-only metacharacters of a basic regex.
#[must_use]
pub fn basic_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 4);
    for ch in pattern.chars() {
        if matches!(ch, '+' | '?' | '|' | '(' | ')' | '{' | '}') {
            regex.push('\\');
        }
        regex.push(ch);
    }
    regex
}

fn push_literal(regex: &mut String, ch: char) {
    if matches!(
        ch,
        '.' | '+' | '(' | ')' | '|' | '^' | '$' | '{' | '}' | '[' | ']' | '?' | '*' | '\\'
    ) {
        regex.push('\\');
    }
    regex.push(ch);
}

/// Index of the `]` closing the class opened at `start`, if any.
///
/// A leading `!` and a `]` in first member position are part of the
/// class body, matching wildcard class rules.
fn class_end(chars: &[(usize, char)], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if i < chars.len() && chars[i].1 == '!' {
        i += 1;
    }
    if i < chars.len() && chars[i].1 == ']' {
        i += 1;
    }
    while i < chars.len() {
        if chars[i].1 == ']' {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn find_matching_brace(chars: &[(usize, char)], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i].1 {
            '[' => {
                if let Some(end) = class_end(chars, i) {
                    i = end;
                }
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
