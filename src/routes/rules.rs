//! Declarative rule tables for the routes lexer
//!
//! Each mode owns an ordered list of rules. A rule is a regex anchored at the current scan
//! position, the token kind(s) it produces and the mode to continue in. Rules are tried in
//! declaration order and the first match wins, so the order of each table is part of its
//! meaning: in url mode `\s+` has to come before `[^:]`, otherwise whitespace would be
//! classified as path characters and object mode would never be reached.

use super::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Lexer state selecting the active rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Start of a route, comments and blank space
    Root,
    /// The URL path pattern
    Url,
    /// The handler reference
    Object,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Root => "root",
            Mode::Url => "url",
            Mode::Object => "object",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a matching rule emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The whole match becomes one token of this kind
    Single(TokenKind),
    /// Capture group `n + 1` becomes a token of the `n`th kind; empty groups are skipped
    ByGroups(&'static [TokenKind]),
}

/// Where the lexer continues after a rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Enter(Mode),
}

/// A compiled rule
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub regex: Regex,
    pub action: Action,
    pub transition: Transition,
}

type RuleDef = (&'static str, &'static str, Action, Transition);

const ROOT_RULES: &[RuleDef] = &[
    (
        "whitespace",
        r"\s+",
        Action::Single(TokenKind::Whitespace),
        Transition::Stay,
    ),
    // `$` stops before the newline, which is then lexed as whitespace
    (
        "comment",
        r"(?m:#.*?$)",
        Action::Single(TokenKind::Comment),
        Transition::Stay,
    ),
    (
        "route_keyword",
        r"(GET|POST|PATCH|DELETE|PUT|OPTIONS|->)(\s+)",
        Action::ByGroups(&[TokenKind::Keyword, TokenKind::Whitespace]),
        Transition::Enter(Mode::Url),
    ),
];

const URL_RULES: &[RuleDef] = &[
    (
        "url_end",
        r"\s+",
        Action::Single(TokenKind::Whitespace),
        Transition::Enter(Mode::Object),
    ),
    (
        "path_char",
        r"[^:]",
        Action::Single(TokenKind::StringLiteral),
        Transition::Stay,
    ),
    (
        "path_param",
        r":\w+",
        Action::Single(TokenKind::Variable),
        Transition::Stay,
    ),
];

const OBJECT_RULES: &[RuleDef] = &[
    (
        "namespace_segment",
        r"\w+\.",
        Action::Single(TokenKind::Class),
        Transition::Stay,
    ),
    (
        "method_name",
        r"\w+",
        Action::Single(TokenKind::Function),
        Transition::Stay,
    ),
    (
        "parameter_list",
        r"(\()([^)]+)(\))",
        Action::ByGroups(&[TokenKind::Text, TokenKind::Variable, TokenKind::Text]),
        Transition::Stay,
    ),
];

/// Route keywords recognized in root mode, in table order
pub const ROUTE_KEYWORDS: &[&str] = &["GET", "POST", "PATCH", "DELETE", "PUT", "OPTIONS", "->"];

fn compile(defs: &[RuleDef]) -> Vec<Rule> {
    defs
        .iter()
        .map(|&(name, pattern, action, transition)| Rule {
            name,
            // \A keeps every match anchored at the scan position
            regex: Regex::new(&format!(r"\A(?:{pattern})"))
                .unwrap_or_else(|e| panic!("invalid routes rule '{name}': {e}")),
            action,
            transition,
        })
        .collect()
}

static ROOT: Lazy<Vec<Rule>> = Lazy::new(|| compile(ROOT_RULES));
static URL: Lazy<Vec<Rule>> = Lazy::new(|| compile(URL_RULES));
static OBJECT: Lazy<Vec<Rule>> = Lazy::new(|| compile(OBJECT_RULES));

/// The ordered rule table for a mode
pub fn table(mode: Mode) -> &'static [Rule] {
    match mode {
        Mode::Root => &ROOT,
        Mode::Url => &URL,
        Mode::Object => &OBJECT,
    }
}
