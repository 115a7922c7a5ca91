//! Mode-switching tokenizer for routes files
//!
//! [TokenStream] walks the source once, front to back. At each position it tries the rules
//! of the current mode (see [rules](super::rules)) and emits the tokens of the first rule
//! that matches. When nothing matches, one character is emitted as plain text so the stream
//! always covers the whole input.

use super::config::LexerConfig;
use super::rules::{self, Action, Mode, Transition};
use super::token::{Token, TokenKind};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::trace;

pub const DEFAULT_NAME: &str = "ROUTES";
pub const DEFAULT_ALIASES: &[&str] = &["routes"];
pub const DEFAULT_FILENAMES: &[&str] = &["routes", "*.routes"];

/// Behavior switches for a tokenizing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Go back to root mode after any token containing a newline.
    ///
    /// Off by default, which keeps the classic rule set: a whitespace run that ends a URL
    /// enters object mode even when it crosses a line break.
    pub reset_on_newline: bool,
}

/// The routes lexer, with the metadata it registers under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutesLexer {
    name: String,
    aliases: Vec<String>,
    filenames: Vec<String>,
    options: LexerOptions,
}

impl RoutesLexer {
    pub fn new() -> Self {
        Self::with_options(LexerOptions::default())
    }

    pub fn with_options(options: LexerOptions) -> Self {
        RoutesLexer {
            name: DEFAULT_NAME.to_string(),
            aliases: DEFAULT_ALIASES.iter().map(|s| s.to_string()).collect(),
            filenames: DEFAULT_FILENAMES.iter().map(|s| s.to_string()).collect(),
            options,
        }
    }

    /// Build a lexer from the `[lexer]` configuration section
    pub fn from_config(config: &LexerConfig) -> Self {
        RoutesLexer {
            name: config.name.clone(),
            aliases: config.aliases.clone(),
            filenames: config.filenames.clone(),
            options: LexerOptions {
                reset_on_newline: config.reset_on_newline,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Start a new pass over `source`
    pub fn tokenize<'a>(&self, source: &'a str) -> TokenStream<'a> {
        TokenStream::new(source, self.options)
    }
}

impl Default for RoutesLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize with the default options
pub fn tokenize(source: &str) -> TokenStream<'_> {
    TokenStream::new(source, LexerOptions::default())
}

/// Lazy token stream over one source string
///
/// Single forward pass: once consumed, call `tokenize` again to start over.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    source: &'a str,
    pos: usize,
    mode: Mode,
    options: LexerOptions,
    // Tokens of a by-groups match not yet handed out
    pending: VecDeque<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str, options: LexerOptions) -> Self {
        TokenStream {
            source,
            pos: 0,
            mode: Mode::Root,
            options,
            pending: VecDeque::new(),
        }
    }

    /// The mode the next rule lookup will use
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Byte offset of the next unscanned character
    pub fn position(&self) -> usize {
        self.pos
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let source = self.source;
        self.pending
            .push_back(Token::new(kind, &source[start..end], start..end));
    }

    fn enter(&mut self, next: Mode) {
        if next != self.mode {
            trace!(from = %self.mode, to = %next, offset = self.pos, "routes lexer mode change");
            self.mode = next;
        }
    }

    /// Apply the first matching rule of the current mode. Returns false if none matched.
    fn apply_rules(&mut self) -> bool {
        let source = self.source;
        let start = self.pos;
        let rest = &source[start..];

        for rule in rules::table(self.mode) {
            let end = match rule.action {
                Action::Single(kind) => {
                    let Some(found) = rule.regex.find(rest) else {
                        continue;
                    };
                    if found.is_empty() {
                        continue;
                    }
                    self.push(kind, start, start + found.end());
                    start + found.end()
                }
                Action::ByGroups(kinds) => {
                    let Some(captures) = rule.regex.captures(rest) else {
                        continue;
                    };
                    let Some(whole) = captures.get(0).filter(|m| !m.is_empty()) else {
                        continue;
                    };
                    for (index, kind) in kinds.iter().enumerate() {
                        if let Some(group) = captures.get(index + 1).filter(|m| !m.is_empty()) {
                            self.push(*kind, start + group.start(), start + group.end());
                        }
                    }
                    start + whole.end()
                }
            };

            self.pos = end;
            let next = if self.options.reset_on_newline && source[start..end].contains('\n') {
                Mode::Root
            } else {
                match rule.transition {
                    Transition::Stay => self.mode,
                    Transition::Enter(mode) => mode,
                }
            };
            self.enter(next);
            return true;
        }

        false
    }

    /// Emit one unmatched character. A newline goes back to root mode.
    fn fallback(&mut self) {
        let start = self.pos;
        let Some(ch) = self.source[start..].chars().next() else {
            return;
        };
        let end = start + ch.len_utf8();
        self.pos = end;

        if ch == '\n' {
            self.push(TokenKind::Whitespace, start, end);
            self.enter(Mode::Root);
        } else {
            trace!(mode = %self.mode, offset = start, "unmatched character emitted as text");
            self.push(TokenKind::Text, start, end);
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.pos >= self.source.len() {
            return None;
        }
        if !self.apply_rules() {
            self.fallback();
        }
        self.pending.pop_front()
    }
}

impl FusedIterator for TokenStream<'_> {}
