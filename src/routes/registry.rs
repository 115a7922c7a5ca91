//! Highlighter registry
//!
//! Hosts look up highlighters by alias (the name used in documentation markup) or by file
//! name. Each highlighter implements the `Highlighter` trait and is registered with a
//! `LexerRegistry`; [setup] registers the routes lexer.

use super::lexer::RoutesLexer;
use super::token::Token;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

/// Errors that can occur during registry lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// No highlighter registered under this alias
    LexerNotFound(String),
    /// No highlighter claims this file name
    NoLexerForFilename(String),
    /// A filename pattern could not be compiled
    InvalidPattern(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::LexerNotFound(alias) => write!(f, "Lexer '{alias}' not found"),
            LexError::NoLexerForFilename(name) => write!(f, "No lexer for filename '{name}'"),
            LexError::InvalidPattern(msg) => write!(f, "Invalid filename pattern: {msg}"),
        }
    }
}

impl std::error::Error for LexError {}

/// Trait for pluggable highlighting lexers
pub trait Highlighter: Send + Sync {
    /// Display name (e.g., "ROUTES")
    fn name(&self) -> &str;

    /// Short names usable in documentation markup
    fn aliases(&self) -> Vec<String>;

    /// Glob patterns (`*` and `?`) for file names this highlighter handles
    fn filenames(&self) -> Vec<String>;

    /// Classify the whole source
    fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>>;
}

impl Highlighter for RoutesLexer {
    fn name(&self) -> &str {
        RoutesLexer::name(self)
    }

    fn aliases(&self) -> Vec<String> {
        RoutesLexer::aliases(self).to_vec()
    }

    fn filenames(&self) -> Vec<String> {
        RoutesLexer::filenames(self).to_vec()
    }

    fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        RoutesLexer::tokenize(self, source).collect()
    }
}

/// Translate a filename glob into an anchored regex
fn glob_to_regex(pattern: &str) -> Result<Regex, LexError> {
    let mut expr = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|e| LexError::InvalidPattern(format!("{pattern}: {e}")))
}

/// Registry of highlighting lexers
///
/// Aliases map to one highlighter each; registering a highlighter under an alias that is
/// already taken replaces the previous one. Filename patterns are checked in registration
/// order.
#[derive(Clone, Default)]
pub struct LexerRegistry {
    by_alias: HashMap<String, Arc<dyn Highlighter>>,
    by_filename: Vec<(Regex, Arc<dyn Highlighter>)>,
}

impl LexerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a highlighter under all of its aliases and filename patterns
    pub fn register(&mut self, lexer: Arc<dyn Highlighter>) -> Result<(), LexError> {
        let patterns = lexer
            .filenames()
            .iter()
            .map(|p| glob_to_regex(p))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            name = lexer.name(),
            aliases = ?lexer.aliases(),
            filenames = ?lexer.filenames(),
            "registering highlighter"
        );

        for alias in lexer.aliases() {
            self.by_alias.insert(alias, Arc::clone(&lexer));
        }
        for pattern in patterns {
            self.by_filename.push((pattern, Arc::clone(&lexer)));
        }
        Ok(())
    }

    /// Get a registered highlighter by alias
    pub fn get(&self, alias: &str) -> Option<Arc<dyn Highlighter>> {
        self.by_alias.get(alias).cloned()
    }

    /// Check if an alias is registered
    pub fn has(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias)
    }

    /// Get the sorted list of registered aliases
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<_> = self.by_alias.keys().cloned().collect();
        names.sort();
        names
    }

    /// Find the highlighter for a file, matching patterns against its base name
    pub fn for_filename(&self, path: &str) -> Option<Arc<dyn Highlighter>> {
        let base = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        self.by_filename
            .iter()
            .find(|(pattern, _)| pattern.is_match(base))
            .map(|(_, lexer)| Arc::clone(lexer))
    }

    /// Tokenize using the highlighter registered under `alias`
    pub fn tokenize<'a>(&self, alias: &str, source: &'a str) -> Result<Vec<Token<'a>>, LexError> {
        let lexer = self
            .get(alias)
            .ok_or_else(|| LexError::LexerNotFound(alias.to_string()))?;
        Ok(lexer.tokenize(source))
    }

    /// Tokenize using the highlighter that claims `path`
    pub fn tokenize_file<'a>(
        &self,
        path: &str,
        source: &'a str,
    ) -> Result<Vec<Token<'a>>, LexError> {
        let lexer = self
            .for_filename(path)
            .ok_or_else(|| LexError::NoLexerForFilename(path.to_string()))?;
        Ok(lexer.tokenize(source))
    }

    /// Get the global lexer registry
    pub fn global() -> &'static Mutex<LexerRegistry> {
        static REGISTRY: OnceLock<Mutex<LexerRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(LexerRegistry::new()))
    }

    /// Initialize the global registry with the routes lexer
    pub fn init_defaults() -> Result<(), LexError> {
        let mut registry = Self::global()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if registry.available().is_empty() {
            setup(&mut registry)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LexerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerRegistry")
            .field("aliases", &self.available())
            .field("filename_patterns", &self.by_filename.len())
            .finish()
    }
}

/// Register the routes lexer with a host registry
pub fn setup(registry: &mut LexerRegistry) -> Result<(), LexError> {
    registry.register(Arc::new(RoutesLexer::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::token::TokenKind;

    struct TestHighlighter;
    impl Highlighter for TestHighlighter {
        fn name(&self) -> &str {
            "TEST"
        }
        fn aliases(&self) -> Vec<String> {
            vec!["test".to_string(), "t".to_string()]
        }
        fn filenames(&self) -> Vec<String> {
            vec!["*.t?t".to_string()]
        }
        fn tokenize<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
            vec![Token::new(TokenKind::Text, source, 0..source.len())]
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = LexerRegistry::new();
        assert!(registry.available().is_empty());
    }

    #[test]
    fn test_setup_registers_routes() {
        let mut registry = LexerRegistry::new();
        setup(&mut registry).unwrap();

        assert!(registry.has("routes"));
        assert_eq!(registry.available(), vec!["routes"]);
        assert_eq!(registry.get("routes").unwrap().name(), "ROUTES");
    }

    #[test]
    fn test_registry_aliases() {
        let mut registry = LexerRegistry::new();
        registry.register(Arc::new(TestHighlighter)).unwrap();

        assert_eq!(registry.available(), vec!["t", "test"]);
        assert!(!registry.has("nonexistent"));
    }

    #[test]
    fn test_filename_lookup() {
        let mut registry = LexerRegistry::new();
        setup(&mut registry).unwrap();
        registry.register(Arc::new(TestHighlighter)).unwrap();

        assert_eq!(registry.for_filename("routes").unwrap().name(), "ROUTES");
        assert_eq!(
            registry.for_filename("conf/api.routes").unwrap().name(),
            "ROUTES"
        );
        assert_eq!(registry.for_filename("notes.txt").unwrap().name(), "TEST");
        assert!(registry.for_filename("routes.conf").is_none());
        assert!(registry.for_filename("myroutes").is_none());
    }

    #[test]
    fn test_glob_escapes_regex_characters() {
        let pattern = glob_to_regex("a+b.*").unwrap();
        assert!(pattern.is_match("a+b.routes"));
        assert!(!pattern.is_match("aab.routes"));
    }

    #[test]
    fn test_tokenize_by_alias() {
        let mut registry = LexerRegistry::new();
        setup(&mut registry).unwrap();

        let tokens = registry.tokenize("routes", "GET /").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_tokenize_not_found() {
        let registry = LexerRegistry::new();
        let result = registry.tokenize("nonexistent", "GET /");
        assert_eq!(
            result.unwrap_err(),
            LexError::LexerNotFound("nonexistent".to_string())
        );
    }

    #[test]
    fn test_tokenize_file_not_found() {
        let registry = LexerRegistry::new();
        match registry.tokenize_file("app.conf", "") {
            Err(LexError::NoLexerForFilename(name)) => assert_eq!(name, "app.conf"),
            other => panic!("Expected NoLexerForFilename, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_error_display() {
        let err = LexError::LexerNotFound("x".to_string());
        assert_eq!(format!("{err}"), "Lexer 'x' not found");

        let err = LexError::NoLexerForFilename("a.b".to_string());
        assert_eq!(format!("{err}"), "No lexer for filename 'a.b'");
    }

    #[test]
    fn test_global_registry_defaults() {
        LexerRegistry::init_defaults().unwrap();
        LexerRegistry::init_defaults().unwrap();

        let registry = LexerRegistry::global().lock().unwrap();
        assert!(registry.has("routes"));
        assert_eq!(registry.by_filename.len(), 2);
    }
}
