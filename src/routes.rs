//! Routes highlighting lexer
//!
//! This module turns the text of a routing file into a flat stream of classified tokens.
//! There is no parse tree: a renderer only needs to know which span gets which style.
//!
//! Modes
//!
//!     The lexer is a small state machine with three modes, each with its own ordered rule
//!     table (see [rules]):
//!
//!     root:
//!         Whitespace, `#` comments and the route keyword (`GET`, `POST`, `PATCH`, `DELETE`,
//!         `PUT`, `OPTIONS` or `->`). A keyword followed by whitespace enters url mode.
//!     url:
//!         The path pattern, one character at a time, with `:name` placeholders as variables.
//!         The first whitespace run enters object mode.
//!     object:
//!         The handler reference: `package.` segments, the method name and the parenthesized
//!         parameter list.
//!
//!     Within a mode the first rule that matches at the current position wins, even when a
//!     later rule would match a longer span.
//!
//! Coverage
//!
//!     Tokenizing never fails. A character no rule accepts is emitted on its own as
//!     [TokenKind::Text]. An unmatched newline is emitted as whitespace and puts the lexer
//!     back into root mode, which is how a multi-line file gets from one route to the next.
//!     Concatenating the token texts always gives back the input.
//!
//! Registration
//!
//!     Hosts discover the lexer through a [LexerRegistry]. [setup] is the one registration
//!     call: it registers the lexer under the `routes` alias, for files named `routes` or
//!     matching `*.routes`.

pub mod config;
pub mod formats;
pub mod lexer;
pub mod registry;
pub mod rules;
pub mod token;

pub use self::config::{load_defaults, LexerConfig, Loader, RoutesConfig};
pub use formats::{coalesce, detokenize, to_json, to_tag_string};
pub use lexer::{tokenize, LexerOptions, RoutesLexer, TokenStream};
pub use registry::{setup, Highlighter, LexError, LexerRegistry};
pub use rules::Mode;
pub use token::{Token, TokenKind};
