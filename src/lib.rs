//! # playroutes
//!
//! A highlighting lexer for web framework routing files, meant to be plugged
//! into a documentation generator's highlighting registry.
//!
//! A routes file is a list of lines such as:
//!
//!     GET     /users/:id      controllers.Users.show(id: Long)
//!     ->      /assets         controllers.Assets.at(path="/public", file)
//!
//! See the [routes module](routes) for the token kinds, the rule tables and
//! the registration entry point ([routes::setup]).

pub mod routes;
