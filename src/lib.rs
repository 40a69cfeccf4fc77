//! scopebind
//!
//! Variable and member resolution for C++/Java-style syntax trees. A
//! declaration registry builds the scope tree and synthesizes the implicit
//! `this` and enclosing-instance members; a reference resolver then binds
//! every plain name and member access to its declaration.

pub mod ast;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;

pub use ast::{Ast, NodeId, NodeKind};
pub use config::{DuplicatePolicy, Language, ResolverConfig};
pub use engine::{AmbiguityPolicy, Resolution, ResolvedUnit, Resolver};
pub use error::{Error, Result};
