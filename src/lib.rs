//! Mixin expansion over a CSS AST.
//!
//! The host parses a stylesheet into a [`Root`](ast::Root) of nodes, hands it
//! to [`expand`] together with [`Options`], and gets the tree back with every
//! `@mixin` definition collected and every `@include` call site replaced by
//! its expanded body.

pub mod ast;
mod error;
mod expander;
mod invocation;
mod mixin;
mod options;
mod parameters;
mod registry;
mod substitute;
mod template;

pub use crate::error::{ErrorKind, MixinError, Result};
pub use crate::expander::Expander;
pub use crate::invocation::Invocation;
pub use crate::mixin::{Mixin, MixinBody, MixinCallable, MixinValue};
pub use crate::options::Options;
pub use crate::parameters::MixinParameter;
pub use crate::registry::MixinRegistry;
pub use crate::substitute::{SimpleVars, VariableSubstituter};
pub use crate::template::{Template, TemplateValue};

/// Expands all mixin directives in `root` in place.
pub fn expand(root: &mut ast::Root, options: Options) -> Result<()> {
    Expander::new(options)?.expand(root)
}
