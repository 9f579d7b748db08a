use std::path::PathBuf;

use crate::ast::AtRule;
use crate::error::Result;
use crate::mixin::{MixinBody, MixinCallable, MixinValue};
use crate::template::Template;

/// Engine configuration, supplied once at construction.
///
/// Registration precedence is lowest to highest: `mixins_dir`, then
/// `mixins_files`, then directly supplied `mixins`, then `@mixin` declarations
/// found in the tree. Within each source, later entries overwrite earlier
/// ones of the same name.
#[derive(Debug, Default)]
pub struct Options {
    pub(crate) mixins: Vec<(String, MixinBody)>,
    pub(crate) mixins_dir: Vec<PathBuf>,
    pub(crate) mixins_files: Vec<String>,
    pub(crate) silent: bool,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    /// Registers a mixin directly under `name`.
    pub fn mixin<S: Into<String>>(mut self, name: S, body: MixinBody) -> Options {
        self.mixins.push((name.into(), body));
        self
    }

    /// Shorthand for registering a declarative template mixin.
    pub fn template<S: Into<String>>(self, name: S, template: Template) -> Options {
        self.mixin(name, MixinBody::Template(template))
    }

    /// Shorthand for registering a callable mixin.
    pub fn callable<S, F>(self, name: S, callable: F) -> Options
    where
        S: Into<String>,
        F: Fn(&AtRule, &[String]) -> Result<Option<MixinValue>> + 'static,
    {
        let boxed: MixinCallable = Box::new(callable);
        self.mixin(name, MixinBody::Callable(boxed))
    }

    /// Adds a directory to scan (non-recursively) for `.json` template files.
    pub fn mixins_dir<P: Into<PathBuf>>(mut self, dir: P) -> Options {
        self.mixins_dir.push(dir.into());
        self
    }

    /// Adds a glob pattern; every match is loaded as a template file.
    pub fn mixins_files<S: Into<String>>(mut self, pattern: S) -> Options {
        self.mixins_files.push(pattern.into());
        self
    }

    /// When set, an `@include` of an unknown mixin is dropped instead of
    /// failing the run.
    pub fn silent(mut self, silent: bool) -> Options {
        self.silent = silent;
        self
    }
}
