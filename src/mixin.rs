use std::fmt;

use crate::ast::{AtRule, Node};
use crate::error::Result;
use crate::parameters::MixinParameter;
use crate::template::Template;

/// What a callable mixin hands back for its call site. The enum is closed on
/// purpose: a callable cannot produce an unrecognized shape, it can only
/// produce nodes, a template, or (via `Ok(None)`) nothing at all.
#[derive(Clone, Debug, PartialEq)]
pub enum MixinValue {
    Nodes(Vec<Node>),
    Template(Template),
}

/// An externally supplied mixin function. It receives the `@include` node and
/// the raw positional argument strings; it may fail with its own error
/// (`ErrorKind::InvalidMixinReturn` is the conventional kind when it cannot
/// produce a usable value).
pub type MixinCallable = Box<dyn Fn(&AtRule, &[String]) -> Result<Option<MixinValue>>>;

/// The three body shapes a registered mixin can have.
pub enum MixinBody {
    /// Child nodes detached from an `@mixin` block. Owned exclusively by the
    /// definition; every expansion works on a fresh deep clone.
    Fragment(Vec<Node>),
    Template(Template),
    Callable(MixinCallable),
}

impl fmt::Debug for MixinBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MixinBody::Fragment(ref nodes) => f.debug_tuple("Fragment").field(nodes).finish(),
            MixinBody::Template(ref template) => {
                f.debug_tuple("Template").field(template).finish()
            }
            MixinBody::Callable(..) => f.write_str("Callable(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Mixin {
    pub name: String,
    pub parameters: Vec<MixinParameter>,
    pub has_content: bool,
    pub body: MixinBody,
}

impl Mixin {
    /// A template or callable registered programmatically or loaded from a
    /// file; such mixins carry no declared parameters or content slot.
    pub fn external<S: Into<String>>(name: S, body: MixinBody) -> Mixin {
        Mixin {
            name: name.into(),
            parameters: Vec::new(),
            has_content: false,
            body,
        }
    }
}
