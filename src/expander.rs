use std::collections::HashMap;
use std::mem;

use log::debug;

use crate::ast::{AtRule, Node, Root};
use crate::error::{ErrorKind, MixinError, Result};
use crate::invocation;
use crate::mixin::{MixinBody, MixinValue};
use crate::options::Options;
use crate::parameters::MixinParameter;
use crate::registry::MixinRegistry;
use crate::substitute::{SimpleVars, VariableSubstituter};

/// Resolves every `@include` directive in a tree against the mixin registry.
///
/// Expansion runs in two passes: one walk collecting `@mixin` declarations
/// (so forward references resolve), then one walk replacing `@include`
/// directives in document order, depth-first. A fragment's nested includes
/// are resolved before the walk moves past its call site.
///
/// There is no cycle guard: a mixin that includes itself recurses until the
/// stack is exhausted.
pub struct Expander {
    registry: MixinRegistry,
    silent: bool,
    substituter: Box<dyn VariableSubstituter>,
}

impl Expander {
    pub fn new(options: Options) -> Result<Expander> {
        let silent = options.silent;
        let mut registry = MixinRegistry::new();
        registry.populate(options)?;

        Ok(Expander {
            registry,
            silent,
            substituter: Box::new(SimpleVars::new()),
        })
    }

    /// Swaps in the host's own variable-substitution collaborator.
    pub fn with_substituter(mut self, substituter: Box<dyn VariableSubstituter>) -> Expander {
        self.substituter = substituter;
        self
    }

    /// Expands the tree in place. The first error aborts the walk; the tree
    /// is left partially rewritten and should be discarded.
    pub fn expand(&mut self, root: &mut Root) -> Result<()> {
        self.registry.collect(root)?;
        let nodes = mem::take(&mut root.nodes);
        root.nodes = self.expand_children(nodes)?;
        Ok(())
    }

    fn expand_children(&self, nodes: Vec<Node>) -> Result<Vec<Node>> {
        let mut results = Vec::new();
        for node in nodes {
            match node {
                Node::AtRule(at_rule) if at_rule.name == "include" => {
                    let mut expanded = self.expand_include(at_rule)?;
                    results.append(&mut expanded);
                }
                Node::AtRule(mut at_rule) => {
                    at_rule.children = self.expand_children(at_rule.children)?;
                    results.push(Node::AtRule(at_rule));
                }
                Node::Rule(mut rule) => {
                    rule.children = self.expand_children(rule.children)?;
                    results.push(Node::Rule(rule));
                }
                other => results.push(other),
            }
        }
        Ok(results)
    }

    /// Resolves one call site; the returned nodes replace the directive.
    fn expand_include(&self, at_rule: AtRule) -> Result<Vec<Node>> {
        let parsed = invocation::parse_name_and_args(&at_rule)?;

        let mixin = match self.registry.get(&parsed.name) {
            Some(mixin) => mixin,
            None if self.silent => {
                debug!("dropping include of unknown mixin `{}`", parsed.name);
                return Ok(Vec::new());
            }
            None => {
                return Err(MixinError {
                    kind: ErrorKind::UndefinedMixin,
                    message: format!("Undefined mixin {}", parsed.name),
                    location: Some(at_rule.source),
                })
            }
        };
        debug!("expanding `{}` with args {:?}", parsed.name, parsed.args);

        match mixin.body {
            MixinBody::Callable(ref callable) => match callable(&at_rule, &parsed.args)? {
                None => Ok(Vec::new()),
                Some(MixinValue::Template(template)) => Ok(template.to_nodes(at_rule.source)),
                Some(MixinValue::Nodes(nodes)) => Ok(nodes),
            },
            MixinBody::Template(ref template) => Ok(template.to_nodes(at_rule.source)),
            MixinBody::Fragment(ref body) => {
                let mut clones = body.clone();

                if !mixin.parameters.is_empty() {
                    let values = bind_arguments(&mixin.parameters, &parsed.args);
                    self.substituter.substitute(&mut clones, &values);
                }
                if mixin.has_content {
                    inject_content(&mut clones, &at_rule.children);
                }

                // nested includes expand before the clone is spliced in
                self.expand_children(clones)
            }
        }
    }
}

/// Positional binding: the i-th argument's raw text, else the parameter's
/// default, else the empty string. A missing argument is not an error; the
/// substituter simply erases the placeholder.
fn bind_arguments(parameters: &[MixinParameter], args: &[String]) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (i, parameter) in parameters.iter().enumerate() {
        let value = args
            .get(i)
            .cloned()
            .or_else(|| parameter.default.clone())
            .unwrap_or_default();
        values.insert(parameter.name.clone(), value);
    }
    values
}

/// Replaces every `@content` marker in the clone with copies of the call
/// site's own child nodes; with no content to inject the marker is dropped.
fn inject_content(nodes: &mut Vec<Node>, content: &[Node]) {
    let mut i = 0;
    while i < nodes.len() {
        let is_marker = matches!(nodes[i], Node::AtRule(ref at_rule) if at_rule.name == "content");
        if is_marker {
            nodes.splice(i..i + 1, content.iter().cloned());
            i += content.len();
        } else {
            if let Some(children) = nodes[i].children_mut() {
                inject_content(children, content);
            }
            i += 1;
        }
    }
}
