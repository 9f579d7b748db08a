use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::ast::Node;

/// The variable-substitution collaborator. The expander calls it with a
/// cloned mixin body and the parameter bindings for one call site; it must
/// rewrite matching placeholders in place and leave every name outside
/// `values` alone, so mixin-local parameters never collide with the host's
/// own variables.
pub trait VariableSubstituter {
    fn substitute(&self, nodes: &mut [Node], values: &HashMap<String, String>);
}

/// Default collaborator: literal `$name` replacement in declaration
/// properties and values, rule selectors, and at-rule params.
pub struct SimpleVars {
    ident: Regex,
}

impl SimpleVars {
    pub fn new() -> SimpleVars {
        SimpleVars {
            ident: Regex::new(r"\$([A-Za-z0-9_-]+)").unwrap(),
        }
    }
}

impl Default for SimpleVars {
    fn default() -> SimpleVars {
        SimpleVars::new()
    }
}

impl VariableSubstituter for SimpleVars {
    fn substitute(&self, nodes: &mut [Node], values: &HashMap<String, String>) {
        for node in nodes.iter_mut() {
            match *node {
                Node::Declaration(ref mut declaration) => {
                    declaration.prop = self.replace(&declaration.prop, values);
                    declaration.value = self.replace(&declaration.value, values);
                }
                Node::Rule(ref mut rule) => {
                    rule.selector = self.replace(&rule.selector, values);
                    self.substitute(&mut rule.children, values);
                }
                Node::AtRule(ref mut at_rule) => {
                    at_rule.params = self.replace(&at_rule.params, values);
                    self.substitute(&mut at_rule.children, values);
                }
            }
        }
    }
}

impl SimpleVars {
    fn replace(&self, input: &str, values: &HashMap<String, String>) -> String {
        self.ident
            .replace_all(input, |captures: &Captures| {
                match values.get(&captures[1]) {
                    Some(value) => value.clone(),
                    // unassigned names stay literal
                    None => captures[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn it_replaces_assigned_names_in_values() {
        let mut nodes = vec![Node::decl("color", "$color")];
        SimpleVars::new().substitute(&mut nodes, &values(&[("color", "black")]));
        assert_eq!(nodes, vec![Node::decl("color", "black")]);
    }

    #[test]
    fn it_leaves_unassigned_names_alone() {
        let mut nodes = vec![Node::decl("color", "$color $other")];
        SimpleVars::new().substitute(&mut nodes, &values(&[("color", "black")]));
        assert_eq!(nodes, vec![Node::decl("color", "black $other")]);
    }

    #[test]
    fn it_reaches_selectors_params_and_nested_children() {
        let mut nodes = vec![
            Node::rule(".$name", vec![Node::decl("width", "$w")]),
            Node::at_rule("media", "(min-width: $w)", vec![]),
        ];
        SimpleVars::new().substitute(&mut nodes, &values(&[("name", "btn"), ("w", "10px")]));
        assert_eq!(
            nodes,
            vec![
                Node::rule(".btn", vec![Node::decl("width", "10px")]),
                Node::at_rule("media", "(min-width: 10px)", vec![]),
            ]
        );
    }

    #[test]
    fn empty_bindings_erase_the_placeholder() {
        let mut nodes = vec![Node::decl("margin", "$m auto")];
        SimpleVars::new().substitute(&mut nodes, &values(&[("m", "")]));
        assert_eq!(nodes, vec![Node::decl("margin", " auto")]);
    }
}
