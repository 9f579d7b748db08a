use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::ast::{AtRule, Declaration, Node, Rule, Source};

/// A declarative mixin body: nested key/value pairs. Keys beginning with `@`
/// become at-rules, other keys with nested values become selector rules, and
/// scalar values become declarations. Entries keep their insertion order,
/// which fixes the order of the emitted sibling nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    entries: Vec<(String, TemplateValue)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplateValue {
    Scalar(String),
    Nested(Template),
}

impl Template {
    pub fn new() -> Template {
        Template::default()
    }

    /// Chainable insert; a repeated key is appended, not merged, matching the
    /// converter's strictly sequential walk.
    pub fn set<K, V>(mut self, key: K, value: V) -> Template
    where
        K: Into<String>,
        V: Into<TemplateValue>,
    {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn entries(&self) -> &[(String, TemplateValue)] {
        &self.entries
    }

    /// Reads a JSON object as a template. Scalars are coerced to text the way
    /// declaration values are written (`1` → `"1"`, `null` → `""`). Returns
    /// `None` when the value is not an object, which loaders report as an
    /// invalid definition file.
    pub fn from_json(value: &Value) -> Option<Template> {
        let object = value.as_object()?;
        let mut template = Template::new();
        for (key, value) in object {
            let entry = match value {
                Value::Object(..) => match Template::from_json(value) {
                    Some(nested) => TemplateValue::Nested(nested),
                    None => return None,
                },
                Value::String(s) => TemplateValue::Scalar(s.clone()),
                Value::Null => TemplateValue::Scalar(String::new()),
                other => TemplateValue::Scalar(other.to_string()),
            };
            template.entries.push((key.clone(), entry));
        }
        Some(template)
    }

    /// The Object-to-Tree conversion: produces the AST fragment this template
    /// describes, stamping every node with the call site's source so errors
    /// and downstream tooling point at the `@include` that produced it.
    pub fn to_nodes(&self, source: Source) -> Vec<Node> {
        let mut nodes = Vec::new();
        for (key, value) in &self.entries {
            match *value {
                TemplateValue::Nested(ref nested) if key.starts_with('@') => {
                    let captures = at_name().captures(key).unwrap();
                    let name = captures[1].to_string();
                    let params = key[captures.get(0).unwrap().end()..].trim().to_string();
                    nodes.push(Node::AtRule(AtRule {
                        name,
                        params,
                        children: nested.to_nodes(source),
                        source,
                    }));
                }
                TemplateValue::Nested(ref nested) => {
                    nodes.push(Node::Rule(Rule {
                        selector: key.clone(),
                        children: nested.to_nodes(source),
                        source,
                    }));
                }
                TemplateValue::Scalar(ref scalar) => {
                    nodes.push(Node::Declaration(Declaration {
                        prop: key.clone(),
                        value: scalar.clone(),
                        source,
                    }));
                }
            }
        }
        nodes
    }
}

/// Compiled once; templates are converted on every expansion of a template
/// mixin, so the at-rule key pattern must not be rebuilt per call.
fn at_name() -> &'static Regex {
    static AT_NAME: OnceLock<Regex> = OnceLock::new();
    AT_NAME.get_or_init(|| Regex::new(r"^@(\S*)").unwrap())
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> TemplateValue {
        TemplateValue::Scalar(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> TemplateValue {
        TemplateValue::Scalar(value)
    }
}

impl From<Template> for TemplateValue {
    fn from(value: Template) -> TemplateValue {
        TemplateValue::Nested(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, Source};

    #[test]
    fn scalars_become_declarations() {
        let template = Template::new().set("color", "black");
        assert_eq!(
            template.to_nodes(Source::default()),
            vec![Node::decl("color", "black")]
        );
    }

    #[test]
    fn nested_structures_become_rules() {
        let template = Template::new().set("b", Template::new().set("one", "1"));
        assert_eq!(
            template.to_nodes(Source::default()),
            vec![Node::rule("b", vec![Node::decl("one", "1")])]
        );
    }

    #[test]
    fn at_keys_become_at_rules_with_params() {
        let template = Template::new().set(
            "@media screen",
            Template::new().set("b", Template::new().set("one", "1")),
        );
        assert_eq!(
            template.to_nodes(Source::default()),
            vec![Node::at_rule(
                "media",
                "screen",
                vec![Node::rule("b", vec![Node::decl("one", "1")])],
            )]
        );
    }

    #[test]
    fn sibling_order_matches_insertion_order() {
        let template = Template::new()
            .set("z", "26")
            .set("a", "1")
            .set("m", "13");
        assert_eq!(
            template.to_nodes(Source::default()),
            vec![
                Node::decl("z", "26"),
                Node::decl("a", "1"),
                Node::decl("m", "13"),
            ]
        );
    }

    #[test]
    fn nodes_carry_the_given_source() {
        let source = Source::new(4, 2);
        let template = Template::new().set("b", Template::new().set("one", "1"));
        let nodes = template.to_nodes(source);
        assert_eq!(nodes[0].source(), source);
        assert_eq!(nodes[0].children()[0].source(), source);
    }

    #[test]
    fn repeated_conversions_yield_identical_nodes() {
        let template = Template::new().set(
            "@media screen",
            Template::new().set("one", "1"),
        );
        let first = template.to_nodes(Source::default());
        let second = template.to_nodes(Source::default());
        assert_eq!(first, second);
    }

    #[test]
    fn json_objects_load_with_coerced_scalars() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{ "@media screen": { "b": { "one": 1, "two": true, "three": null } } }"#,
        )
        .unwrap();
        let template = Template::from_json(&json).unwrap();
        assert_eq!(
            template,
            Template::new().set(
                "@media screen",
                Template::new().set(
                    "b",
                    Template::new()
                        .set("one", "1")
                        .set("two", "true")
                        .set("three", ""),
                ),
            )
        );
    }

    #[test]
    fn json_non_objects_are_rejected() {
        let json: serde_json::Value = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(Template::from_json(&json), None);
    }
}
