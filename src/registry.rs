use std::collections::HashMap;
use std::fs;
use std::mem;
use std::path::Path;

use glob::glob;
use log::debug;

use crate::ast::{AtRule, Node, Root};
use crate::error::{ErrorKind, MixinError, Result};
use crate::invocation;
use crate::mixin::{Mixin, MixinBody};
use crate::options::Options;
use crate::parameters::MixinParameter;
use crate::template::Template;

/// The mixin name table for one engine run. Written while options are loaded
/// and during the definition-collection walk, read-only for the rest of the
/// pass. A name registered twice keeps the later definition.
#[derive(Debug, Default)]
pub struct MixinRegistry {
    mixins: HashMap<String, Mixin>,
}

impl MixinRegistry {
    pub fn new() -> MixinRegistry {
        MixinRegistry {
            mixins: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Mixin> {
        self.mixins.get(name)
    }

    pub fn register(&mut self, mixin: Mixin) {
        debug!("registering mixin `{}`", mixin.name);
        self.mixins.insert(mixin.name.clone(), mixin);
    }

    /// Loads every configured source, lowest precedence first: directories,
    /// then glob patterns, then directly supplied mixins.
    pub fn populate(&mut self, options: Options) -> Result<()> {
        for dir in &options.mixins_dir {
            self.load_dir(dir)?;
        }
        for pattern in &options.mixins_files {
            for entry in glob(pattern)? {
                let path = entry?;
                if path.is_file() {
                    self.load_template_file(&path)?;
                }
            }
        }
        for (name, body) in options.mixins {
            self.register(Mixin::external(name, body));
        }
        Ok(())
    }

    /// Non-recursive scan; entries are sorted by file name so that
    /// last-write-wins is deterministic across platforms. Only `.json`
    /// template files are loaded, anything else in the directory is ignored.
    fn load_dir(&mut self, dir: &Path) -> Result<()> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            paths.push(entry?.path());
        }
        paths.sort();

        for path in paths {
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            self.load_template_file(&path)?;
        }
        Ok(())
    }

    /// A definition file holds one JSON object; the file's base name (minus
    /// extension) becomes the mixin name.
    fn load_template_file(&mut self, path: &Path) -> Result<()> {
        let name = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => return Ok(()),
        };

        let contents = fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&contents).map_err(|err| MixinError {
            kind: ErrorKind::InvalidDefinitionFile,
            message: format!("{}: {}", path.display(), err),
            location: None,
        })?;
        let template = match Template::from_json(&json) {
            Some(template) => template,
            None => {
                return Err(MixinError {
                    kind: ErrorKind::InvalidDefinitionFile,
                    message: format!("{}: top level is not an object", path.display()),
                    location: None,
                })
            }
        };

        debug!("loaded template mixin `{}` from {}", name, path.display());
        self.register(Mixin::external(name, MixinBody::Template(template)));
        Ok(())
    }

    /// The definition-collection walk: captures every `@mixin` block as a
    /// Fragment definition and removes it from the tree, so all definitions
    /// are visible before any `@include` is resolved.
    pub fn collect(&mut self, root: &mut Root) -> Result<()> {
        let nodes = mem::take(&mut root.nodes);
        root.nodes = self.collect_children(nodes)?;
        Ok(())
    }

    fn collect_children(&mut self, nodes: Vec<Node>) -> Result<Vec<Node>> {
        let mut kept = Vec::new();
        for node in nodes {
            match node {
                Node::AtRule(at_rule) if at_rule.name == "mixin" => {
                    self.define(at_rule)?;
                }
                Node::AtRule(mut at_rule) => {
                    at_rule.children = self.collect_children(at_rule.children)?;
                    kept.push(Node::AtRule(at_rule));
                }
                Node::Rule(mut rule) => {
                    rule.children = self.collect_children(rule.children)?;
                    kept.push(Node::Rule(rule));
                }
                other => kept.push(other),
            }
        }
        Ok(kept)
    }

    fn define(&mut self, at_rule: AtRule) -> Result<()> {
        let parsed = invocation::parse_name_and_args(&at_rule)?;
        let parameters = parsed
            .args
            .iter()
            .map(|arg| MixinParameter::new(arg))
            .collect();
        let has_content = contains_content(&at_rule.children);

        self.register(Mixin {
            name: parsed.name,
            parameters,
            has_content,
            // nested @mixin blocks inside the body stay part of the fragment
            body: MixinBody::Fragment(at_rule.children),
        });
        Ok(())
    }
}

/// True when a `@content` marker appears anywhere in the block, at any depth.
pub fn contains_content(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match *node {
        Node::AtRule(ref at_rule) if at_rule.name == "content" => true,
        ref other => contains_content(other.children()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, Root};
    use crate::error::ErrorKind;
    use crate::template::Template;

    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mixers-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn collect_removes_mixin_declarations_from_the_tree() {
        let mut root = Root::new(vec![
            Node::at_rule("mixin", "black", vec![Node::decl("color", "black")]),
            Node::rule("a", vec![]),
        ]);
        let mut registry = MixinRegistry::new();
        registry.collect(&mut root).unwrap();

        assert_eq!(root, Root::new(vec![Node::rule("a", vec![])]));
        assert!(registry.get("black").is_some());
    }

    #[test]
    fn collect_parses_parameters_and_defaults() {
        let mut root = Root::new(vec![Node::at_rule(
            "mixin",
            "c($color: black, $width)",
            vec![],
        )]);
        let mut registry = MixinRegistry::new();
        registry.collect(&mut root).unwrap();

        let mixin = registry.get("c").unwrap();
        assert_eq!(mixin.parameters.len(), 2);
        assert_eq!(mixin.parameters[0].name, "color");
        assert_eq!(mixin.parameters[0].default, Some("black".into()));
        assert_eq!(mixin.parameters[1].name, "width");
        assert_eq!(mixin.parameters[1].default, None);
    }

    #[test]
    fn collect_finds_content_markers_below_the_top_level() {
        let mut root = Root::new(vec![Node::at_rule(
            "mixin",
            "m",
            vec![Node::at_rule(
                "media",
                "screen",
                vec![Node::at_rule("content", "", vec![])],
            )],
        )]);
        let mut registry = MixinRegistry::new();
        registry.collect(&mut root).unwrap();

        assert!(registry.get("m").unwrap().has_content);
    }

    #[test]
    fn the_last_definition_of_a_name_wins() {
        let mut root = Root::new(vec![
            Node::at_rule("mixin", "m", vec![Node::decl("old", "1")]),
            Node::at_rule("mixin", "m", vec![Node::decl("new", "2")]),
        ]);
        let mut registry = MixinRegistry::new();
        registry.collect(&mut root).unwrap();

        match registry.get("m").unwrap().body {
            MixinBody::Fragment(ref nodes) => {
                assert_eq!(nodes, &vec![Node::decl("new", "2")]);
            }
            ref other => panic!("expected a fragment body, got {:?}", other),
        }
    }

    #[test]
    fn populate_loads_json_templates_from_a_directory() {
        let dir = scratch_dir("dir-load");
        fs::write(dir.join("shadow.json"), r#"{ "box-shadow": "none" }"#).unwrap();
        fs::write(dir.join("notes.txt"), "not a mixin").unwrap();

        let mut registry = MixinRegistry::new();
        registry
            .populate(Options::new().mixins_dir(&dir))
            .unwrap();

        assert!(registry.get("shadow").is_some());
        assert!(registry.get("notes").is_none());
    }

    #[test]
    fn a_later_directory_overrides_an_earlier_one() {
        let first = scratch_dir("multi-dir-first");
        let second = scratch_dir("multi-dir-second");
        fs::write(first.join("m.json"), r#"{ "from": "first" }"#).unwrap();
        fs::write(second.join("m.json"), r#"{ "from": "second" }"#).unwrap();

        let mut registry = MixinRegistry::new();
        registry
            .populate(Options::new().mixins_dir(&first).mixins_dir(&second))
            .unwrap();

        match registry.get("m").unwrap().body {
            MixinBody::Template(ref template) => {
                assert_eq!(template, &Template::new().set("from", "second"));
            }
            ref other => panic!("expected a template body, got {:?}", other),
        }
    }

    #[test]
    fn populate_loads_templates_from_globs() {
        let dir = scratch_dir("glob-load");
        fs::write(dir.join("a.json"), r#"{ "a": "1" }"#).unwrap();
        fs::write(dir.join("b.json"), r#"{ "b": "2" }"#).unwrap();

        let pattern = dir.join("*.json").to_str().unwrap().to_string();
        let mut registry = MixinRegistry::new();
        registry
            .populate(Options::new().mixins_files(pattern))
            .unwrap();

        assert!(registry.get("a").is_some());
        assert!(registry.get("b").is_some());
    }

    #[test]
    fn directly_supplied_mixins_override_loaded_files() {
        let dir = scratch_dir("precedence");
        fs::write(dir.join("m.json"), r#"{ "from": "file" }"#).unwrap();

        let mut registry = MixinRegistry::new();
        registry
            .populate(
                Options::new()
                    .mixins_dir(&dir)
                    .template("m", Template::new().set("from", "code")),
            )
            .unwrap();

        match registry.get("m").unwrap().body {
            MixinBody::Template(ref template) => {
                assert_eq!(template, &Template::new().set("from", "code"));
            }
            ref other => panic!("expected a template body, got {:?}", other),
        }
    }

    #[test]
    fn non_object_definition_files_are_rejected() {
        let dir = scratch_dir("bad-file");
        fs::write(dir.join("broken.json"), "[1, 2]").unwrap();

        let mut registry = MixinRegistry::new();
        let err = registry
            .populate(Options::new().mixins_dir(&dir))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidDefinitionFile);
    }
}
