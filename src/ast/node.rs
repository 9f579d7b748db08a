use std::fmt;

/// Position of a node in the stylesheet the host parsed. The engine never
/// computes these; it threads them from directives into expanded nodes and
/// errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Source {
    pub line: usize,
    pub column: usize,
}

impl Source {
    pub fn new(line: usize, column: usize) -> Source {
        Source { line, column }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A stylesheet AST element. Each node owns its children outright; cloning a
/// node deep-copies the whole subtree, which is exactly what expansion relies
/// on to keep call sites independent.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub children: Vec<Node>,
    pub source: Source,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub children: Vec<Node>,
    pub source: Source,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub source: Source,
}

impl Node {
    pub fn rule<S: Into<String>>(selector: S, children: Vec<Node>) -> Node {
        Node::Rule(Rule {
            selector: selector.into(),
            children,
            source: Source::default(),
        })
    }

    pub fn at_rule<S: Into<String>, P: Into<String>>(
        name: S,
        params: P,
        children: Vec<Node>,
    ) -> Node {
        Node::AtRule(AtRule {
            name: name.into(),
            params: params.into(),
            children,
            source: Source::default(),
        })
    }

    pub fn decl<S: Into<String>, V: Into<String>>(prop: S, value: V) -> Node {
        Node::Declaration(Declaration {
            prop: prop.into(),
            value: value.into(),
            source: Source::default(),
        })
    }

    pub fn with_source(mut self, source: Source) -> Node {
        match self {
            Node::Rule(ref mut rule) => rule.source = source,
            Node::AtRule(ref mut at_rule) => at_rule.source = source,
            Node::Declaration(ref mut declaration) => declaration.source = source,
        }
        self
    }

    pub fn source(&self) -> Source {
        match *self {
            Node::Rule(ref rule) => rule.source,
            Node::AtRule(ref at_rule) => at_rule.source,
            Node::Declaration(ref declaration) => declaration.source,
        }
    }

    pub fn children(&self) -> &[Node] {
        match *self {
            Node::Rule(ref rule) => &rule.children,
            Node::AtRule(ref at_rule) => &at_rule.children,
            Node::Declaration(..) => &[],
        }
    }

    /// Declarations are leaves, so they have no child list to hand out.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match *self {
            Node::Rule(ref mut rule) => Some(&mut rule.children),
            Node::AtRule(ref mut at_rule) => Some(&mut at_rule.children),
            Node::Declaration(..) => None,
        }
    }
}
