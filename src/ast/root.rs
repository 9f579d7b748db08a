use crate::ast::node::Node;

/// The top level of a stylesheet: an ordered list of nodes with no enclosing
/// selector. The host parser produces one of these and hands it to the engine
/// for expansion in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Root {
    pub nodes: Vec<Node>,
}

impl Root {
    pub fn new(nodes: Vec<Node>) -> Root {
        Root { nodes }
    }
}
