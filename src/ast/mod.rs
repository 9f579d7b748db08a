pub mod node;
pub mod root;

pub use self::node::{AtRule, Declaration, Node, Rule, Source};
pub use self::root::Root;
