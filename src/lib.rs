mod list;
mod node;

pub use list::{IntoIter, Iter, SinglyList, RECURSION_LIMIT};
pub use node::{Link, Node};
