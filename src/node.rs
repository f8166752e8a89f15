use std::fmt;

/// Owning link to the next cell of a chain.
pub type Link<T> = Option<Box<Node<T>>>;

/// A single cell of a singly linked chain.
///
/// A node owns its successor, so dropping a node drops everything behind it.
/// Chains held by a [`SinglyList`](crate::SinglyList) are torn down
/// iteratively by the list itself; a chain built by hand with [`Node::new`]
/// is dropped recursively, one frame per node.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    pub fn new(next: Link<T>, value: T) -> Self {
        Node { value, next }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn next(&self) -> Option<&Node<T>> {
        self.next.as_deref()
    }

    /// Mutable access to the outgoing link, for re-pointing a detached chain.
    pub fn next_mut(&mut self) -> &mut Link<T> {
        &mut self.next
    }

    /// Unwraps the node, dropping its successor (recursively, for a
    /// hand-built chain).
    pub fn into_value(self) -> T {
        self.value
    }
}

// Only this cell is printed, so formatting never walks the chain.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_without_successor() {
        let node = Node::new(None, 7);
        assert_eq!(node.value(), &7);
        assert!(node.next().is_none());
    }

    #[test]
    fn new_node_links_to_successor() {
        let tail = Box::new(Node::new(None, 1));
        let head = Node::new(Some(tail), 2);

        assert_eq!(head.value(), &2);
        assert_eq!(head.next().map(Node::value), Some(&1));
        assert!(head.next().and_then(Node::next).is_none());
    }

    #[test]
    fn next_mut_repoints_link() {
        let mut head = Node::new(Some(Box::new(Node::new(None, 1))), 2);
        let detached = head.next_mut().take();

        assert!(head.next().is_none());
        assert_eq!(detached.map(|node| (*node).into_value()), Some(1));

        *head.next_mut() = Some(Box::new(Node::new(None, 3)));
        assert_eq!(head.next().map(Node::value), Some(&3));
    }

    #[test]
    fn debug_prints_only_this_cell() {
        let head = Node::new(Some(Box::new(Node::new(None, 1))), 2);
        assert_eq!(format!("{:?}", head), "Node { value: 2, has_next: true }");
        assert_eq!(
            format!("{:?}", head.next()),
            "Some(Node { value: 1, has_next: false })"
        );
    }

    #[test]
    fn into_value_returns_stored_value() {
        let node = Node::new(None, String::from("hello"));
        assert_eq!(node.into_value(), "hello");
    }
}
