use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use log::{debug, trace};

use crate::node::{Link, Node};

/// Chains longer than this are not reversed recursively; `reverse_recursive`
/// relinks them iteratively instead.
pub const RECURSION_LIMIT: usize = 4096;

/// A singly linked list that grows at the head.
///
/// `insert` prepends, so the most recently inserted element is always the
/// first one yielded by iteration.
pub struct SinglyList<T> {
    head: Link<T>,
    size: usize,
}

impl<T> SinglyList<T> {
    pub fn new() -> Self {
        SinglyList {
            head: None,
            size: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&Node<T>> {
        self.head.as_deref()
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn insert(&mut self, value: T) -> &mut Self {
        let new_node = Box::new(Node::new(self.head.take(), value));
        self.head = Some(new_node);
        self.size += 1;
        self
    }

    pub fn delete_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let Node { value, next } = *node;
            self.head = next;
            self.size -= 1;
            value
        })
    }

    /// Removes the first element equal to `value` and returns it.
    ///
    /// Later duplicates stay in place.
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.value != *value) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let Some(removed) = cursor.take() else {
            trace!("delete: no match among {} nodes", self.size);
            return None;
        };

        let Node { value: removed, next } = *removed;
        *cursor = next;
        self.size -= 1;
        Some(removed)
    }

    pub fn find(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|candidate| *candidate == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Reverses the chain by detaching each node and prepending it onto a
    /// fresh chain. No node is reallocated.
    pub fn reverse_in_place(&mut self) -> &mut Self {
        let mut reversed: Link<T> = None;
        let mut current = self.head.take();

        while let Some(mut node) = current {
            current = mem::replace(&mut node.next, reversed);
            reversed = Some(node);
        }

        self.head = reversed;
        self
    }

    /// Reverses the chain by recursing down the tail.
    ///
    /// Each frame handles one node, so the stack grows with the list. Lists
    /// longer than [`RECURSION_LIMIT`] fall back to [`reverse_in_place`],
    /// which yields the same order.
    ///
    /// [`reverse_in_place`]: SinglyList::reverse_in_place
    pub fn reverse_recursive(&mut self) -> &mut Self {
        if self.size > RECURSION_LIMIT {
            debug!(
                "reverse_recursive: {} nodes exceed the recursion limit of {}, relinking iteratively",
                self.size, RECURSION_LIMIT
            );
            return self.reverse_in_place();
        }

        self.head = reverse_onto(self.head.take(), None);
        self
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        while self.delete_front().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
            remaining: self.size,
        }
    }
}

// Moves the head of `link` onto `reversed`, then recurses on what remains.
// Links are flipped on the way down; the innermost call returns the new head.
fn reverse_onto<T>(link: Link<T>, reversed: Link<T>) -> Link<T> {
    match link {
        None => reversed,
        Some(mut node) => {
            let rest = mem::replace(&mut node.next, reversed);
            reverse_onto(rest, Some(node))
        }
    }
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for SinglyList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyList<T> {}

impl<T: fmt::Debug> fmt::Debug for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Builds a list whose head-to-tail order matches the iteration order.
impl<T> FromIterator<T> for SinglyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SinglyList::new();
        let mut tail = &mut list.head;

        for value in iter {
            let node = tail.insert(Box::new(Node::new(None, value)));
            tail = &mut node.next;
            list.size += 1;
        }

        list
    }
}

pub struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            current: self.current,
            remaining: self.remaining,
        }
    }
}

pub struct IntoIter<T> {
    list: SinglyList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.delete_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.size, Some(self.list.size))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for SinglyList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a SinglyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
fn reachable_nodes<T>(list: &SinglyList<T>) -> usize {
    let mut count = 0;
    let mut current = list.head();
    while let Some(node) = current {
        count += 1;
        current = node.next();
    }
    count
}


// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test))]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(u8),
        Delete(u8),
        DeleteFront,
        ReverseInPlace,
        ReverseRecursive,
    }

    fn operation() -> impl Strategy<Value = Operation> {
        // Small values so deletes hit present elements and duplicates.
        prop_oneof![
            3 => (0u8..8).prop_map(Operation::Insert),
            2 => (0u8..8).prop_map(Operation::Delete),
            1 => Just(Operation::DeleteFront),
            1 => Just(Operation::ReverseInPlace),
            1 => Just(Operation::ReverseRecursive),
        ]
    }

    proptest! {
        #[test]
        fn behaves_like_vec_model(operations in prop::collection::vec(operation(), 0..200)) {
            let mut list = SinglyList::new();
            let mut model: Vec<u8> = Vec::new();

            for operation in operations {
                match operation {
                    Operation::Insert(value) => {
                        list.insert(value);
                        model.insert(0, value);
                        prop_assert_eq!(list.front(), Some(&value));
                    }
                    Operation::Delete(value) => {
                        let expected = model
                            .iter()
                            .position(|candidate| *candidate == value)
                            .map(|index| model.remove(index));
                        prop_assert_eq!(list.delete(&value), expected);
                    }
                    Operation::DeleteFront => {
                        let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                        prop_assert_eq!(list.delete_front(), expected);
                    }
                    Operation::ReverseInPlace => {
                        list.reverse_in_place();
                        model.reverse();
                    }
                    Operation::ReverseRecursive => {
                        list.reverse_recursive();
                        model.reverse();
                    }
                }

                prop_assert_eq!(list.size(), model.len());
                prop_assert_eq!(reachable_nodes(&list), list.size());
                prop_assert_eq!(list.is_empty(), list.head().is_none());
                prop_assert_eq!(list.is_empty(), list.size() == 0);
                prop_assert_eq!(list.to_vec(), model.clone());
            }
        }

        #[test]
        fn reversal_strategies_agree(values in prop::collection::vec(any::<i32>(), 0..300)) {
            let mut iterative = SinglyList::new();
            for &value in &values {
                iterative.insert(value);
            }
            let mut recursive = iterative.clone();

            iterative.reverse_in_place();
            recursive.reverse_recursive();

            prop_assert_eq!(iterative.to_vec(), recursive.to_vec());
            prop_assert_eq!(iterative.to_vec(), values);
        }

        #[test]
        fn find_agrees_with_contains(values in prop::collection::vec(0u8..16, 0..50), probe in 0u8..16) {
            let list: SinglyList<u8> = values.iter().copied().collect();
            prop_assert_eq!(list.find(&probe).is_some(), values.contains(&probe));
            prop_assert_eq!(list.contains(&probe), values.contains(&probe));
        }
    }
}
