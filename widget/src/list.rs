//! Ordered list of todos.
//!
//! The list is the only owner of [`Todo`] values. Mutations re-validate their
//! input and are silent no-ops when it falls outside the bounds; callers learn
//! whether anything changed from the return value.

use crate::types::{Todo, TodoId};
use crate::validation::TextBounds;
use serde::{Deserialize, Serialize};

/// Todos in insertion order with unique ids
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<Todo>,
    last_issued: Option<TodoId>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_issued: None,
        }
    }

    /// Appends trimmed `text` under `candidate`, or a later id if `candidate`
    /// is not past every id issued so far
    ///
    /// The stored text is trimmed, unlike a raw form value, so rendering and
    /// re-validation see the same string.
    ///
    /// Returns the assigned id, or `None` if `text` is out of bounds or no
    /// later id is left.
    pub fn add(&mut self, candidate: TodoId, text: &str, bounds: &TextBounds) -> Option<TodoId> {
        if !bounds.accepts(text) {
            return None;
        }
        let id = match self.last_issued {
            Some(last) if candidate <= last => last.next()?,
            _ => candidate,
        };
        self.last_issued = Some(id);
        self.items.push(Todo::new(id, text.trim().to_string()));
        Some(id)
    }

    /// Replaces the text of `id` with trimmed `text`
    ///
    /// Returns false if `id` is absent or `text` is out of bounds.
    pub fn update(&mut self, id: TodoId, text: &str, bounds: &TextBounds) -> bool {
        if !bounds.accepts(text) {
            return false;
        }
        match self.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                text.trim().clone_into(&mut todo.text);
                true
            },
            None => false,
        }
    }

    /// Removes `id`, returning the removed item
    pub fn remove(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Returns the todo with `id`
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    /// Returns the todo at a 0-based display position
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Todo> {
        self.items.get(index)
    }

    /// Checks if `id` is in the list
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// 0-based display position of `id`
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|todo| todo.id == id)
    }

    /// Iterates in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.items.iter()
    }

    /// Number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list has no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds() -> TextBounds {
        TextBounds::default()
    }

    #[test]
    fn add_appends_trimmed_text() {
        let mut list = TodoList::new();
        let first = list.add(TodoId::new(10), "  Buy milk ", &bounds());
        let second = list.add(TodoId::new(20), "Walk dog", &bounds());

        assert_eq!(first, Some(TodoId::new(10)));
        assert_eq!(second, Some(TodoId::new(20)));
        let texts: Vec<_> = list.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Buy milk", "Walk dog"]);
    }

    #[test]
    fn add_rejects_out_of_bounds() {
        let mut list = TodoList::new();
        assert_eq!(list.add(TodoId::new(1), "ab", &bounds()), None);
        assert_eq!(list.add(TodoId::new(1), &"x".repeat(33), &bounds()), None);
        assert!(list.is_empty());
    }

    #[test]
    fn colliding_ids_are_bumped() {
        let mut list = TodoList::new();
        let a = list.add(TodoId::new(5), "first", &bounds());
        let b = list.add(TodoId::new(5), "second", &bounds());
        let c = list.add(TodoId::new(3), "third", &bounds());

        assert_eq!(a, Some(TodoId::new(5)));
        assert_eq!(b, Some(TodoId::new(6)));
        assert_eq!(c, Some(TodoId::new(7)));
    }

    #[test]
    fn ids_are_not_reused_after_remove() {
        let mut list = TodoList::new();
        let id = list.add(TodoId::new(5), "first", &bounds()).unwrap();
        list.remove(id);
        assert_eq!(list.add(TodoId::new(5), "again", &bounds()), Some(TodoId::new(6)));
    }

    #[test]
    fn exhausted_ids_are_never_reissued() {
        let mut list = TodoList::new();
        let max = TodoId::new(i64::MAX);
        assert_eq!(list.add(max, "first", &bounds()), Some(max));
        assert_eq!(list.add(TodoId::new(1), "second", &bounds()), None);
        assert_eq!(list.add(max, "third", &bounds()), None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(max).map(|t| t.text.as_str()), Some("first"));
    }

    #[test]
    fn update_replaces_only_matching_text() {
        let mut list = TodoList::new();
        let a = list.add(TodoId::new(1), "one one", &bounds()).unwrap();
        let b = list.add(TodoId::new(2), "two two", &bounds()).unwrap();

        assert!(list.update(b, " deux ", &bounds()));
        assert_eq!(list.get(a).unwrap().text, "one one");
        assert_eq!(list.get(b).unwrap().text, "deux");
        assert_eq!(list.position(b), Some(1));
    }

    #[test]
    fn update_rejects_invalid_or_missing() {
        let mut list = TodoList::new();
        let a = list.add(TodoId::new(1), "one one", &bounds()).unwrap();
        assert!(!list.update(a, "no", &bounds()));
        assert!(!list.update(TodoId::new(99), "valid text", &bounds()));
        assert_eq!(list.get(a).unwrap().text, "one one");
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut list = TodoList::new();
        list.add(TodoId::new(1), "one one", &bounds());
        assert!(list.remove(TodoId::new(2)).is_none());
        assert_eq!(list.len(), 1);
    }

    proptest! {
        #[test]
        fn add_grows_by_one_at_the_end(
            texts in proptest::collection::vec("[a-z]{3,10}", 1..8),
            candidate in 0i64..4,
        ) {
            let mut list = TodoList::new();
            for text in &texts {
                let before = list.len();
                let id = list.add(TodoId::new(candidate), text, &bounds());
                prop_assert!(id.is_some());
                prop_assert_eq!(list.len(), before + 1);
                prop_assert_eq!(list.at(before).map(|t| t.text.as_str()), Some(text.as_str()));
            }
            let mut ids: Vec<_> = list.iter().map(|t| t.id).collect();
            ids.dedup();
            prop_assert_eq!(ids.len(), texts.len());
        }

        #[test]
        fn remove_shrinks_by_one(count in 1usize..6, pick in 0usize..6) {
            let mut list = TodoList::new();
            for i in 0..count {
                list.add(TodoId::new(0), &format!("item {i}"), &bounds());
            }
            let target = list.at(pick % count).map(|t| t.id).unwrap();
            prop_assert!(list.remove(target).is_some());
            prop_assert_eq!(list.len(), count - 1);
            prop_assert!(!list.contains(target));
        }
    }
}
