use crate::{CoreError, Strictness};
use std::{collections::BTreeSet, fmt::Debug};

///
/// PersistenceContext
///
/// External store that orphaned relationship items are deleted through.
///

pub trait PersistenceContext<T> {
    fn remove(&mut self, item: &T) -> Result<(), CoreError>;
}

///
/// OneToMany
///
/// Parent-side membership of a one-to-many relationship.
///
/// `items` holds the current members and `to_delete` the members removed since
/// the last cleanup. The two sets never share an element.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OneToMany<T: Ord> {
    items: BTreeSet<T>,
    to_delete: BTreeSet<T>,
}

impl<T: Ord> Default for OneToMany<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> OneToMany<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeSet::new(),
            to_delete: BTreeSet::new(),
        }
    }

    /// Read-only view of the current members.
    #[must_use]
    pub const fn items(&self) -> &BTreeSet<T> {
        &self.items
    }

    /// Members removed and waiting for cleanup.
    #[must_use]
    pub const fn pending(&self) -> &BTreeSet<T> {
        &self.to_delete
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a member. Returns false when it was already present.
    pub fn add(&mut self, item: T) -> bool {
        self.add_with(item, |_| {})
    }

    /// Add a member after `link` has pointed it back at its parent.
    pub fn add_with(&mut self, mut item: T, link: impl FnOnce(&mut T)) -> bool {
        link(&mut item);
        self.to_delete.remove(&item);

        self.items.insert(item)
    }

    /// Move `item` from the members into the pending-removal set.
    ///
    /// `None` is a no-op. An item that is not a member is an illegal state.
    pub fn delete(&mut self, item: Option<&T>) -> Result<(), CoreError>
    where
        T: Debug,
    {
        let Some(item) = item else {
            return Ok(());
        };

        match self.items.take(item) {
            Some(removed) => {
                self.to_delete.insert(removed);
                Ok(())
            }
            None => Err(CoreError::IllegalState(format!(
                "delete failed: cannot find item {item:?}"
            ))),
        }
    }

    /// Delete every pending item through `ctx`, returning how many succeeded.
    ///
    /// Lenient cleanup treats a failed delete as "already gone" and drops the
    /// item. Strict cleanup stops at the first failure and keeps that item and
    /// everything after it pending.
    pub fn cleanup<C>(&mut self, ctx: &mut C, strictness: Strictness) -> Result<usize, CoreError>
    where
        C: PersistenceContext<T> + ?Sized,
        T: Debug,
    {
        let mut removed = 0;

        while let Some(item) = self.to_delete.pop_first() {
            match ctx.remove(&item) {
                Ok(()) => removed += 1,
                Err(err) if strictness.is_strict() => {
                    self.to_delete.insert(item);
                    return Err(err);
                }
                Err(err) => {
                    tracing::debug!(
                        item = ?item,
                        error = %err,
                        "orphan cleanup absorbed a failed delete"
                    );
                }
            }
        }

        Ok(removed)
    }
}

///
/// TESTS
///
