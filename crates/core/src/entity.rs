//! Entity trait: identity + continuity across state changes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Entity marker + minimal interface ("has an identifier").
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Build an id -> record lookup over a snapshot of entities.
///
/// When the snapshot holds several records with the same id, the first one
/// wins; later duplicates never replace it.
pub fn index_by_id<'a, E, I>(entities: I) -> HashMap<E::Id, &'a E>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let iter = entities.into_iter();
    let mut index = HashMap::with_capacity(iter.size_hint().0);
    for entity in iter {
        if let Entry::Vacant(slot) = index.entry(entity.id().clone()) {
            slot.insert(entity);
        }
    }
    index
}
