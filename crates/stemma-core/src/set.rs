//! The canonical person set.
//!
//! # Overview
//!
//! [`PersonSet`] owns every [`Person`] in the graph and is the unit the
//! whole engine operates on: components take a snapshot (or a mutable
//! borrow) and return it transformed. Iteration order is deterministic
//! (sorted by id), which keeps resolution, reconciliation, and layout
//! reproducible run to run.
//!
//! # Deletion policy
//!
//! Removal is transactional: taking a person out also scrubs every other
//! person's parent/spouse reference to the removed id, so the set never
//! holds a dangling reference after a delete. This is an explicit policy
//! choice — the alternative (leave references and let the verifier flag
//! them) pushes repair work onto every consumer.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Person, PersonId};

/// Name → id lookup used by the resolver and reconciler.
///
/// Built over existing people first, then extended with newly minted ids.
/// On duplicate display names the person with the smallest id wins, which
/// keeps the mapping stable across rebuilds.
pub type NameLookup = HashMap<String, PersonId>;

/// The canonical, deterministic set of people.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSet {
    people: BTreeMap<PersonId, Person>,
}

impl PersonSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of records (e.g. a loaded tree file).
    ///
    /// Later records win on duplicate ids.
    #[must_use]
    pub fn from_people(people: impl IntoIterator<Item = Person>) -> Self {
        let mut set = Self::new();
        for person in people {
            set.insert(person);
        }
        set
    }

    /// Insert or replace a person, keyed by its id.
    pub fn insert(&mut self, person: Person) -> Option<Person> {
        self.people.insert(person.id.clone(), person)
    }

    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn get_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.people.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.people.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterate people in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<PersonId> {
        self.people.keys().cloned().collect()
    }

    /// Consume the set into a sorted list of records for storage.
    #[must_use]
    pub fn into_people(self) -> Vec<Person> {
        self.people.into_values().collect()
    }

    /// Clone the records into a sorted list for serialization.
    #[must_use]
    pub fn to_people(&self) -> Vec<Person> {
        self.people.values().cloned().collect()
    }

    /// Build the trimmed-name → id lookup over the current set.
    ///
    /// Names are trimmed; empty names are skipped. On duplicates the
    /// smallest id wins (id-order iteration makes this deterministic).
    #[must_use]
    pub fn name_index(&self) -> NameLookup {
        let mut index = NameLookup::new();
        for person in self.people.values() {
            let name = person.name.trim();
            if name.is_empty() {
                continue;
            }
            index
                .entry(name.to_string())
                .or_insert_with(|| person.id.clone());
        }
        index
    }

    /// Ids of every person holding `id` in a parent slot.
    #[must_use]
    pub fn children_of(&self, id: &PersonId) -> Vec<PersonId> {
        self.people
            .values()
            .filter(|p| p.has_parent(id))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Ids of every person whose spouse field is `id`.
    #[must_use]
    pub fn spouse_claimants_of(&self, id: &PersonId) -> Vec<PersonId> {
        self.people
            .values()
            .filter(|p| p.spouse.as_ref() == Some(id))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Remove a person and scrub every reference to it.
    ///
    /// Returns the removed person, or `None` if the id was not present.
    /// After this call no remaining person references the removed id.
    pub fn remove(&mut self, id: &PersonId) -> Option<Person> {
        let removed = self.people.remove(id)?;

        let mut scrubbed = 0;
        for person in self.people.values_mut() {
            scrubbed += person.clear_references_to(id);
        }
        if scrubbed > 0 {
            tracing::debug!(id = %id, refs = scrubbed, "scrubbed references to removed person");
        }

        Some(removed)
    }
}

impl IntoIterator for PersonSet {
    type Item = Person;
    type IntoIter = std::collections::btree_map::IntoValues<PersonId, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.into_values()
    }
}

impl FromIterator<Person> for PersonSet {
    fn from_iter<T: IntoIterator<Item = Person>>(iter: T) -> Self {
        Self::from_people(iter)
    }
}
