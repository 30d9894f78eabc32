//! Proptest generators shared by the invariant suites.

use chrono::NaiveDate;
use proptest::prelude::*;
use stemma_core::model::{Candidate, Gender, Person, PersonId};

/// Small closed name pool so batches collide with existing people often —
/// collisions are where resolution and reconciliation earn their keep.
pub const NAME_POOL: &[&str] = &[
    "An", "Bo", "Chen", "Dai", "En", "Fang", "Gui", "Hua", "Jin", "Lan",
];

pub fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
    ]
}

pub fn arb_pool_name() -> impl Strategy<Value = String> {
    prop::sample::select(NAME_POOL).prop_map(str::to_string)
}

pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("day 1..=28 exists in every month")
    })
}

pub fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (
        arb_pool_name(),
        prop::option::of(arb_gender()),
        prop::option::of(arb_date()),
        prop::option::of("[a-z]{1,12}"),
        prop::collection::vec(arb_pool_name(), 0..=2),
        prop::option::of(arb_pool_name()),
    )
        .prop_map(|(name, gender, birth, bio, parent_names, spouse_name)| Candidate {
            name,
            gender,
            birth,
            bio,
            parent_names,
            spouse_name,
        })
}

pub fn arb_batch() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(arb_candidate(), 0..12)
}

pub fn arb_batches() -> impl Strategy<Value = Vec<Vec<Candidate>>> {
    prop::collection::vec(arb_batch(), 1..4)
}

/// A person record with arbitrary fields, including references that may
/// dangle — the share codec must carry those losslessly too.
pub fn arb_person_record(index: usize, population: usize) -> impl Strategy<Value = Person> {
    let arb_ref = move || {
        prop::option::of((0..population.max(1) * 2).prop_map(|i| PersonId::new(format!("p-{i}"))))
    };
    (
        arb_pool_name(),
        arb_gender(),
        prop::option::of(arb_date()),
        prop::option::of(arb_date()),
        prop::option::of("[a-z]{1,16}"),
        arb_ref(),
        arb_ref(),
        arb_ref(),
    )
        .prop_map(
            move |(name, gender, birth, death, bio, parent_a, parent_b, spouse)| {
                let mut person = Person::new(format!("p-{index}"), name, gender);
                person.birth = birth;
                person.death = death;
                person.bio = bio;
                person.parent_a = parent_a;
                person.parent_b = parent_b;
                person.spouse = spouse;
                person
            },
        )
}

pub fn arb_person_records() -> impl Strategy<Value = Vec<Person>> {
    (0usize..16).prop_flat_map(|n| {
        let records: Vec<_> = (0..n).map(|i| arb_person_record(i, n)).collect();
        records
    })
}
