//! Property suites for the consistency engine's guarantees: any set the
//! engine produces satisfies the structural invariants, propagation is
//! idempotent at its fixed point, and the share codec is lossless.

use proptest::prelude::*;
use stemma_core::edit::apply_edit;
use stemma_core::reconcile::{propagate, reconcile};
use stemma_core::resolve::resolve_candidates;
use stemma_core::share;
use stemma_core::{PersonSet, PersonId};

// Since generators.rs is a sibling file in tests/, we use #[path] to include it as a module.
#[path = "generators.rs"]
mod generators;
use generators::*;

/// Assert the §-invariants every engine-produced set must satisfy.
fn assert_invariants(set: &PersonSet) {
    for person in set.iter() {
        // No self-reference.
        assert_ne!(person.spouse.as_ref(), Some(&person.id), "{}", person.id);
        assert_ne!(person.parent_a.as_ref(), Some(&person.id), "{}", person.id);
        assert_ne!(person.parent_b.as_ref(), Some(&person.id), "{}", person.id);

        // Parent-slot non-duplication.
        if let (Some(a), Some(b)) = (&person.parent_a, &person.parent_b) {
            assert_ne!(a, b, "duplicate parents on {}", person.id);
        }

        // Spousal symmetry, where the partner exists.
        if let Some(spouse_id) = &person.spouse
            && let Some(spouse) = set.get(spouse_id)
        {
            assert_eq!(
                spouse.spouse.as_ref(),
                Some(&person.id),
                "asymmetric spouse {} -> {}",
                person.id,
                spouse_id
            );
        }

        // At-most-one-spouse.
        assert!(
            set.spouse_claimants_of(&person.id).len() <= 1,
            "contested spouse {}",
            person.id
        );
    }
}

/// Drive the engine the way the application does: one resolve+reconcile
/// round per batch, against an initially empty set.
fn run_batches(batches: &[Vec<stemma_core::Candidate>]) -> PersonSet {
    let mut set = PersonSet::new();
    for (round, batch) in batches.iter().enumerate() {
        let millis = 1_000 + round as i64;
        let (lookup, _) = resolve_candidates(&mut set, batch, millis);
        reconcile(&mut set, batch, &lookup);
    }
    set
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn reconciled_sets_satisfy_all_invariants(batches in arb_batches()) {
        let set = run_batches(&batches);
        assert_invariants(&set);
    }

    #[test]
    fn propagation_is_idempotent(batches in arb_batches()) {
        let mut set = run_batches(&batches);
        let snapshot = set.clone();

        let report = propagate(&mut set);

        prop_assert!(!report.changed(), "propagation changed an already-reconciled set");
        prop_assert_eq!(set, snapshot);
    }

    #[test]
    fn resolution_never_shrinks_the_set(batches in arb_batches()) {
        let mut set = PersonSet::new();
        let mut last_len = 0;
        for (round, batch) in batches.iter().enumerate() {
            let (lookup, _) = resolve_candidates(&mut set, batch, 1_000 + round as i64);
            reconcile(&mut set, batch, &lookup);
            prop_assert!(set.len() >= last_len);
            last_len = set.len();
        }
    }

    #[test]
    fn edits_preserve_invariants(
        batches in arb_batches(),
        picks in prop::collection::vec((0usize..32, prop::option::of(0usize..32)), 0..24),
    ) {
        let mut set = run_batches(&batches);
        let ids = set.ids();
        if ids.is_empty() {
            return Ok(());
        }

        for (subject_pick, spouse_pick) in picks {
            let subject = ids[subject_pick % ids.len()].clone();
            let mut edited = set.get(&subject).expect("subject exists").clone();
            edited.spouse = spouse_pick.map(|p| ids[p % ids.len()].clone());
            // Self-marriages are rejected; everything else must apply.
            let _ = apply_edit(&mut set, edited);
        }

        assert_invariants(&set);
    }

    #[test]
    fn removal_leaves_no_dangling_references(batches in arb_batches(), pick in 0usize..32) {
        let mut set = run_batches(&batches);
        let ids = set.ids();
        if ids.is_empty() {
            return Ok(());
        }

        let removed = ids[pick % ids.len()].clone();
        set.remove(&removed);

        for person in set.iter() {
            prop_assert!(!person.references(&removed));
        }
    }

    #[test]
    fn share_codec_round_trips_exactly(records in arb_person_records()) {
        // Dedup ids are guaranteed by construction (p-<index>), and even
        // dangling references must survive the trip untouched.
        let set = PersonSet::from_people(records);
        let decoded = share::decode(&share::encode(&set)).expect("decode");
        prop_assert_eq!(decoded, set);
    }

    #[test]
    fn minted_ids_never_collide_within_a_batch(batch in arb_batch()) {
        let mut set = PersonSet::new();
        let (lookup, report) = resolve_candidates(&mut set, &batch, 7_000);

        prop_assert_eq!(set.len(), report.created);
        let mut seen: std::collections::HashSet<PersonId> = std::collections::HashSet::new();
        for id in lookup.values() {
            prop_assert!(seen.insert(id.clone()), "duplicate id {}", id);
        }
    }
}
