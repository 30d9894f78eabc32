//! Read-only invariant verification over a person set.
//!
//! The engine's other passes *maintain* the invariants; this module
//! *checks* them, producing a list of typed violations for diagnostics
//! (`stm verify`) and for tests asserting the engine's guarantees. It
//! never mutates the set.

use std::fmt;

use crate::model::PersonId;
use crate::set::PersonSet;

/// The relationship field a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefField {
    ParentA,
    ParentB,
    Spouse,
}

impl fmt::Display for RefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ParentA => "parent slot A",
            Self::ParentB => "parent slot B",
            Self::Spouse => "spouse",
        };
        write!(f, "{label}")
    }
}

/// One detected consistency violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `person.spouse` is set but the partner does not point back.
    AsymmetricSpouse { person: PersonId, spouse: PersonId },
    /// More than one person claims `person` as spouse.
    ContestedSpouse {
        person: PersonId,
        claimants: Vec<PersonId>,
    },
    /// A relationship field points at the person itself.
    SelfReference { person: PersonId, field: RefField },
    /// Both parent slots hold the same id.
    DuplicateParents { person: PersonId, parent: PersonId },
    /// A relationship field points at an id absent from the set.
    DanglingReference {
        person: PersonId,
        field: RefField,
        target: PersonId,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsymmetricSpouse { person, spouse } => write!(
                f,
                "'{person}' names '{spouse}' as spouse but '{spouse}' does not point back"
            ),
            Self::ContestedSpouse { person, claimants } => {
                let ids: Vec<&str> = claimants.iter().map(PersonId::as_str).collect();
                write!(
                    f,
                    "'{person}' is claimed as spouse by {} people: {}",
                    claimants.len(),
                    ids.join(", ")
                )
            }
            Self::SelfReference { person, field } => {
                write!(f, "'{person}' references itself in {field}")
            }
            Self::DuplicateParents { person, parent } => {
                write!(f, "'{person}' holds '{parent}' in both parent slots")
            }
            Self::DanglingReference {
                person,
                field,
                target,
            } => write!(f, "'{person}' {field} points at missing person '{target}'"),
        }
    }
}

/// Check every invariant over the set and return the violations found.
///
/// Output order is deterministic: people in id order, fields in
/// (parent A, parent B, spouse) order, structural checks before the
/// cross-person ones.
#[must_use]
pub fn check(set: &PersonSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    for person in set.iter() {
        let fields = [
            (RefField::ParentA, person.parent_a.as_ref()),
            (RefField::ParentB, person.parent_b.as_ref()),
            (RefField::Spouse, person.spouse.as_ref()),
        ];

        for (field, target) in fields {
            let Some(target) = target else { continue };
            if *target == person.id {
                violations.push(Violation::SelfReference {
                    person: person.id.clone(),
                    field,
                });
            } else if !set.contains(target) {
                violations.push(Violation::DanglingReference {
                    person: person.id.clone(),
                    field,
                    target: target.clone(),
                });
            }
        }

        if let (Some(a), Some(b)) = (&person.parent_a, &person.parent_b)
            && a == b
        {
            violations.push(Violation::DuplicateParents {
                person: person.id.clone(),
                parent: a.clone(),
            });
        }

        if let Some(spouse_id) = &person.spouse
            && let Some(spouse) = set.get(spouse_id)
            && spouse.spouse.as_ref() != Some(&person.id)
        {
            violations.push(Violation::AsymmetricSpouse {
                person: person.id.clone(),
                spouse: spouse_id.clone(),
            });
        }
    }

    for person in set.iter() {
        let claimants = set.spouse_claimants_of(&person.id);
        if claimants.len() > 1 {
            violations.push(Violation::ContestedSpouse {
                person: person.id.clone(),
                claimants,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Person};

    fn person(id: &str) -> Person {
        Person::new(id, format!("Name {id}"), Gender::Other)
    }

    fn id(raw: &str) -> PersonId {
        PersonId::new(raw)
    }

    #[test]
    fn clean_set_has_no_violations() {
        let mut set = PersonSet::new();
        let mut a = person("p-1");
        a.spouse = Some(id("p-2"));
        set.insert(a);
        let mut b = person("p-2");
        b.spouse = Some(id("p-1"));
        set.insert(b);

        assert!(check(&set).is_empty());
    }

    #[test]
    fn asymmetric_spouse_is_reported() {
        let mut set = PersonSet::new();
        let mut a = person("p-1");
        a.spouse = Some(id("p-2"));
        set.insert(a);
        set.insert(person("p-2"));

        let violations = check(&set);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::AsymmetricSpouse { .. })));
    }

    #[test]
    fn contested_spouse_is_reported() {
        let mut set = PersonSet::new();
        set.insert(person("p-1"));
        let mut b = person("p-2");
        b.spouse = Some(id("p-1"));
        set.insert(b);
        let mut c = person("p-3");
        c.spouse = Some(id("p-1"));
        set.insert(c);

        let violations = check(&set);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::ContestedSpouse { claimants, .. } if claimants.len() == 2
        )));
    }

    #[test]
    fn self_reference_is_reported() {
        let mut set = PersonSet::new();
        let mut a = person("p-1");
        a.parent_a = Some(id("p-1"));
        set.insert(a);

        let violations = check(&set);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::SelfReference {
                field: RefField::ParentA,
                ..
            }
        )));
    }

    #[test]
    fn duplicate_parents_are_reported() {
        let mut set = PersonSet::new();
        set.insert(person("p-2"));
        let mut a = person("p-1");
        a.parent_a = Some(id("p-2"));
        a.parent_b = Some(id("p-2"));
        set.insert(a);

        let violations = check(&set);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::DuplicateParents { .. })));
    }

    #[test]
    fn dangling_reference_is_reported() {
        let mut set = PersonSet::new();
        let mut a = person("p-1");
        a.spouse = Some(id("p-gone"));
        set.insert(a);

        let violations = check(&set);
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::DanglingReference {
                field: RefField::Spouse,
                ..
            }
        )));
    }

    #[test]
    fn violations_have_readable_messages() {
        let v = Violation::DanglingReference {
            person: id("p-1"),
            field: RefField::Spouse,
            target: id("p-gone"),
        };
        let text = v.to_string();
        assert!(text.contains("p-1"));
        assert!(text.contains("p-gone"));
        assert!(text.contains("spouse"));
    }
}
