//! Reconciles explicit and inferred field definitions into one name-unique set.
//!
//! Rules, applied over definitions in collection order (plain fields, then operations):
//!
//! 1. Explicit definitions claim their name; the first explicit definition per name wins.
//!    Their backing member is marked handled even when the definition is ignored.
//! 2. An explicit ignore suppresses its name for every inferred definition.
//! 3. Inferred definitions are keyed by backing member: the first one per member is kept,
//!    later ones for the same member are dropped. They only fill names nobody claimed;
//!    between inferred definitions sharing a name, the first one wins.
//! 4. Ignored definitions never reach the map.
//!
//! Accepted definitions enter the map in collection order, so declaration order survives.

use log::{debug, warn};
use std::collections::HashSet;

use crate::definition::{FieldMap, FieldOrigin, FilterFieldDefinition};
use crate::types::MemberRef;

/// Who already holds a name an inferred definition wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameConflict {
    Explicit,
    Suppressed,
    Inferred,
    Adopted,
}

/// Names taken so far, kept apart by origin so diagnostics say who won.
#[derive(Default)]
struct NameClaims<'a> {
    explicit: HashSet<&'a str>,
    suppressed: HashSet<&'a str>,
    inferred: HashSet<&'a str>,
    adopted: HashSet<String>,
}

impl NameClaims<'_> {
    fn conflict(&self, name: &str) -> Option<NameConflict> {
        if self.explicit.contains(name) {
            Some(NameConflict::Explicit)
        } else if self.suppressed.contains(name) {
            Some(NameConflict::Suppressed)
        } else if self.inferred.contains(name) {
            Some(NameConflict::Inferred)
        } else if self.adopted.contains(name) {
            Some(NameConflict::Adopted)
        } else {
            None
        }
    }
}

/// Merge `definitions` into `fields`.
///
/// `fields` may already hold entries (an adopted definition). Explicit definitions replace
/// same-named entries in place, explicit ignores remove them, inferred definitions never
/// touch them.
pub(crate) fn merge_field_definitions(
    definitions: Vec<FilterFieldDefinition>,
    fields: &mut FieldMap,
    handled_members: &mut HashSet<MemberRef>,
) {
    let mut accepted = vec![false; definitions.len()];
    let mut claims = NameClaims {
        adopted: fields.keys().map(str::to_string).collect(),
        ..NameClaims::default()
    };

    for (slot, definition) in definitions.iter().enumerate() {
        if definition.origin != FieldOrigin::Explicit {
            continue;
        }
        if let Some(member) = &definition.member {
            handled_members.insert(member.clone());
        }
        if definition.ignore {
            if !definition.name.is_empty() {
                claims.suppressed.insert(definition.name.as_str());
            }
            continue;
        }
        if !claims.explicit.insert(definition.name.as_str()) {
            warn!(
                "duplicate explicit filter field `{}`; keeping the first declaration",
                definition.name
            );
            continue;
        }
        accepted[slot] = true;
    }

    for (slot, definition) in definitions.iter().enumerate() {
        if definition.origin != FieldOrigin::Inferred {
            continue;
        }
        if let Some(member) = &definition.member {
            if !handled_members.insert(member.clone()) {
                debug!("dropping inferred filter field `{}`: member {member} already handled", definition.name);
                continue;
            }
        }
        if definition.ignore {
            continue;
        }
        let name = definition.name.as_str();
        let source = definition.member.as_ref().map(ToString::to_string).unwrap_or_else(|| "operation".to_string());
        match claims.conflict(name) {
            Some(NameConflict::Explicit | NameConflict::Suppressed) => {
                warn!("inferred filter field `{name}` ({source}) conflicts with an explicit declaration; the explicit one wins");
            }
            Some(NameConflict::Inferred) => {
                debug!("dropping inferred filter field `{name}` ({source}): an earlier inferred field has the same name");
            }
            Some(NameConflict::Adopted) => {
                debug!("inferred filter field `{name}` already present on the adopted definition");
            }
            None => {
                claims.inferred.insert(name);
                accepted[slot] = true;
            }
        }
    }

    for name in &claims.suppressed {
        if claims.adopted.contains(*name) {
            fields.remove(name);
        }
    }

    for (definition, keep) in definitions.into_iter().zip(accepted) {
        if keep {
            fields.insert(definition);
        }
    }
}
