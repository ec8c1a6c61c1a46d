//! Conditional visibility engine.
//!
//! Evaluates the catalog's visibility predicates against the current field
//! values. The result is the single derived state shared by the validator,
//! builder and renderer for one pipeline run, so they agree on which school
//! branch is active by construction.

use std::collections::BTreeSet;

use apg_domain::{
    is_high_school_related, Condition, ContextGroup, FieldKey, FormSnapshot, Requirement,
    FIELD_CATALOG, NOT_SURE, OTHER,
};
use tracing::debug;

/// Which part of the school-details group applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolBranch {
    /// Status empty or not high-school related; the whole group is hidden.
    Hidden,
    /// Group shown, neither detail sub-group active.
    Plain,
    /// School type is `Other`.
    OtherSchool,
    /// Qualifications contain `Not sure` (and school type is not `Other`).
    UnknownQualification,
}

impl SchoolBranch {
    fn resolve(fields: &FormSnapshot) -> Self {
        let status = fields.education_status.trim();
        if status.is_empty() || !is_high_school_related(status) {
            SchoolBranch::Hidden
        } else if fields.school_type == OTHER {
            SchoolBranch::OtherSchool
        } else if fields.qualifications.iter().any(|q| q == NOT_SURE) {
            SchoolBranch::UnknownQualification
        } else {
            SchoolBranch::Plain
        }
    }

    pub fn is_shown(self) -> bool {
        self != SchoolBranch::Hidden
    }

    pub fn active_context(self) -> Option<ContextGroup> {
        match self {
            SchoolBranch::OtherSchool => Some(ContextGroup::OtherSchool),
            SchoolBranch::UnknownQualification => Some(ContextGroup::UnknownQualification),
            SchoolBranch::Hidden | SchoolBranch::Plain => None,
        }
    }
}

/// Visible and required fields for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    school: SchoolBranch,
    visible: BTreeSet<FieldKey>,
    required: BTreeSet<FieldKey>,
}

impl VisibilitySet {
    pub fn school(&self) -> SchoolBranch {
        self.school
    }

    pub fn active_context(&self) -> Option<ContextGroup> {
        self.school.active_context()
    }

    pub fn is_visible(&self, key: FieldKey) -> bool {
        self.visible.contains(&key)
    }

    pub fn is_required(&self, key: FieldKey) -> bool {
        self.required.contains(&key)
    }

    /// Hidden fields in catalog order.
    pub fn hidden(&self) -> impl Iterator<Item = FieldKey> + '_ {
        FIELD_CATALOG
            .iter()
            .map(|spec| spec.key)
            .filter(|key| !self.visible.contains(key))
    }

    /// Clears every hidden field so a later un-hide starts empty.
    /// Returns the keys that actually held a value.
    pub fn discard_hidden(&self, fields: &mut FormSnapshot) -> Vec<FieldKey> {
        let cleared: Vec<FieldKey> = self.hidden().filter(|key| fields.clear(*key)).collect();
        if !cleared.is_empty() {
            debug!(count = cleared.len(), "discarded values of hidden fields");
        }
        cleared
    }
}

/// Computes visibility for the given field values. Pure.
pub fn compute_visibility(fields: &FormSnapshot) -> VisibilitySet {
    let school = SchoolBranch::resolve(fields);
    let mut visible = BTreeSet::new();
    let mut required = BTreeSet::new();

    for spec in FIELD_CATALOG {
        let shown = match spec.visible_when {
            Condition::Always => true,
            Condition::OtherSelected(source) => fields.text(source) == OTHER,
            Condition::SchoolDetails => school.is_shown(),
            Condition::SchoolContext(group) => school.active_context() == Some(group),
        };
        if !shown {
            continue;
        }
        visible.insert(spec.key);
        if spec.requirement == Requirement::RequiredWhenVisible {
            required.insert(spec.key);
        }
    }

    VisibilitySet {
        school,
        visible,
        required,
    }
}

/// Computes visibility and discards hidden values in place.
///
/// None of the predicates read a field that can itself be hidden, so one
/// pass leaves the snapshot consistent.
pub fn apply_visibility(fields: &mut FormSnapshot) -> VisibilitySet {
    let visibility = compute_visibility(fields);
    visibility.discard_hidden(fields);
    visibility
}
