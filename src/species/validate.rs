//! Integrity checks for species records

use std::collections::BTreeSet;
use std::fmt;

use crate::content::ContentIndex;
use crate::species::record::Species;

/// One problem found in a species record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyName,
    DefaultFocusMissing { focus: String },
    DuplicateFocus { focus: String },
    LikedAndDisliked { item: String },
    UnknownLike { item: String },
    UnknownDislike { item: String },
    UnknownTag { tag: String },
    EmptyGraphic,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyName => write!(f, "species name is empty"),
            ValidationIssue::DefaultFocusMissing { focus } => {
                write!(f, "default focus {} is not among the species' foci", focus)
            }
            ValidationIssue::DuplicateFocus { focus } => write!(f, "focus {} listed twice", focus),
            ValidationIssue::LikedAndDisliked { item } => {
                write!(f, "{} is both liked and disliked", item)
            }
            ValidationIssue::UnknownLike { item } => write!(f, "liked item {} is unknown", item),
            ValidationIssue::UnknownDislike { item } => {
                write!(f, "disliked item {} is unknown", item)
            }
            ValidationIssue::UnknownTag { tag } => write!(f, "tag {} is unknown", tag),
            ValidationIssue::EmptyGraphic => write!(f, "graphic path is empty"),
        }
    }
}

/// Every issue with `species`, in field order
pub fn validate_species(species: &Species, index: &ContentIndex) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if species.name.trim().is_empty() {
        issues.push(ValidationIssue::EmptyName);
    }

    for tag in &species.tags {
        if !index.is_known_tag(tag) {
            issues.push(ValidationIssue::UnknownTag { tag: tag.clone() });
        }
    }

    let mut seen = BTreeSet::new();
    for focus in species.focus_names() {
        if !seen.insert(focus) {
            issues.push(ValidationIssue::DuplicateFocus {
                focus: focus.to_string(),
            });
        }
    }

    if let Some(default_focus) = &species.default_focus {
        if species.focus(default_focus).is_none() {
            issues.push(ValidationIssue::DefaultFocusMissing {
                focus: default_focus.clone(),
            });
        }
    }

    for item in species.likes.intersection(&species.dislikes) {
        issues.push(ValidationIssue::LikedAndDisliked { item: item.clone() });
    }
    for item in &species.likes {
        if !index.resolves(item) {
            issues.push(ValidationIssue::UnknownLike { item: item.clone() });
        }
    }
    for item in &species.dislikes {
        if !index.resolves(item) {
            issues.push(ValidationIssue::UnknownDislike { item: item.clone() });
        }
    }

    if species.graphic.trim().is_empty() {
        issues.push(ValidationIssue::EmptyGraphic);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::condition::Condition;
    use crate::species::builder::SpeciesBuilder;
    use crate::species::catalog::sp_fulver;
    use crate::species::record::FocusType;

    #[test]
    fn test_fulver_is_clean() {
        let issues = validate_species(&sp_fulver(), &ContentIndex::builtin());
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn test_reports_each_problem() {
        let focus = FocusType::new("FOCUS_INDUSTRY", Condition::Planet, "");
        let species = SpeciesBuilder::new("SP_BROKEN")
            .focus(focus.clone())
            .focus(focus)
            .default_focus("FOCUS_STOCKPILE")
            .likes(["PLC_LIBERTY", "BLD_NOWHERE"])
            .dislikes(["PLC_LIBERTY"])
            .tags(["SPARKLY"])
            .build();

        let issues = validate_species(&species, &ContentIndex::builtin());
        assert_eq!(
            issues,
            vec![
                ValidationIssue::UnknownTag { tag: "SPARKLY".into() },
                ValidationIssue::DuplicateFocus {
                    focus: "FOCUS_INDUSTRY".into()
                },
                ValidationIssue::DefaultFocusMissing {
                    focus: "FOCUS_STOCKPILE".into()
                },
                ValidationIssue::LikedAndDisliked {
                    item: "PLC_LIBERTY".into()
                },
                ValidationIssue::UnknownLike {
                    item: "BLD_NOWHERE".into()
                },
                ValidationIssue::EmptyGraphic,
            ]
        );
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            ValidationIssue::LikedAndDisliked { item: "X".into() }.to_string(),
            "X is both liked and disliked"
        );
    }
}
