//! Validation helpers shared by the catalog backends.

use std::collections::HashSet;

use polyweave_model::{Fragment, FragmentKind};

use crate::error::{CatalogError, CatalogResult};

/// Check a fragment listing for catalog invariants.
///
/// Every fragment needs a non-blank display name, and no two fragments of the
/// same kind may share one. Names are compared exactly; the same name may be
/// reused across kinds.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidFragment`] for a blank name and
/// [`CatalogError::DuplicateFragment`] for a repeated `(kind, name)` pair.
pub fn validate_fragments(fragments: &[Fragment]) -> CatalogResult<()> {
    let mut seen: HashSet<(FragmentKind, &str)> = HashSet::new();
    for fragment in fragments {
        if fragment.name.trim().is_empty() {
            return Err(CatalogError::InvalidFragment {
                field: "name",
                reason: "blank",
                value: Some(fragment.name.clone()),
            });
        }
        if !seen.insert((fragment.kind, fragment.name.as_str())) {
            return Err(CatalogError::DuplicateFragment {
                kind: fragment.kind,
                name: fragment.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_names_per_kind() {
        let fragments = [
            Fragment::new(FragmentKind::Input, "file"),
            Fragment::new(FragmentKind::Input, "stream"),
            Fragment::new(FragmentKind::Output, "file"),
        ];
        assert!(validate_fragments(&fragments).is_ok());
    }

    #[test]
    fn rejects_blank_names() {
        let fragments = [Fragment::new(FragmentKind::Input, "   ")];
        let err = validate_fragments(&fragments).expect_err("blank name");
        assert!(matches!(
            err,
            CatalogError::InvalidFragment { field: "name", .. }
        ));
    }

    #[test]
    fn rejects_duplicate_names_within_a_kind() {
        let fragments = [
            Fragment::new(FragmentKind::Input, "file"),
            Fragment::new(FragmentKind::Input, "file"),
        ];
        let err = validate_fragments(&fragments).expect_err("duplicate name");
        match err {
            CatalogError::DuplicateFragment { kind, name } => {
                assert_eq!(kind, FragmentKind::Input);
                assert_eq!(name, "file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
