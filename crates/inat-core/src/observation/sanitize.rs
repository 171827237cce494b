//! Species folder names from scientific names.

/// Characters that may not appear in a species folder name.
const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Turns a scientific name into a folder name.
///
/// - Removes `\ / * ? : " < > |`
/// - Replaces each space with `_`
///
/// Returns an empty string when nothing survives; callers pick a fallback.
pub fn sanitize_species_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(sanitize_species_name("Danaus plexippus"), "Danaus_plexippus");
        assert_eq!(
            sanitize_species_name("Quercus alba  x rubra"),
            "Quercus_alba__x_rubra"
        );
    }

    #[test]
    fn removes_forbidden_characters() {
        assert_eq!(
            sanitize_species_name(r#"Genus/sub\g*e?n:u"s<x>y|z"#),
            "Genussubgenusxyz"
        );
    }

    #[test]
    fn only_forbidden_yields_empty() {
        assert_eq!(sanitize_species_name("?/:*"), "");
    }

    #[test]
    fn idempotent() {
        let names = ["Canis lupus", "A/b c?d", "Ursus arctos horribilis", "??"];
        for n in names {
            let once = sanitize_species_name(n);
            assert_eq!(sanitize_species_name(&once), once);
            assert!(!once.contains(FORBIDDEN));
            assert!(!once.contains(' '));
        }
    }

    #[test]
    fn keeps_other_unicode() {
        assert_eq!(sanitize_species_name("Æsculus ×hybrida"), "Æsculus_×hybrida");
    }
}
