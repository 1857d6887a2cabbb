//! Name canonicalization shared by the catalog, the resolver and the store.
//!
//! Only ASCII letters are case-folded. Non-ASCII letters and digits are kept
//! as they are, so "Fomapan" and "FOMAPAN" compare equal but "Ärger" and
//! "ärger" do not.

/// Canonical form used for every name comparison.
///
/// Drops everything that is not a letter or digit, then lowercases ASCII.
/// `"Kodak Tri-X 400"`, `"kodaktrix400"` and `"KODAK_TRIX_400"` all become
/// `"kodaktrix400"`.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Keeps letters and digits, preserving case
pub fn strip_non_alphanumerics(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// First character uppercased, the rest lowercased ("tRIX400" -> "Trix400")
pub fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spellings_collapse() {
        let expected = normalize("Kodak Tri-X 400");
        assert_eq!(expected, "kodaktrix400");
        assert_eq!(normalize("KODAKTRIX400"), expected);
        assert_eq!(normalize("kodak-trix-400"), expected);
        assert_eq!(normalize("KODAK_TRIX_400"), expected);
    }

    #[test]
    fn test_idempotent() {
        for input in ["Ilford HP5+", "  Portra 160 NC ", "Ärger_1", "", "---"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_non_ascii_letters_pass_through() {
        assert_eq!(normalize("Ärger 1"), "Ärger1");
    }

    #[test]
    fn test_strip_keeps_case() {
        assert_eq!(strip_non_alphanumerics("Tri-X 400"), "TriX400");
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(capitalized("tRIX400"), "Trix400");
        assert_eq!(capitalized("hp5"), "Hp5");
        assert_eq!(capitalized(""), "");
    }
}
