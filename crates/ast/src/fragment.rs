/// Fragment matching policy.
///
/// A fragment with no type condition always matches. A fragment with a type
/// condition naming type `T` matches iff the current object's `__typename`
/// equals `T` exactly. Matching on interface or union types is a documented
/// gap (see the design notes): this revision treats it as non-matching,
/// since there is no supertype map available to resolve it.
pub fn is_matching_fragment(type_condition: Option<&str>, typename: Option<&str>) -> bool {
    match type_condition {
        None => true,
        Some(expected) => typename == Some(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_fragment_always_matches() {
        assert!(is_matching_fragment(None, Some("Horse")));
        assert!(is_matching_fragment(None, None));
    }

    #[test]
    fn typed_fragment_matches_exact_typename_only() {
        assert!(is_matching_fragment(Some("Horse"), Some("Horse")));
        assert!(!is_matching_fragment(Some("Horse"), Some("Camel")));
        assert!(!is_matching_fragment(Some("Horse"), None));
    }
}
