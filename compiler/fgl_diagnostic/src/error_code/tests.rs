use super::*;

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let classified = code.is_syntax_error()
            || code.is_resolve_error()
            || code.as_str().starts_with("E9");
        assert!(classified, "{code} has no phase");
        assert!(!code.description().is_empty());
    }
}

#[test]
fn test_parse_roundtrip() {
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::parse(code.as_str()), Some(*code));
    }
    assert_eq!(ErrorCode::parse("e2002"), Some(ErrorCode::E2002));
    assert_eq!(ErrorCode::parse("E7777"), None);
}

#[test]
fn test_phase_predicates() {
    assert!(ErrorCode::E0001.is_syntax_error());
    assert!(ErrorCode::E1008.is_syntax_error());
    assert!(!ErrorCode::E2001.is_syntax_error());
    assert!(ErrorCode::E2006.is_resolve_error());
    assert!(!ErrorCode::E9001.is_resolve_error());
}
