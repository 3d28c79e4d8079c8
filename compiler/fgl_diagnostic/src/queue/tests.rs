use super::*;

const SOURCE: &str = "MAIN\n  CALL f()\n  CALL g()\nEND MAIN\n";

fn err(code: ErrorCode, start: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(msg)
        .with_label(Span::new(start, start + 1), "")
}

#[test]
fn test_flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::with_config(SOURCE, DiagnosticConfig::unlimited());
    queue.add(err(ErrorCode::E2001, 18, "no definition found for g"));
    queue.add(err(ErrorCode::E2001, 7, "no definition found for f"));

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 2);
    assert_eq!((flushed[0].0, flushed[0].1), (2, 3));
    assert_eq!((flushed[1].0, flushed[1].1), (3, 3));
    assert!(queue.is_empty());
}

#[test]
fn test_syntax_errors_deduplicated_per_line() {
    let mut queue = DiagnosticQueue::new(SOURCE);
    assert!(queue.add(err(ErrorCode::E1001, 7, "unexpected token")));
    assert!(!queue.add(err(ErrorCode::E1002, 12, "expected expression")));
    assert!(queue.add(err(ErrorCode::E1001, 18, "unexpected token")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_identical_resolution_errors_deduplicated() {
    let mut queue = DiagnosticQueue::new(SOURCE);
    assert!(queue.add(err(ErrorCode::E2001, 7, "no definition found for f")));
    assert!(!queue.add(err(ErrorCode::E2001, 7, "no definition found for f")));
    assert!(queue.add(err(ErrorCode::E2002, 7, "arity")));
}

#[test]
fn test_error_limit_appends_overflow_note() {
    let config = DiagnosticConfig {
        error_limit: 1,
        deduplicate: false,
    };
    let mut queue = DiagnosticQueue::with_config(SOURCE, config);
    assert!(queue.add(err(ErrorCode::E2001, 7, "a")));
    assert!(!queue.add(err(ErrorCode::E2001, 18, "b")));
    assert!(queue.limit_reached());

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 2);
    assert_eq!(flushed[1].2.code, ErrorCode::E9001);
}
