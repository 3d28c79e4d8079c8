use super::*;

#[test]
fn test_token_set_membership() {
    let set = TokenSet::new().with(TokenKind::Let).with(TokenKind::Eof);
    assert!(set.contains(TokenKind::Let));
    assert!(set.contains(TokenKind::Eof));
    assert!(!set.contains(TokenKind::Call));
    assert_eq!(set.count(), 2);
    assert!(TokenSet::new().is_empty());
}

#[test]
fn test_union_and_without() {
    let a = TokenSet::single(TokenKind::If);
    let b = TokenSet::single(TokenKind::While);
    let both = a.union(b);
    assert!(both.contains(TokenKind::If) && both.contains(TokenKind::While));
    assert!(!both.without(TokenKind::If).contains(TokenKind::If));
}

#[test]
fn test_sql_end_is_structural() {
    assert!(!SQL_END.contains(TokenKind::Select));
    assert!(!SQL_END.contains(TokenKind::Let));
    assert!(SQL_END.contains(TokenKind::End));
    assert!(SQL_END.contains(TokenKind::Function));
}

#[test]
fn test_synchronize_stops_at_recovery_token() {
    let tokens = fgl_lexer::lex("1 + ) ] LET x = 1");
    let mut cursor = Cursor::new(&tokens);
    let skipped = synchronize(&mut cursor, STMT_START);
    assert_eq!(skipped, 4);
    assert!(cursor.check(TokenKind::Let));
}

#[test]
fn test_synchronize_reaches_eof() {
    let tokens = fgl_lexer::lex("1 2 3");
    let mut cursor = Cursor::new(&tokens);
    synchronize(&mut cursor, ITEM_START);
    assert!(cursor.is_at_end());
}
