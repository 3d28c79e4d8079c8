use super::*;

#[test]
fn test_routine_context() {
    let ctx = ParseContext::routine(TokenKind::Function);
    assert!(ctx.closes(TokenKind::Function));
    assert!(!ctx.closes(TokenKind::While));
    assert!(ctx.stops_at(TokenKind::Main));
    assert!(!ctx.allows_exit(LoopKind::While));
    assert!(ctx.allows_exit(LoopKind::Program));
}

#[test]
fn test_entering_accumulates() {
    let ctx = ParseContext::routine(TokenKind::Main)
        .entering(Some(LoopKind::While), TokenKind::While)
        .entering(Some(LoopKind::Case), TokenKind::Case);
    assert!(ctx.closes(TokenKind::While));
    assert!(ctx.closes(TokenKind::Case));
    assert!(ctx.closes(TokenKind::Main));
    assert!(ctx.allows_exit(LoopKind::While));
    assert!(ctx.allows_exit(LoopKind::Case));
    assert!(!ctx.allows_exit(LoopKind::For));
}

#[test]
fn test_continue_targets() {
    let ctx = ParseContext::routine(TokenKind::Main)
        .entering(Some(LoopKind::Case), TokenKind::Case)
        .entering(Some(LoopKind::Foreach), TokenKind::Foreach);
    assert!(ctx.allows_continue(LoopKind::Foreach));
    assert!(!ctx.allows_continue(LoopKind::Case));
    assert!(!ctx.allows_continue(LoopKind::Program));
}

#[test]
fn test_if_does_not_add_exit_target() {
    let ctx = ParseContext::routine(TokenKind::Main)
        .entering(None, TokenKind::If)
        .stopping_at(TokenKind::Else);
    assert!(ctx.closes(TokenKind::If));
    assert!(ctx.stops_at(TokenKind::Else));
    assert!(!ctx.allows_exit(LoopKind::While));
}

#[test]
fn test_menu_arms_reset_inside_nested_construct() {
    let menu = ParseContext::routine(TokenKind::Main)
        .entering(Some(LoopKind::Menu), TokenKind::Menu)
        .with_menu_arms();
    assert!(menu.in_menu());
    let nested = menu.entering(Some(LoopKind::While), TokenKind::While);
    assert!(!nested.in_menu());
    assert!(nested.allows_exit(LoopKind::Menu));
}
