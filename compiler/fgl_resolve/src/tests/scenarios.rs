use fgl_diagnostic::ErrorCode;
use fgl_ir::{LanguageVersion, NodeKind, Span};
use pretty_assertions::assert_eq;

use super::{check, check_with, find_name, find_node, parse};
use crate::analysis::{AnalysisEnv, ResolveError};
use crate::builtins::Receiver;
use crate::deferred::DeferredSearches;
use crate::entity::{Builtin, ExternalEntity, ExternalKind, Resolution};
use crate::provider::{DatabaseProvider, ProjectIndex, ProviderResult};

pub(super) const LIB: &str = "\
PUBLIC FUNCTION f() RETURNS INTEGER
  RETURN 1
END FUNCTION
FUNCTION pair()
  RETURN 1, 2
END FUNCTION
";

pub(super) fn sealed_lib() -> ProjectIndex {
    let mut index = ProjectIndex::new();
    index.add_module("lib", &parse(LIB));
    index.seal();
    index
}

fn codes(errors: &[ResolveError]) -> Vec<ErrorCode> {
    errors.iter().map(|e| e.code).collect()
}

// Calls

#[test]
fn test_returning_count_mismatch_against_other_module() {
    let index = sealed_lib();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let checked = check_with("MAIN\n  DEFINE a, b INTEGER\n  CALL f() RETURNING a, b\nEND MAIN\n", &env);

    assert_eq!(
        checked.messages(),
        vec!["unexpected number of return variables (2) found, expected 1"]
    );
    let call = find_node(&checked.ast, |k| matches!(k, NodeKind::Call { .. }));
    assert_eq!(checked.errors[0].code, ErrorCode::E2002);
    assert_eq!(checked.errors[0].span, checked.ast.span(call));
}

#[test]
fn test_returning_count_of_local_legacy_function() {
    let checked = check(
        "FUNCTION pair()\n  RETURN 1, 2\nEND FUNCTION\n\
         MAIN\n  DEFINE a INTEGER\n  CALL pair() RETURNING a\nEND MAIN\n",
    );
    assert_eq!(
        checked.messages(),
        vec!["unexpected number of return variables (1) found, expected 2"]
    );
}

#[test]
fn test_matching_returning_count_is_clean() {
    let index = sealed_lib();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let checked = check_with(
        "MAIN\n  DEFINE a, b INTEGER\n  CALL pair() RETURNING a, b\n  CALL f()\nEND MAIN\n",
        &env,
    );
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
    let callee = find_name(&checked.ast, "pair");
    assert!(matches!(
        checked.analysis.get(callee),
        Some(Resolution::External(ExternalEntity {
            kind: ExternalKind::Function { returns: 2 },
            ..
        }))
    ));
}

#[test]
fn test_unknown_function_with_sealed_provider_is_an_error() {
    let index = sealed_lib();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let checked = check_with("MAIN\n  CALL nowhere()\nEND MAIN\n", &env);
    assert_eq!(codes(&checked.errors), vec![ErrorCode::E2001]);
    assert_eq!(checked.messages(), vec!["no definition found for `nowhere`"]);
    assert!(checked.deferred.is_empty());
}

#[test]
fn test_unknown_function_without_provider_is_deferred() {
    let checked = check("MAIN\n  CALL nowhere()\nEND MAIN\n");
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
    assert_eq!(checked.deferred.positions("nowhere"), &[12]);
}

#[test]
fn test_builtin_functions_follow_version() {
    let source = "MAIN\n  CALL fgl_getfile(\"a\", \"b\")\nEND MAIN\n";
    let old = check_with(source, &AnalysisEnv::new(LanguageVersion::V2_30));
    assert!(old.deferred.contains("fgl_getfile"));

    let new = check_with(source, &AnalysisEnv::new(LanguageVersion::V3_20));
    assert!(new.deferred.is_empty());
    let callee = find_name(&new.ast, "fgl_getfile");
    assert!(matches!(
        new.analysis.get(callee),
        Some(Resolution::Builtin(Builtin::Function(f))) if f.name == "fgl_getfile"
    ));
}

const LENGTH_LIB: &str = "\
PUBLIC FUNCTION length(s STRING) RETURNS (INTEGER, INTEGER)
  RETURN 1, 2
END FUNCTION
";

const CALL_LENGTH: &str =
    "MAIN\n  DEFINE a, b INTEGER\n  CALL length(\"x\") RETURNING a, b\nEND MAIN\n";

#[test]
fn test_project_function_shadows_builtin() {
    let mut index = ProjectIndex::new();
    index.add_module("strings", &parse(LENGTH_LIB));
    index.seal();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let checked = check_with(CALL_LENGTH, &env);

    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
    let callee = find_name(&checked.ast, "length");
    assert!(matches!(
        checked.analysis.get(callee),
        Some(Resolution::External(ExternalEntity {
            kind: ExternalKind::Function { returns: 2 },
            ..
        }))
    ));
}

#[test]
fn test_builtin_used_when_provider_has_no_match() {
    let index = sealed_lib();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let checked = check_with(CALL_LENGTH, &env);

    assert_eq!(
        checked.messages(),
        vec!["unexpected number of return variables (2) found, expected 1"]
    );
    let callee = find_name(&checked.ast, "length");
    assert!(matches!(
        checked.analysis.get(callee),
        Some(Resolution::Builtin(Builtin::Function(f))) if f.name == "length"
    ));
}

#[test]
fn test_variable_cannot_be_called() {
    let checked = check("MAIN\n  DEFINE x, y INTEGER\n  LET y = x()\nEND MAIN\n");
    assert_eq!(codes(&checked.errors), vec![ErrorCode::E2004]);
    assert_eq!(
        checked.messages(),
        vec!["`x` is a variable and cannot be called"]
    );
}

#[test]
fn test_function_typed_variable_can_be_called() {
    let checked = check(
        "TYPE t_callback FUNCTION(a INTEGER) RETURNS INTEGER\n\
         MAIN\n  DEFINE cb t_callback\n  DEFINE r INTEGER\n  CALL cb(1) RETURNING r\nEND MAIN\n",
    );
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
}

#[test]
fn test_returning_into_constant_is_rejected() {
    let checked = check(
        "CONSTANT c_max = 10\n\
         FUNCTION one()\n  RETURN 1\nEND FUNCTION\n\
         MAIN\n  CALL one() RETURNING c_max\nEND MAIN\n",
    );
    assert_eq!(codes(&checked.errors), vec![ErrorCode::E2003]);
    assert_eq!(
        checked.messages(),
        vec!["`c_max` is a constant, not a variable"]
    );
}

#[test]
fn test_whenever_handler_resolves_to_function() {
    let checked = check(
        "FUNCTION handler()\nEND FUNCTION\n\
         MAIN\n  WHENEVER ANY ERROR CALL handler\nEND MAIN\n",
    );
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
    let whenever = find_node(&checked.ast, |k| matches!(k, NodeKind::Whenever { .. }));
    assert!(matches!(
        checked.analysis.get(whenever),
        Some(Resolution::Function { returns: 0, .. })
    ));
}

// Names and members

#[test]
fn test_undefined_variable() {
    let checked = check("MAIN\n  LET x = 1\nEND MAIN\n");
    assert_eq!(checked.messages(), vec!["no definition found for `x`"]);
    assert_eq!(checked.errors[0].span, Span::new(11, 12));
}

#[test]
fn test_record_members() {
    let checked = check(
        "TYPE t_rec RECORD\n  a INTEGER,\n  b STRING\nEND RECORD\n\
         MAIN\n  DEFINE r t_rec\n  LET r.a = 1\n  LET r.z = 2\nEND MAIN\n",
    );
    assert_eq!(checked.messages(), vec!["no definition found for `z` in `r`"]);
    let first = find_name(&checked.ast, "r");
    assert!(matches!(
        checked.analysis.get(first),
        Some(Resolution::Field { .. })
    ));
}

#[test]
fn test_dictionary_methods_and_element_members() {
    let checked = check(
        "MAIN\n  DEFINE d DICTIONARY OF INTEGER\n  DEFINE n INTEGER\n\
         LET n = d.getLength()\n  LET n = d[\"k\"].getLength()\nEND MAIN\n",
    );
    assert_eq!(
        checked.messages(),
        vec!["no definition found for `getLength` in `d`"]
    );
    let first = find_name(&checked.ast, "d");
    assert!(matches!(
        checked.analysis.get(first),
        Some(Resolution::Builtin(Builtin::Method(m)))
            if m.receiver == Receiver::Dictionary && m.name == "getLength"
    ));
}

#[test]
fn test_string_methods_on_character_variables() {
    let checked = check(
        "MAIN\n  DEFINE s STRING\n  DEFINE n INTEGER\n  LET n = s.getLength()\nEND MAIN\n",
    );
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
}

#[test]
fn test_system_class_objects_and_static_methods() {
    let checked = check(
        "MAIN\n  DEFINE ch base.Channel\n\
         LET ch = base.Channel.create()\n  CALL ch.openFile(\"f\", \"r\")\n  CALL ch.fly()\nEND MAIN\n",
    );
    assert_eq!(checked.messages(), vec!["no definition found for `fly` in `ch`"]);
}

#[test]
fn test_extension_package_needs_import() {
    let without = check("MAIN\n  DEFINE j util.JSONObject\nEND MAIN\n");
    assert_eq!(
        without.messages(),
        vec!["no definition found for type `util.JSONObject`"]
    );
    let with = check("IMPORT util\nMAIN\n  DEFINE j util.JSONObject\nEND MAIN\n");
    assert!(with.errors.is_empty(), "{:?}", with.errors);
}

#[test]
fn test_program_registers() {
    let checked = check(
        "MAIN\n  IF sqlca.sqlcode = 0 THEN\n    LET status = 0\n  END IF\n\
         DISPLAY sqlca.bogus\nEND MAIN\n",
    );
    assert_eq!(
        checked.messages(),
        vec!["no definition found for `bogus` in `sqlca`"]
    );
    let register = find_name(&checked.ast, "sqlca");
    assert!(matches!(
        checked.analysis.get(register),
        Some(Resolution::Builtin(Builtin::Register(r))) if r.name == "sqlcode"
    ));
}

#[test]
fn test_action_names_are_not_resolved() {
    let checked = check(
        "MAIN\n  MENU \"Main\"\n    ON ACTION quit\n      EXIT MENU\n  END MENU\nEND MAIN\n",
    );
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
}

// Cursors

#[test]
fn test_cursors_resolve_across_routines() {
    let checked = check(
        "FUNCTION setup()\n  DECLARE c CURSOR FOR SELECT a FROM t\nEND FUNCTION\n\
         FUNCTION run()\n  OPEN c\n  CLOSE d\n  EXECUTE s\nEND FUNCTION\n",
    );
    assert_eq!(codes(&checked.errors), vec![ErrorCode::E2005, ErrorCode::E2005]);
    assert_eq!(
        checked.messages(),
        vec![
            "cursor `d` is not declared",
            "prepared statement `s` is not declared"
        ]
    );
    let declare = find_node(&checked.ast, |k| matches!(k, NodeKind::Declare { .. }));
    let open = find_node(&checked.ast, |k| matches!(k, NodeKind::Open { .. }));
    assert_eq!(
        checked.analysis.get(open),
        Some(&Resolution::Cursor { decl: declare })
    );
}

// Schema

struct Schema {
    pending: bool,
}

impl DatabaseProvider for Schema {
    fn find_column(&self, table: &str, column: Option<&str>) -> ProviderResult {
        match (table, column) {
            ("customer", None) => ProviderResult::Found(ExternalEntity::new("customer", ExternalKind::Table)),
            ("customer", Some("cust_name")) => {
                ProviderResult::Found(ExternalEntity::new("cust_name", ExternalKind::Column))
            }
            _ if self.pending => ProviderResult::SearchLater,
            _ => ProviderResult::NotFound,
        }
    }
}

#[test]
fn test_like_types_against_schema() {
    let schema = Schema { pending: false };
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_database(&schema);
    let checked = check_with(
        "DEFINE n LIKE customer.cust_name\nDEFINE r RECORD LIKE customer.*\nDEFINE x LIKE customer.nope\n",
        &env,
    );
    assert_eq!(
        checked.messages(),
        vec!["no definition found for `customer.nope`"]
    );
}

#[test]
fn test_like_types_deferred_while_schema_loads() {
    let schema = Schema { pending: true };
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_database(&schema);
    let checked = check_with("DEFINE r RECORD LIKE orders.*\n", &env);
    assert!(checked.errors.is_empty());
    assert!(checked.deferred.contains("orders.*"));
}

#[test]
fn test_like_types_unchecked_without_schema() {
    let checked = check("DEFINE r RECORD LIKE orders.*\nMAIN\n  DISPLAY r.anything\nEND MAIN\n");
    assert!(checked.errors.is_empty(), "{:?}", checked.errors);
}

// Modes and re-runs

#[test]
fn test_quick_mode_neither_defers_nor_reports_unknown_calls() {
    let ast = parse("IMPORT FGL lib\nMAIN\n  CALL lib.f()\n  CALL g()\nEND MAIN\n");
    let index = sealed_lib();
    let env = AnalysisEnv::new(LanguageVersion::LATEST).with_functions(&index);
    let mut analysis = crate::ModuleAnalysis::new();
    let mut deferred = DeferredSearches::new();
    let mut errors = Vec::new();
    crate::check_for_errors(
        &ast,
        &mut analysis,
        &env,
        &mut deferred,
        crate::SearchMode::Quick,
        false,
        &mut |e| errors.push(e),
    );
    assert!(errors.is_empty(), "{errors:?}");
    assert!(deferred.is_empty());
}

#[test]
fn test_rerun_replaces_previous_results() {
    let source = "MAIN\n  DEFINE x INTEGER\n  LET x = y\nEND MAIN\n";
    let ast = parse(source);
    let env = AnalysisEnv::new(LanguageVersion::LATEST);
    let mut analysis = crate::ModuleAnalysis::new();
    let mut deferred = DeferredSearches::new();

    let mut run = |analysis: &mut crate::ModuleAnalysis| {
        let mut errors = Vec::new();
        crate::check_for_errors(
            &ast,
            analysis,
            &env,
            &mut deferred,
            crate::SearchMode::Full,
            false,
            &mut |e| errors.push(e),
        );
        errors
    };
    let first = run(&mut analysis);
    let snapshot = analysis.clone();
    let second = run(&mut analysis);

    assert_eq!(first, second);
    assert_eq!(analysis, snapshot);
    assert_eq!(analysis.len(), 1);
}
