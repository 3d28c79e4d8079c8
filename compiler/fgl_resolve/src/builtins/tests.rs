#![allow(clippy::unwrap_used, clippy::expect_used)]

use fgl_ir::{LanguageVersion, VersionWindow};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn any_version() -> impl Strategy<Value = LanguageVersion> {
    proptest::sample::select(LanguageVersion::ALL)
}

#[test]
fn test_function_lookup_is_case_insensitive() {
    let v = LanguageVersion::LATEST;
    let length = find_function("LENGTH", v).unwrap();
    assert_eq!(length.name, "length");
    assert_eq!(length.returns, 1);
    assert!(find_function("Fgl_GetEnv", v).is_some());
    assert!(find_function("no_such_function", v).is_none());
}

#[test]
fn test_removed_function_is_gone_after_its_window() {
    assert!(find_function("fgl_keysetlabel", LanguageVersion::V2_50).is_some());
    assert!(find_function("fgl_keysetlabel", LanguageVersion::V3_00).is_none());
}

#[test]
fn test_class_lookup_through_package() {
    let v = LanguageVersion::V3_20;
    let channel = find_class("base", "channel", v).unwrap();
    assert_eq!(channel.qualified_name(), "base.Channel");
    let create = channel.method("CREATE", v).unwrap();
    assert!(create.is_static);
    assert_eq!(create.returns, 1);

    let object_methods: Vec<_> = channel.object_methods(v).map(|m| m.name).collect();
    assert!(object_methods.contains(&"readLine"));
    assert!(!object_methods.contains(&"create"));
}

#[test]
fn test_import_modules_are_not_implicit() {
    let v = LanguageVersion::LATEST;
    assert!(find_package("base", v).unwrap().implicit);
    assert!(find_package("ui", v).unwrap().implicit);
    for name in ["util", "os", "com"] {
        assert!(!find_package(name, v).unwrap().implicit, "{name}");
    }
}

#[test]
fn test_util_classes_follow_their_windows() {
    assert!(find_class("util", "JSONArray", LanguageVersion::V2_50).is_none());
    assert!(find_class("util", "JSONArray", LanguageVersion::V3_00).is_some());
    assert!(find_class("util", "Strings", LanguageVersion::V3_10).is_none());
    assert!(find_class("util", "Strings", LanguageVersion::V3_20).is_some());
    assert!(find_class("os", "Path", LanguageVersion::V2_30).is_some());
}

#[test]
fn test_register_tree() {
    let v = LanguageVersion::LATEST;
    let sqlca = find_register("SQLCA", v).unwrap();
    assert!(!sqlca.is_leaf());
    let sqlcode = sqlca.child("sqlcode", v).unwrap();
    assert!(sqlcode.is_leaf());

    // A miss below a node does not fall back to siblings or the root.
    assert!(sqlca.child("status", v).is_none());
    assert!(sqlcode.child("sqlcode", v).is_none());
    assert!(find_register("sqlcode", v).is_none());
    assert!(find_register("status", v).is_some());
}

#[test]
fn test_constants_and_macros() {
    let v = LanguageVersion::LATEST;
    assert!(find_constant("notfound", v).is_some());
    assert!(find_constant("true", v).is_some());
    assert!(find_macro("__LINE__", v).is_some());
    assert!(find_macro("__FUNCTION__", LanguageVersion::V2_50).is_none());
}

#[test]
fn test_dictionary_methods_per_version() {
    let names = |v| {
        methods_for(Receiver::Dictionary, v)
            .map(|m| m.name)
            .collect::<Vec<_>>()
    };
    assert_eq!(
        names(LanguageVersion::V3_10),
        vec!["clear", "contains", "getKeys", "getLength", "remove"]
    );
    assert_eq!(
        names(LanguageVersion::V3_20),
        vec!["clear", "contains", "copyTo", "getKeys", "getLength", "remove"]
    );
}

#[test]
fn test_array_methods_per_version() {
    assert!(find_method(Receiver::Array, "copyTo", LanguageVersion::V3_00).is_none());
    assert!(find_method(Receiver::Array, "copyTo", LanguageVersion::V3_10).is_some());
    assert!(find_method(Receiver::Array, "sort", LanguageVersion::V3_10).is_none());
    assert!(find_method(Receiver::Array, "SORT", LanguageVersion::V3_20).is_some());
    // Receivers do not share entries.
    assert!(find_method(Receiver::Array, "getKeys", LanguageVersion::LATEST).is_none());
}

#[test]
fn test_table_names_are_unique_per_scope() {
    let v = LanguageVersion::LATEST;
    let mut seen = std::collections::HashSet::new();
    for f in FUNCTIONS {
        assert!(seen.insert(f.name.to_ascii_lowercase()), "duplicate {}", f.name);
    }
    for package in PACKAGES {
        let mut classes = std::collections::HashSet::new();
        for class in package.classes(v) {
            assert!(classes.insert(class.name.to_ascii_lowercase()));
            let mut methods = std::collections::HashSet::new();
            for m in class.methods {
                assert!(methods.insert(m.name.to_ascii_lowercase()), "{}", m.name);
            }
        }
    }
}

#[test]
fn test_every_entry_is_documented() {
    assert!(FUNCTIONS.iter().all(|f| !f.doc().is_empty()));
    assert!(COLLECTION_METHODS.iter().all(|m| !m.doc().is_empty()));
    assert!(PACKAGES
        .iter()
        .flat_map(|p| p.classes)
        .flat_map(|c| c.methods)
        .all(|m| !m.doc().is_empty()));
}

proptest! {
    #[test]
    fn prop_lookup_matches_window(version in any_version()) {
        for f in FUNCTIONS {
            let found = find_function(f.name, version).is_some();
            prop_assert_eq!(found, f.window.contains(version), "{}", f.name);
        }
        for m in COLLECTION_METHODS {
            let found = find_method(m.receiver, m.name, version)
                .is_some_and(|hit| hit.window == m.window);
            prop_assert_eq!(found, m.window.contains(version), "{}", m.name);
        }
    }

    #[test]
    fn prop_bounded_window_excludes_outside(
        a in any_version(),
        b in any_version(),
        probe in any_version(),
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let entry = ProgramRegister {
            name: "probe",
            doc: "test entry",
            children: &[],
            window: VersionWindow::new(min, max),
        };
        let inside = min <= probe && probe <= max;
        prop_assert_eq!(entry.available_in(probe), inside);
    }
}
