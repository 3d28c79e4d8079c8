//! Built-in symbol tables.
//!
//! Read-only catalogs of everything the runtime provides without a
//! declaration: system functions, system classes grouped by package,
//! constants, preprocessor macros, program registers and the methods of the
//! collection and string types.
//!
//! # Design
//!
//! Every entry is a `const fn`-built static carrying its name, a one-line
//! documentation string and the [`VersionWindow`] it exists in. Lookups are
//! case-insensitive and always take the configured [`LanguageVersion`]; an
//! entry outside its window does not exist for that lookup.
//!
//! # Usage
//!
//! ```ignore
//! use fgl_resolve::builtins::{find_function, find_package};
//!
//! let length = find_function("LENGTH", LanguageVersion::V3_20);
//! assert_eq!(length.map(|f| f.returns), Some(1));
//!
//! let channel = find_package("base", version).and_then(|p| p.class("Channel", version));
//! ```

mod tables;

use fgl_ir::{LanguageVersion, VersionWindow};

pub use tables::{
    COLLECTION_METHODS, CONSTANTS, FUNCTIONS, MACROS, PACKAGES, PROGRAM_REGISTERS,
};

/// What every built-in table entry exposes.
pub trait BuiltinEntry {
    fn name(&self) -> &'static str;
    fn doc(&self) -> &'static str;
    fn window(&self) -> VersionWindow;

    fn available_in(&self, version: LanguageVersion) -> bool {
        self.window().contains(version)
    }
}

macro_rules! impl_builtin_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BuiltinEntry for $ty {
                fn name(&self) -> &'static str {
                    self.name
                }

                fn doc(&self) -> &'static str {
                    self.doc
                }

                fn window(&self) -> VersionWindow {
                    self.window
                }
            }
        )*
    };
}

/// A system function such as `length()` or `fgl_getenv()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub doc: &'static str,
    /// Number of values returned.
    pub returns: u8,
    pub window: VersionWindow,
}

impl BuiltinFunction {
    const fn new(name: &'static str, returns: u8, doc: &'static str) -> Self {
        BuiltinFunction {
            name,
            doc,
            returns,
            window: VersionWindow::ALL,
        }
    }

    const fn until(mut self, max: LanguageVersion) -> Self {
        self.window = VersionWindow::until(max);
        self
    }

    const fn since(mut self, min: LanguageVersion) -> Self {
        self.window = VersionWindow::since(min);
        self
    }
}

/// A method of a system class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassMethod {
    pub name: &'static str,
    pub doc: &'static str,
    /// Called on the class (`base.Channel.create()`) rather than on an object.
    pub is_static: bool,
    pub returns: u8,
    pub window: VersionWindow,
}

impl ClassMethod {
    const fn object(name: &'static str, returns: u8, doc: &'static str) -> Self {
        ClassMethod {
            name,
            doc,
            is_static: false,
            returns,
            window: VersionWindow::ALL,
        }
    }

    const fn class(name: &'static str, returns: u8, doc: &'static str) -> Self {
        ClassMethod {
            is_static: true,
            ..ClassMethod::object(name, returns, doc)
        }
    }

    const fn since(mut self, min: LanguageVersion) -> Self {
        self.window = VersionWindow::since(min);
        self
    }
}

/// A system class such as `base.Channel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemClass {
    pub package: &'static str,
    pub name: &'static str,
    pub doc: &'static str,
    pub methods: &'static [ClassMethod],
    pub window: VersionWindow,
}

impl SystemClass {
    const fn new(
        package: &'static str,
        name: &'static str,
        doc: &'static str,
        methods: &'static [ClassMethod],
    ) -> Self {
        SystemClass {
            package,
            name,
            doc,
            methods,
            window: VersionWindow::ALL,
        }
    }

    const fn since(mut self, min: LanguageVersion) -> Self {
        self.window = VersionWindow::since(min);
        self
    }

    /// Method by name, static or not.
    pub fn method(&self, name: &str, version: LanguageVersion) -> Option<&'static ClassMethod> {
        find_in(self.methods, name, version)
    }

    /// Methods callable on an object of this class.
    pub fn object_methods(
        &self,
        version: LanguageVersion,
    ) -> impl Iterator<Item = &'static ClassMethod> {
        available(self.methods, version).filter(|m| !m.is_static)
    }

    /// `package.Class` spelling.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// A package of system classes: `base` and `ui` are always in scope, the
/// extension modules (`util`, `os`, `com`) need an `IMPORT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemPackage {
    pub name: &'static str,
    pub doc: &'static str,
    pub classes: &'static [SystemClass],
    /// Usable without `IMPORT name`.
    pub implicit: bool,
    pub window: VersionWindow,
}

impl SystemPackage {
    pub fn class(&self, name: &str, version: LanguageVersion) -> Option<&'static SystemClass> {
        find_in(self.classes, name, version)
    }

    pub fn classes(&self, version: LanguageVersion) -> impl Iterator<Item = &'static SystemClass> {
        available(self.classes, version)
    }
}

/// A predefined constant such as `NOTFOUND`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemConstant {
    pub name: &'static str,
    pub doc: &'static str,
    pub window: VersionWindow,
}

/// A preprocessor macro such as `__LINE__`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemMacro {
    pub name: &'static str,
    pub doc: &'static str,
    pub window: VersionWindow,
}

/// A node of the program register tree (`status`, `sqlca.sqlcode`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramRegister {
    pub name: &'static str,
    pub doc: &'static str,
    pub children: &'static [ProgramRegister],
    pub window: VersionWindow,
}

impl ProgramRegister {
    const fn leaf(name: &'static str, doc: &'static str) -> Self {
        ProgramRegister {
            name,
            doc,
            children: &[],
            window: VersionWindow::ALL,
        }
    }

    /// Direct child by name. A miss does not look at siblings or parents.
    pub fn child(&self, name: &str, version: LanguageVersion) -> Option<&'static ProgramRegister> {
        find_in(self.children, name, version)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Receiver of a collection method.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Receiver {
    Array,
    Dictionary,
    String,
}

/// A method of a dynamic array, dictionary or character value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionMethod {
    pub receiver: Receiver,
    pub name: &'static str,
    pub doc: &'static str,
    pub returns: u8,
    pub window: VersionWindow,
}

impl CollectionMethod {
    const fn new(receiver: Receiver, name: &'static str, returns: u8, doc: &'static str) -> Self {
        CollectionMethod {
            receiver,
            name,
            doc,
            returns,
            window: VersionWindow::ALL,
        }
    }

    const fn since(mut self, min: LanguageVersion) -> Self {
        self.window = VersionWindow::since(min);
        self
    }
}

impl_builtin_entry!(
    BuiltinFunction,
    ClassMethod,
    SystemClass,
    SystemPackage,
    SystemConstant,
    SystemMacro,
    ProgramRegister,
    CollectionMethod,
);

fn available<T: BuiltinEntry>(
    table: &'static [T],
    version: LanguageVersion,
) -> impl Iterator<Item = &'static T> {
    table.iter().filter(move |entry| entry.available_in(version))
}

fn find_in<T: BuiltinEntry>(
    table: &'static [T],
    name: &str,
    version: LanguageVersion,
) -> Option<&'static T> {
    available(table, version).find(|entry| entry.name().eq_ignore_ascii_case(name))
}

/// Find a system function.
pub fn find_function(name: &str, version: LanguageVersion) -> Option<&'static BuiltinFunction> {
    find_in(FUNCTIONS, name, version)
}

/// Find a package of system classes, whether or not it needs an import.
pub fn find_package(name: &str, version: LanguageVersion) -> Option<&'static SystemPackage> {
    find_in(PACKAGES, name, version)
}

/// Find a class by `package` and `class` name.
pub fn find_class(
    package: &str,
    class: &str,
    version: LanguageVersion,
) -> Option<&'static SystemClass> {
    find_package(package, version)?.class(class, version)
}

pub fn find_constant(name: &str, version: LanguageVersion) -> Option<&'static SystemConstant> {
    find_in(CONSTANTS, name, version)
}

pub fn find_macro(name: &str, version: LanguageVersion) -> Option<&'static SystemMacro> {
    find_in(MACROS, name, version)
}

/// Find a top-level program register.
pub fn find_register(name: &str, version: LanguageVersion) -> Option<&'static ProgramRegister> {
    PROGRAM_REGISTERS.child(name, version)
}

/// Methods of `receiver` available in `version`.
pub fn methods_for(
    receiver: Receiver,
    version: LanguageVersion,
) -> impl Iterator<Item = &'static CollectionMethod> {
    available(COLLECTION_METHODS, version).filter(move |m| m.receiver == receiver)
}

/// Find a method of `receiver`.
pub fn find_method(
    receiver: Receiver,
    name: &str,
    version: LanguageVersion,
) -> Option<&'static CollectionMethod> {
    methods_for(receiver, version).find(|m| m.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests;
