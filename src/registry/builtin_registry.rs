//! The fixed set of built-in types each language's literal/constructor
//! inference strategies recognize without consulting the stdlib registry,
//! plus the small catalog of builtin methods (§4.1) whose return type is
//! known without looking at a function body: `str.upper() -> str`, and so
//! on. Consulted by the chain and instance-call strategies (§4.3.5/§4.3.7)
//! before either falls back to the fluent heuristic.

use crate::ty::Type;

/// Language tag used throughout the registries and extractors. Kept as a
/// plain enum rather than a string so a typo can't silently create a new
/// language at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Go,
}

const PYTHON_BUILTINS: &[&str] = &[
    "str", "int", "float", "bool", "bytes", "list", "dict", "set", "frozenset",
    "tuple", "complex", "object", "type", "NoneType",
];

const GO_BUILTINS: &[&str] = &[
    "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128",
    "bool", "byte", "rune", "error", "any",
];

/// One builtin method's return type, by the bare (unprefixed) name of the
/// type it's defined on.
struct BuiltinMethod {
    type_name: &'static str,
    method: &'static str,
    returns: &'static str,
}

/// Not exhaustive — just the methods common enough to show up in the
/// scenarios this registry exists to serve (§8.4.1).
const PYTHON_BUILTIN_METHODS: &[BuiltinMethod] = &[
    BuiltinMethod { type_name: "str", method: "upper", returns: "str" },
    BuiltinMethod { type_name: "str", method: "lower", returns: "str" },
    BuiltinMethod { type_name: "str", method: "strip", returns: "str" },
    BuiltinMethod { type_name: "str", method: "lstrip", returns: "str" },
    BuiltinMethod { type_name: "str", method: "rstrip", returns: "str" },
    BuiltinMethod { type_name: "str", method: "format", returns: "str" },
    BuiltinMethod { type_name: "str", method: "replace", returns: "str" },
    BuiltinMethod { type_name: "str", method: "join", returns: "str" },
    BuiltinMethod { type_name: "str", method: "split", returns: "list" },
    BuiltinMethod { type_name: "str", method: "encode", returns: "bytes" },
    BuiltinMethod { type_name: "bytes", method: "decode", returns: "str" },
    BuiltinMethod { type_name: "list", method: "copy", returns: "list" },
    BuiltinMethod { type_name: "list", method: "pop", returns: "object" },
    BuiltinMethod { type_name: "dict", method: "copy", returns: "dict" },
    BuiltinMethod { type_name: "dict", method: "keys", returns: "list" },
    BuiltinMethod { type_name: "dict", method: "get", returns: "object" },
];

/// Go's builtin types don't carry methods of their own (the closest thing,
/// `strings.ToUpper`, is a free function in the `strings` package, which
/// lives in the stdlib registry, not here). Kept as an explicit empty slice
/// rather than omitting the table so callers don't need a per-language
/// branch.
const GO_BUILTIN_METHODS: &[BuiltinMethod] = &[];

/// Lookup table for a language's built-in type names and their methods.
/// Entirely static (no registration API) since the set is fixed by the
/// language itself.
#[derive(Debug)]
pub struct BuiltinRegistry;

impl BuiltinRegistry {
    pub fn is_builtin(language: Language, name: &str) -> bool {
        Self::names(language).contains(&name)
    }

    pub fn names(language: Language) -> &'static [&'static str] {
        match language {
            Language::Python => PYTHON_BUILTINS,
            Language::Go => GO_BUILTINS,
        }
    }

    /// The namespace every builtin type of this language is reported
    /// under, matching the convention each language's own standard library
    /// uses for its own builtins: Python's literal module is named
    /// `builtins`; Go has no such module, so `builtin` (singular) stands in.
    pub fn namespace(language: Language) -> &'static str {
        match language {
            Language::Python => "builtins",
            Language::Go => "builtin",
        }
    }

    /// Build the `Type` a literal or builtin-returning expression of this
    /// built-in name resolves to, namespaced so it's never mistaken for a
    /// project-local type of the same bare name.
    pub fn concrete_type(language: Language, name: &str) -> Type {
        Type::Concrete(format!("{}.{}", Self::namespace(language), name))
    }

    /// Strip a builtin namespace prefix off an FQN, returning the bare
    /// builtin name if it had one. Used to turn a previously-resolved
    /// receiver type like `builtins.str` back into `str` for a method
    /// lookup.
    pub fn strip_namespace<'a>(language: Language, fqn: &'a str) -> Option<&'a str> {
        fqn.strip_prefix(Self::namespace(language))?.strip_prefix('.')
    }

    /// The return type of a builtin method, by its bare type name, if this
    /// registry knows it (§4.1/§4.3.5/§4.3.7).
    pub fn method_return_type(language: Language, type_name: &str, method: &str) -> Option<&'static str> {
        let table = match language {
            Language::Python => PYTHON_BUILTIN_METHODS,
            Language::Go => GO_BUILTIN_METHODS,
        };
        table
            .iter()
            .find(|m| m.type_name == type_name && m.method == method)
            .map(|m| m.returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_python_builtins() {
        assert!(BuiltinRegistry::is_builtin(Language::Python, "dict"));
        assert!(!BuiltinRegistry::is_builtin(Language::Python, "error"));
    }

    #[test]
    fn recognizes_go_builtins() {
        assert!(BuiltinRegistry::is_builtin(Language::Go, "error"));
        assert!(!BuiltinRegistry::is_builtin(Language::Go, "dict"));
    }

    #[test]
    fn concrete_type_is_namespaced_per_language() {
        assert_eq!(BuiltinRegistry::concrete_type(Language::Python, "str"), Type::Concrete("builtins.str".to_string()));
        assert_eq!(BuiltinRegistry::concrete_type(Language::Go, "string"), Type::Concrete("builtin.string".to_string()));
    }

    #[test]
    fn strip_namespace_recovers_the_bare_name() {
        assert_eq!(BuiltinRegistry::strip_namespace(Language::Python, "builtins.str"), Some("str"));
        assert_eq!(BuiltinRegistry::strip_namespace(Language::Python, "pkg.mod.Greeter"), None);
    }

    #[test]
    fn str_upper_returns_str() {
        assert_eq!(BuiltinRegistry::method_return_type(Language::Python, "str", "upper"), Some("str"));
        assert_eq!(BuiltinRegistry::method_return_type(Language::Python, "str", "frobnicate"), None);
    }
}
