//! Emitted C name mangling.
//!
//! All generated names are prefixed so they can never collide with the
//! host C environment:
//!
//! | source entity            | C name        |
//! |--------------------------|---------------|
//! | type `T`                 | `t$T`         |
//! | array of `E` length `N`  | `t$E$N`       |
//! | variable / parameter `x` | `$x`          |
//! | struct local backing `x` | `$$x`         |
//! | enum value `V`           | `c$V`         |
//! | function `f`             | `fn_f`        |

/// C name of a type.
pub fn type_name(name: &str) -> String {
    format!("t${}", name)
}

/// C name of a variable or parameter.
pub fn var_name(name: &str) -> String {
    format!("${}", name)
}

/// C name of the backing aggregate behind a struct-typed local.
pub fn backing_name(name: &str) -> String {
    format!("$${}", name)
}

/// C name of an enum value.
pub fn const_name(name: &str) -> String {
    format!("c${}", name)
}

/// C name of a function.
pub fn fn_name(name: &str) -> String {
    format!("fn_{}", name)
}
