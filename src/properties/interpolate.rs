//! Variable interpolation
//!
//! A value may embed `${name}` references to other keys. References are
//! resolved at read time, recursively. A reference to a missing key, or one
//! that would re-enter a key already being resolved, is left in the text
//! unchanged.

use std::sync::LazyLock;

use log::warn;
use regex::{Captures, Regex};

/// Opening token of a variable reference.
pub const START_TOKEN: &str = "${";
/// Closing token of a variable reference.
pub const END_TOKEN: &str = "}";

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "(?s){}(.*?){}",
        regex::escape(START_TOKEN),
        regex::escape(END_TOKEN)
    );
    Regex::new(&pattern).expect("reference pattern is a valid regex")
});

/// Resolves every reference in `base` using `lookup`.
///
/// `lookup` returns the raw (uninterpolated) value of a key.
pub fn interpolate<F>(base: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut stack = Vec::new();
    interpolate_helper(base, lookup, &mut stack)
}

fn interpolate_helper<F>(base: &str, lookup: &F, stack: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !base.contains(START_TOKEN) {
        return base.to_string();
    }

    REFERENCE
        .replace_all(base, |caps: &Captures<'_>| {
            let variable = &caps[1];
            if stack.iter().any(|prior| prior == variable) {
                warn!(
                    "Infinite loop in property interpolation of {} -> {}; leaving reference unresolved",
                    stack.join(" -> "),
                    variable
                );
                return caps[0].to_string();
            }
            match lookup(variable) {
                Some(value) => {
                    stack.push(variable.to_string());
                    let resolved = interpolate_helper(&value, lookup, stack);
                    stack.pop();
                    resolved
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
