//! Environment literal rewriting for procedure bodies

use crate::environment::Environment;
use std::borrow::Cow;

/// The substitution rule for promoting into `dest`: the upstream domain
/// token and its replacement. `None` for the chain head.
pub fn rule_for(dest: Environment) -> Option<(&'static str, &'static str)> {
    dest.upstream()
        .map(|up| (up.domain_token(), dest.domain_token()))
}

/// Replace the first occurrence of the upstream environment's domain token
/// with the destination's. Text without the token is returned borrowed.
pub fn rewrite(text: &str, dest: Environment) -> Cow<'_, str> {
    match rule_for(dest) {
        Some((from, to)) if text.contains(from) => Cow::Owned(text.replacen(from, to, 1)),
        _ => Cow::Borrowed(text),
    }
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
