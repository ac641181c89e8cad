//! Human-readable rendering of validation failures

use crate::error::ErrorKind;

/// Render a sentence for `keys` failing with `kind`.
///
/// One key reads `option port is required`; several read
/// `options a, b and c are invalid`. Keys appear in the order given.
pub fn render(kind: ErrorKind, keys: &[String]) -> String {
    let (singular, plural) = match kind {
        ErrorKind::Missing => ("is required", "are required"),
        ErrorKind::Invalid => ("is invalid", "are invalid"),
    };

    match keys {
        [] => format!("no options {}", plural),
        [key] => format!("option {} {}", key, singular),
        [init @ .., last] => format!("options {} and {} {}", init.join(", "), last, plural),
    }
}
