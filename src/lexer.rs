//! Splitting of an input line into command arguments.
//!
//! There is no quoting or escaping: arguments are the maximal runs of non-whitespace
//! characters. Consecutive delimiters collapse, so an argument is never empty.

/// Split `line` into its arguments. Index 0 of the result is the command name.
///
/// Empty and whitespace-only lines produce an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}
