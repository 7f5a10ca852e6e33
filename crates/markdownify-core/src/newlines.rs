//! Trailing newline normalization
//!
//! Every block-level construct controls the blank lines around it through
//! [`ensure_trailing_newlines`]; nothing else in the conversion removes
//! newlines from the output buffer.

const NEWLINE: char = '\n';

/// Count the newline characters at the end of `buf`
pub fn trailing_newlines(buf: &str) -> usize {
    buf.bytes().rev().take_while(|&b| b == b'\n').count()
}

/// Make `buf` end with `count` newlines.
///
/// With `exact`, or when `buf` has no trailing newline at all, existing
/// trailing newlines are replaced by exactly `count`. Otherwise newlines are
/// only added, up to `count`, and never removed.
pub fn ensure_trailing_newlines(buf: &mut String, count: usize, exact: bool) {
    let found = trailing_newlines(buf);

    if exact || found == 0 {
        buf.truncate(buf.len() - found);
        push_newlines(buf, count);
    } else {
        push_newlines(buf, count.saturating_sub(found));
    }
}

/// Ensure at least `count` trailing newlines
pub fn require_newlines(buf: &mut String, count: usize) {
    ensure_trailing_newlines(buf, count, false);
}

/// Ensure exactly `count` trailing newlines
pub fn require_exact_newlines(buf: &mut String, count: usize) {
    ensure_trailing_newlines(buf, count, true);
}

fn push_newlines(buf: &mut String, count: usize) {
    buf.extend(std::iter::repeat(NEWLINE).take(count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ensured(buf: &str, count: usize, exact: bool) -> String {
        let mut buf = buf.to_string();
        ensure_trailing_newlines(&mut buf, count, exact);
        buf
    }

    #[test]
    fn test_trailing_newlines() {
        assert_eq!(trailing_newlines(""), 0);
        assert_eq!(trailing_newlines("text"), 0);
        assert_eq!(trailing_newlines("text\n\n"), 2);
        assert_eq!(trailing_newlines("\n\n\n"), 3);
        assert_eq!(trailing_newlines("a\nb\n"), 1);
    }

    #[rstest]
    #[case("text", 2, "text\n\n")]
    #[case("text\n", 2, "text\n\n")]
    #[case("text\n\n\n\n", 2, "text\n\n")]
    #[case("text\n\n", 0, "text")]
    #[case("", 1, "\n")]
    fn test_exact_count(#[case] buf: &str, #[case] count: usize, #[case] expected: &str) {
        let result = ensured(buf, count, true);
        assert_eq!(result, expected);
        assert_eq!(trailing_newlines(&result), count);
    }

    #[rstest]
    #[case("text", 1, "text\n")]
    #[case("text\n", 2, "text\n\n")]
    #[case("text\n\n\n", 1, "text\n\n\n")]
    #[case("text\n", 0, "text\n")]
    fn test_at_least_count(#[case] buf: &str, #[case] count: usize, #[case] expected: &str) {
        let before = trailing_newlines(buf);
        let result = ensured(buf, count, false);
        assert_eq!(result, expected);
        assert_eq!(trailing_newlines(&result), before.max(count));
    }

    #[test]
    fn test_without_trailing_newline_replaces() {
        // zero newlines present: the count is appended as-is, even when 0
        assert_eq!(ensured("text", 0, false), "text");
        assert_eq!(ensured("text", 3, false), "text\n\n\n");
    }

    #[test]
    fn test_wrappers() {
        let mut buf = String::from("item\n\n\n");
        require_newlines(&mut buf, 1);
        assert_eq!(buf, "item\n\n\n");
        require_exact_newlines(&mut buf, 1);
        assert_eq!(buf, "item\n");
    }
}
