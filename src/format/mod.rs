/// Default column width for fortune-style output.
pub const DEFAULT_WIDTH: usize = 80;

/// Wrap `text` at `width` columns.
///
/// Words are separated by single spaces and never split; a word longer than
/// `width` overflows on a line of its own. Width is counted in `char`s.
pub fn line_wrap(text: &str, width: usize) -> String {
    let mut wrapped = String::with_capacity(text.len());
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used == 0 {
            wrapped.push_str(word);
            used = len;
        } else if used + 1 + len <= width {
            wrapped.push(' ');
            wrapped.push_str(word);
            used += 1 + len;
        } else {
            wrapped.push('\n');
            wrapped.push_str(word);
            used = len;
        }
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(line_wrap("hello world", 80), "hello world");
    }

    #[test]
    fn test_wraps_at_width() {
        assert_eq!(line_wrap("aaa bbb ccc", 7), "aaa bbb\nccc");
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        assert_eq!(line_wrap("aaa bbb", 7), "aaa bbb");
    }

    #[test]
    fn test_long_word_overflows_on_own_line() {
        assert_eq!(line_wrap("a abcdefghij b", 4), "a\nabcdefghij\nb");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(line_wrap("  a \t b\n c  ", 80), "a b c");
    }

    #[test]
    fn test_empty() {
        assert_eq!(line_wrap("", 80), "");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(line_wrap("héé héé", 7), "héé héé");
    }
}
