use super::*;

fn chars(s: &str) -> f64 {
    s.chars().count() as f64
}

#[test]
fn greedy_breaks_before_overflow() {
    let lines = wrap_words("the quick brown fox jumps", 10.0, chars);
    assert_eq!(lines, ["the quick", "brown fox", "jumps"]);
}

#[test]
fn oversized_word_keeps_its_own_line() {
    let lines = wrap_words("a extraordinarily b", 5.0, chars);
    assert_eq!(lines, ["a", "extraordinarily", "b"]);
}

#[test]
fn first_word_never_wraps_alone_into_empty_line() {
    let lines = wrap_words("supercalifragilistic", 3.0, chars);
    assert_eq!(lines, ["supercalifragilistic"]);
}

#[test]
fn whitespace_collapses_and_empty_input_is_empty() {
    assert_eq!(wrap_words("  a \t  b  ", 100.0, chars), ["a b"]);
    assert!(wrap_words("   ", 100.0, chars).is_empty());
    assert!(wrap_words("", 100.0, chars).is_empty());
}

#[test]
fn exact_fit_stays_on_line() {
    assert_eq!(wrap_words("abcd efgh", 9.0, chars), ["abcd efgh"]);
    assert_eq!(wrap_words("abcd efgh", 8.9, chars), ["abcd", "efgh"]);
}

#[test]
fn rewrapping_wrapped_lines_is_a_no_op() {
    let text = "It was a dark and stormy night and the rain fell in torrents except at \
                occasional intervals when it was checked by a violent gust of wind";
    for width in [8.0, 13.0, 21.0, 40.0] {
        let once = wrap_words(text, width, chars);
        let twice = rewrap_lines(&once, width, chars);
        assert_eq!(once, twice, "width {width}");
    }
}

#[test]
fn same_inputs_same_output() {
    let a = wrap_words("one two three four five six", 9.0, chars);
    let b = wrap_words("one two three four five six", 9.0, chars);
    assert_eq!(a, b);
}
