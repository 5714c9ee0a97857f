use pretty_assertions::assert_eq;
use rsc_core::{join_continuations, logical_lines, split_lines, LogicalLine};

fn texts(lines: &[LogicalLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn normalizes_every_line_ending_variant() {
    let lines = split_lines("a\r\nb\rc\nd");
    assert_eq!(lines, vec!["a", "b", "c", "d"]);
}

#[test]
fn trailing_newline_yields_trailing_empty_line() {
    assert_eq!(split_lines("a\n"), vec!["a", ""]);
}

#[test]
fn joins_backslash_continued_lines_with_single_space() {
    let joined = logical_lines("add client-address=10.7.0.12/32 \\\n    private-key=PRIV=\n");
    assert_eq!(
        texts(&joined),
        vec!["add client-address=10.7.0.12/32 private-key=PRIV=", ""]
    );
}

#[test]
fn joins_chains_of_more_than_two_lines() {
    // only the closing line is left-trimmed
    let joined = logical_lines("add a=1\\\n  b=2 \\\n\tc=3");
    assert_eq!(texts(&joined), vec!["add a=1   b=2 c=3"]);
    assert_eq!(joined[0].number, 1);
}

#[test]
fn plain_lines_are_emitted_verbatim_with_their_numbers() {
    let joined = join_continuations(&["  keep leading", "x\\", "y", "last  "]);
    assert_eq!(
        joined,
        vec![
            LogicalLine {
                number: 1,
                text: "  keep leading".to_string()
            },
            LogicalLine {
                number: 2,
                text: "x y".to_string()
            },
            LogicalLine {
                number: 4,
                text: "last  ".to_string()
            },
        ]
    );
}

#[test]
fn dangling_continuation_is_flushed() {
    let joined = join_continuations(&["first", "add a=1 \\"]);
    assert_eq!(texts(&joined), vec!["first", "add a=1 "]);
    assert_eq!(joined[1].number, 2);
}

#[test]
fn crlf_export_joins_like_unix_export() {
    let unix = logical_lines("/x\nadd a=1 \\\n  b=2\n");
    let dos = logical_lines("/x\r\nadd a=1 \\\r\n  b=2\r\n");
    assert_eq!(unix, dos);
}
