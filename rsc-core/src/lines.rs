/// Marker RouterOS puts at the end of a physical line that continues on the next one.
pub const CONTINUATION: char = '\\';

/// One logical line of an export after continuation joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line number where this logical line starts.
    pub number: usize,
    /// Joined line content.
    pub text: String,
}

/// Split text into physical lines, accepting `\r\n`, bare `\r` and `\n`.
///
/// A trailing separator yields a trailing empty line, like `str::split`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Merge backslash-continued physical lines into logical lines.
///
/// A continued line is right-trimmed, loses its marker and is buffered with a
/// single separating space. The first non-continued line after it is trimmed
/// and closes the buffer. Lines outside a continuation are emitted verbatim.
pub fn join_continuations<S: AsRef<str>>(lines: &[S]) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut start = 0;

    for (idx, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let line = raw.trim_end_matches([' ', '\t']);

        if let Some(head) = line.strip_suffix(CONTINUATION) {
            if buf.is_empty() {
                start = idx + 1;
            }
            buf.push_str(head.trim_end_matches(' '));
            buf.push(' ');
            continue;
        }

        if buf.is_empty() {
            out.push(LogicalLine {
                number: idx + 1,
                text: raw.to_string(),
            });
        } else {
            buf.push_str(line.trim());
            out.push(LogicalLine {
                number: start,
                text: std::mem::take(&mut buf),
            });
        }
    }

    // input ended inside a continuation
    if !buf.is_empty() {
        out.push(LogicalLine {
            number: start,
            text: buf,
        });
    }

    out
}

/// Split and join in one step.
pub fn logical_lines(text: &str) -> Vec<LogicalLine> {
    join_continuations(&split_lines(text))
}
