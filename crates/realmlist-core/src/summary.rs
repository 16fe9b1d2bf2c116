//! Short, printable views of response payloads for log lines and errors.

/// Render at most roughly `max` bytes of `data`, keeping the head and the tail.
///
/// Control characters are escaped so the summary stays on one line.
#[must_use]
pub fn debug_summary(data: &[u8], max: usize) -> String {
    if data.len() <= max {
        return printable(data);
    }
    let head = max * 2 / 3;
    let tail = max - head;
    format!(
        "{}...{} ({} bytes)",
        printable(&data[..head]),
        printable(&data[data.len() - tail..]),
        data.len()
    )
}

fn printable(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .chars()
        .map(|ch| {
            if ch.is_control() {
                ch.escape_debug().to_string()
            } else {
                ch.to_string()
            }
        })
        .collect()
}
