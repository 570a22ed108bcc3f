//! Code fence detection utilities.
//!
//! Tracks CommonMark fenced code blocks line by line so callers can find
//! live-preview blocks without a full markdown parse.

/// Fence parsing phases tracked across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FencePhase {
    /// Not currently inside a fence.
    #[default]
    Outside,
    /// Within fence contents.
    InsideFence,
}

/// Current fence state (phase, marker, indent, and length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceState {
    /// Current fence phase.
    pub phase: FencePhase,
    /// Fence marker character (``` or ~~~).
    pub marker: Option<char>,
    /// Leading whitespace count captured at opening.
    pub indent: usize,
    /// Length of the opening fence (number of ` or ~ characters).
    pub length: usize,
}

impl Default for FenceState {
    fn default() -> Self {
        FenceState {
            phase: FencePhase::Outside,
            marker: None,
            indent: 0,
            length: 0,
        }
    }
}

/// What a single line did to the fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent {
    /// Plain line outside any fence.
    None,
    /// Line opened a fence.
    Opened,
    /// Line is fence content.
    Content,
    /// Line closed the open fence.
    Closed,
}

/// Outcome of processing a single line for fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParseOutcome {
    /// State to carry into the next line.
    pub next_state: FenceState,
    /// What this line did.
    pub event: FenceEvent,
}

impl LineParseOutcome {
    /// Whether the line belongs to a fence (opener, content, or closer).
    pub fn in_fence(&self) -> bool {
        !matches!(self.event, FenceEvent::None)
    }
}

/// Advance fence state based on a single line of text.
pub fn advance_fence_state(line: &str, state: FenceState) -> LineParseOutcome {
    let line = line.trim_end_matches(['\r', '\n']);
    let (visual_indent, byte_offset) = leading_whitespace_info(line);
    let after_indent = &line[byte_offset..];

    let mut next_state = state;
    let mut event = match state.phase {
        FencePhase::Outside => FenceEvent::None,
        FencePhase::InsideFence => FenceEvent::Content,
    };

    if matches!(state.phase, FencePhase::Outside) && visual_indent <= 3 {
        // 4+ columns is an indented code block, not a fence
        if let Some((marker, length)) = detect_fence_marker_with_length(after_indent)
            && !(marker == '`' && after_indent[length..].contains('`'))
        {
            next_state = FenceState {
                phase: FencePhase::InsideFence,
                marker: Some(marker),
                indent: visual_indent,
                length,
            };
            event = FenceEvent::Opened;
        }
    } else if matches!(state.phase, FencePhase::InsideFence)
        && visual_indent <= 3
        && is_closing_fence(after_indent)
        && let Some((marker, closer_len)) = detect_fence_marker_with_length(after_indent)
        && Some(marker) == state.marker
        && closer_len >= state.length
    {
        next_state = FenceState::default();
        event = FenceEvent::Closed;
    }

    LineParseOutcome { next_state, event }
}

/// Returns the language token of a fence opener (`` ```vue title `` → `vue`).
pub fn fence_language(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (visual_indent, byte_offset) = leading_whitespace_info(line);
    if visual_indent > 3 {
        return None;
    }
    let after_indent = &line[byte_offset..];
    let (_, length) = detect_fence_marker_with_length(after_indent)?;
    after_indent[length..].split_whitespace().next()
}

/// Returns (visual_columns, byte_offset) for leading whitespace.
/// Visual columns expand tabs to 4-column boundaries per CommonMark.
fn leading_whitespace_info(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => {
                col += 1;
                bytes += 1;
            }
            b'\t' => {
                col += 4 - (col % 4);
                bytes += 1;
            }
            _ => break,
        }
    }
    (col, bytes)
}

fn detect_fence_marker_with_length(after_indent: &str) -> Option<(char, usize)> {
    let mut chars = after_indent.chars();
    let first = chars.next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run_len = 1 + chars.take_while(|c| *c == first).count();
    if run_len >= 3 {
        Some((first, run_len))
    } else {
        None
    }
}

/// A closing fence has only fence markers followed by optional whitespace.
fn is_closing_fence(after_indent: &str) -> bool {
    let mut chars = after_indent.chars();
    let first = match chars.next() {
        Some(c) if c == '`' || c == '~' => c,
        _ => return false,
    };
    let mut count = 1;
    for c in chars.by_ref() {
        if c == first {
            count += 1;
        } else {
            return count >= 3 && c.is_whitespace() && chars.all(|c| c.is_whitespace());
        }
    }
    count >= 3
}
