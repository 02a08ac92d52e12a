use super::types::Extraction;

/// Minimum backtick run that opens a fence
const MIN_FENCE: usize = 3;

/// A fenced block found in a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
struct FencedBlock<'a> {
    tag: &'a str,
    body: &'a str,
}

/// Position and length of the first run of at least `min` backticks
fn find_fence(text: &str, min: usize) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('`') {
        let start = from + offset;
        let len = text[start..].bytes().take_while(|&b| b == b'`').count();
        if len >= min {
            return Some((start, len));
        }
        from = start + len;
    }
    None
}

/// Scan `text` for closed fences, left to right.
/// A fence opened by N backticks closes at the next run of at least N.
/// An opening fence without a closing fence ends the scan.
fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some((open, open_len)) = find_fence(rest, MIN_FENCE) {
        let after_open = &rest[open + open_len..];
        let tag_len = after_open
            .find(|c: char| c.is_whitespace() || c == '`')
            .unwrap_or(after_open.len());
        let tag = &after_open[..tag_len];
        let after_tag = &after_open[tag_len..];

        let Some((close, close_len)) = find_fence(after_tag, open_len) else {
            break;
        };

        blocks.push(FencedBlock {
            tag,
            body: &after_tag[..close],
        });
        rest = &after_tag[close + close_len..];
    }

    blocks
}

/// Recover script text from a raw model reply.
///
/// Prefers the interior of the first block tagged `fence_tag`, then the
/// interior of the first non-empty block of any tag, and finally returns the
/// raw reply unmodified. Never fails.
pub fn extract_script(raw: &str, fence_tag: &str) -> (String, Extraction) {
    let blocks: Vec<_> = fenced_blocks(raw)
        .into_iter()
        .filter(|b| !b.body.trim().is_empty())
        .collect();

    if let Some(block) = blocks
        .iter()
        .find(|b| !fence_tag.is_empty() && b.tag.eq_ignore_ascii_case(fence_tag))
    {
        return (block.body.trim().to_string(), Extraction::Tagged);
    }

    if let Some(block) = blocks.first() {
        return (block.body.trim().to_string(), Extraction::FirstFence);
    }

    (raw.to_string(), Extraction::Raw)
}
