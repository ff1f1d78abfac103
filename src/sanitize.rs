/// Cleans raw model output for display. Three removals, applied in order to
/// the accumulating result: reasoning-tag spans, fenced code blocks, and a
/// trailing "Algorithm:" header line. Idempotence is not a contract.
pub fn sanitize_explanation(raw: &str) -> String {
    let without_think = strip_tag_block(raw, "think");
    let without_fences = strip_fenced_blocks(&without_think);
    truncate_trailing_header(&without_fences, "Algorithm:")
        .trim()
        .to_string()
}

fn strip_tag_block(input: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut i = 0usize;
    while i < input.len() {
        let rest = &input[i..];
        if rest.starts_with(&open) {
            if let Some(end_rel) = rest.find(&close) {
                i += end_rel + close.len();
                continue;
            }
            break;
        }
        if let Some(ch) = rest.chars().next() {
            out.push(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    out
}

const FENCE: &str = "```";

/// Removes ``` ... ``` spans inclusive of the fences. An opening fence with
/// no closing partner is left in place.
fn strip_fenced_blocks(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open_idx) = rest.find(FENCE) {
        let after_open = &rest[open_idx + FENCE.len()..];
        match after_open.find(FENCE) {
            Some(close_idx) => {
                out.push_str(&rest[..open_idx]);
                rest = &after_open[close_idx + FENCE.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Truncates from the first line that starts with `header` (leading
/// whitespace allowed) to the end of the text.
fn truncate_trailing_header(input: &str, header: &str) -> String {
    let mut offset = 0usize;
    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with(header) {
            return input[..offset].to_string();
        }
        offset += line.len();
    }
    input.to_string()
}
