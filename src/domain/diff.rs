/// Prefix that opens every per-file section of `git diff` output.
pub const FILE_MARKER: &str = "diff --git";

/// Diffs at or below this many characters are summarized in one request.
pub const DEFAULT_CHUNK_THRESHOLD: usize = 64 * 1024;

/// Splits a staged diff into independently summarizable chunks.
///
/// Every chunk after the leading text starts with [`FILE_MARKER`], so each
/// one reads as a complete single-file diff. Text before the first marker is
/// kept verbatim. When the whole diff fits within `threshold` characters the
/// result is a single chunk equal to the input.
pub fn chunk(diff: &str, threshold: usize) -> Vec<String> {
    if diff.chars().count() <= threshold {
        return vec![diff.to_string()];
    }

    let mut pieces = diff.split(FILE_MARKER);
    let mut chunks = Vec::new();

    if let Some(leading) = pieces.next()
        && !leading.is_empty()
    {
        chunks.push(leading.to_string());
    }
    chunks.extend(pieces.map(|piece| format!("{FILE_MARKER}{piece}")));

    if chunks.is_empty() {
        chunks.push(diff.to_string());
    }
    chunks
}
