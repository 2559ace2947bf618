/// Iterates every contiguous substring ("block") of `token`, shortest first.
///
/// Blocks longer than `max_len` are skipped; pass `usize::MAX` for all of them.
/// For `"ab"` this yields `"a"`, `"b"`, `"ab"`.
pub fn blocks(token: &str, max_len: usize) -> impl Iterator<Item = &str> + '_ {
    // Char boundaries, so multi-byte text never gets sliced mid-character.
    let bounds: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(token.len()))
        .collect();
    let char_count = bounds.len() - 1;
    let longest = char_count.min(max_len);

    (1..=longest).flat_map(move |len| {
        let bounds = bounds.clone();
        (0..=char_count - len).map(move |start| &token[bounds[start]..bounds[start + len]])
    })
}
