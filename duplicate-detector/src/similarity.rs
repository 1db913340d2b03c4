//! Edit-distance based string similarity

/// Levenshtein distance over `char`s
///
/// Insertion, deletion and substitution all cost 1; transpositions are not
/// recognised.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rows of the DP matrix are enough
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Similarity percentage in `0..=100`
///
/// Identical strings (including two empty ones) score 100, a single empty
/// side scores 0. Otherwise `1 - distance / max_len`, rounded half up.
pub fn similarity(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = edit_distance(a, b);
    let kept = max_len - distance.min(max_len);

    // round_half_up(kept * 100 / max_len) in integers
    ((kept * 200 + max_len) / (2 * max_len)) as u8
}
