//! Bounded edit distance for the near-duplicate sibling check.

/// Levenshtein distance with an early-exit cap.
///
/// Returns `Some(d)` with `d <= max_dist` when the true distance is within
/// the bound, `None` otherwise. Standard two-row dynamic programming with a
/// row-minimum early exit, which is plenty for the cap of 2 used by the
/// admission rules. Callers are expected to normalize case first.
pub fn edit_distance_within(a: &str, b: &str, max_dist: usize) -> Option<usize> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    if a_chars.len().abs_diff(n) > max_dist {
        return None;
    }
    if n == 0 {
        return Some(a_chars.len());
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for (i, c) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for j in 1..=n {
            let cost = if *c == b_chars[j - 1] { 0 } else { 1 };
            let deletion = prev[j] + 1;
            let insertion = curr[j - 1] + 1;
            let substitution = prev[j - 1] + cost;
            let d = deletion.min(insertion).min(substitution);
            curr[j] = d;
            row_min = row_min.min(d);
        }

        if row_min > max_dist {
            return None;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    (prev[n] <= max_dist).then_some(prev[n])
}
