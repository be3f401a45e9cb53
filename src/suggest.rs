//! "Did you mean" hints for mistyped palette names

/// Edit distance between `a` and `b` (insertions, deletions, substitutions).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Up to three candidates within `max_distance` of `query`, closest first.
///
/// Comparison ignores ASCII case.
pub fn suggest<'a>(query: &str, candidates: &[&'a str], max_distance: usize) -> Vec<&'a str> {
    let query = query.to_ascii_lowercase();
    let mut scored: Vec<(&str, usize)> = candidates
        .iter()
        .map(|&c| (c, edit_distance(&query, &c.to_ascii_lowercase())))
        .filter(|(_, d)| *d <= max_distance)
        .collect();
    scored.sort_by_key(|(_, d)| *d);
    scored.into_iter().take(3).map(|(c, _)| c).collect()
}

/// Render suggestions as a sentence, or `None` when there are none.
pub fn format_suggestion(suggestions: &[&str]) -> Option<String> {
    let quoted: Vec<String> = suggestions.iter().map(|s| format!("'{}'", s)).collect();
    match quoted.as_slice() {
        [] => None,
        [one] => Some(format!("Did you mean {}?", one)),
        [first, second] => Some(format!("Did you mean {} or {}?", first, second)),
        [init @ .., last] => Some(format!("Did you mean {}, or {}?", init.join(", "), last)),
    }
}
