//! Approximate disease-name matching.
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: twice the number of
//! characters in recursively found longest common blocks, over the combined
//! length. Comparison is case-insensitive on trimmed strings.

/// Names scoring below this ratio are never returned.
pub const SIMILARITY_CUTOFF: f64 = 0.3;

/// Upper bound on the number of returned names.
pub const MAX_RESULTS: usize = 10;

/// Up to `MAX_RESULTS` names from `universe` whose ratio against `query` is at
/// least `SIMILARITY_CUTOFF`, best first (ties: exact match, then name).
pub fn search<'a, I>(query: &str, universe: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = universe
        .into_iter()
        .map(|name| (similarity(name, query), name))
        .filter(|(ratio, _)| *ratio >= SIMILARITY_CUTOFF)
        .collect();

    scored.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| (b.1 == query).cmp(&(a.1 == query)))
            .then_with(|| a.1.cmp(b.1))
    });

    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Gestalt similarity in [0.0, 1.0]. Two empty strings are identical.
/// Not symmetric: block ties resolve toward the start of `a`, so callers
/// pass the candidate first and the query second.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Characters covered by the recursive longest-common-block decomposition.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest common substring as (start in a, start in b, length). Earliest
/// block in `a` wins ties, then earliest in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    if a.is_empty() || b.is_empty() {
        return best;
    }

    // prev[j + 1] = length of the common suffix of a[..i] and b[..=j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &a_ch) in a.iter().enumerate() {
        for (j, &b_ch) in b.iter().enumerate() {
            curr[j + 1] = if a_ch == b_ch { prev[j] + 1 } else { 0 };
            let len = curr[j + 1];
            let start = (i + 1 - len, j + 1 - len);
            if len > best.2 || (len == best.2 && len > 0 && start < (best.0, best.1)) {
                best = (start.0, start.1, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
