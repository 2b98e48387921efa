//! Best-match selection by edit distance

use super::types::SearchResult;

/// Pick the result whose title is closest to `query`.
///
/// Returns `None` for an empty slice. A single candidate is returned as-is.
/// Among candidates tied at the minimum distance, the earliest in input
/// order wins; an exact title match wins outright.
pub fn select_best<'a>(query: &str, results: &'a [SearchResult]) -> Option<&'a SearchResult> {
    select_best_by(query, results, levenshtein)
}

/// [`select_best`] with a caller-supplied distance function.
pub fn select_best_by<'a, F>(
    query: &str,
    results: &'a [SearchResult],
    mut distance: F,
) -> Option<&'a SearchResult>
where
    F: FnMut(&str, &str) -> usize,
{
    match results {
        [] => return None,
        [only] => return Some(only),
        _ => {}
    }

    let mut best: Option<(&SearchResult, usize)> = None;

    // Scanned back to front; `<=` lets earlier entries take over ties.
    for result in results.iter().rev() {
        let lev = distance(query, &result.title);

        if lev == 0 {
            return Some(result);
        }

        if best.map_or(true, |(_, shortest)| lev <= shortest) {
            best = Some((result, lev));
        }
    }

    best.map(|(result, _)| result)
}

/// Levenshtein edit distance over Unicode scalar values.
///
/// Insertions, deletions and substitutions all cost one. Case-sensitive.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str) -> SearchResult {
        SearchResult::new(title, format!("https://example.org/{}", title))
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("vim", ""), 3);
        assert_eq!(levenshtein("", "vim"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("Vim", "vim"), 1);
    }

    #[test]
    fn test_levenshtein_counts_code_points() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本", "日本語"), 1);
    }

    #[test]
    fn test_empty_list() {
        assert!(select_best("vim", &[]).is_none());
    }

    #[test]
    fn test_single_result_skips_distance() {
        let results = vec![result("emacs")];
        let best = select_best_by("vim", &results, |_, _| {
            panic!("distance must not be computed for a single result")
        });
        assert_eq!(best, Some(&results[0]));
    }

    #[test]
    fn test_exact_match_wins_regardless_of_position() {
        let results = vec![result("vi"), result("vim"), result("vimb"), result("neovim")];
        assert_eq!(select_best("vim", &results).unwrap().title, "vim");

        let results = vec![result("vim"), result("vi"), result("vimb")];
        assert_eq!(select_best("vim", &results).unwrap().title, "vim");
    }

    #[test]
    fn test_tie_break_prefers_earliest() {
        let results = vec![result("A"), result("B"), result("C")];
        let distances = |_: &str, title: &str| match title {
            "A" => 2,
            _ => 1,
        };
        assert_eq!(select_best_by("q", &results, distances).unwrap().title, "B");
    }

    #[test]
    fn test_all_tied_returns_first() {
        let results = vec![result("aaa"), result("bbb"), result("ccc")];
        assert_eq!(select_best("xxx", &results).unwrap().title, "aaa");
    }

    #[test]
    fn test_closest_title() {
        let results = vec![result("firefox-developer-edition"), result("firefox"), result("firefox-esr")];
        assert_eq!(select_best("firefo", &results).unwrap().title, "firefox");
    }

    #[test]
    fn test_returns_member_of_input() {
        let results = vec![result("one"), result("two"), result("three")];
        for query in ["", "t", "thr", "zzzzzz", "one"] {
            let best = select_best(query, &results).unwrap();
            assert!(results.iter().any(|r| std::ptr::eq(r, best)));
        }
    }
}
