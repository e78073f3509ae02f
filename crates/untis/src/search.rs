//! Fuzzy name ranking.

/// Similarity of two strings in `[0, 1]` (Sørensen–Dice over character bigrams).
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b)
}

/// Score of one candidate against the searched name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    /// Position of the candidate in the input list
    pub index: usize,
    pub rating: f64,
}

/// Rates every candidate against `target`, in input order.
pub fn rate_all<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<Rating> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| Rating {
            index,
            rating: similarity(target, candidate),
        })
        .collect()
}

/// Returns at most `max_matches` ratings of at least `min_rating`, best first.
///
/// The sort is stable, so candidates with equal scores keep their input order.
pub fn rank<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_matches: usize,
    min_rating: f64,
) -> Vec<Rating> {
    let mut ratings: Vec<Rating> = rate_all(target, candidates)
        .into_iter()
        .filter(|r| r.rating >= min_rating)
        .collect();

    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ratings.truncate(max_matches);
    ratings
}
