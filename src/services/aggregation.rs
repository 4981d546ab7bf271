use std::collections::HashMap;

use crate::models::{MovieId, MovieSummary};

/// Accumulated evidence for one candidate across all seed similarity lists
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub movie_id: MovieId,
    /// Sum of positional weights
    pub score: f64,
    /// Number of seed lists containing the candidate
    pub count: u32,
    /// Metadata from the last list that contained the candidate
    pub snapshot: MovieSummary,
    /// Insertion order of the candidate's first appearance; final tie-break
    pub first_seen: usize,
}

/// Weight of the item at `idx` in a list of `list_len` items: `(n - idx) / n`
///
/// Rank 0 always weighs 1.0 and the weight falls linearly to `1 / n` at the
/// tail. An empty list is treated as length 1.
pub fn positional_weight(list_len: usize, idx: usize) -> f64 {
    let n = list_len.max(1) as f64;
    (n - idx as f64) / n
}

/// Score map keyed by candidate id
#[derive(Debug, Default)]
pub struct ScoreBoard {
    entries: HashMap<MovieId, ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one seed's similarity list into the board
    pub fn add_list(&mut self, list: &[MovieSummary]) {
        let n = list.len();

        for (idx, movie) in list.iter().enumerate() {
            let Some(movie_id) = movie.id else {
                tracing::debug!(title = %movie.title, "Skipping similar movie without id");
                continue;
            };

            let weight = positional_weight(n, idx);
            let next_seq = self.entries.len();

            let entry = self.entries.entry(movie_id).or_insert_with(|| ScoreEntry {
                movie_id,
                score: 0.0,
                count: 0,
                snapshot: MovieSummary::default(),
                first_seen: next_seq,
            });
            entry.score += weight;
            entry.count += 1;
            entry.snapshot = movie.clone();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the board and returns the best `limit` candidates
    pub fn into_ranked(self, limit: usize) -> Vec<ScoreEntry> {
        rank_candidates(self.entries.into_values().collect(), limit)
    }
}

/// Builds a board from seed lists, in seed order
pub fn aggregate<'a, I>(lists: I) -> ScoreBoard
where
    I: IntoIterator<Item = &'a [MovieSummary]>,
{
    let mut board = ScoreBoard::new();
    for list in lists {
        board.add_list(list);
    }
    board
}

/// Sorts by score desc, then count desc, then first appearance; keeps `limit`
pub fn rank_candidates(mut entries: Vec<ScoreEntry>, limit: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> MovieSummary {
        MovieSummary {
            id: Some(id),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn list(ids: &[MovieId]) -> Vec<MovieSummary> {
        ids.iter().map(|id| movie(*id, &format!("Movie {}", id))).collect()
    }

    fn entry(board: &ScoreBoard, movie_id: MovieId) -> &ScoreEntry {
        board.entries.get(&movie_id).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_positional_weight_linear_decay() {
        let weights: Vec<f64> = (0..4).map(|idx| positional_weight(4, idx)).collect();
        assert_eq!(weights, vec![1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn test_positional_weight_empty_list() {
        assert_eq!(positional_weight(0, 0), 1.0);
    }

    #[test]
    fn test_candidate_in_two_lists_accumulates() {
        let first = list(&[10, 11, 12, 13, 14]);
        let second = list(&[20, 10, 21, 22, 23]);

        let board = aggregate([first.as_slice(), second.as_slice()]);
        let entry = entry(&board, 10);

        assert_close(entry.score, 1.8);
        assert_eq!(entry.count, 2);
    }

    #[test]
    fn test_last_snapshot_wins() {
        let mut first = list(&[7]);
        first[0].overview = Some("first overview".to_string());
        let mut second = list(&[8, 7]);
        second[1].overview = None;
        second[1].title = "Renamed".to_string();

        let board = aggregate([first.as_slice(), second.as_slice()]);
        let entry = entry(&board, 7);

        assert_eq!(entry.snapshot.title, "Renamed");
        assert_eq!(entry.snapshot.overview, None);
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let mut items = list(&[1, 2]);
        items.insert(
            0,
            MovieSummary {
                id: None,
                title: "Ghost".to_string(),
                ..Default::default()
            },
        );

        let board = aggregate([items.as_slice()]);

        assert_eq!(board.len(), 2);
        // The id-less entry still occupies a position in the list
        assert_close(entry(&board, 1).score, 2.0 / 3.0);
    }

    #[test]
    fn test_no_lists_yields_empty_board() {
        let board = aggregate(Vec::<&[MovieSummary]>::new());
        assert!(board.is_empty());
        assert!(board.into_ranked(30).is_empty());
    }

    #[test]
    fn test_empty_list_contributes_nothing() {
        let empty: Vec<MovieSummary> = Vec::new();
        let board = aggregate([empty.as_slice(), list(&[5]).as_slice()]);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_rank_by_score_then_count() {
        // 1 and 2 tie on score (1.0) but 2 appears twice
        let a = list(&[1, 3]);
        let b = list(&[3, 4, 2, 5]);
        let c = list(&[6, 7, 2, 8]);

        let ranked = aggregate([a.as_slice(), b.as_slice(), c.as_slice()]).into_ranked(30);
        let ids: Vec<MovieId> = ranked.iter().map(|e| e.movie_id).collect();

        // 3: 0.5 + 1.0 = 1.5, 2: 0.5 + 0.5 = 1.0 (count 2), 1: 1.0 (count 1)
        assert_eq!(ids[0], 3);
        assert_eq!(ids[1], 2);
        assert_eq!(ids[2], 1);
        assert_eq!(ids[3], 6);
    }

    #[test]
    fn test_exact_ties_fall_back_to_first_seen() {
        let a = list(&[42]);
        let b = list(&[17]);

        let ranked = aggregate([a.as_slice(), b.as_slice()]).into_ranked(30);
        let ids: Vec<MovieId> = ranked.iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, vec![42, 17]);

        let ranked = aggregate([b.as_slice(), a.as_slice()]).into_ranked(30);
        let ids: Vec<MovieId> = ranked.iter().map(|e| e.movie_id).collect();
        assert_eq!(ids, vec![17, 42]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let ids: Vec<MovieId> = (1..=45).collect();
        let items = list(&ids);

        let ranked = aggregate([items.as_slice()]).into_ranked(30);

        assert_eq!(ranked.len(), 30);
        assert_eq!(ranked[0].movie_id, 1);
        assert_eq!(ranked[29].movie_id, 30);
    }
}
