use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use super::RawTable;

impl RawTable {
    /// Sample the decoded rows, remembering how many were dropped.
    pub fn sample(self, size: usize, seed: u64) -> RawTable {
        let before = self.rows.len();
        let rows = sample_rows(self.rows, size, seed);
        let sampled_out = self.sampled_out + before - rows.len();
        RawTable {
            schema: self.schema,
            rows,
            skipped_rows: self.skipped_rows,
            sampled_out,
        }
    }
}

/// Keep a seeded random sample of at most `size` rows.
///
/// Tables at or under `size` rows (and `size == 0`, which disables sampling)
/// come back untouched. Sampled rows keep their original relative order, and
/// the same seed always selects the same rows.
pub fn sample_rows<T>(rows: Vec<T>, size: usize, seed: u64) -> Vec<T> {
    if size == 0 || rows.len() <= size {
        return rows;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut keep = index::sample(&mut rng, rows.len(), size).into_vec();
    keep.sort_unstable();

    let mut keep = keep.into_iter().peekable();
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            if keep.peek() == Some(&i) {
                keep.next();
                Some(row)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_tables_are_untouched() {
        let rows: Vec<u32> = (0..10).collect();
        assert_eq!(sample_rows(rows.clone(), 10, 42), rows);
        assert_eq!(sample_rows(rows.clone(), 0, 42), rows);
    }

    #[test]
    fn test_sample_is_sized_ordered_and_deterministic() {
        let rows: Vec<u32> = (0..1000).collect();
        let first = sample_rows(rows.clone(), 100, 42);
        let second = sample_rows(rows.clone(), 100, 42);

        assert_eq!(first.len(), 100);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sampled_table_remembers_rows_read() {
        let table = RawTable {
            rows: (0..100)
                .map(|i| crate::table::RawListing {
                    title: Some(format!("Job {i}")),
                    ..Default::default()
                })
                .collect(),
            skipped_rows: 2,
            ..Default::default()
        };

        let sampled = table.sample(10, 42);
        assert_eq!(sampled.rows.len(), 10);
        assert_eq!(sampled.sampled_out, 90);
        assert_eq!(sampled.rows_read(), 102);
    }

    #[test]
    fn test_different_seeds_pick_different_rows() {
        let rows: Vec<u32> = (0..1000).collect();
        assert_ne!(sample_rows(rows.clone(), 50, 1), sample_rows(rows, 50, 2));
    }
}
