//! Ordered parallel fan-out over independent units of work, such as one
//! road's geometry per task.

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::debug;

use crate::error::{Result, RoadGeomError};

/// Applies `f` to every item in parallel.
///
/// Results are written into a pre-sized buffer at the index of their input,
/// so the output order matches the input order whatever order the tasks
/// finish in. `f` receives the input index alongside the item.
pub fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    debug!(tasks = items.len(), "fanning out");
    let mut results = Vec::with_capacity(items.len());
    items
        .par_iter()
        .enumerate()
        .map(|(index, item)| f(index, item))
        .collect_into_vec(&mut results);
    results
}

/// Like [`map_ordered`] for fallible work, splitting results into successes
/// and failures.
///
/// A failing unit never affects its siblings. Both lists keep input order
/// and carry the input index.
#[allow(clippy::type_complexity)]
pub fn partition_ordered<T, R, F>(items: &[T], f: F) -> (Vec<(usize, R)>, Vec<(usize, RoadGeomError)>)
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> Result<R> + Sync + Send,
{
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (index, result) in map_ordered(items, f).into_iter().enumerate() {
        match result {
            Ok(value) => succeeded.push((index, value)),
            Err(err) => failed.push((index, err)),
        }
    }
    (succeeded, failed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::error::ConstructionError;

    #[test]
    fn results_follow_input_order() {
        let items: Vec<u64> = (0..64).collect();
        let results = map_ordered(&items, |index, &item| {
            // Earlier items finish last
            thread::sleep(Duration::from_micros(64 - item));
            (index, item * 2)
        });
        for (i, (index, doubled)) in results.into_iter().enumerate() {
            assert_eq!(index, i);
            assert_eq!(doubled, i as u64 * 2);
        }
    }

    #[test]
    fn failures_do_not_affect_siblings() {
        let items = [1.0, -1.0, 2.0];
        let (ok, failed) = partition_ordered(&items, |_, &length: &f64| {
            if length > 0.0 {
                Ok(length * 10.0)
            } else {
                Err(ConstructionError::InvalidInput("negative".into()).into())
            }
        });
        assert_eq!(ok, vec![(0, 10.0), (2, 20.0)]);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, 1);
    }

    #[test]
    fn empty_input() {
        let results: Vec<i32> = map_ordered(&[] as &[i32], |_, &x| x);
        assert!(results.is_empty());
    }
}
