// tests/combiners.rs
use anyhow::Result;
use retail_etl::*;

#[test]
fn sum_first_last_per_key() -> Result<()> {
    let data = vec![("a", 1.5), ("b", 2.0), ("a", 3.0), ("b", -1.0), ("a", 0.5)];

    let sums = from_vec(data.clone()).combine_values(Sum::<f64>::new()).collect();
    assert_eq!(sums, vec![("a", 5.0), ("b", 1.0)]);

    let firsts = from_vec(data.clone()).combine_values(First::new()).collect();
    assert_eq!(firsts, vec![("a", 1.5), ("b", 2.0)]);

    let lasts = from_vec(data).combine_values(Last::new()).collect();
    assert_eq!(lasts, vec![("a", 0.5), ("b", -1.0)]);
    Ok(())
}

#[test]
fn latest_by_prefers_newer_then_later() -> Result<()> {
    // (key, extraction day, payload)
    let rows = vec![
        ("k", 2, "second"),
        ("k", 3, "third"),
        ("k", 1, "first"),
        ("k", 3, "third-again"),
        ("j", 1, "only"),
    ];

    let out = from_vec(rows)
        .key_by(|r| r.0)
        .combine_values(LatestBy::new(|r: &(&str, i32, &str)| r.1))
        .values()
        .collect();
    assert_eq!(out, vec![("j", 1, "only"), ("k", 3, "third-again")]);
    Ok(())
}

#[test]
fn latest_snapshot_keeps_all_lines_of_newest_date() -> Result<()> {
    let rows = vec![("k", 1, 9.0), ("k", 2, 5.0), ("k", 2, 3.0), ("k", 1, 7.0)];

    let out = from_vec(rows)
        .key_by(|r| r.0)
        .combine_values(LatestSnapshot::new(|r: &(&str, i32, f64)| r.1))
        .collect();
    assert_eq!(out, vec![("k", vec![("k", 2, 5.0), ("k", 2, 3.0)])]);
    Ok(())
}

#[test]
fn map_and_key_by_chain() -> Result<()> {
    let out = from_vec(vec![3, 1, 2])
        .map(|x| x * 10)
        .key_by(|x| x % 20)
        .combine_values(Sum::<i32>::new())
        .collect();
    assert_eq!(out, vec![(0, 20), (10, 40)]);
    Ok(())
}

/// Custom combiners plug into `combine_values` like the built-in ones.
struct CountNonZero;

impl CombineFn<f64, usize, usize> for CountNonZero {
    fn create(&self) -> usize {
        0
    }

    fn add_input(&self, acc: &mut usize, v: f64) {
        if v != 0.0 {
            *acc += 1;
        }
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}

#[test]
fn custom_combiner() -> Result<()> {
    let out = from_vec(vec![(1, 0.0), (1, 2.0), (2, 0.0)])
        .combine_values(CountNonZero)
        .collect();
    assert_eq!(out, vec![(1, 1), (2, 0)]);
    Ok(())
}
