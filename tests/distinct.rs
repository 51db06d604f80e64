use ironseq::testing::*;
use ironseq::{OrderedFloat, Query};

#[test]
fn distinct_keeps_first_occurrence_order() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![0, 0, 1, 3, 5, 6, 5, 7, 8, 8]).distinct();
    assert_query_yields(&q, &[0, 1, 3, 5, 6, 7, 8]);
    Ok(())
}

#[test]
fn distinct_is_idempotent() -> anyhow::Result<()> {
    let data = pseudo_random_data(300, 0, 40);
    let once = Query::from_vec(data.clone()).distinct().to_vec()?;
    let twice = Query::from_vec(data).distinct().distinct().to_vec()?;
    assert_collections_equal(&once, &twice);
    assert!(once.len() <= 40);
    Ok(())
}

#[test]
fn distinct_by_compares_projected_keys() -> anyhow::Result<()> {
    let q = Query::from_vec(vec!["Apple", "avocado", "Banana", "blueberry", "cherry"])
        .distinct_by(|s| s.to_ascii_lowercase().chars().next());
    assert_eq!(q.to_vec()?, vec!["Apple", "Banana", "cherry"]);
    Ok(())
}

#[test]
fn distinct_over_floats_via_ordered_float() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![1.5, 2.0, 1.5, f64::NAN, f64::NAN])
        .map(|x| OrderedFloat(*x))
        .distinct();
    assert_eq!(q.count()?, 3);
    Ok(())
}

#[test]
fn union_is_first_seen_across_both_inputs() -> anyhow::Result<()> {
    let a = Query::from_vec(vec![5, 3, 9, 7, 5, 9, 3, 7]);
    let b = Query::from_vec(vec![8, 3, 6, 4, 4, 9, 1, 0]);
    assert_query_yields(&a.union(b), &[5, 3, 9, 7, 8, 6, 4, 1, 0]);
    Ok(())
}

#[test]
fn intersect_emits_each_common_key_once_in_first_order() -> anyhow::Result<()> {
    let a = Query::from_vec(vec![44, 26, 92, 30, 71, 38, 26]);
    let b = Query::from_vec(vec![39, 59, 83, 47, 26, 4, 30]);
    assert_query_yields(&a.intersect(b), &[26, 30]);
    Ok(())
}

#[test]
fn except_emits_first_only_keys_once() -> anyhow::Result<()> {
    let a = Query::from_vec(vec![2.0, 2.0, 2.1, 2.2, 2.3, 2.3, 2.4, 2.5])
        .map(|x| OrderedFloat(*x));
    let b = Query::from_vec(vec![OrderedFloat(2.2)]);
    let out: Vec<f64> = a.except(b).map(|x| x.0).to_vec()?;
    assert_eq!(out, vec![2.0, 2.1, 2.3, 2.4, 2.5]);
    Ok(())
}

#[test]
fn keyed_set_operations_keep_first_sequence_elements() -> anyhow::Result<()> {
    let first = Query::from_vec(vec![("a", 1), ("b", 2), ("c", 3)]);
    let second = Query::from_vec(vec![("B", 20), ("D", 40)]);
    let key = |p: &(&str, i32)| p.0.to_ascii_lowercase();

    let common = first.clone().intersect_by(second.clone(), key);
    assert_eq!(common.to_vec()?, vec![("b", 2)]);

    let only_first = first.clone().except_by(second.clone(), key);
    assert_eq!(only_first.to_vec()?, vec![("a", 1), ("c", 3)]);

    let merged = first.union_by(second, key);
    assert_eq!(
        merged.to_vec()?,
        vec![("a", 1), ("b", 2), ("c", 3), ("D", 40)]
    );
    Ok(())
}

#[test]
fn set_operations_against_empty_inputs() -> anyhow::Result<()> {
    let data = Query::from_vec(vec![1, 2, 2]);
    assert!(data.clone().intersect(Query::empty()).to_vec()?.is_empty());
    assert_eq!(data.clone().except(Query::empty()).to_vec()?, vec![1, 2]);
    assert_eq!(Query::empty().union(data).to_vec()?, vec![1, 2]);
    Ok(())
}

#[test]
fn except_suppresses_repeats_from_first() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![1, 2, 2, 3, 4, 4]).except(Query::from_vec(vec![3]));
    assert_eq!(q.to_vec()?, vec![1, 2, 4]);
    Ok(())
}

#[test]
fn intersect_keeps_first_sequence_order() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![5, 1, 5, 2, 1]).intersect(Query::from_vec(vec![1, 5, 9]));
    assert_eq!(q.to_vec()?, vec![5, 1]);
    Ok(())
}
