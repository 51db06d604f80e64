use ironseq::testing::*;
use ironseq::{Grouping, Query};
use std::collections::HashMap;

#[test]
fn group_by_partitions_the_input_completely() -> anyhow::Result<()> {
    let data = pseudo_random_data(500, -50, 50);
    let groups = Query::from_vec(data.clone())
        .group_by(|n| n.rem_euclid(7))
        .to_vec()?;

    let regrouped: Vec<i64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    assert_collections_unordered_equal(&regrouped, &data);

    for g in &groups {
        assert!(!g.is_empty());
        assert_all(g.elements(), |n| n.rem_euclid(7) == *g.key());
    }

    let mut keys: Vec<i64> = groups.iter().map(|g| *g.key()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), groups.len());
    Ok(())
}

#[test]
fn groups_follow_first_seen_key_and_source_order() -> anyhow::Result<()> {
    let pets = Query::from_vec(pets());
    let by_owner = pets.group_by_element(|p| p.owner.clone(), |p| p.name.clone());

    let expected = vec![
        Grouping::new(
            "Terry Adams".to_string(),
            vec!["Barley".to_string(), "Boots".to_string()],
        ),
        Grouping::new("Charlotte Weiss".to_string(), vec!["Whiskers".to_string()]),
        Grouping::new("Magnus Hedlund".to_string(), vec!["Daisy".to_string()]),
    ];
    assert_query_yields(&by_owner, &expected);
    Ok(())
}

#[test]
fn group_by_result_builds_summaries() -> anyhow::Result<()> {
    let summary = Query::from_vec(fruits()).group_by_result(
        |f| f.len(),
        |f| f.to_string(),
        |len, names| (len, names.len()),
    );
    let counts: HashMap<usize, usize> = summary.to_vec()?.into_iter().collect();
    assert_eq!(counts[&5], 4);
    assert_eq!(counts[&6], 2);
    assert_eq!(counts[&9], 2);
    assert_eq!(counts[&12], 1);
    Ok(())
}

#[test]
fn group_by_is_deferred_and_drains_once_per_pass() -> anyhow::Result<()> {
    let (source, pulls) = counting_source(vec![1, 2, 3, 4]);
    let groups = source.group_by(|n| n % 2 == 0);
    assert_eq!(pulls.get(), 0);

    let mut cursor = groups.cursor()?;
    assert_eq!(pulls.get(), 0);
    let first = cursor.advance()?;
    assert_eq!(pulls.get(), 4);
    assert_eq!(first, Some(Grouping::new(false, vec![1, 3])));
    Ok(())
}

#[test]
fn grouping_into_parts_and_iteration() {
    let g = Grouping::new('k', vec![1, 2, 3]);
    assert_eq!(g.len(), 3);
    assert_eq!(g.clone().into_iter().sum::<i32>(), 6);
    let (key, values) = g.into_parts();
    assert_eq!(key, 'k');
    assert_eq!(values, vec![1, 2, 3]);
}

#[cfg(feature = "serde")]
#[test]
fn grouping_serializes_as_key_and_elements() -> anyhow::Result<()> {
    let groups = Query::from_vec(vec!["ab", "c", "de"])
        .group_by(|s| s.len())
        .to_vec()?;
    let json = serde_json::to_string(&groups)?;
    assert_eq!(
        json,
        r#"[{"key":2,"elements":["ab","de"]},{"key":1,"elements":["c"]}]"#
    );

    let back: Vec<Grouping<usize, String>> = serde_json::from_str(&json)?;
    assert_eq!(back[0].elements(), &["ab".to_string(), "de".to_string()]);
    Ok(())
}

#[test]
fn result_selector_shapes_each_bucket() -> anyhow::Result<()> {
    let q = Query::from_vec(vec!["a", "bb", "cc", "d"]).group_by_result(
        |s| s.len(),
        |s| s.to_uppercase(),
        |k, v: Vec<String>| format!("{k}:{}", v.join(",")),
    );
    assert_eq!(q.to_vec()?, vec!["1:A,D", "2:BB,CC"]);
    Ok(())
}
