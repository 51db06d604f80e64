use ironseq::testing::*;
use ironseq::{Query, QueryError};

#[test]
fn join_pairs_every_matching_inner_in_outer_order() -> anyhow::Result<()> {
    let people = Query::from_vec(owners());
    let pets = Query::from_vec(pets());

    let rows = people.join(
        pets,
        |p| p.name.clone(),
        |pet| pet.owner.clone(),
        |p, pet| format!("{} - {}", p.name, pet.name),
    );

    assert_query_yields(
        &rows,
        &[
            "Magnus Hedlund - Daisy".to_string(),
            "Terry Adams - Barley".to_string(),
            "Terry Adams - Boots".to_string(),
            "Charlotte Weiss - Whiskers".to_string(),
        ],
    );
    Ok(())
}

#[test]
fn group_join_emits_one_row_per_matched_outer() -> anyhow::Result<()> {
    let people = Query::from_vec(owners());
    let pets = Query::from_vec(pets());

    let rows = people.group_join(
        pets,
        |p| p.name.clone(),
        |pet| pet.owner.clone(),
        |p, bucket| {
            let names: Vec<&str> = bucket.iter().map(|pet| pet.name.as_str()).collect();
            (p.name.clone(), names.join(","))
        },
    );

    let out = rows.to_vec()?;
    assert_eq!(
        out,
        vec![
            ("Magnus Hedlund".to_string(), "Daisy".to_string()),
            ("Terry Adams".to_string(), "Barley,Boots".to_string()),
            ("Charlotte Weiss".to_string(), "Whiskers".to_string()),
        ]
    );
    assert!(out.iter().all(|(owner, _)| owner != "Arlene Huff"));
    Ok(())
}

#[test]
fn join_with_empty_side_is_empty() -> anyhow::Result<()> {
    let rows = Query::from_vec(vec![1, 2, 3]).join(
        Query::<i32>::empty(),
        |n| *n,
        |n| *n,
        |a, b| a + b,
    );
    assert_eq!(rows.count()?, 0);

    let rows = Query::<i32>::empty().group_join(
        Query::from_vec(vec![1, 2, 3]),
        |n| *n,
        |n| *n,
        |a, bucket| a + bucket.len() as i32,
    );
    assert_eq!(rows.count()?, 0);
    Ok(())
}

#[test]
fn join_key_types_can_be_composite() -> anyhow::Result<()> {
    let left = Query::from_vec(vec![("x", 1, 'a'), ("y", 2, 'b')]);
    let right = Query::from_vec(vec![(1, 'a', 10), (1, 'b', 20), (2, 'b', 30)]);
    let rows = left.join(
        right,
        |l| (l.1, l.2),
        |r| (r.0, r.1),
        |l, r| (l.0, r.2),
    );
    assert_eq!(rows.to_vec()?, vec![("x", 10), ("y", 30)]);
    Ok(())
}

#[test]
fn invalid_inner_key_is_reported_with_its_position() {
    let people = Query::from_vec(owners());
    let pets = Query::from_vec(vec![
        Pet {
            name: "Barley".to_string(),
            owner: "Terry Adams".to_string(),
        },
        Pet {
            name: "Stray".to_string(),
            owner: String::new(),
        },
    ]);

    let rows = people.try_join(
        pets,
        |p| p.name.clone(),
        |pet| (!pet.owner.is_empty()).then(|| pet.owner.clone()),
        |p, pet| (p.name.clone(), pet.name.clone()),
    );
    assert!(matches!(
        rows.to_vec(),
        Err(QueryError::InvalidKey { position: 1 })
    ));
}

#[test]
fn try_group_join_accepts_all_present_keys() -> anyhow::Result<()> {
    let orders = Query::from_vec(vec![(1, "tea"), (2, "cake"), (1, "scone")]);
    let customers = Query::from_vec(vec![1, 2, 3]);
    let rows = customers.try_group_join(
        orders,
        |c| *c,
        |o| Some(o.0),
        |c, bucket| (*c, bucket.len()),
    );
    assert_eq!(rows.to_vec()?, vec![(1, 2), (2, 1)]);
    Ok(())
}

#[test]
fn join_lookup_is_built_lazily_on_first_pull() -> anyhow::Result<()> {
    let (inner, pulls) = counting_source(vec![1, 2, 3]);
    let rows = Query::from_vec(vec![3, 1]).join(inner, |n| *n, |n| *n, |a, _| *a);
    let mut cursor = rows.cursor()?;
    assert_eq!(pulls.get(), 0);
    assert_eq!(cursor.advance()?, Some(3));
    assert_eq!(pulls.get(), 3);
    assert_eq!(cursor.advance()?, Some(1));
    assert_eq!(pulls.get(), 3);
    Ok(())
}

#[test]
fn duplicate_outer_keys_each_pair_with_the_bucket() -> anyhow::Result<()> {
    let outer = Query::from_vec(vec!['a', 'b', 'a']);
    let inner = Query::from_vec(vec![('a', 1), ('a', 2)]);
    let q = outer.join(inner, |o| *o, |i| i.0, |o, i| (*o, i.1));
    assert_eq!(q.to_vec()?, vec![('a', 1), ('a', 2), ('a', 1), ('a', 2)]);
    Ok(())
}
