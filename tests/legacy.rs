use ironseq::{LegacyCursor, Query, QueryError};

#[test]
fn move_next_walks_the_sequence() -> anyhow::Result<()> {
    let mut e = Query::from_vec(vec!["a", "b"]).legacy_cursor()?;
    assert_eq!(e.current(), None);

    assert!(e.move_next()?);
    assert_eq!(e.current(), Some(&"a"));
    assert!(e.move_next()?);
    assert_eq!(e.current(), Some(&"b"));

    assert!(!e.move_next()?);
    assert_eq!(e.current(), None);
    Ok(())
}

#[test]
fn reset_is_unsupported() -> anyhow::Result<()> {
    let mut e = Query::range(0, 3)?.legacy_cursor()?;
    e.move_next()?;
    assert!(matches!(e.reset(), Err(QueryError::Unsupported(_))));
    // the failed reset leaves the cursor where it was
    assert!(e.move_next()?);
    assert_eq!(e.current(), Some(&1));
    Ok(())
}

#[test]
fn wraps_any_cursor() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![3, 1, 2]).order_by(|n| *n);
    let mut e = LegacyCursor::new(q.cursor()?);
    let mut seen = Vec::new();
    while e.move_next()? {
        seen.extend(e.current().copied());
    }
    assert_eq!(seen, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn errors_propagate_through_move_next() -> anyhow::Result<()> {
    let q = Query::from_vec(vec!["1", "x"]).try_map(|s| Ok(s.parse::<i32>()?));
    let mut e = q.legacy_cursor()?;
    assert!(e.move_next()?);
    assert_eq!(e.current(), Some(&1));
    assert!(matches!(e.move_next(), Err(QueryError::Callback(_))));
    assert_eq!(e.current(), None);
    Ok(())
}
