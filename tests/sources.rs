use ironseq::testing::*;
use ironseq::{BoxCursor, Cursor, IterCursor, Query, QueryError, SequenceOperator};
use rstest::rstest;

#[test]
fn from_vec_reports_length_and_yields_in_order() -> anyhow::Result<()> {
    let q = Query::from_vec(vec!["a", "b", "c"]);
    assert_eq!(q.known_len(), Some(3));
    assert_query_yields(&q, &["a", "b", "c"]);
    Ok(())
}

#[test]
fn empty_source_yields_nothing() -> anyhow::Result<()> {
    let q = Query::<i32>::empty();
    assert_eq!(q.count()?, 0);
    assert!(q.to_vec()?.is_empty());
    Ok(())
}

#[rstest]
#[case(0, 0, vec![])]
#[case(1, 3, vec![1, 2, 3])]
#[case(-2, 4, vec![-2, -1, 0, 1])]
fn range_yields_consecutive_values(
    #[case] start: i64,
    #[case] count: usize,
    #[case] expected: Vec<i64>,
) -> anyhow::Result<()> {
    let q = Query::range(start, count)?;
    assert_eq!(q.known_len(), Some(count));
    assert_eq!(q.to_vec()?, expected);
    Ok(())
}

#[test]
fn range_overflow_is_rejected_up_front() {
    let err = Query::range(i64::MAX - 1, 3).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn repeat_is_finite_and_counted() -> anyhow::Result<()> {
    let q = Query::repeat("x".to_string(), 4);
    assert_eq!(q.count()?, 4);
    assert_eq!(q.distinct().to_vec()?, vec!["x".to_string()]);
    Ok(())
}

#[test]
fn infinite_sources_work_with_short_circuiting_operators() -> anyhow::Result<()> {
    let ones = Query::repeat_forever(1u8);
    assert_eq!(ones.clone().take(5).sum()?, 5);
    assert!(ones.any()?);

    let squares = Query::generate(|| (1u64..).map(|n| n * n));
    assert_eq!(squares.first_where(|n| *n > 50)?, 64);
    assert_eq!(squares.skip(2).take(3).to_vec()?, vec![9, 16, 25]);
    Ok(())
}

#[test]
fn generate_calls_factory_once_per_pass() -> anyhow::Result<()> {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let q = Query::generate(move || {
        counter.set(counter.get() + 1);
        vec![1, 2, 3]
    });
    assert_eq!(calls.get(), 0);
    q.to_vec()?;
    q.to_vec()?;
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn from_cursor_fn_accepts_custom_cursors() -> anyhow::Result<()> {
    struct Countdown(u32);

    impl Cursor<u32> for Countdown {
        fn advance(&mut self) -> ironseq::Result<Option<u32>> {
            if self.0 == 0 {
                return Ok(None);
            }
            self.0 -= 1;
            Ok(Some(self.0))
        }
    }

    let q = Query::from_cursor_fn(|| -> BoxCursor<u32> { Box::new(Countdown(3)) });
    assert_eq!(q.to_vec()?, vec![2, 1, 0]);
    assert_eq!(q.known_len(), None);

    let wrapped = Query::from_cursor_fn(|| -> BoxCursor<char> {
        Box::new(IterCursor::new("hey".chars()))
    });
    assert_eq!(wrapped.to_vec()?, vec!['h', 'e', 'y']);
    Ok(())
}

#[test]
fn iter_view_yields_results() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![1, 2, 3]).map(|n| n * 10);
    let collected: Vec<i32> = q.iter().collect::<Result<_, _>>()?;
    assert_eq!(collected, vec![10, 20, 30]);
    Ok(())
}

#[test]
fn iter_view_stops_after_first_error() {
    let q = Query::from_vec(vec![1, 0, 2]).try_map(|n| {
        if *n == 0 {
            anyhow::bail!("zero");
        }
        Ok(10 / n)
    });
    let items: Vec<_> = q.iter().collect();
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(10)));
    assert!(matches!(items[1], Err(QueryError::Callback(_))));
}

#[test]
fn each_cursor_restarts_from_the_beginning() -> anyhow::Result<()> {
    let q = Query::from_vec(vec![1, 2, 3]);
    let mut a = q.cursor()?;
    assert_eq!(a.advance()?, Some(1));
    let mut b = q.cursor()?;
    assert_eq!(b.advance()?, Some(1));
    assert_eq!(a.advance()?, Some(2));
    Ok(())
}

struct Letters(&'static str);

impl SequenceOperator<char> for Letters {
    fn open(&self) -> ironseq::Result<BoxCursor<char>> {
        Ok(Box::new(IterCursor::new(self.0.chars())))
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.0.chars().count())
    }

    fn name(&self) -> &'static str {
        "letters"
    }
}

#[test]
fn custom_operators_become_queries() -> anyhow::Result<()> {
    let q = Query::from_operator(Letters("abc"));
    assert_eq!(q.known_len(), Some(3));
    assert_eq!(q.count()?, 3);
    assert_eq!(q.map(|c| c.to_ascii_uppercase()).to_vec()?, vec!['A', 'B', 'C']);
    Ok(())
}

#[test]
fn debug_output_names_the_last_stage() {
    let sorted = Query::from_vec(vec![1]).order_by(|n| *n);
    assert_eq!(
        format!("{sorted:?}"),
        "Query { node: \"order_by\", ordered: true }"
    );

    let filtered = Query::from_vec(vec![1]).filter(|n| *n > 0);
    assert_eq!(
        format!("{filtered:?}"),
        "Query { node: \"filter\", ordered: false }"
    );
    assert_eq!(
        format!("{:?}", Query::from_operator(Letters("x"))),
        "Query { node: \"letters\", ordered: false }"
    );
}
