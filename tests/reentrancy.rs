//! Every operator must support interleaved, independent passes over the same
//! query. `assert_reentrant` opens two cursors, advances them in lockstep and
//! then runs a third pass.

use ironseq::Query;
use ironseq::testing::*;

fn numbers() -> Query<i64> {
    Query::from_vec(pseudo_random_data(60, 0, 20))
}

#[test]
fn stateless_operators_are_reentrant() {
    assert_reentrant(&numbers().map(|n| n * 2));
    assert_reentrant(&numbers().filter(|n| n % 3 == 0));
    assert_reentrant(&numbers().filter_indexed(|_, i| i % 2 == 0));
    assert_reentrant(&numbers().skip(10));
    assert_reentrant(&numbers().take(10));
    assert_reentrant(&numbers().skip_while(|n, _| *n != 0));
    assert_reentrant(&numbers().take_while(|n, _| *n != 0));
    assert_reentrant(&Query::<i64>::empty().default_if_empty(7));
    assert_reentrant(&numbers().zip(numbers().skip(1), |a, b| a - b));
}

#[test]
fn flattening_operators_are_reentrant() {
    assert_reentrant(&numbers().select_many(|n| vec![*n; 2]));
    assert_reentrant(&numbers().select_many(|n| Query::repeat(*n, 3)));
    assert_reentrant(&numbers().concat(numbers().map(|n| -n)));
    assert_reentrant(&Query::concat_all(vec![numbers(), Query::empty(), numbers()]));
}

#[test]
fn set_operators_are_reentrant() {
    assert_reentrant(&numbers().distinct());
    assert_reentrant(&numbers().union(Query::from_vec(vec![100, 5, 200])));
    assert_reentrant(&numbers().intersect(Query::from_vec(vec![1, 3, 5, 7])));
    assert_reentrant(&numbers().except(Query::from_vec(vec![1, 3, 5, 7])));
}

#[test]
fn hash_operators_are_reentrant() {
    assert_reentrant(&numbers().group_by(|n| n % 4));
    assert_reentrant(&numbers().group_by_result(|n| n % 4, |n| *n, |k, v| (k, v.len())));

    let people = Query::from_vec(owners());
    let animals = Query::from_vec(pets());
    assert_reentrant(&people.clone().join(
        animals.clone(),
        |p| p.name.clone(),
        |pet| pet.owner.clone(),
        |p, pet| (p.name.clone(), pet.name.clone()),
    ));
    assert_reentrant(&people.group_join(
        animals,
        |p| p.name.clone(),
        |pet| pet.owner.clone(),
        |p, bucket| (p.name.clone(), bucket.len()),
    ));
}

#[test]
fn ordering_is_reentrant_before_and_after_caching() {
    let sorted = numbers().order_by(|n| *n).then_by_descending(|n| n % 5);
    assert_reentrant(&sorted);
    assert_reentrant(&sorted.clone().map(|n| n + 1));
    assert_reentrant(&Query::from_vec(fruits()).order_by_descending(|f| f.len()));
}

#[test]
fn generated_sources_are_reentrant() {
    assert_reentrant(&Query::generate(|| (0..25).map(|n: i32| n * n)));
    assert_reentrant(&Query::repeat_forever('x').take(4));
    let (counted, _) = counting_source(vec![3, 1, 2]);
    assert_reentrant(&counted.distinct());
}
