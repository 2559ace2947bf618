use cipherforge::error::CipherError;
use cipherforge::key::PermutationKey;
use cipherforge::optimizer::crossover::{crossover, swap_position};
use cipherforge::optimizer::initialization::random_key;
use proptest::prelude::*;

#[test]
fn test_swap_repairs_both_children() {
    // p1: a->a b->b c->c ...   p2: a->c b->a c->b ...
    let mut c1 = PermutationKey::identity();
    let mut c2: PermutationKey = "cabdefghijklmnopqrstuvwxyz".parse().unwrap();

    swap_position(&mut c1, &mut c2, 0).unwrap();

    // c1 takes a->c; c's old owner (c) gets the displaced 'a'.
    assert_eq!(c1.to_string(), "cbadefghijklmnopqrstuvwxyz");
    // c2 takes a->a; a's old owner (b) gets the displaced 'c'.
    assert_eq!(c2.to_string(), "acbdefghijklmnopqrstuvwxyz");
    assert!(c1.is_bijective());
    assert!(c2.is_bijective());
}

#[test]
fn test_swap_of_equal_mappings_is_a_no_op() {
    let mut c1 = PermutationKey::identity();
    let mut c2: PermutationKey = "abdcefghijklmnopqrstuvwxyz".parse().unwrap();
    let (before1, before2) = (c1.clone(), c2.clone());

    swap_position(&mut c1, &mut c2, 0).unwrap();
    assert_eq!(c1, before1);
    assert_eq!(c2, before2);
}

#[test]
fn test_incomplete_parent_is_an_error() {
    let mut rng = fastrand::Rng::with_seed(1);
    let mut partial = PermutationKey::identity();
    partial.remove(b'z', b'z');

    let err = crossover(&partial, &PermutationKey::identity(), &mut rng).unwrap_err();
    assert!(matches!(err, CipherError::IncompleteKey { len: 25 }));
}

#[test]
fn test_identical_parents_breed_clones() {
    let mut rng = fastrand::Rng::with_seed(8);
    let parent = random_key(&mut rng);
    let (c1, c2) = crossover(&parent, &parent, &mut rng).unwrap();
    assert_eq!(c1, parent);
    assert_eq!(c2, parent);
}

proptest! {
    #[test]
    fn prop_children_are_bijections(s1 in any::<u64>(), s2 in any::<u64>(), s3 in any::<u64>()) {
        let p1 = random_key(&mut fastrand::Rng::with_seed(s1));
        let p2 = random_key(&mut fastrand::Rng::with_seed(s2));
        let (c1, c2) = crossover(&p1, &p2, &mut fastrand::Rng::with_seed(s3)).unwrap();
        prop_assert!(c1.is_bijective());
        prop_assert!(c2.is_bijective());
    }

    #[test]
    fn prop_swapping_every_position_keeps_bijections(s1 in any::<u64>(), s2 in any::<u64>()) {
        let p1 = random_key(&mut fastrand::Rng::with_seed(s1));
        let p2 = random_key(&mut fastrand::Rng::with_seed(s2));
        let (mut c1, mut c2) = (p1.clone(), p2.clone());
        for i in 0..26 {
            swap_position(&mut c1, &mut c2, i).unwrap();
        }
        prop_assert!(c1.is_bijective());
        prop_assert!(c2.is_bijective());
    }
}

#[test]
fn test_swap_on_short_key_is_an_error() {
    let mut short = PermutationKey::identity();
    short.remove(b'z', b'z');
    let mut full = PermutationKey::identity();

    let err = swap_position(&mut short, &mut full, 25).unwrap_err();
    assert!(matches!(err, CipherError::IncompleteKey { len: 25 }));
    assert_eq!(short.len(), 25);
}
