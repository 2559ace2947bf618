use crate::consts::ALPHABET_LEN;
use crate::error::{CfResult, CipherError};
use crate::key::PermutationKey;
use fastrand::Rng;

/// Partially-matched crossover over two complete keys.
///
/// Each position is swapped between the children with probability 1/2. A swap
/// moves the other parent's destination in and re-pairs the displaced
/// destination with the origin that previously held it, so both children stay
/// bijections after every step.
pub fn crossover(
    p1: &PermutationKey,
    p2: &PermutationKey,
    rng: &mut Rng,
) -> CfResult<(PermutationKey, PermutationKey)> {
    for parent in [p1, p2] {
        if !parent.is_complete() {
            return Err(CipherError::IncompleteKey { len: parent.len() });
        }
    }

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();

    for i in 0..ALPHABET_LEN {
        if rng.bool() {
            swap_position(&mut c1, &mut c2, i)?;
        }
    }

    Ok((c1, c2))
}

/// Exchanges the destinations held at sorted position `i` between two complete keys.
pub fn swap_position(c1: &mut PermutationKey, c2: &mut PermutationKey, i: usize) -> CfResult<()> {
    let m1 = c1
        .mappings()
        .get(i)
        .copied()
        .ok_or(CipherError::IncompleteKey { len: c1.len() })?;
    let m2 = c2
        .mappings()
        .get(i)
        .copied()
        .ok_or(CipherError::IncompleteKey { len: c2.len() })?;
    if m1 == m2 {
        return Ok(());
    }

    // The mapping in each child that already owns the destination it is about to receive.
    let comp1 = c1
        .by_destination(m2.destination)
        .ok_or(CipherError::IncompleteKey { len: c1.len() })?;
    let comp2 = c2
        .by_destination(m1.destination)
        .ok_or(CipherError::IncompleteKey { len: c2.len() })?;

    c1.remove(m1.origin, m1.destination);
    c1.remove(comp1.origin, comp1.destination);
    c2.remove(m2.origin, m2.destination);
    c2.remove(comp2.origin, comp2.destination);

    c1.insert(m2.origin, m2.destination)?;
    c1.insert(comp1.origin, m1.destination)?;
    c2.insert(m1.origin, m1.destination)?;
    c2.insert(comp2.origin, m2.destination)?;

    Ok(())
}
