//! Random choice of a catalog entry

use rand::Rng;

/// Uniformly random index into a collection of `len` items, `None` when empty
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}
