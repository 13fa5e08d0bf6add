//! Selection order of generated candidates.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Order in which a selector yields its candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionOrder {
    /// The order in which the candidates were generated.
    #[default]
    Original,
    /// A shuffled order drawn from the solver's random generator.
    Random,
}

impl SelectionOrder {
    /// Reorders `items` in place.
    pub fn apply<T>(&self, items: &mut [T], rng: &mut StdRng) {
        if *self == SelectionOrder::Random {
            items.shuffle(rng);
        }
    }
}
