use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Decides the display order of answer options when questions are loaded.
pub trait OptionShuffler: Send + Sync {
    /// Permute `indices` in place.
    fn shuffle_indices(&self, indices: &mut [usize]);

    /// Shuffle `items` and report where the item originally at `tracked` ended up.
    fn shuffle_tracking<T>(&self, items: Vec<T>, tracked: usize) -> (Vec<T>, usize)
    where
        Self: Sized,
    {
        shuffle_with(self, items, tracked)
    }
}

/// Shuffle `items` through any shuffler, including trait objects.
pub fn shuffle_with<T, S>(shuffler: &S, items: Vec<T>, tracked: usize) -> (Vec<T>, usize)
where
    S: OptionShuffler + ?Sized,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    shuffler.shuffle_indices(&mut order);

    let tracked_at = order.iter().position(|&i| i == tracked).unwrap_or(tracked);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let shuffled = order
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect();
    (shuffled, tracked_at)
}

/// Thread-local randomness for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffler;

impl OptionShuffler for RandomShuffler {
    fn shuffle_indices(&self, indices: &mut [usize]) {
        indices.shuffle(&mut rand::rng());
    }
}

/// Reproducible ordering for tests.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl OptionShuffler for SeededShuffler {
    fn shuffle_indices(&self, indices: &mut [usize]) {
        if let Ok(mut rng) = self.rng.lock() {
            indices.shuffle(&mut *rng);
        }
    }
}

/// Leaves the order untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityShuffler;

impl OptionShuffler for IdentityShuffler {
    fn shuffle_indices(&self, _indices: &mut [usize]) {}
}
