// Thread-RNG implementation of the randomness seam
use crate::application::random_source::RandomSource;
use rand::Rng;

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn unit(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }

    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
