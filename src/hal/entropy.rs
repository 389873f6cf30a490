use rand::{RngCore, rngs::OsRng};

/// Noise used to seed the apple generator on every `initialize()`
pub trait EntropySource {
    fn read_noise(&mut self) -> u64;
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn read_noise(&mut self) -> u64 {
        (**self).read_noise()
    }
}

/// Operating-system randomness, standing in for a floating analog pin
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn read_noise(&mut self) -> u64 {
        OsRng.next_u64()
    }
}

/// Always returns the same seed, so every game replays identically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntropy(pub u64);

impl EntropySource for FixedEntropy {
    fn read_noise(&mut self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_entropy_repeats() {
        let mut entropy = FixedEntropy(42);
        assert_eq!(entropy.read_noise(), 42);
        assert_eq!(entropy.read_noise(), 42);
    }

    #[test]
    fn test_boxed_source() {
        let mut entropy: Box<dyn EntropySource> = Box::new(FixedEntropy(9));
        assert_eq!(entropy.read_noise(), 9);
    }
}
