/// Identifier of one render invocation.
///
/// Generations are totally ordered; a larger value is a newer invocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic invocation counter.
///
/// Each new invocation advances the counter; a late completion from an older
/// invocation is recognised with [`GenerationCounter::is_current`] and dropped.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new invocation and returns its generation.
    pub fn advance(&mut self) -> Generation {
        self.latest = self.latest.wrapping_add(1);
        Generation(self.latest)
    }

    /// Generation of the most recently started invocation, if any.
    pub fn latest(&self) -> Option<Generation> {
        (self.latest > 0).then_some(Generation(self.latest))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}
