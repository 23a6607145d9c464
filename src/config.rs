/// Default iteration budget: total loop passes allowed in one run.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000;

/// Settings for one interpreter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Total number of loop body executions allowed across the whole run,
    /// counting every pass of every `DO`, `LOOP ... TIMES` and `LOOP AT`.
    /// Exceeding it stops the run.
    pub max_iterations: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}
