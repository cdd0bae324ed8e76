//! Training configuration.

use abpe_core::{Result, TokenizerError};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Maximum number of merges to learn
    pub num_merges: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
    /// Whether to count pairs with rayon
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_merges: 0,
            min_frequency: 1,
            parallel: true,
        }
    }
}

impl TrainingConfig {
    /// Create a training config builder.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    /// Config with the given merge budget and defaults elsewhere.
    pub fn with_num_merges(num_merges: usize) -> Self {
        Self {
            num_merges,
            ..Default::default()
        }
    }

    /// Check that the config can be honoured.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merge budget.
    pub fn num_merges(mut self, num_merges: usize) -> Self {
        self.config.num_merges = num_merges;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Enable or disable parallel pair counting.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the config.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
