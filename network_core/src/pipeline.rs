//! End-to-end pipeline: build the matrix, then run the configured cleaning passes.

use roster::Roster;
use tracing::info;

use crate::config::NetworkConfig;
use crate::construction::MatrixConstructor;
use crate::error::NetworkResult;
use crate::matrix::EncounterMatrix;
use crate::report::TextLog;

/// The cleaned matrix and the combined log of every cleaning pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub matrix: EncounterMatrix,
    pub log: TextLog,
}

pub struct NetworkPipeline {
    config: NetworkConfig,
}

impl NetworkPipeline {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(NetworkConfig::default())
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Build a network from `text`, then clean it.
    ///
    /// Noise is always cleaned. Floaters and singletons follow if enabled.
    pub fn run(&self, roster: Roster, text: &str) -> NetworkResult<PipelineOutput> {
        self.config.validate()?;
        let cleaning = &self.config.cleaning;

        let mut matrix = MatrixConstructor::new(self.config.scan.clone()).construct(roster, text)?;
        let built = matrix.size();

        let mut log = matrix.clean_noise(cleaning.noise_threshold);
        if cleaning.clean_floaters && matrix.size() > 0 {
            log.append(matrix.clean_floaters_from(cleaning.entry_point)?);
        }
        if cleaning.clean_singletons {
            log.append(match cleaning.singleton_iterations {
                Some(iterations) => matrix.clean_singletons_bounded(iterations),
                None => matrix.clean_singletons(),
            });
        }

        info!(
            characters = built,
            remaining = matrix.size(),
            encounters = matrix.encounter_count(),
            "Network pipeline finished"
        );
        Ok(PipelineOutput { matrix, log })
    }
}
