//! Business logic services

pub mod aggregator;
pub mod claude;
pub mod context;
pub mod reconciliation;

use crate::{
    config::{LlmConfig, VenueConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub aggregator: aggregator::AggregatorService,
    pub reconciliation: reconciliation::ReconciliationService,
    pub context: context::ContextBuilder,
    pub claude: claude::ClaudeClient,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, venue_config: VenueConfig, llm_config: LlmConfig) -> Self {
        Self {
            aggregator: aggregator::AggregatorService::new(repository.clone()),
            reconciliation: reconciliation::ReconciliationService::new(repository),
            context: context::ContextBuilder::new(venue_config),
            claude: claude::ClaudeClient::new(llm_config),
        }
    }
}
