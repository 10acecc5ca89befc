use crate::auth::TokenVerifier;
use crate::gateway::MovieGateway;
use crate::store::MovieStore;
use std::sync::Arc;

/// Shared dependencies handed to every request
#[derive(Clone)]
pub struct AppContext {
    pub gateway: MovieGateway,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppContext {
    pub fn new(store: Arc<dyn MovieStore>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            gateway: MovieGateway::new(store),
            verifier,
        }
    }
}
