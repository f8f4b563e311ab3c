use async_trait::async_trait;
use std::sync::Arc;

use super::ensure_authorized;
use gatekeep_domain::authorization::AuthorizationManager;
use gatekeep_domain::messages::{Query, QueryHandler};
use gatekeep_domain::shared::DomainError;

/// Authorizes a query, then returns the decorated handler's result untouched.
///
/// Nothing is cached: every read runs the authorization check again.
pub struct AuthorizationQueryDecorator<Q: Query> {
    decorated: Arc<dyn QueryHandler<Q>>,
    authorization_manager: Arc<dyn AuthorizationManager>,
}

impl<Q: Query> AuthorizationQueryDecorator<Q> {
    pub fn new(
        decorated: Arc<dyn QueryHandler<Q>>,
        authorization_manager: Arc<dyn AuthorizationManager>,
    ) -> Self {
        Self {
            decorated,
            authorization_manager,
        }
    }
}

#[async_trait]
impl<Q: Query> QueryHandler<Q> for AuthorizationQueryDecorator<Q> {
    async fn read(&self, query: Q) -> Result<Q::Result, DomainError> {
        ensure_authorized(self.authorization_manager.as_ref(), &query).await?;
        self.decorated.read(query).await
    }
}
