//! Fetch trait for retrieving entities from their endpoints.

use async_trait::async_trait;

use crate::client::EdsmClient;
use crate::error::Result;

/// Fetch an entity from its EDSM endpoint.
///
/// Implement this trait for entity types that map to a single endpoint
/// taking a typed set of query parameters.
///
/// # Example
///
/// ```ignore
/// use edsm::{EdsmClient, Fetch, System, SystemQuery};
///
/// let client = EdsmClient::from_env()?;
/// let system = System::fetch(&client, &SystemQuery::named("Sol")).await?;
/// ```
#[async_trait]
pub trait Fetch: Sized {
    /// Query parameters for this entity's endpoint.
    type Query: Send + Sync;

    /// Fetch the entity.
    ///
    /// # Arguments
    ///
    /// * `client` - The EDSM API client
    /// * `query` - The endpoint's query parameters
    ///
    /// # Errors
    ///
    /// Returns [`EdsmError::NotFound`](crate::EdsmError::NotFound) when the
    /// upstream has no matching entity, or another error kind if the request
    /// fails.
    async fn fetch(client: &EdsmClient, query: &Self::Query) -> Result<Self>;
}
