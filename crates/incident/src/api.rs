use async_trait::async_trait;

use crate::{
    client::Client,
    error::Result,
    models::{Incident, IncidentFilter, IncidentPatch, NewIncident, RecordId},
};

/// Operations offered by the chamados backend.
///
/// [`Client`] is the HTTP implementation; callers that only need the operations
/// can hold a `dyn IncidentApi` and swap in another implementation.
#[async_trait]
pub trait IncidentApi: Send + Sync {
    /// List all incidents.
    async fn list(&self) -> Result<Vec<Incident>>;

    /// Fetch one incident by id.
    async fn get_by_id(&self, id: RecordId) -> Result<Incident>;

    /// Open a new incident.
    async fn create(&self, incident: &NewIncident) -> Result<Incident>;

    /// Apply a partial update to an incident.
    async fn update(&self, id: RecordId, patch: &IncidentPatch) -> Result<Incident>;

    /// Delete an incident.
    async fn delete(&self, id: RecordId) -> Result<bool>;

    /// Free-text search.
    async fn search(&self, query: &str) -> Result<Vec<Incident>>;

    /// Filter incidents by status, priority and department.
    async fn filter(&self, filter: &IncidentFilter) -> Result<Vec<Incident>>;
}

#[async_trait]
impl IncidentApi for Client {
    async fn list(&self) -> Result<Vec<Incident>> {
        Self::list(self).await
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Incident> {
        Self::get_by_id(self, id).await
    }

    async fn create(&self, incident: &NewIncident) -> Result<Incident> {
        Self::create(self, incident).await
    }

    async fn update(&self, id: RecordId, patch: &IncidentPatch) -> Result<Incident> {
        Self::update(self, id, patch).await
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        Self::delete(self, id).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Incident>> {
        Self::search(self, query).await
    }

    async fn filter(&self, filter: &IncidentFilter) -> Result<Vec<Incident>> {
        Self::filter(self, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Server;

    #[tokio::test]
    async fn client_is_usable_as_trait_object() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/chamados/abc")
            .with_status(200)
            .create_async()
            .await;

        let client = Client::new(server.url().parse().unwrap()).unwrap();
        let api: &dyn IncidentApi = &client;
        assert!(api.delete(RecordId::from("abc")).await.unwrap());
        mock.assert_async().await;
    }
}
