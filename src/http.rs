//! HTTP-backed repository for JSON REST resources.
//!
//! Requires the `http` feature. Follows JSON-placeholder conventions:
//!
//! - `GET    {base}/{collection}`       list
//! - `GET    {base}/{collection}/{id}`  get
//! - `POST   {base}/{collection}`       create, the server assigns the id
//! - `PUT    {base}/{collection}/{id}`  update
//! - `DELETE {base}/{collection}/{id}`  delete
//!
//! A 404 is "not found" (`None`/`false`), never an error.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::RepositoryError;
use crate::record::{sort_natural, Record, RecordId};
use crate::repository::{Filter, Repository};

/// Drop-in substitute for [`InMemoryRepository`](crate::InMemoryRepository)
/// that talks to a remote server.
pub struct HttpRepository<T> {
    client: Client,
    base_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> HttpRepository<T> {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Share one connection pool across several repositories.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::COLLECTION)
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}/{}", self.base_url, T::COLLECTION, id)
    }
}

/// `None` for a 404, the response for any success status, an error otherwise.
fn found(response: Response) -> Result<Option<Response>, RepositoryError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(response.error_for_status()?))
}

#[async_trait]
impl<T: Record> Repository<T> for HttpRepository<T> {
    async fn list(&self, filter: Option<&Filter<'_, T>>) -> Result<Vec<T>, RepositoryError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let mut records: Vec<T> = response.error_for_status()?.json().await?;
        if let Some(accept) = filter {
            records.retain(|record| accept(record));
        }
        sort_natural(&mut records);
        debug!(
            collection = T::COLLECTION,
            count = records.len(),
            "listed remote records"
        );
        Ok(records)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Option<T>, RepositoryError> {
        let response = self.client.get(self.record_url(id)).send().await?;
        match found(response)? {
            Some(response) => Ok(Some(response.json().await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: T) -> Result<T, RepositoryError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&record)
            .send()
            .await?;
        let created: T = response.error_for_status()?.json().await?;
        debug!(
            collection = T::COLLECTION,
            id = created.id(),
            "remote record created"
        );
        Ok(created)
    }

    async fn update(&self, record: T) -> Result<bool, RepositoryError> {
        let response = self
            .client
            .put(self.record_url(record.id()))
            .json(&record)
            .send()
            .await?;
        Ok(found(response)?.is_some())
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RepositoryError> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        Ok(found(response)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::Post;

    #[test]
    fn urls_follow_the_collection_name() {
        let posts: HttpRepository<Post> = HttpRepository::new("http://localhost:3000/");
        assert_eq!(posts.collection_url(), "http://localhost:3000/posts");
        assert_eq!(posts.record_url(7), "http://localhost:3000/posts/7");
    }
}
