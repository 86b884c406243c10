//! OData V4 client for the on-premise product system.
//!
//! Talks to any service exposing a `Products` entity set with `ID`, `Name`
//! and `Description` properties, such as the public `OData.svc` sample.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::RemoteProduct;
use crate::domain::ports::ProductSource;

/// Envelope of an OData V4 collection response.
#[derive(Debug, Deserialize)]
struct ODataCollection<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ODataProduct {
    #[serde(rename = "ID")]
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<ODataProduct> for RemoteProduct {
    fn from(p: ODataProduct) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ODataProductSource {
    http: Client,
    base_url: String,
}

impl ODataProductSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::RemoteSource(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_products(&self, query: &[(&str, &str)]) -> DomainResult<Vec<RemoteProduct>> {
        let url = format!("{}/Products", self.base_url);
        debug!(%url, ?query, "requesting remote products");

        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::RemoteSource(format!("Products request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::RemoteSource(format!("Products returned {status}: {body}")));
        }

        let collection = resp
            .json::<ODataCollection<ODataProduct>>()
            .await
            .map_err(|e| DomainError::RemoteSource(format!("Products parse failed: {e}")))?;

        Ok(collection.value.into_iter().map(RemoteProduct::from).collect())
    }
}

#[async_trait]
impl ProductSource for ODataProductSource {
    async fn fetch_product(&self) -> DomainResult<RemoteProduct> {
        self.get_products(&[("$select", "ID,Name,Description"), ("$orderby", "ID"), ("$top", "1")])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Products", "$top=1"))
    }

    async fn fetch_products(&self) -> DomainResult<Vec<RemoteProduct>> {
        self.get_products(&[("$select", "ID,Name"), ("$orderby", "ID")]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn source(url: &str) -> ODataProductSource {
        ODataProductSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_product_reads_first_entry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/Products")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("$select".into(), "ID,Name,Description".into()),
                Matcher::UrlEncoded("$top".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"@odata.context":"$metadata#Products","value":[{"ID":0,"Name":"Bread","Description":"Whole grain bread"}]}"#)
            .create_async()
            .await;

        let product = source(&server.url()).fetch_product().await.unwrap();

        assert_eq!(product, RemoteProduct::new(0, "Bread").with_description("Whole grain bread"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_products_without_descriptions() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/Products")
            .match_query(Matcher::UrlEncoded("$select".into(), "ID,Name".into()))
            .with_status(200)
            .with_body(r#"{"value":[{"ID":1,"Name":"Milk"},{"ID":2,"Name":"Vint soda"}]}"#)
            .create_async()
            .await;

        let products = source(&format!("{}/", server.url())).fetch_products().await.unwrap();

        assert_eq!(products, vec![RemoteProduct::new(1, "Milk"), RemoteProduct::new(2, "Vint soda")]);
    }

    #[tokio::test]
    async fn test_empty_collection_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/Products")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"value":[]}"#)
            .create_async()
            .await;

        let err = source(&server.url()).fetch_product().await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_remote_source() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/Products")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("down for maintenance")
            .create_async()
            .await;

        let err = source(&server.url()).fetch_products().await.unwrap_err();
        match err {
            DomainError::RemoteSource(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
