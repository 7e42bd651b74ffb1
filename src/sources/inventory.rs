// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Internal inventory service discovery source

use crate::constants::INVENTORY_CLUSTERS_PATH;
use crate::error::{KubedexError, Result};
use crate::sources::DiscoverySource;
use crate::types::ClusterRecord;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Lists clusters known to the inventory service over HTTP
#[derive(Debug, Clone)]
pub struct InventorySource {
    client: reqwest::Client,
    address: Url,
}

/// The inventory answers either with a bare array or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryResponse {
    List(Vec<ClusterRecord>),
    Wrapped { clusters: Vec<ClusterRecord> },
}

impl InventorySource {
    pub fn new(address: Url) -> Self {
        Self::with_client(address, reqwest::Client::new())
    }

    pub fn with_client(address: Url, client: reqwest::Client) -> Self {
        Self { client, address }
    }

    fn clusters_url(&self) -> Result<Url> {
        let mut base = self.address.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(INVENTORY_CLUSTERS_PATH)
            .map_err(|e| KubedexError::InventoryError(format!("Invalid inventory URL: {}", e)))
    }
}

#[async_trait]
impl DiscoverySource for InventorySource {
    #[instrument(skip(self), fields(address = %self.address))]
    async fn list_clusters(&self) -> Result<Vec<ClusterRecord>> {
        let url = self.clusters_url()?;
        debug!("Requesting {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KubedexError::InventoryError(format!(
                "Inventory returned HTTP {}",
                status
            )));
        }

        let body = response.bytes().await?;
        parse_inventory(&body)
    }

    fn description(&self) -> String {
        format!("Inventory:{}", self.address)
    }
}

fn parse_inventory(body: &[u8]) -> Result<Vec<ClusterRecord>> {
    let response: InventoryResponse = serde_json::from_slice(body)
        .map_err(|e| KubedexError::InventoryError(format!("Unexpected response body: {}", e)))?;

    let clusters = match response {
        InventoryResponse::List(clusters) => clusters,
        InventoryResponse::Wrapped { clusters } => clusters,
    };

    Ok(clusters
        .into_iter()
        .filter(|c| !c.cluster_name.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the listener's base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr).parse().unwrap()
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_parse_bare_list() {
        let clusters = parse_inventory(
            br#"[
                {"clusterName":"a","credResolverId":"cred1","tags":{"env":"prod"}},
                {"clusterName":"b"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            clusters,
            vec![
                ClusterRecord::new("a").with_cred_resolver("cred1").with_tag("env", "prod"),
                ClusterRecord::new("b"),
            ]
        );
    }

    #[test]
    fn test_parse_wrapped_list_drops_unnamed_clusters() {
        let clusters =
            parse_inventory(br#"{"clusters":[{"clusterName":""},{"clusterName":"c"}]}"#).unwrap();

        assert_eq!(clusters, vec![ClusterRecord::new("c")]);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            parse_inventory(b"<html>"),
            Err(KubedexError::InventoryError(_))
        ));
    }

    #[test]
    fn test_clusters_url_keeps_base_path() {
        let source = InventorySource::new("http://inventory:8080/fox".parse().unwrap());
        assert_eq!(
            source.clusters_url().unwrap().as_str(),
            "http://inventory:8080/fox/api/v1/clusters"
        );

        let source = InventorySource::new("http://inventory:8080".parse().unwrap());
        assert_eq!(
            source.clusters_url().unwrap().as_str(),
            "http://inventory:8080/api/v1/clusters"
        );
    }

    #[tokio::test]
    async fn test_list_clusters_over_http() {
        let address = serve_once("200 OK", r#"[{"clusterName":"inv-1","tags":{"owner":"sre"}}]"#).await;
        let source = InventorySource::with_client(address, local_client());

        let clusters = source.list_clusters().await.unwrap();

        assert_eq!(clusters, vec![ClusterRecord::new("inv-1").with_tag("owner", "sre")]);
    }

    #[tokio::test]
    async fn test_http_error_status_fails() {
        let address = serve_once("503 Service Unavailable", "{}").await;
        let source = InventorySource::with_client(address, local_client());

        let result = source.list_clusters().await;

        assert!(matches!(result, Err(KubedexError::InventoryError(_))));
    }
}
