// src/fetch/mod.rs

//! Page fetching abstraction and the reqwest-backed implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::engines::{EngineAdapter, PageRequest};
use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Transport collaborator consumed by the orchestrator.
///
/// No retry policy lives at the orchestration layer; an implementation that
/// wants retries applies them behind this interface.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page, returning its raw body.
    async fn fetch(&self, request: &PageRequest) -> Result<String>;
}

/// HTTP fetcher with one cookie-jar client per session-bound engine.
///
/// Engines that declare `needs_cookies` get their own client so session state
/// never leaks between backends; everything else shares a jar-less client.
pub struct HttpFetcher {
    default_client: reqwest::Client,
    session_clients: HashMap<String, reqwest::Client>,
}

impl HttpFetcher {
    /// Build clients for the given engine set.
    pub fn new(config: &ClientConfig, engines: &[Arc<dyn EngineAdapter>]) -> Result<Self> {
        let default_client = Self::build_client(config, false)?;

        let mut session_clients = HashMap::new();
        for engine in engines {
            if engine.needs_cookies() {
                session_clients.insert(engine.id().to_string(), Self::build_client(config, true)?);
            }
        }

        Ok(Self {
            default_client,
            session_clients,
        })
    }

    fn build_client(config: &ClientConfig, cookies: bool) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs));
        if cookies {
            builder = builder.cookie_store(true);
        }
        Ok(builder.build()?)
    }

    fn client_for(&self, engine: &str) -> &reqwest::Client {
        self.session_clients
            .get(engine)
            .unwrap_or(&self.default_client)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String> {
        let response = self
            .client_for(&request.engine)
            .get(&request.url)
            .send()
            .await
            .map_err(|e| AppError::fetch(&request.engine, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(
                &request.engine,
                format!("unexpected status {status} for {}", request.url),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::fetch(&request.engine, e))
    }
}
