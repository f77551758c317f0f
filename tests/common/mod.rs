#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use todo_api_rust::auth::TokenAuthority;
use todo_api_rust::config::SecurityConfig;
use todo_api_rust::database::{MemoryUserStore, UserRecord};
use todo_api_rust::server;
use todo_api_rust::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_EMAIL: &str = "test0@test.com";
pub const TEST_PASSWORD: &str = "test@123";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub security: SecurityConfig,
    pub users: MemoryUserStore,
}

impl TestServer {
    /// Start the app in-process on a free port, backed by a memory store holding one user.
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let security = SecurityConfig::new(TEST_SECRET);
        let tokens = TokenAuthority::new(&security);

        let users = MemoryUserStore::new();
        let digest = tokens.hasher().hash(TEST_PASSWORD)?;
        users.insert(UserRecord::new("test0", TEST_EMAIL, digest)).await;

        let state = AppState::new(tokens, Arc::new(users.clone()));
        let app = server::app(state, &security);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            security,
            users,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Token authority sharing the server's key material, for minting tokens directly.
    pub fn authority(&self) -> TokenAuthority {
        TokenAuthority::new(&self.security)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        let res = reqwest::Client::new()
            .post(format!("{}/auth/token", self.base_url))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        Ok(res)
    }

    /// Log in as the seeded user and return the access token.
    pub async fn token(&self) -> Result<String> {
        let res = self.login(TEST_EMAIL, TEST_PASSWORD).await?;
        let body = res.json::<serde_json::Value>().await?;
        body["data"]["access_token"]
            .as_str()
            .map(str::to_string)
            .with_context(|| format!("no access_token in {}", body))
    }
}
