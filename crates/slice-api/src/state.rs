//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the shop (catalog, shared stock, payment channels), the open
//! order sessions, and configuration.

use slice_core::{load_catalog, OrderError, OrderResult, OrderSession, Shop};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog file, if any
    pub catalog_path: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            catalog_path: None,
        }
    }
}

/// A session shared between requests; each one is locked on its own
pub type SharedSession = Arc<Mutex<OrderSession>>;

/// Open order sessions by id.
///
/// The map lock is only held to look up or insert, never while a session
/// step runs.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a session and return its shared handle
    pub async fn insert(&self, session: OrderSession) -> SharedSession {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    /// Look up a session by id
    pub async fn get(&self, id: Uuid) -> OrderResult<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| OrderError::SessionNotFound {
                session_id: id.to_string(),
            })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog, stock and payment channels
    pub shop: Shop,
    /// Open sessions
    pub sessions: SessionRegistry,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from environment configuration
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_catalog(config.catalog_path.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load catalog: {}", e))?;

        let shop = Shop::new(catalog).map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))?;

        Ok(Self::with_shop(shop, config))
    }

    /// Create state around an existing shop
    pub fn with_shop(shop: Shop, config: AppConfig) -> Self {
        Self {
            shop,
            sessions: SessionRegistry::new(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_core::BaseKind;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..AppConfig::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };

        assert!(config.socket_addr().is_err());
        assert!(!config.is_production());
    }

    #[tokio::test]
    async fn test_session_registry() {
        let shop = Shop::default();
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);

        let session = shop.new_session();
        let id = session.id();
        registry.insert(session).await;

        let shared = registry.get(id).await.unwrap();
        shared.lock().await.select_base(BaseKind::Margherita).unwrap();
        assert_eq!(registry.len().await, 1);
        assert_eq!(shop.inventory().remaining("Margherita"), 9);

        let missing = registry.get(Uuid::new_v4()).await;
        assert!(matches!(missing, Err(OrderError::SessionNotFound { .. })));
    }
}
