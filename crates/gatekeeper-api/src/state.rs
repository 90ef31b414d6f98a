//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use gatekeeper_auth::{
    AuthEngine, PasswordHasher, RevocationChannel, SessionManager, TokenCodec,
};
use gatekeeper_cache::provider::CacheManager;
use gatekeeper_core::config::AppConfig;
use gatekeeper_core::result::AppResult;
use gatekeeper_database::store::ClientStore;
use gatekeeper_service::{AdminClientService, ClientService};

use crate::cookie::SessionCookie;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session cookie builder
    pub cookie: Arc<SessionCookie>,

    // ── Collaborators ────────────────────────────────────────
    /// Credential store
    pub store: Arc<dyn ClientStore>,
    /// Cache and pub/sub manager
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token codec
    pub codec: Arc<TokenCodec>,
    /// Revocation entries and deletion broadcasts
    pub revocation: Arc<RevocationChannel>,
    /// Token → client → permission resolution
    pub engine: Arc<AuthEngine>,
    /// Login and refresh
    pub sessions: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, profile, self-delete
    pub clients: Arc<ClientService>,
    /// Suspension and admin bootstrap
    pub admin: Arc<AdminClientService>,
}

impl AppState {
    /// Wire every component from configuration and connected collaborators.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ClientStore>,
        cache: Arc<CacheManager>,
    ) -> AppResult<Self> {
        let auth = &config.auth;

        let hasher = Arc::new(PasswordHasher::new(auth)?);
        let codec = Arc::new(TokenCodec::new(auth));
        let revocation = Arc::new(RevocationChannel::new(
            Arc::clone(&cache),
            auth.session_ttl(),
        ));
        let engine = Arc::new(AuthEngine::new(
            Arc::clone(&codec),
            Arc::clone(&store),
            Arc::clone(&revocation),
        ));
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&store),
            Arc::clone(&codec),
            Arc::clone(&hasher),
            Arc::clone(&engine),
            auth,
        ));
        let clients = Arc::new(ClientService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&codec),
            Arc::clone(&revocation),
            auth.restricted_groups.clone(),
        ));
        let admin = Arc::new(AdminClientService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&revocation),
        ));
        let cookie = Arc::new(SessionCookie::from_config(auth));

        Ok(Self {
            config: Arc::new(config),
            cookie,
            store,
            cache,
            codec,
            revocation,
            engine,
            sessions,
            clients,
            admin,
        })
    }
}
