//! Application context - dependency injection container

use std::sync::Arc;

use eshop_common::{FileStore, KeyValueStore, KeychainStore, MemoryStore, TokenStore};
use eshop_core::{
    AuthGateway, AuthSession, CartStore, Navigator, OrderTracker, ProductCatalog, ProductGateway,
    RouteGuard, SearchHistory, TrackingGateway,
};
use eshop_domain::constants::KEYCHAIN_SERVICE;
use eshop_domain::{Config, EshopError, Result, StorageConfig};
use eshop_infra::api::ApiClientConfig;
use eshop_infra::{
    init_tracing, ApiClient, ApiError, AuthApi, DealersApi, InfraError, OrdersApi, ProductsApi,
    PublicApi,
};
use tracing::{debug, info, warn};

use crate::adapters::AppNavigator;
use crate::utils::health::{Component, ComponentHealth, HealthReport};

/// Application context - holds all services and stores
pub struct AppContext {
    pub config: Config,
    pub tokens: TokenStore,
    pub navigator: Arc<AppNavigator>,

    // API modules
    pub client: Arc<ApiClient>,
    pub auth_api: AuthApi,
    pub products_api: Arc<ProductsApi>,
    pub orders_api: OrdersApi,
    pub dealers_api: DealersApi,
    pub public_api: Arc<PublicApi>,

    // State stores
    pub session: Arc<AuthSession>,
    pub cart: CartStore,
    pub catalog: ProductCatalog,
    pub tracker: OrderTracker,
    pub guard: RouteGuard,
}

impl AppContext {
    /// Build the context from `.env`, the environment and config files, and
    /// install the tracing subscriber.
    ///
    /// # Errors
    /// Configuration or storage failures.
    pub fn from_env() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            debug!(error = %err, "No .env file loaded");
        }

        let config = eshop_infra::config::load()?;
        init_tracing(&config.logging);
        Self::new_with_config(config)
    }

    /// Create a new application context with custom configuration
    ///
    /// State lives in the configured JSON file, or in memory when no path is
    /// set. Tokens go to the OS keychain when enabled.
    ///
    /// # Errors
    /// The state file cannot be opened or the API client cannot be built.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let state = open_state_store(&config.storage)?;
        let token_backend: Arc<dyn KeyValueStore> = if config.storage.use_keychain {
            Arc::new(KeychainStore::new(KEYCHAIN_SERVICE))
        } else {
            Arc::clone(&state)
        };

        Self::new_with_storage(config, state, token_backend)
    }

    /// Create a context over explicit storage backends.
    ///
    /// `state` holds the cart and search history, `token_backend` the token
    /// pair; they may be the same store.
    ///
    /// # Errors
    /// The API client cannot be built (invalid base URLs).
    pub fn new_with_storage(
        config: Config,
        state: Arc<dyn KeyValueStore>,
        token_backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let tokens = TokenStore::new(token_backend);
        let navigator = Arc::new(AppNavigator::new());

        let client = Arc::new(ApiClient::new(
            ApiClientConfig::from(&config.api),
            tokens.clone(),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        )?);

        let auth_api = AuthApi::new(Arc::clone(&client));
        let products_api = Arc::new(ProductsApi::new(Arc::clone(&client)));
        let orders_api = OrdersApi::new(Arc::clone(&client));
        let dealers_api = DealersApi::new(Arc::clone(&client));
        let public_api = Arc::new(PublicApi::from_client(&client));

        let session = Arc::new(AuthSession::new(
            Arc::new(auth_api.clone()) as Arc<dyn AuthGateway>,
            tokens.clone(),
        ));
        navigator.attach_session(&session);

        let cart = CartStore::new(Arc::clone(&state));
        let catalog = ProductCatalog::with_page_size(
            Arc::clone(&products_api) as Arc<dyn ProductGateway>,
            config.catalog.page_size,
        );
        let history = Arc::new(SearchHistory::new(state, config.storage.search_history_key()));
        let tracker =
            OrderTracker::new(Arc::clone(&public_api) as Arc<dyn TrackingGateway>, history);
        let guard = RouteGuard::new(Arc::clone(&session));

        info!(
            api = %config.api.base_url,
            public = %config.api.public_base_url,
            persistent = config.storage.path.is_some(),
            keychain = config.storage.use_keychain,
            "Application context ready"
        );

        Ok(Self {
            config,
            tokens,
            navigator,
            client,
            auth_api,
            products_api,
            orders_api,
            dealers_api,
            public_api,
            session,
            cart,
            catalog,
            tracker,
            guard,
        })
    }

    /// Probe the token store, the saved cart, the search history and the
    /// public site.
    pub async fn health_check(&self) -> HealthReport {
        let public_site = self.public_api.health_check().await.and_then(|up| {
            if up {
                Ok(())
            } else {
                Err(ApiError::Network("public site answered with an error status".into()))
            }
        });

        let report = HealthReport::from_components(vec![
            ComponentHealth::probe(Component::TokenStore, self.tokens.has_access_token()),
            ComponentHealth::probe(Component::Cart, self.cart.saved_lines()),
            ComponentHealth::probe(Component::SearchHistory, self.tracker.history().entries()),
            ComponentHealth::probe(Component::PublicSite, public_site),
        ]);

        for failed in report.failing() {
            warn!(component = ?failed.component, error = ?failed.error, "Health probe failed");
        }
        report
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("client", &self.client)
            .field("route", &self.navigator.current())
            .finish_non_exhaustive()
    }
}

fn open_state_store(storage: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match &storage.path {
        Some(path) => {
            let store = FileStore::open(path.clone())
                .map_err(|err| EshopError::from(InfraError::from(err)))?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}
