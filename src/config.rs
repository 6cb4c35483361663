// src/config.rs

use std::{env, fmt::Display, str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    common::db_utils::create_pool,
    db::{ClientRepository, OrderRepository, ProductRepository, StatsRepository, StoreRepository},
    services::{
        client_service::ClientService, image_service::ImageService, order_service::OrderService,
        product_service::ProductService, stats_service::StatsService, store_service::StoreService,
    },
};

// ---
// Configuração lida do ambiente (.env opcional)
// ---
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub max_upload_bytes: usize,
    pub image_max_dimension: u32,
    pub jpeg_quality: u8,
    pub plan_duration_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://orders.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5050,
            db_max_connections: 5,
            max_upload_bytes: 10 * 1024 * 1024,
            image_max_dimension: 800,
            jpeg_quality: 85,
            plan_duration_days: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port)?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            image_max_dimension: env_or("IMAGE_MAX_DIMENSION", defaults.image_max_dimension)?,
            jpeg_quality: env_or("JPEG_QUALITY", defaults.jpeg_quality)?,
            plan_duration_days: env_or("PLAN_DURATION_DAYS", defaults.plan_duration_days)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn plan_duration(&self) -> chrono::Duration {
        chrono::Duration::days(self.plan_duration_days)
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("variável {} inválida: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub store_service: StoreService,
    pub client_service: ClientService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub stats_service: StatsService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = create_pool(&config.database_url, config.db_max_connections)
            .await
            .with_context(|| format!("falha ao abrir o banco {}", config.database_url))?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre uma pool já aberta.
    pub fn with_pool(db_pool: SqlitePool, config: AppConfig) -> Self {
        let plan_duration = config.plan_duration();

        let store_repo = StoreRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());

        let image_service = ImageService::new(config.image_max_dimension, config.jpeg_quality);
        let store_service = StoreService::new(store_repo.clone(), db_pool.clone(), plan_duration);
        let client_service = ClientService::new(client_repo, store_repo);
        let product_service = ProductService::new(product_repo, image_service, db_pool.clone());
        let order_service = OrderService::new(order_repo, client_service.clone());
        let stats_service = StatsService::new(StatsRepository::new(), db_pool.clone(), plan_duration);

        Self {
            db_pool,
            config: Arc::new(config),
            store_service,
            client_service,
            product_service,
            order_service,
            stats_service,
        }
    }
}
