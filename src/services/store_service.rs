// src/services/store_service.rs

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StoreRepository,
    models::store::{Plan, Store},
};

const STORE_CODE_LEN: usize = 8;
const MAX_CODE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct StoreService {
    repo: StoreRepository,
    pool: SqlitePool,
    plan_duration: Duration,
}

impl StoreService {
    pub fn new(repo: StoreRepository, pool: SqlitePool, plan_duration: Duration) -> Self {
        Self { repo, pool, plan_duration }
    }

    /// Cria a loja com um código curto único, gerando outro se houver colisão.
    pub async fn create_store(
        &self,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
        activity: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Store, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_store_code();

            let created = self
                .repo
                .try_create_store(&self.pool, name, address, phone, activity, &code, now)
                .await?;

            match created {
                Some(store) => {
                    tracing::info!("🏪 Loja '{}' criada com o código {}", store.name, store.code);
                    return Ok(store);
                }
                None => tracing::warn!("Código {} já existe (tentativa {})", code, attempt),
            }
        }

        Err(AppError::InternalServerError(anyhow!(
            "could not generate a unique store code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }

    /// Busca pelo código aplicando a expiração do plano `pro`.
    /// O rebaixamento é gravado, então a próxima leitura já vem como `free`.
    pub async fn get_by_code(&self, code: &str, now: DateTime<Utc>) -> Result<Store, AppError> {
        let store = self
            .repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

        let effective = store.plan.effective(store.plan_updated_at, now, self.plan_duration);
        if effective == store.plan {
            return Ok(store);
        }

        tracing::info!("⏳ Plano pro da loja {} expirou, voltando para free", store.code);
        self.repo
            .update_plan(&self.pool, code, effective, now)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
    }

    pub async fn update_plan(&self, code: &str, plan: Plan, now: DateTime<Utc>) -> Result<Store, AppError> {
        self.repo
            .update_plan(&self.pool, code, plan, now)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))
    }

    /// Lista as lojas com o plano efetivo em `now` (só leitura, nada é gravado).
    pub async fn list_stores(&self, now: DateTime<Utc>) -> Result<Vec<Store>, AppError> {
        let stores = self.repo.list_stores().await?;

        Ok(stores
            .into_iter()
            .map(|mut store| {
                store.plan = store.plan.effective(store.plan_updated_at, now, self.plan_duration);
                store
            })
            .collect())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        self.repo.exists(id).await
    }

    pub async fn delete_store(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_store(id).await? {
            return Err(AppError::NotFound("Store not found".to_string()));
        }
        tracing::info!("🗑️ Loja {} removida (com clientes, produtos e pedidos)", id);
        Ok(())
    }
}

// 8 caracteres maiúsculos tirados de um UUID v4
fn generate_store_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(STORE_CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}
