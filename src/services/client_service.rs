// src/services/client_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::{ClientRepository, StoreRepository},
    models::client::Client,
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    store_repo: StoreRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository, store_repo: StoreRepository) -> Self {
        Self { repo, store_repo }
    }

    /// Cadastra o cliente na loja. Se o telefone já existe na loja devolve o cadastro
    /// existente; o `bool` diz se o cliente foi criado agora.
    pub async fn register(
        &self,
        store_id: i64,
        name: &str,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<(Client, bool), AppError> {
        if !self.store_repo.exists(store_id).await? {
            return Err(AppError::NotFound("Store not found".to_string()));
        }

        if let Some(existing) = self.repo.find_by_phone(store_id, phone).await? {
            return Ok((existing, false));
        }

        match self.repo.create_client(store_id, name, phone, now).await? {
            Some(client) => {
                tracing::info!("👤 Cliente {} cadastrado na loja {}", client.id, store_id);
                Ok((client, true))
            }
            // Outro cadastro com o mesmo telefone entrou entre o SELECT e o INSERT
            None => {
                let existing = self
                    .repo
                    .find_by_phone(store_id, phone)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
                Ok((existing, false))
            }
        }
    }

    pub async fn list_clients(&self, store_id: i64) -> Result<Vec<Client>, AppError> {
        self.repo.list_clients(store_id).await
    }

    /// O cliente precisa existir e ser da loja do pedido.
    pub async fn find_in_store(&self, client_id: i64, store_id: i64) -> Result<Option<Client>, AppError> {
        let client = self.repo.find_by_id(client_id).await?;
        Ok(client.filter(|c| c.store_id == store_id))
    }

    pub async fn find_by_phone(&self, store_id: i64, phone: &str) -> Result<Option<Client>, AppError> {
        self.repo.find_by_phone(store_id, phone).await
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_client(id).await? {
            return Err(AppError::NotFound("Client not found".to_string()));
        }
        Ok(())
    }
}
