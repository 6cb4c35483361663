// src/services/order_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::order::{NewOrder, Order},
    services::client_service::ClientService,
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    client_service: ClientService,
}

impl OrderService {
    pub fn new(repo: OrderRepository, client_service: ClientService) -> Self {
        Self { repo, client_service }
    }

    /// Grava o pedido ligando-o a um cliente da loja:
    /// - `clientId` informado precisa ser da loja;
    /// - sem `clientId`, tenta achar o cliente pelo telefone.
    pub async fn create_order(
        &self,
        store_id: i64,
        mut order: NewOrder,
        now: DateTime<Utc>,
    ) -> Result<Order, AppError> {
        order.client_id = match order.client_id {
            Some(client_id) => {
                let client = self
                    .client_service
                    .find_in_store(client_id, store_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::BadRequest(format!("Client {} does not belong to this store", client_id))
                    })?;
                Some(client.id)
            }
            None => self
                .client_service
                .find_by_phone(store_id, &order.phone_number)
                .await?
                .map(|client| client.id),
        };

        let created = self.repo.create_order(store_id, &order, now).await?;

        tracing::info!(
            "🧾 Pedido {} criado na loja {} (total {:.2}, {} item(ns))",
            created.id,
            store_id,
            created.total,
            order.products.len()
        );

        Ok(created)
    }

    pub async fn list_orders(&self, store_id: i64) -> Result<Vec<Order>, AppError> {
        self.repo.list_orders(store_id).await
    }

    pub async fn confirm_delivery(&self, id: i64) -> Result<Order, AppError> {
        if !self.repo.confirm_delivery(id).await? {
            tracing::warn!("Pedido {} não encontrado para confirmar entrega", id);
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        tracing::info!("✅ Entrega do pedido {} confirmada", id);
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }
}
