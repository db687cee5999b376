// src/services/sales_service.rs

use std::collections::{HashMap, HashSet};

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{AppError, Resource},
    db::SalesRepository,
    models::{
        owner::Owner,
        sales::{
            CreateSalesPayload, DailySales, NEW_LINE_ID, Sales, SalesDetail, SalesUpdateResponse,
            UpdateSalesPayload,
        },
    },
    services::ownership::{ensure_owned, OwnershipGuard},
};

/// O que fazer com cada linha do payload de atualização.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Update,
    Insert,
    Delete,
    Skip,
}

impl LineAction {
    /// | id      | elect | persistida? | ação   |
    /// |---------|-------|-------------|--------|
    /// | ausente | *     | -           | Skip   |
    /// | ≠0      | true  | sim         | Update |
    /// | ≠0      | true  | não         | Skip   |
    /// | 0       | true  | -           | Insert |
    /// | *       | false | sim         | Delete |
    /// | *       | false | não         | Skip   |
    pub fn classify(line_id: Option<i64>, elect: bool, persisted: bool) -> Self {
        match (line_id, elect, persisted) {
            (None, _, _) => LineAction::Skip,
            (Some(_), false, true) => LineAction::Delete,
            (Some(_), false, false) => LineAction::Skip,
            (Some(NEW_LINE_ID), true, _) => LineAction::Insert,
            (Some(_), true, true) => LineAction::Update,
            (Some(_), true, false) => LineAction::Skip,
        }
    }
}

#[derive(Clone)]
pub struct SalesService {
    sales_repo: SalesRepository,
    guard: OwnershipGuard,
    pool: PgPool,
}

impl SalesService {
    pub fn new(sales_repo: SalesRepository, guard: OwnershipGuard, pool: PgPool) -> Self {
        Self { sales_repo, guard, pool }
    }

    // --- CREATE SALES ---
    // Tudo ou nada: uma linha inválida desfaz o agregado e as linhas anteriores.
    pub async fn create_sales(&self, owner: &Owner, payload: &CreateSalesPayload) -> Result<SalesDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Loja do dono
        let store = self.guard.store_owned_by(&mut *tx, owner, payload.store).await?;

        // 2. Agregado
        let sales_id = self
            .sales_repo
            .create(&mut *tx, owner.id, store.id, Uuid::new_v4(), payload.total_discounted)
            .await?;

        // 3. Linhas
        for line in payload.sales_object.iter().flatten() {
            self.guard.product_owned_by(&mut *tx, owner, line.product).await?;
            self.guard
                .product_in_store(&mut *tx, owner, store.id, line.product)
                .await?;

            self.sales_repo
                .insert_line(&mut *tx, sales_id, line.product, line.discounted_or_zero())
                .await?;
        }

        let detail = self.load_detail(&mut *tx, sales_id, owner).await?;

        tx.commit().await?;
        tracing::info!(
            "🧾 Venda {} ({}) criada na loja {} com {} linha(s)",
            detail.sales.id,
            detail.sales.sale_id,
            store.id,
            detail.sales_object.len()
        );
        Ok(detail)
    }

    // --- UPDATE SALES ---
    pub async fn update_sales(
        &self,
        owner: &Owner,
        sales_id: i64,
        payload: &UpdateSalesPayload,
    ) -> Result<SalesUpdateResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Trava o agregado: atualizações concorrentes da mesma venda esperam aqui.
        let sales = self.locked_sales_of(&mut *tx, owner, sales_id).await?;

        // 2. A loja do payload tem que ser a da venda, e do dono.
        let store = self.guard.store_owned_by(&mut *tx, owner, payload.store).await?;
        if store.id != sales.store {
            return Err(AppError::forbidden(
                Resource::Store,
                format!("venda {} pertence à loja {}, payload trouxe {}", sales.id, sales.store, store.id),
            ));
        }

        // 3. Campos do agregado
        if let Some(total) = payload.total_discounted {
            self.sales_repo
                .update_total_discounted(&mut *tx, sales.id, total)
                .await?;
        }

        // 4. Reconciliação das linhas
        let mut persisted: HashSet<i64> = self
            .sales_repo
            .line_ids(&mut *tx, sales.id)
            .await?
            .into_iter()
            .collect();
        let mut activated_line_ids = Vec::new();

        for line in &payload.sales_object {
            self.guard.product_owned_by(&mut *tx, owner, line.product).await?;

            let is_persisted = line.id.is_some_and(|id| persisted.contains(&id));
            let line_id = line.id.unwrap_or(NEW_LINE_ID);
            match LineAction::classify(line.id, line.elect, is_persisted) {
                LineAction::Update => {
                    self.guard
                        .product_in_store(&mut *tx, owner, store.id, line.product)
                        .await?;
                    self.sales_repo
                        .update_line(&mut *tx, sales.id, line_id, line.product, line.discounted)
                        .await?;
                    activated_line_ids.push(line_id);
                }
                LineAction::Insert => {
                    self.guard
                        .product_in_store(&mut *tx, owner, store.id, line.product)
                        .await?;
                    let new_id = self
                        .sales_repo
                        .insert_line(&mut *tx, sales.id, line.product, line.discounted_or_zero())
                        .await?;
                    activated_line_ids.push(new_id);
                }
                LineAction::Delete => {
                    self.sales_repo.delete_line(&mut *tx, sales.id, line_id).await?;
                    persisted.remove(&line_id);
                }
                LineAction::Skip => {
                    tracing::debug!("Linha {:?} da venda {} ignorada (elect={})", line.id, sales.id, line.elect);
                }
            }
        }

        let detail = self.load_detail(&mut *tx, sales.id, owner).await?;

        tx.commit().await?;
        Ok(SalesUpdateResponse { detail, activated_line_ids })
    }

    pub async fn get_sales(&self, owner: &Owner, sales_id: i64) -> Result<SalesDetail, AppError> {
        let mut conn = self.pool.acquire().await?;

        let sales = self
            .sales_repo
            .find_by_id(&mut *conn, sales_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Sales))?;
        ensure_owned(Resource::Sales, owner.id, sales.object_owner)?;

        let lines = self.sales_repo.list_lines(&mut *conn, sales.id).await?;
        Ok(SalesDetail::new(sales, lines, &owner.owner_name))
    }

    pub async fn list_sales(&self, owner: &Owner, store_id: Option<i64>) -> Result<Vec<SalesDetail>, AppError> {
        if let Some(store_id) = store_id {
            self.guard.store_owned_by(&self.pool, owner, store_id).await?;
        }

        let all_sales = self.sales_repo.list_by_owner(owner.id, store_id).await?;
        let ids: Vec<i64> = all_sales.iter().map(|sales| sales.id).collect();

        let mut lines_by_sales: HashMap<i64, Vec<DailySales>> = HashMap::new();
        for line in self.sales_repo.list_lines_of_many(&ids).await? {
            lines_by_sales.entry(line.sales).or_default().push(line);
        }

        let details = all_sales
            .into_iter()
            .map(|sales| {
                let lines = lines_by_sales.remove(&sales.id).unwrap_or_default();
                SalesDetail::new(sales, lines, &owner.owner_name)
            })
            .collect();
        Ok(details)
    }

    pub async fn delete_sales(&self, owner: &Owner, sales_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let sales = self.locked_sales_of(&mut *tx, owner, sales_id).await?;
        self.sales_repo.delete(&mut *tx, sales.id).await?;

        tx.commit().await?;
        tracing::info!("🗑️ Venda {} removida pelo dono {}", sales.id, owner.id);
        Ok(())
    }

    async fn locked_sales_of<'e, E>(&self, executor: E, owner: &Owner, sales_id: i64) -> Result<Sales, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = self
            .sales_repo
            .find_by_id_for_update(executor, sales_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Sales))?;

        ensure_owned(Resource::Sales, owner.id, sales.object_owner)?;
        Ok(sales)
    }

    async fn load_detail(
        &self,
        conn: &mut sqlx::PgConnection,
        sales_id: i64,
        owner: &Owner,
    ) -> Result<SalesDetail, AppError> {
        let sales = self
            .sales_repo
            .find_by_id(&mut *conn, sales_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Sales))?;
        let lines = self.sales_repo.list_lines(&mut *conn, sales_id).await?;
        Ok(SalesDetail::new(sales, lines, &owner.owner_name))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_elected_line_is_updated() {
        assert_eq!(LineAction::classify(Some(7), true, true), LineAction::Update);
    }

    #[test]
    fn unknown_elected_line_is_skipped() {
        assert_eq!(LineAction::classify(Some(7), true, false), LineAction::Skip);
    }

    #[test]
    fn new_elected_line_is_inserted() {
        assert_eq!(LineAction::classify(Some(NEW_LINE_ID), true, false), LineAction::Insert);
        // "persistida?" não se aplica ao sentinela
        assert_eq!(LineAction::classify(Some(NEW_LINE_ID), true, true), LineAction::Insert);
    }

    #[test]
    fn line_without_id_is_skipped() {
        assert_eq!(LineAction::classify(None, true, false), LineAction::Skip);
        assert_eq!(LineAction::classify(None, false, false), LineAction::Skip);
    }

    #[test]
    fn unelected_persisted_line_is_deleted() {
        assert_eq!(LineAction::classify(Some(7), false, true), LineAction::Delete);
    }

    #[test]
    fn unelected_unknown_line_is_skipped() {
        assert_eq!(LineAction::classify(Some(7), false, false), LineAction::Skip);
        assert_eq!(LineAction::classify(Some(NEW_LINE_ID), false, false), LineAction::Skip);
    }

    #[test]
    fn resubmitting_persisted_lines_never_inserts() {
        // Mesmos ids, mesmos elect: só Update/Delete/Skip, nunca Insert.
        let persisted: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let resubmitted = [(Some(1), true), (Some(2), true), (Some(3), false), (Some(9), true), (None, true)];

        for (id, elect) in resubmitted {
            let is_persisted = id.is_some_and(|id| persisted.contains(&id));
            let action = LineAction::classify(id, elect, is_persisted);
            assert_ne!(action, LineAction::Insert, "linha {:?} gerou insert", id);
        }
    }

    // --- Contra o banco (sqlx::test cria um banco novo por teste) ---

    mod storage {
        use axum::http::StatusCode;
        use rust_decimal::Decimal;
        use serde_json::json;
        use sqlx::PgPool;

        use crate::{
            common::error::{AppError, Resource},
            config::{AppState, Config},
            db::UserRepository,
            models::{
                owner::Owner,
                product::{CreateProductPayload, Product},
                sales::{CreateSalesPayload, UpdateSalesPayload},
                store::{CreateStorePayload, Store, StoreType},
            },
        };

        fn state(pool: &PgPool) -> AppState {
            let config = Config {
                database_url: String::new(),
                jwt_secret: "segredo-de-teste".into(),
                server_addr: "127.0.0.1:0".into(),
                max_connections: 1,
                jwt_expiration_days: 7,
            };
            AppState::from_pool(pool.clone(), &config)
        }

        async fn owner(state: &AppState, username: &str) -> Owner {
            let user = UserRepository::new(state.db_pool.clone())
                .create_user(&state.db_pool, username, &format!("{username}@loja.com"), "hash")
                .await
                .unwrap();
            state.owner_service.on_user_created(&state.db_pool, user.id).await.unwrap();
            state.owner_service.get_by_user(user.id).await.unwrap()
        }

        async fn store(state: &AppState, owner: &Owner, name: &str) -> Store {
            let payload = CreateStorePayload {
                name: name.into(),
                license_type: None,
                address: "Rua das Flores, 10".into(),
                store_type: StoreType::General,
            };
            state.store_service.create_store(owner, &payload).await.unwrap()
        }

        async fn product(state: &AppState, owner: &Owner, store: &Store, sku: &str) -> Product {
            let payload = CreateProductPayload {
                name: format!("Produto {sku}"),
                product_id: sku.into(),
                price: Decimal::new(1000, 2),
                main_price: Decimal::new(1200, 2),
            };
            state.product_service.create_product(owner, store.id, &payload).await.unwrap()
        }

        async fn count(pool: &PgPool, table: &str) -> i64 {
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(pool)
                .await
                .unwrap()
        }

        fn create_payload(value: serde_json::Value) -> CreateSalesPayload {
            serde_json::from_value(value).unwrap()
        }

        fn update_payload(value: serde_json::Value) -> UpdateSalesPayload {
            serde_json::from_value(value).unwrap()
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn sales_in_foreign_store_persist_nothing(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let bruno = owner(&state, "bruno").await;
            let loja_do_bruno = store(&state, &bruno, "Loja do Bruno").await;

            let err = state
                .sales_service
                .create_sales(&ana, &create_payload(json!({ "store": loja_do_bruno.id })))
                .await
                .unwrap_err();

            assert_eq!(err.status(), StatusCode::NOT_FOUND);
            assert!(matches!(err, AppError::Forbidden { resource: Resource::Store, .. }));
            assert_eq!(count(&pool, "sales").await, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn line_with_foreign_product_is_not_found(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let bruno = owner(&state, "bruno").await;
            let loja_da_ana = store(&state, &ana, "Loja da Ana").await;
            let loja_do_bruno = store(&state, &bruno, "Loja do Bruno").await;
            let alheio = product(&state, &bruno, &loja_do_bruno, "sku-b").await;

            let payload = create_payload(json!({
                "store": loja_da_ana.id,
                "salesObject": [{ "product": alheio.id, "discounted": 1 }]
            }));
            let err = state.sales_service.create_sales(&ana, &payload).await.unwrap_err();

            assert_eq!(err.status(), StatusCode::NOT_FOUND);
            assert_eq!(count(&pool, "sales").await, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn failing_line_rolls_back_earlier_lines(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let bairro = store(&state, &ana, "Bairro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;
            let feijao_do_bairro = product(&state, &ana, &bairro, "feijao").await;

            let payload = create_payload(json!({
                "store": centro.id,
                "salesObject": [
                    { "product": arroz.id, "discounted": 2 },
                    { "product": feijao_do_bairro.id, "discounted": 1 }
                ]
            }));
            let err = state.sales_service.create_sales(&ana, &payload).await.unwrap_err();

            assert_eq!(err.to_string(), "Store and product not found");
            assert_eq!(count(&pool, "sales").await, 0);
            assert_eq!(count(&pool, "daily_sales").await, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn unelected_line_is_deleted(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;

            let created = state
                .sales_service
                .create_sales(&ana, &create_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "product": arroz.id, "discounted": 5 }]
                })))
                .await
                .unwrap();
            let line_id = created.sales_object[0].id;

            let updated = state
                .sales_service
                .update_sales(&ana, created.sales.id, &update_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "id": line_id, "product": arroz.id, "elect": false }]
                })))
                .await
                .unwrap();

            assert!(updated.detail.sales_object.is_empty());
            assert!(updated.activated_line_ids.is_empty());
            assert_eq!(count(&pool, "daily_sales").await, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn resubmitted_update_adds_no_rows(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;

            let created = state
                .sales_service
                .create_sales(&ana, &create_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "product": arroz.id, "discounted": 5 }]
                })))
                .await
                .unwrap();
            let line_id = created.sales_object[0].id;

            let payload = update_payload(json!({
                "store": centro.id,
                "salesObject": [
                    { "id": line_id, "product": arroz.id, "discounted": 3 },
                    { "product": arroz.id, "discounted": 1 },
                    { "id": line_id + 1000, "product": arroz.id }
                ]
            }));
            for _ in 0..2 {
                let updated = state
                    .sales_service
                    .update_sales(&ana, created.sales.id, &payload)
                    .await
                    .unwrap();
                assert_eq!(updated.activated_line_ids, vec![line_id]);
            }

            assert_eq!(count(&pool, "daily_sales").await, 1);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn zero_id_inserts_exactly_one_line(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;

            let created = state
                .sales_service
                .create_sales(&ana, &create_payload(json!({ "store": centro.id })))
                .await
                .unwrap();

            let updated = state
                .sales_service
                .update_sales(&ana, created.sales.id, &update_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "id": 0, "product": arroz.id, "discounted": 4 }]
                })))
                .await
                .unwrap();

            assert_eq!(updated.detail.sales_object.len(), 1);
            assert_eq!(updated.activated_line_ids, vec![updated.detail.sales_object[0].id]);
            assert_eq!(updated.detail.sales_object[0].discounted, Decimal::new(4, 0));
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn changing_only_the_product_keeps_the_discount(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;
            let feijao = product(&state, &ana, &centro, "feijao").await;

            let created = state
                .sales_service
                .create_sales(&ana, &create_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "product": arroz.id, "discounted": 7.5 }]
                })))
                .await
                .unwrap();
            let line_id = created.sales_object[0].id;

            let updated = state
                .sales_service
                .update_sales(&ana, created.sales.id, &update_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "id": line_id, "product": feijao.id }]
                })))
                .await
                .unwrap();

            let line = &updated.detail.sales_object[0];
            assert_eq!(line.product, feijao.id);
            assert_eq!(line.discounted, Decimal::new(75, 1));
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn sold_product_cannot_be_deleted_but_its_store_can(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;

            state
                .sales_service
                .create_sales(&ana, &create_payload(json!({
                    "store": centro.id,
                    "salesObject": [{ "product": arroz.id, "discounted": 2 }]
                })))
                .await
                .unwrap();

            let err = state.product_service.delete_product(&ana, arroz.id).await.unwrap_err();
            assert!(matches!(err, AppError::ProductInUse));
            assert_eq!(err.status(), StatusCode::CONFLICT);
            assert_eq!(count(&pool, "daily_sales").await, 1);

            state.store_service.delete_store(&ana, centro.id).await.unwrap();
            assert_eq!(count(&pool, "products").await, 0);
            assert_eq!(count(&pool, "sales").await, 0);
            assert_eq!(count(&pool, "daily_sales").await, 0);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn listing_groups_lines_by_sale(pool: PgPool) {
            let state = state(&pool);
            let ana = owner(&state, "ana").await;
            let centro = store(&state, &ana, "Centro").await;
            let arroz = product(&state, &ana, &centro, "arroz").await;

            let one_line = create_payload(json!({
                "store": centro.id,
                "salesObject": [{ "product": arroz.id }]
            }));
            let two_lines = create_payload(json!({
                "store": centro.id,
                "salesObject": [{ "product": arroz.id }, { "product": arroz.id }]
            }));
            let first = state.sales_service.create_sales(&ana, &one_line).await.unwrap();
            let second = state.sales_service.create_sales(&ana, &two_lines).await.unwrap();

            let listed = state.sales_service.list_sales(&ana, Some(centro.id)).await.unwrap();
            assert_eq!(listed.len(), 2);
            for detail in &listed {
                let expected = if detail.sales.id == first.sales.id { 1 } else { 2 };
                assert_eq!(detail.sales_object.len(), expected);
                assert!(detail.sales_object.iter().all(|line| line.sales == detail.sales.id));
            }
            assert!(listed.iter().any(|detail| detail.sales.id == second.sales.id));
        }
    }
}
