// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users / Owners ---
        handlers::auth::get_me,
        handlers::owners::get_my_profile,
        handlers::owners::update_my_profile,

        // --- Stores ---
        handlers::stores::create_store,
        handlers::stores::list_stores,
        handlers::stores::get_store,
        handlers::stores::update_store,
        handlers::stores::delete_store,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::get_product_status,
        handlers::products::update_product_status,
        handlers::products::list_product_statuses,

        // --- Sales ---
        handlers::sales::create_sales,
        handlers::sales::list_sales,
        handlers::sales::get_sales,
        handlers::sales::update_sales,
        handlers::sales::delete_sales,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Owners / Stores ---
            models::owner::Owner,
            models::owner::UpdateOwnerProfilePayload,
            models::store::StoreType,
            models::store::Store,
            models::store::CreateStorePayload,
            models::store::UpdateStorePayload,

            // --- Products ---
            models::product::Product,
            models::product::ProductStatus,
            models::product::CreateProductPayload,
            models::product::UpdateProductPayload,
            models::product::UpdateProductStatusPayload,

            // --- Sales ---
            models::sales::Sales,
            models::sales::DailySales,
            models::sales::SalesDetail,
            models::sales::SalesUpdateResponse,
            models::sales::SalesLinePayload,
            models::sales::CreateSalesPayload,
            models::sales::UpdateSalesPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Owners", description = "Perfil do Dono"),
        (name = "Stores", description = "Lojas do Dono"),
        (name = "Products", description = "Produtos das Lojas"),
        (name = "Product Status", description = "Estoque e Disponibilidade"),
        (name = "Sales", description = "Vendas e Linhas de Venda")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
