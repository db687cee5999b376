// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Daqui para baixo tudo passa pelo auth_guard
    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let owner_routes = Router::new().route(
        "/me",
        get(handlers::owners::get_my_profile).put(handlers::owners::update_my_profile),
    );

    let store_routes = Router::new()
        .route(
            "/",
            post(handlers::stores::create_store).get(handlers::stores::list_stores),
        )
        .route(
            "/{store_id}",
            get(handlers::stores::get_store)
                .put(handlers::stores::update_store)
                .delete(handlers::stores::delete_store),
        )
        .route(
            "/{store_id}/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        );

    let product_routes = Router::new()
        .route(
            "/{product_id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/{product_id}/status",
            get(handlers::products::get_product_status).put(handlers::products::update_product_status),
        );

    let sales_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sales).get(handlers::sales::list_sales),
        )
        .route(
            "/{sales_id}",
            get(handlers::sales::get_sales)
                .put(handlers::sales::update_sales)
                .delete(handlers::sales::delete_sales),
        );

    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/owners", owner_routes)
        .nest("/stores", store_routes)
        .nest("/products", product_routes)
        .nest("/sales", sales_routes)
        .route("/product-status", get(handlers::products::list_product_statuses))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
