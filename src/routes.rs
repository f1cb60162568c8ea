// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, ai, auth, chat, swaps, users},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, users, swaps, chat, ai, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, config, AI client).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/session", get(auth::session))
        .merge(
            Router::new()
                .route("/logout", post(auth::logout))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/{id}", get(users::get_user))
        .merge(
            Router::new()
                .route("/me", put(users::update_me))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let swap_routes = Router::new()
        .route("/", get(swaps::list_swaps).post(swaps::propose_swap))
        .route("/{id}/respond", post(swaps::respond_swap))
        .route("/{id}/cancel", post(swaps::cancel_swap))
        .route("/{id}/complete", post(swaps::complete_swap))
        .route("/{id}/feedback", post(swaps::submit_feedback))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let chat_routes = Router::new()
        .route("/conversations", get(chat::list_conversations))
        .route("/swaps/{id}/conversation", post(chat::open_conversation))
        .route("/conversations/{id}/messages", post(chat::send_message))
        .route("/conversations/{id}/archive", post(chat::archive_conversation))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let ai_routes = Router::new()
        .route("/rank-swap", post(ai::rank_swap))
        .route("/summarize-swap", post(ai::summarize_swap))
        .route("/assistant", post(ai::assistant))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", put(admin::set_ban))
        .route("/stats", get(admin::stats))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .route("/api/skills", get(users::list_skill_catalog))
        .route("/api/availabilities", get(users::list_availabilities))
        .nest("/api/swaps", swap_routes)
        .nest("/api/chat", chat_routes)
        .nest("/api/ai", ai_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
