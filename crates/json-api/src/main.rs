//! Merx JSON API Server

use std::process;

use jiff::SignedDuration;
use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use merx_app::{
    auth::{HmacAuthService, SigningKey},
    context::AppContext,
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod logging;
mod products;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Merx JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    if let Err(init_error) = logging::init_subscriber(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber installation failed, eprintln is all that is left"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    // The signing key is required configuration; an undersized key is a
    // startup failure, never a silent fallback.
    let signing_key = match SigningKey::new(config.auth.signing_key.as_bytes()) {
        Ok(key) => key,
        Err(key_error) => {
            error!("invalid access token signing key: {key_error}");

            process::exit(1);
        }
    };

    let auth = HmacAuthService::new(
        signing_key,
        SignedDuration::from_secs(config.auth.token_ttl_seconds),
    );

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(&config.database.database_url, auth).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    if config.server.seed_products {
        if let Err(seed_error) = app.products.seed_initial_products().await {
            error!("failed to seed product catalogue: {seed_error}");

            process::exit(1);
        }
    }

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("users")
                .push(Router::with_path("register").post(users::handlers::register::handler))
                .push(Router::with_path("login").post(users::handlers::login::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .push(Router::with_path("{product}").get(products::handlers::get::handler)),
        )
        .push(
            Router::new().hoop(auth::middleware::handler).push(
                Router::with_path("cart")
                    .get(carts::handlers::get::handler)
                    .push(
                        Router::with_path("items")
                            .post(carts::items::handlers::create::handler)
                            .put(carts::items::handlers::update::handler)
                            .push(
                                Router::with_path("{product_uuid}")
                                    .delete(carts::items::handlers::delete::handler),
                            ),
                    ),
            ),
        );

    let doc = OpenApi::new("Merx API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(signal_error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {signal_error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
