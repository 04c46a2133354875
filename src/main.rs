use catequesis::catequesis_config::{CorsConfig, JwtConfig, ServerConfig};
use catequesis::logging::init_tracing;
use catequesis::metrics::{init_metrics, metrics_app};
use catequesis::router::init_router;
use catequesis::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let jwt_config = match JwtConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid token configuration");
            std::process::exit(1);
        }
    };
    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    let cors_config = CorsConfig::from_env();

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = server_config.metrics_bind_address();
            tokio::spawn(async move {
                match tokio::net::TcpListener::bind(&metrics_addr).await {
                    Ok(listener) => {
                        tracing::info!("📊 Metrics available at http://{}/metrics", metrics_addr);
                        if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                            tracing::error!(error = %e, "Metrics server stopped");
                        }
                    }
                    Err(e) => tracing::error!(error = %e, addr = %metrics_addr, "Failed to bind metrics listener"),
                }
            });
        }
        Ok(None) => tracing::info!("Observability disabled; metrics endpoint not started"),
        Err(e) => tracing::warn!(error = %e, "Failed to install metrics recorder"),
    }

    let state = match init_app_state(jwt_config, cors_config, &server_config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load user directory");
            std::process::exit(1);
        }
    };
    let app = init_router(state);

    let addr = server_config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!("🚀 Server running on http://{}", addr);
    tracing::info!("📚 Swagger UI available at http://{}/swagger-ui", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
