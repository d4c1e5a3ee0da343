use axum::middleware;
use database::db::{PoolSettings, create_connection};
use log::info;
use migration::{Migrator, MigratorTrait};
use server::{
    app, auth::identity_from_claims, config::Config, state::AppState,
    utils::shutdown::shutdown_signal,
};
use tower::ServiceBuilder;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::load().expect("Invalid configuration");

    let settings = PoolSettings {
        max_connections: config.database_max_connections,
        ..Default::default()
    };
    let db = create_connection(&config.database_url, &settings)
        .await
        .expect("Failed to connect to the database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        info!("Database migrations applied");
    }

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let port = config.port;
    let app = app(AppState::new(db, config), |routes| {
        routes.layer(
            ServiceBuilder::new()
                .layer(oauth2_resource_server.into_layer())
                .layer(middleware::from_fn(identity_from_claims)),
        )
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
