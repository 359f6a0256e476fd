use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use aluguei_backend::auth::middleware::JwtSecret;
use aluguei_backend::config::AppConfig;
use aluguei_backend::create_pool;
use aluguei_backend::handlers;
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let db = create_pool(&config).await.map_err(|e| {
        tracing::error!("Failed to connect to the database: {e}");
        std::io::Error::other(e)
    })?;
    tracing::info!("Connected to the database");

    if config.run_migrations {
        Migrator::up(&db, None).await.map_err(|e| {
            tracing::error!("Failed to run migrations: {e}");
            std::io::Error::other(e)
        })?;
        tracing::info!("Migrations applied");
    }

    let db_data = web::Data::new(db);
    let jwt_secret = web::Data::new(JwtSecret(config.jwt_secret.clone()));
    let bind_addr = config.bind_addr();
    let config_data = web::Data::new(config);

    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(db_data.clone())
            .app_data(jwt_secret.clone())
            .app_data(config_data.clone())
            .configure(handlers::init_health_routes)
            .service(web::scope("/api/v1").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
