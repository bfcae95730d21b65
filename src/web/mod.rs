mod handlers;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

/// Serve the forecast API on localhost. Every request recomputes its forecast;
/// the server holds no state.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    tracing::info!(port, "starting capacity planner web server");
    println!("Starting Capacity Planner web server on http://localhost:{port}");

    HttpServer::new(|| {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .route("/api/scenario", web::get().to(handlers::default_scenario))
            .route("/api/forecast", web::post().to(handlers::forecast))
            .route("/api/forecast/export", web::post().to(handlers::export))
            .route("/api/dashboard.svg", web::post().to(handlers::dashboard_svg))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
