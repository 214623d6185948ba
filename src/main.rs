use astra::Server;
use log::{error, info};
use price_estimator::config::AppConfig;
use price_estimator::db::{init_db, Database};
use price_estimator::inference::InferenceEngine;
use price_estimator::responses::html_error_response;
use price_estimator::router::{handle, AppState};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();

    let engine = match InferenceEngine::load(&config.model_path) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Cannot start without a model: {e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(&config.db_path);
    if let Err(e) = init_db(&db, &config.schema_path) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    let state = AppState {
        db,
        engine,
        chunk_size: config.chunk_size,
    };

    info!(
        "Starting server at http://{} with {} workers",
        config.bind, config.workers
    );

    let server = Server::bind(&config.bind).max_workers(config.workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
