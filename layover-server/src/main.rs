use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use layover_server::config::AppConfig;
use layover_server::geocoding::{GeoNamesClient, Geocoder, StaticGeocoder};
use layover_server::logging;
use layover_server::planner::PlanningService;
use layover_server::recommend::{LlmClient, MockRecommender, Recommender};
use layover_server::sessions::MokaSessionStore;
use layover_server::validator::{JourneyValidator, LocationResolver};
use layover_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let geocoder: Arc<dyn Geocoder> = match config.geonames.clone().map(GeoNamesClient::new) {
        Some(Ok(client)) => {
            info!("Geocoding with GeoNames");
            Arc::new(client)
        }
        Some(Err(e)) => {
            warn!("GeoNames client unavailable ({e}); using the built-in city table only");
            Arc::new(StaticGeocoder::disabled())
        }
        None => {
            warn!("GEONAMES_USERNAME not set; using the built-in city table only");
            Arc::new(StaticGeocoder::disabled())
        }
    };
    let validator = JourneyValidator::new(LocationResolver::new(geocoder));
    let sessions = Arc::new(MokaSessionStore::new(&config.sessions));
    let mock: Arc<dyn Recommender> = Arc::new(MockRecommender::new());

    let planner = match config.llm.clone().map(LlmClient::new) {
        Some(Ok(client)) => {
            info!("Recommending with model {}", client.model());
            PlanningService::new(validator, Arc::new(client), sessions).with_fallback(mock)
        }
        Some(Err(e)) => {
            warn!("LLM client unavailable ({e}); using mock recommendations");
            PlanningService::new(validator, mock, sessions)
        }
        None => {
            warn!("LLM_API_KEY not set; using mock recommendations");
            PlanningService::new(validator, mock, sessions)
        }
    };

    let app = create_router(AppState::new(planner), &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {e}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    info!("Layover Planner listening on http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
