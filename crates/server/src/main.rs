use axum::{
    Router,
    routing::{delete, get, post},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::tokens::JwtIssuer, state::AppState};

mod auth;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = database::db::create_connection()
        .await
        .expect("Failed to connect to database");

    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET is not set");
    let state = AppState {
        db,
        tokens: JwtIssuer::new(&secret),
    };

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/profile", get(routes::auth::profile))
        .route("/changepassword", post(routes::auth::change_password))
        .route("/users", get(routes::auth::list_users))
        .route("/users/{user_id}", delete(routes::auth::delete_user))
        .route(
            "/hotels",
            get(routes::hotel::list_hotels).post(routes::hotel::create_hotel),
        )
        .route(
            "/hotels/{hotel_id}",
            get(routes::hotel::get_hotel)
                .put(routes::hotel::update_hotel)
                .delete(routes::hotel::delete_hotel),
        )
        .route("/hotels/{hotel_id}/room/add", post(routes::hotel::add_room))
        .route(
            "/hotels/{hotel_id}/rooms",
            post(routes::booking::available_rooms),
        )
        .route(
            "/hotels/{hotel_id}/rooms/bookings",
            get(routes::booking::bookings_report),
        )
        .route(
            "/hotels/{hotel_id}/{room_id}/book",
            post(routes::booking::book_room),
        )
        .route(
            "/bookings/{booking_id}",
            delete(routes::booking::cancel_booking),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on http://localhost:3000");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
