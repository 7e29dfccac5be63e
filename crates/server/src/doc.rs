use crate::routes::{auth, booking, health, hotel, root};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::register,
        auth::login,
        auth::profile,
        auth::change_password,
        auth::list_users,
        auth::delete_user,
        hotel::list_hotels,
        hotel::create_hotel,
        hotel::get_hotel,
        hotel::update_hotel,
        hotel::delete_hotel,
        hotel::add_room,
        booking::available_rooms,
        booking::book_room,
        booking::cancel_booking,
        booking::bookings_report
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and account management"),
        (name = "Hotels", description = "Hotel and room catalog"),
        (name = "Bookings", description = "Availability, booking and cancellation"),
    ),
    info(
        title = "Hotel Booking API",
        version = "1.0.0",
        description = "Hotel catalog, availability and booking API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
