use crate::{
    dtos::{
        envelope::{Empty, PaginationMeta},
        feedback::{FeedbackRequest, FeedbackResponse},
        reservation::{ReservationRequest, ReservationResponse},
        restaurant::{RestaurantRef, RestaurantRequest, RestaurantResponse},
        user::{RegisterRequest, UserRef, UserResponse},
    },
    routes::{auth, feedback, health, reservation, restaurant, root},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::register,
        auth::me,
        restaurant::get_restaurants,
        restaurant::get_restaurant,
        restaurant::create_restaurant,
        restaurant::update_restaurant,
        restaurant::delete_restaurant,
        reservation::get_reservations,
        reservation::get_restaurant_reservations,
        reservation::get_all_reservations,
        reservation::get_reservation,
        reservation::create_reservation,
        reservation::update_reservation,
        reservation::delete_reservation,
        reservation::admin_update_reservation,
        reservation::admin_delete_reservation,
        feedback::get_feedbacks,
        feedback::get_restaurant_feedbacks,
        feedback::get_feedback,
        feedback::create_feedback,
        feedback::update_feedback,
        feedback::delete_feedback,
    ),
    components(schemas(
        Empty,
        PaginationMeta,
        RegisterRequest,
        UserResponse,
        UserRef,
        RestaurantRequest,
        RestaurantResponse,
        RestaurantRef,
        ReservationRequest,
        ReservationResponse,
        FeedbackRequest,
        FeedbackResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Registration of token subjects"),
        (name = "Restaurants", description = "Restaurant related endpoints"),
        (name = "Reservations", description = "Table bookings"),
        (name = "Feedbacks", description = "Ratings left by diners"),
    ),
    info(
        title = "Restaurant Reservation API",
        version = "1.0.0",
        description = "Restaurants, reservations and feedback. Successful bodies are wrapped as `{ success, count?, pagination?, data }`; errors as `{ success: false, message }`.",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
