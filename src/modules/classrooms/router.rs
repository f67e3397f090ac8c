use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{ADMIN_ONLY, require_roles};
use crate::state::AppState;

use super::controller::{
    create_classroom, delete_classroom, get_all_classrooms, get_classroom, update_classroom,
};

pub fn init_classrooms_router() -> Router<AppState> {
    let restricted = Router::new()
        .route("/", post(create_classroom))
        .route("/{id}", put(update_classroom).delete(delete_classroom))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles));

    Router::new()
        .route("/", get(get_all_classrooms))
        .route("/{id}", get(get_classroom))
        .merge(restricted)
}
