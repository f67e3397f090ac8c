use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{ADMIN_ONLY, require_roles};
use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_all_students, get_student, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    let restricted = Router::new()
        .route("/", post(create_student))
        .route("/{id}", put(update_student).delete(delete_student))
        .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles));

    Router::new()
        .route("/", get(get_all_students))
        .route("/{id}", get(get_student))
        .merge(restricted)
}
