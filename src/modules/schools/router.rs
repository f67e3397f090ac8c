use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{SUPERADMIN_ONLY, require_roles};
use crate::state::AppState;

use super::controller::{create_school, delete_school, get_all_schools, get_school, update_school};

pub fn init_schools_router() -> Router<AppState> {
    let restricted = Router::new()
        .route("/", post(create_school))
        .route("/{id}", put(update_school).delete(delete_school))
        .route_layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles));

    Router::new()
        .route("/", get(get_all_schools))
        .route("/{id}", get(get_school))
        .merge(restricted)
}
