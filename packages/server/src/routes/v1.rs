use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .nest("/patches", patch_routes())
        .nest("/profile", profile_routes())
        .nest("/stats", stat_routes())
        .nest("/upload", upload_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn patch_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::patch::list_patches))
        .routes(routes!(handlers::patch::create_patch))
        .routes(routes!(handlers::patch::list_user_patches))
        .routes(routes!(
            handlers::patch::get_patch,
            handlers::patch::delete_patch
        ))
        .routes(routes!(handlers::patch::update_patch))
        .routes(routes!(handlers::patch::list_patch_content))
        .routes(routes!(handlers::patch::upvote_patch))
}

fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::profile::get_own_profile,
            handlers::profile::update_own_profile
        ))
        .routes(routes!(handlers::profile::get_profile))
}

fn stat_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::stat::list_stats,
        handlers::stat::create_stat
    ))
}

fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_media))
        .layer(handlers::upload::upload_body_limit())
}
