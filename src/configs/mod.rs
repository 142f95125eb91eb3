use actix_cors::Cors;

use crate::constants::Env;

/// CORS policy for the single configured frontend origin.
pub fn cors(env: &Env) -> Cors {
    let origin = env.frontend_url.trim_end_matches('/');
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };

    cors.allow_any_method().allow_any_header().supports_credentials().max_age(3600)
}

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
