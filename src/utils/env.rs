// src/utils/env.rs
use log::debug;

/// Load variables from a `.env` file in the working directory, if one exists.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }
}
