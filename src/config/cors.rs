use std::env;

/// Origins allowed to call the API from a browser.
///
/// Read from `CORS_ALLOWED_ORIGINS` as a comma-separated list. Defaults to
/// the Vite dev and preview servers.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:4173".to_string());

        let allowed_origins = raw
            .split(',')
            .filter_map(|origin| {
                let origin = origin.trim();
                (!origin.is_empty()).then(|| origin.to_string())
            })
            .collect();

        Self { allowed_origins }
    }
}
