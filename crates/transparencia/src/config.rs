//! Configuration constants for the transparencia client

/// Portal da Transparência API configuration
pub mod portal {
    /// Base URL of the transparency data REST API
    pub const API_BASE_URL: &str = "https://api.portaldatransparencia.gov.br/api-de-dados";

    /// Header that carries the API key on every request
    pub const API_KEY_HEADER: &str = "chave-api-dados";

    /// Environment variable consulted for the API key
    pub const API_KEY_ENV: &str = "PORTAL_API_KEY";

    /// Shared fallback key used when no key is configured.
    /// Set PORTAL_API_KEY instead of relying on this.
    pub const DEFAULT_API_KEY: &str = "2c56919ba91b8c1b13473dcef43fb031";

    /// Number of key characters the check tool echoes back
    pub const KEY_PREVIEW_LEN: usize = 10;
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Transparencia/", env!("CARGO_PKG_VERSION"));
}
