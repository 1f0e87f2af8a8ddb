//! Constants used throughout epikit.
//!
//! Centralizes magic strings and configuration values.

/// Layered `.env` files in ascending precedence. The environment specific
/// file is appended at resolution time (`.env.<environment>.local`).
pub const ENV_FILES: &[&str] = &[".env", ".env.local"];

/// Suffix of the credential file stored in the home directory.
pub const AUTH_FILE: &str = ".epi_auth";

/// Default TypeScript path mapping file, relative to the application root.
pub const TS_CONFIG_FILE: &str = "tsconfig.json";

/// Extensions the bundler resolves, in lookup order.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".json", ".tsx", ".ts"];

/// Module alias for the forms integration.
pub const FORMS_ALIAS: &str = "EPiServer.ContentApi.Forms";

/// Token endpoint, relative to the CMS base URL.
pub const TOKEN_PATH: &str = "api/episerver/auth/token";

/// OAuth client identifier used for password and refresh grants.
pub const CLIENT_ID: &str = "Default";

/// Content type catalog endpoint, relative to the CMS base URL.
pub const MODEL_SERVICE_PATH: &str = "api/episerver/v3/model";

/// Default deployment endpoint, relative to the CMS base URL.
pub const DEPLOY_PATH: &str = "api/episerver/v3/deploy";

/// Default output directory for generated models, relative to the root.
pub const MODEL_DIR: &str = "src/Models/Episerver";

/// Base name of the generated type mapper (never evicted).
pub const TYPE_MAPPER: &str = "TypeMapper";

/// File name of the generated schema document.
pub const SCHEMA_FILE: &str = "schema.json";

/// Upper bound on concurrent type detail requests during a sync.
pub const SYNC_CONCURRENCY: usize = 8;

/// Character echoed in place of each typed password character.
pub const MASK_CHAR: char = '*';
