//! Epikit - tooling for Episerver headless SPA projects.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── login         # Interactive authentication
//! │   ├── logout        # Remove the stored credential
//! │   ├── status        # Target and session overview
//! │   ├── sync          # Generate TypeScript models
//! │   ├── deploy        # Upload a build artifact
//! │   ├── config        # Print the resolved configuration
//! │   ├── preload       # Expand @PreLoad annotations
//! │   ├── run           # Run with configuration overrides
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── environment   # Deployment environment names
//!     ├── dotenv        # .env parsing and expansion
//!     ├── config        # Layered configuration
//!     ├── aliases       # Bundler module resolution
//!     ├── store/        # Credential storage
//!     │   ├── mod       # TokenStore trait
//!     │   ├── token     # OAuth token
//!     │   └── fs        # Per-endpoint auth file
//!     ├── remote/       # CMS access
//!     │   ├── mod       # AuthService, ModelCatalog, Deployer traits
//!     │   ├── model     # Content type payloads
//!     │   └── http      # reqwest implementation
//!     ├── auth          # Login state machine and prompts
//!     ├── sync/         # Model synchronisation
//!     ├── deploy        # Package upload
//!     └── preload       # @PreLoad source rewriting
//! ```

pub mod cli;
pub mod core;
pub mod error;
