// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Application constants: environment variable names, endpoint pieces,
//! form limits and the fallback messages shown when the server gives none.

/// Service identity
pub mod service {
    /// Service name used in logs and the config directory
    pub const SERVICE_NAME: &str = "octofit-console";

    /// Service version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Environment variable names read by the configuration layer
pub mod env_names {
    /// Hosted workspace name, checked first
    pub const CODESPACE_NAME_PRIMARY: &str = "OCTOFIT_CODESPACE_NAME";

    /// Hosted workspace name as exported by the workspace itself
    pub const CODESPACE_NAME: &str = "CODESPACE_NAME";

    /// Explicit API origin override
    pub const API_BASE: &str = "OCTOFIT_API_BASE";

    /// Optional config file location
    pub const CONFIG_PATH: &str = "OCTOFIT_CONFIG";
}

/// API endpoints and URL pieces
pub mod endpoints {
    /// Port the backend listens on, both locally and behind the hosted workspace proxy
    pub const SERVICE_PORT: u16 = 8000;

    /// Domain suffix of hosted workspace port forwards
    pub const HOSTED_DOMAIN: &str = "app.github.dev";

    /// Origin used when no hosted workspace is detected
    pub const LOCAL_API_BASE: &str = "http://localhost:8000/api";

    /// Leaderboard collection path segment
    pub const LEADERBOARD: &str = "leaderboard";
}

/// Numeric limits and thresholds
pub mod limits {
    /// Usernames shorter than this are rejected before submission
    pub const MIN_USERNAME_LENGTH: usize = 3;

    /// Passwords shorter than this are rejected before submission
    pub const MIN_PASSWORD_LENGTH: usize = 6;

    /// Members listed inline on a team card
    pub const MEMBER_PREVIEW_LIMIT: usize = 3;

    /// Default size of the leaderboard `top` query
    pub const DEFAULT_LEADERBOARD_TOP: usize = 10;

    /// Server message bodies longer than this are not shown verbatim
    pub const MAX_SERVER_MESSAGE_LEN: usize = 300;
}

/// User-facing fallback text
pub mod messages {
    pub const NOT_AVAILABLE: &str = "N/A";
    pub const NO_NOTES: &str = "-";
    pub const NO_DESCRIPTION: &str = "No description available";
    pub const NO_TEAM: &str = "No Team";
    pub const TEAM_MEMBER: &str = "Team Member";
    pub const UNKNOWN_USER: &str = "Unknown User";
    pub const FIELD_REQUIRED: &str = "This field is required";
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
}
