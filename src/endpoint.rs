// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! API origin resolution
//!
//! A hosted workspace forwards the backend port through a predictable
//! hostname; everywhere else the backend is on the local loopback.
//! Resolution never fails: a wrong workspace name shows up later as a
//! network error, not here.

use crate::config::environment::Environment;
use crate::constants::{endpoints, env_names};
use tracing::info;

/// Resolve the base origin for every REST call from an environment snapshot
pub fn resolve_api_base(env: &Environment) -> String {
    match hosted_workspace_name(env) {
        Some(name) => hosted_api_base(name),
        None => endpoints::LOCAL_API_BASE.to_string(),
    }
}

/// Resolve the origin, honoring an explicit override variable first
pub fn resolve_with_override(env: &Environment) -> String {
    if let Some(base) = env.get(env_names::API_BASE) {
        info!("Using API base from {}: {}", env_names::API_BASE, base);
        return base.trim_end_matches('/').to_string();
    }

    let base = resolve_api_base(env);
    info!(api.base = %base, hosted = hosted_workspace_name(env).is_some(), "Resolved API base");
    base
}

fn hosted_workspace_name(env: &Environment) -> Option<&str> {
    env.first_of(&[env_names::CODESPACE_NAME_PRIMARY, env_names::CODESPACE_NAME])
}

fn hosted_api_base(name: &str) -> String {
    format!(
        "https://{}-{}.{}/api",
        name,
        endpoints::SERVICE_PORT,
        endpoints::HOSTED_DOMAIN
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_fallback() {
        let env = Environment::default();
        assert_eq!(resolve_api_base(&env), "http://localhost:8000/api");
    }

    #[test]
    fn test_hosted_workspace() {
        let env = Environment::from_pairs([("CODESPACE_NAME", "fuzzy-parakeet")]);
        assert_eq!(
            resolve_api_base(&env),
            "https://fuzzy-parakeet-8000.app.github.dev/api"
        );
    }

    #[test]
    fn test_primary_name_wins() {
        let env = Environment::from_pairs([
            ("OCTOFIT_CODESPACE_NAME", "primary"),
            ("CODESPACE_NAME", "secondary"),
        ]);
        assert_eq!(
            resolve_api_base(&env),
            "https://primary-8000.app.github.dev/api"
        );
    }

    #[test]
    fn test_empty_name_falls_back_to_local() {
        let env = Environment::from_pairs([("CODESPACE_NAME", "")]);
        assert_eq!(resolve_api_base(&env), "http://localhost:8000/api");
    }

    #[test]
    fn test_override_trims_trailing_slash() {
        let env = Environment::from_pairs([
            ("OCTOFIT_API_BASE", "http://10.0.0.5:9000/api/"),
            ("CODESPACE_NAME", "ignored"),
        ]);
        assert_eq!(resolve_with_override(&env), "http://10.0.0.5:9000/api");
    }
}
