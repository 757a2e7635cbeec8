use std::env;

use crate::error::AppError;

/// Store profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum StoreProfile {
    /// Production tree
    Prod,
    /// Test tree - enforces safety rules
    Test,
}

/// Which backend holds the tree
#[derive(Debug, Clone, PartialEq)]
pub enum StoreKind {
    /// Process-local tree, lost on exit
    InMemory,
    /// Remote JSON tree over REST
    Rest { base_url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    pub kind: StoreKind,
    pub auth_token: Option<String>,
}

/// Resolve store settings from environment variables for a profile.
///
/// `FIREBASE_URL` (or `FIREBASE_TEST_URL` for the test profile) selects the
/// REST tree; the literal value `memory` selects the in-process tree.
pub fn store_settings(profile: StoreProfile) -> Result<StoreSettings, AppError> {
    let url = base_url(profile)?;
    let kind = if url == "memory" {
        StoreKind::InMemory
    } else {
        StoreKind::Rest {
            base_url: url.trim_end_matches('/').to_string(),
        }
    };
    Ok(StoreSettings {
        kind,
        auth_token: auth_token(),
    })
}

fn base_url(profile: StoreProfile) -> Result<String, AppError> {
    match profile {
        StoreProfile::Prod => must_var("FIREBASE_URL"),
        StoreProfile::Test => {
            let url = must_var("FIREBASE_TEST_URL")?;
            // Enforce safety: never point the test profile at a live tree
            if url != "memory" && !url.contains("test") {
                return Err(AppError::config(format!(
                    "Test profile requires a store URL containing 'test', but got: '{url}'"
                )));
            }
            Ok(url)
        }
    }
}

/// Optional auth token appended to every REST request
fn auth_token() -> Option<String> {
    env::var("FIREBASE_AUTH_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
