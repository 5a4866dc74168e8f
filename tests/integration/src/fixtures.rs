//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use modchat_service::{LoginRequest, RegisterRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A registration request with a unique username and email
pub fn unique_registration() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        username: format!("testuser{suffix}"),
        email: format!("test{suffix}@example.com"),
    }
}

/// A registration request for a fixed username
pub fn registration(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
    }
}

/// A passwordless login request, the shape every non-admin account uses
pub fn login(username: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: String::new(),
    }
}

/// The admin sentinel login for the default configuration
pub fn admin_login() -> LoginRequest {
    LoginRequest {
        username: "admin".to_string(),
        password: "admin".to_string(),
    }
}
