//! # Todoapp
//!
//! Account registration and login rendered as server-side HTML.
//!
//! ## Flow
//!
//! - **Registration:** the form is validated, the password is hashed with
//!   Argon2id and a single row is inserted. A duplicate `user_id` is reported
//!   back on the form instead of failing the request.
//! - **Login:** a single lookup plus a hash comparison. Unknown identifiers and
//!   wrong passwords both answer `401 Unauthorized` so the response never tells
//!   which accounts exist.
//! - **Sessions:** a random cookie token maps to a server-side entry holding the
//!   `user_id`. Protected pages sit behind a session gate that redirects to the
//!   top page when no session is present.

pub mod account;
pub mod cli;
pub mod todoapp;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
