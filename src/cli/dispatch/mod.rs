use crate::cli::actions::{Action, StoreBackend};
use crate::todoapp::session::{
    SessionConfig, DEFAULT_SESSION_NAME, DEFAULT_SESSION_TTL_SECONDS,
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let store = match matches.get_one::<String>("store").map(String::as_str) {
        Some("memory") => StoreBackend::Memory,
        Some("postgres") | None => StoreBackend::Postgres {
            dsn: matches
                .get_one::<String>("dsn")
                .map(|dsn| SecretString::from(dsn.clone()))
                .ok_or_else(|| anyhow!("missing required argument: --dsn"))?,
        },
        Some(other) => return Err(anyhow!("unsupported store: {other}")),
    };

    let session_name = matches
        .get_one::<String>("session-name")
        .map_or(DEFAULT_SESSION_NAME, String::as_str);

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        store,
        session: SessionConfig::new(session_name.to_string())
            .with_secure(matches.get_flag("session-secure"))
            .with_ttl_seconds(
                matches
                    .get_one::<i64>("session-ttl")
                    .copied()
                    .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
            ),
        password_min: matches.get_one::<usize>("password-min").copied().unwrap_or(8),
        password_max: matches.get_one::<usize>("password-max").copied().unwrap_or(16),
    })
}
