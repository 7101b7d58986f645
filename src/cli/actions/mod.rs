pub mod server;

use secrecy::SecretString;

use crate::todoapp::session::SessionConfig;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        store: StoreBackend,
        session: SessionConfig,
        password_min: usize,
        password_max: usize,
    },
}

/// Where user accounts live.
#[derive(Debug)]
pub enum StoreBackend {
    Postgres { dsn: SecretString },
    Memory,
}
