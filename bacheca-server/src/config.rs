use std::{
    collections::HashMap, env, fmt, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr,
    time::Duration,
};

use anyhow::anyhow;
use tracing::{info, warn};

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:80";
pub const DEFAULT_DATABASE_URL: &str = "bacheca.db";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configurazione del processo, letta una volta all'avvio e poi immutabile.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: SocketAddr,
    pub credentials: Credentials,
    /// Percorso SQLite, "sqlite::memory:" oppure "memory" per lo storage in memoria.
    pub database_url: String,
    pub initial_csv: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Come [`Config::from_env`], ma con una funzione di lookup al posto dell'ambiente.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::parse(&lookup("CREDENTIALS").unwrap_or_default());
        if credentials.is_empty() {
            warn!("CREDENTIALS not set, protected endpoints will reject every request");
        }

        let initial_csv = lookup("INITIAL_CSV")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let timeout_secs: u64 = try_load(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )?;
        // con 0 ogni richiesta scadrebbe subito
        if timeout_secs == 0 {
            return Err(anyhow!("invalid REQUEST_TIMEOUT_SECS value: must be at least 1"));
        }

        Ok(Self {
            http_addr: try_load(&lookup, "HTTP_ADDR", DEFAULT_HTTP_ADDR)?,
            credentials,
            database_url: try_load(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL)?,
            initial_csv,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("invalid {key} value: {e}"))
}

/// Mappa statica utente -> password per la basic auth.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials(HashMap<String, String>);

impl Credentials {
    /// Legge coppie `user:password` separate da virgola. Le voci senza
    /// utente o password vengono ignorate.
    pub fn parse(raw: &str) -> Self {
        let mut creds = HashMap::new();
        for (i, entry) in raw.split(',').enumerate() {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (user, password) = match entry.split_once(':') {
                Some((u, p)) => (u.trim(), p.trim()),
                None => ("", ""),
            };
            if user.is_empty() || password.is_empty() {
                warn!("ignoring CREDENTIALS entry at position {i}");
                continue;
            }
            creds.insert(user.to_string(), password.to_string());
        }
        Self(creds)
    }

    pub fn verify(&self, user: &str, password: &str) -> bool {
        self.0.get(user).is_some_and(|expected| expected == password)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Mai stampare le password nei log.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut users: Vec<&str> = self.0.keys().map(String::as_str).collect();
        users.sort_unstable();
        f.debug_struct("Credentials").field("users", &users).finish()
    }
}
