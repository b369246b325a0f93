use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which persistence adapter the cells are wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Supabase,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" => Ok(StorageBackend::Memory),
            "supabase" => Ok(StorageBackend::Supabase),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// Whether a rejected appointment keeps blocking its slot triple.
///
/// `Never` keeps every historical appointment as a permanent block.
/// `OnRejection` lets a rejected appointment free the slot for rebooking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotReleasePolicy {
    #[default]
    Never,
    OnRejection,
}

impl SlotReleasePolicy {
    pub fn releases_rejected(&self) -> bool {
        matches!(self, SlotReleasePolicy::OnRejection)
    }
}

impl FromStr for SlotReleasePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(SlotReleasePolicy::Never),
            "on_rejection" | "on-rejection" => Ok(SlotReleasePolicy::OnRejection),
            other => Err(format!("unknown slot release policy: {}", other)),
        }
    }
}

impl fmt::Display for SlotReleasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotReleasePolicy::Never => write!(f, "never"),
            SlotReleasePolicy::OnRejection => write!(f, "on_rejection"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_key: String,
    pub supabase_jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub slot_release_policy: SlotReleasePolicy,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_ROLE_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            storage_backend: parse_or_default("STORAGE_BACKEND", StorageBackend::Memory),
            slot_release_policy: parse_or_default("SLOT_RELEASE_POLICY", SlotReleasePolicy::Never),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if config.storage_backend == StorageBackend::Supabase && !config.is_configured() {
            warn!("Supabase storage selected but not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_service_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr<Err = String>,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("{} is invalid ({}), using default", key, e);
            default
        }),
        Err(_) => default,
    }
}
