pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    /// Prefix of the variables overriding settings, e.g. `ENLIST__SESSION__JWT_SECRET`.
    pub const SETTINGS_ENV_PREFIX: &str = "ENLIST";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIRECTORY: &str = "config";
pub const BASE_CONFIG_FILE: &str = "base";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub mod defaults {
    pub const BASE_URL: &str = "http://localhost:8080";
    pub const REDIS_HOST_NAME: &str = "localhost";
    pub const REDIS_PORT: u16 = 6379;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
    pub const PENDING_TTL_IN_SECONDS: u64 = 24 * 60 * 60;
    pub const SESSION_TTL_IN_SECONDS: i64 = 24 * 60 * 60;
}

pub mod prod {
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@enlist.dev";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
