const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
const DEFAULT_DATABASE_PATH: &str = "movie_rankings.db";

#[derive(Debug, Clone, Default)]
pub struct RankingSettings {
    /// Apply the `ranked == true` filter to the global distribution as well
    /// as to the per-movie pool. Off by default: the comparison population
    /// includes unranked positions.
    pub global_requires_ranked: bool,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_path: String,
    pub max_connections: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var(DATABASE_PATH_ENV)
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
            max_connections: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingSettings,
    pub store: StoreSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            store: StoreSettings::default(),
        }
    }
}
