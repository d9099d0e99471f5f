use std::env;

/// Cities the service currently operates in.
pub const SUPPORTED_CITIES: [&str; 2] = ["الرياض", "جدة"];

/// Smallest seat count a captain may register.
pub const MIN_SEATS: i32 = 1;
/// Largest seat count a captain may register.
pub const MAX_SEATS: i32 = 8;

/// Connection settings sourced from the `PG*` environment variables.
///
/// Every field is kept as the raw string the environment provided.
/// Nothing is validated, defaulted or type-checked; an absent variable
/// comes through as an empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Config {
    /// Read `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER` and `PGPASSWORD`
    /// from the process environment.
    pub fn from_env() -> Self {
        Config {
            host:     env::var("PGHOST").unwrap_or_default(),
            port:     env::var("PGPORT").unwrap_or_default(),
            dbname:   env::var("PGDATABASE").unwrap_or_default(),
            user:     env::var("PGUSER").unwrap_or_default(),
            password: env::var("PGPASSWORD").unwrap_or_default(),
        }
    }

    /// Assemble the keyword/value connection string.
    ///
    /// The five values are interpolated verbatim, in this fixed field
    /// order, with no quoting or escaping. Callers that need escaping
    /// must do it themselves before populating the fields.
    ///
    /// # Examples
    ///
    /// ```
    /// # use taqtaq_db::Config;
    /// let config = Config {
    ///     host:     "localhost".into(),
    ///     port:     "5432".into(),
    ///     dbname:   "app".into(),
    ///     user:     "app".into(),
    ///     password: "secret".into(),
    /// };
    /// assert_eq!(
    ///     config.params(),
    ///     "host=localhost port=5432 dbname=app user=app password=secret",
    /// );
    /// ```
    pub fn params(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.dbname, self.user, self.password,
        )
    }
}
