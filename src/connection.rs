extern crate postgres_sys as postgres;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;
use std::process;

use postgres::{Client, NoTls};

pub use postgres::types::ToSql;

use crate::config::Config;
use crate::error::{Error, ErrorLevel};
use crate::row::Row;
use crate::Result;

/// The fixed diagnostic written when [connect](./fn.connect.html)
/// cannot reach the database.
pub const CONNECT_FAILED_MSG: &str = "❌ فشل الاتصال بقاعدة البيانات";

/// A blocking connection to the service database.
pub struct Connection {
    conn:        RefCell<Client>,
    params:      String,
    error_level: Cell<ErrorLevel>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("params", &self.params)
            .field("error_level", &self.error_level.get())
            .finish()
    }
}

/// Open a read-write connection to an existing database.
///
/// Accepts both the keyword/value syntax and `postgresql://` URLs. See
/// the documentation for [Config](https://docs.rs/postgres/latest/postgres/config/struct.Config.html)
/// for the full connection syntax.
///
/// # Examples
///
/// ```no_run
/// let params = "host=localhost user=postgres password=postgres";
/// let conn = taqtaq_db::open(params).unwrap();
/// ```
#[inline]
pub fn open(params: &str) -> Result<Connection> {
    let conn = match Client::connect(params, NoTls) {
        Ok(conn) => conn,
        Err(e) => return Err(Error::Message(format!("failed to open: {}", e))),
    };

    Ok(Connection {
        conn:        RefCell::new(conn),
        params:      params.to_string(),
        error_level: Cell::new(ErrorLevel::default()),
    })
}

/// Read the `PG*` environment variables and open the one connection
/// the process runs on.
///
/// The connection string is assembled by [Config](./struct.Config.html)
/// from `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER` and `PGPASSWORD`,
/// verbatim and unvalidated. On success the open handle is returned
/// and nothing is printed.
///
/// There is no retry and no recovery: if the attempt fails for any
/// reason, the fixed failure marker is written to stdout and the
/// process exits non-zero. Control never returns to the caller on
/// that path.
///
/// # Examples
///
/// ```no_run
/// let conn = taqtaq_db::connect();
/// conn.execute("SELECT 1;").unwrap();
/// ```
pub fn connect() -> Connection {
    match open(&Config::from_env().params()) {
        Ok(conn) => conn,
        Err(_) => {
            print!("{}", CONNECT_FAILED_MSG);
            let _ = std::io::stdout().flush();
            process::exit(1);
        }
    }
}

impl Connection {
    /// Execute one or more statements without processing any resulting
    /// rows.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # let conn = taqtaq_db::connect();
    /// conn.execute(r#"CREATE TEMPORARY TABLE users (name TEXT, age INTEGER);
    ///                 INSERT INTO users (name, age) VALUES ('Alice', 42);"#).unwrap();
    /// ```
    #[inline]
    pub fn execute(&self, query: &str) -> Result<()> {
        match self.conn.borrow_mut().batch_execute(query) {
            Ok(_) => Ok(()),
            Err(e) => Error::new(&self.error_level.get(), "exec error", e.to_string()),
        }
    }

    /// Execute a single parameterized statement and return the number
    /// of rows it affected.
    ///
    /// Parameters are bound server-side as `$1`, `$2`, ...
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # let conn = taqtaq_db::connect();
    /// let n = conn.exec(
    ///     "UPDATE users SET available=$1 WHERE user_id=$2",
    ///     &[&false, &42_i64],
    /// ).unwrap();
    /// assert_eq!(n, 1);
    /// ```
    #[inline]
    pub fn exec(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        match self.conn.borrow_mut().execute(query, params) {
            Ok(n) => Ok(n),
            Err(e) => Error::new(&self.error_level.get(), "exec error", e.to_string()),
        }
    }

    /// Execute a statement and process the resulting rows as plain
    /// text.
    ///
    /// The callback is triggered once per row. If the callback returns
    /// `false`, no more rows will be processed.
    #[inline]
    pub fn iterate<F>(&self, query: &str, params: &[&(dyn ToSql + Sync)], mut callback: F) -> Result<()>
    where
        F: FnMut(&[(String, Option<String>)]) -> bool,
    {
        let mut conn = self.conn.borrow_mut();
        let rows = match conn.query(query, params) {
            Ok(rows) => rows,
            Err(e) => return Error::new(&self.error_level.get(), "exec error", e.to_string()),
        };

        for row in &rows {
            let mut pairs = Vec::with_capacity(row.len());
            for (index, column) in row.columns().iter().enumerate() {
                pairs.push((column.name().to_string(), column_text(row, index)));
            }
            if !callback(&pairs) {
                break;
            }
        }

        Ok(())
    }

    /// Execute a statement and return the rows.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # let conn = taqtaq_db::connect();
    /// let rows = conn.rows("SELECT name FROM users;", &[]).unwrap();
    /// for row in rows.iter() {
    ///     println!("name: {}", row.get("name").unwrap_or("NULL"));
    /// }
    /// ```
    pub fn rows(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let mut rows: Vec<Row> = Vec::new();

        self.iterate(query, params, |pairs| {
            let mut row = Row::new();
            for (column, value) in pairs {
                row.insert(column.to_string(), value.clone());
            }
            rows.push(row);
            true
        })?;

        Ok(rows)
    }

    /// Sets the error level.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use taqtaq_db::ErrorLevel;
    /// # let conn = taqtaq_db::connect();
    /// conn.error_level(ErrorLevel::AlwaysOk);
    /// ```
    pub fn error_level(&self, level: ErrorLevel) {
        self.error_level.set(level);
    }
}

// Stringify a column the way the service reads rows back: everything
// the schema can hold collapses to text, NULL stays None.
fn column_text(row: &postgres::Row, index: usize) -> Option<String> {
    if let Ok(value) = row.try_get::<_, Option<String>>(index) {
        return value;
    }
    if let Ok(value) = row.try_get::<_, i64>(index) {
        return Some(value.to_string());
    }
    if let Ok(value) = row.try_get::<_, i32>(index) {
        return Some(value.to_string());
    }
    if let Ok(value) = row.try_get::<_, bool>(index) {
        return Some(value.to_string());
    }
    if let Ok(value) = row.try_get::<_, f64>(index) {
        return Some(value.to_string());
    }
    None
}
