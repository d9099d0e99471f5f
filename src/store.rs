//! Persistence for riders, captains and their matches.
//!
//! The schema is the one the matching flow expects: a `users` table
//! keyed by the caller's id and a `matches` table with one row per
//! (client, captain) pair. All statements bind their inputs
//! server-side.

use std::fmt;
use std::str::FromStr;

use crate::connection::Connection;
use crate::error::Error;
use crate::row::Row;
use crate::Result;

/// Roles a registered user can hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Client,
    Captain,
}

impl Role {
    /// The value stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Captain => "captain",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "client" => Ok(Role::Client),
            "captain" => Ok(Role::Captain),
            _ => Err(Error::Message(format!("unknown role: {}", s))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle states of a ride match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
    Rejected,
    Cancelled,
}

impl MatchStatus {
    /// The value stored in the `matches.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
            MatchStatus::Rejected => "rejected",
            MatchStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "in_progress" => Ok(MatchStatus::InProgress),
            "completed" => Ok(MatchStatus::Completed),
            "rejected" => Ok(MatchStatus::Rejected),
            "cancelled" => Ok(MatchStatus::Cancelled),
            _ => Err(Error::Message(format!("unknown match status: {}", s))),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user profile as stored in the `users` table.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub user_id: i64,
    pub role: Role,
    pub subscription: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub car_model: Option<String>,
    pub car_plate: Option<String>,
    pub seats: Option<i32>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub available: bool,
    pub agreement: bool,
    pub username: Option<String>,
}

impl UserProfile {
    /// A fresh profile with only the identity fields set.
    pub fn new(user_id: i64, role: Role) -> Self {
        UserProfile {
            user_id,
            role,
            subscription: None,
            full_name: None,
            phone: None,
            car_model: None,
            car_plate: None,
            seats: None,
            city: None,
            neighborhood: None,
            available: true,
            agreement: false,
            username: None,
        }
    }
}

/// A captain offered to a client by the matching flow.
#[derive(Clone, Debug, PartialEq)]
pub struct Captain {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
}

/// Create the `users` and `matches` tables if they do not exist yet.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"CREATE TABLE IF NOT EXISTS users (
               user_id BIGINT PRIMARY KEY,
               role VARCHAR(10) NOT NULL,
               subscription VARCHAR(20),
               full_name TEXT,
               phone TEXT,
               car_model TEXT,
               car_plate TEXT,
               seats INT,
               city TEXT,
               neighborhood TEXT,
               available BOOLEAN DEFAULT TRUE,
               agreement BOOLEAN DEFAULT FALSE,
               username TEXT
           );
           CREATE TABLE IF NOT EXISTS matches (
               id SERIAL PRIMARY KEY,
               client_id BIGINT REFERENCES users(user_id) ON DELETE CASCADE,
               captain_id BIGINT REFERENCES users(user_id) ON DELETE CASCADE,
               status VARCHAR(20) DEFAULT 'pending',
               CONSTRAINT unique_match UNIQUE (client_id, captain_id)
           );"#,
    )
}

/// Insert a user, or refresh every column of an existing row.
pub fn save_user(conn: &Connection, user: &UserProfile) -> Result<()> {
    conn.exec(
        r#"INSERT INTO users (user_id, role, subscription, full_name, phone,
                              car_model, car_plate, seats, city, neighborhood,
                              available, agreement, username)
           VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
           ON CONFLICT (user_id) DO UPDATE SET
               role=EXCLUDED.role,
               subscription=EXCLUDED.subscription,
               full_name=EXCLUDED.full_name,
               phone=EXCLUDED.phone,
               car_model=EXCLUDED.car_model,
               car_plate=EXCLUDED.car_plate,
               seats=EXCLUDED.seats,
               city=EXCLUDED.city,
               neighborhood=EXCLUDED.neighborhood,
               available=EXCLUDED.available,
               agreement=EXCLUDED.agreement,
               username=EXCLUDED.username"#,
        &[
            &user.user_id,
            &user.role.as_str(),
            &user.subscription,
            &user.full_name,
            &user.phone,
            &user.car_model,
            &user.car_plate,
            &user.seats,
            &user.city,
            &user.neighborhood,
            &user.available,
            &user.agreement,
            &user.username,
        ],
    )?;
    Ok(())
}

/// Fetch a user profile by id.
pub fn get_user(conn: &Connection, user_id: i64) -> Result<Option<UserProfile>> {
    let rows = conn.rows(
        r#"SELECT user_id, role, subscription, full_name, phone, car_model,
                  car_plate, seats, city, neighborhood, available, agreement,
                  username
           FROM users WHERE user_id=$1"#,
        &[&user_id],
    )?;

    match rows.first() {
        Some(row) => Ok(Some(user_from_row(row)?)),
        None => Ok(None),
    }
}

/// Whether a user has completed registration.
pub fn is_registered(conn: &Connection, user_id: i64) -> Result<bool> {
    let rows = conn.rows("SELECT 1 FROM users WHERE user_id=$1", &[&user_id])?;
    Ok(!rows.is_empty())
}

/// Find the available captains serving a city and neighborhood.
pub fn find_captains(conn: &Connection, city: &str, neighborhood: &str) -> Result<Vec<Captain>> {
    let rows = conn.rows(
        r#"SELECT user_id, full_name, phone, username FROM users
           WHERE role='captain' AND city=$1 AND neighborhood=$2 AND available=TRUE"#,
        &[&city, &neighborhood],
    )?;

    let mut captains = Vec::with_capacity(rows.len());
    for row in &rows {
        captains.push(Captain {
            user_id: id_column(row, "user_id")?,
            full_name: row.get("full_name").map(str::to_string),
            phone: row.get("phone").map(str::to_string),
            username: row.get("username").map(str::to_string),
        });
    }
    Ok(captains)
}

/// Record a match between a client and a captain, or move an existing
/// one to a new status.
pub fn update_match(
    conn: &Connection,
    client_id: i64,
    captain_id: i64,
    status: MatchStatus,
) -> Result<()> {
    conn.exec(
        r#"INSERT INTO matches (client_id, captain_id, status)
           VALUES ($1, $2, $3)
           ON CONFLICT (client_id, captain_id) DO UPDATE SET status=EXCLUDED.status"#,
        &[&client_id, &captain_id, &status.as_str()],
    )?;
    Ok(())
}

/// The status of the match between a client and a captain, if any.
pub fn match_status(
    conn: &Connection,
    client_id: i64,
    captain_id: i64,
) -> Result<Option<MatchStatus>> {
    let rows = conn.rows(
        "SELECT status FROM matches WHERE client_id=$1 AND captain_id=$2",
        &[&client_id, &captain_id],
    )?;

    match rows.first().and_then(|row| row.get("status")) {
        Some(status) => Ok(Some(status.parse()?)),
        None => Ok(None),
    }
}

fn user_from_row(row: &Row) -> Result<UserProfile> {
    Ok(UserProfile {
        user_id: id_column(row, "user_id")?,
        role: row.get("role").unwrap_or("").parse()?,
        subscription: row.get("subscription").map(str::to_string),
        full_name: row.get("full_name").map(str::to_string),
        phone: row.get("phone").map(str::to_string),
        car_model: row.get("car_model").map(str::to_string),
        car_plate: row.get("car_plate").map(str::to_string),
        seats: match row.get("seats") {
            Some(seats) => Some(
                seats
                    .parse()
                    .map_err(|_| Error::Message(format!("seats is not an integer: {}", seats)))?,
            ),
            None => None,
        },
        city: row.get("city").map(str::to_string),
        neighborhood: row.get("neighborhood").map(str::to_string),
        available: row.get("available") == Some("true"),
        agreement: row.get("agreement") == Some("true"),
        username: row.get("username").map(str::to_string),
    })
}

fn id_column(row: &Row, key: &str) -> Result<i64> {
    row.get_into(key)
        .map_err(|_| Error::Message(format!("{} is not an integer", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        assert_eq!(Role::Client.as_str(), "client");
        assert_eq!(Role::Captain.as_str(), "captain");
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("captain".parse::<Role>().unwrap(), Role::Captain);
        assert!("driver".parse::<Role>().is_err());
    }

    #[test]
    fn match_status_round_trip() {
        let all = [
            MatchStatus::Pending,
            MatchStatus::InProgress,
            MatchStatus::Completed,
            MatchStatus::Rejected,
            MatchStatus::Cancelled,
        ];
        for status in &all {
            assert_eq!(status.as_str().parse::<MatchStatus>().unwrap(), *status);
        }
        assert!("done".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn new_profile_defaults() {
        let user = UserProfile::new(42, Role::Captain);
        assert_eq!(user.user_id, 42);
        assert_eq!(user.role, Role::Captain);
        assert!(user.available);
        assert!(!user.agreement);
        assert_eq!(user.seats, None);
    }

    #[test]
    fn user_from_row_parses_columns() {
        let mut row = Row::new();
        row.insert("user_id".to_string(), Some("7".to_string()));
        row.insert("role".to_string(), Some("captain".to_string()));
        row.insert("subscription".to_string(), Some("شهري".to_string()));
        row.insert("full_name".to_string(), Some("سالم محمد العتيبي".to_string()));
        row.insert("phone".to_string(), Some("0512345678".to_string()));
        row.insert("car_model".to_string(), None);
        row.insert("car_plate".to_string(), None);
        row.insert("seats".to_string(), Some("4".to_string()));
        row.insert("city".to_string(), Some("جدة".to_string()));
        row.insert("neighborhood".to_string(), None);
        row.insert("available".to_string(), Some("false".to_string()));
        row.insert("agreement".to_string(), Some("true".to_string()));
        row.insert("username".to_string(), None);

        let user = user_from_row(&row).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::Captain);
        assert_eq!(user.seats, Some(4));
        assert_eq!(user.city.as_deref(), Some("جدة"));
        assert!(!user.available);
        assert!(user.agreement);
        assert_eq!(user.car_model, None);
    }

    #[test]
    fn user_from_row_rejects_bad_role() {
        let mut row = Row::new();
        row.insert("user_id".to_string(), Some("7".to_string()));
        row.insert("role".to_string(), Some("pilot".to_string()));
        assert!(user_from_row(&row).is_err());
    }
}
