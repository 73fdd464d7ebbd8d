use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use leptos::logging::log;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::restaurant::Restaurant;
use crate::models::review::Review;
use crate::models::user::User;

const RESTAURANT_COLUMNS: &str = "r.id, r.name, r.description, r.address, r.telephone, r.user_id";
const REVIEW_COLUMNS: &str =
    "v.id, v.summary, v.body, v.stars, v.created_at, v.user_id, v.restaurant_id";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("restaurant {0} does not exist")]
    MissingRestaurant(i64),

    #[error("user {0} does not exist")]
    UnknownUser(i64),

    /// An update matched no row, usually because it was deleted concurrently.
    #[error("update affected no rows")]
    NoRowsAffected,
}

#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self, DbError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        log!("[DB] Connection established at: {}", db_path);
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn create_schema(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().await;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                hashed_password TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS restaurants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL,
                telephone TEXT NOT NULL DEFAULT '',
                user_id INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );

            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                summary TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL DEFAULT '',
                stars INTEGER NOT NULL CHECK (stars BETWEEN 1 AND 5),
                created_at TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                restaurant_id INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (restaurant_id) REFERENCES restaurants(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS reviews_restaurant_id ON reviews(restaurant_id);",
        )
        .map_err(|e| {
            log!("[DB] Failed creating schema: {}", e);
            e
        })?;

        Ok(())
    }

    /// Accounts are provisioned outside the HTTP API; the caller hashes the password.
    pub async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO users (full_name, email, hashed_password) VALUES (?, ?, ?)",
            params![full_name, email, hashed_password],
        )?;
        let id = conn.last_insert_rowid();
        log!("[DB] User created: {}", id);
        Ok(User {
            id,
            full_name: full_name.to_string(),
            email: email.to_string(),
        })
    }

    /// Restaurants ordered by id, each with its reviews (without authors).
    /// `filter` keeps only names containing it, ignoring case.
    pub async fn list_restaurants(&self, filter: Option<&str>) -> Result<Vec<Restaurant>, DbError> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants r ORDER BY r.id ASC"
        ))?;
        let mut restaurants = stmt
            .query_map([], restaurant_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(filter) = filter {
            restaurants.retain(|restaurant| restaurant.matches_filter(filter));
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews v ORDER BY v.id ASC"
        ))?;
        let mut by_restaurant: HashMap<i64, Vec<Review>> = HashMap::new();
        for review in stmt.query_map([], review_from_row)? {
            let review = review?;
            by_restaurant
                .entry(review.restaurant_id)
                .or_default()
                .push(review);
        }

        for restaurant in &mut restaurants {
            restaurant.reviews = by_restaurant.remove(&restaurant.id).unwrap_or_default();
        }

        log!("[DB] Fetched {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    /// One restaurant with its reviews, each carrying its author.
    pub async fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>, DbError> {
        let conn = self.conn.lock().await;
        let Some(mut restaurant) = fetch_restaurant(&conn, id)? else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS}, u.id, u.full_name, u.email
             FROM reviews v
             JOIN users u ON u.id = v.user_id
             WHERE v.restaurant_id = ?
             ORDER BY v.id ASC"
        ))?;
        restaurant.reviews = stmt
            .query_map([id], review_with_user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(restaurant))
    }

    /// The restaurant row alone, without reviews.
    pub async fn find_restaurant(&self, id: i64) -> Result<Option<Restaurant>, DbError> {
        let conn = self.conn.lock().await;
        fetch_restaurant(&conn, id)
    }

    pub async fn restaurant_exists(&self, id: i64) -> Result<bool, DbError> {
        let conn = self.conn.lock().await;
        exists(&conn, "SELECT 1 FROM restaurants WHERE id = ?", id)
    }

    pub async fn restaurant_owned_by(&self, id: i64, user_id: i64) -> Result<bool, DbError> {
        let conn = self.conn.lock().await;
        let owned = conn
            .query_row(
                "SELECT 1 FROM restaurants WHERE id = ? AND user_id = ?",
                params![id, user_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(owned.is_some())
    }

    /// Inserts a restaurant owned by `owner`, whatever `restaurant.user_id` says.
    pub async fn insert_restaurant(
        &self,
        restaurant: &Restaurant,
        owner: i64,
    ) -> Result<Restaurant, DbError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        if !exists(&tx, "SELECT 1 FROM users WHERE id = ?", owner)? {
            return Err(DbError::UnknownUser(owner));
        }

        tx.execute(
            "INSERT INTO restaurants (name, description, address, telephone, user_id)
             VALUES (?, ?, ?, ?, ?)",
            params![
                &restaurant.name,
                &restaurant.description,
                &restaurant.address,
                &restaurant.telephone,
                owner
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log!("[DB] Restaurant {} created for user {}", id, owner);
        Ok(Restaurant {
            id,
            user_id: owner,
            reviews: Vec::new(),
            ..restaurant.clone()
        })
    }

    /// Replaces the editable fields. The owner is never touched.
    pub async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<Restaurant, DbError> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE restaurants
             SET name = ?, description = ?, address = ?, telephone = ?
             WHERE id = ?",
            params![
                &restaurant.name,
                &restaurant.description,
                &restaurant.address,
                &restaurant.telephone,
                restaurant.id
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NoRowsAffected);
        }

        log!("[DB] Restaurant {} updated", restaurant.id);
        fetch_restaurant(&conn, restaurant.id)?.ok_or(DbError::NoRowsAffected)
    }

    /// Deletes the restaurant and, through the cascade, its reviews.
    pub async fn delete_restaurant(&self, id: i64) -> Result<(), DbError> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM restaurants WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(DbError::NoRowsAffected);
        }
        log!("[DB] Restaurant {} deleted", id);
        Ok(())
    }

    pub async fn get_review(&self, id: i64) -> Result<Option<Review>, DbError> {
        let conn = self.conn.lock().await;
        fetch_review(&conn, id)
    }

    pub async fn review_exists(&self, id: i64) -> Result<bool, DbError> {
        let conn = self.conn.lock().await;
        exists(&conn, "SELECT 1 FROM reviews WHERE id = ?", id)
    }

    /// Inserts a review by `owner` stamped with the current time.
    pub async fn insert_review(&self, review: &Review, owner: i64) -> Result<Review, DbError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        if !exists(&tx, "SELECT 1 FROM users WHERE id = ?", owner)? {
            return Err(DbError::UnknownUser(owner));
        }
        if !exists(&tx, "SELECT 1 FROM restaurants WHERE id = ?", review.restaurant_id)? {
            return Err(DbError::MissingRestaurant(review.restaurant_id));
        }

        let created_at = Utc::now();
        tx.execute(
            "INSERT INTO reviews (summary, body, stars, created_at, user_id, restaurant_id)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &review.summary,
                &review.body,
                review.stars,
                created_at,
                owner,
                review.restaurant_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log!(
            "[DB] Review {} created for restaurant {} by user {}",
            id,
            review.restaurant_id,
            owner
        );
        Ok(Review {
            id,
            created_at: Some(created_at),
            user_id: owner,
            user: None,
            ..review.clone()
        })
    }

    /// Replaces summary, body and stars. Owner, restaurant and creation time stay.
    pub async fn update_review(&self, review: &Review) -> Result<Review, DbError> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE reviews SET summary = ?, body = ?, stars = ? WHERE id = ?",
            params![&review.summary, &review.body, review.stars, review.id],
        )?;
        if changed == 0 {
            return Err(DbError::NoRowsAffected);
        }

        log!("[DB] Review {} updated", review.id);
        fetch_review(&conn, review.id)?.ok_or(DbError::NoRowsAffected)
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), DbError> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM reviews WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(DbError::NoRowsAffected);
        }
        log!("[DB] Review {} deleted", id);
        Ok(())
    }
}

fn exists(conn: &Connection, sql: &str, id: i64) -> Result<bool, DbError> {
    Ok(conn.query_row(sql, [id], |_| Ok(())).optional()?.is_some())
}

fn fetch_restaurant(conn: &Connection, id: i64) -> Result<Option<Restaurant>, DbError> {
    let restaurant = conn
        .query_row(
            &format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants r WHERE r.id = ?"),
            [id],
            restaurant_from_row,
        )
        .optional()?;
    Ok(restaurant)
}

fn fetch_review(conn: &Connection, id: i64) -> Result<Option<Review>, DbError> {
    let review = conn
        .query_row(
            &format!(
                "SELECT {REVIEW_COLUMNS}, u.id, u.full_name, u.email
                 FROM reviews v
                 JOIN users u ON u.id = v.user_id
                 WHERE v.id = ?"
            ),
            [id],
            review_with_user_from_row,
        )
        .optional()?;
    Ok(review)
}

fn restaurant_from_row(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    Ok(Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        address: row.get(3)?,
        telephone: row.get(4)?,
        user_id: row.get(5)?,
        reviews: Vec::new(),
    })
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        summary: row.get(1)?,
        body: row.get(2)?,
        stars: row.get(3)?,
        created_at: Some(row.get(4)?),
        user_id: row.get(5)?,
        restaurant_id: row.get(6)?,
        user: None,
    })
}

fn review_with_user_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    let mut review = review_from_row(row)?;
    review.user = Some(User {
        id: row.get(7)?,
        full_name: row.get(8)?,
        email: row.get(9)?,
    });
    Ok(review)
}
