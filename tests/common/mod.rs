#![allow(dead_code)]

use leptos::logging::log;
use taco_tuesday::auth::TokenKeys;
use taco_tuesday::db::Database;
use taco_tuesday::models::user::User;

pub const SECRET: &str = "integration-test-secret";

/// Builds the API service over the fixture's database and keys.
#[macro_export]
macro_rules! test_app {
    ($fixture:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($fixture.db.clone()))
                .app_data(actix_web::web::Data::new($fixture.keys.clone()))
                .configure(taco_tuesday::api::configure),
        )
        .await
    };
}

pub struct Fixture {
    pub db: Database,
    pub keys: TokenKeys,
    pub owner: User,
    pub stranger: User,
}

impl Fixture {
    pub async fn new() -> Self {
        log!("[TEST] Creating in-memory test database");
        let db = Database::new(":memory:").unwrap();
        db.create_schema().await.unwrap();

        let owner = db
            .create_user("Gavin Stark", "gavin@example.com", "hashed")
            .await
            .unwrap();
        let stranger = db
            .create_user("Steve Jobs", "steve@example.com", "hashed")
            .await
            .unwrap();

        Fixture {
            db,
            keys: TokenKeys::new(SECRET),
            owner,
            stranger,
        }
    }

    pub fn bearer(&self, user_id: i64) -> (&'static str, String) {
        let token = self.keys.issue(user_id, 3600).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }
}
