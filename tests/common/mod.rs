#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::SqlitePool;
use std::sync::Arc;
use trip_planner::core::{AppState, encode_jwt};
use uuid::Uuid;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

// Dati dei fixture (vedi fixtures/*.sql)
pub const ALICE: (i64, &str) = (1, "alice@example.com"); // owner trip 1
pub const BOB: (i64, &str) = (2, "bob@example.com"); // membro trip 1
pub const CAROL: (i64, &str) = (3, "carol@example.com"); // invitata a trip 1 e 2
pub const DAVE: (i64, &str) = (4, "dave@example.com"); // owner trip 2
pub const STAFF: (i64, &str) = (5, "staff@example.com");

pub const TRIP_PORTUGAL: &str = "11111111-1111-4111-8111-111111111111";
pub const TRIP_BERLIN: &str = "22222222-2222-4222-8222-222222222222";

/// Uid dell'invito N dei fixture
/// 1: trip 1 -> carol (pending), 2: trip 1 -> erin (accepted), 3: trip 1 -> frank (cancelled),
/// 4: trip 2 -> carol (pending), 5: trip 1 -> bob (pending, già membro)
pub fn invite_uid(n: u8) -> Uuid {
    Uuid::parse_str(&format!("aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaa{}", n)).expect("valid uuid")
}

/// Uid della destinazione N dei fixture: 1 Lisbon, 2 Porto (trip 1), 3 Berlin (trip 2)
pub fn destination_uid(n: u8) -> Uuid {
    Uuid::parse_str(&format!("dddddddd-dddd-4ddd-8ddd-dddddddddd0{}", n)).expect("valid uuid")
}

/// Crea un AppState per i test
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, JWT_SECRET.to_string()))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = trip_planner::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token valido per 24 ore
pub fn create_test_jwt(user_id: i64, email: &str, jwt_secret: &str) -> String {
    encode_jwt(email.to_string(), user_id, jwt_secret).expect("Failed to create JWT token")
}

/// Valore dell'header Authorization per un utente dei fixture
pub fn bearer(user: (i64, &str)) -> String {
    format!("Bearer {}", create_test_jwt(user.0, user.1, JWT_SECRET))
}
