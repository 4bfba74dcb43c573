//! Integration tests per gli endpoints delle destinazioni

mod common;

#[cfg(test)]
mod destination_tests {
    use super::common::*;
    use axum_test::http::{HeaderName, StatusCode};
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");

    // ============================================================
    // Test per GET /destinations - list_destinations
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_list_destinations_scoped(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/destinations")
            .add_header(AUTHORIZATION, bearer(BOB))
            .await;

        response.assert_status_ok();
        let page: Value = response.json();
        assert_eq!(page["count"], 2);
        let results = page["results"].as_array().expect("results");
        assert_eq!(results[0]["title"], "Lisbon");
        assert_eq!(results[0]["trip"], TRIP_PORTUGAL);
        assert_eq!(results[0]["id"], destination_uid(1).to_string());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_list_destinations_trip_filter(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get(&format!("/destinations?trip={}", TRIP_BERLIN))
            .add_header(AUTHORIZATION, bearer(ALICE))
            .await;
        response.assert_status_ok();
        let page: Value = response.json();
        assert_eq!(page["count"], 0);
        Ok(())
    }

    // ============================================================
    // Test per POST /destinations - create_destination
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_create_destination(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/destinations")
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({
                "trip": TRIP_PORTUGAL,
                "title": "Coimbra",
                "arrival_date": "2025-06-07",
                "departure_date": "2025-06-08"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let destination: Value = response.json();
        assert_eq!(destination["title"], "Coimbra");
        assert_eq!(destination["trip"], TRIP_PORTUGAL);
        assert!(destination["description"].is_null());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_create_destination_on_foreign_trip(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/destinations")
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({ "trip": TRIP_BERLIN, "title": "Potsdam" }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_create_destination_departure_before_arrival(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/destinations")
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({
                "trip": TRIP_PORTUGAL,
                "title": "Faro",
                "arrival_date": "2025-06-10",
                "departure_date": "2025-06-09"
            }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per GET/PUT/PATCH/DELETE /destinations/{uid}
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_get_destination_visibility(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let path = format!("/destinations/{}", destination_uid(3));

        server
            .get(&path)
            .add_header(AUTHORIZATION, bearer(DAVE))
            .await
            .assert_status_ok();
        server
            .get(&path)
            .add_header(AUTHORIZATION, bearer(ALICE))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_replace_destination(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put(&format!("/destinations/{}", destination_uid(1)))
            .add_header(AUTHORIZATION, bearer(BOB))
            .json(&json!({ "trip": TRIP_PORTUGAL, "title": "Lisboa" }))
            .await;

        response.assert_status_ok();
        let destination: Value = response.json();
        assert_eq!(destination["title"], "Lisboa");
        // PUT sostituisce tutto: i campi omessi tornano vuoti
        assert!(destination["description"].is_null());
        assert!(destination["arrival_date"].is_null());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_patch_destination(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let path = format!("/destinations/{}", destination_uid(1));

        let response = server
            .patch(&path)
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({ "description": "Pastéis de nata" }))
            .await;

        response.assert_status_ok();
        let destination: Value = response.json();
        assert_eq!(destination["title"], "Lisbon");
        assert_eq!(destination["description"], "Pastéis de nata");
        assert_eq!(destination["arrival_date"], "2025-06-01");

        // la nuova partenza precede l'arrivo corrente
        server
            .patch(&path)
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({ "departure_date": "2025-05-01" }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_patch_destination_to_foreign_trip(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .patch(&format!("/destinations/{}", destination_uid(1)))
            .add_header(AUTHORIZATION, bearer(ALICE))
            .json(&json!({ "trip": TRIP_BERLIN }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_delete_destination(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let path = format!("/destinations/{}", destination_uid(2));

        // un utente estraneo non può cancellare
        server
            .delete(&path)
            .add_header(AUTHORIZATION, bearer(DAVE))
            .await
            .assert_status_not_found();

        server
            .delete(&path)
            .add_header(AUTHORIZATION, bearer(ALICE))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&path)
            .add_header(AUTHORIZATION, bearer(ALICE))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "trips", "destinations")))]
    async fn test_destination_with_invalid_uid_is_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/destinations/not-a-uuid")
            .add_header(AUTHORIZATION, bearer(ALICE))
            .await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"], "Destination not found");
        Ok(())
    }
}
