//! Integration tests for the legacy event import endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, test_app};

    fn legacy_request(uri: &str, method: &str, body: Body) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    /// Tests the legacy list is empty when nothing was saved
    #[tokio::test]
    #[serial]
    async fn it_gets_empty_legacy_list() {
        let app = test_app().await;

        let response = app
            .oneshot(legacy_request("/api/calendar/legacy?user_id=user-1", "GET", Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_json(response.into_body()).await, json!([]));
    }

    /// Tests saved legacy events are imported once and then cleared
    #[tokio::test]
    #[serial]
    async fn it_migrates_legacy_events_once() {
        let app = test_app().await;

        let legacy = json!([
            {"id": "old-1", "title": "Study group", "date": "2025-09-12", "courseCode": "MATH135"},
            {"id": "old-2", "title": "Dentist", "date": "2025-10-02", "time": "10:00:00"}
        ]);
        let response = app
            .clone()
            .oneshot(legacy_request(
                "/api/calendar/legacy?user_id=user-1",
                "POST",
                Body::from(legacy.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(legacy_request(
                "/api/calendar/legacy/migrate?user_id=user-1",
                "POST",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_json(response.into_body()).await["migrated"], 2);

        // Imported rows keep their ids and have no recurrence
        let response = app
            .clone()
            .oneshot(legacy_request("/api/calendar/events?user_id=user-1", "GET", Body::empty()))
            .await
            .unwrap();
        let events = body_to_json(response.into_body()).await;
        assert_eq!(events[0]["id"], "old-1");
        assert_eq!(events[0]["course_code"], "MATH135");
        assert!(events[0]["recurrence"].is_null());
        assert_eq!(events[1]["id"], "old-2");
        assert_eq!(events[1]["time"], "10:00:00");

        // The side channel is now empty so a second run does nothing
        let response = app
            .clone()
            .oneshot(legacy_request(
                "/api/calendar/legacy/migrate?user_id=user-1",
                "POST",
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(body_to_json(response.into_body()).await["migrated"], 0);

        let response = app
            .oneshot(legacy_request("/api/calendar/legacy?user_id=user-1", "GET", Body::empty()))
            .await
            .unwrap();
        assert_eq!(body_to_json(response.into_body()).await, json!([]));
    }

    /// Tests saving a malformed legacy list returns 422
    #[tokio::test]
    #[serial]
    async fn it_returns_422_for_malformed_legacy_events() {
        let app = test_app().await;

        let response = app
            .oneshot(legacy_request(
                "/api/calendar/legacy?user_id=user-1",
                "POST",
                Body::from(json!([{"id": "old-1", "title": "No date"}]).to_string()),
            ))
            .await
            .unwrap();

        // Missing required field should return 422 (validation error)
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
