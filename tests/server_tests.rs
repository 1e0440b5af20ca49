//! # Upload Server Tests
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.


#[cfg(test)]
mod tests {
    use super::test_helpers::{
        config_for, multipart_body, multipart_content_type, solid_png, static_dir_with_tier_images,
        Part, HAIR_PIXEL, SCALP_PIXEL,
    };
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use scalp_meter::server::build_router;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> (Router, tempfile::TempDir) {
        let dir = static_dir_with_tier_images();
        let router = build_router(&config_for(&dir));
        (router, dir)
    }

    fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(header::CONTENT_TYPE, multipart_content_type())
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn json_body(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn assert_error(response: Response, status: StatusCode, message: &str) {
        assert_eq!(response.status(), status);
        assert_eq!(json_body(response).await["error"], message);
    }

    /// Index page is served as HTML with the upload form
    #[tokio::test]
    async fn test_index_page() {
        let (app, _dir) = router();
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("name=\"photo\""));
        assert!(html.contains("name=\"hair_color\""));
        for category in ["black", "dark_brown", "light_brown", "dyed"] {
            assert!(html.contains(&format!("value=\"{}\"", category)));
        }
    }

    /// Fully scalp-colored upload returns the top tier record
    #[tokio::test]
    async fn test_upload_full_scalp() {
        let (app, _dir) = router();
        let photo = solid_png(60, 40, SCALP_PIXEL);

        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", &photo),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 100);
        assert!(body["grade"].as_str().unwrap().starts_with("[5단계]"));
        assert_eq!(body["image_url"], "/static/img/rank5.png");
        assert_eq!(body["quote"], "해탈의 경지에 오르셨군요.");
        assert!(body["comment"].is_string());
    }

    /// Hair-only upload returns the bottom tier record
    #[tokio::test]
    async fn test_upload_no_scalp() {
        let (app, _dir) = router();
        let photo = solid_png(60, 40, HAIR_PIXEL);

        let response = app
            .oneshot(upload_request(&[
                Part::text("hair_color", "light_brown"),
                Part::file("photo", "head.png", &photo),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 0);
        assert_eq!(body["image_url"], "/static/img/rank1.png");
    }

    #[tokio::test]
    async fn test_upload_without_photo_part() {
        let (app, _dir) = router();
        let response = app
            .oneshot(upload_request(&[Part::text("hair_color", "black")]))
            .await
            .unwrap();

        assert_error(response, StatusCode::BAD_REQUEST, "No file part").await;
    }

    /// A text field named `photo` is not a file part
    #[tokio::test]
    async fn test_upload_with_text_photo_field() {
        let (app, _dir) = router();
        let response = app
            .oneshot(upload_request(&[
                Part::text("photo", "not a file"),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(response, StatusCode::BAD_REQUEST, "No file part").await;
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename() {
        let (app, _dir) = router();
        let photo = solid_png(10, 10, SCALP_PIXEL);
        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "", &photo),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(response, StatusCode::BAD_REQUEST, "No selected file").await;
    }

    #[tokio::test]
    async fn test_upload_without_hair_color() {
        let (app, _dir) = router();
        let photo = solid_png(10, 10, SCALP_PIXEL);

        let response = app
            .clone()
            .oneshot(upload_request(&[Part::file("photo", "head.png", &photo)]))
            .await
            .unwrap();
        assert_error(response, StatusCode::BAD_REQUEST, "Invalid request").await;

        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", &photo),
                Part::text("hair_color", ""),
            ]))
            .await
            .unwrap();
        assert_error(response, StatusCode::BAD_REQUEST, "Invalid request").await;
    }

    #[tokio::test]
    async fn test_upload_with_empty_photo_bytes() {
        let (app, _dir) = router();
        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", b""),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(response, StatusCode::BAD_REQUEST, "Invalid request").await;
    }

    #[tokio::test]
    async fn test_upload_without_multipart_body() {
        let (app, _dir) = router();
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"photo\": \"x\"}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_error(response, StatusCode::BAD_REQUEST, "Invalid request").await;
    }

    /// Undecodable photo is reported as a generic analysis failure
    #[tokio::test]
    async fn test_upload_undecodable_photo() {
        let (app, _dir) = router();
        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", b"this is plainly not an image"),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image analysis failed",
        )
        .await;
    }

    /// Analysis that runs past its time limit is a generic analysis failure
    #[tokio::test]
    async fn test_upload_analysis_timeout() {
        let dir = static_dir_with_tier_images();
        let mut config = config_for(&dir);
        config.analysis.timeout_secs = 0;
        let app = build_router(&config);

        let photo = solid_png(1500, 1500, SCALP_PIXEL);
        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", &photo),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(
            response,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image analysis failed",
        )
        .await;
    }

    #[tokio::test]
    async fn test_upload_over_size_limit() {
        let dir = static_dir_with_tier_images();
        let mut config = config_for(&dir);
        config.analysis.max_upload_bytes = 1024;
        let app = build_router(&config);

        let photo = vec![0x42u8; 4096];
        let response = app
            .oneshot(upload_request(&[
                Part::file("photo", "head.png", &photo),
                Part::text("hair_color", "black"),
            ]))
            .await
            .unwrap();

        assert_error(response, StatusCode::PAYLOAD_TOO_LARGE, "File too large").await;
    }

    #[tokio::test]
    async fn test_static_image_served() {
        let (app, _dir) = router();
        let response = app
            .oneshot(
                Request::get("/static/img/rank3.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = body_bytes(response).await;
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[tokio::test]
    async fn test_static_image_missing_or_unsafe() {
        let (app, _dir) = router();

        for uri in [
            "/static/img/rank9.png",
            "/static/img/..%2F..%2Fetc%2Fpasswd",
            "/static/img/%2e%2e",
        ] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        }
    }

    #[tokio::test]
    async fn test_cors_headers_on_every_response() {
        let (app, _dir) = router();

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let response = app
            .clone()
            .oneshot(upload_request(&[Part::text("hair_color", "black")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let response = app
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (app, _dir) = router();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/upload")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .contains("POST"));
    }
}
