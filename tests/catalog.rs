#[macro_use]
mod common;

use actix_web::http::{header, Method, StatusCode};
use actix_web::test::{self, TestRequest};
use common::*;
use essentia::models::{Product, ProductResponse, UploadResponse};
use futures::future::join_all;
use serde_json::{json, Value};

const BOUNDARY: &str = "essentia-boundary";

fn multipart_request(field: &str, file_name: &str, contents: &[u8]) -> TestRequest {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri("/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn root_says_welcome() {
    let state = test_state();
    let app = test_app!(state);

    let body = test::call_and_read_body(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(body, "Welcome to Essentia");
}

#[actix_web::test]
async fn browser_preflight_is_allowed() {
    let state = test_state();
    let app = test_app!(state);

    for path in ["/login", "/addtocart"] {
        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .uri(path)
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "content-type, auth-token",
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "preflight for {path}");
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    let req = TestRequest::get()
        .uri("/allproducts")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_web::test]
async fn product_ids_start_at_one_and_increase() {
    let state = test_state();
    let app = test_app!(state);

    let added: ProductResponse =
        test::call_and_read_body_json(&app, add_product_request("Blouse", "women").to_request())
            .await;
    assert!(added.success);
    assert_eq!(added.name, "Blouse");
    test::call_service(&app, add_product_request("Jacket", "men").to_request()).await;

    let products: Vec<Product> =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/allproducts").to_request())
            .await;
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(products.iter().all(|p| p.available));
}

#[actix_web::test]
async fn concurrent_product_creation_assigns_unique_ids() {
    let state = test_state();
    let app = test_app!(state);

    let requests = (0..20).map(|i| {
        test::call_service(&app, add_product_request(&format!("item-{i}"), "kid").to_request())
    });
    for resp in join_all(requests).await {
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let products: Vec<Product> =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/allproducts").to_request())
            .await;
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[actix_web::test]
async fn invalid_product_is_rejected() {
    let state = test_state();
    let app = test_app!(state);

    let req = TestRequest::post()
        .uri("/add-product")
        .set_json(json!({
            "name": "Broken",
            "image": "",
            "category": "women",
            "new_price": -1.0,
            "old_price": 5.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::post()
        .uri("/add-product")
        .set_json(json!({
            "name": "No picture",
            "image": "  ",
            "category": "women",
            "new_price": 10.0,
            "old_price": 15.0,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::post()
        .uri("/add-product")
        .set_json(json!({ "name": "Missing fields" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn delete_product_returns_name_then_not_found() {
    let state = test_state();
    let app = test_app!(state);
    test::call_service(&app, add_product_request("Blouse", "women").to_request()).await;

    let delete = || {
        TestRequest::post()
            .uri("/delete-product")
            .set_json(json!({ "id": 1 }))
            .to_request()
    };
    let removed: ProductResponse = test::call_and_read_body_json(&app, delete()).await;
    assert!(removed.success);
    assert_eq!(removed.name, "Blouse");

    let resp = test::call_service(&app, delete()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn new_collection_skips_first_and_returns_eight() {
    let state = test_state();
    let app = test_app!(state);
    for i in 1..=10 {
        test::call_service(&app, add_product_request(&format!("p{i}"), "men").to_request()).await;
    }

    let picked: Vec<Product> =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/newcollection").to_request())
            .await;
    let ids: Vec<i64> = picked.iter().map(|p| p.id).collect();
    assert_eq!(ids, (3..=10).collect::<Vec<_>>());
}

#[actix_web::test]
async fn popular_in_women_returns_first_four_of_category() {
    let state = test_state();
    let app = test_app!(state);
    for (i, category) in ["women", "men", "women", "women", "kid", "women", "women"]
        .iter()
        .enumerate()
    {
        test::call_service(&app, add_product_request(&format!("p{i}"), category).to_request())
            .await;
    }

    let picked: Vec<Product> =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/popularinwomen").to_request())
            .await;
    let ids: Vec<i64> = picked.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 6]);
    assert!(picked.iter().all(|p| p.category == "women"));
}

#[actix_web::test]
async fn uploaded_image_is_served_back() {
    let state = test_state();
    let app = test_app!(state);
    let contents = b"\x89PNG fake image bytes";

    let uploaded: UploadResponse =
        test::call_and_read_body_json(&app, multipart_request("product", "shirt.png", contents).to_request())
            .await;
    assert!(uploaded.success);
    let path = uploaded
        .image_url
        .strip_prefix(BASE_URL)
        .expect("image url uses the public base url");
    assert!(path.starts_with("/images/product-"));
    assert!(path.ends_with(".png"));

    let served = test::call_and_read_body(&app, TestRequest::get().uri(path).to_request()).await;
    assert_eq!(&served[..], &contents[..]);
}

#[actix_web::test]
async fn back_to_back_uploads_keep_their_own_bytes() {
    let state = test_state();
    let app = test_app!(state);

    for round in 0..20 {
        let first_bytes = format!("first-{round}");
        let second_bytes = format!("second-{round}");
        let first: UploadResponse = test::call_and_read_body_json(
            &app,
            multipart_request("product", "a.png", first_bytes.as_bytes()).to_request(),
        )
        .await;
        let second: UploadResponse = test::call_and_read_body_json(
            &app,
            multipart_request("product", "a.png", second_bytes.as_bytes()).to_request(),
        )
        .await;
        assert_ne!(first.image_url, second.image_url);

        for (uploaded, bytes) in [(&first, &first_bytes), (&second, &second_bytes)] {
            let path = uploaded.image_url.strip_prefix(BASE_URL).unwrap();
            let served =
                test::call_and_read_body(&app, TestRequest::get().uri(path).to_request()).await;
            assert_eq!(&served[..], bytes.as_bytes());
        }
    }
}

#[actix_web::test]
async fn upload_without_product_field_is_rejected() {
    let state = test_state();
    let app = test_app!(state);

    let resp =
        test::call_service(&app, multipart_request("avatar", "me.png", b"data").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn oversized_upload_is_rejected() {
    let state = test_state();
    let app = test_app!(state);

    // The test state caps uploads at 1 KiB.
    let big = vec![0u8; 4096];
    let resp =
        test::call_service(&app, multipart_request("product", "big.png", &big).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
