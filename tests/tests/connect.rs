use ottoman::Db;

#[tokio::test]
async fn urls_with_an_http_scheme_select_the_couchdb_driver() {
    // Connecting builds a client; no request is made until an operation
    // runs.
    let db = Db::builder().connect("http://localhost:5984/app").await;
    assert!(db.is_ok());
}

#[tokio::test]
async fn unknown_schemes_are_rejected() {
    let err = Db::builder()
        .connect("redis://localhost/app")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unsupported store"));
}

#[tokio::test]
async fn connection_urls_must_name_a_database() {
    assert!(Db::builder().connect("http://localhost:5984").await.is_err());
}
