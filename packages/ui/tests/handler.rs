use apidocs_fs::{FileMode, MemFs};
use apidocs_ui::{build, handler, try_build, BuildError, Handler, StripPrefix, SwaggerUi};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Request, StatusCode};

const PETSTORE: &str = "https://petstore.swagger.io/v2/swagger.json";
const SPEC_URL: &str = "https://example.com/api/openapi.json";

const UPSTREAM_INDEX: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <div id="swagger-ui"></div>
    <script>
      const ui = SwaggerUIBundle({
        url: "https://petstore.swagger.io/v2/swagger.json",
        dom_id: '#swagger-ui',
      });
    </script>
  </body>
</html>
"#;

const FAVICON: [u8; 10] = [137, 80, 78, 71, 13, 10, 26, 10, 0, 1];

fn base_tree() -> MemFs {
    MemFs::new()
        .with_file_info("index.html", UPSTREAM_INDEX, FileMode::new(0o644), None)
        .unwrap()
        .with_file("favicon.png", FAVICON.to_vec())
        .unwrap()
}

fn get<H: Handler>(h: &H, uri: &str) -> http::Response<apidocs_http::Bytes> {
    h.handle(&Request::get(uri).body(()).unwrap())
}

#[test]
fn end_to_end_scenario() {
    let docs = try_build(base_tree(), SPEC_URL).unwrap();

    let resp = get(&docs, "/index.html");
    assert_eq!(resp.status(), StatusCode::OK);
    let page = std::str::from_utf8(resp.body()).unwrap();
    assert!(page.contains(&format!("url: \"{}\"", SPEC_URL)));
    assert!(!page.contains(PETSTORE));
    assert_eq!(
        resp.headers()[CONTENT_LENGTH],
        resp.body().len().to_string().as_str()
    );
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");

    let resp = get(&docs, "/favicon.png");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body().as_ref(), &FAVICON[..]);
    assert_eq!(resp.headers()[CONTENT_LENGTH], "10");

    let resp = get(&docs, "/missing.js");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn only_the_field_value_changes() {
    let docs = try_build(base_tree(), SPEC_URL).unwrap();
    let page = get(&docs, "/index.html").into_body();
    let page = std::str::from_utf8(&page).unwrap().to_string();

    assert_eq!(page.matches(SPEC_URL).count(), 1);
    assert_eq!(page, UPSTREAM_INDEX.replace(PETSTORE, SPEC_URL));
}

#[test]
fn root_serves_rewritten_index() {
    let docs = try_build(base_tree(), SPEC_URL).unwrap();
    let root = get(&docs, "/").into_body();
    let index = get(&docs, "/index.html").into_body();
    assert_eq!(root, index);
}

#[test]
fn building_twice_serves_the_same_bytes() {
    let a: SwaggerUi<MemFs> = try_build(base_tree(), SPEC_URL).unwrap();
    let b: SwaggerUi<MemFs> = try_build(base_tree(), SPEC_URL).unwrap();
    for path in ["/", "/index.html", "/favicon.png", "/missing.js"] {
        let ra = get(&a, path);
        let rb = get(&b, path);
        assert_eq!(ra.status(), rb.status(), "{}", path);
        assert_eq!(ra.headers(), rb.headers(), "{}", path);
        assert_eq!(ra.body(), rb.body(), "{}", path);
    }
}

#[test]
fn base_tree_is_not_modified() {
    let docs = try_build(base_tree(), SPEC_URL).unwrap();
    let original = apidocs_fs::read_file(docs.fs().base(), "index.html").unwrap();
    assert_eq!(original, UPSTREAM_INDEX.as_bytes());
}

#[test]
fn missing_entry_page_is_a_build_error() {
    let tree = MemFs::new().with_file("favicon.png", FAVICON.to_vec()).unwrap();
    match try_build(tree, SPEC_URL) {
        Err(BuildError::Open(e)) => assert!(e.is_not_found()),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("built without an entry page"),
    }
}

#[test]
fn entry_page_directory_is_a_build_error() {
    let tree = MemFs::new().with_file("index.html/inner", "x").unwrap();
    assert!(matches!(
        try_build(tree, SPEC_URL),
        Err(BuildError::NotAFile { .. })
    ));
}

#[test]
fn malformed_template_is_a_build_error() {
    let tree = MemFs::new()
        .with_file("index.html", "url: \"{{.SwaggerURL\"")
        .unwrap();
    assert!(matches!(
        try_build(tree, SPEC_URL),
        Err(BuildError::Template(_))
    ));
}

#[test]
#[should_panic(expected = "swagger-ui assets are unusable")]
fn build_panics_on_bad_assets() {
    let _ = build(MemFs::new(), SPEC_URL);
}

#[test]
fn bundled_handler() {
    let docs = handler(SPEC_URL);

    let resp = get(&docs, "/index.html");
    assert_eq!(resp.status(), StatusCode::OK);
    let page = std::str::from_utf8(resp.body()).unwrap();
    assert!(page.contains(&format!("url: \"{}\"", SPEC_URL)));
    assert!(!page.contains("{{"));

    let resp = get(&docs, "/oauth2-redirect.html");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.body().as_ref(),
        include_bytes!("../embed/oauth2-redirect.html")
    );
}

/// Values of every `href="..."` and `src="..."` attribute in `page`.
fn linked_assets(page: &str) -> Vec<String> {
    let mut found = Vec::new();
    for attr in ["href=\"", "src=\""] {
        for (at, _) in page.match_indices(attr) {
            let rest = &page[at + attr.len()..];
            if let Some(end) = rest.find('"') {
                found.push(rest[..end].to_string());
            }
        }
    }
    found
}

#[test]
fn bundled_page_assets_are_served() {
    let docs = handler(SPEC_URL);
    let page = get(&docs, "/").into_body();
    let page = std::str::from_utf8(&page).unwrap().to_string();

    let assets = linked_assets(&page);
    for expected in [
        "./swagger-ui.css",
        "./swagger-ui-bundle.js",
        "./swagger-ui-standalone-preset.js",
        "./favicon-32x32.png",
        "./favicon-16x16.png",
    ] {
        assert!(assets.iter().any(|a| a == expected), "{} not linked", expected);
    }

    for asset in &assets {
        let uri = format!("/{}", asset.trim_start_matches("./"));
        let resp = get(&docs, &uri);
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        assert!(!resp.body().is_empty(), "{}", uri);
    }

    let resp = get(&docs, "/swagger-ui-bundle.js");
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/javascript; charset=utf-8");
    let resp = get(&docs, "/swagger-ui.css");
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/css; charset=utf-8");
}

#[test]
fn bundled_handler_under_prefix() {
    let docs = StripPrefix::new("/docs", handler(SPEC_URL));
    let resp = get(&docs, "/docs/");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(std::str::from_utf8(resp.body()).unwrap().contains(SPEC_URL));
    assert_eq!(get(&docs, "/index.html").status(), StatusCode::NOT_FOUND);
}
