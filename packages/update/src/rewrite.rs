//! Turn the upstream entry page into a template.
//!
//! Older releases configure the UI in an inline script of `index.html`.
//! Newer ones load it from `swagger-initializer.js`; that script is inlined
//! first so the entry page stays the only file that names the spec URL.

use std::fs;
use std::io;
use std::path::Path;

use apidocs_ui::{render_entry_page, SPEC_URL_FIELD};

use crate::error::UpdateError;

/// The spec URL field as shipped in upstream `dist/index.html`.
pub const UPSTREAM_URL_FIELD: &str = r#"url: "https://petstore.swagger.io/v2/swagger.json""#;

/// Script that holds the UI configuration in newer releases.
pub const INITIALIZER: &str = "swagger-initializer.js";

/// How upstream `index.html` loads [`INITIALIZER`].
pub const INITIALIZER_TAG: &str =
    r#"<script src="./swagger-initializer.js" charset="UTF-8"> </script>"#;

/// The field as it must read in the bundled page.
pub fn template_url_field() -> String {
    format!("url: \"{{{{.{}}}}}\"", SPEC_URL_FIELD)
}

/// Replace the single upstream petstore URL field of `page` with the
/// template action. `path` only labels errors.
pub fn rewrite_entry_page(page: &str, path: &Path) -> Result<String, UpdateError> {
    let found = page.matches(UPSTREAM_URL_FIELD).count();
    if found != 1 {
        return Err(UpdateError::Anchor {
            path: path.to_path_buf(),
            anchor: UPSTREAM_URL_FIELD.to_string(),
            found,
        });
    }

    let rewritten = page.replacen(UPSTREAM_URL_FIELD, &template_url_field(), 1);

    // Must be accepted by the handler that will serve it.
    render_entry_page(&rewritten, "/openapi.json")?;
    Ok(rewritten)
}

/// Replace the single tag loading the initializer with an inline script.
pub fn inline_initializer(page: &str, script: &str, path: &Path) -> Result<String, UpdateError> {
    let found = page.matches(INITIALIZER_TAG).count();
    if found != 1 {
        return Err(UpdateError::Anchor {
            path: path.to_path_buf(),
            anchor: INITIALIZER_TAG.to_string(),
            found,
        });
    }
    Ok(page.replacen(INITIALIZER_TAG, &format!("<script>\n{}</script>", script), 1))
}

/// Turn `<dir>/<entry>` into the bundled template, folding in the
/// initializer script when the release ships one.
pub fn prepare_entry_page(dir: &Path, entry: &str) -> Result<(), UpdateError> {
    let path = dir.join(entry);
    let mut page = fs::read_to_string(&path).map_err(|e| UpdateError::io("read", &path, e))?;

    let initializer = dir.join(INITIALIZER);
    let script = match fs::read_to_string(&initializer) {
        Ok(script) => Some(script),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(UpdateError::io("read", &initializer, e)),
    };
    if let Some(script) = &script {
        page = inline_initializer(&page, script, &path)?;
        tracing::debug!(script = INITIALIZER, "inlined initializer");
    }

    let rewritten = rewrite_entry_page(&page, &path)?;
    fs::write(&path, rewritten).map_err(|e| UpdateError::io("write", &path, e))?;
    if script.is_some() {
        fs::remove_file(&initializer).map_err(|e| UpdateError::io("remove", &initializer, e))?;
    }
    tracing::debug!(path = %path.display(), "rewrote entry page");
    Ok(())
}
