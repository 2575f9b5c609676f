//! Build a handler that serves Swagger UI for a given spec URL.

use std::collections::HashMap;
use std::io::Read;

use apidocs_fs::{EmbeddedFs, Fs, OverlayFs, ReplacementEntry};
use apidocs_http::FileServer;
use include_dir::{include_dir, Dir};

use crate::error::BuildError;
use crate::template::Template;

/// Path of the entry page inside the asset tree.
pub const ENTRY_PAGE: &str = "index.html";

/// Template field the spec URL is written to.
pub const SPEC_URL_FIELD: &str = "SwaggerURL";

/// Field of an unprocessed upstream entry page that holds the spec URL.
const URL_FIELD_ANCHOR: &str = "url: \"";

static BUNDLE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/embed");

const BUNDLE_VERSION: &str = include_str!("../current_version.txt");

/// The Swagger UI handler: a file server over the assets with the entry page
/// rewritten.
pub type SwaggerUi<F> = FileServer<OverlayFs<F>>;

/// The asset tree compiled into this crate.
pub fn assets() -> EmbeddedFs {
    EmbeddedFs::new(&BUNDLE)
}

/// Upstream release the bundled assets were taken from.
pub fn asset_version() -> &'static str {
    BUNDLE_VERSION.trim()
}

/// Render the entry page so that its spec URL field holds `spec_url`.
///
/// A page prepared by the asset refresh tool carries a single
/// `{{.SwaggerURL}}` action. A page with no actions at all is treated as an
/// upstream original and the value of its single `url: "..."` field is
/// replaced. Anything else is an error.
pub fn render_entry_page(page: &str, spec_url: &str) -> Result<String, BuildError> {
    let template = Template::parse(ENTRY_PAGE, page)?;

    match template.field_count(SPEC_URL_FIELD) {
        1 => {
            let values = HashMap::from([(SPEC_URL_FIELD, spec_url)]);
            Ok(template.execute(&values)?)
        }
        0 if template.fields().next().is_none() => replace_url_field(page, spec_url),
        found => Err(BuildError::SpecUrlField {
            path: ENTRY_PAGE.to_string(),
            found,
        }),
    }
}

fn replace_url_field(page: &str, spec_url: &str) -> Result<String, BuildError> {
    let field_error = |found| BuildError::SpecUrlField {
        path: ENTRY_PAGE.to_string(),
        found,
    };

    let found = page.matches(URL_FIELD_ANCHOR).count();
    let start = match (found, page.find(URL_FIELD_ANCHOR)) {
        (1, Some(at)) => at + URL_FIELD_ANCHOR.len(),
        _ => return Err(field_error(found)),
    };
    let end = page[start..]
        .find('"')
        .map(|len| start + len)
        .ok_or_else(|| field_error(0))?;

    let mut out = String::with_capacity(page.len() - (end - start) + spec_url.len());
    out.push_str(&page[..start]);
    out.push_str(spec_url);
    out.push_str(&page[end..]);
    Ok(out)
}

/// Assemble the handler over `base`, reporting bad assets as an error.
pub fn try_build<F: Fs>(base: F, spec_url: &str) -> Result<SwaggerUi<F>, BuildError> {
    let mut index = base.open(ENTRY_PAGE).map_err(BuildError::Open)?;
    let info = index.stat().map_err(BuildError::Open)?;
    if info.is_dir() {
        return Err(BuildError::NotAFile {
            path: ENTRY_PAGE.to_string(),
        });
    }

    let mut raw = Vec::new();
    index
        .read_to_end(&mut raw)
        .map_err(|source| BuildError::Read {
            path: ENTRY_PAGE.to_string(),
            source,
        })?;
    let page = String::from_utf8(raw).map_err(|_| BuildError::NotUtf8 {
        path: ENTRY_PAGE.to_string(),
    })?;

    let rendered = render_entry_page(&page, spec_url)?;
    tracing::debug!(
        spec_url,
        original_size = info.size(),
        rendered_size = rendered.len(),
        "rendered swagger-ui entry page"
    );

    let overlay = OverlayFs::new(base)
        .with_replacement(ENTRY_PAGE, ReplacementEntry::new(info, rendered));
    Ok(FileServer::new(overlay))
}

/// Assemble the handler over `base`.
///
/// # Panics
///
/// If the entry page is missing or cannot be rendered. The assets are fixed
/// at build time, so this is a packaging defect rather than a runtime
/// condition.
pub fn build<F: Fs>(base: F, spec_url: &str) -> SwaggerUi<F> {
    match try_build(base, spec_url) {
        Ok(handler) => handler,
        Err(e) => panic!("swagger-ui assets are unusable: {}", e),
    }
}

/// Handler serving the bundled Swagger UI, pointed at `spec_url`.
///
/// Mount it wherever the documentation should live, e.g. with
/// [`apidocs_http::StripPrefix`].
///
/// # Panics
///
/// If the bundled entry page is missing or malformed.
pub fn handler(spec_url: &str) -> SwaggerUi<EmbeddedFs> {
    build(assets(), spec_url)
}
