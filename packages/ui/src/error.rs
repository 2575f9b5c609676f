//! Error types for template rendering and handler assembly.

use apidocs_fs::FsError;

/// Failure to parse or render an entry-page template.
#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("template {template}:{line}: unclosed action")]
    Unclosed { template: String, line: usize },

    #[error("template {template}:{line}: unsupported action {{{{{action}}}}}")]
    BadAction {
        template: String,
        line: usize,
        action: String,
    },

    #[error("template {template}:{line}: no value for field {field}")]
    MissingField {
        template: String,
        line: usize,
        field: String,
    },
}

/// Why a Swagger UI handler could not be assembled.
///
/// Every variant means the bundled assets are unusable; none is transient.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("cannot open entry page: {0}")]
    Open(#[source] FsError),

    #[error("cannot read entry page {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("entry page {path} is a directory")]
    NotAFile { path: String },

    #[error("entry page {path} is not valid UTF-8")]
    NotUtf8 { path: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("entry page {path} must hold exactly one spec URL field, found {found}")]
    SpecUrlField { path: String, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn bad_action_shows_braces() {
        let e = TemplateError::BadAction {
            template: "index.html".to_string(),
            line: 4,
            action: "if .X".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "template index.html:4: unsupported action {{if .X}}"
        );
    }

    #[test]
    fn open_error_keeps_source() {
        let e = BuildError::Open(FsError::not_found("index.html"));
        assert!(e.to_string().contains("index.html"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn template_error_is_transparent() {
        let e: BuildError = TemplateError::Unclosed {
            template: "index.html".to_string(),
            line: 1,
        }
        .into();
        assert_eq!(e.to_string(), "template index.html:1: unclosed action");
    }
}
