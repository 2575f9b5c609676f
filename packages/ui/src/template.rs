//! Minimal text templates with `{{.Field}}` actions.
//!
//! Text outside actions is copied byte-for-byte. Field values are inserted
//! verbatim, with no escaping.

use std::collections::HashMap;

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field { name: String, line: usize },
}

/// A parsed template.
///
/// ```rust
/// use std::collections::HashMap;
/// use apidocs_ui::Template;
///
/// let t = Template::parse("page", r#"url: "{{ .SwaggerURL }}""#).unwrap();
/// let values = HashMap::from([("SwaggerURL", "/openapi.json")]);
/// assert_eq!(t.execute(&values).unwrap(), r#"url: "/openapi.json""#);
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `src`. `name` only appears in error messages.
    pub fn parse(name: &str, src: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = src;
        let mut consumed = 0;

        while let Some(open) = rest.find("{{") {
            let line = 1 + src[..consumed + open].matches('\n').count();
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_string()));
            }

            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(TemplateError::Unclosed {
                    template: name.to_string(),
                    line,
                });
            };

            let action = after_open[..close].trim();
            let field = parse_field(action).ok_or_else(|| TemplateError::BadAction {
                template: name.to_string(),
                line,
                action: action.to_string(),
            })?;
            segments.push(Segment::Field {
                name: field.to_string(),
                line,
            });

            let advance = open + 2 + close + 2;
            consumed += advance;
            rest = &rest[advance..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field references in order of appearance, repeats included.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field { name, .. } => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// How many times `field` is referenced.
    pub fn field_count(&self, field: &str) -> usize {
        self.fields().filter(|f| *f == field).count()
    }

    /// Render with `values`. Every referenced field must have a value.
    pub fn execute(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { name, line } => {
                    let value = values.get(name.as_str()).ok_or_else(|| {
                        TemplateError::MissingField {
                            template: self.name.clone(),
                            line: *line,
                            field: name.clone(),
                        }
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// `.Name` with an identifier after the dot.
fn parse_field(action: &str) -> Option<&str> {
    let ident = action.strip_prefix('.')?;
    let mut chars = ident.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(ident)
}
