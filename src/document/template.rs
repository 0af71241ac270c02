//! HTML template loading and placeholder substitution.
//!
//! Templates are trusted static files containing `{{ name }}` placeholders.
//! Substitution is literal: values are HTML-escaped and nothing in the
//! template is evaluated.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::common::{escape_html, format_indian_date, format_inr, format_number};
use crate::deed::models::Deed;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid");
}

/// Named values substituted into a template.
pub type TemplateContext = BTreeMap<&'static str, String>;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the template source at `path`.
pub async fn load_template(path: &Path) -> Result<String, TemplateError> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(source),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TemplateError::NotFound(path.to_path_buf())),
        Err(source) => Err(TemplateError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Substitute every placeholder in `template` with its escaped value.
///
/// Placeholders with no value in `context` render as the empty string.
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match context.get(name) {
                Some(value) => escape_html(value),
                None => {
                    log::warn!("Template placeholder '{}' has no value", name);
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Build the template context for a stored deed.
pub fn deed_context(deed: &Deed) -> TemplateContext {
    let mut context = TemplateContext::new();
    context.insert("deedId", deed.id.to_string());
    context.insert("fullName", deed.full_name.clone());
    context.insert("fatherName", deed.father_name.clone());
    context.insert("propertySize", format_number(deed.property_size));
    context.insert("saleAmount", format_number(deed.sale_amount));
    context.insert("saleAmountInr", format_inr(deed.sale_amount));
    context.insert("date", format_indian_date(deed.sale_date));
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn sample_deed() -> Deed {
        let now = Utc::now();
        Deed {
            id: Uuid::new_v4(),
            full_name: "Ravi Kumar".to_string(),
            father_name: "Mohan Kumar".to_string(),
            property_size: 1200.0,
            sale_amount: 2500000.0,
            sale_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut context = TemplateContext::new();
        context.insert("fullName", "Ravi".to_string());
        context.insert("date", "15/1/2025".to_string());

        let html = render_template("<p>{{fullName}} on {{ date }}</p>", &context);
        assert_eq!(html, "<p>Ravi on 15/1/2025</p>");
    }

    #[test]
    fn test_render_escapes_values() {
        let mut context = TemplateContext::new();
        context.insert("fullName", "<script>alert('x')</script>".to_string());

        let html = render_template("<p>{{fullName}}</p>", &context);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_does_not_evaluate_template_syntax() {
        let mut context = TemplateContext::new();
        context.insert("fullName", "{{fatherName}}".to_string());
        context.insert("fatherName", "Mohan".to_string());

        let html = render_template("{{#if fullName}}{{fullName}}{{/if}}", &context);
        assert_eq!(html, "{{#if fullName}}{{fatherName}}{{/if}}");
    }

    #[test]
    fn test_unknown_placeholder_renders_empty() {
        let html = render_template("a{{ missing }}b", &TemplateContext::new());
        assert_eq!(html, "ab");
    }

    #[test]
    fn test_deed_context_fields() {
        let deed = sample_deed();
        let context = deed_context(&deed);

        assert_eq!(context["fullName"], "Ravi Kumar");
        assert_eq!(context["fatherName"], "Mohan Kumar");
        assert_eq!(context["propertySize"], "1200");
        assert_eq!(context["saleAmount"], "2500000");
        assert_eq!(context["saleAmountInr"], "₹25,00,000");
        assert_eq!(context["date"], "15/1/2025");
        assert_eq!(context["deedId"], deed.id.to_string());
    }

    #[tokio::test]
    async fn test_load_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.html");

        let result = load_template(&path).await;
        assert!(matches!(result, Err(TemplateError::NotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_bundled_template_renders_all_fields() {
        let path = super::super::common::get_templates_dir().join("deed_template.html");
        let source = load_template(&path).await.unwrap();
        let html = render_template(&source, &deed_context(&sample_deed()));

        assert!(html.contains("Ravi Kumar"));
        assert!(html.contains("Mohan Kumar"));
        assert!(html.contains("₹25,00,000"));
        assert!(html.contains("15/1/2025"));
        assert!(!PLACEHOLDER.is_match(&html));
    }
}
