//! Minification through HTTP services.
//!
//! JavaScript goes to a Closure Compiler compatible endpoint, CSS to a
//! `cssminifier.com` compatible endpoint. Both are plain form POSTs that
//! answer with the minified text. HTML is always minified locally.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;

use super::{Minifier, MinifyError, html::minify_html};
use crate::config::MinifyConfig;
use crate::core::ContentKind;

/// Service error bodies, e.g. `Error(22): Too many compiles performed recently.`
static ERROR_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^\s*(?://\s*)?Error\s*(?:\(\d+\))?\s*:").expect("valid regex")
});

/// Minifier that delegates JS and CSS to remote services.
#[derive(Debug, Clone)]
pub struct RemoteMinifier {
    client: Client,
    js_url: String,
    css_url: String,
    compilation_level: String,
}

impl RemoteMinifier {
    /// Build a client with the configured request timeout.
    pub fn new(config: &MinifyConfig) -> Result<Self, MinifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|source| MinifyError::Request {
                url: config.js_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            js_url: config.js_url.clone(),
            css_url: config.css_url.clone(),
            compilation_level: config.js_compilation_level.clone(),
        })
    }

    fn post(&self, url: &str, form: &[(&str, &str)]) -> Result<String, MinifyError> {
        let request_error = |source| MinifyError::Request {
            url: url.to_owned(),
            source,
        };
        self.client
            .post(url)
            .form(form)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(request_error)
    }

    fn minify_js(&self, source: &str) -> Result<String, MinifyError> {
        let body = self.post(
            &self.js_url,
            &[
                ("js_code", source),
                ("compilation_level", &self.compilation_level),
                ("output_format", "text"),
                ("output_info", "compiled_code"),
            ],
        )?;
        validate_response(&self.js_url, source, body)
    }

    fn minify_css(&self, source: &str) -> Result<String, MinifyError> {
        let body = self.post(&self.css_url, &[("input", source)])?;
        validate_response(&self.css_url, source, body)
    }
}

impl Minifier for RemoteMinifier {
    fn minify(&self, kind: ContentKind, source: &str) -> Result<String, MinifyError> {
        match kind {
            ContentKind::Js => self.minify_js(source),
            ContentKind::Css => self.minify_css(source),
            ContentKind::Html => minify_html(source),
            _ => Ok(source.to_owned()),
        }
    }
}

/// Reject bodies that cannot be minified source.
///
/// An empty body for non-empty input means the service dropped the code
/// (Closure reports compile errors this way with `output_info=compiled_code`).
pub fn validate_response(url: &str, input: &str, body: String) -> Result<String, MinifyError> {
    if body.trim().is_empty() && !input.trim().is_empty() {
        return Err(MinifyError::EmptyResponse { url: url.to_owned() });
    }
    if ERROR_PAYLOAD.is_match(&body) {
        let payload = body.lines().next().unwrap_or_default().trim().to_owned();
        return Err(MinifyError::ErrorPayload {
            url: url.to_owned(),
            payload,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://closure-compiler.appspot.com/compile";

    #[test]
    fn test_accepts_minified_body() {
        let out = validate_response(URL, "var a = 1;", "var a=1;\n".into()).unwrap();
        assert_eq!(out, "var a=1;\n");
    }

    #[test]
    fn test_rejects_empty_body() {
        let err = validate_response(URL, "var a = ;", "\n".into()).unwrap_err();
        assert!(matches!(err, MinifyError::EmptyResponse { .. }));
    }

    #[test]
    fn test_empty_input_may_yield_empty_body() {
        assert_eq!(validate_response(URL, "  \n", String::new()).unwrap(), "");
    }

    #[test]
    fn test_rejects_closure_error_payload() {
        let body = "Error(22): Too many compiles performed recently.  Try again later.\n";
        let err = validate_response(URL, "var a = 1;", body.into()).unwrap_err();
        match err {
            MinifyError::ErrorPayload { payload, .. } => {
                assert!(payload.starts_with("Error(22)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_commented_error_payload() {
        let body = "// Error : Unexpected token";
        assert!(validate_response(URL, "a{", body.into()).is_err());
    }

    #[test]
    fn test_error_word_inside_code_is_fine() {
        let body = "throw new Error(\"x\");";
        assert!(validate_response(URL, "throw new Error('x')", body.into()).is_ok());
    }
}
