//! In-process minification.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{Minifier, MinifyError, html::minify_html};
use crate::core::ContentKind;

/// Minifier backed by oxc, lightningcss and the built-in HTML minifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMinifier;

impl Minifier for LocalMinifier {
    fn minify(&self, kind: ContentKind, source: &str) -> Result<String, MinifyError> {
        match kind {
            ContentKind::Js => minify_js(source),
            ContentKind::Css => minify_css(source),
            ContentKind::Html => minify_html(source),
            _ => Ok(source.to_owned()),
        }
    }
}

/// Minify JavaScript source code.
///
/// Parsed as a classic script, since bundles are concatenated files loaded
/// with `<script src>` rather than ES modules.
pub fn minify_js(source: &str) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let source_type = SourceType::cjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(ToString::to_string).collect();
        return Err(MinifyError::JsParse(messages.join("; ")));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, MinifyError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    Ok(result.code)
}
