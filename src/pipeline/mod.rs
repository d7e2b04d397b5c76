//! Build pipeline driver.
//!
//! ```text
//! manifest + data dir ──resolve──▶ outputs ──check symbols──▶
//!     (rayon, per output)  bundle ─▶ <data>/<name> ─▶ emit ─▶ <generated>/<prefix><name>.h
//!     (once, all succeeded)  table ─▶ <generated>/<table_file>
//! ```
//!
//! Every stage receives an explicit [`BuildContext`]; nothing here reads
//! global state. Stage functions (`run_bundle`, `run_embed`, `run_table`)
//! let a host build system drive each step as its own dependency node.

use std::{fs, io::ErrorKind, path::PathBuf};

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::bundle::Bundler;
use crate::config::{EmbedConfig, EmitConfig, MinifyConfig};
use crate::core::{BuildError, BuildResult};
use crate::emit::write_header;
use crate::generator::write_table;
use crate::logger::ProgressLine;
use crate::manifest::{Manifest, Origin, ResolvedOutput, resolve};
use crate::minify::{self, Minifier, MinifyError};
use crate::{debug, log};

// =============================================================================
// Context
// =============================================================================

/// Everything one build needs, resolved to absolute paths.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub source_dir: PathBuf,
    pub data_dir: PathBuf,
    pub generated_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub minify: MinifyConfig,
    pub emit: EmitConfig,
}

impl BuildContext {
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            source_dir: config.paths.source.clone(),
            data_dir: config.paths.data.clone(),
            generated_dir: config.paths.generated.clone(),
            manifest_path: config.paths.manifest.clone(),
            minify: config.minify.clone(),
            emit: config.emit.clone(),
        }
    }

    /// Load the manifest and resolve every output, rejecting symbol
    /// collisions before anything is written.
    pub fn resolve(&self) -> BuildResult<Vec<ResolvedOutput>> {
        let manifest = Manifest::load(&self.manifest_path)?;
        let outputs = resolve(&manifest, &self.source_dir, &self.data_dir)?;
        check_symbols(&outputs)?;
        debug!(
            "resolve";
            "{} declared, {} loose",
            manifest.len(),
            outputs.len() - manifest.len()
        );
        Ok(outputs)
    }

    pub fn minifier(&self) -> Result<Box<dyn Minifier>, MinifyError> {
        minify::from_config(&self.minify)
    }

    fn header(&self, output: &ResolvedOutput) -> BuildResult<PathBuf> {
        write_header(
            &output.name,
            &output.artifact(&self.data_dir),
            output.kind,
            &self.generated_dir,
            &self.emit,
        )
    }
}

/// Reject distinct outputs whose names map to the same C identifier.
pub fn check_symbols(outputs: &[ResolvedOutput]) -> BuildResult<()> {
    let mut seen: FxHashMap<String, &str> = FxHashMap::default();
    for output in outputs {
        let symbol = output.symbol();
        if let Some(first) = seen.get(&symbol) {
            return Err(BuildError::SymbolCollision {
                symbol,
                first: (*first).to_owned(),
                second: output.name.clone(),
            });
        }
        seen.insert(symbol, &output.name);
    }
    Ok(())
}

// =============================================================================
// Full build
// =============================================================================

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub outputs: usize,
    pub bundled: usize,
    pub pruned: usize,
}

/// Run the whole pipeline.
///
/// Outputs are bundled and embedded in parallel. The routing table is only
/// written once every output succeeded, so a failed build never publishes a
/// table referencing missing headers.
pub fn run_build(ctx: &BuildContext, clean: bool) -> anyhow::Result<BuildSummary> {
    let outputs = ctx.resolve()?;
    let minifier = ctx.minifier()?;
    let bundler = Bundler::new(minifier.as_ref(), &ctx.data_dir);

    let bundled = outputs
        .iter()
        .filter(|o| o.origin == Origin::Manifest)
        .count();
    let progress = ProgressLine::new(&[("bundle", bundled), ("embed", outputs.len())]);

    let results: Vec<BuildResult<PathBuf>> = outputs
        .par_iter()
        .map(|output| {
            bundler.run(output)?;
            if output.origin == Origin::Manifest {
                progress.inc("bundle");
            }
            let header = ctx.header(output)?;
            progress.inc("embed");
            Ok(header)
        })
        .collect();
    first_failure(results)?;
    progress.finish();

    write_table(&outputs, &ctx.generated_dir, &ctx.emit)?;

    let pruned = if clean {
        prune_headers(ctx, &outputs)?.len()
    } else {
        0
    };

    Ok(BuildSummary {
        outputs: outputs.len(),
        bundled,
        pruned,
    })
}

/// Log every failure but the first, which is returned.
fn first_failure<T>(results: Vec<BuildResult<T>>) -> BuildResult<Vec<T>> {
    let mut values = Vec::with_capacity(results.len());
    let mut first = None;
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) if first.is_none() => first = Some(err),
            Err(err) => log!("error"; "{:#}", anyhow::Error::new(err)),
        }
    }
    match first {
        Some(err) => Err(err),
        None => Ok(values),
    }
}

/// Remove headers in the generated directory that no output produces.
pub fn prune_headers(
    ctx: &BuildContext,
    outputs: &[ResolvedOutput],
) -> BuildResult<Vec<PathBuf>> {
    let expected: FxHashSet<String> = outputs
        .iter()
        .map(|o| ctx.emit.header_name(&o.name))
        .collect();

    let entries = match fs::read_dir(&ctx.generated_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(BuildError::DataDir {
                path: ctx.generated_dir.clone(),
                source,
            });
        }
    };

    let mut removed = Vec::new();
    for entry in entries.flatten() {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_stale_header(&name, &ctx.emit, &expected) {
            continue;
        }
        let path = entry.path();
        fs::remove_file(&path).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        log!("clean"; "removed {}", path.display());
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

fn is_stale_header(name: &str, emit: &EmitConfig, expected: &FxHashSet<String>) -> bool {
    name.starts_with(&emit.header_prefix)
        && name.ends_with(".h")
        && name != emit.table_file
        && !expected.contains(name)
}

// =============================================================================
// Stages
// =============================================================================

/// Pick the named outputs, in the order given.
fn select<'a>(
    outputs: &'a [ResolvedOutput],
    names: &[String],
) -> BuildResult<Vec<&'a ResolvedOutput>> {
    names
        .iter()
        .map(|name| {
            outputs
                .iter()
                .find(|o| o.name == *name)
                .ok_or_else(|| BuildError::UnknownOutput(name.clone()))
        })
        .collect()
}

/// Bundle the named outputs into the data directory.
pub fn run_bundle(ctx: &BuildContext, names: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let outputs = ctx.resolve()?;
    let selected = select(&outputs, names)?;
    let minifier = ctx.minifier()?;
    let bundler = Bundler::new(minifier.as_ref(), &ctx.data_dir);

    let results: Vec<_> = selected.par_iter().map(|o| bundler.run(o)).collect();
    Ok(first_failure(results)?)
}

/// Emit headers for the named outputs from their existing artifacts.
pub fn run_embed(ctx: &BuildContext, names: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let outputs = ctx.resolve()?;
    let selected = select(&outputs, names)?;

    let results: Vec<_> = selected.par_iter().map(|o| ctx.header(o)).collect();
    Ok(first_failure(results)?)
}

/// Write the routing table for the current resolved set.
pub fn run_table(ctx: &BuildContext) -> anyhow::Result<PathBuf> {
    let outputs = ctx.resolve()?;
    Ok(write_table(&outputs, &ctx.generated_dir, &ctx.emit)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentKind;
    use tempfile::TempDir;

    /// Project layout: `html/` sources, `data/` artifacts, `gen/` headers.
    fn project(manifest: &str, sources: &[(&str, &str)]) -> (TempDir, BuildContext) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("html")).unwrap();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("html/manifest.json"), manifest).unwrap();
        for (name, content) in sources {
            fs::write(root.join("html").join(name), content).unwrap();
        }

        let ctx = BuildContext {
            source_dir: root.join("html"),
            data_dir: root.join("data"),
            generated_dir: root.join("gen"),
            manifest_path: root.join("html/manifest.json"),
            minify: MinifyConfig::default(),
            emit: EmitConfig::default(),
        };
        (dir, ctx)
    }

    fn output(name: &str) -> ResolvedOutput {
        ResolvedOutput {
            name: name.into(),
            inputs: vec![],
            kind: ContentKind::from_name(name),
            origin: Origin::Loose,
        }
    }

    #[test]
    fn test_check_symbols() {
        assert!(check_symbols(&[output("a.js"), output("b.js")]).is_ok());

        let err = check_symbols(&[output("a-b.js"), output("x.css"), output("a.b.js")]).unwrap_err();
        match err {
            BuildError::SymbolCollision {
                symbol,
                first,
                second,
            } => {
                assert_eq!(symbol, "CONTENT_A_B_JS");
                assert_eq!(first, "a-b.js");
                assert_eq!(second, "a.b.js");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nested_name_collides_with_basename() {
        let (dir, ctx) = project(
            r#"{"js/app.js": ["a.js"], "app.js": ["b.js"]}"#,
            &[("a.js", "var a = 1;"), ("b.js", "var b = 2;")],
        );

        let err = run_build(&ctx, false).unwrap_err();
        match err.downcast_ref::<BuildError>() {
            Some(BuildError::SymbolCollision {
                symbol,
                first,
                second,
            }) => {
                assert_eq!(symbol, "CONTENT_APP_JS");
                assert_eq!(first, "js/app.js");
                assert_eq!(second, "app.js");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("gen").exists());
        assert!(!dir.path().join("data/app.js").exists());
    }

    #[test]
    fn test_nested_name_header_matches_table() {
        let (dir, ctx) = project(r#"{"js/app.js": ["a.js"]}"#, &[("a.js", "var a = 1;")]);

        run_build(&ctx, false).unwrap();
        assert!(dir.path().join("data/js/app.js").exists());

        let gen_dir = dir.path().join("gen");
        let header = fs::read_to_string(gen_dir.join("web_server.js/app.js.h")).unwrap();
        assert!(header.contains("static const char CONTENT_APP_JS[]"));
        assert!(header.contains("CONTENT_APP_JS_LENGTH = "));

        let table = fs::read_to_string(gen_dir.join("web_server_static_files.h")).unwrap();
        assert!(table.contains("#include \"web_server.js/app.js.h\"\n"));
        assert!(table.contains(
            "{ \"/js/app.js\", CONTENT_APP_JS, CONTENT_APP_JS_LENGTH, _CONTENT_TYPE_JS },"
        ));
    }

    #[test]
    fn test_full_build() {
        let (dir, ctx) = project(
            r#"{"app.css": ["a.css", "b.css"]}"#,
            &[("a.css", "a {  color: red; }"), ("b.css", "b { margin: 0px; }")],
        );
        fs::write(dir.path().join("data/logo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let summary = run_build(&ctx, false).unwrap();
        assert_eq!(
            summary,
            BuildSummary {
                outputs: 2,
                bundled: 1,
                pruned: 0
            }
        );

        let gen_dir = dir.path().join("gen");
        let css = fs::read_to_string(gen_dir.join("web_server.app.css.h")).unwrap();
        assert!(css.contains("\"a{color:red}b{margin:0}\";"));
        assert!(css.contains("CONTENT_APP_CSS_LENGTH = 23;"));

        let png = fs::read_to_string(gen_dir.join("web_server.logo.png.h")).unwrap();
        assert!(png.contains("0x89, 0x50, 0x4e, 0x47,\n  0x00\n};"));

        let table = fs::read_to_string(gen_dir.join("web_server_static_files.h")).unwrap();
        assert!(table.contains(
            "{ \"/app.css\", CONTENT_APP_CSS, CONTENT_APP_CSS_LENGTH, _CONTENT_TYPE_CSS },"
        ));
        let css_row = table.find("/app.css").unwrap();
        let png_row = table.find("/logo.png").unwrap();
        assert!(css_row < png_row);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let (dir, ctx) = project(r#"{"app.js": ["missing.js"]}"#, &[]);

        let err = run_build(&ctx, false).unwrap_err();
        match err.downcast_ref::<BuildError>() {
            Some(BuildError::SourceRead { output, path, .. }) => {
                assert_eq!(output, "app.js");
                assert_eq!(path, &dir.path().join("html/missing.js"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("gen/web_server.app.js.h").exists());
        assert!(!dir.path().join("gen/web_server_static_files.h").exists());
    }

    #[test]
    fn test_malformed_manifest_fails_first() {
        let (dir, ctx) = project("{\"app.js\": []}", &[]);

        let err = run_build(&ctx, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::ManifestParse { .. })
        ));
        assert!(!dir.path().join("gen").exists());
    }

    #[test]
    fn test_clean_prunes_stale_headers() {
        let (dir, ctx) = project(r#"{"app.js": ["main.js"]}"#, &[("main.js", "var a = 1;")]);
        let gen_dir = dir.path().join("gen");
        fs::create_dir_all(&gen_dir).unwrap();
        fs::write(gen_dir.join("web_server.old.css.h"), "stale").unwrap();
        fs::write(gen_dir.join("main.cpp"), "int main() {}").unwrap();

        let summary = run_build(&ctx, true).unwrap();
        assert_eq!(summary.pruned, 1);
        assert!(!gen_dir.join("web_server.old.css.h").exists());
        assert!(gen_dir.join("web_server.app.js.h").exists());
        assert!(gen_dir.join("web_server_static_files.h").exists());
        assert!(gen_dir.join("main.cpp").exists());
    }

    #[test]
    fn test_stages() {
        let (dir, ctx) = project(
            r#"{"index.html": ["index.html"]}"#,
            &[("index.html", "<p>  hello  </p>\n<!-- note -->\n")],
        );
        let names = vec!["index.html".to_owned()];

        let artifacts = run_bundle(&ctx, &names).unwrap();
        assert_eq!(artifacts, [dir.path().join("data/index.html")]);

        let headers = run_embed(&ctx, &names).unwrap();
        assert_eq!(headers, [dir.path().join("gen/web_server.index.html.h")]);

        let table = run_table(&ctx).unwrap();
        assert!(fs::read_to_string(table).unwrap().contains("_CONTENT_TYPE_HTML"));
    }

    #[test]
    fn test_stage_unknown_name() {
        let (_dir, ctx) = project("{}", &[]);
        let err = run_embed(&ctx, &["nope.js".to_owned()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::UnknownOutput(name)) if name == "nope.js"
        ));
    }
}
