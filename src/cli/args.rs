//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Bundle, minify and embed web assets as C arrays
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file name, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "webembed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Directory holding manifest inputs
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Directory holding bundles and loose pre-built files
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// Directory receiving generated headers
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub generated: Option<PathBuf>,

    /// Manifest file path
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the whole pipeline: bundle, embed, table
    #[command(visible_alias = "b")]
    Build {
        /// Remove headers that belong to no current output
        #[arg(short, long)]
        clean: bool,

        #[command(flatten)]
        minify: MinifyArgs,
    },

    /// Bundle the named manifest outputs into the data directory
    Bundle {
        /// Output names as declared in the manifest
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,

        #[command(flatten)]
        minify: MinifyArgs,
    },

    /// Emit headers for the named outputs from their existing artifacts
    Embed {
        /// Output names (manifest or loose)
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },

    /// Write only the routing table
    Table,

    /// Print resolved outputs with their inputs
    #[command(visible_alias = "ls")]
    List {
        /// Print JSON instead of a listing
        #[arg(short, long)]
        json: bool,
    },
}

/// Minification switch shared by commands that bundle
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MinifyArgs {
    /// Minify bundled inputs
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

impl Cli {
    /// `--minify` value of the active command, if given.
    pub const fn minify_override(&self) -> Option<bool> {
        match &self.command {
            Commands::Build { minify, .. } | Commands::Bundle { minify, .. } => minify.minify,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["webembed", "build", "--clean", "--minify", "false"]);
        assert!(matches!(cli.command, Commands::Build { clean: true, .. }));
        assert_eq!(cli.minify_override(), Some(false));
    }

    #[test]
    fn test_minify_flag_without_value() {
        let cli = Cli::parse_from(["webembed", "bundle", "app.js", "-m"]);
        assert_eq!(cli.minify_override(), Some(true));
    }

    #[test]
    fn test_global_path_overrides() {
        let cli = Cli::parse_from(["webembed", "table", "--data", "d", "--generated", "g"]);
        assert_eq!(cli.data, Some(PathBuf::from("d")));
        assert_eq!(cli.generated, Some(PathBuf::from("g")));
        assert_eq!(cli.config, PathBuf::from("webembed.toml"));
        assert_eq!(cli.minify_override(), None);
    }

    #[test]
    fn test_verbose_and_version_flags() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["webembed", "list", "-v"]);
        assert!(cli.verbose);
        let err = Cli::try_parse_from(["webembed", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_embed_requires_names() {
        assert!(Cli::try_parse_from(["webembed", "embed"]).is_err());
        let cli = Cli::parse_from(["webembed", "embed", "app.css", "logo.png"]);
        match cli.command {
            Commands::Embed { names } => assert_eq!(names, ["app.css", "logo.png"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
