use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventario-sala")]
#[command(about = "Checks classroom photos against the planned furniture inventory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Overrides on top of the config file and environment
#[derive(clap::Args, Debug, Default)]
pub struct DetectorArgs {
    /// YOLO weights file
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Python interpreter with ultralytics installed
    #[arg(long)]
    pub python: Option<String>,

    /// Overlap threshold for non-maximum suppression (0-1)
    #[arg(long)]
    pub iou: Option<f32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Listen address (e.g. 127.0.0.1:5000)
        #[arg(short, long)]
        bind: Option<String>,

        /// Root directory for per-request uploads
        #[arg(long)]
        upload_dir: Option<PathBuf>,

        #[command(flatten)]
        detector: DetectorArgs,
    },

    /// Check a local plan and photo folder, printing the JSON result
    Analyze {
        /// Plan spreadsheet (.xlsx)
        #[arg(required = true)]
        plan: PathBuf,

        /// Folder holding the day photos
        #[arg(required = true)]
        folder: PathBuf,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        detector: DetectorArgs,
    },

    /// Show or initialize the config file
    Config {
        /// Print the effective settings
        #[arg(long)]
        show: bool,

        /// Write the default settings to the config file
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "inventario-sala",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--iou",
            "0.5",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve { bind, detector, .. } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:8080"));
                assert_eq!(detector.iou, Some(0.5));
                assert!(detector.model.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["inventario-sala", "analyze", "plan.xlsx", "fotos", "-o", "out.json"]);
        match cli.command {
            Commands::Analyze { plan, folder, output, .. } => {
                assert_eq!(plan, PathBuf::from("plan.xlsx"));
                assert_eq!(folder, PathBuf::from("fotos"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected analyze"),
        }
    }
}
