use clap::Parser;
use inventario_sala::cli::{Cli, Commands, DetectorArgs};
use inventario_sala::detector::{Detector, YoloCliDetector};
use inventario_sala::error::Result;
use inventario_sala::{logging, pipeline, scanner, server, Config};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_json);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Serve { bind, upload_dir, detector } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(dir) = upload_dir {
                config.upload_dir = dir;
            }
            apply_detector_args(&mut config, detector);
            config.validate()?;

            let detector = build_detector(&config);
            server::serve(&config, detector).await?;
        }

        Commands::Analyze { plan, folder, output, detector } => {
            apply_detector_args(&mut config, detector);
            config.validate()?;

            let images = scanner::scan_folder(&folder)?;
            tracing::info!(count = images.len(), folder = %folder.display(), "images found");

            let detector = build_detector(&config);
            let results = pipeline::process_project(
                &plan,
                &scanner::image_set(&images),
                detector,
                config.iou,
            )
            .await?;

            let json = serde_json::to_string_pretty(&results)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    tracing::info!(path = %path.display(), "results written");
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = Config::default().save()?;
                println!("Wrote default config to {}", path.display());
            }

            if show || !init {
                println!("Config file: {}", Config::config_path()?.display());
                println!("  bind:       {}", config.bind);
                println!("  model_path: {}", config.model_path.display());
                println!("  python:     {}", config.python);
                println!("  iou:        {}", config.iou);
                println!("  upload_dir: {}", config.upload_dir.display());
            }
        }
    }

    Ok(())
}

fn apply_detector_args(config: &mut Config, args: DetectorArgs) {
    if let Some(model) = args.model {
        config.model_path = model;
    }
    if let Some(python) = args.python {
        config.python = python;
    }
    if let Some(iou) = args.iou {
        config.iou = iou;
    }
}

fn build_detector(config: &Config) -> Arc<dyn Detector> {
    let detector = YoloCliDetector::from_config(config);
    if !detector.model_path().exists() {
        tracing::warn!(model = %detector.model_path().display(), "model weights not found");
    }
    Arc::new(detector)
}
