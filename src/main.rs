mod descriptor;
mod loader;
mod render;
mod web;

use askama::Template;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::loader::{Loader, Source};
use crate::render::Renderer;
use crate::web::state::MapState;
use crate::web::ui::templates::MapTemplate;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "splat-webmap")]
#[command(about = "Show SPLAT! coverage descriptors on a web map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a descriptor loads and print its key values
    Validate {
        source: Source,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render a descriptor and print the resulting scene, or write a map page
    Render {
        source: Source,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write a standalone HTML map page here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the web viewer
    Serve {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Validate { source, config } => {
            runtime.block_on(validate(&source, config.as_deref()))
        }
        Commands::Render {
            source,
            config,
            out,
        } => runtime.block_on(render(&source, config.as_deref(), out.as_deref())),
        Commands::Serve { config } => runtime.block_on(serve(config.as_deref())),
    }
}

fn load_config(path: Option<&Path>) -> Option<Config> {
    match path {
        None => Some(Config::default()),
        Some(path) => match Config::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                None
            }
        },
    }
}

async fn validate(source: &Source, config: Option<&Path>) -> ExitCode {
    let Some(config) = load_config(config) else {
        return ExitCode::FAILURE;
    };

    let loader = match Loader::new(&config.fetch) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let d = match loader.load(source).await {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading {}: {}", source, e);
            return ExitCode::FAILURE;
        }
    };

    println!("Descriptor is valid: {}", d.name);
    if let Some(version) = &d.splat {
        println!("  splat:        {}", version);
    }
    println!(
        "  site:         {}, {} ({} m AGL)",
        d.qth.coordinates[0], d.qth.coordinates[1], d.qth.height
    );
    println!("  erp:          {} W", d.lrp.erp);

    let lrp = [
        ("frequency", d.lrp.frequency, "MHz"),
        ("permittivity", d.lrp.permittivity, ""),
        ("conductivity", d.lrp.conductivity, "S/m"),
        ("bending", d.lrp.bending, "N-units"),
        ("location var", d.lrp.location_variability, ""),
        ("time var", d.lrp.time_variability, ""),
    ];
    for (label, value, unit) in lrp {
        if let Some(value) = value {
            println!("  {:<13} {} {}", format!("{}:", label), value, unit);
        }
    }
    if let Some(climate) = d.lrp.climate {
        println!("  climate:      {}", climate);
    }
    if let Some(polarization) = d.lrp.polarization {
        println!("  polarization: {}", polarization);
    }

    println!(
        "  image:        {} over [{}, {}] .. [{}, {}]",
        d.image.file,
        d.image.bounds[0][0],
        d.image.bounds[0][1],
        d.image.bounds[1][0],
        d.image.bounds[1][1]
    );
    if let Some(projection) = &d.image.projection {
        println!("  projection:   {}", projection);
    }
    if let Some(unit) = &d.image.unit {
        println!("  unit:         {}", unit);
    }
    if let Some(colormap) = &d.image.colormap {
        println!("  colormap:     {} levels", colormap.len());
    }
    if let Some(arguments) = &d.arguments {
        for (flag, value) in arguments {
            println!("  argument:     {} {}", flag, value);
        }
    }
    ExitCode::SUCCESS
}

async fn render(source: &Source, config: Option<&Path>, out: Option<&Path>) -> ExitCode {
    let Some(config) = load_config(config) else {
        return ExitCode::FAILURE;
    };

    let loader = match Loader::new(&config.fetch) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let renderer = Renderer::new(config.render.clone());
    let mut state = MapState::default();
    let MapState { scene, page } = &mut state;
    let result = match source {
        Source::Url(url) => loader.load_from_network(url, &renderer, scene, page).await,
        Source::File(path) => {
            loader
                .load_from_local_selection(path, &renderer, scene, page)
                .await
        }
    };
    if let Err(e) = result {
        eprintln!("Error loading {}: {}", source, e);
        return ExitCode::FAILURE;
    }

    let snapshot = state.snapshot();
    let Some(out) = out else {
        return match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    };

    let page = MapTemplate::new(&config.map, &config.render.output_region, &snapshot, false)
        .map_err(|e| e.to_string())
        .and_then(|t| t.render().map_err(|e| e.to_string()));

    let page = match page {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Render error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::fs::write(out, page).await {
        eprintln!("Error writing {}: {}", out.display(), e);
        return ExitCode::FAILURE;
    }

    println!("Map page written to {}", out.display());
    ExitCode::SUCCESS
}

async fn serve(config: Option<&Path>) -> ExitCode {
    let Some(config) = load_config(config) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_config() {
        let cli = Cli::try_parse_from(["splat-webmap", "validate", "site.json", "--config", "c.yaml"])
            .unwrap();
        let Commands::Validate { source, config } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(source, Source::File(PathBuf::from("site.json")));
        assert_eq!(config, Some(PathBuf::from("c.yaml")));
    }
}
