use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use autotiler::config::AutotilerConfig;
use autotiler::layout::{ExportType, Layout};
use autotiler::pipeline::{self, DescriptorSettings, InputSpec, RunSettings};
use autotiler::unpacker::Options;

#[derive(Parser, Debug)]
#[command(name = "autotiler")]
#[command(about = "Unpack 2x3 corner-based terrain sheets into 16, 28 and 48 tile autotile sheets")]
struct Args {
    /// Packed input sheet (repeatable); append ",missing-terrain-two" for a
    /// sheet without a terrain 2 foreground
    #[arg(short = 'i', long = "input", required = true, value_name = "PATH[,OPTION]")]
    inputs: Vec<InputSpec>,

    /// Output file for the matching input (repeatable); layout tags are prefixed to its name
    #[arg(short = 'o', long = "output")]
    outputs: Vec<PathBuf>,

    /// Transparent pixels around every output tile
    #[arg(short = 'p', long)]
    padding: Option<u32>,

    /// Layouts to export (repeatable, default: all)
    #[arg(short = 'e', long = "export", value_enum)]
    exports: Vec<ExportType>,

    /// No input has a terrain 2 foreground; skip terrain 2 layouts for all of them
    #[arg(long)]
    missing_terrain_two: bool,

    /// Write a Tiled .tsx descriptor next to every sheet
    #[arg(long)]
    tiled: bool,

    /// Name of terrain 1 in descriptors
    #[arg(long)]
    terrain1_name: Option<String>,

    /// Name of terrain 2 in descriptors
    #[arg(long)]
    terrain2_name: Option<String>,

    /// JSON config file; flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Save every composed base tile into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of the config file.
    fn merge_into(&self, mut config: AutotilerConfig) -> AutotilerConfig {
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if !self.exports.is_empty() {
            config.exports = self.exports.clone();
        }
        config.missing_terrain_two |= self.missing_terrain_two;
        config.tiled |= self.tiled;
        if let Some(name) = &self.terrain1_name {
            config.terrain1_name = name.clone();
        }
        if let Some(name) = &self.terrain2_name {
            config.terrain2_name = name.clone();
        }
        if let Some(dir) = &self.debug_dir {
            config.debug_dir = Some(dir.clone());
        }
        config
    }

    /// Pair every input with its output, falling back to `<index>.local.png`.
    fn jobs(&self) -> Vec<(InputSpec, PathBuf)> {
        self.inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let output = self
                    .outputs
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| pipeline::default_output(i));
                (input.clone(), output)
            })
            .collect()
    }
}

fn settings_from(config: &AutotilerConfig) -> RunSettings {
    RunSettings {
        options: Options {
            padding: config.padding,
            missing_terrain_two: config.missing_terrain_two,
        },
        layouts: Layout::from_exports(&config.exports, config.missing_terrain_two),
        descriptor: config.tiled.then(|| DescriptorSettings {
            terrain1_name: config.terrain1_name.clone(),
            terrain2_name: config.terrain2_name.clone(),
            tiled_version: config.tiled_version.clone(),
        }),
        debug_dir: config.debug_dir.clone(),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => match AutotilerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => AutotilerConfig::default(),
    };
    let config = args.merge_into(config);
    let settings = settings_from(&config);

    let layouts: Vec<String> = settings.layouts.iter().map(|l| l.to_string()).collect();
    log::info!("Layouts: {}", layouts.join(", "));
    if settings.options.padding > 0 {
        log::info!("Padding: {}px", settings.options.padding);
    }

    let jobs = args.jobs();
    let failures = pipeline::run(&jobs, &settings);
    if failures > 0 {
        log::error!("{} of {} files failed", failures, jobs.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
