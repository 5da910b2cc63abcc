//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;

use std::io::Read;

use clap::{App, Arg};
use config::{Config, LoggingFileRotation, LoggingFmtStyle};
use frrconf_isis::generate::FrrTemplates;
use frrconf_isis::pipeline::{self, BASE_PATH};
use frrconf_utils::session::VtyshSession;
use frrconf_utils::tree::ConfigTree;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

fn init_tracing(config: &config::Logging) {
    // Enable logging to journald.
    let journald = config
        .journald
        .enabled
        .then(|| match tracing_journald::layer() {
            Ok(layer) => Some(layer),
            Err(error) => {
                eprintln!("couldn't connect to journald: {error}");
                None
            }
        })
        .flatten();

    // Enable logging to a file.
    let file = config.file.enabled.then(|| {
        let file_appender = match config.file.rotation {
            LoggingFileRotation::Never => {
                rolling::never(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Hourly => {
                rolling::hourly(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Daily => {
                rolling::daily(&config.file.dir, &config.file.name)
            }
        };

        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_thread_ids(config.file.fmt.show_thread_id)
            .with_file(config.file.fmt.show_source)
            .with_line_number(config.file.fmt.show_source)
            .with_ansi(config.file.fmt.colors);
        let layer = match config.file.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    // Enable logging to stderr. Stdout is reserved for validation messages
    // and rendered configurations.
    let stderr = config.stderr.enabled.then(|| {
        let log_level_filter = LevelFilter::from_level(tracing::Level::TRACE);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(config.stderr.fmt.show_thread_id)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        let layer = match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        };
        layer.with_filter(log_level_filter)
    });

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive("frrconf=info".parse().unwrap())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(journald)
        .with(file)
        .with(stderr)
        .init();
}

// Reads the full configuration document, either from a file or from stdin.
fn read_input(path: Option<&str>) -> Result<Value, String> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|error| format!("failed to read {path}: {error}"))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|error| format!("failed to read stdin: {error}"))?;
            input
        }
    };

    // No input at all means there is no configuration left.
    if input.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&input)
        .map_err(|error| format!("failed to parse configuration: {error}"))
}

fn build_version() -> String {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    match rustc_tools_util::get_version_info!().commit_hash {
        Some(hash) => format!("{VERSION} ({hash})"),
        None => VERSION.to_owned(),
    }
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("FRR IS-IS configuration reconciler")
        .version(build_version().as_str())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .value_name("file")
                .help("Read the desired configuration (JSON) from a file instead of stdin."),
        )
        .arg(
            Arg::with_name("dry-run")
                .long("dry-run")
                .help("Validate and print the generated configuration without applying it."),
        )
        .get_matches();

    // Read configuration file.
    let config = match Config::load(matches.value_of("config")) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid configuration file: {error}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    init_tracing(&config.logging);

    // Read the desired state.
    let document = match read_input(matches.value_of("input")) {
        Ok(document) => document,
        Err(error) => {
            error!(%error, "failed to load desired configuration");
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    let tree = ConfigTree::from_document(document, BASE_PATH);

    let result = if matches.is_present("dry-run") {
        pipeline::dry_run(&tree, &FrrTemplates).map(|config| {
            print!("{config}");
        })
    } else {
        info!(daemon = %config.frr.daemon, "reconciling configuration");
        let mut session = VtyshSession::new(
            config.frr.daemon.clone(),
            config.frr.vtysh_path.clone(),
            config.frr.reload_path.clone(),
        );
        pipeline::run(&tree, &FrrTemplates, &mut session, &config.apply)
    };

    if let Err(error) = result {
        match error.as_validation() {
            Some(error) => println!("{error}"),
            None => {
                error.log();
                eprintln!("{error}");
            }
        }
        std::process::exit(1);
    }
}
