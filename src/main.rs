use std::{env, fs, path::PathBuf};

use rulecall::{Engine, EngineConfig, EngineImage};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let config = match extract_config(&mut args) {
        Some(config) => config,
        None => return,
    };

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "image-info" => {
            if args.len() < 3 {
                eprintln!("Usage: rulecall image-info <image.json>");
                return;
            }
            show_image_info(&args[2], config);
        }
        "functions" => {
            let engine = Engine::with_config(config);
            for name in engine.registry().names() {
                println!("{}", name);
            }
        }
        other => {
            eprintln!("Error: unknown command `{}`", other);
            print_help();
        }
    }
}

fn print_help() {
    println!(
        "\
rulecall CLI

Usage:
  rulecall image-info <image.json>
  rulecall functions

Flags:
  --config <file.json>  Load engine settings from a JSON file
  -h, --help            Show this help message
"
    );
}

/// Removes `--config <path>` from `args` and loads it, falling back to the
/// default settings when the flag is absent.
fn extract_config(args: &mut Vec<String>) -> Option<EngineConfig> {
    let Some(i) = args.iter().position(|arg| arg == "--config") else {
        return Some(EngineConfig::default());
    };
    if i + 1 >= args.len() {
        eprintln!("Usage: rulecall <command> --config <file.json>");
        return None;
    }
    let path = PathBuf::from(args.remove(i + 1));
    args.remove(i);
    match EngineConfig::load(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("{}", err);
            None
        }
    }
}

fn show_image_info(path: &str, config: EngineConfig) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error: failed to read `{}`: {}", path, err);
            return;
        }
    };
    let image = match EngineImage::from_json(&text) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let fingerprint = match image.fingerprint() {
        Ok(fingerprint) => fingerprint,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    println!("format version: {}", image.format_version);
    println!("fingerprint: {}", fingerprint);
    println!("advised functions: {}", image.advised_function_count());
    for function in &image.functions {
        let layers: Vec<&str> = function.layers.iter().map(|layer| layer.kind.as_str()).collect();
        println!("  {} [{}]", function.name, layers.join(", "));
    }

    // Images that only advise built-ins can be checked against a bare engine.
    let mut engine = Engine::with_config(config);
    match engine.restore(&image) {
        Ok(()) => println!("restores onto built-ins: yes"),
        Err(err) => println!("restores onto built-ins: no ({})", err.kind),
    }
}
