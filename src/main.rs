//! CLI entry point for traitors-client
//!
//! This provides a terminal player for running a session against the
//! remote game service.

use std::process;
use traitors_client::cli::play::PlayOptions;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            let options = match parse_play_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("Error: {message}");
                    eprintln!();
                    print_usage();
                    process::exit(1);
                }
            };
            run_play(options);
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_play_options(args: &[String]) -> Result<PlayOptions, String> {
    let mut options = PlayOptions {
        ai_count: 6,
        ..PlayOptions::default()
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--name" => {
                options.name = Some(
                    iter.next()
                        .cloned()
                        .ok_or("Missing value for --name".to_string())?,
                );
            }
            "--ai-count" => {
                let value = iter.next().ok_or("Missing value for --ai-count".to_string())?;
                options.ai_count = value
                    .parse()
                    .map_err(|_| format!("Invalid --ai-count '{value}'"))?;
            }
            "--base-url" => {
                options.base_url = Some(
                    iter.next()
                        .cloned()
                        .ok_or("Missing value for --base-url".to_string())?,
                );
            }
            other => return Err(format!("Unknown option '{other}'")),
        }
    }

    Ok(options)
}

fn run_play(options: PlayOptions) {
    // The session model is single-threaded and cooperative; one suspension
    // point per action round trip, so a current-thread runtime is enough.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: Failed to start the async runtime");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(traitors_client::cli::play::run_play(options)) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}

fn print_usage() {
    println!("traitors-client - The Traitors: AI Edition terminal player");
    println!();
    println!("USAGE:");
    println!("    cargo run -- play [--name NAME] [--ai-count N] [--base-url URL]");
    println!();
    println!("COMMANDS:");
    println!("    play                     Play a session in the terminal");
    println!("    --help, -h               Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --name NAME      Castle name (prompted for when omitted)");
    println!("    --ai-count N     Number of AI opponents (default: 6)");
    println!("    --base-url URL   Game service origin (default: ${})", traitors_client::infrastructure::transport::BASE_URL_ENV);
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play --name Ada");
    println!("    cargo run -- play --name Ada --ai-count 8");
}
