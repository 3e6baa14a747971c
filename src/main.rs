mod config;
mod error;
mod generator;
mod image_client;
mod image_format;
mod logging;
mod metadata;
mod models;
mod prompt;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use config::Config;
use error::ImageError;
use image_client::ImageClient;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "generate-image", version)]
#[command(about = "Generate a consistent character image for a post from its image_prompt metadata")]
#[command(arg_required_else_help = true)]
#[command(after_help = "Example:\n    generate-image ~/scratchpad/Cognitive\\ Loop/2025-11-03-reintroduction-draft.md")]
struct Args {
    /// Markdown post with an `- image_prompt: ...` metadata line
    input: PathBuf,

    /// Where to write the image [default: <input dir>/generated-<input stem>.jpg]
    output: Option<PathBuf>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,

    /// Environment file loaded before reading OPENAI_API_KEY
    #[arg(long, default_value = config::DEFAULT_ENV_FILE)]
    env_file: PathBuf,
}

/// `<input dir>/generated-<input stem>.jpg`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let file_name = format!("generated-{}.jpg", stem);
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn build_http_client(proxy: Option<&str>) -> Result<reqwest::Client, ImageError> {
    let client_builder = reqwest::Client::builder();
    let client_builder = if let Some(proxy) = proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| ImageError::generation_failed("configuring the proxy", e))?;
        client_builder.proxy(proxy)
    } else {
        client_builder
    };
    client_builder
        .build()
        .map_err(|e| ImageError::generation_failed("building the HTTP client", e))
}

async fn run(args: &Args, config: &Config) -> Result<PathBuf, ImageError> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let scene = metadata::extract_image_prompt(&args.input)?;

    let http_client = Arc::new(build_http_client(args.proxy.as_deref())?);
    let client = ImageClient::new(http_client, config);

    println!("Generating image with {}...", config.image.model);
    println!("Scene: {}", scene);

    generator::generate_image(&client, &config.image, &scene, &output_path).await
}

/// Prints the outcome and maps it to the process exit status.
fn report(result: &Result<PathBuf, ImageError>) -> u8 {
    match result {
        Ok(path) => {
            println!("\nSuccess! Image ready: {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let ImageError::MissingCredential { var } = e {
                eprintln!("Set it with: export {}='your-api-key'", var);
            }
            1
        }
    }
}

fn handle_parse_error(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("{}", Args::command().render_help());
            ExitCode::FAILURE
        }
        _ => {
            let _ = e.print();
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return handle_parse_error(e),
    };

    // Parse log level
    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level);

    match config::load_env_file(&args.env_file) {
        Ok(true) => info!("Environment loaded from: {}", args.env_file.display()),
        Ok(false) => eprintln!("Warning: .env file not found at {}", args.env_file.display()),
        Err(e) => eprintln!(
            "Warning: failed to load .env file at {}: {}",
            args.env_file.display(),
            e
        ),
    }

    let result = match Config::from_env() {
        Ok(config) => run(&args, &config).await,
        Err(e) => Err(e),
    };
    ExitCode::from(report(&result))
}
