//! # qrsmith CLI
//!
//! Command-line interface for styled QR code generation.
//!
//! ## Usage
//!
//! ```bash
//! # Styled SVG to stdout
//! qrsmith render --url https://example.com --shape fluid --frame leaf
//!
//! # Wi-Fi code with a logo, written to a file
//! qrsmith render --wifi-ssid Home --wifi-password secret123 \
//!     --logo data:image/png;base64,... -o wifi.svg
//!
//! # Plain raster preview
//! qrsmith render --text "hello" --png hello.png
//!
//! # List style names
//! qrsmith styles
//!
//! # HTTP preview service
//! qrsmith serve --listen 127.0.0.1:8080
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use qrsmith::{
    QrsmithError,
    config::DEBOUNCE_MS,
    content::{Content, WifiEscaping},
    design::{Background, BodyShape, Design, EyeStyle, LogoImage, LogoStyle},
    pipeline::Pipeline,
    preview::{self, PreviewOptions},
    server::{self, SESSION_EXPIRATION_SECS, ServerConfig},
    symbol::{EcLevel, EcPolicy},
};

/// qrsmith - Styled QR code generator
#[derive(Parser, Debug)]
#[command(name = "qrsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Compact,
    LogoArea,
}

impl From<PolicyArg> for EcPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Compact => EcPolicy::Compact,
            PolicyArg::LogoArea => EcPolicy::LogoArea,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a QR code as SVG (or PNG with --png)
    Render {
        /// URL content
        #[arg(long, group = "content")]
        url: Option<String>,

        /// Free-text content
        #[arg(long, group = "content")]
        text: Option<String>,

        /// Wi-Fi network name
        #[arg(long, group = "content")]
        wifi_ssid: Option<String>,

        /// Wi-Fi password
        #[arg(long, requires = "wifi_ssid")]
        wifi_password: Option<String>,

        /// Mark the Wi-Fi network as hidden
        #[arg(long, requires = "wifi_ssid")]
        wifi_hidden: bool,

        /// Backslash-escape special characters in Wi-Fi fields
        #[arg(long)]
        strict_wifi: bool,

        /// Body shape (see `qrsmith styles`)
        #[arg(long, default_value = "square")]
        shape: String,

        /// Finder frame style
        #[arg(long, default_value = "square")]
        frame: String,

        /// Finder ball style
        #[arg(long, default_value = "square")]
        ball: String,

        /// Body color
        #[arg(long, default_value = "#000000")]
        color: String,

        /// Finder color
        #[arg(long, default_value = "#000000")]
        eye_color: String,

        /// Background color, or "transparent"
        #[arg(long, default_value = "#ffffff")]
        bg: String,

        /// Logo image URI (data URI or URL)
        #[arg(long)]
        logo: Option<String>,

        /// Fraction of the symbol width reserved for the logo
        #[arg(long, default_value_t = qrsmith::config::DEFAULT_LOGO_RATIO)]
        logo_ratio: f64,

        /// Clip the logo to a circle
        #[arg(long, requires = "logo")]
        round_logo: bool,

        /// Paint the background behind the logo
        #[arg(long, requires = "logo")]
        logo_bg: bool,

        /// Error-correction heuristic
        #[arg(long, value_enum, default_value = "compact")]
        policy: PolicyArg,

        /// Write a plain PNG preview instead of SVG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Pixels per module for --png
        #[arg(long, default_value = "8")]
        scale: u32,

        /// SVG output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List body shapes, eye styles and EC levels
    Styles,

    /// Run the HTTP preview service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Debounce window for session edits, in milliseconds
        #[arg(long, default_value_t = DEBOUNCE_MS)]
        debounce_ms: u64,

        /// Idle session lifetime, in seconds
        #[arg(long, default_value_t = SESSION_EXPIRATION_SECS)]
        session_ttl: u64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QrsmithError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            url,
            text,
            wifi_ssid,
            wifi_password,
            wifi_hidden,
            strict_wifi,
            shape,
            frame,
            ball,
            color,
            eye_color,
            bg,
            logo,
            logo_ratio,
            round_logo,
            logo_bg,
            policy,
            png,
            scale,
            output,
        } => {
            let content = match (url, text, wifi_ssid) {
                (Some(url), _, _) => Content::url(url),
                (_, Some(text), _) => Content::text(text),
                (_, _, Some(ssid)) => Content::wifi(ssid, wifi_password.unwrap_or_default(), wifi_hidden),
                _ => {
                    return Err(QrsmithError::Encode(
                        "No content: pass --url, --text or --wifi-ssid".to_string(),
                    ));
                }
            };

            let design = Design {
                body_shape: BodyShape::from_name(&shape),
                body_color: color,
                eye_frame: EyeStyle::from_name(&frame),
                eye_ball: EyeStyle::from_name(&ball),
                eye_color,
                background: Background::from(bg),
                logo: logo.clone(),
                logo_background: logo_bg,
                logo_style: if round_logo {
                    LogoStyle::Circle
                } else {
                    LogoStyle::Square
                },
                logo_size_ratio: logo_ratio,
            };

            let escaping = if strict_wifi {
                WifiEscaping::Strict
            } else {
                WifiEscaping::Verbatim
            };
            let pipeline = Pipeline::new()
                .with_policy(policy.into())
                .with_escaping(escaping);
            pipeline.config.validate()?;

            // The CLI has the logo URI up front, so both render phases collapse into one.
            let image = logo.map(LogoImage::new);
            let rendered = pipeline.run(&content, &design, image.as_ref());

            if rendered.is_empty() {
                return Err(QrsmithError::Encode(match rendered.payload {
                    None => "Content is empty".to_string(),
                    Some(p) => format!("Payload of {} bytes does not fit in a QR code", p.len()),
                }));
            }

            info!(
                "version {:?}, level {:?}, {}x{} modules",
                rendered.matrix.version(),
                rendered.ec_level,
                rendered.matrix.size(),
                rendered.matrix.size()
            );

            if let Some(path) = png {
                let options = PreviewOptions {
                    scale,
                    ..Default::default()
                };
                let bytes = preview::render_png(&rendered.matrix, &design, options)?;
                std::fs::write(&path, bytes)?;
                info!("Saved PNG to {}", path.display());
                return Ok(());
            }

            let svg = rendered.svg().unwrap_or_default();
            match output {
                Some(path) => {
                    std::fs::write(&path, svg)?;
                    info!("Saved SVG to {}", path.display());
                }
                None => println!("{}", svg),
            }
            Ok(())
        }

        Commands::Styles => {
            println!("Body shapes:");
            for shape in BodyShape::ALL {
                println!("  {}", shape.name());
            }
            println!("\nEye frames and balls:");
            for style in EyeStyle::ALL {
                println!("  {}", style.name());
            }
            println!("\nError-correction levels:");
            for level in EcLevel::ALL {
                println!("  {} ({:?})", level.letter(), level);
            }
            Ok(())
        }

        Commands::Serve {
            listen,
            debounce_ms,
            session_ttl,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                debounce: Duration::from_millis(debounce_ms),
                session_ttl: Duration::from_secs(session_ttl),
                ..Default::default()
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }
    }
}
