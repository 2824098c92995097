use anyhow::{bail, Context, Result};
use bizkit::config::Settings;
use bizkit::crypto;
use bizkit::http::ApiClient;
use bizkit::id::{guid_number, guid_string, SnowflakeGenerator};
use bizkit::table::{self, ExcelWriteOptions, Table};
use bizkit::thumbnail::{self, CropRect, ThumbnailMode};
use bizkit::watermark::{self, Anchor, FontSpec};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Bizkit - business utility toolkit
#[derive(Parser, Debug)]
#[command(name = "bizkit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shrink or reshape an image
    Thumbnail {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        /// fit, W, H, HW, Cut or stretch
        #[arg(long, default_value = "fit")]
        mode: String,
    },
    /// Cut a rectangle out of an image and scale it
    Crop {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
        #[arg(long)]
        crop_width: u32,
        #[arg(long)]
        crop_height: u32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
    },
    /// Stamp an overlay image onto an image
    Watermark {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        overlay: PathBuf,
        /// Numeric code 0-9 or a name such as bottom-right
        #[arg(long, default_value = "bottom-right")]
        anchor: Anchor,
        #[arg(long)]
        quality: Option<i32>,
        /// Opacity level 1-10
        #[arg(long)]
        transparency: Option<i32>,
    },
    /// Draw a text caption onto an image
    TextWatermark {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        text: String,
        #[arg(long)]
        font: Option<PathBuf>,
        #[arg(long)]
        font_size: Option<f32>,
        #[arg(long, default_value = "bottom-right")]
        anchor: Anchor,
        #[arg(long)]
        quality: Option<i32>,
    },
    /// Print a digest of a string
    Hash { algorithm: HashAlgorithm, text: String },
    /// Generate identifiers
    Id {
        /// Snowflake worker id (defaults to the configured one)
        #[arg(long)]
        worker: Option<u32>,
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Print random GUIDs instead of snowflake ids
        #[arg(long)]
        guid: bool,
    },
    /// Print the first IPv4 address of this host
    Ip,
    /// Convert a CSV file into a spreadsheet
    CsvToXlsx {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Append the rows of a spreadsheet to a CSV file
    XlsxToCsv {
        input: PathBuf,
        output: PathBuf,
        /// Zero-based worksheet index
        #[arg(long, default_value_t = 0)]
        sheet: usize,
        /// Write the header line before the rows
        #[arg(long)]
        header: bool,
    },
    /// GET a path on the configured API and print the response
    ApiGet {
        path: String,
        /// Query parameter as key=value, repeatable
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// POST a JSON body to a path on the configured API and print the response
    ApiPost { path: String, body: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) => Ok((k.to_string(), v.to_string())),
        None => Err(format!("expected key=value, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::default(),
    };
    settings.validate()?;

    if args.verbose && std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug");
    }
    bizkit::logging::init_subscriber(settings.logging.json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(
        config_file = ?args.config,
        worker_id = settings.id.worker_id,
        json_logs = settings.logging.json,
        "Configuration loaded"
    );

    run(args.command, &settings).await
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Thumbnail {
            input,
            output,
            width,
            height,
            mode,
        } => {
            let data = read_input(&input)?;
            let ext = extension_of(&output);
            let out = if mode == "fit" {
                thumbnail::make_thumbnail(&data, &ext, width, height)?
            } else {
                if width < 0 || height < 0 {
                    bail!("width and height must not be negative");
                }
                let mode = ThumbnailMode::parse(&mode);
                thumbnail::make_thumbnail_with_mode(&data, &ext, width as u32, height as u32, mode)?
            };
            write_output(&output, &out)?;
        }
        Command::Crop {
            input,
            output,
            x,
            y,
            crop_width,
            crop_height,
            width,
            height,
        } => {
            let data = read_input(&input)?;
            let crop = CropRect::new(x, y, crop_width, crop_height);
            let out =
                thumbnail::make_cropped_thumbnail(&data, &extension_of(&output), width, height, crop)?;
            write_output(&output, &out)?;
        }
        Command::Watermark {
            input,
            output,
            overlay,
            anchor,
            quality,
            transparency,
        } => {
            let data = read_input(&input)?;
            let out = watermark::image_watermark(
                &data,
                &extension_of(&output),
                &overlay,
                anchor,
                quality.unwrap_or(settings.image.default_quality as i32),
                transparency.unwrap_or(settings.image.default_transparency as i32),
            )?;
            write_output(&output, &out)?;
        }
        Command::TextWatermark {
            input,
            output,
            text,
            font,
            font_size,
            anchor,
            quality,
        } => {
            let font_path = match font.or_else(|| settings.image.font_path.clone()) {
                Some(path) => path,
                None => bail!("no font given: pass --font or set image.font_path"),
            };
            let font = FontSpec::new(font_path, font_size.unwrap_or(settings.image.font_size));
            let data = read_input(&input)?;
            let out = watermark::text_watermark(
                &data,
                &extension_of(&output),
                &text,
                anchor,
                quality.unwrap_or(settings.image.default_quality as i32),
                &font,
            )?;
            write_output(&output, &out)?;
        }
        Command::Hash { algorithm, text } => {
            let digest = match algorithm {
                HashAlgorithm::Md5 => crypto::md5_hex(&text),
                HashAlgorithm::Sha1 => crypto::sha1_hex(&text),
                HashAlgorithm::Sha256 => crypto::sha256_base64(&text),
            };
            println!("{}", digest);
        }
        Command::Id {
            worker,
            count,
            guid,
        } => {
            if guid {
                for _ in 0..count {
                    println!("{}\t{}", guid_string(), guid_number());
                }
            } else {
                let generator = SnowflakeGenerator::new(worker.unwrap_or(settings.id.worker_id))?;
                for _ in 0..count {
                    println!("{}", generator.next_id()?);
                }
            }
        }
        Command::Ip => {
            println!("{}", bizkit::net::local_ipv4()?);
        }
        Command::CsvToXlsx {
            input,
            output,
            sheet,
        } => {
            let table = table::read_csv(&input)?;
            let mut options = ExcelWriteOptions::default();
            if let Some(sheet) = sheet {
                options.sheet_name = sheet;
            }
            table::write_excel(&output, &table, &options)?;
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                rows = table.row_count(),
                "Converted CSV to spreadsheet"
            );
        }
        Command::XlsxToCsv {
            input,
            output,
            sheet,
            header,
        } => {
            let table = table::read_excel(&input, sheet)?;
            if header {
                let mut header_row = Table::new(table.columns().iter().cloned());
                header_row.push_row(table.columns().iter().cloned())?;
                table::write_csv(&output, &header_row)?;
            }
            table::write_csv(&output, &table)?;
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                rows = table.row_count(),
                "Appended spreadsheet rows to CSV"
            );
        }
        Command::ApiGet { path, params } => {
            let api = ApiClient::from_config(&settings.http)?;
            let response = api.get(&path, params.as_slice()).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::ApiPost { path, body } => {
            let api = ApiClient::from_config(&settings.http)?;
            let response = api.post(&path, body).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(output = %path.display(), bytes = data.len(), "Wrote image");
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}
