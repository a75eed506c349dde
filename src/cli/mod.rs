use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use clap::{Parser, Subcommand};
use reqwest::Method;

use crate::clients::request::{Executor, Request};
use crate::core::content::Target;
use crate::domain::{distance, random_string, slugify, Coordinate};
use crate::infra::config::Config;
use crate::infra::http::auth::extract_token;

#[derive(Parser)]
#[command(name = "gatecloud-utils")]
#[command(about = "Gatecloud utilities - slugs, ids, distances and HTTP requests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn text into a URL slug
    Slug {
        /// Text to slugify
        text: String,
    },
    /// Generate a random string of ASCII letters
    Random {
        /// Number of characters
        #[arg(default_value_t = 16)]
        length: usize,
    },
    /// Great-circle distance in metres between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
    /// Extract the token from an Authorization header value
    Token {
        /// Header value, e.g. "Bearer abc"
        authorization: String,
    },
    /// Perform an HTTP request and print (or save) the response body
    Fetch {
        url: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Retry budget for 5xx responses
        #[arg(short, long, default_value_t = 2)]
        retry: u32,
        /// Extra header as "Name: value"; may be repeated
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
        /// Save the body to a file instead of printing JSON (for images)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Slug { text } => {
            println!("{}", slugify(&text));
            ExitCode::SUCCESS
        }
        Commands::Random { length } => {
            println!("{}", random_string(length));
            ExitCode::SUCCESS
        }
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let d = distance(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2));
            println!("{d:.3}");
            ExitCode::SUCCESS
        }
        Commands::Token { authorization } => match token(&authorization) {
            Ok(t) => {
                println!("{t}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Token extraction failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Fetch {
            url,
            method,
            retry,
            headers,
            data,
            output,
        } => match fetch(&url, &method, retry, &headers, data.as_deref(), output).await {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Request failed: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn token(authorization: &str) -> anyhow::Result<String> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization)?);
    Ok(extract_token(&headers)?)
}

fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header must look like 'Name: value', got {raw:?}"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("invalid header name in {raw:?}"))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("invalid header value in {raw:?}"))?;
    Ok((name, value))
}

async fn fetch(
    url: &str,
    method: &str,
    retry: u32,
    raw_headers: &[String],
    data: Option<&str>,
    output: Option<PathBuf>,
) -> anyhow::Result<String> {
    let cfg = Config::from_env();
    let executor = Executor::new(cfg.http).context("building http client")?;

    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid method {method:?}"))?;
    let mut headers = HeaderMap::new();
    for raw in raw_headers {
        let (name, value) = parse_header(raw)?;
        headers.append(name, value);
    }
    let mut request = Request::new(method, url)
        .with_headers(headers)
        .with_retry(retry);
    if let Some(data) = data {
        let body: serde_json::Value =
            serde_json::from_str(data).context("--data must be valid JSON")?;
        request = request.with_body(body);
    }

    match output {
        Some(path) => {
            let mut buf = Vec::new();
            let resp = executor.execute(&request, Some(Target::bytes(&mut buf))).await?;
            tokio::fs::write(&path, &buf)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            Ok(format!(
                "{} ({} bytes -> {})",
                resp.status,
                buf.len(),
                path.display()
            ))
        }
        None => {
            let mut value = serde_json::Value::Null;
            let resp = executor.execute(&request, Some(Target::json(&mut value))).await?;
            if resp.status_code == 204 {
                return Ok(resp.status);
            }
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}
