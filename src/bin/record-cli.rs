use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "record-cli")]
#[command(about = "Command-line client for the record gateway", long_about = None)]
struct Cli {
    #[arg(short, long, env = "RECORD_GATEWAY_URL", default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every record
    List,
    /// Create a record from a JSON object of fields
    Create { fields: String },
    /// Update a record's fields from a JSON object
    Update { id: String, fields: String },
    /// Delete a record
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::List => client.get(record_url(&base, None)?).send().await?,
        Commands::Create { fields } => {
            client
                .post(record_url(&base, None)?)
                .json(&json!({ "fields": parse_fields(&fields)? }))
                .send()
                .await?
        }
        Commands::Update { id, fields } => {
            client
                .put(record_url(&base, Some(&id))?)
                .json(&json!({ "fields": parse_fields(&fields)? }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(record_url(&base, Some(&id))?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

/// `{base}/record`, or `{base}/record/{id}` with the id escaped as a single
/// path segment.
fn record_url(base: &Url, id: Option<&str>) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("gateway URL '{}' cannot carry a path", base))?;
        segments.pop_if_empty().push("record");
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

fn parse_fields(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err("fields must be a JSON object".into());
    }
    Ok(value)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
