use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "echo-cli")]
#[command(about = "Client for the parameter echo services", long_about = None)]
struct Cli {
    /// Base URL of the service to call.
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET / (root service)
    Hello,
    /// GET /items/{item_id} (root or typed service)
    Item { item_id: String },
    /// GET /items/ with skip/limit (root service)
    Items {
        #[arg(long)]
        skip: Option<String>,
        #[arg(long)]
        limit: Option<String>,
    },
    /// GET /getdata/ (typed service)
    GetData {
        #[arg(long)]
        data: Option<String>,
    },
    /// GET /dataitems/ (hints service)
    DataItems { data: Option<String> },
    /// GET /items/ with repeated q (hints service)
    ListQ {
        #[arg(short, long = "q")]
        q: Vec<String>,
    },
    /// POST /create-item/ with a JSON body (hints service)
    CreateItem { json: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Hello => client.get(format!("{}/", base)),
        Commands::Item { item_id } => client.get(format!("{}/items/{}", base, item_id)),
        Commands::Items { skip, limit } => {
            let mut query = Vec::new();
            if let Some(skip) = skip {
                query.push(("skip", skip));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit));
            }
            client.get(format!("{}/items/", base)).query(&query)
        }
        Commands::GetData { data } => {
            let query: Vec<_> = data.into_iter().map(|d| ("data", d)).collect();
            client.get(format!("{}/getdata/", base)).query(&query)
        }
        Commands::DataItems { data } => {
            let query: Vec<_> = data.into_iter().map(|d| ("data", d)).collect();
            client.get(format!("{}/dataitems/", base)).query(&query)
        }
        Commands::ListQ { q } => {
            let query: Vec<_> = q.into_iter().map(|v| ("q", v)).collect();
            client.get(format!("{}/items/", base)).query(&query)
        }
        Commands::CreateItem { json } => {
            let body: Value = serde_json::from_str(&json)?;
            client.post(format!("{}/create-item/", base)).json(&body)
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
