//! `kvengine-client`: a thin CLI over the `KeyValue` gRPC service,
//! translating `original_source/lbclient.py`'s `argparse` subcommand
//! surface (`set`, `get`, `getPrefix`, `stat`) into `clap` subcommands.

mod proto;

use proto::key_value_client::KeyValueClient;
use proto::{GetPrefixRequest, GetRequest, SetRequest, StatRequest};

use clap::{Parser, Subcommand};

/// Reference value from §6: 128 MiB applied to both send and receive.
const DEFAULT_MAX_MESSAGE_SIZE: usize = 128 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "kvengine-client", about = "CLI client for the kvengine gRPC store")]
struct Cli {
    /// Port the server is listening on.
    #[arg(long, default_value_t = 50051)]
    port: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a key and a value.
    Set { key: String, value: String },
    /// Fetch the value for a key.
    Get { key: String },
    /// Fetch every key/value pair whose key starts with `prefix`.
    #[command(name = "get-prefix")]
    GetPrefix {
        prefix: String,
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Print server-side counters.
    Stat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let endpoint = format!("http://localhost:{}", cli.port);

    let channel = tonic::transport::Channel::from_shared(endpoint)?
        .connect()
        .await?;

    let mut client = KeyValueClient::new(channel)
        .max_decoding_message_size(DEFAULT_MAX_MESSAGE_SIZE)
        .max_encoding_message_size(DEFAULT_MAX_MESSAGE_SIZE);

    match cli.command {
        Command::Set { key, value } => {
            let resp = client
                .set(SetRequest { key, value: value.into_bytes() })
                .await?
                .into_inner();
            println!("set succeeded: {}", resp.success);
        }
        Command::Get { key } => {
            let resp = client.get(GetRequest { key }).await?.into_inner();
            if resp.found {
                println!("value: {}", String::from_utf8_lossy(&resp.value));
            } else {
                println!("key not found");
            }
        }
        Command::GetPrefix { prefix, max_results } => {
            let resp = client
                .get_prefix(GetPrefixRequest { prefix, max_results })
                .await?
                .into_inner();
            if resp.pairs.is_empty() {
                println!("no keys found with that prefix");
            } else {
                println!("found {} pairs:", resp.pairs.len());
                for pair in resp.pairs {
                    println!("  {}: {}", pair.key, String::from_utf8_lossy(&pair.value));
                }
            }
        }
        Command::Stat => {
            let resp = client.stat(StatRequest {}).await?.into_inner();
            println!("--- server stats ---");
            println!("key_count: {}", resp.key_count);
            println!("total_requests: {}", resp.total_requests);
            println!("server_start_time: {}", resp.server_start_time);
            println!("set_count: {}", resp.set_count);
            println!("get_count: {}", resp.get_count);
            println!("getprefix_count: {}", resp.getprefix_count);
        }
    }

    Ok(())
}
