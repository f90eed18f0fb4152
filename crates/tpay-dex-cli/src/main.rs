/*
[INPUT]:  CLI arguments, YAML configuration file, wallet keys
[OUTPUT]: Wallet sessions, pool listings and DEX transactions
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod config;
mod pools_view;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tpay_dex_adapter::{
    AddLiquidityRequest, ConnectOutcome, DexClient, LocalEvmWallet, PoolSort, PoolSummary,
    SwapRequest, filter_and_sort_pools, recover_signer,
};

use crate::config::CliConfig;
use crate::shell::{Shell, WalletOptions};

const TEST_SIGNATURE_MESSAGE: &str = "Test message for signature verification";

/// First local devnet account; never holds real funds
const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[derive(Parser, Debug)]
#[command(name = "tpay-dex", version, about = "Tpay DEX wallet and trading client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Override the configured backend URL
    #[arg(long = "backend-url", value_name = "URL", env = "TPAY_BACKEND_URL")]
    backend_url: Option<String>,
    /// Verify logins against the backend
    #[arg(long = "enable-backend")]
    enable_backend: bool,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect a wallet and sign in
    Connect {
        #[command(flatten)]
        wallet: WalletArgs,
    },
    /// List liquidity pools
    Pools {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "tvl")]
        sort: PoolSort,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Swap one token for another
    Swap {
        #[arg(long = "token-in")]
        token_in: String,
        #[arg(long = "token-out")]
        token_out: String,
        #[arg(long)]
        amount: Decimal,
        /// Defaults to the connected address
        #[arg(long)]
        recipient: Option<String>,
        #[command(flatten)]
        wallet: WalletArgs,
    },
    /// Add liquidity to a pool
    AddLiquidity {
        #[arg(long)]
        token0: String,
        #[arg(long)]
        token1: String,
        #[arg(long)]
        amount0: Decimal,
        #[arg(long)]
        amount1: Decimal,
        #[arg(long)]
        recipient: Option<String>,
        #[command(flatten)]
        wallet: WalletArgs,
    },
    /// Sign a fixed message and verify the signature shape
    TestSignature {
        /// Defaults to the well-known local development key
        #[arg(
            long = "private-key",
            env = "TPAY_TEST_PRIVATE_KEY",
            hide_env_values = true,
            default_value = DEV_PRIVATE_KEY
        )]
        private_key: String,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct WalletArgs {
    /// Connect before running the command
    #[arg(long)]
    connect: bool,
    /// Private key of the directly available wallet
    #[arg(long = "injected-key", env = "TPAY_INJECTED_KEY", hide_env_values = true)]
    injected_key: Option<String>,
    /// Pick the first configured wallet without prompting
    #[arg(long = "non-interactive")]
    non_interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?
        .with_overrides(args.backend_url.as_deref(), args.enable_backend)?;
    info!(
        backend_url = %config.dex.backend_url,
        enable_backend = config.dex.enable_backend,
        wallets = config.wallets.len(),
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given, see --help");
    };

    match command {
        Command::Connect { wallet } => {
            let shell = Arc::new(Shell::default());
            connect(&config, &wallet, shell).await?;
        }
        Command::Pools { search, sort, json } => list_pools(&config, &search, sort, json).await?,
        Command::Swap {
            token_in,
            token_out,
            amount,
            recipient,
            wallet,
        } => {
            let (client, address) = trading_client(&config, &wallet).await?;
            let request = SwapRequest {
                token_in,
                token_out,
                amount_in: amount,
                recipient: recipient.or(address).unwrap_or_default(),
            };
            let receipt = client.swap(&request).await.map_err(|err| anyhow!(err.user_message()))?;
            println!("Swap submitted: {}", receipt.tx_hash);
        }
        Command::AddLiquidity {
            token0,
            token1,
            amount0,
            amount1,
            recipient,
            wallet,
        } => {
            let (client, address) = trading_client(&config, &wallet).await?;
            let request = AddLiquidityRequest {
                token0,
                token1,
                amount0,
                amount1,
                recipient: recipient.or(address).unwrap_or_default(),
            };
            let receipt = client
                .add_liquidity(&request)
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            println!("Liquidity added: {}", receipt.tx_hash);
        }
        Command::TestSignature { private_key } => test_signature(&private_key).await?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<CliConfig> {
    match path {
        Some(path) => CliConfig::from_file(path).context("load config"),
        None => Ok(CliConfig::default()),
    }
}

async fn connect(config: &CliConfig, wallet: &WalletArgs, shell: Arc<Shell>) -> Result<()> {
    let connectors = shell::build_connectors(
        config,
        &WalletOptions {
            injected_key: wallet.injected_key.as_deref(),
            interactive: !wallet.non_interactive,
        },
    )?;
    let session = shell::wallet_session(&config.dex, connectors, shell)?;

    match session.connect().await {
        ConnectOutcome::Connected(session) => {
            info!(
                address = %session.address,
                backend_verified = session.is_backend_verified(),
                "wallet connected"
            );
            Ok(())
        }
        ConnectOutcome::Failed(err) => Err(anyhow!(err.user_message())),
        ConnectOutcome::AlreadyConnecting => bail!("a connection attempt is already in progress"),
    }
}

/// Client for trading endpoints, authorized when `--connect` produced a backend session
async fn trading_client(
    config: &CliConfig,
    wallet: &WalletArgs,
) -> Result<(DexClient, Option<String>)> {
    let mut client = DexClient::from_dex_config(&config.dex).context("create client")?;
    if !wallet.connect {
        return Ok((client, None));
    }

    let shell = Arc::new(Shell::default());
    connect(config, wallet, shell.clone()).await?;
    shell.authorize(&mut client);
    if client.bearer_token().is_none() {
        warn!("session is local only; request is sent without authorization");
    }
    Ok((client, shell.session().map(|session| session.address)))
}

async fn list_pools(config: &CliConfig, search: &str, sort: PoolSort, json: bool) -> Result<()> {
    let client = DexClient::from_dex_config(&config.dex).context("create client")?;
    let pools = client
        .query_pools()
        .await
        .map_err(|err| anyhow!(err.user_message()))?;
    let visible = filter_and_sort_pools(&pools, search, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", pools_view::render_summary(&PoolSummary::from_pools(&pools)));
    print!("{}", pools_view::render_table(&visible));
    Ok(())
}

async fn test_signature(private_key: &str) -> Result<()> {
    let wallet = LocalEvmWallet::new(private_key).context("load private key")?;
    let signature = wallet
        .sign_text(TEST_SIGNATURE_MESSAGE)
        .await
        .context("sign test message")?;
    let recovered = recover_signer(TEST_SIGNATURE_MESSAGE, &signature).context("recover signer")?;

    println!("Address:     {}", wallet.address());
    println!("Signature:   {signature}");
    println!("Length:      {}", signature.len());
    println!("Has 0x:      {}", signature.starts_with("0x"));
    println!("Recovered:   {recovered}");

    if !recovered.eq_ignore_ascii_case(wallet.address()) {
        bail!("recovered address does not match signer");
    }
    println!("Signature verified");
    Ok(())
}
