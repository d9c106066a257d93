use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use clap::{Parser, ValueEnum};
use sui_sdk::types::base_types::{ObjectID, SuiAddress};
use crate::constants::{
    DEFAULT_LOG_FILE,
    EXECUTION_TIMEOUT_SECS,
    GAS_BUDGET,
    NETWORKS,
    PLACEHOLDER_ID,
    RPC_TIMEOUT_SECS,
};
use crate::error::TipJarError;
use crate::wallet::normalize_sui_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
}

impl Network {
    fn index(self) -> usize {
        match self {
            Network::Devnet => 0,
            Network::Testnet => 1,
            Network::Mainnet => 2,
        }
    }

    pub fn name(self) -> &'static str {
        NETWORKS[self.index()].0
    }

    pub fn rpc_url(self) -> &'static str {
        NETWORKS[self.index()].1
    }
}

#[derive(Parser, Debug)]
#[command(name = "tip-jar")]
#[command(about = "Send gas-free tips to a shared Sui tip jar")]
pub struct Cli {
    /// Package that published tip_jar_contract
    #[arg(long, env = "TIP_JAR_PACKAGE_ID", default_value = PLACEHOLDER_ID)]
    pub package_id: String,

    /// Shared TipJar object
    #[arg(long, env = "TIP_JAR_ID", default_value = PLACEHOLDER_ID)]
    pub tip_jar_id: String,

    #[arg(long, value_enum, env = "TIP_JAR_NETWORK", default_value_t = Network::Testnet)]
    pub network: Network,

    /// Override the fullnode RPC url of the selected network
    #[arg(long, env = "TIP_JAR_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Address paying gas; defaults to the active address
    #[arg(long, env = "TIP_JAR_SPONSOR")]
    pub sponsor: Option<String>,

    /// Defaults to ~/.sui/sui_config/sui.keystore
    #[arg(long, env = "TIP_JAR_KEYSTORE")]
    pub keystore: Option<PathBuf>,

    /// Defaults to ~/.sui/sui_config/client.yaml
    #[arg(long, env = "TIP_JAR_CLIENT_CONFIG")]
    pub client_config: Option<PathBuf>,

    #[arg(long, default_value_t = GAS_BUDGET)]
    pub gas_budget: u64,

    #[arg(long, default_value_t = RPC_TIMEOUT_SECS)]
    pub rpc_timeout_secs: u64,

    #[arg(long, default_value_t = EXECUTION_TIMEOUT_SECS)]
    pub execution_timeout_secs: u64,

    #[arg(long, env = "TIP_JAR_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

/// Validated deployment configuration, passed to every component that
/// reads from or builds against the tip jar
#[derive(Debug, Clone)]
pub struct TipJarConfig {
    pub package_id: ObjectID,
    pub tip_jar_id: ObjectID,
    pub network: Network,
    pub rpc_url: String,
    pub sponsor: Option<SuiAddress>,
    pub keystore_path: PathBuf,
    pub client_config_path: PathBuf,
    pub gas_budget: u64,
    pub rpc_timeout: Duration,
    pub execution_timeout: Duration,
}

impl TipJarConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, TipJarError> {
        let package_id = parse_deployment_id("package id", &cli.package_id)?;
        let tip_jar_id = parse_deployment_id("tip jar id", &cli.tip_jar_id)?;

        let sponsor = cli.sponsor
            .as_deref()
            .map(|raw| {
                let normalized = normalize_sui_address(raw)?;
                SuiAddress::from_str(&normalized).map_err(|e| {
                    TipJarError::Misconfigured(format!("sponsor {}: {}", raw, e))
                })
            })
            .transpose()?;

        let sui_config_dir = || -> Result<PathBuf, TipJarError> {
            dirs::home_dir()
                .map(|home| home.join(".sui").join("sui_config"))
                .ok_or_else(|| TipJarError::Misconfigured("failed to get home directory".to_string()))
        };
        let keystore_path = match &cli.keystore {
            Some(path) => path.clone(),
            None => sui_config_dir()?.join("sui.keystore"),
        };
        let client_config_path = match &cli.client_config {
            Some(path) => path.clone(),
            None => sui_config_dir()?.join("client.yaml"),
        };

        Ok(Self {
            package_id,
            tip_jar_id,
            network: cli.network,
            rpc_url: cli.rpc_url.clone().unwrap_or_else(|| cli.network.rpc_url().to_string()),
            sponsor,
            keystore_path,
            client_config_path,
            gas_budget: cli.gas_budget,
            rpc_timeout: Duration::from_secs(cli.rpc_timeout_secs),
            execution_timeout: Duration::from_secs(cli.execution_timeout_secs),
        })
    }
}

/// Both deployment ids are required; the zero placeholder counts as missing
fn parse_deployment_id(name: &str, raw: &str) -> Result<ObjectID, TipJarError> {
    if raw.trim().is_empty() {
        return Err(TipJarError::Misconfigured(format!("{} is not set", name)));
    }
    let normalized = normalize_sui_address(raw)
        .map_err(|e| TipJarError::Misconfigured(format!("{}: {}", name, e)))?;
    let id = ObjectID::from_hex_literal(&normalized)
        .map_err(|e| TipJarError::Misconfigured(format!("{}: {}", name, e)))?;
    if id == ObjectID::new([0u8; 32]) {
        return Err(TipJarError::Misconfigured(format!(
            "{} is still the {} placeholder",
            name, PLACEHOLDER_ID
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["tip-jar", "--keystore", "/tmp/sui.keystore", "--client-config", "/tmp/client.yaml"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_placeholder_ids_are_rejected() {
        let result = TipJarConfig::from_cli(&cli(&["--package-id", "0x0", "--tip-jar-id", "0xb"]));
        assert!(matches!(result, Err(TipJarError::Misconfigured(_))));

        let result = TipJarConfig::from_cli(&cli(&["--package-id", "0xa", "--tip-jar-id", ""]));
        assert!(matches!(result, Err(TipJarError::Misconfigured(_))));
    }

    #[test]
    fn test_ids_are_normalized() {
        let config = TipJarConfig::from_cli(&cli(&[
            "--package-id", "0xA",
            "--tip-jar-id", "b",
            "--network", "devnet",
            "--sponsor", "0xC",
        ]))
        .unwrap();
        assert_eq!(config.package_id, ObjectID::from_hex_literal("0xa").unwrap());
        assert_eq!(config.tip_jar_id, ObjectID::from_hex_literal("0xb").unwrap());
        assert_eq!(config.rpc_url, "https://fullnode.devnet.sui.io:443");
        assert_eq!(config.sponsor, Some(SuiAddress::from_str(&normalize_sui_address("c").unwrap()).unwrap()));
        assert_eq!(config.rpc_timeout, Duration::from_secs(RPC_TIMEOUT_SECS));
    }

    #[test]
    fn test_malformed_id_is_misconfiguration() {
        let result = TipJarConfig::from_cli(&cli(&["--package-id", "0xnope", "--tip-jar-id", "0xb"]));
        assert!(matches!(result, Err(TipJarError::Misconfigured(_))));
    }
}
