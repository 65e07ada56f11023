//! Node settings as command-line arguments
//!
//! Option names mirror the node's own flags so `gene start --http.port 8545`
//! reads the way the resulting geth invocation does.

use clap::Args;
use gene::{FieldId, FieldReadError, FieldSource};

/// Node settings shared by `start` and `args`.
#[derive(Debug, Clone, Default, Args)]
pub struct NodeArgs {
    /// TOML configuration file for the node
    #[arg(long = "config", value_name = "FILE", help_heading = "Node")]
    pub toml_config: Option<String>,

    /// HTTP-RPC server listening port (node default: 8545)
    #[arg(long = "http.port", value_name = "PORT", help_heading = "HTTP-RPC")]
    pub http_port: Option<String>,

    /// APIs offered over HTTP-RPC (comma separated or repeated)
    #[arg(long = "http.api", value_name = "MODULES", value_delimiter = ',', help_heading = "HTTP-RPC")]
    pub http_api: Vec<String>,

    /// WS-RPC server listening interface (node default: localhost)
    #[arg(long = "ws.addr", value_name = "ADDR", help_heading = "WS-RPC")]
    pub ws_addr: Option<String>,

    /// WS-RPC server listening port (node default: 8546)
    #[arg(long = "ws.port", value_name = "PORT", help_heading = "WS-RPC")]
    pub ws_port: Option<String>,

    /// Origins from which to accept websocket requests
    #[arg(long = "ws.origins", value_name = "ORIGINS", help_heading = "WS-RPC")]
    pub ws_origins: Option<String>,

    /// APIs offered over WS-RPC (comma separated or repeated)
    #[arg(long = "ws.api", value_name = "MODULES", value_delimiter = ',', help_heading = "WS-RPC")]
    pub ws_api: Vec<String>,

    /// Enable GraphQL on the HTTP-RPC server
    #[arg(long = "graphql", help_heading = "GraphQL")]
    pub graphql: bool,

    /// Domains from which to accept cross origin requests
    #[arg(long = "graphql.corsdomain", value_name = "DOMAINS", help_heading = "GraphQL")]
    pub graphql_cors: Option<String>,

    /// Virtual hostnames from which to accept requests
    #[arg(long = "graphql.vhosts", value_name = "HOSTS", help_heading = "GraphQL")]
    pub graphql_vhosts: Option<String>,

    /// Listening address for authenticated APIs
    #[arg(long = "authrpc.addr", value_name = "ADDR", help_heading = "Auth RPC")]
    pub authrpc_addr: Option<String>,

    /// Listening port for authenticated APIs
    #[arg(long = "authrpc.port", value_name = "PORT", help_heading = "Auth RPC")]
    pub authrpc_port: Option<String>,

    /// JavaScript files to preload into the console
    #[arg(long = "preload", value_name = "FILES", help_heading = "Developer")]
    pub preload: Option<String>,

    /// JavaScript statement to execute
    #[arg(long = "exec", value_name = "JS", help_heading = "Developer")]
    pub exec: Option<String>,

    /// URL for remote database
    #[arg(long = "db.endpoint", value_name = "URL", help_heading = "Node")]
    pub db_endpoint: Option<String>,

    /// Number of recent blocks to keep a transaction index for
    #[arg(long = "txlookuplimit", value_name = "BLOCKS", help_heading = "Node")]
    pub tx_lookup_limit: Option<String>,

    /// Blockchain sync mode ("snap", "full" or "light")
    #[arg(long = "syncmode", value_name = "MODE", help_heading = "Node")]
    pub sync_mode: Option<String>,

    /// Network identifier
    #[arg(long = "networkid", value_name = "ID", help_heading = "Node")]
    pub network_id: Option<String>,

    /// Network listening port (node default: 30303)
    #[arg(long = "port", value_name = "PORT", help_heading = "Node")]
    pub p2p_port: Option<String>,

    /// Data directory for the databases and keystore
    #[arg(long = "datadir", value_name = "DIR", help_heading = "Node")]
    pub data_dir: Option<String>,

    /// Public address for block mining rewards
    #[arg(long = "miner.etherbase", value_name = "ADDRESS", help_heading = "Miner")]
    pub etherbase: Option<String>,

    /// Number of CPU threads to use for mining
    #[arg(long = "miner.threads", value_name = "N", help_heading = "Miner")]
    pub miner_threads: Option<String>,

    /// HTTP URLs to notify of new work packages
    #[arg(long = "miner.notify", value_name = "URLS", help_heading = "Miner")]
    pub miner_notify: Option<String>,

    /// Minimum gas price for mining a transaction
    #[arg(long = "miner.gasprice", value_name = "WEI", help_heading = "Miner")]
    pub miner_gas_price: Option<String>,

    /// Target gas ceiling for mined blocks
    #[arg(long = "miner.gastarget", value_name = "GAS", help_heading = "Miner")]
    pub miner_gas_target: Option<String>,

    /// Block extra data set by the miner
    #[arg(long = "miner.extradata", value_name = "DATA", help_heading = "Miner")]
    pub miner_extra_data: Option<String>,

    /// Time interval to recreate the block being mined
    #[arg(long = "miner.recommit", value_name = "DURATION", help_heading = "Miner")]
    pub miner_recommit: Option<String>,

    /// Disable remote sealing verification
    #[arg(long = "miner.noverify", help_heading = "Miner")]
    pub miner_no_verify: bool,

    /// Ephemeral proof-of-authority network with a pre-funded developer account
    #[arg(long = "dev", help_heading = "Developer")]
    pub dev: bool,

    /// Block period to use in developer mode
    #[arg(long = "dev.period", value_name = "SECONDS", help_heading = "Developer")]
    pub dev_period: Option<String>,

    /// Initial block gas limit in developer mode
    #[arg(long = "dev.gaslimit", value_name = "GAS", help_heading = "Developer")]
    pub dev_gas_limit: Option<String>,
}

impl NodeArgs {
    fn text(&self, field: FieldId) -> Option<&Option<String>> {
        let slot = match field {
            FieldId::TomlConfig => &self.toml_config,
            FieldId::HttpPort => &self.http_port,
            FieldId::WsAddr => &self.ws_addr,
            FieldId::WsPort => &self.ws_port,
            FieldId::WsOrigins => &self.ws_origins,
            FieldId::GraphQlCors => &self.graphql_cors,
            FieldId::GraphQlVhosts => &self.graphql_vhosts,
            FieldId::AuthRpcAddr => &self.authrpc_addr,
            FieldId::AuthRpcPort => &self.authrpc_port,
            FieldId::Preload => &self.preload,
            FieldId::Exec => &self.exec,
            FieldId::DbEndpoint => &self.db_endpoint,
            FieldId::TxLookupLimit => &self.tx_lookup_limit,
            FieldId::SyncMode => &self.sync_mode,
            FieldId::NetworkId => &self.network_id,
            FieldId::P2pPort => &self.p2p_port,
            FieldId::DataDir => &self.data_dir,
            FieldId::Etherbase => &self.etherbase,
            FieldId::MinerThreads => &self.miner_threads,
            FieldId::MinerNotify => &self.miner_notify,
            FieldId::MinerGasPrice => &self.miner_gas_price,
            FieldId::MinerGasTarget => &self.miner_gas_target,
            FieldId::MinerExtraData => &self.miner_extra_data,
            FieldId::MinerRecommit => &self.miner_recommit,
            FieldId::DevPeriod => &self.dev_period,
            FieldId::DevGasLimit => &self.dev_gas_limit,
            _ => return None,
        };
        Some(slot)
    }
}

fn mismatch(field: FieldId, expected: &'static str) -> FieldReadError {
    FieldReadError::KindMismatch {
        field,
        expected,
        actual: field.kind().as_str(),
    }
}

impl FieldSource for NodeArgs {
    fn read_text(&self, field: FieldId) -> Result<String, FieldReadError> {
        self.text(field)
            .map(|value| value.clone().unwrap_or_default())
            .ok_or_else(|| mismatch(field, "text"))
    }

    fn read_toggle(&self, field: FieldId) -> Result<bool, FieldReadError> {
        match field {
            FieldId::GraphQl => Ok(self.graphql),
            FieldId::MinerNoVerify => Ok(self.miner_no_verify),
            FieldId::Dev => Ok(self.dev),
            _ => Err(mismatch(field, "toggle")),
        }
    }

    fn read_list(&self, field: FieldId) -> Result<Vec<String>, FieldReadError> {
        let items = match field {
            FieldId::HttpApi => &self.http_api,
            FieldId::WsApi => &self.ws_api,
            _ => return Err(mismatch(field, "list")),
        };
        Ok(items.clone())
    }
}
