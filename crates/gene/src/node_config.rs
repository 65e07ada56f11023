//! Node launch configuration record
//!
//! `NodeLaunchConfig` is the flat snapshot of settings gathered before each
//! launch. Every field is optional in the sense that its zero value (empty
//! string, empty list, `false`) means "leave the flag off and let the node
//! pick its own default".

use serde::Serialize;
use std::fmt;

/// API modules offered by the node's RPC servers.
pub const API_MODULES: &[&str] = &[
    "eth", "net", "web3", "txpool", "debug", "admin", "miner", "shh", "clique", "les",
];

/// How a field is represented and rendered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `--flag value`
    Text,
    /// `--flag`
    Toggle,
    /// `--flag a,b,c`
    List,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Toggle => "toggle",
            FieldKind::List => "list",
        }
    }
}

/// Identifies one setting of the record.
///
/// Declaration order matches the flag table and therefore the order of
/// the generated argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    TomlConfig,
    HttpPort,
    HttpApi,
    WsAddr,
    WsPort,
    WsOrigins,
    WsApi,
    GraphQl,
    GraphQlCors,
    GraphQlVhosts,
    AuthRpcAddr,
    AuthRpcPort,
    Preload,
    Exec,
    DbEndpoint,
    TxLookupLimit,
    SyncMode,
    NetworkId,
    P2pPort,
    DataDir,
    Etherbase,
    MinerThreads,
    MinerNotify,
    MinerGasPrice,
    MinerGasTarget,
    MinerExtraData,
    MinerRecommit,
    MinerNoVerify,
    Dev,
    DevPeriod,
    DevGasLimit,
}

impl FieldId {
    pub const ALL: [FieldId; 31] = [
        FieldId::TomlConfig,
        FieldId::HttpPort,
        FieldId::HttpApi,
        FieldId::WsAddr,
        FieldId::WsPort,
        FieldId::WsOrigins,
        FieldId::WsApi,
        FieldId::GraphQl,
        FieldId::GraphQlCors,
        FieldId::GraphQlVhosts,
        FieldId::AuthRpcAddr,
        FieldId::AuthRpcPort,
        FieldId::Preload,
        FieldId::Exec,
        FieldId::DbEndpoint,
        FieldId::TxLookupLimit,
        FieldId::SyncMode,
        FieldId::NetworkId,
        FieldId::P2pPort,
        FieldId::DataDir,
        FieldId::Etherbase,
        FieldId::MinerThreads,
        FieldId::MinerNotify,
        FieldId::MinerGasPrice,
        FieldId::MinerGasTarget,
        FieldId::MinerExtraData,
        FieldId::MinerRecommit,
        FieldId::MinerNoVerify,
        FieldId::Dev,
        FieldId::DevPeriod,
        FieldId::DevGasLimit,
    ];

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, used in JSON output and log lines.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::TomlConfig => "toml_config",
            FieldId::HttpPort => "http_port",
            FieldId::HttpApi => "http_api",
            FieldId::WsAddr => "ws_addr",
            FieldId::WsPort => "ws_port",
            FieldId::WsOrigins => "ws_origins",
            FieldId::WsApi => "ws_api",
            FieldId::GraphQl => "graphql",
            FieldId::GraphQlCors => "graphql_cors",
            FieldId::GraphQlVhosts => "graphql_vhosts",
            FieldId::AuthRpcAddr => "authrpc_addr",
            FieldId::AuthRpcPort => "authrpc_port",
            FieldId::Preload => "preload",
            FieldId::Exec => "exec",
            FieldId::DbEndpoint => "db_endpoint",
            FieldId::TxLookupLimit => "tx_lookup_limit",
            FieldId::SyncMode => "sync_mode",
            FieldId::NetworkId => "network_id",
            FieldId::P2pPort => "p2p_port",
            FieldId::DataDir => "data_dir",
            FieldId::Etherbase => "etherbase",
            FieldId::MinerThreads => "miner_threads",
            FieldId::MinerNotify => "miner_notify",
            FieldId::MinerGasPrice => "miner_gas_price",
            FieldId::MinerGasTarget => "miner_gas_target",
            FieldId::MinerExtraData => "miner_extra_data",
            FieldId::MinerRecommit => "miner_recommit",
            FieldId::MinerNoVerify => "miner_no_verify",
            FieldId::Dev => "dev",
            FieldId::DevPeriod => "dev_period",
            FieldId::DevGasLimit => "dev_gas_limit",
        }
    }

    /// Human-readable form label.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::TomlConfig => "TOML config file location",
            FieldId::HttpPort => "HTTP-RPC server listening port (default: 8545)",
            FieldId::HttpApi => "APIs offered over the HTTP-RPC interface",
            FieldId::WsAddr => "WS-RPC server listening interface (default: localhost)",
            FieldId::WsPort => "WS-RPC server listening port (default: 8546)",
            FieldId::WsOrigins => "WS-RPC allowed origins list",
            FieldId::WsApi => "APIs offered over the WS-RPC interface",
            FieldId::GraphQl => "Enable GraphQL on the HTTP-RPC server",
            FieldId::GraphQlCors => "GraphQL CORS domains (comma separated)",
            FieldId::GraphQlVhosts => "GraphQL virtual hostnames (default: localhost)",
            FieldId::AuthRpcAddr => "Listening address for authenticated APIs (default: localhost)",
            FieldId::AuthRpcPort => "Listening port for authenticated APIs (default: 8551)",
            FieldId::Preload => "JavaScript files to preload into the console",
            FieldId::Exec => "JavaScript statement to execute",
            FieldId::DbEndpoint => "URL for remote database",
            FieldId::TxLookupLimit => "Recent blocks to keep a transaction index for",
            FieldId::SyncMode => "Blockchain sync mode (snap, full or light)",
            FieldId::NetworkId => "Network identifier",
            FieldId::P2pPort => "Network listening port (default: 30303)",
            FieldId::DataDir => "Data directory for the databases and keystore",
            FieldId::Etherbase => "Public address for block mining rewards",
            FieldId::MinerThreads => "CPU threads to use for mining (default: 0)",
            FieldId::MinerNotify => "URLs to notify of new work packages (comma separated)",
            FieldId::MinerGasPrice => "Minimum gas price for mining a transaction",
            FieldId::MinerGasTarget => "Target gas ceiling for mined blocks",
            FieldId::MinerExtraData => "Block extra data set by the miner",
            FieldId::MinerRecommit => "Interval to recreate the block being mined",
            FieldId::MinerNoVerify => "Disable remote sealing verification",
            FieldId::Dev => "Ephemeral proof-of-authority developer network",
            FieldId::DevPeriod => "Block period in developer mode (0 = on pending tx)",
            FieldId::DevGasLimit => "Initial block gas limit in developer mode",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a single field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Toggle(bool),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// Whether the value should put its flag on the command line.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Toggle(on) => *on,
            FieldValue::List(items) => !items.is_empty(),
        }
    }
}

/// Snapshot of node settings, consumed once per launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeLaunchConfig {
    pub toml_config: String,

    pub http_port: String,
    pub http_api: Vec<String>,

    pub ws_addr: String,
    pub ws_port: String,
    pub ws_origins: String,
    pub ws_api: Vec<String>,

    pub graphql: bool,
    pub graphql_cors: String,
    pub graphql_vhosts: String,

    pub authrpc_addr: String,
    pub authrpc_port: String,

    pub preload: String,
    pub exec: String,

    pub db_endpoint: String,
    pub tx_lookup_limit: String,
    pub sync_mode: String,
    pub network_id: String,
    pub p2p_port: String,
    pub data_dir: String,

    pub etherbase: String,
    pub miner_threads: String,
    pub miner_notify: String,
    pub miner_gas_price: String,
    pub miner_gas_target: String,
    pub miner_extra_data: String,
    pub miner_recommit: String,
    pub miner_no_verify: bool,

    pub dev: bool,
    pub dev_period: String,
    pub dev_gas_limit: String,
}

impl NodeLaunchConfig {
    /// Read a field by id.
    pub fn value(&self, field: FieldId) -> FieldValue<'_> {
        match field {
            FieldId::GraphQl => FieldValue::Toggle(self.graphql),
            FieldId::MinerNoVerify => FieldValue::Toggle(self.miner_no_verify),
            FieldId::Dev => FieldValue::Toggle(self.dev),
            FieldId::HttpApi => FieldValue::List(&self.http_api),
            FieldId::WsApi => FieldValue::List(&self.ws_api),
            text => FieldValue::Text(self.text_ref(text).map(String::as_str).unwrap_or("")),
        }
    }

    /// True when no field would produce a flag.
    pub fn is_empty(&self) -> bool {
        FieldId::ALL.iter().all(|field| !self.value(*field).is_present())
    }

    /// Fields holding a non-zero value, in declaration order.
    pub fn present_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .iter()
            .copied()
            .filter(|field| self.value(*field).is_present())
            .collect()
    }

    pub(crate) fn set_text(&mut self, field: FieldId, value: String) {
        if let Some(slot) = self.text_mut(field) {
            *slot = value;
        }
    }

    pub(crate) fn set_toggle(&mut self, field: FieldId, value: bool) {
        match field {
            FieldId::GraphQl => self.graphql = value,
            FieldId::MinerNoVerify => self.miner_no_verify = value,
            FieldId::Dev => self.dev = value,
            _ => {}
        }
    }

    pub(crate) fn set_list(&mut self, field: FieldId, value: Vec<String>) {
        match field {
            FieldId::HttpApi => self.http_api = value,
            FieldId::WsApi => self.ws_api = value,
            _ => {}
        }
    }

    fn text_ref(&self, field: FieldId) -> Option<&String> {
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
            FieldId::HttpApi
            | FieldId::WsApi
            | FieldId::GraphQl
            | FieldId::MinerNoVerify
            | FieldId::Dev => return None,
        };
        Some(slot)
    }

    fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        let slot = match field {
            FieldId::TomlConfig => &mut self.toml_config,
            FieldId::HttpPort => &mut self.http_port,
            FieldId::WsAddr => &mut self.ws_addr,
            FieldId::WsPort => &mut self.ws_port,
            FieldId::WsOrigins => &mut self.ws_origins,
            FieldId::GraphQlCors => &mut self.graphql_cors,
            FieldId::GraphQlVhosts => &mut self.graphql_vhosts,
            FieldId::AuthRpcAddr => &mut self.authrpc_addr,
            FieldId::AuthRpcPort => &mut self.authrpc_port,
            FieldId::Preload => &mut self.preload,
            FieldId::Exec => &mut self.exec,
            FieldId::DbEndpoint => &mut self.db_endpoint,
            FieldId::TxLookupLimit => &mut self.tx_lookup_limit,
            FieldId::SyncMode => &mut self.sync_mode,
            FieldId::NetworkId => &mut self.network_id,
            FieldId::P2pPort => &mut self.p2p_port,
            FieldId::DataDir => &mut self.data_dir,
            FieldId::Etherbase => &mut self.etherbase,
            FieldId::MinerThreads => &mut self.miner_threads,
            FieldId::MinerNotify => &mut self.miner_notify,
            FieldId::MinerGasPrice => &mut self.miner_gas_price,
            FieldId::MinerGasTarget => &mut self.miner_gas_target,
            FieldId::MinerExtraData => &mut self.miner_extra_data,
            FieldId::MinerRecommit => &mut self.miner_recommit,
            FieldId::DevPeriod => &mut self.dev_period,
            FieldId::DevGasLimit => &mut self.dev_gas_limit,
            FieldId::HttpApi
            | FieldId::WsApi
            | FieldId::GraphQl
            | FieldId::MinerNoVerify
            | FieldId::Dev => return None,
        };
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (idx, field) in FieldId::ALL.iter().enumerate() {
            assert_eq!(field.index(), idx, "{} out of order", field);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = FieldId::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = NodeLaunchConfig::default();
        assert!(config.is_empty());
        assert!(config.present_fields().is_empty());
    }

    #[test]
    fn test_value_reads_named_fields() {
        let config = NodeLaunchConfig {
            etherbase: "0xABC".to_string(),
            http_api: vec!["eth".to_string()],
            dev: true,
            ..Default::default()
        };

        assert_eq!(config.value(FieldId::Etherbase), FieldValue::Text("0xABC"));
        assert_eq!(config.value(FieldId::DataDir), FieldValue::Text(""));
        assert_eq!(config.value(FieldId::Dev), FieldValue::Toggle(true));
        assert_eq!(
            config.present_fields(),
            vec![FieldId::HttpApi, FieldId::Etherbase, FieldId::Dev]
        );
    }

    #[test]
    fn test_setters_ignore_mismatched_kind() {
        let mut config = NodeLaunchConfig::default();
        config.set_text(FieldId::Dev, "yes".to_string());
        config.set_toggle(FieldId::DataDir, true);
        config.set_list(FieldId::Etherbase, vec!["x".to_string()]);
        assert!(config.is_empty());

        config.set_text(FieldId::WsOrigins, "*".to_string());
        config.set_list(FieldId::WsApi, vec!["net".to_string()]);
        assert_eq!(config.ws_origins, "*");
        assert_eq!(config.ws_api, vec!["net".to_string()]);
    }

    #[test]
    fn test_whitespace_text_counts_as_present() {
        // No trimming or validation: the node decides what " " means.
        let value = FieldValue::Text(" ");
        assert!(value.is_present());
        assert!(!FieldValue::List(&[]).is_present());
        assert!(!FieldValue::Toggle(false).is_present());
    }
}
