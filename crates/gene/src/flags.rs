//! Flag mapping table and argument vector construction
//!
//! The table is the only place that knows which node flag a field turns
//! into. `build_arguments` walks it in declaration order, so the same
//! configuration always yields the same argument vector.

use crate::node_config::{FieldId, FieldKind, FieldValue, NodeLaunchConfig};
use serde::Serialize;

/// One row of the flag mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagMapping {
    pub field: FieldId,
    /// Flag name without the leading dashes.
    pub flag: &'static str,
    pub kind: FieldKind,
}

const fn text(field: FieldId, flag: &'static str) -> FlagMapping {
    FlagMapping {
        field,
        flag,
        kind: FieldKind::Text,
    }
}

const fn toggle(field: FieldId, flag: &'static str) -> FlagMapping {
    FlagMapping {
        field,
        flag,
        kind: FieldKind::Toggle,
    }
}

const fn list(field: FieldId, flag: &'static str) -> FlagMapping {
    FlagMapping {
        field,
        flag,
        kind: FieldKind::List,
    }
}

/// Field → flag table, in emission order.
pub const FLAG_TABLE: [FlagMapping; 31] = [
    text(FieldId::TomlConfig, "config"),
    text(FieldId::HttpPort, "http.port"),
    list(FieldId::HttpApi, "http.api"),
    text(FieldId::WsAddr, "ws.addr"),
    text(FieldId::WsPort, "ws.port"),
    text(FieldId::WsOrigins, "ws.origins"),
    list(FieldId::WsApi, "ws.api"),
    toggle(FieldId::GraphQl, "graphql"),
    text(FieldId::GraphQlCors, "graphql.corsdomain"),
    text(FieldId::GraphQlVhosts, "graphql.vhosts"),
    text(FieldId::AuthRpcAddr, "authrpc.addr"),
    text(FieldId::AuthRpcPort, "authrpc.port"),
    text(FieldId::Preload, "preload"),
    text(FieldId::Exec, "exec"),
    text(FieldId::DbEndpoint, "db.endpoint"),
    text(FieldId::TxLookupLimit, "txlookuplimit"),
    text(FieldId::SyncMode, "syncmode"),
    text(FieldId::NetworkId, "networkid"),
    text(FieldId::P2pPort, "port"),
    text(FieldId::DataDir, "datadir"),
    text(FieldId::Etherbase, "miner.etherbase"),
    text(FieldId::MinerThreads, "miner.threads"),
    text(FieldId::MinerNotify, "miner.notify"),
    text(FieldId::MinerGasPrice, "miner.gasprice"),
    text(FieldId::MinerGasTarget, "miner.gastarget"),
    text(FieldId::MinerExtraData, "miner.extradata"),
    text(FieldId::MinerRecommit, "miner.recommit"),
    toggle(FieldId::MinerNoVerify, "miner.noverify"),
    toggle(FieldId::Dev, "dev"),
    text(FieldId::DevPeriod, "dev.period"),
    text(FieldId::DevGasLimit, "dev.gaslimit"),
];

/// Table row for a field. The table is indexed by declaration order.
pub fn mapping_for(field: FieldId) -> &'static FlagMapping {
    &FLAG_TABLE[field.index()]
}

impl FieldId {
    pub fn kind(self) -> FieldKind {
        mapping_for(self).kind
    }

    /// Flag with its leading dashes, e.g. `--http.port`.
    pub fn flag(self) -> String {
        format!("--{}", mapping_for(self).flag)
    }
}

/// Build the node's argument vector from a configuration snapshot.
///
/// Zero values are skipped entirely; defaults are left to the node.
pub fn build_arguments(config: &NodeLaunchConfig) -> Vec<String> {
    let mut args = Vec::new();

    for mapping in FLAG_TABLE.iter() {
        let value = config.value(mapping.field);
        if !value.is_present() {
            continue;
        }

        let flag = format!("--{}", mapping.flag);
        match value {
            FieldValue::Text(text) => {
                args.push(flag);
                args.push(text.to_string());
            }
            FieldValue::List(items) => {
                args.push(flag);
                args.push(items.join(","));
            }
            FieldValue::Toggle(_) => args.push(flag),
        }
    }

    args
}

/// Render a command line for display, quoting tokens the shell would split.
pub fn render_command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:,=@+%".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_follows_field_order() {
        assert_eq!(FLAG_TABLE.len(), FieldId::ALL.len());
        for (row, field) in FLAG_TABLE.iter().zip(FieldId::ALL.iter()) {
            assert_eq!(row.field, *field);
        }
    }

    #[test]
    fn test_list_fields_are_list_kind() {
        for field in FieldId::ALL {
            let expected = matches!(field, FieldId::HttpApi | FieldId::WsApi);
            assert_eq!(field.kind() == FieldKind::List, expected, "{}", field);
        }
    }

    #[test]
    fn test_flags_are_unique() {
        let mut flags: Vec<_> = FLAG_TABLE.iter().map(|m| m.flag).collect();
        flags.sort_unstable();
        flags.dedup();
        assert_eq!(flags.len(), FLAG_TABLE.len());
    }

    #[test]
    fn test_empty_config_produces_no_arguments() {
        assert!(build_arguments(&NodeLaunchConfig::default()).is_empty());
    }

    #[test]
    fn test_mining_example() {
        let config = NodeLaunchConfig {
            etherbase: "0xABC".to_string(),
            data_dir: "/tmp/data".to_string(),
            p2p_port: String::new(),
            http_api: strings(&["eth", "net"]),
            ..Default::default()
        };

        let args = build_arguments(&config);

        assert_eq!(
            args,
            strings(&[
                "--http.api",
                "eth,net",
                "--datadir",
                "/tmp/data",
                "--miner.etherbase",
                "0xABC",
            ])
        );
        assert!(!args.iter().any(|a| a == "--port"));
    }

    #[test]
    fn test_text_value_follows_its_flag() {
        let config = NodeLaunchConfig {
            http_port: "not-a-port".to_string(),
            ..Default::default()
        };
        assert_eq!(build_arguments(&config), strings(&["--http.port", "not-a-port"]));
    }

    #[test]
    fn test_list_keeps_input_order() {
        let config = NodeLaunchConfig {
            ws_api: strings(&["web3", "eth", "admin"]),
            ..Default::default()
        };
        assert_eq!(build_arguments(&config), strings(&["--ws.api", "web3,eth,admin"]));
    }

    #[test]
    fn test_toggles_emit_bare_flags() {
        let config = NodeLaunchConfig {
            graphql: true,
            miner_no_verify: false,
            dev: true,
            dev_period: "0".to_string(),
            ..Default::default()
        };
        assert_eq!(
            build_arguments(&config),
            strings(&["--graphql", "--dev", "--dev.period", "0"])
        );
    }

    #[test]
    fn test_every_field_maps_when_set() {
        let mut config = NodeLaunchConfig::default();
        for field in FieldId::ALL {
            match field.kind() {
                FieldKind::Text => config.set_text(field, format!("v-{}", field.name())),
                FieldKind::Toggle => config.set_toggle(field, true),
                FieldKind::List => config.set_list(field, strings(&["eth"])),
            }
        }

        let args = build_arguments(&config);
        let flags: Vec<_> = args.iter().filter(|a| a.starts_with("--")).cloned().collect();
        let expected: Vec<_> = FieldId::ALL.iter().map(|f| f.flag()).collect();
        assert_eq!(flags, expected);
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = NodeLaunchConfig {
            toml_config: "/etc/geth.toml".to_string(),
            sync_mode: "full".to_string(),
            miner_no_verify: true,
            http_api: strings(&["eth", "txpool"]),
            ..Default::default()
        };
        assert_eq!(build_arguments(&config), build_arguments(&config.clone()));
    }

    #[test]
    fn test_render_command_line_quotes_when_needed() {
        let line = render_command_line(
            "../geth",
            &strings(&["--miner.extradata", "hello world", "--http.api", "eth,net"]),
        );
        assert_eq!(line, "../geth --miner.extradata 'hello world' --http.api eth,net");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
