//! Form view state
//!
//! Which inputs a tab shows is a pure function of the tab and the current
//! [`FormMode`]. Front-ends recompute it after every change instead of
//! toggling widgets from event handlers. Hidden fields keep their values
//! and are still collected.

use crate::node_config::FieldId;
use serde::Serialize;

/// Form tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tab {
    Basic,
    Miner,
    Advanced,
    Developer,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Basic, Tab::Miner, Tab::Advanced, Tab::Developer];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Basic => "Basic Config",
            Tab::Miner => "Miner Config",
            Tab::Advanced => "Advanced Config",
            Tab::Developer => "Developer Config",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Basic => 0,
            Tab::Miner => 1,
            Tab::Advanced => 2,
            Tab::Developer => 3,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Every field the tab can show, in layout order.
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Tab::Basic => &[
                FieldId::Etherbase,
                FieldId::MinerThreads,
                FieldId::MinerNotify,
                FieldId::TomlConfig,
            ],
            Tab::Miner => &[
                FieldId::Etherbase,
                FieldId::MinerThreads,
                FieldId::MinerNotify,
                FieldId::MinerGasPrice,
                FieldId::MinerGasTarget,
                FieldId::MinerExtraData,
                FieldId::MinerRecommit,
                FieldId::MinerNoVerify,
            ],
            Tab::Advanced => &[
                FieldId::HttpPort,
                FieldId::HttpApi,
                FieldId::WsAddr,
                FieldId::WsPort,
                FieldId::WsOrigins,
                FieldId::WsApi,
                FieldId::GraphQl,
                FieldId::GraphQlCors,
                FieldId::GraphQlVhosts,
                FieldId::AuthRpcPort,
                FieldId::AuthRpcAddr,
                FieldId::DbEndpoint,
                FieldId::TxLookupLimit,
                FieldId::SyncMode,
                FieldId::NetworkId,
                FieldId::P2pPort,
                FieldId::DataDir,
            ],
            Tab::Developer => &[
                FieldId::Dev,
                FieldId::DevPeriod,
                FieldId::DevGasLimit,
                FieldId::Preload,
                FieldId::Exec,
            ],
        }
    }

    /// Tabs a field appears on.
    pub fn containing(field: FieldId) -> Vec<Tab> {
        Tab::ALL
            .iter()
            .copied()
            .filter(|tab| tab.fields().contains(&field))
            .collect()
    }
}

/// Mode switches that drive visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormMode {
    /// "Show HTTP & WS API methods" on the advanced tab.
    pub show_api_methods: bool,
    /// Current value of the GraphQL toggle.
    pub graphql_enabled: bool,
}

/// A row of a rendered tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// View-only switch for [`FormMode::show_api_methods`].
    ShowApiMethods,
    Field(FieldId),
}

/// Whether a field is shown under `mode`.
pub fn is_visible(field: FieldId, mode: FormMode) -> bool {
    match field {
        FieldId::HttpApi | FieldId::WsApi => mode.show_api_methods,
        FieldId::GraphQlCors | FieldId::GraphQlVhosts => {
            !mode.show_api_methods && mode.graphql_enabled
        }
        FieldId::WsPort
        | FieldId::WsOrigins
        | FieldId::GraphQl
        | FieldId::AuthRpcAddr
        | FieldId::AuthRpcPort
        | FieldId::DbEndpoint
        | FieldId::TxLookupLimit
        | FieldId::SyncMode
        | FieldId::NetworkId
        | FieldId::P2pPort
        | FieldId::DataDir => !mode.show_api_methods,
        _ => true,
    }
}

/// Visible fields of a tab under `mode`, in layout order.
pub fn visible_fields(tab: Tab, mode: FormMode) -> Vec<FieldId> {
    tab.fields()
        .iter()
        .copied()
        .filter(|field| is_visible(*field, mode))
        .collect()
}

/// Rows of a tab under `mode`, including view-only switches.
pub fn rows(tab: Tab, mode: FormMode) -> Vec<FormRow> {
    let mut rows = Vec::new();
    if tab == Tab::Advanced {
        rows.push(FormRow::ShowApiMethods);
    }
    rows.extend(visible_fields(tab, mode).into_iter().map(FormRow::Field));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_MODE: FormMode = FormMode {
        show_api_methods: true,
        graphql_enabled: false,
    };

    #[test]
    fn test_every_field_lives_on_some_tab() {
        for field in FieldId::ALL {
            assert!(!Tab::containing(field).is_empty(), "{} has no tab", field);
        }
    }

    #[test]
    fn test_default_mode_hides_api_lists_and_graphql_details() {
        let fields = visible_fields(Tab::Advanced, FormMode::default());
        assert!(!fields.contains(&FieldId::HttpApi));
        assert!(!fields.contains(&FieldId::WsApi));
        assert!(!fields.contains(&FieldId::GraphQlCors));
        assert!(!fields.contains(&FieldId::GraphQlVhosts));
        assert!(fields.contains(&FieldId::GraphQl));
        assert!(fields.contains(&FieldId::DataDir));
    }

    #[test]
    fn test_graphql_toggle_reveals_details() {
        let mode = FormMode {
            show_api_methods: false,
            graphql_enabled: true,
        };
        let fields = visible_fields(Tab::Advanced, mode);
        assert!(fields.contains(&FieldId::GraphQlCors));
        assert!(fields.contains(&FieldId::GraphQlVhosts));
    }

    #[test]
    fn test_api_mode_shows_only_interface_fields() {
        let fields = visible_fields(Tab::Advanced, API_MODE);
        assert_eq!(
            fields,
            vec![
                FieldId::HttpPort,
                FieldId::HttpApi,
                FieldId::WsAddr,
                FieldId::WsApi,
            ]
        );
    }

    #[test]
    fn test_api_mode_wins_over_graphql() {
        let mode = FormMode {
            show_api_methods: true,
            graphql_enabled: true,
        };
        assert!(!is_visible(FieldId::GraphQlCors, mode));
        assert!(!is_visible(FieldId::GraphQl, mode));
    }

    #[test]
    fn test_mode_does_not_affect_other_tabs() {
        for tab in [Tab::Basic, Tab::Miner, Tab::Developer] {
            assert_eq!(visible_fields(tab, API_MODE), tab.fields().to_vec());
        }
    }

    #[test]
    fn test_rows_put_api_switch_first_on_advanced() {
        let rows = rows(Tab::Advanced, FormMode::default());
        assert_eq!(rows[0], FormRow::ShowApiMethods);
        assert_eq!(rows[1], FormRow::Field(FieldId::HttpPort));
        assert!(!super::rows(Tab::Basic, FormMode::default()).contains(&FormRow::ShowApiMethods));
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Developer.next(), Tab::Basic);
        assert_eq!(Tab::Basic.prev(), Tab::Developer);
    }
}
