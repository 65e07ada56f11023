//! Form values behind the TUI
//!
//! One value per field, shared by every tab that shows the field. The
//! collector reads it through [`FieldSource`] when the node is started.

use gene::{FieldId, FieldKind, FieldReadError, FieldSource, FormMode, API_MODULES};
use std::collections::BTreeMap;

/// Current value of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Toggle(bool),
    List(Vec<String>),
}

impl FormValue {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FormValue::Text(String::new()),
            FieldKind::Toggle => FormValue::Toggle(false),
            FieldKind::List => FormValue::List(Vec::new()),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            FormValue::Text(_) => "text",
            FormValue::Toggle(_) => "toggle",
            FormValue::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    values: BTreeMap<FieldId, FormValue>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let values = FieldId::ALL
            .iter()
            .map(|field| (*field, FormValue::empty(field.kind())))
            .collect();
        Self { values }
    }

    pub fn text(&self, field: FieldId) -> &str {
        match self.values.get(&field) {
            Some(FormValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn toggled(&self, field: FieldId) -> bool {
        matches!(self.values.get(&field), Some(FormValue::Toggle(true)))
    }

    pub fn list(&self, field: FieldId) -> &[String] {
        match self.values.get(&field) {
            Some(FormValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) {
        if let Some(FormValue::Text(text)) = self.values.get_mut(&field) {
            *text = value.into();
        }
    }

    pub fn push_char(&mut self, field: FieldId, ch: char) {
        if let Some(FormValue::Text(text)) = self.values.get_mut(&field) {
            text.push(ch);
        }
    }

    pub fn pop_char(&mut self, field: FieldId) {
        if let Some(FormValue::Text(text)) = self.values.get_mut(&field) {
            text.pop();
        }
    }

    pub fn flip(&mut self, field: FieldId) {
        if let Some(FormValue::Toggle(on)) = self.values.get_mut(&field) {
            *on = !*on;
        }
    }

    /// Select or deselect an API module. Selections stay in catalog order.
    pub fn toggle_module(&mut self, field: FieldId, module: &str) {
        let Some(FormValue::List(items)) = self.values.get_mut(&field) else {
            return;
        };

        if let Some(pos) = items.iter().position(|m| m == module) {
            items.remove(pos);
            return;
        }

        items.push(module.to_string());
        items.sort_by_key(|m| {
            API_MODULES
                .iter()
                .position(|known| known == m)
                .unwrap_or(API_MODULES.len())
        });
    }

    /// Visibility switches derived from current values.
    pub fn mode(&self, show_api_methods: bool) -> FormMode {
        FormMode {
            show_api_methods,
            graphql_enabled: self.toggled(FieldId::GraphQl),
        }
    }

    fn read(&self, field: FieldId, expected: &'static str) -> Result<&FormValue, FieldReadError> {
        let value = self
            .values
            .get(&field)
            .ok_or(FieldReadError::Unbound(field))?;
        if value.kind_name() != expected {
            return Err(FieldReadError::KindMismatch {
                field,
                expected,
                actual: value.kind_name(),
            });
        }
        Ok(value)
    }
}

impl FieldSource for FormState {
    fn read_text(&self, field: FieldId) -> Result<String, FieldReadError> {
        match self.read(field, "text")? {
            FormValue::Text(text) => Ok(text.clone()),
            _ => Ok(String::new()),
        }
    }

    fn read_toggle(&self, field: FieldId) -> Result<bool, FieldReadError> {
        match self.read(field, "toggle")? {
            FormValue::Toggle(on) => Ok(*on),
            _ => Ok(false),
        }
    }

    fn read_list(&self, field: FieldId) -> Result<Vec<String>, FieldReadError> {
        match self.read(field, "list")? {
            FormValue::List(items) => Ok(items.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gene::{build_arguments, collect_snapshot};

    #[test]
    fn test_new_form_collects_empty_config() {
        let form = FormState::new();
        assert!(collect_snapshot(&form).is_empty());
    }

    #[test]
    fn test_text_editing() {
        let mut form = FormState::new();
        for ch in "303x".chars() {
            form.push_char(FieldId::P2pPort, ch);
        }
        form.pop_char(FieldId::P2pPort);
        form.push_char(FieldId::P2pPort, '3');
        assert_eq!(form.text(FieldId::P2pPort), "3033");
    }

    #[test]
    fn test_text_edits_ignore_non_text_fields() {
        let mut form = FormState::new();
        form.push_char(FieldId::Dev, 'y');
        form.set_text(FieldId::HttpApi, "eth");
        assert!(!form.toggled(FieldId::Dev));
        assert!(form.list(FieldId::HttpApi).is_empty());
    }

    #[test]
    fn test_modules_keep_catalog_order() {
        let mut form = FormState::new();
        form.toggle_module(FieldId::HttpApi, "web3");
        form.toggle_module(FieldId::HttpApi, "eth");
        form.toggle_module(FieldId::HttpApi, "admin");
        form.toggle_module(FieldId::HttpApi, "web3");
        assert_eq!(form.list(FieldId::HttpApi), ["eth", "admin"]);
    }

    #[test]
    fn test_ws_modules_are_independent_of_http() {
        let mut form = FormState::new();
        form.toggle_module(FieldId::WsApi, "net");

        let config = collect_snapshot(&form);
        assert!(config.http_api.is_empty());
        assert_eq!(config.ws_api, vec!["net".to_string()]);
    }

    #[test]
    fn test_graphql_drives_mode() {
        let mut form = FormState::new();
        assert!(!form.mode(false).graphql_enabled);
        form.flip(FieldId::GraphQl);
        assert!(form.mode(false).graphql_enabled);
        assert!(form.mode(true).show_api_methods);
    }

    #[test]
    fn test_kind_mismatch_is_a_read_error() {
        let form = FormState::new();
        assert!(matches!(
            form.read_toggle(FieldId::DataDir),
            Err(FieldReadError::KindMismatch {
                expected: "toggle",
                actual: "text",
                ..
            })
        ));
    }

    #[test]
    fn test_form_to_arguments() {
        let mut form = FormState::new();
        form.set_text(FieldId::Etherbase, "0xABC");
        form.set_text(FieldId::DataDir, "/tmp/data");
        form.toggle_module(FieldId::HttpApi, "net");
        form.toggle_module(FieldId::HttpApi, "eth");

        let args = build_arguments(&collect_snapshot(&form));
        assert_eq!(
            args,
            vec![
                "--http.api",
                "eth,net",
                "--datadir",
                "/tmp/data",
                "--miner.etherbase",
                "0xABC",
            ]
        );
    }
}
