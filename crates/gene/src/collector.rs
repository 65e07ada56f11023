//! Configuration collection
//!
//! Front-ends expose their current values through [`FieldSource`];
//! [`collect_snapshot`] turns them into an immutable [`NodeLaunchConfig`].
//! A field that cannot be read is logged and left empty. It never aborts
//! the snapshot.

use crate::node_config::{FieldId, FieldKind, NodeLaunchConfig};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a single field could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldReadError {
    #[error("field {0} is not bound to an input")]
    Unbound(FieldId),

    #[error("field {field} holds a {actual} value, expected {expected}")]
    KindMismatch {
        field: FieldId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field {field} could not be read: {reason}")]
    Unreadable { field: FieldId, reason: String },
}

/// Anything that can answer per-field reads: CLI arguments, the TUI form.
pub trait FieldSource {
    fn read_text(&self, field: FieldId) -> Result<String, FieldReadError>;
    fn read_toggle(&self, field: FieldId) -> Result<bool, FieldReadError>;
    fn read_list(&self, field: FieldId) -> Result<Vec<String>, FieldReadError>;
}

/// Read every field from `source` into a fresh snapshot.
pub fn collect_snapshot<S: FieldSource + ?Sized>(source: &S) -> NodeLaunchConfig {
    let mut config = NodeLaunchConfig::default();
    let mut failures = 0usize;

    for field in FieldId::ALL {
        let outcome = match field.kind() {
            FieldKind::Text => source
                .read_text(field)
                .map(|value| config.set_text(field, value)),
            FieldKind::Toggle => source
                .read_toggle(field)
                .map(|value| config.set_toggle(field, value)),
            FieldKind::List => source
                .read_list(field)
                .map(|value| config.set_list(field, value)),
        };

        if let Err(err) = outcome {
            failures += 1;
            warn!(field = %field, flag = %field.flag(), "Treating field as empty: {}", err);
        }
    }

    debug!(
        present = config.present_fields().len(),
        failures, "Collected node configuration snapshot"
    );
    config
}
