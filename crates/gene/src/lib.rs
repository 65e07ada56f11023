//! GeNe - Core Library
//!
//! Turns a node configuration snapshot into geth command-line flags and
//! manages the lifetime of the node process it starts.

pub mod collector;
pub mod flags;
pub mod launcher;
pub mod node_config;
pub mod view_state;

pub use collector::{collect_snapshot, FieldReadError, FieldSource};
pub use flags::{build_arguments, mapping_for, render_command_line, FlagMapping, FLAG_TABLE};
pub use launcher::{
    process_name_for, terminate_all, ChildStdio, LaunchError, NodeHandle, NodeLauncher,
    DEFAULT_GRACE_PERIOD,
};
pub use node_config::{FieldId, FieldKind, FieldValue, NodeLaunchConfig, API_MODULES};
pub use view_state::{FormMode, FormRow, Tab};
