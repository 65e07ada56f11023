//! Flags command - print the field to flag mapping table

use crate::cli::output::{print_json, print_table};
use anyhow::Result;
use clap::Args;
use gene::{Tab, FLAG_TABLE};
use serde::Serialize;

/// Arguments for the flags command
#[derive(Debug, Args)]
pub struct FlagsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FlagRow {
    field: &'static str,
    flag: String,
    kind: &'static str,
    tabs: Vec<&'static str>,
    label: &'static str,
}

fn flag_rows() -> Vec<FlagRow> {
    FLAG_TABLE
        .iter()
        .map(|mapping| FlagRow {
            field: mapping.field.name(),
            flag: mapping.field.flag(),
            kind: mapping.kind.as_str(),
            tabs: Tab::containing(mapping.field)
                .into_iter()
                .map(Tab::title)
                .collect(),
            label: mapping.field.label(),
        })
        .collect()
}

/// Execute the flags command
pub fn run(args: FlagsArgs) -> Result<()> {
    let rows = flag_rows();

    if args.json {
        return print_json(&rows);
    }

    print_table(
        &["FIELD", "FLAG", "KIND", "TABS"],
        rows.into_iter()
            .map(|row| {
                vec![
                    row.field.to_string(),
                    row.flag,
                    row.kind.to_string(),
                    row.tabs.join(", "),
                ]
            })
            .collect(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_table_order() {
        let rows = flag_rows();
        assert_eq!(rows.len(), FLAG_TABLE.len());
        assert_eq!(rows[0].flag, "--config");
        assert_eq!(rows[0].tabs, vec!["Basic Config"]);
        assert_eq!(rows.last().map(|r| r.flag.as_str()), Some("--dev.gaslimit"));
    }

    #[test]
    fn test_shared_fields_list_every_tab() {
        let etherbase = flag_rows()
            .into_iter()
            .find(|r| r.field == "etherbase")
            .unwrap();
        assert_eq!(etherbase.tabs, vec!["Basic Config", "Miner Config"]);
    }
}
