//! The `faults` subcommand: list the injectable fault types.

use anyhow::Result;
use hydromon_types::FaultType;
use serde::Serialize;

#[derive(Serialize)]
struct FaultEntry {
    name: &'static str,
    description: &'static str,
}

pub fn execute(json: bool) -> Result<()> {
    let entries: Vec<FaultEntry> = FaultType::ALL
        .iter()
        .map(|fault_type| FaultEntry {
            name: fault_type.name(),
            description: fault_type.injection_notice(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Injectable fault types:");
        for entry in &entries {
            println!("  {:<18} {}", entry.name, entry.description);
        }
    }
    Ok(())
}
