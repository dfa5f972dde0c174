use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{parse_amount, parse_index, usage_error};

const FIXED_USAGE: &str = "fixed add <name> <price> | fixed list | fixed use <n> | fixed remove <n>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "fixed",
        "Manage reusable fixed expense templates",
        FIXED_USAGE,
        cmd_fixed,
    )]
}

fn cmd_fixed(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add", name, price] => {
            let price = parse_amount(price)?;
            if !context.tracker.add_fixed_item(name, price)? {
                output::warning(format!(
                    "A fixed item named `{}` at {} already exists.",
                    name.trim(),
                    output::amount(price)
                ));
            }
            Ok(())
        }
        ["list"] | [] => {
            list_fixed(context);
            Ok(())
        }
        ["use", index] => {
            let row = parse_index(index)?;
            if !context.tracker.add_expense_from_fixed(row)? {
                output::warning(format!("No fixed item #{index}; nothing changed."));
            }
            Ok(())
        }
        ["remove", index] => {
            let row = parse_index(index)?;
            if !context.tracker.remove_fixed_item(row)? {
                output::warning(format!("No fixed item #{index}; nothing changed."));
            }
            Ok(())
        }
        _ => Err(usage_error(FIXED_USAGE)),
    }
}

fn list_fixed(context: &ShellContext) {
    let ledger = context.tracker.ledger();
    if ledger.fixed_items.is_empty() {
        output::info("No fixed items yet.");
        return;
    }
    let rows: Vec<Vec<String>> = ledger
        .fixed_items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            vec![
                (index + 1).to_string(),
                item.name.clone(),
                output::amount(item.price),
            ]
        })
        .collect();
    output::table(&["#", "Name", "Price"], &rows);
}
