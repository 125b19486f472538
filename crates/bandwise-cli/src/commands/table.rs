//! The `bandwise table` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use bandwise_core::table::{DifficultyTable, DifficultyTier, SLOTS_PER_LEVEL};
use bandwise_core::Level;

pub fn execute() -> Result<()> {
    let difficulty = DifficultyTable::new();
    let mut table = Table::new();

    let mut header = vec![Cell::new("Level")];
    header.extend((0..SLOTS_PER_LEVEL).map(|slot| {
        let tier = match DifficultyTier::for_slot(slot) {
            DifficultyTier::Low => "L",
            DifficultyTier::Medium => "M",
            DifficultyTier::High => "H",
        };
        Cell::new(format!("{slot}{tier}"))
    }));
    table.set_header(header);

    for level in Level::ALL {
        let mut row = vec![Cell::new(level)];
        row.extend(difficulty.row(level).iter().map(Cell::new));
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
