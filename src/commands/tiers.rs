use crate::catalog::{self, RateTier};
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};

/// Build the tier listing
pub fn table(tiers: &[RateTier]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["RATE", "TIER", "LABEL"]);

    for tier in tiers {
        table.add_row(vec![
            Cell::new(format!("{:.2}", tier.rate)).set_alignment(CellAlignment::Right),
            Cell::new(catalog::percent_label(tier.rate)).set_alignment(CellAlignment::Right),
            Cell::new(tier.label),
        ]);
    }
    table
}

/// Run the tiers command
pub fn run() {
    println!("{}", table(catalog::tiers()));
}
