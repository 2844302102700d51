use super::{group_thousands, CountRow};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyspace_core::api::CrossCheck;
use keyspace_core::bitting::Bitting;
use keyspace_core::config::KeyspaceParams;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn optional(value: Option<&keyspace_core::BigUint>) -> String {
    value.map(group_thousands).unwrap_or_else(|| "-".to_string())
}

pub fn count(params: &KeyspaceParams, rows: &[CountRow]) {
    println!("\n🔑 === KEYSPACE: {} === 🔑", params);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Method").add_attribute(Attribute::Bold),
        Cell::new("Engine"),
        Cell::new("Rules"),
        Cell::new("Keys").fg(Color::Cyan),
        Cell::new("Time"),
    ]);

    for i in 3..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows {
        let rules = if row.method.enforces_all_rules() {
            "all"
        } else {
            "MACS"
        };
        table.add_row(vec![
            Cell::new(row.method).add_attribute(Attribute::Bold),
            Cell::new(row.method.description()),
            Cell::new(rules),
            Cell::new(group_thousands(&row.keys)).fg(Color::Cyan),
            Cell::new(format!("{:.2?}", row.elapsed)),
        ]);
    }
    println!("\n{}", table);
}

pub fn samples(samples: &[Bitting]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Sampled bitting").add_attribute(Attribute::Bold),
    ]);

    for (i, bitting) in samples.iter().enumerate() {
        let cuts: Vec<String> = bitting.iter().map(|d| d.to_string()).collect();
        table.add_row(vec![Cell::new(i + 1), Cell::new(cuts.join(" "))]);
    }
    println!("\nSamples:\n{}", table);
}

pub fn sweep(checks: &[CrossCheck]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("n").add_attribute(Attribute::Bold),
        Cell::new("d").add_attribute(Attribute::Bold),
        Cell::new("macs").add_attribute(Attribute::Bold),
        Cell::new("MACS only"),
        Cell::new("State").fg(Color::Cyan),
        Cell::new("Prefix"),
        Cell::new("Oracle"),
        Cell::new("OK"),
    ]);

    for i in 0..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for c in checks {
        let ok = if c.consistent() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("NO").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(c.params.positions),
            Cell::new(c.params.depths),
            Cell::new(c.params.macs),
            Cell::new(group_thousands(&c.adjacency_only)),
            Cell::new(group_thousands(&c.constrained)).fg(Color::Cyan),
            Cell::new(optional(c.prefix.as_ref())),
            Cell::new(optional(c.brute.as_ref())),
            ok,
        ]);
    }
    println!("\n{}", table);

    let failures = checks.iter().filter(|c| !c.consistent()).count();
    println!(
        "\n{} parameter sets checked, {} inconsistent",
        checks.len(),
        failures
    );
}
