//! Table output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tierlist_core::{DirtyReport, TierStatus};
use tierlist_model::{OperatorCatalog, OperatorInfo, TierCollection, TierListMeta};
use tierlist_sync::{SyncPlan, TierRef};

pub fn print_tier_list(meta: &TierListMeta, tiers: &TierCollection, catalog: Option<&OperatorCatalog>) {
    println!("Tier list: {} ({})", meta.name, meta.slug);
    if let Some(description) = &meta.description {
        println!("{description}");
    }
    println!("Active: {}", if meta.is_active { "yes" } else { "no" });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Tier"),
        header_cell("Color"),
        header_cell("Count"),
        header_cell("Operators"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for tier in tiers {
        let operators: Vec<&str> = tier
            .placements
            .iter()
            .map(|p| {
                catalog
                    .and_then(|c| c.get(&p.operator_id))
                    .map_or(p.operator_id.as_str(), |op| op.name.as_str())
            })
            .collect();
        table.add_row(vec![
            Cell::new(tier.display_order),
            Cell::new(&tier.name).add_attribute(Attribute::Bold),
            Cell::new(&tier.color),
            Cell::new(tier.placements.len()),
            Cell::new(operators.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_slugs(slugs: &[String]) {
    if slugs.is_empty() {
        println!("No tier lists stored.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Slug")]);
    apply_table_style(&mut table);
    for slug in slugs {
        table.add_row(vec![Cell::new(slug)]);
    }
    println!("{table}");
}

pub fn print_dirty_report(report: &DirtyReport, tiers: &TierCollection) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tier"),
        header_cell("Status"),
        header_cell("Placements"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (id, status) in &report.tiers {
        let Some(tier) = tiers.tier(id) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(&tier.name),
            status_cell(*status),
            Cell::new(tier.placements.len()),
        ]);
    }
    for id in &report.deleted {
        table.add_row(vec![
            dim_cell(id),
            Cell::new("deleted").fg(Color::Red),
            Cell::new("-"),
        ]);
    }
    println!("{table}");
    if let Some(update) = &report.metadata {
        println!("Metadata changed: name={:?} active={}", update.name, update.is_active);
    }
    if !report.is_dirty() {
        println!("No changes.");
    }
}

pub fn print_saved(slug: &str, tiers: &TierCollection) {
    println!(
        "Saved {slug}: {} tiers, {} placements",
        tiers.len(),
        tiers.placement_count()
    );
}

pub fn print_plan(plan: &SyncPlan) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Change"), header_cell("Target"), header_cell("Detail")]);
    apply_table_style(&mut table);
    for id in &plan.delete_tiers {
        table.add_row(vec![change_cell("delete tier", Color::Red), Cell::new(id), Cell::new("")]);
    }
    for tier in &plan.create_tiers {
        table.add_row(vec![
            change_cell("create tier", Color::Green),
            Cell::new(&tier.name),
            Cell::new(format!("position {}", tier.index)),
        ]);
    }
    for tier in &plan.update_tiers {
        table.add_row(vec![Cell::new("update tier"), Cell::new(&tier.id), Cell::new(&tier.name)]);
    }
    for moved in &plan.move_placements {
        table.add_row(vec![
            change_cell("move placement", Color::Yellow),
            Cell::new(&moved.placement_id),
            Cell::new(format!("to {} at {}", moved.tier_id, moved.sub_order)),
        ]);
    }
    for create in &plan.create_placements {
        table.add_row(vec![
            change_cell("create placement", Color::Green),
            Cell::new(&create.operator_id),
            Cell::new(format!("in {} at {}", tier_ref(&create.tier), create.sub_order)),
        ]);
    }
    for update in &plan.update_placements {
        table.add_row(vec![
            Cell::new("update placement"),
            Cell::new(&update.placement_id),
            Cell::new(format!("at {}", update.sub_order)),
        ]);
    }
    for id in &plan.delete_placements {
        table.add_row(vec![change_cell("delete placement", Color::Red), Cell::new(id), Cell::new("")]);
    }
    println!("{table}");
    let order: Vec<String> = plan.order.iter().map(tier_ref).collect();
    println!("Final order: {}", order.join(", "));
    println!("{} changes", plan.change_count());
}

pub fn print_candidates(candidates: &[&OperatorInfo]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Operator"),
        header_cell("Rarity"),
        header_cell("Class"),
        header_cell("Id"),
    ]);
    apply_table_style(&mut table);
    for op in candidates {
        table.add_row(vec![
            Cell::new(&op.name).add_attribute(Attribute::Bold),
            Cell::new(op.rarity),
            Cell::new(op.profession.as_deref().unwrap_or("-")),
            dim_cell(&op.id),
        ]);
    }
    println!("{table}");
    println!("{} operators available", candidates.len());
}

fn tier_ref(tier: &TierRef) -> String {
    match tier {
        TierRef::Existing(id) => id.clone(),
        TierRef::Created(index) => format!("new tier #{index}"),
    }
}

fn status_cell(status: TierStatus) -> Cell {
    match status {
        TierStatus::New => Cell::new("new").fg(Color::Green).add_attribute(Attribute::Bold),
        TierStatus::Modified => Cell::new("modified").fg(Color::Yellow),
        TierStatus::Unchanged => dim_cell("-"),
    }
}

fn change_cell(label: &str, color: Color) -> Cell {
    Cell::new(label).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
