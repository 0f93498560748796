use crate::{
    config::Config,
    gradient::interpolate_gradient,
    models::{palette::Seam, style::StopTable},
};
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use image::Rgb;

/// Seam jumps above this many levels in any channel are flagged.
pub const SEAM_WARN_DELTA: u8 = 32;

const BAR_CELLS: usize = 24;

fn swatch(rgb: Rgb<u8>) -> String {
    format!("\x1b[38;2;{};{};{}m█\x1b[0m", rgb[0], rgb[1], rgb[2])
}

fn colour_bar(table: &StopTable) -> String {
    (0..BAR_CELLS)
        .map(|i| swatch(interpolate_gradient(table, i as f64 / (BAR_CELLS - 1) as f64)))
        .collect()
}

fn header(title: &str) -> Cell {
    Cell::new(title)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
}

fn seam_line(seam: &Seam) -> String {
    let [dr, dg, db] = seam.channel_deltas();
    format!(
        "{} {:?} → {} {:?}, delta ({}, {}, {})",
        swatch(seam.below),
        seam.below.0,
        swatch(seam.above),
        seam.above.0,
        dr,
        dg,
        db
    )
}

pub fn build_palette_table(config: &Config) -> Table {
    let rows = [
        ("Ocean", config.palette.ocean()),
        ("Land", config.palette.land()),
        ("Legacy land", &config.legacy.land),
    ];

    let mut table = Table::new();
    table
        .set_header(vec![
            header("Table"),
            header("Stops"),
            header("Breaks"),
            Cell::new("Colourbar").add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    for (name, stops) in rows {
        let breaks = stops
            .stops()
            .iter()
            .map(|s| format!("{:.2}", s.value))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(name),
            Cell::new(stops.stops().len()).set_alignment(CellAlignment::Center),
            Cell::new(breaks),
            Cell::new(colour_bar(stops)),
        ]);
    }

    table
}

pub fn print_palette_summary(config: &Config) {
    println!("\nPalette summary:\n{}", build_palette_table(config));

    let sea_level = config.palette.sea_level();
    match config.palette.seam() {
        Some(seam) => {
            println!(
                "\nSea level {}: heights {} → {}: {}",
                sea_level,
                sea_level - 1,
                sea_level,
                seam_line(&seam)
            );
            if seam.max_delta() > SEAM_WARN_DELTA {
                println!(
                    "  ⚠️ Ocean and land tables jump by up to {} levels at the coastline",
                    seam.max_delta()
                );
            }
        }
        None => println!("\nSea level 0: no ocean band"),
    }

    println!();
}
