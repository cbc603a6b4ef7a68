// metagraph-core/src/bin/dashboard.rs
// Network Summary Dashboard: Terminal-Rendering der Rankings

use anyhow::{Context, Result};
use metagraph_common::data::{Heatmap, NetworkSummary, ParticipantRow, Ranking};
use metagraph_common::Metric;
use metagraph_core::config::Settings;
use metagraph_core::service::DashboardService;
use tracing_subscriber::EnvFilter;

const KEY_WIDTH: usize = 12;

fn short_key(key: &str) -> String {
    if key.chars().count() <= KEY_WIDTH {
        key.to_string()
    } else {
        let head: String = key.chars().take(KEY_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

fn print_summary(summary: &NetworkSummary) {
    println!("\n=== NETWORK SUMMARY: {} ===", summary.network);
    println!("Block:            {}", summary.block);
    println!("Participants:     {}", summary.participants);
    println!("Active nodes:     {}", summary.active_count);
    println!("Total stake:      {:.4}", summary.total_stake);
    println!("Total emission:   {:.4}", summary.total_emission);
}

fn print_ranking(ranking: &Ranking) {
    println!("\n--- TOP {} BY {} ---", ranking.entries.len(), ranking.metric.as_str().to_uppercase());
    println!("{:<5} | {:<6} | {:<12} | {:>14}", "#", "UID", "HOTKEY", "VALUE");
    println!("{:-<47}", "");
    for (pos, entry) in ranking.entries.iter().enumerate() {
        println!(
            "{:<5} | {:<6} | {:<12} | {:>14.6}",
            pos + 1,
            entry.index,
            short_key(&entry.identity_key),
            entry.value
        );
    }
}

fn print_rows(field: Metric, rows: &[ParticipantRow]) {
    println!("\n--- PARTICIPANTS (filtered by {}) : {} rows ---", field, rows.len());
    println!(
        "{:<6} | {:<12} | {:<3} | {:>12} | {:>9} | {:>9} | {:>9} | {:>9} | {:>9} | {:>9}",
        "UID", "HOTKEY", "ACT", "STAKE", "RANK", "TRUST", "CONSENSUS", "INCENTIVE", "DIVIDENDS", "EMISSION"
    );
    println!("{:-<118}", "");
    for row in rows {
        println!(
            "{:<6} | {:<12} | {:<3} | {:>12.4} | {:>9.5} | {:>9.5} | {:>9.5} | {:>9.5} | {:>9.5} | {:>9.5}",
            row.index,
            short_key(&row.identity_key),
            if row.is_active() { "yes" } else { "no" },
            row.stake,
            row.rank,
            row.trust,
            row.consensus,
            row.incentive,
            row.dividends,
            row.emission
        );
    }
}

fn print_heatmap(map: &Heatmap) {
    println!("\n--- {} HEATMAP ({}x{}) ---", map.kind.as_str().to_uppercase(), map.indices.len(), map.indices.len());
    print!("{:<6}", "");
    for index in &map.indices {
        print!(" {:>7}", index);
    }
    println!();
    for (index, row) in map.indices.iter().zip(&map.cells) {
        print!("{:<6}", index);
        for cell in row {
            print!(" {:>7.4}", cell);
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Konnte Konfiguration nicht laden")?;
    let service = DashboardService::from_settings(&settings).context("Invalid dashboard configuration")?;

    // Ein Fetch pro Prozess, Fehler sind fatal
    let report = service
        .report(&settings)
        .await
        .context("Failed to build dashboard")?;

    print_summary(&report.summary);
    for ranking in &report.rankings {
        print_ranking(ranking);
    }
    print_rows(report.filter_field, &report.filtered);
    print_heatmap(&report.heatmap);

    Ok(())
}
