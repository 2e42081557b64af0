use live_swap::{PlaylistReport, RunReport};

/// Print the run report as a single JSON document to stdout
pub fn output_json(report: &RunReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize report to JSON: {e}"),
    }
}

/// Print the human-readable final report
pub fn output_text(report: &RunReport, target_artist: &str) {
    println!("\n\nFINAL REPORT");
    if report.simulated {
        println!("(simulation: no playlist was modified)");
    }

    if report.playlists.is_empty() {
        println!("No {target_artist} songs found in any playlists.");
        return;
    }

    for playlist in &report.playlists {
        print_playlist(playlist);
    }

    println!("\nSUMMARY");
    println!(
        "Total {target_artist} tracks found: {}",
        report.total_target_tracks
    );
    println!("Total swapped with bootlegs: {}", report.total_swapped);
    if report.total_failed() > 0 {
        println!("Total failed swaps: {}", report.total_failed());
    }
    if report.total_partially_applied() > 0 {
        println!(
            "⚠️  Tracks removed without replacement: {}",
            report.total_partially_applied()
        );
    }
    if let Some(rate) = report.match_rate() {
        println!("✅ Match rate: {rate:.2}%");
    }
}

fn print_playlist(playlist: &PlaylistReport) {
    println!("\n🎵 Playlist: {}", playlist.playlist);

    if let Some(error) = &playlist.error {
        println!("❌ Could not read playlist: {error}");
        return;
    }

    if playlist.swapped.is_empty() {
        println!("Swapped: None");
    } else {
        println!("Swapped:");
        let rows: Vec<(&str, &str)> = playlist
            .swapped
            .iter()
            .map(|s| (s.original.as_str(), s.candidate.as_str()))
            .collect();
        print_table(("Original", "Live Version"), &rows);
    }

    if playlist.not_found.is_empty() {
        println!("Not Found: None");
    } else {
        println!("\nNot Found:");
        for title in &playlist.not_found {
            println!(" - {title}");
        }
    }

    if !playlist.failed.is_empty() {
        println!("\nFailed:");
        for failed in &playlist.failed {
            println!(" - {}: {}", failed.original, failed.error);
        }
    }
}

fn column_width<'a>(header: &'a str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .chain(std::iter::once(header))
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
}

fn print_table(headers: (&str, &str), rows: &[(&str, &str)]) {
    let left_width = column_width(headers.0, rows.iter().map(|(left, _)| *left));
    let right_width = column_width(headers.1, rows.iter().map(|(_, right)| *right));

    println!("{:<left_width$}  {}", headers.0, headers.1);
    println!("{}  {}", "-".repeat(left_width), "-".repeat(right_width));
    for (left, right) in rows {
        println!("{left:<left_width$}  {right}");
    }
}
