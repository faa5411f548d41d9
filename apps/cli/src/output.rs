//! Plain-text rendering of daemon records.

use client_core::MetaInfo;
use client_core::rpc::response::{AddOutcome, FreeSpaceInfo};

use models::{SessionSettings, SessionStats, Torrent, TransferTotals};

use std::io::{self, Write};
use std::time::Duration;

use humantime::format_duration;

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Binary-prefixed size, one decimal above bytes.
pub fn format_size(bytes: i64) -> String {
    if bytes < 0 {
        return "?".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn format_rate(bytes_per_second: i64) -> String {
    format!("{}/s", format_size(bytes_per_second))
}

/// The daemon reports -1 for "not available" and -2 for "unknown".
pub fn format_eta(seconds: i64) -> String {
    match seconds {
        s if s < 0 => "-".to_string(),
        s => format_duration(Duration::from_secs(s.unsigned_abs())).to_string(),
    }
}

pub fn format_ratio(ratio: f64) -> String {
    if ratio < 0.0 {
        "-".to_string()
    } else {
        format!("{ratio:.2}")
    }
}

pub fn write_torrent_list(out: &mut impl Write, torrents: &[Torrent]) -> io::Result<()> {
    writeln!(
        out,
        "{:>5}  {:>6}  {:>10}  {:>12}  {:>12}  {:>6}  {:<24}  Name",
        "ID", "Done", "Size", "Down", "Up", "Ratio", "Status"
    )?;

    for torrent in torrents {
        let status = if torrent.has_error() {
            format!("Error: {}", torrent.error_string)
        } else {
            torrent.status_kind().label().to_string()
        };

        writeln!(
            out,
            "{:>5}  {:>5.1}%  {:>10}  {:>12}  {:>12}  {:>6}  {:<24}  {}",
            torrent.id,
            torrent.percent_done() * 100.0,
            format_size(torrent.size_when_done),
            format_rate(torrent.rate_download),
            format_rate(torrent.rate_upload),
            format_ratio(torrent.upload_ratio),
            status,
            torrent.name
        )?;
    }

    let down: i64 = torrents.iter().map(|t| t.rate_download).sum();
    let up: i64 = torrents.iter().map(|t| t.rate_upload).sum();
    writeln!(
        out,
        "{} torrents, down {}, up {}",
        torrents.len(),
        format_rate(down),
        format_rate(up)
    )
}

pub fn write_torrent_details(out: &mut impl Write, torrent: &Torrent) -> io::Result<()> {
    writeln!(out, "Name:      {}", torrent.name)?;
    writeln!(out, "Id:        {}", torrent.id)?;
    writeln!(out, "Hash:      {}", torrent.hash_string)?;
    writeln!(out, "Status:    {}", torrent.status_kind().label())?;
    if torrent.has_error() {
        writeln!(out, "Error:     {}", torrent.error_string)?;
    }
    writeln!(out, "Location:  {}", torrent.download_dir)?;
    writeln!(
        out,
        "Progress:  {:.1}% of {}",
        torrent.percent_done() * 100.0,
        format_size(torrent.size_when_done)
    )?;
    writeln!(out, "ETA:       {}", format_eta(torrent.eta))?;
    writeln!(
        out,
        "Transfer:  {} down, {} up (ratio {})",
        format_size(torrent.downloaded_ever),
        format_size(torrent.uploaded_ever),
        format_ratio(torrent.upload_ratio)
    )?;
    writeln!(
        out,
        "Peers:     {} connected, {} sending, {} receiving",
        torrent.peers_connected, torrent.peers_sending_to_us, torrent.peers_getting_from_us
    )?;
    if !torrent.labels.is_empty() {
        writeln!(out, "Labels:    {}", torrent.labels.join(", "))?;
    }
    if !torrent.comment.is_empty() {
        writeln!(out, "Comment:   {}", torrent.comment)?;
    }

    if !torrent.files.is_empty() {
        writeln!(out, "\nFiles:")?;
        for (index, file) in torrent.files.iter().enumerate() {
            let wanted = torrent.file_stats.get(index).is_none_or(|stat| stat.wanted);
            writeln!(
                out,
                "  {:>3}  {:>5.1}%  {:>10}  {}{}",
                index,
                file.percent_done() * 100.0,
                format_size(file.length),
                file.name,
                if wanted { "" } else { "  (skipped)" }
            )?;
        }
    }

    if !torrent.tracker_stats.is_empty() {
        writeln!(out, "\nTrackers:")?;
        for tracker in &torrent.tracker_stats {
            writeln!(
                out,
                "  tier {}  {}  seeders {}  leechers {}",
                tracker.tier, tracker.announce, tracker.seeder_count, tracker.leecher_count
            )?;
        }
    }

    Ok(())
}

fn write_totals(out: &mut impl Write, title: &str, totals: &TransferTotals) -> io::Result<()> {
    writeln!(out, "{title}:")?;
    writeln!(out, "  Uploaded:   {}", format_size(totals.uploaded_bytes))?;
    writeln!(out, "  Downloaded: {}", format_size(totals.downloaded_bytes))?;
    writeln!(
        out,
        "  Ratio:      {}",
        totals.ratio().map_or_else(|| "-".to_string(), format_ratio)
    )?;
    writeln!(
        out,
        "  Active:     {}",
        format_duration(Duration::from_secs(totals.seconds_active.max(0).unsigned_abs()))
    )
}

pub fn write_stats(out: &mut impl Write, stats: &SessionStats) -> io::Result<()> {
    writeln!(
        out,
        "Torrents: {} ({} active, {} paused)",
        stats.torrent_count, stats.active_torrent_count, stats.paused_torrent_count
    )?;
    writeln!(
        out,
        "Speed:    {} down, {} up",
        format_rate(stats.download_speed),
        format_rate(stats.upload_speed)
    )?;
    write_totals(out, "Current session", &stats.current_stats)?;
    write_totals(out, "Total", &stats.cumulative_stats)
}

pub fn write_session(out: &mut impl Write, settings: &SessionSettings) -> io::Result<()> {
    let limit = |enabled: bool, kib: i64| {
        if enabled {
            format!("{kib} KiB/s")
        } else {
            "unlimited".to_string()
        }
    };

    writeln!(
        out,
        "Daemon:         {} (RPC {}, minimum {})",
        settings.version, settings.rpc_version, settings.rpc_version_minimum
    )?;
    writeln!(out, "Download dir:   {}", settings.download_dir)?;
    writeln!(out, "Peer port:      {}", settings.peer_port)?;
    writeln!(out, "Encryption:     {}", settings.encryption)?;
    writeln!(
        out,
        "Download limit: {}",
        limit(settings.speed_limit_down_enabled, settings.speed_limit_down)
    )?;
    writeln!(
        out,
        "Upload limit:   {}",
        limit(settings.speed_limit_up_enabled, settings.speed_limit_up)
    )?;
    writeln!(
        out,
        "Turtle mode:    {}",
        if settings.alt_speed_enabled { "on" } else { "off" }
    )?;
    writeln!(
        out,
        "Peers:          {} global, {} per torrent",
        settings.peer_limit_global, settings.peer_limit_per_torrent
    )?;
    writeln!(
        out,
        "Seed ratio:     {}",
        if settings.seed_ratio_limited {
            format_ratio(settings.seed_ratio_limit)
        } else {
            "unlimited".to_string()
        }
    )
}

pub fn write_added(out: &mut impl Write, outcome: &AddOutcome) -> io::Result<()> {
    let torrent = outcome.torrent();
    let verb = if outcome.is_duplicate() {
        "Already present"
    } else {
        "Added"
    };
    writeln!(out, "{verb}: {} (id {})", torrent.name, torrent.id)
}

pub fn write_free_space(out: &mut impl Write, info: &FreeSpaceInfo) -> io::Result<()> {
    writeln!(out, "{}: {} free", info.path, format_size(info.size_bytes))
}

pub fn write_metainfo(out: &mut impl Write, metainfo: &MetaInfo) -> io::Result<()> {
    writeln!(out, "Name:         {}", metainfo.name)?;
    writeln!(out, "Info hash:    {}", metainfo.info_hash_hex())?;
    writeln!(out, "Size:         {}", format_size(metainfo.total_length()))?;
    writeln!(
        out,
        "Pieces:       {} x {}",
        metainfo.piece_count(),
        format_size(metainfo.piece_length)
    )?;
    writeln!(out, "Private:      {}", if metainfo.private { "yes" } else { "no" })?;
    if let Some(comment) = &metainfo.comment {
        writeln!(out, "Comment:      {comment}")?;
    }
    if let Some(created_by) = &metainfo.created_by {
        writeln!(out, "Created by:   {created_by}")?;
    }

    let trackers = metainfo.announce_urls();
    if !trackers.is_empty() {
        writeln!(out, "Trackers:")?;
        for url in trackers {
            writeln!(out, "  {url}")?;
        }
    }

    if metainfo.is_multi_file() {
        writeln!(out, "Files:")?;
        for file in metainfo.files() {
            writeln!(out, "  {:>10}  {}", format_size(file.length), file.path)?;
        }
    }

    Ok(())
}
