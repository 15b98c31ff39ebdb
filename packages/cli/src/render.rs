//! Plain-text rendering of console state.

use std::fmt::Write;

use common::view::AdView;
use common::{Overview, Screen};
use console::style;

use crate::console::Notice;

fn status(active: bool) -> String {
    if active {
        style(format!("{:<8}", "Active")).green().to_string()
    } else {
        style(format!("{:<8}", "Inactive")).red().to_string()
    }
}

pub fn screens_table(screens: &[Screen]) -> String {
    if screens.is_empty() {
        return "No screens registered yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{:<36}  {:<24}  {:<20}  {:<9}  {:<8}  {}",
            "ID", "TITLE", "LOCATION", "TYPE", "STATUS", "CREATED"
        ))
        .bold()
    );
    for s in screens {
        let _ = writeln!(
            out,
            "{:<36}  {:<24}  {:<20}  {:<9}  {}  {}",
            s.id,
            s.title,
            s.location,
            s.screen_type.as_str(),
            status(s.active),
            s.created_at.format("%Y-%m-%d"),
        );
    }
    out
}

pub fn ads_table(views: &[AdView]) -> String {
    if views.is_empty() {
        return "No advertisements yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{:<36}  {:<24}  {:<24}  {:<8}  {}",
            "ID", "TITLE", "SCREEN", "STATUS", "IMAGE"
        ))
        .bold()
    );
    for v in views {
        let _ = writeln!(
            out,
            "{:<36}  {:<24}  {:<24}  {}  {}",
            v.ad.id,
            v.ad.title,
            v.screen_title,
            status(v.screen_status),
            v.ad.image_url,
        );
    }
    out
}

pub fn dashboard(overview: &Overview) -> String {
    let screens = &overview.screen_summary;
    let ads = &overview.ad_summary;

    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Dashboard").bold().underlined());
    let _ = writeln!(
        out,
        "Total Screens   {}  ({} active, {} inactive)",
        style(screens.total).bold(),
        screens.active,
        screens.inactive
    );
    let _ = writeln!(out, "Active Screens  {}", style(screens.active).bold());
    let _ = writeln!(
        out,
        "Advertisements  {}  ({} on active screens, {} screens in use)",
        style(ads.total_ads).bold(),
        ads.ads_on_active_screens,
        ads.screens_with_ads
    );

    if !overview.recent_screens.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("Recent Screens").bold());
        for s in &overview.recent_screens {
            let dot = if s.active {
                style("●").green()
            } else {
                style("●").red()
            };
            let _ = writeln!(
                out,
                "  {dot} {:<24} {:<20} {}",
                s.title,
                s.location,
                s.created_at.format("%Y-%m-%d")
            );
        }
        if screens.total > overview.recent_screens.len() {
            let _ = writeln!(out, "  ... run `adease screens list` to view all screens");
        }
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    match notice {
        Notice::Info(m) => format!("{} {m}", style("✓").green()),
        Notice::Error(m) => format!("{} {m}", style("✗").red()),
        Notice::Blocked(m) => format!("{} {m}", style("!").yellow().bold()),
    }
}
