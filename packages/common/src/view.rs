//! Denormalized advertisement listing.
//!
//! Everything here is a pure function of the current screen and advertisement
//! lists. Callers recompute the whole view whenever either list changes; there is
//! no incremental maintenance.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::advertisement::Advertisement;
use crate::screen::Screen;

/// Label shown for advertisements whose screen reference does not resolve.
pub const UNKNOWN_SCREEN: &str = "Unknown Screen";

/// Number of screens listed in the dashboard's "recent" section.
pub const RECENT_SCREENS: usize = 5;

/// An advertisement joined with its referenced screen's display attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdView {
    #[serde(flatten)]
    pub ad: Advertisement,
    /// Title of the resolved screen, or `"Unknown Screen"`.
    pub screen_title: String,
    /// Active flag of the resolved screen; `false` when unresolved.
    pub screen_status: bool,
    /// Number of advertisements sharing this advertisement's screen reference.
    pub ads_on_screen: usize,
}

/// Aggregate counts shown above the advertisement table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdSummary {
    pub total_ads: usize,
    /// Advertisements whose screen resolved and is active.
    pub ads_on_active_screens: usize,
    /// Distinct screens that at least one advertisement resolves to.
    pub screens_with_ads: usize,
    pub total_screens: usize,
}

/// Screen counts shown on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScreenSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Everything the operator dashboard renders, derived in one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Overview {
    pub advertisements: Vec<AdView>,
    pub ad_summary: AdSummary,
    pub screen_summary: ScreenSummary,
    /// The most recently created screens, newest first.
    pub recent_screens: Vec<Screen>,
}

/// Resolve a screen reference: exact identifier match first, then exact title match.
///
/// Older advertisements store the screen's title instead of its identifier, so both
/// forms have to resolve.
pub fn resolve_screen<'a>(screens: &'a [Screen], reference: &str) -> Option<&'a Screen> {
    screens
        .iter()
        .find(|s| s.id == reference)
        .or_else(|| screens.iter().find(|s| s.title == reference))
}

/// Join every advertisement with its screen, preserving advertisement order.
pub fn join(screens: &[Screen], ads: &[Advertisement]) -> Vec<AdView> {
    let mut per_reference: HashMap<&str, usize> = HashMap::new();
    for ad in ads {
        *per_reference.entry(ad.screen_id.as_str()).or_default() += 1;
    }

    ads.iter()
        .map(|ad| {
            let screen = resolve_screen(screens, &ad.screen_id);
            AdView {
                ad: ad.clone(),
                screen_title: screen
                    .map(|s| s.title.clone())
                    .unwrap_or_else(|| UNKNOWN_SCREEN.to_string()),
                screen_status: screen.is_some_and(|s| s.active),
                ads_on_screen: per_reference
                    .get(ad.screen_id.as_str())
                    .copied()
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// Aggregate counts over a joined view.
pub fn summarize_ads(screens: &[Screen], ads: &[Advertisement]) -> AdSummary {
    let mut resolved: HashSet<&str> = HashSet::new();
    let mut on_active = 0;
    for ad in ads {
        if let Some(screen) = resolve_screen(screens, &ad.screen_id) {
            resolved.insert(screen.id.as_str());
            if screen.active {
                on_active += 1;
            }
        }
    }

    AdSummary {
        total_ads: ads.len(),
        ads_on_active_screens: on_active,
        screens_with_ads: resolved.len(),
        total_screens: screens.len(),
    }
}

pub fn summarize_screens(screens: &[Screen]) -> ScreenSummary {
    let active = screens.iter().filter(|s| s.active).count();
    ScreenSummary {
        total: screens.len(),
        active,
        inactive: screens.len() - active,
    }
}

impl Overview {
    /// Derive the full dashboard from both lists.
    ///
    /// `screens` is expected newest first, as every registry listing is.
    pub fn build(screens: &[Screen], ads: &[Advertisement]) -> Self {
        Self {
            advertisements: join(screens, ads),
            ad_summary: summarize_ads(screens, ads),
            screen_summary: summarize_screens(screens),
            recent_screens: screens.iter().take(RECENT_SCREENS).cloned().collect(),
        }
    }
}
