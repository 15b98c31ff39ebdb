use thiserror::Error;

use crate::advertisement::Advertisement;
use crate::screen::Screen;

/// Why a preview was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewBlocked {
    #[error("Screen is not Active")]
    ScreenInactive { screen_title: String },

    /// Treated like an inactive screen: nothing to display on.
    #[error("Screen '{reference}' not found")]
    ScreenNotFound { reference: String },
}

/// Decide whether an advertisement may be opened for preview.
///
/// The screen is looked up by title first, since that is what the ad form stores,
/// then by identifier. This check only guards the operator's preview action; the
/// public playback page renders regardless of screen status.
pub fn check_preview<'a>(
    screens: &'a [Screen],
    ad: &Advertisement,
) -> Result<&'a Screen, PreviewBlocked> {
    let screen = screens
        .iter()
        .find(|s| s.title == ad.screen_id)
        .or_else(|| screens.iter().find(|s| s.id == ad.screen_id))
        .ok_or_else(|| PreviewBlocked::ScreenNotFound {
            reference: ad.screen_id.clone(),
        })?;

    if !screen.active {
        return Err(PreviewBlocked::ScreenInactive {
            screen_title: screen.title.clone(),
        });
    }
    Ok(screen)
}

/// Relative path of the public playback page for an advertisement.
pub fn playback_path(ad_id: &str) -> String {
    format!("/ad/{ad_id}")
}

/// Absolute playback link given the public base URL of the server.
pub fn playback_url(base_url: &str, ad_id: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), playback_path(ad_id))
}
