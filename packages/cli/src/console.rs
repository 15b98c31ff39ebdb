//! In-memory view state of the operator console.
//!
//! Lists are replaced only by successful loads, so a failed refresh leaves the
//! last good data on screen. Every successful mutation refetches the affected
//! list instead of patching it locally. Failures never abort the console; they
//! become [`Notice`]s.

use std::path::Path;

use common::advertisement::CreateAdvertisementRequest;
use common::preview::{check_preview, playback_url};
use common::screen::{CreateScreenRequest, UpdateScreenRequest};
use common::view::resolve_screen;
use common::{Advertisement, Overview, Screen, ScreenType};
use tracing::warn;

use crate::api::{ApiError, SignageApi};

/// Feedback queued for the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
    /// An action was refused by a precondition, e.g. previewing on an inactive screen.
    Blocked(String),
}

pub struct Console<A> {
    api: A,
    base_url: String,
    screens: Vec<Screen>,
    ads: Vec<Advertisement>,
    notices: Vec<Notice>,
}

impl<A: SignageApi> Console<A> {
    pub fn new(api: A, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
            screens: Vec::new(),
            ads: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn ads(&self) -> &[Advertisement] {
        &self.ads
    }

    /// The joined view over the current lists.
    pub fn overview(&self) -> Overview {
        Overview::build(&self.screens, &self.ads)
    }

    /// Take all queued notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Queue a notice raised outside the console's own operations.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn fail(&mut self, message: &str, err: &ApiError) {
        warn!(error = %err, "{message}");
        self.notices.push(Notice::Error(format!("{message} ({err})")));
    }

    pub fn refresh_screens(&mut self) -> bool {
        match self.api.list_screens() {
            Ok(screens) => {
                self.screens = screens;
                true
            }
            Err(e) => {
                self.fail("Failed to load screens.", &e);
                false
            }
        }
    }

    pub fn refresh_ads(&mut self) -> bool {
        match self.api.list_ads() {
            Ok(ads) => {
                self.ads = ads;
                true
            }
            Err(e) => {
                self.fail("Failed to load advertisements.", &e);
                false
            }
        }
    }

    pub fn refresh(&mut self) -> bool {
        let screens = self.refresh_screens();
        let ads = self.refresh_ads();
        screens && ads
    }

    /// Resolve a screen the operator typed, by id or title.
    pub fn find_screen(&self, reference: &str) -> Option<&Screen> {
        resolve_screen(&self.screens, reference)
    }

    pub fn find_ad(&self, id: &str) -> Option<&Advertisement> {
        self.ads.iter().find(|a| a.id == id)
    }

    fn screen_id_or_notice(&mut self, reference: &str) -> Option<String> {
        let id = self.find_screen(reference).map(|s| s.id.clone());
        if id.is_none() {
            self.notices
                .push(Notice::Error(format!("Screen '{reference}' not found")));
        }
        id
    }

    pub fn add_screen(
        &mut self,
        title: &str,
        location: &str,
        screen_type: ScreenType,
    ) -> Option<Screen> {
        let request = CreateScreenRequest {
            title: title.to_string(),
            location: location.to_string(),
            screen_type,
        };
        match self.api.create_screen(&request) {
            Ok(screen) => {
                self.notices
                    .push(Notice::Info(format!("Screen '{}' added", screen.title)));
                self.refresh_screens();
                Some(screen)
            }
            Err(e) => {
                self.fail("Failed to add screen.", &e);
                None
            }
        }
    }

    /// Write the active flag, even if it already has that value.
    pub fn set_active(&mut self, reference: &str, active: bool) -> bool {
        let Some(id) = self.screen_id_or_notice(reference) else {
            return false;
        };
        match self.api.set_screen_active(&id, active) {
            Ok(()) => {
                self.refresh_screens();
                true
            }
            Err(e) => {
                self.fail("Failed to update screen status.", &e);
                false
            }
        }
    }

    /// Flip the active flag relative to the last loaded state.
    pub fn toggle(&mut self, reference: &str) -> bool {
        let Some(active) = self.find_screen(reference).map(|s| s.active) else {
            self.notices
                .push(Notice::Error(format!("Screen '{reference}' not found")));
            return false;
        };
        self.set_active(reference, !active)
    }

    pub fn update_screen(&mut self, reference: &str, update: UpdateScreenRequest) -> bool {
        let Some(id) = self.screen_id_or_notice(reference) else {
            return false;
        };
        match self.api.update_screen(&id, &update) {
            Ok(()) => {
                self.refresh_screens();
                true
            }
            Err(e) => {
                self.fail("Failed to update screen.", &e);
                false
            }
        }
    }

    /// Delete a screen. Advertisements referencing it are left alone.
    pub fn delete_screen(&mut self, reference: &str) -> bool {
        let Some(id) = self.screen_id_or_notice(reference) else {
            return false;
        };
        match self.api.delete_screen(&id) {
            Ok(()) => {
                self.notices.push(Notice::Info("Screen deleted".into()));
                self.refresh_screens();
                true
            }
            Err(e) => {
                self.fail("Failed to delete screen.", &e);
                false
            }
        }
    }

    /// Upload the image, then create the advertisement with the stored URL.
    ///
    /// If the upload fails nothing is created.
    pub fn add_ad(&mut self, title: &str, screen_ref: &str, image: &Path) -> Option<Advertisement> {
        let upload = match self.api.upload_image(image) {
            Ok(upload) => upload,
            Err(e) => {
                self.fail("Failed to upload image.", &e);
                return None;
            }
        };

        let request = CreateAdvertisementRequest {
            title: title.to_string(),
            screen_id: screen_ref.to_string(),
            image_url: upload.url,
        };
        match self.api.create_ad(&request) {
            Ok(ad) => {
                self.notices
                    .push(Notice::Info(format!("Advertisement '{}' added", ad.title)));
                self.refresh_ads();
                Some(ad)
            }
            Err(e) => {
                self.fail("Failed to add advertisement.", &e);
                None
            }
        }
    }

    pub fn delete_ad(&mut self, id: &str) -> bool {
        match self.api.delete_ad(id) {
            Ok(()) => {
                self.ads.retain(|a| a.id != id);
                self.notices
                    .push(Notice::Info("Advertisement deleted".into()));
                self.refresh_ads();
                true
            }
            Err(e) => {
                self.fail("Failed to delete advertisement.", &e);
                false
            }
        }
    }

    /// Absolute public playback link for an advertisement.
    pub fn playback_link(&self, id: &str) -> String {
        playback_url(&self.base_url, id)
    }

    /// Gate a preview on the advertisement's screen being active.
    ///
    /// Returns the playback URL to open, or queues a [`Notice::Blocked`].
    pub fn preview(&mut self, id: &str) -> Option<String> {
        let Some(ad) = self.find_ad(id) else {
            self.notices
                .push(Notice::Error(format!("Advertisement '{id}' not found")));
            return None;
        };
        match check_preview(&self.screens, ad) {
            Ok(_) => Some(self.playback_link(id)),
            Err(blocked) => {
                self.notices.push(Notice::Blocked(blocked.to_string()));
                None
            }
        }
    }
}
