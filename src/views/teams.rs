// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Teams screen
//!
//! Loads teams and users together and only settles once both fetches are
//! done. Either failing fails the whole load with a single message.

use chrono::NaiveDate;
use tracing::debug;

use super::membership::{reconcile, TeamMembership};
use crate::api::{ResourceApi, Teams, Users};
use crate::models::User;
use crate::screen::{CrudScreen, DeleteOutcome, ScreenError, SubmitOutcome, TeamForm};

pub struct TeamsScreen<T, U> {
    screen: CrudScreen<Teams, T>,
    users_api: U,
    users: Vec<User>,
}

impl<T, U> TeamsScreen<T, U>
where
    T: ResourceApi<Teams>,
    U: ResourceApi<Users>,
{
    pub fn new(teams_api: T, users_api: U) -> Self {
        Self {
            screen: CrudScreen::new(teams_api),
            users_api,
            users: Vec::new(),
        }
    }

    /// The underlying team list and editor, read-only
    ///
    /// Saves and deletes go through [`TeamsScreen::submit`] and
    /// [`TeamsScreen::confirm_delete`] so that users reload alongside teams.
    pub fn screen(&self) -> &CrudScreen<Teams, T> {
        &self.screen
    }

    pub fn open_create(&mut self) {
        self.screen.open_create();
    }

    pub fn open_create_on(&mut self, today: NaiveDate) {
        self.screen.open_create_on(today);
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), ScreenError> {
        self.screen.open_edit(id)
    }

    pub fn edit_field(&mut self, field: &str, value: &str) -> Result<(), ScreenError> {
        self.screen.edit_field(field, value)
    }

    pub fn replace_form(&mut self, form: TeamForm) -> Result<(), ScreenError> {
        self.screen.replace_form(form)
    }

    pub fn cancel_edit(&mut self) {
        self.screen.cancel_edit();
    }

    pub fn request_delete(&mut self, id: &str) {
        self.screen.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.screen.cancel_delete();
    }

    pub fn dismiss_error(&mut self) {
        self.screen.dismiss_error();
    }

    /// Users from the last successful load, for member lists and creator choices
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn memberships(&self) -> Vec<TeamMembership<'_>> {
        reconcile(self.screen.records(), &self.users)
    }

    /// Fetch teams and users concurrently
    pub async fn load(&mut self) {
        self.screen.begin_load();
        let joined = tokio::try_join!(self.screen.api().list(), self.users_api.list());

        match joined {
            Ok((teams, users)) => {
                debug!("Loaded {} teams and {} users", teams.len(), users.len());
                self.users = users;
                self.screen.finish_load(Ok(teams));
            }
            Err(e) => self.screen.finish_load(Err(e)),
        }
    }

    /// Submit the open team form, then reload both collections
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.screen.persist().await;
        if outcome == SubmitOutcome::Saved {
            self.load().await;
        }
        outcome
    }

    /// Delete the pending team, then reload both collections
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let outcome = self.screen.execute_delete().await;
        if outcome == DeleteOutcome::Deleted {
            self.load().await;
        }
        outcome
    }
}
