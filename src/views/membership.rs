// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Team membership reconciliation
//!
//! Members are the loaded users whose `team_id` names the team. The count
//! shown next to a team prefers the server's `member_count` hint, so it can
//! exceed the number of members actually listed when only part of the user
//! collection is loaded.

use crate::constants::limits::MEMBER_PREVIEW_LIMIT;
use crate::models::{Team, User};
use crate::screen::display::full_name;

/// One team with its locally matched members
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMembership<'a> {
    pub team: &'a Team,
    pub members: Vec<&'a User>,
}

impl<'a> TeamMembership<'a> {
    /// Server hint when positive, otherwise the matched count
    pub fn displayed_count(&self) -> usize {
        match self.team.member_count {
            Some(hint) if hint > 0 => hint as usize,
            _ => self.members.len(),
        }
    }

    /// "1 member" / "N members"
    pub fn member_label(&self) -> String {
        match self.displayed_count() {
            1 => "1 member".to_string(),
            n => format!("{} members", n),
        }
    }

    /// The first few members, for a compact card
    pub fn preview(&self) -> &[&'a User] {
        let end = self.members.len().min(MEMBER_PREVIEW_LIMIT);
        &self.members[..end]
    }

    /// Overflow line below the preview
    pub fn overflow_note(&self) -> Option<String> {
        let hidden = self.members.len().saturating_sub(MEMBER_PREVIEW_LIMIT);
        (hidden > 0).then(|| format!("+ {} more members", hidden))
    }

    /// Shown when the server reports members none of which are loaded
    pub fn unloaded_note(&self) -> Option<String> {
        match self.team.member_count {
            Some(hint) if hint > 0 && self.members.is_empty() => {
                Some(format!("This team has {} members", hint))
            }
            _ => None,
        }
    }

    pub fn emblem(&self) -> String {
        team_emblem(&self.team.name)
    }

    /// Display names of the previewed members
    pub fn preview_names(&self) -> Vec<String> {
        self.preview().iter().map(|user| full_name(user)).collect()
    }
}

/// Pair every team with its members, preserving team and user order
pub fn reconcile<'a>(teams: &'a [Team], users: &'a [User]) -> Vec<TeamMembership<'a>> {
    teams
        .iter()
        .map(|team| TeamMembership {
            team,
            members: members_of(team, users),
        })
        .collect()
}

pub fn members_of<'a>(team: &Team, users: &'a [User]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| user.team_id.as_deref() == Some(team.id.as_str()))
        .collect()
}

/// Up to two initials from the team name, or `#` when it has none
pub fn team_emblem(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "#".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, name: &str, hint: Option<u32>) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_by: None,
            member_count: hint,
            members: Vec::new(),
            created_at: None,
        }
    }

    fn user(id: &str, team: Option<&str>) -> User {
        User {
            id: id.to_string(),
            username: format!("user_{}", id),
            email: format!("{}@octofit.dev", id),
            first_name: "First".to_string(),
            last_name: id.to_uppercase(),
            team_id: team.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_hint_wins_when_no_members_loaded() {
        let teams = vec![team("t1", "Team Marvel", Some(5))];
        let users = vec![user("u1", Some("t2")), user("u2", None)];

        let view = reconcile(&teams, &users);

        assert!(view[0].members.is_empty());
        assert_eq!(view[0].displayed_count(), 5);
        assert_eq!(view[0].member_label(), "5 members");
        assert_eq!(
            view[0].unloaded_note().as_deref(),
            Some("This team has 5 members")
        );
    }

    #[test]
    fn test_missing_or_zero_hint_falls_back_to_computed() {
        let teams = vec![team("t1", "Marvel", None), team("t2", "DC", Some(0))];
        let users = vec![
            user("u1", Some("t1")),
            user("u2", Some("t2")),
            user("u3", Some("t1")),
        ];

        let view = reconcile(&teams, &users);

        assert_eq!(view[0].displayed_count(), 2);
        assert_eq!(view[1].displayed_count(), 1);
        assert_eq!(view[1].member_label(), "1 member");
        assert_eq!(view[1].unloaded_note(), None);
    }

    #[test]
    fn test_hint_smaller_than_members_still_wins() {
        let teams = vec![team("t1", "Marvel", Some(1))];
        let users = vec![user("u1", Some("t1")), user("u2", Some("t1"))];

        assert_eq!(reconcile(&teams, &users)[0].displayed_count(), 1);
    }

    #[test]
    fn test_preview_and_overflow() {
        let teams = vec![team("t1", "Marvel", None)];
        let users: Vec<User> = (1..=5).map(|i| user(&format!("u{}", i), Some("t1"))).collect();

        let view = reconcile(&teams, &users);
        let membership = &view[0];

        assert_eq!(membership.preview().len(), 3);
        assert_eq!(membership.preview()[0].id, "u1");
        assert_eq!(membership.preview_names()[2], "First U3");
        assert_eq!(membership.overflow_note().as_deref(), Some("+ 2 more members"));
    }

    #[test]
    fn test_members_list_on_team_is_not_used_for_matching() {
        let mut marvel = team("t1", "Marvel", None);
        marvel.members = vec!["u1".to_string()];
        let users = vec![user("u1", None)];

        let view = reconcile(std::slice::from_ref(&marvel), &users);
        assert_eq!(view[0].displayed_count(), 0);
    }

    #[test]
    fn test_team_emblem() {
        assert_eq!(team_emblem("Team Marvel"), "TM");
        assert_eq!(team_emblem("avengers"), "A");
        assert_eq!(team_emblem("  "), "#");
        assert_eq!(team_emblem("x-men united forever"), "XU");
    }
}
