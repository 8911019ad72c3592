//! Which members a WebSocket client follows.

use std::collections::HashSet;

use crate::domain::UserId;

/// Follow list of one WebSocket connection.
///
/// Events are forwarded when their member is followed explicitly or when
/// the connection follows everyone (`"*"`).
#[derive(Debug, Default)]
pub struct Follows {
    members: HashSet<UserId>,
    everyone: bool,
}

impl Follows {
    /// Starts with nobody followed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows `members`, and everyone when `everyone` is set.
    pub fn follow(&mut self, members: &[UserId], everyone: bool) {
        self.everyone |= everyone;
        self.members.extend(members.iter().cloned());
    }

    /// Stops following `members`; `everyone` clears the wildcard.
    pub fn unfollow(&mut self, members: &[UserId], everyone: bool) {
        self.everyone &= !everyone;
        self.members.retain(|m| !members.contains(m));
    }

    /// Whether an event about `user_id` goes to this client.
    #[must_use]
    pub fn wants(&self, user_id: &UserId) -> bool {
        self.everyone || self.members.contains(user_id)
    }

    /// Explicitly followed members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` when no member is followed explicitly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the wildcard is on.
    #[must_use]
    pub const fn follows_everyone(&self) -> bool {
        self.everyone
    }
}
