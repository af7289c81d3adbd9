//! In-memory persistence for users, tournaments, groups, and memberships.
//!
//! The store is the single collaborator the logic layer talks to. Each entity
//! lives in a `BTreeMap` keyed by a sequentially assigned id, so iterating a
//! map yields records in creation order (matchmaking relies on this for
//! groups). The binary wraps the whole store in one `RwLock`; a write guard
//! around an operation is the transactional boundary that keeps multi-step
//! read-then-write sequences (placement, entry fee, claims) atomic.

use std::collections::BTreeMap;

use crate::models::{
    Country, Group, GroupId, Membership, MembershipId, Tournament, TournamentId, User, UserId,
};

/// All persisted state, behind repository-style accessors.
#[derive(Clone, Debug, Default)]
pub struct Store {
    users: BTreeMap<UserId, User>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    groups: BTreeMap<GroupId, Group>,
    memberships: BTreeMap<MembershipId, Membership>,
    next_user_id: UserId,
    next_tournament_id: TournamentId,
    next_group_id: GroupId,
    next_membership_id: MembershipId,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- users ---

    /// Insert a user, assigning its id. Returns the assigned id.
    pub fn insert_user(&mut self, mut user: User) -> UserId {
        self.next_user_id += 1;
        user.id = self.next_user_id;
        self.users.insert(user.id, user);
        self.next_user_id
    }

    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn find_user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Remove a user. Returns true if one existed. Memberships are kept as
    /// historical records.
    pub fn remove_user(&mut self, id: UserId) -> bool {
        self.users.remove(&id).is_some()
    }

    /// All users in creation order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Next id an inserted user would get (for pre-insert username defaults).
    pub fn peek_next_user_id(&self) -> UserId {
        self.next_user_id + 1
    }

    // --- tournaments ---

    /// Insert a tournament, assigning its id. Returns the assigned id.
    pub fn insert_tournament(&mut self, mut tournament: Tournament) -> TournamentId {
        self.next_tournament_id += 1;
        tournament.id = self.next_tournament_id;
        self.tournaments.insert(tournament.id, tournament);
        self.next_tournament_id
    }

    pub fn find_tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    pub fn find_tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.get_mut(&id)
    }

    /// Ids of all tournaments whose active flag is set, in creation order.
    pub fn active_tournament_ids(&self) -> Vec<TournamentId> {
        self.tournaments
            .values()
            .filter(|t| t.active)
            .map(|t| t.id)
            .collect()
    }

    /// All tournaments in creation order.
    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }

    // --- groups ---

    /// Insert a group, assigning its id. Returns the assigned id.
    pub fn insert_group(&mut self, mut group: Group) -> GroupId {
        self.next_group_id += 1;
        group.id = self.next_group_id;
        self.groups.insert(group.id, group);
        self.next_group_id
    }

    pub fn find_group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn find_group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    /// Ids of a tournament's groups, ascending (first created first).
    pub fn group_ids_by_tournament(&self, tournament_id: TournamentId) -> Vec<GroupId> {
        self.groups
            .values()
            .filter(|g| g.tournament_id == tournament_id)
            .map(|g| g.id)
            .collect()
    }

    // --- memberships ---

    /// Insert a membership, assigning its id. Returns the assigned id.
    pub fn insert_membership(&mut self, mut membership: Membership) -> MembershipId {
        self.next_membership_id += 1;
        membership.id = self.next_membership_id;
        self.memberships.insert(membership.id, membership);
        self.next_membership_id
    }

    pub fn find_membership_mut(&mut self, id: MembershipId) -> Option<&mut Membership> {
        self.memberships.get_mut(&id)
    }

    /// A group's memberships in join order.
    pub fn memberships_by_group(&self, group_id: GroupId) -> Vec<&Membership> {
        self.memberships
            .values()
            .filter(|m| m.group_id == group_id)
            .collect()
    }

    /// All memberships a user holds, oldest first.
    pub fn memberships_by_user(&self, user_id: UserId) -> Vec<&Membership> {
        self.memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .collect()
    }

    /// Ids of all memberships a user holds, oldest first.
    pub fn membership_ids_by_user(&self, user_id: UserId) -> Vec<MembershipId> {
        self.memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.id)
            .collect()
    }

    /// Number of members currently in a group.
    pub fn count_group_members(&self, group_id: GroupId) -> usize {
        self.memberships
            .values()
            .filter(|m| m.group_id == group_id)
            .count()
    }

    /// Whether a group already holds a member from the given country.
    pub fn group_has_country(&self, group_id: GroupId, country: Country) -> bool {
        self.memberships
            .values()
            .filter(|m| m.group_id == group_id)
            .any(|m| {
                self.users
                    .get(&m.user_id)
                    .map(|u| u.country == country)
                    .unwrap_or(false)
            })
    }

    /// Whether a user holds a membership in any group of the tournament.
    pub fn user_in_tournament(&self, tournament_id: TournamentId, user_id: UserId) -> bool {
        self.memberships.values().any(|m| {
            m.user_id == user_id
                && self
                    .groups
                    .get(&m.group_id)
                    .map(|g| g.tournament_id == tournament_id)
                    .unwrap_or(false)
        })
    }
}
