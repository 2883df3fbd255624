// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::collections::HashSet;

/// A channel's followers and followings split by reciprocity
///
/// Names are compared as exact strings. Follower nicknames and followed
/// channel names share a namespace on chzzk, which is what makes this work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowRelations {
    pub followers: Vec<String>,
    pub followings: Vec<String>,
    pub mutual_follows: Vec<String>,
    pub only_followers: Vec<String>,
    pub only_following: Vec<String>,
}

/// Split followers and followings into mutual and one-sided lists
///
/// Output lists keep input order, and duplicates in the input are kept.
pub fn compute_relations(followers: Vec<String>, followings: Vec<String>) -> FollowRelations {
    let follower_set: HashSet<&str> = followers.iter().map(String::as_str).collect();
    let following_set: HashSet<&str> = followings.iter().map(String::as_str).collect();

    let (mutual_follows, only_followers): (Vec<String>, Vec<String>) = followers
        .iter()
        .cloned()
        .partition(|name| following_set.contains(name.as_str()));

    let only_following = followings
        .iter()
        .filter(|name| !follower_set.contains(name.as_str()))
        .cloned()
        .collect();

    FollowRelations {
        followers,
        followings,
        mutual_follows,
        only_followers,
        only_following,
    }
}
