//! Group a chronological comment feed by code location.
//!
//! Groups keep first-appearance order from the feed. Within a file group
//! comments are re-sorted by anchor line; the general group keeps feed
//! order.

use indexmap::IndexMap;

use crate::models::{Comment, Location, LocationGroup};

/// Partition `comments` into location groups.
///
/// Every comment lands in exactly one group. Comments without a line
/// number sort first within their file group and keep their relative
/// feed order.
pub fn group_by_location(comments: Vec<Comment>) -> Vec<LocationGroup> {
    let mut groups: IndexMap<Location, Vec<Comment>> = IndexMap::new();

    for comment in comments {
        groups.entry(comment.location()).or_default().push(comment);
    }

    groups
        .into_iter()
        .map(|(location, mut comments)| {
            if matches!(location, Location::File(_)) {
                // Stable sort: equal lines keep chronological order.
                comments.sort_by_key(|c| c.line().unwrap_or(0));
            }
            LocationGroup { location, comments }
        })
        .collect()
}
