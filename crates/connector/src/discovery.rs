//! Board discovery.
//!
//! Queries the remote service for every board visible to the authenticated
//! member and produces the sorted descriptor list a selection UI offers to
//! the end user.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::errors::ConnectorError;
use crate::ports::BoardApi;
use crate::types::BoardDescriptor;

/// Display label of the aggregate entry representing every board at once.
pub const ALL_BOARDS_LABEL: &str = "All Boards";

/// The authenticated principal, as the remote service spells it.
pub(crate) const SELF_MEMBER: &str = "me";

/// Discovers the boards the member may select from.
///
/// When `include_aggregate` is set, a single label-less "All Boards" entry is
/// added; it always sorts first. An empty result is valid (the member simply
/// owns no boards) and is not an error.
///
/// # Errors
///
/// Returns [`ConnectorError::Discovery`] carrying the upstream description
/// when the board listing fails.
pub async fn discover_boards(
    api: &dyn BoardApi,
    include_aggregate: bool,
) -> Result<Vec<BoardDescriptor>, ConnectorError> {
    info!("fetching board list for discovery");
    let boards = api
        .member_boards(SELF_MEMBER)
        .await
        .map_err(|err| ConnectorError::Discovery {
            message: err.to_string(),
        })?;
    debug!(count = boards.len(), "board list received");

    let mut descriptors: Vec<BoardDescriptor> = boards
        .into_iter()
        .map(|board| BoardDescriptor::Board {
            label: board.name,
            name: board.id,
        })
        .collect();

    if include_aggregate {
        descriptors.push(BoardDescriptor::All {
            plural_label: ALL_BOARDS_LABEL.to_owned(),
        });
    }

    descriptors.sort_by(compare_descriptors);
    Ok(descriptors)
}

/// Selection-UI ordering: the label-less aggregate entry first, then
/// ascending case-insensitive label order with a byte-order tiebreak so the
/// result is total and deterministic.
fn compare_descriptors(a: &BoardDescriptor, b: &BoardDescriptor) -> Ordering {
    match (a.label(), b.label()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
    }
}
