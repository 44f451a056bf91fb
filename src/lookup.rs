use crate::types::ContainerSnapshot;

/// Find the container whose canonical (first) alias equals `name`.
///
/// Only the first alias is compared. Containers reported without any alias
/// never match.
pub fn find_container<'a>(
    containers: &'a [ContainerSnapshot],
    name: &str,
) -> Option<&'a ContainerSnapshot> {
    containers
        .iter()
        .find(|container| container.canonical_name() == Some(name))
}
