use super::SceneGraph;
use common::profile_for;

/// Region picked for the current frame, with the candidate name that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRegion<R> {
    pub name: &'static str,
    pub region: R,
}

/// Returns the first candidate region of `scenario` present in `graph`.
///
/// Unknown scenarios have no candidates and resolve to `None`, the same as a
/// scene that contains none of them.
pub fn resolve_target<G>(scenario: &str, graph: &G) -> Option<ResolvedRegion<G::Region>>
where
    G: SceneGraph + ?Sized,
{
    profile_for(scenario).regions.iter().find_map(|&name| {
        graph
            .find_region(name)
            .map(|region| ResolvedRegion { name, region })
    })
}
