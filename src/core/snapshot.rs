//! Before/after views of an instance used by update hooks.

/// State and props of an instance at one point of an update.
///
/// `will_update` and `should_update` receive the candidate snapshot,
/// `did_update` receives the previous one.
#[derive(Debug)]
pub struct Snapshot<'a, P, S> {
    pub state: &'a S,
    pub props: &'a P,
}

impl<P, S> Clone for Snapshot<'_, P, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, S> Copy for Snapshot<'_, P, S> {}

impl<'a, P, S> Snapshot<'a, P, S> {
    pub fn new(state: &'a S, props: &'a P) -> Self {
        Self { state, props }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_copy_for_any_payload() {
        struct NotClone(u8);

        let state = NotClone(1);
        let props = NotClone(2);
        let snapshot = Snapshot::new(&state, &props);
        let copy = snapshot;

        assert_eq!(snapshot.state.0, 1);
        assert_eq!(copy.props.0, 2);
    }
}
