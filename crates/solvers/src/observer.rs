/// Watches a solver as it iterates.
///
/// The solver hands each event to `observe` and acts on the reply: `None`
/// lets the iteration continue, `Some(action)` asks for the solver-specific
/// `action` (for bisection, [`Action::StopEarly`](crate::bisection::Action)).
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, so callers can trace
/// or record iterations inline. `()` observes nothing.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
