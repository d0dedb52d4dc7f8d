//! Case lifecycle: `set_up`, body, `tear_down`

use crate::context::Context;
use crate::error::Outcome;
use tracing::trace;

/// Shared set-up/tear-down hooks plus the instance state a case body sees.
///
/// Every case gets its own instance built with `Default::default()`, so
/// state written by one case is never visible to another. Fatal assertions
/// inside the hooks propagate with `?` like they do in a body.
///
/// ```ignore
/// #[derive(Default)]
/// struct Buffer {
///     data: Vec<u8>,
/// }
///
/// impl Fixture for Buffer {
///     fn set_up(&mut self, t: &mut Context<'_>) -> Outcome {
///         self.data.extend_from_slice(b"abc");
///         tt_assert_eq!(t, self.data.len(), 3);
///         Ok(())
///     }
/// }
/// ```
pub trait Fixture: Default {
    fn set_up(&mut self, _t: &mut Context<'_>) -> Outcome {
        Ok(())
    }

    fn tear_down(&mut self, _t: &mut Context<'_>) -> Outcome {
        Ok(())
    }
}

/// Plain cases run against the empty fixture
impl Fixture for () {}

/// Run one fixture-based case against `t`.
///
/// The body is skipped when `set_up` ends fatally. `tear_down` runs on every
/// path, and the fixture is dropped before this returns.
pub fn run_fixture<F, B>(t: &mut Context<'_>, body: B)
where
    F: Fixture,
    B: FnOnce(&mut Context<'_>, &mut F) -> Outcome,
{
    let mut fixture = F::default();

    let set_up = fixture.set_up(t);
    if set_up.is_ok() && !t.is_fatal() {
        if body(t, &mut fixture).is_err() {
            trace!("body aborted by fatal assertion");
        }
    } else {
        trace!("set_up failed fatally, skipping body");
    }

    if fixture.tear_down(t).is_err() {
        trace!("tear_down aborted by fatal assertion");
    }
}

/// Run a case that has no fixture
pub fn run_plain<B>(t: &mut Context<'_>, body: B)
where
    B: FnOnce(&mut Context<'_>) -> Outcome,
{
    run_fixture::<(), _>(t, |t, _| body(t));
}
