use crate::Lvl;
use crate::ctx::LevelCtx;

/// Check whether specific variables occur free in an expression.
///
/// The traversal keeps the context in sync with the binders it crosses, so a
/// variable occurrence can always be converted to the level of the binder it
/// points to. The predicate is called with that level.
pub trait Occurs {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool;
}

/// Does the variable bound at `lvl` occur free in `t`?
pub fn occurs_var<T: Occurs>(ctx: &mut LevelCtx, lvl: Lvl, t: &T) -> bool {
    t.occurs(ctx, &|other| other == lvl)
}

/// Does any variable bound at or above level `lo` occur free in `t`?
///
/// Variables bound inside `t` itself do not count as occurrences.
pub fn occurs_between<T: Occurs>(ctx: &mut LevelCtx, lo: usize, t: &T) -> bool {
    let hi = ctx.len();
    t.occurs(ctx, &move |lvl: Lvl| lvl.0 >= lo && lvl.0 < hi)
}

impl<T: Occurs> Occurs for Box<T> {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        (**self).occurs(ctx, f)
    }
}

impl<T: Occurs> Occurs for Option<T> {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.as_ref().map(|inner| inner.occurs(ctx, f)).unwrap_or_default()
    }
}

impl<T: Occurs> Occurs for Vec<T> {
    fn occurs<F: Fn(Lvl) -> bool>(&self, ctx: &mut LevelCtx, f: &F) -> bool {
        self.iter().any(|x| x.occurs(ctx, f))
    }
}
