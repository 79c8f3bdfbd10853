//! Bounded recursion.
//!
//! `recurse(max_depth, builder)` describes a generator in terms of itself.
//! Each recursion level is an explicit node: level `d` owns the body built by
//! `builder` for that level, the body owns the `Recur` handle, and the handle
//! owns the lazily built level `d - 1`. Ownership runs strictly downward, so
//! there are no reference cycles, and levels that are never reached are never
//! built.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::errors::GenerationError;
use crate::generators::{Draw, DrawContext, Gen, Generator, IntoGen};

type Builder = dyn Fn(Recur) -> Result<Gen, GenerationError> + Send + Sync;

/// Builds a self-referential generator with at most `max_depth` nested
/// recursive levels.
///
/// `builder` receives the self-reference handle for the level being built and
/// returns that level's generator. The top level is built immediately, so
/// configuration errors surface here; deeper levels are built on first use
/// and memoized.
///
/// Drawing the handle at depth 0 omits. Grammars should therefore offer a
/// non-recursive option inside `any`/`weighted`, or steer exhaustion to a
/// fallback with [`Recur::or`].
pub fn recurse<F>(max_depth: u32, builder: F) -> Result<Gen, GenerationError>
where
    F: Fn(Recur) -> Result<Gen, GenerationError> + Send + Sync + 'static,
{
    build_level(max_depth, Arc::new(builder))
}

fn build_level(depth: u32, builder: Arc<Builder>) -> Result<Gen, GenerationError> {
    let handle = Recur {
        depth,
        next: Arc::new(NextLevel {
            parent_depth: depth,
            builder: Arc::clone(&builder),
            child: OnceLock::new(),
            init: Mutex::new(()),
        }),
    };
    let body = (*builder)(handle)?;
    debug!(depth, generator = body.id(), "recursion level built");
    Ok(Gen::new(LevelGenerator { body }))
}

/// Self-reference handle passed to a `recurse` builder.
///
/// Converting it into a generator (`IntoGen`) yields "one level deeper".
/// Clones share the same memoized child level.
#[derive(Clone)]
pub struct Recur {
    depth: u32,
    next: Arc<NextLevel>,
}

impl Recur {
    /// Remaining recursion budget at this level.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Recurses while budget remains, otherwise draws `fallback`.
    pub fn or(&self, fallback: impl IntoGen) -> Gen {
        Gen::new(RecurOrGenerator {
            recur: self.clone(),
            fallback: fallback.into_gen(),
        })
    }

    fn draw_next(&self, ctx: &mut DrawContext<'_>) -> Draw {
        if self.depth == 0 {
            return Ok(None);
        }
        let child = self.next.get_or_build(ctx)?;
        child.draw(ctx)
    }
}

impl IntoGen for Recur {
    fn into_gen(self) -> Gen {
        Gen::new(RecurGenerator { recur: self })
    }
}

impl IntoGen for &Recur {
    fn into_gen(self) -> Gen {
        self.clone().into_gen()
    }
}

struct NextLevel {
    parent_depth: u32,
    builder: Arc<Builder>,
    child: OnceLock<Gen>,
    init: Mutex<()>,
}

impl NextLevel {
    /// Returns the child level, building it on first use.
    ///
    /// Construction runs under `init`, so racing first draws build the child
    /// once and all observe the same node.
    fn get_or_build(&self, ctx: &mut DrawContext<'_>) -> Result<Gen, GenerationError> {
        if let Some(child) = self.child.get() {
            return Ok(child.clone());
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(child) = self.child.get() {
            return Ok(child.clone());
        }
        let depth = self.parent_depth.checked_sub(1).ok_or_else(|| {
            GenerationError::InvalidConfiguration("recursion budget exhausted".to_string())
        })?;
        let child = build_level(depth, Arc::clone(&self.builder))?;
        ctx.stats.levels_built += 1;
        Ok(self.child.get_or_init(|| child).clone())
    }
}

struct LevelGenerator {
    body: Gen,
}

impl Generator for LevelGenerator {
    fn id(&self) -> &'static str {
        "recurse"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        self.body.draw(ctx)
    }
}

struct RecurGenerator {
    recur: Recur,
}

impl Generator for RecurGenerator {
    fn id(&self) -> &'static str {
        "recurse.self"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        self.recur.draw_next(ctx)
    }
}

struct RecurOrGenerator {
    recur: Recur,
    fallback: Gen,
}

impl Generator for RecurOrGenerator {
    fn id(&self) -> &'static str {
        "recurse.or"
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Draw {
        if self.recur.depth > 0 {
            self.recur.draw_next(ctx)
        } else {
            self.fallback.draw(ctx)
        }
    }
}
