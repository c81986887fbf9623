//! Brick-hit behaviors
//!
//! Each brick carries a [`Behavior`] tree chosen by the [`StrategyFactory`]
//! when the brick is built. On impact the tree is interpreted by [`resolve`]
//! into an ordered list of [`HitEffect`]s which the game state applies.
//!
//! Evaluation order is always base first, then the wrapping node's own
//! effect. A `Composite` ("double") node draws up to two more behaviors at
//! hit time from the same distribution, sharing one budget of
//! [`MAX_EXTRA_BEHAVIORS`] across any nested composites.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Draws are uniform over `[0, DRAW_RANGE)`
pub const DRAW_RANGE: u32 = 10;
/// Extra draws a composite performs
pub const COMPOSITE_DRAWS: u32 = 2;
/// Hard cap on extra behaviors applied by one composite hit, nested ones included
pub const MAX_EXTRA_BEHAVIORS: u32 = 3;

/// Outcome of one factory draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Basic,
    ExtraProjectiles,
    ExtraPaddle,
    Turbo,
    ExtraHeart,
    Double,
}

impl StrategyKind {
    /// Map a draw from `[0, DRAW_RANGE)` to a kind; anything unmapped is `Basic`
    pub fn from_draw(draw: u32) -> Self {
        match draw {
            5 => StrategyKind::ExtraProjectiles,
            6 => StrategyKind::ExtraPaddle,
            7 => StrategyKind::Turbo,
            8 => StrategyKind::ExtraHeart,
            9 => StrategyKind::Double,
            _ => StrategyKind::Basic,
        }
    }

    /// The side effect a single-bonus kind adds on top of brick removal
    pub fn bonus_effect(&self) -> Option<HitEffect> {
        match self {
            StrategyKind::ExtraProjectiles => Some(HitEffect::SpawnProjectiles),
            StrategyKind::ExtraPaddle => Some(HitEffect::SpawnPaddle),
            StrategyKind::Turbo => Some(HitEffect::EnterTurboMode),
            StrategyKind::ExtraHeart => Some(HitEffect::SpawnBonusHeart),
            StrategyKind::Basic | StrategyKind::Double => None,
        }
    }
}

/// A brick's hit behavior. Every non-terminal node wraps a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    RemoveBrick,
    SpawnProjectile(Box<Behavior>),
    SpawnPaddle(Box<Behavior>),
    SpawnBonusHeart(Box<Behavior>),
    EnterTurboMode(Box<Behavior>),
    Composite { base: Box<Behavior>, max_extras: u32 },
}

impl Behavior {
    /// Wrap `base` in the node for `kind` (`Basic` returns `base` unchanged)
    pub fn wrap(kind: StrategyKind, base: Behavior) -> Self {
        let base = Box::new(base);
        match kind {
            StrategyKind::Basic => *base,
            StrategyKind::ExtraProjectiles => Behavior::SpawnProjectile(base),
            StrategyKind::ExtraPaddle => Behavior::SpawnPaddle(base),
            StrategyKind::Turbo => Behavior::EnterTurboMode(base),
            StrategyKind::ExtraHeart => Behavior::SpawnBonusHeart(base),
            StrategyKind::Double => Behavior::Composite {
                base,
                max_extras: MAX_EXTRA_BEHAVIORS,
            },
        }
    }

    /// Kind of the outermost node
    pub fn kind(&self) -> StrategyKind {
        match self {
            Behavior::RemoveBrick => StrategyKind::Basic,
            Behavior::SpawnProjectile(_) => StrategyKind::ExtraProjectiles,
            Behavior::SpawnPaddle(_) => StrategyKind::ExtraPaddle,
            Behavior::EnterTurboMode(_) => StrategyKind::Turbo,
            Behavior::SpawnBonusHeart(_) => StrategyKind::ExtraHeart,
            Behavior::Composite { .. } => StrategyKind::Double,
        }
    }
}

/// One side effect requested by a behavior, applied by the game state in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitEffect {
    RemoveBrick,
    /// Two secondary projectiles at the brick center
    SpawnProjectiles,
    SpawnPaddle,
    SpawnBonusHeart,
    /// Boost the colliding projectile
    EnterTurboMode,
}

/// Weighted random source for brick behaviors
#[derive(Debug, Clone)]
pub struct StrategyFactory {
    rng: Pcg32,
}

impl StrategyFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> StrategyKind {
        StrategyKind::from_draw(self.rng.random_range(0..DRAW_RANGE))
    }

    /// Draw a kind and build its behavior around plain brick removal
    pub fn create_strategy(&mut self) -> Behavior {
        Behavior::wrap(self.draw(), Behavior::RemoveBrick)
    }
}

/// Interpret `behavior` for one hit. Composite nodes draw from `factory`.
pub fn resolve(behavior: &Behavior, factory: &mut StrategyFactory) -> Vec<HitEffect> {
    resolve_with(behavior, || factory.draw())
}

/// Interpret `behavior` with composite draws taken from `draw`
pub fn resolve_with(
    behavior: &Behavior,
    mut draw: impl FnMut() -> StrategyKind,
) -> Vec<HitEffect> {
    let mut effects = Vec::new();
    apply(behavior, &mut draw, &mut effects);
    effects
}

fn apply<F: FnMut() -> StrategyKind>(
    behavior: &Behavior,
    draw: &mut F,
    effects: &mut Vec<HitEffect>,
) {
    match behavior {
        Behavior::RemoveBrick => effects.push(HitEffect::RemoveBrick),
        Behavior::SpawnProjectile(base) => {
            apply(base, draw, effects);
            effects.push(HitEffect::SpawnProjectiles);
        }
        Behavior::SpawnPaddle(base) => {
            apply(base, draw, effects);
            effects.push(HitEffect::SpawnPaddle);
        }
        Behavior::SpawnBonusHeart(base) => {
            apply(base, draw, effects);
            effects.push(HitEffect::SpawnBonusHeart);
        }
        Behavior::EnterTurboMode(base) => {
            apply(base, draw, effects);
            effects.push(HitEffect::EnterTurboMode);
        }
        Behavior::Composite { base, max_extras } => {
            apply(base, draw, effects);
            let mut used = 0;
            draw_extras(draw, *max_extras, &mut used, effects);
        }
    }
}

/// Extra behaviors share the composite's base, which has already run, so
/// only their own effects are appended here. `used` counts applied effects
/// across nested composites.
fn draw_extras<F: FnMut() -> StrategyKind>(
    draw: &mut F,
    cap: u32,
    used: &mut u32,
    effects: &mut Vec<HitEffect>,
) {
    for _ in 0..COMPOSITE_DRAWS {
        if *used >= cap {
            return;
        }
        let kind = draw();
        match kind {
            StrategyKind::Basic => {}
            StrategyKind::Double => {
                // Nested composites only start with room for two effects
                if cap - *used >= 2 {
                    draw_extras(draw, cap, used, effects);
                }
            }
            _ => {
                if let Some(effect) = kind.bonus_effect() {
                    log::debug!("composite extra: {:?}", kind);
                    effects.push(effect);
                    *used += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_draw_mapping() {
        for draw in 0..5 {
            assert_eq!(StrategyKind::from_draw(draw), StrategyKind::Basic);
        }
        assert_eq!(StrategyKind::from_draw(5), StrategyKind::ExtraProjectiles);
        assert_eq!(StrategyKind::from_draw(6), StrategyKind::ExtraPaddle);
        assert_eq!(StrategyKind::from_draw(7), StrategyKind::Turbo);
        assert_eq!(StrategyKind::from_draw(8), StrategyKind::ExtraHeart);
        assert_eq!(StrategyKind::from_draw(9), StrategyKind::Double);
        assert_eq!(StrategyKind::from_draw(42), StrategyKind::Basic);
    }

    #[test]
    fn test_draw_distribution() {
        let mut factory = StrategyFactory::new(2024);
        let n = 10_000;
        let mut counts: HashMap<StrategyKind, u32> = HashMap::new();
        for _ in 0..n {
            *counts.entry(factory.draw()).or_default() += 1;
        }

        let share = |kind| *counts.get(&kind).unwrap_or(&0) as f64 / n as f64;
        assert!((share(StrategyKind::Basic) - 0.5).abs() < 0.025);
        for kind in [
            StrategyKind::ExtraProjectiles,
            StrategyKind::ExtraPaddle,
            StrategyKind::Turbo,
            StrategyKind::ExtraHeart,
            StrategyKind::Double,
        ] {
            assert!((share(kind) - 0.1).abs() < 0.015, "{kind:?} share {}", share(kind));
        }
    }

    #[test]
    fn test_factory_is_reproducible() {
        let mut a = StrategyFactory::new(7);
        let mut b = StrategyFactory::new(7);
        for _ in 0..100 {
            assert_eq!(a.create_strategy(), b.create_strategy());
        }
    }

    #[test]
    fn test_wrap_builds_decorator_around_removal() {
        assert_eq!(
            Behavior::wrap(StrategyKind::Turbo, Behavior::RemoveBrick),
            Behavior::EnterTurboMode(Box::new(Behavior::RemoveBrick))
        );
        assert_eq!(
            Behavior::wrap(StrategyKind::Basic, Behavior::RemoveBrick),
            Behavior::RemoveBrick
        );
        assert_eq!(
            Behavior::wrap(StrategyKind::Double, Behavior::RemoveBrick).kind(),
            StrategyKind::Double
        );
    }

    #[test]
    fn test_base_runs_before_wrapper() {
        let mut factory = StrategyFactory::new(1);
        let behavior = Behavior::SpawnPaddle(Box::new(Behavior::SpawnBonusHeart(Box::new(
            Behavior::RemoveBrick,
        ))));
        assert_eq!(
            resolve(&behavior, &mut factory),
            vec![
                HitEffect::RemoveBrick,
                HitEffect::SpawnBonusHeart,
                HitEffect::SpawnPaddle
            ]
        );
    }

    #[test]
    fn test_composite_with_zero_budget_only_removes() {
        let mut factory = StrategyFactory::new(1);
        let behavior = Behavior::Composite {
            base: Box::new(Behavior::RemoveBrick),
            max_extras: 0,
        };
        assert_eq!(resolve(&behavior, &mut factory), vec![HitEffect::RemoveBrick]);
    }

    fn scripted(kinds: Vec<StrategyKind>) -> impl FnMut() -> StrategyKind {
        let mut kinds = kinds.into_iter();
        move || kinds.next().unwrap_or(StrategyKind::Basic)
    }

    fn double() -> Behavior {
        Behavior::wrap(StrategyKind::Double, Behavior::RemoveBrick)
    }

    #[test]
    fn test_composite_applies_drawn_bonuses_in_order() {
        let effects = resolve_with(
            &double(),
            scripted(vec![StrategyKind::ExtraHeart, StrategyKind::Turbo]),
        );
        assert_eq!(
            effects,
            vec![
                HitEffect::RemoveBrick,
                HitEffect::SpawnBonusHeart,
                HitEffect::EnterTurboMode
            ]
        );
    }

    #[test]
    fn test_nested_composite_reaches_cap_of_three() {
        let mut draws = 0;
        let mut kinds = vec![
            StrategyKind::Double,
            StrategyKind::ExtraPaddle,
            StrategyKind::ExtraProjectiles,
            StrategyKind::Turbo,
            StrategyKind::ExtraHeart,
        ]
        .into_iter();
        let effects = resolve_with(&double(), || {
            draws += 1;
            kinds.next().unwrap_or(StrategyKind::Basic)
        });

        assert_eq!(
            effects,
            vec![
                HitEffect::RemoveBrick,
                HitEffect::SpawnPaddle,
                HitEffect::SpawnProjectiles,
                HitEffect::EnterTurboMode
            ]
        );
        // Outer draw, two nested draws, one more outer draw
        assert_eq!(draws, 4);
    }

    #[test]
    fn test_nested_composite_needs_two_free_slots() {
        // Two nested doubles fill two slots; a double drawn with one slot
        // left is discarded and the outer loop adds the last effect
        let effects = resolve_with(
            &double(),
            scripted(vec![
                StrategyKind::Double,
                StrategyKind::Double,
                StrategyKind::ExtraPaddle,
                StrategyKind::Turbo,
                StrategyKind::Double,
                StrategyKind::ExtraHeart,
            ]),
        );
        assert_eq!(
            effects,
            vec![
                HitEffect::RemoveBrick,
                HitEffect::SpawnPaddle,
                HitEffect::EnterTurboMode,
                HitEffect::SpawnBonusHeart
            ]
        );
    }

    #[test]
    fn test_basic_draws_add_nothing() {
        let effects = resolve_with(
            &double(),
            scripted(vec![StrategyKind::Basic, StrategyKind::Basic]),
        );
        assert_eq!(effects, vec![HitEffect::RemoveBrick]);
    }

    #[test]
    fn test_seeded_composites_hit_every_extra_count() {
        let mut seen = [0u32; MAX_EXTRA_BEHAVIORS as usize + 1];
        for seed in 0..5000 {
            let mut factory = StrategyFactory::new(seed);
            let extras = resolve(&double(), &mut factory).len() - 1;
            seen[extras] += 1;
        }
        assert!(seen.iter().all(|&count| count > 0), "extra counts {seen:?}");
    }

    proptest! {
        #[test]
        fn prop_composite_is_bounded(seed in any::<u64>()) {
            let mut factory = StrategyFactory::new(seed);
            let behavior = Behavior::wrap(StrategyKind::Double, Behavior::RemoveBrick);
            let effects = resolve(&behavior, &mut factory);

            prop_assert_eq!(effects[0], HitEffect::RemoveBrick);
            let removals = effects.iter().filter(|e| **e == HitEffect::RemoveBrick).count();
            prop_assert_eq!(removals, 1);
            prop_assert!(effects.len() - 1 <= MAX_EXTRA_BEHAVIORS as usize);
        }

        #[test]
        fn prop_every_strategy_removes_exactly_once(seed in any::<u64>()) {
            let mut factory = StrategyFactory::new(seed);
            for _ in 0..20 {
                let behavior = factory.create_strategy();
                let effects = resolve(&behavior, &mut factory);
                let removals = effects.iter().filter(|e| **e == HitEffect::RemoveBrick).count();
                prop_assert_eq!(removals, 1);
            }
        }
    }
}
