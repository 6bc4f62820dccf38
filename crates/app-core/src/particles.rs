//! Point-particle bursts: smoke above the candle, confetti over the cake.
//!
//! A burst is a fixed-size batch of particles sharing one opacity and one
//! lifecycle. Integration is deliberately tick-based (fixed increments per
//! frame, no `dt` scaling) to match the reference visuals.

use glam::Vec3;
use rand::prelude::*;
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParticleError {
    #[error("a particle burst needs at least one particle")]
    EmptyBurst,
}

/// Container the particles visually belong to. Cake-local positions follow
/// the cake group's transform; scene positions are world-space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleParent {
    Cake,
    Scene,
}

/// Spawn-time description of a burst.
#[derive(Clone, Copy, Debug)]
pub struct ParticleParams {
    pub count: usize,
    pub origin: Vec3,
    /// Per-tick vertical velocity delta (0 = none, negative = falling).
    pub gravity: f32,
    /// Per-tick opacity decrement.
    pub fade_rate: f32,
    pub opacity: f32,
    pub palette: Option<&'static [[f32; 3]]>,
    pub parent: ParticleParent,
}

impl ParticleParams {
    pub fn smoke() -> Self {
        Self {
            count: SMOKE_COUNT,
            origin: Vec3::from(CANDLE_TIP_LOCAL),
            gravity: 0.0,
            fade_rate: SMOKE_FADE_PER_TICK,
            opacity: SMOKE_OPACITY,
            palette: None,
            parent: ParticleParent::Cake,
        }
    }

    pub fn confetti(count: usize) -> Self {
        Self {
            count,
            origin: Vec3::from(CONFETTI_ORIGIN),
            gravity: CONFETTI_GRAVITY_PER_TICK,
            fade_rate: CONFETTI_FADE_PER_TICK,
            opacity: CONFETTI_OPACITY,
            palette: Some(&CONFETTI_PALETTE),
            parent: ParticleParent::Scene,
        }
    }
}

/// Smoke velocity: slight horizontal jitter, biased upward drift.
pub fn rising_jitter(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * SMOKE_JITTER_XZ,
        rng.gen::<f32>() * SMOKE_RISE_SPAN + SMOKE_RISE_MIN,
        (rng.gen::<f32>() - 0.5) * 2.0 * SMOKE_JITTER_XZ,
    )
}

/// Confetti velocity: wider jitter, stronger upward launch.
pub fn launch_jitter(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * CONFETTI_JITTER_XZ,
        rng.gen::<f32>() * CONFETTI_LAUNCH_SPAN + CONFETTI_LAUNCH_MIN,
        (rng.gen::<f32>() - 0.5) * 2.0 * CONFETTI_JITTER_XZ,
    )
}

/// A live burst. Positions/velocities mutate in place each tick; colors are
/// fixed at spawn.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    id: ParticleSystemId,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Option<Vec<[f32; 3]>>,
    opacity: f32,
    gravity: f32,
    fade_rate: f32,
    origin: Vec3,
    parent: ParticleParent,
    alive: bool,
}

impl ParticleSystem {
    fn spawn(
        id: ParticleSystemId,
        params: &ParticleParams,
        mut velocity_init: impl FnMut(&mut StdRng) -> Vec3,
        rng: &mut StdRng,
    ) -> Result<Self, ParticleError> {
        if params.count == 0 {
            return Err(ParticleError::EmptyBurst);
        }
        let positions = vec![params.origin; params.count];
        let velocities = (0..params.count).map(|_| velocity_init(rng)).collect();
        let colors = params.palette.map(|palette| {
            (0..params.count)
                .map(|_| *palette.choose(rng).unwrap_or(&[1.0, 1.0, 1.0]))
                .collect()
        });
        Ok(Self {
            id,
            positions,
            velocities,
            colors,
            opacity: params.opacity,
            gravity: params.gravity,
            fade_rate: params.fade_rate,
            origin: params.origin,
            parent: params.parent,
            alive: true,
        })
    }

    /// One integration step. Returns whether the system is still alive; a
    /// tick on a dead system is a no-op.
    pub fn tick(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        if self.gravity != 0.0 {
            for v in &mut self.velocities {
                v.y += self.gravity;
            }
        }
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p += *v;
        }
        self.opacity -= self.fade_rate;
        if self.opacity <= 0.0 {
            self.alive = false;
        }
        self.alive
    }

    pub fn id(&self) -> ParticleSystemId {
        self.id
    }
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn alive(&self) -> bool {
        self.alive
    }
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
    pub fn origin(&self) -> Vec3 {
        self.origin
    }
    pub fn parent(&self) -> ParticleParent {
        self.parent
    }
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }
    pub fn colors(&self) -> Option<&[[f32; 3]]> {
        self.colors.as_deref()
    }

    /// Flat xyz view for renderer upload.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn colors_flat(&self) -> Option<&[f32]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }
}

/// Opaque handle to a burst owned by a [`ParticleBank`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleSystemId(u32);

/// All live bursts, each with an independent lifecycle.
///
/// The reference kept one tracked reference per kind and let a re-spawn
/// orphan its fading predecessor; here every burst stays owned and addressable
/// until it fades, so overlapping bursts simply coexist.
#[derive(Default, Debug)]
pub struct ParticleBank {
    systems: Vec<ParticleSystem>,
    next_id: u32,
}

impl ParticleBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(
        &mut self,
        params: &ParticleParams,
        velocity_init: impl FnMut(&mut StdRng) -> Vec3,
        rng: &mut StdRng,
    ) -> Result<ParticleSystemId, ParticleError> {
        let id = ParticleSystemId(self.next_id);
        let system = ParticleSystem::spawn(id, params, velocity_init, rng)?;
        self.next_id = self.next_id.wrapping_add(1);
        self.systems.push(system);
        Ok(id)
    }

    /// Advance every live system one tick and retire the ones that faded out
    /// this tick (detached exactly on the tick opacity first reaches zero).
    pub fn tick_all(&mut self) {
        for s in &mut self.systems {
            s.tick();
        }
        self.systems.retain(|s| s.alive());
    }

    pub fn get(&self, id: ParticleSystemId) -> Option<&ParticleSystem> {
        self.systems.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ParticleSystemId) -> Option<&mut ParticleSystem> {
        self.systems.iter_mut().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: ParticleSystemId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleSystem> {
        self.systems.iter()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
