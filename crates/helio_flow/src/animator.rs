//! The flow animator
//!
//! Holds the current readings and container width, decides which flows are
//! active and keeps one set of particle clocks per active flow. Deactivating a
//! flow discards its clocks; reactivating spawns fresh ones from phase zero.

use helio_animation::{AnimationScheduler, Easing, KeyframeLoop, LoopClock};
use helio_core::Xorshift32;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::flow::{active_flows, FlowKind};
use crate::layout::NodeAnchors;
use crate::particle::{Particle, ParticleFrame, ParticleParams};
use crate::path::{path_for, FlowPath};
use crate::readings::FlowReadings;
use crate::readout::NodeReadouts;

const DEFAULT_SEED: u32 = 0x5EED_F10E;

/// Animator settings (`[flow]` in `helio.toml`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Seed for particle size and pulse jitter.
    pub seed: u32,
    /// Multiplier applied to every frame delta.
    pub speed: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            speed: 1.0,
        }
    }
}

struct ActiveFlow {
    path: FlowPath,
    particles: SmallVec<[Particle; 9]>,
}

pub struct FlowAnimator {
    config: FlowConfig,
    readings: FlowReadings,
    available: bool,
    anchors: Option<NodeAnchors>,
    flows: FxHashMap<FlowKind, ActiveFlow>,
    scheduler: AnimationScheduler,
    rng: Xorshift32,
}

impl FlowAnimator {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            readings: FlowReadings::default(),
            available: false,
            anchors: None,
            flows: FxHashMap::default(),
            scheduler: AnimationScheduler::new(),
            rng: Xorshift32::new(config.seed),
        }
    }

    /// Lay the nodes out for a container `width`. A degenerate width hides everything.
    pub fn set_width(&mut self, width: f32) {
        let anchors = NodeAnchors::for_width(width);
        if anchors == self.anchors {
            return;
        }
        self.anchors = anchors;

        // Geometry changed: keep the clocks, rebuild the paths.
        if let Some(anchors) = self.anchors {
            for (kind, flow) in self.flows.iter_mut() {
                flow.path = path_for(*kind, &anchors);
            }
        }
        self.sync();
    }

    /// Apply a new readings snapshot.
    ///
    /// `available = false` means the data source has nothing to show: every
    /// flow stops and `no_data()` reports true.
    pub fn update(&mut self, readings: FlowReadings, available: bool) {
        self.readings = readings.sanitized();
        self.available = available;
        self.sync();
    }

    /// Advance all particle clocks by `dt_ms` (scaled by `FlowConfig::speed`).
    pub fn tick(&mut self, dt_ms: f32) {
        self.scheduler.tick(dt_ms * self.config.speed);
    }

    /// Flows whose activity predicate currently holds.
    pub fn active_flows(&self) -> SmallVec<[FlowKind; 5]> {
        active_flows(&self.readings, self.available)
    }

    pub fn is_active(&self, kind: FlowKind) -> bool {
        kind.is_active(&self.readings, self.available)
    }

    /// True when the host should show its "no data" indicator.
    pub fn no_data(&self) -> bool {
        !self.available
    }

    pub fn anchors(&self) -> Option<&NodeAnchors> {
        self.anchors.as_ref()
    }

    /// Path of a flow that is currently animating.
    pub fn path(&self, kind: FlowKind) -> Option<&FlowPath> {
        self.flows.get(&kind).map(|f| &f.path)
    }

    /// Paths of every animating flow, in `FlowKind::ALL` order.
    pub fn paths(&self) -> Vec<(FlowKind, &FlowPath)> {
        FlowKind::ALL
            .into_iter()
            .filter_map(|k| self.flows.get(&k).map(|f| (k, &f.path)))
            .collect()
    }

    pub fn readouts(&self) -> NodeReadouts {
        NodeReadouts::from_readings(&self.readings)
    }

    pub fn particle_count(&self) -> usize {
        self.flows.values().map(|f| f.particles.len()).sum()
    }

    /// Animation time advanced so far, after `FlowConfig::speed` scaling.
    pub fn elapsed_ms(&self) -> f64 {
        self.scheduler.elapsed_ms()
    }

    /// Draw-ready particle state for the current frame.
    pub fn frames(&self) -> Vec<ParticleFrame> {
        let mut out = Vec::with_capacity(self.particle_count());
        for kind in FlowKind::ALL {
            let Some(flow) = self.flows.get(&kind) else {
                continue;
            };
            for (index, particle) in flow.particles.iter().enumerate() {
                let phase = self.scheduler.phase(particle.motion).unwrap_or(0.0);
                let scale = self
                    .scheduler
                    .value(particle.pulse)
                    .unwrap_or(particle.params.min_scale);
                out.push(ParticleFrame {
                    flow: kind,
                    index,
                    phase,
                    position: flow.path.point_at(phase),
                    scale,
                });
            }
        }
        out
    }

    /// Reconcile the animating set with the activity predicates.
    fn sync(&mut self) {
        let wanted: SmallVec<[FlowKind; 5]> = match self.anchors {
            Some(_) => self.active_flows(),
            None => SmallVec::new(),
        };

        let stale: SmallVec<[FlowKind; 5]> = self
            .flows
            .keys()
            .copied()
            .filter(|k| !wanted.contains(k))
            .collect();
        for kind in stale {
            self.stop(kind);
        }

        if let Some(anchors) = self.anchors {
            for kind in wanted {
                if !self.flows.contains_key(&kind) {
                    self.start(kind, &anchors);
                }
            }
        }
    }

    fn start(&mut self, kind: FlowKind, anchors: &NodeAnchors) {
        let mut rng = self.rng.fork(kind as u32);
        let particles: SmallVec<[Particle; 9]> = (0..kind.particle_count())
            .map(|i| {
                let params = ParticleParams::draw(kind, i, &mut rng);
                Particle {
                    motion: self
                        .scheduler
                        .add_clock(LoopClock::new(params.motion_duration_ms)),
                    pulse: self.scheduler.add_track(KeyframeLoop::ping_pong(
                        params.min_scale,
                        params.max_scale,
                        params.pulse_half_period_ms,
                        Easing::EaseInOut,
                    )),
                    params,
                }
            })
            .collect();

        tracing::debug!(flow = %kind, particles = particles.len(), "flow started");
        self.flows.insert(
            kind,
            ActiveFlow {
                path: path_for(kind, anchors),
                particles,
            },
        );
    }

    fn stop(&mut self, kind: FlowKind) {
        let Some(flow) = self.flows.remove(&kind) else {
            return;
        };
        for p in &flow.particles {
            self.scheduler.remove_clock(p.motion);
            self.scheduler.remove_track(p.pulse);
        }
        tracing::debug!(flow = %kind, "flow stopped");
    }
}

impl Default for FlowAnimator {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}
