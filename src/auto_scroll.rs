//! Edge auto-scrolling.
//!
//! While a gesture is active, a pointer that comes close to the edge of a
//! scrollable ancestor keeps that ancestor scrolling on a fixed tick until the
//! pointer moves away, the surface hits its end, or the scroller is
//! deactivated.
//!
//! ## Timers
//!
//! Timers are logical: the host calls [`EdgeAutoScroller::advance`] from its
//! event loop with the elapsed time, and every due tick is applied in order.
//! Every pointer update throws away all running timers and re-derives them
//! from scratch, so a stale timer can never race a fresh one and the speed
//! tier always reflects the latest pointer position.

use crate::constants::{
    AUTO_SCROLL_TICK_MS, DEFAULT_FAST_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, DEFAULT_SLOW_THRESHOLD,
    FAST_SCROLL_SPEED, MEDIUM_SCROLL_SPEED, SLOW_SCROLL_SPEED,
};
use crate::geometry::{Axis, Point, clamp};
use crate::profile_scope;
use crate::surface::{ElementId, FixedScrollParents, ScrollAncestors, ScrollParents, SharedSurface};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Which pointer stream a scroller follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    /// Drag-and-drop style movement (sortable lists, drag/resize boxes).
    #[default]
    Drag,
    /// Plain pointer movement with no drag in progress.
    Mouse,
}

/// Which speed band a distance falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBand {
    Fast,
    Medium,
    Slow,
}

/// Distances from an edge, in pixels, that select the scroll speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollThresholdTier {
    pub slow: f32,
    pub medium: f32,
    pub fast: f32,
}

impl Default for ScrollThresholdTier {
    fn default() -> Self {
        Self {
            slow: DEFAULT_SLOW_THRESHOLD,
            medium: DEFAULT_MEDIUM_THRESHOLD,
            fast: DEFAULT_FAST_THRESHOLD,
        }
    }
}

impl ScrollThresholdTier {
    /// A tier whose slow band is `distance`, with the inner bands scaled in
    /// the same proportions as the default tier.
    pub fn from_distance(distance: f32) -> Self {
        Self {
            slow: distance,
            medium: distance * DEFAULT_MEDIUM_THRESHOLD / DEFAULT_SLOW_THRESHOLD,
            fast: distance * DEFAULT_FAST_THRESHOLD / DEFAULT_SLOW_THRESHOLD,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.fast < self.medium && self.medium < self.slow
    }

    /// Tightest band containing `distance`. Distances past the edge (negative)
    /// fall in the fast band.
    pub fn band(&self, distance: f32) -> Option<SpeedBand> {
        if distance <= self.fast {
            Some(SpeedBand::Fast)
        } else if distance <= self.medium {
            Some(SpeedBand::Medium)
        } else if distance <= self.slow {
            Some(SpeedBand::Slow)
        } else {
            None
        }
    }
}

/// Pixels scrolled per tick in each band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTiers {
    pub fast: f32,
    pub medium: f32,
    pub slow: f32,
}

impl Default for SpeedTiers {
    fn default() -> Self {
        Self {
            fast: FAST_SCROLL_SPEED,
            medium: MEDIUM_SCROLL_SPEED,
            slow: SLOW_SCROLL_SPEED,
        }
    }
}

impl SpeedTiers {
    pub fn of(&self, band: SpeedBand) -> f32 {
        match band {
            SpeedBand::Fast => self.fast,
            SpeedBand::Medium => self.medium,
            SpeedBand::Slow => self.slow,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.fast >= self.medium && self.medium >= self.slow && self.slow >= 0.0
    }
}

/// Scroll magnitude per tick for a pointer `distance` pixels from an edge.
/// Zero when the pointer is outside every band.
pub fn speed_for_distance(distance: f32, tier: &ScrollThresholdTier, speeds: &SpeedTiers) -> f32 {
    tier.band(distance).map_or(0.0, |band| speeds.of(band))
}

/// Threshold as written in configuration: a bare distance or a full tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    Distance(f32),
    Tier(ScrollThresholdTier),
}

impl ThresholdSpec {
    pub fn resolve(&self) -> ScrollThresholdTier {
        match *self {
            ThresholdSpec::Distance(distance) => ScrollThresholdTier::from_distance(distance),
            ThresholdSpec::Tier(tier) => tier,
        }
    }
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        ThresholdSpec::Tier(ScrollThresholdTier::default())
    }
}

/// Per-edge thresholds as written in configuration. Missing edges use the
/// default tier.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerEdgeThresholds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<ThresholdSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<ThresholdSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ThresholdSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<ThresholdSpec>,
}

/// Thresholds for all four edges, either shared or per edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeThresholdSpec {
    Uniform(ThresholdSpec),
    PerEdge(PerEdgeThresholds),
}

impl Default for EdgeThresholdSpec {
    fn default() -> Self {
        EdgeThresholdSpec::Uniform(ThresholdSpec::default())
    }
}

/// Normalized thresholds, resolved once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeThresholds {
    pub top: ScrollThresholdTier,
    pub right: ScrollThresholdTier,
    pub bottom: ScrollThresholdTier,
    pub left: ScrollThresholdTier,
}

impl EdgeThresholds {
    pub fn uniform(tier: ScrollThresholdTier) -> Self {
        Self {
            top: tier,
            right: tier,
            bottom: tier,
            left: tier,
        }
    }

    /// (leading, trailing) tiers for `axis`: left/right or top/bottom.
    pub fn for_axis(&self, axis: Axis) -> (&ScrollThresholdTier, &ScrollThresholdTier) {
        match axis {
            Axis::X => (&self.left, &self.right),
            Axis::Y => (&self.top, &self.bottom),
        }
    }

    /// Edges whose tiers break `fast < medium < slow`.
    pub fn unordered_edges(&self) -> Vec<&'static str> {
        [
            ("top", &self.top),
            ("right", &self.right),
            ("bottom", &self.bottom),
            ("left", &self.left),
        ]
        .into_iter()
        .filter(|(_, tier)| !tier.is_ordered())
        .map(|(name, _)| name)
        .collect()
    }
}

impl From<EdgeThresholdSpec> for EdgeThresholds {
    fn from(spec: EdgeThresholdSpec) -> Self {
        match spec {
            EdgeThresholdSpec::Uniform(threshold) => EdgeThresholds::uniform(threshold.resolve()),
            EdgeThresholdSpec::PerEdge(edges) => {
                let resolve = |edge: Option<ThresholdSpec>| edge.map(|t| t.resolve()).unwrap_or_default();
                EdgeThresholds {
                    top: resolve(edges.top),
                    right: resolve(edges.right),
                    bottom: resolve(edges.bottom),
                    left: resolve(edges.left),
                }
            }
        }
    }
}

impl From<ThresholdSpec> for EdgeThresholds {
    fn from(spec: ThresholdSpec) -> Self {
        EdgeThresholds::uniform(spec.resolve())
    }
}

impl From<ScrollThresholdTier> for EdgeThresholds {
    fn from(tier: ScrollThresholdTier) -> Self {
        EdgeThresholds::uniform(tier)
    }
}

impl From<f32> for EdgeThresholds {
    fn from(distance: f32) -> Self {
        EdgeThresholds::uniform(ScrollThresholdTier::from_distance(distance))
    }
}

/// Auto-scroll configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    pub active: bool,
    pub event_type: PointerSource,
    pub thresholds: EdgeThresholds,
    /// Ignore the pointer when it is outside the surface on the cross axis.
    pub within_bounds: bool,
    pub speed: SpeedTiers,
    pub tick: Duration,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            active: false,
            event_type: PointerSource::Drag,
            thresholds: EdgeThresholds::default(),
            within_bounds: false,
            speed: SpeedTiers::default(),
            tick: Duration::from_millis(AUTO_SCROLL_TICK_MS),
        }
    }
}

impl AutoScrollConfig {
    pub fn with_thresholds(mut self, thresholds: impl Into<EdgeThresholds>) -> Self {
        self.thresholds = thresholds.into();
        self
    }

    pub fn with_event_type(mut self, event_type: PointerSource) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_within_bounds(mut self, within_bounds: bool) -> Self {
        self.within_bounds = within_bounds;
        self
    }

    pub fn with_speed(mut self, speed: SpeedTiers) -> Self {
        self.speed = speed;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Callback receiving the scroll actually applied on one tick.
pub type ScrollCallback = Box<dyn FnMut(Point) + Send>;

struct ScrollTimer {
    axis: Axis,
    surface: SharedSurface,
    /// Signed pixels per tick.
    step: f32,
    elapsed: Duration,
    finished: bool,
}

impl ScrollTimer {
    /// Apply one tick. Returns the applied delta on this timer's axis.
    fn fire(&mut self) -> f32 {
        let mut surface = self.surface.lock();
        let offset = surface.scroll_offset(self.axis);
        let max = surface.max_scroll_offset(self.axis);
        let by = clamp(offset + self.step, 0.0, max) - offset;
        if by != 0.0 {
            surface.scroll_by(self.axis, by);
        }
        let now = surface.scroll_offset(self.axis);
        if now <= 0.0 || now >= max {
            self.finished = true;
        }
        by
    }
}

/// Continuously scrolls the nearest scrollable ancestors of a reference
/// element while the pointer is near one of their edges.
pub struct EdgeAutoScroller {
    config: AutoScrollConfig,
    reference: ElementId,
    ancestors: Arc<dyn ScrollAncestors>,
    parents: Option<ScrollParents>,
    timers: Vec<ScrollTimer>,
    on_scroll: Option<ScrollCallback>,
}

impl EdgeAutoScroller {
    /// A scroller whose surfaces are looked up from `reference` on first use.
    pub fn new(
        config: AutoScrollConfig,
        reference: ElementId,
        ancestors: Arc<dyn ScrollAncestors>,
    ) -> Self {
        Self {
            config,
            reference,
            ancestors,
            parents: None,
            timers: Vec::new(),
            on_scroll: None,
        }
    }

    /// A scroller over surfaces already known to the caller.
    pub fn with_surfaces(config: AutoScrollConfig, parents: ScrollParents) -> Self {
        Self::new(config, ElementId(0), Arc::new(FixedScrollParents(parents)))
    }

    pub fn on_scroll(mut self, callback: impl FnMut(Point) + Send + 'static) -> Self {
        self.on_scroll = Some(Box::new(callback));
        self
    }

    pub fn set_on_scroll(&mut self, callback: impl FnMut(Point) + Send + 'static) {
        self.on_scroll = Some(Box::new(callback));
    }

    pub fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.config.active
    }

    /// Turning the scroller off clears every timer and forgets the resolved
    /// surfaces.
    pub fn set_active(&mut self, active: bool) {
        if self.config.active == active {
            return;
        }
        self.config.active = active;
        if !active {
            self.clear_timers();
            self.parents = None;
        }
        debug!(active, reference = self.reference.0, "auto-scroll toggled");
    }

    /// Replace thresholds, speeds and flags. Running timers are dropped; the
    /// next pointer update re-derives them.
    pub fn reconfigure(&mut self, config: AutoScrollConfig) {
        let active = config.active;
        self.config = AutoScrollConfig {
            active: self.config.active,
            ..config
        };
        self.clear_timers();
        self.set_active(active);
    }

    /// Number of running scroll timers (at most one per axis).
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Re-evaluate edge proximity for a new pointer position.
    pub fn update_pointer(&mut self, source: PointerSource, position: Point) {
        profile_scope!("auto_scroll_update");

        self.clear_timers();
        if !self.config.active || source != self.config.event_type {
            return;
        }

        let parents = self.resolve_parents().clone();
        for axis in [Axis::X, Axis::Y] {
            let Some(surface) = parents.get(axis) else {
                continue;
            };
            if let Some(step) = self.evaluate(axis, surface, position) {
                debug!(?axis, step, "auto-scroll scheduled");
                self.timers.push(ScrollTimer {
                    axis,
                    surface: surface.clone(),
                    step,
                    elapsed: Duration::ZERO,
                    finished: false,
                });
            }
        }
    }

    /// Advance the clock by `elapsed`, firing every due tick.
    ///
    /// Returns the total scroll applied across all surfaces.
    pub fn advance(&mut self, elapsed: Duration) -> Point {
        if self.timers.is_empty() {
            return Point::ZERO;
        }
        profile_scope!("auto_scroll_advance");

        let tick = self.config.tick.max(Duration::from_millis(1));
        let mut applied = Point::ZERO;
        for timer in self.timers.iter_mut() {
            timer.elapsed += elapsed;
            while timer.elapsed >= tick && !timer.finished {
                timer.elapsed -= tick;
                let by = timer.fire();
                trace!(axis = ?timer.axis, by, "auto-scroll tick");
                if by != 0.0 {
                    let delta = Point::on_axis(timer.axis, by);
                    applied = applied + delta;
                    if let Some(callback) = self.on_scroll.as_mut() {
                        callback(delta);
                    }
                }
            }
        }
        self.timers.retain(|timer| !timer.finished);
        applied
    }

    pub fn clear_timers(&mut self) {
        self.timers.clear();
    }

    /// Stop everything. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.set_active(false);
        self.clear_timers();
        self.parents = None;
    }

    fn resolve_parents(&mut self) -> &ScrollParents {
        let ancestors = &self.ancestors;
        let reference = self.reference;
        self.parents
            .get_or_insert_with(|| ancestors.scroll_parents(reference))
    }

    /// Signed step for `axis`, or `None` when nothing should scroll.
    fn evaluate(&self, axis: Axis, surface: &SharedSurface, position: Point) -> Option<f32> {
        let surface = surface.lock();
        let rect = surface.rect();

        if self.config.within_bounds {
            let cross = axis.other();
            let c = position.along(cross);
            if c < rect.start(cross) || c > rect.end(cross) {
                return None;
            }
        }

        let p = position.along(axis);
        let leading_diff = p - rect.start(axis);
        let trailing_diff = rect.end(axis) - p;
        let offset = surface.scroll_offset(axis);
        let max = surface.max_scroll_offset(axis);
        let (leading, trailing) = self.config.thresholds.for_axis(axis);

        if let Some(band) = leading.band(leading_diff) {
            if offset > 0.0 {
                return Some(-self.config.speed.of(band));
            }
        }
        if let Some(band) = trailing.band(trailing_diff) {
            if offset < max {
                return Some(self.config.speed.of(band));
            }
        }
        None
    }
}

impl Drop for EdgeAutoScroller {
    fn drop(&mut self) {
        if !self.timers.is_empty() {
            debug!(timers = self.timers.len(), "auto-scroll dropped with running timers");
        }
        self.timers.clear();
    }
}
