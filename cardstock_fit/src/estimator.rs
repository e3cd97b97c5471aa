// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of fit targets with debounced, trigger-driven re-measurement.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use cardstock_timing::{CoalescingScheduler, Millis};
use hashbrown::HashMap;

use crate::content::FitContent;
use crate::options::{FitConfig, FitOptions};
use crate::target::{FitReport, FitTarget};

/// Why a target needs to be re-measured.
///
/// Each class has its own settle delay in [`FitConfig`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FitTrigger {
    /// The pairing was just mounted.
    Mounted,
    /// The container's box changed size.
    ContainerResized,
    /// The content value (for example the text) changed.
    ContentChanged,
    /// A style property that affects natural size (for example the font size)
    /// changed.
    StyleChanged,
    /// Deferred resources that affect natural size became available.
    ResourcesReady,
}

/// Subscription hook for container resize notifications.
///
/// The estimator subscribes a key when it is mounted and unsubscribes it when
/// it is unmounted. The host forwards notifications back through
/// [`FitEstimator::notify`] with [`FitTrigger::ContainerResized`].
pub trait ResizeSource<K> {
    /// Starts delivering resize notifications for `key`.
    fn observe(&mut self, key: K);
    /// Stops delivering resize notifications for `key`.
    fn unobserve(&mut self, key: K);
}

/// A resize source for hosts that report resizes some other way.
impl<K> ResizeSource<K> for () {
    fn observe(&mut self, _key: K) {}
    fn unobserve(&mut self, _key: K) {}
}

/// Lookup from keys to the host's measurable content.
pub trait FitContents<K> {
    /// The content type handed to the estimator.
    type Content: FitContent + ?Sized;

    /// Returns the content for `key`, if the host still has it.
    fn content_mut(&mut self, key: K) -> Option<&mut Self::Content>;
}

impl<K, C, S> FitContents<K> for HashMap<K, C, S>
where
    K: Eq + Hash,
    C: FitContent,
    S: BuildHasher,
{
    type Content = C;

    fn content_mut(&mut self, key: K) -> Option<&mut C> {
        self.get_mut(&key)
    }
}

impl<K, C> FitContents<K> for BTreeMap<K, C>
where
    K: Ord,
    C: FitContent,
{
    type Content = C;

    fn content_mut(&mut self, key: K) -> Option<&mut C> {
        self.get_mut(&key)
    }
}

/// Error returned when mounting a key that is already mounted.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AlreadyMounted<K>(pub K);

impl<K: fmt::Debug> fmt::Debug for AlreadyMounted<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlreadyMounted({:?})", self.0)
    }
}

impl<K: fmt::Debug> fmt::Display for AlreadyMounted<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fit target {:?} is already mounted", self.0)
    }
}

impl<K: fmt::Debug> core::error::Error for AlreadyMounted<K> {}

/// A measurement that became due in [`FitEstimator::poll`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DueMeasurement<K> {
    /// The target to measure.
    pub key: K,
    /// The most recent trigger of the burst that scheduled it.
    pub trigger: FitTrigger,
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    generation: u64,
    trigger: FitTrigger,
}

#[derive(Clone, Debug)]
struct Slot {
    target: FitTarget,
    generation: u64,
    resources_signalled: bool,
}

/// Fit targets keyed by `K`, re-measured after their triggers settle.
///
/// Triggers are debounced per key: scheduling a measurement cancels the one
/// still pending for the same key, so only the last request of a burst runs.
/// Work that becomes due for a key that was unmounted in the meantime is
/// dropped.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use cardstock_fit::{
///     ContainerSize, FitConfig, FitContent, FitEstimator, FitOptions, FitTrigger, IdentityToken,
/// };
/// use kurbo::Size;
///
/// struct Label {
///     box_width: f64,
///     text_width: f64,
///     scale: f64,
/// }
///
/// impl FitContent for Label {
///     fn container(&self) -> ContainerSize {
///         ContainerSize::width(self.box_width)
///     }
///     fn reset_to_identity(&mut self) {
///         self.scale = 1.0;
///     }
///     fn natural_size(&self, _: &IdentityToken) -> Size {
///         Size::new(self.text_width, 16.0)
///     }
///     fn apply_scale(&mut self, scale: f64) {
///         self.scale = scale;
///     }
/// }
///
/// let mut labels = BTreeMap::new();
/// labels.insert(1, Label { box_width: 300.0, text_width: 400.0, scale: 1.0 });
///
/// let mut fit = FitEstimator::new(FitConfig::default());
/// fit.mount(1, FitOptions::single_line(), 0, &mut ()).unwrap();
/// fit.run_due(0, &mut labels);
/// assert_eq!(labels[&1].scale, 0.75);
///
/// // The box grows; the measurement waits for the resize burst to settle.
/// labels.get_mut(&1).unwrap().box_width = 400.0;
/// fit.notify(1, FitTrigger::ContainerResized, 100);
/// assert!(fit.run_due(105, &mut labels).is_empty());
/// fit.run_due(110, &mut labels);
/// assert_eq!(labels[&1].scale, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct FitEstimator<K>
where
    K: Copy + Eq + Hash,
{
    config: FitConfig,
    slots: HashMap<K, Slot>,
    pending: CoalescingScheduler<K, Pending>,
    next_generation: u64,
}

impl<K> Default for FitEstimator<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new(FitConfig::default())
    }
}

impl<K> FitEstimator<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an estimator with no targets.
    #[must_use]
    pub fn new(config: FitConfig) -> Self {
        Self {
            config,
            slots: HashMap::new(),
            pending: CoalescingScheduler::new(),
            next_generation: 0,
        }
    }

    /// The estimator configuration.
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Settle delay used for `trigger`.
    #[must_use]
    pub fn settle_delay(&self, trigger: FitTrigger) -> Millis {
        match trigger {
            FitTrigger::Mounted => self.config.mount_settle_ms,
            FitTrigger::ContainerResized => self.config.resize_settle_ms,
            FitTrigger::ContentChanged => self.config.content_settle_ms,
            FitTrigger::StyleChanged => self.config.style_settle_ms,
            FitTrigger::ResourcesReady => self.config.resources_settle_ms,
        }
    }

    /// Mounts a new target at the identity scale and schedules its first
    /// measurement.
    ///
    /// `resize` is subscribed for the key.
    pub fn mount<R>(
        &mut self,
        key: K,
        options: FitOptions,
        now: Millis,
        resize: &mut R,
    ) -> Result<(), AlreadyMounted<K>>
    where
        R: ResizeSource<K> + ?Sized,
    {
        if self.slots.contains_key(&key) {
            return Err(AlreadyMounted(key));
        }
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.slots.insert(
            key,
            Slot {
                target: FitTarget::new(options),
                generation,
                resources_signalled: false,
            },
        );
        resize.observe(key);
        self.schedule(key, FitTrigger::Mounted, now);
        Ok(())
    }

    /// Unmounts a target, cancelling its pending measurement and unsubscribing
    /// it from `resize`.
    ///
    /// Returns the last committed scale. Nothing about the target is retained.
    pub fn unmount<R>(&mut self, key: K, resize: &mut R) -> Option<f64>
    where
        R: ResizeSource<K> + ?Sized,
    {
        let slot = self.slots.remove(&key)?;
        self.pending.cancel(key);
        resize.unobserve(key);
        Some(slot.target.committed_scale())
    }

    /// Returns `true` if `key` is mounted.
    #[must_use]
    pub fn is_mounted(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    /// The target mounted at `key`.
    #[must_use]
    pub fn target(&self, key: K) -> Option<&FitTarget> {
        self.slots.get(&key).map(|slot| &slot.target)
    }

    /// The committed scale for `key`.
    #[must_use]
    pub fn committed_scale(&self, key: K) -> Option<f64> {
        self.target(key).map(FitTarget::committed_scale)
    }

    /// Replaces the options of `key` and schedules a re-measurement as a
    /// style change.
    pub fn set_options(&mut self, key: K, options: FitOptions, now: Millis) -> bool {
        let Some(slot) = self.slots.get_mut(&key) else {
            return false;
        };
        slot.target.set_options(options);
        self.schedule(key, FitTrigger::StyleChanged, now);
        true
    }

    /// Reports a trigger for `key`.
    ///
    /// Returns `false` if the key is not mounted or, for
    /// [`FitTrigger::ResourcesReady`], if the signal already fired for this
    /// mount.
    pub fn notify(&mut self, key: K, trigger: FitTrigger, now: Millis) -> bool {
        let Some(slot) = self.slots.get_mut(&key) else {
            return false;
        };
        if trigger == FitTrigger::ResourcesReady {
            if slot.resources_signalled {
                return false;
            }
            slot.resources_signalled = true;
        }
        self.schedule(key, trigger, now);
        true
    }

    /// Delivers the one-shot resources-ready signal for `key`.
    ///
    /// Equivalent to [`notify`](Self::notify) with
    /// [`FitTrigger::ResourcesReady`].
    pub fn resources_ready(&mut self, key: K, now: Millis) -> bool {
        self.notify(key, FitTrigger::ResourcesReady, now)
    }

    /// Returns `true` if `key` has a measurement waiting to settle.
    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.is_pending(key)
    }

    /// Earliest time at which [`poll`](Self::poll) will yield work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.next_deadline()
    }

    /// Returns the measurements that are due at `now`, earliest first.
    ///
    /// Measurements for keys that are no longer mounted are dropped.
    pub fn poll(&mut self, now: Millis) -> Vec<DueMeasurement<K>> {
        let slots = &self.slots;
        self.pending
            .poll(now)
            .into_iter()
            .filter(|(key, pending)| {
                slots
                    .get(key)
                    .is_some_and(|slot| slot.generation == pending.generation)
            })
            .map(|(key, pending)| DueMeasurement {
                key,
                trigger: pending.trigger,
            })
            .collect()
    }

    /// Measures `key` immediately using the full measurement protocol.
    ///
    /// Returns `None` if the key is not mounted.
    pub fn measure<C>(&mut self, key: K, content: &mut C) -> Option<FitReport>
    where
        C: FitContent + ?Sized,
    {
        let zero_size = self.config.zero_size;
        let slot = self.slots.get_mut(&key)?;
        Some(slot.target.measure(content, zero_size))
    }

    /// Polls for due measurements and runs each against `contents`.
    ///
    /// Keys the host no longer has content for are skipped.
    pub fn run_due<S>(&mut self, now: Millis, contents: &mut S) -> Vec<(K, FitReport)>
    where
        S: FitContents<K> + ?Sized,
    {
        let mut reports = Vec::new();
        for due in self.poll(now) {
            if let Some(content) = contents.content_mut(due.key) {
                if let Some(report) = self.measure(due.key, content) {
                    reports.push((due.key, report));
                }
            }
        }
        reports
    }

    /// Number of mounted targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no targets are mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn schedule(&mut self, key: K, trigger: FitTrigger, now: Millis) {
        let Some(slot) = self.slots.get(&key) else {
            return;
        };
        let delay = self.settle_delay(trigger);
        self.pending.schedule(
            key,
            Pending {
                generation: slot.generation,
                trigger,
            },
            delay,
            now,
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::{FitEstimator, FitTrigger, ResizeSource};
    use crate::compute::ContainerSize;
    use crate::content::{FitContent, IdentityToken};
    use crate::options::{FitConfig, FitOptions};

    #[derive(Default)]
    struct Observed(Vec<(bool, u32)>);

    impl ResizeSource<u32> for Observed {
        fn observe(&mut self, key: u32) {
            self.0.push((true, key));
        }

        fn unobserve(&mut self, key: u32) {
            self.0.push((false, key));
        }
    }

    struct Text {
        available: f64,
        natural: f64,
        applied: f64,
        measured: usize,
    }

    impl Text {
        fn new(available: f64, natural: f64) -> Self {
            Self {
                available,
                natural,
                applied: 1.0,
                measured: 0,
            }
        }
    }

    impl FitContent for Text {
        fn container(&self) -> ContainerSize {
            ContainerSize::width(self.available)
        }

        fn reset_to_identity(&mut self) {
            self.applied = 1.0;
            self.measured += 1;
        }

        fn natural_size(&self, _token: &IdentityToken) -> Size {
            Size::new(self.natural, 20.0)
        }

        fn apply_scale(&mut self, scale: f64) {
            self.applied = scale;
        }
    }

    #[test]
    fn mount_subscribes_and_unmount_unsubscribes() {
        let mut fit = FitEstimator::default();
        let mut resize = Observed::default();

        fit.mount(1_u32, FitOptions::single_line(), 0, &mut resize)
            .unwrap();
        assert!(fit.mount(1, FitOptions::single_line(), 0, &mut resize).is_err());
        assert_eq!(fit.unmount(1, &mut resize), Some(1.0));
        assert_eq!(fit.unmount(1, &mut resize), None);

        assert_eq!(resize.0, vec![(true, 1), (false, 1)]);
    }

    #[test]
    fn mount_measures_on_next_poll() {
        let mut fit = FitEstimator::default();
        fit.mount(1_u32, FitOptions::single_line(), 0, &mut ())
            .unwrap();
        let due = fit.poll(0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].trigger, FitTrigger::Mounted);
    }

    #[test]
    fn triggers_use_their_own_settle_delay() {
        let mut fit = FitEstimator::default();
        fit.mount(1_u32, FitOptions::single_line(), 0, &mut ())
            .unwrap();
        fit.poll(0);

        fit.notify(1, FitTrigger::ContainerResized, 100);
        assert_eq!(fit.next_deadline(), Some(110));

        fit.resources_ready(1, 100);
        assert_eq!(fit.next_deadline(), Some(150));
        assert!(fit.poll(149).is_empty());
        let due = fit.poll(150);
        assert_eq!(due[0].trigger, FitTrigger::ResourcesReady);
    }

    #[test]
    fn resources_ready_fires_once_per_mount() {
        let mut fit = FitEstimator::default();
        fit.mount(1_u32, FitOptions::single_line(), 0, &mut ())
            .unwrap();
        assert!(fit.resources_ready(1, 0));
        assert!(!fit.resources_ready(1, 10));
        assert!(!fit.notify(1, FitTrigger::ResourcesReady, 20));

        fit.unmount(1, &mut ());
        fit.mount(1, FitOptions::single_line(), 30, &mut ())
            .unwrap();
        assert!(fit.resources_ready(1, 30));
    }

    #[test]
    fn unmounted_keys_ignore_triggers() {
        let mut fit = FitEstimator::<u32>::default();
        assert!(!fit.notify(9, FitTrigger::ContentChanged, 0));
        assert!(!fit.resources_ready(9, 0));
        assert!(fit.poll(1_000).is_empty());
    }

    #[test]
    fn teardown_drops_in_flight_measurement() {
        let mut fit = FitEstimator::default();
        fit.mount(1_u32, FitOptions::single_line(), 0, &mut ())
            .unwrap();
        fit.notify(1, FitTrigger::ContentChanged, 0);
        fit.unmount(1, &mut ());
        assert!(fit.poll(100).is_empty());
    }

    #[test]
    fn remount_starts_from_identity() {
        let mut fit = FitEstimator::default();
        let mut text = Text::new(200.0, 400.0);
        fit.mount(1_u32, FitOptions::bounded(), 0, &mut ())
            .unwrap();
        fit.measure(1, &mut text);
        assert_eq!(fit.committed_scale(1), Some(0.5));

        fit.unmount(1, &mut ());
        fit.mount(1, FitOptions::bounded(), 10, &mut ()).unwrap();
        assert_eq!(fit.committed_scale(1), Some(1.0));
    }

    #[test]
    fn run_due_applies_scale_to_content() {
        let mut fit = FitEstimator::new(FitConfig::default());
        let mut contents = hashbrown::HashMap::new();
        contents.insert(1_u32, Text::new(300.0, 400.0));
        contents.insert(2_u32, Text::new(300.0, 280.0));

        fit.mount(1, FitOptions::single_line(), 0, &mut ()).unwrap();
        fit.mount(2, FitOptions::single_line(), 0, &mut ()).unwrap();
        let reports = fit.run_due(0, &mut contents);
        assert_eq!(reports.len(), 2);
        assert_eq!(contents[&1].applied, 0.75);
        assert_eq!(contents[&2].applied, 1.0);
    }

    #[test]
    fn burst_of_triggers_measures_once() {
        let mut fit = FitEstimator::default();
        let mut contents = hashbrown::HashMap::new();
        contents.insert(1_u32, Text::new(300.0, 400.0));
        fit.mount(1, FitOptions::single_line(), 0, &mut ()).unwrap();
        fit.run_due(0, &mut contents);

        for now in 1..=20 {
            fit.notify(1, FitTrigger::ContainerResized, now);
            fit.run_due(now, &mut contents);
        }
        fit.notify(1, FitTrigger::ContentChanged, 21);
        fit.notify(1, FitTrigger::StyleChanged, 22);
        fit.run_due(100, &mut contents);

        // One measurement for the mount and one for the whole burst.
        assert_eq!(contents[&1].measured, 2);
    }

    #[test]
    fn set_options_reschedules() {
        let mut fit = FitEstimator::default();
        let mut contents = hashbrown::HashMap::new();
        contents.insert(1_u32, Text::new(100.0, 400.0));
        fit.mount(1, FitOptions::single_line(), 0, &mut ()).unwrap();
        fit.run_due(0, &mut contents);
        assert_eq!(contents[&1].applied, 0.55);

        assert!(fit.set_options(1, FitOptions::single_line().without_floor(), 5));
        fit.run_due(15, &mut contents);
        assert_eq!(contents[&1].applied, 0.25);
    }
}
