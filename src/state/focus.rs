//! Focus System - Keyboard focus, mouse capture and top control
//!
//! [`FocusManager`] is the single arbiter of three exclusive routing channels:
//! - **Mouse capture**: preempts hit testing, all mouse events go to one view
//! - **Keyboard focus**: the one view receiving keystrokes
//! - **Top control**: the current modal/topmost view
//!
//! On top of the channels it keeps:
//! - Focus lock (focus may not leave the locked view's subtree)
//! - Default keyboard focus (where released focus falls back to)
//! - Per-group focus history for restoring focus into a panel
//! - Focus flash timing and app activation state
//!
//! The manager holds only [`ViewId`] handles. Ancestry questions are answered
//! by a [`ViewHierarchy`] passed into the operations that need one.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::{FocusManager, FocusOptions};
//!
//! let mut focus = FocusManager::default();
//! focus.set_keyboard_focus(&tree, Some(field), FocusOptions::default());
//! focus.set_mouse_capture(Some(slider));
//!
//! // Modal dialog: keep focus inside it until closed
//! focus.set_keyboard_focus(&tree, Some(dialog), FocusOptions::locked());
//! ```

use std::collections::HashMap;
use std::time::Duration;

use spark_signals::Signal;
use tracing::{debug, trace};

use super::channel::{Channel, Transition};
use super::flash::{Clock, FocusFlash, SystemClock};
use super::observer::{FocusObserver, ObserverId, ObserverRegistry};
use crate::config::FocusConfig;
use crate::engine::ViewHierarchy;
use crate::types::{Rgba, ViewId};

// =============================================================================
// OPTIONS / OUTCOMES
// =============================================================================

/// Extra behaviour for [`FocusManager::set_keyboard_focus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOptions {
    /// Lock focus to the new target once applied.
    pub lock: bool,
    /// The target wants raw keystrokes only, no text input.
    pub keystrokes_only: bool,
}

impl FocusOptions {
    pub fn locked() -> Self {
        Self {
            lock: true,
            ..Self::default()
        }
    }

    pub fn keystrokes_only() -> Self {
        Self {
            keystrokes_only: true,
            ..Self::default()
        }
    }
}

/// Outcome of a keyboard focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// Focus moved.
    Applied,
    /// Target already had focus.
    Unchanged,
    /// Focus is locked and the target lies outside the locked view.
    RejectedByLock,
}

// =============================================================================
// FOCUS MANAGER
// =============================================================================

pub struct FocusManager {
    mouse: Channel,
    keyboard: Channel,
    top: Channel,

    last_keyboard_focus: Option<ViewId>,
    default_keyboard_focus: Option<ViewId>,
    locked_view: Option<ViewId>,
    keystrokes_only: bool,

    /// Focus root -> last focused view inside it.
    history: HashMap<ViewId, ViewId>,
    observers: ObserverRegistry,

    app_has_focus: bool,
    focus_color: Rgba,
    flash: FocusFlash,
    clock: Box<dyn Clock>,
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new(FocusConfig::default())
    }
}

impl FocusManager {
    pub fn new(config: FocusConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: FocusConfig, clock: impl Clock + 'static) -> Self {
        let flash = FocusFlash::new(&config, clock.now());
        Self {
            mouse: Channel::new("mouse_capture"),
            keyboard: Channel::new("keyboard_focus"),
            top: Channel::new("top_ctrl"),
            last_keyboard_focus: None,
            default_keyboard_focus: None,
            locked_view: None,
            keystrokes_only: false,
            history: HashMap::new(),
            observers: ObserverRegistry::new(),
            app_has_focus: true,
            focus_color: config.focus_color,
            flash,
            clock: Box::new(clock),
        }
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Register lifecycle hooks for `view`.
    pub fn observe(&mut self, view: ViewId, observer: impl FocusObserver + 'static) -> ObserverId {
        self.observers.observe(view, observer)
    }

    pub fn unobserve(&mut self, view: ViewId, id: ObserverId) -> bool {
        self.observers.unobserve(view, id)
    }

    // =========================================================================
    // MOUSE CAPTURE
    // =========================================================================

    /// Route all mouse events to `captor`; `None` releases capture.
    ///
    /// The previous captor, if any, is told it lost capture.
    pub fn set_mouse_capture(&mut self, captor: Option<ViewId>) {
        if let Transition::Changed { previous, current } = self.mouse.assign(captor) {
            debug!(channel = self.mouse.name(), ?previous, ?current, "channel reassigned");
            if let Some(previous) = previous {
                self.observers
                    .notify(previous, |o, v| o.on_mouse_capture_lost(v));
            }
        }
    }

    pub fn mouse_capture(&self) -> Option<ViewId> {
        self.mouse.holder()
    }

    /// Clear capture held by `captor` without notifying it.
    pub fn remove_mouse_capture_without_callback(&mut self, captor: ViewId) {
        if self.mouse.remove(captor) {
            debug!(channel = self.mouse.name(), view = %captor, "holder removed");
        }
    }

    /// True when `parent` or one of its descendants holds mouse capture.
    pub fn child_has_mouse_capture(&self, tree: &dyn ViewHierarchy, parent: ViewId) -> bool {
        self.mouse.is_held_within(tree, parent)
    }

    pub fn mouse_capture_signal(&self) -> Signal<Option<ViewId>> {
        self.mouse.signal()
    }

    // =========================================================================
    // KEYBOARD FOCUS
    // =========================================================================

    /// Move keyboard focus to `target`; `None` releases focus.
    ///
    /// A stale target counts as a release. While focus is locked, any target
    /// outside the locked view (including a release) is refused and focus is
    /// left untouched. A lock whose view is no longer alive is dropped first.
    pub fn set_keyboard_focus(
        &mut self,
        tree: &dyn ViewHierarchy,
        target: Option<ViewId>,
        options: FocusOptions,
    ) -> FocusChange {
        self.apply_keyboard_focus(tree, target, options, true)
    }

    fn apply_keyboard_focus(
        &mut self,
        tree: &dyn ViewHierarchy,
        target: Option<ViewId>,
        options: FocusOptions,
        allow_default: bool,
    ) -> FocusChange {
        let target = target.filter(|&view| tree.is_alive(view));

        // A lock on a view that was destroyed behind our back confines nothing
        if let Some(locked) = self.locked_view.filter(|&view| !tree.is_alive(view)) {
            debug!(locked = %locked, "dropping lock on stale view");
            self.locked_view = None;
        }

        if let Some(locked) = self.locked_view {
            let inside = target.is_some_and(|view| tree.is_within(view, locked));
            if !inside {
                trace!(locked = %locked, ?target, "focus change refused by lock");
                return FocusChange::RejectedByLock;
            }
        }

        self.keystrokes_only = options.keystrokes_only;

        let mut outcome = FocusChange::Unchanged;
        if let Transition::Changed { previous, current } = self.keyboard.assign(target) {
            outcome = FocusChange::Applied;
            self.last_keyboard_focus = previous;
            debug!(channel = self.keyboard.name(), ?previous, ?current, "channel reassigned");

            // Loss before gain
            if let Some(previous) = previous {
                self.observers.notify(previous, |o, v| {
                    o.on_focus_lost(v);
                    o.on_focus_changed(v);
                });
            }
            if let Some(current) = current {
                self.observers.notify(current, |o, v| {
                    o.on_focus_received(v);
                    o.on_focus_changed(v);
                });
            }
            self.flash.reset(self.clock.now());

            match current {
                Some(current) => {
                    if let Some(root) = tree.focus_root_of(current) {
                        self.history.insert(root, current);
                    }
                }
                None => {
                    let fallback = self
                        .default_keyboard_focus
                        .filter(|_| allow_default)
                        .filter(|&view| tree.is_alive(view));
                    if let Some(fallback) = fallback {
                        self.apply_keyboard_focus(tree, Some(fallback), FocusOptions::default(), false);
                    }
                }
            }
        }

        if options.lock {
            self.lock_focus();
        }
        outcome
    }

    pub fn keyboard_focus(&self) -> Option<ViewId> {
        self.keyboard.holder()
    }

    /// View that held focus before the current one.
    pub fn last_keyboard_focus(&self) -> Option<ViewId> {
        self.last_keyboard_focus
    }

    pub fn has_keyboard_focus(&self, view: ViewId) -> bool {
        self.keyboard.holder() == Some(view)
    }

    /// Clear focus held by `view` without notifying it. Unlocks if `view` is
    /// the locked view.
    pub fn remove_keyboard_focus_without_callback(&mut self, view: ViewId) {
        if self.locked_view == Some(view) {
            self.locked_view = None;
        }
        if self.keyboard.remove(view) {
            debug!(channel = self.keyboard.name(), view = %view, "holder removed");
        }
    }

    /// True when `parent` or one of its descendants has keyboard focus.
    pub fn child_has_keyboard_focus(&self, tree: &dyn ViewHierarchy, parent: ViewId) -> bool {
        self.keyboard.is_held_within(tree, parent)
    }

    pub fn keystrokes_only(&self) -> bool {
        self.keystrokes_only
    }

    pub fn set_keystrokes_only(&mut self, keystrokes_only: bool) {
        self.keystrokes_only = keystrokes_only;
    }

    /// Where focus goes when it is released.
    pub fn set_default_keyboard_focus(&mut self, view: Option<ViewId>) {
        self.default_keyboard_focus = view;
    }

    pub fn default_keyboard_focus(&self) -> Option<ViewId> {
        self.default_keyboard_focus
    }

    pub fn keyboard_focus_signal(&self) -> Signal<Option<ViewId>> {
        self.keyboard.signal()
    }

    // =========================================================================
    // FOCUS LOCK
    // =========================================================================

    /// Lock focus to the current focus holder. Does nothing without focus.
    pub fn lock_focus(&mut self) {
        self.locked_view = self.keyboard.holder();
        if let Some(locked) = self.locked_view {
            debug!(locked = %locked, "focus locked");
        }
    }

    pub fn unlock_focus(&mut self) {
        if self.locked_view.take().is_some() {
            debug!("focus unlocked");
        }
    }

    pub fn focus_locked(&self) -> bool {
        self.locked_view.is_some()
    }

    pub fn locked_view(&self) -> Option<ViewId> {
        self.locked_view
    }

    // =========================================================================
    // FOCUS HISTORY
    // =========================================================================

    /// Last view focused inside the group rooted at `root`.
    pub fn last_focus_for_group(&self, root: ViewId) -> Option<ViewId> {
        self.history.get(&root).copied()
    }

    pub fn clear_last_focus_for_group(&mut self, root: ViewId) {
        self.history.remove(&root);
    }

    /// Re-focus the remembered view of a group, e.g. when a panel reopens.
    pub fn restore_group_focus(&mut self, tree: &dyn ViewHierarchy, root: ViewId) -> FocusChange {
        match self.last_focus_for_group(root) {
            Some(view) if tree.is_alive(view) => {
                self.set_keyboard_focus(tree, Some(view), FocusOptions::default())
            }
            _ => FocusChange::Unchanged,
        }
    }

    // =========================================================================
    // TOP CONTROL
    // =========================================================================

    /// Make `view` the modal/topmost control; `None` releases it.
    ///
    /// The previous top control is told it lost the top. Releasing focus or
    /// capture held inside it is up to the caller
    /// ([`release_focus_if_needed`](Self::release_focus_if_needed)).
    pub fn set_top_ctrl(&mut self, view: Option<ViewId>) {
        if let Transition::Changed { previous, current } = self.top.assign(view) {
            debug!(channel = self.top.name(), ?previous, ?current, "channel reassigned");
            if let Some(previous) = previous {
                self.observers.notify(previous, |o, v| o.on_top_lost(v));
            }
        }
    }

    pub fn top_ctrl(&self) -> Option<ViewId> {
        self.top.holder()
    }

    pub fn remove_top_ctrl_without_callback(&mut self, view: ViewId) {
        if self.top.remove(view) {
            debug!(channel = self.top.name(), view = %view, "holder removed");
        }
    }

    /// True when `parent` or one of its descendants is the top control.
    pub fn child_is_top_ctrl(&self, tree: &dyn ViewHierarchy, parent: ViewId) -> bool {
        self.top.is_held_within(tree, parent)
    }

    pub fn top_ctrl_signal(&self) -> Signal<Option<ViewId>> {
        self.top.signal()
    }

    // =========================================================================
    // ALL THREE
    // =========================================================================

    /// Release every channel pointing into `view`'s subtree, with callbacks.
    ///
    /// Called when `view` is about to leave the tree. Keyboard focus inside
    /// `view` moves back to the locked view when the lock lies outside
    /// `view`; otherwise the lock is dropped and focus released.
    pub fn release_focus_if_needed(&mut self, tree: &dyn ViewHierarchy, view: ViewId) {
        if self.child_has_mouse_capture(tree, view) {
            self.set_mouse_capture(None);
        }

        if self.child_has_keyboard_focus(tree, view) {
            match self.locked_view {
                Some(locked) if tree.is_alive(locked) && !tree.is_within(locked, view) => {
                    self.set_keyboard_focus(tree, Some(locked), FocusOptions::default());
                }
                _ => {
                    self.unlock_focus();
                    let fallback_outside = self
                        .default_keyboard_focus
                        .is_none_or(|default| !tree.is_within(default, view));
                    self.apply_keyboard_focus(tree, None, FocusOptions::default(), fallback_outside);
                }
            }
        }

        if self.child_is_top_ctrl(tree, view) {
            self.set_top_ctrl(None);
        }
    }

    /// Drop every reference to `view` without callbacks.
    ///
    /// Must be called before a view is destroyed: clears all three channels,
    /// the lock, the default focus, focus history and observers for `view`.
    pub fn forget(&mut self, view: ViewId) {
        trace!(view = %view, observers = self.observers.count(view), "forgetting view");
        self.remove_mouse_capture_without_callback(view);
        self.remove_keyboard_focus_without_callback(view);
        self.remove_top_ctrl_without_callback(view);
        if self.default_keyboard_focus == Some(view) {
            self.default_keyboard_focus = None;
        }
        if self.last_keyboard_focus == Some(view) {
            self.last_keyboard_focus = None;
        }
        self.history
            .retain(|&root, &mut last| root != view && last != view);
        self.observers.forget(view);
    }

    /// Back to the initial state. No callbacks fire.
    pub fn reset(&mut self) {
        self.mouse.assign(None);
        self.keyboard.assign(None);
        self.top.assign(None);
        self.last_keyboard_focus = None;
        self.default_keyboard_focus = None;
        self.locked_view = None;
        self.keystrokes_only = false;
        self.history.clear();
        self.observers.clear();
        self.app_has_focus = true;
        self.flash.reset(self.clock.now());
    }

    // =========================================================================
    // FOCUS FLASH / APP FOCUS
    // =========================================================================

    /// Time since keyboard focus last changed (or the flash was triggered).
    pub fn focus_time(&self) -> Duration {
        self.flash.elapsed(self.clock.now())
    }

    pub fn focus_flash_amount(&self) -> f32 {
        self.flash.amount(self.clock.now())
    }

    pub fn focus_flash_width(&self) -> u32 {
        self.flash.width(self.clock.now())
    }

    pub fn set_focus_color(&mut self, color: Rgba) {
        self.focus_color = color;
    }

    /// Focus highlight colour including flash and background dimming.
    pub fn focus_color(&self) -> Rgba {
        self.flash
            .color(self.focus_color, self.clock.now(), self.app_has_focus)
    }

    pub fn trigger_focus_flash(&mut self) {
        self.flash.trigger(self.clock.now());
    }

    pub fn app_has_focus(&self) -> bool {
        self.app_has_focus
    }

    /// Record OS-level window activation.
    ///
    /// Regaining activation flashes the focus; losing it releases the top
    /// control.
    pub fn set_app_has_focus(&mut self, focus: bool) {
        if !self.app_has_focus && focus {
            self.trigger_focus_flash();
        }
        if !focus && self.top.holder().is_some() {
            self.set_top_ctrl(None);
        }
        self.app_has_focus = focus;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewTree;
    use crate::state::flash::ManualClock;
    use crate::state::observer::FocusCallbacks;
    use crate::types::ViewFlags;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// floater (focus root)
    ///   ├── panel
    ///   │     ├── a
    ///   │     └── b
    ///   └── c
    /// loose
    struct Fixture {
        tree: ViewTree,
        focus: FocusManager,
        clock: ManualClock,
        floater: ViewId,
        panel: ViewId,
        a: ViewId,
        b: ViewId,
        c: ViewId,
        loose: ViewId,
    }

    fn setup() -> Fixture {
        let mut tree = ViewTree::new();
        let floater = tree
            .create(Some("floater"), None, ViewFlags::FOCUS_ROOT)
            .unwrap();
        let panel = tree.create(Some("panel"), Some(floater), ViewFlags::FOCUSABLE).unwrap();
        let a = tree.create(Some("a"), Some(panel), ViewFlags::FOCUSABLE).unwrap();
        let b = tree.create(Some("b"), Some(panel), ViewFlags::FOCUSABLE).unwrap();
        let c = tree.create(Some("c"), Some(floater), ViewFlags::FOCUSABLE).unwrap();
        let loose = tree.create(Some("loose"), None, ViewFlags::FOCUSABLE).unwrap();
        let clock = ManualClock::new();
        let focus = FocusManager::with_clock(FocusConfig::default(), clock.clone());
        Fixture {
            tree,
            focus,
            clock,
            floater,
            panel,
            a,
            b,
            c,
            loose,
        }
    }

    fn record(focus: &mut FocusManager, view: ViewId, name: &'static str, log: &Log) {
        let hook = |tag: &'static str| -> Option<crate::state::observer::ViewCallback> {
            let log = log.clone();
            Some(Box::new(move |_| log.borrow_mut().push(format!("{tag}:{name}"))))
        };
        focus.observe(
            view,
            FocusCallbacks {
                on_focus_lost: hook("lost"),
                on_focus_received: hook("received"),
                on_focus_changed: hook("changed"),
                on_mouse_capture_lost: hook("capture_lost"),
                on_top_lost: hook("top_lost"),
            },
        );
    }

    #[test]
    fn test_initial_state() {
        let fx = setup();
        assert_eq!(fx.focus.keyboard_focus(), None);
        assert_eq!(fx.focus.mouse_capture(), None);
        assert_eq!(fx.focus.top_ctrl(), None);
        assert!(!fx.focus.focus_locked());
        assert!(fx.focus.app_has_focus());
        assert!(!fx.focus.keystrokes_only());
    }

    #[test]
    fn test_keyboard_focus_callbacks_loss_then_gain() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.a, "a", &log);
        record(&mut fx.focus, fx.b, "b", &log);

        let none = FocusOptions::default();
        assert_eq!(fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), none), FocusChange::Applied);
        assert_eq!(fx.focus.set_keyboard_focus(&fx.tree, Some(fx.b), none), FocusChange::Applied);

        assert_eq!(
            *log.borrow(),
            vec!["received:a", "changed:a", "lost:a", "changed:a", "received:b", "changed:b"]
        );
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.b));
        assert_eq!(fx.focus.last_keyboard_focus(), Some(fx.a));
        assert!(fx.focus.has_keyboard_focus(fx.b));
    }

    #[test]
    fn test_refocus_same_view_is_noop() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.a, "a", &log);

        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        log.borrow_mut().clear();

        let change = fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        assert_eq!(change, FocusChange::Unchanged);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_keystrokes_only_tracks_each_request() {
        let mut fx = setup();
        fx.focus
            .set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::keystrokes_only());
        assert!(fx.focus.keystrokes_only());
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        assert!(!fx.focus.keystrokes_only());
        fx.focus.set_keystrokes_only(true);
        assert!(fx.focus.keystrokes_only());
    }

    #[test]
    fn test_stale_target_is_release() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        let gone = fx.loose;
        fx.tree.release(gone);

        let change = fx.focus.set_keyboard_focus(&fx.tree, Some(gone), FocusOptions::default());
        assert_eq!(change, FocusChange::Applied);
        assert_eq!(fx.focus.keyboard_focus(), None);
    }

    #[test]
    fn test_lock_refuses_outside_targets() {
        let mut fx = setup();
        fx.focus
            .set_keyboard_focus(&fx.tree, Some(fx.panel), FocusOptions::locked());
        assert!(fx.focus.focus_locked());
        assert_eq!(fx.focus.locked_view(), Some(fx.panel));

        let outside = fx.focus.set_keyboard_focus(&fx.tree, Some(fx.c), FocusOptions::default());
        assert_eq!(outside, FocusChange::RejectedByLock);
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.panel));

        let release = fx.focus.set_keyboard_focus(&fx.tree, None, FocusOptions::default());
        assert_eq!(release, FocusChange::RejectedByLock);

        let inside = fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        assert_eq!(inside, FocusChange::Applied);
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.a));

        fx.focus.unlock_focus();
        assert_eq!(
            fx.focus.set_keyboard_focus(&fx.tree, Some(fx.c), FocusOptions::default()),
            FocusChange::Applied
        );
    }

    #[test]
    fn test_lock_without_focus_does_nothing() {
        let mut fx = setup();
        fx.focus.lock_focus();
        assert!(!fx.focus.focus_locked());
    }

    #[test]
    fn test_lock_on_released_view_is_dropped() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.panel), FocusOptions::locked());
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());

        // Released straight from the tree, without going through forget
        fx.tree.release(fx.panel);

        assert_eq!(
            fx.focus.set_keyboard_focus(&fx.tree, Some(fx.loose), FocusOptions::default()),
            FocusChange::Applied
        );
        assert!(!fx.focus.focus_locked());
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.loose));
        assert_eq!(
            fx.focus.set_keyboard_focus(&fx.tree, None, FocusOptions::default()),
            FocusChange::Applied
        );
    }

    #[test]
    fn test_invalid_fade_does_not_panic() {
        for secs in [-1.0, 1e30, f32::NAN] {
            let config = FocusConfig {
                flash_fade_secs: secs,
                ..FocusConfig::default()
            };
            let clock = ManualClock::new();
            let mut focus = FocusManager::with_clock(config, clock.clone());
            focus.trigger_focus_flash();
            assert_eq!(focus.focus_flash_width(), 3);

            clock.advance(Duration::from_secs(1));
            assert_eq!(focus.focus_flash_amount(), 0.0);
        }
        let _ = FocusManager::new(FocusConfig {
            flash_fade_secs: -1.0,
            ..FocusConfig::default()
        });
    }

    #[test]
    fn test_default_focus_fallback() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.loose, "loose", &log);
        fx.focus.set_default_keyboard_focus(Some(fx.loose));

        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        fx.focus.set_keyboard_focus(&fx.tree, None, FocusOptions::default());

        assert_eq!(fx.focus.keyboard_focus(), Some(fx.loose));
        assert_eq!(*log.borrow(), vec!["received:loose", "changed:loose"]);
    }

    #[test]
    fn test_focus_history_per_group() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.loose), FocusOptions::default());

        assert_eq!(fx.focus.last_focus_for_group(fx.floater), Some(fx.a));
        assert_eq!(fx.focus.last_focus_for_group(fx.panel), None);

        assert_eq!(
            fx.focus.restore_group_focus(&fx.tree, fx.floater),
            FocusChange::Applied
        );
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.a));

        fx.focus.clear_last_focus_for_group(fx.floater);
        assert_eq!(fx.focus.last_focus_for_group(fx.floater), None);
        assert_eq!(
            fx.focus.restore_group_focus(&fx.tree, fx.floater),
            FocusChange::Unchanged
        );
    }

    #[test]
    fn test_remove_keyboard_focus_without_callback() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.a, "a", &log);
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::locked());
        log.borrow_mut().clear();

        fx.focus.remove_keyboard_focus_without_callback(fx.b);
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.a));

        fx.focus.remove_keyboard_focus_without_callback(fx.a);
        assert_eq!(fx.focus.keyboard_focus(), None);
        assert!(!fx.focus.focus_locked());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_mouse_capture_handoff() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.a, "a", &log);
        record(&mut fx.focus, fx.b, "b", &log);

        fx.focus.set_mouse_capture(Some(fx.a));
        fx.focus.set_mouse_capture(Some(fx.a));
        fx.focus.set_mouse_capture(Some(fx.b));

        assert_eq!(*log.borrow(), vec!["capture_lost:a"]);
        assert_eq!(fx.focus.mouse_capture(), Some(fx.b));
        assert_eq!(fx.focus.mouse_capture_signal().get(), Some(fx.b));
        assert!(fx.focus.child_has_mouse_capture(&fx.tree, fx.panel));
        assert!(!fx.focus.child_has_mouse_capture(&fx.tree, fx.c));

        fx.focus.remove_mouse_capture_without_callback(fx.b);
        assert_eq!(fx.focus.mouse_capture(), None);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_top_ctrl() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.panel, "panel", &log);

        fx.focus.set_top_ctrl(Some(fx.panel));
        assert!(fx.focus.child_is_top_ctrl(&fx.tree, fx.floater));
        assert!(!fx.focus.child_is_top_ctrl(&fx.tree, fx.a));

        fx.focus.set_top_ctrl(Some(fx.c));
        assert_eq!(*log.borrow(), vec!["top_lost:panel"]);

        fx.focus.remove_top_ctrl_without_callback(fx.c);
        assert_eq!(fx.focus.top_ctrl(), None);
    }

    #[test]
    fn test_release_focus_if_needed_clears_only_inside() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        fx.focus.set_mouse_capture(Some(fx.b));
        fx.focus.set_top_ctrl(Some(fx.c));

        fx.focus.release_focus_if_needed(&fx.tree, fx.panel);

        assert_eq!(fx.focus.keyboard_focus(), None);
        assert_eq!(fx.focus.mouse_capture(), None);
        assert_eq!(fx.focus.top_ctrl(), Some(fx.c));
    }

    #[test]
    fn test_release_focus_if_needed_returns_to_lock() {
        let mut fx = setup();
        fx.focus
            .set_keyboard_focus(&fx.tree, Some(fx.floater), FocusOptions::locked());
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());

        fx.focus.release_focus_if_needed(&fx.tree, fx.panel);
        assert_eq!(fx.focus.keyboard_focus(), Some(fx.floater));
        assert!(fx.focus.focus_locked());
    }

    #[test]
    fn test_release_focus_if_needed_drops_lock_inside() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::locked());

        fx.focus.release_focus_if_needed(&fx.tree, fx.panel);
        assert_eq!(fx.focus.keyboard_focus(), None);
        assert!(!fx.focus.focus_locked());
    }

    #[test]
    fn test_release_skips_default_inside_removed_view() {
        let mut fx = setup();
        fx.focus.set_default_keyboard_focus(Some(fx.b));
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());

        fx.focus.release_focus_if_needed(&fx.tree, fx.panel);
        assert_eq!(fx.focus.keyboard_focus(), None);
    }

    #[test]
    fn test_forget_clears_everything() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.a, "a", &log);
        fx.focus.set_default_keyboard_focus(Some(fx.a));
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::locked());
        fx.focus.set_mouse_capture(Some(fx.a));
        fx.focus.set_top_ctrl(Some(fx.a));
        log.borrow_mut().clear();

        fx.focus.forget(fx.a);

        assert_eq!(fx.focus.keyboard_focus(), None);
        assert_eq!(fx.focus.mouse_capture(), None);
        assert_eq!(fx.focus.top_ctrl(), None);
        assert_eq!(fx.focus.default_keyboard_focus(), None);
        assert_eq!(fx.focus.last_focus_for_group(fx.floater), None);
        assert!(!fx.focus.focus_locked());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_focus_flash_timing() {
        let mut fx = setup();
        fx.focus.trigger_focus_flash();
        assert_eq!(fx.focus.focus_flash_amount(), 1.0);
        assert_eq!(fx.focus.focus_flash_width(), 3);
        assert_eq!(fx.focus.focus_color(), Rgba::WHITE);

        fx.clock.advance(Duration::from_millis(400));
        assert_eq!(fx.focus.focus_flash_amount(), 0.0);
        assert_eq!(fx.focus.focus_time(), Duration::from_millis(400));
        assert_eq!(fx.focus.focus_color(), Rgba::FOCUS_DEFAULT);

        // Focus change clears a running flash
        fx.focus.trigger_focus_flash();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::default());
        assert_eq!(fx.focus.focus_flash_amount(), 0.0);
    }

    #[test]
    fn test_app_focus() {
        let mut fx = setup();
        let log = Log::default();
        record(&mut fx.focus, fx.c, "c", &log);
        fx.focus.set_top_ctrl(Some(fx.c));
        fx.focus.set_focus_color(Rgba::rgb(10, 10, 10));

        fx.focus.set_app_has_focus(false);
        assert!(!fx.focus.app_has_focus());
        assert_eq!(fx.focus.top_ctrl(), None);
        assert_eq!(*log.borrow(), vec!["top_lost:c"]);
        assert_eq!(fx.focus.focus_color(), Rgba::new(10, 10, 10, 102));

        fx.focus.set_app_has_focus(true);
        assert_eq!(fx.focus.focus_flash_amount(), 1.0);
    }

    #[test]
    fn test_signals_follow_channels() {
        let mut fx = setup();
        let focused = fx.focus.keyboard_focus_signal();
        let top = fx.focus.top_ctrl_signal();

        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.b), FocusOptions::default());
        fx.focus.set_top_ctrl(Some(fx.floater));
        assert_eq!(focused.get(), Some(fx.b));
        assert_eq!(top.get(), Some(fx.floater));
    }

    #[test]
    fn test_reset() {
        let mut fx = setup();
        fx.focus.set_keyboard_focus(&fx.tree, Some(fx.a), FocusOptions::locked());
        fx.focus.set_mouse_capture(Some(fx.b));
        fx.focus.set_app_has_focus(false);

        fx.focus.reset();
        assert_eq!(fx.focus.keyboard_focus(), None);
        assert_eq!(fx.focus.mouse_capture(), None);
        assert!(!fx.focus.focus_locked());
        assert!(fx.focus.app_has_focus());
        assert_eq!(fx.focus.last_focus_for_group(fx.floater), None);
    }
}
