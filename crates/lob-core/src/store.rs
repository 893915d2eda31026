//! Observable scene state with one mutator per field.
//!
//! The store never cascades: setting one field changes exactly that field.
//! Coordinated changes (section + visibility + transition) are made by the
//! transition controller through the individual mutators. Observers are
//! notified after a field actually changes and only get shared access.

use crate::overlay::Overlay;
use crate::section::Section;
use fnv::FnvHashMap;

/// Which transition, if any, is in flight. Mutual exclusion of the
/// per-overlay transition flags follows from this being a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Opening(Overlay),
    Closing(Overlay),
}

impl TransitionState {
    #[inline]
    pub fn is_idle(self) -> bool {
        self == TransitionState::Idle
    }

    pub fn overlay(self) -> Option<Overlay> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Opening(o) | TransitionState::Closing(o) => Some(o),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub scroll_progress: f32,
    pub scroll_velocity: f32,
    pub current_section: Section,
    pub sound_enabled: bool,
    pub reduced_motion: bool,
    pub overlay_visible: [bool; Overlay::COUNT],
    pub transition: TransitionState,
    pub ball_deform_amount: f32,
    pub jumbotron_focused: bool,
    pub ball_hovered: bool,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            scroll_progress: 0.0,
            scroll_velocity: 0.0,
            current_section: Section::Hero,
            sound_enabled: false,
            reduced_motion: false,
            overlay_visible: [false; Overlay::COUNT],
            transition: TransitionState::Idle,
            ball_deform_amount: 0.0,
            jumbotron_focused: false,
            ball_hovered: false,
        }
    }
}

impl SceneState {
    #[inline]
    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.overlay_visible[overlay.index()]
    }

    #[inline]
    pub fn is_transitioning_to(&self, overlay: Overlay) -> bool {
        self.transition == TransitionState::Opening(overlay)
    }

    #[inline]
    pub fn is_transitioning_from(&self, overlay: Overlay) -> bool {
        self.transition == TransitionState::Closing(overlay)
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        !self.transition.is_idle()
    }

    pub fn visible_overlay(&self) -> Option<Overlay> {
        Overlay::ALL.into_iter().find(|o| self.is_visible(*o))
    }

    pub fn any_overlay_visible(&self) -> bool {
        self.overlay_visible.iter().any(|v| *v)
    }

    /// Hidden content is revealed.
    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.ball_deform_amount >= 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneField {
    ScrollProgress,
    ScrollVelocity,
    CurrentSection,
    SoundEnabled,
    ReducedMotion,
    OverlayVisible(Overlay),
    Transition,
    BallDeformAmount,
    JumbotronFocused,
    BallHovered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Observer = Box<dyn FnMut(SceneField, &SceneState)>;

#[derive(Default)]
pub struct SceneStore {
    state: SceneState,
    observers: FnvHashMap<SubscriptionId, Observer>,
    next_id: u32,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SceneState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    #[inline]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn snapshot(&self) -> SceneState {
        self.state.clone()
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(SceneField, &SceneState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.observers.insert(id, Box::new(observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    fn notify(&mut self, field: SceneField) {
        let state = &self.state;
        for observer in self.observers.values_mut() {
            observer(field, state);
        }
    }

    // ---------------- mutators (one per field) ----------------

    pub fn set_scroll_progress(&mut self, progress: f32) {
        let p = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.state.scroll_progress != p {
            self.state.scroll_progress = p;
            self.notify(SceneField::ScrollProgress);
        }
    }

    pub fn set_scroll_velocity(&mut self, velocity: f32) {
        let v = if velocity.is_finite() { velocity } else { 0.0 };
        if self.state.scroll_velocity != v {
            self.state.scroll_velocity = v;
            self.notify(SceneField::ScrollVelocity);
        }
    }

    pub fn set_current_section(&mut self, section: Section) {
        if self.state.current_section != section {
            log::debug!(
                "[section] {} -> {}",
                self.state.current_section,
                section
            );
            self.state.current_section = section;
            self.notify(SceneField::CurrentSection);
        }
    }

    pub fn toggle_sound(&mut self) {
        self.state.sound_enabled = !self.state.sound_enabled;
        self.notify(SceneField::SoundEnabled);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.state.reduced_motion != reduced {
            self.state.reduced_motion = reduced;
            self.notify(SceneField::ReducedMotion);
        }
    }

    pub fn set_overlay_visible(&mut self, overlay: Overlay, visible: bool) {
        let slot = &mut self.state.overlay_visible[overlay.index()];
        if *slot != visible {
            *slot = visible;
            self.notify(SceneField::OverlayVisible(overlay));
        }
    }

    pub fn set_transition(&mut self, transition: TransitionState) {
        if self.state.transition != transition {
            self.state.transition = transition;
            self.notify(SceneField::Transition);
        }
    }

    /// Stored as a latch value: anything at or above 0.5 reads as 1.
    pub fn set_ball_deform_amount(&mut self, amount: f32) {
        let a = if amount >= 0.5 { 1.0 } else { 0.0 };
        if self.state.ball_deform_amount != a {
            self.state.ball_deform_amount = a;
            self.notify(SceneField::BallDeformAmount);
        }
    }

    pub fn set_jumbotron_focused(&mut self, focused: bool) {
        if self.state.jumbotron_focused != focused {
            self.state.jumbotron_focused = focused;
            self.notify(SceneField::JumbotronFocused);
        }
    }

    pub fn set_ball_hovered(&mut self, hovered: bool) {
        if self.state.ball_hovered != hovered {
            self.state.ball_hovered = hovered;
            self.notify(SceneField::BallHovered);
        }
    }
}

impl std::fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
