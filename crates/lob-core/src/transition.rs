//! Overlay transition state machine.
//!
//! One camera timeline at most is active. Starting a transition cancels the
//! running one without completing it; only the transition that actually
//! runs to the end applies its completion effects. Click handlers go
//! through the gated `request_*` entry points, while route and scroll
//! reconciliation call `open`/`close` directly and pre-empt whatever is in
//! flight.

use crate::camera::CameraPose;
use crate::overlay::{Overlay, OverlayTable};
use crate::section::Section;
use crate::store::{SceneStore, TransitionState};
use crate::timeline::Timeline;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Open(Overlay),
    Close(Overlay),
}

impl TransitionKind {
    pub fn overlay(self) -> Overlay {
        match self {
            TransitionKind::Open(o) | TransitionKind::Close(o) => o,
        }
    }
}

/// Who asked for the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOrigin {
    User,
    Navigation,
    Scroll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    Started {
        id: TransitionId,
        kind: TransitionKind,
        origin: TransitionOrigin,
    },
    /// The opening overlay became visible part-way through the camera move.
    Revealed { id: TransitionId, overlay: Overlay },
    Completed { id: TransitionId, kind: TransitionKind },
    Cancelled { id: TransitionId, kind: TransitionKind },
}

pub type TransitionEvents = SmallVec<[TransitionEvent; 4]>;

#[derive(Clone, Debug)]
struct Active {
    id: TransitionId,
    kind: TransitionKind,
    origin: TransitionOrigin,
    timeline: Timeline<CameraPose>,
}

#[derive(Clone, Debug, Default)]
pub struct TransitionController {
    table: OverlayTable,
    active: Option<Active>,
    pending: TransitionEvents,
    next_id: u32,
}

impl TransitionController {
    pub fn new(table: OverlayTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    #[inline]
    pub fn table(&self) -> &OverlayTable {
        &self.table
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Identity of the running transition, without its timeline.
    pub fn active(&self) -> Option<(TransitionId, TransitionKind, TransitionOrigin)> {
        self.active.as_ref().map(|a| (a.id, a.kind, a.origin))
    }

    /// Click handler for opening. Ignored while any transition is in flight
    /// or when the overlay is already open.
    pub fn request_open(
        &mut self,
        overlay: Overlay,
        store: &mut SceneStore,
        camera: &CameraPose,
    ) -> Option<TransitionId> {
        let state = store.state();
        if state.is_transitioning() || state.is_visible(overlay) {
            log::debug!(
                "[transition] open {} ignored ({:?}, visible={})",
                overlay,
                state.transition,
                state.is_visible(overlay)
            );
            return None;
        }
        self.open(overlay, store, camera, TransitionOrigin::User)
    }

    /// Click handler for closing. Ignored while any transition is in flight
    /// or when the overlay is not open.
    pub fn request_close(
        &mut self,
        overlay: Overlay,
        store: &mut SceneStore,
        camera: &CameraPose,
    ) -> Option<TransitionId> {
        let state = store.state();
        if state.is_transitioning() || !state.is_visible(overlay) {
            log::debug!(
                "[transition] close {} ignored ({:?}, visible={})",
                overlay,
                state.transition,
                state.is_visible(overlay)
            );
            return None;
        }
        self.close(overlay, store, camera, TransitionOrigin::User)
    }

    /// Start opening `overlay`, pre-empting any transition in flight.
    ///
    /// No-op when the same opening is already pending, or when the overlay
    /// is open and nothing is moving.
    pub fn open(
        &mut self,
        overlay: Overlay,
        store: &mut SceneStore,
        camera: &CameraPose,
        origin: TransitionOrigin,
    ) -> Option<TransitionId> {
        let state = store.state();
        if state.is_transitioning_to(overlay)
            || (state.transition.is_idle() && state.is_visible(overlay))
        {
            return None;
        }
        self.cancel_active();
        for other in Overlay::ALL {
            if other != overlay {
                store.set_overlay_visible(other, false);
            }
        }
        store.set_current_section(overlay.transition_section());
        store.set_transition(TransitionState::Opening(overlay));

        let row = self.table.get(overlay);
        let timeline = Timeline::new(*camera, row.camera, row.open).with_cue(row.reveal_at);
        Some(self.start(TransitionKind::Open(overlay), origin, timeline))
    }

    /// Start closing `overlay`, pre-empting any transition in flight. Also
    /// closes an overlay whose opening has not revealed it yet.
    pub fn close(
        &mut self,
        overlay: Overlay,
        store: &mut SceneStore,
        camera: &CameraPose,
        origin: TransitionOrigin,
    ) -> Option<TransitionId> {
        let state = store.state();
        if state.is_transitioning_from(overlay)
            || !(state.is_visible(overlay) || state.is_transitioning_to(overlay))
        {
            return None;
        }
        self.cancel_active();
        // the overlay fades out ahead of the delayed camera move
        store.set_overlay_visible(overlay, false);
        store.set_transition(TransitionState::Closing(overlay));

        let row = self.table.get(overlay);
        let timeline = Timeline::new(*camera, self.table.home(), row.close);
        Some(self.start(TransitionKind::Close(overlay), origin, timeline))
    }

    /// Treat the running transition as if the user had clicked it. Only
    /// changes what `active()` reports; the `Started` event already queued
    /// keeps its original origin, so history handling is unaffected.
    pub fn mark_user_requested(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.origin = TransitionOrigin::User;
                true
            }
            None => false,
        }
    }

    /// Advance the running timeline, writing the camera rig and applying
    /// reveal/completion effects. Returns everything that happened since the
    /// previous tick, including starts and cancellations.
    pub fn tick(
        &mut self,
        dt: f32,
        store: &mut SceneStore,
        camera: &mut CameraPose,
    ) -> TransitionEvents {
        let mut events = std::mem::take(&mut self.pending);
        let Some(active) = self.active.as_mut() else {
            return events;
        };
        let Some(step) = active.timeline.step(dt) else {
            self.active = None;
            return events;
        };
        *camera = step.value;
        let (id, kind) = (active.id, active.kind);

        if step.cue_crossed {
            if let TransitionKind::Open(overlay) = kind {
                store.set_overlay_visible(overlay, true);
                events.push(TransitionEvent::Revealed { id, overlay });
            }
        }
        if step.completed {
            self.active = None;
            store.set_transition(TransitionState::Idle);
            match kind {
                TransitionKind::Open(overlay) => {
                    store.set_overlay_visible(overlay, true);
                    store.set_current_section(overlay.section());
                }
                TransitionKind::Close(_) => store.set_current_section(Section::Hero),
            }
            log::info!("[transition] {:?} complete", kind);
            events.push(TransitionEvent::Completed { id, kind });
        }
        events
    }

    fn start(
        &mut self,
        kind: TransitionKind,
        origin: TransitionOrigin,
        timeline: Timeline<CameraPose>,
    ) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        log::info!("[transition] start {:?} ({:?})", kind, origin);
        self.active = Some(Active {
            id,
            kind,
            origin,
            timeline,
        });
        self.pending
            .push(TransitionEvent::Started { id, kind, origin });
        id
    }

    fn cancel_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.timeline.cancel();
            log::info!("[transition] cancel {:?}", active.kind);
            self.pending.push(TransitionEvent::Cancelled {
                id: active.id,
                kind: active.kind,
            });
        }
    }
}
