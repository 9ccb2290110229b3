//! The gallery controller: load gating, rotation timer, transitions and input.

mod event;
mod loading;

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::GalleryConfig;
use crate::constants::MAX_PENDING_EVENTS;
use crate::error::{GalleryError, Result};
use crate::geometry::Point;
use crate::hit_test::find_block_at;
use crate::image::{Image, ImageSet};
use crate::layout::Layout;
use crate::registry::RendererRegistry;
use crate::renderer::{Renderer, Transition, TransitionState};
use crate::sequencer::RotationSequencer;
use crate::slice::compute_slice;
use crate::state::GalleryState;
use crate::surface::Surface;
use crate::timeline::{Timeline, TimerId};

pub use event::{ClickEvent, GalleryEvent, PointerEvent, PointerKind};
pub use loading::{SourceStatus, SourceTracker};

type ClickHandler = Box<dyn FnMut(&ClickEvent)>;

struct ActiveTransition {
    block: usize,
    transition: Box<dyn Transition>,
}

/// Rotates loaded images through the blocks of a layout.
///
/// The host reports load outcomes with [`Gallery::image_loaded`] and
/// [`Gallery::image_failed`], forwards pointer input to
/// [`Gallery::handle_pointer`], and advances time with [`Gallery::update`],
/// which is also where every transition draws.
///
/// The first fill happens as soon as every source has settled (loaded,
/// failed, or abandoned by the load timeout) and at least one image loaded.
/// If none loaded the gallery waits in [`GalleryState::LoadFailed`] until a
/// late arrival from an abandoned source fills it.
///
/// Rotation is best effort: ticks missed during one long `update` collapse
/// into a single block change. Events queue up until
/// [`Gallery::drain_events`]; past `MAX_PENDING_EVENTS` the oldest are
/// dropped.
pub struct Gallery {
    layout: Layout,
    images: ImageSet,
    sources: SourceTracker,
    sequencer: RotationSequencer,

    renderer_name: String,
    renderer: Rc<dyn Renderer>,
    interval: Duration,

    timeline: Timeline,
    rotation_timer: Option<TimerId>,
    load_timer: Option<TimerId>,
    transitions: BTreeMap<TimerId, ActiveTransition>,
    block_transitions: Vec<Option<TimerId>>,

    state: GalleryState,
    surface_origin: Point,
    click_handler: ClickHandler,
    events: VecDeque<GalleryEvent>,
    events_overflowed: bool,
}

impl Gallery {
    /// Validates the configuration and resolves the renderer up front, so
    /// configuration mistakes never surface later from inside a timer.
    pub fn new(config: GalleryConfig, registry: &RendererRegistry) -> Result<Self> {
        if config.sources.is_empty() {
            return Err(GalleryError::NoSources);
        }

        let interval = config.interval();
        let load_timeout = config.load_timeout();
        let renderer_name = config.renderer_name().to_string();
        let renderer = registry.get(&renderer_name)?;
        let layout = Layout::new(config.layout)?;

        let mut timeline = Timeline::new();
        let load_timer = load_timeout.map(|timeout| timeline.set_timeout(timeout));

        info!(
            "gallery: {} sources, {} blocks, renderer '{}', interval {:?}",
            config.sources.len(),
            layout.len(),
            renderer_name,
            interval
        );

        Ok(Self {
            block_transitions: vec![None; layout.len()],
            layout,
            images: ImageSet::new(),
            sources: SourceTracker::new(config.sources),
            sequencer: RotationSequencer::new(),
            renderer_name,
            renderer,
            interval,
            timeline,
            rotation_timer: None,
            load_timer,
            transitions: BTreeMap::new(),
            state: GalleryState::Loading,
            surface_origin: Point::ZERO,
            click_handler: Box::new(|_| {}),
            events: VecDeque::new(),
            events_overflowed: false,
        })
    }

    pub fn with_click_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&ClickEvent) + 'static,
    {
        self.click_handler = Box::new(handler);
        self
    }

    // --- Loading ---

    pub fn sources(&self) -> &[String] {
        self.sources.sources()
    }

    pub fn pending_sources(&self) -> impl Iterator<Item = (usize, &str)> {
        self.sources.pending()
    }

    #[must_use]
    pub fn source_status(&self, source: usize) -> Option<SourceStatus> {
        self.sources.status(source)
    }

    /// Record a completed load. Images join the rotation in completion order;
    /// a source abandoned by the load timeout may still arrive here.
    pub fn image_loaded(&mut self, source: usize, image: Image) -> Result<()> {
        self.sources.mark_loaded(source)?;
        debug!(
            "source {} loaded as {:?} ({}x{})",
            source,
            image.id(),
            image.width(),
            image.height()
        );

        self.images.push(image);
        self.emit(GalleryEvent::SourceLoaded { source, image });
        self.check_ready();
        Ok(())
    }

    pub fn image_failed(&mut self, source: usize, reason: impl Into<String>) -> Result<()> {
        self.sources.mark_failed(source)?;
        let reason = reason.into();
        warn!("source {} failed to load: {}", source, reason);

        self.emit(GalleryEvent::SourceFailed { source, reason });
        self.check_ready();
        Ok(())
    }

    fn check_ready(&mut self) {
        let waiting = matches!(self.state, GalleryState::Loading | GalleryState::LoadFailed);
        if !waiting || !self.sources.all_settled() {
            return;
        }

        if let Some(timer) = self.load_timer.take() {
            self.timeline.clear(timer);
        }

        if !self.images.is_empty() {
            self.run();
        } else if self.state == GalleryState::Loading {
            error!("none of the {} image sources loaded", self.sources.sources().len());
            self.state = GalleryState::LoadFailed;
            self.emit(GalleryEvent::LoadFailed);
        }
    }

    fn on_load_timeout(&mut self) {
        if self.state != GalleryState::Loading {
            return;
        }

        let abandoned = self.sources.abandon_pending();
        if !abandoned.is_empty() {
            warn!("load timeout: abandoning sources {:?}", abandoned);
            self.emit(GalleryEvent::SourcesAbandoned { sources: abandoned });
        }
        self.check_ready();
    }

    /// Fill every block once, enable input handling and start rotating.
    fn run(&mut self) {
        info!(
            "starting rotation with {} of {} images",
            self.images.len(),
            self.sources.sources().len()
        );

        for _ in 0..self.layout.len() {
            self.rotate();
        }

        self.state = GalleryState::Running;
        self.emit(GalleryEvent::Started { images: self.images.len() });
        self.start();
    }

    // --- Rotation ---

    /// Resume block changes. Ignored while already running and before the
    /// first fill.
    pub fn start(&mut self) {
        if !self.state.has_started() {
            debug!("start ignored in state {:?}", self.state);
            return;
        }
        if self.rotation_timer.is_some() {
            return;
        }

        self.rotation_timer = Some(self.timeline.set_interval(self.interval, self.interval));
        if self.state == GalleryState::Paused {
            debug!("rotation resumed");
            self.state = GalleryState::Running;
            self.emit(GalleryEvent::Resumed);
        }
    }

    /// Stop block changes. Transitions already in flight keep animating.
    pub fn stop(&mut self) {
        if let Some(timer) = self.rotation_timer.take() {
            self.timeline.clear(timer);
            debug!("rotation paused");
            self.state = GalleryState::Paused;
            self.emit(GalleryEvent::Paused);
        }
    }

    /// One block change: next block, next image.
    fn rotate(&mut self) {
        let Some(block) = self.sequencer.next_block(self.layout.len()) else {
            return;
        };
        let Some(image) = self
            .sequencer
            .next_image(self.images.len())
            .and_then(|index| self.images.get(index).copied())
        else {
            warn!("no image available for block {}", block);
            return;
        };

        self.set_block_image(block, image);
    }

    fn set_block_image(&mut self, block: usize, image: Image) {
        let Some(geometry) = self.layout.get(block).map(|b| b.geometry()) else {
            return;
        };
        let slice = compute_slice(&geometry, &image);

        // a block never runs two transitions at once
        self.cancel_transition(block);

        let transition = self.renderer.begin(&geometry, &image, slice);
        let frame_interval = transition.frame_interval();
        let timer = self.timeline.set_interval(frame_interval, frame_interval);
        self.transitions.insert(timer, ActiveTransition { block, transition });
        self.block_transitions[block] = Some(timer);

        self.layout.commit(block, image);
        debug!("block {} <- {:?} via '{}'", block, image.id(), self.renderer_name);
        self.emit(GalleryEvent::BlockChanged { block, image });
    }

    fn cancel_transition(&mut self, block: usize) {
        if let Some(timer) = self.block_transitions.get_mut(block).and_then(Option::take) {
            self.timeline.clear(timer);
            self.transitions.remove(&timer);
            debug!("block {} reassigned mid-transition, cancelling it", block);
            self.emit(GalleryEvent::TransitionPreempted { block });
        }
    }

    // --- Time ---

    /// Advance time by `dt`, firing every timer that falls due in order.
    pub fn update(&mut self, dt: Duration, surface: &mut dyn Surface) {
        let until = self.timeline.now() + dt;
        while let Some(timer) = self.timeline.pop_due(until) {
            self.fire(timer, until, surface);
        }
        self.timeline.settle(until);
    }

    fn fire(&mut self, timer: TimerId, until: Duration, surface: &mut dyn Surface) {
        if self.rotation_timer == Some(timer) {
            self.rotate();
            let skipped = self.timeline.skip_missed(timer, until);
            if skipped > 0 {
                debug!("rotation fell behind, skipping {} ticks", skipped);
            }
            return;
        }

        if self.load_timer == Some(timer) {
            self.load_timer = None;
            self.on_load_timeout();
            return;
        }

        let Some(active) = self.transitions.get_mut(&timer) else {
            return;
        };
        if active.transition.step(surface) == TransitionState::Converged {
            let block = active.block;
            self.transitions.remove(&timer);
            self.timeline.clear(timer);
            if self.block_transitions[block] == Some(timer) {
                self.block_transitions[block] = None;
            }
            self.emit(GalleryEvent::TransitionConverged { block });
        }
    }

    // --- Input ---

    /// Where the surface's top-left corner sits in pointer coordinates.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.surface_origin = origin;
    }

    /// Enter pauses, leave resumes, press dispatches a click on the block
    /// under the pointer. Input is ignored until the first fill.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.state.has_started() {
            return;
        }

        match event.kind {
            PointerKind::Enter => self.stop(),
            PointerKind::Leave => self.start(),
            PointerKind::Press => self.dispatch_click(event),
        }
    }

    fn dispatch_click(&mut self, pointer: PointerEvent) {
        let local = pointer.position.relative_to(self.surface_origin);
        let Some(block_index) = find_block_at(local, &self.layout) else {
            return;
        };
        let Some(block) = self.layout.get(block_index) else {
            return;
        };

        let click = ClickEvent {
            pointer,
            local,
            block_index,
            block: block.geometry(),
            image: block.image(),
        };
        debug!("click on block {} at ({}, {})", block_index, local.x, local.y);
        (self.click_handler)(&click);
    }

    // --- Inspection ---

    #[must_use]
    pub fn state(&self) -> GalleryState {
        self.state
    }

    /// Whether the rotation timer is scheduled.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotation_timer.is_some()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn active_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GalleryEvent> + '_ {
        self.events_overflowed = false;
        self.events.drain(..)
    }

    fn emit(&mut self, event: GalleryEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
            if !self.events_overflowed {
                warn!("event queue full, dropping oldest events until drained");
                self.events_overflowed = true;
            }
        }
        self.events.push_back(event);
    }
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("state", &self.state)
            .field("renderer", &self.renderer_name)
            .field("interval", &self.interval)
            .field("blocks", &self.layout.len())
            .field("images", &self.images.len())
            .field("active_transitions", &self.transitions.len())
            .field("now", &self.timeline.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageId;
    use crate::layout::BlockGeometry;
    use crate::surface::RecordingSurface;

    fn config(sources: usize, blocks: usize) -> GalleryConfig {
        GalleryConfig::new(
            (0..sources).map(|i| format!("{i}.jpg")).collect(),
            (0..blocks).map(|i| BlockGeometry::new(i as i32 * 100, 0, 100, 50)).collect(),
        )
    }

    fn image(id: usize) -> Image {
        Image::new(ImageId(id), 400, 300).unwrap()
    }

    fn ready_gallery(sources: usize, blocks: usize) -> Gallery {
        let registry = RendererRegistry::with_builtins();
        let mut gallery = Gallery::new(config(sources, blocks).with_interval_ms(500), &registry).unwrap();
        for i in 0..sources {
            gallery.image_loaded(i, image(i)).unwrap();
        }
        gallery
    }

    #[test]
    fn test_new_rejects_bad_configuration() {
        let registry = RendererRegistry::with_builtins();

        assert!(matches!(Gallery::new(config(0, 1), &registry), Err(GalleryError::NoSources)));
        assert!(matches!(Gallery::new(config(1, 0), &registry), Err(GalleryError::EmptyLayout)));
        assert!(matches!(
            Gallery::new(config(1, 1).with_renderer("wobble"), &registry),
            Err(GalleryError::UnknownRenderer(name)) if name == "wobble"
        ));
    }

    #[test]
    fn test_waits_for_every_source_before_filling() {
        let registry = RendererRegistry::with_builtins();
        let mut gallery = Gallery::new(config(3, 2), &registry).unwrap();

        gallery.image_loaded(1, image(1)).unwrap();
        gallery.image_loaded(0, image(0)).unwrap();
        assert_eq!(gallery.state(), GalleryState::Loading);
        assert!(gallery.layout().blocks().iter().all(|b| b.image().is_none()));

        gallery.image_loaded(2, image(2)).unwrap();
        assert_eq!(gallery.state(), GalleryState::Running);
        assert!(gallery.is_rotating());
        // completion order, not source order
        assert_eq!(gallery.layout().get(0).unwrap().image(), Some(image(1)));
        assert_eq!(gallery.layout().get(1).unwrap().image(), Some(image(0)));
    }

    #[test]
    fn test_start_is_ignored_while_loading() {
        let registry = RendererRegistry::with_builtins();
        let mut gallery = Gallery::new(config(2, 1), &registry).unwrap();

        gallery.start();
        assert_eq!(gallery.state(), GalleryState::Loading);
        assert!(!gallery.is_rotating());
    }

    #[test]
    fn test_stop_and_start_are_idempotent() {
        let mut gallery = ready_gallery(2, 2);
        gallery.drain_events().for_each(drop);

        gallery.stop();
        gallery.stop();
        assert_eq!(gallery.state(), GalleryState::Paused);
        assert!(!gallery.is_rotating());

        gallery.start();
        gallery.start();
        assert_eq!(gallery.state(), GalleryState::Running);
        assert!(gallery.is_rotating());

        let events: Vec<_> = gallery.drain_events().collect();
        assert_eq!(events, vec![GalleryEvent::Paused, GalleryEvent::Resumed]);
    }

    #[test]
    fn test_rotation_tick_changes_exactly_one_block() {
        let mut gallery = ready_gallery(3, 2);
        let mut surface = RecordingSurface::new();
        gallery.update(Duration::from_millis(500), &mut surface);
        gallery.update(Duration::from_millis(500), &mut surface);
        gallery.drain_events().for_each(drop);

        gallery.update(Duration::from_millis(500), &mut surface);

        let changed: Vec<_> = gallery
            .drain_events()
            .filter(|e| matches!(e, GalleryEvent::BlockChanged { .. }))
            .collect();
        // fill used blocks 0,1 and images 0,1; ticks at 500 and 1000 used (0,2) and (1,0)
        assert_eq!(changed, vec![GalleryEvent::BlockChanged { block: 0, image: image(1) }]);
    }

    #[test]
    fn test_transitions_converge_while_paused() {
        let mut gallery = ready_gallery(2, 2);
        let mut surface = RecordingSurface::new();
        assert_eq!(gallery.active_transitions(), 2);

        // pausing rotation leaves in-flight transitions running
        gallery.stop();
        // fade needs 23 ticks of 30ms
        gallery.update(Duration::from_millis(23 * 30), &mut surface);

        assert_eq!(gallery.active_transitions(), 0);
        assert_eq!(surface.calls().len(), 46);
        assert!(surface.calls().iter().rev().take(2).all(|c| c.alpha == 1.0));
    }

    #[test]
    fn test_reassigning_a_block_preempts_its_transition() {
        let registry = RendererRegistry::with_builtins();
        let mut gallery = Gallery::new(config(2, 1).with_interval_ms(100), &registry).unwrap();
        gallery.image_loaded(0, image(0)).unwrap();
        gallery.image_loaded(1, image(1)).unwrap();
        let mut surface = RecordingSurface::new();
        gallery.drain_events().for_each(drop);

        gallery.update(Duration::from_millis(100), &mut surface);

        let events: Vec<_> = gallery.drain_events().collect();
        assert!(events.contains(&GalleryEvent::TransitionPreempted { block: 0 }));
        assert!(events.contains(&GalleryEvent::BlockChanged { block: 0, image: image(1) }));
        assert_eq!(gallery.active_transitions(), 1);
        // 3 fade ticks (30, 60, 90ms) of the first transition before it was cancelled
        assert_eq!(surface.calls().len(), 3);
        assert!(surface.calls().iter().all(|c| c.image == ImageId(0)));
    }

    #[test]
    fn test_long_update_changes_one_block() {
        let mut gallery = ready_gallery(3, 2);
        let mut surface = RecordingSurface::new();
        gallery.drain_events().for_each(drop);

        gallery.update(Duration::from_secs(60), &mut surface);
        let changed = gallery
            .drain_events()
            .filter(|e| matches!(e, GalleryEvent::BlockChanged { .. }))
            .count();
        assert_eq!(changed, 1);

        // the next tick lands back on the interval grid
        gallery.update(Duration::from_millis(499), &mut surface);
        assert_eq!(gallery.drain_events().count(), 0);
        gallery.update(Duration::from_millis(1), &mut surface);
        assert!(gallery
            .drain_events()
            .any(|e| e == GalleryEvent::BlockChanged { block: 1, image: image(0) }));
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut gallery = ready_gallery(2, 1);
        let mut surface = RecordingSurface::new();

        for _ in 0..3600 {
            gallery.update(Duration::from_millis(500), &mut surface);
        }

        let events: Vec<_> = gallery.drain_events().collect();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // oldest dropped first
        assert!(!events.contains(&GalleryEvent::Started { images: 2 }));
        assert_eq!(gallery.drain_events().count(), 0);
    }

    #[test]
    fn test_duplicate_outcome_is_an_error() {
        let mut gallery = ready_gallery(1, 1);

        assert!(matches!(
            gallery.image_loaded(0, image(5)),
            Err(GalleryError::SourceAlreadySettled { index: 0, .. })
        ));
        assert!(matches!(gallery.image_failed(9, "gone"), Err(GalleryError::UnknownSource(9))));
    }

    #[test]
    fn test_pointer_input_ignored_before_first_fill() {
        let registry = RendererRegistry::with_builtins();
        let clicks = Rc::new(std::cell::Cell::new(0));
        let counter = clicks.clone();
        let mut gallery = Gallery::new(config(2, 1), &registry)
            .unwrap()
            .with_click_handler(move |_| counter.set(counter.get() + 1));

        gallery.handle_pointer(PointerEvent::press(10.0, 10.0));
        gallery.handle_pointer(PointerEvent::leave());

        assert_eq!(clicks.get(), 0);
        assert_eq!(gallery.state(), GalleryState::Loading);
    }
}
