//! The environment a page-level component runs in.
//!
//! A [`Host`] owns the surface size, the frame clock and three listener
//! lists: resize, pointer-move and animation-frame. Components register
//! closures when they mount and remove them by [`ListenerId`] when they
//! unmount. The embedding application forwards window events with
//! [`resize`](Host::resize) and [`pointer_moved`](Host::pointer_moved), and
//! drives rendering with [`frame`](Host::frame).
//!
//! ```ignore
//! let mut host = Host::new(1280, 720);
//! let background = ParticleBackground::mount(&mut host, FieldConfig::default());
//!
//! host.pointer_moved(Vec2::new(100.0, 100.0));
//! host.frame(&mut surface);
//!
//! background.unmount(&mut host);
//! assert_eq!(host.listener_count(), 0);
//! ```

use std::ops::ControlFlow;

use glam::Vec2;

use crate::surface::Surface;
pub use crate::time::FrameInfo;
use crate::time::Time;

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Returned by a listener to stay registered (`Continue`) or detach (`Break`).
pub type Listen = ControlFlow<()>;

type ResizeListener = Box<dyn FnMut(u32, u32) -> Listen>;
type PointerListener = Box<dyn FnMut(Vec2) -> Listen>;
type FrameListener = Box<dyn FnMut(&mut dyn Surface, &FrameInfo) -> Listen>;

/// Event source and scheduler for mounted components.
pub struct Host {
    width: u32,
    height: u32,
    time: Time,
    next_id: u64,
    resize_listeners: Vec<(ListenerId, ResizeListener)>,
    pointer_listeners: Vec<(ListenerId, PointerListener)>,
    frame_listeners: Vec<(ListenerId, FrameListener)>,
}

impl Host {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            time: Time::new(),
            next_id: 0,
            resize_listeners: Vec::new(),
            pointer_listeners: Vec::new(),
            frame_listeners: Vec::new(),
        }
    }

    /// Advance the clock by a fixed step per frame instead of wall time.
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.time.set_fixed_delta(Some(delta));
        self
    }

    /// Current surface size.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    // ========== Registration ==========

    pub fn on_resize(&mut self, mut listener: impl FnMut(u32, u32) + 'static) -> ListenerId {
        self.on_resize_while(move |w, h| {
            listener(w, h);
            ControlFlow::Continue(())
        })
    }

    /// Like [`on_resize`](Self::on_resize); the listener is dropped the first
    /// time it returns `Break`.
    pub fn on_resize_while(&mut self, listener: impl FnMut(u32, u32) -> Listen + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.resize_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn on_pointer_move(&mut self, mut listener: impl FnMut(Vec2) + 'static) -> ListenerId {
        self.on_pointer_move_while(move |position| {
            listener(position);
            ControlFlow::Continue(())
        })
    }

    pub fn on_pointer_move_while(&mut self, listener: impl FnMut(Vec2) -> Listen + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.pointer_listeners.push((id, Box::new(listener)));
        id
    }

    /// Register a callback invoked on every [`frame`](Self::frame).
    pub fn request_frames(
        &mut self,
        mut listener: impl FnMut(&mut dyn Surface, &FrameInfo) + 'static,
    ) -> ListenerId {
        self.request_frames_while(move |surface, info| {
            listener(surface, info);
            ControlFlow::Continue(())
        })
    }

    pub fn request_frames_while(
        &mut self,
        listener: impl FnMut(&mut dyn Surface, &FrameInfo) -> Listen + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.frame_listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener of any kind. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listener_count();
        self.resize_listeners.retain(|(other, _)| *other != id);
        self.pointer_listeners.retain(|(other, _)| *other != id);
        self.frame_listeners.retain(|(other, _)| *other != id);
        self.listener_count() != before
    }

    /// Listeners currently registered, across all kinds.
    pub fn listener_count(&self) -> usize {
        self.resize_listeners.len() + self.pointer_listeners.len() + self.frame_listeners.len()
    }

    // ========== Dispatch ==========

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resize_listeners
            .retain_mut(|(_, listener)| listener(width, height).is_continue());
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer_listeners
            .retain_mut(|(_, listener)| listener(position).is_continue());
    }

    /// Tick the clock and run every frame listener against `surface`.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> FrameInfo {
        let info = self.time.tick();
        self.frame_listeners
            .retain_mut(|(_, listener)| listener(surface, &info).is_continue());
        info
    }

    fn allocate_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }
}
