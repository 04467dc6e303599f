//! Mounting a particle field on a [`Host`].

use std::cell::{Ref, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use super::ParticleField;
use crate::config::FieldConfig;
use crate::host::{Host, ListenerId};
use crate::input::PointerHandle;

/// A particle field wired to a host's resize, pointer and frame events.
///
/// The host only holds weak references to the field. [`unmount`](Self::unmount)
/// detaches immediately; dropping the value stops all drawing, and each
/// listener removes itself the next time the host dispatches to it.
#[must_use = "the field is torn down as soon as the background is dropped"]
pub struct ParticleBackground {
    field: Rc<RefCell<ParticleField>>,
    pointer: PointerHandle,
    listeners: [ListenerId; 3],
}

impl ParticleBackground {
    /// Create a field from `config`, size it to the host and start drawing.
    pub fn mount(host: &mut Host, config: FieldConfig) -> Self {
        Self::mount_field(host, ParticleField::new(config))
    }

    /// Mount an already-built field (e.g. one with a fixed seed).
    pub fn mount_field(host: &mut Host, mut field: ParticleField) -> Self {
        let (width, height) = host.size();
        field.resize(width, height);

        let pointer = field.pointer();
        let field = Rc::new(RefCell::new(field));

        let on_resize = {
            let field = Rc::downgrade(&field);
            host.on_resize_while(move |w, h| match field.upgrade() {
                Some(field) => {
                    field.borrow_mut().resize(w, h);
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            })
        };
        let on_pointer = {
            let field = Rc::downgrade(&field);
            let pointer = pointer.clone();
            host.on_pointer_move_while(move |position| {
                if field.strong_count() == 0 {
                    return ControlFlow::Break(());
                }
                pointer.set(position);
                ControlFlow::Continue(())
            })
        };
        let on_frame = {
            let field = Rc::downgrade(&field);
            host.request_frames_while(move |surface, _| match field.upgrade() {
                Some(field) => {
                    field.borrow_mut().step(surface);
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            })
        };

        Self {
            field,
            pointer,
            listeners: [on_resize, on_pointer, on_frame],
        }
    }

    /// Remove every listener this background registered.
    pub fn unmount(self, host: &mut Host) {
        for id in self.listeners {
            host.remove_listener(id);
        }
        log::debug!("particle background unmounted");
    }

    pub fn field(&self) -> Ref<'_, ParticleField> {
        self.field.borrow()
    }

    pub fn pointer(&self) -> &PointerHandle {
        &self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DisplayList;
    use glam::Vec2;

    fn mounted(host: &mut Host) -> ParticleBackground {
        let field = ParticleField::new(FieldConfig::default()).with_seed(3);
        ParticleBackground::mount_field(host, field)
    }

    #[test]
    fn test_mount_sizes_field() {
        let mut host = Host::new(1000, 500);
        let bg = mounted(&mut host);
        assert_eq!(bg.field().particles().len(), 20);
        assert_eq!(host.listener_count(), 3);
    }

    #[test]
    fn test_events_reach_field() {
        let mut host = Host::new(1000, 500);
        let bg = mounted(&mut host);

        host.pointer_moved(Vec2::new(12.0, 34.0));
        assert_eq!(bg.pointer().get(), Vec2::new(12.0, 34.0));

        host.resize(500, 500);
        assert_eq!(bg.field().particles().len(), 10);

        let mut list = DisplayList::new();
        host.frame(&mut list);
        assert_eq!(list.leaves().count(), 10);
    }

    #[test]
    fn test_unmount_removes_all_listeners() {
        let mut host = Host::new(1000, 500);
        let bg = mounted(&mut host);
        bg.unmount(&mut host);
        assert_eq!(host.listener_count(), 0);

        let mut list = DisplayList::new();
        host.frame(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_zero_size_host_defers_until_resize() {
        let mut host = Host::new(0, 0);
        let bg = mounted(&mut host);
        let mut list = DisplayList::new();
        host.frame(&mut list);
        assert!(list.is_empty());

        host.resize(1000, 1000);
        host.frame(&mut list);
        assert_eq!(list.leaves().count(), 40);
        bg.unmount(&mut host);
    }

    #[test]
    fn test_drop_without_unmount_stops_drawing() {
        let mut host = Host::new(1000, 1000);
        {
            let _bg = mounted(&mut host);
        }

        let mut list = DisplayList::new();
        host.frame(&mut list);
        assert!(list.is_empty());

        host.resize(500, 500);
        host.pointer_moved(Vec2::new(1.0, 1.0));
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_drop_leaves_other_backgrounds_running() {
        let mut host = Host::new(1000, 1000);
        let first = mounted(&mut host);
        let second = mounted(&mut host);
        drop(first);

        let mut list = DisplayList::new();
        host.frame(&mut list);
        assert_eq!(list.leaves().count(), 40);
        assert_eq!(host.listener_count(), 5);
        second.unmount(&mut host);
    }
}
