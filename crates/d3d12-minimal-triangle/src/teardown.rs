use crate::error::TeardownError;

/// Everything the sample creates and later releases, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleObject {
    Window,
    DebugLayer,
    InfoQueue,
    Factory,
    Adapter,
    Device,
    CommandQueue,
    SwapChain,
    RtvHeap,
    RenderTargets,
    CommandAllocator,
    RootSignature,
    PipelineState,
    CommandList,
    VertexBuffer,
    Fence,
    FenceEvent,
}

/// Ledger for shutdown.
///
/// Built from the objects that were actually created. Nothing may be
/// released until the final fence wait is recorded, and every release must
/// be the most recently created object still alive.
#[derive(Debug)]
pub struct Teardown {
    alive: Vec<LifecycleObject>,
    fence_drained: bool,
}

impl Teardown {
    pub fn new(created: Vec<LifecycleObject>) -> Self {
        Self {
            alive: created,
            fence_drained: false,
        }
    }

    pub fn fence_drained(&mut self) {
        self.fence_drained = true;
    }

    pub fn release(&mut self, object: LifecycleObject) -> Result<(), TeardownError> {
        if !self.fence_drained {
            return Err(TeardownError::FenceNotDrained { object });
        }
        match self.alive.last() {
            Some(&last) if last == object => {
                self.alive.pop();
                Ok(())
            }
            expected => Err(TeardownError::OutOfOrder {
                expected: expected.copied(),
                found: object,
            }),
        }
    }

    /// Checks the release of `object`, then drops `value`, the handle that
    /// keeps it alive. The value is dropped even when the release is refused.
    pub fn release_value<T>(
        &mut self,
        object: LifecycleObject,
        value: T,
    ) -> Result<(), TeardownError> {
        let released = self.release(object);
        drop(value);
        released
    }

    pub fn alive(&self) -> &[LifecycleObject] {
        &self.alive
    }

    pub fn is_complete(&self) -> bool {
        self.alive.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::LifecycleObject::*;
    use super::*;

    struct Tracked<'a> {
        object: LifecycleObject,
        dropped: &'a RefCell<Vec<LifecycleObject>>,
    }

    impl Drop for Tracked<'_> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.object);
        }
    }

    struct Objects<'a> {
        fence: Tracked<'a>,
        device: Tracked<'a>,
        factory: Tracked<'a>,
    }

    fn created() -> Vec<LifecycleObject> {
        vec![Window, Factory, Device, CommandQueue, Fence, FenceEvent]
    }

    #[test]
    fn nothing_is_released_before_the_fence_wait() {
        let mut teardown = Teardown::new(created());
        assert_eq!(
            teardown.release(FenceEvent),
            Err(TeardownError::FenceNotDrained { object: FenceEvent })
        );
        assert_eq!(teardown.alive().len(), 6);
    }

    #[test]
    fn reverse_creation_order_completes() {
        let mut teardown = Teardown::new(created());
        teardown.fence_drained();
        for object in created().into_iter().rev() {
            teardown.release(object).unwrap();
        }
        assert!(teardown.is_complete());
    }

    #[test]
    fn releasing_out_of_order_is_rejected() {
        let mut teardown = Teardown::new(created());
        teardown.fence_drained();
        assert_eq!(
            teardown.release(Device),
            Err(TeardownError::OutOfOrder {
                expected: Some(FenceEvent),
                found: Device,
            })
        );
        teardown.release(FenceEvent).unwrap();
        assert_eq!(teardown.alive().last(), Some(&Fence));
    }

    #[test]
    fn objects_that_were_never_created_are_skipped() {
        let mut teardown = Teardown::new(vec![Window, Factory]);
        teardown.fence_drained();
        assert!(teardown.release(InfoQueue).is_err());
        teardown.release(Factory).unwrap();
        teardown.release(Window).unwrap();
        assert_eq!(
            teardown.release(Window),
            Err(TeardownError::OutOfOrder {
                expected: None,
                found: Window,
            })
        );
    }

    #[test]
    fn window_release_is_refused_while_gpu_objects_remain() {
        let mut teardown = Teardown::new(vec![Window, Factory, Device, Fence]);
        teardown.fence_drained();
        assert_eq!(
            teardown.release(Window),
            Err(TeardownError::OutOfOrder {
                expected: Some(Fence),
                found: Window,
            })
        );
        assert_eq!(teardown.alive(), &[Window, Factory, Device, Fence]);
    }

    #[test]
    fn released_values_are_dropped_even_when_refused() {
        let dropped = RefCell::new(Vec::new());
        let mut teardown = Teardown::new(vec![Device, Fence]);
        teardown.fence_drained();
        let device = Tracked {
            object: Device,
            dropped: &dropped,
        };
        assert!(teardown.release_value(Device, device).is_err());
        assert_eq!(*dropped.borrow(), vec![Device]);
        assert_eq!(teardown.alive(), &[Device, Fence]);
    }

    #[test]
    fn early_return_during_shutdown_drops_newest_first() {
        fn shut_down(
            objects: Objects<'_>,
            teardown: &mut Teardown,
        ) -> Result<(), TeardownError> {
            // Bindings in creation order, so an early return drops them in reverse.
            let Objects {
                factory,
                device,
                fence,
            } = objects;
            teardown.release_value(Fence, fence)?;
            teardown.release(Window)?;
            teardown.release_value(Device, device)?;
            teardown.release_value(Factory, factory)
        }

        let dropped = RefCell::new(Vec::new());
        let tracked = |object| Tracked {
            object,
            dropped: &dropped,
        };
        let objects = Objects {
            fence: tracked(Fence),
            device: tracked(Device),
            factory: tracked(Factory),
        };
        let mut teardown = Teardown::new(vec![Window, Factory, Device, Fence]);
        teardown.fence_drained();

        assert!(shut_down(objects, &mut teardown).is_err());
        assert_eq!(*dropped.borrow(), vec![Fence, Device, Factory]);
    }
}
