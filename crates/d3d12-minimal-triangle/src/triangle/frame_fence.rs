use eyre::bail;
use eyre::WrapErr;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::System::Threading::*;

use crate::error::AppResult;
use crate::fence_counter::FenceCounter;
use crate::teardown::LifecycleObject;

/// The single fence that serializes CPU and GPU, plus the event the CPU
/// blocks on.
pub struct FrameFence {
    event: HANDLE,
    fence: ID3D12Fence,
    counter: FenceCounter,
}

impl FrameFence {
    pub fn new(device: &ID3D12Device, created: &mut Vec<LifecycleObject>) -> AppResult<Self> {
        let fence: ID3D12Fence =
            unsafe { device.CreateFence(FenceCounter::INITIAL_VALUE, D3D12_FENCE_FLAG_NONE) }
                .wrap_err("failed to create fence")?;
        created.push(LifecycleObject::Fence);

        let event = unsafe { CreateEventW(None, false, false, None) }
            .wrap_err("failed to create fence event")?;
        created.push(LifecycleObject::FenceEvent);

        Ok(Self {
            event,
            fence,
            counter: FenceCounter::new(),
        })
    }

    /// Signals the next fence value on the queue and blocks until the GPU
    /// reaches it, which means all previously submitted work is done.
    pub fn signal_and_wait(&mut self, command_queue: &ID3D12CommandQueue) -> AppResult<u64> {
        let value = self.counter.next_signal();
        unsafe { command_queue.Signal(&self.fence, value) }
            .wrap_err_with(|| format!("failed to signal fence value {value}"))?;

        let completed = unsafe { self.fence.GetCompletedValue() };
        if !FenceCounter::is_reached(completed, value) {
            unsafe { self.fence.SetEventOnCompletion(value, self.event) }
                .wrap_err("failed to arm fence event")?;
            let wait = unsafe { WaitForSingleObject(self.event, INFINITE) };
            if wait != WAIT_OBJECT_0 {
                bail!("waiting for fence value {value} failed: {wait:?}");
            }
        }
        Ok(value)
    }

    pub fn last_signaled(&self) -> Option<u64> {
        self.counter.last_signaled()
    }

    /// Closing the event is not checked beyond a warning.
    pub fn close_event(&mut self) {
        if self.event.is_invalid() {
            return;
        }
        if let Err(e) = unsafe { CloseHandle(self.event) } {
            warn!(error = %e, "failed to close fence event");
        }
        self.event = HANDLE::default();
    }
}

impl Drop for FrameFence {
    fn drop(&mut self) {
        self.close_event();
    }
}
