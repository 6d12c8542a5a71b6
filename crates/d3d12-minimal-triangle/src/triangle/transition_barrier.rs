use std::mem::ManuallyDrop;

use windows::Win32::Graphics::Direct3D12::*;

use crate::transitions::SurfaceState;
use crate::transitions::Transition;

fn resource_state(state: SurfaceState) -> D3D12_RESOURCE_STATES {
    match state {
        SurfaceState::Present => D3D12_RESOURCE_STATE_PRESENT,
        SurfaceState::RenderTarget => D3D12_RESOURCE_STATE_RENDER_TARGET,
    }
}

pub fn transition_barrier(
    resource: &ID3D12Resource,
    transition: Transition,
) -> D3D12_RESOURCE_BARRIER {
    D3D12_RESOURCE_BARRIER {
        Type: D3D12_RESOURCE_BARRIER_TYPE_TRANSITION,
        Flags: D3D12_RESOURCE_BARRIER_FLAG_NONE,
        Anonymous: D3D12_RESOURCE_BARRIER_0 {
            // Borrowed pointer: ManuallyDrop keeps the barrier from releasing it.
            Transition: ManuallyDrop::new(D3D12_RESOURCE_TRANSITION_BARRIER {
                pResource: unsafe { std::mem::transmute_copy(resource) },
                StateBefore: resource_state(transition.before),
                StateAfter: resource_state(transition.after),
                Subresource: D3D12_RESOURCE_BARRIER_ALL_SUBRESOURCES,
            }),
        },
    }
}
