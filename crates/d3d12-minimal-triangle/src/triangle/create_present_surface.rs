use eyre::WrapErr;
use tracing::info;
use windows::core::*;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

use super::BACK_BUFFER_FORMAT;
use super::FRAME_COUNT;
use crate::error::AppResult;
use crate::teardown::LifecycleObject;

/// The swap chain, its back buffers and their render target views.
///
/// Fields are declared in reverse creation order.
pub struct PresentSurface {
    pub render_targets: [ID3D12Resource; FRAME_COUNT as usize],
    pub rtv_heap: ID3D12DescriptorHeap,
    pub rtv_descriptor_size: u32,
    pub swap_chain: IDXGISwapChain3,
}

impl PresentSurface {
    pub fn rtv_handle(&self, frame_index: u32) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        D3D12_CPU_DESCRIPTOR_HANDLE {
            ptr: unsafe { self.rtv_heap.GetCPUDescriptorHandleForHeapStart() }.ptr
                + (frame_index * self.rtv_descriptor_size) as usize,
        }
    }

    pub fn current_back_buffer_index(&self) -> u32 {
        unsafe { self.swap_chain.GetCurrentBackBufferIndex() }
    }
}

pub fn create_present_surface(
    factory: &IDXGIFactory4,
    device: &ID3D12Device,
    command_queue: &ID3D12CommandQueue,
    hwnd: HWND,
    (width, height): (u32, u32),
    created: &mut Vec<LifecycleObject>,
) -> AppResult<PresentSurface> {
    let swap_chain_desc = DXGI_SWAP_CHAIN_DESC1 {
        Width: width,
        Height: height,
        Format: BACK_BUFFER_FORMAT,
        Stereo: false.into(),
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: FRAME_COUNT,
        Scaling: DXGI_SCALING_NONE,
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        AlphaMode: DXGI_ALPHA_MODE_UNSPECIFIED,
        Flags: 0,
    };

    let swap_chain: IDXGISwapChain3 = unsafe {
        factory.CreateSwapChainForHwnd(command_queue, hwnd, &swap_chain_desc, None, None)
    }
    .wrap_err("failed to create swap chain")?
    .cast()?;
    created.push(LifecycleObject::SwapChain);

    // Fullscreen transitions are not supported.
    unsafe { factory.MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER) }
        .wrap_err("failed to disable alt-enter")?;

    let rtv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
            NumDescriptors: FRAME_COUNT,
            Flags: D3D12_DESCRIPTOR_HEAP_FLAG_NONE,
            NodeMask: 0,
        })
    }
    .wrap_err("failed to create RTV descriptor heap")?;
    created.push(LifecycleObject::RtvHeap);

    let rtv_descriptor_size =
        unsafe { device.GetDescriptorHandleIncrementSize(D3D12_DESCRIPTOR_HEAP_TYPE_RTV) };
    let heap_start = unsafe { rtv_heap.GetCPUDescriptorHandleForHeapStart() };

    let render_targets: [ID3D12Resource; FRAME_COUNT as usize] =
        array_init::try_array_init(|i| -> AppResult<ID3D12Resource> {
            let resource: ID3D12Resource = unsafe { swap_chain.GetBuffer(i as u32) }
                .wrap_err_with(|| format!("failed to get back buffer {i}"))?;
            unsafe {
                device.CreateRenderTargetView(
                    &resource,
                    None,
                    D3D12_CPU_DESCRIPTOR_HANDLE {
                        ptr: heap_start.ptr + i * rtv_descriptor_size as usize,
                    },
                )
            };
            Ok(resource)
        })?;
    created.push(LifecycleObject::RenderTargets);

    info!(width, height, buffers = FRAME_COUNT, "present surface created");
    Ok(PresentSurface {
        render_targets,
        rtv_heap,
        rtv_descriptor_size,
        swap_chain,
    })
}
