use eyre::WrapErr;
use tracing::debug;
use tracing::info;
use windows::core::*;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use super::create_device::create_device;
use super::create_device::DeviceContext;
use super::create_pipeline_state::create_pipeline_state;
use super::create_present_surface::create_present_surface;
use super::create_present_surface::PresentSurface;
use super::create_root_signature::create_root_signature;
use super::create_vertex_buffer::create_vertex_buffer;
use super::debug_messages::log_dxgi_debug_messages;
use super::frame_fence::FrameFence;
use super::log_feature_support::log_feature_support;
use super::populate_command_list::populate_command_list;
use crate::create_window::NativeWindow;
use crate::error::AppResult;
use crate::frame_loop::FrameLoop;
use crate::launch_options::LaunchOptions;
use crate::teardown::LifecycleObject;
use crate::teardown::Teardown;

/// Every GPU object the sample owns.
///
/// GPU objects are declared in reverse creation order so that an early
/// return still drops them newest first. The normal path goes through
/// [`Renderer::shutdown`].
pub struct Renderer {
    pub(super) frame_fence: FrameFence,
    pub(super) vertex_buffer: ID3D12Resource,
    pub(super) vertex_buffer_view: D3D12_VERTEX_BUFFER_VIEW,
    pub(super) command_list: ID3D12GraphicsCommandList,
    pub(super) pipeline_state: ID3D12PipelineState,
    pub(super) root_signature: ID3D12RootSignature,
    pub(super) command_allocator: ID3D12CommandAllocator,
    pub(super) surface: PresentSurface,
    pub(super) command_queue: ID3D12CommandQueue,
    pub(super) device: ID3D12Device,
    pub(super) adapter: IDXGIAdapter1,
    pub(super) factory: IDXGIFactory4,
    pub(super) info_queue: Option<IDXGIInfoQueue>,
    pub(super) debug_layer: Option<ID3D12Debug>,
    pub(super) viewport: D3D12_VIEWPORT,
    pub(super) scissor_rect: RECT,
    pub(super) frame_loop: FrameLoop,
}

impl Renderer {
    /// Creates the device, the swap chain for `window` and everything the
    /// triangle needs, then waits once so the GPU is idle before the first
    /// frame. Each created object is appended to `created`.
    pub fn new(
        window: &NativeWindow,
        options: &LaunchOptions,
        created: &mut Vec<LifecycleObject>,
    ) -> AppResult<Self> {
        let context = create_device(created)?;
        let info_queue = context.info_queue.clone();
        Self::build(context, window, options, created)
            .inspect_err(|_| log_dxgi_debug_messages(info_queue.as_ref()))
    }

    fn build(
        context: DeviceContext,
        window: &NativeWindow,
        options: &LaunchOptions,
        created: &mut Vec<LifecycleObject>,
    ) -> AppResult<Self> {
        let DeviceContext {
            debug_layer,
            info_queue,
            factory,
            adapter,
            device,
        } = context;

        log_feature_support(&device)?;

        let command_queue: ID3D12CommandQueue = unsafe {
            device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
                Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
                ..Default::default()
            })
        }
        .wrap_err("failed to create command queue")?;
        created.push(LifecycleObject::CommandQueue);

        let (width, height) = options.resolution();
        let surface = create_present_surface(
            &factory,
            &device,
            &command_queue,
            window.hwnd(),
            (width, height),
            created,
        )?;

        let command_allocator: ID3D12CommandAllocator =
            unsafe { device.CreateCommandAllocator(D3D12_COMMAND_LIST_TYPE_DIRECT) }
                .wrap_err("failed to create command allocator")?;
        created.push(LifecycleObject::CommandAllocator);

        let root_signature = create_root_signature(&device)?;
        created.push(LifecycleObject::RootSignature);

        let pipeline_state = create_pipeline_state(&device, &root_signature)?;
        created.push(LifecycleObject::PipelineState);

        let command_list: ID3D12GraphicsCommandList = unsafe {
            device.CreateCommandList(
                0,
                D3D12_COMMAND_LIST_TYPE_DIRECT,
                &command_allocator,
                &pipeline_state,
            )
        }
        .wrap_err("failed to create command list")?;
        // Lists are created open; every frame starts with a reset.
        unsafe { command_list.Close() }.wrap_err("failed to close new command list")?;
        created.push(LifecycleObject::CommandList);

        let (vertex_buffer, vertex_buffer_view) =
            create_vertex_buffer(&device, options.aspect_ratio())?;
        created.push(LifecycleObject::VertexBuffer);

        let mut frame_fence = FrameFence::new(&device, created)?;
        frame_fence
            .signal_and_wait(&command_queue)
            .wrap_err("initial GPU wait failed")?;

        let frame_loop = FrameLoop::new(surface.current_back_buffer_index())?;

        let viewport = D3D12_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: width as f32,
            Height: height as f32,
            MinDepth: D3D12_MIN_DEPTH,
            MaxDepth: 0.0,
        };
        let scissor_rect = RECT {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };

        info!(frame_index = frame_loop.frame_index(), "renderer ready");
        Ok(Self {
            frame_fence,
            vertex_buffer,
            vertex_buffer_view,
            command_list,
            pipeline_state,
            root_signature,
            command_allocator,
            surface,
            command_queue,
            device,
            adapter,
            factory,
            info_queue,
            debug_layer,
            viewport,
            scissor_rect,
            frame_loop,
        })
    }

    /// Records, submits and presents one frame, then blocks until the GPU
    /// has finished it.
    pub fn render_frame(&mut self) -> AppResult<()> {
        let frame_index = self.frame_loop.begin_recording()?;
        populate_command_list(self, frame_index)?;

        let command_list: ID3D12CommandList = self.command_list.cast()?;
        unsafe { self.command_queue.ExecuteCommandLists(&[Some(command_list)]) };
        self.frame_loop.submit()?;

        unsafe { self.surface.swap_chain.Present(1, DXGI_PRESENT(0)) }
            .ok()
            .wrap_err("failed to present")?;
        self.frame_loop.present()?;

        self.frame_fence.signal_and_wait(&self.command_queue)?;
        self.frame_loop
            .complete(self.surface.current_back_buffer_index())?;
        Ok(())
    }

    pub fn exit(&mut self) -> AppResult<()> {
        self.frame_loop.exit()?;
        info!(
            frames_presented = self.frame_loop.frames_presented(),
            fence_value = ?self.frame_fence.last_signaled(),
            "frame loop exited"
        );
        Ok(())
    }

    pub fn log_debug_messages(&self) {
        log_dxgi_debug_messages(self.info_queue.as_ref());
    }

    /// Waits for the GPU to go idle, then releases every object newest
    /// first. Each release is checked against `teardown`.
    pub fn shutdown(mut self, teardown: &mut Teardown) -> AppResult<()> {
        // On failure `self` drops whole, in field order.
        let last_value = self
            .frame_fence
            .signal_and_wait(&self.command_queue)
            .wrap_err("final GPU wait failed")?;
        teardown.fence_drained();
        debug!(
            fence_value = last_value,
            frames_presented = self.frame_loop.frames_presented(),
            "GPU drained"
        );
        self.log_debug_messages();

        // Bindings in creation order, so an early return drops them newest first.
        let Renderer {
            frame_loop: _,
            scissor_rect: _,
            viewport: _,
            debug_layer,
            info_queue,
            factory,
            adapter,
            device,
            command_queue,
            surface,
            command_allocator,
            root_signature,
            pipeline_state,
            command_list,
            vertex_buffer_view: _,
            vertex_buffer,
            mut frame_fence,
        } = self;

        teardown.release(LifecycleObject::FenceEvent)?;
        frame_fence.close_event();
        teardown.release_value(LifecycleObject::Fence, frame_fence)?;
        teardown.release_value(LifecycleObject::VertexBuffer, vertex_buffer)?;
        teardown.release_value(LifecycleObject::CommandList, command_list)?;
        teardown.release_value(LifecycleObject::PipelineState, pipeline_state)?;
        teardown.release_value(LifecycleObject::RootSignature, root_signature)?;
        teardown.release_value(LifecycleObject::CommandAllocator, command_allocator)?;

        let PresentSurface {
            swap_chain,
            rtv_descriptor_size: _,
            rtv_heap,
            render_targets,
        } = surface;
        teardown.release_value(LifecycleObject::RenderTargets, render_targets)?;
        teardown.release_value(LifecycleObject::RtvHeap, rtv_heap)?;
        teardown.release_value(LifecycleObject::SwapChain, swap_chain)?;

        teardown.release_value(LifecycleObject::CommandQueue, command_queue)?;
        teardown.release_value(LifecycleObject::Device, device)?;
        teardown.release_value(LifecycleObject::Adapter, adapter)?;
        teardown.release_value(LifecycleObject::Factory, factory)?;
        if let Some(info_queue) = info_queue {
            teardown.release_value(LifecycleObject::InfoQueue, info_queue)?;
        }
        if let Some(debug_layer) = debug_layer {
            teardown.release_value(LifecycleObject::DebugLayer, debug_layer)?;
        }

        info!(remaining = ?teardown.alive(), "GPU objects released");
        Ok(())
    }
}
