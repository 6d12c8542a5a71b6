use eyre::WrapErr;
use windows::Win32::Graphics::Direct3D::*;

use super::renderer::Renderer;
use super::transition_barrier::transition_barrier;
use super::CLEAR_COLOR;
use crate::error::AppResult;
use crate::transitions::is_paired;
use crate::transitions::FRAME_TRANSITIONS;

/// Records the fixed frame: clear the back buffer, draw the triangle, and
/// hand the back buffer back to the presentation engine.
///
/// Only called once the fence wait for the previous frame has finished, so
/// the allocator is no longer in use by the GPU.
pub fn populate_command_list(renderer: &Renderer, frame_index: u32) -> AppResult<()> {
    debug_assert!(is_paired(&FRAME_TRANSITIONS));
    let [to_render_target, to_present] = FRAME_TRANSITIONS;
    let command_allocator = &renderer.command_allocator;
    let command_list = &renderer.command_list;
    let back_buffer = &renderer.surface.render_targets[frame_index as usize];

    unsafe { command_allocator.Reset() }.wrap_err("failed to reset command allocator")?;
    unsafe { command_list.Reset(command_allocator, &renderer.pipeline_state) }
        .wrap_err("failed to reset command list")?;

    unsafe {
        command_list.SetGraphicsRootSignature(&renderer.root_signature);
        command_list.RSSetViewports(&[renderer.viewport]);
        command_list.RSSetScissorRects(&[renderer.scissor_rect]);

        command_list.ResourceBarrier(&[transition_barrier(back_buffer, to_render_target)]);
    }

    let rtv_handle = renderer.surface.rtv_handle(frame_index);

    unsafe {
        command_list.OMSetRenderTargets(1, Some(&rtv_handle), false, None);
        command_list.ClearRenderTargetView(rtv_handle, &CLEAR_COLOR, None);
        command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
        command_list.IASetVertexBuffers(0, Some(&[renderer.vertex_buffer_view]));
        command_list.DrawInstanced(3, 1, 0, 0);

        command_list.ResourceBarrier(&[transition_barrier(back_buffer, to_present)]);
    }

    unsafe { command_list.Close() }.wrap_err("failed to close command list")
}
