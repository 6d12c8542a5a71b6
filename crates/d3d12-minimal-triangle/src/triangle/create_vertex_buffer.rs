use eyre::eyre;
use eyre::WrapErr;
use tracing::debug;
use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

use crate::error::AppResult;
use crate::vertex::triangle;
use crate::vertex::Vertex;

/// Creates the triangle's vertex buffer in an upload heap and copies the
/// vertices in once. The buffer is never written again.
pub fn create_vertex_buffer(
    device: &ID3D12Device,
    aspect_ratio: f32,
) -> AppResult<(ID3D12Resource, D3D12_VERTEX_BUFFER_VIEW)> {
    let vertices = triangle(aspect_ratio);
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    let vertex_buffer_size = bytes.len() as u64;

    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_UPLOAD,
        ..Default::default()
    };

    let resource_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_BUFFER,
        Alignment: 0,
        Width: vertex_buffer_size,
        Height: 1,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: DXGI_FORMAT_UNKNOWN,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_ROW_MAJOR,
        Flags: D3D12_RESOURCE_FLAG_NONE,
    };

    let mut vertex_buffer: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &resource_desc,
            D3D12_RESOURCE_STATE_GENERIC_READ,
            None,
            &mut vertex_buffer,
        )
    }
    .wrap_err("failed to create vertex buffer")?;
    let vertex_buffer =
        vertex_buffer.ok_or_else(|| eyre!("CreateCommittedResource returned no resource"))?;
    // The name only shows up in debugging tools.
    if let Err(error) = unsafe { vertex_buffer.SetName(w!("VertexBuffer")) } {
        debug!(%error, "failed to name vertex buffer");
    }

    unsafe {
        let mut data_ptr = std::ptr::null_mut();
        // Empty read range: the CPU never reads this buffer.
        let read_range = D3D12_RANGE { Begin: 0, End: 0 };
        vertex_buffer
            .Map(0, Some(&read_range), Some(&mut data_ptr))
            .wrap_err("failed to map vertex buffer")?;
        if data_ptr.is_null() {
            return Err(eyre!("mapped vertex buffer pointer is null"));
        }
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), data_ptr as *mut u8, bytes.len());
        vertex_buffer.Unmap(0, None);
    }

    let vbv = D3D12_VERTEX_BUFFER_VIEW {
        BufferLocation: unsafe { vertex_buffer.GetGPUVirtualAddress() },
        StrideInBytes: Vertex::STRIDE,
        SizeInBytes: vertex_buffer_size as u32,
    };

    Ok((vertex_buffer, vbv))
}
