use eyre::eyre;
use eyre::WrapErr;
use tracing::error;
use windows::Win32::Graphics::Direct3D::ID3DBlob;
use windows::Win32::Graphics::Direct3D12::*;

use super::blob::blob_bytes;
use super::blob::blob_text;
use crate::error::AppResult;

/// An empty root signature: the pipeline only reads the input assembler.
pub fn create_root_signature(device: &ID3D12Device) -> AppResult<ID3D12RootSignature> {
    let desc = D3D12_ROOT_SIGNATURE_DESC {
        Flags: D3D12_ROOT_SIGNATURE_FLAG_ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT,
        ..Default::default()
    };

    let mut signature_blob: Option<ID3DBlob> = None;
    let mut error_blob: Option<ID3DBlob> = None;

    let serialized = unsafe {
        D3D12SerializeRootSignature(
            &desc,
            D3D_ROOT_SIGNATURE_VERSION_1,
            &mut signature_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = serialized {
        if let Some(error_blob) = &error_blob {
            error!(message = %blob_text(error_blob), "root signature serialization failed");
        }
        return Err(e).wrap_err("failed to serialize root signature");
    }

    let signature_blob =
        signature_blob.ok_or_else(|| eyre!("root signature serializer returned no blob"))?;

    unsafe { device.CreateRootSignature(0, blob_bytes(&signature_blob)) }
        .wrap_err("failed to create root signature")
}
