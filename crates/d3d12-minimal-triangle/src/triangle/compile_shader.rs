use eyre::eyre;
use eyre::WrapErr;
use tracing::error;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;

use super::blob::blob_text;
use super::SHADER_SOURCE;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    fn entry_point(self) -> PCSTR {
        match self {
            ShaderStage::Vertex => s!("VSMain"),
            ShaderStage::Pixel => s!("PSMain"),
        }
    }

    fn target(self) -> PCSTR {
        match self {
            ShaderStage::Vertex => s!("vs_5_0"),
            ShaderStage::Pixel => s!("ps_5_0"),
        }
    }
}

/// Compiles one stage of the embedded HLSL source.
pub fn compile_shader(stage: ShaderStage) -> AppResult<ID3DBlob> {
    let flags = if cfg!(debug_assertions) {
        D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
    } else {
        0
    };

    let mut shader_blob: Option<ID3DBlob> = None;
    let mut error_blob: Option<ID3DBlob> = None;
    let result = unsafe {
        D3DCompile(
            SHADER_SOURCE.as_ptr() as *const std::ffi::c_void,
            SHADER_SOURCE.len(),
            s!("shaders.hlsl"),
            None,
            None,
            stage.entry_point(),
            stage.target(),
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        if let Some(error_blob) = &error_blob {
            error!(?stage, message = %blob_text(error_blob), "shader compilation failed");
        }
        return Err(e).wrap_err_with(|| format!("failed to compile {stage:?} shader"));
    }

    shader_blob.ok_or_else(|| eyre!("compiler returned no bytecode for {stage:?} shader"))
}
