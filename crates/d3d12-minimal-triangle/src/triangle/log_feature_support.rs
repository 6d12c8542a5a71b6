use std::ffi::c_void;

use eyre::WrapErr;
use tracing::debug;
use tracing::info;
use windows::Win32::Graphics::Direct3D12::*;

use crate::error::AppResult;

/// Queries and logs what the device supports. Nothing here changes how the
/// triangle is drawn.
pub fn log_feature_support(device: &ID3D12Device) -> AppResult<()> {
    let mut options = D3D12_FEATURE_DATA_D3D12_OPTIONS::default();
    check_feature_support(device, D3D12_FEATURE_D3D12_OPTIONS, &mut options)
        .wrap_err("failed to query D3D12 options")?;
    debug!(
        resource_binding_tier = options.ResourceBindingTier.0,
        tiled_resources_tier = options.TiledResourcesTier.0,
        resource_heap_tier = options.ResourceHeapTier.0,
        "D3D12 options"
    );

    let mut architecture = D3D12_FEATURE_DATA_ARCHITECTURE::default();
    check_feature_support(device, D3D12_FEATURE_ARCHITECTURE, &mut architecture)
        .wrap_err("failed to query GPU architecture")?;
    // On a UMA part the CPU and GPU share one physical memory pool.
    info!(
        uma = architecture.UMA.as_bool(),
        cache_coherent_uma = architecture.CacheCoherentUMA.as_bool(),
        tile_based_renderer = architecture.TileBasedRenderer.as_bool(),
        "GPU architecture"
    );

    let mut shader_model = D3D12_FEATURE_DATA_SHADER_MODEL {
        HighestShaderModel: D3D_SHADER_MODEL_6_5,
    };
    check_feature_support(device, D3D12_FEATURE_SHADER_MODEL, &mut shader_model)
        .wrap_err("failed to query shader model")?;
    let raw = shader_model.HighestShaderModel.0;
    info!(
        highest_shader_model = %format!("{}.{}", raw >> 4, raw & 0xf),
        "shader model"
    );

    Ok(())
}

fn check_feature_support<T>(
    device: &ID3D12Device,
    feature: D3D12_FEATURE,
    data: &mut T,
) -> windows::core::Result<()> {
    unsafe {
        device.CheckFeatureSupport(
            feature,
            data as *mut T as *mut c_void,
            std::mem::size_of::<T>() as u32,
        )
    }
}
