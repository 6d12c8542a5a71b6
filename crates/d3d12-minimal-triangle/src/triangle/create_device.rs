use eyre::eyre;
use eyre::WrapErr;
use tracing::info;
use tracing::warn;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use super::get_hardware_adapter::get_hardware_adapter;
use super::MINIMUM_FEATURE_LEVEL;
use crate::error::AppResult;
use crate::teardown::LifecycleObject;

/// Objects created before anything that depends on the window.
pub struct DeviceContext {
    pub debug_layer: Option<ID3D12Debug>,
    pub info_queue: Option<IDXGIInfoQueue>,
    pub factory: IDXGIFactory4,
    pub adapter: IDXGIAdapter1,
    pub device: ID3D12Device,
}

pub fn create_device(created: &mut Vec<LifecycleObject>) -> AppResult<DeviceContext> {
    let mut factory_flags = DXGI_CREATE_FACTORY_FLAGS(0);
    let mut debug_layer = None;
    let mut info_queue = None;

    if cfg!(debug_assertions) {
        let mut debug: Option<ID3D12Debug> = None;
        if let Some(debug) = unsafe { D3D12GetDebugInterface(&mut debug) }.ok().and(debug) {
            unsafe { debug.EnableDebugLayer() };
            factory_flags |= DXGI_CREATE_FACTORY_DEBUG;
            info!("D3D12 debug layer enabled");
            debug_layer = Some(debug);
            created.push(LifecycleObject::DebugLayer);

            match unsafe { DXGIGetDebugInterface1::<IDXGIInfoQueue>(0) } {
                Ok(queue) => {
                    info_queue = Some(queue);
                    created.push(LifecycleObject::InfoQueue);
                }
                Err(e) => warn!(error = %e, "DXGI info queue unavailable"),
            }
        } else {
            warn!("D3D12 debug layer unavailable");
        }
    }

    let factory: IDXGIFactory4 =
        unsafe { CreateDXGIFactory2(factory_flags) }.wrap_err("failed to create DXGI factory")?;
    created.push(LifecycleObject::Factory);

    let adapter = get_hardware_adapter(&factory)?;
    created.push(LifecycleObject::Adapter);

    let mut device: Option<ID3D12Device> = None;
    unsafe { D3D12CreateDevice(&adapter, MINIMUM_FEATURE_LEVEL, &mut device) }
        .wrap_err("failed to create D3D12 device")?;
    let device = device.ok_or_else(|| eyre!("D3D12CreateDevice returned no device"))?;
    created.push(LifecycleObject::Device);

    Ok(DeviceContext {
        debug_layer,
        info_queue,
        factory,
        adapter,
        device,
    })
}
