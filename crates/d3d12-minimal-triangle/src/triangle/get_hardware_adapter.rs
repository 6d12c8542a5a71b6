use windows::core::*;
use windows::Win32::Graphics::Direct3D12::D3D12CreateDevice;
use windows::Win32::Graphics::Direct3D12::ID3D12Device;
use windows::Win32::Graphics::Dxgi::*;

use super::MINIMUM_FEATURE_LEVEL;
use super::MINIMUM_FEATURE_LEVEL_NAME;
use crate::adapter_selection::select_first_hardware;
use crate::adapter_selection::AdapterProbe;
use crate::error::AppResult;
use crate::error::StartupError;

struct EnumeratedAdapter {
    adapter: IDXGIAdapter1,
    desc: DXGI_ADAPTER_DESC1,
}

impl AdapterProbe for EnumeratedAdapter {
    fn name(&self) -> String {
        let description = &self.desc.Description;
        let len = description
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(description.len());
        String::from_utf16_lossy(&description[..len])
    }

    fn is_software(&self) -> bool {
        (DXGI_ADAPTER_FLAG(self.desc.Flags as i32) & DXGI_ADAPTER_FLAG_SOFTWARE)
            != DXGI_ADAPTER_FLAG_NONE
    }

    fn supports_minimum_feature_level(&self) -> bool {
        // A null output pointer asks whether creation would succeed without
        // creating the device.
        unsafe {
            D3D12CreateDevice(
                &self.adapter,
                MINIMUM_FEATURE_LEVEL,
                std::ptr::null_mut::<Option<ID3D12Device>>(),
            )
        }
        .is_ok()
    }
}

/// Enumerates adapters in DXGI order and picks the first hardware one that
/// supports the minimum feature level.
pub fn get_hardware_adapter(factory: &IDXGIFactory4) -> AppResult<IDXGIAdapter1> {
    let mut index = 0;
    let adapters = std::iter::from_fn(|| {
        let adapter = match unsafe { factory.EnumAdapters1(index) } {
            Ok(adapter) => adapter,
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => return None,
            Err(e) => return Some(Err(e)),
        };
        index += 1;
        Some(unsafe { adapter.GetDesc1() }.map(|desc| EnumeratedAdapter { adapter, desc }))
    });

    match select_first_hardware(adapters)? {
        Some(selected) => Ok(selected.adapter),
        None => Err(StartupError::NoHardwareAdapter {
            minimum_feature_level: MINIMUM_FEATURE_LEVEL_NAME,
        }
        .into()),
    }
}
