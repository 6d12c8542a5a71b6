use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Dxgi::Common::*;

pub use crate::frame_loop::FRAME_COUNT;

pub mod blob;
pub mod compile_shader;
pub mod create_device;
pub mod create_pipeline_state;
pub mod create_present_surface;
pub mod create_root_signature;
pub mod create_vertex_buffer;
pub mod debug_messages;
pub mod frame_fence;
pub mod get_hardware_adapter;
pub mod log_feature_support;
pub mod populate_command_list;
pub mod renderer;
pub mod transition_barrier;

pub const MINIMUM_FEATURE_LEVEL: D3D_FEATURE_LEVEL = D3D_FEATURE_LEVEL_12_1;
pub const MINIMUM_FEATURE_LEVEL_NAME: &str = "12_1";

pub const BACK_BUFFER_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

pub const CLEAR_COLOR: [f32; 4] = [0.05, 0.05, 0.05, 1.0];

pub const SHADER_SOURCE: &str = include_str!("../shaders.hlsl");
