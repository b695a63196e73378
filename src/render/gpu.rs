//! GPU (wgpu) 版の描画
//!
//! コンピュートシェーダの1スレッドが1ピクセルを担当し、反復回数だけを書き出す。
//! 配色は読み戻した後に CPU 側で行う。シェーダ内は f32 で計算する。

use bytemuck::{Pod, Zeroable};
use log::{error, info};

use crate::common::viewport::Viewport;
use crate::error::{EngineError, RenderError};

/// シェーダ側の `@workgroup_size` と一致させる
const WORKGROUP_SIZE: u32 = 64;

/// GPU に渡すパラメータ構造体
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuParams {
    offset_x: f32,
    offset_y: f32,
    zoom: f32,
    width: u32,
    height: u32,
    max_iter: u32,
    _padding: [u32; 2],
}

impl GpuParams {
    pub fn new(vp: &Viewport, width: usize, height: usize, max_iter: u32) -> Self {
        Self {
            offset_x: vp.offset_x as f32,
            offset_y: vp.offset_y as f32,
            zoom: vp.zoom as f32,
            width: width as u32,
            height: height as u32,
            max_iter,
            _padding: [0; 2],
        }
    }

    fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// GPU コンテキスト
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    params_buffer: wgpu::Buffer,
    output_buffer: wgpu::Buffer,
    staging_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    max_pixels: u64,
}

impl GpuContext {
    /// `max_pixels` 分の出力バッファを確保してパイプラインを構築する
    pub fn new(max_pixels: usize) -> Result<Self, EngineError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| EngineError::GpuInit("GPU アダプタが見つかりません".to_string()))?;

        info!("GPU: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Mandelbrot Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| EngineError::GpuInit(e.to_string()))?;

        // エラースコープ外のエラーで panic させない
        device.on_uncaptured_error(Box::new(|e| error!("wgpu: {e}")));

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mandelbrot Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("mandelbrot.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Mandelbrot Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        let max_pixels = max_pixels as u64;
        let buffer_size = max_pixels * std::mem::size_of::<u32>() as u64;

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Params Buffer"),
            size: std::mem::size_of::<GpuParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.as_entire_binding(),
                },
            ],
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            params_buffer,
            output_buffer,
            staging_buffer,
            bind_group,
            max_pixels,
        })
    }

    /// 1フレーム分の反復回数を計算して読み戻す（完了までブロックする）
    pub fn compute(&self, params: &GpuParams) -> Result<Vec<u32>, RenderError> {
        let pixels = params.pixel_count();
        if pixels > self.max_pixels {
            return Err(RenderError::Backend(format!(
                "{} ピクセルは GPU バッファ ({} ピクセル) に収まりません",
                pixels, self.max_pixels
            )));
        }
        let byte_len = pixels * std::mem::size_of::<u32>() as u64;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        self.queue
            .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(params));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Compute Encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Mandelbrot Compute Pass"),
                timestamp_writes: None,
            });

            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &self.bind_group, &[]);
            compute_pass.dispatch_workgroups((pixels as u32).div_ceil(WORKGROUP_SIZE), 1, 1);
        }

        encoder.copy_buffer_to_buffer(&self.output_buffer, 0, &self.staging_buffer, 0, byte_len);

        self.queue.submit(std::iter::once(encoder.finish()));

        if let Some(e) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(RenderError::Backend(e.to_string()));
        }

        let buffer_slice = self.staging_buffer.slice(..byte_len);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|e| RenderError::Backend(e.to_string()))?
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let result: Vec<u32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        self.staging_buffer.unmap();

        Ok(result)
    }
}
