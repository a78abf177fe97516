use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::Pod;

/// Per-frame array of uniform blocks packed into one buffer.
///
/// Each block sits at a multiple of the device's
/// `min_uniform_buffer_offset_alignment` so draws select their block with a
/// dynamic offset. The buffer grows by powers of two and is reused across
/// frames; `generation` changes whenever it is reallocated so dependent bind
/// groups know to rebuild.
pub struct UniformSlots<U: Pod> {
    label: String,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    stride: u64,
    staging: Vec<u8>,
    generation: u64,
    _marker: PhantomData<U>,
}

impl<U: Pod> UniformSlots<U> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffer: None,
            capacity: 0,
            stride: 0,
            staging: Vec::new(),
            generation: 0,
            _marker: PhantomData,
        }
    }

    /// Size of one block as seen by the shader.
    pub fn binding_size() -> NonZeroU64 {
        NonZeroU64::new(std::mem::size_of::<U>() as u64)
            .unwrap_or(NonZeroU64::MIN)
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dynamic offset of `slot`.
    pub fn offset(&self, slot: usize) -> u32 {
        (slot as u64 * self.stride) as u32
    }

    /// Writes `items` into slots `0..items.len()`, growing the buffer if needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[U]) {
        if items.is_empty() {
            return;
        }

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<U>() as u64, alignment);

        if self.buffer.is_none() || items.len() > self.capacity || stride != self.stride {
            let capacity = items.len().next_power_of_two().max(16);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: capacity as u64 * stride,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
            self.stride = stride;
            self.generation = self.generation.wrapping_add(1);
            log::debug!("{}: {} slots x {} bytes", self.label, capacity, stride);
        }

        pack_slots(&mut self.staging, items, self.stride);

        let Some(buffer) = self.buffer.as_ref() else { return };
        queue.write_buffer(buffer, 0, &self.staging);
    }
}

/// Rounds `size` up to a multiple of `alignment` (treated as at least 1).
pub(crate) fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment).max(1) * alignment
}

fn pack_slots<U: Pod>(staging: &mut Vec<u8>, items: &[U], stride: u64) {
    let stride = stride as usize;
    staging.clear();
    staging.resize(items.len() * stride, 0);
    for (i, item) in items.iter().enumerate() {
        let bytes = bytemuck::bytes_of(item);
        staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
    }
}
