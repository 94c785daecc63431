use wgpu::util::DeviceExt;

use crate::coords::ClipPoint;
use crate::render::BufferError;

/// Minimum capacity (in points) when a buffer has to grow.
const MIN_GROW_CAPACITY: usize = 64;

/// A vertex buffer of clip-space points.
///
/// Created from an initial upload; [`upload`](Self::upload) rewrites the
/// contents and reallocates only when the data outgrows the buffer.
pub struct VertexBuffer {
    label: String,
    buffer: wgpu::Buffer,
    len: usize,
    capacity: usize,
}

impl VertexBuffer {
    /// Uploads `points` into a new buffer sized exactly to them.
    pub fn from_points(
        device: &wgpu::Device,
        label: &str,
        points: &[ClipPoint],
    ) -> Result<Self, BufferError> {
        if points.is_empty() {
            return Err(BufferError::Empty(label.to_string()));
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(points),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            label: label.to_string(),
            buffer,
            len: points.len(),
            capacity: points.len(),
        })
    }

    /// Replaces the contents with `points`, growing the buffer if needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[ClipPoint]) {
        if points.len() > self.capacity {
            let capacity = grown_capacity(points.len());
            log::debug!("growing `{}` to {capacity} points", self.label);

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (capacity * std::mem::size_of::<ClipPoint>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = capacity;
        }

        if !points.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(points));
        }
        self.len = points.len();
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slice covering the stored points.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer
            .slice(..(self.len * std::mem::size_of::<ClipPoint>()) as u64)
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_GROW_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_power_of_two_with_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }
}
