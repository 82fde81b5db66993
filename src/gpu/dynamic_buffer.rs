//! Growable vertex/index buffers.
//!
//! Debug geometry (joint points, bone lines) is regenerated every frame, so
//! its buffers are rewritten in place and only reallocated when the data
//! outgrows them, using a 2x growth strategy.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity after growing to hold `needed` bytes: double the request, and
/// at least 1 KiB more than before.
fn grown_capacity(needed: usize, current: usize) -> usize {
    (needed * 2).max(current + 1024)
}

/// A GPU buffer that can grow dynamically.
///
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer initialized from existing bytes.
    #[must_use]
    pub fn with_bytes(
        device: &wgpu::Device,
        label: &str,
        data: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Self {
        // Never smaller than MIN_CAPACITY bytes.
        let buffer = if data.len() < MIN_CAPACITY {
            let mut padded = data.to_vec();
            padded.resize(MIN_CAPACITY, 0);
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: &padded,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
        } else {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
        };

        Self {
            buffer,
            capacity: data.len().max(MIN_CAPACITY),
            len: data.len(),
            usage,
            label: label.to_owned(),
        }
    }

    /// Write raw bytes to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
    ) -> bool {
        let needed = data.len();

        let reallocated = if needed > self.capacity {
            let new_capacity = grown_capacity(needed, self.capacity);
            log::debug!(
                "growing buffer '{}' from {} to {new_capacity} bytes",
                self.label,
                self.capacity
            );

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes of valid data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no data has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Typed wrapper for [`DynamicBuffer`] that tracks an item count rather
/// than a byte length.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Typed buffer initialized from existing data.
    #[must_use]
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::with_bytes(
                device,
                label,
                bytemuck::cast_slice(data),
                usage,
            ),
            count: data.len(),
            _marker: PhantomData,
        }
    }

    /// Replace the contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner
            .write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Buffer slice covering the valid items.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.inner.buffer().slice(..self.inner.len().max(1) as u64)
    }

    /// Number of items written.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// True if no items have been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Capacity in items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity() / size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_large_requests() {
        assert_eq!(grown_capacity(4096, 1024), 8192);
    }

    #[test]
    fn growth_adds_at_least_one_kib() {
        assert_eq!(grown_capacity(100, 64), 1088);
    }
}
