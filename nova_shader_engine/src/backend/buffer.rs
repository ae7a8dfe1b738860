/// Device buffer traits and buffer descriptor

use std::sync::Arc;

use bitflags::bitflags;

use crate::error::Result;

bitflags! {
    /// Placement/usage classification for a device buffer
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BufferUsage: u32 {
        /// Write-combined CPU mapping
        const WRITE_COMBINE = 1 << 0;
        /// CPU-mappable system memory
        const CPU_MAPPABLE = 1 << 1;
    }
}

/// Descriptor for allocating a device buffer
#[derive(Debug, Clone, Copy)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer placement/usage
    pub usage: BufferUsage,
}

/// Device memory buffer
///
/// Implemented by backend-specific buffer types. The memory is released
/// when the last reference is dropped.
pub trait DeviceBuffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Write data through the CPU mapping
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

/// Device buffer allocator interface
pub trait DeviceAllocator: Send + Sync {
    /// Allocate a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    fn create_buffer(&self, desc: BufferDesc) -> Result<Arc<dyn DeviceBuffer>>;
}
