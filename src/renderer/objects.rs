use super::uniforms::ObjectData;

const INITIAL_OBJECTS_CAPACITY: u32 = 64;

/// Storage buffer holding one [`ObjectData`] per draw. Shaders index it
/// with the instance index passed to `draw_indexed`.
pub struct ObjectsBuffer {
    buffer: wgpu::Buffer,
    capacity: u32,
    pub bind_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl ObjectsBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ObjectsBindLayout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let (buffer, bind_group) =
            Self::allocate(device, &bind_layout, INITIAL_OBJECTS_CAPACITY);

        Self {
            buffer,
            capacity: INITIAL_OBJECTS_CAPACITY,
            bind_layout,
            bind_group,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        capacity: u32,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ObjectsBuffer"),
            size: (capacity as usize * std::mem::size_of::<ObjectData>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ObjectsBindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        (buffer, bind_group)
    }

    /// Upload `objects`, growing the buffer if needed.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, objects: &[ObjectData]) {
        let required = objects.len() as u32;
        if required > self.capacity {
            let new_capacity = required.max(self.capacity * 2);
            log::info!(
                "Growing objects buffer: {} -> {}",
                self.capacity,
                new_capacity
            );
            let (buffer, bind_group) = Self::allocate(device, &self.bind_layout, new_capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = new_capacity;
        }

        if !objects.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(objects));
        }
    }
}
