use glam::Mat4;
use mooring_core::{hex_to_linear_rgb, Material, MeshData, MeshVertex, ObjectId};
use std::rc::Rc;
use wgpu::util::DeviceExt;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
}

impl From<&Mat4> for InstanceRaw {
    fn from(m: &Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        // slot 0: mesh vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        // slot 1: instance transforms
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Fixed-capacity per-instance transform pool. Only the first `count` slots
/// are drawn.
pub(crate) struct InstanceBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl InstanceBuffer {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        capacity: usize,
        transforms: &[Mat4],
    ) -> Self {
        let capacity = capacity.max(transforms.len()).max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let raw: Vec<InstanceRaw> = transforms.iter().map(InstanceRaw::from).collect();
        queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&raw));
        Self {
            buffer,
            count: transforms.len() as u32,
        }
    }

    pub(crate) fn single(device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> Self {
        Self::new(device, queue, label, 1, &[Mat4::IDENTITY])
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    color: [f32; 4],
    params: [f32; 4],
}

impl From<&Material> for MaterialUniforms {
    fn from(m: &Material) -> Self {
        let [r, g, b] = hex_to_linear_rgb(m.color);
        Self {
            color: [r, g, b, 1.0],
            params: [
                m.metalness,
                m.roughness,
                if m.unlit { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

pub(crate) struct MaterialBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    current: Material,
}

impl MaterialBinding {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        material: Material,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&MaterialUniforms::from(&material)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            buffer,
            bind_group,
            current: material,
        }
    }

    /// Upload a new base colour if it changed since the last frame.
    pub(crate) fn sync_color(&mut self, queue: &wgpu::Queue, color: u32) {
        if self.current.color == color {
            return;
        }
        self.current.color = color;
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::bytes_of(&MaterialUniforms::from(&self.current)),
        );
    }
}

/// One indexed draw: a mesh, its material and its instances. `object` links
/// the draw to a pickable scene object whose colour it mirrors.
pub(crate) struct MeshDraw {
    pub(crate) mesh: Rc<GpuMesh>,
    pub(crate) material: MaterialBinding,
    pub(crate) instances: InstanceBuffer,
    pub(crate) object: Option<ObjectId>,
}

impl MeshDraw {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instances.count == 0 || self.mesh.index_count == 0 {
            return;
        }
        rpass.set_bind_group(1, &self.material.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instances.buffer.slice(..));
        rpass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.mesh.index_count, 0, 0..self.instances.count);
    }
}
