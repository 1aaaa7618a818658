use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pixelpipe::prelude::*;
use pixelpipe::shaders::{MeshVertex, UnlitColorShader};

const TARGET_WIDTH: u32 = 800;
const TARGET_HEIGHT: u32 = 600;

fn vertex(x: f32, y: f32, z: f32, color: Color) -> MeshVertex {
    MeshVertex {
        position: Vec3::new(x, y, z),
        normal: Vec3::new(0.0, 0.0, -1.0),
        uv: Vec2::ZERO,
        color,
    }
}

fn triangle(scale: f32) -> Vec<MeshVertex> {
    vec![
        vertex(-scale, -scale, 0.5, Color::RED),
        vertex(scale, -scale, 0.5, Color::GREEN),
        vertex(0.0, scale, 0.5, Color::BLUE),
    ]
}

fn grid(rows: u32, cols: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let x = -0.95 + 1.9 * col as f32 / cols as f32;
            let y = -0.95 + 1.9 * row as f32 / rows as f32;
            let size = 0.8 / cols as f32;
            let base = vertices.len() as u32;
            vertices.push(vertex(x, y, 0.5, Color::RED));
            vertices.push(vertex(x + size, y, 0.5, Color::GREEN));
            vertices.push(vertex(x + size / 2.0, y + size, 0.5, Color::BLUE));
            indices.extend([base, base + 1, base + 2]);
        }
    }
    (vertices, indices)
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, scale) in [("small", 0.05f32), ("medium", 0.3), ("large", 0.9)] {
        group.bench_with_input(BenchmarkId::new("gouraud", name), &scale, |b, &scale| {
            let mut raster = GouraudRasterizer::new(UnlitColorShader, GouraudFill).unwrap();
            raster
                .set_render_target(
                    Surface::new(TARGET_WIDTH, TARGET_HEIGHT),
                    ZBuffer::new(TARGET_WIDTH, TARGET_HEIGHT),
                )
                .unwrap();
            raster.set_cull_mode(CullMode::None);
            let vertices = triangle(scale);

            b.iter(|| {
                if let Some(target) = raster.render_target_mut() {
                    target.depth_mut().clear();
                }
                raster
                    .render_triangle_list(black_box(&vertices), &[0, 1, 2])
                    .unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let (vertices, indices) = grid(20, 20);

    group.bench_function("gouraud_400_triangles", |b| {
        let mut raster = GouraudRasterizer::new(UnlitColorShader, GouraudFill).unwrap();
        raster
            .set_render_target(
                Surface::new(TARGET_WIDTH, TARGET_HEIGHT),
                ZBuffer::new(TARGET_WIDTH, TARGET_HEIGHT),
            )
            .unwrap();
        raster.set_cull_mode(CullMode::None);

        b.iter(|| {
            if let Some(target) = raster.render_target_mut() {
                target.depth_mut().clear();
            }
            raster
                .render_triangle_list(black_box(&vertices), black_box(&indices))
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
