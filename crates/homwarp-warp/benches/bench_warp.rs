use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use homwarp_image::Image;
use homwarp_warp::{warp_homography, Homography, WarpConfig};

fn bench_warp_homography(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpHomography");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image = Image::from_size_val([*width, *height].into(), 3, 0.5).unwrap();
        let h = Homography([0.9, 0.1, 4.0, -0.1, 0.9, -2.0, 1e-5, 1e-5, 1.0]);

        for order in [1usize, 3, 11] {
            let config = WarpConfig {
                order,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("order_{}", order), &parameter_string),
                &(&image, h, config),
                |b, i| {
                    let (src, h, config) = (i.0, i.1, i.2);
                    b.iter(|| warp_homography(black_box(src), black_box(&h), black_box(&config)))
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_warp_homography);
criterion_main!(benches);
